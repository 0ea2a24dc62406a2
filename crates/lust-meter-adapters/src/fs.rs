//! Filesystem adapter for loading payloads.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::ImageFormat;
use lust_meter_core::{MediaType, PayloadSource, UploadedImage};
use tracing::{debug, warn};

/// Extensions picked up when scanning directories.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tiff", "tif"];

/// Bytes read from an oversized file to sniff its type.
const SNIFF_LEN: u64 = 32;

/// Filesystem payload source adapter.
///
/// Files named explicitly are loaded whatever their type, so the session can
/// apply its own media-type rules. Directories only contribute images.
pub struct FsPayloadSource {
    paths: Vec<PathBuf>,
    recursive: bool,
    size_limit: Option<u64>,
}

impl FsPayloadSource {
    /// Creates a new filesystem payload source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Files or directories to scan
    /// * `recursive` - Whether to recurse into subdirectories
    #[must_use]
    pub const fn new(paths: Vec<PathBuf>, recursive: bool) -> Self {
        Self {
            paths,
            recursive,
            size_limit: None,
        }
    }

    /// Skips reading the contents of files larger than `limit`.
    ///
    /// Such payloads carry their on-disk size as the declared size and no
    /// bytes, which is all the session needs to reject them.
    #[must_use]
    pub const fn with_size_limit(mut self, limit: u64) -> Self {
        self.size_limit = Some(limit);
        self
    }

    /// Collects all files from the configured paths.
    ///
    /// Explicit paths that are not directories are kept even when missing, so
    /// loading them reports an error instead of dropping them silently.
    fn collect_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in &self.paths {
            if path.is_dir() {
                self.collect_from_dir(path, &mut files);
            } else {
                files.push(path.clone());
            }
        }

        files
    }

    fn collect_from_dir(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let mut entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(e) => e.flatten().map(|entry| entry.path()).collect(),
            Err(e) => {
                warn!("Failed to read directory {}: {e}", dir.display());
                return;
            }
        };
        entries.sort();

        for path in entries {
            if path.is_file() && has_image_extension(&path) {
                files.push(path);
            } else if path.is_dir() && self.recursive {
                self.collect_from_dir(&path, files);
            }
        }
    }
}

impl PayloadSource for FsPayloadSource {
    fn payloads(&self) -> Box<dyn Iterator<Item = Result<UploadedImage>> + Send + '_> {
        let files = self.collect_files();
        debug!("Found {} files", files.len());

        Box::new(
            files
                .into_iter()
                .map(|path| load_payload(&path, self.size_limit)),
        )
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.collect_files().len())
    }
}

/// Checks if a path has an image extension.
fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// Determines the media type from content, then from the extension.
fn detect_media_type(path: &Path, bytes: &[u8]) -> MediaType {
    image::guess_format(bytes)
        .or_else(|_| ImageFormat::from_path(path))
        .map_or_else(|_| MediaType::default(), |f| MediaType::new(f.to_mime_type()))
}

/// Loads a payload from the filesystem.
///
/// Files over `size_limit` are not read past their first few bytes.
fn load_payload(path: &Path, size_limit: Option<u64>) -> Result<UploadedImage> {
    let metadata = std::fs::metadata(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Not a file: {}", path.display());
    }
    let size = metadata.len();

    if size_limit.is_some_and(|limit| size > limit) {
        let prefix = read_prefix(path)?;
        let media_type = detect_media_type(path, &prefix);
        debug!(
            "Not reading {} as {media_type}: {size} bytes over limit",
            path.display()
        );
        return Ok(UploadedImage::new(media_type, Vec::new())
            .with_name(path.to_string_lossy())
            .with_declared_size(size));
    }

    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let media_type = detect_media_type(path, &bytes);
    debug!("Loaded {} as {media_type} ({} bytes)", path.display(), bytes.len());

    Ok(UploadedImage::new(media_type, bytes).with_name(path.to_string_lossy()))
}

fn read_prefix(path: &Path) -> Result<Vec<u8>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut prefix = Vec::new();
    file.take(SNIFF_LEN)
        .read_to_end(&mut prefix)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_image_extension() {
        assert!(has_image_extension(Path::new("test.jpg")));
        assert!(has_image_extension(Path::new("test.JPEG")));
        assert!(has_image_extension(Path::new("test.png")));
        assert!(has_image_extension(Path::new("test.webp")));
        assert!(!has_image_extension(Path::new("test.txt")));
        assert!(!has_image_extension(Path::new("test")));
    }

    #[test]
    fn test_detect_media_type_prefers_content() {
        let png_magic = b"\x89PNG\r\n\x1a\n\0\0\0\0";
        assert_eq!(
            detect_media_type(Path::new("photo.jpg"), png_magic).as_str(),
            "image/png"
        );
    }

    #[test]
    fn test_detect_media_type_falls_back_to_extension() {
        assert_eq!(
            detect_media_type(Path::new("photo.jpg"), b"not really").as_str(),
            "image/jpeg"
        );
        assert_eq!(
            detect_media_type(Path::new("notes.txt"), b"hello").as_str(),
            MediaType::OCTET_STREAM
        );
    }
}
