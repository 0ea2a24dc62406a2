//! Uploaded payload types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Largest accepted payload, in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Declared media (MIME) type of a payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaType(String);

impl MediaType {
    /// Fallback type for payloads whose kind could not be determined.
    pub const OCTET_STREAM: &'static str = "application/octet-stream";

    /// Creates a media type from its string form.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the media type string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for any `image/*` type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.0
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"))
    }
}

impl Default for MediaType {
    fn default() -> Self {
        Self::new(Self::OCTET_STREAM)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How a payload reached the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSource {
    /// Click-to-select file picker. The picker already filters to images.
    #[default]
    Picker,
    /// Drag-and-drop onto the upload area.
    Drop,
}

/// An image payload held by a session.
///
/// The bytes are opaque: nothing in the core decodes them.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Name of the payload, usually the file it was read from.
    pub name: Option<String>,
    /// Declared media type.
    pub media_type: MediaType,
    /// Declared size in bytes.
    pub size: u64,
    /// Raw payload bytes.
    pub bytes: Vec<u8>,
}

impl UploadedImage {
    /// Creates a payload whose declared size is the byte length.
    #[must_use]
    pub fn new(media_type: MediaType, bytes: Vec<u8>) -> Self {
        Self {
            name: None,
            media_type,
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Overrides the declared size.
    ///
    /// Declared and actual sizes can differ when the host reports the size
    /// before the bytes are read.
    #[must_use]
    pub const fn with_declared_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    /// Name for reports and log lines.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("size", &self.size)
            .field("bytes", &format_args!("<{} bytes>", self.bytes.len()))
            .finish()
    }
}
