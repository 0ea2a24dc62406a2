//! Payload builders for testing.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lust_meter_core::domain::{MediaType, UploadedImage, MAX_UPLOAD_BYTES};

/// Builder for synthetic payloads.
///
/// Image payloads carry real encoded bytes so they can be written to disk and
/// sniffed by the filesystem adapter.
pub struct PayloadBuilder;

impl PayloadBuilder {
    // === Real Images ===

    /// Creates a PNG payload with a diagonal gradient.
    #[must_use]
    pub fn png(width: u32, height: u32) -> UploadedImage {
        let bytes = Self::encode(&Self::gradient(width, height), ImageFormat::Png);
        UploadedImage::new(MediaType::new("image/png"), bytes).with_name("synthetic.png")
    }

    /// Creates a JPEG payload with a diagonal gradient.
    #[must_use]
    pub fn jpeg(width: u32, height: u32) -> UploadedImage {
        let bytes = Self::encode(&Self::gradient(width, height), ImageFormat::Jpeg);
        UploadedImage::new(MediaType::new("image/jpeg"), bytes).with_name("synthetic.jpg")
    }

    /// Encodes an image to bytes in the given format.
    ///
    /// # Panics
    ///
    /// Panics if encoding fails, which only happens for formats the `image`
    /// crate was built without.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn encode(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        image.write_to(&mut buf, format).expect("encode synthetic image");
        buf.into_inner()
    }

    /// Creates a diagonal RGB gradient.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn gradient(width: u32, height: u32) -> DynamicImage {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let r = ((255 * x) / width.max(1)) as u8;
            let g = ((255 * y) / height.max(1)) as u8;
            Rgb([r, g, 128])
        });
        DynamicImage::ImageRgb8(img)
    }

    // === Sized Payloads ===

    /// Creates an image payload with exactly `size` declared bytes.
    ///
    /// The bytes are zeros; only the declared size and media type matter to
    /// the session.
    #[must_use]
    pub fn image_of_size(size: u64) -> UploadedImage {
        UploadedImage::new(MediaType::new("image/jpeg"), Vec::new())
            .with_name(format!("sized-{size}.jpg"))
            .with_declared_size(size)
    }

    /// Creates an image payload one byte over the upload limit.
    #[must_use]
    pub fn oversized() -> UploadedImage {
        Self::image_of_size(MAX_UPLOAD_BYTES + 1)
    }

    /// Creates an image payload exactly at the upload limit.
    #[must_use]
    pub fn at_limit() -> UploadedImage {
        Self::image_of_size(MAX_UPLOAD_BYTES)
    }

    // === Non-Images ===

    /// Creates a plain-text payload.
    #[must_use]
    pub fn text(content: &str) -> UploadedImage {
        UploadedImage::new(MediaType::new("text/plain"), content.as_bytes().to_vec())
            .with_name("notes.txt")
    }

    /// Creates a PDF-typed payload.
    #[must_use]
    pub fn pdf() -> UploadedImage {
        UploadedImage::new(MediaType::new("application/pdf"), b"%PDF-1.7\n".to_vec())
            .with_name("document.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_is_decodable() {
        let payload = PayloadBuilder::png(16, 8);
        assert_eq!(payload.size, payload.bytes.len() as u64);
        assert_eq!(
            image::guess_format(&payload.bytes).ok(),
            Some(ImageFormat::Png)
        );
    }

    #[test]
    fn test_jpeg_is_decodable() {
        let payload = PayloadBuilder::jpeg(16, 16);
        assert_eq!(
            image::guess_format(&payload.bytes).ok(),
            Some(ImageFormat::Jpeg)
        );
    }

    #[test]
    fn test_limits() {
        assert_eq!(PayloadBuilder::at_limit().size, 10_485_760);
        assert_eq!(PayloadBuilder::oversized().size, 10_485_761);
        assert!(PayloadBuilder::oversized().media_type.is_image());
    }

    #[test]
    fn test_non_images() {
        assert!(!PayloadBuilder::text("hi").media_type.is_image());
        assert!(!PayloadBuilder::pdf().media_type.is_image());
    }
}
