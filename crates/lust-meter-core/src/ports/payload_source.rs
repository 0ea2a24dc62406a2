//! Payload source port for feeding images into sessions.

use crate::domain::UploadedImage;

/// Port for loading payloads from a source.
pub trait PayloadSource: Send + Sync {
    /// Returns an iterator over payloads from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if a payload fails to load.
    fn payloads(&self) -> Box<dyn Iterator<Item = anyhow::Result<UploadedImage>> + Send + '_>;

    /// Returns the total number of payloads, if known.
    fn count_hint(&self) -> Option<usize>;
}
