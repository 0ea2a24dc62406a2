//! Session limits and timings.

use std::time::Duration;

use crate::domain::MAX_UPLOAD_BYTES;

/// Configuration for a [`Session`](super::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Largest accepted payload in bytes.
    pub max_upload_bytes: u64,
    /// Shortest analysis delay.
    pub min_delay: Duration,
    /// Width of the delay window above `min_delay`.
    pub delay_span: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: MAX_UPLOAD_BYTES,
            min_delay: Duration::from_millis(2000),
            delay_span: Duration::from_millis(2000),
        }
    }
}
