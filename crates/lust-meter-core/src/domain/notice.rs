//! User-visible advisories raised by rejected actions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An advisory notice. Never fatal; the session stays in its prior state.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The payload exceeds the upload limit.
    #[error("Image size should be less than {}", format_limit(*limit))]
    PayloadTooLarge {
        /// Declared payload size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: u64,
    },
}

const MIB: u64 = 1024 * 1024;

/// Whole mebibytes render as `NMB`, anything else as exact bytes.
fn format_limit(limit: u64) -> String {
    if limit > 0 && limit % MIB == 0 {
        format!("{}MB", limit / MIB)
    } else {
        format!("{limit} bytes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_large_message() {
        let notice = Notice::PayloadTooLarge {
            size: 11 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(notice.to_string(), "Image size should be less than 10MB");
    }

    #[test]
    fn test_limit_below_one_mebibyte_renders_bytes() {
        let notice = Notice::PayloadTooLarge {
            size: 101,
            limit: 100,
        };
        assert_eq!(notice.to_string(), "Image size should be less than 100 bytes");
    }

    #[test]
    fn test_uneven_limit_is_not_rounded() {
        let notice = Notice::PayloadTooLarge {
            size: 15_000_001,
            limit: 15_000_000,
        };
        assert_eq!(
            notice.to_string(),
            "Image size should be less than 15000000 bytes"
        );
    }

    #[test]
    fn test_whole_mebibyte_limits() {
        let notice = Notice::PayloadTooLarge {
            size: u64::MAX,
            limit: 20 * 1024 * 1024,
        };
        assert_eq!(notice.to_string(), "Image size should be less than 20MB");
    }
}
