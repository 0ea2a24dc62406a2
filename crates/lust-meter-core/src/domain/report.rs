//! Report written by hosts once a session produced a result.

use serde::{Deserialize, Serialize};

use super::{AnalysisResult, MediaType};

/// A finished prediction, as emitted to result outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionReport {
    /// Name of the analyzed payload.
    pub source: String,
    /// Timestamp of the result (RFC 3339).
    pub timestamp: String,
    /// Declared payload size in bytes.
    pub size: u64,
    /// Declared media type.
    pub media_type: MediaType,
    /// The prediction itself.
    #[serde(flatten)]
    pub result: AnalysisResult,
}
