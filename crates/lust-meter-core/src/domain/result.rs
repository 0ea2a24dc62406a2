//! Analysis result types.

use serde::{Deserialize, Serialize};

use super::Bucket;

/// Outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Attraction percentage, 50 to 90 inclusive.
    pub percentage: u8,
    /// Short label of the bucket.
    pub title: String,
    /// One-sentence description.
    pub description: String,
    /// One-sentence advice.
    pub advice: String,
}

impl AnalysisResult {
    /// Builds a result from a score and the bucket it was classified into.
    ///
    /// All three strings come from `bucket`, so they never mix.
    #[must_use]
    pub fn from_bucket(percentage: u8, bucket: &Bucket) -> Self {
        Self {
            percentage,
            title: bucket.title.to_owned(),
            description: bucket.description.to_owned(),
            advice: bucket.advice.to_owned(),
        }
    }
}
