//! Core domain types for a prediction session.

mod bucket;
mod notice;
mod report;
mod result;
mod state;
mod upload;

pub use bucket::{Bucket, BUCKETS};
pub use notice::Notice;
pub use report::PredictionReport;
pub use result::AnalysisResult;
pub use state::SessionState;
pub use upload::{MediaType, UploadSource, UploadedImage, MAX_UPLOAD_BYTES};
