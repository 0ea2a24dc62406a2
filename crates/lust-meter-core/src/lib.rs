//! Lust Meter Core - Domain logic for the prediction session
//!
//! This crate contains the session state machine, the prediction rule that maps
//! a random score to a message bucket, the decorative sparkle overlay, and the
//! port traits adapters implement.

pub mod domain;
pub mod overlay;
pub mod ports;
pub mod prediction;
pub mod session;

pub use domain::{
    AnalysisResult, Bucket, MediaType, Notice, PredictionReport, SessionState, UploadSource,
    UploadedImage,
};
pub use overlay::{DecorativeOverlay, SparkleMarker};
pub use ports::{Notification, NotificationSink, PayloadSource, RandomSource, ResultOutput};
pub use session::{Effect, Generation, Session, SessionConfig, SessionEvent};
