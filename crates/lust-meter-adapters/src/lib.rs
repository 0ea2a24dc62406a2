//! Lust Meter Adapters - External adapters for lust-meter.
//!
//! This crate provides adapters for:
//! - Filesystem payload source
//! - Random sources backed by `rand`
//! - The tokio session driver that executes scheduled completions

pub mod driver;
pub mod fs;
pub mod random;

pub use driver::SessionDriver;
pub use fs::FsPayloadSource;
pub use random::{SeededRandom, ThreadRandom};
