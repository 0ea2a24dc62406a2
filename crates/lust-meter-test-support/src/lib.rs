//! Test support utilities for lust-meter.
//!
//! Provides mocks of every core port, scripted random sequences, and payload
//! builders for exercising sessions without a real file system.
//!
//! # Example
//!
//! ```
//! use lust_meter_test_support::{MockPayloadSource, PayloadBuilder, SequenceRandom};
//!
//! // A real 8x8 PNG and a payload claiming to be 11 MiB
//! let small = PayloadBuilder::png(8, 8);
//! let huge = PayloadBuilder::oversized();
//!
//! let source = MockPayloadSource::new(vec![small, huge]);
//! let random = SequenceRandom::new(vec![0.0, 0.5]);
//! ```

mod builders;
mod mocks;

pub use builders::PayloadBuilder;
pub use mocks::{MockNotificationSink, MockPayloadSource, MockResultOutput, SequenceRandom};
