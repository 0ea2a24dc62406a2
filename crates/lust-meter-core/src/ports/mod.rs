//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the session core and the hosts
//! and adapters that drive it.

mod notification;
mod payload_source;
mod random;
mod result_output;

pub use notification::{Notification, NotificationSink};
pub use payload_source::PayloadSource;
pub use random::RandomSource;
pub use result_output::ResultOutput;
