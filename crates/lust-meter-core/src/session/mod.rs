//! The upload/analyze/result session state machine.
//!
//! A [`Session`] is driven by [`SessionEvent`]s and answers each one with a
//! list of [`Effect`]s. It never sleeps and never touches a clock: the
//! analysis delay is an [`Effect::ScheduleCompletion`] that the host turns into
//! a timer, feeding [`SessionEvent::AnalysisCompleted`] back in when it fires.
//!
//! ```text
//!            submit            start              completed(g)
//!   Empty ──────────► ImageLoaded ─────► Analyzing ─────────► ResultReady
//!     ▲                   │  ▲ submit       │                    │
//!     └──── reset ────────┴──┴──────────────┴─────── reset ──────┘
//! ```

mod config;
mod event;
mod machine;

pub use config::SessionConfig;
pub use event::{Effect, Generation, SessionEvent};
pub use machine::{reduce, Session};
