//! Inputs and outputs of the session reducer.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{UploadSource, UploadedImage};
use crate::ports::Notification;

/// Identifies one analysis run. Completions carrying an older generation are
/// stale and get discarded.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Generation(u64);

impl Generation {
    /// Returns the following generation.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Returns the raw counter.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Events a session reacts to.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The user selected or dropped a payload.
    SubmitImage {
        /// The payload.
        payload: UploadedImage,
        /// How it arrived.
        source: UploadSource,
    },
    /// The user asked for an analysis.
    StartAnalysis,
    /// A scheduled completion fired.
    AnalysisCompleted {
        /// Generation the completion was scheduled for.
        generation: Generation,
    },
    /// The user asked to start over.
    Reset,
}

impl SessionEvent {
    /// Shorthand for a click-to-select submission.
    #[must_use]
    pub fn picked(payload: UploadedImage) -> Self {
        Self::SubmitImage {
            payload,
            source: UploadSource::Picker,
        }
    }

    /// Shorthand for a drag-and-drop submission.
    #[must_use]
    pub fn dropped(payload: UploadedImage) -> Self {
        Self::SubmitImage {
            payload,
            source: UploadSource::Drop,
        }
    }
}

/// Work the host must carry out after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Forward a notification to the view.
    Notify(Notification),
    /// Feed `AnalysisCompleted { generation }` back after `delay`.
    ScheduleCompletion {
        /// Generation to complete.
        generation: Generation,
        /// How long to wait.
        delay: Duration,
    },
}
