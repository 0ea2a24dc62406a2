//! Notification port for the view surrounding a session.

use serde::Serialize;

use crate::domain::{AnalysisResult, Notice, SessionState};

/// Notifications a session emits for its host to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Notification {
    /// The session moved to another state.
    StateChanged {
        /// Previous state.
        from: SessionState,
        /// New state.
        to: SessionState,
    },
    /// An action was rejected with a user-visible notice.
    Rejected {
        /// What went wrong.
        notice: Notice,
    },
    /// A result is ready.
    ResultReady {
        /// The result.
        result: AnalysisResult,
    },
}

/// Port for receiving session notifications.
pub trait NotificationSink: Send + Sync {
    /// Called for every notification, in emission order.
    fn on_notification(&self, notification: Notification);
}
