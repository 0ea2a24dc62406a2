//! Session lifecycle states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The active phase of a session. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No image loaded.
    #[default]
    Empty,
    /// An image is loaded and can be analyzed.
    ImageLoaded,
    /// Waiting for the simulated analysis to finish.
    Analyzing,
    /// A result is available.
    ResultReady,
}

impl SessionState {
    /// Returns the state name in snake case.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::ImageLoaded => "image_loaded",
            Self::Analyzing => "analyzing",
            Self::ResultReady => "result_ready",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
