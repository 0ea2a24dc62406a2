//! Progress spinner adapter using indicatif.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use lust_meter_core::{Notification, NotificationSink, SessionState};
use tracing::debug;

/// Spinner shown while an analysis is in flight, plus stderr notices.
pub struct ProgressSpinner {
    bar: Option<ProgressBar>,
    quiet: bool,
    current: Mutex<String>,
    position: Mutex<String>,
}

impl ProgressSpinner {
    /// Creates a new spinner.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, suppress all output
    /// * `show_spinner` - If true, animate a spinner during analysis
    #[must_use]
    pub fn new(quiet: bool, show_spinner: bool) -> Self {
        let bar = (!quiet && show_spinner).then(|| {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) =
                ProgressStyle::default_spinner().template("{spinner:.magenta} {prefix} {msg}")
            {
                bar.set_style(style);
            }
            bar
        });

        Self {
            bar,
            quiet,
            current: Mutex::new(String::new()),
            position: Mutex::new(String::new()),
        }
    }

    /// Records the payload about to be submitted and its place in the batch.
    pub fn begin(&self, name: &str, index: usize, total: Option<usize>) {
        name.clone_into(&mut self.current.lock().unwrap_or_else(PoisonError::into_inner));
        *self.position.lock().unwrap_or_else(PoisonError::into_inner) = match total {
            Some(total) => format!("[{}/{total}]", index + 1),
            None => format!("[{}]", index + 1),
        };
    }

    /// Clears the spinner line once all payloads are done.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    fn current(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl NotificationSink for ProgressSpinner {
    fn on_notification(&self, notification: Notification) {
        debug!("Notification: {notification:?}");
        if self.quiet {
            return;
        }

        match notification {
            Notification::StateChanged { to, .. } => {
                if let Some(bar) = &self.bar {
                    if to == SessionState::Analyzing {
                        bar.set_prefix(
                            self.position
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .clone(),
                        );
                        bar.set_message(format!("Analyzing your magnetism... {}", self.current()));
                        bar.enable_steady_tick(Duration::from_millis(100));
                    } else {
                        bar.disable_steady_tick();
                        bar.set_message(String::new());
                    }
                }
            }
            Notification::Rejected { notice } => {
                let line = format!("warning: {}: {notice}", self.current());
                if let Some(bar) = &self.bar {
                    bar.suspend(|| eprintln!("{line}"));
                } else {
                    eprintln!("{line}");
                }
            }
            Notification::ResultReady { result } => {
                if let Some(bar) = &self.bar {
                    bar.disable_steady_tick();
                    bar.set_message(String::new());
                } else {
                    eprintln!("{}: {}% {}", self.current(), result.percentage, result.title);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(spinner: &ProgressSpinner) -> String {
        spinner
            .position
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[test]
    fn test_begin_records_name_and_position() {
        let spinner = ProgressSpinner::new(true, false);
        spinner.begin("me.png", 1, Some(3));
        assert_eq!(spinner.current(), "me.png");
        assert_eq!(position(&spinner), "[2/3]");

        spinner.begin("you.png", 4, None);
        assert_eq!(position(&spinner), "[5]");
    }
}
