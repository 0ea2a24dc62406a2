//! Mock implementations of core port traits.

use std::sync::{Arc, Mutex, PoisonError};

use lust_meter_core::domain::{
    AnalysisResult, Notice, PredictionReport, SessionState, UploadedImage,
};
use lust_meter_core::ports::{
    Notification, NotificationSink, PayloadSource, RandomSource, ResultOutput,
};

/// Scripted `RandomSource` that replays a fixed list of draws.
///
/// Cycles back to the start once exhausted.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    draws: Vec<f64>,
    position: usize,
}

impl SequenceRandom {
    /// Creates a source replaying `draws`. An empty list always yields `0.0`.
    #[must_use]
    pub const fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Creates a source that always yields `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Returns how many draws were taken.
    #[must_use]
    pub const fn draws_taken(&self) -> usize {
        self.position
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f64 {
        let value = if self.draws.is_empty() {
            0.0
        } else {
            self.draws[self.position % self.draws.len()]
        };
        self.position += 1;
        value
    }
}

/// Mock implementation of `PayloadSource` for testing.
///
/// Yields pre-built payloads, and errors where a failing load was requested.
pub struct MockPayloadSource {
    items: Vec<Result<UploadedImage, String>>,
    iteration_count: Arc<Mutex<usize>>,
}

impl MockPayloadSource {
    /// Creates a new mock source with the given payloads.
    #[must_use]
    pub fn new(payloads: Vec<UploadedImage>) -> Self {
        Self {
            items: payloads.into_iter().map(Ok).collect(),
            iteration_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Creates an empty mock source.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Appends an item that fails to load with `message`.
    #[must_use]
    pub fn with_failure(mut self, message: impl Into<String>) -> Self {
        self.items.push(Err(message.into()));
        self
    }

    /// Returns the number of times the source has been iterated.
    #[must_use]
    pub fn iteration_count(&self) -> usize {
        *self
            .iteration_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PayloadSource for MockPayloadSource {
    fn payloads(&self) -> Box<dyn Iterator<Item = anyhow::Result<UploadedImage>> + Send + '_> {
        if let Ok(mut c) = self.iteration_count.lock() {
            *c += 1;
        }
        Box::new(self.items.iter().map(|item| match item {
            Ok(payload) => Ok(payload.clone()),
            Err(message) => Err(anyhow::anyhow!("{message}")),
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

/// Mock implementation of `NotificationSink` for testing.
///
/// Captures notifications for later assertions.
pub struct MockNotificationSink {
    notifications: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotificationSink {
    /// Creates a new mock sink.
    #[must_use]
    pub fn new() -> Self {
        Self {
            notifications: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Returns all captured notifications.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the sequence of states entered.
    #[must_use]
    pub fn states(&self) -> Vec<SessionState> {
        self.notifications()
            .iter()
            .filter_map(|n| match n {
                Notification::StateChanged { to, .. } => Some(*to),
                _ => None,
            })
            .collect()
    }

    /// Returns all notices from rejected actions.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Rejected { notice } => Some(notice),
                _ => None,
            })
            .collect()
    }

    /// Returns all results announced.
    #[must_use]
    pub fn results(&self) -> Vec<AnalysisResult> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::ResultReady { result } => Some(result),
                _ => None,
            })
            .collect()
    }
}

impl Default for MockNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for MockNotificationSink {
    fn on_notification(&self, notification: Notification) {
        self.notifications
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Mock implementation of `ResultOutput` for testing.
///
/// Captures reports for later assertions.
pub struct MockResultOutput {
    reports: Arc<Mutex<Vec<PredictionReport>>>,
    flush_count: Arc<Mutex<usize>>,
}

impl MockResultOutput {
    /// Creates a new mock output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            reports: Arc::new(Mutex::new(Vec::new())),
            flush_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Returns all captured reports.
    #[must_use]
    pub fn reports(&self) -> Vec<PredictionReport> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the number of times `flush()` was called.
    #[must_use]
    pub fn flush_count(&self) -> usize {
        *self
            .flush_count
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockResultOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultOutput for MockResultOutput {
    fn write(&self, report: &PredictionReport) -> anyhow::Result<()> {
        self.reports
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(report.clone());
        Ok(())
    }

    fn flush(&self) -> anyhow::Result<()> {
        if let Ok(mut c) = self.flush_count.lock() {
            *c += 1;
        }
        Ok(())
    }
}
