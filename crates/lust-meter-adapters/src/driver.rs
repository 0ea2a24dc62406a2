//! Tokio driver that executes session effects.
//!
//! The [`Session`] only emits effects. This driver forwards notifications to a
//! [`NotificationSink`] and turns each scheduled completion into a timer on the
//! current tokio runtime. Completions are delivered in deadline order. Timers
//! for runs the session has moved past are dropped as soon as it moves on.

use std::time::Duration;

use lust_meter_core::{
    AnalysisResult, Effect, Generation, NotificationSink, RandomSource, Session, SessionConfig,
    SessionEvent, SessionState, UploadSource, UploadedImage,
};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

/// A completion waiting for its timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingCompletion {
    deadline: Instant,
    generation: Generation,
}

/// Drives a [`Session`] on a single-threaded tokio runtime.
pub struct SessionDriver<R, N> {
    session: Session,
    random: R,
    sink: N,
    pending: Vec<PendingCompletion>,
}

impl<R: RandomSource, N: NotificationSink> SessionDriver<R, N> {
    /// Creates a driver around a fresh session.
    pub fn new(config: SessionConfig, random: R, sink: N) -> Self {
        Self {
            session: Session::new(config),
            random,
            sink,
            pending: Vec::new(),
        }
    }

    /// Returns the driven session.
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns the notification sink.
    pub const fn sink(&self) -> &N {
        &self.sink
    }

    /// Returns the number of timers not yet fired.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Applies `event` to the session and carries out its effects.
    ///
    /// Scheduled completions are queued; they fire from [`Self::fire_next`].
    pub fn dispatch(&mut self, event: SessionEvent) {
        trace!("Dispatching {event:?}");
        let effects = self.session.handle_event(event, &mut self.random);
        for effect in effects {
            match effect {
                Effect::Notify(notification) => self.sink.on_notification(notification),
                Effect::ScheduleCompletion { generation, delay } => {
                    self.schedule(generation, delay);
                }
            }
        }
        self.prune_stale();
    }

    /// Drops timers for runs the session has moved past.
    fn prune_stale(&mut self) {
        let live = self.session.generation();
        let before = self.pending.len();
        self.pending.retain(|p| p.generation == live);
        if self.pending.len() < before {
            debug!("Dropped {} stale completion(s)", before - self.pending.len());
        }
    }

    /// Shorthand for [`SessionEvent::Reset`].
    pub fn reset(&mut self) {
        self.dispatch(SessionEvent::Reset);
    }

    fn schedule(&mut self, generation: Generation, delay: Duration) {
        debug!("Scheduling completion {generation} in {delay:?}");
        self.pending.push(PendingCompletion {
            deadline: Instant::now() + delay,
            generation,
        });
    }

    /// Waits for the earliest timer and delivers its completion.
    ///
    /// Returns `false` when nothing was pending.
    pub async fn fire_next(&mut self) -> bool {
        let Some(index) = self
            .pending
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| p.deadline)
            .map(|(i, _)| i)
        else {
            return false;
        };
        let next = self.pending.swap_remove(index);

        sleep_until(next.deadline).await;
        self.dispatch(SessionEvent::AnalysisCompleted {
            generation: next.generation,
        });
        true
    }

    /// Runs one full cycle for `payload`: reset, submit, analyze, wait.
    ///
    /// Returns the result, or `None` if the payload was rejected or ignored.
    /// The session is left in `ResultReady` on success.
    pub async fn run_cycle(
        &mut self,
        payload: UploadedImage,
        source: UploadSource,
    ) -> Option<AnalysisResult> {
        self.reset();
        self.dispatch(SessionEvent::SubmitImage { payload, source });
        if self.session.state() != SessionState::ImageLoaded {
            return None;
        }

        self.dispatch(SessionEvent::StartAnalysis);
        while self.session.state() == SessionState::Analyzing {
            if !self.fire_next().await {
                break;
            }
        }
        self.session.result().cloned()
    }
}
