//! Session reducer.

use tracing::{debug, info};

use super::{Effect, Generation, SessionConfig, SessionEvent};
use crate::domain::{AnalysisResult, Notice, SessionState, UploadSource, UploadedImage};
use crate::ports::{Notification, RandomSource};
use crate::prediction;

/// One upload-analyze-result cycle.
///
/// Owns the uploaded image and the result exclusively. Every mutation goes
/// through [`Session::handle_event`].
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    state: SessionState,
    image: Option<UploadedImage>,
    result: Option<AnalysisResult>,
    generation: Generation,
}

impl Session {
    /// Creates an empty session.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: SessionState::Empty,
            image: None,
            result: None,
            generation: Generation::default(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the loaded image, if any.
    #[must_use]
    pub const fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    /// Returns the latest result, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    /// Returns the generation of the most recent analysis run.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the session configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Applies `event` and returns the effects the host must carry out.
    ///
    /// Draws from `random` only when an analysis starts (delay) and when it
    /// completes (score).
    pub fn handle_event<R: RandomSource + ?Sized>(
        &mut self,
        event: SessionEvent,
        random: &mut R,
    ) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            SessionEvent::SubmitImage { payload, source } => {
                self.submit_image(payload, source, &mut effects);
            }
            SessionEvent::StartAnalysis => self.start_analysis(random, &mut effects),
            SessionEvent::AnalysisCompleted { generation } => {
                self.complete_analysis(generation, random, &mut effects);
            }
            SessionEvent::Reset => self.reset(&mut effects),
        }
        effects
    }

    fn submit_image(
        &mut self,
        payload: UploadedImage,
        source: UploadSource,
        effects: &mut Vec<Effect>,
    ) {
        if self.state == SessionState::Analyzing {
            debug!(
                "Ignoring {} while analysis {} is in flight",
                payload.display_name(),
                self.generation
            );
            return;
        }

        if source == UploadSource::Drop && !payload.media_type.is_image() {
            debug!(
                "Ignoring dropped {} of type {}",
                payload.display_name(),
                payload.media_type
            );
            return;
        }

        let limit = self.config.max_upload_bytes;
        if payload.size > limit {
            info!(
                "Rejecting {}: {} bytes exceeds limit of {limit}",
                payload.display_name(),
                payload.size
            );
            effects.push(Effect::Notify(Notification::Rejected {
                notice: Notice::PayloadTooLarge {
                    size: payload.size,
                    limit,
                },
            }));
            return;
        }

        debug!("Accepted {} ({} bytes)", payload.display_name(), payload.size);
        self.image = Some(payload);
        self.result = None;
        self.transition(SessionState::ImageLoaded, effects);
    }

    fn start_analysis<R: RandomSource + ?Sized>(
        &mut self,
        random: &mut R,
        effects: &mut Vec<Effect>,
    ) {
        if self.state != SessionState::ImageLoaded || self.image.is_none() {
            debug!("Ignoring analysis request in state {}", self.state);
            return;
        }

        self.generation = self.generation.next();
        let delay = prediction::draw_delay(random, self.config.min_delay, self.config.delay_span);
        debug!("Starting analysis {} with delay {delay:?}", self.generation);

        self.transition(SessionState::Analyzing, effects);
        effects.push(Effect::ScheduleCompletion {
            generation: self.generation,
            delay,
        });
    }

    fn complete_analysis<R: RandomSource + ?Sized>(
        &mut self,
        generation: Generation,
        random: &mut R,
        effects: &mut Vec<Effect>,
    ) {
        if self.state != SessionState::Analyzing || generation != self.generation {
            debug!(
                "Discarding stale completion {generation} (current {}, state {})",
                self.generation, self.state
            );
            return;
        }

        let result = prediction::predict(random);
        info!("Analysis {generation} scored {}%", result.percentage);
        self.result = Some(result.clone());
        self.transition(SessionState::ResultReady, effects);
        effects.push(Effect::Notify(Notification::ResultReady { result }));
    }

    fn reset(&mut self, effects: &mut Vec<Effect>) {
        if self.state == SessionState::Analyzing {
            // Invalidate the in-flight completion.
            self.generation = self.generation.next();
        }
        self.image = None;
        self.result = None;
        self.transition(SessionState::Empty, effects);
    }

    fn transition(&mut self, to: SessionState, effects: &mut Vec<Effect>) {
        let from = self.state;
        if from == to {
            return;
        }
        debug!("Session {from} -> {to}");
        self.state = to;
        effects.push(Effect::Notify(Notification::StateChanged { from, to }));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Pure form of [`Session::handle_event`]: consumes a session and returns the
/// next one together with the effects.
pub fn reduce<R: RandomSource + ?Sized>(
    mut session: Session,
    event: SessionEvent,
    random: &mut R,
) -> (Session, Vec<Effect>) {
    let effects = session.handle_event(event, random);
    (session, effects)
}
