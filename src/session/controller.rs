use super::clock::{Clock, SystemClock};
use super::{
    IllegalStateTransition, SessionError, SessionState, SessionStatus, SessionSummary,
};
use crate::catalog::{IndexSource, PracticeText, TextCatalog};
use crate::diff;
use crate::metrics::{self, MetricsSnapshot, WpmSample};
use crate::store::SessionConfig;
use std::time::Instant;

/// Drives one practice session: Idle -> Running -> Finished.
///
/// Keystrokes arrive through [`SessionController::ingest_input`] and timer
/// ticks through [`SessionController::tick`]; both must be serialized by the
/// caller. Calling an operation in a state that does not allow it panics
/// with an [`IllegalStateTransition`].
#[derive(Debug)]
pub struct SessionController<C: Clock = SystemClock> {
    clock: C,
    status: SessionStatus,
    state: Option<SessionState>,
    wpm_history: Vec<WpmSample>,
    snapshot: MetricsSnapshot,
}

impl Default for SessionController<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> SessionController<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            status: SessionStatus::Idle,
            state: None,
            wpm_history: Vec::new(),
            snapshot: MetricsSnapshot::default(),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn state(&self) -> Option<&SessionState> {
        self.state.as_ref()
    }

    /// Latest metrics, refreshed on every tick and frozen once finished
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.snapshot
    }

    pub fn wpm_history(&self) -> &[WpmSample] {
        &self.wpm_history
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    /// Select a reference text for `config` and begin timing.
    ///
    /// Nothing changes when the catalog has no text for the configuration.
    pub fn start(
        &mut self,
        config: &SessionConfig,
        catalog: &TextCatalog,
        source: &mut dyn IndexSource,
    ) -> Result<(), SessionError> {
        self.require(&[SessionStatus::Idle], "start");
        let text = catalog.select_text(config.language, config.mode, config.difficulty, source)?;
        self.start_with_text(config, text);
        Ok(())
    }

    /// Begin timing against an explicit reference text
    pub fn start_with_text(&mut self, config: &SessionConfig, text: PracticeText) {
        self.require(&[SessionStatus::Idle], "start");
        self.enter_running(*config, text);
    }

    /// Replace the typed text with the latest full input value.
    ///
    /// An exact match with the reference finishes the session immediately.
    pub fn ingest_input(&mut self, typed: impl Into<String>) {
        self.require(&[SessionStatus::Running], "ingest input");
        let complete = match self.state.as_mut() {
            Some(state) => {
                state.typed_text = typed.into();
                state.is_complete()
            }
            None => false,
        };
        if complete {
            let now = self.clock.now();
            self.finish(now);
        }
    }

    /// Append one character, a convenience over [`SessionController::ingest_input`]
    pub fn push_char(&mut self, c: char) {
        let mut typed = self.typed_text().to_string();
        typed.push(c);
        self.ingest_input(typed);
    }

    /// Remove the last typed character, if any
    pub fn backspace(&mut self) {
        let mut typed = self.typed_text().to_string();
        if typed.pop().is_some() {
            self.ingest_input(typed);
        }
    }

    /// Recompute time and metrics from the wall clock.
    ///
    /// Correctness does not depend on how often this is called, only on `now`.
    pub fn tick(&mut self, now: Instant) {
        self.require(&[SessionStatus::Running], "tick");
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let duration = state.config.duration.as_secs() as f64;
        let elapsed = now
            .saturating_duration_since(state.start_timestamp)
            .as_secs_f64();
        state.elapsed_seconds = elapsed;
        state.remaining_seconds = duration - elapsed;

        if state.remaining_seconds <= 0.0 {
            self.finish(now);
            return;
        }

        let typed_chars = state.typed_text.chars().count();
        if typed_chars > 0 {
            let wpm = metrics::words_per_minute(typed_chars, elapsed);
            self.wpm_history.push(WpmSample::new(elapsed, wpm as f64));
        }
        self.snapshot = MetricsSnapshot::compute(
            state.reference_text.body(),
            &state.typed_text,
            elapsed,
            &self.wpm_history,
        );
    }

    /// Tick using the controller's own clock
    pub fn tick_now(&mut self) {
        let now = self.clock.now();
        self.tick(now);
    }

    /// Start over with the same reference text
    pub fn reset(&mut self) {
        self.require(&[SessionStatus::Running, SessionStatus::Finished], "reset");
        if let Some(state) = self.state.take() {
            self.enter_running(state.config, state.reference_text);
        }
    }

    /// Start over with a different reference text
    pub fn reset_with_text(&mut self, text: PracticeText) {
        self.require(&[SessionStatus::Running, SessionStatus::Finished], "reset");
        if let Some(state) = self.state.take() {
            self.enter_running(state.config, text);
        }
    }

    /// Abandon the session from any state
    pub fn cancel(&mut self) {
        if self.status != SessionStatus::Idle {
            log::debug!("session cancelled while {}", self.status);
        }
        self.status = SessionStatus::Idle;
        self.state = None;
        self.wpm_history.clear();
        self.snapshot = MetricsSnapshot::default();
    }

    /// Final figures, available once the session has finished
    pub fn summary(&self) -> Option<SessionSummary> {
        if self.status != SessionStatus::Finished {
            return None;
        }
        let state = self.state.as_ref()?;
        Some(SessionSummary {
            config: state.config,
            text: state.reference_text.clone(),
            metrics: self.snapshot,
            elapsed_seconds: state.elapsed_seconds,
            chars_typed: state.typed_text.chars().count(),
            mistakes: diff::mistakes(state.reference_text.body(), &state.typed_text),
            completed: state.is_complete(),
        })
    }

    fn typed_text(&self) -> &str {
        self.state
            .as_ref()
            .map(|s| s.typed_text.as_str())
            .unwrap_or_default()
    }

    fn enter_running(&mut self, config: SessionConfig, text: PracticeText) {
        let now = self.clock.now();
        log::debug!(
            "session running: {} chars, {}s",
            text.char_len(),
            config.duration.as_secs()
        );
        self.state = Some(SessionState::new(config, text, now));
        self.wpm_history.clear();
        self.snapshot = MetricsSnapshot::default();
        self.status = SessionStatus::Running;
    }

    /// Freeze the session. Elapsed time never exceeds the configured duration.
    fn finish(&mut self, now: Instant) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        let duration = state.config.duration.as_secs() as f64;
        let elapsed = now
            .saturating_duration_since(state.start_timestamp)
            .as_secs_f64()
            .min(duration);
        state.elapsed_seconds = elapsed;
        state.remaining_seconds = (duration - elapsed).max(0.0);
        state.is_finished = true;

        self.snapshot = MetricsSnapshot::compute(
            state.reference_text.body(),
            &state.typed_text,
            elapsed,
            &self.wpm_history,
        );
        self.status = SessionStatus::Finished;
        log::debug!(
            "session finished after {:.1}s: {} wpm, {}% accuracy",
            elapsed,
            self.snapshot.wpm,
            self.snapshot.accuracy
        );
    }

    fn require(&self, allowed: &[SessionStatus], operation: &'static str) {
        if !allowed.contains(&self.status) {
            panic!(
                "{}",
                IllegalStateTransition {
                    operation,
                    status: self.status,
                }
            );
        }
    }
}
