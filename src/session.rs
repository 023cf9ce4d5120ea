pub mod clock;
pub mod controller;

pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::SessionController;

use crate::catalog::{PracticeText, TextUnavailable};
use crate::metrics::MetricsSnapshot;
use crate::store::SessionConfig;
use std::time::Instant;

/// Lifecycle of the practice session
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SessionStatus {
    Idle,
    Running,
    Finished,
}

/// Recoverable failures when starting a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot start session: {0}")]
    TextUnavailable(#[from] TextUnavailable),
}

/// An operation invoked in a state that does not allow it. This is a bug in
/// the caller; the controller panics with this message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal state transition: {operation} while {status}")]
pub struct IllegalStateTransition {
    pub operation: &'static str,
    pub status: SessionStatus,
}

/// Everything about the active attempt. Read-only outside the controller.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub config: SessionConfig,
    pub reference_text: PracticeText,
    pub typed_text: String,
    pub start_timestamp: Instant,
    pub elapsed_seconds: f64,
    pub remaining_seconds: f64,
    pub is_finished: bool,
}

impl SessionState {
    fn new(config: SessionConfig, reference_text: PracticeText, now: Instant) -> Self {
        Self {
            config,
            reference_text,
            typed_text: String::new(),
            start_timestamp: now,
            elapsed_seconds: 0.0,
            remaining_seconds: config.duration.as_secs() as f64,
            is_finished: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.typed_text == self.reference_text.body()
    }
}

/// Final figures of a finished session, handed to history and challenges
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub config: SessionConfig,
    pub text: PracticeText,
    pub metrics: MetricsSnapshot,
    pub elapsed_seconds: f64,
    pub chars_typed: usize,
    pub mistakes: usize,
    /// Typed text matched the reference exactly
    pub completed: bool,
}
