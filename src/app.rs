use crate::catalog::{IndexSource, PracticeText, RandomIndex, TextCatalog, TextUnavailable};
use crate::challenge::{Challenge, ChallengeOutcome, ChallengeStats};
use crate::history::SessionHistory;
use crate::session::{Clock, SessionController, SessionStatus, SessionSummary, SystemClock};
use crate::store::SessionStore;
use chrono::{Local, NaiveDate};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Typing,
    Results,
}

/// Where the reference text came from. Fixed texts (a custom prompt, a word
/// pack or the daily challenge) are kept when a new text is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOrigin {
    Catalog,
    Fixed,
}

/// Front-end state: configuration, the running session and what has been
/// recorded so far. The session starts on the first keystroke.
pub struct App<C: Clock = SystemClock> {
    pub store: SessionStore,
    pub controller: SessionController<C>,
    pub history: SessionHistory,
    pub challenge: Option<Challenge>,
    pub challenge_stats: ChallengeStats,
    pub last_outcome: Option<ChallengeOutcome>,
    pub last_summary: Option<SessionSummary>,
    pub state: AppState,
    catalog: TextCatalog,
    source: Box<dyn IndexSource>,
    origin: TextOrigin,
}

impl App<SystemClock> {
    pub fn new(store: SessionStore, catalog: TextCatalog) -> Self {
        Self::with_parts(
            store,
            catalog,
            SessionController::default(),
            Box::new(RandomIndex::thread()),
        )
    }
}

impl<C: Clock> App<C> {
    pub fn with_parts(
        store: SessionStore,
        catalog: TextCatalog,
        controller: SessionController<C>,
        source: Box<dyn IndexSource>,
    ) -> Self {
        let origin = if store.current_text().is_some() {
            TextOrigin::Fixed
        } else {
            TextOrigin::Catalog
        };
        Self {
            store,
            controller,
            history: SessionHistory::new(),
            challenge: None,
            challenge_stats: ChallengeStats::default(),
            last_outcome: None,
            last_summary: None,
            state: AppState::Typing,
            catalog,
            source,
            origin,
        }
    }

    /// Practice the daily challenge with its own text and session settings
    pub fn with_challenge(mut self, challenge: Challenge) -> Self {
        let config = challenge.session_config(*self.store.config());
        self.store.set_difficulty(config.difficulty);
        self.store.set_duration(config.duration);
        self.store.set_current_text(challenge.practice_text());
        self.origin = TextOrigin::Fixed;
        self.challenge = Some(challenge);
        self
    }

    pub fn origin(&self) -> TextOrigin {
        self.origin
    }

    /// Make sure there is a reference text to show before typing starts
    pub fn prepare(&mut self) -> Result<&PracticeText, TextUnavailable> {
        self.store.ensure_text(&self.catalog, self.source.as_mut())
    }

    pub fn reference_text(&self) -> Option<&PracticeText> {
        match self.controller.state() {
            Some(state) => Some(&state.reference_text),
            None => self.store.current_text(),
        }
    }

    pub fn typed_text(&self) -> &str {
        self.controller
            .state()
            .map(|s| s.typed_text.as_str())
            .unwrap_or_default()
    }

    /// Seconds left, or the full duration before the first keystroke
    pub fn remaining_seconds(&self) -> f64 {
        match self.controller.state() {
            Some(state) => state.remaining_seconds.max(0.0),
            None => self.store.duration().as_secs() as f64,
        }
    }

    pub fn on_char(&mut self, c: char) -> Result<(), TextUnavailable> {
        if self.state != AppState::Typing {
            return Ok(());
        }
        if self.controller.status() == SessionStatus::Idle {
            let text = self.prepare()?.clone();
            let config = *self.store.config();
            self.controller.start_with_text(&config, text);
        }
        self.controller.push_char(c);
        self.after_update();
        Ok(())
    }

    pub fn on_backspace(&mut self) {
        if self.state == AppState::Typing && self.controller.is_running() {
            self.controller.backspace();
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if self.controller.is_running() {
            self.controller.tick(now);
            self.after_update();
        }
    }

    /// Back to the first keystroke with the same text
    pub fn restart(&mut self) {
        self.controller.cancel();
        self.last_outcome = None;
        self.last_summary = None;
        self.state = AppState::Typing;
    }

    /// Back to the first keystroke with a freshly selected catalog text.
    /// Fixed texts stay as they are.
    pub fn new_text(&mut self) -> Result<(), TextUnavailable> {
        self.restart();
        if self.origin == TextOrigin::Catalog {
            self.store
                .refresh_text(&self.catalog, self.source.as_mut())?;
        }
        Ok(())
    }

    fn after_update(&mut self) {
        if !self.controller.is_finished() || self.state == AppState::Results {
            return;
        }
        self.state = AppState::Results;
        let Some(summary) = self.controller.summary() else {
            return;
        };
        let today = today();
        self.history.record(&summary, today);
        if let Some(challenge) = &self.challenge {
            let outcome = challenge.evaluate(&summary);
            self.challenge_stats.record(&outcome, today);
            self.last_outcome = Some(outcome);
        }
        self.last_summary = Some(summary);
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Difficulty, FixedIndex, Language, Mode};
    use crate::session::ManualClock;
    use crate::store::{SessionConfig, TimerDuration};

    fn catalog() -> TextCatalog {
        TextCatalog::builder()
            .with_texts(Language::En, Mode::Words, Difficulty::Medium, ["hi", "yo"])
            .build()
    }

    fn app(store: SessionStore) -> (App<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let app = App::with_parts(
            store,
            catalog(),
            SessionController::new(clock.clone()),
            Box::new(FixedIndex::first()),
        );
        (app, clock)
    }

    #[test]
    fn test_session_starts_on_first_keystroke() {
        let (mut app, _clock) = app(SessionStore::default());
        assert_eq!(app.prepare().unwrap().body(), "hi");
        assert_eq!(app.controller.status(), SessionStatus::Idle);
        assert_eq!(app.remaining_seconds(), 60.0);

        app.on_char('h').unwrap();
        assert_eq!(app.controller.status(), SessionStatus::Running);
        assert_eq!(app.typed_text(), "h");
    }

    #[test]
    fn test_completion_records_history() {
        let (mut app, clock) = app(SessionStore::default());
        app.on_char('h').unwrap();
        clock.advance_secs(1.0);
        app.on_char('i').unwrap();

        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.history.records().len(), 1);
        let summary = app.last_summary.as_ref().unwrap();
        assert!(summary.completed);
        assert_eq!(summary.metrics.accuracy, 100);
    }

    #[test]
    fn test_keys_ignored_on_results_screen() {
        let (mut app, _clock) = app(SessionStore::default());
        app.on_char('h').unwrap();
        app.on_char('i').unwrap();
        app.on_char('x').unwrap();
        app.on_backspace();
        assert_eq!(app.typed_text(), "hi");
        assert_eq!(app.history.records().len(), 1);
    }

    #[test]
    fn test_timeout_through_tick() {
        let mut store = SessionStore::default();
        store.set_duration(TimerDuration::Secs15);
        let (mut app, clock) = app(store);
        app.on_char('h').unwrap();

        clock.advance_secs(15.0);
        app.on_tick(clock.now());
        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.remaining_seconds(), 0.0);
        assert!(!app.last_summary.as_ref().unwrap().completed);
    }

    #[test]
    fn test_restart_keeps_text_and_new_text_reselects() {
        let (mut app, _clock) = app(SessionStore::default());
        app.on_char('x').unwrap();
        let first = app.reference_text().unwrap().clone();
        assert_eq!(first.body(), "hi");

        app.restart();
        assert_eq!(app.controller.status(), SessionStatus::Idle);
        assert_eq!(app.reference_text(), Some(&first));

        app.source = Box::new(FixedIndex::last());
        app.new_text().unwrap();
        assert_eq!(app.state, AppState::Typing);
        assert_eq!(app.reference_text().unwrap().body(), "yo");
    }

    #[test]
    fn test_fixed_text_survives_new_text() {
        let mut store = SessionStore::new(SessionConfig::default());
        store.set_current_text(PracticeText::new(
            "custom prompt",
            Language::En,
            Mode::Words,
            Difficulty::Medium,
        ));
        let (mut app, _clock) = app(store);
        assert_eq!(app.origin(), TextOrigin::Fixed);

        app.new_text().unwrap();
        assert_eq!(app.reference_text().unwrap().body(), "custom prompt");
    }

    #[test]
    fn test_challenge_is_evaluated() {
        let challenge = Challenge::today().unwrap();
        let text = challenge.text.clone();
        let (app, clock) = app(SessionStore::default());
        let mut app = app.with_challenge(challenge);
        assert_eq!(app.reference_text().unwrap().body(), text);

        let mut chars = text.chars();
        app.on_char(chars.next().unwrap()).unwrap();
        clock.advance_secs(10.0);
        for c in chars {
            app.on_char(c).unwrap();
        }

        assert_eq!(app.state, AppState::Results);
        assert_eq!(app.history.records().len(), 1);
        let outcome = app.last_outcome.as_ref().unwrap();
        assert_eq!(outcome.accuracy, 100);
        assert_eq!(app.challenge_stats.best_accuracy, 100);
    }
}
