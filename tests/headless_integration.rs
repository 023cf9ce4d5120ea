use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use keycadence::app::{App, AppState};
use keycadence::catalog::{Difficulty, FixedIndex, Language, Mode, TextCatalog};
use keycadence::runtime::{AppEvent, ChannelEventSource, Runner};
use keycadence::session::{Clock, ManualClock, SessionController, SessionStatus};
use keycadence::store::{SessionStore, TimerDuration};

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn app(store: SessionStore, clock: &ManualClock) -> App<ManualClock> {
    let catalog = TextCatalog::builder()
        .with_texts(Language::En, Mode::Words, Difficulty::Medium, ["hi there"])
        .build();
    App::with_parts(
        store,
        catalog,
        SessionController::new(clock.clone()),
        Box::new(FixedIndex::first()),
    )
}

// Headless integration using the runtime and app without a TTY.
// Keystrokes and ticks go through the same channel-backed runner.
#[test]
fn headless_typing_flow_completes() {
    let clock = ManualClock::new();
    let mut app = app(SessionStore::default(), &clock);
    app.prepare().unwrap();

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(5));
    for c in "hi there".chars() {
        tx.send(key(c)).unwrap();
    }

    for _ in 0..100u32 {
        match runner.step() {
            AppEvent::Tick => {
                clock.advance(Duration::from_millis(100));
                app.on_tick(clock.now());
            }
            AppEvent::Resize => {}
            AppEvent::Key(key) => {
                if let KeyCode::Char(c) = key.code {
                    clock.advance(Duration::from_millis(250));
                    app.on_char(c).unwrap();
                }
            }
        }
        if app.state == AppState::Results {
            break;
        }
    }

    assert_eq!(app.state, AppState::Results);
    assert_eq!(app.controller.status(), SessionStatus::Finished);
    let summary = app.last_summary.as_ref().unwrap();
    assert!(summary.completed);
    assert_eq!(summary.metrics.accuracy, 100);
    // 8 chars over 1.75s from the first keystroke
    assert_eq!(summary.elapsed_seconds, 1.75);
    assert_eq!(app.history.records().len(), 1);
}

#[test]
fn headless_timed_session_finishes_by_time() {
    let clock = ManualClock::new();
    let mut store = SessionStore::default();
    store.set_duration(TimerDuration::Secs15);
    let mut app = app(store, &clock);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(ChannelEventSource::new(rx), Duration::from_millis(1));
    tx.send(key('h')).unwrap();

    for _ in 0..500u32 {
        match runner.step() {
            AppEvent::Tick => {
                clock.advance(Duration::from_millis(100));
                app.on_tick(clock.now());
            }
            AppEvent::Key(key) => {
                if let KeyCode::Char(c) = key.code {
                    app.on_char(c).unwrap();
                }
            }
            AppEvent::Resize => {}
        }
        if app.state == AppState::Results {
            break;
        }
    }

    assert_eq!(app.state, AppState::Results, "timed session should finish by timeout");
    let state = app.controller.state().unwrap();
    assert_eq!(state.remaining_seconds, 0.0);
    assert_eq!(state.elapsed_seconds, 15.0);
    assert!(!app.last_summary.as_ref().unwrap().completed);
    // one sample per tick after the first keystroke, none on the finishing tick
    assert_eq!(app.controller.wpm_history().len(), 149);
}

#[test]
fn headless_restart_reuses_text() {
    let clock = ManualClock::new();
    let mut app = app(SessionStore::default(), &clock);
    for c in "hi x".chars() {
        app.on_char(c).unwrap();
    }
    app.restart();
    assert_eq!(app.typed_text(), "");
    assert_eq!(app.reference_text().unwrap().body(), "hi there");
    assert_eq!(app.controller.status(), SessionStatus::Idle);
}
