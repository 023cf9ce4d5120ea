//! Event plumbing between the terminal and the session.
//!
//! Keystrokes and timer ticks are serialized through one channel, so the
//! session controller never sees two inputs at once.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// Interval between timer ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Map a raw terminal event. Key releases and repeats are dropped so a
/// keystroke is ingested once on every platform.
pub fn translate(event: CtEvent) -> Option<AppEvent> {
    match event {
        CtEvent::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        CtEvent::Resize(_, _) => Some(AppEvent::Resize),
        _ => None,
    }
}

pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    let Some(ev) = translate(ev) else { continue };
                    if tx.send(ev).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::error!("terminal event stream closed: {e}");
                    break;
                }
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Event source fed by the test through a channel
pub struct ChannelEventSource {
    rx: Receiver<AppEvent>,
}

impl ChannelEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for ChannelEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event or tick at a time
pub struct Runner<E: EventSource> {
    event_source: E,
    tick_interval: Duration,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E, tick_interval: Duration) -> Self {
        Self {
            event_source,
            tick_interval,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Blocks up to one tick interval; returns the next event or `Tick`
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.tick_interval) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn runner(rx: Receiver<AppEvent>) -> Runner<ChannelEventSource> {
        Runner::new(ChannelEventSource::new(rx), Duration::from_millis(1))
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        assert_eq!(runner(rx).step(), AppEvent::Tick);
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        tx.send(AppEvent::Key(key)).unwrap();
        tx.send(AppEvent::Resize).unwrap();

        let runner = runner(rx);
        assert_eq!(runner.step(), AppEvent::Key(key));
        assert_eq!(runner.step(), AppEvent::Resize);
        assert_eq!(runner.step(), AppEvent::Tick);
    }

    #[test]
    fn step_ticks_after_sender_dropped() {
        let (tx, rx) = mpsc::channel::<AppEvent>();
        drop(tx);
        assert_eq!(runner(rx).step(), AppEvent::Tick);
    }

    #[test]
    fn translate_drops_key_releases() {
        let press = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('x'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(translate(CtEvent::Key(press)), Some(AppEvent::Key(press)));
        assert_eq!(translate(CtEvent::Key(release)), None);
        assert_eq!(translate(CtEvent::Resize(80, 24)), Some(AppEvent::Resize));
        assert_eq!(translate(CtEvent::FocusGained), None);
    }
}
