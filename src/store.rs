use crate::catalog::{
    Difficulty, IndexSource, Language, Mode, PracticeText, TextCatalog, TextUnavailable,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Session lengths offered by the configuration UI
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(try_from = "u64", into = "u64")]
pub enum TimerDuration {
    #[value(name = "15")]
    Secs15,
    #[value(name = "30")]
    Secs30,
    #[value(name = "60")]
    Secs60,
    #[value(name = "120")]
    Secs120,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0} seconds is not an allowed session length")]
pub struct InvalidDuration(pub u64);

impl TimerDuration {
    pub const ALL: [TimerDuration; 4] = [
        TimerDuration::Secs15,
        TimerDuration::Secs30,
        TimerDuration::Secs60,
        TimerDuration::Secs120,
    ];

    pub fn as_secs(&self) -> u64 {
        match self {
            TimerDuration::Secs15 => 15,
            TimerDuration::Secs30 => 30,
            TimerDuration::Secs60 => 60,
            TimerDuration::Secs120 => 120,
        }
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.as_secs())
    }
}

impl TryFrom<u64> for TimerDuration {
    type Error = InvalidDuration;

    fn try_from(secs: u64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_secs() == secs)
            .ok_or(InvalidDuration(secs))
    }
}

impl From<TimerDuration> for u64 {
    fn from(d: TimerDuration) -> Self {
        d.as_secs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: Mode,
    pub difficulty: Difficulty,
    pub duration: TimerDuration,
    pub language: Language,
    pub voice_mode: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Words,
            difficulty: Difficulty::Medium,
            duration: TimerDuration::Secs60,
            language: Language::En,
            voice_mode: false,
        }
    }
}

/// Active configuration plus the reference text currently selected for it.
///
/// Changing mode, difficulty or language drops the current text so the next
/// [`SessionStore::ensure_text`] reselects from the catalog.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    config: SessionConfig,
    current_text: Option<PracticeText>,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            current_text: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn duration(&self) -> TimerDuration {
        self.config.duration
    }

    pub fn language(&self) -> Language {
        self.config.language
    }

    pub fn voice_mode(&self) -> bool {
        self.config.voice_mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.config.mode != mode {
            self.config.mode = mode;
            self.invalidate_text();
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.config.difficulty != difficulty {
            self.config.difficulty = difficulty;
            self.invalidate_text();
        }
    }

    pub fn set_language(&mut self, language: Language) {
        if self.config.language != language {
            self.config.language = language;
            self.invalidate_text();
        }
    }

    pub fn set_duration(&mut self, duration: TimerDuration) {
        self.config.duration = duration;
    }

    pub fn set_voice_mode(&mut self, enabled: bool) {
        self.config.voice_mode = enabled;
    }

    pub fn current_text(&self) -> Option<&PracticeText> {
        self.current_text.as_ref()
    }

    /// Override the reference text, e.g. with a word pack or challenge text
    pub fn set_current_text(&mut self, text: PracticeText) {
        self.current_text = Some(text);
    }

    /// Select a fresh text for the current configuration, replacing any
    /// existing one. On failure the current text is cleared.
    pub fn refresh_text(
        &mut self,
        catalog: &TextCatalog,
        source: &mut dyn IndexSource,
    ) -> Result<&PracticeText, TextUnavailable> {
        self.current_text = None;
        let text = self.select(catalog, source)?;
        Ok(&*self.current_text.insert(text))
    }

    /// The current text, selecting one first if there is none
    pub fn ensure_text(
        &mut self,
        catalog: &TextCatalog,
        source: &mut dyn IndexSource,
    ) -> Result<&PracticeText, TextUnavailable> {
        let text = match self.current_text.take() {
            Some(text) => text,
            None => self.select(catalog, source)?,
        };
        Ok(&*self.current_text.insert(text))
    }

    fn select(
        &self,
        catalog: &TextCatalog,
        source: &mut dyn IndexSource,
    ) -> Result<PracticeText, TextUnavailable> {
        catalog.select_text(
            self.config.language,
            self.config.mode,
            self.config.difficulty,
            source,
        )
    }

    fn invalidate_text(&mut self) {
        log::debug!(
            "configuration changed to {}/{}/{}",
            self.config.language,
            self.config.mode,
            self.config.difficulty
        );
        self.current_text = None;
    }
}
