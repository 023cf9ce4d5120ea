use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Raised when a configuration code does not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

fn parse_code<T: Copy + Display>(all: &[T], kind: &'static str, s: &str) -> Result<T, ParseError> {
    all.iter()
        .copied()
        .find(|v| v.to_string() == s)
        .ok_or_else(|| ParseError {
            kind,
            value: s.to_string(),
        })
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    En,
    Es,
    Fr,
    De,
    Ru,
    Zh,
    Ja,
}

impl Language {
    pub const ALL: [Language; 7] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Ru,
        Language::Zh,
        Language::Ja,
    ];

    /// Human readable name shown next to the code in the configuration UI
    pub fn name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::Ru => "Russian",
            Language::Zh => "Chinese",
            Language::Ja => "Japanese",
        }
    }
}

impl FromStr for Language {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(&Self::ALL, "language", s)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Words,
    Code,
    Email,
    Punctuation,
    Numbers,
}

impl Mode {
    pub const ALL: [Mode; 5] = [
        Mode::Words,
        Mode::Code,
        Mode::Email,
        Mode::Punctuation,
        Mode::Numbers,
    ];
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(&Self::ALL, "mode", s)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_code(&Self::ALL, "difficulty", s)
    }
}

/// A reference text the user tries to reproduce, tagged with where it belongs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeText {
    body: String,
    pub language: Language,
    pub mode: Mode,
    pub difficulty: Difficulty,
}

impl PracticeText {
    pub fn new(
        body: impl Into<String>,
        language: Language,
        mode: Mode,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            body: body.into(),
            language,
            mode,
            difficulty,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Length in characters, not bytes
    pub fn char_len(&self) -> usize {
        self.body.chars().count()
    }
}

impl AsRef<str> for PracticeText {
    fn as_ref(&self) -> &str {
        &self.body
    }
}
