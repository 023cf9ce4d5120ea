use super::types::{Difficulty, Language, Mode, PracticeText};
use super::selector::IndexSource;
use crate::embedded::{self, EmbeddedError};
use serde::Deserialize;
use std::collections::HashMap;

/// Why no text could be produced for a language/mode/difficulty combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TextUnavailable {
    #[error("no texts for language")]
    Language,
    #[error("no texts for mode")]
    Mode,
    #[error("no texts for difficulty")]
    Difficulty,
}

type TextsByDifficulty = HashMap<Difficulty, Vec<String>>;

#[derive(Deserialize)]
struct LanguageFile {
    language: Language,
    modes: HashMap<Mode, TextsByDifficulty>,
}

/// Static table of practice texts keyed by language, mode and difficulty
#[derive(Debug, Clone, Default)]
pub struct TextCatalog {
    texts: HashMap<Language, HashMap<Mode, TextsByDifficulty>>,
}

impl TextCatalog {
    /// Catalog bundled with the binary, one JSON file per language
    pub fn embedded() -> Result<Self, EmbeddedError> {
        let files: Vec<LanguageFile> = embedded::read_json_dir("texts")?;
        let mut builder = Self::builder();
        for file in files {
            for (mode, by_difficulty) in file.modes {
                for (difficulty, texts) in by_difficulty {
                    builder = builder.with_texts(file.language, mode, difficulty, texts);
                }
            }
        }
        let catalog = builder.build();
        log::debug!(
            "loaded text catalog with {} languages",
            catalog.languages().len()
        );
        Ok(catalog)
    }

    pub fn builder() -> TextCatalogBuilder {
        TextCatalogBuilder::default()
    }

    /// Languages that have at least a mode entry, sorted
    pub fn languages(&self) -> Vec<Language> {
        let mut langs: Vec<Language> = self.texts.keys().copied().collect();
        langs.sort();
        langs
    }

    /// Candidate list for one combination, applying the lookup precedence
    /// language, then mode, then difficulty.
    pub fn texts(
        &self,
        language: Language,
        mode: Mode,
        difficulty: Difficulty,
    ) -> Result<&[String], TextUnavailable> {
        let by_mode = self
            .texts
            .get(&language)
            .ok_or(TextUnavailable::Language)?;
        let by_difficulty = by_mode.get(&mode).ok_or(TextUnavailable::Mode)?;
        match by_difficulty.get(&difficulty) {
            Some(texts) if !texts.is_empty() => Ok(texts),
            _ => Err(TextUnavailable::Difficulty),
        }
    }

    pub fn select_text(
        &self,
        language: Language,
        mode: Mode,
        difficulty: Difficulty,
        source: &mut dyn IndexSource,
    ) -> Result<PracticeText, TextUnavailable> {
        let texts = self
            .texts(language, mode, difficulty)
            .inspect_err(|reason| {
                log::warn!("text selection for {language}/{mode}/{difficulty} failed: {reason}")
            })?;
        let idx = source.next_index(texts.len()).min(texts.len() - 1);
        Ok(PracticeText::new(
            texts[idx].clone(),
            language,
            mode,
            difficulty,
        ))
    }

    /// Same as [`TextCatalog::select_text`] for raw codes coming from outside
    /// the type system. An unparseable code is treated like a missing entry
    /// at its level, so `"xx"` as a language yields [`TextUnavailable::Language`].
    pub fn select_text_by_code(
        &self,
        language: &str,
        mode: &str,
        difficulty: &str,
        source: &mut dyn IndexSource,
    ) -> Result<PracticeText, TextUnavailable> {
        let language = language
            .parse::<Language>()
            .ok()
            .filter(|l| self.texts.contains_key(l))
            .ok_or(TextUnavailable::Language)?;
        let mode = mode
            .parse::<Mode>()
            .ok()
            .filter(|m| self.texts[&language].contains_key(m))
            .ok_or(TextUnavailable::Mode)?;
        let difficulty: Difficulty = difficulty
            .parse()
            .map_err(|_| TextUnavailable::Difficulty)?;
        self.select_text(language, mode, difficulty, source)
    }
}

#[derive(Debug, Default)]
pub struct TextCatalogBuilder {
    texts: HashMap<Language, HashMap<Mode, TextsByDifficulty>>,
}

impl TextCatalogBuilder {
    /// Register `texts` for a combination, appending to anything already there.
    /// An empty list still creates the language and mode entries.
    pub fn with_texts<I, S>(
        mut self,
        language: Language,
        mode: Mode,
        difficulty: Difficulty,
        texts: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texts
            .entry(language)
            .or_default()
            .entry(mode)
            .or_default()
            .entry(difficulty)
            .or_default()
            .extend(texts.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> TextCatalog {
        TextCatalog { texts: self.texts }
    }
}
