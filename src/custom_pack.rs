use crate::catalog::{Difficulty, Language, Mode, PracticeText};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Fewest words a custom pack may hold
pub const MIN_WORDS: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("please add at least 10 words (found {0})")]
    TooFewWords(usize),
    #[error("no custom pack with id '{0}'")]
    NotFound(String),
    #[error("invalid pack file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Split free-form input on newlines and commas into trimmed, non-empty words
pub fn parse_word_list(raw: &str) -> Vec<String> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(String::from)
        .collect()
}

fn default_category() -> String {
    "custom".to_string()
}

/// Form contents before a pack is validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomPackDraft {
    pub name: String,
    pub description: String,
    pub words: String,
    pub difficulty: Difficulty,
    pub category: String,
    pub is_public: bool,
}

impl Default for CustomPackDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            words: String::new(),
            difficulty: Difficulty::Medium,
            category: default_category(),
            is_public: false,
        }
    }
}

impl CustomPackDraft {
    pub fn word_list(&self) -> Vec<String> {
        parse_word_list(&self.words)
    }

    /// Validate the draft and stamp it with an id and creation time
    pub fn build(&self, now: DateTime<Utc>) -> Result<CustomWordPack, PackError> {
        let words = self.validated_words()?;
        Ok(CustomWordPack {
            id: now.timestamp_millis().to_string(),
            name: self.name.clone(),
            description: self.description.clone(),
            words,
            difficulty: self.difficulty,
            category: self.category.clone(),
            is_public: self.is_public,
            created_at: now,
        })
    }

    fn validated_words(&self) -> Result<Vec<String>, PackError> {
        let words = self.word_list();
        if words.len() < MIN_WORDS {
            return Err(PackError::TooFewWords(words.len()));
        }
        Ok(words)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomWordPack {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub words: Vec<String>,
    pub difficulty: Difficulty,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

impl CustomWordPack {
    /// Words joined by single spaces, typed in words mode
    pub fn practice_text(&self) -> PracticeText {
        PracticeText::new(
            self.words.join(" "),
            Language::En,
            Mode::Words,
            self.difficulty,
        )
    }

    /// Back into an editable form, words comma separated
    pub fn to_draft(&self) -> CustomPackDraft {
        CustomPackDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            words: self.words.join(", "),
            difficulty: self.difficulty,
            category: self.category.clone(),
            is_public: self.is_public,
        }
    }

    /// File name for export: whitespace runs become underscores
    pub fn export_file_name(&self) -> String {
        let stem = self.name.split_whitespace().collect::<Vec<_>>().join("_");
        let stem = match (
            self.name.starts_with(char::is_whitespace),
            self.name.ends_with(char::is_whitespace),
        ) {
            _ if stem.is_empty() && !self.name.is_empty() => "_".to_string(),
            (true, true) => format!("_{stem}_"),
            (true, false) => format!("_{stem}"),
            (false, true) => format!("{stem}_"),
            (false, false) => stem,
        };
        format!("{stem}.json")
    }

    pub fn export_json(&self) -> Result<String, PackError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The user's custom packs, held in memory for the current run
#[derive(Debug, Clone, Default)]
pub struct CustomPackLibrary {
    packs: Vec<CustomWordPack>,
    last_id: i64,
}

impl CustomPackLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[CustomWordPack] {
        &self.packs
    }

    pub fn get(&self, id: &str) -> Option<&CustomWordPack> {
        self.packs.iter().find(|p| p.id == id)
    }

    pub fn create(&mut self, draft: &CustomPackDraft) -> Result<&CustomWordPack, PackError> {
        self.create_at(draft, Utc::now())
    }

    pub fn create_at(
        &mut self,
        draft: &CustomPackDraft,
        now: DateTime<Utc>,
    ) -> Result<&CustomWordPack, PackError> {
        let mut pack = draft.build(now)?;
        pack.id = self.next_id(now);
        log::debug!("created custom pack '{}' ({} words)", pack.name, pack.words.len());
        Ok(self.push(pack))
    }

    /// Replace the editable fields of an existing pack. Id and creation time stay.
    pub fn update(&mut self, id: &str, draft: &CustomPackDraft) -> Result<&CustomWordPack, PackError> {
        let words = draft.validated_words()?;
        let pack = self
            .packs
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| PackError::NotFound(id.to_string()))?;
        pack.name = draft.name.clone();
        pack.description = draft.description.clone();
        pack.words = words;
        pack.difficulty = draft.difficulty;
        pack.category = draft.category.clone();
        pack.is_public = draft.is_public;
        Ok(pack)
    }

    pub fn delete(&mut self, id: &str) -> Result<CustomWordPack, PackError> {
        let index = self
            .packs
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| PackError::NotFound(id.to_string()))?;
        Ok(self.packs.remove(index))
    }

    /// Add a pack from its exported JSON. The imported pack gets a fresh id.
    pub fn import_json(&mut self, json: &str) -> Result<&CustomWordPack, PackError> {
        self.import_json_at(json, Utc::now())
    }

    pub fn import_json_at(
        &mut self,
        json: &str,
        now: DateTime<Utc>,
    ) -> Result<&CustomWordPack, PackError> {
        let mut pack: CustomWordPack = serde_json::from_str(json)?;
        pack.id = self.next_id(now);
        Ok(self.push(pack))
    }

    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<&CustomWordPack, PackError> {
        let json = fs::read_to_string(path)?;
        self.import_json(&json)
    }

    pub fn export_json(&self, id: &str) -> Result<String, PackError> {
        self.find(id)?.export_json()
    }

    /// Write a pack to `dir` under its export file name and return the path
    pub fn export_to_dir(&self, id: &str, dir: impl AsRef<Path>) -> Result<PathBuf, PackError> {
        let pack = self.find(id)?;
        fs::create_dir_all(dir.as_ref())?;
        let path = dir.as_ref().join(pack.export_file_name());
        fs::write(&path, pack.export_json()?)?;
        Ok(path)
    }

    fn find(&self, id: &str) -> Result<&CustomWordPack, PackError> {
        self.get(id).ok_or_else(|| PackError::NotFound(id.to_string()))
    }

    fn push(&mut self, pack: CustomWordPack) -> &CustomWordPack {
        self.packs.push(pack);
        &self.packs[self.packs.len() - 1]
    }

    /// Epoch millis, bumped past the previous id when two arrive in the same millisecond
    fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let id = now.timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id.to_string()
    }
}
