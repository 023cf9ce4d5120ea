use crate::catalog::{Difficulty, Language, Mode, PracticeText};
use crate::embedded::{self, EmbeddedError};
use serde::{Deserialize, Serialize};

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
pub enum PackCategory {
    Common,
    Phrases,
    Code,
    Business,
    Numbers,
    Symbols,
}

impl PackCategory {
    pub const ALL: [PackCategory; 6] = [
        PackCategory::Common,
        PackCategory::Phrases,
        PackCategory::Code,
        PackCategory::Business,
        PackCategory::Numbers,
        PackCategory::Symbols,
    ];

    /// Practice mode whose texts look most like this category
    pub fn mode(&self) -> Mode {
        match self {
            PackCategory::Code => Mode::Code,
            PackCategory::Business => Mode::Email,
            PackCategory::Numbers => Mode::Numbers,
            PackCategory::Symbols => Mode::Punctuation,
            PackCategory::Common | PackCategory::Phrases => Mode::Words,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackFilter {
    #[default]
    All,
    Category(PackCategory),
}

impl PackFilter {
    pub fn matches(&self, pack: &WordPack) -> bool {
        match self {
            PackFilter::All => true,
            PackFilter::Category(c) => pack.category == *c,
        }
    }
}

impl From<Option<PackCategory>> for PackFilter {
    fn from(category: Option<PackCategory>) -> Self {
        category.map_or(PackFilter::All, PackFilter::Category)
    }
}

/// A curated list of words to practice, shipped with the binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordPack {
    pub id: String,
    pub name: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub word_count: usize,
    pub category: PackCategory,
    pub preview: String,
}

impl WordPack {
    /// The pack's preview as an English reference text
    pub fn practice_text(&self) -> PracticeText {
        PracticeText::new(
            self.preview.clone(),
            Language::En,
            self.category.mode(),
            self.difficulty,
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct WordPacks {
    packs: Vec<WordPack>,
}

impl WordPacks {
    pub fn embedded() -> Result<Self, EmbeddedError> {
        let packs: Vec<WordPack> = embedded::read_json("packs.json")?;
        log::debug!("loaded {} word packs", packs.len());
        Ok(Self { packs })
    }

    pub fn new(packs: Vec<WordPack>) -> Self {
        Self { packs }
    }

    pub fn all(&self) -> &[WordPack] {
        &self.packs
    }

    pub fn filter(&self, filter: PackFilter) -> impl Iterator<Item = &WordPack> + '_ {
        self.packs.iter().filter(move |p| filter.matches(p))
    }

    pub fn find(&self, id: &str) -> Option<&WordPack> {
        self.packs.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn packs() -> WordPacks {
        WordPacks::embedded().unwrap()
    }

    #[test]
    fn test_embedded_packs_load() {
        let packs = packs();
        assert_eq!(packs.all().len(), 10);
        for category in PackCategory::ALL {
            assert!(
                packs.filter(PackFilter::Category(category)).count() > 0,
                "no pack for {category}"
            );
        }
    }

    #[test]
    fn test_filter_by_category() {
        let packs = packs();
        let code: Vec<&str> = packs
            .filter(PackFilter::Category(PackCategory::Code))
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(code, vec!["javascript", "python", "react-typescript"]);
        assert_eq!(packs.filter(PackFilter::All).count(), 10);
    }

    #[test]
    fn test_find() {
        let packs = packs();
        let pack = packs.find("top-200").unwrap();
        assert_eq!(pack.name, "Top 200 Words");
        assert_eq!(pack.difficulty, Difficulty::Easy);
        assert!(packs.find("missing").is_none());
    }

    #[test]
    fn test_practice_text_uses_preview_and_category_mode() {
        let packs = packs();
        let pack = packs.find("business-email").unwrap();
        let text = pack.practice_text();
        assert_eq!(text.body(), pack.preview);
        assert_eq!(text.mode, Mode::Email);
        assert_eq!(text.language, Language::En);
        assert_eq!(text.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_category_modes() {
        assert_eq!(PackCategory::Common.mode(), Mode::Words);
        assert_eq!(PackCategory::Phrases.mode(), Mode::Words);
        assert_eq!(PackCategory::Code.mode(), Mode::Code);
        assert_eq!(PackCategory::Numbers.mode(), Mode::Numbers);
        assert_eq!(PackCategory::Symbols.mode(), Mode::Punctuation);
    }

    #[test]
    fn test_filter_from_option() {
        assert_eq!(PackFilter::from(None), PackFilter::All);
        assert_eq!(
            PackFilter::from(Some(PackCategory::Symbols)),
            PackFilter::Category(PackCategory::Symbols)
        );
    }
}
