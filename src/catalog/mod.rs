pub mod types;
pub mod selector;
pub mod table;

// Re-export the main types for convenience
pub use types::{Difficulty, Language, Mode, ParseError, PracticeText};
pub use selector::{FixedIndex, IndexSource, RandomIndex};
pub use table::{TextCatalog, TextCatalogBuilder, TextUnavailable};
