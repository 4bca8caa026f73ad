pub mod types;

pub use types::{ParseSourceLanguageError, SourceLanguage, VocabularyEntry};
