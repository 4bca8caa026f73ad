pub mod error;
pub mod flashcard;
pub mod logging;
pub mod preprocess;
pub mod progress;
pub mod quiz;
pub mod state;
pub mod vocabulary;

pub use error::{AppError, LoadError, SessionError, StoreError};
pub use nong_types::{SourceLanguage, VocabularyEntry};
