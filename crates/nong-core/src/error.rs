use nong_config::ConfigError;
use nong_translator::TranslateError;

/// Vocabulary file could not be read
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Vocabulary file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid vocabulary file {path}: {source}")]
    InvalidFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Progress file could not be read or written
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Progress file {path} is unreadable: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A quiz or flashcard session cannot start
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Need at least {required} words, found {available}")]
    InsufficientVocabulary { required: usize, available: usize },

    #[error("A quiz needs at least one question")]
    EmptyQuiz,
}

/// Failure kinds shared by the command line and web front ends
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    MissingCredential(#[from] ConfigError),

    #[error(transparent)]
    VocabularyLoad(#[from] LoadError),

    #[error(transparent)]
    Progress(#[from] StoreError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Translation unavailable: {0}")]
    TranslationUnavailable(#[from] TranslateError),

    #[error("Speech unavailable")]
    SpeechUnavailable,

    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
}
