pub use nong_types::SourceLanguage;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from the source language into Shanghainese
    async fn translate(
        &self,
        text: &str,
        source: SourceLanguage,
    ) -> Result<Translation, TranslateError>;

    /// Source languages this provider accepts
    fn supported_languages(&self) -> Vec<SourceLanguage>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// Model output, verbatim
    pub text: String,
    pub source: SourceLanguage,
    pub provider: String,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub model: String,
    pub requires_api_key: bool,
}

/// Every variant means the translation is unavailable for this call.
/// Nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Empty response from provider")]
    EmptyResponse,

    #[error("Unsupported source language: {0}")]
    UnsupportedLanguage(SourceLanguage),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
