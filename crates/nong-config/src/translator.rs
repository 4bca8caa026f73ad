use serde::{Deserialize, Serialize};

use crate::{ConfigError, Vars};

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

fn default_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Credential for the chat-completion and fallback speech provider
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Replaces the embedded dialect-mapping template when set
    pub prompt_file: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            prompt_file: None,
        }
    }
}

impl TranslatorConfig {
    pub(crate) fn from_vars<F>(vars: &Vars<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = vars
            .string(API_KEY_VAR)
            .ok_or(ConfigError::MissingCredential(API_KEY_VAR))?;

        let api_url = vars
            .string_or("OPENAI_BASE_URL", &default_api_url())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            api_key,
            api_url,
            model: vars.string_or("TRANSLATION_MODEL", &default_model()),
            timeout_secs: vars.parse_or("TRANSLATION_TIMEOUT_SECS", default_timeout_secs()),
            prompt_file: vars.string("DIALECT_PROMPT_FILE"),
        })
    }
}
