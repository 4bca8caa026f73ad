use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::speech::SpeechConfig;
use self::storage::StorageConfig;
use self::translator::TranslatorConfig;
use self::web::WebConfig;

pub mod speech;
pub mod storage;
pub mod translator;
pub mod web;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} not found in environment variables")]
    MissingCredential(&'static str),
}

#[derive(Serialize, Deserialize, Default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub speech: SpeechConfig,
    pub storage: StorageConfig,
    pub web: WebConfig,

    /// Filter directive used when RUST_LOG is not set
    pub log_level: Option<String>,
}

impl Config {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Config {
            translator: TranslatorConfig::from_vars(&vars)?,
            speech: SpeechConfig::from_vars(&vars),
            storage: StorageConfig::from_vars(&vars),
            web: WebConfig::from_vars(&vars),
            log_level: vars.string("LOG_LEVEL"),
        })
    }
}

/// Variable lookup shared by the config sections.
/// Blank values count as unset.
pub(crate) struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub(crate) fn string(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    pub(crate) fn string_or(&self, key: &str, default: &str) -> String {
        self.string(key).unwrap_or_else(|| default.to_string())
    }

    /// Unparseable values fall back to the default
    pub(crate) fn parse_or<T: FromStr>(&self, key: &str, default: T) -> T {
        self.string(key)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }
}
