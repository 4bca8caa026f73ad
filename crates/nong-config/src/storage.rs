use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Vars;

fn default_vocab_file() -> String {
    "shanghainese_vocab.json".to_string()
}

fn default_progress_file() -> String {
    "learning_progress.json".to_string()
}

fn default_static_dir() -> String {
    "static".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    #[serde(default = "default_vocab_file")]
    pub vocab_file: String,
    #[serde(default = "default_progress_file")]
    pub progress_file: String,
    /// Served under /static by the web server
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            vocab_file: default_vocab_file(),
            progress_file: default_progress_file(),
            static_dir: default_static_dir(),
        }
    }
}

impl StorageConfig {
    pub(crate) fn from_vars<F>(vars: &Vars<F>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            vocab_file: vars.string_or("VOCAB_FILE", &default_vocab_file()),
            progress_file: vars.string_or("PROGRESS_FILE", &default_progress_file()),
            static_dir: vars.string_or("STATIC_DIR", &default_static_dir()),
        }
    }

    /// Where synthesized audio is written
    pub fn audio_dir(&self) -> PathBuf {
        PathBuf::from(&self.static_dir).join("audio")
    }
}
