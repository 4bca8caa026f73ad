use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One word of the vocabulary file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub english: String,
    pub mandarin: String,
    pub shanghainese: String,
    pub pinyin: String,
}

impl VocabularyEntry {
    pub fn new(english: &str, mandarin: &str, shanghainese: &str, pinyin: &str) -> Self {
        Self {
            english: english.to_string(),
            mandarin: mandarin.to_string(),
            shanghainese: shanghainese.to_string(),
            pinyin: pinyin.to_string(),
        }
    }
}

/// Language the learner types into the translator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceLanguage {
    #[default]
    Mandarin,
    English,
}

impl SourceLanguage {
    pub const ALL: [SourceLanguage; 2] = [SourceLanguage::Mandarin, SourceLanguage::English];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceLanguage::Mandarin => "mandarin",
            SourceLanguage::English => "english",
        }
    }

    /// Human readable name, also substituted into the dialect prompt
    pub fn label(&self) -> &'static str {
        match self {
            SourceLanguage::Mandarin => "Mandarin",
            SourceLanguage::English => "English",
        }
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSourceLanguageError(pub String);

impl fmt::Display for ParseSourceLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported source language: {}", self.0)
    }
}

impl std::error::Error for ParseSourceLanguageError {}

impl FromStr for SourceLanguage {
    type Err = ParseSourceLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mandarin" | "zh" => Ok(SourceLanguage::Mandarin),
            "english" | "en" => Ok(SourceLanguage::English),
            other => Err(ParseSourceLanguageError(other.to_string())),
        }
    }
}
