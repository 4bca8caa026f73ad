use std::fmt;
use std::path::Path;

use nong_types::VocabularyEntry;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LoadError;

/// Named, ordered word list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub name: String,
    pub words: Vec<VocabularyEntry>,
}

impl Category {
    /// `daily_phrases` -> `Daily Phrases`
    pub fn title(&self) -> String {
        self.name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }
}

/// Read-only vocabulary, categories kept in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    categories: Vec<Category>,
}

impl Vocabulary {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load vocabulary from file path
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        tracing::info!("Loading vocabulary from file: {}", path.display());

        let json = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::FileNotFound(path.display().to_string()),
            _ => LoadError::IoError(e),
        })?;

        let vocabulary = Self::from_json(&json).map_err(|source| LoadError::InvalidFormat {
            path: path.display().to_string(),
            source,
        })?;

        tracing::info!(
            "Loaded {} words in {} categories",
            vocabulary.word_count(),
            vocabulary.categories.len()
        );
        Ok(vocabulary)
    }

    /// Like [`Vocabulary::load`], but a failure yields an empty vocabulary
    pub fn load_or_empty(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::error!("{e}; continuing with an empty vocabulary");
            Self::default()
        })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Every word of every category, in file order
    pub fn all_words(&self) -> Vec<VocabularyEntry> {
        self.categories
            .iter()
            .flat_map(|c| c.words.iter().cloned())
            .collect()
    }

    pub fn word_count(&self) -> usize {
        self.categories.iter().map(|c| c.words.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.word_count() == 0
    }
}

impl<'de> Deserialize<'de> for Vocabulary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = Vocabulary;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of category name to word list")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut categories = Vec::new();
                while let Some((name, words)) = map.next_entry::<String, Vec<VocabularyEntry>>()? {
                    categories.push(Category { name, words });
                }
                Ok(Vocabulary { categories })
            }
        }

        deserializer.deserialize_map(CategoriesVisitor)
    }
}
