use std::path::Path;

use nong_translator::SourceLanguage;

const EMBEDDED_TEMPLATE: &str = include_str!("../data/dialect_prompt.txt");
const SOURCE_PLACEHOLDER: &str = "{source_language}";

/// Dialect-mapping instructions sent as the system message.
/// One template serves every source language.
#[derive(Debug, Clone)]
pub struct DialectPrompt {
    template: String,
}

impl Default for DialectPrompt {
    fn default() -> Self {
        Self::embedded()
    }
}

impl DialectPrompt {
    pub fn embedded() -> Self {
        Self {
            template: EMBEDDED_TEMPLATE.trim_end().to_string(),
        }
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        tracing::info!("Loading dialect prompt from file: {}", path.display());
        let template = std::fs::read_to_string(path)?;
        Ok(Self {
            template: template.trim_end().to_string(),
        })
    }

    /// Use the file when configured, otherwise the embedded template
    pub fn load(path: Option<&str>) -> std::io::Result<Self> {
        match path {
            Some(path) => Self::from_file(Path::new(path)),
            None => Ok(Self::embedded()),
        }
    }

    pub fn render(&self, source: SourceLanguage) -> String {
        self.template.replace(SOURCE_PLACEHOLDER, source.label())
    }
}
