pub mod prompt;
pub mod translator;

pub use prompt::DialectPrompt;
pub use translator::ShanghaineseTranslator;
