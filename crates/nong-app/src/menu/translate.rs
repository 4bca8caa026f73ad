use std::io::{BufRead, Write};

use nong_core::AppError;
use nong_core::preprocess::{DefaultPreprocessor, Preprocessor};

use crate::menu::parse_choice;
use crate::session::Session;

pub async fn translator_mode<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
) -> anyhow::Result<()> {
    session.console.heading("🌐 TRANSLATOR MODE")?;
    let translator = session.state.translator.clone();
    let languages = translator.supported_languages();

    loop {
        writeln!(session.console)?;
        for (i, language) in languages.iter().enumerate() {
            writeln!(session.console, "{}. {} → Shanghainese", i + 1, language.label())?;
        }
        writeln!(session.console, "0. Back to main menu")?;

        let input = session
            .console
            .prompt(&format!("\nSelect (0-{}): ", languages.len()))?;
        let source = match parse_choice(&input) {
            Some(0) => return Ok(()),
            Some(n) if n <= languages.len() => languages[n - 1],
            _ => {
                writeln!(session.console, "❌ Invalid choice!")?;
                continue;
            }
        };

        let raw = session
            .console
            .prompt(&format!("\nEnter {} text: ", source.label()))?;
        let text = DefaultPreprocessor.process(&raw);
        if text.is_empty() {
            continue;
        }

        writeln!(session.console, "\n🔄 Translating...")?;
        let translation = match translator.translate(&text, source).await {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(source = %source, error = %e, "Translation failed");
                writeln!(session.console, "\n❌ {}", AppError::from(e))?;
                continue;
            }
        };
        writeln!(session.console, "\n✅ Shanghainese: {}", translation.text)?;

        if session.console.confirm("\n🔊 Hear pronunciation? (y/n): ")? {
            session.pronounce(&translation.text, "translation_output.wav").await?;
        }
    }
}
