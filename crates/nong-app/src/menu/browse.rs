use std::io::{BufRead, Write};

use nong_core::vocabulary::Category;

use crate::console::Console;
use crate::menu::parse_choice;
use crate::session::Session;

pub fn browse_vocabulary<R: BufRead, W: Write>(session: &mut Session<R, W>) -> anyhow::Result<()> {
    session.console.heading("📚 VOCABULARY BROWSER")?;
    let vocabulary = session.state.vocabulary.clone();
    let categories = vocabulary.categories();

    loop {
        writeln!(session.console, "\nCategories:")?;
        for (i, category) in categories.iter().enumerate() {
            writeln!(
                session.console,
                "  {}. {} ({} words)",
                i + 1,
                category.title(),
                category.words.len()
            )?;
        }
        writeln!(session.console, "  0. Back to main menu")?;

        let input = session
            .console
            .prompt(&format!("\nSelect category (0-{}): ", categories.len()))?;

        match parse_choice(&input) {
            Some(0) => return Ok(()),
            Some(n) if n <= categories.len() => {
                show_category(&mut session.console, &categories[n - 1])?
            }
            Some(_) => writeln!(session.console, "❌ Invalid choice!")?,
            None => writeln!(session.console, "❌ Please enter a number!")?,
        }
    }
}

fn show_category<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    category: &Category,
) -> anyhow::Result<()> {
    console.heading(&format!("📖 {}", category.title()))?;

    for (i, word) in category.words.iter().enumerate() {
        writeln!(console, "{}. {}", i + 1, word.english)?;
        writeln!(console, "   Mandarin:     {}", word.mandarin)?;
        writeln!(console, "   Shanghainese: {} ({})", word.shanghainese, word.pinyin)?;
        writeln!(console)?;
    }

    console.pause()?;
    Ok(())
}
