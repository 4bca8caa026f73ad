use std::io::{BufRead, Write};

use nong_core::SessionError;
use nong_core::flashcard::{CardTemplate, start_flashcards};
use nong_core::progress::SessionSummary;
use nong_core::quiz::QuizTally;

use crate::menu::parse_choice;
use crate::session::Session;

pub async fn flashcard_mode<R: BufRead, W: Write>(
    session: &mut Session<R, W>,
) -> anyhow::Result<()> {
    session.console.heading("🎴 FLASHCARD MODE")?;
    let vocabulary = session.state.vocabulary.clone();
    let categories = vocabulary.categories();

    writeln!(session.console, "\nSelect category:")?;
    for (i, category) in categories.iter().enumerate() {
        writeln!(session.console, "  {}. {}", i + 1, category.title())?;
    }

    let input = session
        .console
        .prompt(&format!("\nCategory (1-{}): ", categories.len()))?;
    let category = match parse_choice(&input) {
        Some(n) if (1..=categories.len()).contains(&n) => &categories[n - 1],
        Some(_) => {
            writeln!(session.console, "❌ Invalid choice!")?;
            return Ok(());
        }
        None => {
            writeln!(session.console, "❌ Invalid input!")?;
            return Ok(());
        }
    };

    let deck = match start_flashcards(&category.words, &mut session.rng) {
        Ok(deck) => deck,
        Err(SessionError::InsufficientVocabulary { .. }) => {
            writeln!(session.console, "❌ {} has no words to study!", category.title())?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    writeln!(session.console, "\n📚 Starting flashcards for: {}", category.title())?;
    writeln!(session.console, "📊 {} cards to review\n", deck.len())?;

    let template = CardTemplate::default();
    let mut known = QuizTally::default();

    for card in deck {
        writeln!(session.console, "\n--- Card {}/{} ---", card.index, card.total)?;
        writeln!(session.console, "{}", template.format_front(&card.word))?;

        session
            .console
            .prompt("\n🤔 Think of the Shanghainese word, then press Enter...")?;
        writeln!(
            session.console,
            "\n✅ Answer: {} ({})",
            card.word.shanghainese, card.word.pinyin
        )?;

        if session.console.confirm("🔊 Hear pronunciation? (y/n): ")? {
            session
                .pronounce(&card.word.shanghainese, &format!("flashcard_{}.wav", card.index))
                .await?;
        }

        let knew_it = session.console.confirm("Did you know it? (y/n): ")?;
        if knew_it {
            session.progress.mark_learned(&card.word.shanghainese);
        }
        known.record(knew_it);
    }

    writeln!(session.console, "\n{}", crate::console::RULE)?;
    writeln!(session.console, "📊 Session Complete!")?;
    writeln!(session.console, "✅ Correct: {known}")?;
    writeln!(session.console, "{}", crate::console::RULE)?;

    session.finish_session(SessionSummary::Study)
}
