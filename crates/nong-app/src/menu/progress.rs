use std::io::{BufRead, Write};

use crate::session::Session;

const RECENT_SCORES: usize = 5;
const RECENT_WORDS: usize = 10;

pub fn view_progress<R: BufRead, W: Write>(session: &mut Session<R, W>) -> anyhow::Result<()> {
    session.console.heading("📈 YOUR PROGRESS")?;
    let progress = &session.progress;
    let out = &mut session.console;

    writeln!(out, "\n📚 Words learned: {}", progress.words_learned.len())?;
    writeln!(out, "🎓 Study sessions: {}", progress.total_study_sessions)?;
    match progress.last_session {
        Some(stamp) => writeln!(out, "📅 Last session: {}", stamp.format("%Y-%m-%d %H:%M:%S"))?,
        None => writeln!(out, "📅 Last session: Never")?,
    }

    let scores = progress.recent_scores(RECENT_SCORES);
    if !scores.is_empty() {
        writeln!(out, "\n🎯 Quiz History (last {RECENT_SCORES}):")?;
        for quiz in scores {
            writeln!(
                out,
                "  {}: {}/{} ({:.1}%)",
                quiz.date.format("%Y-%m-%d"),
                quiz.score,
                quiz.total,
                quiz.percentage
            )?;
        }
    }

    let words = progress.recent_words(RECENT_WORDS);
    if !words.is_empty() {
        writeln!(out, "\n📝 Recently learned words:")?;
        for word in words {
            writeln!(out, "  • {word}")?;
        }
    }

    out.pause()?;
    Ok(())
}
