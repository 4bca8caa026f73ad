use std::io::{BufRead, Write};

use nong_core::SessionError;
use nong_core::progress::SessionSummary;
use nong_core::quiz::{QuizTally, check_quiz_vocabulary, score_selection, start_quiz};

use crate::console::RULE;
use crate::menu::parse_choice;
use crate::session::Session;

pub const MAX_CLI_QUESTIONS: usize = 20;
pub const DEFAULT_QUESTIONS: usize = 5;

pub async fn quiz_mode<R: BufRead, W: Write>(session: &mut Session<R, W>) -> anyhow::Result<()> {
    session.console.heading("🎯 QUIZ MODE")?;
    let words = session.state.vocabulary.all_words();

    if let Err(SessionError::InsufficientVocabulary { required, .. }) =
        check_quiz_vocabulary(words.len())
    {
        writeln!(session.console, "❌ Need at least {required} words for quiz mode!")?;
        return Ok(());
    }

    let max = MAX_CLI_QUESTIONS.min(words.len());
    let input = session
        .console
        .prompt(&format!("\nHow many questions? (max {max}): "))?;
    let requested = parse_choice(&input).unwrap_or(DEFAULT_QUESTIONS);

    let quiz = match start_quiz(&words, requested.min(max), &mut session.rng) {
        Ok(quiz) => quiz,
        Err(e) => {
            writeln!(session.console, "❌ {e}")?;
            return Ok(());
        }
    };

    let total = quiz.len();
    writeln!(session.console, "\n📝 Starting quiz with {total} questions!\n")?;

    let mut tally = QuizTally::default();
    for (i, question) in quiz.enumerate() {
        writeln!(session.console, "\n--- Question {}/{} ---", i + 1, total)?;
        writeln!(session.console, "{}", question.prompt)?;
        for (j, option) in question.options.iter().enumerate() {
            writeln!(session.console, "  {}. {}", j + 1, option)?;
        }

        let answer = session
            .console
            .prompt(&format!("\nYour answer (1-{}): ", question.options.len()))?;

        let correct = score_selection(&question, &answer);
        if correct {
            writeln!(session.console, "✅ Correct!")?;
        } else if question.option_at(&answer).is_some() {
            writeln!(session.console, "❌ Wrong! Correct answer: {}", question.correct_answer)?;
        } else {
            writeln!(
                session.console,
                "❌ Invalid input! Correct answer: {}",
                question.correct_answer
            )?;
        }
        tally.record(correct);
    }

    writeln!(session.console, "\n{RULE}")?;
    writeln!(session.console, "🏆 QUIZ COMPLETE!")?;
    writeln!(session.console, "📊 Score: {tally}")?;
    writeln!(session.console, "{RULE}")?;

    session.finish_session(SessionSummary::Quiz(tally))
}
