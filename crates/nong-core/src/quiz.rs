//! Multiple-choice quiz generation and scoring.
//!
//! Randomness is passed in by the caller so tests can seed it.

use std::fmt;

use nong_types::VocabularyEntry;
use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use crate::error::SessionError;

/// Smallest vocabulary that can fill four options
pub const MIN_QUIZ_WORDS: usize = 4;
pub const MAX_DISTRACTORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptDirection {
    EnglishToShanghainese,
    MandarinToShanghainese,
    ShanghaineseToEnglish,
}

impl PromptDirection {
    pub const ALL: [PromptDirection; 3] = [
        PromptDirection::EnglishToShanghainese,
        PromptDirection::MandarinToShanghainese,
        PromptDirection::ShanghaineseToEnglish,
    ];

    /// The field the learner has to produce
    pub fn answer<'a>(&self, word: &'a VocabularyEntry) -> &'a str {
        match self {
            PromptDirection::ShanghaineseToEnglish => &word.english,
            _ => &word.shanghainese,
        }
    }

    pub fn prompt(&self, word: &VocabularyEntry) -> String {
        match self {
            PromptDirection::EnglishToShanghainese => {
                format!("What is '{}' in Shanghainese?", word.english)
            }
            PromptDirection::MandarinToShanghainese => {
                format!("What is '{}' in Shanghainese?", word.mandarin)
            }
            PromptDirection::ShanghaineseToEnglish => {
                format!("What does '{}' mean in English?", word.shanghainese)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizQuestion {
    #[serde(skip)]
    pub direction: PromptDirection,
    #[serde(rename = "question")]
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub word: VocabularyEntry,
}

impl QuizQuestion {
    /// Option picked by a 1-based menu number
    pub fn option_at(&self, selection: &str) -> Option<&str> {
        let index: usize = selection.trim().parse().ok()?;
        index
            .checked_sub(1)
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }
}

/// Finite, single-pass sequence of questions
#[derive(Debug)]
pub struct Quiz {
    questions: std::vec::IntoIter<QuizQuestion>,
}

impl Iterator for Quiz {
    type Item = QuizQuestion;

    fn next(&mut self) -> Option<Self::Item> {
        self.questions.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.questions.size_hint()
    }
}

impl ExactSizeIterator for Quiz {}

/// Running score of a quiz
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct QuizTally {
    pub score: u32,
    pub total: u32,
}

impl QuizTally {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.score += 1;
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total) * 100.0
    }
}

impl fmt::Display for QuizTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({:.1}%)", self.score, self.total, self.percentage())
    }
}

pub fn check_quiz_vocabulary(available: usize) -> Result<(), SessionError> {
    if available < MIN_QUIZ_WORDS {
        return Err(SessionError::InsufficientVocabulary {
            required: MIN_QUIZ_WORDS,
            available,
        });
    }
    Ok(())
}

/// Build `count` questions (clamped to the vocabulary size) over `words`
pub fn start_quiz<R>(
    words: &[VocabularyEntry],
    count: usize,
    rng: &mut R,
) -> Result<Quiz, SessionError>
where
    R: Rng + ?Sized,
{
    check_quiz_vocabulary(words.len())?;
    if count == 0 {
        return Err(SessionError::EmptyQuiz);
    }

    let mut pool: Vec<&VocabularyEntry> = words.iter().collect();
    pool.shuffle(rng);
    pool.truncate(count.min(words.len()));

    let questions: Vec<QuizQuestion> = pool
        .into_iter()
        .map(|target| build_question(target, words, rng))
        .collect();

    tracing::debug!(questions = questions.len(), "Quiz generated");
    Ok(Quiz {
        questions: questions.into_iter(),
    })
}

fn build_question<R>(
    target: &VocabularyEntry,
    words: &[VocabularyEntry],
    rng: &mut R,
) -> QuizQuestion
where
    R: Rng + ?Sized,
{
    let direction = PromptDirection::ALL[rng.random_range(0..PromptDirection::ALL.len())];
    let answer = direction.answer(target);

    // Distinct answer values other than the target's
    let mut candidates: Vec<&str> = Vec::new();
    for word in words {
        let value = direction.answer(word);
        if value != answer && !candidates.contains(&value) {
            candidates.push(value);
        }
    }

    let mut options: Vec<String> = Vec::with_capacity(MAX_DISTRACTORS + 1);
    options.push(answer.to_string());
    options.extend(
        candidates
            .choose_multiple(rng, MAX_DISTRACTORS)
            .map(|value| value.to_string()),
    );
    options.shuffle(rng);

    QuizQuestion {
        direction,
        prompt: direction.prompt(target),
        options,
        correct_answer: answer.to_string(),
        word: target.clone(),
    }
}

/// Exact string comparison with the correct answer
pub fn score_answer(question: &QuizQuestion, chosen: &str) -> bool {
    chosen == question.correct_answer
}

/// Score a typed menu number; anything unparseable or out of range is wrong
pub fn score_selection(question: &QuizQuestion, selection: &str) -> bool {
    question
        .option_at(selection)
        .is_some_and(|chosen| score_answer(question, chosen))
}
