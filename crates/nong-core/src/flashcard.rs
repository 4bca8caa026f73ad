use nong_types::VocabularyEntry;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Front/back layout of a study card.
///
/// Placeholders: `{english}`, `{mandarin}`, `{shanghainese}`, `{pinyin}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub front_template: String,
    pub back_template: String,
}

impl Default for CardTemplate {
    fn default() -> Self {
        Self {
            front_template: "English: {english}\nMandarin: {mandarin}".to_string(),
            back_template: "Shanghainese: {shanghainese}\nPinyin: {pinyin}".to_string(),
        }
    }
}

impl CardTemplate {
    pub fn new(front: String, back: String) -> Self {
        Self {
            front_template: front,
            back_template: back,
        }
    }

    pub fn format_front(&self, word: &VocabularyEntry) -> String {
        fill(&self.front_template, word)
    }

    pub fn format_back(&self, word: &VocabularyEntry) -> String {
        fill(&self.back_template, word)
    }
}

fn fill(template: &str, word: &VocabularyEntry) -> String {
    template
        .replace("{english}", &word.english)
        .replace("{mandarin}", &word.mandarin)
        .replace("{shanghainese}", &word.shanghainese)
        .replace("{pinyin}", &word.pinyin)
}

/// One card with its 1-based position in the deck
#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    pub index: usize,
    pub total: usize,
    pub word: VocabularyEntry,
}

/// Shuffled single pass over a word list
#[derive(Debug)]
pub struct FlashcardDeck {
    cards: std::iter::Enumerate<std::vec::IntoIter<VocabularyEntry>>,
    total: usize,
}

impl Iterator for FlashcardDeck {
    type Item = Flashcard;

    fn next(&mut self) -> Option<Self::Item> {
        self.cards.next().map(|(i, word)| Flashcard {
            index: i + 1,
            total: self.total,
            word,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.cards.size_hint()
    }
}

impl ExactSizeIterator for FlashcardDeck {}

pub fn start_flashcards<R>(
    words: &[VocabularyEntry],
    rng: &mut R,
) -> Result<FlashcardDeck, SessionError>
where
    R: Rng + ?Sized,
{
    if words.is_empty() {
        return Err(SessionError::InsufficientVocabulary {
            required: 1,
            available: 0,
        });
    }

    let mut deck = words.to_vec();
    deck.shuffle(rng);

    Ok(FlashcardDeck {
        total: deck.len(),
        cards: deck.into_iter().enumerate(),
    })
}
