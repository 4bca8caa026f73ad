pub mod browse;
pub mod flashcards;
pub mod progress;
pub mod quiz;
pub mod translate;

/// Numeric menu input, `None` for anything else
pub(crate) fn parse_choice(input: &str) -> Option<usize> {
    input.trim().parse().ok()
}
