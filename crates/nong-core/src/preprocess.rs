use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Trim and NFC-normalize learner input. Inner line breaks are kept.
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // NFC keeps full-width punctuation as typed
        text.nfc().collect()
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_composes() {
        let p = DefaultPreprocessor;

        assert_eq!(p.process("  你好  \n"), "你好");
        assert_eq!(p.process("cafe\u{301}"), "caf\u{e9}");
        assert_eq!(p.process("   "), "");
    }

    #[test]
    fn keeps_full_width_punctuation() {
        assert_eq!(DefaultPreprocessor.process("侬好！"), "侬好！");
    }
}
