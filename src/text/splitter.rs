use regex::Regex;

use crate::core::config::defaults;
use crate::core::errors::BoundaryError;

/// Splits raw text into ordered, non-empty sentences.
pub trait SentenceSplitter {
    fn split(&self, text: &str) -> Vec<String>;
}

/// Punctuation-driven splitter. Fragments whose trimmed length is at most
/// `min_chars` characters are dropped.
#[derive(Debug, Clone)]
pub struct RegexSentenceSplitter {
    min_chars: usize,
    whitespace: Regex,
    sentence: Regex,
    disallowed: Regex,
}

impl RegexSentenceSplitter {
    pub fn new(min_chars: usize) -> Result<Self, BoundaryError> {
        Ok(Self {
            min_chars,
            whitespace: Regex::new(r"\s+").map_err(BoundaryError::internal)?,
            sentence: Regex::new(r"[^.!?]+[.!?]*").map_err(BoundaryError::internal)?,
            disallowed: Regex::new(r"[^\w\s.!?]").map_err(BoundaryError::internal)?,
        })
    }

    pub fn with_defaults() -> Result<Self, BoundaryError> {
        Self::new(defaults::MIN_SENTENCE_CHARS)
    }

    /// Drop everything except word characters, whitespace and sentence
    /// punctuation, then collapse whitespace.
    pub fn clean_text(&self, text: &str) -> String {
        let stripped = self.disallowed.replace_all(text, "");
        self.whitespace
            .replace_all(&stripped, " ")
            .trim()
            .to_string()
    }
}

impl SentenceSplitter for RegexSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        let normalized = self.whitespace.replace_all(text.trim(), " ");

        self.sentence
            .find_iter(&normalized)
            .map(|m| m.as_str().trim())
            .filter(|s| s.chars().count() > self.min_chars)
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_punctuation() {
        let splitter = RegexSentenceSplitter::with_defaults().unwrap();
        let sentences = splitter.split(
            "The cat sat on the mat. The dog ran in the park!  Birds flew over the trees?",
        );
        assert_eq!(
            sentences,
            vec![
                "The cat sat on the mat.",
                "The dog ran in the park!",
                "Birds flew over the trees?",
            ]
        );
    }

    #[test]
    fn short_fragments_are_discarded() {
        let splitter = RegexSentenceSplitter::with_defaults().unwrap();
        // "Fine." is exactly 5 chars and goes too.
        let sentences = splitter.split("Hi. Yes ok. Fine.");
        assert_eq!(sentences, vec!["Yes ok."]);
    }

    #[test]
    fn whitespace_is_collapsed_and_trailing_text_kept() {
        let splitter = RegexSentenceSplitter::with_defaults().unwrap();
        let sentences = splitter.split("  John went\n\tto the store.  He bought milk  ");
        assert_eq!(sentences, vec!["John went to the store.", "He bought milk"]);
    }

    #[test]
    fn empty_input_yields_nothing() {
        let splitter = RegexSentenceSplitter::with_defaults().unwrap();
        assert!(splitter.split("").is_empty());
        assert!(splitter.split("   ...   ").is_empty());
    }

    #[test]
    fn clean_text_strips_symbols() {
        let splitter = RegexSentenceSplitter::with_defaults().unwrap();
        assert_eq!(
            splitter.clean_text("Hello,   (world)!  \"Quoted\" text?"),
            "Hello world! Quoted text?"
        );
    }
}
