//! Closed-class word lists and a coarse part-of-speech heuristic.
//!
//! The lexicon is built once per process by [`setup`]. Callers hold the
//! returned `&'static Lexicon`, so nothing in the crate initializes it
//! implicitly.

use std::collections::HashSet;
use std::sync::OnceLock;

static LEXICON: OnceLock<Lexicon> = OnceLock::new();

/// Coarse word class used by the triplet heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordClass {
    Noun,
    Verb,
    Other,
}

#[derive(Debug)]
pub struct Lexicon {
    pronouns: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    function_words: HashSet<&'static str>,
}

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "my", "your",
    "his", "its", "our", "their", "who", "whom", "whose", "what", "mine", "yours", "ours",
    "theirs",
];

const VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am", "has", "have", "had", "do", "does",
    "did", "go", "goes", "went", "gone", "sit", "sits", "sat", "run", "runs", "ran", "fly",
    "flies", "flew", "buy", "buys", "bought", "make", "makes", "made", "take", "takes", "took",
    "see", "sees", "saw", "seen", "say", "says", "said", "get", "gets", "got", "give", "gives",
    "gave", "find", "finds", "found", "think", "thinks", "thought", "know", "knows", "knew",
    "come", "comes", "came", "eat", "eats", "ate", "write", "writes", "wrote", "read", "reads",
    "tell", "tells", "told", "become", "becomes", "became", "leave", "leaves", "left", "feel",
    "feels", "felt", "bring", "brings", "brought", "hold", "holds", "held", "keep", "keeps",
    "kept", "stand", "stands", "stood", "meet", "meets", "met", "lead", "leads", "led", "speak",
    "speaks", "spoke", "grow", "grows", "grew", "lose", "loses", "lost", "fall", "falls", "fell",
    "send", "sends", "sent", "build", "builds", "built", "begin", "begins", "began", "win",
    "wins", "won", "can", "could", "will", "would", "shall", "should", "may", "might", "must",
    "call", "calls", "like", "likes", "love", "loves", "want", "wants", "need", "needs", "live",
    "lives", "walk", "walks", "play", "plays", "work", "works", "conduct", "conducts", "observe",
    "observes",
];

const FUNCTION_WORDS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "some", "any", "each", "every", "no",
    "on", "in", "at", "over", "under", "of", "to", "from", "by", "with", "without", "for",
    "into", "onto", "about", "after", "before", "through", "between", "and", "or", "but", "nor",
    "so", "yet", "if", "then", "than", "as", "because", "while", "not", "very", "too", "also",
    "just", "only", "all", "both", "more", "most", "much", "many", "few", "carefully", "quickly",
    "slowly", "there", "here", "when", "where", "why", "how",
];

/// Build the process-wide lexicon. Safe to call any number of times.
pub fn setup() -> &'static Lexicon {
    LEXICON.get_or_init(|| {
        let lexicon = Lexicon::new();
        tracing::debug!(
            pronouns = lexicon.pronouns.len(),
            verbs = lexicon.verbs.len(),
            function_words = lexicon.function_words.len(),
            "Lexicon initialized"
        );
        lexicon
    })
}

impl Lexicon {
    fn new() -> Self {
        Self {
            pronouns: PRONOUNS.iter().copied().collect(),
            verbs: VERBS.iter().copied().collect(),
            function_words: FUNCTION_WORDS.iter().copied().collect(),
        }
    }

    /// Tag a lowercase token. Pronouns count as nouns.
    pub fn tag(&self, token: &str) -> WordClass {
        if self.pronouns.contains(token) {
            return WordClass::Noun;
        }
        if self.function_words.contains(token) {
            return WordClass::Other;
        }
        if self.verbs.contains(token) || (token.len() > 3 && token.ends_with("ed")) {
            return WordClass::Verb;
        }
        if token.chars().all(|c| c.is_ascii_digit()) {
            return WordClass::Other;
        }
        WordClass::Noun
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_is_idempotent() {
        let first = setup() as *const Lexicon;
        let second = setup() as *const Lexicon;
        assert_eq!(first, second);
    }

    #[test]
    fn tags_follow_word_classes() {
        let lexicon = setup();
        assert_eq!(lexicon.tag("cat"), WordClass::Noun);
        assert_eq!(lexicon.tag("she"), WordClass::Noun);
        assert_eq!(lexicon.tag("sat"), WordClass::Verb);
        assert_eq!(lexicon.tag("documented"), WordClass::Verb);
        assert_eq!(lexicon.tag("the"), WordClass::Other);
        assert_eq!(lexicon.tag("2024"), WordClass::Other);
        // Too short to be a regular past tense.
        assert_eq!(lexicon.tag("bed"), WordClass::Noun);
    }
}
