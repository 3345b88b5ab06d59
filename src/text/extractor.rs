//! Subject/relation/object extraction used to populate the knowledge graph.
//!
//! Extraction is a heuristic over coarse word classes: nouns in the first
//! half of a sentence are subject candidates, nouns in the second half are
//! object candidates, and any verb is a relation candidate.

use std::collections::BTreeSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::lexicon::{Lexicon, WordClass};
use crate::core::config::defaults;
use crate::core::errors::BoundaryError;

const MAX_CANDIDATES: usize = 2;

/// A single (subject, relation, object) statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triplet {
    pub subject: String,
    pub relation: String,
    pub object: String,
}

impl Triplet {
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            relation: relation.into(),
            object: object.into(),
        }
    }
}

/// Turns one sentence into an ordered list of triplets.
///
/// Implementations must be deterministic, return lowercase tokens, and never
/// emit a triplet whose subject equals its object. An empty result is
/// allowed.
pub trait TripletExtractor {
    fn extract(&self, sentence: &str) -> Vec<Triplet>;
}

impl<F> TripletExtractor for F
where
    F: Fn(&str) -> Vec<Triplet>,
{
    fn extract(&self, sentence: &str) -> Vec<Triplet> {
        self(sentence)
    }
}

pub struct HeuristicExtractor {
    lexicon: &'static Lexicon,
    token: Regex,
    max_triplets: usize,
}

impl HeuristicExtractor {
    /// `lexicon` comes from [`super::setup`].
    pub fn new(lexicon: &'static Lexicon, max_triplets: usize) -> Result<Self, BoundaryError> {
        if max_triplets == 0 {
            return Err(BoundaryError::invalid_argument(
                "max_triplets must be at least 1",
            ));
        }
        Ok(Self {
            lexicon,
            token: Regex::new(r"[\p{L}\p{N}]+(?:'[\p{L}\p{N}]+)*")
                .map_err(BoundaryError::internal)?,
            max_triplets,
        })
    }

    pub fn with_defaults(lexicon: &'static Lexicon) -> Result<Self, BoundaryError> {
        Self::new(lexicon, defaults::MAX_TRIPLETS)
    }

    fn tagged(&self, sentence: &str) -> Vec<(String, WordClass)> {
        let lowered = sentence.to_lowercase();
        self.token
            .find_iter(&lowered)
            .map(|m| {
                let word = m.as_str().to_string();
                let class = self.lexicon.tag(&word);
                (word, class)
            })
            .collect()
    }

    /// Distinct nouns of a sentence, sorted.
    pub fn sentence_entities(&self, sentence: &str) -> Vec<String> {
        self.tagged(sentence)
            .into_iter()
            .filter(|(_, class)| *class == WordClass::Noun)
            .map(|(word, _)| word)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Jaccard overlap of the two sentences' entity sets.
    pub fn sentence_similarity(&self, first: &str, second: &str) -> f64 {
        let a: BTreeSet<String> = self.sentence_entities(first).into_iter().collect();
        let b: BTreeSet<String> = self.sentence_entities(second).into_iter().collect();
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let intersection = a.intersection(&b).count();
        let union = a.union(&b).count();
        intersection as f64 / union as f64
    }
}

impl TripletExtractor for HeuristicExtractor {
    fn extract(&self, sentence: &str) -> Vec<Triplet> {
        let tagged = self.tagged(sentence);
        let half = tagged.len() / 2;

        let subjects = candidates(
            tagged
                .iter()
                .enumerate()
                .filter(|(i, (_, class))| *class == WordClass::Noun && *i < half),
            "subject",
        );
        let verbs = candidates(
            tagged
                .iter()
                .enumerate()
                .filter(|(_, (_, class))| *class == WordClass::Verb),
            "relates",
        );
        let objects = candidates(
            tagged
                .iter()
                .enumerate()
                .filter(|(i, (_, class))| *class == WordClass::Noun && *i > half),
            "object",
        );

        let mut triplets = Vec::new();
        for subject in &subjects {
            for verb in &verbs {
                for object in &objects {
                    if subject != object {
                        triplets.push(Triplet::new(subject, verb, object));
                    }
                }
            }
        }

        if triplets.is_empty() {
            triplets = simple_extraction(&tagged);
        }

        triplets.truncate(self.max_triplets);
        triplets
    }
}

fn candidates<'a, I>(tagged: I, fallback: &str) -> Vec<String>
where
    I: Iterator<Item = (usize, &'a (String, WordClass))>,
{
    let found: Vec<String> = tagged
        .take(MAX_CANDIDATES)
        .map(|(_, (word, _))| word.clone())
        .collect();
    if found.is_empty() {
        vec![fallback.to_string()]
    } else {
        found
    }
}

fn simple_extraction(tagged: &[(String, WordClass)]) -> Vec<Triplet> {
    let words: Vec<&str> = tagged
        .iter()
        .filter(|(_, class)| *class != WordClass::Other)
        .map(|(word, _)| word.as_str())
        .collect();

    let triplet = match words.as_slice() {
        [first, second, third, ..] => Triplet::new(*first, *second, *third),
        [first, second] => Triplet::new(*first, "relates", *second),
        [only] => Triplet::new(*only, "exists", "entity"),
        [] => Triplet::new("subject", "relates", "object"),
    };

    if triplet.subject == triplet.object {
        return Vec::new();
    }
    vec![triplet]
}
