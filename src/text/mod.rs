//! Text collaborators: sentence splitting and triplet extraction.
//!
//! Call [`setup`] once at process start and hand the returned lexicon to
//! [`HeuristicExtractor`].

mod extractor;
mod lexicon;
mod splitter;

pub use extractor::{HeuristicExtractor, Triplet, TripletExtractor};
pub use lexicon::{setup, Lexicon, WordClass};
pub use splitter::{RegexSentenceSplitter, SentenceSplitter};
