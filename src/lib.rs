//! Sentence-boundary detection over a knowledge graph.
//!
//! Text is split into sentences, each sentence is turned into
//! subject/relation/object triplets, and the triplets become a directed
//! graph. Walks over that graph stop where the combined entropy of a node
//! spikes, which marks a likely boundary between ideas.

pub mod core;
pub mod entropy;
pub mod graph;
pub mod report;
pub mod text;
pub mod traversal;

pub use crate::core::errors::{BoundaryError, BoundaryResult};
pub use entropy::{EntropyModel, TraversalContext};
pub use graph::{KnowledgeGraph, KnowledgeGraphBuilder};
pub use report::{DetectionReport, RunAggregates, TraversalSummary};
pub use traversal::{GraphTraverser, StopReason, Strategy, TraversalResult};
