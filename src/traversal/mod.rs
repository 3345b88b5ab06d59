//! Walks over the knowledge graph that stop at high-entropy nodes.
//!
//! # Components
//!
//! - `traverser`: greedy entropy walk plus breadth-first, depth-first and
//!   sentence-guided variants
//! - `result`: the per-walk outcome, strategy and stop reason

mod result;
mod traverser;

pub use result::{StopReason, Strategy, TraversalResult};
pub use traverser::GraphTraverser;
