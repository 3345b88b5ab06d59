//! Entropy-driven boundary scoring.
//!
//! # Components
//!
//! - `model`: the three entropy signals, their combination and the
//!   path-length-adjusted boundary test
//! - `context`: the bounded recent-history buffer threaded through a walk

mod context;
mod model;

pub use context::TraversalContext;
pub use model::{EntropyBreakdown, EntropyModel, EPSILON, UNKNOWN_RELATION};
