//! Boundary entropy for a node in its traversal context.
//!
//! # Signals
//!
//! The combined score mixes three signals:
//! 1. Local entropy: Shannon entropy (base 2) of the relation labels on the
//!    node's incident edges.
//! 2. Structural entropy: entropy over min-max normalized
//!    `[degree, clustering, context overlap]` features. The normalized
//!    values are used as weights directly, without rescaling them to sum
//!    to one.
//! 3. Semantic divergence: mean `1 - Jaccard` between neighbor sets of
//!    consecutive nodes over the last `window_size` path entries.
//!
//! `combined = 0.4 * local + 0.4 * structural + 0.2 * semantic`
//!
//! A node is a boundary when the combined score is strictly above the
//! threshold, scaled by path length: `x1.2` below 3 nodes, `x0.9` above 10.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use super::context::TraversalContext;
use crate::core::config::defaults;
use crate::core::errors::BoundaryError;
use crate::graph::{KnowledgeGraph, NodeId};

/// Additive stabilizer inside `log2` and min-max denominators.
pub const EPSILON: f64 = 1e-8;

/// Label used when an incident edge carries no relation.
pub const UNKNOWN_RELATION: &str = "unknown";

const LOCAL_WEIGHT: f64 = 0.4;
const STRUCTURAL_WEIGHT: f64 = 0.4;
const SEMANTIC_WEIGHT: f64 = 0.2;

const SHORT_PATH: usize = 3;
const LONG_PATH: usize = 10;
const SHORT_PATH_FACTOR: f64 = 1.2;
const LONG_PATH_FACTOR: f64 = 0.9;

const MAX_THRESHOLD: f64 = 10.0;

/// The three signals and their weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntropyBreakdown {
    pub local: f64,
    pub structural: f64,
    pub semantic: f64,
    pub combined: f64,
}

/// Immutable scoring configuration. All methods are pure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EntropyModel {
    threshold: f64,
    window_size: usize,
}

impl EntropyModel {
    pub fn new(threshold: f64, window_size: usize) -> Result<Self, BoundaryError> {
        if !threshold.is_finite() || threshold <= 0.0 || threshold > MAX_THRESHOLD {
            return Err(BoundaryError::invalid_argument(format!(
                "threshold must be in (0, {}], got {}",
                MAX_THRESHOLD, threshold
            )));
        }
        if window_size == 0 {
            return Err(BoundaryError::invalid_argument(
                "window_size must be at least 1",
            ));
        }
        Ok(Self {
            threshold,
            window_size,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Entropy of relation labels over all neighbors, checking `node -> n`
    /// before `n -> node`. Isolated nodes score 1.0.
    pub fn local_entropy(&self, graph: &KnowledgeGraph, node: NodeId) -> f64 {
        let neighbors = graph.neighbors(node);
        if neighbors.is_empty() {
            return 1.0;
        }

        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for neighbor in &neighbors {
            let relation = graph
                .relation_between(node, *neighbor)
                .unwrap_or(UNKNOWN_RELATION);
            *counts.entry(relation).or_insert(0) += 1;
        }

        let total = neighbors.len() as f64;
        shannon(counts.values().map(|count| *count as f64 / total))
    }

    pub fn structural_entropy(
        &self,
        graph: &KnowledgeGraph,
        node: NodeId,
        context: &[NodeId],
    ) -> f64 {
        let overlap = if context.is_empty() {
            0.0
        } else {
            let neighbors = graph.neighbor_set(node);
            let context: HashSet<NodeId> = context.iter().copied().collect();
            jaccard(&neighbors, &context)
        };

        let features = [graph.degree(node) as f64, graph.clustering(node), overlap];

        let min = features.iter().copied().fold(f64::INFINITY, f64::min);
        let max = features.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min + EPSILON;

        shannon(
            features
                .iter()
                .map(|f| (f - min) / span)
                .filter(|p| *p > 0.0),
        )
    }

    /// Mean neighbor-set divergence of consecutive pairs in `recent_path`.
    /// A pair with an empty neighbor set diverges by 1.0.
    pub fn semantic_divergence(&self, graph: &KnowledgeGraph, recent_path: &[NodeId]) -> f64 {
        if recent_path.len() < 2 {
            return 0.0;
        }

        let divergences: Vec<f64> = recent_path
            .windows(2)
            .map(|pair| {
                let prev = graph.neighbor_set(pair[0]);
                let curr = graph.neighbor_set(pair[1]);
                if prev.is_empty() || curr.is_empty() {
                    1.0
                } else {
                    1.0 - jaccard(&curr, &prev)
                }
            })
            .collect();

        divergences.iter().sum::<f64>() / divergences.len() as f64
    }

    pub fn breakdown(
        &self,
        graph: &KnowledgeGraph,
        node: NodeId,
        path: &[NodeId],
        context: &[NodeId],
    ) -> EntropyBreakdown {
        let local = self.local_entropy(graph, node);
        let structural = self.structural_entropy(graph, node, context);
        let semantic = if path.len() >= 2 {
            let window_start = path.len().saturating_sub(self.window_size);
            self.semantic_divergence(graph, &path[window_start..])
        } else {
            0.0
        };

        EntropyBreakdown {
            local,
            structural,
            semantic,
            combined: LOCAL_WEIGHT * local
                + STRUCTURAL_WEIGHT * structural
                + SEMANTIC_WEIGHT * semantic,
        }
    }

    pub fn node_entropy(
        &self,
        graph: &KnowledgeGraph,
        node: NodeId,
        path: &[NodeId],
        context: &[NodeId],
    ) -> f64 {
        self.breakdown(graph, node, path, context).combined
    }

    pub fn adjusted_threshold(&self, path_length: usize) -> f64 {
        if path_length > LONG_PATH {
            self.threshold * LONG_PATH_FACTOR
        } else if path_length < SHORT_PATH {
            self.threshold * SHORT_PATH_FACTOR
        } else {
            self.threshold
        }
    }

    pub fn is_boundary(&self, entropy: f64, path_length: usize) -> bool {
        entropy > self.adjusted_threshold(path_length)
    }

    pub fn update_context(&self, context: &mut TraversalContext, node: NodeId) {
        context.push(node);
    }
}

impl Default for EntropyModel {
    fn default() -> Self {
        Self {
            threshold: defaults::THRESHOLD,
            window_size: defaults::WINDOW_SIZE,
        }
    }
}

/// `-sum(p * log2(p + EPSILON))`
fn shannon<I: IntoIterator<Item = f64>>(weights: I) -> f64 {
    -weights
        .into_iter()
        .map(|p| p * (p + EPSILON).log2())
        .sum::<f64>()
}

fn jaccard(a: &HashSet<NodeId>, b: &HashSet<NodeId>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}
