//! Serializable run report for downstream consumers.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::core::config::BoundaryConfig;
use crate::graph::{GraphStats, KnowledgeGraph};
use crate::traversal::{StopReason, TraversalResult};

const FINAL_NODE_COUNT: usize = 3;

/// Condensed view of one walk.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraversalSummary {
    pub start_node: String,
    pub path_length: usize,
    pub max_entropy: f64,
    pub min_entropy: f64,
    pub mean_entropy: f64,
    /// Up to the last three nodes of the path, in path order.
    pub final_nodes: Vec<String>,
    pub stop: StopReason,
}

impl TraversalSummary {
    pub fn from_result(result: &TraversalResult) -> Self {
        let (max_entropy, min_entropy, mean_entropy) = if result.entropies.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let max = result.entropies.iter().copied().fold(f64::MIN, f64::max);
            let min = result.entropies.iter().copied().fold(f64::MAX, f64::min);
            let mean = result.entropies.iter().sum::<f64>() / result.entropies.len() as f64;
            (max, min, mean)
        };

        let tail_start = result.path.len().saturating_sub(FINAL_NODE_COUNT);
        Self {
            start_node: result.start.clone(),
            path_length: result.path.len(),
            max_entropy,
            min_entropy,
            mean_entropy,
            final_nodes: result.path[tail_start..].to_vec(),
            stop: result.stop,
        }
    }
}

/// Averages over every walk of a run. All zero when there were no walks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunAggregates {
    pub avg_path_length: f64,
    pub avg_max_entropy: f64,
    pub avg_min_entropy: f64,
}

impl RunAggregates {
    pub fn from_summaries(summaries: &[TraversalSummary]) -> Self {
        if summaries.is_empty() {
            return Self::default();
        }

        let runs = summaries.len() as f64;
        Self {
            avg_path_length: summaries.iter().map(|s| s.path_length as f64).sum::<f64>() / runs,
            avg_max_entropy: summaries.iter().map(|s| s.max_entropy).sum::<f64>() / runs,
            avg_min_entropy: summaries.iter().map(|s| s.min_entropy).sum::<f64>() / runs,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionReport {
    pub run_id: String,
    /// RFC 3339, UTC.
    pub generated_at: String,
    pub config: BoundaryConfig,
    pub graph: GraphStats,
    pub sentence_count: usize,
    pub boundary_count: usize,
    pub aggregates: RunAggregates,
    pub summaries: Vec<TraversalSummary>,
    pub results: Vec<TraversalResult>,
}

impl DetectionReport {
    pub fn new(
        config: BoundaryConfig,
        graph: &KnowledgeGraph,
        sentence_count: usize,
        results: Vec<TraversalResult>,
    ) -> Self {
        let summaries: Vec<TraversalSummary> =
            results.iter().map(TraversalSummary::from_result).collect();
        let aggregates = RunAggregates::from_summaries(&summaries);
        let boundary_count = results
            .iter()
            .filter(|r| r.stop == StopReason::Boundary)
            .count();

        Self {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now().to_rfc3339(),
            config,
            graph: graph.stats(),
            sentence_count,
            boundary_count,
            aggregates,
            summaries,
            results,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
