use serde::{Deserialize, Serialize};

/// Expansion order used for a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Single greedy walk scored per step.
    Entropy,
    Bfs,
    Dfs,
    /// Greedy walk that prefers nodes from one sentence.
    Guided,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Entropy => "entropy",
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::Guided => "guided",
        }
    }
}

/// Why a walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The last node's entropy exceeded the adjusted threshold.
    Boundary,
    /// No unvisited successor was left to expand.
    DeadEnd,
    /// The depth budget ran out first.
    MaxDepth,
    /// A guided walk reached a node from another sentence.
    SentenceChange,
}

/// Outcome of one walk. `entropies[i]` belongs to `path[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraversalResult {
    pub start: String,
    pub strategy: Strategy,
    pub path: Vec<String>,
    pub entropies: Vec<f64>,
    pub stop: StopReason,
}

impl TraversalResult {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The node the walk halted on, when it halted on a boundary.
    pub fn boundary_node(&self) -> Option<&str> {
        match self.stop {
            StopReason::Boundary => self.path.last().map(String::as_str),
            _ => None,
        }
    }
}
