//! Entropy-guided walks over a read-only knowledge graph.
//!
//! # Walk
//!
//! `traverse_with_entropy` scores the current node, stops if it is a
//! boundary, and otherwise moves to the best unvisited successor:
//!
//! ```text
//! score(c) = 0.6 * degree(c) / max_degree + 0.4 * relation_bonus
//! relation_bonus = 0.8 if current -> c is has/is/was/were, else 0.5
//! ```
//!
//! Expansion follows outgoing edges only, while the entropy signals look at
//! both directions. Every call owns its visited set and context, so one
//! traverser can serve many start nodes.

use std::collections::{HashSet, VecDeque};

use super::result::{StopReason, Strategy, TraversalResult};
use crate::core::config::{defaults, TraversalSettings};
use crate::core::errors::BoundaryError;
use crate::entropy::{EntropyModel, TraversalContext};
use crate::graph::{KnowledgeGraph, NodeId};

const DEGREE_WEIGHT: f64 = 0.6;
const RELATION_WEIGHT: f64 = 0.4;
const PREFERRED_RELATION_BONUS: f64 = 0.8;
const DEFAULT_RELATION_BONUS: f64 = 0.5;
const PREFERRED_RELATIONS: [&str; 4] = ["has", "is", "was", "were"];

pub struct GraphTraverser<'g> {
    graph: &'g KnowledgeGraph,
    model: EntropyModel,
    context_capacity: usize,
}

impl<'g> GraphTraverser<'g> {
    pub fn new(graph: &'g KnowledgeGraph, model: EntropyModel) -> Self {
        Self {
            graph,
            model,
            context_capacity: defaults::CONTEXT_CAPACITY,
        }
    }

    pub fn with_context_capacity(mut self, capacity: usize) -> Self {
        self.context_capacity = capacity.max(1);
        self
    }

    pub fn graph(&self) -> &KnowledgeGraph {
        self.graph
    }

    pub fn model(&self) -> &EntropyModel {
        &self.model
    }

    /// Greedy walk from `start`, at most `max_depth` expansions.
    pub fn traverse_with_entropy(
        &self,
        start: &str,
        max_depth: usize,
    ) -> Result<TraversalResult, BoundaryError> {
        let start_id = self.resolve(start)?;
        check_depth(max_depth)?;

        let mut path = vec![start_id];
        let mut visited = HashSet::from([start_id]);
        let mut context = TraversalContext::with_capacity(self.context_capacity);
        let mut entropies = Vec::with_capacity(max_depth + 1);
        let mut current = start_id;
        let mut stop = None;

        for step in 0..max_depth {
            let entropy =
                self.model
                    .node_entropy(self.graph, current, &path, context.as_slice());
            entropies.push(entropy);
            tracing::debug!(
                step,
                node = self.graph.label(current),
                entropy,
                "Traversal step"
            );

            if self.model.is_boundary(entropy, path.len()) {
                stop = Some(StopReason::Boundary);
                break;
            }

            let Some(next) = self.select_next(current, &visited) else {
                stop = Some(StopReason::DeadEnd);
                break;
            };

            path.push(next);
            visited.insert(next);
            self.model.update_context(&mut context, next);
            current = next;
        }

        // Budget exhausted: score the node we just moved to so every path
        // entry has an entropy.
        let stop = match stop {
            Some(reason) => reason,
            None => {
                let entropy =
                    self.model
                        .node_entropy(self.graph, current, &path, context.as_slice());
                entropies.push(entropy);
                if self.model.is_boundary(entropy, path.len()) {
                    StopReason::Boundary
                } else {
                    StopReason::MaxDepth
                }
            }
        };

        Ok(self.finish(start, Strategy::Entropy, &path, entropies, stop))
    }

    /// Best unvisited successor of `current`, or `None` at a dead end.
    /// Ties go to the earliest successor.
    pub fn select_next(&self, current: NodeId, visited: &HashSet<NodeId>) -> Option<NodeId> {
        let candidates: Vec<NodeId> = self
            .graph
            .successors(current)
            .iter()
            .copied()
            .filter(|n| !visited.contains(n))
            .collect();

        match candidates.as_slice() {
            [] => None,
            [only] => Some(*only),
            [first, rest @ ..] => {
                let max_degree = self.graph.max_degree().max(1) as f64;
                let mut best = *first;
                let mut best_score = self.candidate_score(current, best, max_degree);
                for candidate in rest {
                    let score = self.candidate_score(current, *candidate, max_degree);
                    if score > best_score {
                        best = *candidate;
                        best_score = score;
                    }
                }
                Some(best)
            }
        }
    }

    fn candidate_score(&self, current: NodeId, candidate: NodeId, max_degree: f64) -> f64 {
        let degree_score = self.graph.degree(candidate) as f64 / max_degree;
        let relation_bonus = match self.graph.edge(current, candidate) {
            Some(edge) if PREFERRED_RELATIONS.contains(&edge.relation.as_str()) => {
                PREFERRED_RELATION_BONUS
            }
            _ => DEFAULT_RELATION_BONUS,
        };
        DEGREE_WEIGHT * degree_score + RELATION_WEIGHT * relation_bonus
    }

    /// Level-order expansion. Context is always empty and the first boundary
    /// ends the whole search.
    pub fn breadth_first(
        &self,
        start: &str,
        max_depth: usize,
    ) -> Result<TraversalResult, BoundaryError> {
        let start_id = self.resolve(start)?;
        check_depth(max_depth)?;

        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([(start_id, 0usize)]);
        let mut path = Vec::new();
        let mut entropies = Vec::new();
        let mut depth_limited = false;
        let mut stop = None;

        while let Some((node, depth)) = queue.pop_front() {
            if visited.contains(&node) {
                continue;
            }
            if depth > max_depth {
                depth_limited = true;
                continue;
            }

            visited.insert(node);
            path.push(node);

            let entropy = self.model.node_entropy(self.graph, node, &path, &[]);
            entropies.push(entropy);

            if self.model.is_boundary(entropy, path.len()) {
                stop = Some(StopReason::Boundary);
                break;
            }

            for next in self.graph.successors(node) {
                if !visited.contains(next) {
                    queue.push_back((*next, depth + 1));
                }
            }
        }

        let stop = stop.unwrap_or(if depth_limited {
            StopReason::MaxDepth
        } else {
            StopReason::DeadEnd
        });
        Ok(self.finish(start, Strategy::Bfs, &path, entropies, stop))
    }

    /// Pre-order depth-first expansion with the same stopping rule as
    /// [`Self::breadth_first`]. Uses an explicit stack, so chain length is
    /// not limited by the thread's stack size.
    pub fn depth_first(
        &self,
        start: &str,
        max_depth: usize,
    ) -> Result<TraversalResult, BoundaryError> {
        let start_id = self.resolve(start)?;
        check_depth(max_depth)?;

        let mut visited = HashSet::new();
        let mut stack = vec![(start_id, 0usize)];
        let mut path = Vec::new();
        let mut entropies = Vec::new();
        let mut depth_limited = false;
        let mut stop = None;

        while let Some((node, depth)) = stack.pop() {
            if visited.contains(&node) {
                continue;
            }
            if depth > max_depth {
                depth_limited = true;
                continue;
            }

            visited.insert(node);
            path.push(node);

            let entropy = self.model.node_entropy(self.graph, node, &path, &[]);
            entropies.push(entropy);

            if self.model.is_boundary(entropy, path.len()) {
                stop = Some(StopReason::Boundary);
                break;
            }

            // Reversed so the first successor is expanded first.
            for next in self.graph.successors(node).iter().rev() {
                if !visited.contains(next) {
                    stack.push((*next, depth + 1));
                }
            }
        }

        let stop = stop.unwrap_or(if depth_limited {
            StopReason::MaxDepth
        } else {
            StopReason::DeadEnd
        });
        Ok(self.finish(start, Strategy::Dfs, &path, entropies, stop))
    }

    /// Walk that prefers successors introduced by `target_sentence` and stops
    /// once it lands on a node from another sentence. Without a target this
    /// is [`Self::traverse_with_entropy`] with `max_depth`.
    pub fn guided_traversal(
        &self,
        start: &str,
        target_sentence: Option<usize>,
        max_depth: usize,
    ) -> Result<TraversalResult, BoundaryError> {
        let Some(target) = target_sentence else {
            return self.traverse_with_entropy(start, max_depth);
        };
        let start_id = self.resolve(start)?;

        let mut path = vec![start_id];
        let mut visited = HashSet::from([start_id]);
        let mut context = TraversalContext::with_capacity(self.context_capacity);
        let mut entropies = vec![self
            .model
            .node_entropy(self.graph, start_id, &path, context.as_slice())];
        let mut current = start_id;

        let stop = loop {
            if self.graph.node(current).sentence_id != target && path.len() > 1 {
                break StopReason::SentenceChange;
            }

            let unvisited: Vec<NodeId> = self
                .graph
                .successors(current)
                .iter()
                .copied()
                .filter(|n| !visited.contains(n))
                .collect();
            let Some(fallback) = unvisited.first().copied() else {
                break StopReason::DeadEnd;
            };
            let next = unvisited
                .iter()
                .copied()
                .find(|n| self.graph.node(*n).sentence_id == target)
                .unwrap_or(fallback);

            path.push(next);
            visited.insert(next);
            self.model.update_context(&mut context, next);
            entropies.push(
                self.model
                    .node_entropy(self.graph, next, &path, context.as_slice()),
            );
            current = next;
        };

        Ok(self.finish(start, Strategy::Guided, &path, entropies, stop))
    }

    /// Dispatch one walk according to `strategy`.
    pub fn run(
        &self,
        start: &str,
        strategy: Strategy,
        settings: &TraversalSettings,
    ) -> Result<TraversalResult, BoundaryError> {
        match strategy {
            Strategy::Entropy => self.traverse_with_entropy(start, settings.max_depth),
            Strategy::Bfs => self.breadth_first(start, settings.bfs_max_depth),
            Strategy::Dfs => self.depth_first(start, settings.max_depth),
            Strategy::Guided => {
                self.guided_traversal(start, settings.target_sentence, settings.max_depth)
            }
        }
    }

    /// One walk per start node, in order. Fails on the first unknown node.
    pub fn detect<S: AsRef<str>>(
        &self,
        starts: &[S],
        settings: &TraversalSettings,
    ) -> Result<Vec<TraversalResult>, BoundaryError> {
        let mut results = Vec::with_capacity(starts.len());
        for start in starts {
            let result = self.run(start.as_ref(), settings.strategy, settings)?;
            tracing::info!(
                start = %result.start,
                strategy = result.strategy.as_str(),
                length = result.len(),
                stop = ?result.stop,
                "Traversal finished"
            );
            results.push(result);
        }
        Ok(results)
    }

    fn resolve(&self, label: &str) -> Result<NodeId, BoundaryError> {
        self.graph
            .node_id(label)
            .ok_or_else(|| BoundaryError::NodeNotFound(label.to_string()))
    }

    fn finish(
        &self,
        start: &str,
        strategy: Strategy,
        path: &[NodeId],
        entropies: Vec<f64>,
        stop: StopReason,
    ) -> TraversalResult {
        TraversalResult {
            start: start.to_string(),
            strategy,
            path: path
                .iter()
                .map(|id| self.graph.label(*id).to_string())
                .collect(),
            entropies,
            stop,
        }
    }
}

fn check_depth(max_depth: usize) -> Result<(), BoundaryError> {
    if max_depth == 0 {
        return Err(BoundaryError::invalid_argument(
            "max_depth must be at least 1",
        ));
    }
    Ok(())
}
