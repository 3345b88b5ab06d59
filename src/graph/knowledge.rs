//! Directed, attributed knowledge graph over interned entity labels.
//!
//! Nodes are interned to dense [`NodeId`] indices with a reverse lookup for
//! display. Each node keeps its outgoing and incoming neighbors in insertion
//! order, so every enumeration below is deterministic.
//!
//! At most one edge exists per ordered `(from, to)` pair: writing the same
//! pair again overwrites its relation and sentence id.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::text::Triplet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Entity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    /// Sentence that first introduced the node. Never updated afterwards.
    pub sentence_id: usize,
    pub node_type: NodeType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    pub relation: String,
    pub sentence_id: usize,
}

/// Per-node degree figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeFeatures {
    pub degree: usize,
    pub in_degree: usize,
    pub out_degree: usize,
    /// `degree / max(1, node_count)`
    pub centrality: f64,
}

/// Whole-graph summary figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub average_degree: f64,
    /// Weak connectivity (edge direction ignored). False for an empty graph.
    pub connected: bool,
}

#[derive(Debug, Clone, Default)]
struct Adjacency {
    outgoing: Vec<NodeId>,
    incoming: Vec<NodeId>,
}

#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    index: HashMap<String, NodeId>,
    nodes: Vec<NodeData>,
    adjacency: Vec<Adjacency>,
    edges: HashMap<(NodeId, NodeId), EdgeData>,
    edge_order: Vec<(NodeId, NodeId)>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the existing node for `label`, or create it with `sentence_id`.
    pub fn add_node(&mut self, label: &str, sentence_id: usize) -> NodeId {
        if let Some(id) = self.index.get(label) {
            return *id;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            label: label.to_string(),
            sentence_id,
            node_type: NodeType::Entity,
        });
        self.adjacency.push(Adjacency::default());
        self.index.insert(label.to_string(), id);
        id
    }

    /// Insert or overwrite the edge `from -> to`.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, relation: &str, sentence_id: usize) {
        let data = EdgeData {
            relation: relation.to_string(),
            sentence_id,
        };

        if let Some(existing) = self.edges.get_mut(&(from, to)) {
            *existing = data;
            return;
        }

        self.edges.insert((from, to), data);
        self.edge_order.push((from, to));
        self.adjacency[from.0].outgoing.push(to);
        self.adjacency[to.0].incoming.push(from);
    }

    /// Add both endpoints (if absent) and then the edge.
    pub fn insert_triplet(&mut self, triplet: &Triplet, sentence_id: usize) {
        let subject = self.add_node(&triplet.subject, sentence_id);
        let object = self.add_node(&triplet.object, sentence_id);
        self.add_edge(subject, object, &triplet.relation, sentence_id);
    }

    pub fn node_id(&self, label: &str) -> Option<NodeId> {
        self.index.get(label).copied()
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.0].label
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Edges in first-insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId, &EdgeData)> + '_ {
        self.edge_order
            .iter()
            .filter_map(move |key| self.edges.get(key).map(|data| (key.0, key.1, data)))
    }

    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id.0].outgoing
    }

    pub fn predecessors(&self, id: NodeId) -> &[NodeId] {
        &self.adjacency[id.0].incoming
    }

    /// Successors followed by predecessors, without duplicates.
    pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut seen = HashSet::new();
        self.successors(id)
            .iter()
            .chain(self.predecessors(id))
            .copied()
            .filter(|n| seen.insert(*n))
            .collect()
    }

    pub fn neighbor_set(&self, id: NodeId) -> HashSet<NodeId> {
        self.successors(id)
            .iter()
            .chain(self.predecessors(id))
            .copied()
            .collect()
    }

    pub fn out_degree(&self, id: NodeId) -> usize {
        self.adjacency[id.0].outgoing.len()
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.adjacency[id.0].incoming.len()
    }

    /// In-degree plus out-degree; a two-node cycle counts twice.
    pub fn degree(&self, id: NodeId) -> usize {
        self.in_degree(id) + self.out_degree(id)
    }

    pub fn max_degree(&self) -> usize {
        self.node_ids().map(|id| self.degree(id)).max().unwrap_or(0)
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&EdgeData> {
        self.edges.get(&(from, to))
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges.contains_key(&(from, to))
    }

    /// Relation on `a -> b`, else on `b -> a`.
    pub fn relation_between(&self, a: NodeId, b: NodeId) -> Option<&str> {
        self.edge(a, b)
            .or_else(|| self.edge(b, a))
            .map(|edge| edge.relation.as_str())
    }

    /// Local clustering coefficient in the undirected projection. Self-loops
    /// are ignored.
    pub fn clustering(&self, id: NodeId) -> f64 {
        let mut neighbors = self.neighbor_set(id);
        neighbors.remove(&id);

        let k = neighbors.len();
        if k < 2 {
            return 0.0;
        }

        let members: Vec<NodeId> = neighbors.into_iter().collect();
        let mut links = 0usize;
        for (i, u) in members.iter().enumerate() {
            for v in &members[i + 1..] {
                if self.has_edge(*u, *v) || self.has_edge(*v, *u) {
                    links += 1;
                }
            }
        }

        (2 * links) as f64 / (k * (k - 1)) as f64
    }

    /// Nodes first introduced by sentence `sentence_id`.
    pub fn sentence_nodes(&self, sentence_id: usize) -> Vec<NodeId> {
        self.node_ids()
            .filter(|id| self.node(*id).sentence_id == sentence_id)
            .collect()
    }

    /// Edges last written by sentence `sentence_id`.
    pub fn sentence_edges(&self, sentence_id: usize) -> Vec<(NodeId, NodeId)> {
        self.edges()
            .filter(|(_, _, data)| data.sentence_id == sentence_id)
            .map(|(from, to, _)| (from, to))
            .collect()
    }

    pub fn node_features(&self, id: NodeId) -> NodeFeatures {
        let degree = self.degree(id);
        NodeFeatures {
            degree,
            in_degree: self.in_degree(id),
            out_degree: self.out_degree(id),
            centrality: degree as f64 / self.node_count().max(1) as f64,
        }
    }

    /// Up to `k` nodes by descending degree; ties keep insertion order.
    pub fn top_degree_nodes(&self, k: usize) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.node_ids().collect();
        ids.sort_by_key(|id| std::cmp::Reverse(self.degree(*id)));
        ids.truncate(k);
        ids
    }

    pub fn stats(&self) -> GraphStats {
        let n = self.node_count();
        let m = self.edge_count();

        let density = if n > 1 {
            m as f64 / (n * (n - 1)) as f64
        } else {
            0.0
        };
        let average_degree = if n > 0 {
            self.node_ids().map(|id| self.degree(id)).sum::<usize>() as f64 / n as f64
        } else {
            0.0
        };

        GraphStats {
            node_count: n,
            edge_count: m,
            density,
            average_degree,
            connected: self.is_weakly_connected(),
        }
    }

    fn is_weakly_connected(&self) -> bool {
        if self.nodes.is_empty() {
            return false;
        }

        let mut seen = vec![false; self.nodes.len()];
        let mut queue = VecDeque::from([NodeId(0)]);
        seen[0] = true;
        let mut reached = 1;

        while let Some(current) = queue.pop_front() {
            for next in self.successors(current).iter().chain(self.predecessors(current)) {
                if !seen[next.0] {
                    seen[next.0] = true;
                    reached += 1;
                    queue.push_back(*next);
                }
            }
        }

        reached == self.nodes.len()
    }
}
