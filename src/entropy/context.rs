use std::collections::VecDeque;

use crate::core::config::defaults;
use crate::graph::NodeId;

/// Bounded FIFO of recently visited nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalContext {
    nodes: VecDeque<NodeId>,
    capacity: usize,
}

impl TraversalContext {
    /// A zero capacity is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            nodes: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Append `node`, evicting the oldest entry once over capacity.
    pub fn push(&mut self, node: NodeId) {
        self.nodes.push_back(node);
        if self.nodes.len() > self.capacity {
            self.nodes.pop_front();
        }
    }

    /// Oldest first.
    pub fn as_slice(&mut self) -> &[NodeId] {
        self.nodes.make_contiguous()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeId> + '_ {
        self.nodes.iter()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TraversalContext {
    fn default() -> Self {
        Self::with_capacity(defaults::CONTEXT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::KnowledgeGraph;

    fn ids(n: usize) -> Vec<NodeId> {
        let mut g = KnowledgeGraph::new();
        (0..n).map(|i| g.add_node(&format!("n{i}"), 0)).collect()
    }

    #[test]
    fn evicts_oldest_first() {
        let nodes = ids(5);
        let mut ctx = TraversalContext::with_capacity(3);
        for node in &nodes {
            ctx.push(*node);
        }
        assert_eq!(ctx.len(), 3);
        assert_eq!(ctx.as_slice(), &nodes[2..]);
    }

    #[test]
    fn never_exceeds_capacity() {
        let nodes = ids(25);
        let mut ctx = TraversalContext::default();
        for (i, node) in nodes.iter().enumerate() {
            ctx.push(*node);
            assert!(ctx.len() <= 10);
            assert_eq!(ctx.len(), (i + 1).min(10));
        }
    }

    #[test]
    fn zero_capacity_holds_one() {
        let nodes = ids(2);
        let mut ctx = TraversalContext::with_capacity(0);
        ctx.push(nodes[0]);
        ctx.push(nodes[1]);
        assert_eq!(ctx.as_slice(), &[nodes[1]]);
    }
}
