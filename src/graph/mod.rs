// Knowledge graph module
// Owned adjacency data model plus the sentence-driven builder

pub mod builder;
pub mod knowledge;

pub use builder::{build_from_triplets, KnowledgeGraphBuilder};
pub use knowledge::{
    EdgeData, GraphStats, KnowledgeGraph, NodeData, NodeFeatures, NodeId, NodeType,
};
