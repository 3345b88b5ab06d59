// Knowledge graph construction from extracted triplets

use super::knowledge::KnowledgeGraph;
use crate::text::{Triplet, TripletExtractor};

/// Builds a [`KnowledgeGraph`] from an ordered list of sentences. The index
/// of each sentence is its `sentence_id`.
pub struct KnowledgeGraphBuilder<E> {
    extractor: E,
}

impl<E: TripletExtractor> KnowledgeGraphBuilder<E> {
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn build<S: AsRef<str>>(&self, sentences: &[S]) -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();

        for (sentence_id, sentence) in sentences.iter().enumerate() {
            let triplets = self.extractor.extract(sentence.as_ref());
            tracing::debug!(sentence_id, triplets = triplets.len(), "Extracted triplets");
            for triplet in &triplets {
                graph.insert_triplet(triplet, sentence_id);
            }
        }

        tracing::info!(
            sentences = sentences.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Built knowledge graph"
        );
        graph
    }
}

/// Build directly from per-sentence triplet lists.
pub fn build_from_triplets(per_sentence: &[Vec<Triplet>]) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::new();
    for (sentence_id, triplets) in per_sentence.iter().enumerate() {
        for triplet in triplets {
            graph.insert_triplet(triplet, sentence_id);
        }
    }
    graph
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scripted(sentence: &str) -> Vec<Triplet> {
        match sentence {
            "one" => vec![Triplet::new("cat", "sat_on", "mat")],
            "two" => vec![Triplet::new("dog", "ran_in", "park")],
            "three" => vec![Triplet::new("bird", "flew_over", "tree")],
            "again" => vec![Triplet::new("cat", "likes", "park")],
            _ => Vec::new(),
        }
    }

    #[test]
    fn three_sentences_give_six_nodes_three_edges() {
        let builder = KnowledgeGraphBuilder::new(scripted);
        let graph = builder.build(&["one", "two", "three"]);

        assert_eq!(graph.node_count(), 6);
        assert_eq!(graph.edge_count(), 3);

        let expected = [
            ("cat", 0),
            ("mat", 0),
            ("dog", 1),
            ("park", 1),
            ("bird", 2),
            ("tree", 2),
        ];
        for (label, sentence_id) in expected {
            let id = graph.node_id(label).unwrap();
            assert_eq!(graph.node(id).sentence_id, sentence_id, "{label}");
        }
    }

    #[test]
    fn empty_extractions_contribute_nothing() {
        let builder = KnowledgeGraphBuilder::new(scripted);
        let graph = builder.build(&["", "unknown", "one"]);

        assert_eq!(graph.node_count(), 2);
        let cat = graph.node_id("cat").unwrap();
        assert_eq!(graph.node(cat).sentence_id, 2);
    }

    #[test]
    fn recurring_nodes_keep_first_sentence() {
        let builder = KnowledgeGraphBuilder::new(scripted);
        let graph = builder.build(&["one", "two", "again"]);

        let cat = graph.node_id("cat").unwrap();
        let park = graph.node_id("park").unwrap();
        assert_eq!(graph.node(cat).sentence_id, 0);
        assert_eq!(graph.node(park).sentence_id, 1);
        assert_eq!(graph.edge(cat, park).unwrap().sentence_id, 2);
    }

    #[test]
    fn triplet_lists_match_extractor_build() {
        let from_lists = build_from_triplets(&[scripted("one"), scripted("two")]);
        let from_builder = KnowledgeGraphBuilder::new(scripted).build(&["one", "two"]);

        assert_eq!(from_lists.stats(), from_builder.stats());
    }
}
