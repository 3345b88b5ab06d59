use std::fs;
use std::sync::Arc;

use entropy_boundary::core::config::{AppPaths, ConfigService};
use entropy_boundary::graph::{KnowledgeGraph, KnowledgeGraphBuilder};
use entropy_boundary::text::{
    self, HeuristicExtractor, RegexSentenceSplitter, SentenceSplitter, Triplet,
};
use entropy_boundary::{DetectionReport, EntropyModel, GraphTraverser, StopReason, Strategy};

const STORY: &str = "The cat sat on the mat. The dog ran in the park. The bird flew over the tree.";

fn scripted(sentence: &str) -> Vec<Triplet> {
    match sentence {
        "s0" => vec![Triplet::new("cat", "sat_on", "mat")],
        "s1" => vec![Triplet::new("dog", "ran_in", "park")],
        "s2" => vec![Triplet::new("bird", "flew_over", "tree")],
        _ => Vec::new(),
    }
}

fn story_graph() -> (Vec<String>, KnowledgeGraph) {
    let splitter = RegexSentenceSplitter::with_defaults().unwrap();
    let extractor = HeuristicExtractor::with_defaults(text::setup()).unwrap();
    let sentences = splitter.split(STORY);
    let graph = KnowledgeGraphBuilder::new(extractor).build(&sentences);
    (sentences, graph)
}

#[test]
fn three_sentences_build_three_disjoint_edges() {
    let graph = KnowledgeGraphBuilder::new(scripted).build(&["s0", "s1", "s2"]);

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 3);
    for (label, sentence_id) in [
        ("cat", 0),
        ("mat", 0),
        ("dog", 1),
        ("park", 1),
        ("bird", 2),
        ("tree", 2),
    ] {
        let id = graph.node_id(label).unwrap();
        assert_eq!(graph.node(id).sentence_id, sentence_id, "{label}");
    }
    assert!(!graph.stats().connected);
}

#[test]
fn text_pipeline_matches_scripted_graph() {
    let (sentences, graph) = story_graph();

    assert_eq!(sentences.len(), 3);
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 3);
    let dog = graph.node_id("dog").unwrap();
    let park = graph.node_id("park").unwrap();
    assert_eq!(graph.relation_between(dog, park), Some("ran"));
}

#[test]
fn one_way_chain_exhausts_depth() {
    let per_sentence: Vec<Vec<Triplet>> = (0..9)
        .map(|i| vec![Triplet::new(format!("n{i}"), "leads_to", format!("n{}", i + 1))])
        .collect();
    let graph = entropy_boundary::graph::build_from_triplets(&per_sentence);
    let traverser = GraphTraverser::new(&graph, EntropyModel::default());

    for max_depth in 1..=6 {
        let result = traverser.traverse_with_entropy("n0", max_depth).unwrap();
        assert_eq!(result.path.len(), max_depth + 1);
        assert_eq!(result.entropies.len(), max_depth + 1);
        assert_eq!(result.stop, StopReason::MaxDepth);
    }
}

#[test]
fn isolated_node_stops_immediately() {
    let mut graph = KnowledgeGraph::new();
    graph.add_node("alone", 0);
    let traverser = GraphTraverser::new(&graph, EntropyModel::default());

    let result = traverser.traverse_with_entropy("alone", 10).unwrap();
    assert_eq!(result.path, vec!["alone"]);
    assert_eq!(result.entropies.len(), 1);
    assert_eq!(result.stop, StopReason::DeadEnd);
}

#[test]
fn detection_report_covers_every_start() {
    let (sentences, graph) = story_graph();
    let starts: Vec<String> = graph
        .top_degree_nodes(5)
        .into_iter()
        .map(|id| graph.label(id).to_string())
        .collect();
    assert_eq!(starts, vec!["cat", "mat", "dog", "park", "bird"]);

    let config = entropy_boundary::core::config::BoundaryConfig::default();
    let traverser = GraphTraverser::new(&graph, EntropyModel::default());
    let results = traverser.detect(&starts, &config.traversal).unwrap();

    assert_eq!(results[0].path, vec!["cat", "mat"]);
    assert_eq!(results[0].stop, StopReason::DeadEnd);
    assert_eq!(results[1].path, vec!["mat"]);

    let report = DetectionReport::new(config, &graph, sentences.len(), results);
    assert_eq!(report.summaries.len(), 5);
    assert_eq!(report.sentence_count, 3);
    assert_eq!(report.boundary_count, 0);
}

#[test]
fn yaml_config_drives_strategy() {
    let tmp = tempfile::tempdir().unwrap();
    let paths = Arc::new(AppPaths::with_data_dir(tmp.path().to_path_buf()));
    fs::write(
        &paths.config_path,
        "traversal:\n  strategy: bfs\n  bfs_max_depth: 2\n  start_nodes: [cat]\n",
    )
    .unwrap();

    let config = ConfigService::new(paths).load().unwrap();
    assert_eq!(config.traversal.strategy, Strategy::Bfs);

    let (_, graph) = story_graph();
    let traverser = GraphTraverser::new(&graph, EntropyModel::default());
    let results = traverser
        .detect(&config.traversal.start_nodes, &config.traversal)
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].strategy, Strategy::Bfs);
    assert_eq!(results[0].path, vec!["cat", "mat"]);
}
