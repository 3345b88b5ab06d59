use std::env;
use std::fs;
use std::io;
use std::sync::Arc;

use anyhow::Context;

use entropy_boundary::core::config::{defaults, AppPaths, ConfigService};
use entropy_boundary::core::logging;
use entropy_boundary::graph::KnowledgeGraphBuilder;
use entropy_boundary::report::DetectionReport;
use entropy_boundary::text::{self, HeuristicExtractor, RegexSentenceSplitter, SentenceSplitter};
use entropy_boundary::{EntropyModel, GraphTraverser};

fn main() -> anyhow::Result<()> {
    let paths = Arc::new(AppPaths::new());
    logging::init(&paths);
    let lexicon = text::setup();

    let config = ConfigService::new(paths.clone())
        .load()
        .context("Failed to load configuration")?;

    let input = match env::args().nth(1) {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?
        }
        None => io::read_to_string(io::stdin()).context("Failed to read stdin")?,
    };

    let splitter = RegexSentenceSplitter::new(config.text.min_sentence_chars)?;
    let sentences = splitter.split(&input);
    tracing::info!("Split input into {} sentences", sentences.len());

    let extractor = HeuristicExtractor::new(lexicon, config.text.max_triplets)?;
    let graph = KnowledgeGraphBuilder::new(extractor).build(&sentences);

    let starts: Vec<String> = if config.traversal.start_nodes.is_empty() {
        graph
            .top_degree_nodes(defaults::AUTO_START_NODES)
            .into_iter()
            .map(|id| graph.label(id).to_string())
            .collect()
    } else {
        config.traversal.start_nodes.clone()
    };
    if starts.is_empty() {
        tracing::warn!("Graph is empty, nothing to traverse");
    }

    let model = EntropyModel::new(config.entropy.threshold, config.entropy.window_size)?;
    let traverser =
        GraphTraverser::new(&graph, model).with_context_capacity(config.entropy.context_capacity);
    let results = traverser.detect(&starts, &config.traversal)?;

    let report = DetectionReport::new(config, &graph, sentences.len(), results);
    println!("{}", report.to_json_pretty()?);

    Ok(())
}
