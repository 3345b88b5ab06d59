use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::defaults;
use super::validation::validate_config;
use crate::core::errors::BoundaryError;
use crate::traversal::Strategy;

/// Typed view of `config.yml`. Every field falls back to its default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    pub entropy: EntropySettings,
    pub traversal: TraversalSettings,
    pub text: TextSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropySettings {
    pub threshold: f64,
    pub window_size: usize,
    pub context_capacity: usize,
}

impl Default for EntropySettings {
    fn default() -> Self {
        Self {
            threshold: defaults::THRESHOLD,
            window_size: defaults::WINDOW_SIZE,
            context_capacity: defaults::CONTEXT_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    pub max_depth: usize,
    pub bfs_max_depth: usize,
    pub strategy: Strategy,
    /// Empty means "pick the highest-degree nodes".
    pub start_nodes: Vec<String>,
    pub target_sentence: Option<usize>,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            max_depth: defaults::MAX_DEPTH,
            bfs_max_depth: defaults::BFS_MAX_DEPTH,
            strategy: Strategy::Entropy,
            start_nodes: Vec::new(),
            target_sentence: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    pub min_sentence_chars: usize,
    pub max_triplets: usize,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            min_sentence_chars: defaults::MIN_SENTENCE_CHARS,
            max_triplets: defaults::MAX_TRIPLETS,
        }
    }
}

impl BoundaryConfig {
    /// Validate the raw document, then deserialize it. A section left empty
    /// in YAML (`entropy:` with every key commented out) arrives as `null`
    /// and falls back to its defaults.
    pub fn from_value(value: &Value) -> Result<Self, BoundaryError> {
        validate_config(value)?;
        serde_json::from_value(drop_null_sections(value))
            .map_err(|err| BoundaryError::InvalidConfig(err.to_string()))
    }
}

fn drop_null_sections(value: &Value) -> Value {
    match value {
        Value::Object(root) => Value::Object(
            root.iter()
                .filter(|(_, section)| !section.is_null())
                .map(|(key, section)| (key.clone(), section.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}
