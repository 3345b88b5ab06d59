use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::paths::AppPaths;
use super::settings::BoundaryConfig;
use crate::core::errors::BoundaryError;

#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn config_path(&self) -> PathBuf {
        if let Ok(path) = env::var("ENTROPY_BOUNDARY_CONFIG") {
            return PathBuf::from(path);
        }

        self.paths.config_path.clone()
    }

    pub fn load_config(&self) -> Result<Value, BoundaryError> {
        Ok(load_yaml_file(&self.config_path()))
    }

    pub fn load(&self) -> Result<BoundaryConfig, BoundaryError> {
        let raw = self.load_config()?;
        BoundaryConfig::from_value(&raw)
    }
}

fn load_yaml_file(path: &Path) -> Value {
    if !path.exists() {
        return Value::Object(Map::new());
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<Value>(&contents) {
            Ok(value @ Value::Object(_)) => value,
            Ok(Value::Null) => Value::Object(Map::new()),
            Ok(_) => {
                tracing::warn!("Ignoring {}: top level is not a mapping", path.display());
                Value::Object(Map::new())
            }
            Err(err) => {
                tracing::warn!("Ignoring {}: {}", path.display(), err);
                Value::Object(Map::new())
            }
        },
        Err(err) => {
            tracing::warn!("Failed to read {}: {}", path.display(), err);
            Value::Object(Map::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::Strategy;

    fn service_in(dir: &Path) -> ConfigService {
        ConfigService::new(Arc::new(AppPaths::with_data_dir(dir.to_path_buf())))
    }

    #[test]
    fn missing_file_loads_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let service = service_in(tmp.path());

        assert_eq!(service.load_config().unwrap(), Value::Object(Map::new()));
        assert_eq!(service.load().unwrap(), BoundaryConfig::default());
    }

    #[test]
    fn yaml_file_is_parsed_and_typed() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(
            tmp.path().join("config.yml"),
            "entropy:\n  threshold: 1.5\ntraversal:\n  strategy: bfs\n  start_nodes: [cat, dog]\n",
        )
        .unwrap();

        let config = service_in(tmp.path()).load().unwrap();
        assert_eq!(config.entropy.threshold, 1.5);
        assert_eq!(config.traversal.strategy, Strategy::Bfs);
        assert_eq!(config.traversal.start_nodes, vec!["cat", "dog"]);
    }

    #[test]
    fn garbled_yaml_falls_back_to_empty() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("config.yml"), "entropy: [unclosed").unwrap();

        let raw = service_in(tmp.path()).load_config().unwrap();
        assert_eq!(raw, Value::Object(Map::new()));
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("config.yml"), "traversal:\n  max_depth: 0\n").unwrap();

        let err = service_in(tmp.path()).load().unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidConfig(_)));
    }
}
