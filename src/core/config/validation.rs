use serde_json::{Map, Value};

use crate::core::errors::BoundaryError;

const STRATEGIES: [&str; 4] = ["entropy", "bfs", "dfs", "guided"];

pub fn validate_config(config: &Value) -> Result<(), BoundaryError> {
    let root = config
        .as_object()
        .ok_or_else(|| config_type_error("root", "object"))?;

    if let Some(entropy) = expect_optional_object(root, "entropy")? {
        validate_f64_field(entropy, "entropy.threshold", "threshold", 0.0, 10.0)?;
        validate_u64_field(entropy, "entropy.window_size", "window_size", 1, 1_000)?;
        validate_u64_field(
            entropy,
            "entropy.context_capacity",
            "context_capacity",
            1,
            10_000,
        )?;
    }

    if let Some(traversal) = expect_optional_object(root, "traversal")? {
        validate_u64_field(traversal, "traversal.max_depth", "max_depth", 1, 10_000)?;
        validate_u64_field(
            traversal,
            "traversal.bfs_max_depth",
            "bfs_max_depth",
            1,
            10_000,
        )?;
        validate_enum_field(traversal, "traversal.strategy", "strategy", &STRATEGIES)?;
        validate_string_array_field(traversal, "traversal.start_nodes", "start_nodes")?;
        validate_optional_u64_field(traversal, "traversal.target_sentence", "target_sentence")?;
    }

    if let Some(text) = expect_optional_object(root, "text")? {
        validate_u64_field(
            text,
            "text.min_sentence_chars",
            "min_sentence_chars",
            0,
            10_000,
        )?;
        validate_u64_field(text, "text.max_triplets", "max_triplets", 1, 100)?;
    }

    Ok(())
}

fn expect_optional_object<'a>(
    root: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a Map<String, Value>>, BoundaryError> {
    match root.get(key) {
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(Value::Null) | None => Ok(None),
        Some(_) => Err(config_type_error(key, "object")),
    }
}

/// Lower bound is exclusive: a zero threshold would flag every node.
fn validate_f64_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
    min_exclusive: f64,
    max: f64,
) -> Result<(), BoundaryError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    let Some(number) = value.as_f64() else {
        return Err(config_type_error(path, "number"));
    };
    if !number.is_finite() || number <= min_exclusive || number > max {
        return Err(BoundaryError::InvalidConfig(format!(
            "Invalid config at '{}': must be in ({}, {}]",
            path, min_exclusive, max
        )));
    }
    Ok(())
}

fn validate_u64_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
    min: u64,
    max: u64,
) -> Result<(), BoundaryError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    let Some(number) = value.as_u64() else {
        return Err(config_type_error(path, "integer"));
    };
    if number < min || number > max {
        return Err(BoundaryError::InvalidConfig(format!(
            "Invalid config at '{}': must be between {} and {}",
            path, min, max
        )));
    }
    Ok(())
}

fn validate_optional_u64_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<(), BoundaryError> {
    match section.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(value) if value.as_u64().is_some() => Ok(()),
        Some(_) => Err(config_type_error(path, "integer or null")),
    }
}

fn validate_enum_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
    allowed: &[&str],
) -> Result<(), BoundaryError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    let Some(text) = value.as_str() else {
        return Err(config_type_error(path, "string"));
    };
    if !allowed.contains(&text) {
        return Err(BoundaryError::InvalidConfig(format!(
            "Invalid config at '{}': must be one of {}",
            path,
            allowed.join(", ")
        )));
    }
    Ok(())
}

fn validate_string_array_field(
    section: &Map<String, Value>,
    path: &str,
    key: &str,
) -> Result<(), BoundaryError> {
    let Some(value) = section.get(key) else {
        return Ok(());
    };
    let Some(items) = value.as_array() else {
        return Err(config_type_error(path, "array of strings"));
    };
    for (index, item) in items.iter().enumerate() {
        let Some(text) = item.as_str() else {
            return Err(config_type_error(&format!("{}[{}]", path, index), "string"));
        };
        if text.trim().is_empty() {
            return Err(BoundaryError::InvalidConfig(format!(
                "Invalid config at '{}[{}]': value cannot be empty",
                path, index
            )));
        }
    }
    Ok(())
}

fn config_type_error(path: &str, expected: &str) -> BoundaryError {
    BoundaryError::InvalidConfig(format!(
        "Invalid config at '{}': expected {}",
        path, expected
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_is_valid() {
        assert!(validate_config(&json!({})).is_ok());
    }

    #[test]
    fn root_must_be_object() {
        let err = validate_config(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, BoundaryError::InvalidConfig(_)));
    }

    #[test]
    fn threshold_range_is_enforced() {
        assert!(validate_config(&json!({"entropy": {"threshold": 0.8}})).is_ok());
        assert!(validate_config(&json!({"entropy": {"threshold": 0.0}})).is_err());
        assert!(validate_config(&json!({"entropy": {"threshold": -1.0}})).is_err());
        assert!(validate_config(&json!({"entropy": {"threshold": 12.5}})).is_err());
        assert!(validate_config(&json!({"entropy": {"threshold": "high"}})).is_err());
    }

    #[test]
    fn max_depth_must_be_positive() {
        let err = validate_config(&json!({"traversal": {"max_depth": 0}})).unwrap_err();
        assert!(err.to_string().contains("traversal.max_depth"));
    }

    #[test]
    fn strategy_must_be_known() {
        assert!(validate_config(&json!({"traversal": {"strategy": "dfs"}})).is_ok());
        let err = validate_config(&json!({"traversal": {"strategy": "random"}})).unwrap_err();
        assert!(err.to_string().contains("entropy, bfs, dfs, guided"));
    }

    #[test]
    fn start_nodes_must_be_non_empty_strings() {
        assert!(validate_config(&json!({"traversal": {"start_nodes": ["cat", "dog"]}})).is_ok());
        assert!(validate_config(&json!({"traversal": {"start_nodes": ["cat", 3]}})).is_err());
        assert!(validate_config(&json!({"traversal": {"start_nodes": ["  "]}})).is_err());
    }

    #[test]
    fn target_sentence_accepts_null() {
        assert!(validate_config(&json!({"traversal": {"target_sentence": null}})).is_ok());
        assert!(validate_config(&json!({"traversal": {"target_sentence": 2}})).is_ok());
        assert!(validate_config(&json!({"traversal": {"target_sentence": -2}})).is_err());
    }

    #[test]
    fn section_must_be_object() {
        let err = validate_config(&json!({"text": "yes"})).unwrap_err();
        assert!(err.to_string().contains("'text'"));
    }
}
