//! Configuration module
//!
//! This module holds the engine limits and their deserialization from Python dicts.

mod engine;

pub use engine::*;

use pyo3::types::{PyAnyMethods, PyDict, PyDictMethods};
use pyo3::Bound;

/// Helper to get an optional, non-None item from a dict
fn get_item_opt<'py>(dict: &Bound<'py, PyDict>, name: &str) -> Option<Bound<'py, pyo3::PyAny>> {
    dict.get_item(name).ok().flatten().filter(|v| !v.is_none())
}

/// Deserialize engine limits from a Python dict
/// Expected format: {"max_nesting_depth": int, "max_expression_len": int}, both optional
pub fn deserialize_config(config: &Bound<'_, PyDict>) -> pyo3::PyResult<EngineConfig> {
    let defaults = EngineConfig::default();

    let max_nesting_depth = match get_item_opt(config, "max_nesting_depth") {
        Some(v) => v.extract()?,
        None => defaults.max_nesting_depth,
    };
    let max_expression_len = match get_item_opt(config, "max_expression_len") {
        Some(v) => v.extract()?,
        None => defaults.max_expression_len,
    };

    let config = EngineConfig {
        max_nesting_depth,
        max_expression_len,
    };
    config.validate()?;
    Ok(config)
}
