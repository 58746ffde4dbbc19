//! Notation Core - infix / prefix / postfix conversion and evaluation engine
//!
//! This crate converts arithmetic expressions between the three notations and
//! evaluates them to integers, with Python bindings via PyO3.

use pyo3::prelude::*;

pub mod config;
pub mod error;
pub mod evaluator;
pub mod notation;

use crate::config::EngineConfig;
use crate::notation::NotationKind;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use pyo3::types::PyDict;
use std::sync::Arc;

// ============================================================================
// Cached Configuration
// ============================================================================

/// Global engine limits, set by `init_config`
static CACHED_CONFIG: OnceCell<Arc<RwLock<EngineConfig>>> = OnceCell::new();

// ============================================================================
// Helper Functions
// ============================================================================

/// Snapshot of the active limits, or the defaults if `init_config` was never called
fn current_config() -> EngineConfig {
    CACHED_CONFIG
        .get()
        .map(|config| config.read().clone())
        .unwrap_or_default()
}

/// Resolve the optional notation argument of `convert`
fn resolve_notation(expression: &str, notation: Option<&str>) -> PyResult<NotationKind> {
    match notation {
        Some(name) => Ok(name.parse::<NotationKind>()?),
        None => Ok(crate::notation::identify(expression)),
    }
}

// ============================================================================
// Python Functions
// ============================================================================

/// Set the engine limits used by every later call
///
/// # Arguments
/// * `config` - Optional dict with `max_nesting_depth` and/or `max_expression_len`;
///   missing keys (or no dict at all) fall back to the defaults
#[pyfunction]
#[pyo3(signature = (config=None))]
fn init_config(config: Option<&Bound<'_, PyDict>>) -> PyResult<()> {
    let engine_config = match config {
        Some(dict) => config::deserialize_config(dict)?,
        None => EngineConfig::default(),
    };

    log::debug!(
        "engine config: max_nesting_depth={}, max_expression_len={}",
        engine_config.max_nesting_depth,
        engine_config.max_expression_len
    );

    // If already initialized, update the config
    if let Some(existing) = CACHED_CONFIG.get() {
        let mut guard = existing.write();
        *guard = engine_config;
    } else {
        let _ = CACHED_CONFIG.set(Arc::new(RwLock::new(engine_config)));
    }

    Ok(())
}

/// Check if config is initialized
#[pyfunction]
fn is_config_initialized() -> bool {
    CACHED_CONFIG.get().is_some()
}

/// Classify an expression as "infix", "prefix", "postfix" or "unknown"
#[pyfunction]
fn identify(expression: &str) -> &'static str {
    crate::notation::identify(expression).as_str()
}

/// Convert an expression into the two other notations
///
/// # Arguments
/// * `expression` - Expression to convert
/// * `notation` - Current notation ("infix", "prefix", "postfix"); identified when omitted
///
/// # Returns
/// (infix or prefix, postfix or prefix) in the fixed order:
/// infix -> (prefix, postfix), prefix -> (infix, postfix), postfix -> (infix, prefix)
///
/// # Raises
/// ValueError if the expression is malformed or its notation cannot be identified
#[pyfunction]
#[pyo3(signature = (expression, notation=None))]
fn convert(expression: &str, notation: Option<&str>) -> PyResult<(String, String)> {
    let kind = resolve_notation(expression, notation)?;
    crate::notation::convert_with(expression, kind, &current_config()).map_err(|e| {
        log::debug!("convert rejected {:?} as {}: {}", expression, kind, e);
        e.into()
    })
}

/// Render an expression in all three notations
///
/// # Returns
/// Dict with keys "source", "infix", "prefix", "postfix"
#[pyfunction]
fn convert_all<'py>(py: Python<'py>, expression: &str) -> PyResult<Bound<'py, PyDict>> {
    let notations = crate::notation::convert_all_with(expression, &current_config()).map_err(|e| {
        log::debug!("convert_all rejected {:?}: {}", expression, e);
        PyErr::from(e)
    })?;

    let dict = PyDict::new(py);
    dict.set_item("source", notations.source.as_str())?;
    dict.set_item("infix", notations.infix)?;
    dict.set_item("prefix", notations.prefix)?;
    dict.set_item("postfix", notations.postfix)?;
    Ok(dict)
}

/// Evaluate an infix, prefix or postfix expression to an integer
///
/// # Raises
/// ValueError for malformed input, ZeroDivisionError, OverflowError, or
/// RecursionError when the expression nests deeper than the configured limit
#[pyfunction]
fn evaluate(expression: &str) -> PyResult<i64> {
    evaluator::evaluate_with(expression, &current_config()).map_err(|e| {
        log::debug!("evaluate rejected {:?}: {}", expression, e);
        e.into()
    })
}

/// Evaluate an expression asynchronously
///
/// The evaluation runs on Tokio's blocking pool so Python's asyncio event loop
/// stays responsive for very long expressions.
///
/// # Example (Python)
/// ```python
/// value = await evaluate_async("3 4 2 * +")
/// ```
#[pyfunction]
fn evaluate_async<'py>(py: Python<'py>, expression: String) -> PyResult<Bound<'py, PyAny>> {
    // Snapshot limits before entering async context
    let config = current_config();

    pyo3_async_runtimes::tokio::future_into_py(py, async move {
        let value = tokio::task::spawn_blocking(move || {
            evaluator::evaluate_with(&expression, &config).map_err(|e| {
                log::debug!("evaluate_async rejected {:?}: {}", expression, e);
                PyErr::from(e)
            })
        })
        .await
        .map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Evaluation task panicked: {}",
                e
            ))
        })??;

        Ok(value)
    })
}

// ============================================================================
// Python Module Definition
// ============================================================================

/// Python module definition
#[pymodule]
fn notation_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_config, m)?)?;
    m.add_function(wrap_pyfunction!(is_config_initialized, m)?)?;
    m.add_function(wrap_pyfunction!(identify, m)?)?;
    m.add_function(wrap_pyfunction!(convert, m)?)?;
    m.add_function(wrap_pyfunction!(convert_all, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate, m)?)?;
    m.add_function(wrap_pyfunction!(evaluate_async, m)?)?;
    Ok(())
}
