use crate::graph::DumpOptions;
use crate::loader::Loader;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// Loads and validates a JSON graph document, then dumps it back to JSON.
#[pyfunction]
#[pyo3(signature = (data, exclude_unset = true))]
pub fn normalize_graph(data: &str, exclude_unset: bool) -> PyResult<String> {
    let graph = Loader::default()
        .load_str(data)
        .map_err(|e| PyValueError::new_err(e.to_string()))?;
    let opts = DumpOptions { exclude_unset };
    serde_json::to_string(&graph.dump(&opts)).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Whether a JSON graph document loads and passes every rule.
#[pyfunction]
pub fn is_valid_graph(data: &str) -> bool {
    Loader::default().load_str(data).is_ok()
}
