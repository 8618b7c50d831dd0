// Crate root: the typed LCA graph, its loader and the validation engine.
// With the `python` feature, this file also defines the `_core` Python module.

pub mod analysis;
pub mod error;
pub mod graph;
pub mod loader;
pub mod schema;
pub mod validation;

#[cfg(feature = "python")]
mod bindings {
    pub mod python;
}

pub use error::{Error, Result};
pub use graph::{DumpOptions, Edge, Graph, Identifier, Node};
pub use loader::{load, Loader, RawGraph};
pub use schema::{EdgeKind, NodeKind, Registry};
pub use validation::{Rule, ValidationError, Validator};

#[cfg(feature = "python")]
use pyo3::prelude::*;

// --- Module Definition ---
/// This function defines the `_core` Python module.
/// The name `_core` is chosen to indicate it's an internal, compiled component.
#[cfg(feature = "python")]
#[pymodule]
fn _core(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(bindings::python::normalize_graph, m)?)?;
    m.add_function(wrap_pyfunction!(bindings::python::is_valid_graph, m)?)?;
    Ok(())
}
