//! Error types for loading graphs.
//!
//! Field-level failures keep the entity's `EntityError`, wrapped with the node
//! key or edge position they came from. Graph-level failures are the
//! validator's `ValidationError`.

use crate::graph::{EntityError, Identifier};
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A node entry failed field-level construction.
    #[error("invalid node {id}: {source}")]
    Node {
        id: Identifier,
        #[source]
        source: EntityError,
    },

    /// An edge entry failed field-level construction.
    #[error("invalid edge #{index}: {source}")]
    Edge {
        index: usize,
        #[source]
        source: EntityError,
    },

    /// The assembled graph broke a cross-referential rule.
    #[error("invalid graph: {0}")]
    Graph(#[from] ValidationError),

    /// The input was not a `{"nodes": {...}, "edges": [...]}` document.
    #[error("malformed graph document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// The field-level error, if this is a node or edge construction failure.
    pub fn entity_error(&self) -> Option<&EntityError> {
        match self {
            Error::Node { source, .. } | Error::Edge { source, .. } => Some(source),
            _ => None,
        }
    }

    /// The rule failure, if this is a graph-level error.
    pub fn validation_error(&self) -> Option<&ValidationError> {
        match self {
            Error::Graph(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type alias using the crate's `Error`.
pub type Result<T> = std::result::Result<T, Error>;
