//! Converts untyped `{"nodes": {...}, "edges": [...]}` documents into validated graphs.

use crate::error::{Error, Result};
use crate::graph::fields::expect_object;
use crate::graph::{Edge, EntityError, Graph, Identifier, JsonMap, Node};
use crate::schema::{EdgeKind, NodeKind, Registry};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::Read;
use tracing::debug;

/// The untyped input document. Entries stay plain JSON until the loader
/// dispatches them on their `node_type` / `edge_type` tag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawGraph {
    pub nodes: JsonMap,
    pub edges: Vec<Value>,
}

/// Builds typed graphs from raw documents, dispatching through a `Registry`.
#[derive(Debug, Clone, Default)]
pub struct Loader {
    registry: Registry,
}

impl Loader {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Types every entry and validates the result. The first entry that fails its
    /// own field contract aborts the load.
    pub fn load(&self, raw: RawGraph) -> Result<Graph> {
        debug!(nodes = raw.nodes.len(), edges = raw.edges.len(), "loading graph");
        let (nodes, edges) = self.assemble(raw)?;
        let graph = Graph::new(nodes, edges)?;
        debug!("graph loaded");
        Ok(graph)
    }

    pub fn load_value(&self, value: Value) -> Result<Graph> {
        self.load(serde_json::from_value(value)?)
    }

    pub fn load_str(&self, data: &str) -> Result<Graph> {
        self.load(serde_json::from_str(data)?)
    }

    /// Reads the whole document first, so a failing reader surfaces as
    /// `Error::Io` rather than as malformed JSON.
    pub fn load_reader<R: Read>(&self, mut reader: R) -> Result<Graph> {
        let mut data = String::new();
        reader.read_to_string(&mut data)?;
        self.load_str(&data)
    }

    /// Loads independent documents in parallel. Results keep the input order.
    pub fn load_all(&self, raws: Vec<RawGraph>) -> Vec<Result<Graph>> {
        raws.into_par_iter().map(|raw| self.load(raw)).collect()
    }

    /// Types the entries without running the graph rules.
    fn assemble(&self, raw: RawGraph) -> Result<(BTreeMap<Identifier, Node>, Vec<Edge>)> {
        let mut nodes = BTreeMap::new();
        for (key, value) in raw.nodes {
            let id = Identifier::from(key);
            let node = self.node(value).map_err(|source| Error::Node { id: id.clone(), source })?;
            nodes.insert(id, node);
        }

        let edges = raw
            .edges
            .into_iter()
            .enumerate()
            .map(|(index, value)| self.edge(value).map_err(|source| Error::Edge { index, source }))
            .collect::<Result<Vec<_>>>()?;

        Ok((nodes, edges))
    }

    fn node(&self, value: Value) -> std::result::Result<Node, EntityError> {
        let fields = expect_object(NodeKind::Generic.entity_name(), value)?;
        self.registry.node_kind_of(&fields).construct(fields)
    }

    fn edge(&self, value: Value) -> std::result::Result<Edge, EntityError> {
        let fields = expect_object(EdgeKind::Generic.entity_name(), value)?;
        self.registry.edge_kind_of(&fields).construct(fields)
    }
}

/// Loads a document with the built-in registry.
pub fn load(raw: RawGraph) -> Result<Graph> {
    Loader::default().load(raw)
}
