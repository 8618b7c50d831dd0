//! Defines the typed LCA graph and its entities.
pub mod attrs;
pub mod edge;
pub mod fields;
pub mod identifier;
pub mod node;

// Re-export key types for convenient access
pub use attrs::{Comment, DataSource};
pub use edge::{
    CharacterizationEdge, Edge, EdgeHeader, QualitativeEdge, QuantitativeEdge, TechnosphereEdge,
    Uncertainty,
};
pub use fields::{DumpOptions, EntityError, FieldError, FieldErrorKind, JsonMap, LocItem, Real};
pub use identifier::Identifier;
pub use node::{
    Collection, ElementaryFlow, GenericNode, ImpactNode, InventoryAttrs, Node, NodeHeader, NodeName,
    Process, Product, Project,
};

use crate::validation::{ValidationError, Validator};
use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// A complete, validated set of nodes and edges.
///
/// The graph owns its node mapping and edge sequence; edges reference nodes
/// only by identifier. A `Graph` value always satisfies every cross-referential
/// rule, because the only public constructor validates.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    nodes: BTreeMap<Identifier, Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Assembles a graph and runs the validator over it.
    pub fn new(
        nodes: BTreeMap<Identifier, Node>,
        edges: Vec<Edge>,
    ) -> Result<Self, ValidationError> {
        let graph = Self { nodes, edges };
        graph.validate()?;
        Ok(graph)
    }

    /// Assembles a graph without validating it, so single rules can be tested.
    #[cfg(test)]
    pub(crate) fn unchecked(nodes: BTreeMap<Identifier, Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// Re-runs every rule. Always `Ok` for a constructed graph.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Validator::new(self).validate()
    }

    pub fn nodes(&self) -> &BTreeMap<Identifier, Node> {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &Identifier) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn into_parts(self) -> (BTreeMap<Identifier, Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    /// Dumps to the untyped `{"nodes": {...}, "edges": [...]}` form.
    pub fn dump(&self, opts: &DumpOptions) -> Value {
        let nodes: JsonMap = self
            .nodes
            .iter()
            .map(|(id, node)| (id.as_key().into_owned(), Value::Object(node.dump(opts))))
            .collect();
        let edges: Vec<Value> = self.edges.iter().map(|e| Value::Object(e.dump(opts))).collect();

        let mut out = JsonMap::new();
        out.insert("nodes".to_string(), Value::Object(nodes));
        out.insert("edges".to_string(), Value::Array(edges));
        Value::Object(out)
    }
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.dump(&DumpOptions::default()).serialize(serializer)
    }
}

/// Deserializes through the built-in loader, so the result is validated.
impl<'de> Deserialize<'de> for Graph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = crate::loader::RawGraph::deserialize(deserializer)?;
        crate::loader::load(raw).map_err(D::Error::custom)
    }
}
