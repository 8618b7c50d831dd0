//! Maps `node_type` / `edge_type` tags to the variant used to build an entity.

use super::kinds::{EdgeKind, NodeKind};
use crate::graph::fields::JsonMap;
use std::collections::HashMap;
use tracing::trace;

/// Tag-to-variant tables for nodes and edges.
///
/// Resolution never fails: a tag that is missing from the table, or no tag at
/// all, resolves to the `Generic` variant so that custom types can be carried
/// without changing the engine.
#[derive(Debug, Clone)]
pub struct Registry {
    nodes: HashMap<String, NodeKind>,
    edges: HashMap<String, EdgeKind>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Registry {
    /// A registry with no tags at all; everything resolves to `Generic`.
    pub fn empty() -> Self {
        Self { nodes: HashMap::new(), edges: HashMap::new() }
    }

    /// The built-in tags, plus `database` as an alias for `product_system`.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for kind in NodeKind::BUILTIN {
            if let Some(tag) = kind.tag() {
                registry.nodes.insert(tag.to_string(), kind);
            }
        }
        for kind in EdgeKind::BUILTIN {
            if let Some(tag) = kind.tag() {
                registry.edges.insert(tag.to_string(), kind);
            }
        }
        registry.with_node_tag("database", NodeKind::ProductSystem)
    }

    /// Binds `tag` to a node variant, replacing any previous binding.
    pub fn with_node_tag(mut self, tag: impl Into<String>, kind: NodeKind) -> Self {
        self.nodes.insert(tag.into(), kind);
        self
    }

    /// Binds `tag` to an edge variant, replacing any previous binding.
    pub fn with_edge_tag(mut self, tag: impl Into<String>, kind: EdgeKind) -> Self {
        self.edges.insert(tag.into(), kind);
        self
    }

    pub fn resolve_node(&self, tag: Option<&str>) -> NodeKind {
        match tag.and_then(|t| self.nodes.get(t)) {
            Some(&kind) => kind,
            None => {
                trace!(tag = ?tag, "node tag resolved to generic variant");
                NodeKind::Generic
            }
        }
    }

    pub fn resolve_edge(&self, tag: Option<&str>) -> EdgeKind {
        match tag.and_then(|t| self.edges.get(t)) {
            Some(&kind) => kind,
            None => {
                trace!(tag = ?tag, "edge tag resolved to generic variant");
                EdgeKind::Generic
            }
        }
    }

    /// Resolves from the `node_type` entry of an untyped node. Non-string tags count as missing.
    pub(crate) fn node_kind_of(&self, fields: &JsonMap) -> NodeKind {
        self.resolve_node(fields.get("node_type").and_then(|v| v.as_str()))
    }

    pub(crate) fn edge_kind_of(&self, fields: &JsonMap) -> EdgeKind {
        self.resolve_edge(fields.get("edge_type").and_then(|v| v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("project", NodeKind::Project)]
    #[case("product_system", NodeKind::ProductSystem)]
    #[case("database", NodeKind::ProductSystem)]
    #[case("process", NodeKind::Process)]
    #[case("elementary_flow", NodeKind::ElementaryFlow)]
    #[case("weighting", NodeKind::Weighting)]
    #[case("bicycle_frame", NodeKind::Generic)]
    #[case("Process", NodeKind::Generic)]
    fn test_resolve_node(#[case] tag: &str, #[case] expected: NodeKind) {
        assert_eq!(Registry::builtin().resolve_node(Some(tag)), expected);
    }

    #[rstest]
    #[case("belongs_to", EdgeKind::BelongsTo)]
    #[case("technosphere", EdgeKind::Technosphere)]
    #[case("characterization", EdgeKind::Characterization)]
    #[case("substitution", EdgeKind::Generic)]
    fn test_resolve_edge(#[case] tag: &str, #[case] expected: EdgeKind) {
        assert_eq!(Registry::builtin().resolve_edge(Some(tag)), expected);
    }

    #[test]
    fn test_missing_tag_is_generic() {
        let registry = Registry::default();
        assert_eq!(registry.resolve_node(None), NodeKind::Generic);
        assert_eq!(registry.resolve_edge(None), EdgeKind::Generic);
    }

    #[test]
    fn test_custom_bindings() {
        let registry = Registry::empty()
            .with_node_tag("unit_process", NodeKind::Process)
            .with_edge_tag("exchange", EdgeKind::Technosphere);
        assert_eq!(registry.resolve_node(Some("unit_process")), NodeKind::Process);
        assert_eq!(registry.resolve_node(Some("process")), NodeKind::Generic);
        assert_eq!(registry.resolve_edge(Some("exchange")), EdgeKind::Technosphere);
    }
}
