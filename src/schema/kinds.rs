//! The closed sets of built-in node and edge variants.

use crate::graph::fields::{EntityError, JsonMap};
use crate::graph::{Edge, Node};
use std::fmt;

/// The concrete node variant an entity is built as.
///
/// `Generic` is the open fallback for tags the registry does not know; such
/// nodes are only held to the minimal shared contract (a `name` and a `node_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Project,
    ProductSystem,
    Process,
    Product,
    ElementaryFlow,
    ImpactAssessmentMethod,
    ImpactCategory,
    Normalization,
    Weighting,
    Generic,
}

impl NodeKind {
    pub const BUILTIN: [NodeKind; 9] = [
        NodeKind::Project,
        NodeKind::ProductSystem,
        NodeKind::Process,
        NodeKind::Product,
        NodeKind::ElementaryFlow,
        NodeKind::ImpactAssessmentMethod,
        NodeKind::ImpactCategory,
        NodeKind::Normalization,
        NodeKind::Weighting,
    ];

    /// The canonical `node_type` tag. `Generic` has none.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            NodeKind::Project => Some("project"),
            NodeKind::ProductSystem => Some("product_system"),
            NodeKind::Process => Some("process"),
            NodeKind::Product => Some("product"),
            NodeKind::ElementaryFlow => Some("elementary_flow"),
            NodeKind::ImpactAssessmentMethod => Some("impact_assessment_method"),
            NodeKind::ImpactCategory => Some("impact_category"),
            NodeKind::Normalization => Some("normalization"),
            NodeKind::Weighting => Some("weighting"),
            NodeKind::Generic => None,
        }
    }

    /// The variant name used in field-level error reports.
    pub fn entity_name(self) -> &'static str {
        match self {
            NodeKind::Project => "Project",
            NodeKind::ProductSystem => "ProductSystem",
            NodeKind::Process => "Process",
            NodeKind::Product => "Product",
            NodeKind::ElementaryFlow => "ElementaryFlow",
            NodeKind::ImpactAssessmentMethod => "ImpactAssessmentMethod",
            NodeKind::ImpactCategory => "ImpactCategory",
            NodeKind::Normalization => "Normalization",
            NodeKind::Weighting => "Weighting",
            NodeKind::Generic => "Node",
        }
    }

    /// Containers that inventory nodes must `belong_to`.
    pub fn is_collection(self) -> bool {
        matches!(self, NodeKind::Project | NodeKind::ProductSystem)
    }

    /// Processes, products and elementary flows.
    pub fn is_inventory(self) -> bool {
        matches!(self, NodeKind::Process | NodeKind::Product | NodeKind::ElementaryFlow)
    }

    /// Builds this variant from an untyped field mapping that was dispatched here by tag.
    pub fn construct(self, fields: JsonMap) -> Result<Node, EntityError> {
        Node::dispatched(self, fields)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag().unwrap_or("node"))
    }
}

/// The concrete edge variant an entity is built as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    BelongsTo,
    Technosphere,
    Biosphere,
    Characterization,
    Normalization,
    Weighting,
    Generic,
}

impl EdgeKind {
    pub const BUILTIN: [EdgeKind; 6] = [
        EdgeKind::BelongsTo,
        EdgeKind::Technosphere,
        EdgeKind::Biosphere,
        EdgeKind::Characterization,
        EdgeKind::Normalization,
        EdgeKind::Weighting,
    ];

    pub fn tag(self) -> Option<&'static str> {
        match self {
            EdgeKind::BelongsTo => Some("belongs_to"),
            EdgeKind::Technosphere => Some("technosphere"),
            EdgeKind::Biosphere => Some("biosphere"),
            EdgeKind::Characterization => Some("characterization"),
            EdgeKind::Normalization => Some("normalization"),
            EdgeKind::Weighting => Some("weighting"),
            EdgeKind::Generic => None,
        }
    }

    pub fn entity_name(self) -> &'static str {
        match self {
            EdgeKind::BelongsTo => "QualitativeEdge",
            EdgeKind::Technosphere => "TechnosphereQuantitativeEdge",
            EdgeKind::Biosphere => "BiosphereQuantitativeEdge",
            EdgeKind::Characterization => "CharacterizationQuantitativeEdge",
            EdgeKind::Normalization => "NormalizationQuantitativeEdge",
            EdgeKind::Weighting => "WeightingQuantitativeEdge",
            EdgeKind::Generic => "Edge",
        }
    }

    pub fn construct(self, fields: JsonMap) -> Result<Edge, EntityError> {
        Edge::dispatched(self, fields)
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag().unwrap_or("edge"))
    }
}
