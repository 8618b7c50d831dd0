//! Rules on which node kinds each quantitative edge kind may connect.

use crate::analysis::GraphView;
use crate::schema::{EdgeKind, NodeKind};
use crate::validation::error::Violation;

/// The node kinds an edge kind is allowed to connect.
pub(crate) struct EndpointPolicy {
    pub edge: EdgeKind,
    pub sources: &'static [NodeKind],
    pub targets: &'static [NodeKind],
    /// Whether source and target may be swapped.
    pub either_direction: bool,
    pub requirement: &'static str,
}

impl EndpointPolicy {
    fn allows(&self, source: NodeKind, target: NodeKind) -> bool {
        let forward = self.sources.contains(&source) && self.targets.contains(&target);
        let backward = self.sources.contains(&target) && self.targets.contains(&source);
        forward || (self.either_direction && backward)
    }
}

pub(crate) const BIOSPHERE: EndpointPolicy = EndpointPolicy {
    edge: EdgeKind::Biosphere,
    sources: &[NodeKind::Process],
    targets: &[NodeKind::ElementaryFlow],
    either_direction: true,
    requirement: "Biosphere edges must link a process to an elementary flow",
};

pub(crate) const WEIGHTING: EndpointPolicy = EndpointPolicy {
    edge: EdgeKind::Weighting,
    sources: &[NodeKind::Weighting],
    targets: &[NodeKind::Normalization, NodeKind::ImpactCategory],
    either_direction: false,
    requirement: "Weighting edges must link a weighting set to an impact category \
                  or a normalization set",
};

pub(crate) const NORMALIZATION: EndpointPolicy = EndpointPolicy {
    edge: EdgeKind::Normalization,
    sources: &[NodeKind::ElementaryFlow],
    targets: &[NodeKind::Normalization],
    either_direction: false,
    requirement: "Normalization edges must link an elementary flow to a normalization set",
};

pub(crate) const CHARACTERIZATION: EndpointPolicy = EndpointPolicy {
    edge: EdgeKind::Characterization,
    sources: &[NodeKind::ElementaryFlow],
    targets: &[NodeKind::ImpactCategory],
    either_direction: false,
    requirement: "Characterization edges must link an elementary flow to an impact category",
};

pub(crate) const TECHNOSPHERE: EndpointPolicy = EndpointPolicy {
    edge: EdgeKind::Technosphere,
    sources: &[NodeKind::Process],
    targets: &[NodeKind::Product],
    either_direction: true,
    requirement: "Technosphere edges must link a process and a product",
};

/// Checks every edge of `policy.edge` against the policy. Edges with a missing
/// endpoint are skipped; endpoint existence is its own rule.
pub(crate) fn check_endpoint_types(
    view: &GraphView<'_>,
    policy: &EndpointPolicy,
) -> Vec<Violation> {
    view.edges_of(policy.edge)
        .filter_map(|(position, edge)| {
            let source = view.kind_of(edge.source())?;
            let target = view.kind_of(edge.target())?;
            if policy.allows(source, target) {
                None
            } else {
                Some(Violation::edge(position, edge, format!("{} ({})", policy.requirement, edge)))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::test_support::graph_from;
    use rstest::rstest;
    use serde_json::json;

    fn graph_with_edge(edge_type: &str, source: &str, target: &str) -> crate::graph::Graph {
        let mut edge = json!({
            "edge_type": edge_type, "source": source, "target": target, "amount": 1,
        });
        if edge_type == "technosphere" {
            edge["functional"] = json!(false);
        }
        graph_from(json!({
            "nodes": {
                "proc": {"node_type": "process", "name": "proc", "location": "NO"},
                "prod": {"node_type": "product", "name": "prod", "unit": "kg"},
                "prod2": {"node_type": "product", "name": "prod2", "unit": "kg"},
                "flow": {"node_type": "elementary_flow", "name": "CO2", "unit": "kg", "context": ["air"]},
                "cat": {"node_type": "impact_category", "name": ["IPCC", "GWP100"], "unit": "kg CO2-eq"},
                "norm": {"node_type": "normalization", "name": ["EF", "2010"], "unit": "-"},
                "wgt": {"node_type": "weighting", "name": ["EF", "weights"], "unit": "pt"},
            },
            "edges": [edge]
        }))
    }

    #[rstest]
    #[case("biosphere", "proc", "flow", true)]
    #[case("biosphere", "flow", "proc", true)]
    #[case("biosphere", "prod", "prod2", false)]
    #[case("biosphere", "proc", "prod", false)]
    #[case("weighting", "wgt", "norm", true)]
    #[case("weighting", "wgt", "cat", true)]
    #[case("weighting", "norm", "wgt", false)]
    #[case("weighting", "wgt", "flow", false)]
    #[case("normalization", "flow", "norm", true)]
    #[case("normalization", "norm", "flow", false)]
    #[case("characterization", "flow", "cat", true)]
    #[case("characterization", "cat", "flow", false)]
    #[case("characterization", "flow", "norm", false)]
    #[case("technosphere", "proc", "prod", true)]
    #[case("technosphere", "prod", "proc", true)]
    #[case("technosphere", "proc", "flow", false)]
    #[case("technosphere", "prod", "prod2", false)]
    fn test_endpoint_typing(
        #[case] edge_type: &str,
        #[case] source: &str,
        #[case] target: &str,
        #[case] ok: bool,
    ) {
        let graph = graph_with_edge(edge_type, source, target);
        let view = GraphView::new(&graph);
        let policy = match edge_type {
            "biosphere" => &BIOSPHERE,
            "weighting" => &WEIGHTING,
            "normalization" => &NORMALIZATION,
            "characterization" => &CHARACTERIZATION,
            _ => &TECHNOSPHERE,
        };
        assert_eq!(check_endpoint_types(&view, policy).is_empty(), ok);
    }

    #[test]
    fn test_missing_endpoint_is_skipped() {
        let graph = graph_with_edge("biosphere", "proc", "ghost");
        assert!(check_endpoint_types(&GraphView::new(&graph), &BIOSPHERE).is_empty());
    }

    #[test]
    fn test_message_embeds_edge() {
        let graph = graph_with_edge("biosphere", "prod", "prod2");
        let violations = check_endpoint_types(&GraphView::new(&graph), &BIOSPHERE);
        assert_eq!(
            violations[0].message,
            "Biosphere edges must link a process to an elementary flow (biosphere edge prod -> prod2)"
        );
    }
}
