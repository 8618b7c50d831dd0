//! Rule: inventory nodes must belong to a collection.

use crate::analysis::GraphView;
use crate::schema::EdgeKind;
use crate::validation::error::Violation;

/// Every process, product and elementary flow must be the source of at least one
/// `belongs_to` edge whose target is a project or a product system.
pub(crate) fn check_membership(view: &GraphView<'_>) -> Vec<Violation> {
    view.graph()
        .nodes()
        .iter()
        .filter(|(_, node)| node.kind().is_inventory())
        .filter(|(id, _)| {
            !view.outgoing(id).any(|(_, edge)| {
                edge.kind() == EdgeKind::BelongsTo
                    && view.kind_of(edge.target()).is_some_and(|k| k.is_collection())
            })
        })
        .map(|(id, node)| {
            Violation::node(id, format!("{} node not linked to a collection: {}", node.kind(), id))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::test_support::graph_from;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn with_edges(edges: Value) -> Value {
        json!({
            "nodes": {
                "proj": {"node_type": "project", "name": "proj"},
                "db": {"node_type": "product_system", "name": "db", "license": "CC0"},
                "lcia": {"node_type": "impact_assessment_method", "name": "lcia", "license": "CC0"},
                "p": {"node_type": "process", "name": "p", "location": "NO"},
            },
            "edges": edges
        })
    }

    #[rstest]
    #[case(json!([]), 1)]
    #[case(json!([{"edge_type": "belongs_to", "source": "p", "target": "db"}]), 0)]
    #[case(json!([{"edge_type": "belongs_to", "source": "p", "target": "proj"}]), 0)]
    #[case(json!([{"edge_type": "belongs_to", "source": "p", "target": "lcia"}]), 1)]
    #[case(json!([{"edge_type": "belongs_to", "source": "db", "target": "p"}]), 1)]
    #[case(json!([{"edge_type": "part_of", "source": "p", "target": "db"}]), 1)]
    #[case(json!([{"edge_type": "belongs_to", "source": "p", "target": "nowhere"}]), 1)]
    fn test_process_membership(#[case] edges: Value, #[case] expected: usize) {
        let graph = graph_from(with_edges(edges));
        assert_eq!(check_membership(&GraphView::new(&graph)).len(), expected);
    }

    #[test]
    fn test_every_unlinked_member_is_reported() {
        let graph = graph_from(json!({
            "nodes": {
                "gas": {"node_type": "product", "name": "gas", "unit": "MJ"},
                "co2": {"node_type": "elementary_flow", "name": "CO2", "unit": "kg", "context": ["air"]},
                "gwp": {"node_type": "impact_category", "name": ["IPCC"], "unit": "kg"},
            },
            "edges": []
        }));
        let violations = check_membership(&GraphView::new(&graph));
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "elementary_flow node not linked to a collection: co2",
                "product node not linked to a collection: gas",
            ]
        );
    }
}
