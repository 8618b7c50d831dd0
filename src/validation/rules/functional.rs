//! Rules on the `functional` flag of technosphere edges.

use crate::analysis::GraphView;
use crate::schema::{EdgeKind, NodeKind};
use crate::validation::error::Violation;

/// Every process must be an endpoint of at least one technosphere edge with
/// `functional = true`.
///
/// A process whose technosphere edges all leave functionality undeclared is not
/// judged here: that graph already fails `check_functionality_declared`, which
/// reports the edges themselves.
pub(crate) fn check_functional_coverage(view: &GraphView<'_>) -> Vec<Violation> {
    view.nodes_of(&[NodeKind::Process])
        .filter(|(id, _)| {
            let mut covered = false;
            let mut declared = false;
            let mut undeclared = false;
            let technosphere = view
                .incident(id)
                .filter(|(_, e)| e.kind() == EdgeKind::Technosphere);
            for (_, edge) in technosphere {
                match edge.functional() {
                    Some(flag) => {
                        declared = true;
                        covered |= flag;
                    }
                    None => undeclared = true,
                }
            }
            !covered && (declared || !undeclared)
        })
        .map(|(id, _)| {
            Violation::node(id, format!("Can't find functional edge for process node: {}", id))
        })
        .collect()
}

/// Every technosphere edge must carry an explicit boolean `functional`.
pub(crate) fn check_functionality_declared(view: &GraphView<'_>) -> Vec<Violation> {
    view.edges_of(EdgeKind::Technosphere)
        .filter(|(_, edge)| edge.functional().is_none())
        .map(|(position, edge)| {
            Violation::edge(
                position,
                edge,
                format!("Technosphere edges must indicate functionality status ({})", edge),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::test_support::graph_from;
    use rstest::rstest;
    use serde_json::{json, Value};

    fn graph_with(edges: Value) -> crate::graph::Graph {
        graph_from(json!({
            "nodes": {
                "p": {"node_type": "process", "name": "p", "location": "NO"},
                "gas": {"node_type": "product", "name": "gas", "unit": "MJ"},
                "heat": {"node_type": "product", "name": "heat", "unit": "MJ"},
            },
            "edges": edges
        }))
    }

    #[rstest]
    #[case(json!([]), 1)]
    #[case(json!([
        {"edge_type": "technosphere", "source": "p", "target": "gas", "amount": 1, "functional": false},
    ]), 1)]
    #[case(json!([
        {"edge_type": "technosphere", "source": "p", "target": "gas", "amount": 1, "functional": true},
    ]), 0)]
    #[case(json!([
        {"edge_type": "technosphere", "source": "gas", "target": "p", "amount": 1, "functional": true},
    ]), 0)]
    #[case(json!([
        {"edge_type": "technosphere", "source": "p", "target": "gas", "amount": 1, "functional": true},
        {"edge_type": "technosphere", "source": "p", "target": "heat", "amount": 2, "functional": true},
    ]), 0)]
    #[case(json!([
        {"edge_type": "technosphere", "source": "p", "target": "gas", "amount": 1},
    ]), 0)]
    #[case(json!([
        {"edge_type": "technosphere", "source": "p", "target": "gas", "amount": 1, "functional": false},
        {"edge_type": "technosphere", "source": "p", "target": "heat", "amount": 2},
    ]), 1)]
    #[case(json!([
        {"edge_type": "flow", "source": "p", "target": "gas", "functional": true},
    ]), 1)]
    fn test_functional_coverage(#[case] edges: Value, #[case] expected: usize) {
        let graph = graph_with(edges);
        assert_eq!(check_functional_coverage(&GraphView::new(&graph)).len(), expected);
    }

    #[test]
    fn test_undeclared_functionality_is_reported_per_edge() {
        let graph = graph_with(json!([
            {"edge_type": "technosphere", "source": "p", "target": "gas", "amount": 1, "functional": true},
            {"edge_type": "technosphere", "source": "heat", "target": "p", "amount": 3},
        ]));
        let violations = check_functionality_declared(&GraphView::new(&graph));
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].message,
            "Technosphere edges must indicate functionality status (technosphere edge heat -> p)"
        );
    }
}
