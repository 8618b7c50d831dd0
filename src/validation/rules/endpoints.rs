//! Rule: edge endpoints must exist.

use crate::analysis::GraphView;
use crate::validation::error::Violation;

/// Every edge's `source` and `target` must be keys of the node mapping. An edge
/// missing both endpoints yields two violations.
pub(crate) fn check_endpoints_exist(view: &GraphView<'_>) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (position, edge) in view.graph().edges().iter().enumerate() {
        if !view.contains(edge.source()) {
            violations.push(Violation::edge(
                position,
                edge,
                format!("Can't find edge source in nodes: {}", edge.source()),
            ));
        }
        if !view.contains(edge.target()) {
            violations.push(Violation::edge(
                position,
                edge,
                format!("Can't find edge target in nodes: {}", edge.target()),
            ));
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::test_support::graph_from;
    use crate::validation::Subject;
    use serde_json::json;

    #[test]
    fn test_missing_endpoints_are_each_reported() {
        let graph = graph_from(json!({
            "nodes": {"a": {"node_type": "thing", "name": "a"}},
            "edges": [
                {"edge_type": "link", "source": "a", "target": "a"},
                {"edge_type": "link", "source": "a", "target": "b"},
                {"edge_type": "link", "source": 3, "target": "c"},
            ]
        }));
        let violations = check_endpoints_exist(&GraphView::new(&graph));
        let messages: Vec<&str> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Can't find edge target in nodes: b",
                "Can't find edge source in nodes: 3",
                "Can't find edge target in nodes: c",
            ]
        );
        assert!(matches!(violations[0].subject, Subject::Edge { position: 1, .. }));
    }

    #[test]
    fn test_integer_endpoint_matches_string_key() {
        let graph = graph_from(json!({
            "nodes": {"1": {"node_type": "thing", "name": "one"}},
            "edges": [{"edge_type": "link", "source": 1, "target": "1"}]
        }));
        assert!(check_endpoints_exist(&GraphView::new(&graph)).is_empty());
    }
}
