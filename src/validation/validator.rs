//! The central validator that orchestrates the execution of all validation rules.
use super::error::ValidationError;
use super::rules::Rule;
use crate::analysis::GraphView;
use crate::graph::Graph;
use tracing::{debug, trace};

/// Runs the rule chain over one graph.
///
/// Rules run in `Rule::ALL` order against a single adjacency view. The first
/// rule that reports violations ends the run; later rules are not evaluated.
pub struct Validator<'a> {
    graph: &'a Graph,
}

impl<'a> Validator<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Self { graph }
    }

    /// Executes the rules in order and fails with the first one that does not hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let view = GraphView::new(self.graph);
        for rule in Rule::ALL {
            trace!(rule = rule.name(), "checking rule");
            let violations = rule.check(&view);
            if !violations.is_empty() {
                debug!(rule = rule.name(), count = violations.len(), "graph failed validation");
                return Err(ValidationError { rule, violations });
            }
        }
        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            "graph validated"
        );
        Ok(())
    }

    /// Runs every rule regardless of earlier failures and returns one error per
    /// failing rule, in rule order. Diagnostic only; `validate` decides validity.
    pub fn audit(&self) -> Vec<ValidationError> {
        let view = GraphView::new(self.graph);
        Rule::ALL
            .into_iter()
            .filter_map(|rule| {
                let violations = rule.check(&view);
                (!violations.is_empty()).then_some(ValidationError { rule, violations })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::rules::test_support::graph_from;
    use crate::validation::Subject;
    use serde_json::json;

    #[test]
    fn test_first_failing_rule_wins() {
        // Fails both endpoint existence and biosphere typing.
        let graph = graph_from(json!({
            "nodes": {
                "db": {"node_type": "product_system", "name": "db", "license": "CC0"},
                "a": {"node_type": "product", "name": "a", "unit": "kg"},
                "b": {"node_type": "product", "name": "b", "unit": "kg"},
            },
            "edges": [
                {"edge_type": "belongs_to", "source": "a", "target": "db"},
                {"edge_type": "belongs_to", "source": "b", "target": "db"},
                {"edge_type": "biosphere", "source": "a", "target": "b", "amount": 1},
                {"edge_type": "belongs_to", "source": "ghost", "target": "db"},
            ]
        }));
        let err = Validator::new(&graph).validate().unwrap_err();
        assert_eq!(err.rule, Rule::EdgeEndpointsExist);
        assert_eq!(err.to_string(), "Can't find edge source in nodes: ghost");

        let audit = Validator::new(&graph).audit();
        let rules: Vec<Rule> = audit.iter().map(|e| e.rule).collect();
        assert_eq!(rules, vec![Rule::EdgeEndpointsExist, Rule::BiosphereEndpoints]);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let graph = graph_from(json!({
            "nodes": {
                "db": {"node_type": "product_system", "name": "db", "license": "CC0"},
                "p": {"node_type": "process", "name": "p", "location": "NO"},
                "q": {"node_type": "process", "name": "q", "location": "SE"},
            },
            "edges": [
                {"edge_type": "belongs_to", "source": "p", "target": "db"},
                {"edge_type": "belongs_to", "source": "q", "target": "db"},
            ]
        }));
        let first = Validator::new(&graph).validate().unwrap_err();
        let second = Validator::new(&graph).validate().unwrap_err();
        assert_eq!(first, second);
        assert_eq!(first.rule, Rule::FunctionalCoverage);
        assert_eq!(
            first.subjects().cloned().collect::<Vec<_>>(),
            vec![Subject::Node("p".into()), Subject::Node("q".into())]
        );
        assert_eq!(
            first.to_string(),
            "Can't find functional edge for process node: p (and 1 more functional_coverage violation(s))"
        );
    }

    #[test]
    fn test_empty_graph_is_valid() {
        let graph = graph_from(json!({"nodes": {}, "edges": []}));
        assert!(Validator::new(&graph).validate().is_ok());
        assert!(Validator::new(&graph).audit().is_empty());
    }
}
