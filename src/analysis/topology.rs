//! A petgraph view of a `Graph`, used by the validation rules for adjacency queries.

use crate::graph::{Edge, Graph, Identifier, Node};
use crate::schema::{EdgeKind, NodeKind};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

/// Adjacency over the identifier mapping of one graph snapshot.
///
/// Node weights are identifiers, edge weights are positions in the graph's edge
/// sequence. Edges with a missing endpoint are not part of the topology; the
/// endpoint existence rule reports them separately.
pub struct GraphView<'a> {
    graph: &'a Graph,
    topology: DiGraph<&'a Identifier, usize>,
    index: HashMap<&'a Identifier, NodeIndex>,
}

impl<'a> GraphView<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let mut topology = DiGraph::with_capacity(graph.node_count(), graph.edge_count());
        let mut index = HashMap::with_capacity(graph.node_count());

        for id in graph.nodes().keys() {
            index.insert(id, topology.add_node(id));
        }
        for (position, edge) in graph.edges().iter().enumerate() {
            if let (Some(&s), Some(&t)) = (index.get(edge.source()), index.get(edge.target())) {
                topology.add_edge(s, t, position);
            }
        }

        Self { graph, topology, index }
    }

    pub fn graph(&self) -> &'a Graph {
        self.graph
    }

    pub fn contains(&self, id: &Identifier) -> bool {
        self.index.contains_key(id)
    }

    pub fn kind_of(&self, id: &Identifier) -> Option<NodeKind> {
        self.graph.node(id).map(Node::kind)
    }

    /// All nodes of the given kinds, in identifier order.
    pub fn nodes_of<'s>(
        &'s self,
        kinds: &'s [NodeKind],
    ) -> impl Iterator<Item = (&'a Identifier, &'a Node)> + 's {
        self.graph.nodes().iter().filter(move |(_, node)| kinds.contains(&node.kind()))
    }

    /// All edges of one kind, with their positions, in sequence order.
    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = (usize, &'a Edge)> + '_ {
        self.graph.edges().iter().enumerate().filter(move |(_, edge)| edge.kind() == kind)
    }

    /// Edges leaving `id` whose endpoints both exist.
    pub fn outgoing(&self, id: &Identifier) -> impl Iterator<Item = (usize, &'a Edge)> + '_ {
        self.directed(id, Direction::Outgoing)
    }

    /// Edges leaving or entering `id` whose endpoints both exist. A self-loop
    /// appears twice.
    pub fn incident(&self, id: &Identifier) -> impl Iterator<Item = (usize, &'a Edge)> + '_ {
        self.directed(id, Direction::Outgoing).chain(self.directed(id, Direction::Incoming))
    }

    fn directed(
        &self,
        id: &Identifier,
        direction: Direction,
    ) -> impl Iterator<Item = (usize, &'a Edge)> + '_ {
        let edges = self.graph.edges();
        self.index
            .get(id)
            .into_iter()
            .flat_map(move |&idx| self.topology.edges_directed(idx, direction))
            .map(move |e| (*e.weight(), &edges[*e.weight()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::JsonMap;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    fn object(value: Value) -> JsonMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    fn node(kind: NodeKind, raw: Value) -> Node {
        kind.construct(object(raw)).unwrap()
    }

    fn edge(kind: EdgeKind, raw: Value) -> Edge {
        kind.construct(object(raw)).unwrap()
    }

    fn small_graph() -> Graph {
        let mut nodes = BTreeMap::new();
        nodes.insert(
            Identifier::from("db"),
            node(
                NodeKind::ProductSystem,
                json!({"node_type": "product_system", "name": "db", "license": "CC0"}),
            ),
        );
        nodes.insert(
            Identifier::from("p"),
            node(NodeKind::Process, json!({"node_type": "process", "name": "p", "location": "NO"})),
        );
        let edges = vec![
            edge(
                EdgeKind::BelongsTo,
                json!({"edge_type": "belongs_to", "source": "p", "target": "db"}),
            ),
            edge(
                EdgeKind::BelongsTo,
                json!({"edge_type": "belongs_to", "source": "p", "target": "ghost"}),
            ),
            edge(EdgeKind::Generic, json!({"edge_type": "mirrors", "source": "p", "target": "p"})),
        ];
        Graph::unchecked(nodes, edges)
    }

    #[test]
    fn test_dangling_edges_are_left_out() {
        let graph = small_graph();
        let view = GraphView::new(&graph);
        let outgoing: Vec<usize> = {
            let mut v: Vec<usize> = view.outgoing(&Identifier::from("p")).map(|(i, _)| i).collect();
            v.sort();
            v
        };
        assert_eq!(outgoing, vec![0, 2]);
        assert!(!view.contains(&Identifier::from("ghost")));
    }

    #[test]
    fn test_incident_and_kind_lookup() {
        let graph = small_graph();
        let view = GraphView::new(&graph);
        assert_eq!(view.incident(&Identifier::from("db")).count(), 1);
        assert_eq!(view.incident(&Identifier::from("p")).count(), 3);
        assert_eq!(view.kind_of(&Identifier::from("db")), Some(NodeKind::ProductSystem));
        assert_eq!(view.kind_of(&Identifier::from("ghost")), None);
        assert_eq!(view.edges_of(EdgeKind::BelongsTo).count(), 2);
        assert_eq!(view.nodes_of(&[NodeKind::Process]).count(), 1);
    }
}
