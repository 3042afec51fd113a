//! Test fixtures for Mindweave

use crate::model::*;

fn node(id: &str, label: &str, node_type: NodeType, priority: Priority, reason: &str) -> Node {
    let mut node = Node::new(id, label, node_type);
    node.priority = Some(priority);
    node.reason = Some(reason.to_string());
    node
}

fn edge(source: &str, target: &str, edge_type: &str, reason: &str) -> Edge {
    let mut edge = Edge::new(source, target, edge_type);
    edge.reason = Some(reason.to_string());
    edge
}

/// A small three-concept graph with a summary.
pub fn sample_graph() -> Graph {
    let mut react = node("n1", "React", NodeType::Main, Priority::Critical, "Core framework");
    react.description = Some("A JavaScript library for building UIs".to_string());

    let mut vdom = node(
        "n2",
        "Virtual DOM",
        NodeType::Dependency,
        Priority::Critical,
        "Core concept",
    );
    vdom.description = Some("In-memory representation of DOM".to_string());

    let jsx = node("n3", "JSX", NodeType::Dependency, Priority::Optional, "Syntax extension");

    Graph {
        nodes: vec![react, vdom, jsx],
        edges: vec![
            edge("n1", "n2", "implements", "React uses Virtual DOM"),
            edge("n1", "n3", "supports", "React supports JSX"),
        ],
        summary: Some("React framework overview".to_string()),
    }
}

/// A delta that overlaps [`sample_graph`] on one node and one edge.
pub fn overlapping_delta() -> GraphDelta {
    GraphDelta {
        nodes: vec![
            NodeDraft::new("n3", "JSX (again)"),
            NodeDraft::new("n4", "Hooks"),
        ],
        edges: vec![
            EdgeDraft::new("n1", "n3").with_type("depends_on"),
            EdgeDraft::new("n1", "n4").with_type("implements"),
        ],
        summary: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_graph_shape() {
        let graph = sample_graph();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert!(graph.has_edge("n1", "n2"));
    }
}
