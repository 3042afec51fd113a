//! Core data structures for the knowledge graph

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseValueError;

/// What role a concept plays in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A concept extracted directly from the analysed material.
    #[default]
    Main,
    /// A prerequisite or sub-concept, usually produced by expansion.
    Dependency,
    /// A concept linked in from outside the original material.
    Linked,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Main => "main",
            NodeType::Dependency => "dependency",
            NodeType::Linked => "linked",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(NodeType::Main),
            "dependency" => Ok(NodeType::Dependency),
            "linked" => Ok(NodeType::Linked),
            _ => Err(ParseValueError {
                field: "node type",
                value: s.to_string(),
            }),
        }
    }
}

/// How important a concept is to the material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    Optional,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::Optional => "optional",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "optional" => Ok(Priority::Optional),
            _ => Err(ParseValueError {
                field: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// A single concept in the graph. `id` is the sole identity key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expandable: Option<bool>,
    #[serde(default, alias = "parent_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
}

impl Node {
    /// A bare node with only the required fields set.
    pub fn new(id: impl Into<String>, label: impl Into<String>, node_type: NodeType) -> Self {
        Node {
            id: id.into(),
            label: label.into(),
            node_type,
            description: None,
            reason: None,
            source: None,
            priority: None,
            level: None,
            expandable: None,
            parent_id: None,
            expanded: None,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.priority == Some(Priority::Critical)
    }
}

/// Identity of an edge: the ordered `(source, target)` pair.
pub type EdgeKey = (String, String);

/// A directed relationship between two concepts.
///
/// Endpoints are not checked against the node set; a dangling edge is legal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    /// Free-form relationship label such as `implements` or `depends_on`.
    #[serde(rename = "type")]
    pub edge_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        edge_type: impl Into<String>,
    ) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            edge_type: edge_type.into(),
            reason: None,
        }
    }

    pub fn key(&self) -> EdgeKey {
        (self.source.clone(), self.target.clone())
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

/// The snapshot payload: ordered nodes, ordered edges and an optional summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Graph {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// A node as delivered by a producer, before growth-path defaults are applied.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDraft {
    pub id: String,
    pub label: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expandable: Option<bool>,
    #[serde(default, alias = "parent_id", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<bool>,
}

impl NodeDraft {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        NodeDraft {
            id: id.into(),
            label: label.into(),
            node_type: None,
            description: None,
            reason: None,
            source: None,
            priority: None,
            level: None,
            expandable: None,
            parent_id: None,
            expanded: None,
        }
    }
}

impl From<Node> for NodeDraft {
    fn from(node: Node) -> Self {
        NodeDraft {
            id: node.id,
            label: node.label,
            node_type: Some(node.node_type),
            description: node.description,
            reason: node.reason,
            source: node.source,
            priority: node.priority,
            level: node.level,
            expandable: node.expandable,
            parent_id: node.parent_id,
            expanded: node.expanded,
        }
    }
}

/// An edge as delivered by a producer; `type` may be missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeDraft {
    pub source: String,
    pub target: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub edge_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl EdgeDraft {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        EdgeDraft {
            source: source.into(),
            target: target.into(),
            edge_type: None,
            reason: None,
        }
    }

    pub fn with_type(mut self, edge_type: impl Into<String>) -> Self {
        self.edge_type = Some(edge_type.into());
        self
    }
}

impl From<Edge> for EdgeDraft {
    fn from(edge: Edge) -> Self {
        EdgeDraft {
            source: edge.source,
            target: edge.target,
            edge_type: Some(edge.edge_type),
            reason: edge.reason,
        }
    }
}

/// A full analysis result or a partial graph to fold into the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GraphDelta {
    #[serde(default)]
    pub nodes: Vec<NodeDraft>,
    #[serde(default)]
    pub edges: Vec<EdgeDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl From<Graph> for GraphDelta {
    fn from(graph: Graph) -> Self {
        GraphDelta {
            nodes: graph.nodes.into_iter().map(NodeDraft::from).collect(),
            edges: graph.edges.into_iter().map(EdgeDraft::from).collect(),
            summary: graph.summary,
        }
    }
}

/// A single new concept plus the edges relating it to existing nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkedConcept {
    pub node: NodeDraft,
    #[serde(default)]
    pub edges: Vec<EdgeDraft>,
}

/// Children produced by expanding one node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Expansion {
    #[serde(default)]
    pub child_nodes: Vec<NodeDraft>,
    #[serde(default)]
    pub new_edges: Vec<EdgeDraft>,
}

/// Label lookup used when rendering edges by their endpoints' labels.
pub type LabelIndex<'a> = HashMap<&'a str, &'a str>;
