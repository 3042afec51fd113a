//! Interactive edits to the snapshot. Every successful edit marks the session dirty.

use crate::diff::{ChangeCause, GraphChange};
use crate::error::GraphError;
use crate::model::*;
use crate::session::Session;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reason recorded on nodes added by hand when the caller gives none.
pub const USER_ADDED_REASON: &str = "User added";

/// Fields for a node created by hand. The id is assigned by the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewNode {
    pub label: String,
    #[serde(default, rename = "type")]
    pub node_type: Option<NodeType>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl NewNode {
    pub fn labelled(label: impl Into<String>) -> Self {
        NewNode {
            label: label.into(),
            ..Default::default()
        }
    }
}

/// A shallow patch: every set field overwrites the node's field, unset fields are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodePatch {
    pub label: Option<String>,
    #[serde(rename = "type")]
    pub node_type: Option<NodeType>,
    pub description: Option<String>,
    pub reason: Option<String>,
    pub source: Option<String>,
    pub priority: Option<Priority>,
    pub level: Option<u32>,
    pub expandable: Option<bool>,
    #[serde(alias = "parent_id")]
    pub parent_id: Option<String>,
    pub expanded: Option<bool>,
}

impl NodePatch {
    pub fn is_empty(&self) -> bool {
        *self == NodePatch::default()
    }

    fn apply(self, node: &mut Node) {
        if let Some(label) = self.label {
            node.label = label;
        }
        if let Some(node_type) = self.node_type {
            node.node_type = node_type;
        }
        if self.description.is_some() {
            node.description = self.description;
        }
        if self.reason.is_some() {
            node.reason = self.reason;
        }
        if self.source.is_some() {
            node.source = self.source;
        }
        if self.priority.is_some() {
            node.priority = self.priority;
        }
        if self.level.is_some() {
            node.level = self.level;
        }
        if self.expandable.is_some() {
            node.expandable = self.expandable;
        }
        if self.parent_id.is_some() {
            node.parent_id = self.parent_id;
        }
        if self.expanded.is_some() {
            node.expanded = self.expanded;
        }
    }
}

impl Session {
    /// Append a hand-made node with a fresh `n{k}` id.
    pub fn add_node(&mut self, data: NewNode) -> Result<Node, GraphError> {
        if !self.is_loaded() {
            return Err(GraphError::NoSnapshot);
        }
        let id = self.next_node_id();

        let mut node = Node::new(id, data.label, data.node_type.unwrap_or(NodeType::Main));
        node.priority = Some(data.priority.unwrap_or(Priority::Critical));
        node.reason = Some(data.reason.unwrap_or_else(|| USER_ADDED_REASON.to_string()));
        node.description = data.description;

        let graph = self.current_mut().ok_or(GraphError::NoSnapshot)?;
        graph.nodes.push(node.clone());
        debug!("Added node {} ({})", node.id, node.label);

        let mut change = GraphChange::new(ChangeCause::NodeAdded);
        change.added_nodes.push(node.id.clone());
        self.mark_dirty();
        self.emit(change);
        Ok(node)
    }

    /// Overwrite the patched fields of node `id` in place.
    pub fn update_node(&mut self, id: &str, patch: NodePatch) -> Result<(), GraphError> {
        let graph = self.current_mut().ok_or(GraphError::NoSnapshot)?;
        let node = graph
            .node_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        patch.apply(node);
        debug!("Updated node {}", id);

        let mut change = GraphChange::new(ChangeCause::NodeUpdated);
        change.modified_nodes.push(id.to_string());
        self.mark_dirty();
        self.emit(change);
        Ok(())
    }

    /// Remove node `id` and every edge that starts or ends at it.
    /// Returns the number of edges removed along with the node.
    pub fn delete_node(&mut self, id: &str) -> Result<usize, GraphError> {
        let graph = self.current_mut().ok_or(GraphError::NoSnapshot)?;
        let (_, removed_edges) = graph
            .remove_node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        debug!("Deleted node {} and {} edges", id, removed_edges.len());

        let mut change = GraphChange::new(ChangeCause::NodeRemoved);
        change.removed_nodes.push(id.to_string());
        change.removed_edges = removed_edges.iter().map(Edge::key).collect();
        self.mark_dirty();
        self.emit(change);
        Ok(removed_edges.len())
    }
}
