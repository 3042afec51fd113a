//! Lookup and removal helpers over the ordered node/edge collections

use crate::model::*;
use std::collections::HashSet;

impl Graph {
    pub fn new() -> Self {
        Graph::default()
    }

    /// Get a node by id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a mutable node by id.
    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    /// Check whether an edge with this `(source, target)` pair exists, whatever its type.
    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    /// Total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Set of node ids currently present.
    pub fn node_ids(&self) -> HashSet<&str> {
        self.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    /// Set of edge keys currently present.
    pub fn edge_keys(&self) -> HashSet<EdgeKey> {
        self.edges.iter().map(Edge::key).collect()
    }

    /// Build an id -> label lookup from the node set.
    pub fn label_index(&self) -> LabelIndex<'_> {
        self.nodes
            .iter()
            .map(|n| (n.id.as_str(), n.label.as_str()))
            .collect()
    }

    /// Remove a node and every edge touching it.
    /// Returns the removed node and the removed edges, in their original order.
    pub fn remove_node(&mut self, id: &str) -> Option<(Node, Vec<Edge>)> {
        let pos = self.nodes.iter().position(|n| n.id == id)?;
        let node = self.nodes.remove(pos);

        let (removed, kept): (Vec<Edge>, Vec<Edge>) =
            std::mem::take(&mut self.edges)
                .into_iter()
                .partition(|e| e.touches(id));
        self.edges = kept;

        Some((node, removed))
    }
}
