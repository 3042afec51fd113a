//! Change events broadcast after every merge or mutation

use crate::model::EdgeKey;
use crate::normalize::GrowthKind;
use serde::{Deserialize, Serialize};

/// What caused a change to the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeCause {
    /// A whole graph replaced the snapshot.
    Loaded,
    /// A delta was folded in along one of the growth paths.
    Merged(GrowthKind),
    NodeAdded,
    NodeUpdated,
    NodeRemoved,
    /// The snapshot was dropped.
    Reset,
}

/// Represents a change to the graph that the renderer should lay out again for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphChange {
    /// Monotonically increasing change sequence number.
    pub sequence: u64,
    pub cause: ChangeCause,
    /// Node ids added in this update.
    pub added_nodes: Vec<String>,
    /// Node ids removed in this update.
    pub removed_nodes: Vec<String>,
    /// Edges added in this update.
    pub added_edges: Vec<EdgeKey>,
    /// Edges removed in this update.
    pub removed_edges: Vec<EdgeKey>,
    /// Nodes whose attributes changed in place.
    pub modified_nodes: Vec<String>,
}

impl GraphChange {
    /// Create an empty change with the given cause. The sequence is stamped on emit.
    pub fn new(cause: ChangeCause) -> Self {
        GraphChange {
            sequence: 0,
            cause,
            added_nodes: Vec::new(),
            removed_nodes: Vec::new(),
            added_edges: Vec::new(),
            removed_edges: Vec::new(),
            modified_nodes: Vec::new(),
        }
    }

    /// Check if this change is empty (nothing added, removed or modified).
    pub fn is_empty(&self) -> bool {
        self.added_nodes.is_empty()
            && self.removed_nodes.is_empty()
            && self.added_edges.is_empty()
            && self.removed_edges.is_empty()
            && self.modified_nodes.is_empty()
    }
}
