//! Growth-path defaults applied to incoming nodes and edges

use crate::model::*;
use serde::{Deserialize, Serialize};

/// Edge type used when a generic delta leaves it out.
pub const DEFAULT_EDGE_TYPE: &str = "depends_on";
/// Edge type used for linked concepts when the producer leaves it out.
pub const LINKED_EDGE_TYPE: &str = "relates_to";
/// Edge type used for expansion edges when the producer leaves it out.
pub const EXPANSION_EDGE_TYPE: &str = "implements";

/// Which growth path a delta arrives through. Each path has its own defaulting policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowthKind {
    Generic,
    Linked,
    Expanded { parent_id: String },
}

impl GrowthKind {
    /// Turn a producer node into a snapshot node.
    pub fn node(&self, draft: NodeDraft) -> Node {
        let mut node = Node {
            id: draft.id,
            label: draft.label,
            node_type: draft.node_type.unwrap_or_default(),
            description: draft.description,
            reason: draft.reason,
            source: draft.source,
            priority: draft.priority,
            level: draft.level,
            expandable: draft.expandable,
            parent_id: draft.parent_id,
            expanded: draft.expanded,
        };

        match self {
            GrowthKind::Generic => {}
            GrowthKind::Linked => node.node_type = NodeType::Linked,
            GrowthKind::Expanded { parent_id } => {
                node.node_type = draft.node_type.unwrap_or(NodeType::Dependency);
                node.level.get_or_insert(1);
                node.expandable.get_or_insert(false);
                if node.parent_id.is_none() {
                    node.parent_id = Some(parent_id.clone());
                }
            }
        }

        node
    }

    /// Turn a producer edge into a snapshot edge.
    pub fn edge(&self, draft: EdgeDraft) -> Edge {
        Edge {
            source: draft.source,
            target: draft.target,
            edge_type: draft
                .edge_type
                .unwrap_or_else(|| self.default_edge_type().to_string()),
            reason: draft.reason,
        }
    }

    pub fn default_edge_type(&self) -> &'static str {
        match self {
            GrowthKind::Generic => DEFAULT_EDGE_TYPE,
            GrowthKind::Linked => LINKED_EDGE_TYPE,
            GrowthKind::Expanded { .. } => EXPANSION_EDGE_TYPE,
        }
    }
}
