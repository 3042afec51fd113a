//! Optional check of edge endpoints against the node set
//!
//! Merges never call this; dangling edges are a legal state until a caller asks.

use crate::model::*;
use serde::Serialize;
use tracing::warn;

/// Which end of an edge points at a missing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingEndpoint {
    Source,
    Target,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingEdge {
    /// Position of the edge in the snapshot's edge list.
    pub index: usize,
    pub source: String,
    pub target: String,
    pub missing: MissingEndpoint,
}

/// Find every edge with at least one endpoint missing from the node set.
pub fn dangling_edges(graph: &Graph) -> Vec<DanglingEdge> {
    let ids = graph.node_ids();

    graph
        .edges
        .iter()
        .enumerate()
        .filter_map(|(index, edge)| {
            let missing = match (
                ids.contains(edge.source.as_str()),
                ids.contains(edge.target.as_str()),
            ) {
                (true, true) => return None,
                (false, true) => MissingEndpoint::Source,
                (true, false) => MissingEndpoint::Target,
                (false, false) => MissingEndpoint::Both,
            };
            Some(DanglingEdge {
                index,
                source: edge.source.clone(),
                target: edge.target.clone(),
                missing,
            })
        })
        .collect()
}

/// Remove dangling edges. Returns how many were removed.
pub fn prune_dangling(graph: &mut Graph) -> usize {
    let dangling = dangling_edges(graph);
    for d in &dangling {
        warn!("Pruning dangling edge {} -> {} ({:?} missing)", d.source, d.target, d.missing);
    }

    let ids: std::collections::HashSet<String> =
        graph.nodes.iter().map(|n| n.id.clone()).collect();
    let before = graph.edges.len();
    graph
        .edges
        .retain(|e| ids.contains(&e.source) && ids.contains(&e.target));
    before - graph.edges.len()
}
