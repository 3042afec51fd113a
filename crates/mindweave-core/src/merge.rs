//! Folding producer deltas into the live snapshot
//!
//! All three growth paths share one dedup rule: a node whose id is already present, or an
//! edge whose `(source, target)` pair is already present, is skipped. The first occurrence
//! wins, which makes re-applying the same delta a no-op.

use crate::diff::{ChangeCause, GraphChange};
use crate::error::GraphError;
use crate::model::*;
use crate::normalize::GrowthKind;
use crate::session::Session;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// What a merge did, including the entries it dropped as duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub nodes_added: usize,
    pub nodes_skipped: usize,
    pub edges_added: usize,
    pub edges_skipped: usize,
}

impl MergeReport {
    pub fn is_noop(&self) -> bool {
        self.nodes_added == 0 && self.edges_added == 0
    }

    pub fn skipped(&self) -> usize {
        self.nodes_skipped + self.edges_skipped
    }
}

/// Append normalized nodes and edges to `graph`, skipping anything already present.
fn fold(
    graph: &mut Graph,
    kind: &GrowthKind,
    nodes: Vec<NodeDraft>,
    edges: Vec<EdgeDraft>,
    change: &mut GraphChange,
) -> MergeReport {
    let mut report = MergeReport::default();

    let mut node_ids: HashSet<String> = graph.nodes.iter().map(|n| n.id.clone()).collect();
    for draft in nodes {
        if !node_ids.insert(draft.id.clone()) {
            report.nodes_skipped += 1;
            continue;
        }
        change.added_nodes.push(draft.id.clone());
        graph.nodes.push(kind.node(draft));
        report.nodes_added += 1;
    }

    let mut edge_keys = graph.edge_keys();
    for draft in edges {
        let key = (draft.source.clone(), draft.target.clone());
        if !edge_keys.insert(key.clone()) {
            report.edges_skipped += 1;
            continue;
        }
        change.added_edges.push(key);
        graph.edges.push(kind.edge(draft));
        report.edges_added += 1;
    }

    report
}

impl Session {
    /// Generic merge. Bootstraps the snapshot from the delta when none is loaded.
    pub fn merge_delta(&mut self, delta: GraphDelta) -> MergeReport {
        let kind = GrowthKind::Generic;

        let Some(graph) = self.current_mut() else {
            let mut graph = Graph {
                nodes: Vec::new(),
                edges: Vec::new(),
                summary: delta.summary,
            };
            let mut scratch = GraphChange::new(ChangeCause::Loaded);
            let report = fold(&mut graph, &kind, delta.nodes, delta.edges, &mut scratch);
            debug!("Bootstrapped snapshot from delta: {:?}", report);
            self.load(graph);
            return report;
        };

        if graph.summary.is_none() {
            graph.summary = delta.summary;
        }

        let mut change = GraphChange::new(ChangeCause::Merged(kind.clone()));
        let report = fold(graph, &kind, delta.nodes, delta.edges, &mut change);
        self.finish_merge(change, report)
    }

    /// Linked-concept merge: the node is always typed `linked`.
    pub fn add_linked_concept(&mut self, concept: LinkedConcept) -> Result<MergeReport, GraphError> {
        let kind = GrowthKind::Linked;
        let graph = self.current_mut().ok_or(GraphError::NoSnapshot)?;

        let mut change = GraphChange::new(ChangeCause::Merged(kind.clone()));
        let report = fold(graph, &kind, vec![concept.node], concept.edges, &mut change);
        Ok(self.finish_merge(change, report))
    }

    /// Expansion merge: marks the parent expanded, then folds in its children.
    pub fn add_expanded_nodes(
        &mut self,
        parent_id: &str,
        expansion: Expansion,
    ) -> Result<MergeReport, GraphError> {
        let kind = GrowthKind::Expanded {
            parent_id: parent_id.to_string(),
        };
        let graph = self.current_mut().ok_or(GraphError::NoSnapshot)?;

        let mut change = GraphChange::new(ChangeCause::Merged(kind.clone()));
        match graph.node_mut(parent_id) {
            Some(parent) => {
                if parent.expanded != Some(true) {
                    parent.expanded = Some(true);
                    change.modified_nodes.push(parent_id.to_string());
                }
            }
            None => warn!("Expanding unknown parent node {}", parent_id),
        }

        let report = fold(
            graph,
            &kind,
            expansion.child_nodes,
            expansion.new_edges,
            &mut change,
        );
        Ok(self.finish_merge(change, report))
    }

    fn finish_merge(&mut self, change: GraphChange, report: MergeReport) -> MergeReport {
        debug!("Merge via {:?}: {:?}", change.cause, report);
        if !change.is_empty() {
            self.emit(change);
        }
        report
    }
}
