//! CLI command implementations

use anyhow::Context;
use mindweave_core::{
    Expansion, ExportFormat, Graph, GraphDelta, LinkedConcept, NewNode, NodePatch, Session,
    dangling_edges, export, prune_dangling,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::config::Settings;

/// A session bound to the graph file it was loaded from.
pub struct Workspace {
    pub path: PathBuf,
    pub session: Session,
    changes: broadcast::Receiver<mindweave_core::GraphChange>,
}

impl Workspace {
    /// Open `path`. A missing file leaves the session unloaded so a merge can bootstrap it.
    pub fn open(path: &Path, settings: &Settings) -> anyhow::Result<Self> {
        let mut session = Session::with_change_buffer(settings.change_buffer);
        let changes = session.subscribe();

        if path.exists() {
            let graph: Graph = read_json(path)?;
            session.load(graph);
        } else {
            tracing::info!("No graph at {}, starting empty", path.display());
        }

        let mut workspace = Workspace {
            path: path.to_path_buf(),
            session,
            changes,
        };
        // The load itself is not a change worth writing back.
        workspace.drain_changes();
        Ok(workspace)
    }

    fn graph(&self) -> anyhow::Result<&Graph> {
        self.session
            .current()
            .with_context(|| format!("No graph loaded from {}", self.path.display()))
    }

    /// Log pending change events and report how many there were, including any the
    /// receiver lagged past.
    fn drain_changes(&mut self) -> usize {
        let mut count = 0;
        loop {
            match self.changes.try_recv() {
                Ok(change) => {
                    tracing::debug!(
                        "Change #{} {:?}: +{} nodes, -{} nodes, +{} edges, -{} edges, ~{} nodes",
                        change.sequence,
                        change.cause,
                        change.added_nodes.len(),
                        change.removed_nodes.len(),
                        change.added_edges.len(),
                        change.removed_edges.len(),
                        change.modified_nodes.len()
                    );
                    count += 1;
                }
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::warn!("Change channel lagged, {} events dropped", missed);
                    count += usize::try_from(missed).unwrap_or(usize::MAX);
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        count
    }

    /// Write the snapshot back if anything changed since it was opened, then mark it clean.
    pub fn save_if_changed(&mut self) -> anyhow::Result<bool> {
        let changed = self.drain_changes() > 0 || self.session.is_dirty();
        if !changed {
            tracing::info!("Graph unchanged, nothing written");
            return Ok(false);
        }

        let json = serde_json::to_string_pretty(self.graph()?)?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Cannot write graph {}", self.path.display()))?;
        self.session.mark_clean();
        tracing::info!("Saved graph to {}", self.path.display());
        Ok(true)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

pub fn export_graph(
    workspace: &Workspace,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = export(workspace.graph()?, format)?;

    match output {
        Some(mut path) => {
            if path.extension().is_none() {
                path.set_extension(format.file_extension());
            }
            std::fs::write(&path, text)
                .with_context(|| format!("Cannot write {}", path.display()))?;
            tracing::info!("Exported {} ({}) to {}", format, format.mime_type(), path.display());
        }
        None => println!("{text}"),
    }
    Ok(())
}

pub fn merge(workspace: &mut Workspace, delta: &Path) -> anyhow::Result<()> {
    let delta: GraphDelta = read_json(delta)?;
    let had_summary = workspace
        .session
        .current()
        .is_some_and(|graph| graph.summary.is_some());
    let report = workspace.session.merge_delta(delta);

    // Adopting a summary alone emits no change event.
    if workspace.session.is_loaded() && !had_summary {
        let adopted = workspace
            .session
            .current()
            .is_some_and(|graph| graph.summary.is_some());
        if adopted {
            workspace.session.mark_dirty();
        }
    }
    tracing::info!(
        "Merged {} nodes, {} edges ({} duplicates skipped)",
        report.nodes_added,
        report.edges_added,
        report.skipped()
    );
    workspace.save_if_changed()?;
    Ok(())
}

pub fn link(workspace: &mut Workspace, concept: &Path) -> anyhow::Result<()> {
    let concept: LinkedConcept = read_json(concept)?;
    let report = workspace.session.add_linked_concept(concept)?;
    tracing::info!(
        "Linked {} nodes, {} edges ({} duplicates skipped)",
        report.nodes_added,
        report.edges_added,
        report.skipped()
    );
    workspace.save_if_changed()?;
    Ok(())
}

pub fn expand(workspace: &mut Workspace, parent: &str, expansion: &Path) -> anyhow::Result<()> {
    let expansion: Expansion = read_json(expansion)?;
    let report = workspace.session.add_expanded_nodes(parent, expansion)?;
    tracing::info!(
        "Expanded {}: {} nodes, {} edges ({} duplicates skipped)",
        parent,
        report.nodes_added,
        report.edges_added,
        report.skipped()
    );
    workspace.save_if_changed()?;
    Ok(())
}

pub fn add_node(workspace: &mut Workspace, data: NewNode) -> anyhow::Result<()> {
    let node = workspace.session.add_node(data)?;
    println!("{}", node.id);
    workspace.save_if_changed()?;
    Ok(())
}

pub fn update_node(workspace: &mut Workspace, id: &str, patch: NodePatch) -> anyhow::Result<()> {
    if patch.is_empty() {
        anyhow::bail!("Nothing to update for node {}", id);
    }
    workspace.session.update_node(id, patch)?;
    workspace.save_if_changed()?;
    Ok(())
}

pub fn delete_node(workspace: &mut Workspace, id: &str) -> anyhow::Result<()> {
    let edges = workspace.session.delete_node(id)?;
    tracing::info!("Deleted node {} and {} edges", id, edges);
    workspace.save_if_changed()?;
    Ok(())
}

pub fn validate(workspace: &mut Workspace, prune: bool) -> anyhow::Result<()> {
    let dangling = dangling_edges(workspace.graph()?);
    for d in &dangling {
        println!("{} -> {} ({:?} missing)", d.source, d.target, d.missing);
    }

    if !prune || dangling.is_empty() {
        tracing::info!("{} dangling edges", dangling.len());
        return Ok(());
    }

    let graph = workspace
        .session
        .current_mut()
        .context("No graph loaded")?;
    let removed = prune_dangling(graph);
    workspace.session.mark_dirty();
    tracing::info!("Pruned {} dangling edges", removed);
    workspace.save_if_changed()?;
    Ok(())
}
