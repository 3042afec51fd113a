//! The live snapshot, its dirty flag and the change signal

use crate::diff::{ChangeCause, GraphChange};
use crate::model::Graph;
use tokio::sync::broadcast;
use tracing::{debug, info};

/// Default capacity of the change channel.
pub const DEFAULT_CHANGE_BUFFER: usize = 64;

/// Owns the single live snapshot.
///
/// Every merge, mutation and export takes the session explicitly; there is no global graph.
pub struct Session {
    snapshot: Option<Graph>,
    dirty: bool,
    /// Last counter value handed out as `n{counter}`.
    id_counter: u64,
    sequence: u64,
    change_tx: broadcast::Sender<GraphChange>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("loaded", &self.snapshot.is_some())
            .field("dirty", &self.dirty)
            .field("id_counter", &self.id_counter)
            .field("sequence", &self.sequence)
            .finish()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_change_buffer(DEFAULT_CHANGE_BUFFER)
    }

    /// Create a session whose change channel holds `capacity` unread events per subscriber.
    pub fn with_change_buffer(capacity: usize) -> Self {
        let (change_tx, _) = broadcast::channel(capacity.max(1));
        Session {
            snapshot: None,
            dirty: false,
            id_counter: 0,
            sequence: 0,
            change_tx,
        }
    }

    /// Replace the snapshot wholesale and clear the dirty flag.
    pub fn load(&mut self, graph: Graph) {
        info!(
            "Loaded graph snapshot: {} nodes, {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        self.id_counter = graph.node_count() as u64;

        let mut change = GraphChange::new(ChangeCause::Loaded);
        change.added_nodes = graph.nodes.iter().map(|n| n.id.clone()).collect();
        change.added_edges = graph.edges.iter().map(|e| e.key()).collect();

        self.snapshot = Some(graph);
        self.dirty = false;
        self.emit(change);
    }

    /// Drop the snapshot.
    pub fn reset(&mut self) {
        info!("Session reset");
        self.snapshot = None;
        self.dirty = false;
        self.id_counter = 0;
        self.emit(GraphChange::new(ChangeCause::Reset));
    }

    /// The live snapshot, if one is loaded.
    pub fn current(&self) -> Option<&Graph> {
        self.snapshot.as_ref()
    }

    pub fn current_mut(&mut self) -> Option<&mut Graph> {
        self.snapshot.as_mut()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Subscribe to change events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<GraphChange> {
        self.change_tx.subscribe()
    }

    /// Get current change sequence number.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Next free `n{counter}` id. The counter only moves forward, so ids freed by
    /// deletion are never reissued; ids claimed by merges are skipped.
    pub(crate) fn next_node_id(&mut self) -> String {
        loop {
            self.id_counter += 1;
            let candidate = format!("n{}", self.id_counter);
            let taken = self
                .snapshot
                .as_ref()
                .is_some_and(|g| g.contains_node(&candidate));
            if !taken {
                return candidate;
            }
        }
    }

    /// Stamp and broadcast a change. Returns the stamped sequence number.
    pub(crate) fn emit(&mut self, mut change: GraphChange) -> u64 {
        self.sequence += 1;
        change.sequence = self.sequence;
        debug!("Graph change #{}: {:?}", change.sequence, change.cause);
        // No subscribers is not an error for a one-way signal.
        let _ = self.change_tx.send(change);
        self.sequence
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
