//! Mindweave Core: knowledge graph model, merge engine, edits and exporters

pub mod diff;
pub mod error;
pub mod export;
pub mod graph;
pub mod merge;
pub mod model;
pub mod mutation;
pub mod normalize;
pub mod session;
pub mod validate;


#[cfg(test)]
pub mod test_utils;

pub use diff::{ChangeCause, GraphChange};
pub use error::{ExportError, GraphError, ParseValueError};
pub use export::{ExportFormat, diagram_id, export, export_str, sanitize_label};
pub use merge::MergeReport;
pub use model::{
    Edge, EdgeDraft, EdgeKey, Expansion, Graph, GraphDelta, LinkedConcept, Node, NodeDraft,
    NodeType, Priority,
};
pub use mutation::{NewNode, NodePatch};
pub use normalize::GrowthKind;
pub use session::Session;
pub use validate::{DanglingEdge, MissingEndpoint, dangling_edges, prune_dangling};
