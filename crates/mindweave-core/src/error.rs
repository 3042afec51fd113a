//! Error types for graph operations and export

use thiserror::Error;

/// Failures reported by merge and mutation operations.
///
/// None of these are fatal; the snapshot is left unchanged when one is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("no graph snapshot is loaded")]
    NoSnapshot,

    #[error("node not found: {0}")]
    NodeNotFound(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string that does not name a variant of one of the model enums.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {field}: {value}")]
pub struct ParseValueError {
    pub field: &'static str,
    pub value: String,
}
