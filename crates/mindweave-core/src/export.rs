//! Rendering a snapshot to interchange text formats
//!
//! Output of every format is deterministic for an unchanged graph: nodes and edges are
//! emitted in snapshot order and lines are joined with `\n` with no trailing newline.

use crate::error::ExportError;
use crate::model::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported export targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Mermaid,
    D2,
    Json,
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Mermaid,
        ExportFormat::D2,
        ExportFormat::Json,
        ExportFormat::Markdown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Mermaid => "mermaid",
            ExportFormat::D2 => "d2",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "markdown",
        }
    }

    /// File extension conventionally used for this format.
    pub fn file_extension(&self) -> &'static str {
        match self {
            ExportFormat::Mermaid => "mmd",
            ExportFormat::D2 => "d2",
            ExportFormat::Json => "json",
            ExportFormat::Markdown => "md",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Mermaid | ExportFormat::D2 => "text/plain",
            ExportFormat::Json => "application/json",
            ExportFormat::Markdown => "text/markdown",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExportFormat::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ExportError::UnsupportedFormat(s.to_string()))
    }
}

/// Render `graph` in the given format.
pub fn export(graph: &Graph, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Mermaid => Ok(to_mermaid(graph)),
        ExportFormat::D2 => Ok(to_d2(graph)),
        ExportFormat::Json => to_json(graph),
        ExportFormat::Markdown => Ok(to_markdown(graph)),
    }
}

/// Render `graph` in a format named by string. Unknown names fail before any rendering.
pub fn export_str(graph: &Graph, format: &str) -> Result<String, ExportError> {
    export(graph, format.parse()?)
}

/// Make a label safe inside quoted diagram labels.
pub fn sanitize_label(label: &str) -> String {
    label.replace('"', "'").replace('[', "(").replace(']', ")")
}

/// Make a node id usable as a bare diagram identifier. Only affects rendered text.
pub fn diagram_id(node_id: &str) -> String {
    node_id.replace(['-', ' '], "_")
}

fn edge_caption(edge_type: &str) -> String {
    edge_type.replace('_', " ")
}

fn to_mermaid(graph: &Graph) -> String {
    let mut lines = vec!["graph TD".to_string()];

    for node in &graph.nodes {
        lines.push(format!(
            "    {}[\"{}\"]",
            diagram_id(&node.id),
            sanitize_label(&node.label)
        ));
    }

    for edge in &graph.edges {
        lines.push(format!(
            "    {} -->|{}| {}",
            diagram_id(&edge.source),
            edge_caption(&edge.edge_type),
            diagram_id(&edge.target)
        ));
    }

    lines.join("\n")
}

fn to_d2(graph: &Graph) -> String {
    let mut lines = Vec::with_capacity(graph.node_count() + graph.edge_count() + 1);

    for node in &graph.nodes {
        lines.push(format!("{}: \"{}\"", node.id, sanitize_label(&node.label)));
    }

    lines.push(String::new());

    for edge in &graph.edges {
        lines.push(format!(
            "{} -> {}: {}",
            edge.source,
            edge.target,
            edge_caption(&edge.edge_type)
        ));
    }

    lines.join("\n")
}

fn to_json(graph: &Graph) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(graph)?)
}

fn priority_icon(node: &Node) -> &'static str {
    if node.is_critical() { "🔴" } else { "🟡" }
}

/// Empty strings count as absent.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

fn to_markdown(graph: &Graph) -> String {
    let mut lines = vec!["# Knowledge Graph Export".to_string(), String::new()];

    if let Some(summary) = non_empty(&graph.summary) {
        lines.extend(["## Summary".to_string(), String::new(), summary.to_string(), String::new()]);
    }

    lines.extend(["## Nodes".to_string(), String::new()]);
    for node in &graph.nodes {
        lines.push(format!("### {} {}", priority_icon(node), node.label));
        lines.push(String::new());

        if let Some(description) = non_empty(&node.description) {
            lines.push(format!("**Description:** {description}"));
            lines.push(String::new());
        }

        lines.push(format!("- **Type:** {}", node.node_type));
        lines.push(format!(
            "- **Priority:** {}",
            node.priority.map(|p| p.as_str()).unwrap_or_default()
        ));
        lines.push(format!("- **Reason:** {}", node.reason.as_deref().unwrap_or_default()));

        if let Some(source) = non_empty(&node.source) {
            lines.push(format!("- **Source:** {source}"));
        }

        lines.push(String::new());
    }

    let labels = graph.label_index();
    lines.extend(["## Relationships".to_string(), String::new()]);
    lines.push("| From | To | Type | Reason |".to_string());
    lines.push("|------|-----|------|--------|".to_string());

    for edge in &graph.edges {
        let from = labels.get(edge.source.as_str()).copied().unwrap_or(edge.source.as_str());
        let to = labels.get(edge.target.as_str()).copied().unwrap_or(edge.target.as_str());
        lines.push(format!(
            "| {} | {} | {} | {} |",
            from,
            to,
            edge.edge_type,
            edge.reason.as_deref().unwrap_or_default()
        ));
    }

    lines.join("\n")
}
