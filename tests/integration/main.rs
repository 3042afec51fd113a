//! Integration tests for Mindweave
//!
//! These tests drive the core library the way the CLI does: graphs and
//! deltas come from JSON files, edits go through a session, and results
//! are written back to disk.

use mindweave_core::{
    ChangeCause, EdgeDraft, Expansion, ExportFormat, Graph, GraphDelta, GraphError, LinkedConcept,
    NewNode, NodeDraft, NodePatch, NodeType, Priority, Session, dangling_edges, export, export_str,
    prune_dangling,
};
use std::path::Path;
use tempfile::TempDir;

const ANALYSIS: &str = r#"{
  "nodes": [
    {"id": "n1", "label": "Rust", "type": "main", "priority": "critical", "reason": "Subject"},
    {"id": "n2", "label": "Ownership", "type": "main", "priority": "critical", "reason": "Core rule"},
    {"id": "n3", "label": "Lifetimes", "type": "dependency", "priority": "optional"}
  ],
  "edges": [
    {"source": "n1", "target": "n2", "type": "implements", "reason": "Memory model"},
    {"source": "n2", "target": "n3", "type": "depends_on"}
  ],
  "summary": "Rust memory safety"
}"#;

fn write(dir: &Path, name: &str, text: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}

fn read_graph(path: &Path) -> Graph {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

/// Bootstrap from an analysis result, then grow the graph along every path.
#[test]
fn test_growth_pipeline() {
    let mut session = Session::new();
    let delta: GraphDelta = serde_json::from_str(ANALYSIS).unwrap();

    let report = session.merge_delta(delta);
    assert_eq!(report.nodes_added, 3);
    assert_eq!(report.edges_added, 2);

    let graph = session.current().unwrap();
    assert_eq!(graph.summary.as_deref(), Some("Rust memory safety"));
    assert_eq!(graph.node("n3").unwrap().node_type, NodeType::Dependency);

    let concept: LinkedConcept = serde_json::from_str(
        r#"{
  "node": {"id": "n4", "label": "C++ RAII", "type": "main"},
  "edges": [{"source": "n2", "target": "n4"}, {"source": "n1", "target": "n2"}]
}"#,
    )
    .unwrap();
    let report = session.add_linked_concept(concept).unwrap();
    assert_eq!((report.nodes_added, report.edges_added), (1, 1));
    assert_eq!(report.edges_skipped, 1);

    let expansion: Expansion = serde_json::from_str(
        r#"{
  "child_nodes": [
    {"id": "n5", "label": "Borrowing", "priority": "critical"},
    {"id": "n2", "label": "Ownership (dup)"}
  ],
  "new_edges": [{"source": "n2", "target": "n5"}]
}"#,
    )
    .unwrap();
    let report = session.add_expanded_nodes("n2", expansion).unwrap();
    assert_eq!((report.nodes_added, report.nodes_skipped), (1, 1));

    let graph = session.current().unwrap();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 4);
    assert_eq!(graph.node("n4").unwrap().node_type, NodeType::Linked);
    assert_eq!(graph.edges[2].edge_type, "relates_to");
    assert_eq!(graph.node("n2").unwrap().label, "Ownership");
    assert_eq!(graph.node("n2").unwrap().expanded, Some(true));

    let child = graph.node("n5").unwrap();
    assert_eq!(child.node_type, NodeType::Dependency);
    assert_eq!(child.parent_id.as_deref(), Some("n2"));
    assert_eq!(child.level, Some(1));
    assert_eq!(child.expandable, Some(false));
    assert_eq!(graph.edges[3].edge_type, "implements");

    // Merges alone never mark the session dirty.
    assert!(!session.is_dirty());
}

/// Load from disk, edit, write back, reload.
#[test]
fn test_snapshot_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write(dir.path(), "graph.json", ANALYSIS);

    let mut session = Session::new();
    session.load(read_graph(&path));
    let mut changes = session.subscribe();

    let added = session
        .add_node(NewNode {
            label: "Borrow checker".to_string(),
            description: Some("Static analysis pass".to_string()),
            ..NewNode::default()
        })
        .unwrap();
    assert_eq!(added.id, "n4");
    assert_eq!(added.priority, Some(Priority::Critical));
    assert_eq!(added.reason.as_deref(), Some("User added"));

    session
        .update_node(
            "n3",
            NodePatch {
                priority: Some(Priority::Critical),
                ..NodePatch::default()
            },
        )
        .unwrap();
    assert_eq!(session.delete_node("n1").unwrap(), 1);
    assert!(session.is_dirty());

    let causes: Vec<ChangeCause> = std::iter::from_fn(|| changes.try_recv().ok())
        .map(|change| change.cause)
        .collect();
    assert_eq!(
        causes,
        vec![
            ChangeCause::NodeAdded,
            ChangeCause::NodeUpdated,
            ChangeCause::NodeRemoved
        ]
    );

    let json = serde_json::to_string_pretty(session.current().unwrap()).unwrap();
    std::fs::write(&path, json).unwrap();
    session.mark_clean();

    let reloaded = read_graph(&path);
    assert_eq!(&reloaded, session.current().unwrap());
    assert!(!reloaded.contains_node("n1"));
    assert!(reloaded.node("n3").unwrap().is_critical());
    assert_eq!(reloaded.edges.len(), 1);
    assert!(reloaded.has_edge("n2", "n3"));

    // The counter restarts at the node count and skips the occupied n4.
    let mut next = Session::new();
    next.load(reloaded);
    let node = next.add_node(NewNode::labelled("Traits")).unwrap();
    assert_eq!(node.id, "n5");
    let node = next.add_node(NewNode::labelled("Generics")).unwrap();
    assert_eq!(node.id, "n6");
}

#[test]
fn test_edits_require_snapshot() {
    let mut session = Session::new();
    assert_eq!(
        session.add_node(NewNode::labelled("Orphan")).unwrap_err(),
        GraphError::NoSnapshot
    );
    assert_eq!(
        session
            .add_expanded_nodes("n1", Expansion::default())
            .unwrap_err(),
        GraphError::NoSnapshot
    );
    assert!(!session.is_loaded());
}

/// Every format renders to a file with its own extension.
#[test]
fn test_export_all_formats_to_files() {
    let dir = TempDir::new().unwrap();
    let graph: Graph = serde_json::from_str(ANALYSIS).unwrap();

    for format in ExportFormat::ALL {
        let path = dir
            .path()
            .join("graph")
            .with_extension(format.file_extension());
        std::fs::write(&path, export(&graph, format).unwrap()).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0, "{format} export is empty");
    }

    let json = read_graph(&dir.path().join("graph.json"));
    assert_eq!(json, graph);

    let markdown = std::fs::read_to_string(dir.path().join("graph.md")).unwrap();
    assert!(markdown.starts_with("# Knowledge Graph Export"));
    assert!(markdown.contains("### 🔴 Ownership"));
    assert!(markdown.contains("### 🟡 Lifetimes"));
    assert!(markdown.contains("| Rust | Ownership | implements | Memory model |"));
}

#[test]
fn test_export_mermaid_after_growth() {
    let mut session = Session::new();
    session.merge_delta(serde_json::from_str(ANALYSIS).unwrap());
    session.merge_delta(GraphDelta {
        nodes: vec![NodeDraft::new("move-semantics", "Move \"semantics\"")],
        edges: vec![EdgeDraft::new("n2", "move-semantics")],
        summary: Some("ignored".to_string()),
    });

    let graph = session.current().unwrap();
    assert_eq!(graph.summary.as_deref(), Some("Rust memory safety"));

    insta::assert_snapshot!(export_str(graph, "MERMAID").unwrap(), @r#"
    graph TD
        n1["Rust"]
        n2["Ownership"]
        n3["Lifetimes"]
        move_semantics["Move 'semantics'"]
        n1 -->|implements| n2
        n2 -->|depends on| n3
        n2 -->|depends on| move_semantics
    "#);

    assert!(export_str(graph, "svg").is_err());
}

#[test]
fn test_validate_and_prune() {
    let mut session = Session::new();
    session.merge_delta(serde_json::from_str(ANALYSIS).unwrap());
    session.merge_delta(GraphDelta {
        nodes: vec![],
        edges: vec![
            EdgeDraft::new("n3", "ghost"),
            EdgeDraft::new("phantom", "ghost"),
        ],
        summary: None,
    });

    let graph = session.current_mut().unwrap();
    assert_eq!(dangling_edges(graph).len(), 2);
    assert_eq!(prune_dangling(graph), 2);
    assert!(dangling_edges(graph).is_empty());
    assert_eq!(graph.edge_count(), 2);
}
