//! Mindweave CLI entry point

use clap::{Parser, Subcommand};
use mindweave_core::{NewNode, NodePatch, NodeType, Priority};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::Workspace;
use config::Settings;

#[derive(Parser)]
#[command(name = "mindweave")]
#[command(about = "Grow and export concept knowledge graphs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Graph snapshot file
    #[arg(short, long, default_value = "graph.json")]
    graph: PathBuf,

    /// Settings file (defaults to ./mindweave.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the graph as mermaid, d2, json or markdown
    Export {
        /// Output format (defaults to the configured format)
        #[arg(short, long)]
        format: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fold a delta ({nodes, edges, summary?}) into the graph
    Merge { delta: PathBuf },
    /// Add a linked concept ({node, edges})
    Link { concept: PathBuf },
    /// Add the children of an expanded node ({child_nodes, new_edges})
    Expand { parent: String, expansion: PathBuf },
    /// Add a node by hand; prints the assigned id
    AddNode {
        #[arg(short, long)]
        label: String,
        #[arg(short = 't', long = "type")]
        node_type: Option<NodeType>,
        #[arg(short, long)]
        priority: Option<Priority>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        reason: Option<String>,
    },
    /// Overwrite fields of an existing node
    UpdateNode {
        id: String,
        #[arg(short, long)]
        label: Option<String>,
        #[arg(short = 't', long = "type")]
        node_type: Option<NodeType>,
        #[arg(short, long)]
        priority: Option<Priority>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        reason: Option<String>,
    },
    /// Delete a node and every edge touching it
    DeleteNode { id: String },
    /// List edges whose endpoints are missing
    Validate {
        /// Remove the dangling edges
        #[arg(long)]
        prune: bool,
    },
    /// Show version
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    // Initialize logging on stderr so exports on stdout stay clean
    let filter = if cli.verbose {
        "mindweave=debug,mindweave_core=debug".to_string()
    } else {
        settings
            .log_filter
            .clone()
            .unwrap_or_else(|| "mindweave=info,mindweave_core=info".to_string())
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Mindweave v{}", env!("CARGO_PKG_VERSION"));

    if let Commands::Version = cli.command {
        println!("Mindweave v{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut workspace = Workspace::open(&cli.graph, &settings)?;

    match cli.command {
        Commands::Export { format, output } => {
            let format = match format {
                Some(name) => name.parse()?,
                None => settings.default_format,
            };
            commands::export_graph(&workspace, format, output)
        }
        Commands::Merge { delta } => commands::merge(&mut workspace, &delta),
        Commands::Link { concept } => commands::link(&mut workspace, &concept),
        Commands::Expand { parent, expansion } => {
            commands::expand(&mut workspace, &parent, &expansion)
        }
        Commands::AddNode {
            label,
            node_type,
            priority,
            description,
            reason,
        } => commands::add_node(
            &mut workspace,
            NewNode {
                label,
                node_type,
                priority,
                description,
                reason,
            },
        ),
        Commands::UpdateNode {
            id,
            label,
            node_type,
            priority,
            description,
            reason,
        } => commands::update_node(
            &mut workspace,
            &id,
            NodePatch {
                label,
                node_type,
                priority,
                description,
                reason,
                ..Default::default()
            },
        ),
        Commands::DeleteNode { id } => commands::delete_node(&mut workspace, &id),
        Commands::Validate { prune } => commands::validate(&mut workspace, prune),
        Commands::Version => Ok(()),
    }
}
