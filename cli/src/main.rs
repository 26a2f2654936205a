//! Graphwork CLI
//!
//! # Usage
//!
//! ```bash
//! # Havel-Hakimi on an explicit sequence
//! graphwork havel-hakimi 4 3 2 2 1 1 1 1 1
//!
//! # Degree sequence of an undirected edge list
//! graphwork degrees --nodes 4 0:1 1:2 2:3
//!
//! # Tarjan SCC
//! graphwork scc --nodes 4 0:1 1:2 2:0 2:3
//!
//! # Edmonds-Karp max flow, edges as from:to:capacity
//! graphwork --json max-flow --nodes 4 --source 0 --sink 3 0:1:3 0:2:2 1:3:2 2:3:3
//! ```
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use graphwork_core::algorithm::graph::degree_sequence::degree_sequence_of;
use graphwork_core::algorithm::graph::max_flow::FlowInput;
use graphwork_core::data_structures::graph::{CapacitatedEdge, EdgeList};
use graphwork_core::{Toolkit, ToolkitConfig};
use log::{debug, error, info};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "graphwork")]
#[command(version, about = "Classical graph algorithms with step-by-step traces", long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether a sequence is graphical (Havel-Hakimi)
    HavelHakimi {
        /// Degree sequence
        #[arg(allow_negative_numbers = true, required = true)]
        sequence: Vec<i64>,
    },

    /// Degree sequence of an undirected simple graph, then Havel-Hakimi on it
    Degrees {
        /// Number of nodes
        #[arg(short, long)]
        nodes: usize,

        /// Undirected edges as u:v
        #[arg(value_parser = parse_edge)]
        edges: Vec<(usize, usize)>,
    },

    /// Strongly connected components (Tarjan)
    Scc {
        /// Number of nodes
        #[arg(short, long)]
        nodes: usize,

        /// Directed edges as u:v
        #[arg(value_parser = parse_edge)]
        edges: Vec<(usize, usize)>,
    },

    /// Maximum flow (Edmonds-Karp)
    MaxFlow {
        /// Number of nodes
        #[arg(short, long)]
        nodes: usize,

        /// Source node
        #[arg(short, long)]
        source: usize,

        /// Sink node
        #[arg(short = 't', long)]
        sink: usize,

        /// Directed edges as u:v:capacity
        #[arg(value_parser = parse_capacitated_edge)]
        edges: Vec<CapacitatedEdge>,
    },
}

fn parse_node(token: &str) -> Result<usize, String> {
    token
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a node id", token))
}

fn parse_edge(s: &str) -> Result<(usize, usize), String> {
    match s.split(':').collect::<Vec<_>>().as_slice() {
        [from, to] => Ok((parse_node(from)?, parse_node(to)?)),
        _ => Err(format!("expected u:v, got '{}'", s)),
    }
}

fn parse_capacitated_edge(s: &str) -> Result<CapacitatedEdge, String> {
    match s.split(':').collect::<Vec<_>>().as_slice() {
        [from, to, capacity] => {
            let capacity = capacity
                .trim()
                .parse::<i64>()
                .map_err(|_| format!("'{}' is not an integer capacity", capacity))?;
            Ok(CapacitatedEdge::new(parse_node(from)?, parse_node(to)?, capacity))
        }
        _ => Err(format!("expected u:v:capacity, got '{}'", s)),
    }
}

fn emit<T: Serialize + std::fmt::Display>(value: &T, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", value);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let toolkit = match &cli.config {
        Some(path) => {
            debug!("Loading configuration from {}", path.display());
            Toolkit::from_path(path)?
        }
        None => Toolkit::new(ToolkitConfig::default()),
    };

    match cli.command {
        Commands::HavelHakimi { sequence } => {
            let report = toolkit.validate_degree_sequence(sequence)?;
            emit(&report, cli.json)?;
        }
        Commands::Degrees { nodes, edges } => {
            let sequence = degree_sequence_of(nodes, &edges)?;
            info!("Degree sequence: {:?}", sequence);
            let report = toolkit.validate_degree_sequence(sequence)?;
            emit(&report, cli.json)?;
        }
        Commands::Scc { nodes, edges } => {
            let decomposition = toolkit.decompose_scc(&EdgeList::new(nodes, edges))?;
            emit(&decomposition, cli.json)?;
        }
        Commands::MaxFlow {
            nodes,
            source,
            sink,
            edges,
        } => {
            let result = toolkit.compute_max_flow(&FlowInput::new(nodes, edges, source, sink))?;
            emit(&result, cli.json)?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
