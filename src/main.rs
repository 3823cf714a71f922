//! Simflow CLI
//!
//! Turns a discrete-event simulator's scheduling trace into a DOT flow chart.
//! Run without arguments to read `../build/bin/trace.txt` and write
//! `flowchart_source.dot`.

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use simflow::commands::{execute_flowchart, validate_args, FlowchartArgs};
use simflow::graph::EdgePolicy;
use simflow::utils::config::{load_config, FlowchartConfig, DEFAULT_OUTPUT_PATH, DEFAULT_TRACE_PATH};

/// Simflow - scheduling flow charts from simulator stack traces
#[derive(Parser, Debug)]
#[command(name = "simflow")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Simulator trace file
    #[arg(short, long, default_value = DEFAULT_TRACE_PATH)]
    input: PathBuf,

    /// Output path for the DOT description
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// TOML configuration file
    #[arg(short, long, env = "SIMFLOW_CONFIG")]
    config: Option<PathBuf>,

    /// How repeated (source, target) pairs are handled
    #[arg(long, value_enum)]
    edge_policy: Option<EdgePolicy>,

    /// Maximum number of distinct nodes to read
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Output path for a JSON summary (optional)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print text summary to stdout
    #[arg(long)]
    summary: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Config file first, then flags on top
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => FlowchartConfig::default(),
    };
    if let Some(policy) = cli.edge_policy {
        config.graph.edge_policy = policy;
    }
    if let Some(max_nodes) = cli.max_nodes {
        config.trace.max_nodes = max_nodes;
    }

    let args = FlowchartArgs {
        input: cli.input,
        output_dot: cli.output,
        output_json: cli.json,
        config,
        print_summary: cli.summary,
        ..Default::default()
    };

    validate_args(&args)?;
    execute_flowchart(&args)?;

    println!();

    Ok(())
}
