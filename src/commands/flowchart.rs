//! Flowchart command implementation.
//!
//! The flowchart command:
//! 1. Parses the simulator trace
//! 2. Builds the scheduling graph
//! 3. Extracts shared stacks
//! 4. Resolves node timestamps
//! 5. Renders the DOT description
//! 6. Writes output files

use super::models::{FlowchartArgs, FlowchartReport};
use crate::flowchart::{generate_dot, generate_text_summary, to_summary, DotConfig};
use crate::graph::{extract_shared_stacks, resolve_timestamps, SchedulingGraph};
use crate::output::{write_dot, write_summary};
use crate::parser::read_trace_file;
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the flowchart command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Trace read or parse errors (missing marker, malformed record)
/// * File write errors
///
/// # Example
/// ```ignore
/// let args = FlowchartArgs {
///     input: PathBuf::from("trace.txt"),
///     ..Default::default()
/// };
///
/// execute_flowchart(&args)?;
/// ```
pub fn execute_flowchart(args: &FlowchartArgs) -> Result<FlowchartReport> {
    let start_time = Instant::now();
    let config = &args.config;

    info!("Building flow chart from: {}", args.input.display());

    // Step 1: Parse trace
    info!("Step 1/6: Parsing trace...");
    let parsed = read_trace_file(&args.input, &config.trace)
        .with_context(|| format!("Failed to parse trace {}", args.input.display()))?;

    // Step 2: Build graph
    info!("Step 2/6: Building scheduling graph from {} events...", parsed.events.len());
    let graph = SchedulingGraph::from_events(&parsed.events, config.graph.edge_policy);

    // Step 3: Extract shared stacks
    info!("Step 3/6: Extracting shared stacks...");
    let stacks = extract_shared_stacks(&graph);

    // Step 4: Resolve timestamps
    info!("Step 4/6: Resolving node timestamps...");
    let timestamps = resolve_timestamps(&graph);

    // Step 5: Render
    info!("Step 5/6: Rendering flow chart...");
    let dot_config = DotConfig::from(&config.render);
    let dot = generate_dot(&graph, &stacks, &timestamps, Some(&dot_config));

    // Step 6: Write outputs
    info!("Step 6/6: Writing output files...");
    write_dot(&dot, &args.output_dot).context("Failed to write flow chart")?;
    info!("✓ Flow chart written to: {}", args.output_dot.display());

    if args.output_json.is_some() || args.print_summary {
        let source = args.input.display().to_string();
        let summary = to_summary(&source, &parsed, &graph, &stacks, &timestamps);

        if let Some(json_path) = &args.output_json {
            write_summary(&summary, json_path).context("Failed to write summary JSON")?;
            info!("✓ Summary written to: {}", json_path.display());
        }

        if args.print_summary {
            println!("\n{}", "=".repeat(80));
            println!("FLOW CHART SUMMARY");
            println!("{}", "=".repeat(80));
            println!(
                "{}",
                generate_text_summary(&summary, args.summary_lines, &config.render.skip_keyword)
            );
            println!("{}", "=".repeat(80));
        }
    }

    let report = FlowchartReport {
        event_count: parsed.events.len(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        truncated: parsed.truncated,
    };
    debug!("Run report: {:?}", report);

    let elapsed = start_time.elapsed();
    info!("Flow chart completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Validate flowchart arguments
///
/// **Public** - can be called before execute_flowchart for early validation
pub fn validate_args(args: &FlowchartArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input trace path cannot be empty");
    }

    if args.output_dot.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    if args.output_dot == args.input {
        anyhow::bail!("Output path would overwrite the input trace");
    }

    if args.output_json.as_ref() == Some(&args.output_dot) {
        anyhow::bail!("JSON summary and flow chart cannot share a path");
    }

    if args.summary_lines == 0 {
        anyhow::bail!("summary_lines must be greater than 0");
    }

    args.config.validate().context("Invalid configuration")?;

    Ok(())
}
