use crate::utils::config::{FlowchartConfig, DEFAULT_OUTPUT_PATH, DEFAULT_TRACE_PATH};
use std::path::PathBuf;

/// Arguments for the flowchart command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct FlowchartArgs {
    /// Simulator trace to read
    pub input: PathBuf,

    /// Output path for the DOT description
    pub output_dot: PathBuf,

    /// Output path for the JSON summary (optional)
    pub output_json: Option<PathBuf>,

    /// Reader, builder and renderer settings
    pub config: FlowchartConfig,

    /// Print text summary to stdout
    pub print_summary: bool,

    /// Number of nodes listed in the text summary
    pub summary_lines: usize,
}

impl Default for FlowchartArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_TRACE_PATH),
            output_dot: PathBuf::from(DEFAULT_OUTPUT_PATH),
            output_json: None,
            config: FlowchartConfig::default(),
            print_summary: false,
            summary_lines: 10,
        }
    }
}

/// Counts reported after a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowchartReport {
    pub event_count: usize,
    pub node_count: usize,
    pub edge_count: usize,
    pub truncated: bool,
}
