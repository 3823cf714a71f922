//! DOT flow chart generation.
//!
//! Produces a textual digraph for an external layout tool:
//!
//! ```text
//! digraph sim {
//! 7 [label="Timestamp=0.000000s, Shared Stack=dispatch"];
//! 9 [label="Timestamp=0.000000s, Shared Stack="];
//! 7 -> 9 [label="Delay=0.000000, Stack=main"];
//! }
//! ```
//!
//! Node statements come first, in node creation order, then edge statements
//! grouped by source node.

use super::context::{display_context, escape_label};
use crate::graph::{SchedulingGraph, SharedStacks, Timestamps};
use crate::utils::config::{RenderSettings, DEFAULT_GRAPH_NAME, DEFAULT_SKIP_KEYWORD};
use log::info;

/// DOT rendering configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DotConfig {
    pub graph_name: String,
    pub skip_keyword: String,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            skip_keyword: DEFAULT_SKIP_KEYWORD.to_string(),
        }
    }
}

impl DotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = name.into();
        self
    }

    pub fn with_skip_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.skip_keyword = keyword.into();
        self
    }
}

impl From<&RenderSettings> for DotConfig {
    fn from(settings: &RenderSettings) -> Self {
        Self::new()
            .with_graph_name(settings.graph_name.clone())
            .with_skip_keyword(settings.skip_keyword.clone())
    }
}

/// Generate the DOT description of an extracted graph
///
/// **Public** - main entry point for rendering
///
/// # Arguments
/// * `graph` - Graph from the builder
/// * `stacks` - Shared stacks extracted from `graph`
/// * `timestamps` - Timestamps resolved for `graph`
/// * `config` - Rendering options (defaults if `None`)
pub fn generate_dot(
    graph: &SchedulingGraph,
    stacks: &SharedStacks,
    timestamps: &Timestamps,
    config: Option<&DotConfig>,
) -> String {
    let config = config.cloned().unwrap_or_default();

    let node_lines: Vec<String> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(slot, node)| {
            let context = display_context(stacks.shared_stack(slot, node), &config.skip_keyword);
            format!(
                "{} [label=\"Timestamp={:.6}s, Shared Stack={}\"];",
                node.id,
                timestamps.display(slot),
                escape_label(&context)
            )
        })
        .collect();

    let mut edge_lines = Vec::with_capacity(graph.edge_count());
    for (slot, node) in graph.nodes().iter().enumerate() {
        let origin = timestamps.display(slot);

        for edge in &node.edges {
            let destination = graph
                .slot_of(edge.target)
                .map(|target| timestamps.display(target))
                .unwrap_or(0.0);
            let context =
                display_context(stacks.residual_stack(slot, edge), &config.skip_keyword);

            edge_lines.push(format!(
                "{} -> {} [label=\"Delay={:.6}, Stack={}\"];",
                node.id,
                edge.target,
                destination - origin,
                escape_label(&context)
            ));
        }
    }

    let dot = format!(
        "digraph {} {{\n{}\n{}\n}}\n",
        config.graph_name,
        node_lines.join("\n"),
        edge_lines.join("\n")
    );

    info!(
        "Flow chart generated: {} nodes, {} edges ({} bytes)",
        node_lines.len(),
        edge_lines.len(),
        dot.len()
    );

    dot
}
