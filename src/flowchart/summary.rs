//! Structured and text summaries of an extracted graph.

use super::context::display_context;
use crate::graph::{SchedulingGraph, SharedStacks, Timestamps};
use crate::parser::schema::{EdgeSummary, FlowSummary, NodeSummary};
use crate::parser::ParsedTrace;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;

/// Convert the pipeline results to the JSON summary format
///
/// **Public** - used by commands to create the JSON output
pub fn to_summary(
    source: &str,
    parsed: &ParsedTrace,
    graph: &SchedulingGraph,
    stacks: &SharedStacks,
    timestamps: &Timestamps,
) -> FlowSummary {
    let nodes = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(slot, node)| {
            let origin = timestamps.display(slot);
            let edges = node
                .edges
                .iter()
                .map(|edge| {
                    let destination = graph
                        .slot_of(edge.target)
                        .map(|target| timestamps.display(target))
                        .unwrap_or(0.0);
                    EdgeSummary {
                        target: edge.target,
                        delay_s: destination - origin,
                        residual_stack: stacks.residual_stack(slot, edge).to_vec(),
                    }
                })
                .collect();

            NodeSummary {
                id: node.id,
                timestamp_s: timestamps.get(slot),
                shared_stack: stacks.shared_stack(slot, node).to_vec(),
                edges,
            }
        })
        .collect();

    FlowSummary {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        event_count: parsed.events.len(),
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
        truncated: parsed.truncated,
        nodes,
        generated_at: Utc::now().to_rfc3339(),
    }
}

/// Create a text summary listing the busiest schedulers
///
/// Nodes are ranked by number of outgoing edges; ties keep creation order.
pub fn generate_text_summary(summary: &FlowSummary, max_lines: usize, skip_keyword: &str) -> String {
    let mut lines = Vec::new();

    lines.push(format!("Source:   {}", summary.source));
    lines.push(format!(
        "Events:   {}    Nodes: {}    Edges: {}",
        summary.event_count, summary.node_count, summary.edge_count
    ));
    if summary.truncated {
        lines.push("Note:     node cap reached, trace was truncated".to_string());
    }
    lines.push(String::new());

    let mut ranked: Vec<&NodeSummary> = summary.nodes.iter().filter(|n| !n.edges.is_empty()).collect();
    ranked.sort_by(|a, b| b.edges.len().cmp(&a.edges.len()));

    lines.push(format!(
        "  {:>8}  {:>14}  {:>6}  {}",
        "NODE", "TIME (s)", "EDGES", "SHARED STACK"
    ));
    lines.push(format!("  {}", "-".repeat(60)));

    for node in ranked.iter().take(max_lines) {
        let time = node
            .timestamp_s
            .map(|t| format!("{:.6}", t))
            .unwrap_or_else(|| "-".to_string());
        let context = display_context(&node.shared_stack[..], skip_keyword);
        let width = context.chars().count();
        let context = if width > 40 {
            let tail: String = context.chars().skip(width - 37).collect();
            format!("...{}", tail)
        } else {
            context
        };

        lines.push(format!(
            "  {:>8}  {:>14}  {:>6}  {}",
            node.id,
            time,
            node.edges.len(),
            context
        ));
    }

    if ranked.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} scheduling nodes)",
            max_lines,
            ranked.len()
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{extract_shared_stacks, resolve_timestamps, EdgePolicy};
    use crate::parser::schema::Event;

    fn parsed(events: Vec<Event>) -> ParsedTrace {
        ParsedTrace {
            node_count: 0,
            truncated: false,
            events,
        }
    }

    fn event(ts: i64, from: u64, to: u64, stack: &[&str]) -> Event {
        Event {
            timestamp_ns: ts,
            current_id: from,
            scheduled_id: to,
            scheduled_timestamp_ns: ts * 2,
            stack: stack.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn summarize(events: Vec<Event>) -> FlowSummary {
        let parsed = parsed(events);
        let graph = SchedulingGraph::from_events(&parsed.events, EdgePolicy::LastWins);
        let stacks = extract_shared_stacks(&graph);
        let timestamps = resolve_timestamps(&graph);
        to_summary("trace.txt", &parsed, &graph, &stacks, &timestamps)
    }

    #[test]
    fn test_to_summary() {
        let summary = summarize(vec![
            event(1_000_000_000, 1, 2, &["main", "a"]),
            event(1_000_000_000, 1, 3, &["main", "b"]),
        ]);

        assert_eq!(summary.version, SCHEMA_VERSION);
        assert_eq!(summary.event_count, 2);
        assert_eq!(summary.node_count, 3);
        assert_eq!(summary.edge_count, 2);
        assert_eq!(summary.nodes[0].id, 1);
        assert_eq!(summary.nodes[0].timestamp_s, Some(1.0));
        assert_eq!(summary.nodes[0].shared_stack, vec!["main"]);
        assert_eq!(summary.nodes[0].edges[0].residual_stack, vec!["a"]);
        assert_eq!(summary.nodes[0].edges[1].delay_s, 1.0);
    }

    #[test]
    fn test_text_summary_ranks_by_out_degree() {
        let summary = summarize(vec![
            event(1, 1, 2, &["one"]),
            event(2, 5, 6, &["main", "x"]),
            event(3, 5, 7, &["main", "y"]),
        ]);

        let text = generate_text_summary(&summary, 10, "Schedule");
        let first = text.find("main").unwrap();
        let second = text.find("one").unwrap();
        assert!(first < second);
        assert!(!text.contains("Showing top"));
    }

    #[test]
    fn test_text_summary_limits_lines() {
        let summary = summarize(vec![event(1, 1, 2, &[]), event(2, 3, 4, &[])]);
        let text = generate_text_summary(&summary, 1, "Schedule");
        assert!(text.contains("(Showing top 1 of 2 scheduling nodes)"));
    }
}
