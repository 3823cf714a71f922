//! Assign each node its canonical simulated time.
//!
//! A node with outgoing edges takes the earliest edge timestamp. Otherwise
//! it keeps the scheduled time it was seeded with as a target, if any.

use super::builder::{Node, SchedulingGraph};
use crate::utils::config::NANOS_PER_SECOND;
use log::{debug, warn};

/// Resolved timestamps in seconds, indexed by arena slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timestamps {
    seconds: Vec<Option<f64>>,
}

impl Timestamps {
    pub fn get(&self, slot: usize) -> Option<f64> {
        self.seconds.get(slot).copied().flatten()
    }

    /// Timestamp for display, 0 when none could be derived
    pub fn display(&self, slot: usize) -> f64 {
        self.get(slot).unwrap_or(0.0)
    }

    /// Slots that ended up without any timestamp
    pub fn unresolved(&self) -> impl Iterator<Item = usize> + '_ {
        self.seconds
            .iter()
            .enumerate()
            .filter(|(_, secs)| secs.is_none())
            .map(|(slot, _)| slot)
    }
}

/// Resolve timestamps for every node of the graph
///
/// **Public** - main entry point for timestamp resolution
pub fn resolve_timestamps(graph: &SchedulingGraph) -> Timestamps {
    let seconds: Vec<Option<f64>> = graph.nodes().iter().map(resolve_node).collect();
    let timestamps = Timestamps { seconds };

    for slot in timestamps.unresolved() {
        warn!(
            "Node {} has no outgoing edges and no scheduled time; displaying 0",
            graph.nodes()[slot].id
        );
    }
    debug!("Resolved timestamps for {} nodes", graph.node_count());

    timestamps
}

/// Canonical time of a single node in seconds
pub fn resolve_node(node: &Node) -> Option<f64> {
    node.edges
        .iter()
        .map(|e| e.timestamp_ns)
        .min()
        .or(node.seed_timestamp_ns)
        .map(|ns| ns as f64 / NANOS_PER_SECOND)
}
