//! Fold parsed events into a directed scheduling graph.
//!
//! Nodes live in an arena in creation order; a side index maps node ids to
//! arena slots. A node is created the first time its id is referenced,
//! either as a source or as a scheduled target.

use crate::parser::schema::{Event, NodeId};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What to do when the same (source, target) pair is scheduled again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EdgePolicy {
    /// Replace the earlier edge, keeping its position
    #[default]
    LastWins,
    /// Keep every edge in trace order
    KeepAll,
}

/// A scheduling relationship owned by its source node
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: NodeId,

    /// When the scheduling happened
    pub timestamp_ns: i64,

    /// Call stack at the scheduling point, root first
    pub stack: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,

    /// Outgoing edges in insertion order
    pub edges: Vec<Edge>,

    /// Scheduled time recorded when the node was first seen as a target
    pub seed_timestamp_ns: Option<i64>,
}

impl Node {
    fn new(id: NodeId, seed_timestamp_ns: Option<i64>) -> Self {
        Self {
            id,
            edges: Vec::new(),
            seed_timestamp_ns,
        }
    }
}

/// Scheduling graph built from a trace
#[derive(Debug, Clone, Default)]
pub struct SchedulingGraph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    policy: EdgePolicy,
    overwritten: usize,
}

impl SchedulingGraph {
    pub fn new(policy: EdgePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Build a graph from events in trace order
    ///
    /// **Public** - main entry point for graph construction
    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>, policy: EdgePolicy) -> Self {
        let mut graph = Self::new(policy);
        for event in events {
            graph.add_event(event);
        }

        debug!(
            "Built graph with {} nodes and {} edges",
            graph.node_count(),
            graph.edge_count()
        );
        if graph.overwritten > 0 {
            warn!(
                "{} scheduling edges were replaced by a later event for the same pair",
                graph.overwritten
            );
        }

        graph
    }

    /// Install the edge described by `event`
    ///
    /// Creates the source node and, if new, the target node seeded with the
    /// event's scheduled time.
    pub fn add_event(&mut self, event: &Event) {
        let source = self.get_or_insert(event.current_id, None);
        self.get_or_insert(event.scheduled_id, Some(event.scheduled_timestamp_ns));

        let edge = Edge {
            target: event.scheduled_id,
            timestamp_ns: event.timestamp_ns,
            stack: event.stack.clone(),
        };

        let edges = &mut self.nodes[source].edges;
        match self.policy {
            EdgePolicy::LastWins => {
                if let Some(existing) = edges.iter_mut().find(|e| e.target == edge.target) {
                    debug!(
                        "Replacing edge {} -> {} (t={}ns) with t={}ns",
                        event.current_id, edge.target, existing.timestamp_ns, edge.timestamp_ns
                    );
                    *existing = edge;
                    self.overwritten += 1;
                } else {
                    edges.push(edge);
                }
            }
            EdgePolicy::KeepAll => edges.push(edge),
        }
    }

    /// Arena slot of `id`, creating the node if absent
    ///
    /// The seed is only applied when the node is created here.
    pub fn get_or_insert(&mut self, id: NodeId, seed_timestamp_ns: Option<i64>) -> usize {
        if let Some(&slot) = self.index.get(&id) {
            return slot;
        }

        let slot = self.nodes.len();
        self.nodes.push(Node::new(id, seed_timestamp_ns));
        self.index.insert(id, slot);
        slot
    }

    pub fn slot_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slot_of(id).map(|slot| &self.nodes[slot])
    }

    /// Nodes in creation order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.iter().map(|n| n.edges.len()).sum()
    }

    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    /// Edges replaced under [`EdgePolicy::LastWins`]
    pub fn overwritten_edges(&self) -> usize {
        self.overwritten
    }
}
