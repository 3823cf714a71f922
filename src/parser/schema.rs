//! Data schema definitions.
//!
//! `Event` is the parsed form of one trace record. The summary types define
//! the structure of the JSON files we write to disk; that schema is
//! versioned to allow future evolution.

use serde::{Deserialize, Serialize};

/// Identifier of a scheduling node (a simulated event)
pub type NodeId = u64;

/// One scheduling relationship read from the trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Simulated time at which the scheduling happened
    pub timestamp_ns: i64,

    /// Node doing the scheduling
    pub current_id: NodeId,

    /// Node being scheduled
    pub scheduled_id: NodeId,

    /// Simulated time the scheduled node will run at
    pub scheduled_timestamp_ns: i64,

    /// Call stack at the scheduling point, root first
    pub stack: Vec<String>,
}

/// Top-level summary structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowSummary {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the graph was built from
    pub source: String,

    /// Number of records read
    pub event_count: usize,

    pub node_count: usize,
    pub edge_count: usize,

    /// True when the node cap stopped reading before end of input
    pub truncated: bool,

    /// Nodes in creation order
    pub nodes: Vec<NodeSummary>,

    /// Timestamp when summary was generated
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeSummary {
    pub id: NodeId,

    /// Canonical simulated time in seconds, if one could be derived
    pub timestamp_s: Option<f64>,

    /// Frames common to every outgoing edge
    pub shared_stack: Vec<String>,

    pub edges: Vec<EdgeSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSummary {
    pub target: NodeId,

    /// Target timestamp minus source timestamp, in seconds
    pub delay_s: f64,

    /// Frames left after the shared stack was hoisted
    pub residual_stack: Vec<String>,
}
