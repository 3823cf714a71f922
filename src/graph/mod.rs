//! Scheduling graph construction and analysis.
//!
//! This module transforms parsed events into:
//! - A directed graph of scheduling nodes and edges
//! - Per-node shared stacks and per-edge residual stacks
//! - Canonical node timestamps

pub mod builder;
pub mod shared_stack;
pub mod timestamps;

// Re-export main types and functions
pub use builder::{Edge, EdgePolicy, Node, SchedulingGraph};
pub use shared_stack::{common_prefix_len, extract_node, extract_shared_stacks, SharedStacks};
pub use timestamps::{resolve_node, resolve_timestamps, Timestamps};
