//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Skipping the simulator preamble
//! - Parsing scheduling records and their call stacks
//! - Enforcing the node cap
//! - Defining the output schema

pub mod schema;
pub mod trace_reader;

// Re-export main types
pub use schema::{EdgeSummary, Event, FlowSummary, NodeId, NodeSummary};
pub use trace_reader::{parse_trace, read_trace_file, ParsedTrace};
