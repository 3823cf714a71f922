//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod flowchart;
pub mod models;

// Re-export main command functions
pub use flowchart::{execute_flowchart, validate_args};
pub use models::{FlowchartArgs, FlowchartReport};
