//! Flow chart rendering.
//!
//! This module converts an extracted scheduling graph into a DOT digraph
//! for an external layout tool, plus JSON and text summaries.

pub mod context;
pub mod generator;
pub mod summary;

// Re-export main types
pub use context::{display_context, escape_label};
pub use generator::{generate_dot, DotConfig};
pub use summary::{generate_text_summary, to_summary};
