//! Simflow library
//!
//! Reconstructs the causal scheduling graph of a discrete-event simulation
//! from its stack-trace log, factors the call-stack ancestry shared by
//! sibling edges into their source node, and renders the result as a DOT
//! flow chart.
//!
//! Pipeline: [`parser`] → [`graph`] → [`flowchart`] → [`output`], driven by
//! [`commands::execute_flowchart`].

pub mod commands;
pub mod flowchart;
pub mod graph;
pub mod output;
pub mod parser;
pub mod utils;
