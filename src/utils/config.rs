//! Configuration and constants for the CLI.
//!
//! Every setting has a default matching the simulator's trace layout, so a
//! config file is only needed to override something.

use super::error::ConfigError;
use crate::graph::EdgePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current JSON summary schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Text that marks the start of the scheduling records
pub const DEFAULT_MARKER: &str = "SimulationTime";

/// Hard limit on distinct node ids read from one trace
pub const DEFAULT_MAX_NODES: usize = 1000;

/// Frames containing this text are skipped when picking a display frame
pub const DEFAULT_SKIP_KEYWORD: &str = "Schedule";

/// Name of the emitted digraph
pub const DEFAULT_GRAPH_NAME: &str = "sim";

pub const DEFAULT_TRACE_PATH: &str = "../build/bin/trace.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "flowchart_source.dot";

pub const NANOS_PER_SECOND: f64 = 1e9;

// Header token positions: timestamp, current id, scheduled id, scheduled timestamp
pub const HEADER_FIELD_POSITIONS: [usize; 4] = [1, 3, 5, 7];
pub const MIN_HEADER_TOKENS: usize = 8;

/// Complete tool configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct FlowchartConfig {
    #[serde(default)]
    pub trace: TraceSettings,

    #[serde(default)]
    pub graph: GraphSettings,

    #[serde(default)]
    pub render: RenderSettings,
}

/// Trace reader settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TraceSettings {
    /// Marker text that ends the preamble
    pub marker: String,

    /// Maximum number of distinct node ids
    pub max_nodes: usize,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Graph builder settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphSettings {
    /// What to do when a (source, target) pair is scheduled twice
    pub edge_policy: EdgePolicy,
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    pub graph_name: String,
    pub skip_keyword: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
            skip_keyword: DEFAULT_SKIP_KEYWORD.to_string(),
        }
    }
}

impl FlowchartConfig {
    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trace.marker.is_empty() {
            return Err(ConfigError::OutOfRange(
                "trace.marker cannot be empty".to_string(),
            ));
        }

        // A single record references two ids, so anything below 2 reads nothing
        if self.trace.max_nodes < 2 {
            return Err(ConfigError::OutOfRange(format!(
                "trace.max_nodes must be at least 2, got {}",
                self.trace.max_nodes
            )));
        }

        if self.render.graph_name.trim().is_empty() {
            return Err(ConfigError::OutOfRange(
                "render.graph_name cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load configuration from a TOML file
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::Invalid` - If TOML is invalid
/// * `ConfigError::OutOfRange` - If a value is unusable
///
/// # Example
/// ```ignore
/// let config = load_config("simflow.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<FlowchartConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: FlowchartConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = FlowchartConfig::default();
        assert_eq!(config.trace.marker, "SimulationTime");
        assert_eq!(config.trace.max_nodes, 1000);
        assert_eq!(config.graph.edge_policy, EdgePolicy::LastWins);
        assert_eq!(config.render.graph_name, "sim");
        assert_eq!(config.render.skip_keyword, "Schedule");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FlowchartConfig = toml::from_str(
            r#"
            [graph]
            edge_policy = "keep-all"
            "#,
        )
        .unwrap();

        assert_eq!(config.graph.edge_policy, EdgePolicy::KeepAll);
        assert_eq!(config.trace.max_nodes, DEFAULT_MAX_NODES);
        assert_eq!(config.render.skip_keyword, DEFAULT_SKIP_KEYWORD);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[trace]\nmax_nodes = 50\n[render]\ngraph_name = \"events\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.trace.max_nodes, 50);
        assert_eq!(config.render.graph_name, "events");
    }

    #[test]
    fn test_load_config_rejects_tiny_cap() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[trace]\nmax_nodes = 1").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange(_)));
    }

    #[test]
    fn test_load_config_bad_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[trace\nmax_nodes = ").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
