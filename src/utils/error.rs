//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading a simulator trace
#[derive(Error, Debug)]
pub enum ParseError {
    /// The header marker never appeared; nothing was parsed.
    #[error("Trace format error: marker '{marker}' not found in trace")]
    TraceFormat { marker: String },

    #[error("Parse error at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },

    #[error("Failed to read trace: {0}")]
    ReadFailed(#[from] std::io::Error),
}

impl ParseError {
    /// True for the missing-marker case
    pub fn is_format_error(&self) -> bool {
        matches!(self, ParseError::TraceFormat { .. })
    }
}

/// Errors that can occur while loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Invalid config TOML: {0}")]
    Invalid(#[from] toml::de::Error),

    #[error("Config value out of range: {0}")]
    OutOfRange(String),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
