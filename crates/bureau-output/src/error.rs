//! Error types for the loader.

use std::path::PathBuf;
use thiserror::Error;

/// A required database setting is absent or unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Setting is unset or empty.
    #[error("missing required setting {name}")]
    MissingSetting { name: &'static str },

    /// Port in the server setting is not a number.
    #[error("invalid port '{value}' in {name}")]
    InvalidPort { name: &'static str, value: String },
}

/// Errors raised while writing outputs.
#[derive(Debug, Error)]
pub enum OutputError {
    // === File Output ===
    /// Output directory could not be created.
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV file could not be created or written.
    #[error("failed to write CSV {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },

    // === Database ===
    /// Database settings are incomplete.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Async runtime for the database client could not start.
    #[error("failed to start database runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// Connection to the server failed.
    #[error("failed to connect to {server}: {message}")]
    Connect { server: String, message: String },

    /// A statement against the destination table failed.
    #[error("failed to load table {table}: {message}")]
    Query { table: String, message: String },

    /// Table contents could not be read for loading.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for OutputError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_is_transparent() {
        let err: OutputError = ConfigError::MissingSetting { name: "SERVER" }.into();
        assert_eq!(err.to_string(), "missing required setting SERVER");
    }
}
