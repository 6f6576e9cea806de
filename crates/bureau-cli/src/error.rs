//! Run-level error kinds.
//!
//! Library crates report their own error enums; the run folds them into the
//! four kinds an operator acts on.

use std::path::PathBuf;

use bureau_ingest::IngestError;
use bureau_output::{ConfigError, OutputError};
use bureau_transform::TransformError;
use thiserror::Error;

/// Why an ETL run failed.
#[derive(Debug, Error)]
pub enum EtlError {
    /// Database settings are missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// The input file does not exist.
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// The input could not be read, parsed or decoded.
    #[error("malformed input: {0}")]
    MalformedInput(#[source] MalformedInput),

    /// Output files or the destination table could not be written.
    #[error("persistence error: {0}")]
    Persistence(#[source] OutputError),
}

/// Stage that rejected the input.
#[derive(Debug, Error)]
pub enum MalformedInput {
    #[error(transparent)]
    Read(IngestError),
    #[error(transparent)]
    Decode(TransformError),
}

impl EtlError {
    /// Short machine-readable name of the error kind, for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            EtlError::Configuration(_) => "configuration",
            EtlError::InputNotFound { .. } => "input_not_found",
            EtlError::MalformedInput(_) => "malformed_input",
            EtlError::Persistence(_) => "persistence",
        }
    }
}

impl From<IngestError> for EtlError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::FileNotFound { path } => EtlError::InputNotFound { path },
            other => EtlError::MalformedInput(MalformedInput::Read(other)),
        }
    }
}

impl From<TransformError> for EtlError {
    fn from(err: TransformError) -> Self {
        EtlError::MalformedInput(MalformedInput::Decode(err))
    }
}

impl From<OutputError> for EtlError {
    fn from(err: OutputError) -> Self {
        match err {
            OutputError::Config(config) => EtlError::Configuration(config),
            other => EtlError::Persistence(other),
        }
    }
}

/// Result type for ETL runs.
pub type Result<T> = std::result::Result<T, EtlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_becomes_input_not_found() {
        let err: EtlError = IngestError::FileNotFound {
            path: PathBuf::from("server_inputs/file.ope"),
        }
        .into();
        assert!(matches!(err, EtlError::InputNotFound { .. }));
        assert_eq!(err.kind(), "input_not_found");
    }

    #[test]
    fn missing_column_is_malformed_input() {
        let err: EtlError = IngestError::MissingColumn {
            column: "Field_1".to_string(),
            path: PathBuf::from("in.ope"),
        }
        .into();
        assert_eq!(err.kind(), "malformed_input");
        assert!(err.to_string().contains("Field_1"));
    }

    #[test]
    fn output_config_error_is_configuration() {
        let err: EtlError = OutputError::Config(ConfigError::MissingSetting { name: "USER" }).into();
        assert!(matches!(err, EtlError::Configuration(_)));
    }

    #[test]
    fn write_failure_is_persistence() {
        let err: EtlError = OutputError::CsvWrite {
            path: PathBuf::from("out/deudas.csv"),
            message: "disk full".to_string(),
        }
        .into();
        assert_eq!(err.kind(), "persistence");
    }
}
