//! Error types for packed-field decoding.

use thiserror::Error;

/// Errors raised while decoding packed fields.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A client row did not split into the expected number of sub-fields.
    ///
    /// `value` holds the offending packed string. It is kept out of the
    /// display text so callers decide whether to log personal data.
    #[error("client row {row} has {found} fields, expected {expected}")]
    ClientFieldCount {
        row: usize,
        expected: usize,
        found: usize,
        value: String,
    },

    /// Column not found in DataFrame.
    #[error("column '{column}' not found in DataFrame")]
    ColumnNotFound { column: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_count_display_omits_value() {
        let err = TransformError::ClientFieldCount {
            row: 3,
            expected: 18,
            found: 17,
            value: "1|PEREZ|JUAN".to_string(),
        };
        let text = err.to_string();
        assert_eq!(text, "client row 3 has 17 fields, expected 18");
        assert!(!text.contains("PEREZ"));
    }
}
