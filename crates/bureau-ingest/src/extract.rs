//! Extraction stage: read a bureau file and partition its rows.

use std::path::Path;
use std::time::Instant;

use bureau_model::PACKED_FIELD;
use tracing::debug;

use crate::csv::{MAX_INPUT_FILE_SIZE, check_file_size, read_csv_table, validate_encoding};
use crate::error::{IngestError, Result};
use crate::partition::{ExtractedRecords, partition_records};

/// Options for [`extract_records`].
#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Largest input file accepted, in bytes.
    pub max_file_size: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_file_size: MAX_INPUT_FILE_SIZE,
        }
    }
}

/// Read the bureau file at `path` and split it into client and debt rows.
///
/// # Errors
///
/// - [`IngestError::FileNotFound`] when the file does not exist
/// - [`IngestError::MissingColumn`] when the header lacks the packed field
/// - other variants for unreadable or unparseable input
pub fn extract_records(path: &Path, options: ExtractOptions) -> Result<ExtractedRecords> {
    let start = Instant::now();

    check_file_size(path, options.max_file_size)?;
    validate_encoding(path)?;

    let df = read_csv_table(path)?;
    let has_packed = df
        .get_column_names()
        .into_iter()
        .any(|name| name.as_str() == PACKED_FIELD);
    if !has_packed {
        return Err(IngestError::MissingColumn {
            column: PACKED_FIELD.to_string(),
            path: path.to_path_buf(),
        });
    }
    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "input table loaded"
    );

    let records = partition_records(&df)?;
    debug!(
        clients = records.clients.height(),
        debts = records.debts.height(),
        dropped = records.dropped,
        duration_ms = start.elapsed().as_millis(),
        "rows partitioned"
    );
    Ok(records)
}
