//! Loading decoded bureau tables.
//!
//! Both tables are written as CSV. The debt table is also replace-loaded into
//! a [`TableSink`], normally a [`SqlServerSink`].

mod config;
mod csv;
mod error;
mod mssql;
mod sink;

use std::path::Path;

use bureau_model::DEBT_TABLE;
use bureau_transform::TransformedTables;
use tracing::info;

pub use config::{
    ConnectionOptions, DEFAULT_DB_DRIVER, DEFAULT_PORT, DatabaseSettings, REQUIRED_SETTINGS,
    ServerAddress,
};
pub use csv::{CsvOutputs, ensure_output_dir, write_csv_outputs, write_table_csv};
pub use error::{ConfigError, OutputError, Result};
pub use mssql::SqlServerSink;
pub use sink::{MemorySink, TableSink};

/// What a load wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub csv: CsvOutputs,
    /// Rows loaded into the debt table, or `None` when no sink was given.
    pub debt_rows_loaded: Option<usize>,
}

/// Write both CSV files, then replace the debt table in `sink` if one is
/// given. CSV files are written first, so they exist even when the database
/// load fails.
pub fn load(
    output_dir: &Path,
    tables: &mut TransformedTables,
    sink: Option<&mut dyn TableSink>,
) -> Result<LoadReport> {
    let csv = write_csv_outputs(output_dir, tables)?;
    info!(
        clients = %csv.clients.display(),
        debts = %csv.debts.display(),
        "csv outputs written"
    );

    let debt_rows_loaded = match sink {
        Some(sink) => Some(sink.replace_table(DEBT_TABLE, &tables.debts)?),
        None => None,
    };

    Ok(LoadReport {
        csv,
        debt_rows_loaded,
    })
}
