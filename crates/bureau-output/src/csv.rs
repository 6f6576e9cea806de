//! CSV outputs.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use bureau_model::RecordFamily;
use bureau_transform::TransformedTables;
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Paths of the CSV files written for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOutputs {
    pub clients: PathBuf,
    pub debts: PathBuf,
}

impl CsvOutputs {
    pub fn path(&self, family: RecordFamily) -> &Path {
        match family {
            RecordFamily::Client => &self.clients,
            RecordFamily::Debt => &self.debts,
        }
    }
}

/// Create `output_dir` if needed.
pub fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir).map_err(|source| OutputError::CreateDir {
        path: output_dir.to_path_buf(),
        source,
    })
}

/// Write one table as CSV with a header row and no index column.
///
/// An existing file is overwritten.
pub fn write_table_csv(path: &Path, table: &mut DataFrame) -> Result<()> {
    let csv_error = |message: String| OutputError::CsvWrite {
        path: path.to_path_buf(),
        message,
    };
    let mut file = File::create(path).map_err(|e| csv_error(e.to_string()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(table)
        .map_err(|e| csv_error(e.to_string()))?;
    debug!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "csv written"
    );
    Ok(())
}

/// Write `clientes.csv` and `deudas.csv` into `output_dir`.
pub fn write_csv_outputs(output_dir: &Path, tables: &mut TransformedTables) -> Result<CsvOutputs> {
    ensure_output_dir(output_dir)?;

    let clients = output_dir.join(RecordFamily::Client.output_file());
    write_table_csv(&clients, &mut tables.clients)?;

    let debts = output_dir.join(RecordFamily::Debt.output_file());
    write_table_csv(&debts, &mut tables.debts)?;

    Ok(CsvOutputs { clients, debts })
}
