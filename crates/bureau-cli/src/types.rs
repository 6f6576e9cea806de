use std::path::PathBuf;
use std::time::Duration;

use bureau_model::RecordFamily;
use bureau_output::ConnectionOptions;

/// Where the debt table goes after the CSV files are written.
#[derive(Debug, Clone)]
pub enum DatabaseTarget {
    /// CSV only. Credentials are not needed.
    Skip,
    /// Replace-load into SQL Server.
    SqlServer(ConnectionOptions),
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub max_input_size: u64,
    /// Extract and transform only; nothing is written.
    pub dry_run: bool,
    pub database: DatabaseTarget,
}

impl RunOptions {
    /// True when this run will connect to a database.
    pub fn needs_database(&self) -> bool {
        !self.dry_run && matches!(self.database, DatabaseTarget::SqlServer(_))
    }
}

#[derive(Debug)]
pub struct RunResult {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub entities: Vec<EntitySummary>,
    /// Input rows matching neither record family.
    pub dropped_rows: usize,
    /// Debt rows shorter than a full record.
    pub short_debt_rows: usize,
    pub dry_run: bool,
    pub duration: Duration,
}

impl RunResult {
    pub fn entity(&self, family: RecordFamily) -> Option<&EntitySummary> {
        self.entities.iter().find(|entity| entity.family == family)
    }
}

#[derive(Debug)]
pub struct EntitySummary {
    pub family: RecordFamily,
    pub rows: usize,
    pub columns: usize,
    pub csv: Option<PathBuf>,
    /// Destination table and rows loaded into it.
    pub table: Option<(&'static str, usize)>,
}
