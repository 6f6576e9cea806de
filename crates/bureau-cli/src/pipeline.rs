//! ETL run with explicit stages.
//!
//! The run follows these stages in order:
//! 1. **Preflight**: resolve database settings when the run loads a table
//! 2. **Extract**: read the input file and partition rows by family
//! 3. **Transform**: decode packed fields into named columns
//! 4. **Load**: write CSV files and replace the debt table
//!
//! Each stage logs its failure before returning it. Nothing is written until
//! extraction and decoding have both succeeded.

use std::time::Instant;

use bureau_ingest::{ExtractOptions, ExtractedRecords, extract_records};
use bureau_model::RecordFamily;
use bureau_output::{DatabaseSettings, LoadReport, SqlServerSink, TableSink, load};
use bureau_transform::{TransformError, TransformedTables, transform};
use tracing::{error, info, info_span, warn};

use crate::error::{EtlError, Result};
use crate::logging::redact_value;
use crate::types::{DatabaseTarget, EntitySummary, RunOptions, RunResult};

// ============================================================================
// Stage 1: Preflight
// ============================================================================

/// Build the SQL Server sink for runs that load a table.
///
/// Settings are read through `lookup`. Returns `None` for dry runs and
/// CSV-only runs without consulting `lookup`.
pub fn resolve_sink<F>(options: &RunOptions, lookup: F) -> Result<Option<SqlServerSink>>
where
    F: Fn(&str) -> Option<String>,
{
    if !options.needs_database() {
        return Ok(None);
    }
    let DatabaseTarget::SqlServer(connection) = &options.database else {
        return Ok(None);
    };

    let settings = DatabaseSettings::from_lookup(lookup).map_err(|err| {
        error!(error = %err, "database settings incomplete");
        EtlError::from(err)
    })?;
    info!(
        server = %settings.server,
        database = %settings.database,
        "database settings loaded"
    );
    Ok(Some(SqlServerSink::new(settings, connection.clone())))
}

// ============================================================================
// Stage 2: Extract
// ============================================================================

pub fn extract_stage(options: &RunOptions) -> Result<ExtractedRecords> {
    let span = info_span!("extract", input = %options.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let extract_options = ExtractOptions {
        max_file_size: options.max_input_size,
    };
    match extract_records(&options.input, extract_options) {
        Ok(records) => {
            info!(
                clients = records.clients.height(),
                debts = records.debts.height(),
                dropped = records.dropped,
                duration_ms = start.elapsed().as_millis(),
                "extract complete"
            );
            Ok(records)
        }
        Err(err) => {
            error!(error = %err, "extract failed");
            Err(err.into())
        }
    }
}

// ============================================================================
// Stage 3: Transform
// ============================================================================

pub fn transform_stage(records: &ExtractedRecords) -> Result<TransformedTables> {
    let span = info_span!("transform");
    let _guard = span.enter();
    let start = Instant::now();

    match transform(records) {
        Ok(tables) => {
            info!(
                clients = tables.clients.height(),
                debts = tables.debts.height(),
                short_debt_rows = tables.short_debt_rows,
                duration_ms = start.elapsed().as_millis(),
                "transform complete"
            );
            Ok(tables)
        }
        Err(err) => {
            if let TransformError::ClientFieldCount { row, value, .. } = &err {
                error!(row, value = redact_value(value), error = %err, "transform failed");
            } else {
                error!(error = %err, "transform failed");
            }
            Err(err.into())
        }
    }
}

// ============================================================================
// Stage 4: Load
// ============================================================================

pub fn load_stage(
    options: &RunOptions,
    tables: &mut TransformedTables,
    sink: Option<&mut dyn TableSink>,
) -> Result<LoadReport> {
    let span = info_span!("load", output_dir = %options.output_dir.display());
    let _guard = span.enter();
    let start = Instant::now();

    match load(&options.output_dir, tables, sink) {
        Ok(report) => {
            info!(
                debt_rows_loaded = report.debt_rows_loaded,
                duration_ms = start.elapsed().as_millis(),
                "load complete"
            );
            Ok(report)
        }
        Err(err) => {
            error!(error = %err, "load failed");
            Err(err.into())
        }
    }
}

/// Run extract, transform and load against an already resolved sink.
pub fn run_pipeline(options: &RunOptions, sink: Option<&mut dyn TableSink>) -> Result<RunResult> {
    let start = Instant::now();

    let records = extract_stage(options)?;
    let mut tables = transform_stage(&records)?;

    let report = if options.dry_run {
        warn!("dry run: no files or tables written");
        None
    } else {
        Some(load_stage(options, &mut tables, sink)?)
    };

    let entities = RecordFamily::ALL
        .into_iter()
        .map(|family| {
            let table = match family {
                RecordFamily::Client => &tables.clients,
                RecordFamily::Debt => &tables.debts,
            };
            EntitySummary {
                family,
                rows: table.height(),
                columns: table.width(),
                csv: report
                    .as_ref()
                    .map(|report| report.csv.path(family).to_path_buf()),
                table: family.table_name().zip(
                    report
                        .as_ref()
                        .and_then(|report| report.debt_rows_loaded),
                ),
            }
        })
        .collect();

    Ok(RunResult {
        input: options.input.clone(),
        output_dir: options.output_dir.clone(),
        entities,
        dropped_rows: records.dropped,
        short_debt_rows: tables.short_debt_rows,
        dry_run: options.dry_run,
        duration: start.elapsed(),
    })
}

/// Run the whole ETL: settings first, then every stage.
///
/// Database settings are validated before the input is touched, so a run
/// without credentials fails without reading or writing anything.
pub fn run<F>(options: &RunOptions, lookup: F) -> Result<RunResult>
where
    F: Fn(&str) -> Option<String>,
{
    let span = info_span!("etl_run", input = %options.input.display());
    let _guard = span.enter();
    info!(
        output_dir = %options.output_dir.display(),
        dry_run = options.dry_run,
        database = options.needs_database(),
        "etl run started"
    );

    let result = resolve_sink(options, lookup).and_then(|mut sink| {
        run_pipeline(
            options,
            sink.as_mut().map(|sink| sink as &mut dyn TableSink),
        )
    });

    match &result {
        Ok(run) => info!(
            duration_ms = run.duration.as_millis(),
            "etl run finished"
        ),
        Err(err) => error!(kind = err.kind(), error = %err, "etl run failed"),
    }
    result
}
