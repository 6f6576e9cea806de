use std::io::{self, Write};

use anyhow::{Context, Result};
use comfy_table::{Cell, CellAlignment, Table};

use bureau_cli::pipeline;
use bureau_cli::{DatabaseTarget, EtlError, RunOptions, RunResult};
use bureau_model::{CLIENT_COLUMNS, DEBT_ACCOUNT, DEBT_LAYOUT, FieldSpan, PACKED_FIELD};
use bureau_output::ConnectionOptions;

use crate::cli::RunArgs;
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

pub fn run_options(args: &RunArgs) -> RunOptions {
    let database = if args.skip_database {
        DatabaseTarget::Skip
    } else {
        DatabaseTarget::SqlServer(ConnectionOptions {
            driver: args.db_driver.clone(),
            trusted_connection: args.trusted_connection,
        })
    };
    RunOptions {
        input: args.input.clone(),
        output_dir: args.output_dir.clone(),
        max_input_size: args.max_input_size,
        dry_run: args.dry_run,
        database,
    }
}

pub fn run_etl(args: &RunArgs) -> std::result::Result<RunResult, EtlError> {
    let options = run_options(args);
    pipeline::run(&options, |name| std::env::var(name).ok())
}

pub fn run_layout() -> Result<()> {
    let mut clients = Table::new();
    clients.set_header(vec![header_cell("Part"), header_cell("Client column")]);
    apply_table_style(&mut clients);
    align_column(&mut clients, 0, CellAlignment::Right);
    for (index, name) in CLIENT_COLUMNS.iter().enumerate() {
        clients.add_row(vec![(index + 1).to_string(), (*name).to_string()]);
    }

    let mut debts = Table::new();
    debts.set_header(vec![
        header_cell("Field"),
        header_cell("Output column"),
        header_cell("Characters"),
        header_cell("Width"),
    ]);
    apply_table_style(&mut debts);
    align_column(&mut debts, 3, CellAlignment::Right);
    for field in DEBT_LAYOUT {
        let characters = match field.span {
            FieldSpan::Range { start, end } => format!("[{start}, {end})"),
            FieldSpan::Single { index } => format!("[{index}]"),
        };
        debts.add_row(vec![
            field.source_name.to_string(),
            field.output_name.to_string(),
            characters,
            field.span.width().to_string(),
        ]);
    }
    debts.add_row(vec![
        Cell::new(DEBT_ACCOUNT.source_name),
        Cell::new(DEBT_ACCOUNT.output_name),
        dim_cell(DEBT_ACCOUNT.part_names().join(" + ")),
        dim_cell("-"),
    ]);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "Client rows: {PACKED_FIELD} starting with '1', split on '|'")
        .context("write layout")?;
    writeln!(stdout, "{clients}").context("write client layout")?;
    writeln!(stdout).context("write layout")?;
    writeln!(stdout, "Debt rows: {PACKED_FIELD} starting with '2', sliced by character")
        .context("write layout")?;
    writeln!(stdout, "{debts}").context("write debt layout")?;
    Ok(())
}
