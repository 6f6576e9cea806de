use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use bureau_cli::{EntitySummary, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Input: {}", result.input.display());
    if result.dry_run {
        println!("Output: none (dry run)");
    } else {
        println!("Output: {}", result.output_dir.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("CSV"),
        header_cell("Database"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut total_rows = 0usize;
    for entity in &result.entities {
        total_rows += entity.rows;
        table.add_row(vec![
            Cell::new(entity.family.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(entity.rows),
            Cell::new(entity.columns),
            csv_cell(entity.csv.as_deref()),
            database_cell(entity),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");

    if result.dropped_rows > 0 {
        println!("Dropped rows (no record family): {}", result.dropped_rows);
    }
    if result.short_debt_rows > 0 {
        println!(
            "Short debt rows (truncated fields): {}",
            result.short_debt_rows
        );
    }
}

fn csv_cell(path: Option<&Path>) -> Cell {
    match path {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn database_cell(entity: &EntitySummary) -> Cell {
    match (entity.family.table_name(), entity.table) {
        (_, Some((table, rows))) => Cell::new(format!("{table} ({rows} rows)"))
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        (Some(table), None) => dim_cell(format!("{table} (skipped)")),
        (None, None) => dim_cell("-"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

pub fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
