use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use ivs_model::{CheckStatus, ValidationReport};

use crate::types::{BuildOutcome, CheckOutcome};

pub fn print_build_summary(outcome: &BuildOutcome) {
    println!(
        "Merged table: {} ({} rows x {} columns)",
        outcome.output.display(),
        outcome.rows,
        outcome.columns
    );
    println!("Metadata: {}", outcome.metadata.display());
    if let Some(path) = &outcome.report_file {
        println!("Validation report: {}", path.display());
    }
    print_check_table(&outcome.report);
}

pub fn print_check_summary(outcome: &CheckOutcome) {
    println!("Table: {} ({} rows)", outcome.input.display(), outcome.rows);
    if let Some(path) = &outcome.report_file {
        println!("Validation report: {}", path.display());
    }
    print_check_table(&outcome.report);
}

fn print_check_table(report: &ValidationReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Check"),
        header_cell("Column"),
        header_cell("Status"),
        header_cell("Count"),
        header_cell("Share"),
        header_cell("Message"),
    ]);
    apply_check_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for check in &report.checks {
        table.add_row(vec![
            Cell::new(&check.name),
            text_cell(check.column.as_deref()),
            status_cell(check.status),
            count_cell(check.count),
            share_cell(check.share),
            Cell::new(&check.message),
        ]);
    }
    println!("{table}");
    if report.has_failures() {
        eprintln!("Failed checks:");
        for check in report.checks.iter().filter(|check| check.failed()) {
            eprintln!("- {}: {}", check.name, check.message);
        }
    }
}

fn apply_check_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(24)),
            ColumnConstraint::UpperBoundary(Width::Fixed(10)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::UpperBoundary(Width::Percentage(45)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: CheckStatus) -> Cell {
    match status {
        CheckStatus::Pass => Cell::new("PASS").fg(Color::Green),
        CheckStatus::Fail => Cell::new("FAIL")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        CheckStatus::Info => Cell::new("INFO").fg(Color::Blue),
    }
}

fn text_cell(value: Option<&str>) -> Cell {
    match value {
        Some(text) => Cell::new(text),
        None => dim_cell("-"),
    }
}

fn count_cell(count: Option<u64>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn share_cell(share: Option<f64>) -> Cell {
    match share {
        Some(value) => Cell::new(format!("{value:.1}%")),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
