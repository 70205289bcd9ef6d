use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use annot_model::{Check, FailureCase, ReportStatus, ValidationReport};

pub fn print_report(report: &ValidationReport) {
    match report.status {
        ReportStatus::Unreadable => {
            for failure in report.iter() {
                eprintln!("error: {}", failure.failure_case);
            }
            return;
        }
        ReportStatus::Validated if report.is_empty() => {
            println!("No issues found.");
            return;
        }
        ReportStatus::Validated => {}
    }
    println!("{}", failure_table(report));
    println!();
    println!("{}", count_table(report));
}

/// One row per failure case.
pub fn failure_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Check"),
        header_cell("Row"),
        header_cell("Value"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for failure in report.iter() {
        table.add_row(vec![
            column_cell(failure),
            Cell::new(&failure.check),
            match failure.row {
                Some(row) => Cell::new(row),
                None => dim_cell("-"),
            },
            Cell::new(&failure.failure_case),
        ]);
    }
    table
}

/// Failure totals per check, with a bold total row.
pub fn count_table(report: &ValidationReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (check, count) in report.counts_by_check() {
        table.add_row(vec![
            Cell::new(check),
            Cell::new(count).fg(Color::Red).add_attribute(Attribute::Bold),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.len()).add_attribute(Attribute::Bold),
    ]);
    table
}

/// Check identifiers joined for display, `-` when there are none.
pub fn describe_checks(checks: &[Check]) -> String {
    if checks.is_empty() {
        return "-".to_string();
    }
    checks.iter().map(Check::id).collect::<Vec<_>>().join(", ")
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ColumnConstraint::LowerBoundary(Width::Fixed(5)),
        ColumnConstraint::UpperBoundary(Width::Percentage(45)),
    ]);
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

fn column_cell(failure: &FailureCase) -> Cell {
    match &failure.column {
        Some(name) if failure.is_table_level() => Cell::new(name).fg(Color::Yellow),
        Some(name) => Cell::new(name)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        None => dim_cell("(table)"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ValidationReport {
        ValidationReport::validated(vec![
            FailureCase::table_column("notes", "column_not_in_schema", "notes"),
            FailureCase::cell("annotation_rank", "coerce_error", 2, "first"),
            FailureCase::cell("adduct", "str_contains('M[+-]')", 2, "H+").with_check_number(0),
            FailureCase::cell("adduct", "str_contains('M[+-]')", 4, "Na").with_check_number(0),
        ])
    }

    #[test]
    fn failure_table_has_a_row_per_case() {
        let table = failure_table(&report());
        assert_eq!(table.row_iter().count(), 4);
    }

    #[test]
    fn count_table_totals() {
        let rendered = count_table(&report()).to_string();
        assert!(rendered.contains("str_contains('M[+-]')"));
        assert!(rendered.contains("TOTAL"));
    }

    #[test]
    fn describes_checks() {
        assert_eq!(describe_checks(&[]), "-");
        assert_eq!(
            describe_checks(&[Check::greater_than_or_equal_to(1.0), Check::formula()]),
            "greater_than_or_equal_to(1), formula"
        );
    }
}
