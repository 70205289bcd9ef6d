//! Failure cases as a table, for writing next to the submission.

use annot_model::ValidationReport;
use polars::prelude::{Column, DataFrame, PolarsResult};

/// Column names of [`report_to_frame`], in order.
pub const REPORT_COLUMNS: [&str; 6] = [
    "schema_context",
    "column",
    "check",
    "check_number",
    "failure_case",
    "index",
];

/// One row per failure case. `index` is the row of the offending cell.
pub fn report_to_frame(report: &ValidationReport) -> PolarsResult<DataFrame> {
    let cases = &report.failure_cases;
    let [context, column, check, number, failure, index] = REPORT_COLUMNS;
    DataFrame::new(vec![
        Column::new(
            context.into(),
            cases.iter().map(|c| c.schema_context.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            column.into(),
            cases.iter().map(|c| c.column.as_deref()).collect::<Vec<_>>(),
        ),
        Column::new(
            check.into(),
            cases.iter().map(|c| c.check.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            number.into(),
            cases
                .iter()
                .map(|c| c.check_number.and_then(|n| u32::try_from(n).ok()))
                .collect::<Vec<_>>(),
        ),
        Column::new(
            failure.into(),
            cases.iter().map(|c| c.failure_case.as_str()).collect::<Vec<_>>(),
        ),
        Column::new(
            index.into(),
            cases
                .iter()
                .map(|c| c.row.and_then(|n| u64::try_from(n).ok()))
                .collect::<Vec<_>>(),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use annot_model::FailureCase;
    use polars::prelude::AnyValue;

    #[test]
    fn one_row_per_failure() {
        let report = ValidationReport::validated(vec![
            FailureCase::table("column_not_in_schema", "notes"),
            FailureCase::cell("compound", "greater_than_or_equal_to(0)", 3, "-1").with_check_number(0),
        ]);
        let df = report_to_frame(&report).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, REPORT_COLUMNS);
        assert_eq!(df.column("column").unwrap().get(0).unwrap(), AnyValue::Null);
        assert_eq!(df.column("index").unwrap().get(1).unwrap(), AnyValue::UInt64(3));
        assert_eq!(df.column("check_number").unwrap().get(1).unwrap(), AnyValue::UInt32(0));
    }

    #[test]
    fn empty_report_has_header_only() {
        let df = report_to_frame(&ValidationReport::validated(Vec::new())).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), REPORT_COLUMNS.len());
    }
}
