//! Evaluation of one resolved column.

use annot_common::any_to_string;
use annot_model::{ColumnSpec, FailureCase, ReportDuplicates, check_ids};
use polars::prelude::{AnyValue, Column};
use tracing::trace;

use crate::checks::passes;
use crate::uniqueness::duplicate_rows;
use crate::value::{Value, coerce, dtype_label, dtype_matches};

/// Everything needed to validate one column, independent of other columns.
#[derive(Debug, Clone, Copy)]
pub struct ColumnJob<'a> {
    pub spec: &'a ColumnSpec,
    /// Working-copy column, already missing-normalized.
    pub data: &'a Column,
    pub coerce: bool,
    pub report_duplicates: ReportDuplicates,
}

enum Cell {
    Null,
    /// Conversion failed; excluded from every later step.
    Rejected,
    Ok(Value),
}

/// Run coercion, nullability, value checks and uniqueness for one column.
///
/// Failures come back sorted by row with column-level failures first.
pub fn evaluate(job: &ColumnJob<'_>) -> Vec<FailureCase> {
    let ColumnJob { spec, data, .. } = *job;
    let name = data.name().as_str();
    let mut failures = Vec::new();

    let all_null = data.null_count() == data.len();
    if !job.coerce && !all_null && !dtype_matches(data.dtype(), spec.value_type) {
        failures.push(FailureCase::column(
            name,
            check_ids::dtype(spec.value_type.dtype_name()),
            dtype_label(data.dtype()),
        ));
    }

    let cells: Vec<Cell> = (0..data.len())
        .map(|row| {
            let raw = data.get(row).unwrap_or(AnyValue::Null);
            if matches!(raw, AnyValue::Null) {
                return Cell::Null;
            }
            let value = if job.coerce {
                coerce(raw.clone(), spec.value_type)
            } else {
                Value::from_any(raw.clone())
            };
            match value {
                Some(value) => Cell::Ok(value),
                None => {
                    failures.push(FailureCase::cell(
                        name,
                        check_ids::COERCE_ERROR,
                        row,
                        any_to_string(raw),
                    ));
                    Cell::Rejected
                }
            }
        })
        .collect();

    for (row, cell) in cells.iter().enumerate() {
        match cell {
            Cell::Null if !spec.nullable => {
                failures.push(FailureCase::cell(name, check_ids::NOT_NULLABLE, row, "null"));
            }
            Cell::Ok(value) => {
                for (number, check) in spec.checks.iter().enumerate() {
                    if !passes(check, value) {
                        failures.push(
                            FailureCase::cell(name, check.id(), row, value.render())
                                .with_check_number(number),
                        );
                    }
                }
            }
            _ => {}
        }
    }

    if spec.unique {
        let present: Vec<(usize, &Value)> = cells
            .iter()
            .enumerate()
            .filter_map(|(row, cell)| match cell {
                Cell::Ok(value) => Some((row, value)),
                _ => None,
            })
            .collect();
        for row in duplicate_rows(&present, job.report_duplicates) {
            if let Cell::Ok(value) = &cells[row] {
                failures.push(FailureCase::cell(
                    name,
                    check_ids::FIELD_UNIQUENESS,
                    row,
                    value.render(),
                ));
            }
        }
    }

    failures.sort_by_key(|failure| failure.row);
    trace!(column = name, failure_count = failures.len(), "column evaluated");
    failures
}
