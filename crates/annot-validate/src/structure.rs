//! Table-level checks: unknown, missing and colliding columns.

use std::collections::HashSet;

use annot_model::{FailureCase, Schema, check_ids};

use crate::resolution::Resolution;

/// Structural failures, in the order strict, required, duplicate names.
pub fn table_failures(
    schema: &Schema,
    resolution: &Resolution<'_>,
    columns: &[&str],
) -> Vec<FailureCase> {
    let mut failures = Vec::new();

    if schema.strict() {
        failures.extend(resolution.unresolved.iter().map(|&column| {
            FailureCase::table_column(column, check_ids::COLUMN_NOT_IN_SCHEMA, column)
        }));
    }

    failures.extend(resolution.missing_required.iter().map(|spec| {
        FailureCase::table_column(&spec.name, check_ids::COLUMN_REQUIRED, &spec.name)
    }));

    if schema.unique_column_names() {
        let mut seen = HashSet::new();
        for &column in columns {
            if !seen.insert(column.to_lowercase()) {
                failures.push(FailureCase::table_column(
                    column,
                    check_ids::DUPLICATE_COLUMN_NAME,
                    column,
                ));
            }
        }
    }

    failures
}
