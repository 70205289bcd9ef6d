//! Failure cases and the validation report.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Well-known check identifiers emitted by the engine itself.
pub mod check_ids {
    pub const COLUMN_NOT_IN_SCHEMA: &str = "column_not_in_schema";
    pub const COLUMN_REQUIRED: &str = "column_required";
    pub const DUPLICATE_COLUMN_NAME: &str = "duplicate_column_name";
    pub const COERCE_ERROR: &str = "coerce_error";
    pub const NOT_NULLABLE: &str = "not_nullable";
    pub const FIELD_UNIQUENESS: &str = "field_uniqueness";
    pub const READ_TABLE: &str = "read_table";

    /// Identifier for a dtype mismatch, e.g. `dtype('int64')`.
    pub fn dtype(name: &str) -> String {
        format!("dtype('{name}')")
    }
}

/// Whether a failure belongs to the table as a whole or to one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchemaContext {
    DataFrameSchema,
    Column,
}

impl SchemaContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaContext::DataFrameSchema => "DataFrameSchema",
            SchemaContext::Column => "Column",
        }
    }
}

impl fmt::Display for SchemaContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violation found during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureCase {
    pub schema_context: SchemaContext,
    /// Column the failure belongs to; `None` for table-level failures.
    pub column: Option<String>,
    /// Check identifier, e.g. `not_nullable` or `in_range(1, 25)`.
    pub check: String,
    /// Position of the check within its column spec.
    pub check_number: Option<usize>,
    /// Zero-based row index; `None` for table- and column-level failures.
    pub row: Option<usize>,
    /// Offending value or structural detail.
    pub failure_case: String,
}

impl FailureCase {
    /// A failure that concerns the table structure.
    pub fn table(check: impl Into<String>, failure_case: impl Into<String>) -> Self {
        Self {
            schema_context: SchemaContext::DataFrameSchema,
            column: None,
            check: check.into(),
            check_number: None,
            row: None,
            failure_case: failure_case.into(),
        }
    }

    /// A table-level failure that names a column (missing, unknown, duplicated).
    pub fn table_column(
        column: impl Into<String>,
        check: impl Into<String>,
        failure_case: impl Into<String>,
    ) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::table(check, failure_case)
        }
    }

    /// A failure that concerns a whole column, not a single cell.
    pub fn column(
        column: impl Into<String>,
        check: impl Into<String>,
        failure_case: impl Into<String>,
    ) -> Self {
        Self {
            schema_context: SchemaContext::Column,
            column: Some(column.into()),
            check: check.into(),
            check_number: None,
            row: None,
            failure_case: failure_case.into(),
        }
    }

    /// A failure located at one cell.
    pub fn cell(
        column: impl Into<String>,
        check: impl Into<String>,
        row: usize,
        failure_case: impl Into<String>,
    ) -> Self {
        Self {
            row: Some(row),
            ..Self::column(column, check, failure_case)
        }
    }

    pub fn with_check_number(mut self, number: usize) -> Self {
        self.check_number = Some(number);
        self
    }

    pub fn is_table_level(&self) -> bool {
        self.schema_context == SchemaContext::DataFrameSchema
    }
}

/// Outcome of a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// The table was read and validated; failures (if any) describe the data.
    Validated,
    /// The input could not be read as a table.
    Unreadable,
}

/// All failure cases from one validation run, in deterministic order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: ReportStatus,
    pub failure_cases: Vec<FailureCase>,
}

impl ValidationReport {
    pub fn validated(failure_cases: Vec<FailureCase>) -> Self {
        Self {
            status: ReportStatus::Validated,
            failure_cases,
        }
    }

    /// Report for input that could not be read; carries a single `read_table` failure.
    pub fn unreadable(message: impl fmt::Display) -> Self {
        Self {
            status: ReportStatus::Unreadable,
            failure_cases: vec![FailureCase::table(
                check_ids::READ_TABLE,
                format!("input could not be parsed into a table: {message}"),
            )],
        }
    }

    /// True when the table was read and no failures were found.
    pub fn is_valid(&self) -> bool {
        self.status == ReportStatus::Validated && self.failure_cases.is_empty()
    }

    pub fn is_unreadable(&self) -> bool {
        self.status == ReportStatus::Unreadable
    }

    pub fn len(&self) -> usize {
        self.failure_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failure_cases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FailureCase> {
        self.failure_cases.iter()
    }

    /// Failure cases for one column.
    pub fn for_column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a FailureCase> {
        self.failure_cases
            .iter()
            .filter(move |case| case.column.as_deref() == Some(column))
    }

    /// Number of failures per check identifier.
    pub fn counts_by_check(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for case in &self.failure_cases {
            *counts.entry(case.check.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Number of failures per column; table-level failures without a column are skipped.
    pub fn counts_by_column(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for case in &self.failure_cases {
            if let Some(column) = case.column.as_deref() {
                *counts.entry(column).or_insert(0) += 1;
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a FailureCase;
    type IntoIter = std::slice::Iter<'a, FailureCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.failure_cases.iter()
    }
}
