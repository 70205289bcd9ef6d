//! Schema and report types for annotation table validation.
//!
//! A [`Schema`] declares the expected columns of a table, their value types
//! and the [`Check`]s their values must pass. Validation produces a
//! [`ValidationReport`] listing every [`FailureCase`].

pub mod error;
pub mod report;
pub mod schema;

pub use error::{Result, SchemaError};
pub use report::{FailureCase, ReportStatus, SchemaContext, ValidationReport, check_ids};
pub use schema::{
    Check, ColumnMatcher, ColumnSpec, Pattern, ReportDuplicates, Schema, SchemaBuilder,
    SchemaDefinition, ValueType,
};
