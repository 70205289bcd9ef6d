use thiserror::Error;

use crate::schema::ValueType;

/// A schema declaration that cannot be used for validation.
///
/// These are programmer errors in the schema itself, never problems with the
/// data being validated.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("column name must not be empty")]
    EmptyColumnName,
    #[error("column '{name}' is declared more than once")]
    DuplicateColumn { name: String },
    #[error("column pattern '{name}' is not a valid regex: {source}")]
    InvalidColumnPattern {
        name: String,
        #[source]
        source: regex::Error,
    },
    #[error("check pattern '{pattern}' is not a valid regex: {source}")]
    InvalidCheckPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("check {check} on column '{column}' has invalid bounds")]
    InvalidBounds { column: String, check: String },
    #[error("check {check} cannot be applied to {value_type} column '{column}'")]
    IncompatibleCheck {
        column: String,
        check: String,
        value_type: ValueType,
    },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
