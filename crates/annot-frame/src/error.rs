use std::fmt;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Which input of a join a key was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinSide {
    Primary,
    Other,
}

impl fmt::Display for JoinSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinSide::Primary => f.write_str("primary"),
            JoinSide::Other => f.write_str("other"),
        }
    }
}

/// Caller-contract violations of the table utilities.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("join key '{column}' is missing from the {side} table")]
    MissingJoinKey { column: String, side: JoinSide },
    #[error("column '{0}' not found")]
    ColumnNotFound(String),
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, FrameError>;
