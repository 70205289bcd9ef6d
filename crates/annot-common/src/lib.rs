//! Shared utilities for the annotation validator crates.
//!
//! This crate provides the Polars `AnyValue` helpers used across the
//! workspace and the single definition of what counts as a missing cell.

pub mod missing;
pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use missing::{MISSING_TOKENS, is_missing, is_missing_str};
pub use polars::{
    any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64, parse_i64,
};
