//! Lazy validation of annotation tables against a [`Schema`].
//!
//! ```
//! use annot_model::{Check, ColumnSpec, Schema, ValueType};
//! use annot_validate::validate;
//! use polars::prelude::*;
//!
//! let schema = Schema::from_columns([ColumnSpec::new("annotation_rank", ValueType::Integer)
//!     .coerce(true)
//!     .with_check(Check::in_range(1.0, 25.0))])
//! .unwrap();
//! let df = df!("annotation_rank" => ["1", "first", "40"]).unwrap();
//!
//! let report = validate(&df, &schema);
//! assert_eq!(report.len(), 2);
//! ```
//!
//! [`Schema`]: annot_model::Schema

pub mod checks;
pub mod column;
pub mod engine;
pub mod export;
pub mod resolution;
pub mod structure;
pub mod submission;
pub mod uniqueness;
pub mod value;

pub use engine::{Validator, validate};
pub use export::{REPORT_COLUMNS, report_to_frame};
pub use submission::{Submission, validate_submission};
pub use value::Value;
