//! The standard schema for compound annotation submissions.
//!
//! - [`annotation`]: the versioned column declaration used by the validator
//!   and the CLI `schema` listing.

pub mod annotation;

pub use annotation::{
    ANNOTATION_SCHEMA_TITLE, ANNOTATION_SCHEMA_VERSION, annotation_columns, annotation_schema,
};
