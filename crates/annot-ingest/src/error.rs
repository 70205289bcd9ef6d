//! Error types for table ingestion.

use std::path::PathBuf;

use thiserror::Error;

use crate::format::TableFormat;

/// Errors that can occur while reading or writing tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create output file.
    #[error("failed to create file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Extension is recognized but this build cannot read it.
    #[error("{format} files are not supported: {path}")]
    UnsupportedFormat { path: PathBuf, format: TableFormat },

    /// Extension is not a known table format.
    #[error("unsupported file type: {path}")]
    UnsupportedExtension { path: PathBuf },

    // === Parsing Errors ===
    /// The file could not be parsed as a table.
    #[error("failed to parse {format} file {path}: {message}")]
    Parse {
        path: PathBuf,
        format: TableFormat,
        message: String,
    },

    /// The table could not be serialized.
    #[error("failed to write {format} file {path}: {message}")]
    Serialize {
        path: PathBuf,
        format: TableFormat,
        message: String,
    },

    /// A header cell is blank.
    #[error("table has an empty column name: {path}")]
    EmptyColumnName { path: PathBuf },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
