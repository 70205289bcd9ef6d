//! Entry point for validating a submitted table or file.

use std::path::{Path, PathBuf};

use annot_ingest::read_table;
use annot_model::{Schema, ValidationReport};
use polars::prelude::DataFrame;
use tracing::{error, info_span};

use crate::engine::Validator;

/// What a caller hands in for validation.
#[derive(Debug, Clone)]
pub enum Submission {
    /// An already loaded table.
    Table(DataFrame),
    /// A file read by extension.
    Path(PathBuf),
}

impl From<DataFrame> for Submission {
    fn from(df: DataFrame) -> Self {
        Submission::Table(df)
    }
}

impl From<PathBuf> for Submission {
    fn from(path: PathBuf) -> Self {
        Submission::Path(path)
    }
}

impl From<&Path> for Submission {
    fn from(path: &Path) -> Self {
        Submission::Path(path.to_path_buf())
    }
}

impl Validator {
    /// Load (if needed) and validate a submission.
    ///
    /// A file that cannot be read gives an [`Unreadable`] report with a single
    /// `read_table` failure; the error is logged, not returned.
    ///
    /// [`Unreadable`]: annot_model::ReportStatus::Unreadable
    pub fn validate_submission(&self, submission: Submission, schema: &Schema) -> ValidationReport {
        match submission {
            Submission::Table(df) => self.validate(&df, schema),
            Submission::Path(path) => {
                let span = info_span!("submission", path = %path.display());
                let _guard = span.enter();
                match read_table(&path) {
                    Ok(df) => self.validate(&df, schema),
                    Err(err) => {
                        error!(error = %err, "submission could not be read");
                        ValidationReport::unreadable(err)
                    }
                }
            }
        }
    }
}

/// [`Validator::validate_submission`] with the default validator.
pub fn validate_submission(submission: Submission, schema: &Schema) -> ValidationReport {
    Validator::default().validate_submission(submission, schema)
}
