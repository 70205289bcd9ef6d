//! Validation engine.
//!
//! Validation is lazy: every check runs against every row and all failures
//! are collected into one [`ValidationReport`]. The input frame is never
//! modified; missing-value normalization and coercion work on a copy.

use std::num::NonZeroUsize;
use std::thread;
use std::time::Instant;

use annot_frame::normalize_missing;
use annot_model::{FailureCase, Schema, ValidationReport};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, warn};

use crate::column::{ColumnJob, evaluate};
use crate::resolution::resolve;
use crate::structure::table_failures;

/// Configurable validator. [`validate`] uses the defaults.
#[derive(Debug, Clone)]
pub struct Validator {
    parallel: bool,
}

impl Default for Validator {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate columns on scoped worker threads (default: on).
    ///
    /// The report is identical either way.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Validate `table` against `schema`.
    pub fn validate(&self, table: &DataFrame, schema: &Schema) -> ValidationReport {
        let span = info_span!("validate", rows = table.height(), columns = table.width());
        let _guard = span.enter();
        let start = Instant::now();

        let working = match normalize_missing(table) {
            Ok(df) => df,
            Err(error) => {
                warn!(%error, "missing-value normalization failed, validating raw values");
                table.clone()
            }
        };

        let names: Vec<&str> = working
            .get_columns()
            .iter()
            .map(|column| column.name().as_str())
            .collect();
        let resolution = resolve(schema, &names);
        let mut failures = table_failures(schema, &resolution, &names);
        debug!(
            bound = resolution.bound.len(),
            unresolved = resolution.unresolved.len(),
            missing_required = resolution.missing_required.len(),
            "columns resolved"
        );

        let mut jobs = Vec::with_capacity(resolution.bound.len());
        for binding in &resolution.bound {
            let Ok(data) = working.column(binding.column) else {
                continue;
            };
            jobs.push(ColumnJob {
                spec: binding.spec,
                data,
                coerce: schema.coerces(binding.spec),
                report_duplicates: schema.report_duplicates(),
            });
        }

        for column_failures in self.run(&jobs) {
            failures.extend(column_failures);
        }

        info!(
            columns = jobs.len(),
            failure_count = failures.len(),
            duration_ms = start.elapsed().as_millis(),
            "validation complete"
        );
        ValidationReport::validated(failures)
    }

    /// Per-column failures, in job order.
    fn run(&self, jobs: &[ColumnJob<'_>]) -> Vec<Vec<FailureCase>> {
        let workers = thread::available_parallelism()
            .map_or(1, NonZeroUsize::get)
            .min(jobs.len());
        if !self.parallel || workers < 2 {
            return jobs.iter().map(evaluate).collect();
        }

        let chunk_size = jobs.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = jobs
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || chunk.iter().map(evaluate).collect::<Vec<_>>()))
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
                })
                .collect()
        })
    }
}

/// Validate with the default [`Validator`].
pub fn validate(table: &DataFrame, schema: &Schema) -> ValidationReport {
    Validator::default().validate(table, schema)
}
