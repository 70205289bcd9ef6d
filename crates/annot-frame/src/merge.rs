//! Priority merge-fill of two frames.

use annot_common::is_missing;
use polars::prelude::{BooleanChunked, Column, DataFrame, DataType, IntoColumn, NewChunkedArray};
use tracing::debug;

use crate::error::Result;
use crate::util::{cell, gather, padded_indices};

/// Fill the missing cells of `target` from `source`, row by row.
///
/// Rows are aligned by position and the result is as tall as the taller
/// input. Target columns come first in their own order, followed by the
/// columns only `source` has. A non-missing target value is never replaced.
///
/// When a shared column has different dtypes on the two sides, both are
/// cast to a common type first (integers widen to `Int64`, mixed numerics
/// to `Float64`, anything else to `String`).
pub fn merge_fill(target: &DataFrame, source: &DataFrame) -> Result<DataFrame> {
    let height = target.height().max(source.height());
    let target_rows = padded_indices(target.height(), height);
    let source_rows = padded_indices(source.height(), height);

    let mut columns = Vec::with_capacity(target.width() + source.width());
    for column in target.get_columns() {
        let padded = gather(column, &target_rows)?;
        let merged = match source.column(column.name()) {
            Ok(fill) => fill_missing(&padded, &gather(fill, &source_rows)?)?,
            Err(_) => padded,
        };
        columns.push(merged);
    }
    for column in source.get_columns() {
        if target.column(column.name()).is_err() {
            columns.push(gather(column, &source_rows)?);
        }
    }

    let merged = DataFrame::new(columns)?;
    debug!(
        rows = height,
        columns = merged.width(),
        target_rows = target.height(),
        source_rows = source.height(),
        "merged frames"
    );
    Ok(merged)
}

fn fill_missing(target: &Column, source: &Column) -> Result<Column> {
    let dtype = common_dtype(target.dtype(), source.dtype());
    let target = target.cast(&dtype)?;
    let source = source.cast(&dtype)?;
    let keep: Vec<bool> = (0..target.len())
        .map(|idx| !is_missing(&cell(&target, idx)) || is_missing(&cell(&source, idx)))
        .collect();
    let mask = BooleanChunked::from_slice("keep".into(), &keep);
    let merged = target
        .as_materialized_series()
        .zip_with(&mask, source.as_materialized_series())?;
    Ok(merged.into_column())
}

fn common_dtype(left: &DataType, right: &DataType) -> DataType {
    match (left, right) {
        _ if left == right => left.clone(),
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),
        _ if left.is_integer() && right.is_integer() => DataType::Int64,
        _ if (left.is_integer() || left.is_float()) && (right.is_integer() || right.is_float()) => {
            DataType::Float64
        }
        _ => DataType::String,
    }
}
