//! Cell access and row gathering shared by the table utilities.

use polars::prelude::{AnyValue, Column, DataFrame, IdxCa, IdxSize, NewChunkedArray};

use crate::error::{FrameError, Result};

/// Value at `idx`, or null past the end of the column.
pub(crate) fn cell(column: &Column, idx: usize) -> AnyValue<'_> {
    if idx < column.len() {
        column.get(idx).unwrap_or(AnyValue::Null)
    } else {
        AnyValue::Null
    }
}

/// Rows of `column` at the given positions; `None` yields a null row.
pub(crate) fn gather(column: &Column, indices: &[Option<usize>]) -> Result<Column> {
    let idx = IdxCa::from_iter_options(
        "idx".into(),
        indices.iter().map(|idx| idx.map(|idx| idx as IdxSize)),
    );
    Ok(column.take(&idx)?)
}

/// Row positions `0..len` padded with `None` up to `height`.
pub(crate) fn padded_indices(len: usize, height: usize) -> Vec<Option<usize>> {
    (0..height).map(|idx| (idx < len).then_some(idx)).collect()
}

pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| FrameError::ColumnNotFound(name.to_string()))
}
