//! Missing-value normalization and column backfilling.

use annot_common::is_missing_str;
use polars::prelude::{
    Column, DataFrame, DataType, Float32Chunked, Float64Chunked, IntoColumn, Series,
    StringChunked,
};

use crate::error::Result;

/// Return a copy of `df` where missing-like cells are null.
///
/// String cells that are blank or a missing token and NaN floats become
/// null; other dtypes are left as they are.
pub fn normalize_missing(df: &DataFrame) -> Result<DataFrame> {
    let mut out = df.clone();
    for column in df.get_columns() {
        if let Some(normalized) = null_missing(column)? {
            out.with_column(normalized)?;
        }
    }
    Ok(out)
}

fn null_missing(column: &Column) -> Result<Option<Column>> {
    let name = column.name().clone();
    let normalized = match column.dtype() {
        DataType::String => column
            .str()?
            .into_iter()
            .map(|value| value.filter(|text| !is_missing_str(text)))
            .collect::<StringChunked>()
            .with_name(name)
            .into_column(),
        DataType::Float64 => column
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect::<Float64Chunked>()
            .with_name(name)
            .into_column(),
        DataType::Float32 => column
            .f32()?
            .into_iter()
            .map(|value| value.filter(|v| !v.is_nan()))
            .collect::<Float32Chunked>()
            .with_name(name)
            .into_column(),
        _ => return Ok(None),
    };
    Ok(Some(normalized))
}

/// Replace empty strings with null in the named string columns, in place.
///
/// Names that are absent or not string-typed are skipped.
pub fn blank_empty_strings(df: &mut DataFrame, columns: &[&str]) -> Result<()> {
    for name in columns {
        let Ok(column) = df.column(name) else {
            continue;
        };
        if column.dtype() != &DataType::String {
            continue;
        }
        let blanked = column
            .str()?
            .into_iter()
            .map(|value| value.filter(|text| !text.is_empty()))
            .collect::<StringChunked>()
            .with_name(column.name().clone())
            .into_column();
        df.with_column(blanked)?;
    }
    Ok(())
}

/// Append an all-null string column for every name not yet in `df`.
pub fn create_missing_columns(df: &mut DataFrame, columns: &[&str]) -> Result<()> {
    let height = df.height();
    for name in columns {
        if df.column(name).is_ok() {
            continue;
        }
        df.with_column(Series::full_null((*name).into(), height, &DataType::String))?;
    }
    Ok(())
}
