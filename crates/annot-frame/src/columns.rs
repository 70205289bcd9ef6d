//! Column renaming and single-value lookup.

use polars::prelude::{AnyValue, DataFrame};

use crate::error::Result;
use crate::util::require_column;

/// Prefix column names, returning a new frame.
///
/// `rename` selects the columns to prefix (all columns when `None`); names in
/// `keep` are never renamed.
///
/// # Errors
///
/// [`crate::FrameError::ColumnNotFound`] when `rename` names an absent column.
pub fn add_column_prefix(
    df: &DataFrame,
    prefix: &str,
    rename: Option<&[&str]>,
    keep: &[&str],
) -> Result<DataFrame> {
    let targets: Vec<String> = match rename {
        Some(names) => names.iter().map(|name| (*name).to_string()).collect(),
        None => df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect(),
    };
    let mut out = df.clone();
    for name in &targets {
        require_column(df, name)?;
        if keep.contains(&name.as_str()) {
            continue;
        }
        out.rename(name, format!("{prefix}{name}").into())?;
    }
    Ok(out)
}

/// First cell of `column`, or `default` when the frame has no rows.
pub fn first_value_or<'a>(
    df: &'a DataFrame,
    column: &str,
    default: AnyValue<'a>,
) -> Result<AnyValue<'a>> {
    let column = require_column(df, column)?;
    if column.is_empty() {
        return Ok(default);
    }
    Ok(column.get(0)?)
}
