//! Left join that keeps the primary frame's rows exactly.

use std::collections::HashMap;

use annot_common::{any_to_string, is_missing};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{FrameError, JoinSide, Result};
use crate::util::{cell, gather};

/// Suffix appended to `other` columns whose name already exists in `primary`.
pub const RIGHT_SUFFIX: &str = "_right";

/// Left-join `other` onto `primary`.
///
/// With a non-empty `on`, rows match when every key renders to the same
/// text; the first matching `other` row wins and rows with a missing key
/// never match. With an empty `on`, rows are matched by position.
///
/// The result has exactly `primary`'s rows in `primary`'s order. Unmatched
/// rows get nulls for every `other` column.
///
/// # Errors
///
/// [`FrameError::MissingJoinKey`] when a key column is absent from either side.
pub fn left_join_preserve_index(
    primary: &DataFrame,
    other: &DataFrame,
    on: &[&str],
) -> Result<DataFrame> {
    for key in on {
        for (side, df) in [(JoinSide::Primary, primary), (JoinSide::Other, other)] {
            if df.column(key).is_err() {
                return Err(FrameError::MissingJoinKey {
                    column: (*key).to_string(),
                    side,
                });
            }
        }
    }

    let matches: Vec<Option<usize>> = if on.is_empty() {
        (0..primary.height())
            .map(|idx| (idx < other.height()).then_some(idx))
            .collect()
    } else {
        let mut first_row: HashMap<Vec<String>, usize> = HashMap::new();
        for idx in 0..other.height() {
            if let Some(key) = row_key(other, on, idx)? {
                first_row.entry(key).or_insert(idx);
            }
        }
        let mut matches = Vec::with_capacity(primary.height());
        for idx in 0..primary.height() {
            let found = row_key(primary, on, idx)?.and_then(|key| first_row.get(&key).copied());
            matches.push(found);
        }
        matches
    };

    let mut columns = primary.get_columns().to_vec();
    for column in other.get_columns() {
        let name = column.name().as_str();
        if on.contains(&name) {
            continue;
        }
        let joined = gather(column, &matches)?;
        let joined = if primary.column(name).is_ok() {
            joined.with_name(format!("{name}{RIGHT_SUFFIX}").into())
        } else {
            joined
        };
        columns.push(joined);
    }

    let joined = DataFrame::new(columns)?;
    debug!(
        rows = joined.height(),
        matched = matches.iter().filter(|idx| idx.is_some()).count(),
        keys = on.len(),
        "left join"
    );
    Ok(joined)
}

fn row_key(df: &DataFrame, on: &[&str], idx: usize) -> Result<Option<Vec<String>>> {
    let mut key = Vec::with_capacity(on.len());
    for name in on {
        let value = cell(df.column(name)?, idx);
        if is_missing(&value) {
            return Ok(None);
        }
        key.push(any_to_string(value));
    }
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{AnyValue, Column, NamedFrom};

    fn primary() -> DataFrame {
        DataFrame::new(vec![
            Column::new("id".into(), [Some("a"), Some("b"), None, Some("c")]),
            Column::new("mz".into(), [1.0, 2.0, 3.0, 4.0]),
        ])
        .unwrap()
    }

    fn other() -> DataFrame {
        DataFrame::new(vec![
            Column::new("id".into(), [Some("b"), Some("a"), Some("b"), None]),
            Column::new("mz".into(), [20.0, 10.0, 99.0, 0.0]),
            Column::new("class".into(), ["B", "A", "B2", "null"]),
        ])
        .unwrap()
    }

    #[test]
    fn keeps_primary_rows_and_first_match() {
        let joined = left_join_preserve_index(&primary(), &other(), &["id"]).unwrap();
        assert_eq!(joined.height(), 4);
        let class = joined.column("class").unwrap();
        assert_eq!(class.get(0).unwrap(), AnyValue::String("A"));
        assert_eq!(class.get(1).unwrap(), AnyValue::String("B"));
        assert_eq!(class.get(2).unwrap(), AnyValue::Null);
        assert_eq!(class.get(3).unwrap(), AnyValue::Null);
    }

    #[test]
    fn clashing_columns_get_suffix() {
        let joined = left_join_preserve_index(&primary(), &other(), &["id"]).unwrap();
        let names: Vec<&str> = joined
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, ["id", "mz", "mz_right", "class"]);
        let right = joined.column("mz_right").unwrap();
        assert_eq!(right.get(1).unwrap(), AnyValue::Float64(20.0));
    }

    #[test]
    fn empty_on_joins_by_position() {
        let short = DataFrame::new(vec![Column::new("note".into(), ["first"])]).unwrap();
        let joined = left_join_preserve_index(&primary(), &short, &[]).unwrap();
        let note = joined.column("note").unwrap();
        assert_eq!(note.get(0).unwrap(), AnyValue::String("first"));
        assert_eq!(note.null_count(), 3);
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = left_join_preserve_index(&primary(), &other(), &["inchikey"]).unwrap_err();
        assert!(matches!(
            err,
            FrameError::MissingJoinKey {
                side: JoinSide::Primary,
                ..
            }
        ));
    }
}
