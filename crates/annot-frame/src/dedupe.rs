//! Order-preserving deduplication and grouped unique-value aggregation.

use std::collections::{HashMap, HashSet};

use annot_common::{any_to_string, is_missing};
use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::debug;

use crate::error::Result;
use crate::util::{cell, gather, require_column};

/// Separator used by [`dedupe_join`].
pub const DEFAULT_SEPARATOR: &str = "; ";

/// Distinct non-blank values in first-seen order.
///
/// With `case_insensitive`, values are compared by their lowercase form and
/// the first spelling seen is kept.
pub fn unique_list<I, S>(values: I, case_insensitive: bool) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for value in values {
        let value = value.as_ref();
        if value.trim().is_empty() {
            continue;
        }
        let key = if case_insensitive {
            value.to_lowercase()
        } else {
            value.to_string()
        };
        if seen.insert(key) {
            unique.push(value.to_string());
        }
    }
    unique
}

/// [`unique_list`] joined with `"; "`. Empty input gives an empty string.
///
/// ```
/// use annot_frame::dedupe_join;
///
/// assert_eq!(dedupe_join(["NA", "na", "foo", ""], true), "NA; foo");
/// ```
pub fn dedupe_join<I, S>(values: I, case_insensitive: bool) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    dedupe_join_with(values, case_insensitive, DEFAULT_SEPARATOR)
}

pub fn dedupe_join_with<I, S>(values: I, case_insensitive: bool, separator: &str) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    unique_list(values, case_insensitive).join(separator)
}

/// Group rows by `group_columns` and collapse every other column.
///
/// Groups appear in first-seen order and a missing key is a group of its
/// own. Each remaining column becomes either a list of its distinct values
/// (`as_lists`) or their [`dedupe_join`] string (case-sensitive). Missing
/// cells are dropped from both forms.
pub fn group_join_unique(
    table: &DataFrame,
    group_columns: &[&str],
    as_lists: bool,
) -> Result<DataFrame> {
    let keys = group_columns
        .iter()
        .map(|name| require_column(table, name))
        .collect::<Result<Vec<_>>>()?;
    if table.height() == 0 {
        return empty_grouped(table, group_columns, as_lists);
    }

    let mut positions: HashMap<Vec<Option<String>>, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for idx in 0..table.height() {
        let key: Vec<Option<String>> = keys
            .iter()
            .map(|column| {
                let value = cell(column, idx);
                (!is_missing(&value)).then(|| any_to_string(value))
            })
            .collect();
        let position = *positions.entry(key).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[position].push(idx);
    }

    let first_rows: Vec<Option<usize>> = groups.iter().map(|rows| rows.first().copied()).collect();
    let mut columns = Vec::with_capacity(table.width());
    for column in table.get_columns() {
        if group_columns.contains(&column.name().as_str()) {
            columns.push(gather(column, &first_rows)?);
        } else if as_lists {
            columns.push(list_column(column, &groups)?);
        } else {
            columns.push(joined_column(column, &groups));
        }
    }

    let grouped = DataFrame::new(columns)?;
    debug!(
        rows = table.height(),
        groups = grouped.height(),
        as_lists,
        "grouped unique values"
    );
    Ok(grouped)
}

/// Zero-row output with the same column types as a non-empty grouping.
fn empty_grouped(table: &DataFrame, group_columns: &[&str], as_lists: bool) -> Result<DataFrame> {
    let columns = table
        .get_columns()
        .iter()
        .map(|column| {
            let name = column.name().clone();
            if group_columns.contains(&name.as_str()) {
                column.clear()
            } else if as_lists {
                Column::new_empty(name, &DataType::List(Box::new(column.dtype().clone())))
            } else {
                Column::new_empty(name, &DataType::String)
            }
        })
        .collect();
    Ok(DataFrame::new(columns)?)
}

/// First row of each distinct non-missing value within `rows`.
fn distinct_rows(column: &Column, rows: &[usize]) -> Vec<Option<usize>> {
    let mut seen = HashSet::new();
    rows.iter()
        .copied()
        .filter(|&idx| {
            let value = cell(column, idx);
            !is_missing(&value) && seen.insert(any_to_string(value))
        })
        .map(Some)
        .collect()
}

fn list_column(column: &Column, groups: &[Vec<usize>]) -> Result<Column> {
    let mut lists: Vec<Series> = Vec::with_capacity(groups.len());
    for rows in groups {
        let distinct = gather(column, &distinct_rows(column, rows))?;
        lists.push(distinct.as_materialized_series().clone());
    }
    Ok(Series::new(column.name().clone(), lists).into_column())
}

fn joined_column(column: &Column, groups: &[Vec<usize>]) -> Column {
    let joined: Vec<String> = groups
        .iter()
        .map(|rows| {
            let values = rows.iter().filter_map(|&idx| {
                let value = cell(column, idx);
                (!is_missing(&value)).then(|| any_to_string(value))
            });
            dedupe_join(values, false)
        })
        .collect();
    Column::new(column.name().clone(), joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::AnyValue;

    #[test]
    fn dedupe_join_keeps_first_spelling() {
        assert_eq!(dedupe_join(["NA", "na", "foo", ""], true), "NA; foo");
        assert_eq!(dedupe_join(["NA", "na", "foo", ""], false), "NA; na; foo");
        assert_eq!(dedupe_join(Vec::<String>::new(), true), "");
        assert_eq!(dedupe_join(["  ", ""], true), "");
    }

    #[test]
    fn custom_separator() {
        assert_eq!(dedupe_join_with(["b", "a", "b"], false, "|"), "b|a");
    }

    #[test]
    fn unique_list_preserves_order() {
        assert_eq!(
            unique_list(["Flavonoid", "lipid", "FLAVONOID", "Lipid"], true),
            vec!["Flavonoid", "lipid"]
        );
    }

    fn annotations() -> DataFrame {
        DataFrame::new(vec![
            Column::new("compound".into(), [Some(2i64), Some(1), Some(2), None, Some(2), None]),
            Column::new(
                "adduct".into(),
                [Some("[M+H]+"), Some("[M-H]-"), Some("[M+Na]+"), Some("[M+H]+"), Some("[M+H]+"), None],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn groups_in_first_seen_order_with_joined_strings() {
        let grouped = group_join_unique(&annotations(), &["compound"], false).unwrap();
        assert_eq!(grouped.height(), 3);
        let compound = grouped.column("compound").unwrap();
        assert_eq!(compound.get(0).unwrap(), AnyValue::Int64(2));
        assert_eq!(compound.get(1).unwrap(), AnyValue::Int64(1));
        assert_eq!(compound.get(2).unwrap(), AnyValue::Null);
        let adduct = grouped.column("adduct").unwrap();
        assert_eq!(adduct.get(0).unwrap(), AnyValue::String("[M+H]+; [M+Na]+"));
        assert_eq!(adduct.get(2).unwrap(), AnyValue::String("[M+H]+"));
    }

    #[test]
    fn groups_as_lists() {
        let grouped = group_join_unique(&annotations(), &["compound"], true).unwrap();
        let adduct = grouped.column("adduct").unwrap();
        let first = adduct.list().unwrap().get_as_series(0).unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first.get(1).unwrap(), AnyValue::String("[M+Na]+"));
    }

    #[test]
    fn empty_table_keeps_grouped_column_types() {
        let empty = annotations().clear();
        let lists = group_join_unique(&empty, &["compound"], true).unwrap();
        assert_eq!(lists.height(), 0);
        assert_eq!(lists.column("compound").unwrap().dtype(), &DataType::Int64);
        assert_eq!(
            lists.column("adduct").unwrap().dtype(),
            &DataType::List(Box::new(DataType::String))
        );

        let joined = group_join_unique(&empty, &["compound"], false).unwrap();
        assert_eq!(joined.column("adduct").unwrap().dtype(), &DataType::String);

        let populated = group_join_unique(&annotations(), &["compound"], true).unwrap();
        assert_eq!(
            populated.column("adduct").unwrap().dtype(),
            lists.column("adduct").unwrap().dtype()
        );
    }

    #[test]
    fn unknown_group_column_is_an_error() {
        assert!(group_join_unique(&annotations(), &["smiles"], false).is_err());
    }
}
