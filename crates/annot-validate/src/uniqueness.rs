//! Duplicate detection within a column.

use std::collections::HashMap;

use annot_model::ReportDuplicates;

use crate::value::Value;

/// Rows holding a value that occurs more than once, filtered by `mode`.
///
/// `cells` pairs a row index with its value; null cells are left out by the
/// caller and so never collide. Rows come back in ascending order.
pub fn duplicate_rows(cells: &[(usize, &Value)], mode: ReportDuplicates) -> Vec<usize> {
    let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
    for (row, value) in cells {
        groups.entry(value.render()).or_default().push(*row);
    }

    let mut rows: Vec<usize> = groups
        .into_values()
        .filter(|rows| rows.len() > 1)
        .flat_map(|rows| {
            let keep = match mode {
                ReportDuplicates::All => 0..rows.len(),
                ReportDuplicates::ExcludeFirst => 1..rows.len(),
                ReportDuplicates::ExcludeLast => 0..rows.len() - 1,
            };
            rows[keep].to_vec()
        })
        .collect();
    rows.sort_unstable();
    rows
}
