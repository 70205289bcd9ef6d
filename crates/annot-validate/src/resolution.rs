//! Binding table columns to column specs.

use annot_model::{ColumnSpec, Schema};

/// A table column bound to the spec that validates it.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    pub spec: &'a ColumnSpec,
    /// Position of the spec in the schema.
    pub spec_index: usize,
    pub column: &'a str,
}

/// Result of matching a table's column names against a schema.
#[derive(Debug, Default)]
pub struct Resolution<'a> {
    /// In schema declaration order; a pattern family in table column order.
    pub bound: Vec<Binding<'a>>,
    /// Table columns no spec matches, in table order.
    pub unresolved: Vec<&'a str>,
    /// Required specs that matched no column.
    pub missing_required: Vec<&'a ColumnSpec>,
}

/// Match `columns` against `schema`.
///
/// An exact spec wins over patterns; among patterns the first declared wins.
pub fn resolve<'a>(schema: &'a Schema, columns: &[&'a str]) -> Resolution<'a> {
    let entries: Vec<_> = schema.entries().collect();
    let mut per_spec: Vec<Vec<&'a str>> = vec![Vec::new(); entries.len()];
    let mut unresolved = Vec::new();

    for &column in columns {
        let exact = entries
            .iter()
            .position(|(_, matcher)| !matcher.is_pattern() && matcher.matches(column));
        let chosen = exact.or_else(|| {
            entries
                .iter()
                .position(|(_, matcher)| matcher.is_pattern() && matcher.matches(column))
        });
        match chosen {
            Some(index) => per_spec[index].push(column),
            None => unresolved.push(column),
        }
    }

    let mut bound = Vec::new();
    let mut missing_required = Vec::new();
    for (spec_index, (&(spec, _), matched)) in entries.iter().zip(per_spec).enumerate() {
        if matched.is_empty() && spec.required {
            missing_required.push(spec);
        }
        bound.extend(matched.into_iter().map(|column| Binding {
            spec,
            spec_index,
            column,
        }));
    }

    Resolution {
        bound,
        unresolved,
        missing_required,
    }
}
