//! Value checks.

use annot_formula::is_valid_formula;
use annot_model::Check;

use crate::value::Value;

/// Whether `value` passes `check`.
///
/// Range checks need a number; text never passes them. String checks run on
/// the rendered value.
pub fn passes(check: &Check, value: &Value) -> bool {
    match check {
        Check::Range { min, max } => value.as_f64().is_some_and(|v| {
            min.is_none_or(|lo| v >= lo) && max.is_none_or(|hi| v <= hi)
        }),
        Check::Length { min, max } => {
            let len = value.render().chars().count();
            min.is_none_or(|lo| len >= lo) && max.is_none_or(|hi| len <= hi)
        }
        Check::Pattern { regex } => regex.is_match(&value.render()),
        Check::Formula => is_valid_formula(&value.render()),
    }
}
