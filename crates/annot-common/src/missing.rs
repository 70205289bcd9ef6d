//! Missing-value detection.
//!
//! Submissions arrive from spreadsheets and text exports where "no value" is
//! spelled many ways. [`is_missing`] is the one place that decides what
//! counts as missing; ingestion and validation normalize through it.

use polars::prelude::AnyValue;

/// Text tokens treated as missing (compared exactly after trimming).
///
/// Matching is case-sensitive so element symbols such as `Na` stay values.
pub const MISSING_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "<NA>", "NaT",
];

/// Returns true if a cell holds no value.
///
/// Nulls, NaN floats, blank strings and the [`MISSING_TOKENS`] are missing.
///
/// ```
/// use polars::prelude::AnyValue;
/// use annot_common::is_missing;
///
/// assert!(is_missing(&AnyValue::Null));
/// assert!(is_missing(&AnyValue::String(" N/A ")));
/// assert!(!is_missing(&AnyValue::String("C6H12O6")));
/// ```
pub fn is_missing(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        AnyValue::String(s) => is_missing_str(s),
        AnyValue::StringOwned(s) => is_missing_str(s),
        _ => false,
    }
}

/// String form of [`is_missing`].
pub fn is_missing_str(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_tokens_are_missing() {
        assert!(is_missing_str("NaN"));
        assert!(is_missing_str("<NA>"));
        assert!(is_missing_str("NaT"));
        assert!(is_missing_str(" n/a "));
        assert!(is_missing_str("   "));
    }

    #[test]
    fn token_case_variants_are_values() {
        assert!(!is_missing_str("Na"));
        assert!(!is_missing_str("na"));
        assert!(!is_missing_str("NONE"));
        assert!(!is_missing_str("Null"));
        assert!(!is_missing(&AnyValue::String("Na")));
    }

    #[test]
    fn values_are_not_missing() {
        assert!(!is_missing(&AnyValue::Int64(0)));
        assert!(!is_missing(&AnyValue::Float64(0.0)));
        assert!(!is_missing_str("NaCl"));
        assert!(!is_missing_str("nano"));
    }

    #[test]
    fn nan_float_is_missing() {
        assert!(is_missing(&AnyValue::Float64(f64::NAN)));
        assert!(is_missing(&AnyValue::Float32(f32::NAN)));
    }
}
