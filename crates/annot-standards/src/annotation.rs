//! Annotation table schema.
//!
//! One row per candidate annotation of a challenge compound. Formula columns
//! are declared as patterns so that every column starting with
//! `formula_neutral` or `formula_ion` is validated as a chemical formula.

use annot_model::{Check, ColumnSpec, ReportDuplicates, Result, Schema, ValueType};

pub const ANNOTATION_SCHEMA_TITLE: &str = "Validate";

/// Bumped whenever a column, check or policy of the schema changes.
pub const ANNOTATION_SCHEMA_VERSION: &str = "1.0.0";

// Mass window accepted for precursor and monoisotopic masses.
const MIN_MASS: f64 = 50.0;
const MAX_MASS: f64 = 10_000.0;

/// Column declarations in report order.
pub fn annotation_columns() -> Result<Vec<ColumnSpec>> {
    Ok(vec![
        ColumnSpec::new("compound", ValueType::Integer)
            .coerce(true)
            .with_check(Check::greater_than_or_equal_to(0.0))
            .with_description("Challenge compound number"),
        ColumnSpec::new("filename", ValueType::String)
            .required(false)
            .with_check(Check::str_length(1, None))
            .with_description("Source spectrum file"),
        ColumnSpec::new("rt_min", ValueType::Float)
            .nullable(true)
            .required(false)
            .with_checks([
                Check::greater_than_or_equal_to(0.0),
                Check::less_than_or_equal_to(100.0),
            ])
            .with_description("Retention time in minutes"),
        ColumnSpec::new("precursor_mz", ValueType::Float)
            .nullable(true)
            .required(false)
            .with_checks(mass_window())
            .with_description("Precursor m/z"),
        ColumnSpec::new("challenge_class", ValueType::String)
            .required(false)
            .with_check(Check::str_length(1, None)),
        ColumnSpec::new("annotation_rank", ValueType::Integer)
            .coerce(true)
            .with_checks([
                Check::greater_than_or_equal_to(1.0),
                Check::less_than_or_equal_to(25.0),
            ])
            .with_description("Rank of the candidate, 1 is best"),
        ColumnSpec::new("monoisotopic_mass", ValueType::Float)
            .nullable(true)
            .coerce(true)
            .required(false)
            .with_checks(mass_window()),
        formula_column("formula_neutral", "Neutral molecular formula"),
        formula_column("formula_ion", "Ion formula including charge"),
        ColumnSpec::new("adduct", ValueType::String)
            .nullable(true)
            .with_check(Check::str_contains("M[+-]")?)
            .with_description("Adduct notation such as [M+H]+"),
        ColumnSpec::new("smiles", ValueType::String).nullable(true),
        ColumnSpec::new("inchi", ValueType::String).nullable(true),
        ColumnSpec::new("inchikey", ValueType::String)
            .nullable(true)
            .with_check(Check::str_length(14, Some(27)))
            .with_description("Full InChIKey or its 14-character first block"),
        ColumnSpec::new("compound_class", ValueType::String).nullable(true),
    ])
}

/// The standard annotation schema: strict, coercing, with case-insensitively
/// unique column names and every duplicate reported.
pub fn annotation_schema() -> Result<Schema> {
    Schema::builder()
        .title(ANNOTATION_SCHEMA_TITLE)
        .version(ANNOTATION_SCHEMA_VERSION)
        .columns(annotation_columns()?)
        .strict(true)
        .coerce(true)
        .unique_column_names(true)
        .report_duplicates(ReportDuplicates::All)
        .build()
}

fn mass_window() -> [Check; 2] {
    [
        Check::greater_than_or_equal_to(MIN_MASS),
        Check::less_than_or_equal_to(MAX_MASS),
    ]
}

fn formula_column(prefix: &str, description: &str) -> ColumnSpec {
    ColumnSpec::pattern(prefix, ValueType::String)
        .nullable(true)
        .coerce(true)
        .with_check(Check::formula())
        .with_description(description)
}
