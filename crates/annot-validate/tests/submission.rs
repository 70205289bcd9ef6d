use std::fs;

use annot_model::{Check, ColumnSpec, ReportStatus, Schema, ValueType};
use annot_standards::annotation_schema;
use annot_validate::{Submission, validate_submission};
use polars::prelude::{Column, DataFrame, NamedFrom};
use tempfile::TempDir;

const HEADER: &str = "compound\tannotation_rank\tformula_neutral\tformula_ion\tadduct\tsmiles\tinchi\tinchikey\tcompound_class\trt_min\n";

#[test]
fn tsv_file_is_read_and_validated() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("casmi.tsv");
    let body = "1\t1\tC2H4O2\tC2H5O2+\t[M+H]+\tCC(=O)O\t\tQTBSBXVTEAMEQO-UHFFFAOYSA-N\tAcid\t3.5\n\
                2\t1\tC2H6O\t\t[M+Na]+\tCCO\t\t\tNA\t120\n";
    fs::write(&path, format!("{HEADER}{body}")).unwrap();

    let report = validate_submission(Submission::from(path.as_path()), &annotation_schema().unwrap());
    assert_eq!(report.status, ReportStatus::Validated);
    assert_eq!(report.len(), 1);
    let failure = &report.failure_cases[0];
    assert_eq!(failure.column.as_deref(), Some("rt_min"));
    assert_eq!(failure.check, "less_than_or_equal_to(100)");
    assert_eq!(failure.row, Some(1));
}

#[test]
fn unreadable_file_gives_unreadable_report() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("casmi.xlsx");
    fs::write(&path, "binary").unwrap();

    let report = validate_submission(path.into(), &annotation_schema().unwrap());
    assert!(report.is_unreadable());
    assert!(!report.is_valid());
    assert_eq!(report.len(), 1);
    let failure = &report.failure_cases[0];
    assert_eq!(failure.check, "read_table");
    assert!(failure
        .failure_case
        .starts_with("input could not be parsed into a table: "));
}

#[test]
fn missing_file_is_unreadable() {
    let dir = TempDir::new().unwrap();
    let report = validate_submission(
        Submission::Path(dir.path().join("absent.tsv")),
        &annotation_schema().unwrap(),
    );
    assert_eq!(report.status, ReportStatus::Unreadable);
}

#[test]
fn in_memory_table() {
    let df = DataFrame::new(vec![Column::new("compound".into(), [1i64])]).unwrap();
    let report = validate_submission(df.into(), &annotation_schema().unwrap());
    assert_eq!(report.status, ReportStatus::Validated);
    // Everything but `compound` that is required is missing.
    assert_eq!(report.len(), 8);
    assert!(report.iter().all(|f| f.check == "column_required"));
}

#[test]
fn missing_tokens_in_numeric_csv_column_without_coercion() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("retention.csv");
    fs::write(&path, "rt_min\n1.5\nNA\n2.0\n").unwrap();

    let schema = Schema::from_columns([ColumnSpec::new("rt_min", ValueType::Float)
        .nullable(true)
        .with_check(Check::greater_than_or_equal_to(0.0))])
    .unwrap()
    .with_coerce(false);
    let report = validate_submission(path.into(), &schema);
    assert_eq!(report.status, ReportStatus::Validated);
    assert!(report.is_valid(), "{:?}", report.failure_cases);
}

#[test]
fn sodium_adduct_is_checked_not_treated_as_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("casmi.tsv");
    let body = "1\t1\tC2H4O2\t\tNa\tCC(=O)O\t\t\t\t3.5\n";
    fs::write(&path, format!("{HEADER}{body}")).unwrap();

    let report = validate_submission(path.into(), &annotation_schema().unwrap());
    assert_eq!(report.len(), 1);
    let failure = &report.failure_cases[0];
    assert_eq!(failure.column.as_deref(), Some("adduct"));
    assert_eq!(failure.check, "str_contains('M[+-]')");
    assert_eq!(failure.failure_case, "Na");
}
