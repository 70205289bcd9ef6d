use annot_model::{Check, ColumnSpec, ReportDuplicates, Schema, SchemaError, ValueType};

fn sample_schema() -> Schema {
    Schema::builder()
        .title("annotations")
        .version("1")
        .column(
            ColumnSpec::new("rt_min", ValueType::Float)
                .coerce(true)
                .with_check(Check::greater_than_or_equal_to(0.0)),
        )
        .column(
            ColumnSpec::new("adduct", ValueType::String)
                .nullable(true)
                .with_check(Check::str_contains("M[+-]").unwrap()),
        )
        .column(ColumnSpec::pattern("score_\\d+", ValueType::Float).required(false))
        .strict(true)
        .report_duplicates(ReportDuplicates::ExcludeFirst)
        .build()
        .unwrap()
}

#[test]
fn schema_round_trips_through_json() {
    let schema = sample_schema();
    let json = serde_json::to_string(&schema).unwrap();
    let round: Schema = serde_json::from_str(&json).unwrap();
    assert_eq!(round.definition(), schema.definition());
    assert_eq!(round.entries().filter(|(_, m)| m.is_pattern()).count(), 1);
}

#[test]
fn json_defaults_apply() {
    let json = r#"{
        "columns": [
            {"name": "compound", "value_type": "string"},
            {"name": "rank", "value_type": "integer", "checks": [{"kind": "range", "min": 1, "max": 25}]}
        ]
    }"#;
    let schema: Schema = serde_json::from_str(json).unwrap();
    assert!(!schema.strict());
    assert_eq!(schema.report_duplicates(), ReportDuplicates::All);
    let compound = schema.column("compound").unwrap();
    assert!(compound.required);
    assert!(!compound.nullable);
    let rank = schema.column("rank").unwrap();
    assert_eq!(rank.checks, vec![Check::in_range(1.0, 25.0)]);
    assert_eq!(rank.checks[0].id(), "in_range(1, 25)");
}

#[test]
fn invalid_json_schema_is_rejected() {
    let json = r#"{"columns": [{"name": "a", "value_type": "string"}, {"name": "a", "value_type": "string"}]}"#;
    let err = serde_json::from_str::<Schema>(json).unwrap_err();
    assert!(err.to_string().contains("declared more than once"));

    let json = r#"{"columns": [{"name": "a", "value_type": "string", "checks": [{"kind": "pattern", "regex": "("}]}]}"#;
    assert!(serde_json::from_str::<Schema>(json).is_err());
}

#[test]
fn errors_render() {
    let err = SchemaError::DuplicateColumn {
        name: "adduct".into(),
    };
    assert_eq!(err.to_string(), "column 'adduct' is declared more than once");
}
