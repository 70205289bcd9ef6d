use annot_frame::{
    dedupe_join, group_join_unique, left_join_preserve_index, merge_fill, normalize_missing,
    unique_list,
};
use polars::prelude::{AnyValue, Column, DataFrame, NamedFrom};
use proptest::prelude::*;

#[test]
fn merge_fill_priority() {
    let target = DataFrame::new(vec![
        Column::new("a".into(), [Some(1i64)]),
        Column::new("b".into(), [None::<i64>]),
    ])
    .unwrap();
    let source = DataFrame::new(vec![
        Column::new("a".into(), [2i64]),
        Column::new("b".into(), [3i64]),
    ])
    .unwrap();

    let merged = merge_fill(&target, &source).unwrap();
    let expected = DataFrame::new(vec![
        Column::new("a".into(), [1i64]),
        Column::new("b".into(), [3i64]),
    ])
    .unwrap();
    assert!(merged.equals_missing(&expected));
}

#[test]
fn dedupe_case_insensitivity() {
    assert_eq!(dedupe_join(["NA", "na", "foo", ""], true), "NA; foo");
}

#[test]
fn merge_partial_submission_then_group() {
    // A resubmission fills gaps from the prior state, then rows are grouped per compound.
    let prior = DataFrame::new(vec![
        Column::new("compound".into(), [1i64, 1, 2]),
        Column::new("compound_class".into(), ["Flavonoid", "flavonoid", "Lipid"]),
    ])
    .unwrap();
    let update = DataFrame::new(vec![
        Column::new("compound".into(), [1i64, 1, 2]),
        Column::new("compound_class".into(), [None, Some("Alkaloid"), None]),
    ])
    .unwrap();

    let merged = normalize_missing(&merge_fill(&update, &prior).unwrap()).unwrap();
    let grouped = group_join_unique(&merged, &["compound"], false).unwrap();
    let classes = grouped.column("compound_class").unwrap();
    assert_eq!(classes.get(0).unwrap(), AnyValue::String("Flavonoid; Alkaloid"));
    assert_eq!(classes.get(1).unwrap(), AnyValue::String("Lipid"));
}

#[test]
fn join_with_integer_keys() {
    let primary = DataFrame::new(vec![Column::new("compound".into(), [3i64, 1, 2])]).unwrap();
    let other = DataFrame::new(vec![
        Column::new("compound".into(), [1i64, 2]),
        Column::new("inchikey".into(), ["KEY-ONE", "KEY-TWO"]),
    ])
    .unwrap();
    let joined = left_join_preserve_index(&primary, &other, &["compound"]).unwrap();
    let keys = joined.column("inchikey").unwrap();
    assert_eq!(keys.get(0).unwrap(), AnyValue::Null);
    assert_eq!(keys.get(1).unwrap(), AnyValue::String("KEY-ONE"));
    assert_eq!(keys.get(2).unwrap(), AnyValue::String("KEY-TWO"));
}

proptest! {
    #[test]
    fn unique_list_has_no_case_insensitive_duplicates(values in prop::collection::vec("[a-cA-C ]{0,3}", 0..20)) {
        let unique = unique_list(&values, true);
        let mut lowered: Vec<String> = unique.iter().map(|v| v.to_lowercase()).collect();
        lowered.sort();
        lowered.dedup();
        prop_assert_eq!(lowered.len(), unique.len());
        prop_assert!(unique.iter().all(|v| !v.trim().is_empty()));
    }

    #[test]
    fn unique_list_covers_every_non_blank_input(values in prop::collection::vec("[a-cA-C ]{0,3}", 0..20)) {
        let unique = unique_list(&values, true);
        for value in values.iter().filter(|v| !v.trim().is_empty()) {
            prop_assert!(unique.iter().any(|u| u.eq_ignore_ascii_case(value)));
        }
    }

    #[test]
    fn dedupe_join_is_idempotent(values in prop::collection::vec("[a-z]{1,4}", 0..12)) {
        let once = unique_list(&values, false);
        let twice = unique_list(&once, false);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_fill_never_overwrites_target(
        target in prop::collection::vec(prop::option::of(0i64..100), 0..10),
        source in prop::collection::vec(prop::option::of(0i64..100), 0..10),
    ) {
        let t = DataFrame::new(vec![Column::new("v".into(), target.clone())]).unwrap();
        let s = DataFrame::new(vec![Column::new("v".into(), source.clone())]).unwrap();
        let merged = merge_fill(&t, &s).unwrap();
        prop_assert_eq!(merged.height(), target.len().max(source.len()));
        let column = merged.column("v").unwrap();
        for (idx, value) in target.iter().enumerate() {
            if let Some(v) = value {
                prop_assert_eq!(column.get(idx).unwrap(), AnyValue::Int64(*v));
            }
        }
    }
}
