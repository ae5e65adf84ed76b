//! Tests to verify correct handling of null values across all checks.
//!
//! Null values are handled consistently:
//! - Value checks (type, length, range, codes, pattern) never see nulls
//! - The missing check reports each null row of a required column once
//! - Nulls in optional columns are never reported
//!
//! This prevents logical bugs where null values might incorrectly pass or fail validation.

use pretty_assertions::assert_eq;
use tabval_core::{CellValue, DeclaredType, RowRef, RuleBuilder, RuleSet};
use tabval_validator::{DataTable, ReportBuilder, StorageType};

fn single_column(name: &str, storage: StorageType, values: Vec<CellValue>) -> DataTable {
    DataTable::new()
        .with_column(name, storage, values)
        .expect("single column table")
}

#[test]
fn test_null_in_required_column_reported_as_missing() {
    let rules =
        RuleSet::from_rules([RuleBuilder::new("id", DeclaredType::String).required(true)]).unwrap();
    let table = single_column("id", StorageType::Text, vec![CellValue::Null]);

    let report = ReportBuilder::new(&rules).build(&table).unwrap();

    assert_eq!(report.len(), 1);
    let record = &report.records()[0];
    assert_eq!(record.row_index, RowRef::Row(1));
    assert_eq!(record.value, "null");
    assert_eq!(record.message, "Missing value: id required");
}

#[test]
fn test_null_in_optional_column_passes() {
    let rules = RuleSet::from_rules([RuleBuilder::new("id", DeclaredType::String)]).unwrap();
    let table = single_column("id", StorageType::Text, vec![CellValue::Null, "a".into()]);

    let report = ReportBuilder::new(&rules).build(&table).unwrap();

    assert!(report.is_clean(), "Null in optional column should pass: {:?}", report);
}

#[test]
fn test_null_skips_code_check() {
    let rules = RuleSet::from_rules([RuleBuilder::new("status", DeclaredType::String)
        .allowed_codes(["active", "inactive"])])
    .unwrap();
    let table = single_column("status", StorageType::Text, vec![CellValue::Null]);

    let report = ReportBuilder::new(&rules).build(&table).unwrap();

    assert!(report.is_clean(), "Null should skip code check: {:?}", report);
}

#[test]
fn test_null_skips_range_check() {
    let rules = RuleSet::from_rules([RuleBuilder::new("age", DeclaredType::Integer)
        .range(0.0, 120.0)])
    .unwrap();
    let table = single_column("age", StorageType::Untyped, vec![CellValue::Null, 30.into()]);

    let report = ReportBuilder::new(&rules).build(&table).unwrap();

    // Null would fail coercion if it reached the range check
    assert!(report.is_clean(), "Null should skip range check: {:?}", report);
}

#[test]
fn test_null_skips_pattern_and_length_checks() {
    let rules = RuleSet::from_rules([RuleBuilder::new("url", DeclaredType::String)
        .pattern("https?://")
        .max_length(2)])
    .unwrap();
    let table = single_column("url", StorageType::Text, vec![CellValue::Null]);

    let report = ReportBuilder::new(&rules).build(&table).unwrap();

    assert!(report.is_clean(), "Null should skip pattern check: {:?}", report);
}

#[test]
fn test_missing_rows_reported_once_each() {
    let rules = RuleSet::from_rules([RuleBuilder::new("id", DeclaredType::Integer)
        .required(true)
        .range(0.0, 10.0)])
    .unwrap();
    let table = single_column(
        "id",
        StorageType::Numeric,
        vec![
            CellValue::Null,
            5.into(),
            CellValue::Null,
            50.into(),
            CellValue::Null,
        ],
    );

    let report = ReportBuilder::new(&rules).build(&table).unwrap();

    let missing: Vec<_> = report
        .iter()
        .filter(|r| r.message == "Missing value: id required")
        .map(|r| r.row_index)
        .collect();
    assert_eq!(missing, vec![RowRef::Row(1), RowRef::Row(3), RowRef::Row(5)]);

    // Nulls do not stop the range check on the other rows
    let range: Vec<_> = report
        .iter()
        .filter(|r| r.message.starts_with("Invalid range"))
        .map(|r| (r.row_index, r.value.as_str()))
        .collect();
    assert_eq!(range, vec![(RowRef::Row(4), "50")]);

    // Range records come before missing records
    assert_eq!(report.records()[0].row_index, RowRef::Row(4));
    assert_eq!(report.len(), 4);
}

#[test]
fn test_all_null_required_column() {
    let rules = RuleSet::from_rules([RuleBuilder::new("score", DeclaredType::Float)
        .required(true)
        .max_length(3)
        .allowed_codes([1.0])])
    .unwrap();
    let table = single_column(
        "score",
        StorageType::Untyped,
        vec![CellValue::Null, CellValue::Null],
    );

    let report = ReportBuilder::new(&rules).build(&table).unwrap();

    assert_eq!(report.len(), 2);
    assert!(report
        .iter()
        .all(|r| r.message == "Missing value: score required"));
}

#[test]
fn test_absent_column_vs_null_column() {
    let rules = RuleSet::from_rules([
        RuleBuilder::new("present", DeclaredType::String).required(true),
        RuleBuilder::new("absent", DeclaredType::String).required(true),
    ])
    .unwrap();
    let table = single_column("present", StorageType::Text, vec![CellValue::Null]);

    let report = ReportBuilder::new(&rules).build(&table).unwrap();

    assert_eq!(report.len(), 2);
    assert_eq!(report.records()[0].row_index, RowRef::Row(1));
    assert_eq!(report.records()[0].message, "Missing value: present required");
    // An absent column is reported once, not once per row
    assert_eq!(report.records()[1].row_index, RowRef::All);
    assert_eq!(report.records()[1].message, "Column absent is missing");
}
