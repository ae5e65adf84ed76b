//! Check library.
//!
//! One function per check kind. Value checks take the distinct non-null values
//! of a column and return the subset that violates the rule parameter, in the
//! order they were given. The report builder expands those values back to rows.
//!
//! - Type: value representation must match the declared type
//! - Length: display form must not exceed the maximum length
//! - Range: numeric value must lie within inclusive bounds
//! - Codes: value must be one of a closed set
//! - Pattern: display form must match a regex from its first character
//! - Missing: required columns must not hold nulls (checked per row)

use crate::{StorageType, Table, TableError};
use std::borrow::Cow;
use std::collections::HashSet;
use tabval_core::{CellValue, DeclaredType, Numeric, Pattern, ValueRange};

/// Kinds of checks, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Type,
    Length,
    Range,
    Codes,
    Pattern,
    Missing,
}

impl CheckKind {
    /// Checks evaluated over distinct values, in report order.
    pub const VALUE_CHECKS: [CheckKind; 5] = [
        CheckKind::Type,
        CheckKind::Length,
        CheckKind::Range,
        CheckKind::Codes,
        CheckKind::Pattern,
    ];

    /// Short name used in logs.
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Type => "type",
            CheckKind::Length => "length",
            CheckKind::Range => "range",
            CheckKind::Codes => "codes",
            CheckKind::Pattern => "pattern",
            CheckKind::Missing => "missing",
        }
    }
}

/// Returns the distinct non-null values of a column in first-seen order.
pub fn distinct_values(cells: &[(usize, CellValue)]) -> Vec<&CellValue> {
    let mut seen = HashSet::new();
    cells
        .iter()
        .map(|(_, value)| value)
        .filter(|value| !value.is_null() && seen.insert(*value))
        .collect()
}

/// Returns values whose representation does not match the declared type.
///
/// Integers are accepted where floats are declared. When the column storage
/// is untyped and the declared type is numeric, each value is coerced to a
/// number first; values that do not coerce, or coerce to a float where an
/// integer is declared, are invalid.
pub fn check_type<'a>(
    values: &[&'a CellValue],
    declared: DeclaredType,
    storage: StorageType,
) -> Vec<&'a CellValue> {
    let coerce = storage == StorageType::Untyped && declared.is_numeric();
    values
        .iter()
        .copied()
        .filter(|value| {
            let valid = if coerce {
                coerced_type_matches(value, declared)
            } else {
                type_matches(value, declared)
            };
            !valid
        })
        .collect()
}

fn type_matches(value: &CellValue, declared: DeclaredType) -> bool {
    match declared {
        DeclaredType::String => matches!(value, CellValue::Text(_)),
        DeclaredType::Integer => matches!(value, CellValue::Integer(_)),
        DeclaredType::Float => matches!(value, CellValue::Float(_) | CellValue::Integer(_)),
        DeclaredType::Boolean => matches!(value, CellValue::Boolean(_)),
    }
}

fn coerced_type_matches(value: &CellValue, declared: DeclaredType) -> bool {
    match (declared, value.coerce_numeric()) {
        (DeclaredType::Integer, Some(Numeric::Integer(_))) => true,
        (DeclaredType::Float, Some(_)) => true,
        _ => false,
    }
}

/// Returns values whose display form is longer than `max_length` characters.
pub fn check_length<'a>(values: &[&'a CellValue], max_length: usize) -> Vec<&'a CellValue> {
    values
        .iter()
        .copied()
        .filter(|value| value.display_len() > max_length)
        .collect()
}

/// Returns values outside the inclusive range.
///
/// Numeric columns compare their numbers directly. Other columns coerce each
/// value first, and a value that is not a number fails the check.
pub fn check_range<'a>(
    values: &[&'a CellValue],
    range: &ValueRange,
    storage: StorageType,
) -> Vec<&'a CellValue> {
    values
        .iter()
        .copied()
        .filter(|value| {
            let number = match storage {
                StorageType::Numeric => value.as_numeric(),
                _ => value.coerce_numeric(),
            };
            number.is_none_or(|n| !range.contains(n.as_f64()))
        })
        .collect()
}

/// Returns values that are not one of the allowed codes.
///
/// Numbers compare by value, so `Integer(2)` matches a `2.0` code and `-0.0`
/// matches `0.0`. Text and booleans match exactly, and a number never matches
/// text: `Integer(1)` is not the code `"1"`.
pub fn check_codes<'a>(values: &[&'a CellValue], codes: &[CellValue]) -> Vec<&'a CellValue> {
    let exact: HashSet<&CellValue> = codes
        .iter()
        .filter(|code| code.as_numeric().is_none())
        .collect();
    let numeric: Vec<Numeric> = codes.iter().filter_map(CellValue::as_numeric).collect();
    values
        .iter()
        .copied()
        .filter(|value| match value.as_numeric() {
            Some(n) => !numeric.iter().any(|code| numbers_equal(n, *code)),
            None => !exact.contains(value),
        })
        .collect()
}

fn numbers_equal(a: Numeric, b: Numeric) -> bool {
    match (a, b) {
        (Numeric::Integer(a), Numeric::Integer(b)) => a == b,
        _ => a.as_f64() == b.as_f64(),
    }
}

/// Returns values whose display form does not match the pattern at its start.
pub fn check_pattern<'a>(values: &[&'a CellValue], pattern: &Pattern) -> Vec<&'a CellValue> {
    values
        .iter()
        .copied()
        .filter(|value| !pattern.is_match(&display(value)))
        .collect()
}

fn display(value: &CellValue) -> Cow<'_, str> {
    match value {
        CellValue::Text(s) => Cow::Borrowed(s),
        other => Cow::Owned(other.to_string()),
    }
}

/// Returns the rows of a column that hold a null.
pub fn check_missing(table: &dyn Table, column: &str) -> Result<Vec<usize>, TableError> {
    let cells = table.column_values(column)?;
    Ok(missing_rows(&cells))
}

/// Returns the rows among `cells` that hold a null.
pub fn missing_rows(cells: &[(usize, CellValue)]) -> Vec<usize> {
    cells
        .iter()
        .filter(|(_, value)| value.is_null())
        .map(|(row, _)| *row)
        .collect()
}
