//! Violation records and reports.
//!
//! A [`Report`] is the ordered list of every rule violation found in one
//! validation run. It serializes as an array of records with the fields
//! `row_index`, `column`, `value` and `message`, ready for CSV/JSON tooling.

use crate::{CellValue, Rule};
use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel used for column-level records.
pub const ALL: &str = "all";

/// Location of a violation within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RowRef {
    /// 1-based row position
    Row(usize),
    /// The violation applies to the whole column
    All,
}

impl fmt::Display for RowRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRef::Row(row) => write!(f, "{row}"),
            RowRef::All => f.write_str(ALL),
        }
    }
}

impl Serialize for RowRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RowRef::Row(row) => serializer.serialize_u64(*row as u64),
            RowRef::All => serializer.serialize_str(ALL),
        }
    }
}

/// One reported rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationRecord {
    /// Row holding the offending value, or `All` for column-level records
    pub row_index: RowRef,

    /// Column name
    pub column: String,

    /// Display form of the offending value, or `"all"` for column-level records
    pub value: String,

    /// Message of the check that failed
    pub message: String,
}

impl ViolationRecord {
    /// Creates a record for a single row.
    pub fn row(
        row: usize,
        column: impl Into<String>,
        value: &CellValue,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row_index: RowRef::Row(row),
            column: column.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    /// Creates the record reported when a rule's column is absent.
    pub fn column_missing(rule: &Rule) -> Self {
        Self {
            row_index: RowRef::All,
            column: rule.column().to_string(),
            value: ALL.to_string(),
            message: rule.absent_message().to_string(),
        }
    }

    /// Returns true for records that apply to the whole column.
    pub fn is_column_level(&self) -> bool {
        self.row_index == RowRef::All
    }
}

impl fmt::Display for ViolationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {} column '{}' value '{}': {}",
            self.row_index, self.column, self.value, self.message
        )
    }
}

/// Ordered collection of violation records from one validation run.
///
/// Records are ordered by rule set column order, then by check
/// (type, length, range, codes, pattern, missing), then by row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Report {
    records: Vec<ViolationRecord>,
}

impl Report {
    /// Creates a report from records that are already in report order.
    pub fn new(records: Vec<ViolationRecord>) -> Self {
        Self { records }
    }

    /// Returns true if no violation was found.
    pub fn is_clean(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the report has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in report order.
    pub fn records(&self) -> &[ViolationRecord] {
        &self.records
    }

    /// Iterates over the records in report order.
    pub fn iter(&self) -> impl Iterator<Item = &ViolationRecord> {
        self.records.iter()
    }

    /// Records of a single column, in report order.
    pub fn for_column<'a>(
        &'a self,
        column: &'a str,
    ) -> impl Iterator<Item = &'a ViolationRecord> + 'a {
        self.records.iter().filter(move |r| r.column == column)
    }

    /// Consumes the report and returns its records.
    pub fn into_records(self) -> Vec<ViolationRecord> {
        self.records
    }

    /// Serializes the report as a compact JSON array.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes the report as an indented JSON array.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl IntoIterator for Report {
    type Item = ViolationRecord;
    type IntoIter = std::vec::IntoIter<ViolationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a ViolationRecord;
    type IntoIter = std::slice::Iter<'a, ViolationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
