//! Column rule types.
//!
//! A [`Rule`] holds the full validation configuration of one column. Rules are
//! only produced by [`crate::RuleBuilder::build`], which checks the parameters
//! for consistency and renders every error message up front, so a `Rule` in
//! hand is always valid and never changes afterwards.

use crate::CellValue;
use regex::Regex;
use std::fmt;

/// Expected logical type of the values in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    /// Text values
    String,
    /// Whole numbers
    Integer,
    /// Floating point numbers
    Float,
    /// True/false values
    Boolean,
}

impl DeclaredType {
    /// Returns true for the types a range constraint may be attached to.
    pub fn is_numeric(self) -> bool {
        matches!(self, DeclaredType::Integer | DeclaredType::Float)
    }

    /// Returns the canonical name of the type.
    pub fn name(self) -> &'static str {
        match self {
            DeclaredType::String => "string",
            DeclaredType::Integer => "integer",
            DeclaredType::Float => "float",
            DeclaredType::Boolean => "boolean",
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    /// Minimum value (inclusive)
    pub min: f64,
    /// Maximum value (inclusive)
    pub max: f64,
}

impl ValueRange {
    /// Returns true if `value` lies within `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// A regular expression that only matches at the start of a value.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub(crate) fn new(source: String, regex: Regex) -> Self {
        Self { source, regex }
    }

    /// The pattern as it was configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern matches starting at the first character
    /// of `text`. The match does not need to cover the whole string.
    pub fn is_match(&self, text: &str) -> bool {
        // Leftmost-first search starts at 0 whenever an anchored match exists.
        self.regex.find(text).is_some_and(|m| m.start() == 0)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// A check parameter paired with the message reported when it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint<T> {
    param: T,
    message: String,
}

impl<T> Constraint<T> {
    pub(crate) fn new(param: T, message: String) -> Self {
        Self { param, message }
    }

    /// The configured parameter.
    pub fn param(&self) -> &T {
        &self.param
    }

    /// The error message reported for a violation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Validation configuration for a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub(crate) column: String,
    pub(crate) declared_type: Constraint<DeclaredType>,
    pub(crate) max_length: Option<Constraint<usize>>,
    pub(crate) range: Option<Constraint<ValueRange>>,
    pub(crate) required: Option<Constraint<()>>,
    pub(crate) allowed_codes: Option<Constraint<Vec<CellValue>>>,
    pub(crate) pattern: Option<Constraint<Pattern>>,
    pub(crate) absent_message: String,
}

impl Rule {
    /// Name of the column this rule applies to.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Expected type of the column, with its type mismatch message.
    pub fn declared_type(&self) -> &Constraint<DeclaredType> {
        &self.declared_type
    }

    /// Maximum display length of a value.
    pub fn max_length(&self) -> Option<&Constraint<usize>> {
        self.max_length.as_ref()
    }

    /// Inclusive numeric bounds.
    pub fn range(&self) -> Option<&Constraint<ValueRange>> {
        self.range.as_ref()
    }

    /// Present when every row must hold a non-null value.
    pub fn required(&self) -> Option<&Constraint<()>> {
        self.required.as_ref()
    }

    /// Returns true if nulls are reported as missing values.
    pub fn is_required(&self) -> bool {
        self.required.is_some()
    }

    /// Closed set of allowed values, in configuration order.
    pub fn allowed_codes(&self) -> Option<&Constraint<Vec<CellValue>>> {
        self.allowed_codes.as_ref()
    }

    /// Pattern every value must match from its first character.
    pub fn pattern(&self) -> Option<&Constraint<Pattern>> {
        self.pattern.as_ref()
    }

    /// Message reported when the column is absent from the table.
    pub fn absent_message(&self) -> &str {
        &self.absent_message
    }
}
