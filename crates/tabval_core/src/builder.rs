//! Builder pattern for creating column rules.
//!
//! [`RuleBuilder`] collects rule parameters with a fluent API. Calling
//! [`RuleBuilder::build`] validates them and renders every error message, so
//! misconfigured rules are rejected before any data is read.

use crate::{CellValue, Constraint, DeclaredType, Pattern, Result, Rule, SchemaError, ValueRange};
use regex::Regex;
use std::collections::HashSet;

/// Builder for creating a [`Rule`].
///
/// # Example
///
/// ```rust
/// use tabval_core::{DeclaredType, RuleBuilder};
///
/// let rule = RuleBuilder::new("age", DeclaredType::Integer)
///     .max_length(3)
///     .range(0.0, 120.0)
///     .required(true)
///     .build()
///     .expect("valid rule");
///
/// assert_eq!(rule.column(), "age");
/// assert_eq!(rule.max_length().unwrap().message(), "Invalid length: 3 char max");
/// ```
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    column: String,
    declared_type: DeclaredType,
    max_length: Option<usize>,
    range: Option<(f64, f64)>,
    required: bool,
    allowed_codes: Option<Vec<CellValue>>,
    pattern: Option<String>,
}

impl RuleBuilder {
    /// Creates a new rule builder.
    ///
    /// # Arguments
    ///
    /// * `column` - Column name
    /// * `declared_type` - Expected type of the column values
    pub fn new(column: impl Into<String>, declared_type: DeclaredType) -> Self {
        Self {
            column: column.into(),
            declared_type,
            max_length: None,
            range: None,
            required: false,
            allowed_codes: None,
            pattern: None,
        }
    }

    /// Name of the column the rule will apply to.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Sets the maximum display length of a value.
    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Sets inclusive numeric bounds. Only valid for numeric types.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }

    /// Sets whether every row needs a non-null value.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Sets the closed set of allowed values.
    pub fn allowed_codes<I, V>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        self.allowed_codes = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    /// Sets a regular expression values must match from their first character.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Validates the parameters and builds the rule.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidRuleConfig`] when a range is set on a
    /// non-numeric type, the range bounds are not finite or out of order, the
    /// maximum length is zero, the code set is empty or contains a null, or
    /// the pattern does not compile.
    pub fn build(self) -> Result<Rule> {
        let column = self.column;
        let declared_type = self.declared_type;

        let range = match self.range {
            Some(_) if !declared_type.is_numeric() => {
                return Err(SchemaError::invalid(
                    &column,
                    format!(
                        "dtype must be integer or float for a range rule, found {declared_type}"
                    ),
                ));
            }
            Some((min, max)) if !min.is_finite() || !max.is_finite() => {
                return Err(SchemaError::invalid(&column, "range bounds must be finite"));
            }
            Some((min, max)) if min > max => {
                return Err(SchemaError::invalid(
                    &column,
                    format!("range minimum {min} exceeds maximum {max}"),
                ));
            }
            Some((min, max)) => {
                let range = ValueRange { min, max };
                Some(Constraint::new(
                    range,
                    format!("Invalid range: {range} required"),
                ))
            }
            None => None,
        };

        let max_length = match self.max_length {
            Some(0) => {
                return Err(SchemaError::invalid(&column, "max length must be positive"));
            }
            Some(n) => Some(Constraint::new(n, format!("Invalid length: {n} char max"))),
            None => None,
        };

        let allowed_codes = match self.allowed_codes {
            Some(codes) => Some(build_codes(&column, codes)?),
            None => None,
        };

        let pattern = match self.pattern {
            Some(source) => Some(build_pattern(&column, source)?),
            None => None,
        };

        let required = self
            .required
            .then(|| Constraint::new((), format!("Missing value: {column} required")));

        Ok(Rule {
            declared_type: Constraint::new(
                declared_type,
                format!("Invalid dtype: {declared_type} required"),
            ),
            max_length,
            range,
            required,
            allowed_codes,
            pattern,
            absent_message: format!("Column {column} is missing"),
            column,
        })
    }
}

/// Deduplicates the codes, keeping configuration order.
fn build_codes(column: &str, codes: Vec<CellValue>) -> Result<Constraint<Vec<CellValue>>> {
    if codes.is_empty() {
        return Err(SchemaError::invalid(column, "allowed codes must not be empty"));
    }
    if codes.iter().any(CellValue::is_null) {
        return Err(SchemaError::invalid(column, "allowed codes must not contain null"));
    }

    let mut seen = HashSet::new();
    let codes: Vec<CellValue> = codes
        .into_iter()
        .filter(|code| seen.insert(code.clone()))
        .collect();

    let listed = codes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    Ok(Constraint::new(
        codes,
        format!("Invalid code: [{listed}] required"),
    ))
}

/// Compiles the pattern as written. Start anchoring happens at match time.
fn build_pattern(column: &str, source: String) -> Result<Constraint<Pattern>> {
    let regex = Regex::new(&source).map_err(|e| {
        SchemaError::invalid(column, format!("invalid regex pattern '{source}': {e}"))
    })?;
    let message = format!("Invalid regex: {source} required");
    Ok(Constraint::new(Pattern::new(source, regex), message))
}
