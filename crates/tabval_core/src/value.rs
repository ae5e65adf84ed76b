//! Cell values flowing through rules and checks.
//!
//! Table columns can hold heterogeneous values, so every cell is represented
//! by the closed [`CellValue`] variant rather than by runtime type inspection.

use std::fmt;
use std::hash::{Hash, Hasher};

/// A single cell of a table.
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Null/missing value
    Null,
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
    /// Boolean value
    Boolean(bool),
}

/// Result of coercing a cell to a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    /// Whole number
    Integer(i64),
    /// Floating point number
    Float(f64),
}

impl Numeric {
    /// Widens the number to `f64` for range comparisons.
    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Integer(i) => i as f64,
            Numeric::Float(f) => f,
        }
    }
}

impl CellValue {
    /// Returns true if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Integer(_) => "integer",
            CellValue::Float(_) => "float",
            CellValue::Text(_) => "string",
            CellValue::Boolean(_) => "boolean",
        }
    }

    /// Attempts to get this value as text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to get this value as an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Attempts to get this value as a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            CellValue::Float(f) => Some(*f),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempts to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number this value holds, if any, without coercion.
    pub fn as_numeric(&self) -> Option<Numeric> {
        match self {
            CellValue::Integer(i) => Some(Numeric::Integer(*i)),
            CellValue::Float(f) => Some(Numeric::Float(*f)),
            _ => None,
        }
    }

    /// Coerces the value to a number.
    ///
    /// Numbers pass through unchanged. Text is trimmed and parsed as an
    /// integer first, then as a finite float, so `"17"` becomes
    /// `Numeric::Integer(17)` and `"17.5"` becomes `Numeric::Float(17.5)`.
    /// Booleans, nulls and unparseable text yield `None`.
    pub fn coerce_numeric(&self) -> Option<Numeric> {
        match self {
            CellValue::Integer(_) | CellValue::Float(_) => self.as_numeric(),
            CellValue::Text(s) => {
                let s = s.trim();
                if let Ok(i) = s.parse::<i64>() {
                    return Some(Numeric::Integer(i));
                }
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Numeric::Float)
            }
            CellValue::Boolean(_) | CellValue::Null => None,
        }
    }

    /// Number of characters in the display form of the value.
    pub fn display_len(&self) -> usize {
        match self {
            CellValue::Text(s) => s.chars().count(),
            other => other.to_string().chars().count(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => f.write_str("null"),
            CellValue::Integer(i) => write!(f, "{i}"),
            // Debug keeps the fractional part of whole floats ("17.0", not "17").
            CellValue::Float(x) => write!(f, "{x:?}"),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Boolean(b) => write!(f, "{b}"),
        }
    }
}

// Floats compare by bit pattern so values can be deduplicated in hash sets.
impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Integer(a), CellValue::Integer(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => a.to_bits() == b.to_bits(),
            (CellValue::Text(a), CellValue::Text(b)) => a == b,
            (CellValue::Boolean(a), CellValue::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Null => {}
            CellValue::Integer(i) => i.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::Text(s) => s.hash(state),
            CellValue::Boolean(b) => b.hash(state),
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Integer(i)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cell_value_types() {
        assert_eq!(CellValue::Null.type_name(), "null");
        assert_eq!(CellValue::from("test").type_name(), "string");
        assert_eq!(CellValue::Integer(42).type_name(), "integer");
        assert_eq!(CellValue::Float(3.5).type_name(), "float");
        assert_eq!(CellValue::Boolean(true).type_name(), "boolean");
    }

    #[test]
    fn test_cell_value_conversions() {
        let val = CellValue::from("hello");
        assert_eq!(val.as_text(), Some("hello"));
        assert_eq!(val.as_integer(), None);

        let val = CellValue::Integer(42);
        assert_eq!(val.as_integer(), Some(42));
        assert_eq!(val.as_float(), Some(42.0));
        assert_eq!(val.as_text(), None);

        assert_eq!(CellValue::from(None::<i64>), CellValue::Null);
        assert_eq!(CellValue::from(Some(7)), CellValue::Integer(7));
    }

    #[test]
    fn test_coerce_numeric() {
        assert_eq!(
            CellValue::from("17").coerce_numeric(),
            Some(Numeric::Integer(17))
        );
        assert_eq!(
            CellValue::from(" 2.5 ").coerce_numeric(),
            Some(Numeric::Float(2.5))
        );
        assert_eq!(CellValue::from("17a").coerce_numeric(), None);
        assert_eq!(CellValue::from("NaN").coerce_numeric(), None);
        assert_eq!(CellValue::Boolean(true).coerce_numeric(), None);
        assert_eq!(CellValue::Null.coerce_numeric(), None);
        assert_eq!(
            CellValue::Float(1.5).coerce_numeric(),
            Some(Numeric::Float(1.5))
        );
    }

    #[test]
    fn test_display_form() {
        assert_eq!(CellValue::Integer(17).to_string(), "17");
        assert_eq!(CellValue::Float(17.0).to_string(), "17.0");
        assert_eq!(CellValue::Float(0.25).to_string(), "0.25");
        assert_eq!(CellValue::Boolean(false).to_string(), "false");
        assert_eq!(CellValue::from("héllo").display_len(), 5);
        assert_eq!(CellValue::Float(1.5).display_len(), 3);
    }

    #[test]
    fn test_hash_dedup() {
        let values = vec![
            CellValue::Float(1.0),
            CellValue::Float(1.0),
            CellValue::Integer(1),
            CellValue::from("1"),
            CellValue::Float(f64::NAN),
            CellValue::Float(f64::NAN),
        ];
        let distinct: HashSet<_> = values.into_iter().collect();
        assert_eq!(distinct.len(), 4);
    }
}
