//! Error types for table access.

use thiserror::Error;

/// Errors raised while reading a table.
///
/// These are environment errors: they abort report building instead of being
/// reported as findings. A column that is simply absent is not an error, the
/// report builder checks [`crate::Table::has_column`] first.
#[derive(Debug, Error)]
pub enum TableError {
    /// Column was requested but does not exist
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// Column length differs from the table's row count
    #[error("Column '{column}' has {actual} values, expected {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// Column data type has no cell value mapping
    #[error("Unsupported data type for column '{column}': {data_type}")]
    UnsupportedType { column: String, data_type: String },

    /// Column array does not match its declared data type
    #[error("Failed to downcast column '{column}' to {expected}")]
    Downcast { column: String, expected: String },

    /// Failure in the underlying data source
    #[error("Table source error: {0}")]
    Source(String),
}

impl TableError {
    /// Creates a new column not found error.
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound(column.into())
    }

    /// Creates a new unsupported type error.
    pub fn unsupported_type(column: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self::UnsupportedType {
            column: column.into(),
            data_type: data_type.into(),
        }
    }

    /// Creates a new downcast error.
    pub fn downcast(column: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::Downcast {
            column: column.into(),
            expected: expected.into(),
        }
    }

    /// Creates a new source error.
    pub fn from_source(message: impl Into<String>) -> Self {
        Self::Source(message.into())
    }
}
