//! Table representation for validation.
//!
//! The validator never loads data itself. It reads columns through the
//! [`Table`] trait, which data sources implement. [`DataTable`] is a simple
//! in-memory implementation; [`crate::RecordBatchTable`] adapts Arrow batches.

use crate::TableError;
use std::collections::{BTreeSet, HashMap};
use tabval_core::CellValue;

/// How a column stores its values.
///
/// Decides whether numeric checks fall back to coercing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageType {
    /// Integer or floating point storage
    Numeric,
    /// Text storage
    Text,
    /// Boolean storage
    Boolean,
    /// Generic storage holding values of any type (e.g. parsed from text)
    Untyped,
}

impl StorageType {
    /// Infers the storage type of a column from its values.
    ///
    /// Nulls are ignored. A column with no non-null values, or with values of
    /// different kinds, is untyped.
    pub fn infer(values: &[CellValue]) -> Self {
        let mut inferred = None;
        for value in values {
            let kind = match value {
                CellValue::Null => continue,
                CellValue::Integer(_) | CellValue::Float(_) => StorageType::Numeric,
                CellValue::Text(_) => StorageType::Text,
                CellValue::Boolean(_) => StorageType::Boolean,
            };
            match inferred {
                None => inferred = Some(kind),
                Some(existing) if existing != kind => return StorageType::Untyped,
                Some(_) => {}
            }
        }
        inferred.unwrap_or(StorageType::Untyped)
    }
}

/// Read-only access to tabular data.
///
/// Implementations must not change while a report is being built.
pub trait Table {
    /// Returns true if the table has a column with this name.
    fn has_column(&self, name: &str) -> bool;

    /// Returns every cell of a column as `(row_index, value)` pairs in row
    /// order. Row indices are 1-based; missing cells are [`CellValue::Null`].
    fn column_values(&self, name: &str) -> Result<Vec<(usize, CellValue)>, TableError>;

    /// Returns how the column stores its values.
    fn declared_storage_type(&self, name: &str) -> Result<StorageType, TableError>;

    /// Number of rows in the table.
    fn num_rows(&self) -> usize;
}

/// A single row of data.
pub type DataRow = HashMap<String, CellValue>;

#[derive(Debug, Clone)]
struct Column {
    name: String,
    storage: StorageType,
    values: Vec<CellValue>,
}

/// An in-memory, column-oriented table.
///
/// # Example
///
/// ```rust
/// use tabval_core::CellValue;
/// use tabval_validator::{DataTable, StorageType, Table};
///
/// let table = DataTable::new()
///     .with_column("age", StorageType::Untyped, vec![17.into(), "17a".into(), CellValue::Null])
///     .expect("column lengths match");
///
/// assert!(table.has_column("age"));
/// assert_eq!(table.num_rows(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: Vec<Column>,
    num_rows: Option<usize>,
}

impl DataTable {
    /// Creates a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table from rows.
    ///
    /// Every key seen in any row becomes a column, with the storage type
    /// inferred from its values. A key missing from a row is a null cell.
    pub fn from_rows(rows: Vec<DataRow>) -> Self {
        let names: BTreeSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();

        let columns = names
            .into_iter()
            .map(|name| {
                let values: Vec<CellValue> = rows
                    .iter()
                    .map(|row| row.get(name).cloned().unwrap_or(CellValue::Null))
                    .collect();
                Column {
                    name: name.clone(),
                    storage: StorageType::infer(&values),
                    values,
                }
            })
            .collect();

        Self {
            columns,
            num_rows: Some(rows.len()),
        }
    }

    /// Adds a column and returns the table, for chaining.
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        storage: StorageType,
        values: Vec<CellValue>,
    ) -> Result<Self, TableError> {
        self.add_column(name, storage, values)?;
        Ok(self)
    }

    /// Adds a column with its storage type inferred from the values.
    pub fn with_inferred_column(
        self,
        name: impl Into<String>,
        values: Vec<CellValue>,
    ) -> Result<Self, TableError> {
        let storage = StorageType::infer(&values);
        self.with_column(name, storage, values)
    }

    /// Adds a column, replacing any existing column with the same name.
    ///
    /// # Errors
    ///
    /// [`TableError::LengthMismatch`] if the column length differs from the
    /// length of the columns already in the table.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        storage: StorageType,
        values: Vec<CellValue>,
    ) -> Result<(), TableError> {
        let name = name.into();
        let existing = self.columns.iter().position(|c| c.name == name);

        // A lone column may be replaced by one of any length.
        let expected = match existing {
            Some(_) if self.columns.len() == 1 => None,
            _ => self.num_rows,
        };
        if let Some(expected) = expected {
            if values.len() != expected {
                return Err(TableError::LengthMismatch {
                    column: name,
                    expected,
                    actual: values.len(),
                });
            }
        }

        self.num_rows = Some(values.len());
        let column = Column {
            name,
            storage,
            values,
        };
        match existing {
            Some(index) => self.columns[index] = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Returns the column names in insertion order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Returns the number of rows in the table.
    pub fn len(&self) -> usize {
        self.num_rows.unwrap_or(0)
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::column_not_found(name))
    }
}

impl Table for DataTable {
    fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    fn column_values(&self, name: &str) -> Result<Vec<(usize, CellValue)>, TableError> {
        let column = self.column(name)?;
        Ok(column
            .values
            .iter()
            .enumerate()
            .map(|(idx, value)| (idx + 1, value.clone()))
            .collect())
    }

    fn declared_storage_type(&self, name: &str) -> Result<StorageType, TableError> {
        Ok(self.column(name)?.storage)
    }

    fn num_rows(&self) -> usize {
        self.len()
    }
}
