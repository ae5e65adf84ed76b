//! Arrow record batches as validation tables.
//!
//! Maps Arrow's type system onto storage types and cell values so columnar
//! data can be validated without copying it into a [`crate::DataTable`] first.

use crate::{StorageType, Table, TableError};
use arrow_array::types::{
    ArrowPrimitiveType, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type,
    UInt8Type, UInt16Type, UInt32Type, UInt64Type,
};
use arrow_array::{
    Array, ArrayRef, BooleanArray, LargeStringArray, PrimitiveArray, RecordBatch, StringArray,
};
use arrow_schema::DataType;
use tabval_core::CellValue;
use tracing::warn;

/// A [`Table`] backed by an Arrow [`RecordBatch`].
///
/// Integer and floating point columns are numeric, `Utf8`/`LargeUtf8`
/// columns are text, `Boolean` columns are boolean and `Null` columns are
/// untyped. Columns of any other type fail with
/// [`TableError::UnsupportedType`] when read.
#[derive(Debug, Clone)]
pub struct RecordBatchTable {
    batch: RecordBatch,
}

impl RecordBatchTable {
    /// Wraps a record batch.
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Returns the wrapped record batch.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }
}

impl From<RecordBatch> for RecordBatchTable {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

impl Table for RecordBatchTable {
    fn has_column(&self, name: &str) -> bool {
        self.batch.schema().column_with_name(name).is_some()
    }

    fn column_values(&self, name: &str) -> Result<Vec<(usize, CellValue)>, TableError> {
        let array = self
            .batch
            .column_by_name(name)
            .ok_or_else(|| TableError::column_not_found(name))?;
        let values = arrow_column_to_cells(name, array)?;
        Ok(values
            .into_iter()
            .enumerate()
            .map(|(idx, value)| (idx + 1, value))
            .collect())
    }

    fn declared_storage_type(&self, name: &str) -> Result<StorageType, TableError> {
        let schema = self.batch.schema();
        let field = schema
            .field_with_name(name)
            .map_err(|_| TableError::column_not_found(name))?;
        arrow_type_to_storage(name, field.data_type())
    }

    fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }
}

/// Converts an Arrow data type to a storage type.
pub fn arrow_type_to_storage(column: &str, data_type: &DataType) -> Result<StorageType, TableError> {
    let storage = match data_type {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64 => StorageType::Numeric,
        DataType::Utf8 | DataType::LargeUtf8 => StorageType::Text,
        DataType::Boolean => StorageType::Boolean,
        DataType::Null => StorageType::Untyped,
        other => {
            warn!("Unsupported Arrow type for column '{}': {}", column, other);
            return Err(TableError::unsupported_type(column, other.to_string()));
        }
    };
    Ok(storage)
}

/// Converts a whole Arrow column to cell values.
pub fn arrow_column_to_cells(column: &str, array: &ArrayRef) -> Result<Vec<CellValue>, TableError> {
    match array.data_type() {
        DataType::Int8 => primitive_cells::<Int8Type>(column, array, |v| CellValue::Integer(v.into())),
        DataType::Int16 => {
            primitive_cells::<Int16Type>(column, array, |v| CellValue::Integer(v.into()))
        }
        DataType::Int32 => {
            primitive_cells::<Int32Type>(column, array, |v| CellValue::Integer(v.into()))
        }
        DataType::Int64 => primitive_cells::<Int64Type>(column, array, CellValue::Integer),
        DataType::UInt8 => {
            primitive_cells::<UInt8Type>(column, array, |v| CellValue::Integer(v.into()))
        }
        DataType::UInt16 => {
            primitive_cells::<UInt16Type>(column, array, |v| CellValue::Integer(v.into()))
        }
        DataType::UInt32 => {
            primitive_cells::<UInt32Type>(column, array, |v| CellValue::Integer(v.into()))
        }
        DataType::UInt64 => primitive_cells::<UInt64Type>(column, array, |v| {
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer)
        }),
        DataType::Float32 => {
            primitive_cells::<Float32Type>(column, array, |v| CellValue::Float(v.into()))
        }
        DataType::Float64 => primitive_cells::<Float64Type>(column, array, CellValue::Float),
        DataType::Utf8 => {
            let typed = array
                .as_any()
                .downcast_ref::<StringArray>()
                .ok_or_else(|| TableError::downcast(column, "StringArray"))?;
            Ok(typed.iter().map(CellValue::from).collect())
        }
        DataType::LargeUtf8 => {
            let typed = array
                .as_any()
                .downcast_ref::<LargeStringArray>()
                .ok_or_else(|| TableError::downcast(column, "LargeStringArray"))?;
            Ok(typed.iter().map(CellValue::from).collect())
        }
        DataType::Boolean => {
            let typed = array
                .as_any()
                .downcast_ref::<BooleanArray>()
                .ok_or_else(|| TableError::downcast(column, "BooleanArray"))?;
            Ok(typed.iter().map(CellValue::from).collect())
        }
        DataType::Null => Ok(vec![CellValue::Null; array.len()]),
        other => Err(TableError::unsupported_type(column, other.to_string())),
    }
}

fn primitive_cells<T: ArrowPrimitiveType>(
    column: &str,
    array: &ArrayRef,
    convert: impl Fn(T::Native) -> CellValue,
) -> Result<Vec<CellValue>, TableError> {
    let typed = array
        .as_any()
        .downcast_ref::<PrimitiveArray<T>>()
        .ok_or_else(|| TableError::downcast(column, format!("PrimitiveArray<{}>", T::DATA_TYPE)))?;
    Ok(typed
        .iter()
        .map(|value| value.map_or(CellValue::Null, &convert))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow_array::{Date32Array, Float32Array, Int64Array, NullArray, UInt64Array};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn table() -> RecordBatchTable {
        let batch = RecordBatch::try_from_iter(vec![
            (
                "age",
                Arc::new(Int64Array::from(vec![Some(17), None, Some(42)])) as ArrayRef,
            ),
            (
                "code",
                Arc::new(StringArray::from(vec![Some("A"), Some("C"), None])) as ArrayRef,
            ),
            (
                "active",
                Arc::new(BooleanArray::from(vec![true, false, true])) as ArrayRef,
            ),
            ("empty", Arc::new(NullArray::new(3)) as ArrayRef),
            (
                "day",
                Arc::new(Date32Array::from(vec![1, 2, 3])) as ArrayRef,
            ),
        ])
        .unwrap();
        RecordBatchTable::new(batch)
    }

    #[test]
    fn test_has_column() {
        let table = table();
        assert!(table.has_column("age"));
        assert!(!table.has_column("region"));
        assert_eq!(table.num_rows(), 3);
    }

    #[test]
    fn test_storage_types() {
        let table = table();
        assert_eq!(table.declared_storage_type("age").unwrap(), StorageType::Numeric);
        assert_eq!(table.declared_storage_type("code").unwrap(), StorageType::Text);
        assert_eq!(
            table.declared_storage_type("active").unwrap(),
            StorageType::Boolean
        );
        assert_eq!(
            table.declared_storage_type("empty").unwrap(),
            StorageType::Untyped
        );
        assert!(matches!(
            table.declared_storage_type("day"),
            Err(TableError::UnsupportedType { .. })
        ));
        assert!(matches!(
            table.declared_storage_type("region"),
            Err(TableError::ColumnNotFound(_))
        ));
    }

    #[test]
    fn test_int_column_values() {
        let values = table().column_values("age").unwrap();
        assert_eq!(
            values,
            vec![
                (1, CellValue::Integer(17)),
                (2, CellValue::Null),
                (3, CellValue::Integer(42)),
            ]
        );
    }

    #[test]
    fn test_string_and_bool_values() {
        let table = table();
        assert_eq!(
            table.column_values("code").unwrap(),
            vec![
                (1, CellValue::from("A")),
                (2, CellValue::from("C")),
                (3, CellValue::Null),
            ]
        );
        assert_eq!(
            table.column_values("active").unwrap()[1],
            (2, CellValue::Boolean(false))
        );
        assert_eq!(
            table.column_values("empty").unwrap(),
            vec![(1, CellValue::Null), (2, CellValue::Null), (3, CellValue::Null)]
        );
    }

    #[test]
    fn test_float_and_unsigned_conversion() {
        let floats: ArrayRef = Arc::new(Float32Array::from(vec![1.5]));
        assert_eq!(
            arrow_column_to_cells("f", &floats).unwrap(),
            vec![CellValue::Float(1.5)]
        );

        let unsigned: ArrayRef = Arc::new(UInt64Array::from(vec![7, u64::MAX]));
        assert_eq!(
            arrow_column_to_cells("u", &unsigned).unwrap(),
            vec![CellValue::Integer(7), CellValue::Float(u64::MAX as f64)]
        );
    }

    #[test]
    fn test_unsupported_column_read() {
        assert!(matches!(
            table().column_values("day"),
            Err(TableError::UnsupportedType { .. })
        ));
    }
}
