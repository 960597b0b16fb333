use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::concat_batches;
use arrow::datatypes::{
    DataType, Date32Type, Date64Type, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type,
    Int8Type, SchemaRef, UInt16Type, UInt32Type, UInt64Type, UInt8Type,
};
use arrow::record_batch::RecordBatch;
use arrow::util::display::{ArrayFormatter, FormatOptions};

use super::container::DataContainer;
use super::error::{check_column, check_row, Result};
use super::iter::IndexSeq;
use super::row::DataRow;
use super::value::CellValue;

// ---------------------------------------------------------------------------
// ArrowDataContainer – columnar base container
// ---------------------------------------------------------------------------

/// Column-major base container backed by a single Arrow [`RecordBatch`].
///
/// Cells are converted to [`CellValue`] on access; nothing is copied up front.
#[derive(Debug, Clone)]
pub struct ArrowDataContainer {
    batch: RecordBatch,
}

impl ArrowDataContainer {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch }
    }

    /// Concatenate `batches` (all sharing `schema`) into one container.
    pub fn from_batches(schema: SchemaRef, batches: &[RecordBatch]) -> Result<Self> {
        let batch = concat_batches(&schema, batches)?;
        Ok(Self { batch })
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Ordered column names.
    pub fn fields(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.batch.schema().index_of(name).ok()
    }
}

impl From<RecordBatch> for ArrowDataContainer {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

impl DataContainer for ArrowDataContainer {
    type IndexSource = Self;

    fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    fn num_columns(&self) -> usize {
        self.batch.num_columns()
    }

    fn value_at(&self, row_index: usize, column_index: usize) -> Result<CellValue> {
        check_row(row_index, self.num_rows())?;
        check_column(column_index, self.num_columns())?;
        cell_value(self.batch.column(column_index), row_index)
    }

    fn index_source(&self) -> &Self {
        self
    }

    fn source_row_index(&self, row_index: usize) -> Result<usize> {
        check_row(row_index, self.num_rows())?;
        Ok(row_index)
    }

    fn source_indices(&self) -> IndexSeq<'_> {
        IndexSeq::identity(self.num_rows())
    }

    fn fill_row(&self, row_index: usize, row: &mut DataRow) -> Result<()> {
        check_row(row_index, self.num_rows())?;
        let cells = row.reset(row_index);
        cells.reserve(self.batch.num_columns());
        for column in self.batch.columns() {
            cells.push(cell_value(column, row_index)?);
        }
        Ok(())
    }
}

// -- Arrow → CellValue --

/// Convert one Arrow cell. Types without a dedicated variant are rendered with
/// Arrow's display formatter.
fn cell_value(column: &ArrayRef, row: usize) -> Result<CellValue> {
    if column.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match column.data_type() {
        DataType::Utf8 => column
            .as_string_opt::<i32>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::LargeUtf8 => column
            .as_string_opt::<i64>()
            .map(|a| CellValue::String(a.value(row).to_string())),
        DataType::Boolean => column.as_boolean_opt().map(|a| CellValue::Bool(a.value(row))),
        DataType::Int8 => column
            .as_primitive_opt::<Int8Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::Int16 => column
            .as_primitive_opt::<Int16Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::Int32 => column
            .as_primitive_opt::<Int32Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::Int64 => column
            .as_primitive_opt::<Int64Type>()
            .map(|a| CellValue::Integer(a.value(row))),
        DataType::UInt8 => column
            .as_primitive_opt::<UInt8Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::UInt16 => column
            .as_primitive_opt::<UInt16Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::UInt32 => column
            .as_primitive_opt::<UInt32Type>()
            .map(|a| CellValue::Integer(a.value(row).into())),
        DataType::UInt64 => column.as_primitive_opt::<UInt64Type>().map(|a| {
            let v = a.value(row);
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer)
        }),
        DataType::Float32 => column
            .as_primitive_opt::<Float32Type>()
            .map(|a| CellValue::Float(a.value(row).into())),
        DataType::Float64 => column
            .as_primitive_opt::<Float64Type>()
            .map(|a| CellValue::Float(a.value(row))),
        DataType::Date32 => column
            .as_primitive_opt::<Date32Type>()
            .and_then(|a| a.value_as_date(row))
            .map(|d| CellValue::Date(d.to_string())),
        DataType::Date64 => column
            .as_primitive_opt::<Date64Type>()
            .and_then(|a| a.value_as_date(row))
            .map(|d| CellValue::Date(d.to_string())),
        _ => None,
    };
    match value {
        Some(value) => Ok(value),
        None => {
            let options = FormatOptions::default();
            let formatter = ArrayFormatter::try_new(column.as_ref(), &options)?;
            Ok(CellValue::String(formatter.value(row).to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{BooleanArray, Date32Array, Float64Array, Int32Array, StringArray, UInt64Array};
    use arrow::datatypes::{Field, Schema};

    use super::*;
    use crate::data::error::ContainerError;
    use crate::data::row::SharedRow;

    fn batch() -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![
            Field::new("name", DataType::Utf8, true),
            Field::new("count", DataType::Int32, false),
            Field::new("score", DataType::Float64, true),
            Field::new("ok", DataType::Boolean, false),
            Field::new("day", DataType::Date32, false),
            Field::new("big", DataType::UInt64, false),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(StringArray::from(vec![Some("a"), None, Some("c")])),
                Arc::new(Int32Array::from(vec![1, 2, 3])),
                Arc::new(Float64Array::from(vec![Some(0.5), Some(1.5), None])),
                Arc::new(BooleanArray::from(vec![true, false, true])),
                Arc::new(Date32Array::from(vec![0, 1, 19_000])),
                Arc::new(UInt64Array::from(vec![7, u64::MAX, 0])),
            ],
        )
        .unwrap()
    }

    #[test]
    fn converts_cells() {
        let data = ArrowDataContainer::new(batch());
        assert_eq!(data.num_rows(), 3);
        assert_eq!(data.num_columns(), 6);
        assert_eq!(
            data.row_as_array(0).unwrap(),
            vec![
                CellValue::from("a"),
                CellValue::Integer(1),
                CellValue::Float(0.5),
                CellValue::Bool(true),
                CellValue::Date("1970-01-01".into()),
                CellValue::Integer(7),
            ]
        );
        assert_eq!(data.value_at(1, 0).unwrap(), CellValue::Null);
        assert_eq!(data.value_at(2, 2).unwrap(), CellValue::Null);
        assert_eq!(data.value_at(1, 5).unwrap(), CellValue::Float(u64::MAX as f64));
    }

    #[test]
    fn checks_bounds() {
        let data = ArrowDataContainer::new(batch());
        assert!(matches!(data.value_at(3, 0), Err(ContainerError::RowOutOfRange { .. })));
        assert!(matches!(data.value_at(0, 6), Err(ContainerError::ColumnOutOfRange { .. })));
        assert!(data.row(3, &mut SharedRow::shared()).is_err());
    }

    #[test]
    fn concatenates_batches() {
        let b = batch();
        let data = ArrowDataContainer::from_batches(b.schema(), &[b.clone(), b]).unwrap();
        assert_eq!(data.num_rows(), 6);
        assert_eq!(data.value_at(4, 1).unwrap(), CellValue::Integer(2));
        assert_eq!(data.column_index("score"), Some(2));
        assert_eq!(data.fields()[3], "ok");
    }
}
