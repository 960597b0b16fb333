use std::sync::Arc;

use arrow::record_batch::RecordBatch;

use super::any::AnyDataContainer;
use super::arrow_container::ArrowDataContainer;
use super::container::DataContainer;
use super::error::Result;
use super::indexed::IndexedDataContainer;
use super::row_container::RowDataContainer;
use super::value::CellValue;

/// Raw data handed over by an ingestion layer.
#[derive(Debug, Clone)]
pub enum DataInput {
    /// Row-major cells with their column names.
    Rows {
        fields: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    },
    /// Columnar data.
    Columns(RecordBatch),
}

/// Build the base container matching the shape of `input`.
pub fn create_data_container(input: DataInput) -> Result<AnyDataContainer> {
    match input {
        DataInput::Rows { fields, rows } => Ok(RowDataContainer::new(fields, rows)?.into()),
        DataInput::Columns(batch) => Ok(ArrowDataContainer::new(batch).into()),
    }
}

/// View `parent` through `indices`, validating them first.
pub fn create_indexed_data_container<C: DataContainer>(
    parent: Arc<C>,
    indices: Vec<usize>,
) -> Result<IndexedDataContainer<C>> {
    IndexedDataContainer::new(parent, indices)
}

/// Evenly spaced rows `0, step, 2 * step, …` with `step = max(num_rows / sample_size, 1)`.
///
/// Returns at most `num_rows` indices; a zero `sample_size` samples nothing.
pub fn sample_indices(num_rows: usize, sample_size: usize) -> Vec<usize> {
    if sample_size == 0 {
        return Vec::new();
    }
    let step = (num_rows / sample_size).max(1);
    (0..num_rows).step_by(step).collect()
}

/// A view over an evenly spaced sample of `parent`.
pub fn sample_container<C: DataContainer>(
    parent: Arc<C>,
    sample_size: usize,
) -> IndexedDataContainer<C> {
    let indices = sample_indices(parent.num_rows(), sample_size);
    log::debug!(
        "sampled {} of {} rows (requested {sample_size})",
        indices.len(),
        parent.num_rows()
    );
    IndexedDataContainer::new_unchecked(parent, indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_steps() {
        assert_eq!(sample_indices(10, 5), vec![0, 2, 4, 6, 8]);
        assert_eq!(sample_indices(10, 3), vec![0, 3, 6, 9]);
        assert_eq!(sample_indices(3, 500), vec![0, 1, 2]);
        assert!(sample_indices(0, 5).is_empty());
        assert!(sample_indices(10, 0).is_empty());
    }

    #[test]
    fn factory_picks_layout() {
        let rows = create_data_container(DataInput::Rows {
            fields: vec!["a".into()],
            rows: vec![vec![CellValue::Integer(1)], vec![CellValue::Integer(2)]],
        })
        .unwrap();
        assert!(matches!(rows, AnyDataContainer::Rows(_)));

        let view = create_indexed_data_container(Arc::new(rows), vec![1, 1]).unwrap();
        assert_eq!(
            view.column(0).collect::<Result<Vec<_>>>().unwrap(),
            vec![CellValue::Integer(2), CellValue::Integer(2)]
        );
        assert!(create_indexed_data_container(view.parent().clone(), vec![2]).is_err());
    }

    #[test]
    fn sample_view_reads_parent() {
        let parent = Arc::new(
            RowDataContainer::new(
                vec!["n".into()],
                (0..9).map(|i| vec![CellValue::Integer(i)]).collect(),
            )
            .unwrap(),
        );
        let sample = sample_container(parent, 3);
        assert_eq!(sample.indices(), &[0, 3, 6]);
        assert_eq!(sample.value_at(2, 0).unwrap(), CellValue::Integer(6));
    }
}
