use std::sync::Arc;

use super::container::DataContainer;
use super::error::{ContainerError, Result};
use super::iter::IndexSeq;
use super::row::{DataRow, RowHandle, SharedRow};
use super::value::CellValue;

// ---------------------------------------------------------------------------
// IndexedDataContainer – a view through an index array
// ---------------------------------------------------------------------------

/// A container that re-presents rows of a parent container through an index
/// array, without copying cells.
///
/// With `indices = [3, 4, 6, 8]` the view has 4 rows and its row 2 is row 6 of
/// the parent. Indices may repeat, skip, or reorder parent rows. Columns are
/// passed through untouched. The parent may itself be a view.
///
/// The index array is fixed at construction; build a new view to change it.
#[derive(Debug, Clone)]
pub struct IndexedDataContainer<C> {
    parent: Arc<C>,
    indices: Vec<usize>,
}

impl<C: DataContainer> IndexedDataContainer<C> {
    /// Build a view, rejecting any index that does not address a parent row.
    pub fn new(parent: Arc<C>, indices: Vec<usize>) -> Result<Self> {
        let num_rows = parent.num_rows();
        if let Some((position, &index)) = indices.iter().enumerate().find(|&(_, &i)| i >= num_rows) {
            return Err(ContainerError::InvalidIndex {
                position,
                index,
                num_rows,
            });
        }
        log::debug!(
            "indexed view: {} rows over a parent of {num_rows} rows",
            indices.len()
        );
        Ok(Self { parent, indices })
    }

    /// Build a view without checking `indices`. An out-of-range entry then
    /// fails with `RowOutOfRange` from the parent when that row is accessed.
    pub fn new_unchecked(parent: Arc<C>, indices: Vec<usize>) -> Self {
        Self { parent, indices }
    }

    /// A view showing every parent row in order.
    pub fn identity(parent: Arc<C>) -> Self {
        let indices = parent.get_plain_index();
        Self { parent, indices }
    }

    pub fn parent(&self) -> &Arc<C> {
        &self.parent
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Parent row for the local `row_index`.
    #[inline]
    fn mapped_row_index(&self, row_index: usize) -> Result<usize> {
        self.indices
            .get(row_index)
            .copied()
            .ok_or(ContainerError::RowOutOfRange {
                index: row_index,
                num_rows: self.indices.len(),
            })
    }
}

impl<C: DataContainer> DataContainer for IndexedDataContainer<C> {
    type IndexSource = C;

    fn num_rows(&self) -> usize {
        self.indices.len()
    }

    fn num_columns(&self) -> usize {
        self.parent.num_columns()
    }

    fn value_at(&self, row_index: usize, column_index: usize) -> Result<CellValue> {
        self.parent
            .value_at(self.mapped_row_index(row_index)?, column_index)
    }

    fn index_source(&self) -> &C {
        &self.parent
    }

    fn source_row_index(&self, row_index: usize) -> Result<usize> {
        self.mapped_row_index(row_index)
    }

    fn source_indices(&self) -> IndexSeq<'_> {
        IndexSeq::mapped(&self.indices)
    }

    fn fill_row(&self, row_index: usize, row: &mut DataRow) -> Result<()> {
        self.parent.fill_row(self.mapped_row_index(row_index)?, row)
    }

    fn row<'r>(&self, row_index: usize, shared: &'r mut SharedRow) -> Result<RowHandle<'r>> {
        self.parent.row(self.mapped_row_index(row_index)?, shared)
    }

    fn row_as_array(&self, row_index: usize) -> Result<Vec<CellValue>> {
        self.parent.row_as_array(self.mapped_row_index(row_index)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::container::{IndexContext, RangeOptions};
    use crate::data::row::SharedRowOptions;
    use crate::data::row_container::RowDataContainer;

    /// `rows` rows, two columns: `[i * 10, "r{i}"]`.
    fn parent(rows: i64) -> Arc<RowDataContainer> {
        let data = (0..rows)
            .map(|i| vec![CellValue::Integer(i * 10), CellValue::String(format!("r{i}"))])
            .collect();
        Arc::new(RowDataContainer::new(vec!["n".into(), "name".into()], data).unwrap())
    }

    #[test]
    fn translates_rows_not_columns() {
        let view = IndexedDataContainer::new(parent(10), vec![9, 0, 3]).unwrap();
        assert_eq!(view.num_rows(), 3);
        assert_eq!(view.num_columns(), 2);
        assert_eq!(view.value_at(0, 0).unwrap(), CellValue::Integer(90));
        assert_eq!(view.value_at(2, 1).unwrap(), CellValue::from("r3"));
    }

    #[test]
    fn rejects_out_of_range_indices_eagerly() {
        let err = IndexedDataContainer::new(parent(3), vec![0, 3]).unwrap_err();
        assert!(matches!(
            err,
            ContainerError::InvalidIndex {
                position: 1,
                index: 3,
                num_rows: 3
            }
        ));
    }

    #[test]
    fn unchecked_view_fails_on_access() {
        let view = IndexedDataContainer::new_unchecked(parent(3), vec![1, 7]);
        assert!(view.value_at(0, 0).is_ok());
        assert!(matches!(
            view.value_at(1, 0),
            Err(ContainerError::RowOutOfRange { index: 7, num_rows: 3 })
        ));
    }

    #[test]
    fn local_index_out_of_range() {
        let view = IndexedDataContainer::new(parent(4), vec![1, 2]).unwrap();
        let mut shared = SharedRow::shared();
        assert!(matches!(
            view.value_at(2, 0),
            Err(ContainerError::RowOutOfRange { index: 2, num_rows: 2 })
        ));
        assert!(view.row(2, &mut shared).is_err());
        assert!(view.row_as_array(5).is_err());
        assert!(view.source_row_index(2).is_err());
    }

    #[test]
    fn identity_view_mirrors_parent() {
        let parent = parent(4);
        let view = IndexedDataContainer::identity(parent.clone());
        assert_eq!(view.indices(), &[0, 1, 2, 3]);
        assert_eq!(view.flatten_data().unwrap(), parent.flatten_data().unwrap());
    }

    #[test]
    fn plain_index_is_local() {
        let view = IndexedDataContainer::new(parent(10), vec![7, 7, 2]).unwrap();
        assert_eq!(view.get_plain_index(), vec![0, 1, 2]);
    }

    #[test]
    fn map_index_exposes_parent_space() {
        let parent = parent(10);
        let view = IndexedDataContainer::new(parent.clone(), vec![9, 0, 3]).unwrap();
        let seen = view
            .map_index(
                |IndexContext { index }, source: &RowDataContainer| {
                    assert_eq!(source.num_rows(), 10);
                    index
                },
                RangeOptions::default(),
            )
            .unwrap();
        assert_eq!(seen, vec![9, 0, 3]);

        let tail = view
            .map_index(|ctx, _| ctx.index, RangeOptions { start: Some(1), end: None })
            .unwrap();
        assert_eq!(tail, vec![0, 3]);
    }

    #[test]
    fn map_clamps_range() {
        let view = IndexedDataContainer::new(parent(5), vec![4, 3, 2, 1]).unwrap();
        let mut shared = SharedRow::new(SharedRowOptions::SHARED);
        let out = view
            .map(
                |row, i| (i, row.value_at(0).unwrap().clone()),
                &mut shared,
                RangeOptions::new(2, 50),
            )
            .unwrap();
        assert_eq!(
            out,
            vec![(2, CellValue::Integer(20)), (3, CellValue::Integer(10))]
        );

        let empty = view
            .map(|_, i| i, &mut shared, RangeOptions::new(3, 1))
            .unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn empty_view() {
        let view = IndexedDataContainer::new(parent(3), vec![]).unwrap();
        let mut shared = SharedRow::fresh();
        assert_eq!(view.num_rows(), 0);
        assert!(view.is_empty());
        assert!(view.rows(SharedRowOptions::SHARED).next_row().is_none());
        assert_eq!(view.column(0).count(), 0);
        assert!(view.flatten_data().unwrap().is_empty());
        assert!(view.find(|_, _| true, &mut shared).unwrap().is_none());
        assert_eq!(view.reduce(|acc, _, _| acc + 1, 0, &mut shared).unwrap(), 0);
    }

    #[test]
    fn find_short_circuits() {
        let view = IndexedDataContainer::new(parent(6), vec![5, 1, 4]).unwrap();
        let mut visited = Vec::new();
        let mut shared = SharedRow::shared();
        let hit = view
            .find(
                |row, i| {
                    visited.push(i);
                    row.value_at(0).unwrap().as_f64().unwrap() < 20.0
                },
                &mut shared,
            )
            .unwrap()
            .unwrap();
        assert!(hit.is_shared());
        assert_eq!(hit.row_index(), 1);
        assert_eq!(visited, vec![0, 1]);
    }
}
