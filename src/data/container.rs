use std::ops::Range;

use super::error::{check_row, Result};
use super::iter::{Column, IndexSeq, Rows};
use super::row::{DataRow, RowHandle, SharedRow, SharedRowOptions};
use super::value::CellValue;

// ---------------------------------------------------------------------------
// Traversal options
// ---------------------------------------------------------------------------

/// Optional `[start, end)` bounds for `map` and `map_index`.
///
/// Bounds are clamped to the container instead of failing; `start >= end`
/// selects nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeOptions {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl RangeOptions {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// The local rows selected out of `num_rows`.
    pub fn resolve(&self, num_rows: usize) -> Range<usize> {
        let end = self.end.unwrap_or(num_rows).min(num_rows);
        let start = self.start.unwrap_or(0).min(end);
        start..end
    }
}

/// What `map_index` tells its callback about a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexContext {
    /// Row index in the callback's container (the index source).
    pub index: usize,
}

// ---------------------------------------------------------------------------
// DataContainer – the contract shared by base containers and views
// ---------------------------------------------------------------------------

/// Uniform read access to a tabular data source.
///
/// Implemented by base containers that own their cells and by views that
/// re-present another container's rows. Algorithms written against this trait
/// cannot tell the two apart.
///
/// Every accessor fails with `RowOutOfRange`/`ColumnOutOfRange` when handed an
/// index outside `0..num_rows()` / `0..num_columns()`. Traversals visit local
/// rows in ascending order.
pub trait DataContainer {
    /// The container whose native row numbering traversals are addressed in.
    /// A base container is its own index source; a view's is its parent.
    type IndexSource: DataContainer;

    fn num_rows(&self) -> usize;

    fn num_columns(&self) -> usize;

    fn value_at(&self, row_index: usize, column_index: usize) -> Result<CellValue>;

    fn index_source(&self) -> &Self::IndexSource;

    /// Translate a local row index into the index source's numbering.
    fn source_row_index(&self, row_index: usize) -> Result<usize>;

    /// Index-source rows for every local row, in local order.
    fn source_indices(&self) -> IndexSeq<'_>;

    fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    /// Overwrite `row` with the cells of `row_index`.
    fn fill_row(&self, row_index: usize, row: &mut DataRow) -> Result<()> {
        check_row(row_index, self.num_rows())?;
        let num_columns = self.num_columns();
        let cells = row.reset(row_index);
        cells.reserve(num_columns);
        for column_index in 0..num_columns {
            cells.push(self.value_at(row_index, column_index)?);
        }
        Ok(())
    }

    /// Row at `row_index`, fresh or written into `shared` depending on what
    /// the storage is.
    fn row<'r>(&self, row_index: usize, shared: &'r mut SharedRow) -> Result<RowHandle<'r>> {
        shared.load(self, row_index)
    }

    /// Independent copy of the cells of `row_index`.
    fn row_as_array(&self, row_index: usize) -> Result<Vec<CellValue>> {
        Ok(DataRow::from_container(self, row_index)?.into_values())
    }

    /// Lazy one-shot sequence over all rows.
    fn rows(&self, options: SharedRowOptions) -> Rows<'_, Self::IndexSource> {
        Rows::new(self.index_source(), self.source_indices(), options)
    }

    /// Lazy one-shot sequence over the cells of one column.
    fn column(&self, column_index: usize) -> Column<'_, Self::IndexSource> {
        Column::new(self.index_source(), self.source_indices(), column_index)
    }

    /// Local row indices `0..num_rows()`.
    fn get_plain_index(&self) -> Vec<usize> {
        (0..self.num_rows()).collect()
    }

    /// Copy every row into a table of cells. Meant for export of bounded
    /// containers, not for hot paths.
    fn flatten_data(&self) -> Result<Vec<Vec<CellValue>>> {
        let mut shared = SharedRow::shared();
        (0..self.num_rows())
            .map(|row_index| Ok(self.row(row_index, &mut shared)?.values()))
            .collect()
    }

    /// Apply `func` to every row in `range`, collecting the results in order.
    fn map<T, F>(&self, mut func: F, shared: &mut SharedRow, range: RangeOptions) -> Result<Vec<T>>
    where
        F: FnMut(&DataRow, usize) -> T,
    {
        let rows = range.resolve(self.num_rows());
        let mut out = Vec::with_capacity(rows.len());
        for row_index in rows {
            let row = self.row(row_index, shared)?;
            out.push(func(&*row, row_index));
        }
        Ok(out)
    }

    /// Like [`map`](Self::map), but hands `func` the row's index in the index
    /// source together with the index source itself, so code written against
    /// the parent's numbering works unchanged through a view.
    fn map_index<T, F>(&self, mut func: F, range: RangeOptions) -> Result<Vec<T>>
    where
        F: FnMut(IndexContext, &Self::IndexSource) -> T,
    {
        let rows = range.resolve(self.num_rows());
        let source = self.index_source();
        let mut out = Vec::with_capacity(rows.len());
        for row_index in rows {
            let index = self.source_row_index(row_index)?;
            out.push(func(IndexContext { index }, source));
        }
        Ok(out)
    }

    /// First row, scanning from local row 0, for which `predicate` holds.
    fn find<'r, F>(&self, mut predicate: F, shared: &'r mut SharedRow) -> Result<Option<RowHandle<'r>>>
    where
        F: FnMut(&DataRow, usize) -> bool,
    {
        match shared {
            SharedRow::Fresh => {
                for row_index in 0..self.num_rows() {
                    let row = DataRow::from_container(self, row_index)?;
                    if predicate(&row, row_index) {
                        return Ok(Some(RowHandle::Fresh(row)));
                    }
                }
                Ok(None)
            }
            SharedRow::Shared(row) => {
                let mut hit = false;
                for row_index in 0..self.num_rows() {
                    self.fill_row(row_index, row)?;
                    if predicate(&*row, row_index) {
                        hit = true;
                        break;
                    }
                }
                if hit {
                    Ok(Some(RowHandle::Shared(row)))
                } else {
                    Ok(None)
                }
            }
        }
    }

    /// Left fold over all rows in local order.
    fn reduce<T, F>(&self, mut func: F, initial: T, shared: &mut SharedRow) -> Result<T>
    where
        F: FnMut(T, &DataRow, usize) -> T,
    {
        let mut acc = initial;
        for row_index in 0..self.num_rows() {
            let row = self.row(row_index, shared)?;
            acc = func(acc, &*row, row_index);
        }
        Ok(acc)
    }
}
