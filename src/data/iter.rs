use std::iter::{Copied, FusedIterator};
use std::ops::Range;
use std::slice;

use super::container::DataContainer;
use super::error::Result;
use super::row::{DataRow, RowHandle, SharedRow, SharedRowOptions};
use super::value::CellValue;

// ---------------------------------------------------------------------------
// IndexSeq – which rows of a container a sequence walks
// ---------------------------------------------------------------------------

/// Row indices into an index source: either every row in order, or the
/// entries of a view's index array.
#[derive(Debug, Clone)]
pub enum IndexSeq<'a> {
    Identity(Range<usize>),
    Mapped(Copied<slice::Iter<'a, usize>>),
}

impl<'a> IndexSeq<'a> {
    pub fn identity(num_rows: usize) -> Self {
        IndexSeq::Identity(0..num_rows)
    }

    pub fn mapped(indices: &'a [usize]) -> Self {
        IndexSeq::Mapped(indices.iter().copied())
    }
}

impl Iterator for IndexSeq<'_> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        match self {
            IndexSeq::Identity(range) => range.next(),
            IndexSeq::Mapped(indices) => indices.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            IndexSeq::Identity(range) => range.size_hint(),
            IndexSeq::Mapped(indices) => indices.size_hint(),
        }
    }
}

impl ExactSizeIterator for IndexSeq<'_> {}

impl FusedIterator for IndexSeq<'_> {}

// ---------------------------------------------------------------------------
// Rows – lazy row sequence
// ---------------------------------------------------------------------------

/// Lazy sequence of rows pulled one at a time with [`next_row`](Rows::next_row).
///
/// Each call of `DataContainer::rows` builds a new `Rows`; a consumed sequence
/// stays empty. With shared rows the handle borrows the sequence's own buffer,
/// so it has to be dropped before the next pull. Dropping a partly consumed
/// sequence needs no cleanup.
#[derive(Debug)]
pub struct Rows<'a, C> {
    container: &'a C,
    indices: IndexSeq<'a>,
    shared: SharedRow,
}

impl<'a, C: DataContainer> Rows<'a, C> {
    pub fn new(container: &'a C, indices: IndexSeq<'a>, options: SharedRowOptions) -> Self {
        Self {
            container,
            indices,
            shared: SharedRow::new(options),
        }
    }

    /// Materialize the next row, or `None` once the sequence is exhausted.
    pub fn next_row(&mut self) -> Option<Result<RowHandle<'_>>> {
        let row_index = self.indices.next()?;
        Some(self.container.row(row_index, &mut self.shared))
    }

    /// Rows not yet pulled.
    pub fn remaining(&self) -> usize {
        self.indices.len()
    }

    /// Drain the rest of the sequence into owned rows.
    pub fn into_owned_rows(mut self) -> Result<Vec<DataRow>> {
        let mut out = Vec::with_capacity(self.remaining());
        while let Some(row) = self.next_row() {
            out.push(row?.into_owned());
        }
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Column – lazy cell sequence
// ---------------------------------------------------------------------------

/// Lazy sequence of the cells of one column, in row order.
///
/// The column index is checked by the container on each pull, so an invalid
/// column surfaces as an error from the first `next()`.
#[derive(Debug, Clone)]
pub struct Column<'a, C> {
    container: &'a C,
    indices: IndexSeq<'a>,
    column_index: usize,
}

impl<'a, C: DataContainer> Column<'a, C> {
    pub fn new(container: &'a C, indices: IndexSeq<'a>, column_index: usize) -> Self {
        Self {
            container,
            indices,
            column_index,
        }
    }

    pub fn column_index(&self) -> usize {
        self.column_index
    }
}

impl<C: DataContainer> Iterator for Column<'_, C> {
    type Item = Result<CellValue>;

    fn next(&mut self) -> Option<Self::Item> {
        let row_index = self.indices.next()?;
        Some(self.container.value_at(row_index, self.column_index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<C: DataContainer> ExactSizeIterator for Column<'_, C> {}

impl<C: DataContainer> FusedIterator for Column<'_, C> {}
