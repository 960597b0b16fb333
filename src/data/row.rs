use std::ops::Deref;

use serde::Serialize;

use super::container::DataContainer;
use super::error::{check_column, Result};
use super::value::CellValue;

// ---------------------------------------------------------------------------
// DataRow – the row flyweight
// ---------------------------------------------------------------------------

/// The materialized cells of one container row.
///
/// A `DataRow` is either a fresh snapshot that may be kept around, or the
/// buffer of a [`SharedRow`] that traversals overwrite in place at each step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DataRow {
    /// Index of the row in the container that materialized it. For rows read
    /// through a view this is the index in the underlying base container.
    row_index: usize,
    values: Vec<CellValue>,
}

impl DataRow {
    pub fn new(row_index: usize, values: Vec<CellValue>) -> Self {
        Self { row_index, values }
    }

    /// Materialize `row_index` of `container` into a freshly allocated row.
    pub fn from_container<C: DataContainer + ?Sized>(container: &C, row_index: usize) -> Result<Self> {
        let mut row = Self::default();
        container.fill_row(row_index, &mut row)?;
        Ok(row)
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell at `column_index`.
    pub fn value_at(&self, column_index: usize) -> Result<&CellValue> {
        check_column(column_index, self.values.len())?;
        Ok(&self.values[column_index])
    }

    /// Borrow the cells without copying.
    pub fn as_slice(&self) -> &[CellValue] {
        &self.values
    }

    /// Independent snapshot of the cells in column order.
    pub fn values(&self) -> Vec<CellValue> {
        self.values.clone()
    }

    pub fn into_values(self) -> Vec<CellValue> {
        self.values
    }

    /// Reposition the row: clears the cells and returns the buffer for
    /// refilling. Capacity is retained.
    pub fn reset(&mut self, row_index: usize) -> &mut Vec<CellValue> {
        self.row_index = row_index;
        self.values.clear();
        &mut self.values
    }
}

// ---------------------------------------------------------------------------
// Shared row options and factory
// ---------------------------------------------------------------------------

/// Chooses between a reusable row and a fresh row per traversal step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SharedRowOptions {
    pub shared: bool,
}

impl SharedRowOptions {
    pub const FRESH: Self = Self { shared: false };
    pub const SHARED: Self = Self { shared: true };
}

impl From<bool> for SharedRowOptions {
    fn from(shared: bool) -> Self {
        Self { shared }
    }
}

/// The row storage a traversal works with.
///
/// `Fresh` is the marker for "allocate a new row each step"; `Shared` holds the
/// single instance that is overwritten in place. Row-producing operations take
/// `&mut SharedRow`, so one instance can never feed two live traversals and a
/// borrowed row cannot outlive the step that produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SharedRow {
    #[default]
    Fresh,
    Shared(DataRow),
}

impl SharedRow {
    pub fn new(options: SharedRowOptions) -> Self {
        if options.shared {
            SharedRow::Shared(DataRow::default())
        } else {
            SharedRow::Fresh
        }
    }

    pub fn fresh() -> Self {
        SharedRow::Fresh
    }

    pub fn shared() -> Self {
        SharedRow::Shared(DataRow::default())
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, SharedRow::Shared(_))
    }

    /// Position this storage at `row_index` of `container`.
    pub fn load<'r, C: DataContainer + ?Sized>(
        &'r mut self,
        container: &C,
        row_index: usize,
    ) -> Result<RowHandle<'r>> {
        match self {
            SharedRow::Fresh => Ok(RowHandle::Fresh(DataRow::from_container(container, row_index)?)),
            SharedRow::Shared(row) => {
                container.fill_row(row_index, row)?;
                Ok(RowHandle::Shared(row))
            }
        }
    }
}

impl From<SharedRowOptions> for SharedRow {
    fn from(options: SharedRowOptions) -> Self {
        SharedRow::new(options)
    }
}

// ---------------------------------------------------------------------------
// RowHandle – what row accessors hand back
// ---------------------------------------------------------------------------

/// A row returned by a container: owned when fresh, borrowed from the
/// [`SharedRow`] when shared.
#[derive(Debug)]
pub enum RowHandle<'r> {
    Fresh(DataRow),
    Shared(&'r DataRow),
}

impl RowHandle<'_> {
    pub fn is_shared(&self) -> bool {
        matches!(self, RowHandle::Shared(_))
    }

    /// Detach the row from any shared storage.
    pub fn into_owned(self) -> DataRow {
        match self {
            RowHandle::Fresh(row) => row,
            RowHandle::Shared(row) => row.clone(),
        }
    }
}

impl Deref for RowHandle<'_> {
    type Target = DataRow;

    fn deref(&self) -> &DataRow {
        match self {
            RowHandle::Fresh(row) => row,
            RowHandle::Shared(row) => row,
        }
    }
}
