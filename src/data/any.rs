use super::arrow_container::ArrowDataContainer;
use super::container::DataContainer;
use super::error::Result;
use super::iter::IndexSeq;
use super::row::{DataRow, RowHandle, SharedRow};
use super::row_container::RowDataContainer;
use super::value::CellValue;

/// A base container whose storage layout is picked at runtime, e.g. by the
/// loader from a file extension.
#[derive(Debug, Clone)]
pub enum AnyDataContainer {
    Rows(RowDataContainer),
    Arrow(ArrowDataContainer),
}

impl AnyDataContainer {
    pub fn fields(&self) -> Vec<String> {
        match self {
            AnyDataContainer::Rows(c) => c.fields().to_vec(),
            AnyDataContainer::Arrow(c) => c.fields(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        match self {
            AnyDataContainer::Rows(c) => c.column_index(name),
            AnyDataContainer::Arrow(c) => c.column_index(name),
        }
    }
}

impl From<RowDataContainer> for AnyDataContainer {
    fn from(c: RowDataContainer) -> Self {
        AnyDataContainer::Rows(c)
    }
}

impl From<ArrowDataContainer> for AnyDataContainer {
    fn from(c: ArrowDataContainer) -> Self {
        AnyDataContainer::Arrow(c)
    }
}

macro_rules! delegate {
    ($self:ident, $c:ident => $e:expr) => {
        match $self {
            AnyDataContainer::Rows($c) => $e,
            AnyDataContainer::Arrow($c) => $e,
        }
    };
}

impl DataContainer for AnyDataContainer {
    type IndexSource = Self;

    fn num_rows(&self) -> usize {
        delegate!(self, c => c.num_rows())
    }

    fn num_columns(&self) -> usize {
        delegate!(self, c => c.num_columns())
    }

    fn value_at(&self, row_index: usize, column_index: usize) -> Result<CellValue> {
        delegate!(self, c => c.value_at(row_index, column_index))
    }

    fn index_source(&self) -> &Self {
        self
    }

    fn source_row_index(&self, row_index: usize) -> Result<usize> {
        delegate!(self, c => c.source_row_index(row_index))
    }

    fn source_indices(&self) -> IndexSeq<'_> {
        delegate!(self, c => c.source_indices())
    }

    fn fill_row(&self, row_index: usize, row: &mut DataRow) -> Result<()> {
        delegate!(self, c => c.fill_row(row_index, row))
    }

    fn row<'r>(&self, row_index: usize, shared: &'r mut SharedRow) -> Result<RowHandle<'r>> {
        delegate!(self, c => c.row(row_index, shared))
    }

    fn row_as_array(&self, row_index: usize) -> Result<Vec<CellValue>> {
        delegate!(self, c => c.row_as_array(row_index))
    }
}
