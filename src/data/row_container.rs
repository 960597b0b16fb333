use super::container::DataContainer;
use super::error::{check_column, check_row, ContainerError, Result};
use super::iter::IndexSeq;
use super::row::DataRow;
use super::value::CellValue;

/// Row-major base container: one `Vec<CellValue>` per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowDataContainer {
    /// Ordered column names.
    fields: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl RowDataContainer {
    /// Every row must have exactly one cell per field.
    pub fn new(fields: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let expected = fields.len();
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(ContainerError::RaggedRow {
                row,
                expected,
                found: cells.len(),
            });
        }
        Ok(Self { fields, rows })
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Position of the column called `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f == name)
    }
}

impl DataContainer for RowDataContainer {
    type IndexSource = Self;

    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn num_columns(&self) -> usize {
        self.fields.len()
    }

    fn value_at(&self, row_index: usize, column_index: usize) -> Result<CellValue> {
        check_row(row_index, self.rows.len())?;
        check_column(column_index, self.fields.len())?;
        Ok(self.rows[row_index][column_index].clone())
    }

    fn index_source(&self) -> &Self {
        self
    }

    fn source_row_index(&self, row_index: usize) -> Result<usize> {
        check_row(row_index, self.rows.len())?;
        Ok(row_index)
    }

    fn source_indices(&self) -> IndexSeq<'_> {
        IndexSeq::identity(self.rows.len())
    }

    fn fill_row(&self, row_index: usize, row: &mut DataRow) -> Result<()> {
        check_row(row_index, self.rows.len())?;
        row.reset(row_index).extend_from_slice(&self.rows[row_index]);
        Ok(())
    }

    fn row_as_array(&self, row_index: usize) -> Result<Vec<CellValue>> {
        check_row(row_index, self.rows.len())?;
        Ok(self.rows[row_index].clone())
    }
}
