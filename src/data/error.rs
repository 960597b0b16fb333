use thiserror::Error;

/// Errors raised by container accessors and view construction.
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("row index {index} out of range for container with {num_rows} rows")]
    RowOutOfRange { index: usize, num_rows: usize },

    #[error("column index {index} out of range for container with {num_columns} columns")]
    ColumnOutOfRange { index: usize, num_columns: usize },

    /// An index array entry does not address a row of the parent container.
    #[error("index {index} at position {position} is out of range for parent with {num_rows} rows")]
    InvalidIndex {
        position: usize,
        index: usize,
        num_rows: usize,
    },

    #[error("row {row} has {found} cells but the container has {expected} columns")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Arrow(#[from] arrow::error::ArrowError),
}

pub type Result<T, E = ContainerError> = std::result::Result<T, E>;

/// Fails with [`ContainerError::RowOutOfRange`] unless `index < num_rows`.
#[inline]
pub(crate) fn check_row(index: usize, num_rows: usize) -> Result<()> {
    if index < num_rows {
        Ok(())
    } else {
        Err(ContainerError::RowOutOfRange { index, num_rows })
    }
}

#[inline]
pub(crate) fn check_column(index: usize, num_columns: usize) -> Result<()> {
    if index < num_columns {
        Ok(())
    } else {
        Err(ContainerError::ColumnOutOfRange { index, num_columns })
    }
}
