//! Tabular data containers and zero-copy indexed views over them.

pub mod data;

pub use data::any::AnyDataContainer;
pub use data::arrow_container::ArrowDataContainer;
pub use data::container::{DataContainer, IndexContext, RangeOptions};
pub use data::error::{ContainerError, Result};
pub use data::indexed::IndexedDataContainer;
pub use data::iter::{Column, IndexSeq, Rows};
pub use data::row::{DataRow, RowHandle, SharedRow, SharedRowOptions};
pub use data::row_container::RowDataContainer;
pub use data::value::CellValue;
