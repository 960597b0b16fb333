/// Data layer: containers, views, and the producers of index arrays.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → base container
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────────────────┐
///   │ RowDataContainer /            │  own the cells,
///   │ ArrowDataContainer            │  implement DataContainer
///   └──────────────────────────────┘
///        │                 ▲
///        ▼                 │ index arrays
///   ┌──────────┐     ┌───────────────────┐
///   │  filter   │ ──▶ │ IndexedDataContainer│  rows remapped, nothing copied;
///   │  factory  │     └───────────────────┘  views stack on views
///   └──────────┘
/// ```

pub mod any;
pub mod arrow_container;
pub mod container;
pub mod error;
pub mod factory;
pub mod filter;
pub mod indexed;
pub mod iter;
pub mod loader;
pub mod row;
pub mod row_container;
pub mod value;
