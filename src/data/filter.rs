use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use super::container::DataContainer;
use super::error::{check_column, Result};
use super::indexed::IndexedDataContainer;
use super::row::SharedRow;
use super::value::CellValue;

// ---------------------------------------------------------------------------
// Filter predicate: which unique values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps column index → set of selected values.
/// A column absent from the map is not filtered; an empty set hides every row.
pub type FilterState = BTreeMap<usize, BTreeSet<CellValue>>;

/// Sorted set of the distinct values of `column_index`.
pub fn unique_values<C: DataContainer>(container: &C, column_index: usize) -> Result<BTreeSet<CellValue>> {
    check_column(column_index, container.num_columns())?;
    container.column(column_index).collect()
}

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state<C: DataContainer>(container: &C) -> Result<FilterState> {
    (0..container.num_columns())
        .map(|column_index| Ok((column_index, unique_values(container, column_index)?)))
        .collect()
}

/// Return the local indices of rows that pass all active filters, ascending.
///
/// A row passes a column filter when:
/// * The column is not present in `filters` → passes (no constraint)
/// * The filter set for that column is empty → nothing selected → fails
/// * The row's value for that column is in the selected set → passes
pub fn filtered_indices<C: DataContainer>(container: &C, filters: &FilterState) -> Result<Vec<usize>> {
    let mut active = Vec::with_capacity(filters.len());
    for (&column_index, selected) in filters {
        check_column(column_index, container.num_columns())?;
        if selected.is_empty() {
            // Nothing selected for this column → hide everything
            return Ok(Vec::new());
        }
        // Every present value selected → no effective filter
        if selected.is_superset(&unique_values(container, column_index)?) {
            continue;
        }
        active.push((column_index, selected));
    }
    if active.is_empty() {
        return Ok(container.get_plain_index());
    }

    let mut shared = SharedRow::shared();
    container.reduce(
        |mut out, row, row_index| {
            let cells = row.as_slice();
            if active
                .iter()
                .all(|(column_index, selected)| selected.contains(&cells[*column_index]))
            {
                out.push(row_index);
            }
            out
        },
        Vec::new(),
        &mut shared,
    )
}

/// View of the rows of `parent` that pass `filters`.
pub fn filter_view<C: DataContainer>(
    parent: Arc<C>,
    filters: &FilterState,
) -> Result<IndexedDataContainer<C>> {
    let indices = filtered_indices(parent.as_ref(), filters)?;
    Ok(IndexedDataContainer::new_unchecked(parent, indices))
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Local indices ordered by the values of `column_index`. Ties keep their
/// original relative order.
pub fn sorted_indices<C: DataContainer>(
    container: &C,
    column_index: usize,
    order: SortOrder,
) -> Result<Vec<usize>> {
    check_column(column_index, container.num_columns())?;
    let keys: Vec<CellValue> = container.column(column_index).collect::<Result<_>>()?;
    let mut indices: Vec<usize> = (0..keys.len()).collect();
    match order {
        SortOrder::Ascending => indices.sort_by(|&a, &b| keys[a].cmp(&keys[b])),
        SortOrder::Descending => indices.sort_by(|&a, &b| keys[b].cmp(&keys[a])),
    }
    Ok(indices)
}

/// View of `parent` sorted by `column_index`.
pub fn sort_view<C: DataContainer>(
    parent: Arc<C>,
    column_index: usize,
    order: SortOrder,
) -> Result<IndexedDataContainer<C>> {
    let indices = sorted_indices(parent.as_ref(), column_index, order)?;
    Ok(IndexedDataContainer::new_unchecked(parent, indices))
}
