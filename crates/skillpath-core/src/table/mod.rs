//! Resource table sorting and filtering
//!
//! The browser layer snapshots the server-rendered table once (header
//! classes, cell texts and the `data-*` attributes of every body row) and
//! then only forwards header clicks and filter input changes. Sort and filter
//! state live in [`TableSorter`] and [`FilterState`]; the outcome of each
//! operation is a new row order or a visibility vector that the controller
//! turns into patches.

mod filter;
mod model;
mod sort;

pub use filter::{FilterOutcome, FilterState};
pub use model::{HeaderCell, RowRef, RowSnapshot, is_sortable_class};
pub use sort::{
	Comparator, SortDirection, SortIndicator, SortOutcome, SortState, TableSorter, insertion_sort,
	locale_compare,
};
