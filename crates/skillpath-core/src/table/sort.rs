//! Column sorting

use std::borrow::Borrow;
use std::cmp::Ordering;

use super::model::{HeaderCell, RowSnapshot};
use crate::number::parse_float;

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
	/// Ascending order
	Ascending,
	/// Descending order
	Descending,
}

impl SortDirection {
	/// Returns the opposite direction
	pub fn toggle(&self) -> Self {
		match self {
			Self::Ascending => Self::Descending,
			Self::Descending => Self::Ascending,
		}
	}

	/// Header indicator shown for this direction
	pub fn indicator(&self) -> SortIndicator {
		match self {
			Self::Ascending => SortIndicator::Ascending,
			Self::Descending => SortIndicator::Descending,
		}
	}
}

/// The column a table is currently sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
	/// Cell index of the sorted column.
	pub column: usize,
	/// Direction of the last sort.
	pub direction: SortDirection,
}

impl SortState {
	/// State after a click on `column`, given the current state.
	///
	/// Only a click on the column that is sorted ascending flips to
	/// descending; every other click sorts ascending.
	pub fn after_click(current: Option<SortState>, column: usize) -> SortState {
		let direction = match current {
			Some(state) if state.column == column && state.direction == SortDirection::Ascending => {
				state.direction.toggle()
			}
			_ => SortDirection::Ascending,
		};
		SortState { column, direction }
	}
}

/// Icon shown in a sortable header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
	/// Not the sorted column.
	Neutral,
	/// Sorted ascending.
	Ascending,
	/// Sorted descending.
	Descending,
}

impl SortIndicator {
	/// Font Awesome icon class.
	pub fn icon_class(self) -> &'static str {
		match self {
			Self::Neutral => "fa-sort",
			Self::Ascending => "fa-sort-up",
			Self::Descending => "fa-sort-down",
		}
	}
}

/// How the cells of a column are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
	/// By the numeric prefix of the text. NaN on either side compares equal.
	Numeric,
	/// Case-insensitive locale-style text comparison.
	Lexicographic,
}

impl Comparator {
	/// Picks the comparator for a whole sort from the first row's raw cell.
	///
	/// A column whose first value is not numeric is compared as text even if
	/// every later value is numeric, and vice versa.
	pub fn detect(first_cell: &str) -> Self {
		if parse_float(first_cell).is_nan() {
			Self::Lexicographic
		} else {
			Self::Numeric
		}
	}

	/// Compares two trimmed sort keys.
	pub fn compare(self, a: &str, b: &str) -> Ordering {
		match self {
			Self::Numeric => {
				let diff = parse_float(a) - parse_float(b);
				if diff < 0.0 {
					Ordering::Less
				} else if diff > 0.0 {
					Ordering::Greater
				} else {
					Ordering::Equal
				}
			}
			Self::Lexicographic => locale_compare(a, b),
		}
	}
}

/// Locale-style text comparison.
///
/// Letters compare case-insensitively first; strings that differ only in
/// case put lowercase before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
	let primary = a
		.chars()
		.flat_map(char::to_lowercase)
		.cmp(b.chars().flat_map(char::to_lowercase));
	primary.then_with(|| {
		a.chars()
			.map(char::is_uppercase)
			.cmp(b.chars().map(char::is_uppercase))
	})
}

/// Stable in-place insertion sort.
///
/// Each element only moves left past neighbours that compare `Greater`, so
/// the result is deterministic even for comparators that are not
/// transitive, such as the numeric comparator on NaN cells.
pub fn insertion_sort<T>(items: &mut [T], mut compare: impl FnMut(&T, &T) -> Ordering) {
	for i in 1..items.len() {
		let mut j = i;
		while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
			items.swap(j - 1, j);
			j -= 1;
		}
	}
}

/// Result of a header click.
#[derive(Debug, Clone, PartialEq)]
pub struct SortOutcome {
	/// State after the click.
	pub state: SortState,
	/// Comparator chosen by the first row.
	pub comparator: Comparator,
	/// New order, as positions into the rows passed to [`TableSorter::click`].
	pub order: Vec<usize>,
	/// Indicator for every sortable header, by cell index.
	pub indicators: Vec<(usize, SortIndicator)>,
}

/// Sort state of one table.
#[derive(Debug, Clone)]
pub struct TableSorter {
	headers: Vec<HeaderCell>,
	title_column: Option<usize>,
	state: Option<SortState>,
}

impl TableSorter {
	/// Creates a sorter for a table with the given header row.
	///
	/// Sort keys of `title_column` are read from the bolded title instead of
	/// the raw cell text.
	pub fn new(headers: Vec<HeaderCell>, title_column: Option<usize>) -> Self {
		Self {
			headers,
			title_column,
			state: None,
		}
	}

	/// Current sort state, if the table has been sorted.
	pub fn state(&self) -> Option<SortState> {
		self.state
	}

	/// Cell indices of the sortable headers.
	pub fn sortable_columns(&self) -> impl Iterator<Item = usize> + '_ {
		self.headers
			.iter()
			.filter(|h| h.is_sortable())
			.map(HeaderCell::index)
	}

	/// Returns true if `column` is a sortable header.
	pub fn is_sortable(&self, column: usize) -> bool {
		self.sortable_columns().any(|c| c == column)
	}

	/// Indicator of every sortable header for the current state.
	pub fn indicators(&self) -> Vec<(usize, SortIndicator)> {
		self.sortable_columns()
			.map(|column| {
				let indicator = match self.state {
					Some(state) if state.column == column => state.direction.indicator(),
					_ => SortIndicator::Neutral,
				};
				(column, indicator)
			})
			.collect()
	}

	/// Sort key of a row for a column.
	pub fn sort_key<'a>(&self, row: &'a RowSnapshot, column: usize) -> &'a str {
		let text = match (self.title_column, row.title.as_deref()) {
			(Some(title_column), Some(title)) if title_column == column => title,
			_ => row.cell(column),
		};
		text.trim()
	}

	/// Handles a click on the header of `column`.
	///
	/// `rows` are the body rows in their current document order. Returns
	/// `None` and leaves the state untouched when the table has no rows or
	/// the column is not sortable.
	pub fn click<R: Borrow<RowSnapshot>>(&mut self, column: usize, rows: &[R]) -> Option<SortOutcome> {
		if !self.is_sortable(column) {
			return None;
		}
		let first: &RowSnapshot = rows.first()?.borrow();
		let comparator = Comparator::detect(first.cell(column));
		let state = SortState::after_click(self.state, column);

		let mut order: Vec<usize> = (0..rows.len()).collect();
		insertion_sort(&mut order, |&a, &b| {
			comparator.compare(
				self.sort_key(rows[a].borrow(), column),
				self.sort_key(rows[b].borrow(), column),
			)
		});
		if state.direction == SortDirection::Descending {
			order.reverse();
		}

		self.state = Some(state);
		tracing::debug!(column, ?comparator, direction = ?state.direction, rows = rows.len(), "table sorted");
		Some(SortOutcome {
			state,
			comparator,
			order,
			indicators: self.indicators(),
		})
	}
}
