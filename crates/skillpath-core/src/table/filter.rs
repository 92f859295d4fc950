//! Row filtering

use super::model::RowSnapshot;

/// The three filter inputs above the resource table.
///
/// Rebuilt from the inputs on every change. Criteria are AND-combined and an
/// empty criterion matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
	/// Free-text search over title and description.
	pub search: String,
	/// Exact `data-type` value.
	pub type_code: String,
	/// Substring of `data-category`.
	pub category: String,
}

impl FilterState {
	/// Creates a filter from the raw input values.
	pub fn new(
		search: impl Into<String>,
		type_code: impl Into<String>,
		category: impl Into<String>,
	) -> Self {
		Self {
			search: search.into(),
			type_code: type_code.into(),
			category: category.into(),
		}
	}

	/// Returns true if no criterion is set.
	pub fn is_empty(&self) -> bool {
		self.search.is_empty() && self.type_code.is_empty() && self.category.is_empty()
	}

	/// Returns true if the row satisfies every criterion.
	pub fn matches(&self, row: &RowSnapshot) -> bool {
		self.matches_search(row) && self.matches_type(row) && self.matches_category(row)
	}

	fn matches_search(&self, row: &RowSnapshot) -> bool {
		let needle = self.search.to_lowercase();
		let contains = |text: Option<&String>| {
			text.map(|t| t.to_lowercase().contains(&needle))
				.unwrap_or(needle.is_empty())
		};
		contains(row.title.as_ref()) || contains(row.description.as_ref())
	}

	fn matches_type(&self, row: &RowSnapshot) -> bool {
		self.type_code.is_empty() || row.type_code.as_deref() == Some(self.type_code.as_str())
	}

	fn matches_category(&self, row: &RowSnapshot) -> bool {
		if self.category.is_empty() {
			return true;
		}
		let category = row.category.as_deref().unwrap_or("").to_lowercase();
		category.contains(&self.category.to_lowercase())
	}

	/// Evaluates every row from scratch.
	pub fn apply<'a>(&self, rows: impl IntoIterator<Item = &'a RowSnapshot>) -> FilterOutcome {
		let visible: Vec<bool> = rows.into_iter().map(|row| self.matches(row)).collect();
		let outcome = FilterOutcome { visible };
		tracing::debug!(
			visible = outcome.visible_count(),
			total = outcome.total(),
			"filters applied"
		);
		outcome
	}
}

/// Visibility of every row after a filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
	/// Visibility by row position, in the order the rows were given.
	pub visible: Vec<bool>,
}

impl FilterOutcome {
	/// Number of rows that remain visible.
	pub fn visible_count(&self) -> usize {
		self.visible.iter().filter(|&&v| v).count()
	}

	/// Number of rows evaluated.
	pub fn total(&self) -> usize {
		self.visible.len()
	}

	/// Pagination summary text.
	pub fn summary(&self) -> String {
		format!(
			"Showing {} of {} resources",
			self.visible_count(),
			self.total()
		)
	}
}
