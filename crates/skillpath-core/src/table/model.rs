//! Snapshots of the server-rendered resource table.

/// A header cell of a resource table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
	index: usize,
	class: String,
}

impl HeaderCell {
	/// Creates a header from its cell index and raw `class` attribute.
	pub fn new(index: usize, class: impl Into<String>) -> Self {
		Self {
			index,
			class: class.into(),
		}
	}

	/// Index of the header among all header cells of its row.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Raw `class` attribute.
	pub fn class(&self) -> &str {
		&self.class
	}

	/// Returns true if clicking this header sorts the table.
	pub fn is_sortable(&self) -> bool {
		is_sortable_class(&self.class)
	}
}

/// Returns true for a `class` attribute that ends in `-column` and does not
/// contain the checkbox or actions column class.
///
/// ```
/// use skillpath_core::table::is_sortable_class;
///
/// assert!(is_sortable_class("title-column"));
/// assert!(!is_sortable_class("checkbox-column"));
/// assert!(!is_sortable_class("title-column wide"));
/// ```
pub fn is_sortable_class(class: &str) -> bool {
	class.ends_with("-column")
		&& !class
			.split_whitespace()
			.any(|c| c == "checkbox-column" || c == "actions-column")
}

/// Identifies a body row across all tables of the page.
///
/// `row` is the position of the row in its table when the page loaded; it
/// does not change when the table is re-sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RowRef {
	/// Index of the table in document order.
	pub table: usize,
	/// Load-time index of the row within its table.
	pub row: usize,
}

impl RowRef {
	/// Creates a row reference.
	pub fn new(table: usize, row: usize) -> Self {
		Self { table, row }
	}
}

/// Text content of one body row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSnapshot {
	/// Text content of every cell, untrimmed.
	pub cells: Vec<String>,
	/// Text of the bolded primary title (`.resource-title strong`).
	pub title: Option<String>,
	/// Text of the description line (`.resource-desc`).
	pub description: Option<String>,
	/// `data-type` attribute.
	pub type_code: Option<String>,
	/// `data-category` attribute.
	pub category: Option<String>,
	/// `data-resource-id` of the row's checkbox or action buttons.
	pub resource_id: Option<String>,
}

impl RowSnapshot {
	/// Creates a row from its cell texts.
	pub fn new<I, S>(cells: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			cells: cells.into_iter().map(Into::into).collect(),
			..Self::default()
		}
	}

	/// Sets the bolded title text.
	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = Some(title.into());
		self
	}

	/// Sets the description text.
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}

	/// Sets the `data-type` attribute.
	pub fn with_type(mut self, type_code: impl Into<String>) -> Self {
		self.type_code = Some(type_code.into());
		self
	}

	/// Sets the `data-category` attribute.
	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}

	/// Sets the resource id.
	pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
		self.resource_id = Some(id.into());
		self
	}

	/// Raw text of a cell, or the empty string when the row is shorter.
	pub fn cell(&self, column: usize) -> &str {
		self.cells.get(column).map(String::as_str).unwrap_or("")
	}
}
