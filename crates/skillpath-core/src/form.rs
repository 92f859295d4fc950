//! Required-field validation
//!
//! The only validation the pages perform is a presence check on fields
//! marked `required`. A failed submission shows one error toast and
//! highlights every empty field; fields that were fixed lose their highlight.

/// Message of the toast shown when a required field is empty.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// A form control as read from the document at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
	/// `id` (or `name`) of the control.
	pub name: String,
	/// Current value.
	pub value: String,
	/// Whether the control carries the `required` attribute.
	pub required: bool,
}

impl FormField {
	/// Creates an optional field.
	pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
			required: false,
		}
	}

	/// Marks the field as required.
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Returns true if the field is required and blank.
	pub fn is_missing(&self) -> bool {
		self.required && self.value.trim().is_empty()
	}
}

/// Outcome of a presence check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
	/// Positions of required fields that are blank.
	pub invalid: Vec<usize>,
	/// Positions of required fields that are filled in.
	pub valid: Vec<usize>,
}

impl FormReport {
	/// Returns true if the form may be submitted.
	pub fn is_valid(&self) -> bool {
		self.invalid.is_empty()
	}
}

/// Checks every required field of a form.
pub fn check_required(fields: &[FormField]) -> FormReport {
	let mut report = FormReport::default();
	for (index, field) in fields.iter().enumerate().filter(|(_, f)| f.required) {
		if field.is_missing() {
			report.invalid.push(index);
		} else {
			report.valid.push(index);
		}
	}
	report
}
