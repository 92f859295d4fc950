//! Confirmation dialogs
//!
//! A confirm dialog is built on demand with a title, a message, a severity
//! and a continuation. Confirming hands the continuation back to the caller
//! and removes the dialog; cancelling, the close button and a backdrop click
//! remove it and drop the continuation. Dialogs are independent: opening a
//! second one while the first is up simply stacks another node.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::patch::Patch;

/// Severity of a confirmation, used for the icon tint and confirm button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
	/// Destructive action.
	#[default]
	Danger,
	/// Risky action.
	Warning,
	/// Positive action.
	Success,
	/// Neutral action.
	Info,
}

impl Severity {
	/// CSS modifier (`btn-<severity>`, `confirm-icon <severity>`).
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Danger => "danger",
			Self::Warning => "warning",
			Self::Success => "success",
			Self::Info => "info",
		}
	}
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Severity {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"danger" => Ok(Self::Danger),
			"warning" => Ok(Self::Warning),
			"success" => Ok(Self::Success),
			"info" => Ok(Self::Info),
			other => Err(CoreError::UnknownSeverity(other.to_string())),
		}
	}
}

/// Identifier of an open confirm dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfirmId(u64);

impl ConfirmId {
	/// Raw numeric value, used as a DOM data attribute.
	pub fn get(self) -> u64 {
		self.0
	}
}

/// An open confirm dialog.
#[derive(Debug)]
pub struct ConfirmDialog<C> {
	id: ConfirmId,
	title: String,
	message: String,
	severity: Severity,
	continuation: C,
}

impl<C> ConfirmDialog<C> {
	/// Identifier of the dialog.
	pub fn id(&self) -> ConfirmId {
		self.id
	}

	/// Heading text.
	pub fn title(&self) -> &str {
		&self.title
	}

	/// Body text.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// Severity.
	pub fn severity(&self) -> Severity {
		self.severity
	}

	/// The pending continuation.
	pub fn continuation(&self) -> &C {
		&self.continuation
	}
}

/// Open confirm dialogs carrying continuations of type `C`.
#[derive(Debug)]
pub struct ConfirmStack<C> {
	dialogs: Vec<ConfirmDialog<C>>,
	next_id: u64,
}

impl<C> Default for ConfirmStack<C> {
	fn default() -> Self {
		Self {
			dialogs: Vec::new(),
			next_id: 0,
		}
	}
}

impl<C> ConfirmStack<C> {
	/// Creates an empty stack.
	pub fn new() -> Self {
		Self::default()
	}

	/// Opens a dialog that will hand back `continuation` when confirmed.
	pub fn open(
		&mut self,
		title: impl Into<String>,
		message: impl Into<String>,
		severity: Severity,
		continuation: C,
		out: &mut Vec<Patch>,
	) -> ConfirmId {
		let id = ConfirmId(self.next_id);
		self.next_id += 1;
		let dialog = ConfirmDialog {
			id,
			title: title.into(),
			message: message.into(),
			severity,
			continuation,
		};
		out.push(Patch::ConfirmOpened {
			id,
			title: dialog.title.clone(),
			message: dialog.message.clone(),
			severity,
		});
		self.dialogs.push(dialog);
		id
	}

	/// Removes a dialog and returns its continuation for the caller to run.
	pub fn confirm(&mut self, id: ConfirmId, out: &mut Vec<Patch>) -> Option<C> {
		self.take(id, out).map(|dialog| dialog.continuation)
	}

	/// Removes a dialog without running its continuation.
	pub fn dismiss(&mut self, id: ConfirmId, out: &mut Vec<Patch>) -> bool {
		self.take(id, out).is_some()
	}

	/// Returns an open dialog.
	pub fn get(&self, id: ConfirmId) -> Option<&ConfirmDialog<C>> {
		self.dialogs.iter().find(|d| d.id == id)
	}

	/// Number of open dialogs.
	pub fn len(&self) -> usize {
		self.dialogs.len()
	}

	/// Returns true if no dialog is open.
	pub fn is_empty(&self) -> bool {
		self.dialogs.is_empty()
	}

	fn take(&mut self, id: ConfirmId, out: &mut Vec<Patch>) -> Option<ConfirmDialog<C>> {
		let index = self.dialogs.iter().position(|d| d.id == id)?;
		out.push(Patch::ConfirmRemoved(id));
		Some(self.dialogs.remove(index))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_confirm_returns_continuation_once() {
		let mut stack = ConfirmStack::new();
		let mut out = Vec::new();
		let id = stack.open("Delete", "Sure?", Severity::Danger, "delete:7", &mut out);

		assert_eq!(stack.confirm(id, &mut out), Some("delete:7"));
		assert_eq!(stack.confirm(id, &mut out), None);
		assert!(stack.is_empty());
		assert_eq!(out.last(), Some(&Patch::ConfirmRemoved(id)));
	}

	#[rstest]
	fn test_dismiss_drops_continuation() {
		let mut stack = ConfirmStack::new();
		let mut out = Vec::new();
		let id = stack.open("Delete", "Sure?", Severity::Danger, 1, &mut out);

		assert!(stack.dismiss(id, &mut out));
		assert!(!stack.dismiss(id, &mut out));
		assert_eq!(stack.confirm(id, &mut out), None);
	}

	#[rstest]
	fn test_dialogs_stack_independently() {
		let mut stack = ConfirmStack::new();
		let mut out = Vec::new();
		let first = stack.open("A", "a", Severity::Warning, 'a', &mut out);
		let second = stack.open("B", "b", Severity::Info, 'b', &mut out);
		assert_eq!(stack.len(), 2);

		assert_eq!(stack.confirm(second, &mut out), Some('b'));
		let remaining = stack.get(first).unwrap();
		assert_eq!(remaining.title(), "A");
		assert_eq!(remaining.severity(), Severity::Warning);
	}

	#[rstest]
	#[case("danger", Severity::Danger)]
	#[case("warning", Severity::Warning)]
	#[case("success", Severity::Success)]
	#[case("info", Severity::Info)]
	fn test_severity_round_trip(#[case] text: &str, #[case] severity: Severity) {
		assert_eq!(text.parse::<Severity>().unwrap(), severity);
		assert_eq!(severity.to_string(), text);
	}
}
