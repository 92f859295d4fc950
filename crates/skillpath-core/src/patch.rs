//! DOM patches
//!
//! Controllers never touch the document. Every visible change is queued as a
//! [`Patch`] and applied by the browser layer in order. Indices refer to the
//! elements collected when the controller was mounted, in document order.

use std::time::Duration;

use crate::confirm::{ConfirmId, Severity};
use crate::modal::ModalId;
use crate::progress::StepStatus;
use crate::resources::{ResourceDraft, ResourcePreview};
use crate::table::{RowRef, SortIndicator};
use crate::toast::{ToastId, ToastKind};

/// A single DOM mutation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Patch {
	/// Append a toast to the toast container, creating the container if needed.
	ToastInserted {
		/// Toast id.
		id: ToastId,
		/// Kind, for the class and icon.
		kind: ToastKind,
		/// Message text.
		message: String,
	},
	/// Slide a toast in.
	ToastEntered(ToastId),
	/// Slide a toast out.
	ToastLeaving(ToastId),
	/// Remove a toast node.
	ToastRemoved(ToastId),

	/// Display a modal.
	ModalOpened(ModalId),
	/// Play the reverse entrance animation of a modal.
	ModalClosing(ModalId),
	/// Hide a modal and clear its animation.
	ModalHidden(ModalId),

	/// Append a confirm dialog to the body.
	ConfirmOpened {
		/// Dialog id.
		id: ConfirmId,
		/// Heading.
		title: String,
		/// Body text.
		message: String,
		/// Severity, for the icon tint and confirm button.
		severity: Severity,
	},
	/// Remove a confirm dialog node.
	ConfirmRemoved(ConfirmId),

	/// Set the indicator icon of every sortable header of a table.
	SortIndicators {
		/// Table index.
		table: usize,
		/// Indicator by header cell index.
		indicators: Vec<(usize, SortIndicator)>,
	},
	/// Re-append the body rows of a table in a new order, hidden and shifted.
	RowsReordered {
		/// Table index.
		table: usize,
		/// Load-time row indices in their new document order.
		order: Vec<usize>,
	},
	/// Fade a re-sorted row back in.
	SortedRowRevealed(RowRef),

	/// Show a row that passes the filters, fading in after `delay`.
	FilteredRowShown {
		/// The row.
		row: RowRef,
		/// Delay of the fade-in animation.
		delay: Duration,
	},
	/// Fade out a row that no longer passes the filters.
	FilteredRowFading(RowRef),
	/// Take a filtered-out row out of the layout.
	FilteredRowCollapsed(RowRef),
	/// Update the pagination summary.
	FilterSummary {
		/// Rows passing the filters.
		visible: usize,
		/// Rows evaluated.
		total: usize,
	},
	/// Empty the search box and reset both filter selects.
	FilterInputsCleared,
	/// Set the checkbox of a row and its selection highlight.
	RowSelected {
		/// The row.
		row: RowRef,
		/// New checkbox state.
		checked: bool,
	},

	/// Set the dash of a progress ring and empty it.
	RingPrepared {
		/// Ring index.
		index: usize,
		/// `stroke-dasharray` value.
		dash_array: String,
		/// Initial `stroke-dashoffset`.
		offset: f64,
	},
	/// Move a progress ring to its final offset.
	RingFilled {
		/// Ring index.
		index: usize,
		/// Final `stroke-dashoffset`.
		offset: f64,
	},
	/// Shrink a completion bar to zero width.
	BarCollapsed(usize),
	/// Grow a completion bar back to its rendered width.
	BarRestored(usize),
	/// Hide a stat card below its final position.
	StatCardHidden(usize),
	/// Slide a stat card into place.
	StatCardRevealed(usize),
	/// Replace the text of a live counter.
	CounterText {
		/// Counter index.
		index: usize,
		/// New text.
		text: String,
	},

	/// Fade out a flash message.
	FlashLeaving(usize),
	/// Remove a flash message node.
	FlashRemoved(usize),
	/// Add or remove the error highlight of a form control.
	FieldMarked {
		/// Form index.
		form: usize,
		/// Control position within the fields passed at submit time.
		field: usize,
		/// Whether the control is highlighted.
		invalid: bool,
	},
	/// Set the status class of a learning path step.
	StepStatus {
		/// `data-step-id` of the step.
		step_id: String,
		/// New status.
		status: StepStatus,
	},
	/// Show or hide the mobile navigation links.
	NavLinksVisible(bool),
	/// Collapse or expand the admin sidebar.
	SidebarCollapsed(bool),
	/// Set the transform of a glass card.
	CardTransform {
		/// Card index.
		card: usize,
		/// CSS transform.
		transform: String,
	},

	/// Set the resource dialog heading, reset its form and clear the hidden id.
	ResourceFormReset {
		/// Dialog heading.
		heading: String,
	},
	/// Set the resource dialog heading, hidden id and every form control.
	ResourceFormFilled {
		/// Dialog heading.
		heading: String,
		/// Value of the hidden id field.
		resource_id: String,
		/// Values of the form controls.
		draft: Box<ResourceDraft>,
	},
	/// Show the loading state of the preview dialog.
	PreviewLoading,
	/// Render resource details into the preview dialog.
	PreviewReady(Box<ResourcePreview>),
}
