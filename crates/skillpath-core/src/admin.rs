//! Admin-panel controller
//!
//! One [`AdminApp`] owns everything interactive on an admin page: the
//! dashboard entrance animations, the resource tables with their sort and
//! filter state, row selection, the resource and preview dialogs, confirm
//! dialogs, toasts and the simulated live-stats refresh. The browser layer
//! forwards events to it and applies the patches it queues.

use std::collections::{BTreeSet, HashMap};

use rand::rngs::StdRng;

use crate::config::UiConfig;
use crate::confirm::{ConfirmId, ConfirmStack, Severity};
use crate::form::{FormField, REQUIRED_FIELDS_MESSAGE, check_required};
use crate::modal::{ModalId, ModalPhase, ModalSet, ModalTimer};
use crate::motion::stagger;
use crate::number::parse_grouped;
use crate::patch::Patch;
use crate::progress::{CounterTween, RingGeometry, RingLabel, RingSetup, nudge};
use crate::resources::{ResourceBackend, ResourceDraft, ResourcePreview, random_activity};
use crate::schedule::{Clock, Scheduler, TimerId, Timestamp};
use crate::table::{FilterState, HeaderCell, RowRef, RowSnapshot, SortState, TableSorter};
use crate::toast::{ToastId, ToastKind, ToastStack, ToastTimer};

/// Element id of the add/edit resource dialog.
pub const RESOURCE_MODAL: &str = "resourceModal";
/// Element id of the resource preview dialog.
pub const PREVIEW_MODAL: &str = "previewModal";
/// Form index used for the resource dialog in [`Patch::FieldMarked`].
pub const RESOURCE_FORM: usize = 0;
/// Element id of the hidden resource id field.
pub const RESOURCE_ID_FIELD: &str = "resourceId";

const ADD_HEADING: &str = "Add New Resource";
const EDIT_HEADING: &str = "Edit Resource";
const DELETE_TITLE: &str = "Delete Resource";
const DELETE_MESSAGE: &str = "Are you sure you want to delete this resource? This action cannot be undone and will affect any learning paths using this resource.";
const BULK_DELETE_TITLE: &str = "Delete Multiple Resources";
const NOTHING_SELECTED: &str = "Please select at least one resource to delete";
const EXPORT_STARTED: &str = "Generating comprehensive analytics report...";
const EXPORT_DONE: &str = "Analytics report exported successfully!";
const FILTERS_CLEARED: &str = "Filters cleared";

/// Timers of the admin controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminTimer {
	/// A toast timer.
	Toast(ToastTimer),
	/// A modal timer.
	Modal(ModalTimer),
	/// Fill every progress ring.
	FillRings,
	/// Grow the completion bars back.
	RestoreBars,
	/// Slide a stat card in.
	RevealStatCard(usize),
	/// Fade a re-sorted row in.
	RevealSortedRow(RowRef),
	/// Take a filtered-out row out of the layout.
	CollapseRow(RowRef),
	/// Apply the select-all state to one row.
	SelectRow {
		/// The row.
		row: RowRef,
		/// Checkbox state.
		checked: bool,
	},
	/// The simulated preview request finished.
	PreviewReady,
	/// The simulated export finished.
	ExportDone,
	/// Periodic live-stats refresh.
	LiveRefresh,
}

impl From<ToastTimer> for AdminTimer {
	fn from(timer: ToastTimer) -> Self {
		Self::Toast(timer)
	}
}

impl From<ModalTimer> for AdminTimer {
	fn from(timer: ModalTimer) -> Self {
		Self::Modal(timer)
	}
}

/// Work deferred until the user confirms it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminAction {
	/// Delete one resource.
	DeleteResource(String),
	/// Delete every selected row.
	DeleteResources {
		/// Number of selected rows.
		count: usize,
		/// Resource ids found on those rows; rows without one are skipped.
		ids: Vec<String>,
	},
}

/// A resource table found on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSetup {
	/// Header cells, in cell order.
	pub headers: Vec<HeaderCell>,
	/// Body rows, in document order.
	pub rows: Vec<RowSnapshot>,
}

/// Interactive elements found on an admin page at load time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminPage {
	/// Progress rings with the text of their `.progress-text` label.
	pub rings: Vec<RingSetup>,
	/// Number of completion bars.
	pub completion_bars: usize,
	/// Number of `.stat-card` elements.
	pub stat_cards: usize,
	/// Text of every `.stat-number` counter.
	pub counters: Vec<String>,
	/// Server-rendered modals and whether each is displayed.
	pub modals: Vec<(String, bool)>,
	/// Resource tables.
	pub tables: Vec<TableSetup>,
	/// Whether the sidebar starts collapsed.
	pub sidebar_collapsed: bool,
}

#[derive(Debug)]
struct AdminTable {
	sorter: TableSorter,
	rows: Vec<RowSnapshot>,
	order: Vec<usize>,
	reveals: Vec<TimerId>,
}

#[derive(Debug, Clone, Copy)]
struct Counter {
	value: i64,
	shown: i64,
	tween: Option<CounterTween>,
}

/// Controller of the admin panel.
#[derive(Debug)]
pub struct AdminApp<B, C> {
	config: UiConfig,
	clock: C,
	backend: B,
	rng: StdRng,
	scheduler: Scheduler<AdminTimer>,
	toasts: ToastStack,
	modals: ModalSet,
	confirms: ConfirmStack<AdminAction>,
	tables: Vec<AdminTable>,
	filter: FilterState,
	pending_collapse: HashMap<RowRef, TimerId>,
	selected: BTreeSet<RowRef>,
	select_timers: Vec<TimerId>,
	rings: Vec<(RingGeometry, f64)>,
	completion_bars: usize,
	counters: Vec<Option<Counter>>,
	sidebar_collapsed: bool,
	preview: Option<TimerId>,
	outbox: Vec<Patch>,
}

impl<B: ResourceBackend, C: Clock> AdminApp<B, C> {
	/// Creates a controller.
	///
	/// `rng` drives the simulated live stats and activity feed.
	pub fn new(config: UiConfig, backend: B, clock: C, rng: StdRng) -> Self {
		let scheduler = Scheduler::starting_at(clock.now());
		let toasts = ToastStack::new(&config.timings);
		let modals = ModalSet::new(&config.timings);
		Self {
			config,
			clock,
			backend,
			rng,
			scheduler,
			toasts,
			modals,
			confirms: ConfirmStack::new(),
			tables: Vec::new(),
			filter: FilterState::default(),
			pending_collapse: HashMap::new(),
			selected: BTreeSet::new(),
			select_timers: Vec::new(),
			rings: Vec::new(),
			completion_bars: 0,
			counters: Vec::new(),
			sidebar_collapsed: false,
			preview: None,
			outbox: Vec::new(),
		}
	}

	/// Registers the page elements and starts the dashboard animations.
	pub fn mount(&mut self, page: AdminPage) {
		self.tick();
		let timings = self.config.timings.clone();

		for (id, open) in page.modals {
			let phase = if open {
				ModalPhase::Open
			} else {
				ModalPhase::Hidden
			};
			self.modals.register(id.as_str(), phase);
		}

		self.rings = page
			.rings
			.iter()
			.map(|ring| {
				let geometry = RingGeometry::from_radius(ring.radius);
				(geometry, RingLabel::Decimal.percent(ring.label.as_deref()))
			})
			.collect();
		for (index, (geometry, _)) in self.rings.iter().enumerate() {
			self.outbox.push(Patch::RingPrepared {
				index,
				dash_array: geometry.dash_array(),
				offset: geometry.circumference(),
			});
		}
		if !self.rings.is_empty() {
			self.scheduler.after(timings.admin_ring_delay, AdminTimer::FillRings);
		}

		self.completion_bars = page.completion_bars;
		self.outbox
			.extend((0..page.completion_bars).map(Patch::BarCollapsed));
		if page.completion_bars > 0 {
			self.scheduler
				.after(timings.completion_bar_delay, AdminTimer::RestoreBars);
		}

		for index in 0..page.stat_cards {
			self.outbox.push(Patch::StatCardHidden(index));
			self.scheduler.after(
				stagger(timings.stat_card_stagger, index),
				AdminTimer::RevealStatCard(index),
			);
		}

		self.counters = page
			.counters
			.iter()
			.enumerate()
			.map(|(index, text)| {
				let value = parse_grouped(text);
				if value.is_none() {
					tracing::warn!(index, text = %text, "live counter is not a number; it will not be refreshed");
				}
				value.map(|value| Counter {
					value,
					shown: value,
					tween: None,
				})
			})
			.collect();
		self.scheduler.every(timings.live_refresh, AdminTimer::LiveRefresh);

		let title_column = self.config.title_column;
		self.tables = page
			.tables
			.into_iter()
			.map(|table| AdminTable {
				sorter: TableSorter::new(table.headers, title_column),
				order: (0..table.rows.len()).collect(),
				rows: table.rows,
				reveals: Vec::new(),
			})
			.collect();

		self.sidebar_collapsed = page.sidebar_collapsed;
		tracing::debug!(
			tables = self.tables.len(),
			rings = self.rings.len(),
			counters = self.counters.len(),
			"admin mounted"
		);
	}

	/// Fires every timer that is due by the clock and advances running
	/// counter animations.
	pub fn tick(&mut self) {
		let now = self.clock.now();
		while let Some(timer) = self.scheduler.pop_due(now) {
			self.on_timer(timer);
		}
		self.scheduler.settle(now);
		self.animate_counters(now);
	}

	/// Drains the queued patches.
	pub fn take_patches(&mut self) -> Vec<Patch> {
		std::mem::take(&mut self.outbox)
	}

	/// Earliest pending deadline.
	pub fn next_deadline(&self) -> Option<Timestamp> {
		self.scheduler.next_deadline()
	}

	/// The resource backend.
	pub fn backend(&self) -> &B {
		&self.backend
	}

	/// Current filter inputs.
	pub fn filter(&self) -> &FilterState {
		&self.filter
	}

	/// Sort state of a table.
	pub fn sort_state(&self, table: usize) -> Option<SortState> {
		self.tables.get(table).and_then(|t| t.sorter.state())
	}

	/// Load-time row indices of a table in their current document order.
	pub fn row_order(&self, table: usize) -> Option<&[usize]> {
		self.tables.get(table).map(|t| t.order.as_slice())
	}

	/// Rows whose checkbox is ticked.
	pub fn selected(&self) -> impl Iterator<Item = RowRef> + '_ {
		self.selected.iter().copied()
	}

	/// Whether the sidebar is collapsed.
	pub fn sidebar_collapsed(&self) -> bool {
		self.sidebar_collapsed
	}

	/// Phase of a modal.
	pub fn modal_phase(&self, id: &ModalId) -> Option<ModalPhase> {
		self.modals.phase(id)
	}

	/// Number of open confirm dialogs.
	pub fn open_confirms(&self) -> usize {
		self.confirms.len()
	}

	// Toasts, modals and confirms

	/// Shows a toast.
	pub fn toast(&mut self, kind: ToastKind, message: impl Into<String>) -> ToastId {
		self.tick();
		self.toasts
			.push(&mut self.scheduler, kind, message, &mut self.outbox)
	}

	/// Close button of a toast.
	pub fn dismiss_toast(&mut self, id: ToastId) -> bool {
		self.tick();
		self.toasts.dismiss(&mut self.scheduler, id, &mut self.outbox)
	}

	/// Displays a registered modal.
	pub fn open_modal(&mut self, id: &ModalId) -> bool {
		self.tick();
		self.modals.open(&mut self.scheduler, id, &mut self.outbox)
	}

	/// Closes a modal through its close control.
	pub fn close_modal(&mut self, id: &ModalId) -> bool {
		self.tick();
		self.modals.close(&mut self.scheduler, id, &mut self.outbox)
	}

	/// A click whose target is the modal element itself, not its content.
	pub fn backdrop_click(&mut self, id: &ModalId) -> bool {
		self.close_modal(id)
	}

	/// Escape closes every open modal.
	pub fn escape(&mut self) -> usize {
		self.tick();
		self.modals.close_all(&mut self.scheduler, &mut self.outbox)
	}

	/// Asks the user to confirm `action`.
	pub fn confirm(
		&mut self,
		title: impl Into<String>,
		message: impl Into<String>,
		severity: Severity,
		action: AdminAction,
	) -> ConfirmId {
		self.confirms
			.open(title, message, severity, action, &mut self.outbox)
	}

	/// The confirm button of a dialog; runs its action.
	pub fn confirm_accepted(&mut self, id: ConfirmId) {
		self.tick();
		if let Some(action) = self.confirms.confirm(id, &mut self.outbox) {
			self.run(action);
		}
	}

	/// Cancel, the close button or a backdrop click on a confirm dialog.
	pub fn confirm_dismissed(&mut self, id: ConfirmId) -> bool {
		self.confirms.dismiss(id, &mut self.outbox)
	}

	// Tables

	/// Click on the header of `column` in table `table`.
	pub fn sort(&mut self, table: usize, column: usize) -> Option<SortState> {
		self.tick();
		let sort_stagger = self.config.timings.sort_stagger;
		let entry = self.tables.get_mut(table)?;
		let rows: Vec<&RowSnapshot> = entry.order.iter().map(|&key| &entry.rows[key]).collect();
		let outcome = entry.sorter.click(column, &rows)?;
		let order: Vec<usize> = outcome.order.iter().map(|&pos| entry.order[pos]).collect();
		entry.order.clone_from(&order);

		for timer in entry.reveals.drain(..) {
			self.scheduler.cancel(timer);
		}
		entry.reveals = order
			.iter()
			.enumerate()
			.map(|(index, &row)| {
				self.scheduler.after(
					stagger(sort_stagger, index),
					AdminTimer::RevealSortedRow(RowRef::new(table, row)),
				)
			})
			.collect();

		self.outbox.push(Patch::SortIndicators {
			table,
			indicators: outcome.indicators,
		});
		self.outbox.push(Patch::RowsReordered { table, order });
		Some(outcome.state)
	}

	/// Rows of every table in document order.
	fn document_rows(&self) -> impl Iterator<Item = (RowRef, &RowSnapshot)> {
		self.tables.iter().enumerate().flat_map(|(table, entry)| {
			entry
				.order
				.iter()
				.map(move |&key| (RowRef::new(table, key), &entry.rows[key]))
		})
	}

	/// Recomputes row visibility for new filter inputs.
	pub fn apply_filters(&mut self, filter: FilterState) {
		self.tick();
		let timings = self.config.timings.clone();
		let (refs, outcome) = {
			let (refs, rows): (Vec<RowRef>, Vec<&RowSnapshot>) = self.document_rows().unzip();
			(refs, filter.apply(rows))
		};

		for (index, (row, visible)) in refs.into_iter().zip(outcome.visible.iter().copied()).enumerate() {
			if let Some(timer) = self.pending_collapse.remove(&row) {
				self.scheduler.cancel(timer);
			}
			if visible {
				self.outbox.push(Patch::FilteredRowShown {
					row,
					delay: stagger(timings.filter_fade_stagger, index),
				});
			} else {
				self.outbox.push(Patch::FilteredRowFading(row));
				let timer = self
					.scheduler
					.after(timings.filter_collapse, AdminTimer::CollapseRow(row));
				self.pending_collapse.insert(row, timer);
			}
		}
		self.outbox.push(Patch::FilterSummary {
			visible: outcome.visible_count(),
			total: outcome.total(),
		});
		self.filter = filter;
	}

	/// A filter select changed; `option_text` is the label of the chosen option.
	pub fn filter_option_chosen(&mut self, filter: FilterState, option_text: &str) {
		self.apply_filters(filter);
		self.toast(ToastKind::Info, format!("Filter applied: {option_text}"));
	}

	/// Resets the three filter inputs and shows every row again.
	pub fn clear_filters(&mut self) {
		self.outbox.push(Patch::FilterInputsCleared);
		self.apply_filters(FilterState::default());
		self.toast(ToastKind::Info, FILTERS_CLEARED);
	}

	/// A row checkbox was toggled by hand.
	pub fn set_selected(&mut self, row: RowRef, checked: bool) {
		if checked {
			self.selected.insert(row);
		} else {
			self.selected.remove(&row);
		}
	}

	/// The master checkbox was toggled; rows follow one after another.
	pub fn select_all(&mut self, checked: bool) {
		self.tick();
		let step = self.config.timings.select_all_stagger;
		for timer in std::mem::take(&mut self.select_timers) {
			self.scheduler.cancel(timer);
		}
		let rows: Vec<RowRef> = self.document_rows().map(|(row, _)| row).collect();
		self.select_timers = rows
			.into_iter()
			.enumerate()
			.map(|(index, row)| {
				self.scheduler
					.after(stagger(step, index), AdminTimer::SelectRow { row, checked })
			})
			.collect();
	}

	// Resource dialogs

	/// Opens the resource dialog with an empty form.
	pub fn open_add_resource(&mut self) -> bool {
		self.tick();
		let id = ModalId::new(RESOURCE_MODAL);
		if self.modals.phase(&id).is_none() {
			return false;
		}
		self.outbox.push(Patch::ResourceFormReset {
			heading: ADD_HEADING.to_string(),
		});
		self.modals.open(&mut self.scheduler, &id, &mut self.outbox)
	}

	/// Opens the resource dialog filled with the example resource.
	pub fn edit_resource(&mut self, resource_id: &str) -> bool {
		self.tick();
		let id = ModalId::new(RESOURCE_MODAL);
		if self.modals.phase(&id).is_none() {
			return false;
		}
		self.outbox.push(Patch::ResourceFormFilled {
			heading: EDIT_HEADING.to_string(),
			resource_id: resource_id.to_string(),
			draft: Box::new(ResourceDraft::example()),
		});
		self.modals.open(&mut self.scheduler, &id, &mut self.outbox)
	}

	/// Closes the resource dialog.
	pub fn close_resource_modal(&mut self) -> bool {
		self.close_modal(&ModalId::new(RESOURCE_MODAL))
	}

	/// Saves the resource dialog through the backend.
	///
	/// Blank required fields block the save exactly like the public forms.
	/// An empty hidden id creates a resource, anything else updates it.
	/// Returns true if the backend accepted the request.
	pub fn submit_resource(&mut self, fields: &[FormField]) -> bool {
		self.tick();
		let report = check_required(fields);
		for (&field, invalid) in report
			.invalid
			.iter()
			.map(|f| (f, true))
			.chain(report.valid.iter().map(|f| (f, false)))
		{
			self.outbox.push(Patch::FieldMarked {
				form: RESOURCE_FORM,
				field,
				invalid,
			});
		}
		if !report.is_valid() {
			self.toast(ToastKind::Error, REQUIRED_FIELDS_MESSAGE);
			return false;
		}

		let draft = ResourceDraft::from_form(fields);
		let existing = fields
			.iter()
			.find(|f| f.name == RESOURCE_ID_FIELD)
			.map(|f| f.value.trim())
			.filter(|id| !id.is_empty());
		let (result, success, failure) = match existing {
			Some(id) => (
				self.backend.update(id, &draft),
				"Resource updated successfully!",
				"Error updating resource",
			),
			None => (
				self.backend.create(&draft).map(|id| {
					tracing::debug!(id = %id, "resource created");
				}),
				"Resource added successfully!",
				"Error adding resource",
			),
		};
		match result {
			Ok(()) => {
				self.toast(ToastKind::Success, success);
				self.close_resource_modal();
				true
			}
			Err(err) => {
				tracing::warn!(error = %err, "resource save failed");
				self.toast(ToastKind::Error, format!("{failure}: {err}"));
				false
			}
		}
	}

	/// Asks for confirmation before deleting one resource.
	pub fn delete_resource(&mut self, resource_id: &str) -> ConfirmId {
		self.confirm(
			DELETE_TITLE,
			DELETE_MESSAGE,
			Severity::Danger,
			AdminAction::DeleteResource(resource_id.to_string()),
		)
	}

	/// Asks for confirmation before deleting the selected resources.
	///
	/// Returns `None` and shows an error toast when nothing is selected.
	pub fn delete_selected(&mut self) -> Option<ConfirmId> {
		let count = self.selected.len();
		if count == 0 {
			self.toast(ToastKind::Error, NOTHING_SELECTED);
			return None;
		}
		let ids: Vec<String> = self
			.selected
			.iter()
			.filter_map(|row| {
				self.tables
					.get(row.table)
					.and_then(|t| t.rows.get(row.row))
					.and_then(|r| r.resource_id.clone())
			})
			.collect();
		let message =
			format!("You are about to delete {count} resources. This action cannot be undone.");
		Some(self.confirm(
			BULK_DELETE_TITLE,
			message,
			Severity::Danger,
			AdminAction::DeleteResources { count, ids },
		))
	}

	/// Opens the preview dialog and loads the resource details.
	pub fn preview_resource(&mut self, resource_id: &str) -> bool {
		self.tick();
		let id = ModalId::new(PREVIEW_MODAL);
		if self.modals.phase(&id).is_none() {
			return false;
		}
		if let Some(timer) = self.preview.take() {
			self.scheduler.cancel(timer);
		}
		tracing::debug!(resource = resource_id, "loading preview");
		self.outbox.push(Patch::PreviewLoading);
		self.modals.open(&mut self.scheduler, &id, &mut self.outbox);
		self.preview = Some(
			self.scheduler
				.after(self.config.timings.preview_latency, AdminTimer::PreviewReady),
		);
		true
	}

	/// Closes the preview dialog.
	pub fn close_preview_modal(&mut self) -> bool {
		self.close_modal(&ModalId::new(PREVIEW_MODAL))
	}

	/// Starts the simulated analytics export.
	pub fn export_report(&mut self) {
		self.toast(ToastKind::Info, EXPORT_STARTED);
		self.scheduler
			.after(self.config.timings.export_latency, AdminTimer::ExportDone);
	}

	// Sidebar

	/// The sidebar toggle button was clicked.
	pub fn toggle_sidebar(&mut self) {
		self.sidebar_collapsed = !self.sidebar_collapsed;
		self.outbox
			.push(Patch::SidebarCollapsed(self.sidebar_collapsed));
	}

	/// A click anywhere in the document. On narrow viewports a click outside
	/// the sidebar and its toggle collapses the sidebar.
	pub fn document_click(&mut self, viewport_width: f64, inside_sidebar: bool) {
		if viewport_width <= f64::from(self.config.mobile_breakpoint)
			&& !inside_sidebar
			&& !self.sidebar_collapsed
		{
			self.sidebar_collapsed = true;
			self.outbox.push(Patch::SidebarCollapsed(true));
		}
	}

	fn run(&mut self, action: AdminAction) {
		match action {
			AdminAction::DeleteResource(id) => match self.backend.delete(&id) {
				Ok(()) => {
					tracing::debug!(resource = %id, "resource deleted");
					self.toast(ToastKind::Success, "Resource deleted successfully");
				}
				Err(err) => {
					tracing::warn!(resource = %id, error = %err, "delete failed");
					self.toast(ToastKind::Error, format!("Error deleting resource: {err}"));
				}
			},
			AdminAction::DeleteResources { count, ids } => {
				let result = ids.iter().try_for_each(|id| self.backend.delete(id));
				match result {
					Ok(()) => {
						self.toast(
							ToastKind::Success,
							format!("{count} resources deleted successfully"),
						);
					}
					Err(err) => {
						tracing::warn!(error = %err, "bulk delete failed");
						self.toast(ToastKind::Error, format!("Error deleting resources: {err}"));
					}
				}
			}
		}
	}

	fn on_timer(&mut self, timer: AdminTimer) {
		match timer {
			AdminTimer::Toast(timer) => {
				self.toasts
					.on_timer(&mut self.scheduler, timer, &mut self.outbox);
			}
			AdminTimer::Modal(timer) => self.modals.on_timer(timer, &mut self.outbox),
			AdminTimer::FillRings => {
				for (index, (geometry, percent)) in self.rings.iter().enumerate() {
					self.outbox.push(Patch::RingFilled {
						index,
						offset: geometry.offset_for(*percent),
					});
				}
			}
			AdminTimer::RestoreBars => {
				self.outbox
					.extend((0..self.completion_bars).map(Patch::BarRestored));
			}
			AdminTimer::RevealStatCard(index) => self.outbox.push(Patch::StatCardRevealed(index)),
			AdminTimer::RevealSortedRow(row) => {
				if let Some(entry) = self.tables.get_mut(row.table) {
					entry.reveals.retain(|&t| self.scheduler.is_pending(t));
				}
				self.outbox.push(Patch::SortedRowRevealed(row));
			}
			AdminTimer::CollapseRow(row) => {
				self.pending_collapse.remove(&row);
				self.outbox.push(Patch::FilteredRowCollapsed(row));
			}
			AdminTimer::SelectRow { row, checked } => {
				self.select_timers.retain(|&t| self.scheduler.is_pending(t));
				self.set_selected(row, checked);
				self.outbox.push(Patch::RowSelected { row, checked });
			}
			AdminTimer::PreviewReady => {
				self.preview = None;
				self.outbox
					.push(Patch::PreviewReady(Box::new(ResourcePreview::example())));
			}
			AdminTimer::ExportDone => {
				self.toasts.push(
					&mut self.scheduler,
					ToastKind::Success,
					EXPORT_DONE,
					&mut self.outbox,
				);
			}
			AdminTimer::LiveRefresh => self.refresh_live_stats(),
		}
	}

	fn refresh_live_stats(&mut self) {
		let started = self.scheduler.now();
		let duration = self.config.timings.counter_animation;
		for counter in self.counters.iter_mut().flatten() {
			let next = nudge(counter.value, &mut self.rng);
			counter.tween = Some(CounterTween::new(counter.value, next, started, duration));
			counter.value = next;
		}
		let activity = random_activity(&mut self.rng);
		tracing::info!(activity, "new activity");
	}

	fn animate_counters(&mut self, now: Timestamp) {
		for (index, slot) in self.counters.iter_mut().enumerate() {
			let Some(counter) = slot else {
				continue;
			};
			let Some(tween) = counter.tween else {
				continue;
			};
			let value = tween.value_at(now);
			if value != counter.shown {
				counter.shown = value;
				self.outbox.push(Patch::CounterText {
					index,
					text: tween.text_at(now),
				});
			}
			if tween.is_finished(now) {
				counter.tween = None;
			}
		}
	}
}
