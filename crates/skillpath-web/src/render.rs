//! Applies controller patches to the document

use std::collections::HashMap;
use std::time::Duration;

use skillpath_core::motion::ROW_SELECTED_BACKGROUND;
use skillpath_core::{
	ConfirmId, ModalId, Patch, ResourceDraft, ResourcePreview, RowRef, Severity, SortIndicator,
	StepStatus, ToastId, ToastKind,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlFormElement};

use crate::dom::{self, Query};
use crate::error::{Result, WebError};

const TOAST_CONTAINER_STYLE: &str = "position: fixed; top: 100px; right: 20px; z-index: 1000; display: flex; flex-direction: column; gap: 10px; max-width: 400px;";
const FIELD_ERROR_BORDER: &str = "var(--danger-color)";
const FIELD_ERROR_SHADOW: &str = "0 0 0 3px rgba(239, 68, 68, 0.1)";

/// Which page family is rendered; the two use different toast markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Surface {
	Site,
	Admin,
}

impl Surface {
	fn toast_class(self) -> &'static str {
		match self {
			Self::Site => "toast",
			Self::Admin => "admin-toast",
		}
	}

	fn toast_container(self) -> &'static str {
		match self {
			Self::Site => "toast-container",
			Self::Admin => "admin-toast-container",
		}
	}
}

/// A resource table collected at mount time.
#[derive(Debug)]
pub(crate) struct RenderedTable {
	pub(crate) body: Option<Element>,
	/// Header cells by cell index.
	pub(crate) headers: Vec<Element>,
	/// Body rows by load-time index.
	pub(crate) rows: Vec<Element>,
}

/// Elements the patches refer to by index, collected when the page mounted.
#[derive(Debug)]
pub(crate) struct Renderer {
	document: Document,
	surface: Surface,
	pub(crate) rings: Vec<Element>,
	pub(crate) bars: Vec<(Element, String)>,
	pub(crate) stat_cards: Vec<Element>,
	pub(crate) counters: Vec<Element>,
	pub(crate) flashes: Vec<Element>,
	pub(crate) cards: Vec<Element>,
	pub(crate) tables: Vec<RenderedTable>,
	pub(crate) nav_links: Option<Element>,
	pub(crate) sidebar: Option<Element>,
	forms: HashMap<usize, Vec<Element>>,
	toasts: HashMap<ToastId, Element>,
	confirms: HashMap<ConfirmId, Element>,
}

impl Renderer {
	pub(crate) fn new(document: Document, surface: Surface) -> Self {
		Self {
			document,
			surface,
			rings: Vec::new(),
			bars: Vec::new(),
			stat_cards: Vec::new(),
			counters: Vec::new(),
			flashes: Vec::new(),
			cards: Vec::new(),
			tables: Vec::new(),
			nav_links: None,
			sidebar: None,
			forms: HashMap::new(),
			toasts: HashMap::new(),
			confirms: HashMap::new(),
		}
	}

	/// Records the controls of form `form` in the order they were handed to
	/// the controller, so field highlights can find them.
	pub(crate) fn remember_controls(&mut self, form: usize, controls: Vec<Element>) {
		self.forms.insert(form, controls);
	}

	/// Toast whose close button is `element`.
	pub(crate) fn toast_for(&self, element: &Element) -> Option<ToastId> {
		self.toasts
			.iter()
			.find(|(_, node)| node.contains(Some(element.as_ref())))
			.map(|(&id, _)| id)
	}

	/// Confirm dialog containing `element`.
	pub(crate) fn confirm_for(&self, element: &Element) -> Option<ConfirmId> {
		self.confirms
			.iter()
			.find(|(_, node)| node.contains(Some(element.as_ref())))
			.map(|(&id, _)| id)
	}

	/// Whether `element` is the backdrop of a confirm dialog.
	pub(crate) fn is_confirm_backdrop(&self, element: &Element) -> bool {
		self.confirms.values().any(|node| node == element)
	}

	fn row(&self, row: RowRef) -> Option<&Element> {
		self.tables.get(row.table)?.rows.get(row.row)
	}

	fn modal(&self, id: &ModalId) -> Option<Element> {
		self.document.get_element_by_id(id.as_str())
	}

	pub(crate) fn apply(&mut self, patch: Patch) {
		if let Err(err) = self.try_apply(patch) {
			tracing::warn!(error = %err, "failed to render patch");
		}
	}

	fn try_apply(&mut self, patch: Patch) -> Result<()> {
		match patch {
			Patch::ToastInserted { id, kind, message } => self.insert_toast(id, kind, &message)?,
			Patch::ToastEntered(id) => {
				if let Some(toast) = self.toasts.get(&id) {
					dom::set_style(toast, "transform", "translateX(0)");
					dom::set_style(toast, "opacity", "1");
				}
			}
			Patch::ToastLeaving(id) => {
				if let Some(toast) = self.toasts.get(&id) {
					dom::set_style(toast, "transform", "translateX(100%)");
					dom::set_style(toast, "opacity", "0");
				}
			}
			Patch::ToastRemoved(id) => {
				if let Some(toast) = self.toasts.remove(&id) {
					toast.remove();
				}
			}

			Patch::ModalOpened(id) => {
				if let Some(modal) = self.modal(&id) {
					dom::set_style(&modal, "animation", "");
					dom::set_style(&modal, "display", "flex");
				}
			}
			Patch::ModalClosing(id) => {
				if let Some(modal) = self.modal(&id) {
					dom::set_style(&modal, "animation", "modalSlideIn 0.3s ease reverse");
				}
			}
			Patch::ModalHidden(id) => {
				if let Some(modal) = self.modal(&id) {
					dom::set_style(&modal, "display", "none");
					dom::set_style(&modal, "animation", "");
				}
			}

			Patch::ConfirmOpened {
				id,
				title,
				message,
				severity,
			} => self.open_confirm(id, &title, &message, severity)?,
			Patch::ConfirmRemoved(id) => {
				if let Some(dialog) = self.confirms.remove(&id) {
					dialog.remove();
				}
			}

			Patch::SortIndicators { table, indicators } => self.sort_indicators(table, &indicators)?,
			Patch::RowsReordered { table, order } => {
				if let Some(entry) = self.tables.get(table)
					&& let Some(body) = &entry.body
				{
					for row in order.iter().filter_map(|&key| entry.rows.get(key)) {
						dom::set_style(row, "opacity", "0");
						dom::set_style(row, "transform", "translateX(-20px)");
						body.append_child(row)?;
					}
				}
			}
			Patch::SortedRowRevealed(row) => {
				if let Some(row) = self.row(row) {
					dom::set_style(row, "transition", "all 0.3s ease");
					dom::set_style(row, "opacity", "1");
					dom::set_style(row, "transform", "translateX(0)");
				}
			}

			Patch::FilteredRowShown { row, delay } => {
				if let Some(row) = self.row(row) {
					dom::set_style(row, "display", "");
					dom::set_style(row, "animation", &fade_in(delay));
				}
			}
			Patch::FilteredRowFading(row) => {
				if let Some(row) = self.row(row) {
					dom::set_style(row, "animation", "fadeOut 0.3s ease");
				}
			}
			Patch::FilteredRowCollapsed(row) => {
				if let Some(row) = self.row(row) {
					dom::set_style(row, "display", "none");
					dom::set_style(row, "animation", "");
				}
			}
			Patch::FilterSummary { visible, total } => {
				if let Some(info) = self.document.query(".pagination-info") {
					info.set_inner_html(&format!(
						"Showing <strong>{visible}</strong> of <strong>{total}</strong> resources"
					));
				}
			}
			Patch::FilterInputsCleared => {
				for id in ["resourceSearch", "typeFilter", "categoryFilter"] {
					if let Some(input) = self.document.get_element_by_id(id) {
						dom::set_control_value(&input, "");
					}
				}
			}
			Patch::RowSelected { row, checked } => {
				if let Some(row) = self.row(row) {
					if let Some(checkbox) = row.query(".resource-checkbox") {
						dom::set_checked(&checkbox, checked);
					}
					let background = if checked { ROW_SELECTED_BACKGROUND } else { "" };
					dom::set_style(row, "background", background);
				}
			}

			Patch::RingPrepared {
				index,
				dash_array,
				offset,
			} => {
				if let Some(ring) = self.rings.get(index) {
					dom::set_style(ring, "stroke-dasharray", &dash_array);
					dom::set_style(ring, "stroke-dashoffset", &offset.to_string());
				}
			}
			Patch::RingFilled { index, offset } => {
				if let Some(ring) = self.rings.get(index) {
					dom::set_style(ring, "stroke-dashoffset", &offset.to_string());
				}
			}
			Patch::BarCollapsed(index) => {
				if let Some((bar, _)) = self.bars.get(index) {
					dom::set_style(bar, "width", "0%");
				}
			}
			Patch::BarRestored(index) => {
				if let Some((bar, width)) = self.bars.get(index) {
					dom::set_style(bar, "width", width);
				}
			}
			Patch::StatCardHidden(index) => {
				if let Some(card) = self.stat_cards.get(index) {
					dom::set_style(card, "opacity", "0");
					dom::set_style(card, "transform", "translateY(20px)");
				}
			}
			Patch::StatCardRevealed(index) => {
				if let Some(card) = self.stat_cards.get(index) {
					dom::set_style(card, "transition", "all 0.5s ease");
					dom::set_style(card, "opacity", "1");
					dom::set_style(card, "transform", "translateY(0)");
				}
			}
			Patch::CounterText { index, text } => {
				if let Some(counter) = self.counters.get(index) {
					counter.set_text_content(Some(&text));
				}
			}

			Patch::FlashLeaving(index) => {
				if let Some(flash) = self.flashes.get(index) {
					dom::set_style(flash, "animation", "slideInRight 0.3s ease reverse");
				}
			}
			Patch::FlashRemoved(index) => {
				if let Some(flash) = self.flashes.get(index) {
					flash.remove();
				}
			}
			Patch::FieldMarked {
				form,
				field,
				invalid,
			} => {
				if let Some(control) = self.forms.get(&form).and_then(|c| c.get(field)) {
					let (border, shadow) = if invalid {
						(FIELD_ERROR_BORDER, FIELD_ERROR_SHADOW)
					} else {
						("", "")
					};
					dom::set_style(control, "border-color", border);
					dom::set_style(control, "box-shadow", shadow);
				}
			}
			Patch::StepStatus { step_id, status } => self.step_status(&step_id, status),
			Patch::NavLinksVisible(visible) => {
				if let Some(links) = &self.nav_links {
					dom::set_style(links, "display", if visible { "flex" } else { "none" });
				}
			}
			Patch::SidebarCollapsed(collapsed) => {
				if let Some(sidebar) = &self.sidebar {
					dom::set_class(sidebar, "collapsed", collapsed);
				}
			}
			Patch::CardTransform { card, transform } => {
				if let Some(card) = self.cards.get(card) {
					dom::set_style(card, "transform", &transform);
				}
			}

			Patch::ResourceFormReset { heading } => {
				self.set_modal_title(&heading);
				if let Some(form) = self
					.document
					.get_element_by_id("resourceForm")
					.and_then(|f| f.dyn_into::<HtmlFormElement>().ok())
				{
					form.reset();
				}
				if let Some(id) = self.document.get_element_by_id("resourceId") {
					dom::set_control_value(&id, "");
				}
			}
			Patch::ResourceFormFilled {
				heading,
				resource_id,
				draft,
			} => {
				self.set_modal_title(&heading);
				if let Some(id) = self.document.get_element_by_id("resourceId") {
					dom::set_control_value(&id, &resource_id);
				}
				self.fill_resource_form(&draft);
			}
			Patch::PreviewLoading => {
				if let Some(content) = self.document.query("#previewModal .preview-content") {
					content.set_inner_html(
						r#"<div class="preview-loading"><i class="fas fa-spinner fa-spin"></i><p>Loading resource details...</p></div>"#,
					);
				}
			}
			Patch::PreviewReady(preview) => self.render_preview(&preview)?,

			other => tracing::debug!(?other, "patch has no renderer"),
		}
		Ok(())
	}

	fn insert_toast(&mut self, id: ToastId, kind: ToastKind, message: &str) -> Result<()> {
		let container = match self.document.get_element_by_id(self.surface.toast_container()) {
			Some(container) => container,
			None => {
				let container = dom::create(&self.document, "div", "")?;
				container.set_id(self.surface.toast_container());
				container.set_attribute("style", TOAST_CONTAINER_STYLE)?;
				self.body()?.append_child(&container)?;
				container
			}
		};

		let toast = dom::create(
			&self.document,
			"div",
			&format!("{} toast-{}", self.surface.toast_class(), kind.as_str()),
		)?;
		let content = dom::create(&self.document, "div", "toast-content")?;
		content.append_child(&dom::icon(&self.document, &format!("fas fa-{}", kind.icon()))?)?;
		content.append_child(&dom::create_text(&self.document, "span", "", message)?)?;
		toast.append_child(&content)?;

		let close = dom::create(&self.document, "button", "toast-close")?;
		match self.surface {
			Surface::Site => close.set_text_content(Some("\u{00d7}")),
			Surface::Admin => {
				close.append_child(&dom::icon(&self.document, "fas fa-times")?)?;
			}
		}
		toast.append_child(&close)?;

		container.append_child(&toast)?;
		self.toasts.insert(id, toast);
		Ok(())
	}

	fn open_confirm(&mut self, id: ConfirmId, title: &str, message: &str, severity: Severity) -> Result<()> {
		let doc = &self.document;
		let modal = dom::create(doc, "div", "modal confirm-modal")?;
		let content = dom::create(doc, "div", "modal-content glass-card")?;

		let header = dom::create(doc, "div", "modal-header")?;
		header.append_child(&dom::create_text(doc, "h3", "", title)?)?;
		let close = dom::create(doc, "button", "modal-close")?;
		close.set_attribute("data-confirm", "dismiss")?;
		close.append_child(&dom::icon(doc, "fas fa-times")?)?;
		header.append_child(&close)?;
		content.append_child(&header)?;

		let body = dom::create(doc, "div", "confirm-body")?;
		let badge = dom::create(doc, "div", &format!("confirm-icon {severity}"))?;
		badge.append_child(&dom::icon(doc, "fas fa-exclamation-triangle")?)?;
		body.append_child(&badge)?;
		body.append_child(&dom::create_text(doc, "p", "", message)?)?;
		content.append_child(&body)?;

		let actions = dom::create(doc, "div", "modal-actions")?;
		let cancel = dom::create_text(doc, "button", "btn btn-secondary", "Cancel")?;
		cancel.set_attribute("data-confirm", "dismiss")?;
		let accept = dom::create_text(doc, "button", &format!("btn btn-{severity}"), "Confirm")?;
		accept.set_attribute("data-confirm", "accept")?;
		actions.append_child(&cancel)?;
		actions.append_child(&accept)?;
		content.append_child(&actions)?;

		modal.append_child(&content)?;
		self.body()?.append_child(&modal)?;
		dom::set_style(&modal, "display", "flex");
		self.confirms.insert(id, modal);
		Ok(())
	}

	fn sort_indicators(&self, table: usize, indicators: &[(usize, SortIndicator)]) -> Result<()> {
		let Some(entry) = self.tables.get(table) else {
			return Ok(());
		};
		for &(cell, indicator) in indicators {
			if let Some(slot) = entry
				.headers
				.get(cell)
				.and_then(|header| header.query(".sort-indicator"))
			{
				slot.set_inner_html("");
				slot.append_child(&dom::icon(
					&self.document,
					&format!("fas {}", indicator.icon_class()),
				)?)?;
			}
		}
		Ok(())
	}

	fn step_status(&self, step_id: &str, status: StepStatus) {
		let step = self
			.document
			.query_all("[data-step-id]")
			.into_iter()
			.find(|el| el.get_attribute("data-step-id").as_deref() == Some(step_id))
			.and_then(|el| el.closest(".step-item").ok().flatten());
		if let Some(step) = step {
			for class in StepStatus::CLASSES {
				dom::set_class(&step, class, false);
			}
			dom::set_class(&step, status.class(), true);
		}
	}

	fn set_modal_title(&self, heading: &str) {
		if let Some(title) = self.document.get_element_by_id("modalTitle") {
			title.set_text_content(Some(heading));
		}
	}

	fn fill_resource_form(&self, draft: &ResourceDraft) {
		for (id, value) in draft.form_values() {
			if let Some(control) = self.document.get_element_by_id(id) {
				dom::set_control_value(&control, value);
			}
		}
	}

	fn render_preview(&self, preview: &ResourcePreview) -> Result<()> {
		let Some(content) = self.document.query("#previewModal .preview-content") else {
			return Ok(());
		};
		let doc = &self.document;
		let root = dom::create(doc, "div", "resource-preview")?;

		let header = dom::create(doc, "div", "preview-header")?;
		let kind = dom::create(doc, "div", "preview-type")?;
		kind.append_child(&dom::icon(doc, &format!("fas fa-{}", preview.type_icon))?)?;
		kind.append_child(&dom::create_text(doc, "span", "", &preview.type_label)?)?;
		header.append_child(&kind)?;
		let meta = dom::create(doc, "div", "preview-meta")?;
		meta.append_child(&dom::create_text(
			doc,
			"span",
			&format!("difficulty-badge {}", preview.difficulty_class()),
			&preview.difficulty,
		)?)?;
		meta.append_child(&dom::create_text(doc, "span", "duration", &preview.duration)?)?;
		header.append_child(&meta)?;
		root.append_child(&header)?;

		root.append_child(&dom::create_text(doc, "h3", "preview-title", &preview.title)?)?;
		root.append_child(&dom::create_text(
			doc,
			"p",
			"preview-description",
			&preview.description,
		)?)?;

		let url = dom::create(doc, "div", "preview-url")?;
		url.append_child(&dom::icon(doc, "fas fa-link")?)?;
		let link = dom::create_text(doc, "a", "", &preview.url)?;
		link.set_attribute("href", &preview.url)?;
		link.set_attribute("target", "_blank")?;
		url.append_child(&link)?;
		root.append_child(&url)?;

		let tags = dom::create(doc, "div", "preview-tags")?;
		for tag in &preview.tags {
			tags.append_child(&dom::create_text(doc, "span", "tag", tag)?)?;
		}
		root.append_child(&tags)?;

		let stats = dom::create(doc, "div", "preview-stats")?;
		for (label, value) in &preview.stats {
			let stat = dom::create(doc, "div", "stat")?;
			stat.append_child(&dom::create_text(doc, "span", "label", label)?)?;
			stat.append_child(&dom::create_text(doc, "span", "value", value)?)?;
			stats.append_child(&stat)?;
		}
		root.append_child(&stats)?;

		content.set_inner_html("");
		content.append_child(&root)?;
		Ok(())
	}

	fn body(&self) -> Result<HtmlElement> {
		self.document.body().ok_or(WebError::NoDocument)
	}
}

fn fade_in(delay: Duration) -> String {
	format!("fadeIn 0.3s ease {}ms both", delay.as_millis())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::rc::Rc;
	use std::time::Duration;

	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use skillpath_core::{
		AdminApp, AdminPage, ManualClock, SimulatedBackend, SiteApp, SitePage, UiConfig,
	};
	use wasm_bindgen_test::*;

	use super::*;
	use crate::dom;

	wasm_bindgen_test_configure!(run_in_browser);

	fn document() -> Document {
		dom::document().unwrap()
	}

	/// Appends a scratch element to the body; tests remove it when done.
	fn scratch(document: &Document, tag: &str, class: &str) -> Element {
		let element = dom::create(document, tag, class).unwrap();
		document.body().unwrap().append_child(&element).unwrap();
		element
	}

	fn row_ids(body: &Element) -> Vec<String> {
		body.query_all("tr").iter().map(Element::id).collect()
	}

	#[wasm_bindgen_test]
	fn test_rows_reordered_appends_in_order() {
		let doc = document();
		let table = scratch(&doc, "table", "resources-table");
		let body = dom::create(&doc, "tbody", "").unwrap();
		table.append_child(&body).unwrap();
		let rows: Vec<Element> = ["a", "b", "c"]
			.into_iter()
			.map(|id| {
				let row = dom::create(&doc, "tr", "resource-row").unwrap();
				row.set_id(id);
				body.append_child(&row).unwrap();
				row
			})
			.collect();

		let mut renderer = Renderer::new(doc.clone(), Surface::Admin);
		renderer.tables = vec![RenderedTable {
			body: Some(body.clone()),
			headers: Vec::new(),
			rows: rows.clone(),
		}];
		renderer.apply(Patch::RowsReordered {
			table: 0,
			order: vec![2, 0, 1],
		});

		assert_eq!(row_ids(&body), vec!["c", "a", "b"]);
		assert_eq!(dom::inline_style(&rows[0], "opacity"), "0");

		renderer.apply(Patch::SortedRowRevealed(RowRef::new(0, 0)));
		assert_eq!(dom::inline_style(&rows[0], "opacity"), "1");
		table.remove();
	}

	#[wasm_bindgen_test]
	fn test_filter_summary_text() {
		let doc = document();
		let info = scratch(&doc, "div", "pagination-info");

		let mut renderer = Renderer::new(doc.clone(), Surface::Admin);
		renderer.apply(Patch::FilterSummary {
			visible: 2,
			total: 5,
		});

		assert_eq!(dom::text(&info), "Showing 2 of 5 resources");
		assert_eq!(info.query_all("strong").len(), 2);
		info.remove();
	}

	#[wasm_bindgen_test]
	fn test_toast_container_is_created_once_and_close_removes_once() {
		let doc = document();
		if let Some(stale) = doc.get_element_by_id("toast-container") {
			stale.remove();
		}
		let clock = Rc::new(ManualClock::new());
		let mut app = SiteApp::new(UiConfig::default(), clock.clone());
		app.mount(SitePage::default());
		let mut renderer = Renderer::new(doc.clone(), Surface::Site);

		let first = app.toast(ToastKind::Success, "Saved");
		let second = app.toast(ToastKind::Info, "Heads up");
		for patch in app.take_patches() {
			renderer.apply(patch);
		}

		assert_eq!(doc.query_all("#toast-container").len(), 1);
		let container = doc.get_element_by_id("toast-container").unwrap();
		assert_eq!(container.child_element_count(), 2);
		let toast = container.query(".toast-success").unwrap();
		assert_eq!(dom::text(&toast.query("span").unwrap()), "Saved");

		let close = toast.query(".toast-close").unwrap();
		assert_eq!(renderer.toast_for(&close), Some(first));
		assert!(app.dismiss_toast(first));
		clock.advance(Duration::from_millis(300));
		app.tick();
		for patch in app.take_patches() {
			renderer.apply(patch);
		}
		assert!(!toast.is_connected());
		assert_eq!(container.child_element_count(), 1);

		// A late auto-dismiss or a second close leaves the other toast alone.
		assert!(!app.dismiss_toast(first));
		renderer.apply(Patch::ToastRemoved(first));
		clock.advance(Duration::from_secs(5));
		app.tick();
		let patches = app.take_patches();
		assert!(!patches.contains(&Patch::ToastRemoved(first)));
		assert!(patches.contains(&Patch::ToastRemoved(second)));
		assert_eq!(container.child_element_count(), 1);
		container.remove();
	}

	#[wasm_bindgen_test]
	fn test_confirm_removed_detaches_dialog() {
		let doc = document();
		let mut app = AdminApp::new(
			UiConfig::default(),
			SimulatedBackend::new(),
			Rc::new(ManualClock::new()),
			StdRng::seed_from_u64(1),
		);
		app.mount(AdminPage::default());
		let mut renderer = Renderer::new(doc.clone(), Surface::Admin);

		let id = app.delete_resource("r1");
		for patch in app.take_patches() {
			renderer.apply(patch);
		}
		let dialog = doc
			.query_all(".confirm-modal")
			.into_iter()
			.find(|dialog| renderer.is_confirm_backdrop(dialog))
			.unwrap();
		assert_eq!(dom::inline_style(&dialog, "display"), "flex");
		let accept = dialog.query("[data-confirm=\"accept\"]").unwrap();
		assert_eq!(renderer.confirm_for(&accept), Some(id));

		renderer.apply(Patch::ConfirmRemoved(id));
		assert!(!dialog.is_connected());
		assert_eq!(renderer.confirm_for(&accept), None);
	}
}
