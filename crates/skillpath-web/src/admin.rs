//! Admin-panel bindings
//!
//! Collects the dashboard, tables and dialogs of an admin page into an
//! [`AdminPage`], mounts an [`AdminApp`] on it and forwards DOM events.
//! Buttons are found by delegation on `data-action`, so rows rendered later
//! by the server keep working.

use rand::SeedableRng;
use rand::rngs::StdRng;
use skillpath_core::admin::{RESOURCE_FORM, RESOURCE_ID_FIELD};
use skillpath_core::motion::{ROW_HOVER_BACKGROUND, ROW_HOVER_TRANSFORM};
use skillpath_core::number::parse_float;
use skillpath_core::{
	AdminApp, AdminPage, FilterState, FormField, HeaderCell, ModalId, ResourceDraft, RingSetup,
	RowRef, RowSnapshot, SimulatedBackend, TableSetup, UiConfig,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent, Window};

use crate::clock::PerformanceClock;
use crate::dom::{self, Query};
use crate::driver::Driver;
use crate::error::Result;
use crate::render::{RenderedTable, Renderer, Surface};

pub(crate) type AdminController = AdminApp<SimulatedBackend, PerformanceClock>;

const STYLES: &str = include_str!("admin.css");
const BAR_SELECTOR: &str = ".completion-item .progress-fill, .bar-fill";

/// Mounts the admin controller on the current document and wires its events.
pub(crate) fn start(window: &Window, document: &Document, config: UiConfig) -> Result<Driver<AdminController>> {
	inject_styles(document)?;

	let mut renderer = Renderer::new(document.clone(), Surface::Admin);

	let rings = document.query_all(".progress-ring-circle");
	let ring_setups = rings
		.iter()
		.map(|ring| {
			let radius = ring.get_attribute("r").map_or(0.0, |r| parse_float(&r));
			let label = ring
				.parent_element()
				.and_then(|parent| parent.query(".progress-text"))
				.map(|text| dom::text(&text));
			RingSetup::new(radius, label.as_deref())
		})
		.collect();
	renderer.rings = rings;

	renderer.bars = document
		.query_all(BAR_SELECTOR)
		.into_iter()
		.map(|bar| {
			let width = dom::inline_style(&bar, "width");
			(bar, width)
		})
		.collect();
	renderer.stat_cards = document.query_all(".stat-card");
	renderer.counters = document.query_all(".stat-number");
	renderer.sidebar = document.query(".admin-sidebar");

	let modals = document
		.query_all(".modal")
		.into_iter()
		.filter(|modal| !modal.id().is_empty())
		.map(|modal| (modal.id(), dom::inline_style(&modal, "display") == "flex"))
		.collect();

	let (tables, setups): (Vec<_>, Vec<_>) = document
		.query_all(".resources-table")
		.into_iter()
		.map(|table| collect_table(document, &table))
		.unzip();
	renderer.tables = tables;

	let page = AdminPage {
		rings: ring_setups,
		completion_bars: renderer.bars.len(),
		stat_cards: renderer.stat_cards.len(),
		counters: renderer.counters.iter().map(dom::text).collect(),
		modals,
		tables: setups,
		sidebar_collapsed: renderer
			.sidebar
			.as_ref()
			.is_some_and(|sidebar| sidebar.class_list().contains("collapsed")),
	};
	let mut app = AdminApp::new(
		config,
		SimulatedBackend::new(),
		PerformanceClock::new(window),
		StdRng::from_entropy(),
	);
	app.mount(page);

	let driver = Driver::new(app, renderer);
	bind_sidebar(&driver, window, document);
	bind_tables(&driver, document);
	bind_modals(&driver, document);
	bind_filters(&driver, document);
	bind_selection(&driver, document);
	bind_actions(&driver, document);
	bind_resource_form(&driver, document);
	driver.start();
	Ok(driver)
}

fn inject_styles(document: &Document) -> Result<()> {
	let style = document.create_element("style")?;
	style.set_text_content(Some(STYLES));
	if let Some(head) = document.head() {
		head.append_child(&style)?;
	}
	Ok(())
}

/// Reads one resource table and decorates its sortable headers.
fn collect_table(document: &Document, table: &Element) -> (RenderedTable, TableSetup) {
	let header_elements = table.query_all("th");
	let headers: Vec<HeaderCell> = header_elements
		.iter()
		.enumerate()
		.map(|(index, th)| HeaderCell::new(index, th.class_name()))
		.collect();
	for (cell, th) in headers.iter().zip(&header_elements) {
		if cell.is_sortable() {
			dom::set_style(th, "cursor", "pointer");
			if let Err(err) = add_sort_indicator(document, th) {
				tracing::warn!(error = %err, "failed to add sort indicator");
			}
		}
	}

	let row_elements = table.query_all("tbody tr");
	let rows = row_elements.iter().map(snapshot_row).collect();
	(
		RenderedTable {
			body: table.query("tbody"),
			headers: header_elements,
			rows: row_elements,
		},
		TableSetup { headers, rows },
	)
}

fn add_sort_indicator(document: &Document, header: &Element) -> Result<()> {
	let indicator = dom::create(document, "span", "sort-indicator")?;
	indicator.append_child(&dom::icon(document, "fas fa-sort")?)?;
	header.append_child(&indicator)?;
	Ok(())
}

fn snapshot_row(row: &Element) -> RowSnapshot {
	let cells: Vec<String> = row.query_all("td").iter().map(dom::text).collect();
	let mut snapshot = RowSnapshot::new(cells);
	if let Some(title) = row.query(".resource-title strong") {
		snapshot = snapshot.with_title(dom::text(&title));
	}
	if let Some(description) = row.query(".resource-desc") {
		snapshot = snapshot.with_description(dom::text(&description));
	}
	if let Some(type_code) = row.get_attribute("data-type") {
		snapshot = snapshot.with_type(type_code);
	}
	if let Some(category) = row.get_attribute("data-category") {
		snapshot = snapshot.with_category(category);
	}
	if let Some(id) = row_resource_id(row) {
		snapshot = snapshot.with_resource_id(id);
	}
	snapshot
}

/// Resource id of a row: on the row itself, its checkbox, or any action button.
fn row_resource_id(row: &Element) -> Option<String> {
	row.get_attribute("data-resource-id")
		.or_else(|| {
			row.query(".resource-checkbox")
				.and_then(|checkbox| checkbox.get_attribute("data-resource-id"))
		})
		.or_else(|| {
			row.query("[data-resource-id]")
				.and_then(|element| element.get_attribute("data-resource-id"))
		})
}

fn bind_sidebar(driver: &Driver<AdminController>, window: &Window, document: &Document) {
	let (Some(toggle), Some(sidebar)) = (document.get_element_by_id("sidebarToggle"), document.query(".admin-sidebar"))
	else {
		return;
	};

	let toggling = driver.clone();
	dom::listen(&toggle, "click", move |_| toggling.dispatch(AdminApp::toggle_sidebar));

	let clicking = driver.clone();
	let window = window.clone();
	dom::listen(document, "click", move |event| {
		let inside = dom::event_element(&event).is_some_and(|target| {
			sidebar.contains(Some(target.as_ref())) || toggle.contains(Some(target.as_ref()))
		});
		let width = window
			.inner_width()
			.ok()
			.and_then(|width| width.as_f64())
			.unwrap_or_default();
		clicking.dispatch(|app| app.document_click(width, inside));
	});
}

fn bind_tables(driver: &Driver<AdminController>, document: &Document) {
	for (table, element) in document.query_all(".resources-table").into_iter().enumerate() {
		for (column, th) in element.query_all("th").into_iter().enumerate() {
			if !HeaderCell::new(column, th.class_name()).is_sortable() {
				continue;
			}
			let driver = driver.clone();
			dom::listen(&th, "click", move |_| {
				driver.dispatch(|app| app.sort(table, column));
			});
		}

		for row in element.query_all("tbody tr") {
			let entering = row.clone();
			dom::listen(&row, "mouseenter", move |_| {
				dom::set_style(&entering, "background", ROW_HOVER_BACKGROUND);
				dom::set_style(&entering, "transform", ROW_HOVER_TRANSFORM);
			});
			let leaving = row.clone();
			dom::listen(&row, "mouseleave", move |_| {
				dom::set_style(&leaving, "background", "");
				dom::set_style(&leaving, "transform", "");
			});
		}
	}
}

fn bind_modals(driver: &Driver<AdminController>, document: &Document) {
	for modal in document.query_all(".modal") {
		let id = ModalId::new(modal.id());
		let driver = driver.clone();
		let backdrop = modal.clone();
		dom::listen(&modal, "click", move |event| {
			if dom::event_element(&event).is_some_and(|target| target == backdrop) {
				driver.dispatch(|app| app.backdrop_click(&id));
			}
		});
	}

	let escaping = driver.clone();
	dom::listen(document, "keydown", move |event| {
		if event
			.dyn_ref::<KeyboardEvent>()
			.is_some_and(|key| key.key() == "Escape")
		{
			escaping.dispatch(AdminApp::escape);
		}
	});

	// Confirm dialogs are created on demand, so their buttons and backdrops
	// are handled by delegation.
	let confirming = driver.clone();
	dom::listen(document, "click", move |event| {
		if let Some(button) = dom::closest(&event, "[data-confirm]") {
			let Some(id) = confirming.with_renderer(|renderer| renderer.confirm_for(&button)) else {
				return;
			};
			if button.get_attribute("data-confirm").as_deref() == Some("accept") {
				confirming.dispatch(|app| app.confirm_accepted(id));
			} else {
				confirming.dispatch(|app| app.confirm_dismissed(id));
			}
			return;
		}

		let Some(target) = dom::event_element(&event) else {
			return;
		};
		let backdrop = confirming.with_renderer(|renderer| {
			renderer
				.is_confirm_backdrop(&target)
				.then(|| renderer.confirm_for(&target))
				.flatten()
		});
		if let Some(id) = backdrop {
			confirming.dispatch(|app| app.confirm_dismissed(id));
		}
	});

	let closing = driver.clone();
	dom::listen(document, "click", move |event| {
		let Some(button) = dom::closest(&event, ".toast-close") else {
			return;
		};
		if let Some(id) = closing.with_renderer(|renderer| renderer.toast_for(&button)) {
			closing.dispatch(|app| app.dismiss_toast(id));
		}
	});
}

/// Current values of the three filter inputs.
fn filter_state(document: &Document) -> FilterState {
	let value = |id: &str| {
		document
			.get_element_by_id(id)
			.map(|input| dom::control_value(&input))
			.unwrap_or_default()
	};
	FilterState::new(value("resourceSearch"), value("typeFilter"), value("categoryFilter"))
}

fn bind_filters(driver: &Driver<AdminController>, document: &Document) {
	if let Some(search) = document.get_element_by_id("resourceSearch") {
		let driver = driver.clone();
		let doc = document.clone();
		dom::listen(&search, "input", move |_| {
			let filter = filter_state(&doc);
			driver.dispatch(|app| app.apply_filters(filter));
		});
	}

	for container in document.query_all("[data-filter]") {
		let Some(select) = container.query("select") else {
			continue;
		};
		let driver = driver.clone();
		let doc = document.clone();
		let source = select.clone();
		dom::listen(&select, "change", move |_| {
			let filter = filter_state(&doc);
			let label = dom::selected_option_text(&source);
			driver.dispatch(|app| app.filter_option_chosen(filter, &label));
		});
	}
}

fn bind_selection(driver: &Driver<AdminController>, document: &Document) {
	if let Some(select_all) = document.get_element_by_id("selectAll") {
		let driver = driver.clone();
		let source = select_all.clone();
		dom::listen(&select_all, "change", move |_| {
			let checked = dom::is_checked(&source);
			driver.dispatch(|app| app.select_all(checked));
		});
	}

	for (table, element) in document.query_all(".resources-table").into_iter().enumerate() {
		for (index, row) in element.query_all("tbody tr").into_iter().enumerate() {
			let Some(checkbox) = row.query(".resource-checkbox") else {
				continue;
			};
			let driver = driver.clone();
			let source = checkbox.clone();
			dom::listen(&checkbox, "change", move |_| {
				let checked = dom::is_checked(&source);
				driver.dispatch(|app| app.set_selected(RowRef::new(table, index), checked));
			});
		}
	}
}

/// Resource id of an action button, falling back to its row.
fn resource_id(button: &Element) -> Option<String> {
	button.get_attribute("data-resource-id").or_else(|| {
		button
			.closest("[data-resource-id]")
			.ok()
			.flatten()
			.and_then(|row| row.get_attribute("data-resource-id"))
	})
}

fn bind_actions(driver: &Driver<AdminController>, document: &Document) {
	let driver = driver.clone();
	dom::listen(document, "click", move |event| {
		let Some(button) = dom::closest(&event, "[data-action]") else {
			return;
		};
		let action = button.get_attribute("data-action").unwrap_or_default();
		let id = resource_id(&button);
		match (action.as_str(), id.as_deref()) {
			("add", _) => {
				driver.dispatch(AdminApp::open_add_resource);
			}
			("edit", Some(id)) => {
				driver.dispatch(|app| app.edit_resource(id));
			}
			("delete", Some(id)) => {
				driver.dispatch(|app| app.delete_resource(id));
			}
			("preview", Some(id)) => {
				driver.dispatch(|app| app.preview_resource(id));
			}
			("bulk-delete", _) => {
				driver.dispatch(AdminApp::delete_selected);
			}
			("export", _) => driver.dispatch(AdminApp::export_report),
			("clear-filters", _) => driver.dispatch(AdminApp::clear_filters),
			("close-resource", _) => {
				driver.dispatch(AdminApp::close_resource_modal);
			}
			("close-preview", _) => {
				driver.dispatch(AdminApp::close_preview_modal);
			}
			(other, id) => tracing::debug!(action = other, ?id, "unhandled admin action"),
		}
	});
}

fn bind_resource_form(driver: &Driver<AdminController>, document: &Document) {
	let Some(form) = document.get_element_by_id("resourceForm") else {
		return;
	};
	let driver = driver.clone();
	let doc = document.clone();
	dom::listen(&form, "submit", move |event| {
		event.prevent_default();
		let (controls, fields): (Vec<Element>, Vec<FormField>) = ResourceDraft::FIELD_IDS
			.iter()
			.chain(std::iter::once(&RESOURCE_ID_FIELD))
			.filter_map(|&id| {
				let control = doc.get_element_by_id(id)?;
				let field = FormField::new(id, dom::control_value(&control));
				let field = if control.has_attribute("required") {
					field.required()
				} else {
					field
				};
				Some((control, field))
			})
			.unzip();
		driver.with_renderer(|renderer| renderer.remember_controls(RESOURCE_FORM, controls));
		driver.dispatch(|app| app.submit_resource(&fields));
	});
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use skillpath_core::resources::BackendCall;
	use wasm_bindgen_test::*;
	use web_sys::HtmlElement;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn mounted(window: &Window, document: &Document) -> Driver<AdminController> {
		let mut app = AdminApp::new(
			UiConfig::default(),
			SimulatedBackend::new(),
			PerformanceClock::new(window),
			StdRng::seed_from_u64(5),
		);
		app.mount(AdminPage::default());
		let driver = Driver::new(app, Renderer::new(document.clone(), Surface::Admin));
		bind_modals(&driver, document);
		driver
	}

	/// The confirm dialog most recently added to the page.
	fn last_dialog(document: &Document) -> Element {
		document.query_all(".confirm-modal").pop().unwrap()
	}

	fn click(element: &Element) {
		element.dyn_ref::<HtmlElement>().unwrap().click();
	}

	fn backend_calls(driver: &Driver<AdminController>) -> Vec<BackendCall> {
		driver.dispatch(|app| app.backend().calls().to_vec())
	}

	#[wasm_bindgen_test]
	fn test_confirm_buttons_run_action_only_on_accept() {
		let window = dom::window().unwrap();
		let document = dom::document().unwrap();
		let driver = mounted(&window, &document);

		driver.dispatch(|app| app.delete_resource("r1"));
		let dialog = last_dialog(&document);
		click(&dialog.query(".btn-secondary").unwrap());
		assert!(!dialog.is_connected());
		assert!(backend_calls(&driver).is_empty());

		driver.dispatch(|app| app.delete_resource("r1"));
		let dialog = last_dialog(&document);
		click(&dialog.query(".modal-close").unwrap());
		assert!(!dialog.is_connected());
		assert!(backend_calls(&driver).is_empty());

		driver.dispatch(|app| app.delete_resource("r1"));
		let dialog = last_dialog(&document);
		click(&dialog.query("[data-confirm=\"accept\"]").unwrap());
		assert!(!dialog.is_connected());
		assert_eq!(
			backend_calls(&driver),
			vec![BackendCall::Delete("r1".to_string())]
		);
		assert_eq!(driver.dispatch(|app| app.open_confirms()), 0);
	}

	#[wasm_bindgen_test]
	fn test_confirm_backdrop_click_dismisses() {
		let window = dom::window().unwrap();
		let document = dom::document().unwrap();
		let driver = mounted(&window, &document);

		driver.dispatch(|app| app.delete_resource("r2"));
		let dialog = last_dialog(&document);
		click(&dialog.query(".confirm-body").unwrap());
		assert!(dialog.is_connected());

		click(&dialog);
		assert!(!dialog.is_connected());
		assert!(backend_calls(&driver).is_empty());
	}

	#[wasm_bindgen_test]
	fn test_row_resource_id_falls_back_to_controls() {
		let document = dom::document().unwrap();
		let row = document.create_element("tr").unwrap();
		row.set_inner_html(
			r#"<td><input type="checkbox" class="resource-checkbox"></td><td><button data-action="edit" data-resource-id="r7"></button></td>"#,
		);
		assert_eq!(row_resource_id(&row).as_deref(), Some("r7"));

		let checkbox = row.query(".resource-checkbox").unwrap();
		checkbox.set_attribute("data-resource-id", "r6").unwrap();
		assert_eq!(row_resource_id(&row).as_deref(), Some("r6"));

		row.set_attribute("data-resource-id", "r5").unwrap();
		assert_eq!(row_resource_id(&row).as_deref(), Some("r5"));
	}
}
