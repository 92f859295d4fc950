//! Public-site bindings

use js_sys::{Function, Object, Promise, Reflect};
use skillpath_core::number::parse_float;
use skillpath_core::share::PROMPT_MESSAGE;
use skillpath_core::site::anchor_target;
use skillpath_core::{FormField, RingSetup, ShareRequest, ShareStep, SiteApp, SitePage, UiConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
	Document, Element, MouseEvent, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
	Window,
};

use crate::clock::PerformanceClock;
use crate::dom::{self, Query};
use crate::driver::Driver;
use crate::error::{Result, WebError};
use crate::render::{Renderer, Surface};

pub(crate) type SiteController = SiteApp<PerformanceClock>;

/// Mounts the site controller on the current document and wires its events.
pub(crate) fn start(window: &Window, document: &Document, config: UiConfig) -> Driver<SiteController> {
	let mut renderer = Renderer::new(document.clone(), Surface::Site);

	let rings = document.query_all(".progress-ring-circle");
	let setups = rings
		.iter()
		.map(|ring| RingSetup::new(ring_radius(ring), ring_label(ring).as_deref()))
		.collect();
	renderer.rings = rings;
	renderer.flashes = document.query_all(".flash-message");
	renderer.cards = document.query_all(".glass-card");
	renderer.nav_links = document.query(".nav-links");

	let page = SitePage {
		rings: setups,
		flash_messages: renderer.flashes.len(),
	};
	let mut app = SiteApp::new(config, PerformanceClock::new(window));
	app.mount(page);

	let driver = Driver::new(app, renderer);
	bind_forms(&driver, document);
	bind_flashes(&driver, document);
	bind_cards(&driver, document);
	bind_anchors(document);
	bind_navigation(&driver, document);
	bind_toasts(&driver, document);
	bind_sharing(&driver, window, document);
	driver.start();
	driver
}

fn ring_radius(ring: &Element) -> f64 {
	ring.get_attribute("r").map_or(0.0, |r| parse_float(&r))
}

/// The percentage label follows the ring's parent element.
fn ring_label(ring: &Element) -> Option<String> {
	ring.parent_element()?
		.next_element_sibling()
		.map(|label| dom::text(&label))
}

fn bind_forms(driver: &Driver<SiteController>, document: &Document) {
	for (index, form) in document.query_all("form").into_iter().enumerate() {
		let driver = driver.clone();
		let target = form.clone();
		dom::listen(&form, "submit", move |event| {
			let controls = target.query_all("[required]");
			let fields: Vec<FormField> = controls
				.iter()
				.map(|control| {
					let name = control.get_attribute("name").unwrap_or_else(|| control.id());
					FormField::new(name, dom::control_value(control)).required()
				})
				.collect();
			driver.with_renderer(|renderer| renderer.remember_controls(index, controls));
			if !driver.dispatch(|app| app.submit_form(index, &fields)) {
				event.prevent_default();
			}
		});
	}
}

fn bind_flashes(driver: &Driver<SiteController>, document: &Document) {
	for (index, flash) in document.query_all(".flash-message").into_iter().enumerate() {
		if let Some(close) = flash.query(".flash-close") {
			let driver = driver.clone();
			dom::listen(&close, "click", move |_| {
				driver.dispatch(|app| app.dismiss_flash(index));
			});
		}
	}
}

fn bind_cards(driver: &Driver<SiteController>, document: &Document) {
	for (index, card) in document.query_all(".glass-card").into_iter().enumerate() {
		let moving = driver.clone();
		let target = card.clone();
		dom::listen(&card, "mousemove", move |event| {
			let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
				return;
			};
			let rect = target.get_bounding_client_rect();
			let x = f64::from(mouse.client_x()) - rect.left();
			let y = f64::from(mouse.client_y()) - rect.top();
			moving.dispatch(|app| app.tilt_card(index, x, y, rect.width(), rect.height()));
		});

		let leaving = driver.clone();
		dom::listen(&card, "mouseleave", move |_| {
			leaving.dispatch(|app| app.reset_card(index));
		});
	}
}

fn bind_anchors(document: &Document) {
	for anchor in document.query_all("a[href^=\"#\"]") {
		let doc = document.clone();
		let link = anchor.clone();
		dom::listen(&anchor, "click", move |event| {
			event.prevent_default();
			let href = link.get_attribute("href").unwrap_or_default();
			let Some(target) = anchor_target(&href).and_then(|id| doc.get_element_by_id(id)) else {
				return;
			};
			let options = ScrollIntoViewOptions::new();
			options.set_behavior(ScrollBehavior::Smooth);
			options.set_block(ScrollLogicalPosition::Start);
			target.scroll_into_view_with_scroll_into_view_options(&options);
		});
	}
}

fn bind_navigation(driver: &Driver<SiteController>, document: &Document) {
	let (Some(toggle), Some(links)) = (document.query(".nav-toggle"), document.query(".nav-links"))
	else {
		return;
	};

	let toggling = driver.clone();
	dom::listen(&toggle, "click", move |_| toggling.dispatch(SiteApp::toggle_nav));

	let clicking = driver.clone();
	dom::listen(document, "click", move |event| {
		let inside = dom::event_element(&event).is_some_and(|target| {
			toggle.contains(Some(target.as_ref())) || links.contains(Some(target.as_ref()))
		});
		clicking.dispatch(|app| app.document_click(inside));
	});
}

fn bind_toasts(driver: &Driver<SiteController>, document: &Document) {
	let driver = driver.clone();
	dom::listen(document, "click", move |event| {
		let Some(button) = dom::closest(&event, ".toast-close") else {
			return;
		};
		if let Some(id) = driver.with_renderer(|renderer| renderer.toast_for(&button)) {
			driver.dispatch(|app| app.dismiss_toast(id));
		}
	});
}

fn bind_sharing(driver: &Driver<SiteController>, window: &Window, document: &Document) {
	for button in document.query_all(".share-path") {
		let driver = driver.clone();
		let window = window.clone();
		let source = button.clone();
		dom::listen(&button, "click", move |_| {
			let Some(path_id) = source.get_attribute("data-path-id") else {
				return;
			};
			let origin = window.location().origin().unwrap_or_default();
			let navigator = window.navigator();
			let web_share = Reflect::has(&navigator, &JsValue::from_str("share")).unwrap_or(false);
			let request = driver.dispatch(|app| app.share_path(&origin, &path_id, web_share));
			spawn_local(run_share(driver.clone(), window.clone(), request));
		});
	}
}

/// Walks the share fallback chain until a step succeeds or none is left.
async fn run_share(driver: Driver<SiteController>, window: Window, request: ShareRequest) {
	let mut step = Some(request.step);
	while let Some(current) = step {
		let succeeded = match attempt_share(&window, current, &request).await {
			Ok(()) => true,
			Err(err) => {
				tracing::debug!(step = ?current, error = %err, "share step failed");
				false
			}
		};
		step = driver.dispatch(|app| app.share_settled(current, succeeded));
	}
}

async fn attempt_share(window: &Window, step: ShareStep, request: &ShareRequest) -> Result<()> {
	let navigator = window.navigator();
	match step {
		ShareStep::WebShare => {
			let data = Object::new();
			Reflect::set(&data, &JsValue::from_str("title"), &JsValue::from_str(request.title))?;
			Reflect::set(&data, &JsValue::from_str("url"), &JsValue::from_str(&request.url))?;
			call_async(&navigator, "share", &data).await
		}
		ShareStep::Clipboard => {
			let clipboard = Reflect::get(&navigator, &JsValue::from_str("clipboard"))?;
			call_async(&clipboard, "writeText", &JsValue::from_str(&request.url)).await
		}
		ShareStep::Prompt => {
			window.prompt_with_message_and_default(PROMPT_MESSAGE, &request.url)?;
			Ok(())
		}
	}
}

/// Calls a promise-returning method by name and waits for it to settle.
async fn call_async(target: &JsValue, method: &str, argument: &JsValue) -> Result<()> {
	let function = Reflect::get(target, &JsValue::from_str(method))?
		.dyn_into::<Function>()
		.map_err(|_| WebError::Js(format!("{method} is not available")))?;
	let promise = function
		.call1(target, argument)?
		.dyn_into::<Promise>()
		.map_err(|_| WebError::Js(format!("{method} did not return a promise")))?;
	JsFuture::from(promise).await?;
	Ok(())
}
