//! WASM entry point and the functions exported to page scripts

use std::cell::RefCell;

use skillpath_core::{ModalId, ToastKind, UiConfig};
use wasm_bindgen::prelude::*;
use web_sys::Document;

use crate::admin::{self, AdminController};
use crate::dom;
use crate::driver::Driver;
use crate::error::{Result, WebError};
use crate::site::{self, SiteController};

const CONFIG_ELEMENT: &str = "skillpath-config";
const APP_ATTRIBUTE: &str = "data-skillpath-app";

/// The controller mounted on this page.
enum Mounted {
	Site(Driver<SiteController>),
	Admin(Driver<AdminController>),
}

thread_local! {
	static MOUNTED: RefCell<Option<Mounted>> = const { RefCell::new(None) };
}

impl From<WebError> for JsValue {
	fn from(err: WebError) -> Self {
		js_sys::Error::new(&err.to_string()).into()
	}
}

#[wasm_bindgen(start)]
pub fn main() -> std::result::Result<(), JsValue> {
	console_error_panic_hook::set_once();
	tracing_wasm::set_as_global_default();

	let window = dom::window()?;
	let document = dom::document()?;
	let config = load_config(&document)?;

	let mounted = match app_kind(&document).as_deref() {
		Some("admin") => Mounted::Admin(admin::start(&window, &document, config)?),
		_ => Mounted::Site(site::start(&window, &document, config)),
	};
	MOUNTED.with(|slot| *slot.borrow_mut() = Some(mounted));
	tracing::info!("skillpath bindings started");
	Ok(())
}

/// Reads the optional JSON configuration element; defaults when absent.
fn load_config(document: &Document) -> Result<UiConfig> {
	match document.get_element_by_id(CONFIG_ELEMENT) {
		Some(element) => Ok(UiConfig::from_json(&dom::text(&element))?),
		None => Ok(UiConfig::default()),
	}
}

fn app_kind(document: &Document) -> Option<String> {
	document.body()?.get_attribute(APP_ATTRIBUTE)
}

fn with_mounted<R>(f: impl FnOnce(&Mounted) -> R) -> Option<R> {
	MOUNTED.with(|slot| slot.borrow().as_ref().map(f))
}

/// Shows a toast on either page. `kind` is `success`, `error`, `warning` or `info`.
#[wasm_bindgen]
pub fn toast(message: &str, kind: &str) -> std::result::Result<(), JsValue> {
	let kind: ToastKind = kind.parse().map_err(WebError::from)?;
	with_mounted(|mounted| match mounted {
		Mounted::Site(driver) => {
			driver.dispatch(|app| app.toast(kind, message));
		}
		Mounted::Admin(driver) => {
			driver.dispatch(|app| app.toast(kind, message));
		}
	});
	Ok(())
}

/// Sets the status class of a learning-path step.
#[wasm_bindgen(js_name = updateStepProgress)]
pub fn update_step_progress(step_id: &str, status: &str) {
	with_mounted(|mounted| {
		if let Mounted::Site(driver) = mounted {
			driver.dispatch(|app| app.update_step_progress(step_id, status));
		}
	});
}

#[wasm_bindgen(js_name = openModal)]
pub fn open_modal(id: &str) -> bool {
	with_mounted(|mounted| match mounted {
		Mounted::Admin(driver) => driver.dispatch(|app| app.open_modal(&ModalId::new(id))),
		Mounted::Site(_) => false,
	})
	.unwrap_or(false)
}

#[wasm_bindgen(js_name = closeModal)]
pub fn close_modal(id: &str) -> bool {
	with_mounted(|mounted| match mounted {
		Mounted::Admin(driver) => driver.dispatch(|app| app.close_modal(&ModalId::new(id))),
		Mounted::Site(_) => false,
	})
	.unwrap_or(false)
}
