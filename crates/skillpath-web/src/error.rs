//! Error types of the browser bindings

use skillpath_core::CoreError;
use wasm_bindgen::JsValue;

/// Result alias of the browser bindings.
pub type Result<T> = std::result::Result<T, WebError>;

/// Failures while talking to the browser.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WebError {
	/// No global `window`, e.g. inside a worker.
	#[error("no global window")]
	NoWindow,

	/// The window has no document.
	#[error("window has no document")]
	NoDocument,

	/// An element exists but is not of the expected kind.
	#[error("element is not a {0}")]
	UnexpectedElement(&'static str),

	/// A browser API threw.
	#[error("JavaScript error: {0}")]
	Js(String),

	/// A controller-level failure, e.g. an invalid configuration element.
	#[error(transparent)]
	Core(#[from] CoreError),
}

impl From<JsValue> for WebError {
	fn from(value: JsValue) -> Self {
		let message = value
			.as_string()
			.or_else(|| {
				js_sys::Reflect::get(&value, &JsValue::from_str("message"))
					.ok()
					.and_then(|m| m.as_string())
			})
			.unwrap_or_else(|| format!("{value:?}"));
		Self::Js(message)
	}
}
