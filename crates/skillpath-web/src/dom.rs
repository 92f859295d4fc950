//! Thin helpers over `web-sys`
//!
//! Lookups return `Option`/empty collections instead of errors: a page that
//! lacks an element simply does not get the behaviour attached to it.

use js_sys::Reflect;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
	CssStyleDeclaration, Document, Element, Event, EventTarget, HtmlInputElement,
	HtmlSelectElement, HtmlTextAreaElement, NodeList, Window,
};

use crate::error::{Result, WebError};

pub(crate) fn window() -> Result<Window> {
	web_sys::window().ok_or(WebError::NoWindow)
}

pub(crate) fn document() -> Result<Document> {
	window()?.document().ok_or(WebError::NoDocument)
}

/// `querySelector` and `querySelectorAll` on documents and elements.
pub(crate) trait Query {
	fn query(&self, selector: &str) -> Option<Element>;
	fn query_all(&self, selector: &str) -> Vec<Element>;
}

impl Query for Document {
	fn query(&self, selector: &str) -> Option<Element> {
		self.query_selector(selector).ok().flatten()
	}

	fn query_all(&self, selector: &str) -> Vec<Element> {
		elements(self.query_selector_all(selector))
	}
}

impl Query for Element {
	fn query(&self, selector: &str) -> Option<Element> {
		self.query_selector(selector).ok().flatten()
	}

	fn query_all(&self, selector: &str) -> Vec<Element> {
		elements(self.query_selector_all(selector))
	}
}

fn elements(list: std::result::Result<NodeList, JsValue>) -> Vec<Element> {
	let list = match list {
		Ok(list) => list,
		Err(err) => {
			tracing::warn!(error = %WebError::from(err), "selector rejected");
			return Vec::new();
		}
	};
	(0..list.length())
		.filter_map(|index| list.item(index))
		.filter_map(|node| node.dyn_into::<Element>().ok())
		.collect()
}

/// Text content, empty for elements without text.
pub(crate) fn text(element: &Element) -> String {
	element.text_content().unwrap_or_default()
}

fn style(element: &Element) -> Result<CssStyleDeclaration> {
	Reflect::get(element, &JsValue::from_str("style"))?
		.dyn_into::<CssStyleDeclaration>()
		.map_err(|_| WebError::UnexpectedElement("styled element"))
}

/// Sets one inline style property. Works for HTML and SVG elements.
pub(crate) fn set_style(element: &Element, property: &str, value: &str) {
	let result = style(element)
		.and_then(|style| style.set_property(property, value).map_err(WebError::from));
	if let Err(err) = result {
		tracing::warn!(property, error = %err, "failed to set style");
	}
}

/// Reads one inline style property.
pub(crate) fn inline_style(element: &Element, property: &str) -> String {
	style(element)
		.ok()
		.and_then(|style| style.get_property_value(property).ok())
		.unwrap_or_default()
}

/// Adds `class` when `on` is true and removes it otherwise.
pub(crate) fn set_class(element: &Element, class: &str, on: bool) {
	if let Err(err) = element.class_list().toggle_with_force(class, on) {
		tracing::warn!(class, error = %WebError::from(err), "failed to toggle class");
	}
}

/// Creates an element with a class attribute.
pub(crate) fn create(document: &Document, tag: &str, class: &str) -> Result<Element> {
	let element = document.create_element(tag)?;
	if !class.is_empty() {
		element.set_class_name(class);
	}
	Ok(element)
}

/// Creates an element holding plain text.
pub(crate) fn create_text(document: &Document, tag: &str, class: &str, content: &str) -> Result<Element> {
	let element = create(document, tag, class)?;
	element.set_text_content(Some(content));
	Ok(element)
}

/// Font Awesome icon element.
pub(crate) fn icon(document: &Document, classes: &str) -> Result<Element> {
	create(document, "i", classes)
}

/// Registers `handler` for `event` for the lifetime of the page.
pub(crate) fn listen(target: &EventTarget, event: &str, handler: impl FnMut(Event) + 'static) {
	let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
	if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
		tracing::warn!(event, error = %WebError::from(err), "failed to add listener");
	}
	closure.forget();
}

/// Element the event was dispatched to.
pub(crate) fn event_element(event: &Event) -> Option<Element> {
	event.target()?.dyn_into::<Element>().ok()
}

/// Nearest ancestor of the event target (or the target itself) matching `selector`.
pub(crate) fn closest(event: &Event, selector: &str) -> Option<Element> {
	event_element(event)?.closest(selector).ok().flatten()
}

/// Current value of an input, select or textarea.
pub(crate) fn control_value(element: &Element) -> String {
	if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
		input.value()
	} else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
		select.value()
	} else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
		area.value()
	} else {
		String::new()
	}
}

pub(crate) fn set_control_value(element: &Element, value: &str) {
	if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
		input.set_value(value);
	} else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
		select.set_value(value);
	} else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
		area.set_value(value);
	}
}

/// Label of the chosen option of a select.
pub(crate) fn selected_option_text(element: &Element) -> String {
	let Some(select) = element.dyn_ref::<HtmlSelectElement>() else {
		return String::new();
	};
	u32::try_from(select.selected_index())
		.ok()
		.and_then(|index| select.item(index))
		.map(|option| text(&option).trim().to_string())
		.unwrap_or_default()
}

pub(crate) fn set_checked(element: &Element, checked: bool) {
	if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
		input.set_checked(checked);
	}
}

pub(crate) fn is_checked(element: &Element) -> bool {
	element
		.dyn_ref::<HtmlInputElement>()
		.is_some_and(HtmlInputElement::checked)
}
