//! Browser bindings for the Skill Path site and admin panel
//!
//! This crate wires the headless controllers of `skillpath-core` to a live
//! document with plain `web-sys`:
//!
//! - the page declares which controller it wants with
//!   `<body data-skillpath-app="admin">` (anything else mounts the public
//!   site controller)
//! - timings can be overridden with a JSON
//!   `<script type="application/json" id="skillpath-config">` element
//! - every DOM event is forwarded to the controller, and the patches it
//!   queues are applied to the document
//!
//! Everything but the error type only builds for `wasm32`.

mod error;

pub use error::{Result, WebError};

#[cfg(target_arch = "wasm32")]
mod admin;
#[cfg(target_arch = "wasm32")]
mod clock;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod driver;
#[cfg(target_arch = "wasm32")]
mod entry;
#[cfg(target_arch = "wasm32")]
mod render;
#[cfg(target_arch = "wasm32")]
mod site;

#[cfg(target_arch = "wasm32")]
pub use entry::{close_modal, open_modal, toast, update_step_progress};
