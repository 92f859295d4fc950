//! # Skill Path
//!
//! Interactive behaviour of the Skill Path learning site and its admin panel.
//!
//! The behaviour lives in [`skillpath_core`] as headless controllers that
//! queue DOM patches; the optional `web` feature adds the `wasm32` bindings
//! that apply those patches to a live document.
//!
//! ## Feature Flags
//!
//! - `web` - browser bindings (`skillpath-web`), compiled for `wasm32` only
//!
//! ## Quick Example
//!
//! ```rust
//! use std::rc::Rc;
//! use std::time::Duration;
//!
//! use skillpath::prelude::*;
//!
//! let clock = Rc::new(ManualClock::new());
//! let mut app = SiteApp::new(UiConfig::default(), clock.clone());
//! app.mount(SitePage::default());
//!
//! let toast = app.toast(ToastKind::Success, "Saved");
//! clock.advance(Duration::from_millis(10));
//! app.tick();
//! assert!(app.take_patches().contains(&Patch::ToastEntered(toast)));
//! ```

pub use skillpath_core::*;

#[cfg(feature = "web")]
pub use skillpath_web as web;

/// Commonly used types
pub mod prelude {
	pub use skillpath_core::{
		AdminApp, AdminPage, Clock, FilterState, FormField, ManualClock, ModalId, Patch,
		ResourceBackend, ResourceDraft, RowRef, RowSnapshot, SimulatedBackend, SiteApp, SitePage,
		StepStatus, TableSetup, Timestamp, ToastId, ToastKind, UiConfig,
	};
}
