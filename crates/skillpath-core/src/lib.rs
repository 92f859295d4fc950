//! Skillpath Core - headless UI state for the Skill Path site and admin panel
//!
//! Every interactive behaviour of the two front-end entry points is modelled
//! here as plain Rust state. Controllers receive typed events, update their
//! state and queue [`Patch`] values describing the DOM mutations a browser
//! binding must apply. Nothing in this crate touches the DOM, which keeps
//! the behaviour testable on the host with a manual clock.
//!
//! ## Architecture
//!
//! ```mermaid
//! flowchart LR
//!     Events["DOM events<br/>(skillpath-web)"] --> App["SiteApp / AdminApp"]
//!     Clock["Clock::now()"] -->|tick| Scheduler
//!     App --> Scheduler["Scheduler&lt;Timer&gt;"]
//!     Scheduler -->|due timers| App
//!     App -->|take_patches| Patches["Vec&lt;Patch&gt;"]
//!     Patches --> Render["render step<br/>(skillpath-web)"]
//! ```
//!
//! ## Modules
//!
//! - [`table`]: column sorting and row filtering
//! - [`toast`], [`modal`], [`confirm`]: reusable dialog primitives
//! - [`schedule`]: timed visual states with cancellation
//! - [`form`]: required-field validation
//! - [`progress`]: progress rings, step status and animated counters
//! - [`resources`]: simulated resource actions and the assumed backend seam
//! - [`share`], [`motion`]: share links and cosmetic effects
//! - [`site`], [`admin`]: the two controllers

#![warn(missing_docs)]

pub mod admin;
pub mod config;
pub mod confirm;
pub mod error;
pub mod form;
pub mod modal;
pub mod motion;
pub mod number;
pub mod patch;
pub mod progress;
pub mod resources;
pub mod schedule;
pub mod share;
pub mod site;
pub mod table;
pub mod toast;

pub use admin::{AdminAction, AdminApp, AdminPage, AdminTimer, TableSetup};
pub use config::{Timings, UiConfig};
pub use confirm::{ConfirmDialog, ConfirmId, ConfirmStack, Severity};
pub use error::{CoreError, Result};
pub use form::{FormField, FormReport};
pub use modal::{ModalId, ModalPhase, ModalSet};
pub use patch::Patch;
pub use progress::{RingSetup, StepStatus};
pub use resources::{
	BackendError, ResourceBackend, ResourceDraft, ResourcePreview, SimulatedBackend,
};
pub use schedule::{Clock, ManualClock, Scheduler, TimerId, Timestamp};
pub use share::{ShareRequest, ShareStep};
pub use site::{SiteApp, SitePage, SiteTimer};
pub use table::{
	Comparator, FilterOutcome, FilterState, HeaderCell, RowRef, RowSnapshot, SortDirection,
	SortIndicator, SortState, TableSorter,
};
pub use toast::{ToastId, ToastKind, ToastStack};
