//! Event dispatch and the timer pump
//!
//! A [`Driver`] owns one controller and the renderer of its page. Every DOM
//! listener goes through [`Driver::dispatch`], which runs the controller and
//! then applies whatever patches it queued. A 16 ms interval keeps the
//! controller's scheduler moving between events.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Interval;
use skillpath_core::{AdminApp, Clock, Patch, ResourceBackend, SiteApp};

use crate::render::Renderer;

const PUMP_INTERVAL_MS: u32 = 16;

/// The parts of a controller the driver needs.
pub(crate) trait Controller {
	fn tick(&mut self);
	fn take_patches(&mut self) -> Vec<Patch>;
}

impl<C: Clock> Controller for SiteApp<C> {
	fn tick(&mut self) {
		SiteApp::tick(self);
	}

	fn take_patches(&mut self) -> Vec<Patch> {
		SiteApp::take_patches(self)
	}
}

impl<B: ResourceBackend, C: Clock> Controller for AdminApp<B, C> {
	fn tick(&mut self) {
		AdminApp::tick(self);
	}

	fn take_patches(&mut self) -> Vec<Patch> {
		AdminApp::take_patches(self)
	}
}

pub(crate) struct Driver<A> {
	app: Rc<RefCell<A>>,
	renderer: Rc<RefCell<Renderer>>,
}

impl<A> Clone for Driver<A> {
	fn clone(&self) -> Self {
		Self {
			app: Rc::clone(&self.app),
			renderer: Rc::clone(&self.renderer),
		}
	}
}

impl<A: Controller + 'static> Driver<A> {
	pub(crate) fn new(app: A, renderer: Renderer) -> Self {
		Self {
			app: Rc::new(RefCell::new(app)),
			renderer: Rc::new(RefCell::new(renderer)),
		}
	}

	/// Runs one controller event and renders its patches.
	pub(crate) fn dispatch<R>(&self, event: impl FnOnce(&mut A) -> R) -> R {
		let result = event(&mut self.app.borrow_mut());
		self.flush();
		result
	}

	/// Gives an event handler access to the renderer, e.g. to record which
	/// controls a form submission refers to.
	pub(crate) fn with_renderer<R>(&self, f: impl FnOnce(&mut Renderer) -> R) -> R {
		f(&mut self.renderer.borrow_mut())
	}

	pub(crate) fn flush(&self) {
		let patches = self.app.borrow_mut().take_patches();
		if patches.is_empty() {
			return;
		}
		let mut renderer = self.renderer.borrow_mut();
		for patch in patches {
			renderer.apply(patch);
		}
	}

	/// Starts pumping the controller's timers for the lifetime of the page.
	pub(crate) fn start(&self) {
		self.flush();
		let driver = self.clone();
		Interval::new(PUMP_INTERVAL_MS, move || driver.dispatch(A::tick)).forget();
		tracing::debug!(interval_ms = PUMP_INTERVAL_MS, "timer pump started");
	}
}
