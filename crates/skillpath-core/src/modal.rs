//! Modal dialogs
//!
//! Modals are server-rendered and registered by their element id. Opening
//! shows a modal immediately; closing plays the reverse entrance animation
//! and hides it once the animation is over. Escape closes every open modal,
//! not just the topmost one.

use std::fmt;
use std::time::Duration;

use crate::config::Timings;
use crate::patch::Patch;
use crate::schedule::{Scheduler, TimerId};

/// Element id of a modal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModalId(String);

impl ModalId {
	/// Wraps an element id.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// The element id.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ModalId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for ModalId {
	fn from(id: &str) -> Self {
		Self::new(id)
	}
}

/// Visibility of a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
	/// Not displayed.
	Hidden,
	/// Displayed.
	Open,
	/// Playing the close animation.
	Closing,
}

/// Timers owned by a [`ModalSet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalTimer {
	/// The close animation finished.
	Hide(ModalId),
}

#[derive(Debug)]
struct ModalEntry {
	id: ModalId,
	phase: ModalPhase,
	hide: Option<TimerId>,
}

/// The modals present on a page.
#[derive(Debug)]
pub struct ModalSet {
	modals: Vec<ModalEntry>,
	close_delay: Duration,
}

impl ModalSet {
	/// Creates an empty set using the modal timings.
	pub fn new(timings: &Timings) -> Self {
		Self {
			modals: Vec::new(),
			close_delay: timings.modal_close,
		}
	}

	/// Registers a server-rendered modal. Registering twice is a no-op.
	pub fn register(&mut self, id: impl Into<ModalId>, phase: ModalPhase) {
		let id = id.into();
		if self.modals.iter().any(|m| m.id == id) {
			return;
		}
		self.modals.push(ModalEntry {
			id,
			phase,
			hide: None,
		});
	}

	/// Current phase of a modal, if it is registered.
	pub fn phase(&self, id: &ModalId) -> Option<ModalPhase> {
		self.modals.iter().find(|m| &m.id == id).map(|m| m.phase)
	}

	/// Ids of the modals that are currently open.
	pub fn open_ids(&self) -> impl Iterator<Item = &ModalId> {
		self.modals
			.iter()
			.filter(|m| m.phase == ModalPhase::Open)
			.map(|m| &m.id)
	}

	/// Shows a modal. Reopening a closing modal cancels its pending hide.
	///
	/// Unknown ids are ignored and return false.
	pub fn open<E>(&mut self, scheduler: &mut Scheduler<E>, id: &ModalId, out: &mut Vec<Patch>) -> bool {
		let Some(modal) = self.modals.iter_mut().find(|m| &m.id == id) else {
			return false;
		};
		if let Some(timer) = modal.hide.take() {
			scheduler.cancel(timer);
		}
		modal.phase = ModalPhase::Open;
		out.push(Patch::ModalOpened(id.clone()));
		true
	}

	/// Starts closing an open modal.
	///
	/// Returns false if the modal is unknown or not open.
	pub fn close<E>(&mut self, scheduler: &mut Scheduler<E>, id: &ModalId, out: &mut Vec<Patch>) -> bool
	where
		E: From<ModalTimer>,
	{
		let delay = self.close_delay;
		let Some(modal) = self.modals.iter_mut().find(|m| &m.id == id) else {
			return false;
		};
		if modal.phase != ModalPhase::Open {
			return false;
		}
		modal.phase = ModalPhase::Closing;
		modal.hide = Some(scheduler.after(delay, ModalTimer::Hide(id.clone()).into()));
		out.push(Patch::ModalClosing(id.clone()));
		true
	}

	/// Closes every open modal and returns how many started closing.
	pub fn close_all<E>(&mut self, scheduler: &mut Scheduler<E>, out: &mut Vec<Patch>) -> usize
	where
		E: From<ModalTimer>,
	{
		let open: Vec<ModalId> = self.open_ids().cloned().collect();
		open.iter()
			.filter(|id| self.close(scheduler, id, out))
			.count()
	}

	/// Applies a fired modal timer.
	pub fn on_timer(&mut self, timer: ModalTimer, out: &mut Vec<Patch>) {
		let ModalTimer::Hide(id) = timer;
		if let Some(modal) = self.modals.iter_mut().find(|m| m.id == id)
			&& modal.phase == ModalPhase::Closing
		{
			modal.phase = ModalPhase::Hidden;
			modal.hide = None;
			out.push(Patch::ModalHidden(id));
		}
	}
}
