//! Toast notifications
//!
//! A toast goes through three phases: it is inserted off-screen
//! ([`ToastPhase::Entering`]), slides in shortly after ([`ToastPhase::Shown`])
//! and plays an exit animation ([`ToastPhase::Leaving`]) before its node is
//! removed. Leaving is triggered either by the auto-dismiss timer or by the
//! close button; the manual path cancels the pending auto-dismiss so a toast
//! is only ever removed once.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Timings;
use crate::error::CoreError;
use crate::patch::Patch;
use crate::schedule::{Scheduler, TimerId};

/// Visual flavour of a toast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
	/// Completed action.
	Success,
	/// Failed action or blocked submission.
	Error,
	/// Something the user should double-check.
	Warning,
	/// Neutral notice.
	#[default]
	Info,
}

impl ToastKind {
	/// CSS modifier used in the `toast-<kind>` class.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Success => "success",
			Self::Error => "error",
			Self::Warning => "warning",
			Self::Info => "info",
		}
	}

	/// Font Awesome icon name shown next to the message.
	pub fn icon(self) -> &'static str {
		match self {
			Self::Success => "check-circle",
			Self::Error => "exclamation-circle",
			Self::Warning => "exclamation-triangle",
			Self::Info => "info-circle",
		}
	}
}

impl fmt::Display for ToastKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ToastKind {
	type Err = CoreError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"success" => Ok(Self::Success),
			"error" => Ok(Self::Error),
			"warning" => Ok(Self::Warning),
			"info" => Ok(Self::Info),
			other => Err(CoreError::UnknownToastKind(other.to_string())),
		}
	}
}

/// Identifier of a toast within its stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToastId(u64);

impl ToastId {
	/// Raw numeric value, used as a DOM data attribute.
	pub fn get(self) -> u64 {
		self.0
	}
}

/// Lifecycle phase of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
	/// Inserted, waiting to slide in.
	Entering,
	/// Fully visible.
	Shown,
	/// Playing the exit animation.
	Leaving,
}

/// Timers owned by a [`ToastStack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastTimer {
	/// Slide the toast in.
	Enter(ToastId),
	/// The toast outlived its lifetime.
	AutoDismiss(ToastId),
	/// The exit animation finished.
	Remove(ToastId),
}

/// A toast currently in the document.
#[derive(Debug, Clone)]
pub struct Toast {
	id: ToastId,
	kind: ToastKind,
	message: String,
	phase: ToastPhase,
	auto_dismiss: Option<TimerId>,
}

impl Toast {
	/// Identifier of this toast.
	pub fn id(&self) -> ToastId {
		self.id
	}

	/// Visual flavour.
	pub fn kind(&self) -> ToastKind {
		self.kind
	}

	/// Message text.
	pub fn message(&self) -> &str {
		&self.message
	}

	/// Current lifecycle phase.
	pub fn phase(&self) -> ToastPhase {
		self.phase
	}
}

/// The toasts of one container, oldest first.
#[derive(Debug)]
pub struct ToastStack {
	toasts: Vec<Toast>,
	next_id: u64,
	enter_delay: Duration,
	lifetime: Duration,
	exit: Duration,
}

impl ToastStack {
	/// Creates an empty stack using the toast timings.
	pub fn new(timings: &Timings) -> Self {
		Self {
			toasts: Vec::new(),
			next_id: 0,
			enter_delay: timings.toast_enter,
			lifetime: timings.toast_lifetime,
			exit: timings.toast_exit,
		}
	}

	/// Inserts a toast and arms its enter and auto-dismiss timers.
	pub fn push<E>(
		&mut self,
		scheduler: &mut Scheduler<E>,
		kind: ToastKind,
		message: impl Into<String>,
		out: &mut Vec<Patch>,
	) -> ToastId
	where
		E: From<ToastTimer>,
	{
		let id = ToastId(self.next_id);
		self.next_id += 1;
		let message = message.into();
		tracing::debug!(toast = id.0, kind = %kind, "toast inserted");

		scheduler.after(self.enter_delay, ToastTimer::Enter(id).into());
		let auto_dismiss = scheduler.after(self.lifetime, ToastTimer::AutoDismiss(id).into());
		out.push(Patch::ToastInserted {
			id,
			kind,
			message: message.clone(),
		});
		self.toasts.push(Toast {
			id,
			kind,
			message,
			phase: ToastPhase::Entering,
			auto_dismiss: Some(auto_dismiss),
		});
		id
	}

	/// Starts the exit of a toast from its close button.
	///
	/// Returns false if the toast is gone or already leaving.
	pub fn dismiss<E>(&mut self, scheduler: &mut Scheduler<E>, id: ToastId, out: &mut Vec<Patch>) -> bool
	where
		E: From<ToastTimer>,
	{
		let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id) else {
			return false;
		};
		if let Some(timer) = toast.auto_dismiss.take() {
			scheduler.cancel(timer);
		}
		Self::begin_leave(toast, scheduler, self.exit, out)
	}

	/// Applies a fired toast timer.
	pub fn on_timer<E>(&mut self, scheduler: &mut Scheduler<E>, timer: ToastTimer, out: &mut Vec<Patch>)
	where
		E: From<ToastTimer>,
	{
		match timer {
			ToastTimer::Enter(id) => {
				if let Some(toast) = self.get_mut(id)
					&& toast.phase == ToastPhase::Entering
				{
					toast.phase = ToastPhase::Shown;
					out.push(Patch::ToastEntered(id));
				}
			}
			ToastTimer::AutoDismiss(id) => {
				let exit = self.exit;
				if let Some(toast) = self.get_mut(id) {
					toast.auto_dismiss = None;
					Self::begin_leave(toast, scheduler, exit, out);
				}
			}
			ToastTimer::Remove(id) => {
				if let Some(index) = self.toasts.iter().position(|t| t.id == id) {
					self.toasts.remove(index);
					tracing::debug!(toast = id.0, "toast removed");
					out.push(Patch::ToastRemoved(id));
				}
			}
		}
	}

	/// Returns the toast with the given id, if still present.
	pub fn get(&self, id: ToastId) -> Option<&Toast> {
		self.toasts.iter().find(|t| t.id == id)
	}

	/// Toasts in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &Toast> {
		self.toasts.iter()
	}

	/// Number of toasts in the document.
	pub fn len(&self) -> usize {
		self.toasts.len()
	}

	/// Returns true if no toast is in the document.
	pub fn is_empty(&self) -> bool {
		self.toasts.is_empty()
	}

	fn get_mut(&mut self, id: ToastId) -> Option<&mut Toast> {
		self.toasts.iter_mut().find(|t| t.id == id)
	}

	fn begin_leave<E>(
		toast: &mut Toast,
		scheduler: &mut Scheduler<E>,
		exit: Duration,
		out: &mut Vec<Patch>,
	) -> bool
	where
		E: From<ToastTimer>,
	{
		if toast.phase == ToastPhase::Leaving {
			return false;
		}
		toast.phase = ToastPhase::Leaving;
		scheduler.after(exit, ToastTimer::Remove(toast.id).into());
		out.push(Patch::ToastLeaving(toast.id));
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schedule::Timestamp;
	use rstest::{fixture, rstest};

	struct Harness {
		stack: ToastStack,
		scheduler: Scheduler<ToastTimer>,
		out: Vec<Patch>,
	}

	impl Harness {
		fn advance(&mut self, millis: u64) {
			let until = self.scheduler.now() + Duration::from_millis(millis);
			while let Some(timer) = self.scheduler.pop_due(until) {
				self.stack.on_timer(&mut self.scheduler, timer, &mut self.out);
			}
			self.scheduler.settle(until);
		}

		fn removals(&self) -> usize {
			self.out
				.iter()
				.filter(|p| matches!(p, Patch::ToastRemoved(_)))
				.count()
		}
	}

	#[fixture]
	fn harness() -> Harness {
		Harness {
			stack: ToastStack::new(&Timings::default()),
			scheduler: Scheduler::new(),
			out: Vec::new(),
		}
	}

	#[rstest]
	fn test_toast_lifecycle(mut harness: Harness) {
		let id = harness.stack.push(
			&mut harness.scheduler,
			ToastKind::Success,
			"Saved",
			&mut harness.out,
		);
		assert_eq!(harness.stack.get(id).unwrap().phase(), ToastPhase::Entering);

		harness.advance(10);
		assert_eq!(harness.stack.get(id).unwrap().phase(), ToastPhase::Shown);

		harness.advance(4990);
		assert_eq!(harness.stack.get(id).unwrap().phase(), ToastPhase::Leaving);

		harness.advance(300);
		assert!(harness.stack.get(id).is_none());
		assert_eq!(
			harness.out,
			vec![
				Patch::ToastInserted {
					id,
					kind: ToastKind::Success,
					message: "Saved".to_string(),
				},
				Patch::ToastEntered(id),
				Patch::ToastLeaving(id),
				Patch::ToastRemoved(id),
			]
		);
	}

	#[rstest]
	fn test_manual_dismiss_cancels_auto_dismiss(mut harness: Harness) {
		let id = harness
			.stack
			.push(&mut harness.scheduler, ToastKind::Info, "Hi", &mut harness.out);
		harness.advance(1000);

		assert!(harness.stack.dismiss(&mut harness.scheduler, id, &mut harness.out));
		harness.advance(300);
		assert!(harness.stack.is_empty());

		// Past the first five second deadline nothing else happens.
		harness.advance(10_000);
		assert_eq!(harness.removals(), 1);
		assert!(harness.scheduler.is_empty());
	}

	#[rstest]
	fn test_double_dismiss_is_ignored(mut harness: Harness) {
		let id = harness
			.stack
			.push(&mut harness.scheduler, ToastKind::Error, "Oops", &mut harness.out);
		assert!(harness.stack.dismiss(&mut harness.scheduler, id, &mut harness.out));
		assert!(!harness.stack.dismiss(&mut harness.scheduler, id, &mut harness.out));

		harness.advance(10_000);
		assert_eq!(harness.removals(), 1);
		assert!(!harness.stack.dismiss(&mut harness.scheduler, id, &mut harness.out));
	}

	#[rstest]
	fn test_dismiss_during_enter_skips_enter_patch(mut harness: Harness) {
		let id = harness
			.stack
			.push(&mut harness.scheduler, ToastKind::Info, "Fast", &mut harness.out);
		harness.stack.dismiss(&mut harness.scheduler, id, &mut harness.out);
		harness.advance(10);
		assert!(!harness.out.contains(&Patch::ToastEntered(id)));
	}

	#[rstest]
	fn test_toasts_stack_independently(mut harness: Harness) {
		let first = harness
			.stack
			.push(&mut harness.scheduler, ToastKind::Info, "one", &mut harness.out);
		harness.advance(2000);
		let second = harness
			.stack
			.push(&mut harness.scheduler, ToastKind::Info, "two", &mut harness.out);
		assert_eq!(harness.stack.len(), 2);

		harness.advance(3300);
		assert!(harness.stack.get(first).is_none());
		assert!(harness.stack.get(second).is_some());
		assert_eq!(harness.scheduler.now(), Timestamp::from_millis(5300));
	}

	#[rstest]
	#[case(ToastKind::Success, "check-circle")]
	#[case(ToastKind::Error, "exclamation-circle")]
	#[case(ToastKind::Warning, "exclamation-triangle")]
	#[case(ToastKind::Info, "info-circle")]
	fn test_icons(#[case] kind: ToastKind, #[case] icon: &str) {
		assert_eq!(kind.icon(), icon);
		assert_eq!(kind.as_str().parse::<ToastKind>().unwrap(), kind);
	}

	#[rstest]
	fn test_unknown_kind() {
		assert!(matches!(
			"shout".parse::<ToastKind>(),
			Err(CoreError::UnknownToastKind(kind)) if kind == "shout"
		));
	}
}
