//! Timed visual states
//!
//! Every deferred UI change (toast auto-dismiss, staggered row reveals,
//! simulated latency, the periodic live-stats refresh) is a timer in a
//! [`Scheduler`]. The scheduler never reads a clock itself: the owner pumps
//! it with [`Scheduler::pop_due`] using a timestamp from a [`Clock`], so tests
//! drive it deterministically with a [`ManualClock`].
//!
//! Timers fire in due order; timers due at the same instant fire in the order
//! they were scheduled. While a timer is being handled, [`Scheduler::now`]
//! reports its due time, so follow-up timers are scheduled relative to when
//! the first one was meant to fire rather than when the pump happened to run.

use std::cell::Cell;
use std::collections::{BTreeMap, HashMap};
use std::ops::Add;
use std::rc::Rc;
use std::time::Duration;

/// A point on the page timeline, in whole milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(u64);

impl Timestamp {
	/// Start of the timeline.
	pub const ZERO: Self = Self(0);

	/// Creates a timestamp from milliseconds since the timeline origin.
	pub const fn from_millis(millis: u64) -> Self {
		Self(millis)
	}

	/// Milliseconds since the timeline origin.
	pub const fn as_millis(self) -> u64 {
		self.0
	}

	/// Time elapsed since `earlier`, or zero if `earlier` is in the future.
	pub fn saturating_since(self, earlier: Timestamp) -> Duration {
		Duration::from_millis(self.0.saturating_sub(earlier.0))
	}
}

impl Add<Duration> for Timestamp {
	type Output = Timestamp;

	fn add(self, rhs: Duration) -> Self::Output {
		let millis = u64::try_from(rhs.as_millis()).unwrap_or(u64::MAX);
		Timestamp(self.0.saturating_add(millis))
	}
}

/// Source of the current time.
pub trait Clock {
	/// Returns the current position on the page timeline.
	fn now(&self) -> Timestamp;
}

impl<C: Clock + ?Sized> Clock for &C {
	fn now(&self) -> Timestamp {
		(**self).now()
	}
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
	fn now(&self) -> Timestamp {
		(**self).now()
	}
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
	now: Cell<Timestamp>,
}

impl ManualClock {
	/// Creates a clock stopped at [`Timestamp::ZERO`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Moves the clock forward and returns the new time.
	pub fn advance(&self, by: Duration) -> Timestamp {
		let next = self.now.get() + by;
		self.now.set(next);
		next
	}

	/// Jumps to an absolute time.
	pub fn set(&self, at: Timestamp) {
		self.now.set(at);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> Timestamp {
		self.now.get()
	}
}

/// Handle used to cancel a pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<E> {
	timer: E,
	every: Option<Duration>,
}

/// Queue of timers carrying values of type `E`.
#[derive(Debug)]
pub struct Scheduler<E> {
	now: Timestamp,
	next_id: u64,
	queue: BTreeMap<(Timestamp, TimerId), Entry<E>>,
	due: HashMap<TimerId, Timestamp>,
}

impl<E> Default for Scheduler<E> {
	fn default() -> Self {
		Self {
			now: Timestamp::ZERO,
			next_id: 0,
			queue: BTreeMap::new(),
			due: HashMap::new(),
		}
	}
}

impl<E> Scheduler<E> {
	/// Creates an empty scheduler positioned at [`Timestamp::ZERO`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty scheduler positioned at `now`.
	pub fn starting_at(now: Timestamp) -> Self {
		Self {
			now,
			..Self::default()
		}
	}

	/// Current position of the scheduler on the timeline.
	pub fn now(&self) -> Timestamp {
		self.now
	}

	/// Schedules `timer` to fire once after `delay`.
	pub fn after(&mut self, delay: Duration, timer: E) -> TimerId {
		self.insert(self.now + delay, timer, None)
	}

	/// Schedules `timer` to fire every `period`, first after one period.
	///
	/// A zero period is treated as one millisecond so the timer cannot fire
	/// forever within a single pump.
	pub fn every(&mut self, period: Duration, timer: E) -> TimerId {
		let period = period.max(Duration::from_millis(1));
		self.insert(self.now + period, timer, Some(period))
	}

	/// Cancels a pending timer. Returns false if it already fired or was cancelled.
	pub fn cancel(&mut self, id: TimerId) -> bool {
		match self.due.remove(&id) {
			Some(at) => self.queue.remove(&(at, id)).is_some(),
			None => false,
		}
	}

	/// Returns true if the timer is still waiting to fire.
	pub fn is_pending(&self, id: TimerId) -> bool {
		self.due.contains_key(&id)
	}

	/// Number of pending timers.
	pub fn len(&self) -> usize {
		self.queue.len()
	}

	/// Returns true if no timer is pending.
	pub fn is_empty(&self) -> bool {
		self.queue.is_empty()
	}

	/// Due time of the earliest pending timer.
	pub fn next_deadline(&self) -> Option<Timestamp> {
		self.queue.keys().next().map(|(at, _)| *at)
	}

	/// Moves the scheduler to `now` without firing anything.
	///
	/// Call this after draining [`Scheduler::pop_due`] so that timers
	/// scheduled by later events are relative to the latest tick.
	pub fn settle(&mut self, now: Timestamp) {
		self.now = self.now.max(now);
	}

	fn insert(&mut self, at: Timestamp, timer: E, every: Option<Duration>) -> TimerId {
		let id = TimerId(self.next_id);
		self.next_id += 1;
		self.queue.insert((at, id), Entry { timer, every });
		self.due.insert(id, at);
		id
	}
}

impl<E: Clone> Scheduler<E> {
	/// Removes and returns the earliest timer due at or before `until`.
	///
	/// Repeating timers are re-armed for their next period before being
	/// returned.
	pub fn pop_due(&mut self, until: Timestamp) -> Option<E> {
		let (&(at, id), _) = self.queue.first_key_value()?;
		if at > until {
			return None;
		}
		let entry = self.queue.remove(&(at, id))?;
		self.due.remove(&id);
		self.now = self.now.max(at);

		if let Some(period) = entry.every {
			let next = at + period;
			self.queue.insert(
				(next, id),
				Entry {
					timer: entry.timer.clone(),
					every: Some(period),
				},
			);
			self.due.insert(id, next);
		}
		Some(entry.timer)
	}

	/// Fires every timer due at or before `now` and moves the scheduler there.
	pub fn advance_to(&mut self, now: Timestamp) -> Vec<E> {
		let mut fired = Vec::new();
		while let Some(timer) = self.pop_due(now) {
			fired.push(timer);
		}
		self.settle(now);
		fired
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn ms(millis: u64) -> Duration {
		Duration::from_millis(millis)
	}

	#[rstest]
	fn test_fires_in_due_order() {
		let mut scheduler = Scheduler::new();
		scheduler.after(ms(300), "c");
		scheduler.after(ms(100), "a");
		scheduler.after(ms(200), "b");

		assert_eq!(scheduler.advance_to(Timestamp::from_millis(250)), vec!["a", "b"]);
		assert_eq!(scheduler.advance_to(Timestamp::from_millis(300)), vec!["c"]);
		assert!(scheduler.is_empty());
	}

	#[rstest]
	fn test_same_deadline_keeps_insertion_order() {
		let mut scheduler = Scheduler::new();
		for label in ["first", "second", "third"] {
			scheduler.after(ms(50), label);
		}
		assert_eq!(
			scheduler.advance_to(Timestamp::from_millis(50)),
			vec!["first", "second", "third"]
		);
	}

	#[rstest]
	fn test_cancel_prevents_firing() {
		let mut scheduler = Scheduler::new();
		let id = scheduler.after(ms(10), 1);
		scheduler.after(ms(20), 2);

		assert!(scheduler.cancel(id));
		assert!(!scheduler.cancel(id));
		assert!(!scheduler.is_pending(id));
		assert_eq!(scheduler.advance_to(Timestamp::from_millis(100)), vec![2]);
	}

	#[rstest]
	fn test_cancel_after_fire_returns_false() {
		let mut scheduler = Scheduler::new();
		let id = scheduler.after(ms(10), ());
		scheduler.advance_to(Timestamp::from_millis(10));
		assert!(!scheduler.cancel(id));
	}

	#[rstest]
	fn test_now_tracks_due_time_while_draining() {
		let mut scheduler = Scheduler::new();
		scheduler.after(ms(100), "first");

		assert_eq!(scheduler.pop_due(Timestamp::from_millis(1000)), Some("first"));
		assert_eq!(scheduler.now(), Timestamp::from_millis(100));

		// A follow-up scheduled while handling lands relative to the due time.
		scheduler.after(ms(50), "follow-up");
		assert_eq!(scheduler.pop_due(Timestamp::from_millis(1000)), Some("follow-up"));
		assert_eq!(scheduler.now(), Timestamp::from_millis(150));

		scheduler.settle(Timestamp::from_millis(1000));
		assert_eq!(scheduler.now(), Timestamp::from_millis(1000));
	}

	#[rstest]
	fn test_repeating_timer_rearms() {
		let mut scheduler = Scheduler::new();
		let id = scheduler.every(ms(30), "tick");

		assert!(scheduler.advance_to(Timestamp::from_millis(29)).is_empty());
		assert_eq!(scheduler.advance_to(Timestamp::from_millis(95)), vec!["tick"; 3]);
		assert_eq!(scheduler.next_deadline(), Some(Timestamp::from_millis(120)));
		assert!(scheduler.is_pending(id));

		assert!(scheduler.cancel(id));
		assert!(scheduler.advance_to(Timestamp::from_millis(500)).is_empty());
	}

	#[rstest]
	fn test_manual_clock_drives_scheduler() {
		let clock = ManualClock::new();
		let mut scheduler = Scheduler::starting_at(clock.now());
		scheduler.after(ms(5000), "dismiss");

		clock.advance(ms(4999));
		assert!(scheduler.advance_to(clock.now()).is_empty());
		clock.advance(ms(1));
		assert_eq!(scheduler.advance_to(clock.now()), vec!["dismiss"]);
	}

	#[rstest]
	fn test_timestamp_arithmetic() {
		let start = Timestamp::from_millis(1_000);
		let later = start + ms(250);
		assert_eq!(later.as_millis(), 1_250);
		assert_eq!(later.saturating_since(start), ms(250));
		assert_eq!(start.saturating_since(later), Duration::ZERO);
	}
}
