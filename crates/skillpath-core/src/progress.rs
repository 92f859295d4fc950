//! Progress rings, step status and animated counters

use std::f64::consts::PI;
use std::time::Duration;

use rand::Rng;

use crate::number::{format_grouped, format_number, parse_float, parse_int};
use crate::schedule::Timestamp;

/// Geometry of an SVG progress ring.
///
/// The ring is drawn with a dash as long as its circumference; the visible
/// arc is controlled by the dash offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
	circumference: f64,
}

impl RingGeometry {
	/// Geometry of a circle with radius `radius`.
	pub fn from_radius(radius: f64) -> Self {
		Self {
			circumference: radius * 2.0 * PI,
		}
	}

	/// Circumference of the ring.
	pub fn circumference(&self) -> f64 {
		self.circumference
	}

	/// `stroke-dasharray` value.
	pub fn dash_array(&self) -> String {
		let c = format_number(self.circumference);
		format!("{c} {c}")
	}

	/// `stroke-dashoffset` for a fill percentage. NaN counts as 0%.
	pub fn offset_for(&self, percent: f64) -> f64 {
		let percent = if percent.is_nan() { 0.0 } else { percent };
		self.circumference - percent / 100.0 * self.circumference
	}
}

/// How the label next to a ring is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingLabel {
	/// Integer prefix, as on the public site (`"75%"`).
	Integer,
	/// Decimal prefix, as in the admin panel (`"62.5%"`).
	Decimal,
}

impl RingLabel {
	/// Percentage shown by a label; missing or unparsable labels read 0.
	pub fn percent(self, label: Option<&str>) -> f64 {
		let Some(label) = label else {
			return 0.0;
		};
		let value = match self {
			Self::Integer => parse_int(label).map(|v| v as f64).unwrap_or(f64::NAN),
			Self::Decimal => parse_float(label),
		};
		if value.is_nan() { 0.0 } else { value }
	}
}

/// A progress ring found on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct RingSetup {
	/// Radius of the circle (`r` attribute).
	pub radius: f64,
	/// Text of the accompanying percentage label, if any.
	pub label: Option<String>,
}

impl RingSetup {
	/// Creates a ring description.
	pub fn new(radius: f64, label: Option<&str>) -> Self {
		Self {
			radius,
			label: label.map(str::to_string),
		}
	}
}

/// Completion status of a learning path step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
	/// `done`
	Completed,
	/// `in_progress`
	InProgress,
	/// anything else
	Todo,
}

impl StepStatus {
	/// Maps a stored progress value to a status.
	pub fn from_progress(status: &str) -> Self {
		match status {
			"done" => Self::Completed,
			"in_progress" => Self::InProgress,
			_ => Self::Todo,
		}
	}

	/// CSS class applied to the step element.
	pub fn class(self) -> &'static str {
		match self {
			Self::Completed => "completed",
			Self::InProgress => "in-progress",
			Self::Todo => "todo",
		}
	}

	/// Every status class, for removal before the new one is applied.
	pub const CLASSES: [&'static str; 3] = ["completed", "in-progress", "todo"];
}

/// Animates a counter from one value to another.
///
/// Progress is the elapsed fraction of the duration, clamped to 1, and the
/// displayed value is floored, so the text never runs past the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterTween {
	from: i64,
	to: i64,
	started: Timestamp,
	duration: Duration,
}

impl CounterTween {
	/// Starts a tween at `started`.
	pub fn new(from: i64, to: i64, started: Timestamp, duration: Duration) -> Self {
		Self {
			from,
			to,
			started,
			duration,
		}
	}

	/// Target value.
	pub fn target(&self) -> i64 {
		self.to
	}

	/// Elapsed fraction in `[0, 1]`.
	pub fn progress(&self, now: Timestamp) -> f64 {
		if self.duration.is_zero() {
			return 1.0;
		}
		let elapsed = now.saturating_since(self.started).as_secs_f64();
		(elapsed / self.duration.as_secs_f64()).min(1.0)
	}

	/// Value shown at `now`.
	pub fn value_at(&self, now: Timestamp) -> i64 {
		let delta = (self.to - self.from) as f64;
		(self.progress(now) * delta + self.from as f64).floor() as i64
	}

	/// Text shown at `now`, with thousands separators.
	pub fn text_at(&self, now: Timestamp) -> String {
		format_grouped(self.value_at(now))
	}

	/// Returns true once the tween has reached its target.
	pub fn is_finished(&self, now: Timestamp) -> bool {
		self.progress(now) >= 1.0
	}
}

/// Nudges a live counter by a random delta in `[-2, 7]`, never below zero.
pub fn nudge<R: Rng + ?Sized>(current: i64, rng: &mut R) -> i64 {
	current.saturating_add(rng.gen_range(-2..=7)).max(0)
}
