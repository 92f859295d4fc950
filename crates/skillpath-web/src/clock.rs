//! Page timeline backed by `performance.now()`

use skillpath_core::{Clock, Timestamp};
use web_sys::{Performance, Window};

/// Milliseconds since navigation start, falling back to the wall clock when
/// the Performance API is unavailable.
#[derive(Debug, Clone)]
pub(crate) struct PerformanceClock {
	performance: Option<Performance>,
}

impl PerformanceClock {
	pub(crate) fn new(window: &Window) -> Self {
		Self {
			performance: window.performance(),
		}
	}
}

impl Clock for PerformanceClock {
	fn now(&self) -> Timestamp {
		let millis = self
			.performance
			.as_ref()
			.map_or_else(js_sys::Date::now, Performance::now);
		// Float-to-int casts saturate; negative readings clamp to zero.
		Timestamp::from_millis(millis as u64)
	}
}
