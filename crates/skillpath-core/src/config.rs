//! UI configuration
//!
//! All timing constants of the site and admin controllers live in
//! [`Timings`]. The browser layer reads an optional JSON block embedded in
//! the page and falls back to [`UiConfig::default`] for anything missing.
//!
//! ```
//! use skillpath_core::UiConfig;
//!
//! let config = UiConfig::from_json(r#"{ "timings": { "toast_lifetime": 8000 } }"#).unwrap();
//! assert_eq!(config.timings.toast_lifetime.as_millis(), 8000);
//! assert_eq!(config.timings.modal_close.as_millis(), 300);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level configuration shared by both controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
	/// Animation and simulated-latency timings.
	pub timings: Timings,
	/// Column whose sort key is the bolded resource title instead of the raw cell text.
	pub title_column: Option<usize>,
	/// Divisor applied to the cursor offset when tilting glass cards.
	pub tilt_divisor: f64,
	/// Viewport width (px) at or below which the admin sidebar behaves as a drawer.
	pub mobile_breakpoint: u32,
}

impl Default for UiConfig {
	fn default() -> Self {
		Self {
			timings: Timings::default(),
			title_column: Some(1),
			tilt_divisor: 10.0,
			mobile_breakpoint: 768,
		}
	}
}

impl UiConfig {
	/// Parses a configuration block, filling omitted fields with defaults.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// Timing constants, serialized as whole milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
	/// Delay before a freshly inserted toast slides in.
	#[serde(with = "millis")]
	pub toast_enter: Duration,
	/// Time a toast stays up before it dismisses itself.
	#[serde(with = "millis")]
	pub toast_lifetime: Duration,
	/// Length of the toast exit animation.
	#[serde(with = "millis")]
	pub toast_exit: Duration,
	/// Length of the reverse animation played when a modal closes.
	#[serde(with = "millis")]
	pub modal_close: Duration,
	/// Per-row delay when sorted rows are revealed.
	#[serde(with = "millis")]
	pub sort_stagger: Duration,
	/// Per-row delay of the fade-in animation of filtered rows.
	#[serde(with = "millis")]
	pub filter_fade_stagger: Duration,
	/// Time a filtered-out row keeps fading before it leaves the layout.
	#[serde(with = "millis")]
	pub filter_collapse: Duration,
	/// Time a server-rendered flash message stays up.
	#[serde(with = "millis")]
	pub flash_lifetime: Duration,
	/// Length of the flash message exit animation.
	#[serde(with = "millis")]
	pub flash_exit: Duration,
	/// Delay before the public-site progress rings fill.
	#[serde(with = "millis")]
	pub site_ring_delay: Duration,
	/// Delay before the admin progress rings fill.
	#[serde(with = "millis")]
	pub admin_ring_delay: Duration,
	/// Delay before completion bars grow back to their width.
	#[serde(with = "millis")]
	pub completion_bar_delay: Duration,
	/// Per-card delay of the stat-card entrance.
	#[serde(with = "millis")]
	pub stat_card_stagger: Duration,
	/// Per-checkbox delay when the select-all box is toggled.
	#[serde(with = "millis")]
	pub select_all_stagger: Duration,
	/// Simulated latency of the resource preview.
	#[serde(with = "millis")]
	pub preview_latency: Duration,
	/// Simulated latency of the analytics export.
	#[serde(with = "millis")]
	pub export_latency: Duration,
	/// Period of the simulated live-stats refresh.
	#[serde(with = "millis")]
	pub live_refresh: Duration,
	/// Length of a counter animation.
	#[serde(with = "millis")]
	pub counter_animation: Duration,
}

impl Default for Timings {
	fn default() -> Self {
		Self {
			toast_enter: Duration::from_millis(10),
			toast_lifetime: Duration::from_millis(5000),
			toast_exit: Duration::from_millis(300),
			modal_close: Duration::from_millis(300),
			sort_stagger: Duration::from_millis(50),
			filter_fade_stagger: Duration::from_millis(100),
			filter_collapse: Duration::from_millis(300),
			flash_lifetime: Duration::from_millis(5000),
			flash_exit: Duration::from_millis(300),
			site_ring_delay: Duration::from_millis(100),
			admin_ring_delay: Duration::from_millis(500),
			completion_bar_delay: Duration::from_millis(800),
			stat_card_stagger: Duration::from_millis(100),
			select_all_stagger: Duration::from_millis(50),
			preview_latency: Duration::from_millis(1500),
			export_latency: Duration::from_millis(2000),
			live_refresh: Duration::from_millis(30_000),
			counter_animation: Duration::from_millis(1000),
		}
	}
}

mod millis {
	use std::time::Duration;

	use serde::{Deserialize, Deserializer, Serializer};

	pub(super) fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
	}

	pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
		u64::deserialize(deserializer).map(Duration::from_millis)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults_match_page_timings() {
		let config = UiConfig::default();
		assert_eq!(config.timings.toast_lifetime, Duration::from_secs(5));
		assert_eq!(config.timings.live_refresh, Duration::from_secs(30));
		assert_eq!(config.timings.counter_animation, Duration::from_secs(1));
		assert_eq!(config.title_column, Some(1));
		assert_eq!(config.mobile_breakpoint, 768);
	}

	#[rstest]
	fn test_empty_object_yields_defaults() {
		let config = UiConfig::from_json("{}").unwrap();
		assert_eq!(config, UiConfig::default());
	}

	#[rstest]
	fn test_partial_timings_override() {
		let config =
			UiConfig::from_json(r#"{"timings": {"sort_stagger": 0}, "title_column": null}"#)
				.unwrap();
		assert_eq!(config.timings.sort_stagger, Duration::ZERO);
		assert_eq!(config.timings.toast_exit, Duration::from_millis(300));
		assert_eq!(config.title_column, None);
	}

	#[rstest]
	fn test_invalid_json_is_config_error() {
		let err = UiConfig::from_json("{ timings: ").unwrap_err();
		assert!(err.to_string().starts_with("invalid ui configuration"));
	}

	#[rstest]
	fn test_serializes_as_millis() {
		let json = serde_json::to_value(Timings::default()).unwrap();
		assert_eq!(json["toast_lifetime"], 5000);
		assert_eq!(json["modal_close"], 300);
	}
}
