//! Cosmetic motion: card tilt, row hover and entrance staggers.

use std::time::Duration;

use crate::number::format_number;

/// Transform of a glass card at rest.
pub const TILT_REST: &str = "perspective(1000px) rotateX(0) rotateY(0) scale3d(1, 1, 1)";

/// Background of a table row under the cursor.
pub const ROW_HOVER_BACKGROUND: &str = "rgba(255, 255, 255, 0.05)";

/// Transform of a table row under the cursor.
pub const ROW_HOVER_TRANSFORM: &str = "translateX(5px)";

/// Background of a selected table row.
pub const ROW_SELECTED_BACKGROUND: &str = "rgba(99, 102, 241, 0.1)";

/// Transform of a glass card with the cursor at `(x, y)` inside a card of
/// the given size.
///
/// The card leans towards the cursor by the distance from its centre divided
/// by `divisor` degrees.
///
/// ```
/// use skillpath_core::motion::tilt_transform;
///
/// assert_eq!(
///     tilt_transform(150.0, 50.0, 200.0, 100.0, 10.0),
///     "perspective(1000px) rotateX(0deg) rotateY(5deg) scale3d(1.02, 1.02, 1.02)",
/// );
/// ```
pub fn tilt_transform(x: f64, y: f64, width: f64, height: f64, divisor: f64) -> String {
	let center_x = width / 2.0;
	let center_y = height / 2.0;
	let rotate_x = (center_y - y) / divisor;
	let rotate_y = (x - center_x) / divisor;
	format!(
		"perspective(1000px) rotateX({}deg) rotateY({}deg) scale3d(1.02, 1.02, 1.02)",
		format_number(rotate_x),
		format_number(rotate_y)
	)
}

/// Delay of the `index`-th element of a staggered entrance.
pub fn stagger(step: Duration, index: usize) -> Duration {
	step.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0.0, 0.0, "rotateX(5deg) rotateY(-10deg)")]
	#[case(100.0, 50.0, "rotateX(0deg) rotateY(0deg)")]
	#[case(200.0, 100.0, "rotateX(-5deg) rotateY(10deg)")]
	#[case(125.0, 40.0, "rotateX(1deg) rotateY(2.5deg)")]
	fn test_tilt_follows_cursor(#[case] x: f64, #[case] y: f64, #[case] rotation: &str) {
		let transform = tilt_transform(x, y, 200.0, 100.0, 10.0);
		assert_eq!(
			transform,
			format!("perspective(1000px) {rotation} scale3d(1.02, 1.02, 1.02)")
		);
	}

	#[rstest]
	fn test_stagger() {
		let step = Duration::from_millis(50);
		assert_eq!(stagger(step, 0), Duration::ZERO);
		assert_eq!(stagger(step, 3), Duration::from_millis(150));
	}
}
