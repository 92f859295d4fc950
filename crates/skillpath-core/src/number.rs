//! Number parsing and formatting with browser semantics
//!
//! Text read from server-rendered cells is interpreted the way the page
//! scripts always have: a numeric *prefix* is accepted (`"12 hours"` is 12)
//! and anything else is NaN. Formatting mirrors what a browser prints for
//! numbers in style attributes and locale-formatted counters.

/// Returns true for the whitespace a browser strips before parsing a number.
fn is_js_whitespace(c: char) -> bool {
	c.is_whitespace() || c == '\u{feff}'
}

/// Parses the longest floating-point prefix of `text`, returning NaN when
/// there is none.
///
/// ```
/// use skillpath_core::number::parse_float;
///
/// assert_eq!(parse_float("  42.5%"), 42.5);
/// assert_eq!(parse_float("-.5e2px"), -50.0);
/// assert!(parse_float("abc").is_nan());
/// ```
pub fn parse_float(text: &str) -> f64 {
	let text = text.trim_start_matches(is_js_whitespace);
	let bytes = text.as_bytes();
	let mut end = 0;

	if matches!(bytes.first(), Some(b'+' | b'-')) {
		end += 1;
	}
	if text[end..].starts_with("Infinity") {
		let negative = bytes.first() == Some(&b'-');
		return if negative {
			f64::NEG_INFINITY
		} else {
			f64::INFINITY
		};
	}

	let int_start = end;
	while bytes.get(end).is_some_and(u8::is_ascii_digit) {
		end += 1;
	}
	let mut digits = end - int_start;

	if bytes.get(end) == Some(&b'.') {
		let frac_start = end + 1;
		let mut frac_end = frac_start;
		while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
			frac_end += 1;
		}
		digits += frac_end - frac_start;
		if digits > 0 {
			end = frac_end;
		}
	}
	if digits == 0 {
		return f64::NAN;
	}

	if matches!(bytes.get(end), Some(b'e' | b'E')) {
		let mut exp_end = end + 1;
		if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
			exp_end += 1;
		}
		let exp_digits_start = exp_end;
		while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
			exp_end += 1;
		}
		if exp_end > exp_digits_start {
			end = exp_end;
		}
	}

	text[..end].parse().unwrap_or(f64::NAN)
}

/// Parses the longest base-10 integer prefix of `text`.
///
/// Returns `None` where a browser would produce NaN, and also when the value
/// does not fit an `i64`.
pub fn parse_int(text: &str) -> Option<i64> {
	let text = text.trim_start_matches(is_js_whitespace);
	let bytes = text.as_bytes();
	let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
	let digits_start = end;
	while bytes.get(end).is_some_and(u8::is_ascii_digit) {
		end += 1;
	}
	if end == digits_start {
		return None;
	}
	text[..end].parse().ok()
}

/// Parses a counter such as `"1,204"`, ignoring thousands separators.
pub fn parse_grouped(text: &str) -> Option<i64> {
	parse_int(&text.replace(',', ""))
}

/// Formats an integer with `,` thousands separators (`1234567` → `"1,234,567"`).
pub fn format_grouped(value: i64) -> String {
	let digits = value.unsigned_abs().to_string();
	let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if value < 0 {
		out.push('-');
	}
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}
	out
}

/// Formats a number the way a browser stringifies it in a style value.
///
/// Integral values drop the fractional part and negative zero prints as `0`.
pub fn format_number(value: f64) -> String {
	if value.is_nan() {
		return "NaN".to_string();
	}
	if value.is_infinite() {
		return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
	}
	let value = value + 0.0;
	if value.fract() == 0.0 && value.abs() < 1e21 {
		format!("{value:.0}")
	} else {
		format!("{value}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("10", 10.0)]
	#[case("  3.25", 3.25)]
	#[case("12 hours", 12.0)]
	#[case(".5", 0.5)]
	#[case("5.", 5.0)]
	#[case("+7", 7.0)]
	#[case("-2.5kg", -2.5)]
	#[case("1e3", 1000.0)]
	#[case("1e", 1.0)]
	#[case("2E-2x", 0.02)]
	#[case("4.8/5", 4.8)]
	fn test_parse_float_prefix(#[case] input: &str, #[case] expected: f64) {
		assert_eq!(parse_float(input), expected);
	}

	#[rstest]
	#[case("")]
	#[case("abc")]
	#[case("-")]
	#[case(".")]
	#[case("$10")]
	#[case("e5")]
	fn test_parse_float_nan(#[case] input: &str) {
		assert!(parse_float(input).is_nan());
	}

	#[rstest]
	fn test_parse_float_infinity() {
		assert_eq!(parse_float("Infinity and beyond"), f64::INFINITY);
		assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
	}

	#[rstest]
	#[case("75%", Some(75))]
	#[case(" 12.9", Some(12))]
	#[case("-4", Some(-4))]
	#[case("x1", None)]
	#[case("", None)]
	fn test_parse_int(#[case] input: &str, #[case] expected: Option<i64>) {
		assert_eq!(parse_int(input), expected);
	}

	#[rstest]
	#[case("1,204", Some(1204))]
	#[case("12,345,678", Some(12_345_678))]
	#[case("n/a", None)]
	fn test_parse_grouped(#[case] input: &str, #[case] expected: Option<i64>) {
		assert_eq!(parse_grouped(input), expected);
	}

	#[rstest]
	#[case(0, "0")]
	#[case(999, "999")]
	#[case(1000, "1,000")]
	#[case(1_234_567, "1,234,567")]
	#[case(-45_000, "-45,000")]
	fn test_format_grouped(#[case] input: i64, #[case] expected: &str) {
		assert_eq!(format_grouped(input), expected);
	}

	#[rstest]
	#[case(3.0, "3")]
	#[case(-0.0, "0")]
	#[case(2.5, "2.5")]
	#[case(-1.25, "-1.25")]
	#[case(f64::NAN, "NaN")]
	fn test_format_number(#[case] input: f64, #[case] expected: &str) {
		assert_eq!(format_number(input), expected);
	}
}
