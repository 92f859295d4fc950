//! Sharing a learning path
//!
//! A path is shared through the Web Share API when the browser has it.
//! Otherwise the link is written to the clipboard and, if that fails, shown
//! in a prompt so the user can copy it by hand.

/// Title passed to the Web Share API.
pub const SHARE_TITLE: &str = "Check out my learning path!";

/// Toast shown after the link was copied.
pub const COPIED_MESSAGE: &str = "Link copied to clipboard!";

/// Text of the fallback prompt.
pub const PROMPT_MESSAGE: &str = "Copy this link to share:";

/// Public URL of a learning path.
///
/// ```
/// use skillpath_core::share::share_url;
///
/// assert_eq!(share_url("https://paths.example/", "42"), "https://paths.example/path/42");
/// ```
pub fn share_url(origin: &str, path_id: &str) -> String {
	format!("{}/path/{}", origin.trim_end_matches('/'), path_id)
}

/// One way of handing a link to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareStep {
	/// `navigator.share`.
	WebShare,
	/// `navigator.clipboard.writeText`.
	Clipboard,
	/// `window.prompt` with the link preselected.
	Prompt,
}

impl ShareStep {
	/// First step to try.
	pub fn first(web_share_available: bool) -> Self {
		if web_share_available {
			Self::WebShare
		} else {
			Self::Clipboard
		}
	}

	/// Step to try after this one failed.
	///
	/// A rejected Web Share means the user dismissed the sheet, so nothing
	/// else is tried.
	pub fn fallback(self) -> Option<Self> {
		match self {
			Self::Clipboard => Some(Self::Prompt),
			Self::WebShare | Self::Prompt => None,
		}
	}
}

/// A pending share of one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
	/// Title for the share sheet.
	pub title: &'static str,
	/// Link being shared.
	pub url: String,
	/// First step the browser layer should attempt.
	pub step: ShareStep,
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("https://example.com", "abc", "https://example.com/path/abc")]
	#[case("http://localhost:5000/", "7", "http://localhost:5000/path/7")]
	fn test_share_url(#[case] origin: &str, #[case] id: &str, #[case] expected: &str) {
		assert_eq!(share_url(origin, id), expected);
	}

	#[rstest]
	fn test_fallback_chain() {
		assert_eq!(ShareStep::first(true), ShareStep::WebShare);
		assert_eq!(ShareStep::first(false), ShareStep::Clipboard);
		assert_eq!(ShareStep::WebShare.fallback(), None);
		assert_eq!(ShareStep::Clipboard.fallback(), Some(ShareStep::Prompt));
		assert_eq!(ShareStep::Prompt.fallback(), None);
	}
}
