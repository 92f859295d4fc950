//! Error types for the headless UI layer.

use thiserror::Error;

use crate::resources::BackendError;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the headless UI layer.
///
/// Most UI failures are local and silently ignored (a missing element simply
/// turns an operation into a no-op), so this enum only covers inputs that
/// come from outside the page: configuration, markup attribute values and
/// the resource backend.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CoreError {
	/// The embedded configuration block is not valid JSON for [`crate::UiConfig`].
	#[error("invalid ui configuration: {0}")]
	Config(#[from] serde_json::Error),

	/// A toast kind string did not name a known kind.
	#[error("unknown toast kind: {0}")]
	UnknownToastKind(String),

	/// A confirm severity string did not name a known severity.
	#[error("unknown confirm severity: {0}")]
	UnknownSeverity(String),

	/// The resource backend rejected a request.
	#[error(transparent)]
	Backend(#[from] BackendError),
}
