//! Resource catalog actions
//!
//! The admin panel edits the catalog through an external API that the pages
//! only assume exists. [`ResourceBackend`] is that seam; [`SimulatedBackend`]
//! stands in for it and accepts every request.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::FormField;

/// Failure reported by a resource backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BackendError {
	/// The resource does not exist.
	#[error("resource not found: {0}")]
	NotFound(String),

	/// The backend refused the request.
	#[error("{0}")]
	Rejected(String),
}

/// Editable fields of a resource, as sent to the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDraft {
	/// Title.
	pub title: String,
	/// Type code (`course`, `book`, `video`, ...).
	#[serde(rename = "type")]
	pub resource_type: String,
	/// Category.
	pub category: String,
	/// Link to the resource.
	pub url: String,
	/// Description.
	pub description: String,
	/// Difficulty level.
	pub difficulty: String,
	/// Expected duration.
	pub duration: String,
	/// Comma separated tags.
	pub tags: String,
}

impl ResourceDraft {
	/// Element ids of the resource form controls, in field order.
	pub const FIELD_IDS: [&'static str; 8] = [
		"resourceTitle",
		"resourceType",
		"resourceCategory",
		"resourceUrl",
		"resourceDescription",
		"resourceDifficulty",
		"resourceDuration",
		"resourceTags",
	];

	/// The hard-coded resource the edit dialog is filled with.
	pub fn example() -> Self {
		Self {
			title: "Advanced React Patterns and Best Practices".to_string(),
			resource_type: "course".to_string(),
			category: "web development".to_string(),
			url: "https://example.com/advanced-react-patterns".to_string(),
			description: EXAMPLE_DESCRIPTION.to_string(),
			difficulty: "intermediate".to_string(),
			duration: "3 weeks".to_string(),
			tags: "react, patterns, hooks, context, performance".to_string(),
		}
	}

	/// Builds a draft from the resource form; unknown controls are ignored.
	pub fn from_form(fields: &[FormField]) -> Self {
		let mut draft = Self::default();
		for field in fields {
			if let Some(slot) = draft.slot_mut(&field.name) {
				slot.clone_from(&field.value);
			}
		}
		draft
	}

	/// Pairs of form control id and value, for filling the form.
	pub fn form_values(&self) -> [(&'static str, &str); 8] {
		let values = [
			&self.title,
			&self.resource_type,
			&self.category,
			&self.url,
			&self.description,
			&self.difficulty,
			&self.duration,
			&self.tags,
		];
		let mut pairs = [("", ""); 8];
		for (pair, (id, value)) in pairs.iter_mut().zip(Self::FIELD_IDS.iter().zip(values)) {
			*pair = (*id, value.as_str());
		}
		pairs
	}

	fn slot_mut(&mut self, id: &str) -> Option<&mut String> {
		Some(match id {
			"resourceTitle" => &mut self.title,
			"resourceType" => &mut self.resource_type,
			"resourceCategory" => &mut self.category,
			"resourceUrl" => &mut self.url,
			"resourceDescription" => &mut self.description,
			"resourceDifficulty" => &mut self.difficulty,
			"resourceDuration" => &mut self.duration,
			"resourceTags" => &mut self.tags,
			_ => return None,
		})
	}
}

const EXAMPLE_DESCRIPTION: &str = "Learn advanced React patterns including compound components, render props, higher-order components, and hooks optimization. This course covers performance optimization, code splitting, and advanced state management techniques.";

/// Read-only details shown in the preview dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourcePreview {
	/// Human readable type.
	pub type_label: String,
	/// Font Awesome icon of the type.
	pub type_icon: String,
	/// Difficulty badge text.
	pub difficulty: String,
	/// Expected duration.
	pub duration: String,
	/// Title.
	pub title: String,
	/// Description.
	pub description: String,
	/// Link to the resource.
	pub url: String,
	/// Tag chips.
	pub tags: Vec<String>,
	/// Label and value of each usage statistic.
	pub stats: Vec<(String, String)>,
}

impl ResourcePreview {
	/// CSS modifier of the difficulty badge.
	pub fn difficulty_class(&self) -> String {
		self.difficulty.to_lowercase()
	}

	/// The preview shown for every resource until the API is wired up.
	pub fn example() -> Self {
		let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
		Self {
			type_label: "Online Course".to_string(),
			type_icon: "graduation-cap".to_string(),
			difficulty: "Intermediate".to_string(),
			duration: "8 hours".to_string(),
			title: "Advanced React Patterns and Best Practices".to_string(),
			description: EXAMPLE_DESCRIPTION.to_string(),
			url: "https://example.com/advanced-react-patterns".to_string(),
			tags: owned(&["React", "JavaScript", "Patterns", "Performance", "Hooks"]),
			stats: [("Added", "2 weeks ago"), ("Used in", "15 paths"), ("Rating", "4.8/5")]
				.into_iter()
				.map(|(label, value)| (label.to_string(), value.to_string()))
				.collect(),
		}
	}
}

/// The persistence API the admin panel talks to.
pub trait ResourceBackend {
	/// Creates a resource and returns its id.
	fn create(&mut self, draft: &ResourceDraft) -> Result<String, BackendError>;

	/// Replaces the fields of an existing resource.
	fn update(&mut self, id: &str, draft: &ResourceDraft) -> Result<(), BackendError>;

	/// Deletes a resource.
	fn delete(&mut self, id: &str) -> Result<(), BackendError>;
}

/// A request received by [`SimulatedBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
	/// `create`
	Create(ResourceDraft),
	/// `update`
	Update(String, ResourceDraft),
	/// `delete`
	Delete(String),
}

/// Backend that accepts every request and remembers it.
#[derive(Debug, Default)]
pub struct SimulatedBackend {
	calls: Vec<BackendCall>,
	next_id: u64,
}

impl SimulatedBackend {
	/// Creates a backend with an empty call log.
	pub fn new() -> Self {
		Self::default()
	}

	/// Every request received so far.
	pub fn calls(&self) -> &[BackendCall] {
		&self.calls
	}
}

impl ResourceBackend for SimulatedBackend {
	fn create(&mut self, draft: &ResourceDraft) -> Result<String, BackendError> {
		self.next_id += 1;
		self.calls.push(BackendCall::Create(draft.clone()));
		Ok(format!("simulated-{}", self.next_id))
	}

	fn update(&mut self, id: &str, draft: &ResourceDraft) -> Result<(), BackendError> {
		self.calls.push(BackendCall::Update(id.to_string(), draft.clone()));
		Ok(())
	}

	fn delete(&mut self, id: &str) -> Result<(), BackendError> {
		self.calls.push(BackendCall::Delete(id.to_string()));
		Ok(())
	}
}

/// Entries of the simulated activity feed.
pub const ACTIVITIES: [&str; 5] = [
	"New user registration",
	"Learning path completed",
	"Resource added",
	"Progress milestone reached",
	"System backup completed",
];

/// Picks a simulated activity.
pub fn random_activity<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
	ACTIVITIES.choose(rng).copied().unwrap_or(ACTIVITIES[0])
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use rstest::rstest;

	#[rstest]
	fn test_form_round_trip_through_ids() {
		let example = ResourceDraft::example();
		let fields: Vec<FormField> = example
			.form_values()
			.iter()
			.map(|(id, value)| FormField::new(*id, *value))
			.chain([FormField::new("resourceId", "12")])
			.collect();
		assert_eq!(ResourceDraft::from_form(&fields), example);
	}

	#[rstest]
	fn test_draft_serializes_type_key() {
		let json = serde_json::to_value(ResourceDraft::example()).unwrap();
		assert_eq!(json["type"], "course");
		assert_eq!(json["tags"], "react, patterns, hooks, context, performance");
	}

	#[rstest]
	fn test_example_preview() {
		let preview = ResourcePreview::example();
		assert_eq!(preview.difficulty_class(), "intermediate");
		assert_eq!(preview.tags.len(), 5);
		assert_eq!(preview.stats[2], ("Rating".to_string(), "4.8/5".to_string()));
	}

	#[rstest]
	fn test_simulated_backend_accepts_everything() {
		let mut backend = SimulatedBackend::new();
		let draft = ResourceDraft::example();
		let id = backend.create(&draft).unwrap();
		backend.update(&id, &draft).unwrap();
		backend.delete(&id).unwrap();
		assert_eq!(
			backend.calls(),
			&[
				BackendCall::Create(draft.clone()),
				BackendCall::Update(id.clone(), draft),
				BackendCall::Delete(id),
			]
		);
	}

	#[rstest]
	fn test_random_activity_is_known() {
		let mut rng = StdRng::seed_from_u64(1);
		for _ in 0..20 {
			assert!(ACTIVITIES.contains(&random_activity(&mut rng)));
		}
	}
}
