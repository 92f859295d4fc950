//! Public Site Integration Tests
//!
//! Success Criteria:
//! 1. Toasts enter, auto-dismiss and are removed exactly once
//! 2. Flash messages fade out on their own or when closed
//! 3. Required-field validation blocks submission with a single toast
//! 4. The navigation, share and progress helpers behave like the page expects

use std::rc::Rc;
use std::time::Duration;

use proptest::prelude::*;
use rstest::{fixture, rstest};
use skillpath_core::form::REQUIRED_FIELDS_MESSAGE;
use skillpath_core::{
	FormField, ManualClock, Patch, RingSetup, ShareStep, SiteApp, SitePage, StepStatus, ToastKind,
	UiConfig,
};

type App = SiteApp<Rc<ManualClock>>;

#[fixture]
fn clock() -> Rc<ManualClock> {
	Rc::new(ManualClock::new())
}

fn mounted(clock: &Rc<ManualClock>, page: SitePage) -> App {
	let mut app = SiteApp::new(UiConfig::default(), clock.clone());
	app.mount(page);
	app
}

fn advance(clock: &ManualClock, app: &mut App, millis: u64) -> Vec<Patch> {
	clock.advance(Duration::from_millis(millis));
	app.tick();
	app.take_patches()
}

// ============================================================================
// Toasts
// ============================================================================

/// Tests the full toast lifecycle on default timings
#[rstest]
fn test_toast_lifecycle(clock: Rc<ManualClock>) {
	let mut app = mounted(&clock, SitePage::default());
	let id = app.toast(ToastKind::Success, "Saved");
	assert_eq!(
		app.take_patches(),
		vec![Patch::ToastInserted {
			id,
			kind: ToastKind::Success,
			message: "Saved".to_string(),
		}]
	);
	assert_eq!(advance(&clock, &mut app, 10), vec![Patch::ToastEntered(id)]);
	assert!(advance(&clock, &mut app, 4_989).is_empty());
	assert_eq!(advance(&clock, &mut app, 1), vec![Patch::ToastLeaving(id)]);
	assert_eq!(advance(&clock, &mut app, 300), vec![Patch::ToastRemoved(id)]);
	assert!(app.next_deadline().is_none());
}

proptest! {
	#![proptest_config(ProptestConfig::with_cases(50))]

	/// A toast is removed exactly once whenever its close button is pressed
	#[rstest]
	fn test_toast_removed_once(dismiss_at in 0u64..6_000) {
		let clock = Rc::new(ManualClock::new());
		let mut app = mounted(&clock, SitePage::default());
		let id = app.toast(ToastKind::Info, "hello");

		let mut patches = advance(&clock, &mut app, dismiss_at);
		let dismissed = app.dismiss_toast(id);
		patches.extend(app.take_patches());
		patches.extend(advance(&clock, &mut app, 20_000));

		let removals = patches.iter().filter(|p| **p == Patch::ToastRemoved(id)).count();
		let leaving = patches.iter().filter(|p| **p == Patch::ToastLeaving(id)).count();
		prop_assert_eq!(removals, 1);
		prop_assert_eq!(leaving, 1);
		prop_assert_eq!(dismissed, dismiss_at < 5_000);
	}
}

// ============================================================================
// Flash messages
// ============================================================================

/// Tests that flash messages leave on their own after five seconds
#[rstest]
fn test_flash_auto_dismiss(clock: Rc<ManualClock>) {
	let mut app = mounted(
		&clock,
		SitePage {
			flash_messages: 2,
			..SitePage::default()
		},
	);
	assert!(advance(&clock, &mut app, 4_999).is_empty());
	assert_eq!(
		advance(&clock, &mut app, 1),
		vec![Patch::FlashLeaving(0), Patch::FlashLeaving(1)]
	);
	assert_eq!(
		advance(&clock, &mut app, 300),
		vec![Patch::FlashRemoved(0), Patch::FlashRemoved(1)]
	);
}

/// Tests that closing a flash message cancels its auto-dismiss
#[rstest]
fn test_flash_manual_close(clock: Rc<ManualClock>) {
	let mut app = mounted(
		&clock,
		SitePage {
			flash_messages: 1,
			..SitePage::default()
		},
	);
	advance(&clock, &mut app, 1_000);
	assert!(app.dismiss_flash(0));
	assert!(!app.dismiss_flash(0));
	assert!(!app.dismiss_flash(5));

	let mut patches = app.take_patches();
	patches.extend(advance(&clock, &mut app, 10_000));
	assert_eq!(patches, vec![Patch::FlashLeaving(0), Patch::FlashRemoved(0)]);
}

// ============================================================================
// Forms
// ============================================================================

/// Tests that blank required fields produce exactly one error toast
#[rstest]
#[case::all_blank(&["", "  ", "x"], &[0, 1], false)]
#[case::one_blank(&["ada", "", "x"], &[1], false)]
#[case::filled(&["ada", "secret", ""], &[], true)]
fn test_required_fields(
	clock: Rc<ManualClock>,
	#[case] values: &[&str],
	#[case] invalid: &[usize],
	#[case] proceeds: bool,
) {
	let mut app = mounted(&clock, SitePage::default());
	let fields = [
		FormField::new("username", values[0]).required(),
		FormField::new("password", values[1]).required(),
		FormField::new("remember", values[2]),
	];
	assert_eq!(app.submit_form(3, &fields), proceeds);

	let patches = app.take_patches();
	let marked: Vec<usize> = patches
		.iter()
		.filter_map(|p| match p {
			Patch::FieldMarked {
				form: 3,
				field,
				invalid: true,
			} => Some(*field),
			_ => None,
		})
		.collect();
	assert_eq!(marked, invalid);

	let toasts = patches
		.iter()
		.filter(|p| {
			matches!(p, Patch::ToastInserted { kind: ToastKind::Error, message, .. }
				if message == REQUIRED_FIELDS_MESSAGE)
		})
		.count();
	assert_eq!(toasts, usize::from(!proceeds));
}

// ============================================================================
// Page helpers
// ============================================================================

/// Tests ring preparation and the delayed fill
#[rstest]
fn test_rings_fill_after_delay(clock: Rc<ManualClock>) {
	let mut app = mounted(
		&clock,
		SitePage {
			rings: vec![RingSetup::new(50.0, Some("75%")), RingSetup::new(50.0, None)],
			..SitePage::default()
		},
	);
	let prepared = app.take_patches();
	assert_eq!(prepared.len(), 2);
	assert!(advance(&clock, &mut app, 99).is_empty());

	let filled = advance(&clock, &mut app, 1);
	let circumference = 2.0 * std::f64::consts::PI * 50.0;
	match filled.as_slice() {
		[
			Patch::RingFilled { index: 0, offset: three_quarters },
			Patch::RingFilled { index: 1, offset: empty },
		] => {
			assert!((three_quarters - circumference * 0.25).abs() < 1e-9);
			assert!((empty - circumference).abs() < 1e-9);
		}
		other => panic!("unexpected patches: {other:?}"),
	}
}

/// Tests the mobile navigation toggle and outside click
#[rstest]
fn test_navigation(clock: Rc<ManualClock>) {
	let mut app = mounted(&clock, SitePage::default());
	app.document_click(false);
	assert!(app.take_patches().is_empty());

	app.toggle_nav();
	assert!(app.nav_open());
	app.document_click(true);
	assert!(app.nav_open());
	app.document_click(false);
	assert!(!app.nav_open());
	assert_eq!(
		app.take_patches(),
		vec![Patch::NavLinksVisible(true), Patch::NavLinksVisible(false)]
	);
}

/// Tests the share fallback chain
#[rstest]
#[case(true, ShareStep::WebShare)]
#[case(false, ShareStep::Clipboard)]
fn test_share_chain(clock: Rc<ManualClock>, #[case] web_share: bool, #[case] first: ShareStep) {
	let mut app = mounted(&clock, SitePage::default());
	let request = app.share_path("https://skillpath.dev/", "42", web_share);
	assert_eq!(request.step, first);
	assert_eq!(request.url, "https://skillpath.dev/path/42");

	assert_eq!(app.share_settled(ShareStep::Clipboard, false), Some(ShareStep::Prompt));
	assert_eq!(app.share_settled(ShareStep::Clipboard, true), None);
	assert!(matches!(
		app.take_patches().as_slice(),
		[Patch::ToastInserted { kind: ToastKind::Success, .. }]
	));
}

/// Tests step status classes for stored progress values
#[rstest]
#[case("done", StepStatus::Completed)]
#[case("in_progress", StepStatus::InProgress)]
#[case("", StepStatus::Todo)]
#[case("completed", StepStatus::Todo)]
fn test_step_progress(clock: Rc<ManualClock>, #[case] stored: &str, #[case] expected: StepStatus) {
	let mut app = mounted(&clock, SitePage::default());
	assert_eq!(app.update_step_progress("step-1", stored), expected);
	assert_eq!(
		app.take_patches(),
		vec![Patch::StepStatus {
			step_id: "step-1".to_string(),
			status: expected,
		}]
	);
}
