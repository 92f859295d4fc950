//! Public-site controller
//!
//! Drives the learner-facing pages: progress rings, flash messages,
//! required-field validation, glass-card tilt, the mobile navigation, path
//! sharing and step status updates. Toasts use the same [`ToastStack`] as
//! the admin panel.

use std::time::Duration;

use crate::config::UiConfig;
use crate::form::{FormField, REQUIRED_FIELDS_MESSAGE, check_required};
use crate::motion::{TILT_REST, tilt_transform};
use crate::patch::Patch;
use crate::progress::{RingGeometry, RingLabel, RingSetup, StepStatus};
use crate::schedule::{Clock, Scheduler, TimerId, Timestamp};
use crate::share::{COPIED_MESSAGE, SHARE_TITLE, ShareRequest, ShareStep, share_url};
use crate::toast::{ToastId, ToastKind, ToastStack, ToastTimer};

/// Timers of the public-site controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteTimer {
	/// A toast timer.
	Toast(ToastTimer),
	/// Fill every progress ring.
	FillRings,
	/// A flash message outlived its lifetime.
	FlashDismiss(usize),
	/// A flash message finished fading out.
	FlashRemove(usize),
}

impl From<ToastTimer> for SiteTimer {
	fn from(timer: ToastTimer) -> Self {
		Self::Toast(timer)
	}
}

/// Interactive elements found on a public page at load time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SitePage {
	/// Progress rings with the text of the label that follows each of them.
	pub rings: Vec<RingSetup>,
	/// Number of `.flash-message` elements.
	pub flash_messages: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Flash {
	auto_dismiss: Option<TimerId>,
	leaving: bool,
}

/// Controller of the public site.
#[derive(Debug)]
pub struct SiteApp<C> {
	config: UiConfig,
	clock: C,
	scheduler: Scheduler<SiteTimer>,
	toasts: ToastStack,
	rings: Vec<(RingGeometry, f64)>,
	flashes: Vec<Flash>,
	nav_open: bool,
	outbox: Vec<Patch>,
}

impl<C: Clock> SiteApp<C> {
	/// Creates a controller reading time from `clock`.
	pub fn new(config: UiConfig, clock: C) -> Self {
		let scheduler = Scheduler::starting_at(clock.now());
		let toasts = ToastStack::new(&config.timings);
		Self {
			config,
			clock,
			scheduler,
			toasts,
			rings: Vec::new(),
			flashes: Vec::new(),
			nav_open: false,
			outbox: Vec::new(),
		}
	}

	/// Starts the load-time animations of a page.
	pub fn mount(&mut self, page: SitePage) {
		self.tick();
		let timings = self.config.timings.clone();

		self.rings = page
			.rings
			.iter()
			.map(|ring| {
				let geometry = RingGeometry::from_radius(ring.radius);
				(geometry, RingLabel::Integer.percent(ring.label.as_deref()))
			})
			.collect();
		for (index, (geometry, _)) in self.rings.iter().enumerate() {
			self.outbox.push(Patch::RingPrepared {
				index,
				dash_array: geometry.dash_array(),
				offset: geometry.circumference(),
			});
		}
		if !self.rings.is_empty() {
			self.scheduler.after(timings.site_ring_delay, SiteTimer::FillRings);
		}

		self.flashes = (0..page.flash_messages)
			.map(|index| Flash {
				auto_dismiss: Some(
					self.scheduler
						.after(timings.flash_lifetime, SiteTimer::FlashDismiss(index)),
				),
				leaving: false,
			})
			.collect();
		tracing::debug!(
			rings = self.rings.len(),
			flashes = self.flashes.len(),
			"site mounted"
		);
	}

	/// Fires every timer that is due by the clock.
	pub fn tick(&mut self) {
		let now = self.clock.now();
		while let Some(timer) = self.scheduler.pop_due(now) {
			self.on_timer(timer);
		}
		self.scheduler.settle(now);
	}

	/// Drains the queued patches.
	pub fn take_patches(&mut self) -> Vec<Patch> {
		std::mem::take(&mut self.outbox)
	}

	/// Earliest pending deadline, for hosts that sleep between ticks.
	pub fn next_deadline(&self) -> Option<Timestamp> {
		self.scheduler.next_deadline()
	}

	/// Shows a toast.
	pub fn toast(&mut self, kind: ToastKind, message: impl Into<String>) -> ToastId {
		self.tick();
		self.toasts
			.push(&mut self.scheduler, kind, message, &mut self.outbox)
	}

	/// Close button of a toast.
	pub fn dismiss_toast(&mut self, id: ToastId) -> bool {
		self.tick();
		self.toasts.dismiss(&mut self.scheduler, id, &mut self.outbox)
	}

	/// Close button of a flash message.
	pub fn dismiss_flash(&mut self, index: usize) -> bool {
		self.tick();
		let Some(flash) = self.flashes.get_mut(index) else {
			return false;
		};
		if let Some(timer) = flash.auto_dismiss.take() {
			self.scheduler.cancel(timer);
		}
		Self::leave_flash(
			flash,
			index,
			&mut self.scheduler,
			self.config.timings.flash_exit,
			&mut self.outbox,
		)
	}

	/// Checks the required fields of form `form` before it is submitted.
	///
	/// Returns true if the submission may proceed. Otherwise every blank
	/// required field is highlighted and one error toast is shown.
	pub fn submit_form(&mut self, form: usize, fields: &[FormField]) -> bool {
		self.tick();
		let report = check_required(fields);
		for (&field, invalid) in report
			.invalid
			.iter()
			.map(|f| (f, true))
			.chain(report.valid.iter().map(|f| (f, false)))
		{
			self.outbox.push(Patch::FieldMarked {
				form,
				field,
				invalid,
			});
		}
		if report.is_valid() {
			return true;
		}
		tracing::debug!(form, missing = report.invalid.len(), "submission blocked");
		self.toast(ToastKind::Error, REQUIRED_FIELDS_MESSAGE);
		false
	}

	/// Tilts card `card` towards the cursor at `(x, y)` within a `width` by
	/// `height` card.
	pub fn tilt_card(&mut self, card: usize, x: f64, y: f64, width: f64, height: f64) {
		self.outbox.push(Patch::CardTransform {
			card,
			transform: tilt_transform(x, y, width, height, self.config.tilt_divisor),
		});
	}

	/// Returns a card to rest when the cursor leaves it.
	pub fn reset_card(&mut self, card: usize) {
		self.outbox.push(Patch::CardTransform {
			card,
			transform: TILT_REST.to_string(),
		});
	}

	/// Whether the mobile navigation is open.
	pub fn nav_open(&self) -> bool {
		self.nav_open
	}

	/// The navigation toggle button was clicked.
	pub fn toggle_nav(&mut self) {
		self.nav_open = !self.nav_open;
		self.outbox.push(Patch::NavLinksVisible(self.nav_open));
	}

	/// A click anywhere in the document; closes the navigation when the
	/// click landed outside it and its toggle.
	pub fn document_click(&mut self, inside_nav: bool) {
		if self.nav_open && !inside_nav {
			self.nav_open = false;
			self.outbox.push(Patch::NavLinksVisible(false));
		}
	}

	/// Starts sharing the learning path `path_id`.
	pub fn share_path(&self, origin: &str, path_id: &str, web_share_available: bool) -> ShareRequest {
		let request = ShareRequest {
			title: SHARE_TITLE,
			url: share_url(origin, path_id),
			step: ShareStep::first(web_share_available),
		};
		tracing::debug!(url = %request.url, step = ?request.step, "sharing path");
		request
	}

	/// Reports how a share step ended and returns the step to try next.
	pub fn share_settled(&mut self, step: ShareStep, succeeded: bool) -> Option<ShareStep> {
		if succeeded {
			if step == ShareStep::Clipboard {
				self.toast(ToastKind::Success, COPIED_MESSAGE);
			}
			return None;
		}
		step.fallback()
	}

	/// Applies a stored progress value to step `step_id`.
	pub fn update_step_progress(&mut self, step_id: &str, status: &str) -> StepStatus {
		let status = StepStatus::from_progress(status);
		self.outbox.push(Patch::StepStatus {
			step_id: step_id.to_string(),
			status,
		});
		status
	}

	fn on_timer(&mut self, timer: SiteTimer) {
		match timer {
			SiteTimer::Toast(timer) => {
				self.toasts
					.on_timer(&mut self.scheduler, timer, &mut self.outbox);
			}
			SiteTimer::FillRings => {
				for (index, (geometry, percent)) in self.rings.iter().enumerate() {
					self.outbox.push(Patch::RingFilled {
						index,
						offset: geometry.offset_for(*percent),
					});
				}
			}
			SiteTimer::FlashDismiss(index) => {
				if let Some(flash) = self.flashes.get_mut(index) {
					flash.auto_dismiss = None;
					Self::leave_flash(
						flash,
						index,
						&mut self.scheduler,
						self.config.timings.flash_exit,
						&mut self.outbox,
					);
				}
			}
			SiteTimer::FlashRemove(index) => {
				self.outbox.push(Patch::FlashRemoved(index));
			}
		}
	}

	fn leave_flash(
		flash: &mut Flash,
		index: usize,
		scheduler: &mut Scheduler<SiteTimer>,
		exit: Duration,
		out: &mut Vec<Patch>,
	) -> bool {
		if flash.leaving {
			return false;
		}
		flash.leaving = true;
		scheduler.after(exit, SiteTimer::FlashRemove(index));
		out.push(Patch::FlashLeaving(index));
		true
	}
}

/// Target element id of an in-page anchor, if `href` is one.
///
/// ```
/// use skillpath_core::site::anchor_target;
///
/// assert_eq!(anchor_target("#features"), Some("features"));
/// assert_eq!(anchor_target("#"), None);
/// assert_eq!(anchor_target("/login"), None);
/// ```
pub fn anchor_target(href: &str) -> Option<&str> {
	href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::schedule::ManualClock;
	use rstest::{fixture, rstest};
	use std::rc::Rc;

	struct Harness {
		clock: Rc<ManualClock>,
		app: SiteApp<Rc<ManualClock>>,
	}

	impl Harness {
		fn advance(&mut self, millis: u64) -> Vec<Patch> {
			self.clock.advance(Duration::from_millis(millis));
			self.app.tick();
			self.app.take_patches()
		}
	}

	#[fixture]
	fn harness() -> Harness {
		let clock = Rc::new(ManualClock::new());
		let app = SiteApp::new(UiConfig::default(), clock.clone());
		Harness { clock, app }
	}

	#[rstest]
	fn test_rings_fill_after_delay(mut harness: Harness) {
		harness.app.mount(SitePage {
			rings: vec![RingSetup::new(50.0, Some("40%")), RingSetup::new(50.0, None)],
			flash_messages: 0,
		});
		let prepared = harness.app.take_patches();
		assert_eq!(prepared.len(), 2);
		assert!(matches!(prepared[0], Patch::RingPrepared { index: 0, .. }));

		assert!(harness.advance(99).is_empty());
		let filled = harness.advance(1);
		let c = RingGeometry::from_radius(50.0).circumference();
		assert_eq!(
			filled,
			vec![
				Patch::RingFilled {
					index: 0,
					offset: c - 0.4 * c,
				},
				Patch::RingFilled { index: 1, offset: c },
			]
		);
	}

	#[rstest]
	fn test_flash_messages_dismiss_themselves(mut harness: Harness) {
		harness.app.mount(SitePage {
			rings: Vec::new(),
			flash_messages: 2,
		});
		assert!(harness.advance(4_999).is_empty());
		assert_eq!(
			harness.advance(1),
			vec![Patch::FlashLeaving(0), Patch::FlashLeaving(1)]
		);
		assert_eq!(
			harness.advance(300),
			vec![Patch::FlashRemoved(0), Patch::FlashRemoved(1)]
		);
	}

	#[rstest]
	fn test_closed_flash_is_removed_once(mut harness: Harness) {
		harness.app.mount(SitePage {
			rings: Vec::new(),
			flash_messages: 1,
		});
		harness.advance(1_000);
		assert!(harness.app.dismiss_flash(0));
		assert!(!harness.app.dismiss_flash(0));
		let mut patches = harness.app.take_patches();
		patches.extend(harness.advance(10_000));
		assert_eq!(patches, vec![Patch::FlashLeaving(0), Patch::FlashRemoved(0)]);
	}

	#[rstest]
	fn test_blank_required_field_blocks_with_one_toast(mut harness: Harness) {
		let fields = [
			FormField::new("career_goal", "").required(),
			FormField::new("interests", "rust").required(),
			FormField::new("timeline", "").required(),
		];
		assert!(!harness.app.submit_form(0, &fields));
		let patches = harness.app.take_patches();
		let toasts: Vec<_> = patches
			.iter()
			.filter(|p| matches!(p, Patch::ToastInserted { .. }))
			.collect();
		assert_eq!(toasts.len(), 1);
		assert!(matches!(
			toasts[0],
			Patch::ToastInserted { kind: ToastKind::Error, message, .. } if message == REQUIRED_FIELDS_MESSAGE
		));
		assert!(patches.contains(&Patch::FieldMarked {
			form: 0,
			field: 0,
			invalid: true
		}));
		assert!(patches.contains(&Patch::FieldMarked {
			form: 0,
			field: 1,
			invalid: false
		}));
	}

	#[rstest]
	fn test_complete_form_submits(mut harness: Harness) {
		let fields = [FormField::new("email", "a@b.c").required()];
		assert!(harness.app.submit_form(1, &fields));
		assert_eq!(
			harness.app.take_patches(),
			vec![Patch::FieldMarked {
				form: 1,
				field: 0,
				invalid: false
			}]
		);
	}

	#[rstest]
	fn test_nav_closes_on_outside_click(mut harness: Harness) {
		harness.app.toggle_nav();
		harness.app.document_click(true);
		assert!(harness.app.nav_open());
		harness.app.document_click(false);
		assert!(!harness.app.nav_open());
		harness.app.document_click(false);
		assert_eq!(
			harness.app.take_patches(),
			vec![Patch::NavLinksVisible(true), Patch::NavLinksVisible(false)]
		);
	}

	#[rstest]
	fn test_share_falls_back_to_prompt(mut harness: Harness) {
		let request = harness.app.share_path("https://skills.example", "12", false);
		assert_eq!(request.url, "https://skills.example/path/12");
		assert_eq!(request.title, SHARE_TITLE);
		assert_eq!(request.step, ShareStep::Clipboard);
		assert_eq!(
			harness.app.share_settled(request.step, false),
			Some(ShareStep::Prompt)
		);
		assert!(harness.app.take_patches().is_empty());
	}

	#[rstest]
	fn test_copied_link_toasts(mut harness: Harness) {
		assert_eq!(harness.app.share_settled(ShareStep::Clipboard, true), None);
		assert!(matches!(
			harness.app.take_patches().as_slice(),
			[Patch::ToastInserted { kind: ToastKind::Success, message, .. }] if message == COPIED_MESSAGE
		));
	}

	#[rstest]
	fn test_card_tilt_and_reset(mut harness: Harness) {
		harness.app.tilt_card(2, 0.0, 0.0, 200.0, 100.0);
		harness.app.reset_card(2);
		let patches = harness.app.take_patches();
		assert_eq!(
			patches[1],
			Patch::CardTransform {
				card: 2,
				transform: TILT_REST.to_string()
			}
		);
	}

	#[rstest]
	fn test_step_progress_mapping(mut harness: Harness) {
		assert_eq!(
			harness.app.update_step_progress("s1", "in_progress"),
			StepStatus::InProgress
		);
		assert_eq!(
			harness.app.take_patches(),
			vec![Patch::StepStatus {
				step_id: "s1".to_string(),
				status: StepStatus::InProgress
			}]
		);
	}
}
