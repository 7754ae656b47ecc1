// Integration tests link the whole dependency graph but use only a slice of it.
#![allow(unused_crate_dependencies)]

use std::cell::RefCell;
use std::rc::Rc;

use particle_backdrop::components::particle_field::scheduler::FrameScheduler;
use particle_backdrop::components::particle_field::{
	DrawCommand, FieldConfig, FieldController, FieldError, FieldMode, FieldState, Frame,
	Particles, Surface, Theme,
};

#[derive(Default)]
struct ClockInner {
	next: u32,
	queued: Vec<u32>,
	cancelled: usize,
}

/// Manual stand-in for the display refresh: frames fire only on `advance`.
#[derive(Clone, Default)]
struct FrameClock {
	inner: Rc<RefCell<ClockInner>>,
}

impl FrameScheduler for FrameClock {
	type Handle = u32;

	fn request(&mut self) -> Result<u32, FieldError> {
		let mut inner = self.inner.borrow_mut();
		inner.next += 1;
		let handle = inner.next;
		inner.queued.push(handle);
		Ok(handle)
	}

	fn cancel(&mut self, handle: u32) {
		let mut inner = self.inner.borrow_mut();
		inner.queued.retain(|h| *h != handle);
		inner.cancelled += 1;
	}
}

impl FrameClock {
	fn queued(&self) -> usize {
		self.inner.borrow().queued.len()
	}

	/// Fires every queued frame once and collects what was drawn.
	fn advance(&self, controller: &mut FieldController<FrameClock>, timestamp: f64) -> Vec<Frame> {
		let due = std::mem::take(&mut self.inner.borrow_mut().queued);
		due.iter()
			.filter_map(|_| controller.frame(Some(timestamp)).unwrap())
			.collect()
	}
}

fn controller(
	mode: FieldMode,
	width: f64,
	height: f64,
	visible: bool,
) -> (FieldController<FrameClock>, FrameClock) {
	let config = FieldConfig {
		mode,
		..Default::default()
	};
	let state = FieldState::new(config, Theme::default(), Surface::new(width, height), 1234);
	let clock = FrameClock::default();
	(FieldController::new(state, clock.clone(), visible), clock)
}

fn draw_calls(frames: &[Frame]) -> usize {
	frames.iter().map(Frame::len).sum()
}

#[test]
fn network_waits_for_visibility() {
	let (mut field, clock) = controller(FieldMode::Network, 800.0, 600.0, false);
	field.start().unwrap();
	assert!(!field.is_running());
	assert_eq!(clock.queued(), 0);

	field.set_visible(true).unwrap();
	assert!(field.is_running());
	assert_eq!(clock.queued(), 1);

	let frames = clock.advance(&mut field, 16.0);
	assert_eq!(frames.len(), 1);
	assert_eq!(frames[0].circles().count(), 53);
	assert_eq!(clock.queued(), 1, "each frame schedules exactly one successor");
}

#[test]
fn starfield_runs_without_visibility_flag() {
	let (mut field, clock) = controller(FieldMode::Starfield, 800.0, 600.0, false);
	field.start().unwrap();
	assert!(field.is_running());

	let frames = clock.advance(&mut field, 16.0);
	assert_eq!(frames.len(), 1);
	assert_eq!(frames[0].circles().count(), 500);
	assert!(matches!(frames[0].commands()[0], DrawCommand::Fill { .. }));
}

#[test]
fn stop_prevents_any_further_draws() {
	let (mut field, clock) = controller(FieldMode::Network, 800.0, 600.0, true);
	field.start().unwrap();
	assert!(draw_calls(&clock.advance(&mut field, 16.0)) > 0);

	field.stop();
	assert_eq!(clock.queued(), 0);
	assert_eq!(clock.inner.borrow().cancelled, 1);

	let mut after_stop = Vec::new();
	for step in 0..10 {
		after_stop.extend(clock.advance(&mut field, 32.0 + step as f64 * 16.0));
	}
	assert_eq!(draw_calls(&after_stop), 0);
}

#[test]
fn frame_already_dispatched_before_stop_is_voided() {
	let (mut field, clock) = controller(FieldMode::Starfield, 800.0, 600.0, true);
	field.start().unwrap();
	field.stop();

	// The host raced and delivered the old callback anyway.
	let frame = field.frame(Some(16.0)).unwrap();
	assert!(frame.is_none());
	assert_eq!(clock.queued(), 0);
	assert_eq!(field.frame_loop().frames(), 0);
}

#[test]
fn hidden_page_pauses_and_resumes() {
	let (mut field, clock) = controller(FieldMode::Starfield, 640.0, 480.0, true);
	field.start().unwrap();

	field.set_page_hidden(true).unwrap();
	assert!(!field.is_running());
	assert!(clock.advance(&mut field, 16.0).is_empty());

	field.set_page_hidden(false).unwrap();
	assert!(field.is_running());
	assert_eq!(clock.advance(&mut field, 32.0).len(), 1);
}

#[test]
fn field_bound_in_background_tab_waits_until_shown() {
	let (mut field, clock) = controller(FieldMode::Starfield, 800.0, 600.0, true);
	field.set_page_hidden(true).unwrap();
	field.start().unwrap();
	assert!(!field.is_running());
	assert_eq!(clock.queued(), 0);
	assert!(clock.advance(&mut field, 16.0).is_empty());

	field.set_page_hidden(false).unwrap();
	assert!(field.is_running());
	assert_eq!(clock.advance(&mut field, 32.0).len(), 1);
}

#[test]
fn invalid_config_is_rejected_before_binding() {
	let mut config = FieldConfig {
		mode: FieldMode::Starfield,
		..Default::default()
	};
	config.starfield.speed = -1.0;
	assert!(matches!(
		config.validate(),
		Err(FieldError::InvalidConfig { field: "starfield.speed", .. })
	));
}

#[test]
fn hiding_network_view_stops_loop() {
	let (mut field, clock) = controller(FieldMode::Network, 640.0, 480.0, true);
	field.start().unwrap();
	field.set_visible(false).unwrap();
	assert!(!field.is_running());
	assert_eq!(clock.queued(), 0);
}

#[test]
fn resize_reseeds_whole_set() {
	let (mut field, clock) = controller(FieldMode::Network, 800.0, 600.0, true);
	field.start().unwrap();
	for step in 0..5 {
		clock.advance(&mut field, step as f64 * 16.0);
	}
	let generation = field.state().generation();

	field.resize(400.0, 300.0);

	let state = field.state();
	assert_eq!(state.generation(), generation + 1);
	assert_eq!(state.pointer().radius, 18.75);
	assert_eq!(state.particle_count(), 13);
	let Particles::Network(particles) = state.particles() else {
		panic!("expected network particles");
	};
	let center = Surface::new(400.0, 300.0).center();
	assert!(particles.iter().all(|p| p.position == center));
	assert!(field.is_running(), "resize does not interrupt the loop");
}

#[test]
fn zero_size_surface_ticks_without_drawing() {
	for mode in [FieldMode::Network, FieldMode::Starfield] {
		let (mut field, clock) = controller(mode, 0.0, 0.0, true);
		field.pointer_moved(0.0, 0.0);
		field.start().unwrap();
		assert_eq!(field.state().particle_count(), 0);
		for step in 0..3 {
			let frames = clock.advance(&mut field, step as f64 * 16.0);
			assert_eq!(frames.len(), 1);
			assert_eq!(draw_calls(&frames), 0);
		}
	}
}

#[test]
fn starfield_depth_stays_in_range() {
	let (mut field, clock) = controller(FieldMode::Starfield, 320.0, 200.0, true);
	field.start().unwrap();
	for step in 0..1000 {
		clock.advance(&mut field, step as f64 * 16.0);
		let Particles::Starfield(stars) = field.state().particles() else {
			panic!("expected stars");
		};
		assert_eq!(stars.len(), 500);
		assert!(stars.iter().all(|s| s.depth > 0.0 && s.depth <= 320.0));
	}
}

#[test]
fn pointer_interaction_keeps_particles_finite() {
	let (mut field, clock) = controller(FieldMode::Network, 800.0, 600.0, true);
	field.start().unwrap();
	// Park the pointer on the spawn point, where every particle starts.
	field.pointer_moved(400.0, 300.0);
	for step in 0..300 {
		let frames = clock.advance(&mut field, step as f64 * 16.0);
		for frame in &frames {
			for command in frame.commands() {
				if let DrawCommand::Circle { center, .. } = command {
					assert!(center.is_finite());
				}
			}
		}
	}
	field.pointer_left();
	assert!(!field.state().pointer().is_present());
}

#[test]
fn network_links_never_exceed_threshold() {
	let (mut field, clock) = controller(FieldMode::Network, 1280.0, 720.0, true);
	field.start().unwrap();
	// threshold = (1280 / 8) * (720 / 8) = 14400
	for step in 0..120 {
		for frame in clock.advance(&mut field, step as f64 * 16.0) {
			for line in frame.lines() {
				if let DrawCommand::Line { from, to, color, .. } = line {
					assert!(from.distance_squared(*to) < 14400.0);
					assert!(color.a > 0.0 && color.a <= 1.0);
				}
			}
		}
	}
}
