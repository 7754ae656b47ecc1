//! Field lifecycle: start, stop, resize and per-frame stepping.
//!
//! [`FieldController`] pairs the simulation state with a [`FrameLoop`] and the
//! visibility gates. The network backdrop only runs once its view is marked
//! visible; both backdrops pause while the page itself is hidden.

use log::debug;

use super::draw::Frame;
use super::error::FieldError;
use super::scheduler::{FrameLoop, FrameScheduler};
use super::state::FieldState;
use super::types::FieldMode;

/// Owns one field and gates its frame loop on visibility.
pub struct FieldController<S: FrameScheduler> {
	state: FieldState,
	frame_loop: FrameLoop<S>,
	visible: bool,
	page_hidden: bool,
}

impl<S: FrameScheduler> FieldController<S> {
	/// Wraps `state` with a halted loop. Call [`start`](Self::start) to run it.
	pub fn new(state: FieldState, scheduler: S, visible: bool) -> Self {
		Self {
			state,
			frame_loop: FrameLoop::new(scheduler),
			visible,
			page_hidden: false,
		}
	}

	/// Current simulation state.
	pub fn state(&self) -> &FieldState {
		&self.state
	}

	/// Mutable simulation state, for reseeding or tests.
	pub fn state_mut(&mut self) -> &mut FieldState {
		&mut self.state
	}

	/// The underlying frame loop.
	pub fn frame_loop(&self) -> &FrameLoop<S> {
		&self.frame_loop
	}

	/// Whether frames are being scheduled.
	pub fn is_running(&self) -> bool {
		self.frame_loop.is_running()
	}

	fn can_run(&self) -> bool {
		let view_visible = self.visible || self.state.mode() == FieldMode::Starfield;
		view_visible && !self.page_hidden
	}

	/// Starts the loop if the visibility gates allow it.
	pub fn start(&mut self) -> Result<(), FieldError> {
		if !self.can_run() {
			debug!("particle-field: start deferred until visible");
			return Ok(());
		}
		if !self.frame_loop.is_running() {
			debug!("particle-field: loop started");
		}
		self.frame_loop.start()
	}

	/// Halts the loop. No tick runs after this returns, even one already queued.
	pub fn stop(&mut self) {
		if self.frame_loop.is_running() {
			debug!("particle-field: loop stopped");
		}
		self.frame_loop.stop();
	}

	fn apply_gates(&mut self) -> Result<(), FieldError> {
		if self.can_run() {
			self.start()
		} else {
			self.stop();
			Ok(())
		}
	}

	/// Marks the owning view visible or not.
	pub fn set_visible(&mut self, visible: bool) -> Result<(), FieldError> {
		self.visible = visible;
		self.apply_gates()
	}

	/// Tracks whether the whole page is hidden (background tab).
	pub fn set_page_hidden(&mut self, hidden: bool) -> Result<(), FieldError> {
		self.page_hidden = hidden;
		self.apply_gates()
	}

	/// Adopts a new surface size and reseeds.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.state.resize(width, height);
	}

	/// Records the pointer position in surface coordinates.
	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		self.state.set_pointer(x, y);
	}

	/// Forgets the pointer until it moves again.
	pub fn pointer_left(&mut self) {
		self.state.clear_pointer();
	}

	/// Handles a fired frame: schedules the next one, then ticks.
	///
	/// Returns `Ok(None)` when the loop was stopped before this frame fired.
	pub fn frame(&mut self, timestamp: Option<f64>) -> Result<Option<Frame>, FieldError> {
		if !self.frame_loop.begin_frame() {
			return Ok(None);
		}
		if let Err(err) = self.frame_loop.schedule() {
			self.frame_loop.stop();
			return Err(err);
		}
		Ok(Some(self.state.tick(timestamp)))
	}
}
