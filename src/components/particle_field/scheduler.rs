//! Frame scheduling and loop cancellation.
//!
//! The loop never sleeps or spins. Each frame asks the host for the next one
//! through a [`FrameScheduler`] and keeps the returned handle so `stop` can
//! cancel it. A frame that fires after `stop` (already queued by the host)
//! sees the loop halted and does nothing.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::error::FieldError;

/// Host primitive for "call me on the next frame".
pub trait FrameScheduler {
	/// Token returned by `request`, used to cancel it.
	type Handle;

	/// Asks for one callback on the next frame.
	fn request(&mut self) -> Result<Self::Handle, FieldError>;

	/// Withdraws a request that has not fired yet.
	fn cancel(&mut self, handle: Self::Handle);
}

/// Running flag plus the pending frame handle.
pub struct FrameLoop<S: FrameScheduler> {
	scheduler: S,
	pending: Option<S::Handle>,
	running: bool,
	frames: u64,
}

impl<S: FrameScheduler> FrameLoop<S> {
	/// Stopped loop over `scheduler`.
	pub fn new(scheduler: S) -> Self {
		Self {
			scheduler,
			pending: None,
			running: false,
			frames: 0,
		}
	}

	/// Whether the loop is started.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// Whether a frame is scheduled and not yet fired.
	pub fn has_pending(&self) -> bool {
		self.pending.is_some()
	}

	/// Frames accepted by `begin_frame` so far.
	pub fn frames(&self) -> u64 {
		self.frames
	}

	/// The wrapped scheduler.
	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	/// Starts the loop and schedules the first frame. No-op while running.
	pub fn start(&mut self) -> Result<(), FieldError> {
		if self.running {
			return Ok(());
		}
		self.running = true;
		if let Err(err) = self.schedule() {
			self.running = false;
			return Err(err);
		}
		Ok(())
	}

	/// Halts the loop and cancels the pending frame, if any.
	pub fn stop(&mut self) {
		self.running = false;
		if let Some(handle) = self.pending.take() {
			self.scheduler.cancel(handle);
		}
	}

	/// Called when a scheduled frame fires. Returns `false` if the loop has been
	/// stopped since, in which case the caller must skip the tick.
	pub fn begin_frame(&mut self) -> bool {
		self.pending = None;
		if self.running {
			self.frames += 1;
		}
		self.running
	}

	/// Requests the next frame unless halted or one is already pending.
	pub fn schedule(&mut self) -> Result<(), FieldError> {
		if !self.running || self.pending.is_some() {
			return Ok(());
		}
		let handle = self.scheduler.request()?;
		self.pending = Some(handle);
		Ok(())
	}
}

impl<S: FrameScheduler> Drop for FrameLoop<S> {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Shared slot for the frame callback; the callback is installed after the
/// scheduler exists because it needs a handle to the controller that owns it.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` on the browser window.
pub struct RafScheduler {
	window: Window,
	callback: FrameCallback,
}

impl RafScheduler {
	/// Scheduler that fires `callback` on `window` refreshes.
	pub fn new(window: Window, callback: FrameCallback) -> Self {
		Self { window, callback }
	}
}

impl FrameScheduler for RafScheduler {
	type Handle = i32;

	fn request(&mut self) -> Result<i32, FieldError> {
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return Err(FieldError::Schedule("frame callback not installed".into()));
		};
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.map_err(|e| FieldError::Schedule(format!("{e:?}")))
	}

	fn cancel(&mut self, handle: i32) {
		let _ = self.window.cancel_animation_frame(handle);
	}
}
