//! Surface and pointer geometry shared by both motion models.

use glam::DVec2;

/// The 2D drawing target, in pixels.
///
/// All coordinate math in the field reads its bounds from here. A surface with
/// a zero (or non-finite) side is "empty": it holds no particles and draws nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Surface {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl Surface {
	/// Surface of the given size.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// True when the surface cannot hold anything (zero, negative or NaN side).
	pub fn is_empty(&self) -> bool {
		!(self.width > 0.0 && self.height > 0.0)
	}

	/// Pixel area, zero for an empty surface.
	pub fn area(&self) -> f64 {
		if self.is_empty() {
			0.0
		} else {
			self.width * self.height
		}
	}

	/// Midpoint of the surface.
	pub fn center(&self) -> DVec2 {
		DVec2::new(self.width / 2.0, self.height / 2.0)
	}

	/// Pointer interaction radius: `(height / divisor) * (width / divisor)`.
	pub fn pointer_radius(&self, divisor: f64) -> f64 {
		if self.is_empty() || divisor <= 0.0 {
			return 0.0;
		}
		(self.height / divisor) * (self.width / divisor)
	}
}

/// Last known pointer position plus the radius it influences.
///
/// `position` is `None` while the pointer is outside the host window.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
	/// Last known position, `None` once the pointer leaves.
	pub position: Option<DVec2>,
	/// Interaction radius in pixels.
	pub radius: f64,
}

impl Pointer {
	/// Records a new pointer position.
	pub fn move_to(&mut self, x: f64, y: f64) {
		self.position = Some(DVec2::new(x, y));
	}

	/// Clears the position.
	pub fn leave(&mut self) {
		self.position = None;
	}

	/// Whether the pointer is over the surface.
	pub fn is_present(&self) -> bool {
		self.position.is_some()
	}
}
