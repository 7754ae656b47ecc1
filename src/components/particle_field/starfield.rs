//! Depth-parallax motion model (the "starfield" backdrop).
//!
//! Each star keeps a fixed surface position and a depth that shrinks every
//! tick. Rendering projects the star outward from the center by `width / depth`,
//! so stars spread and grow as they approach. A star that passes the camera
//! plane is sent back to far depth at a fresh random position.

use glam::DVec2;

use super::draw::{DrawCommand, Frame};
use super::geometry::Surface;
use super::rng::FieldRng;
use super::theme::StarfieldStyle;
use super::types::StarfieldConfig;

/// Depth below which a star is recycled.
const CAMERA_PLANE: f64 = 1.0;

/// Largest projected radius, reached as depth approaches zero.
const MAX_RADIUS: f64 = 2.0;

/// A single star. `depth` stays in `(0, surface.width]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	/// Offset from the surface center at depth equal to width.
	pub position: DVec2,
	/// Distance from the camera.
	pub depth: f64,
}

/// A star projected to screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
	/// Screen position.
	pub center: DVec2,
	/// Screen radius, larger for nearer stars.
	pub radius: f64,
}

/// Star count for a surface: fixed by config, zero only for an empty surface.
pub fn star_count(surface: &Surface, config: &StarfieldConfig) -> usize {
	if surface.is_empty() { 0 } else { config.count }
}

/// Seeds `count` stars uniformly over the surface and depth range.
pub fn seed(surface: &Surface, count: usize, rng: &mut FieldRng) -> Vec<Star> {
	if surface.is_empty() {
		return Vec::new();
	}
	(0..count).map(|_| Star::spawn(surface, rng)).collect()
}

impl Star {
	/// Random star somewhere in the view volume.
	pub fn spawn(surface: &Surface, rng: &mut FieldRng) -> Self {
		let position = DVec2::new(rng.unit() * surface.width, rng.unit() * surface.height);
		Self {
			position,
			depth: rng.open_unit() * surface.width,
		}
	}

	/// Moves the star `speed` closer; recycles it once it crosses the camera plane.
	pub fn update(&mut self, surface: &Surface, speed: f64, rng: &mut FieldRng) {
		self.depth -= speed;
		if self.depth < CAMERA_PLANE {
			self.recycle(surface, rng);
		}
	}

	fn recycle(&mut self, surface: &Surface, rng: &mut FieldRng) {
		self.depth = surface.width;
		self.position = DVec2::new(rng.unit() * surface.width, rng.unit() * surface.height);
	}

	/// Perspective projection. Both axes scale by `width / depth`.
	pub fn project(&self, surface: &Surface) -> Option<Projection> {
		if surface.is_empty() || self.depth <= 0.0 {
			return None;
		}
		let scale = surface.width / self.depth;
		let center = surface.center();
		Some(Projection {
			center: (self.position - center) * scale + center,
			radius: ((1.0 - self.depth / surface.width) * MAX_RADIUS).max(0.0),
		})
	}

	/// Appends this star as one circle.
	pub fn draw(&self, surface: &Surface, style: &StarfieldStyle, frame: &mut Frame) {
		if let Some(projection) = self.project(surface) {
			frame.push(DrawCommand::Circle {
				center: projection.center,
				radius: projection.radius,
				color: style.star_color,
				glow: None,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_star_count_fixed() {
		let config = StarfieldConfig::default();
		assert_eq!(star_count(&Surface::new(320.0, 200.0), &config), 500);
		assert_eq!(star_count(&Surface::new(3840.0, 2160.0), &config), 500);
		assert_eq!(star_count(&Surface::new(0.0, 2160.0), &config), 0);
	}

	#[test]
	fn test_seed_within_bounds() {
		let surface = Surface::new(640.0, 480.0);
		let mut rng = FieldRng::new(11);
		let stars = seed(&surface, 500, &mut rng);
		assert_eq!(stars.len(), 500);
		for star in &stars {
			assert!(star.depth > 0.0 && star.depth <= 640.0);
			assert!((0.0..640.0).contains(&star.position.x));
			assert!((0.0..480.0).contains(&star.position.y));
		}
	}

	#[test]
	fn test_depth_invariant_holds_over_time() {
		let surface = Surface::new(320.0, 200.0);
		let mut rng = FieldRng::new(5);
		let mut stars = seed(&surface, 200, &mut rng);
		for _ in 0..2000 {
			for star in &mut stars {
				star.update(&surface, 0.5, &mut rng);
				assert!(star.depth > 0.0 && star.depth <= 320.0);
			}
		}
	}

	#[test]
	fn test_recycle_below_camera_plane() {
		let surface = Surface::new(300.0, 200.0);
		let mut rng = FieldRng::new(2);

		let mut star = Star {
			position: DVec2::new(10.0, 10.0),
			depth: 1.5,
		};
		star.update(&surface, 0.5, &mut rng);
		assert_eq!(star.depth, 1.0);

		star.update(&surface, 0.5, &mut rng);
		assert_eq!(star.depth, 300.0);
		assert!((0.0..300.0).contains(&star.position.x));
	}

	#[test]
	fn test_projection_uses_width_for_both_axes() {
		let surface = Surface::new(400.0, 200.0);
		let star = Star {
			position: DVec2::new(300.0, 150.0),
			depth: 200.0,
		};
		let p = star.project(&surface).unwrap();
		// scale = 400 / 200 = 2
		assert_eq!(p.center, DVec2::new(400.0, 200.0));
		assert_eq!(p.radius, 1.0);

		let far = Star {
			position: DVec2::new(300.0, 150.0),
			depth: 400.0,
		};
		let p = far.project(&surface).unwrap();
		assert_eq!(p.center, DVec2::new(300.0, 150.0));
		assert_eq!(p.radius, 0.0);
	}

	#[test]
	fn test_projection_guards_degenerate_depth() {
		let surface = Surface::new(400.0, 200.0);
		let star = Star {
			position: DVec2::new(1.0, 1.0),
			depth: 0.0,
		};
		assert!(star.project(&surface).is_none());
		assert!(star.project(&Surface::new(0.0, 0.0)).is_none());
	}
}
