//! Seedable random source for particle spawning.

use std::f64::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Random numbers for seeding and recycling particles.
///
/// The host seeds it from the wall clock; tests pin a seed for reproducible runs.
#[derive(Clone, Debug)]
pub struct FieldRng {
	rng: SmallRng,
}

impl FieldRng {
	/// Deterministic generator for `seed`.
	pub fn new(seed: u64) -> Self {
		Self {
			rng: SmallRng::seed_from_u64(seed),
		}
	}

	/// Uniform in `[0, 1)`.
	pub fn unit(&mut self) -> f64 {
		self.rng.r#gen::<f64>()
	}

	/// Uniform in `(0, 1]`.
	pub fn open_unit(&mut self) -> f64 {
		1.0 - self.unit()
	}

	/// Uniform in `[min, max)`, or `min` when the range is empty.
	pub fn range(&mut self, min: f64, max: f64) -> f64 {
		if max <= min {
			return min;
		}
		min + self.unit() * (max - min)
	}

	/// Uniform angle in radians.
	pub fn angle(&mut self) -> f64 {
		self.unit() * TAU
	}
}
