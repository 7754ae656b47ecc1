//! Configuration structures for the particle field.
//!
//! Every field has a default, so a host can supply a partial JSON document
//! (or nothing at all) and get the stock backdrop.

use serde::Deserialize;

use super::error::FieldError;

fn check(field: &'static str, ok: bool, reason: &'static str) -> Result<(), FieldError> {
	if ok {
		Ok(())
	} else {
		Err(FieldError::InvalidConfig { field, reason })
	}
}

fn positive(field: &'static str, value: f64) -> Result<(), FieldError> {
	check(field, value.is_finite() && value > 0.0, "must be finite and > 0")
}

fn non_negative(field: &'static str, value: f64) -> Result<(), FieldError> {
	check(field, value.is_finite() && value >= 0.0, "must be finite and >= 0")
}

/// Which motion law drives the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldMode {
	/// Particles burst from the center, bounce, react to the pointer and link up.
	#[default]
	Network,
	/// Stars fly toward the camera and recycle at far depth.
	Starfield,
}

/// Tuning for the outward-repulsion ("neural network") model.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
	/// Upper bound on the particle count.
	pub max_particles: usize,
	/// Surface area (px²) allotted per particle.
	pub area_per_particle: f64,
	/// Pointer radius is `(h / divisor) * (w / divisor)`.
	pub pointer_divisor: f64,
	/// Bounce margin as a multiple of particle radius.
	pub bounce_margin: f64,
	/// Lower bound of the initial speed range.
	pub speed_min: f64,
	/// Upper bound of the initial speed range.
	pub speed_max: f64,
	/// Smallest particle radius.
	pub size_min: f64,
	/// Largest particle radius.
	pub size_max: f64,
	/// Pointer pull is `delta / (distance * divisor)`.
	pub pointer_force_divisor: f64,
	/// Per-tick velocity multiplier while above `damping_floor`.
	pub damping: f64,
	/// Speed below which damping stops.
	pub damping_floor: f64,
	/// Pulse phase advance per tick, in radians.
	pub pulse_step: f64,
	/// Link threshold is `(w / divisor) * (h / divisor)` in squared pixels.
	pub connection_divisor: f64,
	/// Line opacity is `1 - distance² / falloff`.
	pub connection_falloff: f64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		Self {
			max_particles: 150,
			area_per_particle: 9000.0,
			pointer_divisor: 80.0,
			bounce_margin: 20.0,
			speed_min: 4.0,
			speed_max: 16.0,
			size_min: 1.0,
			size_max: 3.0,
			pointer_force_divisor: 5.0,
			damping: 0.99,
			damping_floor: 0.05,
			pulse_step: 0.01,
			connection_divisor: 8.0,
			connection_falloff: 20000.0,
		}
	}
}

impl NetworkConfig {
	/// Rejects values that would stall, explode or speed up the particles.
	pub fn validate(&self) -> Result<(), FieldError> {
		positive("network.area_per_particle", self.area_per_particle)?;
		positive("network.pointer_divisor", self.pointer_divisor)?;
		non_negative("network.bounce_margin", self.bounce_margin)?;
		non_negative("network.speed_min", self.speed_min)?;
		non_negative("network.speed_max", self.speed_max)?;
		check(
			"network.speed_max",
			self.speed_max >= self.speed_min,
			"must be >= speed_min",
		)?;
		positive("network.size_min", self.size_min)?;
		positive("network.size_max", self.size_max)?;
		check(
			"network.size_max",
			self.size_max >= self.size_min,
			"must be >= size_min",
		)?;
		positive("network.pointer_force_divisor", self.pointer_force_divisor)?;
		check(
			"network.damping",
			self.damping.is_finite() && self.damping > 0.0 && self.damping <= 1.0,
			"must be in (0, 1]",
		)?;
		non_negative("network.damping_floor", self.damping_floor)?;
		check(
			"network.pulse_step",
			self.pulse_step.is_finite(),
			"must be finite",
		)?;
		positive("network.connection_divisor", self.connection_divisor)?;
		positive("network.connection_falloff", self.connection_falloff)
	}
}

/// Tuning for the depth-parallax ("starfield") model.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarfieldConfig {
	/// Fixed star count, independent of surface area.
	pub count: usize,
	/// Depth decrement per tick, in pixels.
	pub speed: f64,
}

impl Default for StarfieldConfig {
	fn default() -> Self {
		Self {
			count: 500,
			speed: 0.5,
		}
	}
}

impl StarfieldConfig {
	/// Depth must shrink every tick or stars never recycle.
	pub fn validate(&self) -> Result<(), FieldError> {
		positive("starfield.speed", self.speed)
	}
}

/// Complete field configuration.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Which backdrop to run.
	pub mode: FieldMode,
	/// Network tuning.
	pub network: NetworkConfig,
	/// Starfield tuning.
	pub starfield: StarfieldConfig,
	/// Fixed RNG seed; the host picks one from the clock when unset.
	pub seed: Option<u64>,
}

impl FieldConfig {
	/// Checks both models' tuning, whichever mode is active.
	pub fn validate(&self) -> Result<(), FieldError> {
		self.network.validate()?;
		self.starfield.validate()
	}
}
