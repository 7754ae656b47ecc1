//! Outward-repulsion motion model (the "neural network" backdrop).
//!
//! Particles burst from the surface center with a random heading, bounce once
//! they drift well past the edges, get pulled toward a nearby pointer, and slow
//! down until their speed settles just under the damping floor. Every frame
//! also links close pairs with lines that fade with squared distance.

use glam::DVec2;

use super::draw::{DrawCommand, Frame, Glow};
use super::geometry::{Pointer, Surface};
use super::rng::FieldRng;
use super::theme::NetworkStyle;
use super::types::NetworkConfig;

/// A single network particle.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkParticle {
	/// Position in surface pixels.
	pub position: DVec2,
	/// Displacement per tick, not a unit direction.
	pub velocity: DVec2,
	/// Drawn radius in pixels.
	pub radius: f64,
	/// Pulse phase in radians
	pub phase: f64,
}

/// Particle count for a surface: `min(max_particles, floor(area / area_per_particle))`.
pub fn particle_count(surface: &Surface, config: &NetworkConfig) -> usize {
	if surface.is_empty() || config.area_per_particle <= 0.0 {
		return 0;
	}
	let count = (surface.area() / config.area_per_particle).floor() as usize;
	count.min(config.max_particles)
}

/// Seeds `count` particles at the surface center.
pub fn seed(
	surface: &Surface,
	config: &NetworkConfig,
	count: usize,
	rng: &mut FieldRng,
) -> Vec<NetworkParticle> {
	(0..count)
		.map(|_| NetworkParticle::spawn(surface, config, rng))
		.collect()
}

impl NetworkParticle {
	/// A particle at the center, launched along a random heading.
	pub fn spawn(surface: &Surface, config: &NetworkConfig, rng: &mut FieldRng) -> Self {
		let radius = rng.range(config.size_min, config.size_max);
		let heading = rng.angle();
		let speed = rng.range(config.speed_min, config.speed_max);
		Self {
			position: surface.center(),
			velocity: DVec2::from_angle(heading) * speed,
			radius,
			phase: rng.angle(),
		}
	}

	/// Advances the particle one tick: bounce, pointer pull, integrate, damp.
	pub fn update(&mut self, surface: &Surface, pointer: &Pointer, config: &NetworkConfig) {
		let margin = self.radius * config.bounce_margin;
		if self.position.x > surface.width + margin || self.position.x < -margin {
			self.velocity.x = -self.velocity.x;
		}
		if self.position.y > surface.height + margin || self.position.y < -margin {
			self.velocity.y = -self.velocity.y;
		}

		if let Some(target) = pointer.position {
			let delta = target - self.position;
			let distance = delta.length();
			// A pointer sitting exactly on the particle has no direction to pull in.
			if distance > 0.0 && distance < pointer.radius + self.radius {
				self.velocity += delta / (distance * config.pointer_force_divisor);
			}
		}

		self.position += self.velocity;

		if self.velocity.x.abs() > config.damping_floor {
			self.velocity.x *= config.damping;
		}
		if self.velocity.y.abs() > config.damping_floor {
			self.velocity.y *= config.damping;
		}
	}

	/// Fill alpha for the current pulse phase, in `[0.4, 0.8]`.
	pub fn pulse_alpha(&self) -> f64 {
		0.6 + 0.2 * self.phase.sin()
	}

	/// Emits the glowing dot and advances the pulse.
	pub fn draw(&mut self, frame: &mut Frame, style: &NetworkStyle, pulse_step: f64) {
		let glow = (style.glow_blur > 0.0).then_some(Glow {
			color: style.glow_color,
			blur: style.glow_blur,
		});
		frame.push(DrawCommand::Circle {
			center: self.position,
			radius: self.radius,
			color: style.color.with_alpha(self.pulse_alpha()),
			glow,
		});
		self.phase += pulse_step;
	}
}

/// Squared-distance threshold under which two particles are linked.
pub fn connection_threshold(surface: &Surface, config: &NetworkConfig) -> f64 {
	if surface.is_empty() || config.connection_divisor <= 0.0 {
		return 0.0;
	}
	(surface.width / config.connection_divisor) * (surface.height / config.connection_divisor)
}

/// Line opacity for a linked pair, `None` when the line would be invisible.
///
/// The raw falloff goes negative well before the link threshold on large
/// surfaces; those lines are skipped rather than stroked.
pub fn connection_opacity(distance_squared: f64, falloff: f64) -> Option<f64> {
	let opacity = (1.0 - distance_squared / falloff).min(1.0);
	(opacity > 0.0).then_some(opacity)
}

/// The connective pass: one line per unordered pair closer than the threshold.
///
/// Must run after every particle in the set has been updated.
pub fn connect(
	particles: &[NetworkParticle],
	surface: &Surface,
	config: &NetworkConfig,
	style: &NetworkStyle,
	frame: &mut Frame,
) {
	let threshold = connection_threshold(surface, config);
	if threshold <= 0.0 {
		return;
	}

	for (i, a) in particles.iter().enumerate() {
		for b in &particles[i + 1..] {
			let distance_squared = a.position.distance_squared(b.position);
			if distance_squared >= threshold {
				continue;
			}
			if let Some(opacity) = connection_opacity(distance_squared, config.connection_falloff)
			{
				frame.push(DrawCommand::Line {
					from: a.position,
					to: b.position,
					color: style.line_color.with_alpha(opacity),
					width: style.line_width,
				});
			}
		}
	}
}
