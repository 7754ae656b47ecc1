//! Field simulation state.
//!
//! Owns the surface, the pointer, the active model's particle store and the
//! random source. `tick` is a pure step over that state: it mutates the
//! particles and returns the frame to draw, without touching any canvas.

use log::info;

use super::draw::{DrawCommand, Frame};
use super::geometry::{Pointer, Surface};
use super::network::{self, NetworkParticle};
use super::rng::FieldRng;
use super::starfield::{self, Star};
use super::theme::Theme;
use super::types::{FieldConfig, FieldMode};

/// Particle store for whichever model is active.
#[derive(Clone, Debug, PartialEq)]
pub enum Particles {
	/// Linked particles of the network model.
	Network(Vec<NetworkParticle>),
	/// Stars of the starfield model.
	Starfield(Vec<Star>),
}

impl Particles {
	fn empty(mode: FieldMode) -> Self {
		match mode {
			FieldMode::Network => Particles::Network(Vec::new()),
			FieldMode::Starfield => Particles::Starfield(Vec::new()),
		}
	}

	/// Number of particles or stars.
	pub fn len(&self) -> usize {
		match self {
			Particles::Network(p) => p.len(),
			Particles::Starfield(s) => s.len(),
		}
	}

	/// True when nothing is seeded.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// Core field state: mutated each frame by the animation loop.
pub struct FieldState {
	config: FieldConfig,
	theme: Theme,
	surface: Surface,
	pointer: Pointer,
	particles: Particles,
	rng: FieldRng,
	/// Bumped on every reseed; particles from older generations are gone.
	generation: u64,
	last_timestamp: Option<f64>,
}

impl FieldState {
	/// Builds the state and seeds it for `surface`.
	pub fn new(config: FieldConfig, theme: Theme, surface: Surface, seed: u64) -> Self {
		let mode = config.mode;
		let mut state = Self {
			config,
			theme,
			surface: Surface::default(),
			pointer: Pointer::default(),
			particles: Particles::empty(mode),
			rng: FieldRng::new(seed),
			generation: 0,
			last_timestamp: None,
		};
		state.resize(surface.width, surface.height);
		state
	}

	/// Active model.
	pub fn mode(&self) -> FieldMode {
		self.config.mode
	}

	/// Configuration in effect.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Current surface size.
	pub fn surface(&self) -> Surface {
		self.surface
	}

	/// Current pointer.
	pub fn pointer(&self) -> Pointer {
		self.pointer
	}

	/// Seeded particles.
	pub fn particles(&self) -> &Particles {
		&self.particles
	}

	/// Number of seeded particles.
	pub fn particle_count(&self) -> usize {
		self.particles.len()
	}

	/// Bumped on every reseed.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Timestamp of the latest tick, if any.
	pub fn last_timestamp(&self) -> Option<f64> {
		self.last_timestamp
	}

	/// Adopts new surface dimensions, recomputes the pointer radius and reseeds.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.surface = Surface::new(width, height);
		self.pointer.radius = self
			.surface
			.pointer_radius(self.config.network.pointer_divisor);
		self.seed();
	}

	/// Reseeds with the mode's default count for the current surface.
	pub fn seed(&mut self) {
		let count = match self.config.mode {
			FieldMode::Network => network::particle_count(&self.surface, &self.config.network),
			FieldMode::Starfield => starfield::star_count(&self.surface, &self.config.starfield),
		};
		self.seed_with(count);
	}

	/// Replaces the whole particle set with `count` fresh particles.
	pub fn seed_with(&mut self, count: usize) {
		let count = if self.surface.is_empty() { 0 } else { count };
		self.particles = match self.config.mode {
			FieldMode::Network => Particles::Network(network::seed(
				&self.surface,
				&self.config.network,
				count,
				&mut self.rng,
			)),
			FieldMode::Starfield => {
				Particles::Starfield(starfield::seed(&self.surface, count, &mut self.rng))
			}
		};
		self.generation += 1;
		info!(
			"particle-field: seeded {} particles for {}x{} (generation {})",
			self.particles.len(),
			self.surface.width,
			self.surface.height,
			self.generation
		);
	}

	/// Moves the pointer.
	pub fn set_pointer(&mut self, x: f64, y: f64) {
		self.pointer.move_to(x, y);
	}

	/// Removes the pointer.
	pub fn clear_pointer(&mut self) {
		self.pointer.leave();
	}

	/// Advances every particle one step and returns the frame to draw.
	///
	/// Per particle: update, then draw, in store order. The network model's
	/// connective pass runs only after the whole set has moved. An empty
	/// surface yields an empty frame.
	pub fn tick(&mut self, timestamp: Option<f64>) -> Frame {
		self.last_timestamp = timestamp.or(self.last_timestamp);
		if self.surface.is_empty() {
			return Frame::default();
		}

		let Self {
			config,
			theme,
			surface,
			pointer,
			particles,
			rng,
			..
		} = self;

		match particles {
			Particles::Network(particles) => {
				let mut frame = Frame::with_capacity(1 + particles.len() * 4);
				frame.push(DrawCommand::Clear {
					width: surface.width,
					height: surface.height,
				});
				for particle in particles.iter_mut() {
					particle.update(surface, pointer, &config.network);
					particle.draw(&mut frame, &theme.network, config.network.pulse_step);
				}
				network::connect(particles, surface, &config.network, &theme.network, &mut frame);
				frame
			}
			Particles::Starfield(stars) => {
				let mut frame = Frame::with_capacity(1 + stars.len());
				frame.push(DrawCommand::Fill {
					width: surface.width,
					height: surface.height,
					color: theme.starfield.background,
				});
				for star in stars.iter_mut() {
					star.update(surface, config.starfield.speed, rng);
					star.draw(surface, &theme.starfield, &mut frame);
				}
				frame
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn network_state(width: f64, height: f64) -> FieldState {
		FieldState::new(
			FieldConfig::default(),
			Theme::default(),
			Surface::new(width, height),
			17,
		)
	}

	fn starfield_state(width: f64, height: f64) -> FieldState {
		let config = FieldConfig {
			mode: FieldMode::Starfield,
			..Default::default()
		};
		FieldState::new(config, Theme::default(), Surface::new(width, height), 17)
	}

	#[test]
	fn test_network_seed_count() {
		assert_eq!(network_state(320.0, 200.0).particle_count(), 7);
		assert_eq!(network_state(1920.0, 1080.0).particle_count(), 150);
	}

	#[test]
	fn test_starfield_seed_count() {
		assert_eq!(starfield_state(320.0, 200.0).particle_count(), 500);
		assert_eq!(starfield_state(2560.0, 1440.0).particle_count(), 500);
	}

	#[test]
	fn test_resize_reseeds_and_recomputes_radius() {
		let mut state = network_state(800.0, 600.0);
		assert_eq!(state.particle_count(), 53);
		assert_eq!(state.pointer().radius, 75.0);
		let generation = state.generation();

		for _ in 0..10 {
			state.tick(None);
		}
		state.resize(400.0, 300.0);

		assert_eq!(state.generation(), generation + 1);
		assert_eq!(state.pointer().radius, 18.75);
		assert_eq!(state.particle_count(), 13);
		let Particles::Network(particles) = state.particles() else {
			panic!("expected network particles");
		};
		assert!(particles.iter().all(|p| p.position == state.surface().center()));
	}

	#[test]
	fn test_zero_surface_is_noop() {
		for mut state in [network_state(0.0, 0.0), starfield_state(0.0, 600.0)] {
			assert_eq!(state.particle_count(), 0);
			assert_eq!(state.pointer().radius, 0.0);
			state.set_pointer(0.0, 0.0);
			assert!(state.tick(Some(16.0)).is_empty());
		}
	}

	#[test]
	fn test_network_frame_layout() {
		let mut state = network_state(320.0, 200.0);
		let frame = state.tick(Some(1.0));
		assert!(matches!(frame.commands()[0], DrawCommand::Clear { .. }));
		assert_eq!(frame.circles().count(), 7);
		// Lines only ever follow the last circle.
		let first_line = frame
			.commands()
			.iter()
			.position(|c| matches!(c, DrawCommand::Line { .. }));
		if let Some(first_line) = first_line {
			assert!(frame.commands()[first_line..]
				.iter()
				.all(|c| matches!(c, DrawCommand::Line { .. })));
		}
		assert_eq!(state.last_timestamp(), Some(1.0));
	}

	#[test]
	fn test_starfield_frame_layout() {
		let mut state = starfield_state(640.0, 480.0);
		let frame = state.tick(None);
		assert_eq!(frame.len(), 501);
		assert!(matches!(
			frame.commands()[0],
			DrawCommand::Fill { color, .. } if color == Theme::default().starfield.background
		));
		assert_eq!(frame.circles().count(), 500);
	}

	#[test]
	fn test_pointer_clears() {
		let mut state = network_state(800.0, 600.0);
		state.set_pointer(10.0, 20.0);
		assert!(state.pointer().is_present());
		state.clear_pointer();
		assert!(!state.pointer().is_present());
		assert_eq!(state.pointer().radius, 75.0);
	}

	#[test]
	fn test_particles_stay_finite_under_pointer() {
		let mut state = network_state(800.0, 600.0);
		state.set_pointer(400.0, 300.0);
		for _ in 0..500 {
			state.tick(None);
		}
		let Particles::Network(particles) = state.particles() else {
			unreachable!()
		};
		assert!(particles
			.iter()
			.all(|p| p.position.is_finite() && p.velocity.is_finite()));
	}
}
