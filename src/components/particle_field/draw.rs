//! Draw commands produced by one tick of the field.
//!
//! A tick never touches the canvas directly. It appends commands to a [`Frame`],
//! which the renderer replays onto the real surface. Tests inspect frames instead.

use glam::DVec2;

use super::theme::Color;

/// Canvas shadow used as a soft glow behind a circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow {
	/// Shadow color.
	pub color: Color,
	/// Shadow blur in pixels.
	pub blur: f64,
}

/// A single drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	/// Clear the whole surface to transparent.
	Clear {
		/// Width of the cleared area.
		width: f64,
		/// Height of the cleared area.
		height: f64,
	},
	/// Paint the whole surface with an opaque color.
	Fill {
		/// Width of the painted area.
		width: f64,
		/// Height of the painted area.
		height: f64,
		/// Paint color.
		color: Color,
	},
	/// Filled circle, optionally with a glow.
	Circle {
		/// Center in surface pixels.
		center: DVec2,
		/// Radius in pixels.
		radius: f64,
		/// Fill color.
		color: Color,
		/// Shadow behind the circle, if any.
		glow: Option<Glow>,
	},
	/// Straight stroke between two points, without glow.
	Line {
		/// Start point.
		from: DVec2,
		/// End point.
		to: DVec2,
		/// Stroke color.
		color: Color,
		/// Stroke width in pixels.
		width: f64,
	},
}

/// Ordered draw commands for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	commands: Vec<DrawCommand>,
}

impl Frame {
	/// Empty frame with room for `capacity` commands.
	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			commands: Vec::with_capacity(capacity),
		}
	}

	/// Appends a command.
	pub fn push(&mut self, command: DrawCommand) {
		self.commands.push(command);
	}

	/// Commands in draw order.
	pub fn commands(&self) -> &[DrawCommand] {
		&self.commands
	}

	/// Number of commands.
	pub fn len(&self) -> usize {
		self.commands.len()
	}

	/// True when nothing would be drawn.
	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	/// Only the circle commands.
	pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
		self.commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Circle { .. }))
	}

	/// Only the line commands.
	pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
		self.commands
			.iter()
			.filter(|c| matches!(c, DrawCommand::Line { .. }))
	}
}
