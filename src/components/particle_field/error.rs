//! Error types for the particle field.
//!
//! Geometry never fails: degenerate surfaces and pointers are defined no-ops.
//! These errors come from rejected configuration or from talking to the host
//! (canvas, listeners, frames).

use thiserror::Error;

use super::host::HostEvent;

/// Errors raised while binding to or driving the host surface.
#[derive(Debug, Error)]
pub enum FieldError {
	/// No canvas element was available to draw on.
	#[error("drawing surface is not mounted")]
	MissingSurface,

	/// The canvas refused to hand out a 2D context.
	#[error("2d context unavailable: {0}")]
	MissingContext(String),

	/// Registering a host listener failed.
	#[error("failed to register {event} listener: {reason}")]
	Listener {
		/// Event kind being registered.
		event: HostEvent,
		/// Host-reported failure.
		reason: String,
	},

	/// The same event kind was bound twice in one binding.
	#[error("{0} listener already bound")]
	DuplicateListener(HostEvent),

	/// A configuration value is outside its legal range.
	#[error("invalid config `{field}`: {reason}")]
	InvalidConfig {
		/// Dotted path of the offending field.
		field: &'static str,
		/// The range the value must fall in.
		reason: &'static str,
	},

	/// The host refused to schedule the next frame.
	#[error("failed to schedule frame: {0}")]
	Schedule(String),
}
