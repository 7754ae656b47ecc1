//! Host event listeners held as a scoped resource.
//!
//! [`HostBinding`] registers one listener per [`HostEvent`] kind and owns the
//! handles. `unbind` releases them and may be called any number of times;
//! dropping the binding releases them too. A `bind` that fails part way
//! releases whatever it had already registered before returning the error.

use std::fmt;

use wasm_bindgen::prelude::*;
use web_sys::{Event, Window};

use super::error::FieldError;

/// Event kinds the field listens for on its host window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HostEvent {
	/// Viewport resized.
	Resize,
	/// Pointer moved over the page.
	PointerMove,
	/// Pointer left the page.
	PointerLeave,
	/// Page visibility (tab hidden or shown).
	Visibility,
}

impl HostEvent {
	/// DOM event type name.
	pub const fn dom_name(self) -> &'static str {
		match self {
			HostEvent::Resize => "resize",
			HostEvent::PointerMove => "mousemove",
			HostEvent::PointerLeave => "mouseout",
			HostEvent::Visibility => "visibilitychange",
		}
	}
}

impl fmt::Display for HostEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.dom_name())
	}
}

/// Something listeners can be attached to.
pub trait EventHost {
	/// Host-side handle for one callback.
	type Listener;

	/// Attaches `listener` for `event`.
	fn add_listener(&self, event: HostEvent, listener: &Self::Listener) -> Result<(), FieldError>;

	/// Detaches a listener previously attached for `event`.
	fn remove_listener(&self, event: HostEvent, listener: &Self::Listener);
}

/// Listeners registered on a host, released on `unbind` or drop.
pub struct HostBinding<H: EventHost> {
	host: H,
	listeners: Vec<(HostEvent, H::Listener)>,
}

impl<H: EventHost> HostBinding<H> {
	/// Registers every listener, at most one per event kind.
	pub fn bind(
		host: H,
		listeners: impl IntoIterator<Item = (HostEvent, H::Listener)>,
	) -> Result<Self, FieldError> {
		let mut binding = Self {
			host,
			listeners: Vec::new(),
		};
		for (event, listener) in listeners {
			if binding.listeners.iter().any(|(bound, _)| *bound == event) {
				return Err(FieldError::DuplicateListener(event));
			}
			binding.host.add_listener(event, &listener)?;
			binding.listeners.push((event, listener));
		}
		Ok(binding)
	}

	/// Whether listeners are still attached.
	pub fn is_bound(&self) -> bool {
		!self.listeners.is_empty()
	}

	/// Event kinds currently bound.
	pub fn events(&self) -> impl Iterator<Item = HostEvent> + '_ {
		self.listeners.iter().map(|(event, _)| *event)
	}

	/// The host the listeners are attached to.
	pub fn host(&self) -> &H {
		&self.host
	}

	/// Removes every registered listener. Safe to call repeatedly.
	pub fn unbind(&mut self) {
		for (event, listener) in self.listeners.drain(..) {
			self.host.remove_listener(event, &listener);
		}
	}
}

impl<H: EventHost> Drop for HostBinding<H> {
	fn drop(&mut self) {
		self.unbind();
	}
}

impl EventHost for Window {
	type Listener = Closure<dyn FnMut(Event)>;

	fn add_listener(&self, event: HostEvent, listener: &Self::Listener) -> Result<(), FieldError> {
		self.add_event_listener_with_callback(event.dom_name(), listener.as_ref().unchecked_ref())
			.map_err(|e| FieldError::Listener {
				event,
				reason: format!("{e:?}"),
			})
	}

	fn remove_listener(&self, event: HostEvent, listener: &Self::Listener) {
		let _ = self.remove_event_listener_with_callback(
			event.dom_name(),
			listener.as_ref().unchecked_ref(),
		);
	}
}
