//! Leptos component wrapping the particle field canvas.
//!
//! The component sizes a canvas to the viewport, binds window listeners for
//! resize, pointer movement and page visibility, and drives the field through
//! `requestAnimationFrame`. Everything it acquires is released in
//! `on_cleanup`: the pending frame is cancelled and every listener removed
//! before the canvas goes away.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, VisibilityState, Window,
};

use super::controller::FieldController;
use super::error::FieldError;
use super::geometry::Surface;
use super::host::{HostBinding, HostEvent};
use super::render;
use super::scheduler::{FrameCallback, RafScheduler};
use super::state::FieldState;
use super::theme::Theme;
use super::types::FieldConfig;

type SharedController = Rc<RefCell<FieldController<RafScheduler>>>;

type Listener = Closure<dyn FnMut(Event)>;

thread_local! {
	// Cleanup callbacks must be Send, so mounted fields are parked here by id.
	static MOUNTED: RefCell<HashMap<u64, MountedField>> = RefCell::new(HashMap::new());
	static NEXT_ID: Cell<u64> = const { Cell::new(0) };
}

fn next_mount_id() -> u64 {
	NEXT_ID.with(|next| {
		let id = next.get();
		next.set(id + 1);
		id
	})
}

/// Drops the field mounted under `id`, if any, outside the registry borrow.
fn unmount(id: u64) {
	let removed = MOUNTED.with(|mounted| mounted.borrow_mut().remove(&id));
	if removed.is_some() {
		debug!("particle-field: unmounted field {id}");
	}
	drop(removed);
}

fn viewport_size(window: &Window) -> (f64, f64) {
	let read = |value: Result<JsValue, JsValue>| value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(read(window.inner_width()), read(window.inner_height()))
}

fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);
}

/// A field bound to a live canvas. Dropping it stops the loop and unbinds.
struct MountedField {
	controller: SharedController,
	frame_callback: FrameCallback,
	binding: Option<HostBinding<Window>>,
}

impl MountedField {
	/// Binds a field to `canvas`. A missing canvas is not an error: nothing is bound.
	fn bind(
		canvas: Option<HtmlCanvasElement>,
		config: FieldConfig,
		visible: bool,
	) -> Result<Option<Self>, FieldError> {
		let Some(canvas) = canvas else {
			return Ok(None);
		};
		config.validate()?;
		let window = web_sys::window().ok_or(FieldError::MissingSurface)?;

		let (width, height) = viewport_size(&window);
		fit_canvas(&canvas, width, height);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|e| FieldError::MissingContext(format!("{e:?}")))?
			.ok_or_else(|| FieldError::MissingContext("canvas has no 2d context".into()))?
			.dyn_into()
			.map_err(|_| FieldError::MissingContext("context is not 2d".into()))?;

		let seed = config.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
		let state = FieldState::new(config, Theme::default(), Surface::new(width, height), seed);

		let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
		let scheduler = RafScheduler::new(window.clone(), frame_callback.clone());
		let controller = Rc::new(RefCell::new(FieldController::new(state, scheduler, visible)));

		let controller_anim = controller.clone();
		*frame_callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			let result = controller_anim.borrow_mut().frame(Some(timestamp));
			match result {
				Ok(Some(frame)) => render::render(&frame, &ctx),
				Ok(None) => {}
				Err(e) => warn!("particle-field: {e}"),
			}
		}));

		let mut mounted = Self {
			controller: controller.clone(),
			frame_callback,
			binding: None,
		};
		// A tab opened in the background fires no visibilitychange until shown.
		let hidden = page_hidden(&window);
		mounted.binding = Some(HostBinding::bind(window, listeners(&controller, &canvas))?);

		// Applying the page gate starts the loop when the field may run.
		let started = mounted.controller.borrow_mut().set_page_hidden(hidden);
		started?;

		info!(
			"particle-field: bound {:?} field to {}x{} canvas",
			controller.borrow().state().mode(),
			width,
			height
		);
		Ok(Some(mounted))
	}

	fn set_visible(&self, visible: bool) {
		let result = self.controller.borrow_mut().set_visible(visible);
		if let Err(e) = result {
			warn!("particle-field: {e}");
		}
	}

	fn teardown(&mut self) {
		if let Some(mut binding) = self.binding.take() {
			binding.unbind();
		}
		self.controller.borrow_mut().stop();
		// Breaks the controller <-> callback cycle.
		self.frame_callback.borrow_mut().take();
	}
}

impl Drop for MountedField {
	fn drop(&mut self) {
		self.teardown();
	}
}

fn page_hidden(window: &Window) -> bool {
	window
		.document()
		.is_some_and(|d| d.visibility_state() == VisibilityState::Hidden)
}

fn listeners(controller: &SharedController, canvas: &HtmlCanvasElement) -> Vec<(HostEvent, Listener)> {
	let on_resize: Listener = {
		let (controller, canvas) = (controller.clone(), canvas.clone());
		Closure::new(move |_: Event| {
			let Some(window) = web_sys::window() else {
				return;
			};
			let (width, height) = viewport_size(&window);
			fit_canvas(&canvas, width, height);
			controller.borrow_mut().resize(width, height);
		})
	};

	let on_pointer_move: Listener = {
		let controller = controller.clone();
		Closure::new(move |ev: Event| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				controller
					.borrow_mut()
					.pointer_moved(ev.client_x() as f64, ev.client_y() as f64);
			}
		})
	};

	let on_pointer_leave: Listener = {
		let controller = controller.clone();
		Closure::new(move |_: Event| {
			controller.borrow_mut().pointer_left();
		})
	};

	let on_visibility: Listener = {
		let controller = controller.clone();
		Closure::new(move |_: Event| {
			let hidden = web_sys::window().is_some_and(|w| page_hidden(&w));
			let result = controller.borrow_mut().set_page_hidden(hidden);
			if let Err(e) = result {
				warn!("particle-field: {e}");
			}
		})
	};

	vec![
		(HostEvent::Resize, on_resize),
		(HostEvent::PointerMove, on_pointer_move),
		(HostEvent::PointerLeave, on_pointer_leave),
		(HostEvent::Visibility, on_visibility),
	]
}

/// Renders an animated particle backdrop on a full-viewport canvas.
///
/// `config` picks the backdrop (network or starfield) and its tuning. The
/// network backdrop only animates while `visible` is true; the starfield
/// animates as soon as it mounts. Both pause while the browser tab is hidden.
#[component]
pub fn ParticleFieldCanvas(
	/// Backdrop selection and tuning.
	#[prop(optional)]
	config: FieldConfig,
	/// Whether the owning view is on screen.
	#[prop(into, default = Signal::stored(true))]
	visible: Signal<bool>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let id = next_mount_id();

	Effect::new(move |_| {
		let canvas: Option<HtmlCanvasElement> = canvas_ref.get().map(|c| c.into());
		// Rebinding requires the previous binding to be released first.
		unmount(id);
		match MountedField::bind(canvas, config.clone(), visible.get_untracked()) {
			Ok(Some(field)) => {
				MOUNTED.with(|mounted| mounted.borrow_mut().insert(id, field));
			}
			Ok(None) => debug!("particle-field: canvas not mounted yet"),
			Err(e) => warn!("particle-field: bind failed: {e}"),
		}
	});

	Effect::new(move |_| {
		let visible = visible.get();
		MOUNTED.with(|mounted| {
			if let Some(field) = mounted.borrow().get(&id) {
				field.set_visible(visible);
			}
		});
	});

	on_cleanup(move || unmount(id));

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			style="position: absolute; top: 0; left: 0; width: 100%; height: 100%; z-index: 1;"
		/>
	}
}
