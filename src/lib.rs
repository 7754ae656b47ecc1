//! particle-backdrop: animated particle backdrops for a portfolio site.
//!
//! This crate provides a WASM canvas component with two backdrops: a "neural
//! network" of pointer-reactive linked particles and a perspective starfield.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, FieldMode, ParticleFieldCanvas};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-backdrop: logging initialized");
}

/// Parse a field configuration document, logging and discarding malformed input.
pub fn parse_field_config(json_text: &str) -> Option<FieldConfig> {
	let config = match serde_json::from_str::<FieldConfig>(json_text) {
		Ok(config) => config,
		Err(e) => {
			warn!("particle-backdrop: failed to parse field config: {}", e);
			return None;
		}
	};
	if let Err(e) = config.validate() {
		warn!("particle-backdrop: rejecting field config: {}", e);
		return None;
	}
	info!("particle-backdrop: loaded {:?} field config", config.mode);
	Some(config)
}

/// Load field configuration from a script element with id="field-config".
/// Expected format: JSON matching [`FieldConfig`], every field optional.
fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("field-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	parse_field_config(&json_text)
}

/// Document title for the page hosting a backdrop.
pub fn page_title(mode: FieldMode) -> &'static str {
	match mode {
		FieldMode::Network => "Portfolio",
		FieldMode::Starfield => "About",
	}
}

/// Main application component.
/// Loads field configuration from the DOM and renders the backdrop full screen.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();
	let title = page_title(config.mode);

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text=title />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<main
			class="backdrop"
			style="position: relative; min-height: 100vh; width: 100%; overflow: hidden; background-color: #0a0a0a;"
		>
			<ParticleFieldCanvas config=config />
		</main>
	}
}
