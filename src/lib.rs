//! neural-backdrop: animated particle-network background for the training hub site.
//!
//! This crate provides a WASM-based decorative layer that renders a drifting
//! particle network on a full-viewport canvas, with floating tech glyphs and a
//! static fallback for users who prefer reduced motion.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::backdrop::{
	BackdropConfig, BackdropController, BackdropMode, FrameHandle, FrameScheduler, LoopState,
	ParticleBackdrop, ParticleField, Surface, Viewport,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("neural-backdrop: logging initialized");
}

/// Parse backdrop settings from JSON such as `{"particleCount": 60}`.
pub fn parse_backdrop_config(json: &str) -> Option<BackdropConfig> {
	match serde_json::from_str::<BackdropConfig>(json) {
		Ok(config) => {
			info!(
				"neural-backdrop: {} particles, connection distance {}",
				config.particle_count, config.connection_distance
			);
			Some(config)
		}
		Err(e) => {
			warn!("neural-backdrop: failed to parse backdrop config: {}", e);
			None
		}
	}
}

/// Load backdrop settings from a script element with id="backdrop-config".
fn load_backdrop_config() -> Option<BackdropConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("backdrop-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;
	parse_backdrop_config(&json_text)
}

/// Main application component.
/// Loads backdrop settings from the DOM and renders the animated background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_backdrop_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="AI Training Hub" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackdrop config=config />
	}
}
