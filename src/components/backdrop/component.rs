//! Leptos component wrapping the particle backdrop.
//!
//! The component sizes a full-viewport canvas, subscribes to window resizes and
//! to the reduced-motion media query, and drives [`BackdropController`] from a
//! `requestAnimationFrame` loop. All listeners and the pending frame are
//! released when the component is cleaned up.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::Style;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MediaQueryListEvent, Window};

use super::events::{
	FrameCallback, Subscription, WindowFrames, reduced_motion_query, window_viewport,
};
use super::glyphs::FloatingGlyphs;
use super::render::Surface;
use super::state::{BackdropController, BackdropMode, MotionGate};
use super::types::{BackdropConfig, Viewport};

const BACKDROP_CSS: &str = include_str!("backdrop.css");

/// Live browser resources for one mount. Dropping it unmounts the backdrop.
struct MountedBackdrop {
	controller: Rc<RefCell<BackdropController<WindowFrames>>>,
	animate: FrameCallback,
	_subscriptions: Vec<Subscription>,
}

impl Drop for MountedBackdrop {
	fn drop(&mut self) {
		self.controller.borrow_mut().unmount();
		// Frame closure must outlive the withdrawn request above.
		self.animate.borrow_mut().take();
	}
}

fn random_seed() -> u64 {
	(js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
	canvas.set_width(viewport.width as u32);
	canvas.set_height(viewport.height as u32);
}

fn mount(
	window: &Window,
	canvas: HtmlCanvasElement,
	config: BackdropConfig,
	seed: u64,
	mode: RwSignal<BackdropMode>,
) -> Option<MountedBackdrop> {
	let viewport = window_viewport(window)?;
	size_canvas(&canvas, viewport);
	let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
	debug!(
		"backdrop: canvas {}x{}, {} particles",
		viewport.width, viewport.height, config.particle_count
	);

	let animate: FrameCallback = Rc::new(RefCell::new(None));
	let controller = Rc::new(RefCell::new(BackdropController::new(
		config,
		WindowFrames::new(window.clone(), animate.clone()),
		seed,
	)));

	let (controller_anim, canvas_anim) = (controller.clone(), canvas.clone());
	*animate.borrow_mut() = Some(Closure::new(move || {
		let surface = canvas_anim.is_connected().then_some(&ctx as &dyn Surface);
		controller_anim
			.borrow_mut()
			.frame(js_sys::Date::now(), surface);
	}));

	let mut subscriptions = Vec::new();

	let query = reduced_motion_query(window);
	if query.is_none() {
		warn!("backdrop: matchMedia unavailable, assuming motion is allowed");
	}
	let reduced = query.as_ref().is_some_and(|q| q.matches());
	if let Some(query) = &query {
		let controller_mq = controller.clone();
		subscriptions.extend(Subscription::listen(query, "change", move |ev: Event| {
			let Ok(ev) = ev.dyn_into::<MediaQueryListEvent>() else {
				return;
			};
			let next = controller_mq.borrow_mut().set_reduced_motion(ev.matches());
			mode.set(next);
		}));
	}

	let (controller_rs, window_rs) = (controller.clone(), window.clone());
	subscriptions.extend(Subscription::listen(window, "resize", move |_| {
		let Some(viewport) = window_viewport(&window_rs) else {
			return;
		};
		size_canvas(&canvas, viewport);
		controller_rs.borrow_mut().resize(viewport);
	}));

	let mounted_mode = controller.borrow_mut().mount(viewport, reduced);
	mode.set(mounted_mode);

	Some(MountedBackdrop {
		controller,
		animate,
		_subscriptions: subscriptions,
	})
}

/// Full-viewport decorative background: an animated particle network with
/// floating tech glyphs, or a static gradient when the user prefers reduced
/// motion.
///
/// `seed` fixes the particle and glyph layout; it is random when omitted.
#[component]
pub fn ParticleBackdrop(
	#[prop(optional, into)] config: Option<BackdropConfig>,
	#[prop(optional)] seed: Option<u64>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let seed = seed.unwrap_or_else(random_seed);
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	let initially_reduced = web_sys::window()
		.and_then(|w| reduced_motion_query(&w))
		.is_some_and(|q| q.matches());
	let mode = RwSignal::new(MotionGate::new(initially_reduced).mode());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(mounted) = mount(&window, canvas.into(), config.clone(), seed, mode) else {
			return;
		};
		let mounted = StoredValue::new_local(Some(mounted));
		on_cleanup(move || {
			let _ = mounted.try_update_value(|m| m.take());
		});
	});

	let animated = move || mode.get() == BackdropMode::Animated;

	view! {
		<Style id="neural-backdrop">{BACKDROP_CSS}</Style>
		<div class="backdrop-root" aria-hidden="true">
			<canvas node_ref=canvas_ref class="backdrop-canvas" hidden=move || !animated() />
			<Show when=animated fallback=|| view! { <div class="backdrop-static"></div> }>
				<FloatingGlyphs seed=seed />
				<div class="backdrop-depth"></div>
			</Show>
		</div>
	}
}
