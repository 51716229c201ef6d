//! Browser bindings: scoped event listeners and `requestAnimationFrame`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, MediaQueryList, Window};

use super::state::{FrameHandle, FrameScheduler};
use super::types::Viewport;

/// Media query matching the system reduced-motion preference.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// An event listener that is removed when dropped.
pub struct Subscription {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Subscription {
	/// Register `handler` for `event` on `target`. Returns `None` if the
	/// browser rejects the registration.
	pub fn listen(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Option<Self> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
			.ok()?;
		Some(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// Current window inner size, if the window reports one.
pub fn window_viewport(window: &Window) -> Option<Viewport> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some(Viewport::new(width, height))
}

/// The reduced-motion media query list, if the browser supports `matchMedia`.
pub fn reduced_motion_query(window: &Window) -> Option<MediaQueryList> {
	window.match_media(REDUCED_MOTION_QUERY).ok().flatten()
}

/// Callback slot shared between the scheduler and the frame closure it requests.
pub type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// [`FrameScheduler`] backed by `window.requestAnimationFrame`.
pub struct WindowFrames {
	window: Window,
	callback: FrameCallback,
}

impl WindowFrames {
	pub fn new(window: Window, callback: FrameCallback) -> Self {
		Self { window, callback }
	}
}

impl FrameScheduler for WindowFrames {
	fn request_frame(&self) -> Option<FrameHandle> {
		let slot = self.callback.borrow();
		let cb = slot.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
			.map(FrameHandle)
	}

	fn cancel_frame(&self, handle: FrameHandle) {
		let _ = self.window.cancel_animation_frame(handle.0);
	}
}
