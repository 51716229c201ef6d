//! Frame loop and accessibility state for the backdrop.
//!
//! [`BackdropController`] owns everything that changes over the component's
//! lifetime: the reduced-motion branch, the particle pool and the frame loop.
//! It never touches the DOM itself. Frames are requested through a
//! [`FrameScheduler`] and painted onto whatever [`Surface`] the host hands to
//! [`BackdropController::frame`].

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::particles::ParticleField;
use super::render::{self, Surface};
use super::theme::BackdropTheme;
use super::types::{BackdropConfig, Viewport};

/// Opaque id of a pending frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// Host primitive for per-refresh callbacks.
pub trait FrameScheduler {
	/// Request one callback on the next display refresh.
	fn request_frame(&self) -> Option<FrameHandle>;
	/// Withdraw a previously requested callback.
	fn cancel_frame(&self, handle: FrameHandle);
}

/// Lifecycle of the self-rescheduling frame loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
	Idle,
	Running,
	/// Terminal. No continuation is ever scheduled again.
	Cancelled,
}

/// Tracks the loop state and the single outstanding continuation.
#[derive(Debug)]
pub struct FrameLoop {
	state: LoopState,
	pending: Option<FrameHandle>,
}

impl Default for FrameLoop {
	fn default() -> Self {
		Self {
			state: LoopState::Idle,
			pending: None,
		}
	}
}

impl FrameLoop {
	pub fn state(&self) -> LoopState {
		self.state
	}

	pub fn pending(&self) -> Option<FrameHandle> {
		self.pending
	}

	/// Idle -> Running. Returns false if the loop was not idle.
	pub fn start(&mut self) -> bool {
		if self.state != LoopState::Idle {
			return false;
		}
		self.state = LoopState::Running;
		true
	}

	/// Called at the top of every callback. Consumes the pending continuation
	/// and reports whether the frame should run.
	pub fn enter_frame(&mut self) -> bool {
		self.pending = None;
		self.state == LoopState::Running
	}

	/// Request the next continuation unless one is already outstanding or the
	/// loop is not running.
	pub fn schedule(&mut self, request: impl FnOnce() -> Option<FrameHandle>) {
		if self.state != LoopState::Running || self.pending.is_some() {
			return;
		}
		self.pending = request();
	}

	/// Move to `Cancelled`, handing back any continuation the host must withdraw.
	pub fn cancel(&mut self) -> Option<FrameHandle> {
		self.state = LoopState::Cancelled;
		self.pending.take()
	}
}

/// Which branch the backdrop is rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackdropMode {
	/// Static gradient, no simulation.
	Static,
	/// Live particle network.
	Animated,
}

/// Two-way switch on the reduced-motion preference.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MotionGate {
	reduced: bool,
}

impl MotionGate {
	pub fn new(reduced: bool) -> Self {
		Self { reduced }
	}

	pub fn mode(&self) -> BackdropMode {
		if self.reduced {
			BackdropMode::Static
		} else {
			BackdropMode::Animated
		}
	}

	/// Record a new preference. Returns true if the branch flipped.
	pub fn update(&mut self, reduced: bool) -> bool {
		let flipped = self.reduced != reduced;
		self.reduced = reduced;
		flipped
	}
}

/// Running simulation: a pool plus the loop that drives it.
struct LiveField {
	field: ParticleField,
	frames: FrameLoop,
}

/// Platform-free core of the particle backdrop.
pub struct BackdropController<S: FrameScheduler> {
	config: BackdropConfig,
	theme: BackdropTheme,
	scheduler: S,
	seeds: SmallRng,
	gate: MotionGate,
	viewport: Viewport,
	live: Option<LiveField>,
}

impl<S: FrameScheduler> BackdropController<S> {
	/// `seed` drives every pool this controller ever spawns.
	pub fn new(config: BackdropConfig, scheduler: S, seed: u64) -> Self {
		Self {
			config,
			theme: BackdropTheme::default(),
			scheduler,
			seeds: SmallRng::seed_from_u64(seed),
			gate: MotionGate::new(false),
			viewport: Viewport::default(),
			live: None,
		}
	}

	pub fn config(&self) -> &BackdropConfig {
		&self.config
	}

	pub fn scheduler(&self) -> &S {
		&self.scheduler
	}

	pub fn mode(&self) -> BackdropMode {
		self.gate.mode()
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	/// The live pool, if animating.
	pub fn field(&self) -> Option<&ParticleField> {
		self.live.as_ref().map(|l| &l.field)
	}

	pub fn field_mut(&mut self) -> Option<&mut ParticleField> {
		self.live.as_mut().map(|l| &mut l.field)
	}

	/// Loop state of the live pool, if animating.
	pub fn loop_state(&self) -> Option<LoopState> {
		self.live.as_ref().map(|l| l.frames.state())
	}

	/// First evaluation of the preference at mount time.
	pub fn mount(&mut self, viewport: Viewport, reduced_motion: bool) -> BackdropMode {
		self.viewport = viewport;
		self.gate = MotionGate::new(reduced_motion);
		if self.gate.mode() == BackdropMode::Animated {
			self.start();
		}
		debug!("backdrop: mounted in {:?} mode", self.gate.mode());
		self.gate.mode()
	}

	/// Re-evaluate the branch after a preference change notification.
	pub fn set_reduced_motion(&mut self, reduced: bool) -> BackdropMode {
		if self.gate.update(reduced) {
			match self.gate.mode() {
				BackdropMode::Static => self.stop(),
				BackdropMode::Animated => self.start(),
			}
			debug!("backdrop: switched to {:?} mode", self.gate.mode());
		}
		self.gate.mode()
	}

	/// Track a new viewport size, reseeding the pool when animating.
	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		if let Some(live) = &mut self.live {
			live.field.reseed(viewport);
			debug!(
				"backdrop: reseeded {} particles at {}x{}",
				live.field.len(),
				viewport.width,
				viewport.height
			);
		}
	}

	/// Body of the frame callback.
	///
	/// A missing surface halts the loop for good without scheduling anything.
	pub fn frame(&mut self, now_ms: f64, surface: Option<&dyn Surface>) {
		let Some(live) = &mut self.live else {
			return;
		};
		if !live.frames.enter_frame() {
			return;
		}
		let Some(surface) = surface else {
			live.frames.cancel();
			return;
		};

		live.field.step(now_ms);
		render::render(&live.field, surface, &self.theme);

		let scheduler = &self.scheduler;
		live.frames.schedule(|| scheduler.request_frame());
	}

	/// Tear down the live pool, withdrawing any pending frame.
	pub fn unmount(&mut self) {
		self.stop();
	}

	fn start(&mut self) {
		let rng = SmallRng::seed_from_u64(self.seeds.r#gen());
		let mut live = LiveField {
			field: ParticleField::new(&self.config, self.viewport, rng),
			frames: FrameLoop::default(),
		};
		live.frames.start();
		let scheduler = &self.scheduler;
		live.frames.schedule(|| scheduler.request_frame());
		self.live = Some(live);
	}

	fn stop(&mut self) {
		if let Some(mut live) = self.live.take() {
			if let Some(handle) = live.frames.cancel() {
				self.scheduler.cancel_frame(handle);
			}
		}
	}
}
