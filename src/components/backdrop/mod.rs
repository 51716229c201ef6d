//! Animated particle-network background.
//!
//! Renders a full-viewport decorative layer with:
//! - A drifting particle pool painted on a canvas each animation frame
//! - Fading connection lines between nearby particles
//! - Floating tech symbols and outline shapes over the canvas
//! - A static gradient instead of all of the above when the user prefers
//!   reduced motion
//!
//! The simulation, frame loop and reduced-motion switch live in
//! [`BackdropController`], which has no DOM dependency; [`ParticleBackdrop`]
//! binds it to a browser canvas.
//!
//! # Example
//!
//! ```ignore
//! use neural_backdrop::{BackdropConfig, ParticleBackdrop};
//!
//! let config = BackdropConfig { particle_count: 80, connection_distance: 150.0 };
//! view! { <ParticleBackdrop config=config /> }
//! ```

mod component;
pub mod events;
pub mod glyphs;
pub mod particles;
pub mod render;
pub mod state;
pub mod theme;
mod types;

pub use component::ParticleBackdrop;
pub use particles::{Link, Particle, ParticleField, connection_opacity};
pub use render::Surface;
pub use state::{
	BackdropController, BackdropMode, FrameHandle, FrameLoop, FrameScheduler, LoopState,
	MotionGate,
};
pub use theme::{BackdropTheme, Hsla, Hue};
pub use types::{BackdropConfig, Viewport};
