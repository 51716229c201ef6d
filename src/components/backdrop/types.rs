//! Configuration and geometry types for the particle backdrop.

use serde::Deserialize;

fn default_particle_count() -> usize {
	60
}

fn default_connection_distance() -> f64 {
	180.0
}

/// Density settings for the particle network.
///
/// Both fields are optional in JSON form, e.g.
/// `{"particleCount": 80, "connectionDistance": 150}`. Unknown keys are ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackdropConfig {
	/// Number of particles in the pool.
	#[serde(default = "default_particle_count")]
	pub particle_count: usize,
	/// Pair distance below which a connecting line is drawn.
	#[serde(default = "default_connection_distance")]
	pub connection_distance: f64,
}

impl Default for BackdropConfig {
	fn default() -> Self {
		Self {
			particle_count: default_particle_count(),
			connection_distance: default_connection_distance(),
		}
	}
}

/// Drawing surface dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}
