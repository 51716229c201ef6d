//! Particle pool simulation.
//!
//! Particles drift linearly with a slow sinusoidal float layered on top and
//! wrap toroidally once they stray more than [`WRAP_MARGIN`] past an edge.
//! Connections are recomputed from scratch every frame; nothing about them is
//! stored between frames.

use rand::Rng;
use rand::rngs::SmallRng;

use super::theme::Hue;
use super::types::{BackdropConfig, Viewport};

/// Distance past a viewport edge at which a particle wraps to the opposite side.
pub const WRAP_MARGIN: f64 = 50.0;

/// Line alpha for two particles at zero distance.
const LINK_MAX_ALPHA: f64 = 0.5;

/// A single drifting network node.
///
/// Only the position changes after spawn. The spawn position is kept as the
/// phase of the floating oscillation so that every particle sways out of step
/// with its neighbors.
#[derive(Clone, Debug)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	vx: f64,
	vy: f64,
	base_x: f64,
	base_y: f64,
	radius: f64,
	hue: Hue,
	opacity: f64,
}

impl Particle {
	pub fn new(x: f64, y: f64, velocity: (f64, f64), radius: f64, hue: Hue, opacity: f64) -> Self {
		Self {
			x,
			y,
			vx: velocity.0,
			vy: velocity.1,
			base_x: x,
			base_y: y,
			radius,
			hue,
			opacity,
		}
	}

	/// Random particle scattered uniformly over the viewport.
	///
	/// Dimensions scale a unit sample rather than bounding a range, so a
	/// zero or negative viewport still spawns (degenerately) without panicking.
	fn spawn(rng: &mut SmallRng, viewport: Viewport) -> Self {
		let x = rng.r#gen::<f64>() * viewport.width;
		let y = rng.r#gen::<f64>() * viewport.height;
		let vx = (rng.r#gen::<f64>() - 0.5) * 0.4;
		let vy = (rng.r#gen::<f64>() - 0.5) * 0.3;
		let radius = rng.r#gen::<f64>() * 2.0 + 2.0;
		let hue = Hue::ALL[rng.gen_range(0..Hue::ALL.len())];
		let opacity = rng.r#gen::<f64>() * 0.3 + 0.7;
		Self::new(x, y, (vx, vy), radius, hue, opacity)
	}

	pub fn velocity(&self) -> (f64, f64) {
		(self.vx, self.vy)
	}

	pub fn radius(&self) -> f64 {
		self.radius
	}

	pub fn hue(&self) -> Hue {
		self.hue
	}

	pub fn opacity(&self) -> f64 {
		self.opacity
	}

	pub fn distance_to(&self, other: &Particle) -> f64 {
		let (dx, dy) = (self.x - other.x, self.y - other.y);
		(dx * dx + dy * dy).sqrt()
	}

	/// Drift plus float for wall-clock time `now_ms`, then wrap.
	fn advance(&mut self, now_ms: f64, viewport: Viewport) {
		self.x += self.vx + (now_ms * 0.001 + self.base_x).sin() * 0.15;
		self.y += self.vy + (now_ms * 0.0008 + self.base_y).cos() * 0.1;
		self.x = wrap(self.x, viewport.width);
		self.y = wrap(self.y, viewport.height);
	}
}

fn wrap(value: f64, extent: f64) -> f64 {
	if value < -WRAP_MARGIN {
		extent + WRAP_MARGIN
	} else if value > extent + WRAP_MARGIN {
		-WRAP_MARGIN
	} else {
		value
	}
}

/// Line alpha for a pair at `distance`, fading linearly to zero at `threshold`.
pub fn connection_opacity(distance: f64, threshold: f64) -> f64 {
	if threshold <= 0.0 || distance >= threshold {
		0.0
	} else {
		(1.0 - distance / threshold) * LINK_MAX_ALPHA
	}
}

/// A transient connection between two particles, by pool index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub a: usize,
	pub b: usize,
	pub distance: f64,
	pub opacity: f64,
}

/// Fixed-size particle pool bound to one viewport.
///
/// The pool is only ever replaced wholesale: [`ParticleField::reseed`] discards
/// every particle and spawns `count` fresh ones.
pub struct ParticleField {
	particles: Vec<Particle>,
	viewport: Viewport,
	connection_distance: f64,
	rng: SmallRng,
}

impl ParticleField {
	pub fn new(config: &BackdropConfig, viewport: Viewport, mut rng: SmallRng) -> Self {
		let particles = (0..config.particle_count)
			.map(|_| Particle::spawn(&mut rng, viewport))
			.collect();
		Self {
			particles,
			viewport,
			connection_distance: config.connection_distance,
			rng,
		}
	}

	pub fn particles(&self) -> &[Particle] {
		&self.particles
	}

	/// Mutable access to positions. The pool size cannot change through this.
	pub fn particles_mut(&mut self) -> &mut [Particle] {
		&mut self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn connection_distance(&self) -> f64 {
		self.connection_distance
	}

	/// Discard the pool and spawn the same number of particles over `viewport`.
	pub fn reseed(&mut self, viewport: Viewport) {
		let count = self.particles.len();
		self.viewport = viewport;
		self.particles.clear();
		for _ in 0..count {
			let p = Particle::spawn(&mut self.rng, viewport);
			self.particles.push(p);
		}
	}

	/// Advance every particle by one frame at wall-clock time `now_ms`.
	pub fn step(&mut self, now_ms: f64) {
		let viewport = self.viewport;
		for p in &mut self.particles {
			p.advance(now_ms, viewport);
		}
	}

	/// Every unordered pair closer than the connection distance.
	///
	/// Plain O(n²) scan; the pool is small enough that a spatial index would
	/// cost more than it saves.
	pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
		let ps = &self.particles;
		let threshold = self.connection_distance;
		(0..ps.len())
			.flat_map(move |a| (a + 1..ps.len()).map(move |b| (a, b)))
			.filter_map(move |(a, b)| {
				let distance = ps[a].distance_to(&ps[b]);
				(distance < threshold).then(|| Link {
					a,
					b,
					distance,
					opacity: connection_opacity(distance, threshold),
				})
			})
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;

	use super::*;

	fn field(count: usize, width: f64, height: f64, seed: u64) -> ParticleField {
		let config = BackdropConfig {
			particle_count: count,
			..Default::default()
		};
		ParticleField::new(
			&config,
			Viewport::new(width, height),
			SmallRng::seed_from_u64(seed),
		)
	}

	#[test]
	fn spawns_exact_count_within_bounds() {
		let f = field(60, 800.0, 600.0, 1);
		assert_eq!(f.len(), 60);
		for p in f.particles() {
			assert!((0.0..=800.0).contains(&p.x));
			assert!((0.0..=600.0).contains(&p.y));
			assert!((2.0..4.0).contains(&p.radius()));
			assert!((0.7..1.0).contains(&p.opacity()));
			let (vx, vy) = p.velocity();
			assert!(vx.abs() <= 0.2 && vy.abs() <= 0.15);
		}
	}

	#[test]
	fn same_seed_same_layout() {
		let (a, b) = (field(10, 300.0, 200.0, 42), field(10, 300.0, 200.0, 42));
		for (pa, pb) in a.particles().iter().zip(b.particles()) {
			assert_eq!((pa.x, pa.y), (pb.x, pb.y));
			assert_eq!(pa.hue(), pb.hue());
		}
	}

	#[test]
	fn wrap_keeps_particles_within_margin() {
		let mut f = field(60, 120.0, 90.0, 7);
		for frame in 0..20_000 {
			f.step(frame as f64 * 16.7);
			for p in f.particles() {
				assert!(p.x >= -WRAP_MARGIN && p.x <= 120.0 + WRAP_MARGIN);
				assert!(p.y >= -WRAP_MARGIN && p.y <= 90.0 + WRAP_MARGIN);
			}
		}
	}

	#[test]
	fn crossing_an_edge_teleports_to_the_opposite_side() {
		assert_eq!(wrap(-50.5, 100.0), 150.0);
		assert_eq!(wrap(150.5, 100.0), -50.0);
		assert_eq!(wrap(-50.0, 100.0), -50.0);
		assert_eq!(wrap(42.0, 100.0), 42.0);
	}

	#[test]
	fn step_applies_drift_and_float() {
		let mut f = field(1, 400.0, 400.0, 3);
		let p = Particle::new(100.0, 200.0, (0.1, -0.1), 2.0, Hue::Cyan, 0.8);
		f.particles_mut()[0] = p;
		f.step(0.0);
		let p = &f.particles()[0];
		let expected_x = 100.0 + 0.1 + (100.0f64).sin() * 0.15;
		let expected_y = 200.0 - 0.1 + (200.0f64).cos() * 0.1;
		assert!((p.x - expected_x).abs() < 1e-9);
		assert!((p.y - expected_y).abs() < 1e-9);
		assert_eq!(p.velocity(), (0.1, -0.1));
	}

	#[test]
	fn reseed_replaces_every_particle_and_keeps_count() {
		let mut f = field(60, 800.0, 600.0, 9);
		let before: Vec<(f64, f64)> = f.particles().iter().map(|p| (p.x, p.y)).collect();
		f.reseed(Viewport::new(1024.0, 768.0));
		assert_eq!(f.len(), 60);
		assert_eq!(f.viewport(), Viewport::new(1024.0, 768.0));
		for p in f.particles() {
			assert!(!before.contains(&(p.x, p.y)));
			assert!(p.x <= 1024.0 && p.y <= 768.0);
		}
	}

	#[test]
	fn opacity_decreases_with_distance() {
		let threshold = 180.0;
		let mut last = connection_opacity(0.0, threshold);
		assert_eq!(last, 0.5);
		for d in 1..400 {
			let o = connection_opacity(d as f64, threshold);
			assert!(o <= last);
			last = o;
		}
		assert_eq!(connection_opacity(180.0, threshold), 0.0);
		assert_eq!(connection_opacity(250.0, threshold), 0.0);
		assert_eq!(connection_opacity(10.0, 0.0), 0.0);
	}

	#[test]
	fn links_only_pairs_under_threshold() {
		let mut f = field(3, 500.0, 500.0, 5);
		let ps = f.particles_mut();
		(ps[0].x, ps[0].y) = (0.0, 0.0);
		(ps[1].x, ps[1].y) = (100.0, 0.0);
		(ps[2].x, ps[2].y) = (400.0, 0.0);
		let links: Vec<Link> = f.links().collect();
		assert_eq!(links.len(), 1);
		assert_eq!((links[0].a, links[0].b), (0, 1));
		assert!((links[0].opacity - (1.0 - 100.0 / 180.0) * 0.5).abs() < 1e-12);
	}

	#[test]
	fn degenerate_viewport_does_not_panic() {
		let mut f = field(5, 0.0, -10.0, 11);
		f.step(1000.0);
		f.reseed(Viewport::new(-1.0, 0.0));
		assert_eq!(f.len(), 5);
	}
}
