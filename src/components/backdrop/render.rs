//! Painting the particle network.
//!
//! Each frame is drawn in two passes over a fully cleared surface:
//! 1. Particle glows and cores (glow first, so the core sits on top)
//! 2. Connection lines between nearby pairs
//!
//! Drawing goes through the [`Surface`] trait so the same pass ordering runs
//! against a browser canvas or an in-memory recorder.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::particles::{Particle, ParticleField};
use super::theme::{BackdropTheme, Hsla};

/// Minimal 2D drawing target.
pub trait Surface {
	/// Clear the whole surface to transparent.
	fn clear(&self, width: f64, height: f64);
	/// Radial glow centered at `(x, y)`, fading from `color` to transparent at `radius`.
	fn fill_glow(&self, x: f64, y: f64, radius: f64, color: Hsla);
	/// Solid disc.
	fn fill_disc(&self, x: f64, y: f64, radius: f64, color: Hsla);
	/// Straight line segment.
	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: Hsla, width: f64);
}

/// Renders the complete frame for `field`.
pub fn render(field: &ParticleField, surface: &dyn Surface, theme: &BackdropTheme) {
	let viewport = field.viewport();
	surface.clear(viewport.width, viewport.height);

	for p in field.particles() {
		draw_particle(p, surface, theme);
	}

	draw_links(field, surface, theme);
}

fn draw_particle(p: &Particle, surface: &dyn Surface, theme: &BackdropTheme) {
	let color = p.hue().color();
	surface.fill_glow(
		p.x,
		p.y,
		p.radius() * theme.particle.glow_scale,
		color.with_alpha(p.opacity() * theme.particle.glow_alpha),
	);
	surface.fill_disc(p.x, p.y, p.radius(), color.with_alpha(p.opacity()));
}

fn draw_links(field: &ParticleField, surface: &dyn Surface, theme: &BackdropTheme) {
	let ps = field.particles();
	for link in field.links() {
		let (a, b) = (&ps[link.a], &ps[link.b]);
		surface.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			theme.link.color.with_alpha(link.opacity),
			theme.link.width,
		);
	}
}

impl Surface for CanvasRenderingContext2d {
	fn clear(&self, width: f64, height: f64) {
		self.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_glow(&self, x: f64, y: f64, radius: f64, color: Hsla) {
		let Ok(gradient) = self.create_radial_gradient(x, y, 0.0, x, y, radius) else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &color.to_css());
		let _ = gradient.add_color_stop(1.0, &color.with_alpha(0.0).to_css());

		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		#[allow(deprecated)]
		self.set_fill_style(&gradient);
		self.fill();
	}

	fn fill_disc(&self, x: f64, y: f64, radius: f64, color: Hsla) {
		self.begin_path();
		let _ = self.arc(x, y, radius, 0.0, PI * 2.0);
		self.set_fill_style_str(&color.to_css());
		self.fill();
	}

	fn stroke_line(&self, from: (f64, f64), to: (f64, f64), color: Hsla, width: f64) {
		self.begin_path();
		self.move_to(from.0, from.1);
		self.line_to(to.0, to.1);
		self.set_stroke_style_str(&color.to_css());
		self.set_line_width(width);
		self.stroke();
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;

	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	use super::*;
	use crate::components::backdrop::types::{BackdropConfig, Viewport};

	#[derive(Debug, PartialEq)]
	enum Op {
		Clear,
		Glow { radius: f64, alpha: f64 },
		Disc { radius: f64, alpha: f64 },
		Line { alpha: f64, width: f64 },
	}

	#[derive(Default)]
	struct Recorder(RefCell<Vec<Op>>);

	impl Surface for Recorder {
		fn clear(&self, _: f64, _: f64) {
			self.0.borrow_mut().push(Op::Clear);
		}
		fn fill_glow(&self, _: f64, _: f64, radius: f64, color: Hsla) {
			self.0.borrow_mut().push(Op::Glow {
				radius,
				alpha: color.a,
			});
		}
		fn fill_disc(&self, _: f64, _: f64, radius: f64, color: Hsla) {
			self.0.borrow_mut().push(Op::Disc {
				radius,
				alpha: color.a,
			});
		}
		fn stroke_line(&self, _: (f64, f64), _: (f64, f64), color: Hsla, width: f64) {
			self.0.borrow_mut().push(Op::Line {
				alpha: color.a,
				width,
			});
		}
	}

	fn two_particle_field() -> ParticleField {
		let config = BackdropConfig {
			particle_count: 2,
			connection_distance: 180.0,
		};
		ParticleField::new(
			&config,
			Viewport::new(640.0, 480.0),
			SmallRng::seed_from_u64(0),
		)
	}

	#[test]
	fn clears_then_glow_under_core_then_links() {
		let mut field = two_particle_field();
		let ps = field.particles_mut();
		(ps[0].x, ps[0].y) = (0.0, 0.0);
		(ps[1].x, ps[1].y) = (100.0, 0.0);

		let rec = Recorder::default();
		render(&field, &rec, &BackdropTheme::default());
		let ops = rec.0.into_inner();

		assert_eq!(ops.len(), 6);
		assert_eq!(ops[0], Op::Clear);
		let p = &field.particles()[0];
		assert_eq!(
			ops[1],
			Op::Glow {
				radius: p.radius() * 3.0,
				alpha: p.opacity() * 0.6
			}
		);
		assert_eq!(
			ops[2],
			Op::Disc {
				radius: p.radius(),
				alpha: p.opacity()
			}
		);
		let Op::Line { alpha, width } = ops[5] else {
			panic!("expected a connection line last, got {:?}", ops[5]);
		};
		assert!((alpha - 0.2222).abs() < 1e-3);
		assert_eq!(width, 1.2);
	}

	#[test]
	fn distant_pair_draws_no_line() {
		let mut field = two_particle_field();
		let ps = field.particles_mut();
		(ps[0].x, ps[0].y) = (0.0, 0.0);
		(ps[1].x, ps[1].y) = (200.0, 0.0);

		let rec = Recorder::default();
		render(&field, &rec, &BackdropTheme::default());
		let ops = rec.0.into_inner();
		assert!(!ops.iter().any(|op| matches!(op, Op::Line { .. })));
		assert_eq!(ops.len(), 5);
	}
}
