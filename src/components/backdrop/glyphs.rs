//! Floating tech symbols and outline shapes layered over the particle canvas.
//!
//! Layout is generated once per mount from a seeded RNG. The motion itself is
//! a looping CSS animation; each element carries its own keyframe offsets as
//! custom properties (`--dx1`, `--dy1`, `--rot1` at 30%, `--dx2`, `--dy2`,
//! `--rot2` at 70%).

use leptos::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Number of symbols placed per layout.
pub const SYMBOL_COUNT: usize = 25;

/// Symbol table. Repeated entries make those symbols more likely.
pub const SYMBOLS: [&str; 59] = [
	"{}", "</>", "[]", "#", "</", "/>", "=>", "&&", "||", "!=", "==", "++", "--", "**", "//", "/*",
	"*/", ":::", "::", "AI", "ML", "API", "CPU", "GPU", "IoT", "UX", "UI", "SaaS", "PaaS", "IaaS",
	"Dev", "Ops", "Sec", "Net", "Sys", "Data", "Cloud", "Stack", "Code", "Git", "SQL", "NoSQL",
	"REST", "JSON", "XML", "HTML", "CSS", "JS", "TS", "Py", "Go", "Rust", "C++", ">>", "<<", "?:",
	"{}", "</>", "=>",
];

/// Keyframe offsets at 30% and 70% of the loop. Both ends rest at zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drift {
	pub dx: [f64; 2],
	pub dy: [f64; 2],
	pub rotate: [f64; 2],
}

impl Drift {
	fn custom_properties(&self) -> String {
		format!(
			"--dx1: {}px; --dy1: {}px; --rot1: {}deg; --dx2: {}px; --dy2: {}px; --rot2: {}deg;",
			self.dx[0], self.dy[0], self.rotate[0], self.dx[1], self.dy[1], self.rotate[1]
		)
	}
}

/// Uniform sample in `[-half, half)`.
fn jitter(rng: &mut SmallRng, half: f64) -> f64 {
	rng.r#gen::<f64>() * half * 2.0 - half
}

/// A drifting monospace symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingSymbol {
	pub symbol: &'static str,
	/// Left offset, percent of the container width
	pub left: f64,
	/// Top offset, percent of the container height
	pub top: f64,
	/// Font size in pixels
	pub size: f64,
	/// Loop length in seconds
	pub duration: f64,
	/// Start delay in seconds
	pub delay: f64,
	pub drift: Drift,
}

impl FloatingSymbol {
	pub fn style(&self) -> String {
		format!(
			"left: {}%; top: {}%; font-size: {}px; animation-duration: {}s; animation-delay: {}s; {}",
			self.left,
			self.top,
			self.size,
			self.duration,
			self.delay,
			self.drift.custom_properties()
		)
	}
}

/// Outline shape kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
	Circle,
	Rect,
	Diamond,
	Hexagon,
}

impl ShapeKind {
	pub fn class(self) -> &'static str {
		match self {
			ShapeKind::Circle => "backdrop-shape backdrop-shape-circle",
			ShapeKind::Rect => "backdrop-shape backdrop-shape-rect",
			ShapeKind::Diamond => "backdrop-shape backdrop-shape-diamond",
			ShapeKind::Hexagon => "backdrop-shape backdrop-shape-hexagon",
		}
	}
}

/// Fixed shape placements: kind, left %, top %, size px, duration s, delay s.
const SHAPES: [(ShapeKind, f64, f64, f64, f64, f64); 12] = [
	(ShapeKind::Circle, 10.0, 20.0, 60.0, 25.0, 0.0),
	(ShapeKind::Circle, 85.0, 15.0, 40.0, 30.0, 2.0),
	(ShapeKind::Circle, 70.0, 80.0, 80.0, 35.0, 4.0),
	(ShapeKind::Rect, 15.0, 70.0, 50.0, 28.0, 1.0),
	(ShapeKind::Rect, 90.0, 60.0, 35.0, 32.0, 3.0),
	(ShapeKind::Diamond, 50.0, 10.0, 45.0, 27.0, 5.0),
	(ShapeKind::Hexagon, 25.0, 40.0, 55.0, 33.0, 6.0),
	(ShapeKind::Circle, 75.0, 45.0, 30.0, 29.0, 7.0),
	(ShapeKind::Rect, 5.0, 50.0, 45.0, 31.0, 8.0),
	(ShapeKind::Circle, 45.0, 85.0, 65.0, 34.0, 9.0),
	(ShapeKind::Diamond, 60.0, 25.0, 40.0, 26.0, 10.0),
	(ShapeKind::Hexagon, 30.0, 75.0, 50.0, 32.0, 11.0),
];

/// A drifting outline shape.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingShape {
	pub kind: ShapeKind,
	pub left: f64,
	pub top: f64,
	pub size: f64,
	pub duration: f64,
	pub delay: f64,
	pub drift: Drift,
}

impl FloatingShape {
	/// Style for the positioned, animated wrapper.
	pub fn anchor_style(&self) -> String {
		format!(
			"left: {}%; top: {}%; animation-duration: {}s; animation-delay: {}s; {}",
			self.left,
			self.top,
			self.duration,
			self.delay,
			self.drift.custom_properties()
		)
	}

	/// Style for the outline itself. Hexagons are squashed to a 0.866 aspect.
	pub fn shape_style(&self) -> String {
		let height = match self.kind {
			ShapeKind::Hexagon => self.size * 0.866,
			_ => self.size,
		};
		format!("width: {}px; height: {}px;", self.size, height)
	}
}

/// Everything the glyph overlay places.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphLayout {
	pub symbols: Vec<FloatingSymbol>,
	pub shapes: Vec<FloatingShape>,
}

impl GlyphLayout {
	pub fn generate(rng: &mut SmallRng, symbol_count: usize) -> Self {
		let mut used = [false; SYMBOLS.len()];
		let mut used_count = 0;
		let mut symbols = Vec::with_capacity(symbol_count);

		for _ in 0..symbol_count {
			// Prefer unused table entries until every entry has been placed once.
			let idx = loop {
				let idx = rng.gen_range(0..SYMBOLS.len());
				if !used[idx] || used_count >= SYMBOLS.len() {
					break idx;
				}
			};
			if !used[idx] {
				used[idx] = true;
				used_count += 1;
			}

			symbols.push(FloatingSymbol {
				symbol: SYMBOLS[idx],
				left: rng.r#gen::<f64>() * 100.0,
				top: rng.r#gen::<f64>() * 100.0,
				size: rng.r#gen::<f64>() * 16.0 + 12.0,
				duration: rng.r#gen::<f64>() * 25.0 + 35.0,
				delay: rng.r#gen::<f64>() * 5.0,
				drift: Drift {
					dx: [jitter(rng, 20.0), jitter(rng, 15.0)],
					dy: [jitter(rng, 25.0), jitter(rng, 20.0)],
					rotate: [jitter(rng, 4.0), jitter(rng, 3.0)],
				},
			});
		}

		let shapes = SHAPES
			.iter()
			.map(|&(kind, left, top, size, duration, delay)| FloatingShape {
				kind,
				left,
				top,
				size,
				duration,
				delay,
				drift: Drift {
					dx: [jitter(rng, 30.0), jitter(rng, 25.0)],
					dy: [jitter(rng, 35.0), jitter(rng, 30.0)],
					rotate: [jitter(rng, 5.0), jitter(rng, 4.0)],
				},
			})
			.collect();

		Self { symbols, shapes }
	}
}

/// Overlay of floating symbols and shapes, laid out from `seed`.
#[component]
pub fn FloatingGlyphs(seed: u64) -> impl IntoView {
	let mut rng = SmallRng::seed_from_u64(seed);
	let layout = GlyphLayout::generate(&mut rng, SYMBOL_COUNT);

	let symbols = layout
		.symbols
		.into_iter()
		.map(|s| {
			view! { <div class="backdrop-symbol" style={s.style()}>{s.symbol}</div> }
		})
		.collect_view();

	let shapes = layout
		.shapes
		.into_iter()
		.map(|s| {
			view! {
				<div class="backdrop-shape-anchor" style={s.anchor_style()}>
					<div class={s.kind.class()} style={s.shape_style()}></div>
				</div>
			}
		})
		.collect_view();

	view! {
		<div class="backdrop-glyphs">
			{symbols}
			{shapes}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn symbols_are_unique_while_table_lasts() {
		let mut rng = SmallRng::seed_from_u64(3);
		let layout = GlyphLayout::generate(&mut rng, SYMBOL_COUNT);
		assert_eq!(layout.symbols.len(), SYMBOL_COUNT);
		assert_eq!(layout.shapes.len(), 12);

		// Text may repeat (the table has duplicates) but never more than its table count.
		for s in &layout.symbols {
			let placed = layout.symbols.iter().filter(|o| o.symbol == s.symbol).count();
			let in_table = SYMBOLS.iter().filter(|&&t| t == s.symbol).count();
			assert!(placed <= in_table, "{} placed {} times", s.symbol, placed);
		}
	}

	#[test]
	fn more_symbols_than_table_entries_still_terminates() {
		let mut rng = SmallRng::seed_from_u64(4);
		let layout = GlyphLayout::generate(&mut rng, SYMBOLS.len() + 10);
		assert_eq!(layout.symbols.len(), SYMBOLS.len() + 10);
	}

	#[test]
	fn symbol_parameters_stay_in_range() {
		let mut rng = SmallRng::seed_from_u64(5);
		for s in GlyphLayout::generate(&mut rng, SYMBOL_COUNT).symbols {
			assert!((0.0..100.0).contains(&s.left) && (0.0..100.0).contains(&s.top));
			assert!((12.0..28.0).contains(&s.size));
			assert!((35.0..60.0).contains(&s.duration));
			assert!((0.0..5.0).contains(&s.delay));
			assert!(s.drift.dx[0].abs() <= 20.0 && s.drift.dx[1].abs() <= 15.0);
			assert!(s.drift.rotate[0].abs() <= 4.0 && s.drift.rotate[1].abs() <= 3.0);
		}
	}

	#[test]
	fn hexagon_outline_is_squashed() {
		let mut rng = SmallRng::seed_from_u64(6);
		let layout = GlyphLayout::generate(&mut rng, 0);
		let hex = layout
			.shapes
			.iter()
			.find(|s| s.kind == ShapeKind::Hexagon)
			.unwrap();
		assert_eq!(hex.shape_style(), format!("width: 55px; height: {}px;", 55.0 * 0.866));
	}

	#[test]
	fn style_carries_keyframe_offsets() {
		let s = FloatingSymbol {
			symbol: "AI",
			left: 10.0,
			top: 20.0,
			size: 14.0,
			duration: 40.0,
			delay: 1.5,
			drift: Drift {
				dx: [5.0, -3.0],
				dy: [2.0, 1.0],
				rotate: [1.0, -1.0],
			},
		};
		let style = s.style();
		assert!(style.starts_with("left: 10%; top: 20%; font-size: 14px;"));
		assert!(style.contains("--dx1: 5px;"));
		assert!(style.contains("--rot2: -1deg;"));
	}
}
