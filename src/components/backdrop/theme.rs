//! Colors and visual style for the particle backdrop.
//!
//! Particles draw from a fixed four-entry blue/cyan palette; connection lines
//! share a single electric-blue stroke.

/// HSLA color. Hue in degrees, saturation and lightness in percent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsla {
	pub h: f64,
	pub s: f64,
	pub l: f64,
	pub a: f64,
}

impl Hsla {
	pub const fn hsl(h: f64, s: f64, l: f64) -> Self {
		Self { h, s, l, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	pub fn to_css(self) -> String {
		format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
	}
}

/// Particle color class, fixed at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hue {
	ElectricBlue,
	Cyan,
	LightBlue,
	SkyBlue,
}

impl Hue {
	/// Every palette entry, in spawn-index order.
	pub const ALL: [Hue; 4] = [Hue::ElectricBlue, Hue::Cyan, Hue::LightBlue, Hue::SkyBlue];

	pub fn color(self) -> Hsla {
		match self {
			Hue::ElectricBlue => Hsla::hsl(210.0, 100.0, 65.0),
			Hue::Cyan => Hsla::hsl(190.0, 100.0, 60.0),
			Hue::LightBlue => Hsla::hsl(215.0, 100.0, 65.0),
			Hue::SkyBlue => Hsla::hsl(200.0, 100.0, 70.0),
		}
	}
}

/// Particle glow and core style.
#[derive(Clone, Debug)]
pub struct ParticleStyle {
	/// Glow radius as a multiple of the particle radius
	pub glow_scale: f64,
	/// Glow center alpha as a fraction of the particle opacity
	pub glow_alpha: f64,
}

/// Connection line style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	pub color: Hsla,
	pub width: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct BackdropTheme {
	pub particle: ParticleStyle,
	pub link: LinkStyle,
}

impl Default for BackdropTheme {
	fn default() -> Self {
		Self {
			particle: ParticleStyle {
				glow_scale: 3.0,
				glow_alpha: 0.6,
			},
			link: LinkStyle {
				color: Hue::ElectricBlue.color(),
				width: 1.2,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output_is_hsla_function() {
		let c = Hue::Cyan.color().with_alpha(0.25);
		assert_eq!(c.to_css(), "hsla(190, 100%, 60%, 0.25)");
	}

	#[test]
	fn palette_entries_are_distinct() {
		for (i, a) in Hue::ALL.iter().enumerate() {
			for b in &Hue::ALL[i + 1..] {
				assert_ne!(a.color(), b.color());
			}
		}
	}
}
