//! Code stream: falling code tokens over a drift of binary digits.

use rand::Rng;
use rand::rngs::SmallRng;

use super::{Frame, Motif};
use crate::components::hero_background::particles::{ParticleState, random_snippet, uniform};
use crate::components::hero_background::surface::Surface;

/// Horizontal distance between snippet streams.
pub const STREAM_SPACING: f64 = 30.0;
/// Binary digits falling between the streams.
pub const BINARY_DIGITS: usize = 50;

const RESPAWN_MARGIN: f64 = 50.0;
/// Only particles this close vertically get a connection line.
const LINK_RANGE: f64 = 100.0;

/// What a stream glyph renders as.
#[derive(Clone, Debug, PartialEq)]
pub enum GlyphKind {
	/// A glowing code keyword.
	Snippet(&'static str),
	/// A dim `0` or `1`.
	Bit(char),
}

/// A falling snippet or digit.
#[derive(Clone, Debug)]
pub struct StreamGlyph {
	pub x: f64,
	pub y: f64,
	pub speed: f64,
	pub size: f64,
	pub opacity: f64,
	pub kind: GlyphKind,
}

impl ParticleState for StreamGlyph {
	fn position(&self) -> (f64, f64) {
		(self.x, self.y)
	}

	fn size(&self) -> f64 {
		self.size
	}

	fn opacity(&self) -> f64 {
		self.opacity
	}
}

/// Cyan theme.
pub struct DataStream;

impl Motif for DataStream {
	type Particle = StreamGlyph;

	const FADE_ALPHA: f64 = 0.172;

	fn seed(width: f64, height: f64, rng: &mut SmallRng) -> Vec<StreamGlyph> {
		let streams = (width / STREAM_SPACING).floor() as usize;
		let mut particles = Vec::with_capacity(streams + BINARY_DIGITS);

		for i in 0..streams {
			particles.push(StreamGlyph {
				x: i as f64 * STREAM_SPACING + uniform(rng, 0.0, 15.0),
				y: uniform(rng, -height, height),
				speed: uniform(rng, 1.0, 3.0),
				size: 12.0,
				opacity: uniform(rng, 0.3, 0.5),
				kind: GlyphKind::Snippet(random_snippet(rng)),
			});
		}

		for _ in 0..BINARY_DIGITS {
			particles.push(StreamGlyph {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height),
				speed: uniform(rng, 0.5, 1.0),
				size: 10.0,
				opacity: uniform(rng, 0.2, 0.3),
				kind: GlyphKind::Bit(if rng.random_bool(0.5) { '1' } else { '0' }),
			});
		}

		particles
	}

	fn step(
		particles: &mut [StreamGlyph],
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		let color = frame.palette.primary;

		for glyph in particles.iter_mut() {
			surface.set_fill(color.with_alpha(glyph.opacity).into());
			surface.set_font(&format!("{}px \"Courier New\", monospace", glyph.size));
			match &glyph.kind {
				GlyphKind::Snippet(text) => {
					surface.set_shadow(color, 8.0);
					surface.fill_text(text, glyph.x, glyph.y);
					surface.reset_effects();
				}
				GlyphKind::Bit(bit) => surface.fill_text(&bit.to_string(), glyph.x, glyph.y),
			}

			glyph.y += glyph.speed;
			if glyph.y > frame.height + RESPAWN_MARGIN {
				glyph.y = -RESPAWN_MARGIN;
				glyph.x = uniform(rng, 0.0, frame.width);
				if let GlyphKind::Snippet(_) = glyph.kind {
					glyph.kind = GlyphKind::Snippet(random_snippet(rng));
				}
			}
		}

		let len = particles.len();
		if len == 0 {
			return;
		}
		surface.set_stroke(color.with_alpha_byte(0x15).into());
		surface.set_line_width(1.0);
		for i in (0..len).step_by(10) {
			let (a, b) = (&particles[i], &particles[(i + 5) % len]);
			if (a.y - b.y).abs() < LINK_RANGE {
				surface.begin_path();
				surface.move_to(a.x, a.y);
				surface.line_to(b.x, b.y);
				surface.stroke();
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::hero_background::particles::test_rng;
	use crate::components::hero_background::surface::recording::RecordingSurface;
	use crate::components::hero_background::theme::ThemeName;

	#[test]
	fn streams_scale_with_width_and_bits_are_fixed() {
		let mut rng = test_rng();
		let particles = DataStream::seed(900.0, 600.0, &mut rng);
		let snippets = particles
			.iter()
			.filter(|p| matches!(p.kind, GlyphKind::Snippet(_)))
			.count();
		assert_eq!(snippets, 30);
		assert_eq!(particles.len() - snippets, BINARY_DIGITS);
		assert!(particles.iter().all(|p| match p.kind {
			GlyphKind::Bit(c) => c == '0' || c == '1',
			GlyphKind::Snippet(s) => s.len() > 1,
		}));
	}

	#[test]
	fn every_glyph_is_painted_each_tick() {
		let palette = ThemeName::Cyan.palette();
		let frame = Frame {
			width: 300.0,
			height: 300.0,
			time: 0.0,
			palette: &palette,
		};
		let mut rng = test_rng();
		let mut particles = DataStream::seed(300.0, 300.0, &mut rng);
		let mut surface = RecordingSurface::default();
		DataStream::step(&mut particles, &mut surface, &frame, &mut rng);
		assert_eq!(surface.texts().count(), particles.len());
	}

	#[test]
	fn glyphs_recycle_at_the_top_with_fresh_columns() {
		let palette = ThemeName::Cyan.palette();
		let frame = Frame {
			width: 300.0,
			height: 100.0,
			time: 0.0,
			palette: &palette,
		};
		let mut rng = test_rng();
		let mut particles = DataStream::seed(300.0, 100.0, &mut rng);
		let mut surface = RecordingSurface::default();
		for _ in 0..500 {
			DataStream::step(&mut particles, &mut surface, &frame, &mut rng);
			surface.clear();
		}
		for p in &particles {
			assert!(p.y <= frame.height + RESPAWN_MARGIN);
			assert!(p.y >= -RESPAWN_MARGIN - frame.height);
		}
	}
}
