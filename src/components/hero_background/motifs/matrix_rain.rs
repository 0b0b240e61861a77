//! Matrix rain: columns of falling glyphs with fading trails.

use rand::rngs::SmallRng;

use super::{Frame, Motif};
use crate::components::hero_background::particles::{ParticleState, random_glyph, uniform};
use crate::components::hero_background::surface::Surface;

/// Horizontal distance between columns.
pub const COLUMN_SPACING: f64 = 20.0;
/// Glyphs drawn behind each head, head included.
pub const TRAIL_LEN: usize = 15;

/// How far past the bottom edge a head falls before restarting above the top.
const RESPAWN_MARGIN: f64 = 100.0;

/// One falling column head.
#[derive(Clone, Debug)]
pub struct RainColumn {
	pub x: f64,
	pub y: f64,
	pub speed: f64,
	pub size: f64,
	pub opacity: f64,
	pub glyph: char,
	/// Y-coordinates of the trail segments, nearest the head first.
	pub trail: [f64; TRAIL_LEN],
}

impl RainColumn {
	fn follow(&mut self) {
		for (i, y) in self.trail.iter_mut().enumerate() {
			*y = self.y - i as f64 * self.size;
		}
	}
}

impl ParticleState for RainColumn {
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

/// Opacity of trail segment `i` for a head of the given opacity. Falls off
/// linearly from the head.
pub fn trail_alpha(i: usize, opacity: f64) -> f64 {
	(1.0 - i as f64 / TRAIL_LEN as f64) * opacity * 0.5
}

/// Green theme.
pub struct MatrixRain;

impl Motif for MatrixRain {
	type Particle = RainColumn;

	const FADE_ALPHA: f64 = 0.145;

	fn seed(width: f64, height: f64, rng: &mut SmallRng) -> Vec<RainColumn> {
		let columns = ((width / COLUMN_SPACING).floor() as usize).max(1);
		(0..columns)
			.map(|i| {
				let mut column = RainColumn {
					x: i as f64 * COLUMN_SPACING,
					y: uniform(rng, -height, height),
					speed: uniform(rng, 2.0, 4.0),
					size: uniform(rng, 14.0, 4.0),
					opacity: uniform(rng, 0.5, 0.5),
					glyph: random_glyph(rng),
					trail: [0.0; TRAIL_LEN],
				};
				column.follow();
				column
			})
			.collect()
	}

	fn step(
		particles: &mut [RainColumn],
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		let color = frame.palette.primary;

		for column in particles.iter_mut() {
			// Only the fade envelope persists; segment glyphs are re-rolled.
			surface.set_font(&format!("{}px monospace", column.size));
			for (i, y) in column.trail.iter().enumerate() {
				surface.set_fill(color.with_alpha(trail_alpha(i, column.opacity)).into());
				surface.fill_text(&random_glyph(rng).to_string(), column.x, *y);
			}

			column.glyph = random_glyph(rng);
			surface.set_fill(color.into());
			surface.set_shadow(color, 10.0);
			surface.set_font(&format!("bold {}px monospace", column.size));
			surface.fill_text(&column.glyph.to_string(), column.x, column.y);
			surface.reset_effects();

			column.y += column.speed;
			if column.y > frame.height + RESPAWN_MARGIN {
				column.y = -RESPAWN_MARGIN;
				column.speed = uniform(rng, 2.0, 4.0);
			}
			column.follow();
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
	fn one_column_per_spacing_with_full_trails() {
		let mut rng = test_rng();
		let columns = MatrixRain::seed(800.0, 600.0, &mut rng);
		assert_eq!(columns.len(), 40);
		for (i, column) in columns.iter().enumerate() {
			assert_eq!(column.x, i as f64 * COLUMN_SPACING);
			assert_eq!(column.trail.len(), TRAIL_LEN);
			assert!((-600.0..0.0).contains(&column.y));
			assert!((2.0..6.0).contains(&column.speed));
		}
	}

	#[test]
	fn narrow_surface_still_gets_a_column() {
		let mut rng = test_rng();
		assert_eq!(MatrixRain::seed(5.0, 600.0, &mut rng).len(), 1);
	}

	#[test]
	fn trail_fades_linearly_from_head() {
		let palette = ThemeName::Green.palette();
		let frame = Frame {
			width: 20.0,
			height: 600.0,
			time: 0.0,
			palette: &palette,
		};
		let mut rng = test_rng();
		let mut columns = MatrixRain::seed(20.0, 600.0, &mut rng);
		columns[0].opacity = 1.0;
		let mut surface = RecordingSurface::default();

		MatrixRain::step(&mut columns, &mut surface, &frame, &mut rng);

		let texts: Vec<_> = surface.texts().collect();
		assert_eq!(texts.len(), TRAIL_LEN + 1);
		for pair in texts[..TRAIL_LEN].windows(2) {
			assert!(pair[0].3 > pair[1].3, "trail alpha must decrease");
		}
		assert!((texts[0].3 - 0.5).abs() < 1e-9);
		// Head is drawn at full color.
		assert_eq!(texts[TRAIL_LEN].3, 1.0);
	}

	#[test]
	fn heads_respawn_above_the_top() {
		let palette = ThemeName::Green.palette();
		let frame = Frame {
			width: 100.0,
			height: 200.0,
			time: 0.0,
			palette: &palette,
		};
		let mut rng = test_rng();
		let mut columns = MatrixRain::seed(100.0, 200.0, &mut rng);
		let mut surface = RecordingSurface::default();
		for _ in 0..1_000 {
			MatrixRain::step(&mut columns, &mut surface, &frame, &mut rng);
			for column in &columns {
				assert!(column.y <= frame.height + RESPAWN_MARGIN);
				assert_eq!(column.trail[0], column.y);
			}
		}
	}
}
