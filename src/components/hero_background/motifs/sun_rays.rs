//! Sun rays: slanted light beams sweeping down over rising embers.

use std::f64::consts::PI;

use rand::rngs::SmallRng;

use super::{Frame, Motif};
use crate::components::hero_background::particles::{ParticleState, jitter, uniform};
use crate::components::hero_background::surface::{Gradient, Surface};
use crate::components::hero_background::theme::Color;

/// Light beams per surface.
pub const BEAM_COUNT: usize = 30;
/// Embers per surface.
pub const EMBER_COUNT: usize = 80;

/// Embers fainter than this are recycled.
const EMBER_MIN_OPACITY: f64 = 0.1;
const EMBER_DECAY: f64 = 0.999;
/// How far an ember may leave the surface before it is recycled.
const EMBER_MARGIN: f64 = 50.0;

/// A slanted beam of light sliding down the surface.
#[derive(Clone, Debug)]
pub struct LightBeam {
	pub x: f64,
	pub y: f64,
	pub speed: f64,
	/// Beam length scale.
	pub size: f64,
	pub opacity: f64,
	pub angle: f64,
}

/// A glowing ember drifting upward on a random walk.
#[derive(Clone, Debug)]
pub struct Ember {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub speed: f64,
	pub size: f64,
	pub opacity: f64,
	/// Hue offset from orange toward yellow, in degrees.
	pub hue: f64,
}

impl Ember {
	fn respawn(&mut self, frame: &Frame<'_>, rng: &mut SmallRng) {
		self.y = frame.height + EMBER_MARGIN;
		self.x = uniform(rng, 0.0, frame.width);
		self.opacity = uniform(rng, 0.3, 0.5);
		self.vx = jitter(rng, 1.0);
	}

	fn out_of_bounds(&self, frame: &Frame<'_>) -> bool {
		self.y < -EMBER_MARGIN || self.x < -EMBER_MARGIN || self.x > frame.width + EMBER_MARGIN
	}
}

/// Particle roles of the sun rays motif.
#[derive(Clone, Debug)]
pub enum SunParticle {
	Beam(LightBeam),
	Ember(Ember),
}

impl ParticleState for SunParticle {
	fn position(&self) -> (f64, f64) {
		match self {
			SunParticle::Beam(b) => (b.x, b.y),
			SunParticle::Ember(e) => (e.x, e.y),
		}
	}

	fn size(&self) -> f64 {
		match self {
			SunParticle::Beam(b) => b.size,
			SunParticle::Ember(e) => e.size,
		}
	}

	fn opacity(&self) -> f64 {
		match self {
			SunParticle::Beam(b) => b.opacity,
			SunParticle::Ember(e) => e.opacity,
		}
	}
}

/// Orange theme.
pub struct SunRays;

impl SunRays {
	fn step_beam(
		beam: &mut LightBeam,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		let palette = frame.palette;
		surface.set_fill(
			Gradient::Linear {
				x0: beam.x,
				y0: beam.y,
				x1: beam.x + beam.angle.cos() * beam.size,
				y1: beam.y + beam.size * 2.0,
				stops: vec![
					(0.0, palette.primary.with_alpha(0.0)),
					(0.5, palette.primary.with_alpha(beam.opacity)),
					(1.0, palette.secondary.with_alpha(0.0)),
				],
			}
			.into(),
		);
		surface.save();
		surface.translate(beam.x, beam.y);
		surface.rotate(beam.angle);
		surface.fill_rect(-20.0, 0.0, 40.0, beam.size * 3.0);
		surface.restore();

		beam.y += beam.speed;
		if beam.y > frame.height {
			beam.y = -beam.size;
			beam.x = uniform(rng, 0.0, frame.width);
		}
	}

	fn step_ember(
		ember: &mut Ember,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		ember.x += ember.vx;
		ember.y -= ember.speed;
		ember.vx += jitter(rng, 0.05);
		ember.opacity *= EMBER_DECAY;

		if ember.out_of_bounds(frame) || ember.opacity < EMBER_MIN_OPACITY {
			ember.respawn(frame, rng);
		}

		surface.set_fill(Color::hsl(25.0 + ember.hue, 100.0, 60.0).into());
		surface.set_global_alpha(ember.opacity);
		surface.set_shadow(frame.palette.primary, 15.0);
		surface.fill_circle(ember.x, ember.y, ember.size);
		surface.reset_effects();
	}
}

impl Motif for SunRays {
	type Particle = SunParticle;

	const FADE_ALPHA: f64 = 0.145;

	fn seed(width: f64, height: f64, rng: &mut SmallRng) -> Vec<SunParticle> {
		let mut particles = Vec::with_capacity(BEAM_COUNT + EMBER_COUNT);

		for _ in 0..BEAM_COUNT {
			particles.push(SunParticle::Beam(LightBeam {
				x: uniform(rng, 0.0, width),
				y: -100.0,
				speed: uniform(rng, 2.0, 3.0),
				size: uniform(rng, 100.0, 200.0),
				opacity: uniform(rng, 0.03, 0.05),
				angle: PI / 6.0 + uniform(rng, 0.0, 0.2),
			}));
		}

		for _ in 0..EMBER_COUNT {
			particles.push(SunParticle::Ember(Ember {
				x: uniform(rng, 0.0, width),
				y: height + uniform(rng, 0.0, 100.0),
				vx: jitter(rng, 1.0),
				speed: uniform(rng, 0.5, 1.5),
				size: uniform(rng, 2.0, 4.0),
				opacity: uniform(rng, 0.3, 0.5),
				hue: uniform(rng, 0.0, 30.0),
			}));
		}

		particles
	}

	fn step(
		particles: &mut [SunParticle],
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		for particle in particles.iter_mut() {
			match particle {
				SunParticle::Beam(beam) => Self::step_beam(beam, surface, frame, rng),
				SunParticle::Ember(ember) => Self::step_ember(ember, surface, frame, rng),
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
	fn embers_never_fade_below_recycle_threshold() {
		let palette = ThemeName::Orange.palette();
		let frame = Frame {
			width: 400.0,
			height: 10_000.0,
			time: 0.0,
			palette: &palette,
		};
		let mut rng = test_rng();
		let mut particles = SunRays::seed(400.0, 10_000.0, &mut rng);
		let mut surface = RecordingSurface::default();
		for _ in 0..3_000 {
			SunRays::step(&mut particles, &mut surface, &frame, &mut rng);
			surface.clear();
			for p in &particles {
				if let SunParticle::Ember(e) = p {
					assert!(e.opacity >= EMBER_MIN_OPACITY);
				}
			}
		}
	}

	#[test]
	fn embers_are_recycled_before_drifting_off_the_sides() {
		let palette = ThemeName::Orange.palette();
		for (w, h) in [(1_920.0, 1_080.0), (400.0, 3_000.0)] {
			let frame = Frame {
				width: w,
				height: h,
				time: 0.0,
				palette: &palette,
			};
			let mut rng = test_rng();
			let mut particles = SunRays::seed(w, h, &mut rng);
			let mut surface = RecordingSurface::default();
			for _ in 0..20_000 {
				SunRays::step(&mut particles, &mut surface, &frame, &mut rng);
				surface.clear();
				for p in &particles {
					if let SunParticle::Ember(e) = p {
						assert!(
							(-EMBER_MARGIN..=w + EMBER_MARGIN).contains(&e.x),
							"ember at x = {} on a {}px surface",
							e.x,
							w
						);
						assert!(e.y >= -EMBER_MARGIN);
					}
				}
			}
		}
	}

	#[test]
	fn ember_past_the_side_respawns_below_the_bottom() {
		let palette = ThemeName::Orange.palette();
		let frame = Frame {
			width: 400.0,
			height: 300.0,
			time: 0.0,
			palette: &palette,
		};
		let mut rng = test_rng();
		let mut ember = Ember {
			x: 449.0,
			y: 150.0,
			vx: 2.0,
			speed: 1.0,
			size: 3.0,
			opacity: 0.4,
			hue: 10.0,
		};
		let mut surface = RecordingSurface::default();
		SunRays::step_ember(&mut ember, &mut surface, &frame, &mut rng);
		assert_eq!(ember.y, frame.height + EMBER_MARGIN);
		assert!((0.0..400.0).contains(&ember.x));
		assert!((-1.0..1.0).contains(&ember.vx));
	}

	#[test]
	fn beams_restart_above_the_top_edge() {
		let palette = ThemeName::Orange.palette();
		let frame = Frame {
			width: 400.0,
			height: 300.0,
			time: 0.0,
			palette: &palette,
		};
		let mut rng = test_rng();
		let mut beam = LightBeam {
			x: 10.0,
			y: 299.0,
			speed: 2.0,
			size: 150.0,
			opacity: 0.05,
			angle: PI / 6.0,
		};
		let mut surface = RecordingSurface::default();
		SunRays::step_beam(&mut beam, &mut surface, &frame, &mut rng);
		assert_eq!(beam.y, -150.0);
		assert!((0.0..400.0).contains(&beam.x));
		assert_eq!(surface.ops.len(), 1);
	}
}
