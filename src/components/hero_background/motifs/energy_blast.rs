//! Energy blast: pulsing orbs and decaying red/gold sparks around a center ring.

use rand::Rng;
use rand::rngs::SmallRng;

use super::{Frame, Motif};
use crate::components::hero_background::particles::{
	Lifetime, ParticleState, bounce, jitter, uniform,
};
use crate::components::hero_background::surface::{Gradient, Surface};
use crate::components::hero_background::theme::Color;

/// Pulsing orbs per surface.
pub const ORB_COUNT: usize = 8;
/// Sparks per surface.
pub const SPARK_COUNT: usize = 120;

const ORB_LIFE: u32 = 200;
const SPARK_DECAY: f64 = 0.995;
const SPARK_MIN_OPACITY: f64 = 0.1;

/// A pulsing orb that bounces around and jumps back near the center each life.
#[derive(Clone, Debug)]
pub struct EnergyOrb {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
	pub lifetime: Lifetime,
}

/// A fading spark recycled once it leaves the surface.
#[derive(Clone, Debug)]
pub struct Spark {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
	/// Gold sparks use the secondary color, the rest the primary.
	pub gold: bool,
}

impl Spark {
	fn respawn(&mut self, frame: &Frame<'_>, rng: &mut SmallRng) {
		self.x = uniform(rng, 0.0, frame.width);
		self.y = uniform(rng, 0.0, frame.height);
		self.vx = jitter(rng, 2.0);
		self.vy = jitter(rng, 2.0);
		self.opacity = uniform(rng, 0.5, 0.5);
	}

	fn out_of_bounds(&self, frame: &Frame<'_>) -> bool {
		self.x < 0.0 || self.x > frame.width || self.y < 0.0 || self.y > frame.height
	}
}

/// Particle roles of the energy blast motif.
#[derive(Clone, Debug)]
pub enum MarvelParticle {
	Orb(EnergyOrb),
	Spark(Spark),
}

impl ParticleState for MarvelParticle {
	fn position(&self) -> (f64, f64) {
		match self {
			MarvelParticle::Orb(o) => (o.x, o.y),
			MarvelParticle::Spark(s) => (s.x, s.y),
		}
	}

	fn size(&self) -> f64 {
		match self {
			MarvelParticle::Orb(o) => o.size,
			MarvelParticle::Spark(s) => s.size,
		}
	}

	fn opacity(&self) -> f64 {
		match self {
			MarvelParticle::Orb(o) => o.opacity,
			MarvelParticle::Spark(s) => s.opacity,
		}
	}
}

/// Point near the center, kept on the surface.
fn near_center(frame_w: f64, frame_h: f64, spread: f64, rng: &mut SmallRng) -> (f64, f64) {
	(
		(frame_w * 0.5 + jitter(rng, spread)).clamp(0.0, frame_w),
		(frame_h * 0.5 + jitter(rng, spread)).clamp(0.0, frame_h),
	)
}

/// Marvel theme.
pub struct EnergyBlast;

impl EnergyBlast {
	fn step_orb(
		orb: &mut EnergyOrb,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		if orb.lifetime.advance() {
			(orb.x, orb.y) = near_center(frame.width, frame.height, 200.0, rng);
		}
		orb.x += orb.vx;
		orb.y += orb.vy;
		bounce(orb.x, &mut orb.vx, frame.width);
		bounce(orb.y, &mut orb.vy, frame.height);

		let pulse = (frame.time * 2.0 + orb.lifetime.life as f64 * 0.05).sin() * 0.3 + 0.7;
		let radius = orb.size * pulse;
		surface.set_fill(
			Gradient::Radial {
				x: orb.x,
				y: orb.y,
				radius,
				stops: vec![
					(0.0, frame.palette.primary.with_alpha_byte(0x40)),
					(0.5, frame.palette.secondary.with_alpha_byte(0x20)),
					(1.0, Color::TRANSPARENT),
				],
			}
			.into(),
		);
		surface.fill_circle(orb.x, orb.y, radius);
	}

	fn step_spark(
		spark: &mut Spark,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		spark.x += spark.vx;
		spark.y += spark.vy;
		spark.opacity *= SPARK_DECAY;

		if spark.out_of_bounds(frame) || spark.opacity < SPARK_MIN_OPACITY {
			spark.respawn(frame, rng);
		}

		let color = if spark.gold {
			frame.palette.secondary
		} else {
			frame.palette.primary
		};
		surface.set_fill(color.into());
		surface.set_global_alpha(spark.opacity);
		surface.set_shadow(color, 8.0);
		surface.fill_circle(spark.x, spark.y, spark.size);
		surface.reset_effects();
	}

	fn draw_rings(surface: &mut dyn Surface, frame: &Frame<'_>) {
		let pulse = (frame.time * 1.5).sin() * 0.3 + 0.7;
		let (cx, cy) = (frame.width * 0.5, frame.height * 0.5);
		surface.set_line_width(2.0);
		surface.set_stroke(frame.palette.primary.with_alpha_byte(0x30).into());
		surface.stroke_circle(cx, cy, 150.0 * pulse);
		surface.set_stroke(frame.palette.secondary.with_alpha_byte(0x20).into());
		surface.stroke_circle(cx, cy, 250.0 * pulse);
	}
}

impl Motif for EnergyBlast {
	type Particle = MarvelParticle;

	const FADE_ALPHA: f64 = 0.172;

	fn seed(width: f64, height: f64, rng: &mut SmallRng) -> Vec<MarvelParticle> {
		let mut particles = Vec::with_capacity(ORB_COUNT + SPARK_COUNT);

		for _ in 0..ORB_COUNT {
			let (x, y) = near_center(width, height, 100.0, rng);
			particles.push(MarvelParticle::Orb(EnergyOrb {
				x,
				y,
				vx: jitter(rng, 1.5),
				vy: jitter(rng, 1.5),
				size: uniform(rng, 20.0, 40.0),
				opacity: uniform(rng, 0.4, 0.4),
				lifetime: Lifetime::staggered(ORB_LIFE, rng),
			}));
		}

		for _ in 0..SPARK_COUNT {
			particles.push(MarvelParticle::Spark(Spark {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height),
				vx: jitter(rng, 2.0),
				vy: jitter(rng, 2.0),
				size: uniform(rng, 1.0, 3.0),
				opacity: uniform(rng, 0.5, 0.5),
				gold: rng.random_bool(0.5),
			}));
		}

		particles
	}

	fn step(
		particles: &mut [MarvelParticle],
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		for particle in particles.iter_mut() {
			match particle {
				MarvelParticle::Orb(orb) => Self::step_orb(orb, surface, frame, rng),
				MarvelParticle::Spark(spark) => Self::step_spark(spark, surface, frame, rng),
			}
		}
		Self::draw_rings(surface, frame);
	}
}
