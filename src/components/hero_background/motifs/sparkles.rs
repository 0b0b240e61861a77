//! Sparkles: swaying bubbles rising past four-point twinkles.

use rand::rngs::SmallRng;

use super::{Frame, Motif};
use crate::components::hero_background::particles::{Lifetime, ParticleState, jitter, uniform};
use crate::components::hero_background::surface::Surface;

/// Rising bubbles per surface.
pub const BUBBLE_COUNT: usize = 100;
/// Sparkles per surface.
pub const SPARKLE_COUNT: usize = 50;

const SPARKLE_LIFE: u32 = 100;
/// Sparkles below this envelope value are skipped.
const SPARKLE_THRESHOLD: f64 = 0.1;

/// A bubble rising on a gentle sway.
#[derive(Clone, Debug)]
pub struct Bubble {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub speed: f64,
	pub size: f64,
	pub opacity: f64,
	/// Sway phase, advanced two units per tick.
	pub phase: f64,
}

/// A star that flashes once per life at a fresh spot.
#[derive(Clone, Debug)]
pub struct Sparkle {
	pub x: f64,
	pub y: f64,
	pub size: f64,
	pub lifetime: Lifetime,
}

/// Particle roles of the sparkles motif.
#[derive(Clone, Debug)]
pub enum PinkParticle {
	Bubble(Bubble),
	Sparkle(Sparkle),
}

impl ParticleState for PinkParticle {
	fn position(&self) -> (f64, f64) {
		match self {
			PinkParticle::Bubble(b) => (b.x, b.y),
			PinkParticle::Sparkle(s) => (s.x, s.y),
		}
	}

	fn size(&self) -> f64 {
		match self {
			PinkParticle::Bubble(b) => b.size,
			PinkParticle::Sparkle(s) => s.size,
		}
	}

	fn opacity(&self) -> f64 {
		match self {
			PinkParticle::Bubble(b) => b.opacity,
			PinkParticle::Sparkle(s) => s.lifetime.flash(),
		}
	}
}

/// Pink theme.
pub struct Sparkles;

impl Sparkles {
	fn step_bubble(
		bubble: &mut Bubble,
		index: usize,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		bubble.phase += 2.0;
		bubble.x += bubble.vx;
		bubble.y -= bubble.speed;
		bubble.vx = (bubble.phase * 0.02).sin() * 0.5;

		if bubble.y < -50.0 {
			bubble.y = frame.height + 50.0;
			bubble.x = uniform(rng, 0.0, frame.width);
		}

		let color = match index % 3 {
			0 => frame.palette.primary,
			1 => frame.palette.secondary,
			_ => frame.palette.accent,
		};
		surface.set_stroke(color.into());
		surface.set_line_width(1.0);
		surface.set_global_alpha(bubble.opacity * 0.6);
		surface.set_shadow(color, 8.0);
		surface.stroke_circle(bubble.x, bubble.y, bubble.size);

		surface.set_fill(color.with_alpha_byte(0x40).into());
		surface.fill_circle(
			bubble.x - bubble.size * 0.3,
			bubble.y - bubble.size * 0.3,
			bubble.size * 0.2,
		);
		surface.reset_effects();
	}

	fn step_sparkle(
		sparkle: &mut Sparkle,
		index: usize,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		if sparkle.lifetime.advance() {
			sparkle.x = uniform(rng, 0.0, frame.width);
			sparkle.y = uniform(rng, 0.0, frame.height);
		}

		let flash = sparkle.lifetime.flash();
		if flash <= SPARKLE_THRESHOLD {
			return;
		}

		let color = if index % 2 == 0 {
			frame.palette.primary
		} else {
			frame.palette.accent
		};
		surface.set_fill(color.into());
		surface.set_global_alpha(flash * 0.8);
		surface.set_shadow(color, 10.0);

		let (x, y) = (sparkle.x, sparkle.y);
		let s = sparkle.size * flash;

		surface.begin_path();
		surface.move_to(x, y - s * 2.0);
		surface.line_to(x + s * 0.5, y);
		surface.line_to(x, y + s * 2.0);
		surface.line_to(x - s * 0.5, y);
		surface.close_path();
		surface.fill();

		surface.begin_path();
		surface.move_to(x - s * 2.0, y);
		surface.line_to(x, y + s * 0.5);
		surface.line_to(x + s * 2.0, y);
		surface.line_to(x, y - s * 0.5);
		surface.close_path();
		surface.fill();

		surface.reset_effects();
	}
}

impl Motif for Sparkles {
	type Particle = PinkParticle;

	const FADE_ALPHA: f64 = 0.136;

	fn seed(width: f64, height: f64, rng: &mut SmallRng) -> Vec<PinkParticle> {
		let mut particles = Vec::with_capacity(BUBBLE_COUNT + SPARKLE_COUNT);

		for _ in 0..BUBBLE_COUNT {
			particles.push(PinkParticle::Bubble(Bubble {
				x: uniform(rng, 0.0, width),
				y: height + uniform(rng, 0.0, 100.0),
				vx: jitter(rng, 0.5),
				speed: uniform(rng, 0.5, 1.5),
				size: uniform(rng, 3.0, 8.0),
				opacity: uniform(rng, 0.2, 0.5),
				phase: uniform(rng, 0.0, 360.0),
			}));
		}

		for _ in 0..SPARKLE_COUNT {
			particles.push(PinkParticle::Sparkle(Sparkle {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height),
				size: uniform(rng, 1.0, 2.0),
				lifetime: Lifetime::staggered(SPARKLE_LIFE, rng),
			}));
		}

		particles
	}

	fn step(
		particles: &mut [PinkParticle],
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		for (index, particle) in particles.iter_mut().enumerate() {
			match particle {
				PinkParticle::Bubble(b) => Self::step_bubble(b, index, surface, frame, rng),
				PinkParticle::Sparkle(s) => Self::step_sparkle(s, index, surface, frame, rng),
			}
		}
	}
}
