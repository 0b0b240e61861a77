//! Starfield: twinkling stars, occasional shooting stars and drifting nebulae.

use std::f64::consts::PI;

use rand::rngs::SmallRng;

use super::{Frame, Motif};
use crate::components::hero_background::particles::{
	Lifetime, ParticleState, jitter, random_angle, uniform, wrap,
};
use crate::components::hero_background::surface::{Gradient, Surface};
use crate::components::hero_background::theme::Color;

/// Twinkling stars per surface.
pub const STAR_COUNT: usize = 200;
/// Shooting stars per surface.
pub const SHOOTING_STAR_COUNT: usize = 5;

/// Ticks a shooting star stays dark after (re)spawning.
const SHOOTING_STAR_DELAY: u32 = 20;
/// Tail length, also how far past an edge a head may travel before parking.
const SHOOTING_STAR_TAIL: f64 = 50.0;
/// Shooting stars respawn within this fraction of the height.
const SHOOTING_STAR_SPAWN_BAND: f64 = 0.3;

/// A drifting, twinkling star that wraps at the edges.
#[derive(Clone, Debug)]
pub struct Star {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
	/// Twinkle phase.
	pub angle: f64,
}

/// A streak that waits out its delay, then crosses the sky until its lifetime wraps.
#[derive(Clone, Debug)]
pub struct ShootingStar {
	pub x: f64,
	pub y: f64,
	pub speed: f64,
	pub size: f64,
	pub opacity: f64,
	/// Heading in radians.
	pub angle: f64,
	pub lifetime: Lifetime,
}

/// Particle roles of the galaxy motif.
#[derive(Clone, Debug)]
pub enum GalaxyParticle {
	Star(Star),
	ShootingStar(ShootingStar),
}

impl ParticleState for GalaxyParticle {
	fn position(&self) -> (f64, f64) {
		match self {
			GalaxyParticle::Star(s) => (s.x, s.y),
			GalaxyParticle::ShootingStar(s) => (s.x, s.y),
		}
	}

	fn size(&self) -> f64 {
		match self {
			GalaxyParticle::Star(s) => s.size,
			GalaxyParticle::ShootingStar(s) => s.size,
		}
	}

	fn opacity(&self) -> f64 {
		match self {
			GalaxyParticle::Star(s) => s.opacity,
			GalaxyParticle::ShootingStar(s) => s.opacity,
		}
	}
}

/// Purple theme.
pub struct Galaxy;

impl Galaxy {
	fn step_star(star: &mut Star, index: usize, surface: &mut dyn Surface, frame: &Frame<'_>) {
		star.angle += 0.01;
		let twinkle = (star.angle * 3.0 + index as f64).sin() * 0.3 + 0.7;

		star.x += star.vx;
		star.y += star.vy;
		wrap(&mut star.x, frame.width);
		wrap(&mut star.y, frame.height);

		let color = match index % 3 {
			0 => frame.palette.primary,
			1 => frame.palette.secondary,
			_ => Color::WHITE,
		};
		surface.set_fill(color.into());
		surface.set_global_alpha(star.opacity * twinkle);
		surface.set_shadow(color, star.size * 2.0);
		surface.fill_circle(star.x, star.y, star.size);
		surface.reset_effects();
	}

	fn step_shooting_star(
		star: &mut ShootingStar,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		if star.lifetime.advance() {
			star.x = uniform(rng, 0.0, frame.width);
			star.y = uniform(rng, 0.0, frame.height * SHOOTING_STAR_SPAWN_BAND);
			star.opacity = 0.0;
			return;
		}
		if star.lifetime.life <= SHOOTING_STAR_DELAY {
			return;
		}
		// Parked off the surface until the lifetime wraps.
		if star.x > frame.width + SHOOTING_STAR_TAIL
			|| star.y > frame.height + SHOOTING_STAR_TAIL
			|| star.x < -SHOOTING_STAR_TAIL
			|| star.y < -SHOOTING_STAR_TAIL
		{
			star.opacity = 0.0;
			return;
		}

		star.opacity = (star.opacity + 0.05).min(1.0);
		let (dx, dy) = (star.angle.cos(), star.angle.sin());
		star.x += dx * star.speed;
		star.y += dy * star.speed;

		let (tail_x, tail_y) = (
			star.x - dx * SHOOTING_STAR_TAIL,
			star.y - dy * SHOOTING_STAR_TAIL,
		);
		let primary = frame.palette.primary;
		surface.set_stroke(
			Gradient::Linear {
				x0: star.x,
				y0: star.y,
				x1: tail_x,
				y1: tail_y,
				stops: vec![(0.0, primary), (1.0, primary.with_alpha(0.0))],
			}
			.into(),
		);
		surface.set_global_alpha(star.opacity);
		surface.set_line_width(star.size);
		surface.begin_path();
		surface.move_to(star.x, star.y);
		surface.line_to(tail_x, tail_y);
		surface.stroke();
		surface.set_global_alpha(1.0);
	}

	fn draw_nebulae(surface: &mut dyn Surface, frame: &Frame<'_>) {
		let t = frame.time * 0.5;
		for i in 0..3 {
			let i = i as f64;
			let x = frame.width * 0.5 + (t + i).sin() * frame.width * 0.3;
			let y = frame.height * 0.4 + (t + i * 2.0).cos() * frame.height * 0.2;
			surface.set_fill(
				Gradient::Radial {
					x,
					y,
					radius: 200.0,
					stops: vec![
						(0.0, frame.palette.primary.with_alpha_byte(0x08)),
						(0.5, frame.palette.secondary.with_alpha_byte(0x04)),
						(1.0, Color::TRANSPARENT),
					],
				}
				.into(),
			);
			surface.fill_rect(0.0, 0.0, frame.width, frame.height);
		}
	}
}

impl Motif for Galaxy {
	type Particle = GalaxyParticle;

	const FADE_ALPHA: f64 = 0.127;

	fn seed(width: f64, height: f64, rng: &mut SmallRng) -> Vec<GalaxyParticle> {
		let mut particles = Vec::with_capacity(STAR_COUNT + SHOOTING_STAR_COUNT);

		for _ in 0..STAR_COUNT {
			particles.push(GalaxyParticle::Star(Star {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height),
				vx: jitter(rng, 0.25),
				vy: jitter(rng, 0.25),
				size: uniform(rng, 0.0, 3.0),
				opacity: uniform(rng, 0.0, 1.0),
				angle: random_angle(rng),
			}));
		}

		for _ in 0..SHOOTING_STAR_COUNT {
			particles.push(GalaxyParticle::ShootingStar(ShootingStar {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height * 0.5),
				speed: uniform(rng, 5.0, 5.0),
				size: 2.0,
				opacity: 0.0,
				angle: PI / 4.0 + jitter(rng, 0.25),
				lifetime: Lifetime::new(uniform(rng, 100.0, 100.0) as u32),
			}));
		}

		particles
	}

	fn step(
		particles: &mut [GalaxyParticle],
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		for (index, particle) in particles.iter_mut().enumerate() {
			match particle {
				GalaxyParticle::Star(star) => Self::step_star(star, index, surface, frame),
				GalaxyParticle::ShootingStar(star) => {
					Self::step_shooting_star(star, surface, frame, rng)
				}
			}
		}
		Self::draw_nebulae(surface, frame);
	}
}
