//! Divine flames: rising flames, orbiting golden orbs and rare trident flashes.

use rand::rngs::SmallRng;

use super::{Frame, Motif};
use crate::components::hero_background::particles::{
	Lifetime, ParticleState, jitter, random_angle, uniform, wrap,
};
use crate::components::hero_background::surface::{Gradient, Surface};
use crate::components::hero_background::theme::Color;

/// Rising flames per surface.
pub const FLAME_COUNT: usize = 60;
/// Golden orbs per surface.
pub const ORB_COUNT: usize = 30;
/// Trident flashes per surface.
pub const TRIDENT_COUNT: usize = 5;

const FLAME_SHRINK: f64 = 0.997;
const FLAME_DECAY: f64 = 0.998;
const FLAME_MIN_OPACITY: f64 = 0.05;
const TRIDENT_LIFE: u32 = 150;
/// Tridents are only drawn near the peak of their flash.
const TRIDENT_THRESHOLD: f64 = 0.5;

/// A flame rising from the bottom edge, shrinking and fading as it climbs.
#[derive(Clone, Debug)]
pub struct Flame {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub speed: f64,
	pub size: f64,
	pub opacity: f64,
	/// Hue offset toward deep orange, in degrees.
	pub hue: f64,
	pub lifetime: Lifetime,
}

impl Flame {
	fn respawn(&mut self, frame: &Frame<'_>, rng: &mut SmallRng) {
		self.y = frame.height + uniform(rng, 0.0, 50.0);
		self.x = uniform(rng, 0.0, frame.width);
		self.size = uniform(rng, 4.0, 10.0);
		self.opacity = uniform(rng, 0.4, 0.5);
		self.lifetime.life = 0;
	}
}

/// A small orb circling on a slow wobble.
#[derive(Clone, Debug)]
pub struct GoldenOrb {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
	/// Orbit phase.
	pub angle: f64,
}

/// A trident that flashes in and out once per life, then relocates.
#[derive(Clone, Debug)]
pub struct TridentFlash {
	pub x: f64,
	pub y: f64,
	pub lifetime: Lifetime,
}

/// Particle roles of the divine flames motif.
#[derive(Clone, Debug)]
pub enum HanumanParticle {
	Flame(Flame),
	Orb(GoldenOrb),
	Trident(TridentFlash),
}

impl ParticleState for HanumanParticle {
	fn position(&self) -> (f64, f64) {
		match self {
			HanumanParticle::Flame(f) => (f.x, f.y),
			HanumanParticle::Orb(o) => (o.x, o.y),
			HanumanParticle::Trident(t) => (t.x, t.y),
		}
	}

	fn size(&self) -> f64 {
		match self {
			HanumanParticle::Flame(f) => f.size,
			HanumanParticle::Orb(o) => o.size,
			HanumanParticle::Trident(t) => 15.0 * t.lifetime.flash(),
		}
	}

	fn opacity(&self) -> f64 {
		match self {
			HanumanParticle::Flame(f) => f.opacity,
			HanumanParticle::Orb(o) => o.opacity,
			HanumanParticle::Trident(t) => t.lifetime.flash(),
		}
	}
}

/// Hanuman theme.
pub struct DivineFlames;

impl DivineFlames {
	fn step_flame(
		flame: &mut Flame,
		index: usize,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		let expired = flame.lifetime.advance();
		flame.y -= flame.speed;
		flame.x += (frame.time * 2.0 + index as f64).sin() * 0.8 + flame.vx * 0.3;
		flame.size *= FLAME_SHRINK;
		flame.opacity *= FLAME_DECAY;

		if expired || flame.y < -50.0 || flame.opacity < FLAME_MIN_OPACITY {
			flame.respawn(frame, rng);
		}

		let lightness = 50.0 + (frame.time * 3.0 + index as f64).sin() * 15.0;
		surface.set_fill(Color::hsl(25.0 + flame.hue, 100.0, lightness).into());
		surface.set_global_alpha(flame.opacity);
		surface.set_shadow(frame.palette.primary, 20.0);
		surface.fill_circle(flame.x, flame.y, flame.size);
		surface.reset_effects();
	}

	fn step_orb(orb: &mut GoldenOrb, index: usize, surface: &mut dyn Surface, frame: &Frame<'_>) {
		orb.angle += 0.008;
		let phase = orb.angle + index as f64;
		orb.x += phase.sin() * 0.5 + orb.vx;
		orb.y += phase.cos() * 0.5 + orb.vy;
		wrap(&mut orb.x, frame.width);
		wrap(&mut orb.y, frame.height);

		let glow = (orb.angle * 2.0 + index as f64).sin() * 0.3 + 0.7;
		let color = frame.palette.secondary;
		surface.set_fill(color.into());
		surface.set_global_alpha(orb.opacity * glow);
		surface.set_shadow(color, 15.0);
		surface.fill_circle(orb.x, orb.y, orb.size);
		surface.reset_effects();
	}

	fn step_trident(
		trident: &mut TridentFlash,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		if trident.lifetime.advance() {
			trident.x = uniform(rng, 0.0, frame.width);
			trident.y = uniform(rng, 0.0, frame.height * 0.6);
		}

		let flash = trident.lifetime.flash();
		if flash <= TRIDENT_THRESHOLD {
			return;
		}

		let (x, y) = (trident.x, trident.y);
		let s = 15.0 * flash;
		let color = frame.palette.secondary;
		surface.set_stroke(color.into());
		surface.set_line_width(2.0);
		surface.set_global_alpha(flash * 0.8);
		surface.set_shadow(color, 20.0);

		// Shaft and crossbar.
		surface.begin_path();
		surface.move_to(x - s, y);
		surface.line_to(x + s, y);
		surface.move_to(x, y - s * 1.5);
		surface.line_to(x, y + s);
		surface.stroke();

		// Prongs.
		surface.begin_path();
		surface.move_to(x - s * 0.5, y - s * 1.2);
		surface.line_to(x - s * 0.5, y - s * 0.5);
		surface.move_to(x + s * 0.5, y - s * 1.2);
		surface.line_to(x + s * 0.5, y - s * 0.5);
		surface.stroke();

		surface.reset_effects();
	}

	fn draw_aura(surface: &mut dyn Surface, frame: &Frame<'_>) {
		let pulse = frame.time.sin() * 0.2 + 0.8;
		surface.set_fill(
			Gradient::Radial {
				x: frame.width * 0.5,
				y: frame.height * 0.85,
				radius: 300.0 * pulse,
				stops: vec![
					(0.0, frame.palette.primary.with_alpha_byte(0x15)),
					(0.4, frame.palette.secondary.with_alpha_byte(0x08)),
					(1.0, Color::TRANSPARENT),
				],
			}
			.into(),
		);
		surface.fill_rect(0.0, 0.0, frame.width, frame.height);
	}
}

impl Motif for DivineFlames {
	type Particle = HanumanParticle;

	const FADE_ALPHA: f64 = 0.154;

	fn seed(width: f64, height: f64, rng: &mut SmallRng) -> Vec<HanumanParticle> {
		let mut particles = Vec::with_capacity(FLAME_COUNT + ORB_COUNT + TRIDENT_COUNT);

		for _ in 0..FLAME_COUNT {
			let max_life = uniform(rng, 100.0, 100.0) as u32;
			let mut lifetime = Lifetime::new(max_life);
			lifetime.life = uniform(rng, 0.0, 100.0) as u32;
			particles.push(HanumanParticle::Flame(Flame {
				x: uniform(rng, 0.0, width),
				y: height + uniform(rng, 0.0, 100.0),
				vx: jitter(rng, 1.0),
				speed: uniform(rng, 1.5, 3.0),
				size: uniform(rng, 4.0, 10.0),
				opacity: uniform(rng, 0.4, 0.5),
				hue: uniform(rng, 0.0, 40.0),
				lifetime,
			}));
		}

		for _ in 0..ORB_COUNT {
			particles.push(HanumanParticle::Orb(GoldenOrb {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height),
				vx: jitter(rng, 0.4),
				vy: jitter(rng, 0.4),
				size: uniform(rng, 2.0, 5.0),
				opacity: uniform(rng, 0.3, 0.5),
				angle: random_angle(rng),
			}));
		}

		for _ in 0..TRIDENT_COUNT {
			particles.push(HanumanParticle::Trident(TridentFlash {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height * 0.5),
				lifetime: Lifetime::staggered(TRIDENT_LIFE, rng),
			}));
		}

		particles
	}

	fn step(
		particles: &mut [HanumanParticle],
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		for (index, particle) in particles.iter_mut().enumerate() {
			match particle {
				HanumanParticle::Flame(f) => Self::step_flame(f, index, surface, frame, rng),
				HanumanParticle::Orb(o) => Self::step_orb(o, index, surface, frame),
				HanumanParticle::Trident(t) => Self::step_trident(t, surface, frame, rng),
			}
		}
		Self::draw_aura(surface, frame);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::hero_background::particles::test_rng;
	use crate::components::hero_background::surface::recording::RecordingSurface;
	use crate::components::hero_background::theme::ThemeName;

	fn frame(palette: &crate::components::hero_background::theme::Palette) -> Frame<'_> {
		Frame {
			width: 400.0,
			height: 300.0,
			time: 0.0,
			palette,
		}
	}

	#[test]
	fn seeds_three_roles() {
		let mut rng = test_rng();
		let particles = DivineFlames::seed(400.0, 300.0, &mut rng);
		let count = |f: fn(&HanumanParticle) -> bool| particles.iter().filter(|p| f(p)).count();
		assert_eq!(count(|p| matches!(p, HanumanParticle::Flame(_))), FLAME_COUNT);
		assert_eq!(count(|p| matches!(p, HanumanParticle::Orb(_))), ORB_COUNT);
		assert_eq!(count(|p| matches!(p, HanumanParticle::Trident(_))), TRIDENT_COUNT);
		for p in &particles {
			if let HanumanParticle::Flame(f) = p {
				assert!(f.lifetime.life < f.lifetime.max_life);
			}
		}
	}

	#[test]
	fn flames_respawn_before_fading_or_shrinking_away() {
		let palette = ThemeName::Hanuman.palette();
		let frame = frame(&palette);
		let mut rng = test_rng();
		let mut particles = DivineFlames::seed(400.0, 300.0, &mut rng);
		let mut surface = RecordingSurface::default();
		for _ in 0..5_000 {
			DivineFlames::step(&mut particles, &mut surface, &frame, &mut rng);
			surface.clear();
			for p in &particles {
				if let HanumanParticle::Flame(f) = p {
					assert!(f.opacity >= FLAME_MIN_OPACITY);
					assert!(f.size > 0.0);
					assert!(f.y >= -50.0);
					assert!(f.lifetime.life < f.lifetime.max_life);
				}
			}
		}
	}

	#[test]
	fn flame_respawns_at_the_bottom_after_exactly_one_life() {
		let palette = ThemeName::Hanuman.palette();
		let frame = frame(&palette);
		let mut rng = test_rng();
		let mut flame = Flame {
			x: 200.0,
			y: frame.height,
			vx: 0.0,
			speed: 1.0,
			size: 8.0,
			opacity: 0.5,
			hue: 0.0,
			lifetime: Lifetime::new(150),
		};
		let mut surface = RecordingSurface::default();

		for _ in 0..149 {
			DivineFlames::step_flame(&mut flame, 0, &mut surface, &frame, &mut rng);
		}
		assert_eq!(flame.lifetime.life, 149);
		assert_eq!(flame.y, frame.height - 149.0);

		DivineFlames::step_flame(&mut flame, 0, &mut surface, &frame, &mut rng);
		assert_eq!(flame.lifetime.life, 0);
		assert!((frame.height..frame.height + 50.0).contains(&flame.y), "y {}", flame.y);
		assert!((0.0..frame.width).contains(&flame.x), "x {}", flame.x);
		assert!(flame.opacity >= 0.4);
	}

	#[test]
	fn trident_flashes_only_near_its_peak() {
		let palette = ThemeName::Hanuman.palette();
		let frame = frame(&palette);
		let mut rng = test_rng();
		let mut trident = TridentFlash {
			x: -500.0,
			y: -500.0,
			lifetime: Lifetime::new(TRIDENT_LIFE),
		};
		let mut surface = RecordingSurface::default();

		let mut drawn_ticks = 0;
		for _ in 0..TRIDENT_LIFE {
			let before = surface.strokes();
			DivineFlames::step_trident(&mut trident, &mut surface, &frame, &mut rng);
			if surface.strokes() > before {
				drawn_ticks += 1;
				assert!(trident.lifetime.flash() > TRIDENT_THRESHOLD);
			}
		}
		// sin(pi * p) > 0.5 for p in (1/6, 5/6): about two thirds of the cycle.
		assert!((95..=105).contains(&drawn_ticks), "drawn {}", drawn_ticks);
		assert_eq!(trident.lifetime.life, 0);
		assert!((0.0..frame.width).contains(&trident.x), "x {}", trident.x);
		assert!((0.0..frame.height * 0.6).contains(&trident.y), "y {}", trident.y);
	}
}
