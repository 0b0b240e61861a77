//! Web sling: drifting anchors joined by curved web strands over a radial web.

use std::f64::consts::PI;

use rand::Rng;
use rand::rngs::SmallRng;

use super::{Frame, Motif};
use crate::components::hero_background::particles::{
	Lifetime, ParticleState, bounce, jitter, uniform, wrap,
};
use crate::components::hero_background::surface::Surface;

/// Web anchors per surface.
pub const ANCHOR_COUNT: usize = 12;
/// Falling debris per surface.
pub const DEBRIS_COUNT: usize = 80;

/// Anchors further apart than this are not connected.
pub const WEB_REACH: f64 = 350.0;
const WEB_MAX_ALPHA: f64 = 60.0;

/// A drifting anchor point that strands attach to. Relocates each life.
#[derive(Clone, Debug)]
pub struct WebAnchor {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: f64,
	pub lifetime: Lifetime,
}

/// A speck falling through the web.
#[derive(Clone, Debug)]
pub struct Debris {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	/// Always downward.
	pub vy: f64,
	pub size: f64,
	pub opacity: f64,
	/// Blue debris uses the secondary color, the rest the primary.
	pub blue: bool,
}

/// Particle roles of the web sling motif.
#[derive(Clone, Debug)]
pub enum WebParticle {
	Anchor(WebAnchor),
	Debris(Debris),
}

impl ParticleState for WebParticle {
	fn position(&self) -> (f64, f64) {
		match self {
			WebParticle::Anchor(a) => (a.x, a.y),
			WebParticle::Debris(d) => (d.x, d.y),
		}
	}

	fn size(&self) -> f64 {
		match self {
			WebParticle::Anchor(a) => a.size,
			WebParticle::Debris(d) => d.size,
		}
	}

	fn opacity(&self) -> f64 {
		match self {
			WebParticle::Anchor(_) => 0.6,
			WebParticle::Debris(d) => d.opacity,
		}
	}
}

/// Strand opacity for two anchors `distance` apart, or `None` when out of reach.
///
/// Falls linearly from `60/255` at zero distance to nothing at [`WEB_REACH`].
pub fn strand_alpha(distance: f64) -> Option<f64> {
	if distance >= WEB_REACH {
		return None;
	}
	Some(((1.0 - distance / WEB_REACH) * WEB_MAX_ALPHA).floor() / 255.0)
}

/// Spiderman theme.
pub struct WebSling;

impl WebSling {
	fn step_anchor(
		anchor: &mut WebAnchor,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		anchor.x += anchor.vx;
		anchor.y += anchor.vy;
		bounce(anchor.x, &mut anchor.vx, frame.width);
		bounce(anchor.y, &mut anchor.vy, frame.height);

		if anchor.lifetime.advance() {
			anchor.x = uniform(rng, 0.0, frame.width);
			anchor.y = uniform(rng, 0.0, frame.height);
		}

		let color = frame.palette.primary;
		surface.set_fill(color.into());
		surface.set_global_alpha(0.6);
		surface.set_shadow(color, 10.0);
		surface.fill_circle(anchor.x, anchor.y, anchor.size);
		surface.reset_effects();
	}

	fn step_debris(
		debris: &mut Debris,
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		debris.x += debris.vx;
		debris.y += debris.vy;
		if debris.y > frame.height {
			debris.y = -10.0;
			debris.x = uniform(rng, 0.0, frame.width);
		}
		wrap(&mut debris.x, frame.width);

		let color = if debris.blue {
			frame.palette.secondary
		} else {
			frame.palette.primary
		};
		surface.set_fill(color.into());
		surface.set_global_alpha(debris.opacity);
		surface.fill_circle(debris.x, debris.y, debris.size);
		surface.set_global_alpha(1.0);
	}

	fn draw_strands(anchors: &[(f64, f64)], surface: &mut dyn Surface, frame: &Frame<'_>) {
		surface.set_line_width(1.0);
		for (i, &(x1, y1)) in anchors.iter().enumerate() {
			for (j, &(x2, y2)) in anchors.iter().enumerate().skip(i + 1) {
				let distance = (x1 - x2).hypot(y1 - y2);
				let Some(alpha) = strand_alpha(distance) else {
					continue;
				};
				let mid_x = (x1 + x2) / 2.0 + (frame.time + i as f64).sin() * 20.0;
				let mid_y = (y1 + y2) / 2.0 + (frame.time + j as f64).cos() * 20.0;
				surface.set_stroke(frame.palette.primary.with_alpha(alpha).into());
				surface.begin_path();
				surface.move_to(x1, y1);
				surface.quadratic_curve_to(mid_x, mid_y, x2, y2);
				surface.stroke();
			}
		}
	}

	fn draw_radial_web(surface: &mut dyn Surface, frame: &Frame<'_>) {
		let (cx, cy) = (frame.width * 0.5, frame.height * 0.5);
		surface.set_stroke(frame.palette.secondary.with_alpha_byte(0x10).into());
		surface.set_line_width(0.5);
		for ring in 1..=5 {
			surface.stroke_circle(cx, cy, ring as f64 * 80.0);
		}
		for spoke in 0..12 {
			let angle = spoke as f64 / 12.0 * 2.0 * PI + frame.time * 0.1;
			surface.begin_path();
			surface.move_to(cx, cy);
			surface.line_to(cx + angle.cos() * 400.0, cy + angle.sin() * 400.0);
			surface.stroke();
		}
	}
}

impl Motif for WebSling {
	type Particle = WebParticle;

	const FADE_ALPHA: f64 = 0.154;

	fn seed(width: f64, height: f64, rng: &mut SmallRng) -> Vec<WebParticle> {
		let mut particles = Vec::with_capacity(ANCHOR_COUNT + DEBRIS_COUNT);

		for _ in 0..ANCHOR_COUNT {
			particles.push(WebParticle::Anchor(WebAnchor {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height),
				vx: jitter(rng, 0.5),
				vy: jitter(rng, 0.5),
				size: 3.0,
				lifetime: Lifetime::new(uniform(rng, 300.0, 200.0) as u32),
			}));
		}

		for _ in 0..DEBRIS_COUNT {
			particles.push(WebParticle::Debris(Debris {
				x: uniform(rng, 0.0, width),
				y: uniform(rng, 0.0, height),
				vx: jitter(rng, 0.25),
				vy: uniform(rng, 0.0, 0.5),
				size: uniform(rng, 1.0, 2.0),
				opacity: uniform(rng, 0.2, 0.4),
				blue: !rng.random_bool(0.4),
			}));
		}

		particles
	}

	fn step(
		particles: &mut [WebParticle],
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	) {
		let mut anchors = Vec::with_capacity(ANCHOR_COUNT);
		for particle in particles.iter_mut() {
			match particle {
				WebParticle::Anchor(anchor) => {
					Self::step_anchor(anchor, surface, frame, rng);
					anchors.push((anchor.x, anchor.y));
				}
				WebParticle::Debris(debris) => Self::step_debris(debris, surface, frame, rng),
			}
		}
		Self::draw_strands(&anchors, surface, frame);
		Self::draw_radial_web(surface, frame);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::hero_background::particles::test_rng;
	use crate::components::hero_background::surface::recording::RecordingSurface;
	use crate::components::hero_background::theme::ThemeName;

	#[test]
	fn strand_alpha_falls_with_distance() {
		assert_eq!(strand_alpha(0.0), Some(60.0 / 255.0));
		assert_eq!(strand_alpha(175.0), Some(30.0 / 255.0));
		assert_eq!(strand_alpha(WEB_REACH), None);
		assert_eq!(strand_alpha(1_000.0), None);
		let near = strand_alpha(50.0).unwrap();
		let far = strand_alpha(300.0).unwrap();
		assert!(near > far);
	}

	#[test]
	fn anchor_relocates_after_exactly_one_life() {
		let palette = ThemeName::Spiderman.palette();
		let frame = Frame {
			width: 640.0,
			height: 480.0,
			time: 0.0,
			palette: &palette,
		};
		let mut rng = test_rng();
		let mut anchor = WebAnchor {
			x: 5.0,
			y: 5.0,
			vx: 0.0,
			vy: 0.0,
			size: 4.0,
			lifetime: Lifetime::new(300),
		};
		let mut surface = RecordingSurface::default();

		for _ in 0..299 {
			WebSling::step_anchor(&mut anchor, &mut surface, &frame, &mut rng);
		}
		assert_eq!(anchor.lifetime.life, 299);
		assert_eq!((anchor.x, anchor.y), (5.0, 5.0));

		WebSling::step_anchor(&mut anchor, &mut surface, &frame, &mut rng);
		assert_eq!(anchor.lifetime.life, 0);
		assert!((0.0..640.0).contains(&anchor.x));
		assert!((0.0..480.0).contains(&anchor.y));
		assert_ne!((anchor.x, anchor.y), (5.0, 5.0));
	}

	#[test]
	fn strands_connect_only_anchors_in_reach() {
		let palette = ThemeName::Spiderman.palette();
		let frame = Frame {
			width: 1_000.0,
			height: 1_000.0,
			time: 0.0,
			palette: &palette,
		};
		let anchors = [(0.0, 0.0), (100.0, 0.0), (900.0, 900.0)];
		let mut surface = RecordingSurface::default();
		WebSling::draw_strands(&anchors, &mut surface, &frame);
		assert_eq!(surface.strokes(), 1);
	}

	#[test]
	fn radial_web_has_rings_and_spokes() {
		let palette = ThemeName::Spiderman.palette();
		let frame = Frame {
			width: 800.0,
			height: 600.0,
			time: 3.0,
			palette: &palette,
		};
		let mut surface = RecordingSurface::default();
		WebSling::draw_radial_web(&mut surface, &frame);
		assert_eq!(surface.strokes(), 5 + 12);
	}

	#[test]
	fn debris_falls_and_recycles_at_the_top() {
		let palette = ThemeName::Spiderman.palette();
		let frame = Frame {
			width: 200.0,
			height: 100.0,
			time: 0.0,
			palette: &palette,
		};
		let mut rng = test_rng();
		let mut particles = WebSling::seed(200.0, 100.0, &mut rng);
		let mut surface = RecordingSurface::default();
		for _ in 0..2_000 {
			WebSling::step(&mut particles, &mut surface, &frame, &mut rng);
			surface.clear();
		}
		for p in &particles {
			if let WebParticle::Debris(d) = p {
				assert!(d.y >= -10.0 && d.y <= frame.height);
				assert!((0.0..=frame.width).contains(&d.x));
			}
		}
	}
}
