//! Shared particle building blocks used by every motif.

use std::f64::consts::PI;

use rand::Rng;
use rand::rngs::SmallRng;

/// Read-only view over any motif's particle, used for bookkeeping and tests.
pub trait ParticleState {
	/// Center in surface coordinates.
	fn position(&self) -> (f64, f64);
	/// Radius or glyph scale.
	fn size(&self) -> f64;
	/// Current opacity before any per-frame flash or twinkle.
	fn opacity(&self) -> f64;
}

/// Bounded lifecycle counted in ticks.
///
/// `life` stays in `0..max_life`; the tick that would reach `max_life` wraps
/// it back to zero and reports a respawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Lifetime {
	pub life: u32,
	pub max_life: u32,
}

impl Lifetime {
	pub fn new(max_life: u32) -> Self {
		Self {
			life: 0,
			max_life: max_life.max(1),
		}
	}

	/// Starts part-way through the cycle so a population does not pulse in sync.
	pub fn staggered(max_life: u32, rng: &mut SmallRng) -> Self {
		let mut lifetime = Self::new(max_life);
		lifetime.life = rng.random_range(0..lifetime.max_life);
		lifetime
	}

	/// Advances one tick. Returns `true` when the cycle wrapped.
	pub fn advance(&mut self) -> bool {
		self.life += 1;
		if self.life >= self.max_life {
			self.life = 0;
			true
		} else {
			false
		}
	}

	/// Fraction of the cycle elapsed, in `0..1`.
	pub fn progress(&self) -> f64 {
		self.life as f64 / self.max_life as f64
	}

	/// Rise-then-fall envelope `sin(progress * pi)`.
	pub fn flash(&self) -> f64 {
		(self.progress() * PI).sin()
	}
}

/// Uniform sample in `[low, low + span)`.
pub fn uniform(rng: &mut SmallRng, low: f64, span: f64) -> f64 {
	low + rng.random::<f64>() * span
}

/// Uniform sample in `[-half, half)`.
pub fn jitter(rng: &mut SmallRng, half: f64) -> f64 {
	(rng.random::<f64>() - 0.5) * 2.0 * half
}

/// Uniform heading in `[0, 2pi)`.
pub fn random_angle(rng: &mut SmallRng) -> f64 {
	rng.random::<f64>() * 2.0 * PI
}

/// Teleports a coordinate that left `0..=extent` to the opposite edge.
pub fn wrap(value: &mut f64, extent: f64) {
	if *value < 0.0 {
		*value = extent;
	} else if *value > extent {
		*value = 0.0;
	}
}

/// Reflects velocity so the coordinate heads back inside `0..=extent`.
pub fn bounce(value: f64, velocity: &mut f64, extent: f64) {
	if value < 0.0 {
		*velocity = velocity.abs();
	} else if value > extent {
		*velocity = -velocity.abs();
	}
}

/// Katakana, digits, latin capitals and code punctuation.
pub const MATRIX_GLYPHS: &[char] = &[
	'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ',
	'ス', 'セ', 'ソ', 'タ', 'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ',
	'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ', 'ム', 'メ', 'モ', 'ヤ',
	'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ヲ', 'ン', '0', '1',
	'2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D',
	'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P',
	'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '<', '>',
	'{', '}', '[', ']', '(', ')', ';', ':', '=', '+', '-', '*',
	'/', '&', '|', '!', '?', '@', '#', '$', '%',
];

/// Words streamed by the data stream motif.
pub const CODE_SNIPPETS: &[&str] = &[
	"const",
	"let",
	"function",
	"return",
	"async",
	"await",
	"import",
	"export",
	"class",
	"interface",
	"type",
	"{}",
	"[]",
	"=>",
	"===",
	"!==",
	"&&",
	"||",
	"npm",
	"git",
	"push",
	"pull",
	"merge",
	"deploy",
	"<div>",
	"</div>",
	"API",
	"useState",
	"useEffect",
	"props",
	"state",
	"render",
	"component",
	"hook",
];

/// One glyph from [`MATRIX_GLYPHS`].
pub fn random_glyph(rng: &mut SmallRng) -> char {
	MATRIX_GLYPHS[rng.random_range(0..MATRIX_GLYPHS.len())]
}

pub fn random_snippet(rng: &mut SmallRng) -> &'static str {
	CODE_SNIPPETS[rng.random_range(0..CODE_SNIPPETS.len())]
}

#[cfg(test)]
pub(crate) fn test_rng() -> SmallRng {
	use rand::SeedableRng;
	SmallRng::seed_from_u64(0x5eed)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lifetime_wraps_after_exactly_max_life_ticks() {
		let mut lifetime = Lifetime::new(5);
		for _ in 0..4 {
			assert!(!lifetime.advance());
		}
		assert!(lifetime.advance());
		assert_eq!(lifetime.life, 0);
	}

	#[test]
	fn lifetime_never_reaches_max() {
		let mut rng = test_rng();
		let mut lifetime = Lifetime::staggered(150, &mut rng);
		for _ in 0..1_000 {
			lifetime.advance();
			assert!(lifetime.life < lifetime.max_life);
		}
	}

	#[test]
	fn zero_max_life_is_promoted() {
		let mut lifetime = Lifetime::new(0);
		assert_eq!(lifetime.max_life, 1);
		assert!(lifetime.advance());
	}

	#[test]
	fn flash_envelope_rises_then_falls() {
		let mut lifetime = Lifetime::new(100);
		assert!(lifetime.flash().abs() < 1e-9);
		lifetime.life = 50;
		assert!((lifetime.flash() - 1.0).abs() < 1e-9);
		lifetime.life = 99;
		assert!(lifetime.flash() < 0.1);
	}

	#[test]
	fn wrap_teleports_to_opposite_edge() {
		let mut x = -1.0;
		wrap(&mut x, 100.0);
		assert_eq!(x, 100.0);
		let mut x = 101.0;
		wrap(&mut x, 100.0);
		assert_eq!(x, 0.0);
		let mut x = 50.0;
		wrap(&mut x, 100.0);
		assert_eq!(x, 50.0);
	}

	#[test]
	fn bounce_points_velocity_inward() {
		let mut v = -2.0;
		bounce(-5.0, &mut v, 100.0);
		assert_eq!(v, 2.0);
		// Already heading inward: stays that way rather than flipping back out.
		bounce(-3.0, &mut v, 100.0);
		assert_eq!(v, 2.0);
		bounce(105.0, &mut v, 100.0);
		assert_eq!(v, -2.0);
	}

	#[test]
	fn samplers_stay_in_range() {
		let mut rng = test_rng();
		for _ in 0..500 {
			let u = uniform(&mut rng, 2.0, 4.0);
			assert!((2.0..6.0).contains(&u));
			let j = jitter(&mut rng, 1.5);
			assert!((-1.5..1.5).contains(&j));
			assert!(MATRIX_GLYPHS.contains(&random_glyph(&mut rng)));
			assert!(CODE_SNIPPETS.contains(&random_snippet(&mut rng)));
		}
	}
}
