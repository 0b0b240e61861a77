//! The active theme's particle set.
//!
//! A [`ParticleStore`] holds exactly one theme's particles. Switching themes
//! or resizing builds a fresh store and drops the old one whole; nothing is
//! carried across.

use rand::rngs::SmallRng;

use super::motifs::data_stream::{DataStream, StreamGlyph};
use super::motifs::divine_flames::{DivineFlames, HanumanParticle};
use super::motifs::energy_blast::{EnergyBlast, MarvelParticle};
use super::motifs::galaxy::{Galaxy, GalaxyParticle};
use super::motifs::matrix_rain::{MatrixRain, RainColumn};
use super::motifs::sparkles::{PinkParticle, Sparkles};
use super::motifs::sun_rays::{SunParticle, SunRays};
use super::motifs::web_sling::{WebParticle, WebSling};
use super::motifs::{Frame, Motif};
use super::particles::ParticleState;
use super::surface::Surface;
use super::theme::ThemeName;

/// Particles for one theme, tagged by that theme.
#[derive(Clone, Debug)]
pub enum ParticleStore {
	/// Falling code snippets and binary digits.
	Cyan(Vec<StreamGlyph>),
	/// Stars and shooting stars.
	Purple(Vec<GalaxyParticle>),
	/// Matrix rain columns.
	Green(Vec<RainColumn>),
	/// Light beams and embers.
	Orange(Vec<SunParticle>),
	/// Bubbles and sparkles.
	Pink(Vec<PinkParticle>),
	/// Energy orbs and sparks.
	Marvel(Vec<MarvelParticle>),
	/// Web anchors and falling debris.
	Spiderman(Vec<WebParticle>),
	/// Flames, golden orbs and trident flashes.
	Hanuman(Vec<HanumanParticle>),
}

fn seed_with<M: Motif>(width: f64, height: f64, rng: &mut SmallRng) -> Vec<M::Particle> {
	if width <= 0.0 || height <= 0.0 || !width.is_finite() || !height.is_finite() {
		return Vec::new();
	}
	M::seed(width, height, rng)
}

impl ParticleStore {
	/// Runs the theme's factory for a `width` x `height` surface. An empty
	/// surface yields an empty store.
	pub fn seed(theme: ThemeName, width: f64, height: f64, rng: &mut SmallRng) -> Self {
		match theme {
			ThemeName::Cyan => Self::Cyan(seed_with::<DataStream>(width, height, rng)),
			ThemeName::Purple => Self::Purple(seed_with::<Galaxy>(width, height, rng)),
			ThemeName::Green => Self::Green(seed_with::<MatrixRain>(width, height, rng)),
			ThemeName::Orange => Self::Orange(seed_with::<SunRays>(width, height, rng)),
			ThemeName::Pink => Self::Pink(seed_with::<Sparkles>(width, height, rng)),
			ThemeName::Marvel => Self::Marvel(seed_with::<EnergyBlast>(width, height, rng)),
			ThemeName::Spiderman => Self::Spiderman(seed_with::<WebSling>(width, height, rng)),
			ThemeName::Hanuman => Self::Hanuman(seed_with::<DivineFlames>(width, height, rng)),
		}
	}

	/// Theme whose particles this store holds.
	pub fn theme(&self) -> ThemeName {
		match self {
			Self::Cyan(_) => ThemeName::Cyan,
			Self::Purple(_) => ThemeName::Purple,
			Self::Green(_) => ThemeName::Green,
			Self::Orange(_) => ThemeName::Orange,
			Self::Pink(_) => ThemeName::Pink,
			Self::Marvel(_) => ThemeName::Marvel,
			Self::Spiderman(_) => ThemeName::Spiderman,
			Self::Hanuman(_) => ThemeName::Hanuman,
		}
	}

	/// Background overlay opacity for the active motif.
	pub fn fade_alpha(&self) -> f64 {
		match self {
			Self::Cyan(_) => DataStream::FADE_ALPHA,
			Self::Purple(_) => Galaxy::FADE_ALPHA,
			Self::Green(_) => MatrixRain::FADE_ALPHA,
			Self::Orange(_) => SunRays::FADE_ALPHA,
			Self::Pink(_) => Sparkles::FADE_ALPHA,
			Self::Marvel(_) => EnergyBlast::FADE_ALPHA,
			Self::Spiderman(_) => WebSling::FADE_ALPHA,
			Self::Hanuman(_) => DivineFlames::FADE_ALPHA,
		}
	}

	/// Number of particles across all roles.
	pub fn len(&self) -> usize {
		self.iter().count()
	}

	/// Whether the store holds no particles.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Read-only view over every particle.
	pub fn iter(&self) -> Box<dyn Iterator<Item = &dyn ParticleState> + '_> {
		fn erase<P: ParticleState>(ps: &[P]) -> Box<dyn Iterator<Item = &dyn ParticleState> + '_> {
			Box::new(ps.iter().map(|p| p as &dyn ParticleState))
		}
		match self {
			Self::Cyan(ps) => erase(ps),
			Self::Purple(ps) => erase(ps),
			Self::Green(ps) => erase(ps),
			Self::Orange(ps) => erase(ps),
			Self::Pink(ps) => erase(ps),
			Self::Marvel(ps) => erase(ps),
			Self::Spiderman(ps) => erase(ps),
			Self::Hanuman(ps) => erase(ps),
		}
	}

	/// One update/render tick of the active motif.
	pub fn step(&mut self, surface: &mut dyn Surface, frame: &Frame<'_>, rng: &mut SmallRng) {
		match self {
			Self::Cyan(ps) => DataStream::step(ps, surface, frame, rng),
			Self::Purple(ps) => Galaxy::step(ps, surface, frame, rng),
			Self::Green(ps) => MatrixRain::step(ps, surface, frame, rng),
			Self::Orange(ps) => SunRays::step(ps, surface, frame, rng),
			Self::Pink(ps) => Sparkles::step(ps, surface, frame, rng),
			Self::Marvel(ps) => EnergyBlast::step(ps, surface, frame, rng),
			Self::Spiderman(ps) => WebSling::step(ps, surface, frame, rng),
			Self::Hanuman(ps) => DivineFlames::step(ps, surface, frame, rng),
		}
	}
}
