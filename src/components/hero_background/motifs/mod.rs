//! Per-theme particle motifs.
//!
//! Each motif pairs a factory (`seed`) with an update/render routine
//! (`step`). A motif owns the shape of its particles: the particle type is an
//! enum of that theme's roles, so a particle's role is never inferred from
//! which optional fields happen to be set.

use rand::rngs::SmallRng;

use super::particles::ParticleState;
use super::surface::Surface;
use super::theme::Palette;

pub mod data_stream;
pub mod divine_flames;
pub mod energy_blast;
pub mod galaxy;
pub mod matrix_rain;
pub mod sparkles;
pub mod sun_rays;
pub mod web_sling;

/// Everything a step needs besides the particles themselves.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
	/// Surface width in CSS pixels.
	pub width: f64,
	/// Surface height in CSS pixels.
	pub height: f64,
	/// Seconds on the animation clock, drives ambient oscillations.
	pub time: f64,
	/// Colors of the active theme.
	pub palette: &'a Palette,
}

/// A theme's particle factory plus its per-tick update and paint.
pub trait Motif {
	/// The theme's particle roles.
	type Particle: ParticleState;

	/// Opacity of the background overlay painted before each step. Lower
	/// values leave longer afterimages.
	const FADE_ALPHA: f64;

	/// Builds the initial particle set. Only called with a non-empty surface.
	fn seed(width: f64, height: f64, rng: &mut SmallRng) -> Vec<Self::Particle>;

	/// Advances every particle one tick and paints it.
	fn step(
		particles: &mut [Self::Particle],
		surface: &mut dyn Surface,
		frame: &Frame<'_>,
		rng: &mut SmallRng,
	);
}
