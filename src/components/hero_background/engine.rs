//! Single owner of the running animation: particle store, scheduler and RNG.
//!
//! The browser loop in `component.rs` forwards frame callbacks, resizes and
//! visibility changes here; everything below is plain Rust and runs the same
//! against a recording surface in tests.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::motifs::Frame;
use super::scheduler::FrameScheduler;
use super::store::ParticleStore;
use super::surface::Surface;
use super::theme::{BACKGROUND, Palette, ThemeName};

/// How [`Engine::start`] brought the surface up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartMode {
	/// The scheduler is running and frames will tick.
	Animating,
	/// Reduced motion: one opaque background fill, no scheduler.
	StaticFill,
}

/// Drives one theme's particles on one surface.
pub struct Engine {
	store: ParticleStore,
	palette: Palette,
	scheduler: FrameScheduler,
	mode: Option<StartMode>,
	width: f64,
	height: f64,
	rng: SmallRng,
	ticks: u64,
}

impl Engine {
	/// Seeds `theme` for a `width` x `height` surface. Nothing runs until [`Engine::start`].
	pub fn new(theme: ThemeName, width: f64, height: f64, target_fps: f64, seed: u64) -> Self {
		let mut rng = SmallRng::seed_from_u64(seed);
		let store = ParticleStore::seed(theme, width, height, &mut rng);
		debug!(
			"hero-backdrop: seeded {} particles for '{}' at {}x{}",
			store.len(),
			theme,
			width,
			height
		);
		Self {
			store,
			palette: theme.palette(),
			scheduler: FrameScheduler::new(target_fps),
			mode: None,
			width,
			height,
			rng,
			ticks: 0,
		}
	}

	/// Active theme.
	pub fn theme(&self) -> ThemeName {
		self.store.theme()
	}

	/// Particles of the active theme.
	pub fn store(&self) -> &ParticleStore {
		&self.store
	}

	/// Tick policy and lifecycle state.
	pub fn scheduler(&self) -> &FrameScheduler {
		&self.scheduler
	}

	/// How the engine was started, `None` before [`Engine::start`].
	pub fn mode(&self) -> Option<StartMode> {
		self.mode
	}

	/// Surface dimensions in CSS pixels.
	pub fn size(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Ticks executed since construction.
	pub fn ticks(&self) -> u64 {
		self.ticks
	}

	/// Starts animating, or paints a single static background when the user
	/// prefers reduced motion.
	pub fn start(&mut self, surface: &mut dyn Surface, reduced_motion: bool) -> StartMode {
		if reduced_motion {
			info!("hero-backdrop: reduced motion requested, painting static background");
			self.paint_static(surface);
			self.mode = Some(StartMode::StaticFill);
			return StartMode::StaticFill;
		}
		info!(
			"hero-backdrop: animating '{}' at {:.0}ms per tick",
			self.theme(),
			self.scheduler.interval_ms()
		);
		self.scheduler.start();
		self.mode = Some(StartMode::Animating);
		StartMode::Animating
	}

	/// Repaints the static background at the current size. Resizing a canvas
	/// clears it, and a static surface gets no later tick to cover that.
	/// Returns `false` without drawing unless started in static mode.
	pub fn redraw_static(&mut self, surface: &mut dyn Surface) -> bool {
		if self.mode != Some(StartMode::StaticFill) {
			return false;
		}
		self.paint_static(surface);
		true
	}

	fn paint_static(&self, surface: &mut dyn Surface) {
		surface.set_global_alpha(1.0);
		surface.set_fill(BACKGROUND.into());
		surface.fill_rect(0.0, 0.0, self.width, self.height);
	}

	/// Handles one browser frame callback. Returns `true` if a tick ran.
	pub fn frame(&mut self, timestamp_ms: f64, surface: &mut dyn Surface) -> bool {
		if !self.scheduler.poll(timestamp_ms) {
			return false;
		}
		self.tick(timestamp_ms / 1000.0, surface);
		true
	}

	/// Fade overlay plus one motif step, unconditionally.
	pub fn tick(&mut self, time_secs: f64, surface: &mut dyn Surface) {
		surface.set_global_alpha(1.0);
		surface.set_fill(BACKGROUND.with_alpha(self.store.fade_alpha()).into());
		surface.fill_rect(0.0, 0.0, self.width, self.height);

		let frame = Frame {
			width: self.width,
			height: self.height,
			time: time_secs,
			palette: &self.palette,
		};
		self.store.step(surface, &frame, &mut self.rng);
		self.ticks += 1;
	}

	/// Holds the particles in place until [`Engine::resume`].
	pub fn pause(&mut self) {
		self.scheduler.pause();
	}

	/// Continues after a pause without replaying the paused interval.
	pub fn resume(&mut self) {
		self.scheduler.resume();
	}

	/// Stops for good. Later frame callbacks are ignored.
	pub fn stop(&mut self) {
		debug!("hero-backdrop: engine stopped after {} ticks", self.ticks);
		self.scheduler.stop();
	}

	/// Replaces the particle set with a fresh one for `theme`.
	pub fn reseed(&mut self, theme: ThemeName) {
		self.store = ParticleStore::seed(theme, self.width, self.height, &mut self.rng);
		self.palette = theme.palette();
		debug!(
			"hero-backdrop: reseeded '{}' with {} particles",
			theme,
			self.store.len()
		);
	}

	/// Adopts new surface dimensions and reseeds the active theme.
	pub fn resize(&mut self, width: f64, height: f64) {
		if (width, height) == (self.width, self.height) {
			return;
		}
		debug!("hero-backdrop: resized to {}x{}", width, height);
		self.width = width;
		self.height = height;
		self.reseed(self.theme());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::hero_background::surface::Paint;
	use crate::components::hero_background::surface::recording::{Op, RecordingSurface};

	fn engine(theme: ThemeName) -> Engine {
		Engine::new(theme, 800.0, 600.0, 30.0, 7)
	}

	/// Feeds 60 Hz callbacks and returns how many ticked.
	fn run(engine: &mut Engine, surface: &mut RecordingSurface, t0: f64, frames: usize) -> usize {
		(0..frames)
			.filter(|i| engine.frame(t0 + *i as f64 * 1000.0 / 60.0, &mut *surface))
			.count()
	}

	fn positions(engine: &Engine) -> Vec<(f64, f64)> {
		engine.store().iter().map(|p| p.position()).collect()
	}

	#[test]
	fn reduced_motion_paints_once_and_never_ticks() {
		let mut engine = engine(ThemeName::Green);
		let mut surface = RecordingSurface::default();
		assert_eq!(engine.start(&mut surface, true), StartMode::StaticFill);

		assert_eq!(surface.ops.len(), 1);
		match &surface.ops[0] {
			Op::FillRect {
				width,
				height,
				paint,
				alpha,
				..
			} => {
				assert_eq!((*width, *height), (800.0, 600.0));
				assert_eq!(*paint, Paint::Solid(BACKGROUND));
				assert_eq!(*alpha, 1.0);
			}
			other => panic!("unexpected op {:?}", other),
		}

		assert_eq!(run(&mut engine, &mut surface, 0.0, 300), 0);
		assert_eq!(engine.ticks(), 0);
		assert_eq!(surface.ops.len(), 1);
	}

	#[test]
	fn static_fill_covers_the_surface_again_after_resize() {
		let mut engine = engine(ThemeName::Orange);
		let mut surface = RecordingSurface::default();
		engine.start(&mut surface, true);
		assert_eq!(engine.mode(), Some(StartMode::StaticFill));
		surface.clear();

		engine.resize(1_280.0, 720.0);
		assert!(engine.redraw_static(&mut surface));
		assert_eq!(surface.ops.len(), 1);
		match &surface.ops[0] {
			Op::FillRect {
				x,
				y,
				width,
				height,
				paint,
				alpha,
			} => {
				assert_eq!((*x, *y, *width, *height), (0.0, 0.0, 1_280.0, 720.0));
				assert_eq!(*paint, Paint::Solid(BACKGROUND));
				assert_eq!(*alpha, 1.0);
			}
			other => panic!("unexpected op {:?}", other),
		}
		assert_eq!(engine.ticks(), 0);
	}

	#[test]
	fn animating_engine_leaves_redraw_to_the_next_tick() {
		let mut engine = engine(ThemeName::Orange);
		let mut surface = RecordingSurface::default();
		assert!(!engine.redraw_static(&mut surface));
		engine.start(&mut surface, false);
		engine.resize(1_280.0, 720.0);
		assert!(!engine.redraw_static(&mut surface));
		assert!(surface.ops.is_empty());
	}

	#[test]
	fn every_tick_fades_then_paints_particles() {
		for theme in ThemeName::ALL {
			let mut engine = engine(theme);
			let mut surface = RecordingSurface::default();
			engine.start(&mut surface, false);
			assert!(!engine.frame(0.0, &mut surface));
			assert!(surface.ops.is_empty());

			assert!(engine.frame(40.0, &mut surface));
			match &surface.ops[0] {
				Op::FillRect { alpha, .. } => {
					assert!((*alpha - engine.store().fade_alpha()).abs() < 1e-9)
				}
				other => panic!("{}: expected fade overlay, got {:?}", theme, other),
			}
			assert!(surface.visible_paints() > 1, "{} drew no particles", theme);
		}
	}

	#[test]
	fn pause_freezes_particles_until_resume() {
		let mut engine = engine(ThemeName::Purple);
		let mut surface = RecordingSurface::default();
		engine.start(&mut surface, false);
		assert!(run(&mut engine, &mut surface, 0.0, 30) > 0);

		engine.pause();
		let frozen = positions(&engine);
		let ticks = engine.ticks();
		surface.clear();
		assert_eq!(run(&mut engine, &mut surface, 1_000.0, 600), 0);
		assert_eq!(positions(&engine), frozen);
		assert_eq!(engine.ticks(), ticks);
		assert!(surface.ops.is_empty());

		engine.resume();
		// Ticks again within one interval of the first frame after resume.
		assert!(!engine.frame(20_000.0, &mut surface));
		assert!(engine.frame(20_040.0, &mut surface));
		assert_eq!(engine.ticks(), ticks + 1);
	}

	#[test]
	fn stopped_engine_issues_no_draws() {
		let mut engine = engine(ThemeName::Hanuman);
		let mut surface = RecordingSurface::default();
		engine.start(&mut surface, false);
		run(&mut engine, &mut surface, 0.0, 30);

		engine.stop();
		surface.clear();
		assert_eq!(run(&mut engine, &mut surface, 1_000.0, 600), 0);
		assert!(surface.ops.is_empty());

		engine.resume();
		assert_eq!(run(&mut engine, &mut surface, 20_000.0, 60), 0);
		assert!(surface.ops.is_empty());
	}

	#[test]
	fn reseed_discards_the_previous_theme() {
		let mut engine = engine(ThemeName::Green);
		engine.reseed(ThemeName::Spiderman);
		assert_eq!(engine.theme(), ThemeName::Spiderman);
		assert!(matches!(engine.store(), ParticleStore::Spiderman(_)));
		assert_eq!(engine.store().len(), 92);
	}

	#[test]
	fn resize_rebuilds_for_the_new_width() {
		let mut engine = engine(ThemeName::Green);
		assert_eq!(engine.store().len(), 40);
		engine.resize(400.0, 300.0);
		assert_eq!(engine.size(), (400.0, 300.0));
		assert_eq!(engine.store().len(), 20);
		engine.resize(0.0, 300.0);
		assert!(engine.store().is_empty());
	}

	#[test]
	fn empty_surface_still_ticks_the_overlay() {
		let mut engine = Engine::new(ThemeName::Cyan, 0.0, 0.0, 30.0, 1);
		let mut surface = RecordingSurface::default();
		engine.start(&mut surface, false);
		engine.tick(0.0, &mut surface);
		assert!(engine.store().is_empty());
		assert_eq!(engine.ticks(), 1);
	}
}
