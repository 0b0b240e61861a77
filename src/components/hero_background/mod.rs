//! Themeable animated canvas background for the hero section.
//!
//! Each of the eight themes pairs a palette with a particle motif. The
//! [`Engine`] owns the active theme's [`ParticleStore`] together with a
//! [`FrameScheduler`] that throttles browser frames to a fixed tick rate; the
//! [`HeroBackground`] component connects it to a canvas, window resizes and
//! tab visibility.

mod component;
pub mod engine;
pub(crate) mod motifs;
pub(crate) mod particles;
pub mod scheduler;
pub mod settings;
pub mod store;
pub mod surface;
pub mod theme;

pub use component::HeroBackground;
pub use engine::{Engine, StartMode};
pub use motifs::Frame;
pub use particles::ParticleState;
pub use scheduler::{FrameScheduler, SchedulerState};
pub use settings::{
	BackdropConfig, BrowserStorage, MemoryStorage, Settings, SettingsStore, apply_css_variables,
};
pub use store::ParticleStore;
pub use surface::{Gradient, Paint, Surface};
pub use theme::{BACKGROUND, Color, Palette, ThemeInfo, ThemeName};
