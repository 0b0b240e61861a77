//! UI components for the hero section.

pub mod hero_background;
pub mod theme_switcher;
