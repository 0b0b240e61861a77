//! hero-backdrop: themeable animated canvas background for a portfolio hero section.
//!
//! This crate provides a WASM-based hero section whose full-viewport canvas
//! animates one of eight particle motifs, with a theme switcher that persists
//! the choice across sessions.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;
pub mod error;

pub use components::hero_background::{
	BackdropConfig, HeroBackground, Settings, SettingsStore, ThemeName,
};
pub use components::theme_switcher::ThemeSwitcher;
pub use error::BackdropError;

use components::hero_background::{BrowserStorage, MemoryStorage, apply_css_variables};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("hero-backdrop: logging initialized");
}

/// Load configuration from a script element with id="backdrop-config".
/// Expected format: JSON with any of { default_theme, target_fps, canvas_opacity, storage_key }.
fn load_config() -> BackdropConfig {
	let Some(json_text) = read_config_script() else {
		return BackdropConfig::default();
	};

	match BackdropConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"hero-backdrop: loaded config, default theme '{}' at {} fps",
				config.default_theme, config.target_fps
			);
			config
		}
		Err(e) => {
			warn!("hero-backdrop: {}, using defaults", e);
			BackdropConfig::default()
		}
	}
}

fn read_config_script() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("backdrop-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

fn settings_store() -> Box<dyn SettingsStore> {
	match BrowserStorage::local() {
		Some(storage) => Box::new(storage),
		None => {
			warn!("hero-backdrop: localStorage unavailable, theme will not persist");
			Box::new(MemoryStorage::default())
		}
	}
}

/// Main application component.
/// Restores the saved theme and renders the hero section over the animated background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let mut store = settings_store();
	let settings = Settings::load(store.as_ref(), &config.storage_key, config.default_theme);
	let theme = RwSignal::new(settings.theme);
	provide_context(theme);

	let storage_key = config.storage_key.clone();
	Effect::new(move |_| {
		let settings = Settings { theme: theme.get() };
		apply_css_variables(&settings.theme.palette());
		if let Err(e) = settings.save(store.as_mut(), &storage_key) {
			warn!("hero-backdrop: failed to persist theme: {}", e);
		}
	});

	let effect_label = move || theme.get().info().effect;

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme=move || theme.get().id() />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section class="hero" style="position: relative; min-height: 100vh; overflow: hidden;">
			<HeroBackground
				theme=theme
				target_fps=config.target_fps
				opacity=config.canvas_opacity
			/>
			<div class="hero-content" style="position: relative; z-index: 1;">
				<p class="hero-effect">{effect_label}</p>
				<ThemeSwitcher theme=theme />
			</div>
		</section>
	}
}
