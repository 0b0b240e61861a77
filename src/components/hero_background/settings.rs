//! Persisted theme choice, page configuration and palette CSS variables.
//!
//! The theme is read once at startup and written back on every change;
//! nothing else in the crate touches storage or the document root directly.

use std::collections::HashMap;

use log::{debug, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Storage};

use super::theme::{Palette, ThemeName};
use crate::error::BackdropError;

/// Key-value persistence for settings.
pub trait SettingsStore {
	/// Stored value for `key`, if any.
	fn read(&self, key: &str) -> Option<String>;
	/// Stores `value` under `key`.
	fn write(&mut self, key: &str, value: &str) -> Result<(), BackdropError>;
}

/// `window.localStorage`.
pub struct BrowserStorage(Storage);

impl BrowserStorage {
	/// `None` when storage is disabled (private browsing, sandboxed frames).
	pub fn local() -> Option<Self> {
		let storage = web_sys::window()?.local_storage().ok()??;
		Some(Self(storage))
	}
}

impl SettingsStore for BrowserStorage {
	fn read(&self, key: &str) -> Option<String> {
		self.0.get_item(key).ok().flatten()
	}

	fn write(&mut self, key: &str, value: &str) -> Result<(), BackdropError> {
		self.0
			.set_item(key, value)
			.map_err(|e| BackdropError::Storage(format!("{:?}", e)))
	}
}

/// In-memory store, used when browser storage is unavailable.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage(HashMap<String, String>);

impl SettingsStore for MemoryStorage {
	fn read(&self, key: &str) -> Option<String> {
		self.0.get(key).cloned()
	}

	fn write(&mut self, key: &str, value: &str) -> Result<(), BackdropError> {
		self.0.insert(key.to_string(), value.to_string());
		Ok(())
	}
}

/// User-visible settings that survive reloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settings {
	/// Last selected theme.
	pub theme: ThemeName,
}

impl Settings {
	/// Reads the persisted theme, falling back to `default` when it is missing
	/// or not a known theme id.
	pub fn load(store: &dyn SettingsStore, key: &str, default: ThemeName) -> Self {
		let theme = match store.read(key) {
			Some(raw) => raw.parse().unwrap_or_else(|e: BackdropError| {
				debug!("hero-backdrop: ignoring stored theme: {}", e);
				default
			}),
			None => default,
		};
		Self { theme }
	}

	/// Persists the theme id under `key`.
	pub fn save(&self, store: &mut dyn SettingsStore, key: &str) -> Result<(), BackdropError> {
		store.write(key, self.theme.id())
	}
}

/// Page-level knobs, read from a JSON `<script id="backdrop-config">`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
	/// Theme used when nothing valid is persisted.
	pub default_theme: ThemeName,
	/// Animation tick rate.
	pub target_fps: f64,
	/// Opacity of the canvas over the page background.
	pub canvas_opacity: f64,
	/// localStorage key holding the theme id.
	pub storage_key: String,
}

impl Default for BackdropConfig {
	fn default() -> Self {
		Self {
			default_theme: ThemeName::default(),
			target_fps: 30.0,
			canvas_opacity: 0.8,
			storage_key: "portfolio-theme".to_string(),
		}
	}
}

impl BackdropConfig {
	/// Parses and validates. Missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, BackdropError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Rejects non-positive rates, out-of-range opacity and blank keys.
	pub fn validate(&self) -> Result<(), BackdropError> {
		if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
			return Err(BackdropError::InvalidConfig(format!(
				"target_fps must be positive, got {}",
				self.target_fps
			)));
		}
		if !(0.0..=1.0).contains(&self.canvas_opacity) {
			return Err(BackdropError::InvalidConfig(format!(
				"canvas_opacity must be within 0..=1, got {}",
				self.canvas_opacity
			)));
		}
		if self.storage_key.trim().is_empty() {
			return Err(BackdropError::InvalidConfig("storage_key is empty".into()));
		}
		Ok(())
	}
}

/// Publishes `palette` as CSS custom properties on `<html>`.
pub fn apply_css_variables(palette: &Palette) {
	let Some(root) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
		.and_then(|e| e.dyn_into::<HtmlElement>().ok())
	else {
		warn!("hero-backdrop: no document root for palette variables");
		return;
	};
	let style = root.style();
	for (name, value) in palette.css_variables() {
		let _ = style.set_property(name, &value);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const KEY: &str = "portfolio-theme";

	#[test]
	fn missing_or_invalid_theme_falls_back_to_default() {
		let mut store = MemoryStorage::default();
		assert_eq!(Settings::load(&store, KEY, ThemeName::Cyan).theme, ThemeName::Cyan);

		store.write(KEY, "neon-teal").unwrap();
		assert_eq!(Settings::load(&store, KEY, ThemeName::Pink).theme, ThemeName::Pink);
	}

	#[test]
	fn saved_theme_is_loaded_back() {
		let mut store = MemoryStorage::default();
		Settings {
			theme: ThemeName::Spiderman,
		}
		.save(&mut store, KEY)
		.unwrap();
		assert_eq!(store.read(KEY).as_deref(), Some("spiderman"));
		assert_eq!(
			Settings::load(&store, KEY, ThemeName::Cyan).theme,
			ThemeName::Spiderman
		);
	}

	#[test]
	fn config_defaults_fill_missing_fields() {
		let config = BackdropConfig::from_json(r#"{ "default_theme": "hanuman" }"#).unwrap();
		assert_eq!(config.default_theme, ThemeName::Hanuman);
		assert_eq!(config.target_fps, 30.0);
		assert_eq!(config.canvas_opacity, 0.8);
		assert_eq!(config.storage_key, KEY);
		assert_eq!(BackdropConfig::from_json("{}").unwrap(), BackdropConfig::default());
	}

	#[test]
	fn config_rejects_bad_values() {
		assert!(matches!(
			BackdropConfig::from_json(r#"{ "target_fps": 0 }"#),
			Err(BackdropError::InvalidConfig(_))
		));
		assert!(matches!(
			BackdropConfig::from_json(r#"{ "canvas_opacity": 1.5 }"#),
			Err(BackdropError::InvalidConfig(_))
		));
		assert!(matches!(
			BackdropConfig::from_json(r#"{ "storage_key": " " }"#),
			Err(BackdropError::InvalidConfig(_))
		));
		assert!(matches!(
			BackdropConfig::from_json(r#"{ "default_theme": "teal" }"#),
			Err(BackdropError::ConfigParse(_))
		));
		assert!(matches!(
			BackdropConfig::from_json("not json"),
			Err(BackdropError::ConfigParse(_))
		));
	}
}
