//! Visual theming for the hero background.
//!
//! Provides the color type, the eight selectable themes and their palettes.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::BackdropError;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[allow(missing_docs)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	/// Opacity in `0..=1`.
	pub a: f64,
}

impl Color {
	/// Opaque white.
	pub const WHITE: Color = Color::rgb(255, 255, 255);
	/// Fully transparent black.
	pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0.0);

	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with opacity `a`, clamped to `0..=1`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Alpha given as a two-digit hex byte (`0x15` ~ 8%), the way CSS
	/// `#rrggbbaa` suffixes are written.
	pub fn with_alpha_byte(self, byte: u8) -> Self {
		self.with_alpha(byte as f64 / 255.0)
	}

	/// Converts HSL (hue in degrees, saturation and lightness in percent).
	pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
		let h = hue.rem_euclid(360.0) / 360.0;
		let s = (saturation / 100.0).clamp(0.0, 1.0);
		let l = (lightness / 100.0).clamp(0.0, 1.0);

		if s == 0.0 {
			let v = (l * 255.0).round() as u8;
			return Self::rgb(v, v, v);
		}

		let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
		let p = 2.0 * l - q;
		let channel = |t: f64| {
			let t = t.rem_euclid(1.0);
			let v = if t < 1.0 / 6.0 {
				p + (q - p) * 6.0 * t
			} else if t < 0.5 {
				q
			} else if t < 2.0 / 3.0 {
				p + (q - p) * (2.0 / 3.0 - t) * 6.0
			} else {
				p
			};
			(v * 255.0).round() as u8
		};

		Self::rgb(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
	}

	/// `#rrggbb` when opaque, `rgba(...)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// `#rrggbb`, ignoring alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Base color every frame fades toward.
pub const BACKGROUND: Color = Color::rgb(10, 10, 15);

/// The colors a theme hands to its background motif and to the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
	/// Main motif color.
	pub primary: Color,
	/// Darker primary for borders and hover states.
	pub primary_dark: Color,
	/// Second motif color.
	pub secondary: Color,
	/// Highlight color for the page.
	pub accent: Color,
	/// Glow used for box shadows around primary-colored elements.
	pub glow: Color,
}

impl Palette {
	/// Document-level CSS custom properties carrying this palette.
	pub fn css_variables(&self) -> [(&'static str, String); 6] {
		[
			("--primary", self.primary.to_css_rgb()),
			("--primary-dark", self.primary_dark.to_css_rgb()),
			("--secondary", self.secondary.to_css_rgb()),
			("--accent", self.accent.to_css_rgb()),
			("--glow-primary", format!("0 0 20px {}", self.glow.to_css())),
			("--card-border", format!("{}1a", self.primary.to_css_rgb())),
		]
	}
}

/// Display metadata for the theme switcher.
#[derive(Clone, Copy, Debug)]
pub struct ThemeInfo {
	/// Human-readable theme name.
	pub label: &'static str,
	/// Name of the background motif.
	pub effect: &'static str,
}

/// One of the eight selectable visual motifs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	/// Code stream.
	#[default]
	Cyan,
	/// Starfield.
	Purple,
	/// Matrix rain.
	Green,
	/// Sun rays.
	Orange,
	/// Sparkles.
	Pink,
	/// Energy blast.
	Marvel,
	/// Web sling.
	Spiderman,
	/// Divine flames.
	Hanuman,
}

impl ThemeName {
	/// Every theme in switcher order.
	pub const ALL: [ThemeName; 8] = [
		ThemeName::Cyan,
		ThemeName::Purple,
		ThemeName::Green,
		ThemeName::Orange,
		ThemeName::Pink,
		ThemeName::Marvel,
		ThemeName::Spiderman,
		ThemeName::Hanuman,
	];

	/// Identifier used for persistence and configuration.
	pub fn id(self) -> &'static str {
		match self {
			ThemeName::Cyan => "cyan",
			ThemeName::Purple => "purple",
			ThemeName::Green => "green",
			ThemeName::Orange => "orange",
			ThemeName::Pink => "pink",
			ThemeName::Marvel => "marvel",
			ThemeName::Spiderman => "spiderman",
			ThemeName::Hanuman => "hanuman",
		}
	}

	/// Switcher label and effect name.
	pub fn info(self) -> ThemeInfo {
		let (label, effect) = match self {
			ThemeName::Cyan => ("Cyber Cyan", "Code Stream"),
			ThemeName::Purple => ("Galaxy Purple", "Starfield"),
			ThemeName::Green => ("Matrix Green", "Matrix Rain"),
			ThemeName::Orange => ("Sunset Orange", "Sun Rays"),
			ThemeName::Pink => ("Neon Pink", "Sparkles"),
			ThemeName::Marvel => ("Marvel", "Energy Blast"),
			ThemeName::Spiderman => ("Spider-Man", "Web Sling"),
			ThemeName::Hanuman => ("Lord Hanuman", "Divine Flames"),
		};
		ThemeInfo { label, effect }
	}

	/// The theme's colors.
	pub fn palette(self) -> Palette {
		match self {
			ThemeName::Cyan => Palette {
				primary: Color::rgb(0x00, 0xd9, 0xff),
				primary_dark: Color::rgb(0x00, 0x99, 0xb8),
				secondary: Color::rgb(0x7c, 0x3a, 0xed),
				accent: Color::rgb(0xff, 0x00, 0x6e),
				glow: Color::rgba(0, 217, 255, 0.5),
			},
			ThemeName::Purple => Palette {
				primary: Color::rgb(0xa8, 0x55, 0xf7),
				primary_dark: Color::rgb(0x7c, 0x3a, 0xed),
				secondary: Color::rgb(0x06, 0xb6, 0xd4),
				accent: Color::rgb(0xf4, 0x72, 0xb6),
				glow: Color::rgba(168, 85, 247, 0.5),
			},
			ThemeName::Green => Palette {
				primary: Color::rgb(0x22, 0xc5, 0x5e),
				primary_dark: Color::rgb(0x16, 0xa3, 0x4a),
				secondary: Color::rgb(0x14, 0xb8, 0xa6),
				accent: Color::rgb(0x84, 0xcc, 0x16),
				glow: Color::rgba(34, 197, 94, 0.5),
			},
			ThemeName::Orange => Palette {
				primary: Color::rgb(0xf9, 0x73, 0x16),
				primary_dark: Color::rgb(0xea, 0x58, 0x0c),
				secondary: Color::rgb(0xea, 0xb3, 0x08),
				accent: Color::rgb(0xef, 0x44, 0x44),
				glow: Color::rgba(249, 115, 22, 0.5),
			},
			ThemeName::Pink => Palette {
				primary: Color::rgb(0xec, 0x48, 0x99),
				primary_dark: Color::rgb(0xdb, 0x27, 0x77),
				secondary: Color::rgb(0x8b, 0x5c, 0xf6),
				accent: Color::rgb(0xf4, 0x3f, 0x5e),
				glow: Color::rgba(236, 72, 153, 0.5),
			},
			ThemeName::Marvel => Palette {
				primary: Color::rgb(0xe2, 0x36, 0x36),
				primary_dark: Color::rgb(0xb7, 0x1c, 0x1c),
				secondary: Color::rgb(0xff, 0xd7, 0x00),
				accent: Color::rgb(0x1e, 0x3a, 0x5f),
				glow: Color::rgba(226, 54, 54, 0.5),
			},
			ThemeName::Spiderman => Palette {
				primary: Color::rgb(0xe2, 0x1b, 0x1b),
				primary_dark: Color::rgb(0xb7, 0x1c, 0x1c),
				secondary: Color::rgb(0x15, 0x65, 0xc0),
				accent: Color::rgb(0xff, 0xff, 0xff),
				glow: Color::rgba(226, 27, 27, 0.5),
			},
			ThemeName::Hanuman => Palette {
				primary: Color::rgb(0xff, 0x6f, 0x00),
				primary_dark: Color::rgb(0xe6, 0x51, 0x00),
				secondary: Color::rgb(0xff, 0xd5, 0x4f),
				accent: Color::rgb(0xd5, 0x00, 0x00),
				glow: Color::rgba(255, 111, 0, 0.6),
			},
		}
	}
}

impl fmt::Display for ThemeName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.id())
	}
}

impl FromStr for ThemeName {
	type Err = BackdropError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ThemeName::ALL
			.into_iter()
			.find(|theme| theme.id() == s.trim())
			.ok_or_else(|| BackdropError::UnknownTheme(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn theme_ids_round_trip_through_from_str() {
		for theme in ThemeName::ALL {
			assert_eq!(theme.id().parse::<ThemeName>().unwrap(), theme);
		}
		assert!("teal".parse::<ThemeName>().is_err());
		assert!("".parse::<ThemeName>().is_err());
	}

	#[test]
	fn default_theme_is_cyan() {
		assert_eq!(ThemeName::default(), ThemeName::Cyan);
	}

	#[test]
	fn hsl_primaries() {
		assert_eq!(Color::hsl(0.0, 100.0, 50.0), Color::rgb(255, 0, 0));
		assert_eq!(Color::hsl(120.0, 100.0, 50.0), Color::rgb(0, 255, 0));
		assert_eq!(Color::hsl(240.0, 100.0, 50.0), Color::rgb(0, 0, 255));
		assert_eq!(Color::hsl(90.0, 0.0, 100.0), Color::WHITE);
		// Ember orange.
		let ember = Color::hsl(25.0, 100.0, 60.0);
		assert_eq!((ember.r, ember.b), (255, 51));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(0, 217, 255).to_css(), "#00d9ff");
		assert_eq!(
			Color::rgb(0, 217, 255).with_alpha(0.5).to_css(),
			"rgba(0, 217, 255, 0.5)"
		);
		assert_eq!(Color::WHITE.with_alpha(2.0).a, 1.0);
	}

	#[test]
	fn palette_css_variables() {
		let vars = ThemeName::Cyan.palette().css_variables();
		assert_eq!(vars[0], ("--primary", "#00d9ff".to_string()));
		assert_eq!(
			vars[4],
			("--glow-primary", "0 0 20px rgba(0, 217, 255, 0.5)".to_string())
		);
		assert_eq!(vars[5], ("--card-border", "#00d9ff1a".to_string()));
	}
}
