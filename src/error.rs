//! Error type shared by configuration, persistence and canvas setup.

use thiserror::Error;

/// Everything that can go wrong while wiring up the background.
///
/// None of these are fatal to the page: callers log them and fall back to
/// defaults or leave the canvas blank.
#[derive(Debug, Error)]
pub enum BackdropError {
	/// A theme id that names none of the eight themes.
	#[error("unknown theme `{0}`")]
	UnknownTheme(String),

	/// Configuration parsed but holds an unusable value.
	#[error("invalid configuration: {0}")]
	InvalidConfig(String),

	/// Configuration is not valid JSON for [`crate::BackdropConfig`].
	#[error("failed to parse configuration: {0}")]
	ConfigParse(#[from] serde_json::Error),

	/// Writing to browser storage failed.
	#[error("storage unavailable: {0}")]
	Storage(String),

	/// The named browser object needed for drawing is missing.
	#[error("no drawable surface: {0}")]
	SurfaceUnavailable(&'static str),
}
