//! The 2D drawing surface motifs paint onto.
//!
//! [`Surface`] mirrors the subset of the canvas 2D API the motifs need, so
//! the particle logic runs against a browser canvas in production and against
//! a recorder in tests.

use log::debug;
use wasm_bindgen::JsValue;
use web_sys::{CanvasGradient, CanvasRenderingContext2d};

use super::theme::Color;

/// A color stop `(offset, color)` inside a gradient.
pub type ColorStop = (f64, Color);

/// Gradient geometry plus its stops.
#[derive(Clone, Debug, PartialEq)]
pub enum Gradient {
	/// Linear gradient from `(x0, y0)` to `(x1, y1)`.
	#[allow(missing_docs)]
	Linear {
		x0: f64,
		y0: f64,
		x1: f64,
		y1: f64,
		stops: Vec<ColorStop>,
	},
	/// Concentric radial gradient from radius 0 to `radius`.
	#[allow(missing_docs)]
	Radial {
		x: f64,
		y: f64,
		radius: f64,
		stops: Vec<ColorStop>,
	},
}

/// Fill or stroke style.
#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
	/// A flat color.
	Solid(Color),
	/// A gradient resolved against the surface at draw time.
	Gradient(Gradient),
}

impl From<Color> for Paint {
	fn from(color: Color) -> Self {
		Paint::Solid(color)
	}
}

impl From<Gradient> for Paint {
	fn from(gradient: Gradient) -> Self {
		Paint::Gradient(gradient)
	}
}

/// Canvas-like immediate-mode drawing target.
pub trait Surface {
	/// Style for later fills.
	fn set_fill(&mut self, paint: Paint);
	/// Style for later strokes.
	fn set_stroke(&mut self, paint: Paint);
	/// Stroke width in pixels.
	fn set_line_width(&mut self, width: f64);
	/// Opacity multiplied into every later draw.
	fn set_global_alpha(&mut self, alpha: f64);
	/// Glow around later draws. A zero blur disables it.
	fn set_shadow(&mut self, color: Color, blur: f64);
	/// CSS font shorthand for text.
	fn set_font(&mut self, font: &str);

	/// Fills an axis-aligned rectangle.
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
	/// Fills `text` with its baseline origin at `(x, y)`.
	fn fill_text(&mut self, text: &str, x: f64, y: f64);

	/// Starts a new path.
	fn begin_path(&mut self);
	/// Closes the current subpath.
	fn close_path(&mut self);
	/// Starts a subpath at `(x, y)`.
	fn move_to(&mut self, x: f64, y: f64);
	/// Straight segment to `(x, y)`.
	fn line_to(&mut self, x: f64, y: f64);
	/// Quadratic curve through control point `(cx, cy)` to `(x, y)`.
	fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
	/// Full circle path segment.
	fn circle(&mut self, x: f64, y: f64, radius: f64);
	/// Fills the current path.
	fn fill(&mut self);
	/// Strokes the current path.
	fn stroke(&mut self);

	/// Pushes the drawing state.
	fn save(&mut self);
	/// Pops the drawing state.
	fn restore(&mut self);
	/// Moves the origin.
	fn translate(&mut self, x: f64, y: f64);
	/// Rotates by `angle` radians around the origin.
	fn rotate(&mut self, angle: f64);

	/// Drops the shadow and resets global alpha after a glowing draw.
	fn reset_effects(&mut self) {
		self.set_shadow(Color::TRANSPARENT, 0.0);
		self.set_global_alpha(1.0);
	}

	/// Fills a circle with the current fill style.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
		self.begin_path();
		self.circle(x, y, radius);
		self.fill();
	}

	/// Strokes a circle with the current stroke style.
	fn stroke_circle(&mut self, x: f64, y: f64, radius: f64) {
		self.begin_path();
		self.circle(x, y, radius);
		self.stroke();
	}
}

fn build_gradient(
	ctx: &CanvasRenderingContext2d,
	gradient: &Gradient,
) -> Result<CanvasGradient, JsValue> {
	let (canvas_gradient, stops) = match gradient {
		Gradient::Linear {
			x0,
			y0,
			x1,
			y1,
			stops,
		} => (ctx.create_linear_gradient(*x0, *y0, *x1, *y1), stops),
		Gradient::Radial { x, y, radius, stops } => (
			ctx.create_radial_gradient(*x, *y, 0.0, *x, *y, radius.max(0.0))?,
			stops,
		),
	};
	for (offset, color) in stops {
		canvas_gradient.add_color_stop(offset.clamp(0.0, 1.0) as f32, &color.to_css())?;
	}
	Ok(canvas_gradient)
}

impl Surface for CanvasRenderingContext2d {
	fn set_fill(&mut self, paint: Paint) {
		match paint {
			Paint::Solid(color) => self.set_fill_style_str(&color.to_css()),
			Paint::Gradient(gradient) => match build_gradient(self, &gradient) {
				#[allow(deprecated)]
				Ok(g) => self.set_fill_style(&g),
				Err(e) => debug!("hero-backdrop: skipping fill gradient: {:?}", e),
			},
		}
	}

	fn set_stroke(&mut self, paint: Paint) {
		match paint {
			Paint::Solid(color) => self.set_stroke_style_str(&color.to_css()),
			Paint::Gradient(gradient) => match build_gradient(self, &gradient) {
				#[allow(deprecated)]
				Ok(g) => self.set_stroke_style(&g),
				Err(e) => debug!("hero-backdrop: skipping stroke gradient: {:?}", e),
			},
		}
	}

	fn set_line_width(&mut self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		CanvasRenderingContext2d::set_global_alpha(self, alpha);
	}

	fn set_shadow(&mut self, color: Color, blur: f64) {
		self.set_shadow_color(&color.to_css());
		self.set_shadow_blur(blur);
	}

	fn set_font(&mut self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}

	fn begin_path(&mut self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn close_path(&mut self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn move_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
		CanvasRenderingContext2d::quadratic_curve_to(self, cx, cy, x, y);
	}

	fn circle(&mut self, x: f64, y: f64, radius: f64) {
		let _ = self.arc(x, y, radius.max(0.0), 0.0, std::f64::consts::TAU);
	}

	fn fill(&mut self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&mut self) {
		CanvasRenderingContext2d::stroke(self);
	}

	fn save(&mut self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&mut self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn translate(&mut self, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::translate(self, x, y);
	}

	fn rotate(&mut self, angle: f64) {
		let _ = CanvasRenderingContext2d::rotate(self, angle);
	}
}
