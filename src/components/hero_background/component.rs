//! Leptos component wrapping the hero background canvas.
//!
//! The component sizes a full-viewport canvas and drives an [`Engine`] from
//! `requestAnimationFrame`. A theme change tears the running loop down and
//! mounts a fresh one; the pending frame is cancelled before the new particle
//! set is installed, so a stale callback never paints.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, Window};

use super::engine::{Engine, StartMode};
use super::theme::ThemeName;
use crate::error::BackdropError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn viewport_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(read(window.inner_width()), read(window.inner_height()))
}

fn prefers_reduced_motion(window: &Window) -> bool {
	window
		.match_media("(prefers-reduced-motion: reduce)")
		.ok()
		.flatten()
		.is_some_and(|query| query.matches())
}

fn request_frame(window: &Window, animate: &FrameCallback, frame_id: &Cell<Option<i32>>) {
	if let Some(ref cb) = *animate.borrow() {
		match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(id) => frame_id.set(Some(id)),
			Err(e) => warn!("hero-backdrop: requestAnimationFrame failed: {:?}", e),
		}
	}
}

/// Browser resources backing one running engine.
///
/// Dropping the loop tears it down: the pending frame is cancelled, the
/// listeners are removed and the frame closure is released. A static fill
/// only registers the resize listener.
struct AnimationLoop {
	window: Window,
	document: Document,
	engine: Rc<RefCell<Engine>>,
	frame_id: Rc<Cell<Option<i32>>>,
	animate: FrameCallback,
	on_resize: Option<Closure<dyn FnMut()>>,
	on_visibility: Option<Closure<dyn FnMut()>>,
	torn_down: bool,
}

impl AnimationLoop {
	fn mount(
		canvas: HtmlCanvasElement,
		theme: ThemeName,
		target_fps: f64,
	) -> Result<Self, BackdropError> {
		let window = web_sys::window().ok_or(BackdropError::SurfaceUnavailable("window"))?;
		let document = window
			.document()
			.ok_or(BackdropError::SurfaceUnavailable("document"))?;

		let (w, h) = viewport_size(&window);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
			.ok_or(BackdropError::SurfaceUnavailable("2d context"))?;

		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let mut engine = Engine::new(theme, w, h, target_fps, seed);
		let mut surface = ctx.clone();
		let mode = engine.start(&mut surface, prefers_reduced_motion(&window));
		let engine = Rc::new(RefCell::new(engine));

		let mut this = Self {
			window,
			document,
			engine,
			frame_id: Rc::new(Cell::new(None)),
			animate: Rc::new(RefCell::new(None)),
			on_resize: None,
			on_visibility: None,
			torn_down: false,
		};

		// Resizing clears the canvas, so a static fill is painted again.
		let (engine_resize, canvas_resize, mut resize_surface) = (this.engine.clone(), canvas, ctx);
		let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			let (nw, nh) = viewport_size(&window);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			let mut engine = engine_resize.borrow_mut();
			engine.resize(nw, nh);
			engine.redraw_static(&mut resize_surface);
		});
		let _ = this
			.window
			.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
		this.on_resize = Some(on_resize);

		if mode == StartMode::StaticFill {
			return Ok(this);
		}

		let (engine_anim, frame_anim, animate_inner) = (
			this.engine.clone(),
			this.frame_id.clone(),
			this.animate.clone(),
		);
		*this.animate.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			frame_anim.set(None);
			let running = {
				let mut engine = engine_anim.borrow_mut();
				engine.frame(timestamp, &mut surface);
				engine.scheduler().is_running()
			};
			if !running {
				return;
			}
			if let Some(window) = web_sys::window() {
				request_frame(&window, &animate_inner, &frame_anim);
			}
		}));

		let (engine_vis, frame_vis, animate_vis, document_vis) = (
			this.engine.clone(),
			this.frame_id.clone(),
			this.animate.clone(),
			this.document.clone(),
		);
		let on_visibility: Closure<dyn FnMut()> = Closure::new(move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if document_vis.hidden() {
				engine_vis.borrow_mut().pause();
				if let Some(id) = frame_vis.take() {
					let _ = window.cancel_animation_frame(id);
				}
			} else {
				let running = {
					let mut engine = engine_vis.borrow_mut();
					engine.resume();
					engine.scheduler().is_running()
				};
				if running && frame_vis.get().is_none() {
					request_frame(&window, &animate_vis, &frame_vis);
				}
			}
		});
		let _ = this.document.add_event_listener_with_callback(
			"visibilitychange",
			on_visibility.as_ref().unchecked_ref(),
		);
		this.on_visibility = Some(on_visibility);

		if !this.document.hidden() {
			request_frame(&this.window, &this.animate, &this.frame_id);
		} else {
			this.engine.borrow_mut().pause();
		}
		Ok(this)
	}

	fn teardown(&mut self) {
		if self.torn_down {
			return;
		}
		self.torn_down = true;

		if let Ok(mut engine) = self.engine.try_borrow_mut() {
			engine.stop();
		}
		if let Some(id) = self.frame_id.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		if let Some(cb) = self.on_resize.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}
		if let Some(cb) = self.on_visibility.take() {
			let _ = self
				.document
				.remove_event_listener_with_callback("visibilitychange", cb.as_ref().unchecked_ref());
		}
		// The frame closure holds a handle to its own slot; releasing it breaks the cycle.
		self.animate.borrow_mut().take();
		debug!("hero-backdrop: animation loop torn down");
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.teardown();
	}
}

/// Full-viewport animated background for the hero section.
///
/// Sits behind page content (`z-index: 0`, no pointer events) at `opacity`.
/// Every change of `theme` replaces the particle system; when the user prefers
/// reduced motion only a static background is painted.
#[component]
pub fn HeroBackground(
	/// Active theme; each change remounts the animation.
	#[prop(into)]
	theme: Signal<ThemeName>,
	/// Tick rate, independent of the display refresh rate.
	#[prop(default = 30.0)]
	target_fps: f64,
	/// Canvas opacity, clamped to `0..=1`.
	#[prop(default = 0.8)]
	opacity: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let running = StoredValue::new_local(None::<AnimationLoop>);

	Effect::new(move |_| {
		let theme = theme.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		running.try_update_value(|slot| {
			if let Some(mut previous) = slot.take() {
				previous.teardown();
			}
			*slot = match AnimationLoop::mount(canvas, theme, target_fps) {
				Ok(animation) => Some(animation),
				Err(e) => {
					debug!("hero-backdrop: not starting: {}", e);
					None
				}
			};
		});
	});

	on_cleanup(move || {
		running.try_update_value(|slot| {
			if let Some(mut animation) = slot.take() {
				animation.teardown();
			}
		});
	});

	let style = format!(
		"position: absolute; inset: 0; z-index: 0; pointer-events: none; opacity: {};",
		opacity.clamp(0.0, 1.0)
	);

	view! {
		<canvas
			node_ref=canvas_ref
			class="hero-background-canvas"
			aria-hidden="true"
			style=style
		/>
	}
}
