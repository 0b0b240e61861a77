//! Fixed-rate tick policy layered over the browser's frame callback.
//!
//! The browser calls back at its native refresh rate; [`FrameScheduler::poll`]
//! decides which of those callbacks become ticks.

use log::debug;

/// Scheduler lifecycle. `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
	/// Constructed, not started yet.
	Idle,
	/// Frames may tick.
	Running,
	/// Hidden tab; frames are ignored until resumed.
	Paused,
	/// Torn down.
	Stopped,
}

/// Throttles frame callbacks to a fixed tick interval.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
	interval_ms: f64,
	last_tick: Option<f64>,
	state: SchedulerState,
}

impl FrameScheduler {
	/// Non-finite or non-positive rates fall back to 30 fps.
	pub fn new(target_fps: f64) -> Self {
		let fps = if target_fps.is_finite() && target_fps > 0.0 {
			target_fps
		} else {
			30.0
		};
		Self {
			interval_ms: 1000.0 / fps,
			last_tick: None,
			state: SchedulerState::Idle,
		}
	}

	/// Milliseconds between ticks.
	pub fn interval_ms(&self) -> f64 {
		self.interval_ms
	}

	/// Current lifecycle state.
	pub fn state(&self) -> SchedulerState {
		self.state
	}

	/// Whether the browser loop should keep requesting frames.
	pub fn is_running(&self) -> bool {
		self.state == SchedulerState::Running
	}

	/// Moves from `Idle` to `Running`. Any other state is left alone.
	pub fn start(&mut self) {
		if self.state == SchedulerState::Idle {
			self.state = SchedulerState::Running;
			self.last_tick = None;
		}
	}

	/// Moves from `Running` to `Paused`.
	pub fn pause(&mut self) {
		if self.state == SchedulerState::Running {
			debug!("hero-backdrop: scheduler paused");
			self.state = SchedulerState::Paused;
		}
	}

	/// Resumes after a pause. The elapsed-time baseline is dropped so the
	/// first frame after resuming does not see the hidden interval.
	pub fn resume(&mut self) {
		if self.state == SchedulerState::Paused {
			debug!("hero-backdrop: scheduler resumed");
			self.state = SchedulerState::Running;
			self.last_tick = None;
		}
	}

	/// Stops for good from any state.
	pub fn stop(&mut self) {
		self.state = SchedulerState::Stopped;
		self.last_tick = None;
	}

	/// Decides whether the frame callback at `timestamp_ms` runs a tick.
	///
	/// The first frame after start or resume only establishes the baseline.
	/// On a tick the baseline advances by whole intervals, keeping the
	/// remainder so the average rate stays on target.
	pub fn poll(&mut self, timestamp_ms: f64) -> bool {
		if self.state != SchedulerState::Running {
			return false;
		}
		let Some(last) = self.last_tick else {
			self.last_tick = Some(timestamp_ms);
			return false;
		};
		let delta = timestamp_ms - last;
		if delta < self.interval_ms {
			// Clock went backwards: rebase instead of stalling.
			if delta < 0.0 {
				self.last_tick = Some(timestamp_ms);
			}
			return false;
		}
		self.last_tick = Some(timestamp_ms - delta % self.interval_ms);
		true
	}
}

impl Default for FrameScheduler {
	fn default() -> Self {
		Self::new(30.0)
	}
}
