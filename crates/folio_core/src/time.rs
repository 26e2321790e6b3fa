#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// Source of per-frame time deltas.
///
/// Each call returns the seconds elapsed since the previous call, so a frame
/// the host skipped simply shows up as a larger delta on the next one.
pub trait Clock {
    fn delta_seconds(&mut self) -> f32;
}

/// Monotonic wall clock, started at construction.
pub struct FrameClock {
    start_time: Instant,
    last_update: Instant,
    /// Time since last tick
    pub delta: Duration,
    /// Total elapsed time since creation
    pub elapsed: Duration,
    /// Total number of ticks
    pub frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_update: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_update;
        self.elapsed = now - self.start_time;
        self.last_update = now;
        self.frame_count += 1;
    }
}

impl Clock for FrameClock {
    fn delta_seconds(&mut self) -> f32 {
        self.tick();
        self.delta.as_secs_f32()
    }
}

/// Clock advanced by hand. Used by tests and scripted playback.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    pending: f32,
    /// Total seconds handed out so far
    pub elapsed: f32,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `seconds` for the next [`Clock::delta_seconds`] call.
    pub fn advance(&mut self, seconds: f32) {
        self.pending += seconds;
    }
}

impl Clock for ManualClock {
    fn delta_seconds(&mut self) -> f32 {
        let dt = std::mem::take(&mut self.pending);
        self.elapsed += dt;
        dt
    }
}
