//! Frame-rate smoothing and the fixed tick clock of the mirror worker.

use web_time::{Duration, Instant};

/// Frame-rate smoothing plus a fixed tick clock.
///
/// The mirror worker renders as fast as its headset allows; state changes
/// (rotation, background, light) only happen when a tick is due.
#[derive(Debug, Clone)]
pub struct FrameTiming {
    /// Interval between ticks
    tick_interval: Duration,
    /// Timestamp of the last applied tick
    last_tick: Instant,
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a timer whose first tick falls one interval from now.
    #[must_use]
    pub fn new(tick_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            tick_interval,
            last_tick: now,
            last_frame: now,
            smoothed_fps: 90.0,
            smoothing: 0.05,
        }
    }

    /// Configured tick interval.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// True once at least one interval has passed since the last tick.
    #[must_use]
    pub fn tick_due(&self) -> bool {
        self.last_tick.elapsed() >= self.tick_interval
    }

    /// Record that a tick was applied now.
    ///
    /// The clock restarts from the moment of the tick, so a stalled frame
    /// yields one late tick rather than a burst of catch-up ticks.
    pub fn mark_tick(&mut self) {
        self.last_tick = Instant::now();
    }

    /// Call after each frame to update the FPS estimate.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let frame_time = elapsed.as_secs_f32();
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}
