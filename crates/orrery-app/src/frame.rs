//! Per-frame timing.
//!
//! The tweens are wall-clock driven, so the loop runs at the display rate and
//! each frame advances the timeline by the measured delta. Long stalls (a
//! dragged window, a debugger pause) are clamped so the animation resumes
//! instead of snapping to its end.

use std::time::Instant;
use tracing::warn;

/// Longest frame delta fed to the timeline, in seconds.
pub const MAX_FRAME_SECS: f32 = 0.25;

/// Measures the time between frames.
pub struct FrameClock {
    previous: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous: Instant::now(),
        }
    }

    /// Seconds since the previous call, clamped to [`MAX_FRAME_SECS`].
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.previous).as_secs_f32();
        self.previous = now;
        clamp_frame_time(dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

fn clamp_frame_time(dt: f32) -> f32 {
    if dt > MAX_FRAME_SECS {
        warn!(
            "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
            dt * 1000.0,
            MAX_FRAME_SECS * 1000.0
        );
        MAX_FRAME_SECS
    } else {
        dt
    }
}
