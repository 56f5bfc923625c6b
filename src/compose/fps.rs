use std::time::{Duration, Instant};

/// Frame rate the live overlay is expected to sustain.
pub const TARGET_FPS: u32 = 24;

/// Wall-clock time one frame may take at [`TARGET_FPS`].
pub fn frame_budget() -> Duration {
    Duration::from_secs(1) / TARGET_FPS
}

/// Rolling frames-per-second counter.
///
/// Frames are counted into a window; once the window spans at least a second the rate is published
/// and a new window starts.
#[derive(Debug, Clone)]
pub struct FpsMeter {
    window_start: Instant,
    frames: u32,
    fps: Option<u32>,
}

impl FpsMeter {
    pub fn new(start: Instant) -> Self {
        Self {
            window_start: start,
            frames: 0,
            fps: None,
        }
    }

    /// Count one frame rendered at `now`. Returns the new rate when one is published.
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed < Duration::from_secs(1) {
            return None;
        }
        let fps = (f64::from(self.frames) / elapsed.as_secs_f64()).round() as u32;
        self.fps = Some(fps);
        self.frames = 0;
        self.window_start = now;
        if fps < TARGET_FPS {
            tracing::debug!(fps, target = TARGET_FPS, "frame rate below target");
        }
        Some(fps)
    }

    /// Last published rate.
    pub fn fps(&self) -> Option<u32> {
        self.fps
    }
}

/// Log a warning when one frame took longer than [`frame_budget`]. Returns whether it fit.
pub fn check_frame_time(elapsed: Duration) -> bool {
    let budget = frame_budget();
    if elapsed > budget {
        tracing::warn!(
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            budget_ms = budget.as_secs_f64() * 1000.0,
            "frame over budget"
        );
        return false;
    }
    true
}

#[cfg(test)]
#[path = "../../tests/unit/compose/fps.rs"]
mod tests;
