//! Frame clock: timestamps in, simulation deltas out

use serde::{Deserialize, Serialize};

/// Converts successive frame timestamps (milliseconds) into deltas (seconds)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    baseline: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { baseline: None }
    }

    /// Elapsed seconds since the previous call, never negative, capped at
    /// `max_delta`. The first call after construction or `invalidate` only
    /// records the baseline and returns 0.
    ///
    /// A hitch longer than `max_delta` loses simulated time; the simulation
    /// does not catch up afterwards.
    pub fn delta(&mut self, now_ms: f64, max_delta: f32) -> f32 {
        if !now_ms.is_finite() {
            log::warn!("Ignoring non-finite frame timestamp");
            return 0.0;
        }
        let Some(prev) = self.baseline.replace(now_ms) else {
            return 0.0;
        };
        let dt = ((now_ms - prev) / 1000.0) as f32;
        if dt <= 0.0 {
            0.0
        } else {
            dt.min(max_delta)
        }
    }

    /// Forget the baseline so the next frame reports 0 (used on resume)
    pub fn invalidate(&mut self) {
        self.baseline = None;
    }

    pub fn has_baseline(&self) -> bool {
        self.baseline.is_some()
    }
}
