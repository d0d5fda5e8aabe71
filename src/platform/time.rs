//! Frame timing
//!
//! Turns display-refresh timestamps into clamped frame durations. Holds no
//! game state.

use crate::consts::{MAX_FRAME_MS, NOMINAL_FRAME_MS};

/// Converts successive frame timestamps (ms) into elapsed frame time
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elapsed time since the previous frame, clamped to `MAX_FRAME_MS`.
    /// The first frame reports the nominal frame time.
    pub fn frame_dt(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last).max(0.0) as f32).min(MAX_FRAME_MS),
            None => NOMINAL_FRAME_MS,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp (e.g. after the page was hidden)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
