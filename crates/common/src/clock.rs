//! Frame timing utilities for paced export loops.
//!
//! Export runs frame by frame at a fixed rate. This module provides:
//! - Resolving a requested `[start, end)` window against a source duration
//! - Converting between frame indices and timestamps
//! - Calculating the frame budget that terminates the loop

/// A resolved time window within a source clip, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipWindow {
    pub start_secs: f64,
    pub end_secs: f64,
}

impl ClipWindow {
    /// Resolve optional bounds against a known source duration.
    ///
    /// Bounds are clamped to `[0, duration]`; an inverted window collapses
    /// to zero length at `start`.
    pub fn resolve(duration_secs: f64, start_secs: Option<f64>, end_secs: Option<f64>) -> Self {
        let duration_secs = duration_secs.max(0.0);
        let start = start_secs.unwrap_or(0.0).clamp(0.0, duration_secs);
        let end = end_secs
            .unwrap_or(duration_secs)
            .clamp(0.0, duration_secs)
            .max(start);
        Self {
            start_secs: start,
            end_secs: end,
        }
    }

    /// Length of the window in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }

    pub fn is_empty(&self) -> bool {
        self.duration_secs() <= 0.0
    }
}

/// Fixed-rate frame clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameClock {
    fps: u32,
}

impl FrameClock {
    /// Create a clock at the given rate. A rate of zero is treated as 1 fps.
    pub fn new(fps: u32) -> Self {
        Self { fps: fps.max(1) }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(&self) -> f64 {
        1.0 / self.fps as f64
    }

    /// Number of frames needed to cover `duration_secs`.
    pub fn frame_count(&self, duration_secs: f64) -> u64 {
        if duration_secs <= 0.0 {
            return 0;
        }
        // Snap to microseconds so float noise above a whole frame does not
        // add one.
        let frames = ((duration_secs * self.fps as f64) * 1e6).round() / 1e6;
        frames.ceil() as u64
    }

    /// Presentation time of a frame relative to the window start.
    pub fn frame_time_secs(&self, frame_index: u64) -> f64 {
        frame_index as f64 / self.fps as f64
    }

    /// Frame budget for a resolved window.
    pub fn frames_in(&self, window: &ClipWindow) -> u64 {
        self.frame_count(window.duration_secs())
    }
}
