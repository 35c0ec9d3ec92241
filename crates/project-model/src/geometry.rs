//! Frame sizes and reframe rectangles.
//!
//! All rectangle values are in pixels. Draw rectangles live in canvas
//! space and may extend past the canvas edge; source regions live in
//! source-frame space.

use std::fmt;
use std::str::FromStr;

use clipframe_common::error::ClipframeError;
use serde::{Deserialize, Serialize};

/// Integer pixel dimensions of a frame or canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Number of bytes in an RGBA8 buffer of this size.
    pub fn rgba_len(&self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for FrameSize {
    type Err = ClipframeError;

    /// Parse `WIDTHxHEIGHT` (e.g. `1920x1080`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| ClipframeError::config(format!("Expected WIDTHxHEIGHT, got {s:?}")))?;
        let width = w
            .trim()
            .parse::<u32>()
            .map_err(|_| ClipframeError::config(format!("Invalid width in {s:?}")))?;
        let height = h
            .trim()
            .parse::<u32>()
            .map_err(|_| ClipframeError::config(format!("Invalid height in {s:?}")))?;
        Ok(Self { width, height })
    }
}

/// Which canvas axis the source overflows and gets cropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropAxis {
    /// Source is relatively wider: height matches, left/right are cropped.
    Horizontal,
    /// Source is relatively taller (or equal): width matches, top/bottom are cropped.
    Vertical,
}

/// Where the scaled source is drawn on the target canvas.
///
/// `draw_width >= target width` and `draw_height >= target height` always
/// hold, so the canvas is covered with no letterboxing. Offsets are zero or
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReframeResult {
    pub draw_width: f64,
    pub draw_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
    pub crop_axis: CropAxis,
}

impl ReframeResult {
    /// Uniform scale applied to the source frame.
    pub fn scale(&self, source: FrameSize) -> f64 {
        self.draw_width / source.width as f64
    }

    /// Right edge of the draw rectangle in canvas space.
    pub fn right(&self) -> f64 {
        self.offset_x + self.draw_width
    }

    /// Bottom edge of the draw rectangle in canvas space.
    pub fn bottom(&self) -> f64 {
        self.offset_y + self.draw_height
    }

    /// Whether the draw rectangle covers a canvas of the given size.
    pub fn covers(&self, target: FrameSize, tolerance: f64) -> bool {
        self.offset_x <= tolerance
            && self.offset_y <= tolerance
            && self.right() >= target.width as f64 - tolerance
            && self.bottom() >= target.height as f64 - tolerance
    }
}

/// The part of the source frame that lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRegion {
    /// Snap to whole source pixels, staying inside the source bounds and
    /// never collapsing below one pixel.
    pub fn to_pixels(&self, source: FrameSize) -> (u32, u32, u32, u32) {
        let max_w = source.width.max(1);
        let max_h = source.height.max(1);
        let width = (self.width.round() as u32).clamp(1, max_w);
        let height = (self.height.round() as u32).clamp(1, max_h);
        let x = (self.x.round().max(0.0) as u32).min(max_w - width);
        let y = (self.y.round().max(0.0) as u32).min(max_h - height);
        (x, y, width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_size_parse() {
        let size: FrameSize = "1920x1080".parse().unwrap();
        assert_eq!(size, FrameSize::new(1920, 1080));
        assert_eq!(size.to_string(), "1920x1080");
        assert!("1920".parse::<FrameSize>().is_err());
        assert!("axb".parse::<FrameSize>().is_err());
    }

    #[test]
    fn test_rgba_len() {
        assert_eq!(FrameSize::new(4, 3).rgba_len(), 48);
    }

    #[test]
    fn test_result_edges_and_cover() {
        let result = ReframeResult {
            draw_width: 200.0,
            draw_height: 100.0,
            offset_x: -50.0,
            offset_y: 0.0,
            crop_axis: CropAxis::Horizontal,
        };
        assert_eq!(result.right(), 150.0);
        assert_eq!(result.bottom(), 100.0);
        assert!(result.covers(FrameSize::new(100, 100), 1e-9));
        assert!(!result.covers(FrameSize::new(160, 100), 1e-9));
    }

    #[test]
    fn test_region_to_pixels_stays_inside_source() {
        let region = SourceRegion {
            x: 1599.6,
            y: -0.2,
            width: 320.4,
            height: 1080.0,
        };
        let (x, y, w, h) = region.to_pixels(FrameSize::new(1920, 1080));
        assert_eq!((w, h), (320, 1080));
        assert_eq!(x, 1600);
        assert_eq!(y, 0);
        assert!(x + w <= 1920);
    }

    proptest::proptest! {
        #[test]
        fn test_prop_region_pixels_fit_source(
            x in -50.0f64..5000.0,
            y in -50.0f64..5000.0,
            w in 0.0f64..5000.0,
            h in 0.0f64..5000.0,
            sw in 1u32..4000,
            sh in 1u32..4000,
        ) {
            let region = SourceRegion { x, y, width: w, height: h };
            let (px, py, pw, ph) = region.to_pixels(FrameSize::new(sw, sh));
            proptest::prop_assert!(pw >= 1 && ph >= 1);
            proptest::prop_assert!(px + pw <= sw);
            proptest::prop_assert!(py + ph <= sh);
        }
    }
}
