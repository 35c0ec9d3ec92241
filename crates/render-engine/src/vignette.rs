//! Cosmetic corner vignette.
//!
//! Transparent from the canvas centre out to 70% of the half-diagonal, then
//! ramping linearly to a faint black at the corners.

use clipframe_model::geometry::FrameSize;
use image::RgbaImage;

/// Fraction of the half-diagonal that stays untouched.
pub const VIGNETTE_INNER_FRACTION: f64 = 0.7;

/// Black overlay alpha reached at the canvas corners.
pub const VIGNETTE_CORNER_ALPHA: f64 = 0.12;

/// Overlay alpha for the pixel at `(x, y)` on a canvas of `size`.
pub fn vignette_alpha(x: u32, y: u32, size: FrameSize) -> f64 {
    let cx = size.width as f64 / 2.0;
    let cy = size.height as f64 / 2.0;
    let outer = (cx * cx + cy * cy).sqrt();
    let inner = outer * VIGNETTE_INNER_FRACTION;

    let dx = x as f64 + 0.5 - cx;
    let dy = y as f64 + 0.5 - cy;
    let d = (dx * dx + dy * dy).sqrt();
    if d <= inner || outer <= inner {
        return 0.0;
    }
    ((d - inner) / (outer - inner)).clamp(0.0, 1.0) * VIGNETTE_CORNER_ALPHA
}

/// Precomputed per-pixel darkening factors for one canvas size.
///
/// Building the mask costs one square root per pixel, so export loops
/// build it once per clip and reuse it for every frame.
#[derive(Debug, Clone)]
pub struct VignetteMask {
    size: FrameSize,
    /// `1 - alpha` per pixel, row-major.
    keep: Vec<f32>,
}

impl VignetteMask {
    pub fn new(size: FrameSize) -> Self {
        let mut keep = Vec::with_capacity(size.width as usize * size.height as usize);
        for y in 0..size.height {
            for x in 0..size.width {
                keep.push((1.0 - vignette_alpha(x, y, size)) as f32);
            }
        }
        Self { size, keep }
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Darken `image` in place. Alpha channels are left as they are.
    ///
    /// The image must match the mask size; a mismatched image is
    /// processed with a freshly built mask instead.
    pub fn apply(&self, image: &mut RgbaImage) {
        if image.width() != self.size.width || image.height() != self.size.height {
            VignetteMask::new(FrameSize::new(image.width(), image.height())).apply(image);
            return;
        }

        for (pixel, &keep) in image.pixels_mut().zip(&self.keep) {
            if keep >= 1.0 {
                continue;
            }
            for channel in &mut pixel.0[..3] {
                *channel = (*channel as f32 * keep).round() as u8;
            }
        }
    }
}
