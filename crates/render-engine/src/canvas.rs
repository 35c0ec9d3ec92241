//! Pixel surfaces: the borrowed source frame and the owned target canvas.

use clipframe_common::error::{ClipframeError, ClipframeResult};
use clipframe_model::clip::ClipConfig;
use clipframe_model::geometry::FrameSize;
use image::{Rgba, RgbaImage};

/// Opaque black, the canvas background before compositing.
pub const CANVAS_BACKGROUND: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A decoded RGBA frame, borrowed for the duration of one composite call.
#[derive(Debug, Clone, Copy)]
pub struct SourceFrame<'a> {
    image: &'a RgbaImage,
}

impl<'a> SourceFrame<'a> {
    pub fn new(image: &'a RgbaImage) -> Self {
        Self { image }
    }

    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.image.width(), self.image.height())
    }

    pub fn image(&self) -> &'a RgbaImage {
        self.image
    }
}

/// Fixed-size RGBA drawing surface for one output clip.
///
/// Dimensions never change after construction. One canvas must only be
/// written by one compositor at a time.
#[derive(Debug, Clone)]
pub struct TargetCanvas {
    image: RgbaImage,
}

impl TargetCanvas {
    /// Allocate a black canvas. Zero dimensions are rejected.
    pub fn new(size: FrameSize) -> ClipframeResult<Self> {
        if size.width == 0 {
            return Err(ClipframeError::invalid_dimension("target_width", 0.0));
        }
        if size.height == 0 {
            return Err(ClipframeError::invalid_dimension("target_height", 0.0));
        }
        Ok(Self {
            image: RgbaImage::from_pixel(size.width, size.height, CANVAS_BACKGROUND),
        })
    }

    /// Allocate a canvas sized from the clip's aspect and quality presets.
    pub fn for_clip(clip: &ClipConfig) -> ClipframeResult<Self> {
        Self::new(clip.canvas_size())
    }

    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.image.width(), self.image.height())
    }

    /// Paint every pixel opaque black.
    pub fn fill_black(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = CANVAS_BACKGROUND;
        }
    }

    /// Raw RGBA bytes, row-major, for handing to an encoder.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }
}
