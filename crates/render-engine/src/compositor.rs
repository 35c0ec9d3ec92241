//! Frame compositor: draws a source frame onto the target canvas.
//!
//! Per frame:
//! 1. Plan the draw rectangle (uniform cover scale, focus-biased offset)
//! 2. Fill the canvas with opaque black
//! 3. Resample the visible source region to exactly the canvas size
//! 4. Alpha-composite it over the black fill
//! 5. Darken the corners when the clip asks for a vignette
//!
//! Step 3 maps the canvas back into source space instead of scaling the
//! whole frame and clipping it, so the scaled intermediate is never larger
//! than the canvas.

use clipframe_common::error::ClipframeResult;
use clipframe_model::clip::{ClipConfig, Resample};
use clipframe_model::focus::FocusPolicy;
use clipframe_model::geometry::ReframeResult;
use clipframe_processing_core::reframe::{plan_reframe, visible_source_region};
use image::imageops::{self, FilterType};

use crate::canvas::{SourceFrame, TargetCanvas};
use crate::vignette::VignetteMask;

/// Composites frames for one clip.
///
/// Holds only per-clip settings and the vignette mask for the clip's canvas
/// size; no frame data survives between calls, so compositing the same
/// frame twice yields the same canvas and the same [`ReframeResult`].
#[derive(Debug, Clone)]
pub struct Compositor {
    focus: FocusPolicy,
    filter: FilterType,
    vignette: Option<VignetteMask>,
}

impl Compositor {
    pub fn new(clip: &ClipConfig) -> Self {
        Self {
            focus: clip.focus,
            filter: filter_for(clip.resample()),
            vignette: clip
                .applies_vignette()
                .then(|| VignetteMask::new(clip.canvas_size())),
        }
    }

    pub fn focus(&self) -> FocusPolicy {
        self.focus
    }

    pub fn applies_vignette(&self) -> bool {
        self.vignette.is_some()
    }

    /// Draw `source` onto `canvas`, replacing its previous contents.
    ///
    /// Fails with `InvalidDimension` before touching the canvas if either
    /// surface has a zero dimension.
    pub fn composite(
        &self,
        source: SourceFrame<'_>,
        canvas: &mut TargetCanvas,
    ) -> ClipframeResult<ReframeResult> {
        let source_size = source.size();
        let target = canvas.size();
        let result = plan_reframe(source_size, target, self.focus)?;

        canvas.fill_black();

        let region = visible_source_region(&result, source_size, target);
        let (x, y, width, height) = region.to_pixels(source_size);
        let visible = imageops::crop_imm(source.image(), x, y, width, height);
        let scaled = imageops::resize(&*visible, target.width, target.height, self.filter);
        imageops::overlay(canvas.image_mut(), &scaled, 0, 0);

        if let Some(mask) = &self.vignette {
            mask.apply(canvas.image_mut());
        }

        Ok(result)
    }
}

fn filter_for(resample: Resample) -> FilterType {
    match resample {
        Resample::Bilinear => FilterType::Triangle,
        Resample::Lanczos => FilterType::Lanczos3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipframe_common::error::ClipframeError;
    use clipframe_model::clip::RenderMode;
    use clipframe_model::geometry::FrameSize;
    use clipframe_model::preset::{AspectPreset, QualityPreset};
    use image::{Rgba, RgbaImage};

    /// Landscape frame: left third red, middle third green, right third blue.
    fn striped_source(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _| {
            if x < width / 3 {
                Rgba([255, 0, 0, 255])
            } else if x < 2 * width / 3 {
                Rgba([0, 255, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        })
    }

    fn plain_clip(focus: FocusPolicy) -> ClipConfig {
        ClipConfig {
            focus,
            vignette: false,
            ..ClipConfig::default()
        }
    }

    #[test]
    fn test_center_crop_keeps_middle_of_landscape_source() {
        let source = striped_source(192, 108);
        let mut canvas = TargetCanvas::new(FrameSize::new(72, 128)).unwrap();
        let compositor = Compositor::new(&plain_clip(FocusPolicy::Center));

        let result = compositor
            .composite(SourceFrame::new(&source), &mut canvas)
            .unwrap();

        assert_eq!(result.draw_height, 128.0);
        let centre = canvas.image().get_pixel(36, 64);
        assert!(centre.0[1] > 200, "expected green centre, got {centre:?}");
        assert!(centre.0[0] < 50 && centre.0[2] < 50);
    }

    #[test]
    fn test_every_canvas_pixel_is_opaque_after_composite() {
        let source = RgbaImage::from_pixel(40, 90, Rgba([10, 20, 30, 255]));
        let mut canvas = TargetCanvas::new(FrameSize::new(64, 36)).unwrap();
        let compositor = Compositor::new(&plain_clip(FocusPolicy::Face));

        compositor
            .composite(SourceFrame::new(&source), &mut canvas)
            .unwrap();

        assert!(canvas.image().pixels().all(|p| p.0[3] == 255));
        assert!(canvas
            .image()
            .pixels()
            .all(|p| p.0[..3] == [10, 20, 30]));
    }

    #[test]
    fn test_transparent_source_shows_black_fill() {
        let source = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 0]));
        let mut canvas = TargetCanvas::new(FrameSize::new(8, 8)).unwrap();
        let compositor = Compositor::new(&plain_clip(FocusPolicy::Center));

        compositor
            .composite(SourceFrame::new(&source), &mut canvas)
            .unwrap();

        assert!(canvas.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_compositing_twice_is_idempotent() {
        let source = striped_source(160, 90);
        let mut canvas = TargetCanvas::new(FrameSize::new(36, 64)).unwrap();
        let compositor = Compositor::new(&ClipConfig::default());

        let first = compositor
            .composite(SourceFrame::new(&source), &mut canvas)
            .unwrap();
        let first_pixels = canvas.as_raw().to_vec();
        let second = compositor
            .composite(SourceFrame::new(&source), &mut canvas)
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(first_pixels, canvas.as_raw());
    }

    #[test]
    fn test_zero_sized_source_leaves_canvas_untouched() {
        let source = RgbaImage::new(0, 10);
        let mut canvas = TargetCanvas::new(FrameSize::new(8, 8)).unwrap();
        canvas.image_mut().put_pixel(0, 0, Rgba([9, 9, 9, 255]));
        let compositor = Compositor::new(&plain_clip(FocusPolicy::Center));

        let err = compositor
            .composite(SourceFrame::new(&source), &mut canvas)
            .unwrap_err();

        assert!(matches!(err, ClipframeError::InvalidDimension { .. }));
        assert_eq!(canvas.image().get_pixel(0, 0).0, [9, 9, 9, 255]);
    }

    #[test]
    fn test_vignette_darkens_corners_in_standard_mode() {
        let source = RgbaImage::from_pixel(64, 64, Rgba([200, 200, 200, 255]));
        let clip = ClipConfig {
            aspect: AspectPreset::Square,
            quality: QualityPreset::Hd,
            vignette: true,
            ..ClipConfig::default()
        };
        let mut canvas = TargetCanvas::for_clip(&clip).unwrap();
        let compositor = Compositor::new(&clip);
        assert!(compositor.applies_vignette());

        compositor
            .composite(SourceFrame::new(&source), &mut canvas)
            .unwrap();

        assert_eq!(canvas.image().get_pixel(540, 540).0[0], 200);
        assert!(canvas.image().get_pixel(0, 0).0[0] < 200);
    }

    #[test]
    fn test_fast_mode_never_vignettes() {
        let clip = ClipConfig {
            mode: RenderMode::Fast,
            vignette: true,
            ..ClipConfig::default()
        };
        assert!(!Compositor::new(&clip).applies_vignette());
    }

    #[test]
    fn test_premium_mode_uses_lanczos() {
        let clip = ClipConfig {
            mode: RenderMode::Premium,
            ..ClipConfig::default()
        };
        assert_eq!(Compositor::new(&clip).filter, FilterType::Lanczos3);
        assert_eq!(
            Compositor::new(&ClipConfig::default()).filter,
            FilterType::Triangle
        );
    }
}
