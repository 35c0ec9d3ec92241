//! Reframe geometry.
//!
//! Maps a source frame of any aspect ratio onto a target canvas of a
//! different one by uniform scale and crop, never letterboxing. The
//! overflowing axis is positioned by the focus policy's bias.
//!
//! Everything here is pure: the same inputs always produce the same
//! [`ReframeResult`], and nothing is logged or retained between calls.

use clipframe_common::error::{ClipframeError, ClipframeResult};
use clipframe_model::focus::FocusPolicy;
use clipframe_model::geometry::{CropAxis, FrameSize, ReframeResult, SourceRegion};

/// Compute the draw rectangle for one source/target/policy triple.
///
/// Every dimension must be finite and strictly positive; otherwise
/// [`ClipframeError::InvalidDimension`] names the offending input.
pub fn compute_reframe(
    source_width: f64,
    source_height: f64,
    target_width: f64,
    target_height: f64,
    focus: FocusPolicy,
) -> ClipframeResult<ReframeResult> {
    check_dimension("source_width", source_width)?;
    check_dimension("source_height", source_height)?;
    check_dimension("target_width", target_width)?;
    check_dimension("target_height", target_height)?;

    // Cross products keep the matched side exact and the overflowing side
    // at or above its target.
    let result = if source_width * target_height > target_width * source_height {
        let draw_height = target_height;
        let draw_width = target_height * source_width / source_height;
        ReframeResult {
            draw_width,
            draw_height,
            offset_x: (target_width - draw_width) * focus.bias_x(),
            offset_y: 0.0,
            crop_axis: CropAxis::Horizontal,
        }
    } else {
        let draw_width = target_width;
        let draw_height = target_width * source_height / source_width;
        ReframeResult {
            draw_width,
            draw_height,
            offset_x: 0.0,
            offset_y: (target_height - draw_height) * focus.bias_y(),
            crop_axis: CropAxis::Vertical,
        }
    };

    Ok(result)
}

/// [`compute_reframe`] over integer frame sizes.
pub fn plan_reframe(
    source: FrameSize,
    target: FrameSize,
    focus: FocusPolicy,
) -> ClipframeResult<ReframeResult> {
    compute_reframe(
        source.width as f64,
        source.height as f64,
        target.width as f64,
        target.height as f64,
        focus,
    )
}

/// The region of the source that ends up on the canvas.
///
/// Inverse of the draw transform: canvas `(0, 0)..(tw, th)` mapped back
/// through the offset and uniform scale.
pub fn visible_source_region(
    result: &ReframeResult,
    source: FrameSize,
    target: FrameSize,
) -> SourceRegion {
    let scale = result.scale(source);
    SourceRegion {
        x: -result.offset_x / scale,
        y: -result.offset_y / scale,
        width: target.width as f64 / scale,
        height: target.height as f64 / scale,
    }
}

fn check_dimension(name: &'static str, value: f64) -> ClipframeResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ClipframeError::invalid_dimension(name, value))
    }
}
