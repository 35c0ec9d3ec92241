//! Single-image reframing.

use std::path::Path;

use clipframe_common::error::{ClipframeError, ClipframeResult};
use clipframe_model::clip::ClipConfig;
use clipframe_model::geometry::ReframeResult;

use crate::canvas::{SourceFrame, TargetCanvas};
use crate::compositor::Compositor;

/// Reframe one image file onto the clip's canvas and save it.
///
/// The output format follows the output path's extension.
pub fn reframe_image(
    input_path: &Path,
    output_path: &Path,
    clip: &ClipConfig,
) -> ClipframeResult<ReframeResult> {
    if !input_path.exists() {
        return Err(ClipframeError::FileNotFound {
            path: input_path.to_path_buf(),
        });
    }

    let source = image::open(input_path)
        .map_err(|e| {
            ClipframeError::render(format!("Failed to decode {}: {e}", input_path.display()))
        })?
        .to_rgba8();

    let mut canvas = TargetCanvas::for_clip(clip)?;
    let result = Compositor::new(clip).composite(SourceFrame::new(&source), &mut canvas)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    canvas.image().save(output_path).map_err(|e| {
        ClipframeError::render(format!("Failed to write {}: {e}", output_path.display()))
    })?;

    tracing::info!(
        input = %input_path.display(),
        output = %output_path.display(),
        source = %format!("{}x{}", source.width(), source.height()),
        canvas = %canvas.size(),
        focus = %clip.focus,
        "Reframed image"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clipframe_model::geometry::FrameSize;
    use clipframe_model::preset::{AspectPreset, QualityPreset};
    use image::{Rgba, RgbaImage};
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("clipframe-still-{}-{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_reframes_png_to_preset_canvas() {
        let dir = scratch_dir("png");
        let input = dir.join("in.png");
        let output = dir.join("nested").join("out.png");
        RgbaImage::from_pixel(320, 180, Rgba([30, 60, 90, 255]))
            .save(&input)
            .unwrap();

        let clip = ClipConfig {
            aspect: AspectPreset::Square,
            quality: QualityPreset::Hd,
            vignette: false,
            ..ClipConfig::default()
        };
        let result = reframe_image(&input, &output, &clip).unwrap();
        assert_eq!(result.draw_height, 1080.0);

        let written = image::open(&output).unwrap().to_rgba8();
        assert_eq!(
            FrameSize::new(written.width(), written.height()),
            FrameSize::new(1080, 1080)
        );
        assert_eq!(written.get_pixel(540, 540).0, [30, 60, 90, 255]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_input_is_reported() {
        let dir = scratch_dir("missing");
        let err = reframe_image(
            &dir.join("nope.png"),
            &dir.join("out.png"),
            &ClipConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ClipframeError::FileNotFound { .. }));
        std::fs::remove_dir_all(&dir).ok();
    }
}
