//! Clip configuration.
//!
//! One record describes everything that varies between output clips. The
//! render path branches on [`RenderMode`] instead of having a separate
//! pipeline per speed/quality tier.

use std::fmt;
use std::str::FromStr;

use clipframe_common::error::ClipframeError;
use serde::{Deserialize, Serialize};

use crate::focus::FocusPolicy;
use crate::geometry::FrameSize;
use crate::preset::{target_canvas_size, AspectPreset, QualityPreset};

/// Speed/quality trade-off for compositing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Bilinear resampling, vignette always skipped.
    Fast,
    /// Bilinear resampling.
    #[default]
    Standard,
    /// Lanczos resampling.
    Premium,
}

/// Resampling filter used when scaling the source onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resample {
    Bilinear,
    Lanczos,
}

impl RenderMode {
    pub const fn resample(self) -> Resample {
        match self {
            RenderMode::Fast | RenderMode::Standard => Resample::Bilinear,
            RenderMode::Premium => Resample::Lanczos,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            RenderMode::Fast => "fast",
            RenderMode::Standard => "standard",
            RenderMode::Premium => "premium",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = ClipframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fast" => Ok(RenderMode::Fast),
            "standard" => Ok(RenderMode::Standard),
            "premium" => Ok(RenderMode::Premium),
            _ => Err(ClipframeError::unsupported_preset("render mode", s.trim())),
        }
    }
}

/// Settings fixed for the lifetime of one output clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    pub aspect: AspectPreset,
    pub quality: QualityPreset,
    pub focus: FocusPolicy,
    pub mode: RenderMode,

    /// Apply the corner vignette (ignored in [`RenderMode::Fast`]).
    pub vignette: bool,

    /// Output frame rate.
    pub fps: u32,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            aspect: AspectPreset::Portrait,
            quality: QualityPreset::Hd,
            focus: FocusPolicy::Center,
            mode: RenderMode::Standard,
            vignette: true,
            fps: 30,
        }
    }
}

impl ClipConfig {
    /// Target canvas dimensions from the preset tables.
    pub fn canvas_size(&self) -> FrameSize {
        target_canvas_size(self.aspect, self.quality)
    }

    pub fn video_bitrate_kbps(&self) -> u32 {
        self.quality.video_bitrate_kbps()
    }

    pub fn resample(&self) -> Resample {
        self.mode.resample()
    }

    /// Whether the vignette pass runs for this clip.
    pub fn applies_vignette(&self) -> bool {
        self.vignette && self.mode != RenderMode::Fast
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_clip() {
        let clip = ClipConfig::default();
        assert_eq!(clip.canvas_size(), FrameSize::new(720, 1280));
        assert_eq!(clip.video_bitrate_kbps(), 3_000);
        assert_eq!(clip.resample(), Resample::Bilinear);
        assert!(clip.applies_vignette());
    }

    #[test]
    fn test_fast_mode_skips_vignette() {
        let clip = ClipConfig {
            mode: RenderMode::Fast,
            vignette: true,
            ..ClipConfig::default()
        };
        assert!(!clip.applies_vignette());
    }

    #[test]
    fn test_premium_uses_lanczos() {
        let clip = ClipConfig {
            mode: RenderMode::Premium,
            quality: QualityPreset::Uhd,
            aspect: AspectPreset::Square,
            ..ClipConfig::default()
        };
        assert_eq!(clip.resample(), Resample::Lanczos);
        assert_eq!(clip.canvas_size(), FrameSize::new(2160, 2160));
        assert_eq!(clip.video_bitrate_kbps(), 8_000);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let clip: ClipConfig =
            serde_json::from_str(r#"{"aspect":"4:5","focus":"face","mode":"premium"}"#).unwrap();
        assert_eq!(clip.aspect, AspectPreset::Feed);
        assert_eq!(clip.focus, FocusPolicy::Face);
        assert_eq!(clip.mode, RenderMode::Premium);
        assert_eq!(clip.quality, QualityPreset::Hd);
        assert_eq!(clip.fps, 30);
    }

    #[test]
    fn test_render_mode_parse() {
        assert_eq!("Premium".parse::<RenderMode>().unwrap(), RenderMode::Premium);
        assert!("turbo".parse::<RenderMode>().is_err());
    }
}
