//! Aspect-ratio and quality presets.
//!
//! These are lookup tables, not derived geometry. The aspect preset picks
//! the ratio via a base resolution; the quality preset scales it and fixes
//! the encoder bitrate.

use std::fmt;
use std::str::FromStr;

use clipframe_common::error::ClipframeError;
use serde::{Deserialize, Serialize};

use crate::geometry::FrameSize;

/// Output aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectPreset {
    /// 9:16 vertical (shorts, reels, stories).
    #[serde(rename = "9:16")]
    Portrait,
    /// 16:9 widescreen.
    #[serde(rename = "16:9")]
    Landscape,
    /// 1:1 square.
    #[serde(rename = "1:1")]
    Square,
    /// 4:5 feed portrait.
    #[serde(rename = "4:5")]
    Feed,
}

/// Output resolution and bitrate tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QualityPreset {
    #[serde(rename = "HD")]
    Hd,
    #[serde(rename = "FHD")]
    Fhd,
    #[serde(rename = "4K")]
    Uhd,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 4] = [
        AspectPreset::Portrait,
        AspectPreset::Landscape,
        AspectPreset::Square,
        AspectPreset::Feed,
    ];

    /// Canvas size at the 1x quality multiplier.
    pub const fn base_size(self) -> FrameSize {
        match self {
            AspectPreset::Portrait => FrameSize::new(720, 1280),
            AspectPreset::Landscape => FrameSize::new(1280, 720),
            AspectPreset::Square => FrameSize::new(1080, 1080),
            AspectPreset::Feed => FrameSize::new(1080, 1350),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AspectPreset::Portrait => "9:16",
            AspectPreset::Landscape => "16:9",
            AspectPreset::Square => "1:1",
            AspectPreset::Feed => "4:5",
        }
    }
}

impl QualityPreset {
    pub const ALL: [QualityPreset; 3] = [QualityPreset::Hd, QualityPreset::Fhd, QualityPreset::Uhd];

    /// Scale applied to the aspect preset's base size.
    pub const fn multiplier(self) -> f64 {
        match self {
            QualityPreset::Hd => 1.0,
            QualityPreset::Fhd => 1.5,
            QualityPreset::Uhd => 2.0,
        }
    }

    /// Video bitrate handed to the encoder.
    pub const fn video_bitrate_kbps(self) -> u32 {
        match self {
            QualityPreset::Hd => 3_000,
            QualityPreset::Fhd => 5_000,
            QualityPreset::Uhd => 8_000,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            QualityPreset::Hd => "HD",
            QualityPreset::Fhd => "FHD",
            QualityPreset::Uhd => "4K",
        }
    }
}

/// Target canvas size for an aspect/quality pair.
pub fn target_canvas_size(aspect: AspectPreset, quality: QualityPreset) -> FrameSize {
    let base = aspect.base_size();
    let scale = quality.multiplier();
    FrameSize::new(
        (base.width as f64 * scale).round() as u32,
        (base.height as f64 * scale).round() as u32,
    )
}

impl fmt::Display for AspectPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for QualityPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectPreset {
    type Err = ClipframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "9:16" => Ok(AspectPreset::Portrait),
            "16:9" => Ok(AspectPreset::Landscape),
            "1:1" => Ok(AspectPreset::Square),
            "4:5" => Ok(AspectPreset::Feed),
            other => Err(ClipframeError::unsupported_preset("aspect", other)),
        }
    }
}

impl FromStr for QualityPreset {
    type Err = ClipframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HD" => Ok(QualityPreset::Hd),
            "FHD" => Ok(QualityPreset::Fhd),
            "4K" => Ok(QualityPreset::Uhd),
            _ => Err(ClipframeError::unsupported_preset("quality", s.trim())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_sizes() {
        assert_eq!(AspectPreset::Portrait.base_size(), FrameSize::new(720, 1280));
        assert_eq!(AspectPreset::Landscape.base_size(), FrameSize::new(1280, 720));
        assert_eq!(AspectPreset::Square.base_size(), FrameSize::new(1080, 1080));
        assert_eq!(AspectPreset::Feed.base_size(), FrameSize::new(1080, 1350));
    }

    #[test]
    fn test_4k_square_is_2160() {
        assert_eq!(
            target_canvas_size(AspectPreset::Square, QualityPreset::Uhd),
            FrameSize::new(2160, 2160)
        );
    }

    #[test]
    fn test_fhd_scales_by_one_and_a_half() {
        assert_eq!(
            target_canvas_size(AspectPreset::Portrait, QualityPreset::Fhd),
            FrameSize::new(1080, 1920)
        );
        assert_eq!(
            target_canvas_size(AspectPreset::Feed, QualityPreset::Fhd),
            FrameSize::new(1620, 2025)
        );
    }

    #[test]
    fn test_all_combinations_match_table() {
        for aspect in AspectPreset::ALL {
            for quality in QualityPreset::ALL {
                let size = target_canvas_size(aspect, quality);
                let base = aspect.base_size();
                assert_eq!(
                    size.width,
                    (base.width as f64 * quality.multiplier()).round() as u32
                );
                assert_eq!(
                    size.height,
                    (base.height as f64 * quality.multiplier()).round() as u32
                );
                assert!(size.width > 0 && size.height > 0);
                assert!((size.aspect() - base.aspect()).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn test_bitrates() {
        assert_eq!(QualityPreset::Hd.video_bitrate_kbps(), 3_000);
        assert_eq!(QualityPreset::Fhd.video_bitrate_kbps(), 5_000);
        assert_eq!(QualityPreset::Uhd.video_bitrate_kbps(), 8_000);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("4:5".parse::<AspectPreset>().unwrap(), AspectPreset::Feed);
        assert_eq!("fhd".parse::<QualityPreset>().unwrap(), QualityPreset::Fhd);
        assert_eq!("4k".parse::<QualityPreset>().unwrap(), QualityPreset::Uhd);
        assert!("3:2".parse::<AspectPreset>().is_err());
        assert!("8K".parse::<QualityPreset>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for aspect in AspectPreset::ALL {
            assert_eq!(aspect.to_string().parse::<AspectPreset>().unwrap(), aspect);
        }
        for quality in QualityPreset::ALL {
            assert_eq!(quality.to_string().parse::<QualityPreset>().unwrap(), quality);
        }
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&AspectPreset::Portrait).unwrap();
        assert_eq!(json, "\"9:16\"");
        let json = serde_json::to_string(&QualityPreset::Uhd).unwrap();
        assert_eq!(json, "\"4K\"");
    }
}
