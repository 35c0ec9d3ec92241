pub mod check;
pub mod config;
pub mod export;
pub mod frame;
pub mod plan;
pub mod presets;

use clap::Args;
use clipframe_common::config::{AppConfig, ClipDefaults};
use clipframe_model::clip::{ClipConfig, RenderMode};
use clipframe_model::focus::FocusPolicy;
use clipframe_model::preset::{AspectPreset, QualityPreset};

/// Clip flags shared by `frame` and `export`.
///
/// Anything left unset falls back to the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ClipArgs {
    /// Aspect preset: 9:16, 16:9, 1:1, 4:5
    #[arg(long)]
    pub aspect: Option<String>,

    /// Quality preset: HD, FHD, 4K
    #[arg(long)]
    pub quality: Option<String>,

    /// Focus policy: center, face, action
    #[arg(long)]
    pub focus: Option<String>,

    /// Render mode: fast, standard, premium
    #[arg(long)]
    pub mode: Option<String>,

    /// Skip the corner vignette
    #[arg(long)]
    pub no_vignette: bool,

    /// Output frame rate
    #[arg(long)]
    pub fps: Option<u32>,
}

impl ClipArgs {
    /// Merge flags over configured defaults into a typed clip config.
    ///
    /// Unknown aspect, quality or mode names are errors. An unknown focus
    /// name is logged and replaced by `center`.
    pub fn resolve(&self, config: &AppConfig) -> anyhow::Result<ClipConfig> {
        resolve_clip(self, &config.clip)
    }
}

fn resolve_clip(args: &ClipArgs, defaults: &ClipDefaults) -> anyhow::Result<ClipConfig> {
    let aspect: AspectPreset = args.aspect.as_deref().unwrap_or(&defaults.aspect).parse()?;
    let quality: QualityPreset = args
        .quality
        .as_deref()
        .unwrap_or(&defaults.quality)
        .parse()?;
    let mode: RenderMode = args.mode.as_deref().unwrap_or(&defaults.mode).parse()?;

    let focus_name = args.focus.as_deref().unwrap_or(&defaults.focus);
    let (focus, err) = FocusPolicy::parse_or_center(focus_name);
    if let Some(err) = err {
        tracing::warn!(error = %err, "Falling back to center focus");
    }

    Ok(ClipConfig {
        aspect,
        quality,
        focus,
        mode,
        vignette: defaults.vignette && !args.no_vignette,
        fps: args.fps.unwrap_or(defaults.fps).max(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = ClipArgs {
            aspect: Some("1:1".to_string()),
            quality: Some("fhd".to_string()),
            mode: Some("premium".to_string()),
            no_vignette: true,
            fps: Some(24),
            ..ClipArgs::default()
        };
        let clip = resolve_clip(&args, &ClipDefaults::default()).unwrap();
        assert_eq!(clip.aspect, AspectPreset::Square);
        assert_eq!(clip.quality, QualityPreset::Fhd);
        assert_eq!(clip.mode, RenderMode::Premium);
        assert!(!clip.vignette);
        assert_eq!(clip.fps, 24);
    }

    #[test]
    fn test_defaults_fill_unset_flags() {
        let defaults = ClipDefaults {
            aspect: "4:5".to_string(),
            focus: "face".to_string(),
            ..ClipDefaults::default()
        };
        let clip = resolve_clip(&ClipArgs::default(), &defaults).unwrap();
        assert_eq!(clip.aspect, AspectPreset::Feed);
        assert_eq!(clip.focus, FocusPolicy::Face);
        assert!(clip.vignette);
        assert_eq!(clip.fps, 30);
    }

    #[test]
    fn test_unknown_focus_falls_back_to_center() {
        let args = ClipArgs {
            focus: Some("eyes".to_string()),
            ..ClipArgs::default()
        };
        let clip = resolve_clip(&args, &ClipDefaults::default()).unwrap();
        assert_eq!(clip.focus, FocusPolicy::Center);
    }

    #[test]
    fn test_unknown_aspect_is_an_error() {
        let args = ClipArgs {
            aspect: Some("21:9".to_string()),
            ..ClipArgs::default()
        };
        assert!(resolve_clip(&args, &ClipDefaults::default()).is_err());
    }
}
