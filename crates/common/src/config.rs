//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ClipframeError;

/// Global application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where exported clips are written when no output is given.
    pub output_dir: PathBuf,

    /// Default clip settings.
    #[serde(default)]
    pub clip: ClipDefaults,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default clip parameters, stored by preset name.
///
/// Names are resolved into typed presets by the model crate so that a
/// config file with an unknown name still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipDefaults {
    /// Aspect preset name (`9:16`, `16:9`, `1:1`, `4:5`).
    pub aspect: String,

    /// Quality preset name (`HD`, `FHD`, `4K`).
    pub quality: String,

    /// Focus policy name (`center`, `face`, `action`).
    pub focus: String,

    /// Render mode name (`fast`, `standard`, `premium`).
    pub mode: String,

    /// Whether to apply the corner vignette.
    pub vignette: bool,

    /// Output frame rate.
    pub fps: u32,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "clipframe=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            clip: ClipDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ClipDefaults {
    fn default() -> Self {
        Self {
            aspect: "9:16".to_string(),
            quality: "HD".to_string(),
            focus: "center".to_string(),
            mode: "standard".to_string(),
            vignette: true,
            fps: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from the standard location, returning the reason when
    /// defaults had to be used.
    ///
    /// For callers that install logging from the loaded config and report
    /// the fallback afterwards.
    pub fn load_checked() -> (Self, Option<ClipframeError>) {
        Self::load_from_checked(&config_file_path())
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        let (config, err) = Self::load_from_checked(config_path);
        if let Some(err) = err {
            tracing::warn!(error = %err, "Using default configuration");
        }
        config
    }

    /// [`AppConfig::load_from`] without logging. A missing file is not an
    /// error.
    pub fn load_from_checked(config_path: &Path) -> (Self, Option<ClipframeError>) {
        if !config_path.exists() {
            return (Self::default(), None);
        }
        let result = std::fs::read_to_string(config_path)
            .map_err(|e| {
                ClipframeError::config(format!("Failed to read {}: {e}", config_path.display()))
            })
            .and_then(|content| {
                serde_json::from_str::<Self>(&content).map_err(|e| {
                    ClipframeError::config(format!(
                        "Failed to parse {}: {e}",
                        config_path.display()
                    ))
                })
            });
        match result {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<PathBuf, std::io::Error> {
        let config_path = config_file_path();
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save config to an explicit path.
    pub fn save_to(&self, config_path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("clipframe").join("config.json")
}

/// Default export directory.
fn default_output_dir() -> PathBuf {
    let base = std::env::var("XDG_VIDEOS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join("Videos")
        });
    base.join("clipframe")
}
