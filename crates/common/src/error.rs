//! Error types shared across Clipframe crates.

use std::path::PathBuf;

/// Top-level error type for Clipframe operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipframeError {
    #[error("Invalid dimension: {name} = {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("Unsupported focus policy: {value}")]
    UnsupportedFocusPolicy { value: String },

    #[error("Unsupported {kind} preset: {value}")]
    UnsupportedPreset { kind: &'static str, value: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Export error: {message}")]
    Export { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Unsupported operation: {message}")]
    Unsupported { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ClipframeError.
pub type ClipframeResult<T> = Result<T, ClipframeError>;

impl ClipframeError {
    pub fn invalid_dimension(name: &'static str, value: f64) -> Self {
        Self::InvalidDimension { name, value }
    }

    pub fn unsupported_focus(value: impl Into<String>) -> Self {
        Self::UnsupportedFocusPolicy {
            value: value.into(),
        }
    }

    pub fn unsupported_preset(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnsupportedPreset {
            kind,
            value: value.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported {
            message: msg.into(),
        }
    }
}
