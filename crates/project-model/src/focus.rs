//! Focus policies: named crop biases.
//!
//! A policy only shifts where the crop window sits along the overflowing
//! axis. No frame content is inspected.

use std::fmt;
use std::str::FromStr;

use clipframe_common::error::ClipframeError;
use serde::{Deserialize, Serialize};

/// Where the subject of interest is assumed to sit in frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusPolicy {
    #[default]
    Center,
    Face,
    Action,
}

impl FocusPolicy {
    pub const ALL: [FocusPolicy; 3] = [FocusPolicy::Center, FocusPolicy::Face, FocusPolicy::Action];

    /// Fraction of the horizontal overflow placed left of the canvas.
    pub const fn bias_x(self) -> f64 {
        match self {
            FocusPolicy::Center => 0.5,
            FocusPolicy::Face => 0.3,
            FocusPolicy::Action => 0.4,
        }
    }

    /// Fraction of the vertical overflow placed above the canvas.
    ///
    /// Below one half so faces, which usually sit high in frame, stay visible.
    pub const fn bias_y(self) -> f64 {
        match self {
            FocusPolicy::Center => 0.5,
            FocusPolicy::Face => 0.2,
            FocusPolicy::Action => 0.3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FocusPolicy::Center => "center",
            FocusPolicy::Face => "face",
            FocusPolicy::Action => "action",
        }
    }

    /// Parse a policy name, falling back to [`FocusPolicy::Center`].
    ///
    /// The second element carries the parse error when the fallback was
    /// taken, so the caller can decide whether to report it.
    pub fn parse_or_center(s: &str) -> (Self, Option<ClipframeError>) {
        match s.parse() {
            Ok(policy) => (policy, None),
            Err(err) => (FocusPolicy::Center, Some(err)),
        }
    }
}

impl fmt::Display for FocusPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FocusPolicy {
    type Err = ClipframeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "center" | "centre" => Ok(FocusPolicy::Center),
            "face" => Ok(FocusPolicy::Face),
            "action" => Ok(FocusPolicy::Action),
            _ => Err(ClipframeError::unsupported_focus(s.trim())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_center() {
        assert_eq!(FocusPolicy::default(), FocusPolicy::Center);
    }

    #[test]
    fn test_biases_stay_inside_unit_interval() {
        for policy in FocusPolicy::ALL {
            assert!(policy.bias_x() > 0.0 && policy.bias_x() <= 0.5);
            assert!(policy.bias_y() > 0.0 && policy.bias_y() <= 0.5);
        }
        assert_eq!(FocusPolicy::Center.bias_x(), 0.5);
        assert_eq!(FocusPolicy::Center.bias_y(), 0.5);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("FACE".parse::<FocusPolicy>().unwrap(), FocusPolicy::Face);
        assert_eq!(" Action ".parse::<FocusPolicy>().unwrap(), FocusPolicy::Action);
    }

    #[test]
    fn test_unknown_policy_is_an_error() {
        let err = "crowd".parse::<FocusPolicy>().unwrap_err();
        assert!(matches!(
            err,
            ClipframeError::UnsupportedFocusPolicy { ref value } if value == "crowd"
        ));
    }

    #[test]
    fn test_parse_or_center_falls_back() {
        let (policy, rejected) = FocusPolicy::parse_or_center("crowd");
        assert_eq!(policy, FocusPolicy::Center);
        assert!(rejected.is_some());

        let (policy, rejected) = FocusPolicy::parse_or_center("face");
        assert_eq!(policy, FocusPolicy::Face);
        assert!(rejected.is_none());
    }
}
