//! Clipframe Model
//!
//! Defines the core data contracts for reframing clips:
//! - **Presets:** Aspect-ratio and quality tiers with their canvas sizes and bitrates
//! - **Focus:** Named crop-bias policies
//! - **Clip:** The single configuration record consumed by every render path
//! - **Geometry:** Frame sizes, draw rectangles, and visible source regions
//!
//! Preset tables are explicit constants; nothing here inspects pixels.

pub mod clip;
pub mod focus;
pub mod geometry;
pub mod preset;

pub use clip::*;
pub use focus::*;
pub use geometry::*;
pub use preset::*;
