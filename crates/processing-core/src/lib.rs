//! Clipframe Processing Core: the reframer
//!
//! Computes where a source frame is drawn on a target canvas:
//! - **Reframe:** Uniform scale that covers the canvas on both axes
//! - **Focus bias:** Position the crop window on the overflowing axis
//! - **Visible region:** The source-space rectangle that lands on the canvas
//!
//! This crate is pure computation with no I/O, pixels, or logging.
//! All inputs are data; all outputs are data.

pub mod reframe;

pub use reframe::{compute_reframe, plan_reframe, visible_source_region};
