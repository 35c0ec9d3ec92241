//! Clipframe Render Engine
//!
//! Draws decoded source frames onto fixed-size preset canvases and
//! drives ffmpeg to turn a source video into a reframed clip.
//!
//! # Pipeline Architecture
//!
//! ```text
//! source.mp4 ── ffmpeg decode (rawvideo rgba) ──┐
//!                                               │
//! ClipConfig ── plan_reframe ──────────────────┤
//!                                               ├── Compositor
//!                                               │     fill black
//!                                               │     crop + resample
//!                                               │     vignette
//!                                               ▼
//!                                        ffmpeg encode (H.264 + AAC)
//!                                               │
//!                                               ▼
//!                                           output.mp4
//! ```

pub mod canvas;
pub mod compositor;
pub mod export;
pub mod still;
pub mod vignette;

pub use canvas::{SourceFrame, TargetCanvas};
pub use compositor::Compositor;
pub use export::*;
pub use still::reframe_image;
pub use vignette::VignetteMask;
