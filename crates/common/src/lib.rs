//! Clipframe Common Utilities
//!
//! Shared infrastructure for all Clipframe crates:
//! - Error types and result aliases
//! - Frame clock for paced export loops
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
