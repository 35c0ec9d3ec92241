//! Check system capabilities.

use clipframe_common::config::config_file_path;
use clipframe_render_engine::export::command_exists;

pub fn run() -> anyhow::Result<()> {
    println!("Clipframe System Check");
    println!("{}", "=".repeat(50));

    let mut ready = true;
    for binary in ["ffmpeg", "ffprobe"] {
        if command_exists(binary) {
            println!("[OK] {binary} found in PATH");
        } else {
            println!("[MISSING] {binary} not found in PATH");
            ready = false;
        }
    }

    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config: {}", config_path.display());
    } else {
        println!("[INFO] No config file; using defaults ({})", config_path.display());
    }

    println!();
    if ready {
        println!("Video export is available. Still-image reframing always is.");
    } else {
        println!("Install ffmpeg to export video. Still-image reframing still works.");
    }

    Ok(())
}
