//! Reframe a still image.

use std::path::PathBuf;

use clipframe_common::config::AppConfig;
use clipframe_render_engine::still::reframe_image;

use super::ClipArgs;

pub fn run(
    input: PathBuf,
    output: PathBuf,
    args: &ClipArgs,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let clip = args.resolve(config)?;

    println!("Reframing image: {}", input.display());
    println!(
        "  Canvas: {} ({} {}, focus {}, {} mode)",
        clip.canvas_size(),
        clip.aspect,
        clip.quality,
        clip.focus,
        clip.mode
    );

    let result = reframe_image(&input, &output, &clip)
        .map_err(|e| anyhow::anyhow!("Failed to reframe image: {e}"))?;

    println!(
        "  Drawn at {:.0}x{:.0}, offset ({:.1}, {:.1})",
        result.draw_width, result.draw_height, result.offset_x, result.offset_y
    );
    println!("Saved: {}", output.display());

    Ok(())
}
