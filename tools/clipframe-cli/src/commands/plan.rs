//! Compute a reframe plan without touching pixels.

use clipframe_common::config::AppConfig;
use clipframe_model::geometry::FrameSize;
use clipframe_processing_core::reframe::{plan_reframe, visible_source_region};

use super::ClipArgs;

pub fn run(source: &str, args: &ClipArgs, config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let source: FrameSize = source.parse()?;
    let clip = args.resolve(config)?;
    let canvas = clip.canvas_size();

    let result = plan_reframe(source, canvas, clip.focus)?;
    let region = visible_source_region(&result, source, canvas);

    if json {
        let value = serde_json::json!({
            "source": source,
            "canvas": canvas,
            "aspect": clip.aspect,
            "quality": clip.quality,
            "focus": clip.focus,
            "reframe": result,
            "visible_region": region,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Source: {source}");
    println!(
        "Canvas: {canvas} ({} {}, focus {})",
        clip.aspect, clip.quality, clip.focus
    );
    println!();
    println!("Reframe:");
    println!("  Draw size: {:.2} x {:.2}", result.draw_width, result.draw_height);
    println!("  Offset: ({:.2}, {:.2})", result.offset_x, result.offset_y);
    println!("  Crop axis: {:?}", result.crop_axis);
    println!("  Scale: {:.4}", result.scale(source));
    println!();
    println!("Visible source region:");
    println!(
        "  x={:.1} y={:.1} w={:.1} h={:.1}",
        region.x, region.y, region.width, region.height
    );

    Ok(())
}
