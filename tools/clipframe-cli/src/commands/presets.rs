//! List aspect and quality presets.

use clipframe_model::preset::{target_canvas_size, AspectPreset, QualityPreset};

pub fn run() -> anyhow::Result<()> {
    println!("{:<8} {:<8} {:>12} {:>10}", "Aspect", "Quality", "Canvas", "Bitrate");
    println!("{}", "=".repeat(41));

    for aspect in AspectPreset::ALL {
        for quality in QualityPreset::ALL {
            let canvas = target_canvas_size(aspect, quality);
            let note = if canvas.width % 2 == 1 || canvas.height % 2 == 1 {
                "  (encoded at even size)"
            } else {
                ""
            };
            println!(
                "{:<8} {:<8} {:>12} {:>7}kbps{note}",
                aspect.as_str(),
                quality.as_str(),
                canvas.to_string(),
                quality.video_bitrate_kbps(),
            );
        }
    }

    Ok(())
}
