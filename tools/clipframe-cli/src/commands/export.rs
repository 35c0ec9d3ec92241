//! Reframe a video through ffmpeg.

use std::io::Write;
use std::path::{Path, PathBuf};

use clipframe_common::config::AppConfig;
use clipframe_model::clip::ClipConfig;
use clipframe_render_engine::export::{export_clip, ExportJob, ExportProgress, ExportStage};

use super::ClipArgs;

pub async fn run(
    input: PathBuf,
    output: Option<PathBuf>,
    args: &ClipArgs,
    config: &AppConfig,
    start_secs: Option<f64>,
    end_secs: Option<f64>,
) -> anyhow::Result<()> {
    let clip = args.resolve(config)?;
    let output_path = output.unwrap_or_else(|| default_output_path(&config.output_dir, &input, &clip));

    println!("Exporting: {}", input.display());
    println!("  Output: {}", output_path.display());
    println!(
        "  Canvas: {} ({} {}, {}kbps)",
        clip.canvas_size(),
        clip.aspect,
        clip.quality,
        clip.video_bitrate_kbps()
    );
    println!("  Focus: {}  Mode: {}  FPS: {}", clip.focus, clip.mode, clip.fps);

    let job = ExportJob {
        input_path: input,
        output_path: output_path.clone(),
        clip,
        start_secs,
        end_secs,
    };

    let progress_cb: Box<dyn Fn(ExportProgress) + Send> = Box::new(|p| {
        if p.stage != ExportStage::Rendering {
            return;
        }
        print!(
            "\r  Progress: {:.1}% ({}/{} frames, ETA: {:.0}s)  ",
            p.progress * 100.0,
            p.frames_rendered,
            p.total_frames,
            p.eta_secs,
        );
        std::io::stdout().flush().ok();
    });

    match export_clip(job, Some(progress_cb)).await {
        Ok(summary) => {
            println!(
                "\nExport complete: {} ({} frames)",
                summary.output_path.display(),
                summary.frames_rendered
            );
            Ok(())
        }
        Err(e) => {
            println!();
            Err(anyhow::anyhow!("Export failed: {e}"))
        }
    }
}

/// `<output_dir>/<stem>_<aspect>_<quality>.mp4`, with `:` replaced so the
/// name is portable.
fn default_output_path(output_dir: &Path, input: &Path, clip: &ClipConfig) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "clip".to_string());
    let aspect = clip.aspect.as_str().replace(':', "x");
    output_dir.join(format!("{stem}_{aspect}_{}.mp4", clip.quality))
}
