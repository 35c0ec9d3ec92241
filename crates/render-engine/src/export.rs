//! Clip export: decode, reframe every frame, encode.

use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread::JoinHandle;

use chrono::{DateTime, Utc};
use clipframe_common::clock::{ClipWindow, FrameClock};
use clipframe_common::error::{ClipframeError, ClipframeResult};
use clipframe_model::clip::{ClipConfig, RenderMode};
use clipframe_model::geometry::{FrameSize, ReframeResult};
use clipframe_processing_core::reframe::plan_reframe;
use image::RgbaImage;
use serde::Serialize;

use crate::canvas::{SourceFrame, TargetCanvas};
use crate::compositor::Compositor;

/// An export job ready to be rendered.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// Source video file.
    pub input_path: PathBuf,

    /// Output file path.
    pub output_path: PathBuf,

    /// Clip settings: canvas, focus, mode, bitrate.
    pub clip: ClipConfig,

    /// Start time offset (for partial exports).
    pub start_secs: Option<f64>,

    /// End time (for partial exports).
    pub end_secs: Option<f64>,
}

/// Progress callback for export rendering.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send>;

/// Export progress report.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Current progress [0.0, 1.0].
    pub progress: f64,

    /// Frames rendered so far.
    pub frames_rendered: u64,

    /// Total frames to render.
    pub total_frames: u64,

    /// Estimated time remaining in seconds.
    pub eta_secs: f64,

    /// Current stage.
    pub stage: ExportStage,
}

/// Stages of the export process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Rendering,
    Finalizing,
    Complete,
    Failed,
}

/// What an export produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub output_path: PathBuf,
    pub source: FrameSize,
    pub canvas: FrameSize,
    pub frames_rendered: u64,
    pub reframe: ReframeResult,
    pub video_bitrate_kbps: u32,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Trait for render backends.
pub trait RenderBackend: Send {
    /// Execute the export job.
    fn render(
        &mut self,
        job: &ExportJob,
        progress: Option<ProgressCallback>,
    ) -> ClipframeResult<ExportSummary>;

    /// Check if this backend is available on the system.
    fn is_available(&self) -> bool;

    /// Backend name.
    fn name(&self) -> &str;
}

/// Export a reframed clip.
///
/// This is the main entry point for rendering. The frame loop is blocking
/// and runs on Tokio's blocking pool.
pub async fn export_clip(
    job: ExportJob,
    progress: Option<ProgressCallback>,
) -> ClipframeResult<ExportSummary> {
    tracing::info!(
        input = %job.input_path.display(),
        output = %job.output_path.display(),
        aspect = %job.clip.aspect,
        quality = %job.clip.quality,
        focus = %job.clip.focus,
        mode = %job.clip.mode,
        "Starting export"
    );

    if !job.input_path.exists() {
        return Err(ClipframeError::FileNotFound {
            path: job.input_path.clone(),
        });
    }

    if let Some(parent) = job.output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    if let Some(cb) = &progress {
        cb(ExportProgress {
            progress: 0.0,
            frames_rendered: 0,
            total_frames: 0,
            eta_secs: 0.0,
            stage: ExportStage::Preparing,
        });
    }

    let mut backend: Box<dyn RenderBackend> = Box::new(FfmpegBackend::new());
    if !backend.is_available() {
        return Err(ClipframeError::unsupported(
            "No supported render backend found (expected ffmpeg and ffprobe in PATH)",
        ));
    }

    tracing::info!(backend = backend.name(), "Using render backend");
    tokio::task::spawn_blocking(move || backend.render(&job, progress))
        .await
        .map_err(|e| ClipframeError::export(format!("Export task failed: {e}")))?
}

/// Display width, height and duration of a source video.
///
/// `size` is the frame size after the stream's rotation is applied, which
/// is what the decoder delivers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceProbe {
    pub size: FrameSize,
    pub duration_secs: f64,
}

/// Decodes with one ffmpeg process, encodes with another, and composites
/// in between.
pub struct FfmpegBackend;

impl FfmpegBackend {
    pub fn new() -> Self {
        Self
    }

    fn run_frames(
        &self,
        job: &ExportJob,
        probe: &SourceProbe,
        window: &ClipWindow,
        total_frames: u64,
        progress: &Option<ProgressCallback>,
        frames: &mut u64,
    ) -> ClipframeResult<()> {
        let clip = &job.clip;
        let mut canvas = TargetCanvas::for_clip(clip)?;
        let compositor = Compositor::new(clip);

        let decoder_args = decoder_args(&job.input_path, window, clip.fps);
        let encoder_args = encoder_args(job, canvas.size(), window);
        tracing::debug!(args = ?decoder_args, "Starting ffmpeg decoder");
        tracing::debug!(args = ?encoder_args, "Starting ffmpeg encoder");

        let mut decoder = spawn_ffmpeg(&decoder_args, Stdio::null(), Stdio::piped())?;
        let mut encoder = match spawn_ffmpeg(&encoder_args, Stdio::piped(), Stdio::null()) {
            Ok(child) => child,
            Err(err) => {
                decoder.kill().ok();
                decoder.wait().ok();
                return Err(err);
            }
        };

        let decoder_stderr = drain_stderr(&mut decoder);
        let encoder_stderr = drain_stderr(&mut encoder);

        let pumped = match (decoder.stdout.take(), encoder.stdin.take()) {
            (Some(stdout), Some(stdin)) => pump_frames(
                BufReader::new(stdout),
                stdin,
                probe.size,
                &compositor,
                &mut canvas,
                total_frames,
                progress,
                frames,
            ),
            _ => Err(ClipframeError::export("Failed to capture ffmpeg pipes")),
        };

        // Stops the decoder if the frame budget ran out before its output did.
        decoder.kill().ok();
        decoder.wait().ok();
        let decoder_log = join_stderr(decoder_stderr);

        if let Err(err) = pumped {
            encoder.kill().ok();
            encoder.wait().ok();
            let encoder_log = join_stderr(encoder_stderr);
            tracing::error!(
                frames = *frames,
                decoder = decoder_log.trim(),
                encoder = encoder_log.trim(),
                "Frame loop aborted"
            );
            return Err(err);
        }
        let rendered = *frames;

        if let Some(cb) = progress {
            cb(ExportProgress {
                progress: 1.0,
                frames_rendered: rendered,
                total_frames,
                eta_secs: 0.0,
                stage: ExportStage::Finalizing,
            });
        }

        let status = encoder
            .wait()
            .map_err(|e| ClipframeError::export(format!("Failed to wait on ffmpeg encoder: {e}")))?;
        let encoder_log = join_stderr(encoder_stderr);
        if !status.success() {
            return Err(ClipframeError::export(format!(
                "ffmpeg encoder failed (status {}): {}",
                status,
                encoder_log.trim()
            )));
        }

        if rendered == 0 {
            return Err(ClipframeError::export(format!(
                "Decoder produced no frames: {}",
                decoder_log.trim()
            )));
        }
        if rendered < total_frames {
            tracing::warn!(
                frames = rendered,
                total_frames,
                "Decoder ended before the frame budget; clip is shorter than requested"
            );
        }

        Ok(())
    }
}

impl Default for FfmpegBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for FfmpegBackend {
    fn render(
        &mut self,
        job: &ExportJob,
        progress: Option<ProgressCallback>,
    ) -> ClipframeResult<ExportSummary> {
        let started_at = Utc::now();
        let started = std::time::Instant::now();

        let probe = probe_video(&job.input_path)?;
        let window = ClipWindow::resolve(probe.duration_secs, job.start_secs, job.end_secs);
        if window.is_empty() {
            return Err(ClipframeError::export(
                "Export window resolved to zero seconds",
            ));
        }

        let clock = FrameClock::new(job.clip.fps);
        let total_frames = clock.frames_in(&window);
        let canvas = job.clip.canvas_size();
        let reframe = plan_reframe(probe.size, canvas, job.clip.focus)?;

        tracing::info!(
            source = %probe.size,
            canvas = %canvas,
            start_secs = window.start_secs,
            end_secs = window.end_secs,
            fps = clock.fps(),
            frames = total_frames,
            draw_width = reframe.draw_width,
            draw_height = reframe.draw_height,
            offset_x = reframe.offset_x,
            offset_y = reframe.offset_y,
            "Export plan built"
        );

        let mut frames_rendered = 0u64;
        let result = self.run_frames(
            job,
            &probe,
            &window,
            total_frames,
            &progress,
            &mut frames_rendered,
        );
        if let Err(err) = result {
            if let Some(cb) = &progress {
                cb(failure_report(frames_rendered, total_frames));
            }
            return Err(err);
        }

        let summary = ExportSummary {
            output_path: job.output_path.clone(),
            source: probe.size,
            canvas,
            frames_rendered,
            reframe,
            video_bitrate_kbps: job.clip.video_bitrate_kbps(),
            started_at,
            finished_at: Utc::now(),
        };

        let summary_path = job.output_path.with_extension("summary.json");
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => match std::fs::write(&summary_path, json) {
                Ok(()) => tracing::info!(path = %summary_path.display(), "Wrote export summary"),
                Err(err) => tracing::warn!(
                    error = %err,
                    path = %summary_path.display(),
                    "Failed to write export summary"
                ),
            },
            Err(err) => tracing::warn!(error = %err, "Failed to serialize export summary"),
        }

        if let Some(cb) = &progress {
            cb(ExportProgress {
                progress: 1.0,
                frames_rendered,
                total_frames,
                eta_secs: 0.0,
                stage: ExportStage::Complete,
            });
        }

        tracing::info!(
            frames = frames_rendered,
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Export finished"
        );
        Ok(summary)
    }

    fn is_available(&self) -> bool {
        command_exists("ffmpeg") && command_exists("ffprobe")
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}

/// Read raw frames, composite each onto the canvas, write the canvas out.
///
/// Stops after `total_frames` or when the reader runs dry. `frames` counts
/// the frames written and stays valid when an error cuts the loop short.
fn pump_frames<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    source: FrameSize,
    compositor: &Compositor,
    canvas: &mut TargetCanvas,
    total_frames: u64,
    progress: &Option<ProgressCallback>,
    frames: &mut u64,
) -> ClipframeResult<()> {
    let started = std::time::Instant::now();
    let mut buffer = vec![0u8; source.rgba_len()];

    while *frames < total_frames {
        if !read_frame(&mut reader, &mut buffer)? {
            break;
        }

        let image = RgbaImage::from_raw(source.width, source.height, buffer)
            .ok_or_else(|| ClipframeError::render("Decoded frame has the wrong byte length"))?;
        compositor.composite(SourceFrame::new(&image), canvas)?;
        writer
            .write_all(canvas.as_raw())
            .map_err(|e| ClipframeError::export(format!("Failed writing frame to encoder: {e}")))?;
        buffer = image.into_raw();
        *frames += 1;

        if let Some(cb) = progress {
            cb(progress_report(
                *frames,
                total_frames,
                started.elapsed().as_secs_f64(),
            ));
        }
    }

    writer.flush()?;
    Ok(())
}

/// Fill `buffer` with exactly one frame.
///
/// Returns `false` at end of stream. A truncated trailing frame counts as
/// end of stream and is dropped.
fn read_frame<R: Read>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<bool> {
    let mut filled = 0;
    while filled < buffer.len() {
        match reader.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled == buffer.len() && !buffer.is_empty())
}

fn decoder_args(input: &Path, window: &ClipWindow, fps: u32) -> Vec<String> {
    vec![
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-nostdin".to_string(),
        "-ss".to_string(),
        format!("{:.6}", window.start_secs),
        "-t".to_string(),
        format!("{:.6}", window.duration_secs()),
        "-i".to_string(),
        input.display().to_string(),
        "-map".to_string(),
        "0:v:0".to_string(),
        "-vf".to_string(),
        format!("fps={}", fps.max(1)),
        "-f".to_string(),
        "rawvideo".to_string(),
        "-pix_fmt".to_string(),
        "rgba".to_string(),
        "pipe:1".to_string(),
    ]
}

fn encoder_args(job: &ExportJob, canvas: FrameSize, window: &ClipWindow) -> Vec<String> {
    let preset = match job.clip.mode {
        RenderMode::Fast => "veryfast",
        RenderMode::Standard => "medium",
        RenderMode::Premium => "slow",
    };

    vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-loglevel".to_string(),
        "error".to_string(),
        "-f".to_string(),
        "rawvideo".to_string(),
        "-pix_fmt".to_string(),
        "rgba".to_string(),
        "-s".to_string(),
        canvas.to_string(),
        "-r".to_string(),
        job.clip.fps.max(1).to_string(),
        "-i".to_string(),
        "pipe:0".to_string(),
        "-ss".to_string(),
        format!("{:.6}", window.start_secs),
        "-t".to_string(),
        format!("{:.6}", window.duration_secs()),
        "-i".to_string(),
        job.input_path.display().to_string(),
        "-map".to_string(),
        "0:v:0".to_string(),
        "-map".to_string(),
        "1:a:0?".to_string(),
        // yuv420p needs even dimensions; some preset canvases are odd.
        "-vf".to_string(),
        "scale=trunc(iw/2)*2:trunc(ih/2)*2".to_string(),
        "-c:v".to_string(),
        "libx264".to_string(),
        "-preset".to_string(),
        preset.to_string(),
        "-pix_fmt".to_string(),
        "yuv420p".to_string(),
        "-b:v".to_string(),
        format!("{}k", job.clip.video_bitrate_kbps()),
        "-c:a".to_string(),
        "aac".to_string(),
        "-b:a".to_string(),
        "192k".to_string(),
        "-shortest".to_string(),
        "-movflags".to_string(),
        "+faststart".to_string(),
        job.output_path.display().to_string(),
    ]
}

fn spawn_ffmpeg(args: &[String], stdin: Stdio, stdout: Stdio) -> ClipframeResult<Child> {
    Command::new("ffmpeg")
        .args(args)
        .stdin(stdin)
        .stdout(stdout)
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| ClipframeError::export(format!("Failed to start ffmpeg: {e}")))
}

/// Drain stderr on a helper thread so ffmpeg never blocks on a full pipe.
fn drain_stderr(child: &mut Child) -> Option<JoinHandle<String>> {
    let stderr = child.stderr.take()?;
    Some(std::thread::spawn(move || -> String {
        let mut reader = BufReader::new(stderr);
        let mut output = String::new();
        match reader.read_to_string(&mut output) {
            Ok(_) => output,
            Err(err) => format!("<failed to read ffmpeg stderr: {err}>"),
        }
    }))
}

fn join_stderr(handle: Option<JoinHandle<String>>) -> String {
    match handle {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| "<failed to join stderr reader>".to_string()),
        None => String::new(),
    }
}

/// Probe width, height and duration with ffprobe.
pub fn probe_video(path: &Path) -> ClipframeResult<SourceProbe> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height:stream_tags=rotate:stream_side_data=rotation:format=duration",
            "-of",
            "default=noprint_wrappers=1",
        ])
        .arg(path)
        .output()
        .map_err(|e| ClipframeError::export(format!("Failed to run ffprobe: {e}")))?;

    if !output.status.success() {
        return Err(ClipframeError::export(format!(
            "ffprobe failed on {}: {}",
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    parse_probe_output(&raw).ok_or_else(|| {
        ClipframeError::export(format!(
            "Could not read video dimensions and duration from {}",
            path.display()
        ))
    })
}

/// Parse `key=value` lines from `ffprobe -of default=noprint_wrappers=1`.
///
/// A quarter-turn rotation (display matrix side data, or the legacy
/// `rotate` tag) swaps width and height.
fn parse_probe_output(raw: &str) -> Option<SourceProbe> {
    let mut width = None;
    let mut height = None;
    let mut duration = None;
    let mut rotation = 0i64;

    for line in raw.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        match key {
            "width" => width = value.parse::<u32>().ok(),
            "height" => height = value.parse::<u32>().ok(),
            "duration" => duration = value.parse::<f64>().ok(),
            "rotation" | "TAG:rotate" => {
                if let Ok(degrees) = value.parse::<f64>() {
                    rotation = degrees.round() as i64;
                }
            }
            _ => {}
        }
    }

    let (mut width, mut height) = (width?, height?);
    if width == 0 || height == 0 {
        return None;
    }
    if rotation.rem_euclid(180) == 90 {
        std::mem::swap(&mut width, &mut height);
    }
    let duration_secs = duration.filter(|d| d.is_finite() && *d > 0.0)?;
    Some(SourceProbe {
        size: FrameSize::new(width, height),
        duration_secs,
    })
}

/// Whether a binary is on PATH.
pub fn command_exists(binary: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

fn progress_report(frames_rendered: u64, total_frames: u64, elapsed_secs: f64) -> ExportProgress {
    let progress = if total_frames == 0 {
        0.0
    } else {
        (frames_rendered as f64 / total_frames as f64).clamp(0.0, 1.0)
    };

    let eta_secs = if progress > 0.0 {
        (elapsed_secs / progress) - elapsed_secs
    } else {
        0.0
    }
    .max(0.0);

    ExportProgress {
        progress,
        frames_rendered,
        total_frames,
        eta_secs,
        stage: ExportStage::Rendering,
    }
}

fn failure_report(frames_rendered: u64, total_frames: u64) -> ExportProgress {
    ExportProgress {
        stage: ExportStage::Failed,
        eta_secs: 0.0,
        ..progress_report(frames_rendered, total_frames, 0.0)
    }
}
