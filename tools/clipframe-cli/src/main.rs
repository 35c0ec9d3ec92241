//! Clipframe CLI: reframe stills and videos onto preset canvases.
//!
//! Usage:
//!   clipframe presets               List aspect and quality presets
//!   clipframe plan --source WxH     Show where a source lands on a canvas
//!   clipframe frame <INPUT> -o OUT  Reframe a single image
//!   clipframe export <INPUT>        Reframe a video through ffmpeg
//!   clipframe check                 Check for ffmpeg and ffprobe
//!   clipframe config                Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clipframe_common::config::AppConfig;

mod commands;

use commands::ClipArgs;

#[derive(Parser)]
#[command(
    name = "clipframe",
    about = "Scale-and-crop reframing for vertical, square and landscape clips",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List aspect and quality presets with canvas sizes and bitrates
    Presets,

    /// Compute the draw rectangle for a source size without touching pixels
    Plan {
        /// Source frame size, e.g. 1920x1080
        #[arg(long)]
        source: String,

        /// Aspect preset: 9:16, 16:9, 1:1, 4:5
        #[arg(long)]
        aspect: Option<String>,

        /// Quality preset: HD, FHD, 4K
        #[arg(long)]
        quality: Option<String>,

        /// Focus policy: center, face, action
        #[arg(long)]
        focus: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Reframe a still image
    Frame {
        /// Input image
        input: PathBuf,

        /// Output image (format follows the extension)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        clip: ClipArgs,
    },

    /// Reframe a video through ffmpeg
    Export {
        /// Input video
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        clip: ClipArgs,

        /// Start time in seconds
        #[arg(long)]
        start: Option<f64>,

        /// End time in seconds
        #[arg(long)]
        end: Option<f64>,
    },

    /// Check system capabilities
    Check,

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (config, config_err) = AppConfig::load_checked();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    clipframe_common::logging::init_logging(&logging);

    if let Some(err) = config_err {
        tracing::warn!(error = %err, "Using default configuration");
    }

    match cli.command {
        Commands::Presets => commands::presets::run(),
        Commands::Plan {
            source,
            aspect,
            quality,
            focus,
            json,
        } => {
            let clip = ClipArgs {
                aspect,
                quality,
                focus,
                ..ClipArgs::default()
            };
            commands::plan::run(&source, &clip, &config, json)
        }
        Commands::Frame {
            input,
            output,
            clip,
        } => commands::frame::run(input, output, &clip, &config),
        Commands::Export {
            input,
            output,
            clip,
            start,
            end,
        } => commands::export::run(input, output, &clip, &config, start, end).await,
        Commands::Check => commands::check::run(),
        Commands::Config { save } => commands::config::run(&config, save),
    }
}
