//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for rendering a music video
#[derive(Args, Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    /// Directory containing the songs
    pub sounds_dir: PathBuf,

    /// Directory containing the video clips
    pub clips_dir: PathBuf,

    /// Output video file path
    #[arg(short, long, env = "REELMIX_OUTPUT", default_value = "music_video.mp4")]
    pub output: PathBuf,

    /// Format of the temporary audio mix (mp3 or m4a)
    #[arg(short, long, env = "REELMIX_AUDIO_FORMAT")]
    pub audio_format: Option<String>,

    /// Caption font name
    #[arg(short, long, env = "REELMIX_FONT")]
    pub font: Option<String>,

    /// Caption font size
    #[arg(short = 's', long, env = "REELMIX_FONT_SIZE")]
    pub font_size: Option<u32>,

    /// Target audio length in minutes
    #[arg(short, long, env = "REELMIX_TARGET_MINUTES")]
    pub target_minutes: Option<f64>,

    /// Output frame size: WIDTHxHEIGHT or native
    #[arg(long, env = "REELMIX_RESOLUTION")]
    pub resolution: Option<String>,

    /// What the target length is measured against: nominal or mixed
    #[arg(long, env = "REELMIX_DURATION_ACCOUNTING")]
    pub duration_accounting: Option<String>,

    /// Seed for reproducible shuffles and clip draws
    #[arg(long, env = "REELMIX_SEED")]
    pub seed: Option<u64>,

    /// TOML configuration file (default: ./reelmix.toml when present)
    #[arg(long, env = "REELMIX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for the temporary audio mix
    #[arg(long, env = "REELMIX_WORK_DIR")]
    pub work_dir: Option<PathBuf>,

    /// Print the render report as JSON
    #[arg(long)]
    pub json: bool,
}
