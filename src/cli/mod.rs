//! CLI module for reelmix
//!
//! This module handles command-line argument parsing and command execution.

use clap::Parser;

pub mod args;
pub mod commands;

/// reelmix music video assembler
///
/// Shuffles the songs in SOUNDS_DIR into a crossfaded mix, pairs every song
/// with a random captioned clip from CLIPS_DIR and renders one video file.
#[derive(Parser, Debug)]
#[command(name = "reelmix")]
#[command(about = "reelmix - Build a captioned music video from songs and clips")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level (overrides RUST_LOG)
    #[arg(long, env = "REELMIX_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log records as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(flatten)]
    pub generate: args::GenerateArgs,
}

impl Cli {
    /// Tracing filter directive requested on the command line, if any
    pub fn log_directive(&self) -> Option<String> {
        match (&self.log_level, self.verbose) {
            (Some(level), _) => Some(level.clone()),
            (None, true) => Some("debug".to_string()),
            (None, false) => None,
        }
    }
}
