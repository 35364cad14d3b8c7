//! reelmix music video assembler
//!
//! Builds one long-form video from a folder of songs and a folder of clips.
//!
//! # Features
//!
//! - Shuffled, non-repeating song selection up to a target length
//! - Crossfaded audio mix
//! - One random captioned clip per song, chained with fades
//! - TOML configuration with environment and CLI overrides
//!
//! # Usage
//!
//! ```bash
//! reelmix ./sounds ./clips -o music_video.mp4 -t 60
//! reelmix ./sounds ./clips --seed 7 --json
//! ```

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use reelmix::cli::{commands, Cli};
use reelmix::{DomainError, ReelError};

/// Main entry point for the reelmix CLI application
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    info!("Starting reelmix");

    match commands::generate(&cli.generate).await {
        Ok(()) => {
            info!("reelmix completed successfully");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

/// Initialize logging on stderr so stdout stays free for the report
fn init_tracing(cli: &Cli) {
    let filter = match cli.log_directive() {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    if let Some(err) = err.downcast_ref::<ReelError>() {
        return err.exit_code();
    }
    if let Some(err) = err.downcast_ref::<DomainError>() {
        return ReelError::from(err.clone()).exit_code();
    }
    1
}
