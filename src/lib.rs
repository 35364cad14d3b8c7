//! reelmix music video assembler library
//!
//! Builds a long-form music video from a directory of songs and a directory
//! of clips: songs are shuffled and crossfaded up to a target length, one
//! random clip is captioned with each song title, clips are chained with
//! fades and the result is muxed with the mixed audio.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use app::{ComposeInteractor, ComposeRequest, RenderReport, SequencingContext};
pub use domain::errors::DomainError;
pub use error::{ReelError, ReelResult};

/// Initialize reelmix library
pub fn init() -> ReelResult<()> {
    ffmpeg_next::init().map_err(|e| ReelError::FFmpegInitError {
        message: e.to_string(),
    })?;

    Ok(())
}
