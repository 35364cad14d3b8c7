// Ports - Interface definitions (contracts)

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for discovering source assets on disk
#[async_trait]
pub trait CatalogPort: Send + Sync {
    /// Check if directory exists
    async fn directory_exists(&self, dir: &Path) -> bool;

    /// List the files in `dir` whose extension is accepted, case-insensitively.
    /// An empty result is reported as `DomainError::CatalogEmpty`.
    async fn scan(
        &self,
        dir: &Path,
        kind: MediaKind,
        extensions: &[String],
    ) -> Result<Vec<Asset>, DomainError>;
}

/// Port for opening an asset and measuring it
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Decode the asset into a timed segment. Failures are reported as
    /// `DomainError::Decode`.
    async fn decode(&self, asset: &Asset) -> Result<TimedSegment, DomainError>;
}

/// Everything the final mux needs
#[derive(Debug, Clone, Copy)]
pub struct MuxRequest<'a> {
    pub timeline: &'a VideoTimeline,
    /// Persisted audio mix used as the only audio source
    pub audio: &'a Path,
    pub caption: &'a CaptionStyle,
    pub settings: &'a RenderSettings,
    pub dest: &'a Path,
}

/// Port for the mixing and encoding backend
#[async_trait]
pub trait RenderPort: Send + Sync {
    /// Render the crossfaded mix into `dest`
    async fn render_audio(
        &self,
        mix: &AudioMix,
        format: AudioFormat,
        bitrate: &str,
        dest: &Path,
    ) -> Result<(), DomainError>;

    /// Compose the timeline with transitions and captions, bind the audio
    /// artifact and encode into `request.dest`
    async fn render_video(&self, request: &MuxRequest<'_>) -> Result<(), DomainError>;
}

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Audio,
    Video,
    Mux,
}

/// Structured pipeline event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PipelineEvent {
    StageStarted {
        stage: Stage,
    },
    StageCompleted {
        stage: Stage,
    },
    AudioSegmentAppended {
        index: usize,
        title: SongTitle,
        path: PathBuf,
        duration: Duration,
        elapsed: Duration,
    },
    DecodeFailed {
        kind: MediaKind,
        path: PathBuf,
        reason: String,
    },
    PoolRefilled {
        pending: usize,
    },
    /// The audio pool ran dry and no unused asset was left
    SequencingStoppedEarly {
        used: usize,
        elapsed: Duration,
        target: Duration,
    },
    AudioTrackGenerated {
        segments: usize,
        nominal: Duration,
        mixed: Duration,
    },
    ClipComposed {
        index: usize,
        title: SongTitle,
        path: PathBuf,
        transition: Option<Duration>,
    },
    VideoSegmentDropped {
        index: usize,
        title: SongTitle,
        attempts: u32,
    },
    ArtifactCreated {
        path: PathBuf,
    },
    ArtifactRemoved {
        path: PathBuf,
    },
    RenderFinished {
        output: PathBuf,
        elapsed: Duration,
    },
}

/// Port for structured pipeline events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}
