// Compose interactor - Orchestrates the audio, video and mux stages

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, warn};

use crate::app::audio_sequencer::{AudioSequencer, AudioSettings, AudioTrack};
use crate::app::context::SequencingContext;
use crate::app::video_sequencer::{DroppedSegment, VideoSequencer, VideoSettings};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Everything one music video render needs
#[derive(Debug, Clone, PartialEq)]
pub struct ComposeRequest {
    pub sounds_dir: PathBuf,
    pub clips_dir: PathBuf,
    pub output: PathBuf,
    pub audio_format: AudioFormat,
    pub audio_bitrate: String,
    pub audio: AudioSettings,
    pub video: VideoSettings,
    pub caption: CaptionStyle,
    pub render: RenderSettings,
    /// Directory receiving the temporary audio artifact
    pub work_dir: PathBuf,
}

impl ComposeRequest {
    /// Request with default settings for the given directories
    pub fn new(
        sounds_dir: impl Into<PathBuf>,
        clips_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sounds_dir: sounds_dir.into(),
            clips_dir: clips_dir.into(),
            output: output.into(),
            audio_format: AudioFormat::Mp3,
            audio_bitrate: "320k".to_string(),
            audio: AudioSettings::default(),
            video: VideoSettings::default(),
            caption: CaptionStyle::default(),
            render: RenderSettings::default(),
            work_dir: PathBuf::from("."),
        }
    }
}

/// Summary of a finished render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderReport {
    pub output: PathBuf,
    pub audio_segments: usize,
    pub video_segments: usize,
    pub titles: Vec<SongTitle>,
    /// Titles left without a clip, with their position in `titles`
    pub dropped: Vec<DroppedSegment>,
    pub nominal_audio_secs: f64,
    pub mixed_audio_secs: f64,
    pub video_secs: f64,
    pub elapsed_secs: f64,
    /// Fewer unique tracks existed than the target needed
    pub stopped_early: bool,
}

/// Interactor for the music video use case
pub struct ComposeInteractor {
    catalog: Arc<dyn CatalogPort>,
    render: Arc<dyn RenderPort>,
    audio: AudioSequencer,
    video: VideoSequencer,
}

impl ComposeInteractor {
    /// Create new compose interactor with injected ports
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        probe: Arc<dyn ProbePort>,
        render: Arc<dyn RenderPort>,
    ) -> Self {
        Self {
            audio: AudioSequencer::new(
                Arc::clone(&catalog),
                Arc::clone(&probe),
                Arc::clone(&render),
            ),
            video: VideoSequencer::new(Arc::clone(&catalog), probe),
            catalog,
            render,
        }
    }

    /// Run the whole pipeline. The audio artifact never outlives this call,
    /// and the output file only appears once the final encode succeeded.
    pub async fn execute(
        &self,
        request: &ComposeRequest,
        ctx: &mut SequencingContext,
    ) -> Result<RenderReport, DomainError> {
        let started = Instant::now();

        self.ensure_directory(&request.sounds_dir, MediaKind::Audio)
            .await?;
        self.ensure_directory(&request.clips_dir, MediaKind::Video)
            .await?;

        ctx.emit(PipelineEvent::StageStarted { stage: Stage::Audio });
        let track = self
            .audio
            .produce(
                &request.sounds_dir,
                &request.audio,
                request.audio_format,
                &request.audio_bitrate,
                &request.work_dir,
                ctx,
            )
            .await?;
        ctx.emit(PipelineEvent::StageCompleted { stage: Stage::Audio });

        ctx.emit(PipelineEvent::StageStarted { stage: Stage::Video });
        let sequenced = self
            .video
            .sequence(&request.clips_dir, &track.titles, &request.video, ctx)
            .await;
        let sequence = match sequenced {
            Ok(sequence) => sequence,
            Err(err) => {
                discard(track, ctx);
                return Err(err);
            }
        };
        ctx.emit(PipelineEvent::StageCompleted { stage: Stage::Video });

        ctx.emit(PipelineEvent::StageStarted { stage: Stage::Mux });
        let staging = match staging_path(&request.output) {
            Ok(staging) => staging,
            Err(err) => {
                discard(track, ctx);
                return Err(err);
            }
        };
        debug!(staging = %staging.display(), "Encoding into staging file");

        let mux = MuxRequest {
            timeline: &sequence.timeline,
            audio: track.artifact.path(),
            caption: &request.caption,
            settings: &request.render,
            dest: &staging,
        };
        let rendered = self.render.render_video(&mux).await;
        if let Err(err) = rendered {
            discard(track, ctx);
            return Err(err);
        }

        let video_segments = sequence.timeline.len();
        let video_duration = sequence.timeline.duration();
        drop(sequence.timeline);

        let AudioTrack {
            titles,
            artifact,
            segments,
            nominal,
            mixed,
            stopped_early,
        } = track;
        if let Err(e) = artifact.close(ctx) {
            warn!(error = %e, "Failed to remove audio artifact");
        }

        staging.persist(&request.output).map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to move encoded video to {}: {}",
                request.output.display(),
                e.error
            ))
        })?;
        ctx.emit(PipelineEvent::StageCompleted { stage: Stage::Mux });

        let elapsed = started.elapsed();
        ctx.emit(PipelineEvent::RenderFinished {
            output: request.output.clone(),
            elapsed,
        });

        Ok(RenderReport {
            output: request.output.clone(),
            audio_segments: segments,
            video_segments,
            titles,
            dropped: sequence.dropped,
            nominal_audio_secs: nominal.as_secs_f64(),
            mixed_audio_secs: mixed.as_secs_f64(),
            video_secs: video_duration.as_secs_f64(),
            elapsed_secs: elapsed.as_secs_f64(),
            stopped_early,
        })
    }

    async fn ensure_directory(&self, dir: &Path, kind: MediaKind) -> Result<(), DomainError> {
        if self.catalog.directory_exists(dir).await {
            Ok(())
        } else {
            Err(DomainError::DirectoryNotFound {
                kind,
                path: dir.display().to_string(),
            })
        }
    }
}

/// Remove the audio artifact on a failure path, keeping the stage error
fn discard(track: AudioTrack, ctx: &SequencingContext) {
    if let Err(e) = track.artifact.close(ctx) {
        warn!(error = %e, "Failed to remove audio artifact");
    }
}

/// Reserve a hidden sibling of `output` carrying the same extension, so the
/// encoder picks the right container and a failed encode leaves nothing at
/// `output`.
fn staging_path(output: &Path) -> Result<tempfile::TempPath, DomainError> {
    let parent = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let suffix = output
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    tempfile::Builder::new()
        .prefix(".reelmix-")
        .suffix(&suffix)
        .tempfile_in(parent)
        .map(|file| file.into_temp_path())
        .map_err(|e| {
            DomainError::FsFail(format!(
                "Failed to create staging file in {}: {}",
                parent.display(),
                e
            ))
        })
}
