// Audio sequencer - Builds the crossfaded audio mix and the title list

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::app::context::{AudioArtifact, SequencingContext};
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Knobs for one audio sequencing run
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSettings {
    pub extensions: Vec<String>,
    pub target: Duration,
    pub crossfade: Duration,
    pub accounting: DurationAccounting,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            extensions: MediaKind::Audio.default_extensions(),
            target: DEFAULT_TARGET,
            crossfade: DEFAULT_CROSSFADE,
            accounting: DurationAccounting::default(),
        }
    }
}

/// Ordered outcome of the selection loop
#[derive(Debug, Clone, PartialEq)]
pub struct AudioSequence {
    pub mix: AudioMix,
    /// One title per appended segment, in append order
    pub titles: Vec<SongTitle>,
    /// What the accumulator counted towards the target
    pub accounted: Duration,
    /// The pool ran dry before the target was reached
    pub stopped_early: bool,
}

/// Audio stage result handed to the composer
#[derive(Debug)]
pub struct AudioTrack {
    pub titles: Vec<SongTitle>,
    pub artifact: AudioArtifact,
    pub segments: usize,
    pub nominal: Duration,
    pub mixed: Duration,
    pub stopped_early: bool,
}

/// Sequencer for the audio stage
pub struct AudioSequencer {
    catalog: Arc<dyn CatalogPort>,
    probe: Arc<dyn ProbePort>,
    render: Arc<dyn RenderPort>,
}

impl AudioSequencer {
    pub fn new(
        catalog: Arc<dyn CatalogPort>,
        probe: Arc<dyn ProbePort>,
        render: Arc<dyn RenderPort>,
    ) -> Self {
        Self {
            catalog,
            probe,
            render,
        }
    }

    /// Select, decode and crossfade tracks until the target is reached or no
    /// unused track is left.
    pub async fn sequence(
        &self,
        dir: &Path,
        settings: &AudioSettings,
        ctx: &mut SequencingContext,
    ) -> Result<AudioSequence, DomainError> {
        let assets = self
            .catalog
            .scan(dir, MediaKind::Audio, &settings.extensions)
            .await?;
        let mut pool = UniquePool::shuffled(assets, &mut ctx.rng);
        let mut accumulator = DurationAccumulator::new(settings.target);
        let mut mix = AudioMix::new();
        let mut titles = Vec::new();
        let mut stopped_early = false;

        while accumulator.should_continue() {
            let asset = match pool.next(&mut ctx.rng) {
                Draw::Next(asset) => asset,
                Draw::Exhausted => {
                    if self.refill(dir, settings, &mut pool, ctx).await? == 0 {
                        ctx.emit(PipelineEvent::SequencingStoppedEarly {
                            used: pool.used_count(),
                            elapsed: accumulator.elapsed(),
                            target: accumulator.target(),
                        });
                        stopped_early = true;
                        break;
                    }
                    continue;
                }
            };

            // Broken files are marked used too so a refill never retries them
            pool.mark_used(&asset);

            let segment = match self.probe.decode(&asset).await {
                Ok(segment) => segment,
                Err(err) => {
                    ctx.emit(PipelineEvent::DecodeFailed {
                        kind: MediaKind::Audio,
                        path: asset.path.clone(),
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            let growth = mix.append(&segment, settings.crossfade);
            accumulator.add(accounted_growth(settings.accounting, &segment, growth));

            let title = SongTitle::from_path(&asset.path);
            ctx.emit(PipelineEvent::AudioSegmentAppended {
                index: titles.len(),
                title: title.clone(),
                path: asset.path.clone(),
                duration: segment.duration,
                elapsed: accumulator.elapsed(),
            });
            titles.push(title);
        }

        Ok(AudioSequence {
            mix,
            titles,
            accounted: accumulator.elapsed(),
            stopped_early,
        })
    }

    /// Rescan the directory and keep only unused assets. A directory that has
    /// become empty counts as nothing left to add.
    async fn refill(
        &self,
        dir: &Path,
        settings: &AudioSettings,
        pool: &mut UniquePool,
        ctx: &mut SequencingContext,
    ) -> Result<usize, DomainError> {
        let rescanned = match self
            .catalog
            .scan(dir, MediaKind::Audio, &settings.extensions)
            .await
        {
            Ok(assets) => assets,
            Err(DomainError::CatalogEmpty { .. }) => Vec::new(),
            Err(err) => return Err(err),
        };

        let pending = pool.refill(rescanned, &mut ctx.rng);
        if pending > 0 {
            ctx.emit(PipelineEvent::PoolRefilled { pending });
        }
        Ok(pending)
    }

    /// Run the full audio stage and persist the mix as a temporary artifact
    /// in `work_dir`.
    pub async fn produce(
        &self,
        dir: &Path,
        settings: &AudioSettings,
        format: AudioFormat,
        bitrate: &str,
        work_dir: &Path,
        ctx: &mut SequencingContext,
    ) -> Result<AudioTrack, DomainError> {
        let sequence = self.sequence(dir, settings, ctx).await?;
        if sequence.mix.is_empty() {
            return Err(DomainError::NoAudioSequenced(format!(
                "no file in '{}' could be decoded",
                dir.display()
            )));
        }

        ctx.emit(PipelineEvent::AudioTrackGenerated {
            segments: sequence.mix.len(),
            nominal: sequence.mix.nominal_duration(),
            mixed: sequence.mix.mixed_duration(),
        });

        let artifact = AudioArtifact::reserve(work_dir, format);
        self.render
            .render_audio(&sequence.mix, format, bitrate, artifact.path())
            .await?;
        ctx.emit(PipelineEvent::ArtifactCreated {
            path: artifact.path().to_path_buf(),
        });

        Ok(AudioTrack {
            segments: sequence.mix.len(),
            nominal: sequence.mix.nominal_duration(),
            mixed: sequence.mix.mixed_duration(),
            titles: sequence.titles,
            artifact,
            stopped_early: sequence.stopped_early,
        })
    }
}
