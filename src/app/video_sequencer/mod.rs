// Video sequencer - One captioned clip per song title

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::app::context::SequencingContext;
use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Knobs for one video sequencing run
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSettings {
    pub extensions: Vec<String>,
    pub transition: Duration,
    /// Random clips tried for one title before its slot is dropped
    pub max_clip_attempts: u32,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            extensions: MediaKind::Video.default_extensions(),
            transition: DEFAULT_TRANSITION,
            max_clip_attempts: 3,
        }
    }
}

/// A title that ended up without a clip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedSegment {
    pub title_index: usize,
    pub title: SongTitle,
}

/// Video stage result
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSequence {
    pub timeline: VideoTimeline,
    pub dropped: Vec<DroppedSegment>,
}

/// Sequencer for the video stage
pub struct VideoSequencer {
    catalog: Arc<dyn CatalogPort>,
    probe: Arc<dyn ProbePort>,
}

impl VideoSequencer {
    pub fn new(catalog: Arc<dyn CatalogPort>, probe: Arc<dyn ProbePort>) -> Self {
        Self { catalog, probe }
    }

    /// Build the timeline: iteration `i` draws a clip for `titles[i]`,
    /// attaches a fade transition to the previous clip and captions it.
    pub async fn sequence(
        &self,
        dir: &Path,
        titles: &[SongTitle],
        settings: &VideoSettings,
        ctx: &mut SequencingContext,
    ) -> Result<VideoSequence, DomainError> {
        let assets = self
            .catalog
            .scan(dir, MediaKind::Video, &settings.extensions)
            .await?;
        let mut pool = ReplacementPool::new(assets).ok_or_else(|| DomainError::CatalogEmpty {
            kind: MediaKind::Video,
            path: dir.display().to_string(),
        })?;

        let mut timeline = VideoTimeline::new();
        let mut dropped = Vec::new();

        for (index, title) in titles.iter().enumerate() {
            match self.draw_clip(&mut pool, settings, ctx).await {
                Some(segment) => {
                    let path = segment.asset.path.clone();
                    let caption = Caption {
                        title: title.clone(),
                        title_index: index,
                    };
                    let transition = timeline.push(segment, caption, settings.transition);
                    ctx.emit(PipelineEvent::ClipComposed {
                        index,
                        title: title.clone(),
                        path,
                        transition: transition.map(|t| t.overlap()),
                    });
                }
                None => {
                    ctx.emit(PipelineEvent::VideoSegmentDropped {
                        index,
                        title: title.clone(),
                        attempts: settings.max_clip_attempts,
                    });
                    dropped.push(DroppedSegment {
                        title_index: index,
                        title: title.clone(),
                    });
                }
            }
        }

        if timeline.is_empty() {
            return Err(DomainError::NoClipsComposed(format!(
                "all {} clip selections from '{}' failed",
                titles.len(),
                dir.display()
            )));
        }

        Ok(VideoSequence { timeline, dropped })
    }

    /// Draw clips until one decodes or the attempt budget is spent
    async fn draw_clip(
        &self,
        pool: &mut ReplacementPool,
        settings: &VideoSettings,
        ctx: &mut SequencingContext,
    ) -> Option<TimedSegment> {
        for _ in 0..settings.max_clip_attempts {
            let asset = pool.next(&mut ctx.rng).into_option()?;
            match self.probe.decode(&asset).await {
                Ok(segment) => return Some(segment),
                Err(err) => ctx.emit(PipelineEvent::DecodeFailed {
                    kind: MediaKind::Video,
                    path: asset.path.clone(),
                    reason: err.to_string(),
                }),
            }
        }
        None
    }
}
