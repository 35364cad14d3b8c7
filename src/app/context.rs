use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempPath;

use crate::domain::model::AudioFormat;
use crate::ports::{EventSink, PipelineEvent};

/// Per-run state shared by the sequencers: the random source and the event sink
pub struct SequencingContext {
    pub rng: StdRng,
    pub events: Arc<dyn EventSink>,
}

impl SequencingContext {
    /// Deterministic context for a given seed
    pub fn seeded(seed: u64, events: Arc<dyn EventSink>) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            events,
        }
    }

    /// Seeded when `seed` is given, otherwise drawn from OS entropy
    pub fn new(seed: Option<u64>, events: Arc<dyn EventSink>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed, events),
            None => Self {
                rng: StdRng::from_entropy(),
                events,
            },
        }
    }

    pub fn emit(&self, event: PipelineEvent) {
        self.events.emit(event);
    }
}

/// Temporary audio mix on disk. The file is removed when the artifact is
/// closed or dropped, whichever happens first.
#[derive(Debug)]
pub struct AudioArtifact {
    path: TempPath,
}

impl AudioArtifact {
    /// Claim `combined_audio.<format>` inside `dir` before anything is written
    pub fn reserve(dir: &Path, format: AudioFormat) -> Self {
        Self {
            path: TempPath::from_path(dir.join(format.artifact_file_name())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now, reporting where it was
    pub fn close(self, ctx: &SequencingContext) -> std::io::Result<PathBuf> {
        let path = self.path.to_path_buf();
        match self.path.close() {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => return Err(e),
            _ => {}
        }
        ctx.emit(PipelineEvent::ArtifactRemoved { path: path.clone() });
        Ok(path)
    }
}
