// Tracing log adapter - Structured pipeline events through the tracing crate

use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::ports::*;

/// Event sink that renders every pipeline event as a tracing record
#[derive(Debug, Clone, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn minutes(d: std::time::Duration) -> f64 {
    d.as_secs_f64() / 60.0
}

impl EventSink for TracingEventSink {
    fn emit(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::StageStarted { stage } => {
                info!(?stage, "Starting {:?} stage", stage);
            }
            PipelineEvent::StageCompleted { stage } => {
                info!(?stage, "{:?} stage completed successfully", stage);
            }
            PipelineEvent::AudioSegmentAppended {
                index,
                title,
                path,
                duration,
                elapsed,
            } => {
                debug!(
                    index,
                    title = %title,
                    path = %path.display(),
                    duration_secs = duration.as_secs_f64(),
                    elapsed_min = minutes(elapsed),
                    "Appended audio segment"
                );
            }
            PipelineEvent::DecodeFailed { kind, path, reason } => {
                warn!(%kind, path = %path.display(), %reason, "Error loading or processing asset");
            }
            PipelineEvent::PoolRefilled { pending } => {
                info!(
                    pending,
                    "Ran out of unique sound files, but still under target. Looping from the start (without duplicates again)."
                );
            }
            PipelineEvent::SequencingStoppedEarly {
                used,
                elapsed,
                target,
            } => {
                warn!(
                    used,
                    elapsed_min = minutes(elapsed),
                    target_min = minutes(target),
                    "No more unique sound files left. Exiting audio generation early."
                );
            }
            PipelineEvent::AudioTrackGenerated {
                segments,
                nominal,
                mixed,
            } => {
                info!(
                    segments,
                    mixed_min = minutes(mixed),
                    "Generated audio track of {:.2} minutes.",
                    minutes(nominal)
                );
            }
            PipelineEvent::ClipComposed {
                index,
                title,
                path,
                transition,
            } => {
                debug!(
                    index,
                    title = %title,
                    path = %path.display(),
                    transition_secs = transition.map(|t| t.as_secs_f64()),
                    "Composed clip"
                );
            }
            PipelineEvent::VideoSegmentDropped {
                index,
                title,
                attempts,
            } => {
                warn!(index, title = %title, attempts, "Dropped video segment after repeated failures");
            }
            PipelineEvent::ArtifactCreated { path } => {
                debug!(path = %path.display(), "Created temporary audio artifact");
            }
            PipelineEvent::ArtifactRemoved { path } => {
                debug!(path = %path.display(), "Removed temporary audio artifact");
            }
            PipelineEvent::RenderFinished { output, elapsed } => {
                info!(output = %output.display(), "Music video generated successfully: {}", output.display());
                info!("Total time taken: {:.2} minutes.", minutes(elapsed));
            }
        }
    }
}

/// Event sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Count events matching a predicate
    pub fn count(&self, predicate: impl Fn(&PipelineEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: PipelineEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingEventSink::new();
        sink.emit(PipelineEvent::PoolRefilled { pending: 2 });
        sink.emit(PipelineEvent::StageStarted { stage: Stage::Video });

        assert_eq!(
            sink.events(),
            vec![
                PipelineEvent::PoolRefilled { pending: 2 },
                PipelineEvent::StageStarted { stage: Stage::Video },
            ]
        );
        assert_eq!(
            sink.count(|e| matches!(e, PipelineEvent::PoolRefilled { .. })),
            1
        );
    }

    #[test]
    fn test_tracing_sink_accepts_every_event() {
        let sink = TracingEventSink::new();
        sink.emit(PipelineEvent::StageStarted { stage: Stage::Audio });
        sink.emit(PipelineEvent::RenderFinished {
            output: "out.mp4".into(),
            elapsed: std::time::Duration::from_secs(90),
        });
    }
}
