// Application layer - Use case interactors

pub mod audio_sequencer;
pub mod compose_interactor;
pub mod container;
pub mod context;
pub mod video_sequencer;

// Re-export interactors
pub use audio_sequencer::{AudioSequencer, AudioSettings, AudioTrack};
pub use compose_interactor::{ComposeInteractor, ComposeRequest, RenderReport};
pub use context::{AudioArtifact, SequencingContext};
pub use video_sequencer::{DroppedSegment, VideoSequence, VideoSequencer, VideoSettings};
