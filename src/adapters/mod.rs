// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fs_catalog;
pub mod probe_libav;
pub mod toml_config;
pub mod tracing_log;

// Re-export adapters
pub use exec_ffmpeg::FfmpegRenderAdapter;
pub use fs_catalog::FsCatalogAdapter;
pub use probe_libav::ProbeLibavAdapter;
pub use toml_config::{ReelConfig, TomlConfigAdapter};
pub use tracing_log::{RecordingEventSink, TracingEventSink};
