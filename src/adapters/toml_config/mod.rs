// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::*;
use crate::domain::model::*;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "reelmix.toml";

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReelConfig {
    pub sequencing: SequencingConfig,
    pub audio: AudioConfig,
    pub caption: CaptionStyle,
    pub render: RenderConfig,
    pub runtime: RuntimeConfig,
}

/// Selection and timing knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequencingConfig {
    pub target_minutes: f64,
    pub crossfade_ms: u64,
    pub transition_secs: f64,
    pub duration_accounting: DurationAccounting,
    pub max_clip_attempts: u32,
    pub seed: Option<u64>,
    pub audio_extensions: Vec<String>,
    pub video_extensions: Vec<String>,
}

impl Default for SequencingConfig {
    fn default() -> Self {
        Self {
            target_minutes: DEFAULT_TARGET.as_secs_f64() / 60.0,
            crossfade_ms: DEFAULT_CROSSFADE.as_millis() as u64,
            transition_secs: DEFAULT_TRANSITION.as_secs_f64(),
            duration_accounting: DurationAccounting::default(),
            max_clip_attempts: 3,
            seed: None,
            audio_extensions: MediaKind::Audio.default_extensions(),
            video_extensions: MediaKind::Video.default_extensions(),
        }
    }
}

/// Temporary audio artifact settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AudioConfig {
    pub format: AudioFormat,
    pub bitrate: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            format: AudioFormat::Mp3,
            bitrate: "320k".to_string(),
        }
    }
}

/// Final encode settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub fps: u32,
    pub video_codec: String,
    pub audio_codec: String,
    pub video_bitrate: String,
    /// `WIDTHxHEIGHT` or `native`
    pub resolution: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let settings = RenderSettings::default();
        Self {
            fps: settings.fps,
            video_codec: settings.video_codec,
            audio_codec: settings.audio_codec,
            video_bitrate: settings.video_bitrate,
            resolution: settings.resolution.to_string(),
        }
    }
}

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    pub ffmpeg_binary: PathBuf,
    /// Directory holding the temporary audio artifact
    pub work_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            ffmpeg_binary: PathBuf::from("ffmpeg"),
            work_dir: PathBuf::from("."),
        }
    }
}

impl ReelConfig {
    pub fn target(&self) -> Result<Duration, DomainError> {
        config_duration("target_minutes", self.sequencing.target_minutes * 60.0)
    }

    pub fn crossfade(&self) -> Duration {
        Duration::from_millis(self.sequencing.crossfade_ms)
    }

    pub fn transition(&self) -> Result<Duration, DomainError> {
        config_duration("transition_secs", self.sequencing.transition_secs)
    }

    pub fn render_settings(&self) -> Result<RenderSettings, DomainError> {
        Ok(RenderSettings {
            fps: self.render.fps,
            video_codec: self.render.video_codec.clone(),
            audio_codec: self.render.audio_codec.clone(),
            video_bitrate: self.render.video_bitrate.clone(),
            resolution: Resolution::parse(&self.render.resolution)
                .map_err(|e| DomainError::Config(e.to_string()))?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), DomainError> {
        let seq = &self.sequencing;
        if !seq.target_minutes.is_finite() || seq.target_minutes <= 0.0 {
            return Err(DomainError::Config(
                "target_minutes must be a positive number".to_string(),
            ));
        }
        if !seq.transition_secs.is_finite() || seq.transition_secs < 0.0 {
            return Err(DomainError::Config(
                "transition_secs cannot be negative".to_string(),
            ));
        }
        if seq.max_clip_attempts == 0 {
            return Err(DomainError::Config(
                "max_clip_attempts must be at least 1".to_string(),
            ));
        }
        if seq.audio_extensions.is_empty() || seq.video_extensions.is_empty() {
            return Err(DomainError::Config(
                "extension lists cannot be empty".to_string(),
            ));
        }
        self.target()?;
        self.transition()?;
        if self.caption.font_size == 0 {
            return Err(DomainError::Config("font_size must be positive".to_string()));
        }
        if self.caption.font.trim().is_empty() {
            return Err(DomainError::Config("font cannot be empty".to_string()));
        }
        if self.render.fps == 0 {
            return Err(DomainError::Config("fps must be positive".to_string()));
        }
        self.render_settings()?;

        Ok(())
    }
}

/// Convert a seconds value, rejecting values `Duration` cannot hold
fn config_duration(key: &str, seconds: f64) -> Result<Duration, DomainError> {
    Duration::try_from_secs_f64(seconds)
        .map_err(|_| DomainError::Config(format!("{} is out of range", key)))
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Deserialize config from TOML string
    pub fn from_toml_str(content: &str) -> Result<ReelConfig, DomainError> {
        toml::from_str(content)
            .map_err(|e| DomainError::Config(format!("Failed to parse TOML config: {}", e)))
    }

    /// Load configuration from file
    pub fn load(path: &Path) -> Result<ReelConfig, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::FsFail(format!("Failed to read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize config to TOML string
    pub fn to_toml_string(config: &ReelConfig) -> Result<String, DomainError> {
        toml::to_string_pretty(config)
            .map_err(|e| DomainError::Config(format!("Failed to serialize config: {}", e)))
    }
}
