// Probe LibAV adapter - Media decoding using libav

use async_trait::async_trait;
use ffmpeg_next as ffmpeg;
use std::time::Duration;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// LibAV-based probing adapter. Expects `crate::init` to have run.
#[derive(Debug, Clone, Default)]
pub struct ProbeLibavAdapter;

impl ProbeLibavAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Demuxer name fragment expected for an extension
    fn expected_demuxer(extension: &str) -> Option<&'static str> {
        match extension {
            "wav" => Some("wav"),
            "mp3" => Some("mp3"),
            "m4a" | "mp4" | "mov" => Some("mp4"),
            "avi" => Some("avi"),
            "mkv" => Some("matroska"),
            _ => None,
        }
    }

    fn media_type(kind: MediaKind) -> ffmpeg::media::Type {
        match kind {
            MediaKind::Audio => ffmpeg::media::Type::Audio,
            MediaKind::Video => ffmpeg::media::Type::Video,
        }
    }

    fn decode_error(asset: &Asset, reason: impl Into<String>) -> DomainError {
        DomainError::Decode {
            path: asset.path.display().to_string(),
            reason: reason.into(),
        }
    }

    /// Convert a measured length, rejecting values from corrupt headers
    fn measured(asset: &Asset, seconds: f64) -> Result<Duration, DomainError> {
        match Duration::try_from_secs_f64(seconds) {
            Ok(duration) if !duration.is_zero() => Ok(duration),
            _ => Err(Self::decode_error(
                asset,
                format!("media reports an unusable duration of {} seconds", seconds),
            )),
        }
    }

    fn open(&self, asset: &Asset) -> Result<TimedSegment, DomainError> {
        let expected = Self::expected_demuxer(&asset.extension).ok_or_else(|| {
            Self::decode_error(asset, format!("unsupported extension '{}'", asset.extension))
        })?;

        let ictx = ffmpeg::format::input(&asset.path)
            .map_err(|e| Self::decode_error(asset, format!("failed to open input: {}", e)))?;

        let demuxer = ictx.format().name().to_string();
        if !demuxer.split(',').any(|name| name.contains(expected)) {
            return Err(Self::decode_error(
                asset,
                format!("container '{}' does not match extension '{}'", demuxer, asset.extension),
            ));
        }

        let stream = ictx
            .streams()
            .best(Self::media_type(asset.kind))
            .ok_or_else(|| Self::decode_error(asset, format!("no {} stream found", asset.kind)))?;

        // Prefer the stream's own duration; fall back to the container's
        let time_base = stream.time_base();
        let stream_seconds = if stream.duration() > 0 && time_base.denominator() != 0 {
            stream.duration() as f64 * time_base.numerator() as f64
                / time_base.denominator() as f64
        } else {
            0.0
        };
        let seconds = if stream_seconds > 0.0 {
            stream_seconds
        } else {
            ictx.duration() as f64 / ffmpeg::ffi::AV_TIME_BASE as f64
        };
        let dimensions = match asset.kind {
            MediaKind::Audio => None,
            MediaKind::Video => {
                let decoder = ffmpeg::codec::context::Context::from_parameters(stream.parameters())
                    .map_err(|e| Self::decode_error(asset, format!("failed to create decoder context: {}", e)))?
                    .decoder()
                    .video()
                    .map_err(|e| Self::decode_error(asset, format!("failed to create video decoder: {}", e)))?;
                Some(
                    Dimensions::new(decoder.width(), decoder.height())
                        .map_err(|e| Self::decode_error(asset, e.to_string()))?,
                )
            }
        };

        debug!(
            "Decoded {} ({}): {:.2}s via {}",
            asset.file_name(),
            asset.kind,
            seconds,
            demuxer
        );

        TimedSegment::new(asset.clone(), Self::measured(asset, seconds)?, dimensions)
    }
}

#[async_trait]
impl ProbePort for ProbeLibavAdapter {
    async fn decode(&self, asset: &Asset) -> Result<TimedSegment, DomainError> {
        self.open(asset)
    }
}
