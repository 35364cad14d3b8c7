//! FFmpeg execution adapter
//!
//! Mixing, transitions, captions and the final encode are delegated to the
//! `ffmpeg` executable. Timelines are turned into `filter_complex` graphs only
//! here, right before encoding.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFmpeg-based render adapter
pub struct FfmpegRenderAdapter {
    binary: PathBuf,
}

impl FfmpegRenderAdapter {
    /// Create new FFmpeg adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run ffmpeg to completion, surfacing stderr on failure
    async fn run(&self, args: Vec<OsString>) -> Result<(), DomainError> {
        debug!("Running {} with {} arguments", self.binary.display(), args.len());

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                DomainError::Encode(format!("Failed to run {}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            return Err(DomainError::Encode(format!(
                "FFmpeg failed ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}

fn base_args() -> Vec<OsString> {
    ["-y", "-hide_banner", "-loglevel", "error", "-nostdin"]
        .iter()
        .map(|arg| OsString::from(*arg))
        .collect()
}

fn push_input(args: &mut Vec<OsString>, path: &Path) {
    args.push("-i".into());
    args.push(path.as_os_str().to_owned());
}

fn secs(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}

/// Escape drawtext text expansion, where `\` and `%` are special
pub fn escape_text_expansion(text: &str) -> String {
    text.replace('\\', "\\\\").replace('%', "\\%")
}

/// Encode a filter option value for use inside `-filter_complex`.
///
/// The value goes through two tokenizer passes: the option parser, where
/// quoting protects `:` and `'` is spliced in as `'\''`, and then the graph
/// parser, where quotes, backslashes and `[],;` are backslash-escaped.
pub fn filter_option_value(value: &str) -> String {
    let quoted = format!("'{}'", value.replace('\'', "'\\''"));

    let mut escaped = String::with_capacity(quoted.len() * 2);
    for c in quoted.chars() {
        if matches!(c, '\\' | '\'' | '[' | ']' | ',' | ';') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Filter graph crossfading every mix entry into `[aout]`
pub fn audio_mix_graph(mix: &AudioMix) -> String {
    let mut filters = Vec::new();

    for (i, _) in mix.entries().iter().enumerate() {
        filters.push(format!(
            "[{i}:a]aresample=44100,aformat=sample_fmts=fltp:channel_layouts=stereo[s{i}]"
        ));
    }

    let mut current = "s0".to_string();
    for (i, entry) in mix.entries().iter().enumerate().skip(1) {
        let out = format!("m{i}");
        if entry.crossfade.is_zero() {
            filters.push(format!("[{current}][s{i}]concat=n=2:v=0:a=1[{out}]"));
        } else {
            filters.push(format!(
                "[{current}][s{i}]acrossfade=d={}:c1=tri:c2=tri[{out}]",
                secs(entry.crossfade)
            ));
        }
        current = out;
    }
    filters.push(format!("[{current}]anull[aout]"));

    filters.join(";")
}

/// Filter graph composing the timeline into `[vout]`: every clip is
/// normalised to `frame` and the frame rate, captioned, then chained through
/// fade transitions at the overlap windows.
pub fn video_timeline_graph(
    timeline: &VideoTimeline,
    caption: &CaptionStyle,
    fps: u32,
    frame: Dimensions,
) -> String {
    let mut filters = Vec::new();
    let (w, h) = (frame.width, frame.height);

    for (i, entry) in timeline.segments().iter().enumerate() {
        filters.push(format!(
            "[{i}:v]scale={w}:{h}:force_original_aspect_ratio=decrease,\
             pad={w}:{h}:(ow-iw)/2:(oh-ih)/2,setsar=1,fps={fps},format=yuv420p,\
             {}[c{i}]",
            caption_filter(entry.caption.title.as_str(), caption)
        ));
    }

    let mut current = "c0".to_string();
    let mut elapsed = timeline
        .segments()
        .first()
        .map(|s| s.segment.duration)
        .unwrap_or(Duration::ZERO);

    for (i, pair) in timeline.segments().windows(2).enumerate() {
        let (previous, next) = (&pair[0], &pair[1]);
        let input = format!("c{}", i + 1);
        let out = format!("x{}", i + 1);

        match previous.transition_to_next {
            Some(t) if !t.overlap().is_zero() => {
                let offset = elapsed.saturating_sub(t.overlap());
                filters.push(format!(
                    "[{current}][{input}]xfade=transition=fade:duration={}:offset={}[{out}]",
                    secs(t.overlap()),
                    secs(offset)
                ));
                elapsed = offset + next.segment.duration;
            }
            _ => {
                filters.push(format!("[{current}][{input}]concat=n=2:v=1:a=0[{out}]"));
                elapsed += next.segment.duration;
            }
        }
        current = out;
    }
    filters.push(format!("[{current}]null[vout]"));

    filters.join(";")
}

/// Bottom-centred caption held for the whole clip
pub fn caption_filter(title: &str, style: &CaptionStyle) -> String {
    format!(
        "drawtext=font={}:text={}:fontsize={}:fontcolor={}:x=(w-text_w)/2:y=h-text_h-{}",
        filter_option_value(&style.font),
        filter_option_value(&escape_text_expansion(title)),
        style.font_size,
        style.color,
        style.bottom_margin
    )
}

#[async_trait]
impl RenderPort for FfmpegRenderAdapter {
    async fn render_audio(
        &self,
        mix: &AudioMix,
        format: AudioFormat,
        bitrate: &str,
        dest: &Path,
    ) -> Result<(), DomainError> {
        if mix.is_empty() {
            return Err(DomainError::Encode("Audio mix is empty".to_string()));
        }

        let mut args = base_args();
        for entry in mix.entries() {
            push_input(&mut args, &entry.path);
        }
        args.push("-filter_complex".into());
        args.push(audio_mix_graph(mix).into());
        for arg in ["-map", "[aout]", "-c:a", format.encoder(), "-b:a", bitrate] {
            args.push(arg.into());
        }
        if let Some(channels) = format.channels() {
            args.push("-ac".into());
            args.push(channels.to_string().into());
        }
        args.push(dest.as_os_str().to_owned());

        info!(
            "Rendering {} tracks into {} ({} @ {})",
            mix.len(),
            dest.display(),
            format,
            bitrate
        );
        self.run(args).await
    }

    async fn render_video(&self, request: &MuxRequest<'_>) -> Result<(), DomainError> {
        let timeline = request.timeline;
        if timeline.is_empty() {
            return Err(DomainError::Encode("Video timeline is empty".to_string()));
        }

        let frame = request
            .settings
            .resolution
            .resolve(timeline.first_dimensions())
            .unwrap_or_else(Dimensions::full_hd);

        let mut args = base_args();
        for entry in timeline.segments() {
            push_input(&mut args, &entry.segment.asset.path);
        }
        push_input(&mut args, request.audio);

        args.push("-filter_complex".into());
        args.push(
            video_timeline_graph(timeline, request.caption, request.settings.fps, frame).into(),
        );

        let audio_index = timeline.len().to_string();
        let fps = request.settings.fps.to_string();
        let audio_map = format!("{}:a", audio_index);
        for arg in [
            "-map",
            "[vout]",
            "-map",
            audio_map.as_str(),
            "-c:v",
            request.settings.video_codec.as_str(),
            "-b:v",
            request.settings.video_bitrate.as_str(),
            "-r",
            fps.as_str(),
            "-c:a",
            request.settings.audio_codec.as_str(),
            "-shortest",
            "-movflags",
            "+faststart",
        ] {
            args.push(arg.into());
        }
        args.push(request.dest.as_os_str().to_owned());

        info!(
            "Rendering {} clips at {} {}fps into {}",
            timeline.len(),
            frame,
            request.settings.fps,
            request.dest.display()
        );
        self.run(args).await
    }
}
