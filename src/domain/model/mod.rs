// Domain models - Core types and data structures

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Audio crossfade applied between consecutive tracks
pub const DEFAULT_CROSSFADE: Duration = Duration::from_millis(3000);

/// Soft aperture window between consecutive clips
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(1500);

/// One hour of nominal audio
pub const DEFAULT_TARGET: Duration = Duration::from_secs(60 * 60);

/// Kind of source media an asset holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    /// Extensions recognized when no configuration overrides them
    pub fn default_extensions(&self) -> Vec<String> {
        let exts: &[&str] = match self {
            MediaKind::Audio => &["wav", "mp3", "m4a"],
            MediaKind::Video => &["mp4", "mov", "avi", "mkv"],
        };
        exts.iter().map(|ext| ext.to_string()).collect()
    }

    /// Label of the source directory holding this kind
    pub fn source_label(&self) -> &'static str {
        match self {
            MediaKind::Audio => "Sounds",
            MediaKind::Video => "Clips",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

/// One source media file found by a catalog scan
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asset {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub extension: String,
}

impl Asset {
    /// Create an asset, taking the lowercased extension from the path
    pub fn new(path: impl Into<PathBuf>, kind: MediaKind) -> Result<Self, DomainError> {
        let path = path.into();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .ok_or_else(|| {
                DomainError::BadArgs(format!("Asset has no extension: {}", path.display()))
            })?;

        Ok(Self {
            path,
            kind,
            extension,
        })
    }

    /// File name without directory components
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Check whether the asset extension is in the accepted list
    pub fn has_extension(&self, accepted: &[String]) -> bool {
        accepted
            .iter()
            .any(|ext| ext.trim_start_matches('.').eq_ignore_ascii_case(&self.extension))
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Caption text derived from an audio file name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongTitle(String);

impl SongTitle {
    /// Derive a title from a file path: strip the extension, turn `_` and `-`
    /// into spaces, and title-case every word.
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::from_stem(&stem)
    }

    /// Derive a title from a file stem
    pub fn from_stem(stem: &str) -> Self {
        let spaced = stem.replace(['_', '-'], " ");
        Self(title_case(&spaced))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Uppercase the first letter of every run of letters, lowercase the rest
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }

    out
}

/// Pixel dimensions of a video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::BadArgs(
                "Video dimensions cannot be zero".to_string(),
            ));
        }
        Ok(Self { width, height })
    }

    pub fn full_hd() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A decoded asset: media handle plus its duration
#[derive(Debug, Clone, PartialEq)]
pub struct TimedSegment {
    pub asset: Asset,
    pub duration: Duration,
    /// Native frame size, only present for video
    pub dimensions: Option<Dimensions>,
}

impl TimedSegment {
    /// Create a timed segment, rejecting empty media
    pub fn new(
        asset: Asset,
        duration: Duration,
        dimensions: Option<Dimensions>,
    ) -> Result<Self, DomainError> {
        if duration.is_zero() {
            return Err(DomainError::Decode {
                path: asset.path.display().to_string(),
                reason: "media has zero duration".to_string(),
            });
        }
        Ok(Self {
            asset,
            duration,
            dimensions,
        })
    }
}

/// Container of the temporary audio artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    M4a,
}

impl AudioFormat {
    /// Parse audio format from string
    pub fn parse(format: &str) -> Result<Self, DomainError> {
        match format.trim().to_lowercase().as_str() {
            "mp3" => Ok(AudioFormat::Mp3),
            "m4a" => Ok(AudioFormat::M4a),
            other => Err(DomainError::BadArgs(format!(
                "Unsupported output format: '{}'. Choose 'mp3' or 'm4a'.",
                other
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
        }
    }

    /// Name of the temporary mix written between stages
    pub fn artifact_file_name(&self) -> String {
        format!("combined_audio.{}", self.extension())
    }

    /// Encoder used for this container
    pub fn encoder(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "libmp3lame",
            AudioFormat::M4a => "aac",
        }
    }

    /// Forced channel count, if any
    pub fn channels(&self) -> Option<u8> {
        match self {
            AudioFormat::Mp3 => None,
            AudioFormat::M4a => Some(2),
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Output frame size policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Every clip is scaled and padded to this size
    Fixed(Dimensions),
    /// Every clip is scaled to the first composed clip's native size
    Native,
}

impl Resolution {
    /// Parse `WIDTHxHEIGHT` or `native`
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let trimmed = value.trim().to_lowercase();
        if trimmed == "native" {
            return Ok(Resolution::Native);
        }

        let (w, h) = trimmed.split_once('x').ok_or_else(|| {
            DomainError::BadArgs(format!(
                "Invalid resolution: {}. Expected WIDTHxHEIGHT or 'native'",
                value
            ))
        })?;
        let width = w
            .parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid resolution width: {}", w)))?;
        let height = h
            .parse::<u32>()
            .map_err(|_| DomainError::BadArgs(format!("Invalid resolution height: {}", h)))?;

        Ok(Resolution::Fixed(Dimensions::new(width, height)?))
    }

    /// Resolve the frame size for a timeline whose first clip has `first`
    pub fn resolve(&self, first: Option<Dimensions>) -> Option<Dimensions> {
        match self {
            Resolution::Fixed(dims) => Some(*dims),
            Resolution::Native => first,
        }
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Resolution::Fixed(Dimensions::full_hd())
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Fixed(dims) => write!(f, "{}", dims),
            Resolution::Native => write!(f, "native"),
        }
    }
}

/// What the audio target duration is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationAccounting {
    /// Sum of every appended track's full length
    #[default]
    Nominal,
    /// Length of the mixed timeline after crossfade overlap
    Mixed,
}

impl DurationAccounting {
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim().to_lowercase().as_str() {
            "nominal" => Ok(DurationAccounting::Nominal),
            "mixed" => Ok(DurationAccounting::Mixed),
            other => Err(DomainError::BadArgs(format!(
                "Invalid duration accounting: {}. Valid values: nominal, mixed",
                other
            ))),
        }
    }
}

/// Caption appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionStyle {
    pub font: String,
    pub font_size: u32,
    pub color: String,
    pub bottom_margin: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font: "OCR A Std".to_string(),
            font_size: 36,
            color: "white".to_string(),
            bottom_margin: 20,
        }
    }
}

/// Final encode parameters
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub fps: u32,
    pub video_codec: String,
    pub audio_codec: String,
    pub video_bitrate: String,
    pub resolution: Resolution,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fps: 24,
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            video_bitrate: "8000k".to_string(),
            resolution: Resolution::default(),
        }
    }
}

/// One track in the audio mix
#[derive(Debug, Clone, PartialEq)]
pub struct MixEntry {
    pub path: PathBuf,
    pub duration: Duration,
    /// Overlap with the mix accumulated before this entry
    pub crossfade: Duration,
}

/// Crossfaded audio mix, rendered by the codec adapter
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioMix {
    entries: Vec<MixEntry>,
    nominal: Duration,
    mixed: Duration,
}

impl AudioMix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment with the given crossfade and return the growth of the
    /// mixed timeline.
    ///
    /// The first segment never crossfades. Later overlaps are capped at half
    /// the incoming segment and at the accumulated mix, so every append grows
    /// the mix.
    pub fn append(&mut self, segment: &TimedSegment, crossfade: Duration) -> Duration {
        let overlap = if self.entries.is_empty() {
            Duration::ZERO
        } else {
            crossfade.min(self.mixed).min(segment.duration / 2)
        };

        self.entries.push(MixEntry {
            path: segment.asset.path.clone(),
            duration: segment.duration,
            crossfade: overlap,
        });

        let growth = segment.duration - overlap;
        self.nominal += segment.duration;
        self.mixed += growth;
        growth
    }

    pub fn entries(&self) -> &[MixEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of every track's full length
    pub fn nominal_duration(&self) -> Duration {
        self.nominal
    }

    /// Timeline length after crossfades
    pub fn mixed_duration(&self) -> Duration {
        self.mixed
    }
}

/// A fade window relative to the start of its segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeWindow {
    pub start: Duration,
    pub duration: Duration,
}

/// Symmetric fade between two neighbouring clips, composited over the overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTransition {
    /// Tail of the outgoing clip
    pub fade_out: FadeWindow,
    /// Head of the incoming clip
    pub fade_in: FadeWindow,
}

impl FadeTransition {
    /// Build a transition between clips of the given lengths. The window is
    /// capped at half of either clip so a clip's incoming and outgoing fades
    /// never overlap.
    pub fn between(outgoing: Duration, incoming: Duration, window: Duration) -> Self {
        let window = window.min(outgoing / 2).min(incoming / 2);
        Self {
            fade_out: FadeWindow {
                start: outgoing - window,
                duration: window,
            },
            fade_in: FadeWindow {
                start: Duration::ZERO,
                duration: window,
            },
        }
    }

    /// Length of the composited overlap
    pub fn overlap(&self) -> Duration {
        self.fade_in.duration
    }
}

/// Caption burned into one clip
#[derive(Debug, Clone, PartialEq)]
pub struct Caption {
    pub title: SongTitle,
    /// Position of the title in the audio title list
    pub title_index: usize,
}

/// One clip of the video timeline with its transition into the next clip
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineSegment {
    pub segment: TimedSegment,
    pub caption: Caption,
    pub transition_to_next: Option<FadeTransition>,
}

impl TimelineSegment {
    /// Incoming fade, taken from the previous segment's transition
    pub fn fade_in<'a>(&self, previous: Option<&'a TimelineSegment>) -> Option<&'a FadeWindow> {
        previous
            .and_then(|prev| prev.transition_to_next.as_ref())
            .map(|t| &t.fade_in)
    }
}

/// Ordered clip list resolved into a filter graph only at encode time
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VideoTimeline {
    segments: Vec<TimelineSegment>,
}

impl VideoTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a captioned clip. When a clip precedes it, a fade transition is
    /// attached to that clip and returned.
    pub fn push(
        &mut self,
        segment: TimedSegment,
        caption: Caption,
        window: Duration,
    ) -> Option<FadeTransition> {
        let transition = self.segments.last_mut().map(|previous| {
            let t = FadeTransition::between(
                previous.segment.duration,
                segment.duration,
                window,
            );
            previous.transition_to_next = Some(t);
            t
        });

        self.segments.push(TimelineSegment {
            segment,
            caption,
            transition_to_next: None,
        });

        transition
    }

    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Native size of the first clip, if known
    pub fn first_dimensions(&self) -> Option<Dimensions> {
        self.segments.first().and_then(|s| s.segment.dimensions)
    }

    /// Length of the composed timeline after transition overlaps
    pub fn duration(&self) -> Duration {
        self.segments.iter().fold(Duration::ZERO, |acc, s| {
            let overlap = s
                .transition_to_next
                .map(|t| t.overlap())
                .unwrap_or(Duration::ZERO);
            acc + s.segment.duration - overlap
        })
    }
}

#[cfg(test)]
mod tests;
