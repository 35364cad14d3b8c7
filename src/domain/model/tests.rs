// Unit tests for domain models

#[cfg(test)]
mod tests {
    use crate::domain::errors::*;
    use crate::domain::model::*;
    use std::path::Path;
    use std::time::Duration;

    fn segment(name: &str, secs: u64) -> TimedSegment {
        let kind = if name.ends_with(".mp4") {
            MediaKind::Video
        } else {
            MediaKind::Audio
        };
        TimedSegment::new(
            Asset::new(name, kind).unwrap(),
            Duration::from_secs(secs),
            None,
        )
        .unwrap()
    }

    fn caption(title: &str, index: usize) -> Caption {
        Caption {
            title: SongTitle::from_stem(title),
            title_index: index,
        }
    }

    #[test]
    fn test_song_title_from_filename() {
        let title = SongTitle::from_path(Path::new("My_Song-1.wav"));
        assert_eq!(title.as_str(), "My Song 1");
    }

    #[test]
    fn test_song_title_normalizes_case() {
        assert_eq!(SongTitle::from_stem("hello_WORLD").as_str(), "Hello World");
        assert_eq!(SongTitle::from_stem("night-drive").as_str(), "Night Drive");
    }

    #[test]
    fn test_song_title_strips_directory_and_last_extension() {
        let title = SongTitle::from_path(Path::new("/music/deep_cuts/late.night.mp3"));
        assert_eq!(title.as_str(), "Late.Night");
    }

    #[test]
    fn test_asset_extension_is_lowercased() {
        let asset = Asset::new("/clips/Sunset.MOV", MediaKind::Video).unwrap();
        assert_eq!(asset.extension, "mov");
        assert_eq!(asset.file_name(), "Sunset.MOV");
        assert!(asset.has_extension(&["mp4".to_string(), ".MOV".to_string()]));
        assert!(!asset.has_extension(&["mkv".to_string()]));
    }

    #[test]
    fn test_asset_without_extension_is_rejected() {
        assert!(Asset::new("/music/README", MediaKind::Audio).is_err());
    }

    #[test]
    fn test_timed_segment_rejects_zero_duration() {
        let asset = Asset::new("silence.wav", MediaKind::Audio).unwrap();
        let result = TimedSegment::new(asset, Duration::ZERO, None);
        assert!(matches!(result, Err(DomainError::Decode { .. })));
    }

    #[test]
    fn test_audio_format_parsing() {
        assert_eq!(AudioFormat::parse("mp3").unwrap(), AudioFormat::Mp3);
        assert_eq!(AudioFormat::parse("M4A").unwrap(), AudioFormat::M4a);
        assert!(AudioFormat::parse("ogg").is_err());
        assert_eq!(AudioFormat::M4a.artifact_file_name(), "combined_audio.m4a");
        assert_eq!(AudioFormat::M4a.channels(), Some(2));
        assert_eq!(AudioFormat::Mp3.encoder(), "libmp3lame");
    }

    #[test]
    fn test_resolution_parsing() {
        assert_eq!(
            Resolution::parse("1280x720").unwrap(),
            Resolution::Fixed(Dimensions::new(1280, 720).unwrap())
        );
        assert_eq!(Resolution::parse("Native").unwrap(), Resolution::Native);
        assert!(Resolution::parse("1280").is_err());
        assert!(Resolution::parse("0x720").is_err());
        assert_eq!(Resolution::default().to_string(), "1920x1080");
    }

    #[test]
    fn test_native_resolution_follows_first_clip() {
        let first = Dimensions::new(640, 480).unwrap();
        assert_eq!(Resolution::Native.resolve(Some(first)), Some(first));
        assert_eq!(
            Resolution::default().resolve(Some(first)),
            Some(Dimensions::full_hd())
        );
    }

    #[test]
    fn test_audio_mix_first_append_has_no_crossfade() {
        let mut mix = AudioMix::new();
        let growth = mix.append(&segment("a.wav", 120), DEFAULT_CROSSFADE);

        assert_eq!(growth, Duration::from_secs(120));
        assert_eq!(mix.entries()[0].crossfade, Duration::ZERO);
    }

    #[test]
    fn test_audio_mix_tracks_nominal_and_mixed_duration() {
        let mut mix = AudioMix::new();
        mix.append(&segment("a.wav", 120), DEFAULT_CROSSFADE);
        let growth = mix.append(&segment("b.wav", 60), DEFAULT_CROSSFADE);

        assert_eq!(growth, Duration::from_secs(57));
        assert_eq!(mix.nominal_duration(), Duration::from_secs(180));
        assert_eq!(mix.mixed_duration(), Duration::from_secs(177));
        assert_eq!(mix.entries()[1].crossfade, DEFAULT_CROSSFADE);
    }

    #[test]
    fn test_audio_mix_grows_on_short_segments() {
        let mut mix = AudioMix::new();
        mix.append(&segment("a.wav", 60), DEFAULT_CROSSFADE);
        let before = mix.mixed_duration();
        let growth = mix.append(&segment("blip.wav", 2), DEFAULT_CROSSFADE);

        assert_eq!(mix.entries()[1].crossfade, Duration::from_secs(1));
        assert!(growth > Duration::ZERO);
        assert!(mix.mixed_duration() > before);
    }

    #[test]
    fn test_transition_consumes_both_neighbours() {
        let t = FadeTransition::between(
            Duration::from_secs(10),
            Duration::from_secs(8),
            DEFAULT_TRANSITION,
        );

        assert_eq!(t.fade_out.duration, DEFAULT_TRANSITION);
        assert_eq!(t.fade_out.start, Duration::from_millis(8500));
        assert_eq!(t.fade_in.start, Duration::ZERO);
        assert_eq!(t.fade_in.duration, DEFAULT_TRANSITION);
    }

    #[test]
    fn test_transition_window_capped_for_short_clips() {
        let t = FadeTransition::between(
            Duration::from_secs(2),
            Duration::from_secs(10),
            DEFAULT_TRANSITION,
        );
        assert_eq!(t.overlap(), Duration::from_secs(1));
        assert_eq!(t.fade_out.start, Duration::from_secs(1));
    }

    #[test]
    fn test_timeline_attaches_transition_to_previous_clip() {
        let mut timeline = VideoTimeline::new();
        let first = timeline.push(segment("a.mp4", 10), caption("one", 0), DEFAULT_TRANSITION);
        let second = timeline.push(segment("b.mp4", 10), caption("two", 1), DEFAULT_TRANSITION);

        assert!(first.is_none());
        let second = second.unwrap();
        assert_eq!(timeline.segments()[0].transition_to_next, Some(second));
        assert!(timeline.segments()[1].transition_to_next.is_none());

        let segs = timeline.segments();
        assert_eq!(segs[1].fade_in(Some(&segs[0])), Some(&second.fade_in));
        assert_eq!(segs[0].fade_in(None), None);
    }

    #[test]
    fn test_timeline_duration_subtracts_overlaps() {
        let mut timeline = VideoTimeline::new();
        timeline.push(segment("a.mp4", 10), caption("one", 0), DEFAULT_TRANSITION);
        timeline.push(segment("b.mp4", 10), caption("two", 1), DEFAULT_TRANSITION);
        timeline.push(segment("c.mp4", 10), caption("three", 2), DEFAULT_TRANSITION);

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.duration(), Duration::from_secs(27));
    }

    #[test]
    fn test_duration_accounting_parsing() {
        assert_eq!(
            DurationAccounting::parse("nominal").unwrap(),
            DurationAccounting::Nominal
        );
        assert_eq!(
            DurationAccounting::parse("MIXED").unwrap(),
            DurationAccounting::Mixed
        );
        assert!(DurationAccounting::parse("net").is_err());
        assert_eq!(DurationAccounting::default(), DurationAccounting::Nominal);
    }
}
