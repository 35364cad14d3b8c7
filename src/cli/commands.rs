//! Command implementations

use std::collections::HashSet;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::adapters::{ReelConfig, TracingEventSink};
use crate::app::audio_sequencer::AudioSettings;
use crate::app::compose_interactor::{ComposeRequest, RenderReport};
use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::context::SequencingContext;
use crate::app::video_sequencer::VideoSettings;
use crate::cli::args::GenerateArgs;
use crate::config_initialization::initialize_configuration_hierarchy;
use crate::error::{ReelError, ReelResult};

/// Execute the generate command
pub async fn generate(args: &GenerateArgs) -> Result<()> {
    info!("Starting music video generation");
    info!("Sounds: {}", args.sounds_dir.display());
    info!("Clips: {}", args.clips_dir.display());
    info!("Output: {}", args.output.display());

    let config = initialize_configuration_hierarchy(args)?;
    let request = compose_request(args, &config)?;

    crate::init()?;
    let container = DefaultAppContainer::new(&config);

    let mut ctx = SequencingContext::new(
        config.sequencing.seed,
        Arc::new(TracingEventSink::new()),
    );
    let report = container
        .compose_interactor()
        .execute(&request, &mut ctx)
        .await
        .map_err(ReelError::from)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize render report to JSON")?;
        println!("{}", json);
    } else {
        display_report(&report);
    }

    Ok(())
}

/// Turn resolved configuration into an interactor request
pub fn compose_request(args: &GenerateArgs, config: &ReelConfig) -> ReelResult<ComposeRequest> {
    Ok(ComposeRequest {
        sounds_dir: args.sounds_dir.clone(),
        clips_dir: args.clips_dir.clone(),
        output: args.output.clone(),
        audio_format: config.audio.format,
        audio_bitrate: config.audio.bitrate.clone(),
        audio: AudioSettings {
            extensions: config.sequencing.audio_extensions.clone(),
            target: config.target()?,
            crossfade: config.crossfade(),
            accounting: config.sequencing.duration_accounting,
        },
        video: VideoSettings {
            extensions: config.sequencing.video_extensions.clone(),
            transition: config.transition()?,
            max_clip_attempts: config.sequencing.max_clip_attempts,
        },
        caption: config.caption.clone(),
        render: config.render_settings()?,
        work_dir: config.runtime.work_dir.clone(),
    })
}

/// Display the render report in human-readable form
fn display_report(report: &RenderReport) {
    print!("{}", format_report(report));
}

fn format_report(report: &RenderReport) -> String {
    let mut out = String::new();
    out.push_str("Render Report\n");
    out.push_str("=============\n");
    out.push_str(&format!("Output: {}\n", report.output.display()));
    out.push_str(&format!(
        "Audio: {} songs, {:.2} min nominal, {:.2} min mixed\n",
        report.audio_segments,
        report.nominal_audio_secs / 60.0,
        report.mixed_audio_secs / 60.0
    ));
    out.push_str(&format!(
        "Video: {} clips, {:.2} min\n",
        report.video_segments,
        report.video_secs / 60.0
    ));
    out.push_str(&format!("Total time: {:.2} min\n", report.elapsed_secs / 60.0));
    if report.stopped_early {
        out.push_str("Note: ran out of unique songs before the target length\n");
    }
    out.push('\n');

    let dropped: HashSet<usize> = report.dropped.iter().map(|d| d.title_index).collect();
    out.push_str("Songs:\n");
    for (i, title) in report.titles.iter().enumerate() {
        let status = if dropped.contains(&i) { "✗" } else { "✓" };
        out.push_str(&format!("  {} {:>3}. {}\n", status, i + 1, title));
    }

    if !report.dropped.is_empty() {
        out.push('\n');
        out.push_str("Dropped (no clip could be loaded):\n");
        for entry in &report.dropped {
            out.push_str(&format!("  {:>3}. {}\n", entry.title_index + 1, entry.title));
        }
    }

    out
}
