//! Configuration initialization and hierarchy management

use std::path::Path;

use tracing::{debug, info};

use crate::adapters::toml_config::{ReelConfig, TomlConfigAdapter, DEFAULT_CONFIG_FILE};
use crate::cli::args::GenerateArgs;
use crate::domain::model::{AudioFormat, DurationAccounting, Resolution};
use crate::error::ReelResult;

/// Resolve configuration following precedence: CLI > Env > File > Defaults.
/// Environment values reach this point through the CLI arguments.
pub fn initialize_configuration_hierarchy(args: &GenerateArgs) -> ReelResult<ReelConfig> {
    info!("Initializing configuration hierarchy");

    let mut config = load_config_file(args.config.as_deref())?;
    let overrides = apply_cli_configuration_overrides(&mut config, args)?;
    if overrides > 0 {
        info!("Applied {} CLI configuration overrides", overrides);
    }

    config.validate()?;
    debug!(?config, "Configuration resolved");
    Ok(config)
}

/// Load the explicit file, else the default file when present, else defaults
fn load_config_file(explicit: Option<&Path>) -> ReelResult<ReelConfig> {
    if let Some(path) = explicit {
        info!("Loading configuration from: {}", path.display());
        return Ok(TomlConfigAdapter::load(path)?);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        info!("Loading configuration from: {}", default_path.display());
        return Ok(TomlConfigAdapter::load(default_path)?);
    }

    debug!("No configuration file found, using defaults");
    Ok(ReelConfig::default())
}

/// Apply CLI argument overrides and return how many were applied
fn apply_cli_configuration_overrides(
    config: &mut ReelConfig,
    args: &GenerateArgs,
) -> ReelResult<usize> {
    let mut cli_overrides = 0;

    if let Some(format) = &args.audio_format {
        config.audio.format = AudioFormat::parse(format)?;
        cli_overrides += 1;
    }
    if let Some(font) = &args.font {
        config.caption.font = font.clone();
        cli_overrides += 1;
    }
    if let Some(size) = args.font_size {
        config.caption.font_size = size;
        cli_overrides += 1;
    }
    if let Some(minutes) = args.target_minutes {
        config.sequencing.target_minutes = minutes;
        cli_overrides += 1;
    }
    if let Some(resolution) = &args.resolution {
        config.render.resolution = Resolution::parse(resolution)?.to_string();
        cli_overrides += 1;
    }
    if let Some(accounting) = &args.duration_accounting {
        config.sequencing.duration_accounting = DurationAccounting::parse(accounting)?;
        cli_overrides += 1;
    }
    if let Some(seed) = args.seed {
        config.sequencing.seed = Some(seed);
        cli_overrides += 1;
    }
    if let Some(dir) = &args.work_dir {
        config.runtime.work_dir = dir.clone();
        cli_overrides += 1;
    }

    Ok(cli_overrides)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;
    use crate::domain::errors::DomainError;
    use crate::error::ReelError;

    fn args() -> GenerateArgs {
        GenerateArgs {
            sounds_dir: PathBuf::from("sounds"),
            clips_dir: PathBuf::from("clips"),
            output: PathBuf::from("music_video.mp4"),
            audio_format: None,
            font: None,
            font_size: None,
            target_minutes: None,
            resolution: None,
            duration_accounting: None,
            seed: None,
            config: None,
            work_dir: None,
            json: false,
        }
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[sequencing]\ntarget_minutes = 10.0\nseed = 1\n\n[caption]\nfont = \"Mono\"\nfont_size = 20"
        )
        .unwrap();

        let mut args = args();
        args.config = Some(file.path().to_path_buf());
        args.font_size = Some(48);
        args.audio_format = Some("M4A".to_string());

        let config = initialize_configuration_hierarchy(&args).unwrap();
        assert_eq!(config.sequencing.target_minutes, 10.0);
        assert_eq!(config.sequencing.seed, Some(1));
        assert_eq!(config.caption.font, "Mono");
        assert_eq!(config.caption.font_size, 48);
        assert_eq!(config.audio.format, AudioFormat::M4a);
    }

    #[test]
    fn test_invalid_audio_format_is_rejected() {
        let mut args = args();
        args.audio_format = Some("flac".to_string());

        let err = initialize_configuration_hierarchy(&args).unwrap_err();
        assert!(matches!(err, ReelError::Domain(DomainError::BadArgs(_))));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_missing_explicit_config_file_fails() {
        let mut args = args();
        args.config = Some(PathBuf::from("does/not/exist.toml"));
        assert!(initialize_configuration_hierarchy(&args).is_err());
    }

    #[test]
    fn test_oversized_target_is_rejected_with_config_exit_code() {
        let mut args = args();
        args.target_minutes = Some(1e300);

        let err = initialize_configuration_hierarchy(&args).unwrap_err();
        assert!(matches!(err, ReelError::Domain(DomainError::Config(_))));
        assert_eq!(err.exit_code(), 7);
    }

    #[test]
    fn test_resolution_override_is_normalized() {
        let mut args = args();
        args.resolution = Some("1280X720".to_string());
        args.target_minutes = Some(0.5);

        let config = initialize_configuration_hierarchy(&args).unwrap();
        assert_eq!(config.render.resolution, "1280x720");
        assert_eq!(config.target().unwrap().as_secs(), 30);
    }
}
