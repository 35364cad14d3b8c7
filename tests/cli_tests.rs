use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn reelmix() -> Command {
    let mut cmd = Command::cargo_bin("reelmix").expect("binary should build");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_options() {
    reelmix()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--audio-format"))
        .stdout(predicate::str::contains("--target-minutes"))
        .stdout(predicate::str::contains("SOUNDS_DIR"));
}

#[test]
fn test_missing_positional_arguments_is_usage_error() {
    reelmix()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_sounds_directory_exits_with_code_2() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("clips")).unwrap();

    reelmix()
        .current_dir(temp.path())
        .args(["no_such_sounds", "clips"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "Sounds directory 'no_such_sounds' does not exist",
        ));

    assert!(!temp.path().join("music_video.mp4").exists());
}

#[test]
fn test_unsupported_audio_format_exits_with_code_7() {
    let temp = TempDir::new().unwrap();

    reelmix()
        .current_dir(temp.path())
        .args(["sounds", "clips", "--audio-format", "flac"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Unsupported output format"));
}

#[test]
fn test_invalid_config_file_exits_with_code_7() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("reelmix.toml"), "[render]\ncrf = 18\n").unwrap();

    reelmix()
        .current_dir(temp.path())
        .args(["sounds", "clips"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_empty_sounds_directory_exits_with_code_3() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir(temp.path().join("sounds")).unwrap();
    std::fs::create_dir(temp.path().join("clips")).unwrap();

    reelmix()
        .current_dir(temp.path())
        .args(["sounds", "clips", "--seed", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No audio files found"));

    assert!(!temp.path().join("combined_audio.mp3").exists());
}
