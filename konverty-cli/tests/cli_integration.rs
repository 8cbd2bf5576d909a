// konverty-cli/tests/cli_integration.rs

use assert_cmd::Command;
use konverty_cli::exit_code;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

// Helper function to get the path to the compiled binary
fn konverty_cmd() -> Command {
    let mut cmd = Command::cargo_bin("konverty").expect("Failed to find konverty binary");
    cmd.env_remove("KONVERTY_FFMPEG")
        .env_remove("KONVERTY_FFPROBE")
        .env_remove("RUST_LOG");
    cmd
}

fn dummy_inputs() -> Result<(TempDir, PathBuf, PathBuf), Box<dyn Error>> {
    let dir = tempdir()?;
    let original = dir.path().join("orig.mkv");
    let processed = dir.path().join("out.mkv");
    std::fs::write(&original, "original")?;
    std::fs::write(&processed, "processed")?;
    Ok((dir, original, processed))
}

fn missing_tool(dir: &Path, name: &str) -> PathBuf {
    dir.join("bin").join(name)
}

#[test]
fn test_help_lists_flags() -> Result<(), Box<dyn Error>> {
    konverty_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--input").and(contains("--input2")).and(contains("--json")));
    Ok(())
}

#[test]
fn test_missing_second_input_is_usage_error() -> Result<(), Box<dyn Error>> {
    konverty_cmd()
        .args(["-i", "orig.mkv"])
        .assert()
        .code(exit_code::USAGE)
        .stderr(contains("--input2"));
    Ok(())
}

#[test]
fn test_non_existent_input() -> Result<(), Box<dyn Error>> {
    let (dir, _original, processed) = dummy_inputs()?;
    let missing = dir.path().join("surely/not/here.mkv");

    konverty_cmd()
        .arg("--input")
        .arg(&missing)
        .arg("--input2")
        .arg(&processed)
        .assert()
        .code(1)
        .stdout(contains("Invalid input path"))
        .stderr(contains("Invalid input path").not());
    Ok(())
}

#[test]
fn test_directory_as_input_is_rejected() -> Result<(), Box<dyn Error>> {
    let (dir, original, _processed) = dummy_inputs()?;

    konverty_cmd()
        .arg("-i")
        .arg(&original)
        .arg("-i2")
        .arg(dir.path())
        .assert()
        .code(1)
        .stdout(contains("is not a file"));
    Ok(())
}

#[test]
fn test_missing_ffmpeg_is_spawn_error() -> Result<(), Box<dyn Error>> {
    let (dir, original, processed) = dummy_inputs()?;

    konverty_cmd()
        .arg("-i")
        .arg(&original)
        .arg("-i2")
        .arg(&processed)
        .arg("--ffmpeg")
        .arg(missing_tool(dir.path(), "ffmpeg"))
        .arg("--ffprobe")
        .arg(missing_tool(dir.path(), "ffprobe"))
        .assert()
        .code(3)
        .stdout(contains("Orig file").and(contains("Processed file")).and(contains("-1 @ -1")));
    Ok(())
}

#[test]
fn test_tool_paths_from_environment() -> Result<(), Box<dyn Error>> {
    let (dir, original, processed) = dummy_inputs()?;

    konverty_cmd()
        .env("KONVERTY_FFMPEG", missing_tool(dir.path(), "ffmpeg"))
        .env("KONVERTY_FFPROBE", missing_tool(dir.path(), "ffprobe"))
        .arg("-i")
        .arg(&original)
        .arg("--input2")
        .arg(&processed)
        .arg("--no-frame-count")
        .assert()
        .code(3);
    Ok(())
}
