// konverty-cli/src/cli.rs
//
// Defines the command-line argument structure using clap.

use clap::Parser;
use konverty_core::config::{DEFAULT_FFMPEG_PATH, DEFAULT_FFPROBE_PATH};
use std::ffi::OsString;
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "konverty",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Konverty: PSNR comparison of two video files",
    long_about = "Runs ffmpeg's psnr filter on an original and a processed video, \
                  shows live progress and prints the average, minimum and maximum PSNR."
)]
pub struct Cli {
    /// Original (reference) video file
    #[arg(short = 'i', long = "input", value_name = "ORIG")]
    pub input: PathBuf,

    /// Processed video file compared against the original (legacy form: -i2)
    #[arg(long = "input2", value_name = "PROCESSED")]
    pub input2: PathBuf,

    /// ffmpeg executable
    #[arg(long, value_name = "PATH", env = "KONVERTY_FFMPEG", default_value = DEFAULT_FFMPEG_PATH)]
    pub ffmpeg: PathBuf,

    /// ffprobe executable
    #[arg(long, value_name = "PATH", env = "KONVERTY_FFPROBE", default_value = DEFAULT_FFPROBE_PATH)]
    pub ffprobe: PathBuf,

    /// Skip the frame-count probe; progress shows frame numbers only
    #[arg(long, default_value_t = false)]
    pub no_frame_count: bool,

    /// Print the PSNR summary as JSON on stdout
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Write logs to a timestamped file in this directory instead of the console
    #[arg(short, long, value_name = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Rewrites the legacy single-dash `-i2` flag to `--input2`.
///
/// clap only accepts single-character short flags, so `-i2` would otherwise
/// parse as `-i 2`. Arguments after a `--` terminator are left untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(|arg| {
            if passthrough {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some("-i2") => OsString::from("--input2"),
                Some(s) if s.starts_with("-i2=") => {
                    OsString::from(format!("--input2={}", &s["-i2=".len()..]))
                }
                _ => arg,
            }
        })
        .collect()
}
