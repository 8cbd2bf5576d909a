//! FFprobe queries for stream information and frame totals
//!
//! Every probe here is advisory: results feed the informational header and
//! the progress percentage, never the PSNR result itself. Failures (spawn
//! errors, non-zero exits, unparsable output) are logged and mapped to a
//! sentinel instead of being returned as errors.

use crate::config::CoreConfig;
use crate::metrics::FrameTotal;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Name used for ffprobe in log lines.
pub const FFPROBE: &str = "ffprobe";

/// Audio stream details shown before a quality run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioStreamInfo {
    /// Bitrate of the first audio stream in kb/s
    pub bitrate_kbps: Option<u64>,
    /// Codec name of the first audio stream
    pub codec: Option<String>,
}

/// Trait for the ffprobe queries konverty performs.
pub trait FfprobeExecutor {
    /// Bitrate of the first audio stream in kb/s (`bit_rate / 1000`, truncated).
    fn audio_bitrate_kbps(&self, input_path: &Path) -> Option<u64>;

    /// Codec name of the first audio stream.
    fn audio_codec(&self, input_path: &Path) -> Option<String>;

    /// Packet count of the first video stream, used as the frame total.
    fn frame_total(&self, input_path: &Path) -> FrameTotal;

    /// Bitrate and codec of the first audio stream.
    fn audio_stream_info(&self, input_path: &Path) -> AudioStreamInfo {
        AudioStreamInfo {
            bitrate_kbps: self.audio_bitrate_kbps(input_path),
            codec: self.audio_codec(input_path),
        }
    }
}

/// `FfprobeExecutor` that runs the ffprobe binary.
#[derive(Debug, Clone)]
pub struct CommandFfprobeExecutor {
    ffprobe_path: PathBuf,
}

impl Default for CommandFfprobeExecutor {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_FFPROBE_PATH)
    }
}

impl CommandFfprobeExecutor {
    pub fn new(ffprobe_path: impl Into<PathBuf>) -> Self {
        Self {
            ffprobe_path: ffprobe_path.into(),
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.ffprobe_path.clone())
    }

    /// Runs ffprobe with `args` and returns its trimmed stdout, or `None` on
    /// any failure.
    fn query(&self, args: Vec<OsString>, what: &str) -> Option<String> {
        log::debug!(
            "Running {} for {what}: {}",
            self.ffprobe_path.display(),
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = match Command::new(&self.ffprobe_path).args(&args).output() {
            Ok(output) => output,
            Err(e) => {
                log::warn!("Failed to run {FFPROBE} for {what}: {e}");
                return None;
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            log::warn!(
                "{FFPROBE} {what} query exited with {}: {}",
                output.status,
                stderr.trim()
            );
            return None;
        }

        Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl FfprobeExecutor for CommandFfprobeExecutor {
    fn audio_bitrate_kbps(&self, input_path: &Path) -> Option<u64> {
        let stdout = self.query(audio_entry_args("bit_rate", input_path), "audio bitrate")?;
        let parsed = parse_bitrate_kbps(&stdout);
        if parsed.is_none() {
            log::warn!("Unparsable audio bitrate for {}: {stdout:?}", input_path.display());
        }
        parsed
    }

    fn audio_codec(&self, input_path: &Path) -> Option<String> {
        let stdout = self.query(audio_entry_args("codec_name", input_path), "audio codec")?;
        let parsed = parse_codec(&stdout);
        if parsed.is_none() {
            log::warn!("No audio codec reported for {}", input_path.display());
        }
        parsed
    }

    fn frame_total(&self, input_path: &Path) -> FrameTotal {
        let Some(stdout) = self.query(frame_count_args(input_path), "frame count") else {
            return FrameTotal::Unknown;
        };
        let total = parse_frame_total(&stdout);
        if total == FrameTotal::Unknown {
            log::warn!("Unusable frame count for {}: {stdout:?}", input_path.display());
        }
        total
    }
}

/// `ffprobe -v error -select_streams a:0 -show_entries stream=ENTRY -of default=noprint_wrappers=1:nokey=1 FILE`
pub fn audio_entry_args(entry: &str, input_path: &Path) -> Vec<OsString> {
    let show_entries = format!("stream={entry}");
    let mut args: Vec<OsString> = [
        "-v",
        "error",
        "-select_streams",
        "a:0",
        "-show_entries",
        show_entries.as_str(),
        "-of",
        "default=noprint_wrappers=1:nokey=1",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(input_path.as_os_str().to_os_string());
    args
}

/// `ffprobe -v error -select_streams v:0 -count_packets -show_entries stream=nb_read_packets -of csv=p=0 FILE`
pub fn frame_count_args(input_path: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = [
        "-v",
        "error",
        "-select_streams",
        "v:0",
        "-count_packets",
        "-show_entries",
        "stream=nb_read_packets",
        "-of",
        "csv=p=0",
    ]
    .into_iter()
    .map(OsString::from)
    .collect();
    args.push(input_path.as_os_str().to_os_string());
    args
}

/// Parses ffprobe's `bit_rate` value (bits per second) into kb/s.
pub fn parse_bitrate_kbps(stdout: &str) -> Option<u64> {
    stdout.trim().parse::<u64>().ok().map(|bps| bps / 1000)
}

/// Returns the codec name, or `None` when ffprobe printed nothing.
pub fn parse_codec(stdout: &str) -> Option<String> {
    let codec = stdout.trim();
    (!codec.is_empty()).then(|| codec.to_string())
}

/// Parses the packet count printed with `csv=p=0`.
pub fn parse_frame_total(stdout: &str) -> FrameTotal {
    stdout
        .trim()
        .trim_end_matches(',')
        .parse::<i64>()
        .map_or(FrameTotal::Unknown, FrameTotal::from_count)
}
