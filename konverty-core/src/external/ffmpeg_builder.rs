//! FFmpeg command builder for PSNR runs
//!
//! The stderr parser depends on the exact text ffmpeg produces with these
//! options, so the arguments from the first `-i` on are always:
//!
//! ```text
//! -i ORIG -i PROCESSED -v info -stats -stats_period 0.1 -lavfi psnr -f null -
//! ```
//!
//! `FfmpegCommand::new_with_path` prepends its own default arguments,
//! including a log level, ahead of the first input. The later `-v info`
//! overrides that level.

use crate::config::DEFAULT_STATS_PERIOD;

use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::{Path, PathBuf};

/// Builder for the dual-input PSNR command
pub struct PsnrCommandBuilder {
    ffmpeg_path: PathBuf,
    stats_period: f64,
}

impl PsnrCommandBuilder {
    /// Creates a builder for the given ffmpeg executable
    #[must_use]
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            stats_period: DEFAULT_STATS_PERIOD,
        }
    }

    /// Sets the `-stats_period` interval in seconds
    #[must_use]
    pub fn with_stats_period(mut self, seconds: f64) -> Self {
        self.stats_period = seconds;
        self
    }

    /// Builds the command comparing `processed` against `original`.
    #[must_use]
    pub fn build(self, original: &Path, processed: &Path) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new_with_path(&self.ffmpeg_path);
        cmd.input(original.to_string_lossy());
        cmd.input(processed.to_string_lossy());

        let period = self.stats_period.to_string();
        cmd.args(["-v", "info", "-stats", "-stats_period", period.as_str()]);
        cmd.args(["-lavfi", "psnr"]);
        cmd.args(["-f", "null"]);
        cmd.output("-");
        cmd
    }
}

/// Returns the arguments of `cmd` (without the program) as strings.
#[must_use]
pub fn command_args(cmd: &FfmpegCommand) -> Vec<String> {
    cmd.get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Arguments from the first `-i` on, skipping anything the sidecar adds.
    fn template_args(cmd: &FfmpegCommand) -> Vec<String> {
        let args = command_args(cmd);
        let start = args.iter().position(|a| a == "-i").expect("no input argument");
        args[start..].to_vec()
    }

    #[test]
    fn test_psnr_command_layout() {
        let cmd = PsnrCommandBuilder::new("ffmpeg")
            .build(Path::new("orig.mkv"), Path::new("out.mkv"));
        assert_eq!(
            template_args(&cmd),
            vec![
                "-i", "orig.mkv", "-i", "out.mkv", "-v", "info", "-stats", "-stats_period",
                "0.1", "-lavfi", "psnr", "-f", "null", "-",
            ]
        );
    }

    #[test]
    fn test_psnr_command_custom_stats_period() {
        let cmd = PsnrCommandBuilder::new("/opt/ffmpeg")
            .with_stats_period(0.5)
            .build(Path::new("a.mp4"), Path::new("b.mp4"));
        let args = template_args(&cmd);
        let idx = args.iter().position(|a| a == "-stats_period").expect("stats_period missing");
        assert_eq!(args[idx + 1], "0.5");
    }
}
