//! Configuration structures and constants for the konverty-core library.
//!
//! This module provides the configuration for how the external tools are
//! located and invoked, and how much diagnostic output is retained.

mod builder;

use crate::error::{CoreError, CoreResult};

use std::path::PathBuf;

pub use builder::CoreConfigBuilder;

// Default constants

/// Default ffmpeg executable, resolved through `PATH`.
pub const DEFAULT_FFMPEG_PATH: &str = "ffmpeg";

/// Default ffprobe executable, resolved through `PATH`.
pub const DEFAULT_FFPROBE_PATH: &str = "ffprobe";

/// Interval in seconds between ffmpeg stats lines (`-stats_period`).
/// Small values keep the progress display responsive.
pub const DEFAULT_STATS_PERIOD: f64 = 0.1;

/// Number of unmatched stderr lines kept for error reports.
pub const DEFAULT_STDERR_TAIL_LINES: usize = 20;

/// Main configuration structure for the konverty-core library.
///
/// Created by the consumer of the library (e.g., konverty-cli) and passed to
/// [`crate::quality::measure_psnr`]. All fields have sensible defaults.
///
/// # Examples
///
/// ```rust
/// use konverty_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
///     .stats_period(0.5)
///     .build();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// ffmpeg executable used for the quality run
    pub ffmpeg_path: PathBuf,

    /// ffprobe executable used for stream and frame-count probes
    pub ffprobe_path: PathBuf,

    /// Seconds between ffmpeg stats lines
    pub stats_period: f64,

    /// How many unmatched stderr lines a failed run reports
    pub stderr_tail_lines: usize,

    /// Whether to probe the frame total for percentage progress.
    /// When false, progress shows frame counts only.
    pub probe_frame_total: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG_PATH),
            ffprobe_path: PathBuf::from(DEFAULT_FFPROBE_PATH),
            stats_period: DEFAULT_STATS_PERIOD,
            stderr_tail_lines: DEFAULT_STDERR_TAIL_LINES,
            probe_frame_total: true,
        }
    }
}

impl CoreConfig {
    /// Checks the configuration for values ffmpeg would reject or that make
    /// error reports useless.
    pub fn validate(&self) -> CoreResult<()> {
        if self.ffmpeg_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffmpeg path must not be empty".to_string()));
        }
        if self.ffprobe_path.as_os_str().is_empty() {
            return Err(CoreError::Config("ffprobe path must not be empty".to_string()));
        }
        if !self.stats_period.is_finite() || self.stats_period <= 0.0 {
            return Err(CoreError::Config(format!(
                "stats period must be a positive number of seconds, got {}",
                self.stats_period
            )));
        }
        if self.stderr_tail_lines == 0 {
            return Err(CoreError::Config(
                "stderr tail must keep at least one line".to_string(),
            ));
        }
        Ok(())
    }
}
