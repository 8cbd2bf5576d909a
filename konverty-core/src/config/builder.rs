// ============================================================================
// konverty-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig. Every field starts at its default, so
// callers only name what they override.

// ---- Standard library imports ----
use std::path::PathBuf;

// ---- Internal crate imports ----
use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use konverty_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .ffprobe_path("/usr/local/bin/ffprobe")
///     .probe_frame_total(false)
///     .build();
/// assert!(!config.probe_frame_total);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new CoreConfigBuilder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the ffmpeg executable.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffmpeg_path = path.into();
        self
    }

    /// Sets the ffprobe executable.
    pub fn ffprobe_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.ffprobe_path = path.into();
        self
    }

    /// Sets the interval between ffmpeg stats lines, in seconds.
    pub fn stats_period(mut self, seconds: f64) -> Self {
        self.config.stats_period = seconds;
        self
    }

    /// Sets how many unmatched stderr lines are kept for error reports.
    pub fn stderr_tail_lines(mut self, lines: usize) -> Self {
        self.config.stderr_tail_lines = lines;
        self
    }

    /// Enables or disables the frame-total probe.
    pub fn probe_frame_total(mut self, enable: bool) -> Self {
        self.config.probe_frame_total = enable;
        self
    }

    /// Builds the CoreConfig. Call [`CoreConfig::validate`] before use.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_only_named_fields() {
        let config = CoreConfigBuilder::new()
            .ffmpeg_path("/opt/ffmpeg")
            .stderr_tail_lines(5)
            .build();
        assert_eq!(config.ffmpeg_path, PathBuf::from("/opt/ffmpeg"));
        assert_eq!(config.stderr_tail_lines, 5);
        assert_eq!(config.ffprobe_path, PathBuf::from(super::super::DEFAULT_FFPROBE_PATH));
        assert!(config.probe_frame_total);
    }
}
