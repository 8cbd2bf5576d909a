// ============================================================================
// konverty-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and File Logging for the CLI
//
// Console runs log through env_logger (RUST_LOG is honored on top of the
// level chosen by --verbose). With --log-dir the CLI switches to log4rs file
// logging from konverty-core instead, so terminal output stays limited to the
// reporter's lines and the progress bar.
//
// USAGE:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug or -v: Commands, probe details and stream statistics
// - RUST_LOG=ffmpeg_log=trace: Every unparsed ffmpeg stderr line

use konverty_core::file_logging::{log_file_name, setup_file_logging};
use konverty_core::{CoreError, CoreResult};
use log::LevelFilter;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes env_logger for console output.
pub fn init_console_logging(level: LevelFilter) {
    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let level_str = match record.level() {
                log::Level::Error => "ERROR",
                log::Level::Warn => "WARN ",
                log::Level::Info => "INFO ",
                log::Level::Debug => "DEBUG",
                log::Level::Trace => "TRACE",
            };
            let level_style = buf.default_level_style(record.level());
            writeln!(buf, "{level_style}{level_str}{level_style:#} {}", record.args())
        })
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {e}");
    }
}

/// Sets up logging for a run: a timestamped file under `log_dir` when given,
/// the console otherwise. Returns the log file path in the first case.
pub fn init_logging(log_dir: Option<&Path>, verbose: bool) -> CoreResult<Option<PathBuf>> {
    let level = level_for(verbose);

    let Some(dir) = log_dir else {
        init_console_logging(level);
        return Ok(None);
    };

    let log_path = log_file_name(dir, &get_timestamp());
    setup_file_logging(&log_path, level).map_err(|e| {
        CoreError::Config(format!(
            "Failed to set up file logging at {}: {e:#}",
            log_path.display()
        ))
    })?;
    log::info!("Logging to {}", log_path.display());
    Ok(Some(log_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_has_expected_shape() {
        let ts = get_timestamp();
        assert_eq!(ts.len(), 15);
        assert_eq!(ts.as_bytes()[8], b'_');
        assert!(ts.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn verbose_selects_debug() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }
}
