use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Logger, Root},
    encode::pattern::PatternEncoder,
};
use std::path::{Path, PathBuf};

/// Name of the log file for a run started at `timestamp` (`YYYYMMDD_HHMMSS`).
pub fn log_file_name(log_dir: &Path, timestamp: &str) -> PathBuf {
    log_dir.join(format!("konverty_psnr_{timestamp}.log"))
}

pub fn setup_file_logging(log_file: &Path, log_level: LevelFilter) -> Result<()> {
    // Create log directory if it doesn't exist
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {m}{n}",
        )))
        .build(log_file)?;

    // Raw ffmpeg diagnostics are only interesting at the most verbose level
    let ffmpeg_level = if log_level >= LevelFilter::Debug {
        LevelFilter::Trace
    } else {
        LevelFilter::Off
    };

    let config = Config::builder()
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .logger(
            Logger::builder()
                .appender("file")
                .additive(false)
                .build("ffmpeg_log", ffmpeg_level),
        )
        .build(Root::builder().appender("file").build(log_level))?;

    log4rs::init_config(config)?;

    Ok(())
}
