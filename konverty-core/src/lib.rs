//! Core library for measuring video quality with ffmpeg's PSNR filter.
//!
//! This crate spawns ffmpeg on two inputs, parses its stderr while it runs,
//! reports progress through a pluggable reporter and returns the final
//! average/min/max PSNR values.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use konverty_core::config::CoreConfigBuilder;
//! use konverty_core::external::{CommandFfprobeExecutor, SidecarSpawner};
//! use konverty_core::measure_psnr;
//! use std::path::Path;
//!
//! let config = CoreConfigBuilder::new()
//!     .ffmpeg_path("/usr/local/bin/ffmpeg")
//!     .build();
//! config.validate().unwrap();
//!
//! let prober = CommandFfprobeExecutor::from_config(&config);
//! let summary = measure_psnr(
//!     &SidecarSpawner,
//!     &prober,
//!     &config,
//!     Path::new("/path/to/original.mkv"),
//!     Path::new("/path/to/encoded.mkv"),
//! ).unwrap();
//!
//! println!("Average: {:.6} dB", summary.average);
//! ```

pub mod config;
pub mod error;
pub mod external;
pub mod file_logging;
pub mod metrics;
pub mod parsing;
pub mod progress_reporting;
pub mod quality;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use metrics::{FrameTotal, MetricAccumulator, ProgressUpdate, QualitySummary};
pub use parsing::{LineFramer, LineKind, ProgressSample, PsnrValues, classify};
pub use quality::{measure_psnr, reconcile, run_psnr};
pub use utils::{ensure_input_file, format_bytes, parse_ffmpeg_time};
