//! PSNR quality measurement.
//!
//! Runs ffmpeg's `psnr` filter over two inputs, streams its stderr through
//! the line framer and classifier on a dedicated thread, and reconciles the
//! exit status with whatever summary was captured.
//!
//! ```rust,no_run
//! use konverty_core::config::CoreConfig;
//! use konverty_core::quality::run_psnr;
//! use std::path::Path;
//!
//! let summary = run_psnr(
//!     &CoreConfig::default(),
//!     Path::new("original.mkv"),
//!     Path::new("encoded.mkv"),
//! )?;
//! println!("average {:.6} dB", summary.average);
//! # Ok::<(), konverty_core::CoreError>(())
//! ```

use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_start_error};
use crate::external::{
    CommandFfprobeExecutor, FFMPEG, FfmpegProcess, FfmpegSpawner, FfprobeExecutor,
    PsnrCommandBuilder, SidecarSpawner, command_args,
};
use crate::metrics::{FrameTotal, MetricAccumulator, QualitySummary};
use crate::parsing::LineFramer;
use crate::progress_reporting;

use std::io::{self, Read};
use std::path::Path;
use std::process::ExitStatus;
use std::thread;

/// Measures the PSNR of `processed` against `original` with the default
/// ffmpeg spawner and ffprobe executor.
pub fn run_psnr(
    config: &CoreConfig,
    original: &Path,
    processed: &Path,
) -> CoreResult<QualitySummary> {
    let prober = CommandFfprobeExecutor::from_config(config);
    measure_psnr(&SidecarSpawner, &prober, config, original, processed)
}

/// Measures the PSNR of `processed` against `original`.
///
/// Progress updates are forwarded to the global progress reporter while
/// ffmpeg runs. The stderr reader thread is joined before the process is
/// waited on, so every line has been classified by the time the exit status
/// is reconciled.
///
/// # Errors
///
/// - [`CoreError::Config`] if `config` is invalid
/// - [`CoreError::CommandStart`] if ffmpeg cannot be started
/// - [`CoreError::ToolExecution`] if ffmpeg fails without a PSNR summary
/// - [`CoreError::NoMetricsFound`] if ffmpeg succeeds without a PSNR summary
/// - [`CoreError::DrainTask`] if the stderr reader panics
pub fn measure_psnr<S, P>(
    spawner: &S,
    prober: &P,
    config: &CoreConfig,
    original: &Path,
    processed: &Path,
) -> CoreResult<QualitySummary>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor + ?Sized,
{
    config.validate()?;

    log::info!(
        "Measuring PSNR: original={}, processed={}",
        original.display(),
        processed.display()
    );

    let frame_total = probe_frame_total(prober, config, original);

    let cmd = PsnrCommandBuilder::new(&config.ffmpeg_path)
        .with_stats_period(config.stats_period)
        .build(original, processed);
    let args = command_args(&cmd);
    log::debug!("FFmpeg command: {} {}", config.ffmpeg_path.display(), args.join(" "));
    progress_reporting::tool_command(FFMPEG, &args);

    let mut process = spawner.spawn(cmd)?;

    let Some(stderr) = process.take_stderr() else {
        reap(&mut process);
        return Err(command_start_error(
            FFMPEG,
            io::Error::other("stderr was not captured"),
        ));
    };

    let tail_lines = config.stderr_tail_lines;
    let drain_handle = match thread::Builder::new()
        .name("ffmpeg-stderr".to_string())
        .spawn(move || drain(stderr, MetricAccumulator::new(frame_total, tail_lines)))
    {
        Ok(handle) => handle,
        Err(e) => {
            log::error!("Failed to start stderr reader thread: {e}");
            reap(&mut process);
            return Err(CoreError::Io(e));
        }
    };

    // Reader first: it only returns at end of stream, which ffmpeg closes on exit
    let drained = drain_handle.join();
    let status = process.wait();
    progress_reporting::clear_progress();

    let accumulator = drained.map_err(|_| {
        log::error!("stderr reader thread for {FFMPEG} panicked");
        CoreError::DrainTask(FFMPEG.to_string())
    })?;
    let status = status?;

    let stderr_tail = accumulator.stderr_tail();
    let summary = accumulator.finish();
    reconcile(FFMPEG, status, summary, stderr_tail)
}

/// Feeds every line of `reader` to `accumulator` until end of stream.
pub fn drain<R: Read>(reader: R, mut accumulator: MetricAccumulator) -> MetricAccumulator {
    for line in LineFramer::new(reader) {
        accumulator.on_line(&line);
    }
    accumulator
}

/// Combines the exit status with the captured summary.
///
/// A captured summary wins over a failed exit status: ffmpeg can report an
/// error after the filter has already printed its final statistics.
pub fn reconcile(
    tool: &str,
    status: ExitStatus,
    summary: QualitySummary,
    stderr_tail: Vec<String>,
) -> CoreResult<QualitySummary> {
    match (status.success(), summary.found) {
        (_, true) => {
            if !status.success() {
                log::debug!("{tool} exited with {status} after reporting PSNR; using the summary");
            }
            log::info!(
                "PSNR average {:.6} dB (min {:.6}, max {:.6})",
                summary.average,
                summary.min,
                summary.max
            );
            Ok(summary)
        }
        (false, false) => {
            log::error!("{tool} exited with {status} without a PSNR summary");
            for line in &stderr_tail {
                log::error!("  {line}");
            }
            Err(CoreError::ToolExecution {
                tool: tool.to_string(),
                status,
                summary,
                stderr_tail,
            })
        }
        (true, false) => {
            log::warn!("{tool} succeeded but printed no PSNR summary");
            Err(CoreError::NoMetricsFound {
                tool: tool.to_string(),
                summary,
            })
        }
    }
}

fn probe_frame_total<P: FfprobeExecutor + ?Sized>(
    prober: &P,
    config: &CoreConfig,
    original: &Path,
) -> FrameTotal {
    if !config.probe_frame_total {
        log::debug!("Frame-total probe disabled");
        return FrameTotal::Unknown;
    }

    let total = prober.frame_total(original);
    match total {
        FrameTotal::Known(frames) => {
            progress_reporting::status("Total frames", &frames.to_string(), false);
        }
        FrameTotal::Unknown => {
            progress_reporting::warning(
                "Could not determine the total frame count; progress shows frames only",
            );
        }
    }
    total
}

fn reap<P: FfmpegProcess>(process: &mut P) {
    if let Err(e) = process.wait() {
        log::debug!("Failed to reap {FFMPEG} after an aborted start: {e}");
    }
}
