//! Implementation of the PSNR comparison.
//!
//! Validates both inputs before any subprocess starts, prints the input
//! header, then delegates the measurement to konverty-core.

use crate::cli::Cli;
use crate::error::CliResult;
use crate::output;

use konverty_core::config::{CoreConfig, CoreConfigBuilder};
use konverty_core::external::{FfmpegSpawner, FfprobeExecutor};
use konverty_core::metrics::QualitySummary;
use konverty_core::{ensure_input_file, measure_psnr, progress_reporting};

use log::debug;
use std::path::PathBuf;

/// Inputs of a PSNR run after path validation.
#[derive(Debug, Clone)]
pub struct PsnrInputs {
    pub original: PathBuf,
    pub processed: PathBuf,
}

/// Checks both input paths. The original is checked first.
pub fn validate_inputs(args: &Cli) -> CliResult<PsnrInputs> {
    Ok(PsnrInputs {
        original: ensure_input_file(&args.input)?,
        processed: ensure_input_file(&args.input2)?,
    })
}

/// Builds the core configuration from the command line.
pub fn build_config(args: &Cli) -> CliResult<CoreConfig> {
    let config = CoreConfigBuilder::new()
        .ffmpeg_path(&args.ffmpeg)
        .ffprobe_path(&args.ffprobe)
        .probe_frame_total(!args.no_frame_count)
        .build();
    config.validate()?;
    debug!("Core configuration: {config:?}");
    Ok(config)
}

/// Runs a full comparison and returns the summary.
pub fn run_comparison<S, P>(
    spawner: &S,
    prober: &P,
    args: &Cli,
) -> CliResult<QualitySummary>
where
    S: FfmpegSpawner,
    P: FfprobeExecutor,
{
    let inputs = validate_inputs(args)?;
    let config = build_config(args)?;

    progress_reporting::section("Inputs");
    output::print_input_header(prober, &inputs.original, &inputs.processed);

    progress_reporting::section("PSNR");
    progress_reporting::processing("Comparing processed file against original");
    let summary = measure_psnr(spawner, prober, &config, &inputs.original, &inputs.processed)?;
    progress_reporting::success("PSNR measurement complete");

    Ok(summary)
}
