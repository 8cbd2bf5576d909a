// ============================================================================
// konverty-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module wraps the two external programs konverty drives. ffmpeg runs
// the PSNR comparison and is reached through the FfmpegSpawner seam so tests
// can script its stderr. ffprobe answers the advisory stream queries used for
// the header and the progress percentage.
//
// KEY COMPONENTS:
// - PsnrCommandBuilder: the fixed dual-input ffmpeg command line
// - FfmpegSpawner / FfmpegProcess: process abstraction over ffmpeg-sidecar
// - FfprobeExecutor: audio stream and frame-total probes

// ============================================================================
// SUBMODULES
// ============================================================================

/// Builds the ffmpeg command line for a PSNR run
pub mod ffmpeg_builder;

/// Contains traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Contains traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

// ============================================================================
// RE-EXPORTS
// ============================================================================

// ----- FFmpeg Command -----
pub use ffmpeg_builder::{PsnrCommandBuilder, command_args};

// ----- FFmpeg Execution -----
pub use ffmpeg_executor::{FFMPEG, FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};

// ----- FFprobe Execution -----
pub use ffprobe_executor::{AudioStreamInfo, CommandFfprobeExecutor, FFPROBE, FfprobeExecutor};
