//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the PSNR comparison run.
/// Validates both inputs, prints the stream header and runs ffmpeg.
pub mod psnr;
