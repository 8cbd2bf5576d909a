//! Parsing of ffmpeg's diagnostic output.
//!
//! [`framer`] turns the raw stderr byte stream into logical lines and
//! [`classifier`] extracts progress samples and the PSNR summary from them.
//! Neither performs any output.

pub mod classifier;
pub mod framer;

pub use classifier::{LineKind, ProgressSample, PsnrValues, classify};
pub use framer::LineFramer;
