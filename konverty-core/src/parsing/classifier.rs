//! Classification of single ffmpeg stderr lines.
//!
//! Two shapes are recognised:
//!
//! ```text
//! frame=  195 fps=189 q=-0.0 size=N/A time=00:00:06.50 bitrate=N/A speed=6.31x
//! [Parsed_psnr_0 @ 0x...] PSNR y:46.67 u:48.94 v:48.84 average:47.29 min:44.86 max:51.90
//! ```
//!
//! Every field of a shape is mandatory. A field that matches the pattern but
//! fails numeric parsing turns the whole shape into a non-match.

use crate::utils::parse_ffmpeg_time;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;

static PROGRESS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"frame=\s*(\d+)\s+fps=\s*([\d.]+).*?time=(\d{2}:\d{2}:\d{2}\.\d{2}).*?speed=\s*([\d.]+)x",
    )
    .expect("Invalid progress Regex")
});

// ffmpeg reports `inf` for identical inputs.
static PSNR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"PSNR.*?average:(inf|[\d.]+).*?min:(inf|[\d.]+).*?max:(inf|[\d.]+)")
        .expect("Invalid PSNR Regex")
});

/// One parsed ffmpeg stats line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSample {
    pub frame: u64,
    pub fps: f64,
    /// Timestamp exactly as printed, `HH:MM:SS.cc`.
    pub time: String,
    pub elapsed_secs: f64,
    pub speed: f64,
}

/// The three values of a PSNR summary line, in dB.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PsnrValues {
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Result of classifying one line. Both shapes may appear on the same line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    Progress(ProgressSample),
    Summary(PsnrValues),
    Both(ProgressSample, PsnrValues),
    Unmatched,
}

impl LineKind {
    pub fn progress(&self) -> Option<&ProgressSample> {
        match self {
            LineKind::Progress(sample) | LineKind::Both(sample, _) => Some(sample),
            _ => None,
        }
    }

    pub fn summary(&self) -> Option<&PsnrValues> {
        match self {
            LineKind::Summary(values) | LineKind::Both(_, values) => Some(values),
            _ => None,
        }
    }

    pub fn is_unmatched(&self) -> bool {
        matches!(self, LineKind::Unmatched)
    }
}

/// Classifies a single line of ffmpeg stderr.
pub fn classify(line: &str) -> LineKind {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Unmatched;
    }

    match (parse_progress(line), parse_psnr(line)) {
        (Some(sample), Some(values)) => LineKind::Both(sample, values),
        (Some(sample), None) => LineKind::Progress(sample),
        (None, Some(values)) => LineKind::Summary(values),
        (None, None) => LineKind::Unmatched,
    }
}

fn parse_progress(line: &str) -> Option<ProgressSample> {
    let caps = PROGRESS_REGEX.captures(line)?;
    let time = caps[3].to_string();
    Some(ProgressSample {
        frame: caps[1].parse().ok()?,
        fps: caps[2].parse().ok()?,
        elapsed_secs: parse_ffmpeg_time(&time)?,
        time,
        speed: caps[4].parse().ok()?,
    })
}

fn parse_psnr(line: &str) -> Option<PsnrValues> {
    let caps = PSNR_REGEX.captures(line)?;
    Some(PsnrValues {
        average: parse_db(&caps, 1)?,
        min: parse_db(&caps, 2)?,
        max: parse_db(&caps, 3)?,
    })
}

fn parse_db(caps: &Captures<'_>, index: usize) -> Option<f64> {
    caps.get(index)?.as_str().parse().ok()
}
