//! Metric accumulation for a single PSNR run.
//!
//! The [`MetricAccumulator`] is owned by the thread draining ffmpeg's stderr.
//! It turns classified lines into progress updates for the reporter and keeps
//! the last complete PSNR summary. Once the stream ends it is consumed into an
//! immutable [`QualitySummary`].

use crate::parsing::{ProgressSample, PsnrValues, classify};
use crate::progress_reporting;

use serde::Serialize;
use std::collections::VecDeque;

/// Final PSNR values of a run.
///
/// `found == false` (with all values zero) means no summary was captured.
/// A genuine 0 dB result is only distinguishable through `found`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct QualitySummary {
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub found: bool,
}

impl QualitySummary {
    fn commit(&mut self, values: PsnrValues) {
        self.average = values.average;
        self.min = values.min;
        self.max = values.max;
        self.found = true;
    }
}

/// Expected number of frames, used only for percentage display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameTotal {
    Known(u64),
    #[default]
    Unknown,
}

impl FrameTotal {
    /// Maps a raw probe value; zero and negative counts are unknown.
    pub fn from_count(count: i64) -> Self {
        if count > 0 {
            FrameTotal::Known(count as u64)
        } else {
            FrameTotal::Unknown
        }
    }

    pub fn known(self) -> Option<u64> {
        match self {
            FrameTotal::Known(total) => Some(total),
            FrameTotal::Unknown => None,
        }
    }
}

/// A progress sample paired with its completion percentage, when computable.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub sample: ProgressSample,
    pub frame_total: FrameTotal,
    pub percentage: Option<f64>,
}

impl ProgressUpdate {
    pub fn new(sample: ProgressSample, frame_total: FrameTotal) -> Self {
        let percentage = frame_total
            .known()
            .map(|total| 100.0 * sample.frame as f64 / total as f64);
        Self {
            sample,
            frame_total,
            percentage,
        }
    }
}

/// Accumulates progress and the PSNR summary while ffmpeg runs.
#[derive(Debug)]
pub struct MetricAccumulator {
    frame_total: FrameTotal,
    summary: QualitySummary,
    lines_seen: usize,
    progress_updates: usize,
    tail: VecDeque<String>,
    tail_capacity: usize,
}

impl MetricAccumulator {
    pub fn new(frame_total: FrameTotal, tail_capacity: usize) -> Self {
        Self {
            frame_total,
            summary: QualitySummary::default(),
            lines_seen: 0,
            progress_updates: 0,
            tail: VecDeque::with_capacity(tail_capacity),
            tail_capacity,
        }
    }

    /// Classifies one framed line and dispatches it. Empty lines are ignored.
    pub fn on_line(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.lines_seen += 1;

        let kind = classify(line);
        if let Some(sample) = kind.progress() {
            self.on_progress(sample.clone());
        }
        if let Some(values) = kind.summary() {
            self.on_summary(*values);
        }
        if kind.is_unmatched() {
            log::trace!(target: "ffmpeg_log", "{}", line.trim());
            self.remember(line.trim());
        }
    }

    /// Builds the update for `sample` and forwards it to the reporter.
    pub fn on_progress(&mut self, sample: ProgressSample) -> ProgressUpdate {
        let update = ProgressUpdate::new(sample, self.frame_total);
        self.progress_updates += 1;
        progress_reporting::quality_progress(&update);
        update
    }

    /// Commits a fully parsed summary; a later one replaces an earlier one.
    pub fn on_summary(&mut self, values: PsnrValues) {
        if self.summary.found {
            log::debug!("Replacing earlier PSNR summary {:?} with {:?}", self.summary, values);
        }
        self.summary.commit(values);
    }

    pub fn summary(&self) -> QualitySummary {
        self.summary
    }

    /// Consumes the accumulator once the stream has ended.
    pub fn finish(self) -> QualitySummary {
        log::debug!(
            "Stream ended after {} lines ({} progress updates)",
            self.lines_seen,
            self.progress_updates
        );
        self.summary
    }

    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    pub fn progress_updates(&self) -> usize {
        self.progress_updates
    }

    /// The most recent unmatched diagnostic lines, oldest first.
    pub fn stderr_tail(&self) -> Vec<String> {
        self.tail.iter().cloned().collect()
    }

    fn remember(&mut self, line: &str) {
        if self.tail_capacity == 0 {
            return;
        }
        if self.tail.len() == self.tail_capacity {
            self.tail.pop_front();
        }
        self.tail.push_back(line.to_string());
    }
}
