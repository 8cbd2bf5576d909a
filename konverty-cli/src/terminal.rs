// ============================================================================
// konverty-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: Reporter implementation for the CLI
//
// TerminalReporter is installed as konverty-core's global progress reporter.
// Messages are printed as styled lines; ffmpeg progress is drawn with an
// indicatif bar when the frame total is known and a spinner otherwise.
//
// KEY COMPONENTS:
// - styling: Symbols and layout constants
// - TerminalReporter: ProgressReporter backed by console + indicatif
// - progress_message: Text shown next to the bar or spinner

use konverty_core::metrics::{FrameTotal, ProgressUpdate};
use konverty_core::progress_reporting::{OutputLevel, ProgressReporter};

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const PROCESSING_SYMBOL: &str = "»";
    pub const ERROR_SYMBOL: &str = "✗";
    pub const WARNING_SYMBOL: &str = "!";

    pub const STATUS_INDENT: &str = "  ";
    pub const STATUS_LABEL_WIDTH: usize = 15;

    pub const PROGRESS_CHARS: &str = "##.";
}

/// Human-friendly reporter for interactive use.
pub struct TerminalReporter {
    progress: Mutex<Option<ProgressBar>>,
    /// Route reporter lines to stderr (keeps stdout clean for `--json`)
    to_stderr: bool,
    verbose: bool,
}

impl TerminalReporter {
    pub fn new(to_stderr: bool, verbose: bool) -> Self {
        Self {
            progress: Mutex::new(None),
            to_stderr,
            verbose,
        }
    }

    fn emit(&self, line: &str) {
        // Print above an active bar instead of tearing through it
        if let Ok(guard) = self.progress.lock() {
            if let Some(pb) = guard.as_ref() {
                pb.suspend(|| self.write_line(line));
                return;
            }
        }
        self.write_line(line);
    }

    fn write_line(&self, line: &str) {
        if self.to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn start_progress(&self, frame_total: FrameTotal) -> ProgressBar {
        let pb = match frame_total {
            FrameTotal::Known(total) => {
                let pb = ProgressBar::new(total);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("  {spinner} [{bar:30}] {percent:>3}% {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars(styling::PROGRESS_CHARS),
                );
                pb
            }
            FrameTotal::Unknown => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("  {spinner} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                pb
            }
        };

        if !std::io::stderr().is_terminal() {
            pb.set_draw_target(ProgressDrawTarget::hidden());
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}

impl ProgressReporter for TerminalReporter {
    fn output(&self, level: OutputLevel, text: &str) {
        let line = match level {
            OutputLevel::Section => format!("\n{}", style(text.to_uppercase()).bold().cyan()),
            OutputLevel::Processing => format!("{} {text}", style(styling::PROCESSING_SYMBOL).magenta()),
            OutputLevel::Success => format!("{}{} {text}", styling::STATUS_INDENT, styling::SUCCESS_SYMBOL),
            OutputLevel::Error => format!("{} {}", styling::ERROR_SYMBOL, style(text).red().bold()),
            OutputLevel::Warning => format!("{} {}", style(styling::WARNING_SYMBOL).yellow().bold(), style(text).yellow()),
            OutputLevel::Debug => {
                if !self.verbose {
                    return;
                }
                format!("{}{}", styling::STATUS_INDENT, style(text).dim())
            }
            OutputLevel::Info => text.to_string(),
        };
        self.emit(&line);
    }

    fn output_status(&self, label: &str, value: &str, highlight: bool) {
        let label = format!("{label}:");
        let value = if highlight {
            style(value).bold().to_string()
        } else {
            value.to_string()
        };
        self.emit(&format!(
            "{}{:<width$} {value}",
            styling::STATUS_INDENT,
            label,
            width = styling::STATUS_LABEL_WIDTH
        ));
    }

    fn quality_progress(&self, update: &ProgressUpdate) {
        let Ok(mut guard) = self.progress.lock() else {
            return;
        };
        let pb = guard.get_or_insert_with(|| self.start_progress(update.frame_total));

        if let Some(total) = update.frame_total.known() {
            // ffmpeg may count past the probed packet total
            pb.set_position(update.sample.frame.min(total));
        }
        pb.set_message(progress_message(update));
    }

    fn clear_progress(&self) {
        if let Ok(mut guard) = self.progress.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

/// Text shown next to the bar: frame position, timestamp, fps and speed.
pub fn progress_message(update: &ProgressUpdate) -> String {
    let sample = &update.sample;
    let frames = match (update.frame_total.known(), update.percentage) {
        (Some(total), Some(pct)) => format!("Frame: {}/{total} ({pct:.1}%)", sample.frame),
        _ => format!("Frame: {}", sample.frame),
    };
    format!(
        "{frames} | Time: {} | FPS: {} | Speed: {}x",
        sample.time, sample.fps, sample.speed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use konverty_core::parsing::ProgressSample;

    fn sample(frame: u64) -> ProgressSample {
        ProgressSample {
            frame,
            fps: 30.0,
            time: "00:00:01.66".to_string(),
            elapsed_secs: 1.66,
            speed: 1.5,
        }
    }

    #[test]
    fn message_with_known_total() {
        let update = ProgressUpdate::new(sample(50), FrameTotal::Known(200));
        assert_eq!(
            progress_message(&update),
            "Frame: 50/200 (25.0%) | Time: 00:00:01.66 | FPS: 30 | Speed: 1.5x"
        );
    }

    #[test]
    fn message_without_total() {
        let update = ProgressUpdate::new(sample(50), FrameTotal::Unknown);
        assert_eq!(
            progress_message(&update),
            "Frame: 50 | Time: 00:00:01.66 | FPS: 30 | Speed: 1.5x"
        );
    }

    #[test]
    fn progress_lifecycle_does_not_panic_without_terminal() {
        let reporter = TerminalReporter::new(true, false);
        reporter.quality_progress(&ProgressUpdate::new(sample(10), FrameTotal::Known(20)));
        reporter.quality_progress(&ProgressUpdate::new(sample(30), FrameTotal::Known(20)));
        reporter.clear_progress();
        assert!(reporter.progress.lock().unwrap().is_none());
    }
}
