// konverty-core/tests/progress_reporter_tests.rs
//
// The progress reporter is process-global, so everything that installs one
// lives in this single test.

#![cfg(unix)]

mod common;

use common::{FixedProbe, PSNR_LINE, ScriptedSpawner, progress_line};
use konverty_core::config::CoreConfig;
use konverty_core::metrics::ProgressUpdate;
use konverty_core::progress_reporting::{self, OutputLevel, ProgressReporter};
use konverty_core::quality::measure_psnr;
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Recorded {
    updates: Vec<ProgressUpdate>,
    messages: Vec<(OutputLevel, String)>,
    status: Vec<(String, String)>,
    clears: usize,
}

struct RecordingReporter(Arc<Mutex<Recorded>>);

impl ProgressReporter for RecordingReporter {
    fn output(&self, level: OutputLevel, text: &str) {
        self.0.lock().unwrap().messages.push((level, text.to_string()));
    }

    fn output_status(&self, label: &str, value: &str, _highlight: bool) {
        self.0
            .lock()
            .unwrap()
            .status
            .push((label.to_string(), value.to_string()));
    }

    fn quality_progress(&self, update: &ProgressUpdate) {
        self.0.lock().unwrap().updates.push(update.clone());
    }

    fn clear_progress(&self) {
        self.0.lock().unwrap().clears += 1;
    }
}

fn stream() -> String {
    format!(
        "{}\r{}\r{PSNR_LINE}\n",
        progress_line(50, "00:00:02.00"),
        progress_line(200, "00:00:08.00")
    )
}

#[test]
fn test_progress_reaches_reporter_with_and_without_frame_total() {
    let recorded = Arc::new(Mutex::new(Recorded::default()));
    progress_reporting::set_progress_reporter(Box::new(RecordingReporter(recorded.clone())));

    // Known total: percentages are computed against the probed frame count
    let spawner = ScriptedSpawner::new(stream(), 0);
    measure_psnr(
        &spawner,
        &FixedProbe::with_frames(200),
        &CoreConfig::default(),
        Path::new("orig.mkv"),
        Path::new("out.mkv"),
    )
    .unwrap();

    {
        let rec = recorded.lock().unwrap();
        let percentages: Vec<_> = rec.updates.iter().map(|u| u.percentage).collect();
        assert_eq!(percentages, vec![Some(25.0), Some(100.0)]);
        assert_eq!(rec.updates[0].sample.frame, 50);
        assert_eq!(rec.updates[0].sample.time, "00:00:02.00");
        assert!(rec.status.contains(&("Total frames".to_string(), "200".to_string())));
        assert_eq!(rec.clears, 1);
        assert!(
            rec.messages
                .iter()
                .any(|(level, text)| *level == OutputLevel::Debug && text.contains("-lavfi psnr")),
            "command line should be reported"
        );
    }

    *recorded.lock().unwrap() = Recorded::default();

    // Unknown total: progress is still reported, without percentages
    let spawner = ScriptedSpawner::new(stream(), 0);
    measure_psnr(
        &spawner,
        &FixedProbe::default(),
        &CoreConfig::default(),
        Path::new("missing.mkv"),
        Path::new("out.mkv"),
    )
    .unwrap();

    let rec = recorded.lock().unwrap();
    assert_eq!(rec.updates.len(), 2);
    assert!(rec.updates.iter().all(|u| u.percentage.is_none()));
    assert!(
        rec.messages
            .iter()
            .any(|(level, _)| *level == OutputLevel::Warning),
        "unknown frame total should be reported as a warning"
    );
}
