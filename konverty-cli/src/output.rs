// konverty-cli/src/output.rs
//
// Formatting of the input header and the final PSNR statistics.

use konverty_core::external::FfprobeExecutor;
use konverty_core::metrics::QualitySummary;
use konverty_core::progress_reporting;
use konverty_core::{format_bytes, utils::get_filename_safe};

use serde::{Serialize, Serializer};
use std::path::Path;

/// Sentinel shown for a probe that produced no value.
pub const MISSING_VALUE: &str = "-1";

/// Prints `Orig file`, `Processed file` and the audio stream of each input.
pub fn print_input_header<P: FfprobeExecutor + ?Sized>(prober: &P, original: &Path, processed: &Path) {
    for (label, path) in [("Orig file", original), ("Processed file", processed)] {
        progress_reporting::status(label, &path.display().to_string(), true);

        if let Ok(meta) = std::fs::metadata(path) {
            progress_reporting::status("  Size", &format_bytes(meta.len()), false);
        }

        let audio = prober.audio_stream_info(path);
        let bitrate = audio
            .bitrate_kbps
            .map_or_else(|| MISSING_VALUE.to_string(), |kbps| format!("{kbps}k"));
        let codec = audio.codec.unwrap_or_else(|| MISSING_VALUE.to_string());
        progress_reporting::status("  Audio", &format!("{codec} @ {bitrate}"), false);
    }
}

/// The `PSNR Statistics` block, six decimals per value.
pub fn format_summary(summary: &QualitySummary) -> String {
    format!(
        "PSNR Statistics:\n  Average: {:.6} dB\n  Min:     {:.6} dB\n  Max:     {:.6} dB",
        summary.average, summary.min, summary.max
    )
}

#[derive(Serialize)]
struct JsonReport {
    original: String,
    processed: String,
    #[serde(serialize_with = "db_value")]
    average: f64,
    #[serde(serialize_with = "db_value")]
    min: f64,
    #[serde(serialize_with = "db_value")]
    max: f64,
    found: bool,
}

/// JSON has no infinity; identical inputs report `inf`, so non-finite values
/// are written as the strings ffmpeg prints.
fn db_value<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else if value.is_nan() {
        serializer.serialize_str("nan")
    } else if value.is_sign_positive() {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

/// The summary as JSON, including the file names of both inputs.
pub fn format_summary_json(
    summary: &QualitySummary,
    original: &Path,
    processed: &Path,
) -> serde_json::Result<String> {
    let name = |p: &Path| get_filename_safe(p).unwrap_or_else(|_| p.display().to_string());
    serde_json::to_string_pretty(&JsonReport {
        original: name(original),
        processed: name(processed),
        average: summary.average,
        min: summary.min,
        max: summary.max,
        found: summary.found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> QualitySummary {
        QualitySummary {
            average: 39.8123451,
            min: 35.0,
            max: 44.0,
            found: true,
        }
    }

    #[test]
    fn summary_block_uses_six_decimals() {
        assert_eq!(
            format_summary(&summary()),
            "PSNR Statistics:\n  Average: 39.812345 dB\n  Min:     35.000000 dB\n  Max:     44.000000 dB"
        );
    }

    #[test]
    fn json_report_flattens_summary() {
        let json = format_summary_json(&summary(), Path::new("/v/orig.mkv"), Path::new("out.mkv")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["original"], "orig.mkv");
        assert_eq!(value["processed"], "out.mkv");
        assert_eq!(value["min"], 35.0);
        assert_eq!(value["found"], true);
    }

    #[test]
    fn json_report_keeps_infinite_psnr() {
        let identical = QualitySummary {
            average: f64::INFINITY,
            min: f64::INFINITY,
            max: f64::INFINITY,
            found: true,
        };
        let json = format_summary_json(&identical, Path::new("a.mkv"), Path::new("a.mkv")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["average"], "inf");
        assert_eq!(value["min"], "inf");
        assert_eq!(value["max"], "inf");
        assert_eq!(value["found"], true);
    }

    #[test]
    fn json_report_mixes_finite_and_infinite_values() {
        let partial = QualitySummary {
            average: 61.5,
            min: 48.25,
            max: f64::INFINITY,
            found: true,
        };
        let json = format_summary_json(&partial, Path::new("a.mkv"), Path::new("b.mkv")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["average"], 61.5);
        assert_eq!(value["min"], 48.25);
        assert_eq!(value["max"], "inf");
    }
}
