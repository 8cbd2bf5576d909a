//! Utility functions for formatting and path handling.
//!
//! General-purpose helpers used by the core library and the CLI: ffmpeg time
//! parsing, byte formatting and input path checks.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Formats bytes with appropriate binary units (B, KiB, MiB, GiB).
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    const GIB: f64 = MIB * 1024.0;

    let bytes_f64 = bytes as f64;
    if bytes_f64 >= GIB {
        format!("{:.2} GiB", bytes_f64 / GIB)
    } else if bytes_f64 >= MIB {
        format!("{:.2} MiB", bytes_f64 / MIB)
    } else if bytes_f64 >= KIB {
        format!("{:.2} KiB", bytes_f64 / KIB)
    } else {
        format!("{bytes} B")
    }
}

/// Parses FFmpeg time string (HH:MM:SS.MS) to seconds. Returns None if invalid.
#[must_use]
pub fn parse_ffmpeg_time(time: &str) -> Option<f64> {
    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() == 3 {
        let hours = parts[0].parse::<f64>().ok()?;
        let minutes = parts[1].parse::<f64>().ok()?;
        let seconds = parts[2].parse::<f64>().ok()?;
        Some(hours * 3600.0 + minutes * 60.0 + seconds)
    } else {
        None
    }
}

/// Safely extracts filename from a path with consistent error handling.
/// Returns the filename as a String, or an error if the path has no filename component.
pub fn get_filename_safe(path: &Path) -> CoreResult<String> {
    Ok(path.file_name()
        .ok_or_else(|| {
            CoreError::PathError(format!(
                "Failed to get filename for {}",
                path.display()
            ))
        })?
        .to_string_lossy()
        .to_string())
}

/// Checks that `path` names an existing regular file and returns it unchanged.
///
/// The path is not canonicalized: it is handed to ffmpeg exactly as given.
pub fn ensure_input_file(path: &Path) -> CoreResult<PathBuf> {
    let metadata = std::fs::metadata(path).map_err(|e| {
        CoreError::PathError(format!("Invalid input path '{}': {}", path.display(), e))
    })?;

    if metadata.is_file() {
        Ok(path.to_path_buf())
    } else {
        Err(CoreError::PathError(format!(
            "Input path '{}' is not a file",
            path.display()
        )))
    }
}
