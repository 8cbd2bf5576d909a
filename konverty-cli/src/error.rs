// ============================================================================
// konverty-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and process exit codes
//
// The CLI reuses konverty-core's error type. Each failure class maps to its
// own exit code so scripts can tell a missing ffmpeg from a failed run.

use konverty_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit codes of the `konverty` binary. clap exits with 2 on usage errors.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const SPAWN: i32 = 3;
    pub const TOOL_EXECUTION: i32 = 4;
    pub const NO_METRICS: i32 = 5;
}

/// Maps an error to the process exit code.
pub fn exit_code_for(err: &CoreError) -> i32 {
    match err {
        CoreError::CommandStart(..) => exit_code::SPAWN,
        CoreError::ToolExecution { .. } => exit_code::TOOL_EXECUTION,
        CoreError::NoMetricsFound { .. } => exit_code::NO_METRICS,
        _ => exit_code::GENERAL,
    }
}

/// One-line hint shown under an error, where one helps.
pub fn suggestion_for(err: &CoreError) -> Option<&'static str> {
    match err {
        CoreError::CommandStart(..) => {
            Some("Check that ffmpeg is installed or point --ffmpeg / KONVERTY_FFMPEG at it")
        }
        CoreError::NoMetricsFound { .. } => {
            Some("Make sure both inputs contain a video stream with matching resolution")
        }
        CoreError::PathError(_) => Some("Both --input and --input2 must name existing files"),
        _ => None,
    }
}
