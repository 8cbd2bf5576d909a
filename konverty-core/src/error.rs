//! Error types for konverty-core.
//!
//! Probe helpers never surface errors (they degrade to sentinel values), so
//! everything here concerns the quality run itself, configuration and paths.

use crate::metrics::QualitySummary;

use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for konverty-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] std::io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, #[source] std::io::Error),

    #[error("{tool} exited with {status} and produced no PSNR summary")]
    ToolExecution {
        tool: String,
        status: ExitStatus,
        summary: QualitySummary,
        stderr_tail: Vec<String>,
    },

    #[error("{tool} finished but no PSNR summary was found in its output")]
    NoMetricsFound {
        tool: String,
        summary: QualitySummary,
    },

    #[error("Output reader for {0} panicked before reaching end of stream")]
    DrainTask(String),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// The summary accumulated before a failed run, if the error belongs to
    /// the run itself. Always the zero-value sentinel with `found == false`.
    pub fn summary(&self) -> Option<QualitySummary> {
        match self {
            CoreError::ToolExecution { summary, .. } | CoreError::NoMetricsFound { summary, .. } => {
                Some(*summary)
            }
            _ => None,
        }
    }
}

/// Result type for konverty-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

pub fn command_start_error(tool: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandStart(tool.into(), err)
}

pub fn command_wait_error(tool: impl Into<String>, err: std::io::Error) -> CoreError {
    CoreError::CommandWait(tool.into(), err)
}
