//! File logging for unattended runs.
//!
//! When the CLI is given a log directory, all `log` output goes to a
//! timestamped file through log4rs instead of the console.

pub mod setup;

pub use setup::{log_file_name, setup_file_logging};
