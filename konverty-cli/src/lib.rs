// konverty-cli/src/lib.rs
//
// Library portion of the Konverty CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, normalize_args};
pub use commands::psnr::run_comparison;
pub use error::{exit_code, exit_code_for};
