// konverty-cli/src/main.rs
//
// Entry point for the `konverty` binary.
//
// Responsibilities:
// - Parsing arguments (after rewriting the legacy `-i2` flag).
// - Setting up console or file logging.
// - Installing the terminal progress reporter.
// - Running the comparison and printing the PSNR statistics.
// - Mapping failures to exit codes.

use clap::Parser;
use konverty_cli::error::suggestion_for;
use konverty_cli::terminal::TerminalReporter;
use konverty_cli::{Cli, exit_code, exit_code_for, logging, normalize_args, output, run_comparison};
use konverty_core::external::{CommandFfprobeExecutor, SidecarSpawner};
use konverty_core::progress_reporting;
use std::process;

fn main() {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here and print to stdout
            let code = if e.use_stderr() { exit_code::USAGE } else { exit_code::SUCCESS };
            let _ = e.print();
            process::exit(code);
        }
    };

    if let Err(e) = logging::init_logging(cli.log_dir.as_deref(), cli.verbose) {
        eprintln!("Error: {e}");
        process::exit(exit_code_for(&e));
    }

    progress_reporting::set_progress_reporter(Box::new(TerminalReporter::new(cli.json, cli.verbose)));

    let prober = CommandFfprobeExecutor::new(&cli.ffprobe);
    let code = match run_comparison(&SidecarSpawner, &prober, &cli) {
        Ok(summary) => {
            if cli.json {
                match output::format_summary_json(&summary, &cli.input, &cli.input2) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        log::error!("Failed to serialize summary: {e}");
                        process::exit(exit_code::GENERAL);
                    }
                }
            } else {
                println!("\n{}", output::format_summary(&summary));
            }
            exit_code::SUCCESS
        }
        Err(e) => {
            // The reporter shows the error; console logging would repeat it
            log::debug!("Comparison failed: {e}");
            progress_reporting::error(&e.to_string());
            if let Some(hint) = suggestion_for(&e) {
                progress_reporting::info(&format!("  Suggestion: {hint}"));
            }
            if let konverty_core::CoreError::ToolExecution { stderr_tail, .. } = &e {
                for line in stderr_tail {
                    progress_reporting::info(&format!("  {line}"));
                }
            }
            exit_code_for(&e)
        }
    };

    process::exit(code);
}
