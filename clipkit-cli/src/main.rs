// ============================================================================
// clipkit-cli/src/main.rs
// ============================================================================
//
// MAIN ENTRY POINT: clipkit command-line application
//
// Parses arguments, sets up logging and the terminal progress reporter, runs
// the selected command and maps its outcome to the process exit code.
//
// Exit codes:
// - 0: success, including "nothing to do" outcomes
// - 1: the command failed
// - 2: invalid arguments (reported by clap)

use clipkit_cli::{Cli, CliResult, dispatch, logging, terminal};

use clap::Parser;

use std::process;

fn run(cli: Cli) -> CliResult<()> {
    let log_path = logging::setup_logging(cli.verbose, cli.log_dir.as_deref(), cli.command.name())?;
    if let Some(path) = &log_path {
        log::debug!("Writing log file to {}", path.display());
    }
    log::debug!("clipkit {} ({})", env!("CARGO_PKG_VERSION"), cli.command.name());

    terminal::register_cli_reporter();
    dispatch(cli.command)
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        terminal::print_error(&e.to_string());
        process::exit(1);
    }
}
