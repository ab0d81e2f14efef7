//! CLI entry point for grouping teachers and students.
//!
//! Parses command-line arguments with clap, runs the requested command,
//! renders its output to stdout and maps errors to exit codes: `2` when the
//! input or configuration was rejected, `1` for any other failure.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cohort_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

const INVALID_INPUT: u8 = 2;

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render output")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let cli_error = err.downcast_ref::<CliError>();
            error!(
                error = %format!("{err:#}"),
                code = cli_error.and_then(CliError::code).map(field::display),
                "command execution failed"
            );
            exit_code_for(cli_error)
        }
    }
}

fn exit_code_for(err: Option<&CliError>) -> ExitCode {
    match err {
        Some(CliError::Pairs { .. } | CliError::Core(_)) => ExitCode::from(INVALID_INPUT),
        _ => ExitCode::FAILURE,
    }
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialised"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
