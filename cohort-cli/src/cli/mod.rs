//! Command-line interface orchestration for the cohort grouping engine.
//!
//! `run` groups the pairs in a file and prints one group per line or a JSON
//! document; `evaluate` checks a previously exported grouping against the
//! pairs it was made from.

mod commands;
mod render;

pub use commands::{
    Cli, CliError, Command, EvaluateCommand, ExecutionSummary, OutputFormat, RunCommand, run_cli,
};
pub use render::render_summary;
