//! Command implementations and argument parsing for the cohort CLI.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use cohort_core::{
    CohortBuilder, CohortError, DEFAULT_TEACHERS_PER_GROUP, Grouping, GroupingQuality, evaluate,
};
use cohort_providers_pairs::{PairsProvider, PairsProviderError, read_groupings};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "cohort", about = "Group teachers with the students they teach.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Group the teachers and students listed in a pairs file.
    Run(RunCommand),
    /// Report the quality of an exported grouping.
    Evaluate(EvaluateCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// File of `teacher<TAB>student` or `teacher,student` lines.
    pub pairs: PathBuf,

    /// Preferred number of teachers per group; 1 acts as 2 and 0 is rejected.
    #[arg(
        long = "teachers-per-group",
        default_value_t = DEFAULT_TEACHERS_PER_GROUP,
        value_parser = clap::value_parser!(usize),
    )]
    pub teachers_per_group: usize,

    /// Seed for a reproducible grouping.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Independent attempts to make, keeping the best.
    #[arg(long, default_value_t = 1)]
    pub attempts: usize,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Options accepted by the `evaluate` command.
#[derive(Debug, Args, Clone)]
pub struct EvaluateCommand {
    /// File of teacher/student pairs the grouping was made from.
    pub pairs: PathBuf,

    /// Exported grouping, one group per line.
    pub groups: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated lines.
    Text,
    /// A single JSON document.
    Json,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An input file could not be parsed.
    #[error("failed to read `{path}`: {source}")]
    Pairs {
        /// Path of the malformed input.
        path: PathBuf,
        /// Underlying provider error.
        #[source]
        source: PairsProviderError,
    },
    /// The grouping configuration was rejected.
    #[error(transparent)]
    Core(#[from] CohortError),
}

impl CliError {
    /// Stable code of the underlying failure, when it has one.
    #[must_use]
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Io { .. } => None,
            Self::Pairs { source, .. } => Some(source.code()),
            Self::Core(core) => Some(core.code().as_str()),
        }
    }
}

/// Outcome of a CLI command, ready to render.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// Groups produced by `run`.
    Grouping {
        /// Name of the pairs source.
        data_source: String,
        /// The grouping itself.
        grouping: Grouping,
        /// Requested output format.
        format: OutputFormat,
    },
    /// Findings of `evaluate`.
    Evaluation {
        /// Name of the pairs source.
        data_source: String,
        /// Quality of the loaded grouping.
        quality: GroupingQuality,
        /// Requested output format.
        format: OutputFormat,
    },
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when an input cannot be read or the configuration is
/// invalid.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use cohort_cli::cli::{Cli, Command, ExecutionSummary, OutputFormat, RunCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "T1\tS1\nT2\tS1\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         pairs: file.path().to_path_buf(),
///         teachers_per_group: 2,
///         seed: Some(1),
///         attempts: 1,
///         format: OutputFormat::Text,
///     }),
/// };
/// let ExecutionSummary::Grouping { grouping, .. } = run_cli(cli)? else {
///     unreachable!("run yields a grouping");
/// };
/// assert_eq!(grouping.len(), 1);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
        Command::Evaluate(evaluate) => {
            Span::current().record("command", field::display("evaluate"));
            evaluate_command(evaluate)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(pairs = %command.pairs.display(), teachers_per_group = command.teachers_per_group),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let mut builder = CohortBuilder::new()
        .with_teachers_per_group(command.teachers_per_group)
        .with_attempts(command.attempts);
    if let Some(seed) = command.seed {
        builder = builder.with_seed(seed);
    }
    let cohort = builder.build()?;

    let provider = load_pairs(&command.pairs)?;
    let graph = provider.graph();
    let grouping = cohort.run(&graph);
    info!(
        data_source = provider.name(),
        groups = grouping.len(),
        students_below_target = grouping.repair_report().students_below_target(),
        "command completed"
    );
    Ok(ExecutionSummary::Grouping {
        data_source: provider.name().to_owned(),
        grouping,
        format: command.format,
    })
}

#[instrument(
    name = "cli.evaluate",
    err,
    skip(command),
    fields(pairs = %command.pairs.display(), groups = %command.groups.display()),
)]
pub(super) fn evaluate_command(command: EvaluateCommand) -> Result<ExecutionSummary, CliError> {
    let provider = load_pairs(&command.pairs)?;
    let reader = open_reader(&command.groups)?;
    let groups = read_groupings(reader).map_err(|source| CliError::Pairs {
        path: command.groups.clone(),
        source,
    })?;
    let quality = evaluate(&provider.graph(), &groups);
    info!(
        data_source = provider.name(),
        groups = quality.group_count(),
        complete = quality.is_complete(),
        "evaluation completed"
    );
    Ok(ExecutionSummary::Evaluation {
        data_source: provider.name().to_owned(),
        quality,
        format: command.format,
    })
}

fn load_pairs(path: &Path) -> Result<PairsProvider, CliError> {
    let reader = open_reader(path)?;
    PairsProvider::try_from_reader(derive_data_source_name(path), reader).map_err(|source| {
        CliError::Pairs {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[instrument(name = "cli.open_reader", err, fields(path = %path.display()))]
pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "pairs".to_owned(), ToOwned::to_owned)
}
