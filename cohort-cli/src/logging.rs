//! Logging initialisation for the cohort CLI.
//!
//! Diagnostics go to stderr so that groups printed on stdout can be piped
//! straight into another tool. Two environment variables shape the output:
//! `COHORT_LOG_FORMAT` (`human` or `json`) and `COHORT_LOG_LEVEL`, a filter
//! directive used when `RUST_LOG` is unset.

use std::{env, sync::OnceLock};

use thiserror::Error;
use tracing::debug;
use tracing_log::LogTracer;
use tracing_subscriber::{
    EnvFilter, Layer, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt,
};

const LOG_FORMAT_ENV: &str = "COHORT_LOG_FORMAT";
const LOG_LEVEL_ENV: &str = "COHORT_LOG_LEVEL";

/// Grouping crates log at `info`; everything else only warns.
const DEFAULT_DIRECTIVE: &str = "warn,cohort_core=info,cohort_cli=info";

static INITIALISED: OnceLock<()> = OnceLock::new();

/// Output style for diagnostics.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum LogFormat {
    Human,
    Json,
}

/// Resolved logging configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
struct LogSettings {
    format: LogFormat,
    directive: String,
}

impl LogSettings {
    fn from_env() -> Result<Self, LoggingError> {
        let format = read_var(LOG_FORMAT_ENV)?;
        let level = read_var(LOG_LEVEL_ENV)?;
        Self::resolve(format.as_deref(), level.as_deref())
    }

    fn resolve(format: Option<&str>, level: Option<&str>) -> Result<Self, LoggingError> {
        let format = format.map_or(Ok(LogFormat::Human), parse_log_format)?;
        let directive = match level.map(str::trim) {
            None | Some("") => DEFAULT_DIRECTIVE.to_owned(),
            Some(raw) => {
                EnvFilter::try_new(raw).map_err(|source| LoggingError::InvalidLevel {
                    provided: raw.to_owned(),
                    source,
                })?;
                raw.to_owned()
            }
        };
        Ok(Self { format, directive })
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.directive))
    }
}

/// Errors raised while initialising structured logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Environment variable contained invalid UTF-8 data.
    #[error("environment variable `{name}` contained invalid UTF-8: {source}")]
    InvalidUnicode {
        /// Name of the offending environment variable.
        name: &'static str,
        /// Underlying parse failure.
        #[source]
        source: env::VarError,
    },
    /// Unsupported log format requested via `COHORT_LOG_FORMAT`.
    #[error("unsupported log format `{provided}`; expected `human` or `json`")]
    UnsupportedFormat {
        /// Raw value supplied by the user.
        provided: String,
    },
    /// `COHORT_LOG_LEVEL` is not a valid filter directive.
    #[error("invalid log level `{provided}`: {source}")]
    InvalidLevel {
        /// Raw value supplied by the user.
        provided: String,
        /// Parse failure reported by the filter.
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
}

/// Installs global structured logging once per process.
///
/// If another subscriber already owns the global slot it is kept and the
/// call still succeeds.
///
/// # Errors
/// Returns [`LoggingError`] if either variable is not valid Unicode, names an
/// unknown format or holds an unparsable level directive.
pub fn init_logging() -> Result<(), LoggingError> {
    if INITIALISED.get().is_some() {
        return Ok(());
    }

    let settings = LogSettings::from_env()?;
    install_subscriber(&settings);
    let _ = INITIALISED.set(());
    Ok(())
}

fn read_var(name: &'static str) -> Result<Option<String>, LoggingError> {
    match env::var(name) {
        Ok(raw) => Ok(Some(raw)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(source @ env::VarError::NotUnicode(_)) => {
            Err(LoggingError::InvalidUnicode { name, source })
        }
    }
}

fn install_subscriber(settings: &LogSettings) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);
    let fmt_layer = match settings.format {
        LogFormat::Json => fmt_layer
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_current_span(true)
            .with_span_list(true)
            .boxed(),
        LogFormat::Human => fmt_layer.compact().boxed(),
    };

    // Another logger may already own the `log` slot; keep it.
    let _ = LogTracer::init();

    if let Err(source) = tracing_subscriber::registry()
        .with(settings.filter())
        .with(fmt_layer)
        .try_init()
    {
        debug!(error = %source, "keeping the subscriber that was already installed");
    }
}

fn parse_log_format(raw: &str) -> Result<LogFormat, LoggingError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "human" | "" => Ok(LogFormat::Human),
        "json" => Ok(LogFormat::Json),
        other => Err(LoggingError::UnsupportedFormat {
            provided: other.to_owned(),
        }),
    }
}
