use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PairsProviderError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("line {line} has no tab or comma between teacher and student")]
    MissingSeparator { line: usize },
    #[error("line {line} has an empty {field} field")]
    EmptyField { line: usize, field: &'static str },
    #[error("input contains no teacher/student pairs")]
    NoPairs,
}

impl PairsProviderError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "PAIRS_IO",
            Self::MissingSeparator { .. } => "PAIRS_MISSING_SEPARATOR",
            Self::EmptyField { .. } => "PAIRS_EMPTY_FIELD",
            Self::NoPairs => "PAIRS_EMPTY",
        }
    }
}
