//! Builder utilities for configuring grouping runs.
//!
//! Validation happens once in [`CohortBuilder::build`]; a constructed
//! [`Cohort`] always holds a usable configuration.

use std::num::NonZeroUsize;

use crate::{Result, cohort::Cohort, error::CohortError};

/// Teachers per group used when the caller does not choose one.
pub const DEFAULT_TEACHERS_PER_GROUP: usize = 4;

/// Configures and constructs [`Cohort`] instances.
///
/// # Examples
/// ```
/// use cohort_core::CohortBuilder;
///
/// let cohort = CohortBuilder::new()
///     .with_teachers_per_group(3)
///     .with_seed(42)
///     .with_attempts(5)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(cohort.teachers_per_group().get(), 3);
/// assert_eq!(cohort.seed(), Some(42));
/// assert_eq!(cohort.attempts().get(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct CohortBuilder {
    teachers_per_group: usize,
    seed: Option<u64>,
    attempts: usize,
}

impl Default for CohortBuilder {
    fn default() -> Self {
        Self {
            teachers_per_group: DEFAULT_TEACHERS_PER_GROUP,
            seed: None,
            attempts: 1,
        }
    }
}

impl CohortBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::CohortBuilder;
    ///
    /// let builder = CohortBuilder::new();
    /// assert_eq!(builder.teachers_per_group(), 4);
    /// assert_eq!(builder.seed(), None);
    /// assert_eq!(builder.attempts(), 1);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the requested number of teachers per group.
    ///
    /// Values below two are accepted and raised to two when sizing a run.
    #[must_use]
    pub fn with_teachers_per_group(mut self, teachers: usize) -> Self {
        self.teachers_per_group = teachers;
        self
    }

    /// Returns the configured teachers per group.
    #[must_use]
    pub fn teachers_per_group(&self) -> usize {
        self.teachers_per_group
    }

    /// Fixes the base seed so [`Cohort::run`] is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured base seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Sets how many independent attempts a run makes before keeping the
    /// best grouping.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::CohortBuilder;
    ///
    /// let builder = CohortBuilder::new().with_attempts(8);
    /// assert_eq!(builder.attempts(), 8);
    /// ```
    #[must_use]
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts;
        self
    }

    /// Returns the configured number of attempts.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Validates the configuration and constructs a [`Cohort`] instance.
    ///
    /// # Errors
    /// Returns [`CohortError::InvalidTeachersPerGroup`] when
    /// `teachers_per_group` is zero and [`CohortError::InvalidAttempts`] when
    /// `attempts` is zero.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::{CohortBuilder, CohortError};
    ///
    /// let err = CohortBuilder::new().with_attempts(0).build().unwrap_err();
    /// assert_eq!(err, CohortError::InvalidAttempts { got: 0 });
    /// ```
    pub fn build(self) -> Result<Cohort> {
        let teachers_per_group = NonZeroUsize::new(self.teachers_per_group).ok_or(
            CohortError::InvalidTeachersPerGroup {
                got: self.teachers_per_group,
            },
        )?;
        let attempts = NonZeroUsize::new(self.attempts).ok_or(CohortError::InvalidAttempts {
            got: self.attempts,
        })?;

        Ok(Cohort::new(teachers_per_group, self.seed, attempts))
    }
}
