//! Error types for the cohort core library.
//!
//! The grouping engine itself never fails; only configuration is validated.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error type produced when configuring [`crate::Cohort`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CohortError {
    /// The requested number of teachers per group was zero.
    #[error("teachers_per_group must be at least 1 (got {got})")]
    InvalidTeachersPerGroup {
        /// The invalid value supplied by the caller.
        got: usize,
    },
    /// The number of attempts was zero.
    #[error("attempts must be at least 1 (got {got})")]
    InvalidAttempts {
        /// The invalid value supplied by the caller.
        got: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`CohortError`] variants.
    enum CohortErrorCode for CohortError {
        /// The requested number of teachers per group was zero.
        InvalidTeachersPerGroup => InvalidTeachersPerGroup { .. }
            => "COHORT_INVALID_TEACHERS_PER_GROUP",
        /// The number of attempts was zero.
        InvalidAttempts => InvalidAttempts { .. } => "COHORT_INVALID_ATTEMPTS",
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, CohortError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CohortError::InvalidTeachersPerGroup { got: 0 }, "COHORT_INVALID_TEACHERS_PER_GROUP")]
    #[case(CohortError::InvalidAttempts { got: 0 }, "COHORT_INVALID_ATTEMPTS")]
    fn codes_are_stable(#[case] error: CohortError, #[case] expected: &str) {
        assert_eq!(error.code().as_str(), expected);
        assert_eq!(error.code().to_string(), expected);
    }

    #[rstest]
    fn messages_name_the_offending_value() {
        let error = CohortError::InvalidAttempts { got: 0 };
        assert_eq!(error.to_string(), "attempts must be at least 1 (got 0)");
    }
}
