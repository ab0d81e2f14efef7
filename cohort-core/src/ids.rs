//! Identifier newtypes for the two entity kinds of the relation.
//!
//! Teachers and students are both named by strings, but the engine keeps them
//! in distinct types so a student can never be passed where a teacher is
//! expected.

use std::{borrow::Borrow, fmt, sync::Arc};

macro_rules! define_identifier {
    (
        $(#[$meta:meta])*
        $Name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $Name(Arc<str>);

        impl $Name {
            #[doc = concat!(
                "Creates a new [`",
                stringify!($Name),
                "`] from any string-like value."
            )]
            #[must_use]
            pub fn new(id: impl Into<Arc<str>>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $Name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Borrow<str> for $Name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $Name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $Name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $Name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl From<Arc<str>> for $Name {
            fn from(value: Arc<str>) -> Self {
                Self(value)
            }
        }
    };
}

define_identifier! {
    /// Identifies a teacher within a [`crate::RelationGraph`].
    ///
    /// # Examples
    /// ```
    /// use cohort_core::TeacherId;
    ///
    /// let id = TeacherId::from("Ada Lovelace");
    /// assert_eq!(id.as_str(), "Ada Lovelace");
    /// ```
    TeacherId
}

define_identifier! {
    /// Identifies a student within a [`crate::RelationGraph`].
    ///
    /// # Examples
    /// ```
    /// use cohort_core::StudentId;
    ///
    /// let id = StudentId::from("1042 Y9 Grace Hopper");
    /// assert_eq!(id.to_string(), "1042 Y9 Grace Hopper");
    /// ```
    StudentId
}

/// A member of an output group, tagged with its entity kind.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Member {
    /// A teacher placed in the group.
    Teacher(TeacherId),
    /// A student placed in the group.
    Student(StudentId),
}

impl Member {
    /// Returns the underlying identifier regardless of kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Teacher(id) => id.as_str(),
            Self::Student(id) => id.as_str(),
        }
    }
}

impl AsRef<str> for Member {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
