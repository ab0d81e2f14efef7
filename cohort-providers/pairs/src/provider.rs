//! Reader for `(teacher, student)` pair files.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use cohort_core::{RelationGraph, StudentId, TeacherId};

use crate::{
    errors::PairsProviderError,
    parse::{is_comment, is_header, split_pair},
};

/// Teaching relation loaded from a line-based file.
///
/// Each non-blank line names a teacher and a student separated by a tab or a
/// comma. Lines starting with `#` are ignored, as is a leading
/// `teacher,student` header.
#[derive(Debug, Clone)]
pub struct PairsProvider {
    name: String,
    pairs: Vec<(TeacherId, StudentId)>,
}

impl PairsProvider {
    /// Parses pairs from `reader`.
    ///
    /// # Errors
    /// Returns [`PairsProviderError::Io`] when reading fails,
    /// [`PairsProviderError::MissingSeparator`] or
    /// [`PairsProviderError::EmptyField`] for malformed lines and
    /// [`PairsProviderError::NoPairs`] when nothing remains after comments.
    ///
    /// # Examples
    /// ```
    /// use cohort_providers_pairs::PairsProvider;
    ///
    /// let input = "teacher,student\n# year 9\nT1\tS1\nT2, S1\n";
    /// let provider = PairsProvider::try_from_reader("demo", input.as_bytes())?;
    /// assert_eq!(provider.len(), 2);
    /// assert_eq!(provider.graph().teacher_count(), 2);
    /// # Ok::<(), cohort_providers_pairs::PairsProviderError>(())
    /// ```
    pub fn try_from_reader<R: BufRead>(
        name: impl Into<String>,
        reader: R,
    ) -> Result<Self, PairsProviderError> {
        let mut pairs = Vec::new();
        let mut seen_data = false;
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || is_comment(trimmed) {
                continue;
            }
            let number = index + 1;
            let (teacher, student) =
                split_pair(trimmed).ok_or(PairsProviderError::MissingSeparator { line: number })?;
            let (teacher, student) = (teacher.trim(), student.trim());
            let first = !std::mem::replace(&mut seen_data, true);
            if first && is_header(teacher, student) {
                continue;
            }
            if teacher.is_empty() {
                return Err(PairsProviderError::EmptyField { line: number, field: "teacher" });
            }
            if student.is_empty() {
                return Err(PairsProviderError::EmptyField { line: number, field: "student" });
            }
            pairs.push((TeacherId::from(teacher), StudentId::from(student)));
        }
        if pairs.is_empty() {
            return Err(PairsProviderError::NoPairs);
        }
        Ok(Self {
            name: name.into(),
            pairs,
        })
    }

    /// Opens and parses the file at `path`, named after its file stem.
    ///
    /// # Errors
    /// As [`Self::try_from_reader`], plus [`PairsProviderError::Io`] when the
    /// file cannot be opened.
    pub fn try_from_path(path: &Path) -> Result<Self, PairsProviderError> {
        let name = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("pairs")
            .to_owned();
        let file = File::open(path)?;
        Self::try_from_reader(name, BufReader::new(file))
    }

    /// Name of the source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parsed pairs in file order, duplicates included.
    #[must_use]
    pub fn pairs(&self) -> &[(TeacherId, StudentId)] {
        &self.pairs
    }

    /// Number of parsed pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs were parsed; never true for a constructed provider.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Builds the relation graph for these pairs.
    #[must_use]
    pub fn graph(&self) -> RelationGraph {
        RelationGraph::build(self.pairs.iter().cloned())
    }
}
