//! Quality evaluation for any grouping of a relation.
//!
//! Groups are given as flat member lists, the same shape [`crate::Group::members`]
//! produces and exported files hold, so a grouping loaded from a previous run
//! can be checked against the current relation. Each member is classified as a
//! teacher first and a student second.

use std::collections::BTreeSet;

use crate::{
    graph::RelationGraph,
    ids::{StudentId, TeacherId},
    repair::COVERAGE_TARGET,
};

/// Teacher and student counts for one group.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GroupStats {
    /// Teachers recognised in the group.
    pub teachers: usize,
    /// Students recognised in the group.
    pub students: usize,
}

/// Students bucketed by how many of their teachers share their group.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CoverageHistogram {
    /// Students with none of their teachers present.
    pub none: usize,
    /// Students with exactly one teacher present.
    pub one: usize,
    /// Students at or above the coverage target.
    pub at_target: usize,
}

impl CoverageHistogram {
    fn record(&mut self, overlap: usize) {
        match overlap {
            0 => self.none += 1,
            n if n < COVERAGE_TARGET => self.one += 1,
            _ => self.at_target += 1,
        }
    }
}

/// Findings of [`evaluate`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GroupingQuality {
    groups: Vec<GroupStats>,
    coverage: CoverageHistogram,
    students_below_target: Vec<StudentId>,
    teachers_without_own_student: Vec<TeacherId>,
    duplicates: Vec<String>,
    unknown: Vec<String>,
    missing: Vec<String>,
}

impl GroupingQuality {
    /// Per-group counts in group order.
    #[must_use]
    pub fn groups(&self) -> &[GroupStats] {
        &self.groups
    }

    /// Number of groups evaluated.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Coverage of placed students.
    #[must_use]
    pub fn coverage(&self) -> CoverageHistogram {
        self.coverage
    }

    /// Placed students sharing fewer than the coverage target of teachers
    /// with their group.
    #[must_use]
    pub fn students_below_target(&self) -> &[StudentId] {
        &self.students_below_target
    }

    /// Placed teachers whose group holds none of their students.
    #[must_use]
    pub fn teachers_without_own_student(&self) -> &[TeacherId] {
        &self.teachers_without_own_student
    }

    /// Members listed more than once; only the first placement counts.
    #[must_use]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Members that are neither a teacher nor a student of the relation.
    #[must_use]
    pub fn unknown(&self) -> &[String] {
        &self.unknown
    }

    /// Teachers then students of the relation absent from every group.
    #[must_use]
    pub fn missing(&self) -> &[String] {
        &self.missing
    }

    /// Whether every entity appears exactly once and nothing else appears.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.duplicates.is_empty() && self.unknown.is_empty() && self.missing.is_empty()
    }

    /// Ordering key used to compare attempts; lower is better.
    pub(crate) fn rank(&self) -> (usize, usize) {
        (
            self.students_below_target.len(),
            self.teachers_without_own_student.len(),
        )
    }
}

#[derive(Default)]
struct Placed {
    teachers: BTreeSet<usize>,
    students: BTreeSet<usize>,
}

/// Evaluates `groups` against `graph`.
///
/// # Examples
/// ```
/// use cohort_core::{RelationGraph, evaluate};
///
/// let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1"), ("T3", "S2")]);
/// let quality = evaluate(&graph, [vec!["T1", "T2", "S1"], vec!["T3", "S2", "S9"]]);
/// assert_eq!(quality.coverage().at_target, 1);
/// assert_eq!(quality.students_below_target().len(), 1);
/// assert_eq!(quality.unknown(), ["S9"]);
/// assert!(!quality.is_complete());
/// ```
pub fn evaluate<I, G, M>(graph: &RelationGraph, groups: I) -> GroupingQuality
where
    I: IntoIterator<Item = G>,
    G: IntoIterator<Item = M>,
    M: AsRef<str>,
{
    let mut quality = GroupingQuality::default();
    let mut teacher_seen = vec![false; graph.teacher_count()];
    let mut student_seen = vec![false; graph.student_count()];
    let mut placed_groups = Vec::new();

    for group in groups {
        let mut placed = Placed::default();
        for member in group {
            let name = member.as_ref();
            if let Some(teacher) = graph.teacher_index_of(name) {
                if std::mem::replace(&mut teacher_seen[teacher], true) {
                    quality.duplicates.push(name.to_owned());
                } else {
                    placed.teachers.insert(teacher);
                }
            } else if let Some(student) = graph.student_index_of(name) {
                if std::mem::replace(&mut student_seen[student], true) {
                    quality.duplicates.push(name.to_owned());
                } else {
                    placed.students.insert(student);
                }
            } else {
                quality.unknown.push(name.to_owned());
            }
        }
        quality.groups.push(GroupStats {
            teachers: placed.teachers.len(),
            students: placed.students.len(),
        });
        placed_groups.push(placed);
    }

    for placed in &placed_groups {
        for &student in &placed.students {
            let overlap = graph
                .student_teachers(student)
                .intersection(&placed.teachers)
                .count();
            quality.coverage.record(overlap);
            if overlap < COVERAGE_TARGET {
                quality
                    .students_below_target
                    .push(graph.student_id(student).clone());
            }
        }
        for &teacher in &placed.teachers {
            let anchored = graph
                .teacher_students(teacher)
                .iter()
                .any(|student| placed.students.contains(student));
            if !anchored {
                quality
                    .teachers_without_own_student
                    .push(graph.teacher_id(teacher).clone());
            }
        }
    }

    let missing_teachers = teacher_seen
        .iter()
        .enumerate()
        .filter(|&(_, &seen)| !seen)
        .map(|(teacher, _)| graph.teacher_id(teacher).to_string());
    let missing_students = student_seen
        .iter()
        .enumerate()
        .filter(|&(_, &seen)| !seen)
        .map(|(student, _)| graph.student_id(student).to_string());
    quality.missing = missing_teachers.chain(missing_students).collect();
    quality
}
