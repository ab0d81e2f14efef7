//! Result types for grouping runs.
//!
//! A [`Grouping`] owns the output groups together with the sizing and repair
//! summary of the run that produced them.

use std::fmt;

use crate::{
    graph::RelationGraph,
    ids::{Member, StudentId, TeacherId},
    quality::{GroupingQuality, evaluate},
    repair::RepairReport,
    sizing::GroupSizing,
};

/// Position of a group within a [`Grouping`].
///
/// # Examples
/// ```
/// use cohort_core::GroupId;
///
/// let id = GroupId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(usize);

impl GroupId {
    /// Creates a new group identifier.
    #[rustfmt::skip]
    #[must_use]
    pub fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying position.
    #[rustfmt::skip]
    #[must_use]
    pub fn get(self) -> usize { self.0 }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One output group: its teachers and the students placed with them.
///
/// Both lists follow the order in which the entities first appeared in the
/// relation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub(crate) teachers: Vec<TeacherId>,
    pub(crate) students: Vec<StudentId>,
}

impl Group {
    /// Teachers placed in this group.
    #[must_use]
    pub fn teachers(&self) -> &[TeacherId] {
        &self.teachers
    }

    /// Students placed in this group.
    #[must_use]
    pub fn students(&self) -> &[StudentId] {
        &self.students
    }

    /// Total number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.teachers.len() + self.students.len()
    }

    /// Whether the group holds no members at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty() && self.students.is_empty()
    }

    /// Flattens the group to its teachers followed by its students.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::{CohortBuilder, RelationGraph};
    ///
    /// let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1")]);
    /// let grouping = CohortBuilder::new().with_seed(3).build()?.run(&graph);
    /// let names: Vec<String> = grouping.groups()[0].members().map(|m| m.to_string()).collect();
    /// assert_eq!(names, ["T1", "T2", "S1"]);
    /// # Ok::<(), cohort_core::CohortError>(())
    /// ```
    pub fn members(&self) -> impl Iterator<Item = Member> + '_ {
        self.teachers
            .iter()
            .cloned()
            .map(Member::Teacher)
            .chain(self.students.iter().cloned().map(Member::Student))
    }
}

/// Represents the output of a [`crate::Cohort::run`] invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    groups: Vec<Group>,
    sizing: Option<GroupSizing>,
    report: RepairReport,
    attempt: usize,
}

impl Grouping {
    pub(crate) fn new(
        groups: Vec<Group>,
        sizing: GroupSizing,
        report: RepairReport,
        attempt: usize,
    ) -> Self {
        Self {
            groups,
            sizing: Some(sizing),
            report,
            attempt,
        }
    }

    /// The result for a relation without teachers or without students.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Groups in output order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the run produced no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Returns the group at `id`, if any.
    #[must_use]
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.get())
    }

    /// Sizing parameters used by the run; `None` for an empty result.
    #[must_use]
    pub fn sizing(&self) -> Option<GroupSizing> {
        self.sizing
    }

    /// Summary of the repair passes.
    #[must_use]
    pub fn repair_report(&self) -> &RepairReport {
        &self.report
    }

    /// Zero-based index of the attempt this grouping came from.
    #[must_use]
    pub fn attempt(&self) -> usize {
        self.attempt
    }

    /// Locates the group holding `teacher`.
    #[must_use]
    pub fn group_of_teacher(&self, teacher: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|group| group.teachers.iter().any(|id| id.as_str() == teacher))
            .map(GroupId::new)
    }

    /// Locates the group holding `student`.
    #[must_use]
    pub fn group_of_student(&self, student: &str) -> Option<GroupId> {
        self.groups
            .iter()
            .position(|group| group.students.iter().any(|id| id.as_str() == student))
            .map(GroupId::new)
    }

    /// Flattens every group to teachers followed by students.
    #[must_use]
    pub fn to_members(&self) -> Vec<Vec<Member>> {
        self.groups.iter().map(|group| group.members().collect()).collect()
    }

    /// Evaluates this grouping against `graph`.
    #[must_use]
    pub fn quality(&self, graph: &RelationGraph) -> GroupingQuality {
        evaluate(graph, self.groups.iter().map(Group::members))
    }
}
