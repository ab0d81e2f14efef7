//! Bipartite teacher/student relation used by every grouping stage.
//!
//! Identifiers are interned into dense indices in first-seen order. The two
//! adjacency tables are kept as exact transposes of each other, and the
//! neighbour-teacher table (teachers linked through a shared student) is
//! derived once when the graph is built so later lookups are constant time.
//! Index sets are ordered, which keeps every traversal deterministic for a
//! fixed random seed.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::ids::{StudentId, TeacherId};

static EMPTY: BTreeSet<usize> = BTreeSet::new();

/// Immutable bipartite relation between teachers and the students they
/// instruct.
///
/// # Examples
/// ```
/// use cohort_core::RelationGraph;
///
/// let graph = RelationGraph::build([("T1", "S1"), ("T1", "S2"), ("T2", "S1")]);
/// assert_eq!(graph.teacher_count(), 2);
/// assert_eq!(graph.student_count(), 2);
/// assert_eq!(graph.overlap_count("T1", "T2"), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RelationGraph {
    teachers: Vec<TeacherId>,
    students: Vec<StudentId>,
    teacher_index: HashMap<TeacherId, usize>,
    student_index: HashMap<StudentId, usize>,
    teacher_to_students: Vec<BTreeSet<usize>>,
    student_to_teachers: Vec<BTreeSet<usize>>,
    neighbours: Vec<BTreeSet<usize>>,
}

/// Incrementally assembles a [`RelationGraph`].
///
/// Besides pairs, the builder accepts teachers and students without any
/// relation so callers can model staff who currently have no class list.
///
/// # Examples
/// ```
/// use cohort_core::RelationGraph;
///
/// let graph = RelationGraph::builder()
///     .with_pair("T1", "S1")
///     .with_teacher("T2")
///     .build();
/// assert_eq!(graph.teacher_count(), 2);
/// assert_eq!(graph.students_of("T2").count(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RelationGraphBuilder {
    graph: RelationGraph,
}

impl RelationGraphBuilder {
    /// Declares a teacher, even if they instruct no students.
    #[must_use]
    pub fn with_teacher(mut self, teacher: impl Into<TeacherId>) -> Self {
        self.graph.intern_teacher(teacher.into());
        self
    }

    /// Declares a student, even if no teacher instructs them.
    #[must_use]
    pub fn with_student(mut self, student: impl Into<StudentId>) -> Self {
        self.graph.intern_student(student.into());
        self
    }

    /// Records that `teacher` instructs `student`. Repeated pairs are ignored.
    #[must_use]
    pub fn with_pair(
        mut self,
        teacher: impl Into<TeacherId>,
        student: impl Into<StudentId>,
    ) -> Self {
        self.graph.insert_pair(teacher.into(), student.into());
        self
    }

    /// Records every pair yielded by `pairs`.
    #[must_use]
    pub fn with_pairs<I, T, S>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<TeacherId>,
        S: Into<StudentId>,
    {
        for (teacher, student) in pairs {
            self.graph.insert_pair(teacher.into(), student.into());
        }
        self
    }

    /// Finalises the graph and derives the neighbour-teacher table.
    #[must_use]
    pub fn build(self) -> RelationGraph {
        let mut graph = self.graph;
        graph.neighbours = (0..graph.teachers.len())
            .map(|teacher| graph.derive_neighbours(teacher))
            .collect();
        graph
    }
}

impl RelationGraph {
    /// Returns a builder for graphs that need isolated teachers or students.
    #[must_use]
    pub fn builder() -> RelationGraphBuilder {
        RelationGraphBuilder::default()
    }

    /// Builds a graph from `(teacher, student)` pairs.
    ///
    /// Duplicate pairs are idempotent and empty input yields an empty graph.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::RelationGraph;
    ///
    /// let graph = RelationGraph::build([("T1", "S1"), ("T1", "S1")]);
    /// assert_eq!(graph.pair_count(), 1);
    /// assert!(RelationGraph::build(Vec::<(&str, &str)>::new()).is_empty());
    /// ```
    #[must_use]
    pub fn build<I, T, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: Into<TeacherId>,
        S: Into<StudentId>,
    {
        Self::builder().with_pairs(pairs).build()
    }

    /// Teachers in first-seen order.
    #[must_use]
    pub fn teachers(&self) -> &[TeacherId] {
        &self.teachers
    }

    /// Students in first-seen order.
    #[must_use]
    pub fn students(&self) -> &[StudentId] {
        &self.students
    }

    /// Number of distinct teachers.
    #[must_use]
    pub fn teacher_count(&self) -> usize {
        self.teachers.len()
    }

    /// Number of distinct students.
    #[must_use]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Number of distinct teacher/student pairs.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.teacher_to_students.iter().map(BTreeSet::len).sum()
    }

    /// Returns `true` when the graph holds neither teachers nor students.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.teachers.is_empty() && self.students.is_empty()
    }

    /// Returns `true` if `name` identifies a teacher in this graph.
    #[must_use]
    pub fn is_teacher(&self, name: &str) -> bool {
        self.teacher_index.contains_key(name)
    }

    /// Returns `true` if `name` identifies a student in this graph.
    #[must_use]
    pub fn is_student(&self, name: &str) -> bool {
        self.student_index.contains_key(name)
    }

    /// Students instructed by `teacher`; empty when the teacher is unknown.
    pub fn students_of<'a>(
        &'a self,
        teacher: &str,
    ) -> impl Iterator<Item = &'a StudentId> + use<'a> {
        self.teacher_index
            .get(teacher)
            .map_or(&EMPTY, |&index| self.teacher_students(index))
            .iter()
            .map(|&student| self.student_id(student))
    }

    /// Teachers instructing `student`; empty when the student is unknown.
    pub fn teachers_of<'a>(
        &'a self,
        student: &str,
    ) -> impl Iterator<Item = &'a TeacherId> + use<'a> {
        self.student_index
            .get(student)
            .map_or(&EMPTY, |&index| self.student_teachers(index))
            .iter()
            .map(|&teacher| self.teacher_id(teacher))
    }

    /// Returns `true` if `teacher` instructs `student`.
    #[must_use]
    pub fn student_has_teacher(&self, student: &str, teacher: &str) -> bool {
        match (self.student_index.get(student), self.teacher_index.get(teacher)) {
            (Some(&student), Some(&teacher)) => self.student_teachers(student).contains(&teacher),
            _ => false,
        }
    }

    /// Distinct teachers sharing at least one student with `teacher`,
    /// excluding `teacher` itself.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::RelationGraph;
    ///
    /// let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1"), ("T3", "S2")]);
    /// let neighbours: Vec<&str> = graph.neighbour_teachers("T1").map(|t| t.as_str()).collect();
    /// assert_eq!(neighbours, ["T2"]);
    /// ```
    pub fn neighbour_teachers<'a>(
        &'a self,
        teacher: &str,
    ) -> impl Iterator<Item = &'a TeacherId> + use<'a> {
        self.teacher_index
            .get(teacher)
            .map_or(&EMPTY, |&index| self.neighbour_indices(index))
            .iter()
            .map(|&neighbour| self.teacher_id(neighbour))
    }

    /// Number of students shared by two teachers. Symmetric; zero when either
    /// teacher is unknown.
    #[must_use]
    pub fn overlap_count(&self, left: &str, right: &str) -> usize {
        match (self.teacher_index.get(left), self.teacher_index.get(right)) {
            (Some(&left), Some(&right)) => self.shared_students(left, right),
            _ => 0,
        }
    }

    /// Total shared-student weight between `teacher` and every member of
    /// `others`; entries equal to `teacher` or unknown to the graph contribute
    /// nothing.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::RelationGraph;
    ///
    /// let graph = RelationGraph::build([
    ///     ("T1", "S1"), ("T1", "S2"), ("T2", "S1"), ("T2", "S2"), ("T3", "S2"),
    /// ]);
    /// assert_eq!(graph.overlap_with("T2", ["T1", "T3"]), 3);
    /// ```
    #[must_use]
    pub fn overlap_with<'a, I>(&self, teacher: &str, others: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        let Some(&index) = self.teacher_index.get(teacher) else {
            return 0;
        };
        others
            .into_iter()
            .filter_map(|other| self.teacher_index.get(other).copied())
            .filter(|&other| other != index)
            .map(|other| self.shared_students(index, other))
            .sum()
    }

    /// Every `(teacher, student)` pair, grouped by teacher in first-seen order.
    pub fn pairs(&self) -> impl Iterator<Item = (&TeacherId, &StudentId)> + '_ {
        self.teacher_to_students
            .iter()
            .enumerate()
            .flat_map(move |(teacher, students)| {
                students
                    .iter()
                    .map(move |&student| (self.teacher_id(teacher), self.student_id(student)))
            })
    }

    /// Returns a copy of the graph with the named teachers and students
    /// removed from both sides of the relation.
    ///
    /// The result is rebuilt from the surviving pairs, so anyone left without
    /// a relation disappears too. Unknown names are ignored.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::RelationGraph;
    ///
    /// let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1"), ("T2", "S2")]);
    /// let reduced = graph.without(["T2"], []);
    /// assert!(!reduced.is_teacher("T2"));
    /// assert!(!reduced.is_student("S2"));
    /// assert_eq!(reduced.student_count(), 1);
    /// ```
    #[must_use]
    pub fn without<'a, T, S>(&self, teachers: T, students: S) -> Self
    where
        T: IntoIterator<Item = &'a str>,
        S: IntoIterator<Item = &'a str>,
    {
        let removed_teachers: HashSet<&str> = teachers.into_iter().collect();
        let removed_students: HashSet<&str> = students.into_iter().collect();

        Self::build(
            self.pairs()
                .filter(|(teacher, student)| {
                    !removed_teachers.contains(teacher.as_str())
                        && !removed_students.contains(student.as_str())
                })
                .map(|(teacher, student)| (teacher.clone(), student.clone())),
        )
    }

    pub(crate) fn teacher_index_of(&self, teacher: &str) -> Option<usize> {
        self.teacher_index.get(teacher).copied()
    }

    pub(crate) fn student_index_of(&self, student: &str) -> Option<usize> {
        self.student_index.get(student).copied()
    }

    pub(crate) fn teacher_id(&self, teacher: usize) -> &TeacherId {
        &self.teachers[teacher]
    }

    pub(crate) fn student_id(&self, student: usize) -> &StudentId {
        &self.students[student]
    }

    pub(crate) fn teacher_students(&self, teacher: usize) -> &BTreeSet<usize> {
        self.teacher_to_students.get(teacher).unwrap_or(&EMPTY)
    }

    pub(crate) fn student_teachers(&self, student: usize) -> &BTreeSet<usize> {
        self.student_to_teachers.get(student).unwrap_or(&EMPTY)
    }

    pub(crate) fn neighbour_indices(&self, teacher: usize) -> &BTreeSet<usize> {
        self.neighbours.get(teacher).unwrap_or(&EMPTY)
    }

    pub(crate) fn shared_students(&self, left: usize, right: usize) -> usize {
        let (small, large) = {
            let a = self.teacher_students(left);
            let b = self.teacher_students(right);
            if a.len() <= b.len() { (a, b) } else { (b, a) }
        };
        small
            .iter()
            .filter(|&&student| large.contains(&student))
            .count()
    }

    fn intern_teacher(&mut self, teacher: TeacherId) -> usize {
        if let Some(&index) = self.teacher_index.get(&teacher) {
            return index;
        }
        let index = self.teachers.len();
        self.teacher_index.insert(teacher.clone(), index);
        self.teachers.push(teacher);
        self.teacher_to_students.push(BTreeSet::new());
        index
    }

    fn intern_student(&mut self, student: StudentId) -> usize {
        if let Some(&index) = self.student_index.get(&student) {
            return index;
        }
        let index = self.students.len();
        self.student_index.insert(student.clone(), index);
        self.students.push(student);
        self.student_to_teachers.push(BTreeSet::new());
        index
    }

    fn insert_pair(&mut self, teacher: TeacherId, student: StudentId) {
        let teacher = self.intern_teacher(teacher);
        let student = self.intern_student(student);
        self.teacher_to_students[teacher].insert(student);
        self.student_to_teachers[student].insert(teacher);
    }

    fn derive_neighbours(&self, teacher: usize) -> BTreeSet<usize> {
        self.teacher_students(teacher)
            .iter()
            .flat_map(|&student| self.student_teachers(student).iter().copied())
            .filter(|&other| other != teacher)
            .collect()
    }
}
