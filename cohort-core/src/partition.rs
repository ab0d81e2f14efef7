//! Working cluster state shared by the assignment and repair stages.
//!
//! Cluster membership and the reverse indices are only ever changed through
//! the methods on [`Partition`], so a cluster's sets and the index always agree
//! between calls.

use std::collections::BTreeSet;

use crate::{graph::RelationGraph, result::Group};

/// Teachers and students currently placed in one cluster.
#[derive(Clone, Debug, Default)]
pub(crate) struct Cluster {
    pub(crate) teachers: BTreeSet<usize>,
    pub(crate) students: BTreeSet<usize>,
}

#[derive(Clone, Debug)]
pub(crate) struct Partition {
    clusters: Vec<Cluster>,
    teacher_to_cluster: Vec<Option<usize>>,
    student_to_cluster: Vec<Option<usize>>,
}

impl Partition {
    /// Seeds the partition with teacher clusters; no student is placed yet.
    pub(crate) fn from_teacher_clusters(
        graph: &RelationGraph,
        teacher_clusters: Vec<Vec<usize>>,
    ) -> Self {
        let mut teacher_to_cluster = vec![None; graph.teacher_count()];
        let clusters = teacher_clusters
            .into_iter()
            .enumerate()
            .map(|(index, teachers)| {
                for &teacher in &teachers {
                    if let Some(slot) = teacher_to_cluster.get_mut(teacher) {
                        *slot = Some(index);
                    }
                }
                Cluster {
                    teachers: teachers.into_iter().collect(),
                    students: BTreeSet::new(),
                }
            })
            .collect();
        Self {
            clusters,
            teacher_to_cluster,
            student_to_cluster: vec![None; graph.student_count()],
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.clusters.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub(crate) fn cluster(&self, index: usize) -> &Cluster {
        &self.clusters[index]
    }

    pub(crate) fn teacher_cluster(&self, teacher: usize) -> Option<usize> {
        self.teacher_to_cluster.get(teacher).copied().flatten()
    }

    pub(crate) fn student_cluster(&self, student: usize) -> Option<usize> {
        self.student_to_cluster.get(student).copied().flatten()
    }

    /// Places `student` in cluster `to`, removing it from its previous
    /// cluster if it had one.
    pub(crate) fn move_student(&mut self, student: usize, to: usize) {
        if let Some(from) = self.student_cluster(student) {
            self.clusters[from].students.remove(&student);
        }
        self.clusters[to].students.insert(student);
        self.student_to_cluster[student] = Some(to);
    }

    /// Moves `teacher` into cluster `to`.
    pub(crate) fn move_teacher(&mut self, teacher: usize, to: usize) {
        if let Some(from) = self.teacher_cluster(teacher) {
            self.clusters[from].teachers.remove(&teacher);
        }
        self.clusters[to].teachers.insert(teacher);
        self.teacher_to_cluster[teacher] = Some(to);
    }

    /// Number of the student's teachers present in cluster `index`.
    pub(crate) fn student_overlap(
        &self,
        graph: &RelationGraph,
        student: usize,
        index: usize,
    ) -> usize {
        let teachers = &self.clusters[index].teachers;
        graph
            .student_teachers(student)
            .iter()
            .filter(|&teacher| teachers.contains(teacher))
            .count()
    }

    /// Overlap of `student` with the cluster currently holding it.
    pub(crate) fn current_overlap(&self, graph: &RelationGraph, student: usize) -> usize {
        self.student_cluster(student)
            .map_or(0, |index| self.student_overlap(graph, student, index))
    }

    /// Whether `teacher` has one of their own students, other than `except`,
    /// in cluster `index`.
    pub(crate) fn teacher_has_own_student(
        &self,
        graph: &RelationGraph,
        teacher: usize,
        index: usize,
        except: Option<usize>,
    ) -> bool {
        let students = &self.clusters[index].students;
        graph
            .teacher_students(teacher)
            .iter()
            .any(|student| Some(*student) != except && students.contains(student))
    }

    /// Freezes the partition into output groups, members in input order.
    pub(crate) fn into_groups(self, graph: &RelationGraph) -> Vec<Group> {
        self.clusters
            .into_iter()
            .map(|cluster| Group {
                teachers: cluster
                    .teachers
                    .into_iter()
                    .map(|teacher| graph.teacher_id(teacher).clone())
                    .collect(),
                students: cluster
                    .students
                    .into_iter()
                    .map(|student| graph.student_id(student).clone())
                    .collect(),
            })
            .collect()
    }
}
