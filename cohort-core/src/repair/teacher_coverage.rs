//! Phase A: give every teacher one of their own students.

use rand::Rng;
use tracing::{debug, instrument};

use super::{InvariantRepairer, RepairReport};
use crate::{partition::Partition, rng::pick};

impl InvariantRepairer<'_> {
    /// Visits clusters in order and, within each, a snapshot of its teachers.
    ///
    /// A teacher without an own student first tries to pull one of their
    /// students from a cluster that keeps at least one student; failing that
    /// the teacher follows one of their students into a cluster with room,
    /// provided their current cluster keeps another teacher.
    #[instrument(name = "core.repair_teachers", skip_all)]
    pub(super) fn ensure_teachers_have_students<R: Rng + ?Sized>(
        &self,
        partition: &mut Partition,
        rng: &mut R,
        report: &mut RepairReport,
    ) {
        for cluster in 0..partition.len() {
            let snapshot: Vec<usize> =
                partition.cluster(cluster).teachers.iter().copied().collect();
            for teacher in snapshot {
                let Some(current) = partition.teacher_cluster(teacher) else {
                    continue;
                };
                if partition.teacher_has_own_student(self.graph, teacher, current, None) {
                    continue;
                }
                if self.pull_student(partition, teacher, current, rng) {
                    report.students_moved += 1;
                } else if self.follow_student(partition, teacher, current, rng) {
                    report.teachers_moved += 1;
                } else {
                    debug!(
                        teacher = %self.graph.teacher_id(teacher),
                        "teacher left without own student"
                    );
                    report.degenerate_teachers += 1;
                }
            }
        }
    }

    fn pull_student<R: Rng + ?Sized>(
        &self,
        partition: &mut Partition,
        teacher: usize,
        current: usize,
        rng: &mut R,
    ) -> bool {
        let movable: Vec<usize> = self
            .graph
            .teacher_students(teacher)
            .iter()
            .copied()
            .filter(|&student| {
                partition.student_cluster(student).is_some_and(|donor| {
                    donor != current && partition.cluster(donor).students.len() > 1
                })
            })
            .collect();
        let Some(student) = pick(&movable, rng) else {
            return false;
        };
        partition.move_student(student, current);
        true
    }

    fn follow_student<R: Rng + ?Sized>(
        &self,
        partition: &mut Partition,
        teacher: usize,
        current: usize,
        rng: &mut R,
    ) -> bool {
        if partition.cluster(current).teachers.len() <= 1 {
            return false;
        }
        // One entry per student, so clusters holding more of the teacher's
        // students are proportionally more likely.
        let targets: Vec<usize> = self
            .graph
            .teacher_students(teacher)
            .iter()
            .filter_map(|&student| partition.student_cluster(student))
            .filter(|&target| {
                target != current && self.sizing.has_room(partition.cluster(target).teachers.len())
            })
            .collect();
        let Some(target) = pick(&targets, rng) else {
            return false;
        };
        partition.move_teacher(teacher, target);
        true
    }
}
