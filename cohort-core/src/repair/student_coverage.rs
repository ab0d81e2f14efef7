//! Phase B: raise students towards the coverage target.

use tracing::{debug, instrument};

use super::{COVERAGE_TARGET, CoverageStep, InvariantRepairer, RepairReport};
use crate::partition::Partition;

impl InvariantRepairer<'_> {
    /// Visits students in `order` once each. A student below the target first
    /// tries to pull their own teachers into their cluster, then to move to
    /// the first cluster with a strictly better overlap of at least the
    /// target.
    #[instrument(name = "core.repair_students", skip_all, fields(students = order.len()))]
    pub(super) fn improve_student_coverage(
        &self,
        partition: &mut Partition,
        order: &[usize],
        report: &mut RepairReport,
    ) {
        for &student in order {
            let Some(current) = partition.student_cluster(student) else {
                continue;
            };
            let before = partition.student_overlap(self.graph, student, current);
            if before >= COVERAGE_TARGET {
                continue;
            }

            let pulled = self.pull_teachers(partition, student, current);
            report.teachers_moved += pulled;
            if partition.student_overlap(self.graph, student, current) < COVERAGE_TARGET
                && self.relocate(partition, student, current)
            {
                report.students_moved += 1;
            }

            let after = partition.current_overlap(self.graph, student);
            if after < COVERAGE_TARGET {
                debug!(
                    student = %self.graph.student_id(student),
                    after,
                    "student below coverage target"
                );
            }
            report.coverage_steps.push(CoverageStep {
                student: self.graph.student_id(student).clone(),
                before,
                after,
            });
        }
    }

    /// Pulls the student's teachers into `current` until the target is met;
    /// returns the number of teachers moved.
    fn pull_teachers(&self, partition: &mut Partition, student: usize, current: usize) -> usize {
        let mut moved = 0;
        for &teacher in self.graph.student_teachers(student) {
            let Some(donor) = partition.teacher_cluster(teacher) else {
                continue;
            };
            if donor == current
                || partition.cluster(donor).teachers.len() <= 1
                || !self.sizing.has_room(partition.cluster(current).teachers.len())
                || !self.donor_stays_anchored(partition, teacher, donor)
            {
                continue;
            }
            partition.move_teacher(teacher, current);
            moved += 1;
            if partition.student_overlap(self.graph, student, current) >= COVERAGE_TARGET {
                break;
            }
        }
        moved
    }

    /// Whether some teacher of `donor` other than `leaving` still has one of
    /// their own students there.
    fn donor_stays_anchored(&self, partition: &Partition, leaving: usize, donor: usize) -> bool {
        partition
            .cluster(donor)
            .teachers
            .iter()
            .filter(|&&other| other != leaving)
            .any(|&other| partition.teacher_has_own_student(self.graph, other, donor, None))
    }

    fn relocate(&self, partition: &mut Partition, student: usize, current: usize) -> bool {
        if partition.cluster(current).students.len() <= 1 {
            return false;
        }
        let mut best = None;
        let mut best_overlap = partition.student_overlap(self.graph, student, current);
        for candidate in (0..partition.len()).filter(|&index| index != current) {
            let overlap = partition.student_overlap(self.graph, student, candidate);
            if overlap > best_overlap {
                best_overlap = overlap;
                best = Some(candidate);
            }
        }
        let Some(target) = best else {
            return false;
        };
        if best_overlap < COVERAGE_TARGET {
            return false;
        }

        let strands_teacher = partition.cluster(current).teachers.iter().any(|&teacher| {
            !partition.teacher_has_own_student(self.graph, teacher, current, Some(student))
        });
        if strands_teacher {
            return false;
        }
        partition.move_student(student, target);
        true
    }
}
