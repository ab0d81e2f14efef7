//! Placement of students into teacher clusters.

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, instrument};

use crate::{
    graph::RelationGraph,
    partition::Partition,
    rng::{maximal_by_score, pick},
};

/// Places every student in the cluster holding the most of their teachers.
pub(crate) struct StudentAssigner<'g> {
    graph: &'g RelationGraph,
}

impl<'g> StudentAssigner<'g> {
    pub(crate) fn new(graph: &'g RelationGraph) -> Self {
        Self { graph }
    }

    /// Assigns students in a shuffled order, breaking overlap ties uniformly
    /// at random, and returns the visiting order.
    ///
    /// A partition without clusters leaves every student unplaced.
    #[instrument(
        name = "core.assign_students",
        skip_all,
        fields(students = self.graph.student_count(), clusters = partition.len()),
    )]
    pub(crate) fn assign<R: Rng + ?Sized>(
        &self,
        partition: &mut Partition,
        rng: &mut R,
    ) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.graph.student_count()).collect();
        order.shuffle(rng);
        if partition.is_empty() {
            return order;
        }

        let mut uncovered = 0_usize;
        for &student in &order {
            let best = maximal_by_score(0..partition.len(), |&cluster| {
                partition.student_overlap(self.graph, student, cluster)
            });
            let Some(chosen) = pick(&best, rng) else {
                continue;
            };
            if partition.student_overlap(self.graph, student, chosen) == 0 {
                uncovered += 1;
            }
            partition.move_student(student, chosen);
        }
        debug!(uncovered, "student assignment completed");
        order
    }
}
