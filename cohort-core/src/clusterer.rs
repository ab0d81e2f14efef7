//! Greedy partitioning of teachers into bounded clusters.
//!
//! Each cluster is seeded from the unassigned teacher with the most
//! unassigned neighbours and grown one teacher at a time, always adding the
//! neighbour that shares the most students with the cluster so far, until the
//! hard cap is reached or no unassigned neighbour remains. Singleton clusters
//! are folded into the smallest cluster with room afterwards.

use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, instrument};

use crate::{
    graph::RelationGraph,
    rng::{maximal_by_score, pick},
    sizing::GroupSizing,
};

/// Partitions every teacher of a graph into clusters bounded by
/// [`GroupSizing::hard_max`].
pub(crate) struct TeacherClusterer<'g> {
    graph: &'g RelationGraph,
    sizing: GroupSizing,
}

impl<'g> TeacherClusterer<'g> {
    pub(crate) fn new(graph: &'g RelationGraph, sizing: GroupSizing) -> Self {
        Self { graph, sizing }
    }

    /// Returns teacher clusters as index lists; empty when the graph has no
    /// teachers.
    #[instrument(
        name = "core.cluster_teachers",
        skip_all,
        fields(teachers = self.graph.teacher_count(), hard_max = self.sizing.hard_max()),
    )]
    pub(crate) fn cluster<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Vec<usize>> {
        let mut unassigned = vec![true; self.graph.teacher_count()];
        let mut remaining = unassigned.len();
        let mut grown = Vec::new();

        while remaining > 0 {
            let Some(seed) = self.pick_seed(&unassigned, rng) else {
                break;
            };
            let cluster = self.grow(seed, &mut unassigned, rng);
            remaining -= cluster.len();
            grown.push(cluster);
        }

        let clusters = self.merge_singletons(grown);
        debug!(clusters = clusters.len(), "teacher clustering completed");
        clusters
    }

    fn pick_seed<R: Rng + ?Sized>(&self, unassigned: &[bool], rng: &mut R) -> Option<usize> {
        let pool = (0..unassigned.len()).filter(|&teacher| unassigned[teacher]);
        let best = maximal_by_score(pool, |&teacher| {
            self.graph
                .neighbour_indices(teacher)
                .iter()
                .filter(|&&neighbour| unassigned[neighbour])
                .count()
        });
        pick(&best, rng)
    }

    fn grow<R: Rng + ?Sized>(
        &self,
        seed: usize,
        unassigned: &mut [bool],
        rng: &mut R,
    ) -> Vec<usize> {
        let mut cluster = vec![seed];
        unassigned[seed] = false;

        while cluster.len() < self.sizing.hard_max() {
            let frontier: BTreeSet<usize> = cluster
                .iter()
                .flat_map(|&member| self.graph.neighbour_indices(member).iter().copied())
                .filter(|&candidate| unassigned[candidate])
                .collect();
            if frontier.is_empty() {
                break;
            }

            let best = maximal_by_score(frontier, |&candidate| {
                cluster
                    .iter()
                    .map(|&member| self.graph.shared_students(candidate, member))
                    .sum()
            });
            let Some(chosen) = pick(&best, rng) else {
                break;
            };
            unassigned[chosen] = false;
            cluster.push(chosen);
        }
        cluster
    }

    fn merge_singletons(&self, grown: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
        let (singles, mut merged): (Vec<_>, Vec<_>) =
            grown.into_iter().partition(|cluster| cluster.len() == 1);

        for teacher in singles.into_iter().flatten() {
            let target = merged
                .iter()
                .enumerate()
                .filter(|(_, cluster)| self.sizing.has_room(cluster.len()))
                .min_by_key(|(_, cluster)| cluster.len())
                .map(|(index, _)| index);
            match target {
                Some(index) => merged[index].push(teacher),
                None => {
                    debug!(teacher, "no cluster has room; keeping last-resort singleton");
                    merged.push(vec![teacher]);
                }
            }
        }
        merged
    }
}
