//! Grouping orchestration.
//!
//! Provides the [`Cohort`] entry point, which runs clustering, assignment and
//! repair over a [`RelationGraph`], optionally several times, and keeps the
//! best grouping.

use std::num::NonZeroUsize;

use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng};
use tracing::{debug, info, instrument, warn};

use crate::{
    Result,
    assign::StudentAssigner,
    builder::CohortBuilder,
    clusterer::TeacherClusterer,
    graph::RelationGraph,
    ids::{Member, StudentId, TeacherId},
    partition::Partition,
    repair::InvariantRepairer,
    result::Grouping,
    rng::mix_attempt_seed,
    sizing::GroupSizing,
};

/// Entry point for running the grouping pipeline.
///
/// # Examples
/// ```
/// use cohort_core::{CohortBuilder, RelationGraph};
///
/// let graph = RelationGraph::build([
///     ("T1", "S1"), ("T1", "S2"), ("T2", "S1"), ("T2", "S2"),
///     ("T3", "S3"), ("T4", "S3"),
/// ]);
/// let cohort = CohortBuilder::new()
///     .with_teachers_per_group(2)
///     .with_seed(7)
///     .build()?;
/// let grouping = cohort.run(&graph);
/// assert_eq!(grouping.len(), 2);
/// assert_eq!(grouping.repair_report().students_below_target(), 0);
/// # Ok::<(), cohort_core::CohortError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Cohort {
    teachers_per_group: NonZeroUsize,
    seed: Option<u64>,
    attempts: NonZeroUsize,
}

impl Cohort {
    pub(crate) fn new(
        teachers_per_group: NonZeroUsize,
        seed: Option<u64>,
        attempts: NonZeroUsize,
    ) -> Self {
        Self {
            teachers_per_group,
            seed,
            attempts,
        }
    }

    /// Returns the requested teachers per group.
    #[must_use]
    pub fn teachers_per_group(&self) -> NonZeroUsize {
        self.teachers_per_group
    }

    /// Returns the configured base seed, if any.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns the number of attempts per run.
    #[must_use]
    pub fn attempts(&self) -> NonZeroUsize {
        self.attempts
    }

    /// Sizing this configuration derives for `graph`.
    #[must_use]
    pub fn sizing_for(&self, graph: &RelationGraph) -> GroupSizing {
        GroupSizing::new(graph.teacher_count(), self.teachers_per_group.get())
    }

    /// Groups the teachers and students of `graph`.
    ///
    /// Uses the configured seed, or a fresh one when none was set. A graph
    /// without teachers or without students yields an empty grouping.
    #[must_use]
    pub fn run(&self, graph: &RelationGraph) -> Grouping {
        let base_seed = self.seed.unwrap_or_else(rand::random);
        self.run_seeded(graph, base_seed)
    }

    /// Groups `graph` drawing randomness from `rng`.
    ///
    /// With a single attempt every decision is drawn from `rng` directly;
    /// otherwise `rng` supplies the base seed for the attempts.
    ///
    /// # Examples
    /// ```
    /// use cohort_core::{CohortBuilder, RelationGraph};
    /// use rand::{SeedableRng, rngs::SmallRng};
    ///
    /// let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1")]);
    /// let cohort = CohortBuilder::new().build()?;
    /// let first = cohort.run_with_rng(&graph, &mut SmallRng::seed_from_u64(5));
    /// let second = cohort.run_with_rng(&graph, &mut SmallRng::seed_from_u64(5));
    /// assert_eq!(first, second);
    /// # Ok::<(), cohort_core::CohortError>(())
    /// ```
    #[must_use]
    pub fn run_with_rng<R: Rng + ?Sized>(&self, graph: &RelationGraph, rng: &mut R) -> Grouping {
        if self.attempts.get() == 1 {
            return self.run_logged(graph, |sizing| run_once(graph, sizing, 0, rng));
        }
        let base_seed = rng.next_u64();
        self.run_seeded(graph, base_seed)
    }

    fn run_seeded(&self, graph: &RelationGraph, base_seed: u64) -> Grouping {
        self.run_logged(graph, |sizing| self.best_attempt(graph, sizing, base_seed))
    }

    #[instrument(
        name = "core.run",
        skip(self, graph, body),
        fields(
            teachers = graph.teacher_count(),
            students = graph.student_count(),
            teachers_per_group = %self.teachers_per_group,
            attempts = %self.attempts,
        ),
    )]
    fn run_logged<F>(&self, graph: &RelationGraph, body: F) -> Grouping
    where
        F: FnOnce(GroupSizing) -> Grouping,
    {
        if graph.teacher_count() == 0 || graph.student_count() == 0 {
            warn!("relation has no teachers or no students, returning empty grouping");
            return Grouping::empty();
        }
        let sizing = self.sizing_for(graph);
        let grouping = body(sizing);
        info!(
            groups = grouping.len(),
            attempt = grouping.attempt(),
            target = sizing.target(),
            hard_max = sizing.hard_max(),
            "grouping completed"
        );
        grouping
    }

    fn best_attempt(&self, graph: &RelationGraph, sizing: GroupSizing, base_seed: u64) -> Grouping {
        let mut best: Option<((usize, usize), Grouping)> = None;
        for attempt in 0..self.attempts.get() {
            let mut rng = SmallRng::seed_from_u64(mix_attempt_seed(base_seed, attempt));
            let candidate = run_once(graph, sizing, attempt, &mut rng);
            let rank = candidate.quality(graph).rank();
            debug!(
                attempt,
                students_below_target = rank.0,
                teachers_without_own_student = rank.1,
                "attempt completed"
            );

            let improves = best.as_ref().is_none_or(|(current, _)| rank < *current);
            if improves {
                best = Some((rank, candidate));
            }
            if rank == (0, 0) {
                break;
            }
        }
        best.map_or_else(Grouping::empty, |(_, grouping)| grouping)
    }
}

fn run_once<R: Rng + ?Sized>(
    graph: &RelationGraph,
    sizing: GroupSizing,
    attempt: usize,
    rng: &mut R,
) -> Grouping {
    let clusters = TeacherClusterer::new(graph, sizing).cluster(rng);
    let mut partition = Partition::from_teacher_clusters(graph, clusters);
    let order = StudentAssigner::new(graph).assign(&mut partition, rng);
    let report = InvariantRepairer::new(graph, sizing).repair(&mut partition, &order, rng);
    Grouping::new(partition.into_groups(graph), sizing, report, attempt)
}

/// Groups `(teacher, student)` pairs in one call and flattens each group to
/// its teachers followed by its students.
///
/// # Errors
/// Returns [`crate::CohortError::InvalidTeachersPerGroup`] when
/// `teachers_per_group` is zero.
///
/// # Examples
/// ```
/// use cohort_core::create_groupings;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let groups = create_groupings(
///     [("T1", "S1"), ("T2", "S1")],
///     2,
///     &mut SmallRng::seed_from_u64(1),
/// )?;
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].len(), 3);
///
/// let empty = create_groupings(Vec::<(&str, &str)>::new(), 2, &mut SmallRng::seed_from_u64(1))?;
/// assert!(empty.is_empty());
/// # Ok::<(), cohort_core::CohortError>(())
/// ```
pub fn create_groupings<I, T, S, R>(
    pairs: I,
    teachers_per_group: usize,
    rng: &mut R,
) -> Result<Vec<Vec<Member>>>
where
    I: IntoIterator<Item = (T, S)>,
    T: Into<TeacherId>,
    S: Into<StudentId>,
    R: Rng + ?Sized,
{
    let cohort = CohortBuilder::new()
        .with_teachers_per_group(teachers_per_group)
        .build()?;
    let graph = RelationGraph::build(pairs);
    Ok(cohort.run_with_rng(&graph, rng).to_members())
}
