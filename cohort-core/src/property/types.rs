//! Fixture types for grouping property tests.

use test_strategy::Arbitrary;

use crate::graph::RelationGraph;

/// Shape of the generated teaching relation.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum RelationShape {
    /// Every student has one to four teachers drawn at random.
    #[weight(3)]
    Random,
    /// Teachers come in pairs that share all of their students.
    #[weight(2)]
    Paired,
    /// Every student has exactly one teacher.
    #[weight(1)]
    Sparse,
    /// Several random relations with no shared names.
    #[weight(2)]
    Disconnected,
    /// One teacher teaches every student; the others teach a few each.
    #[weight(1)]
    Hub,
}

/// A generated relation plus the run parameters used against it.
#[derive(Clone, Debug)]
pub(super) struct RelationFixture {
    /// Shape the pairs were generated with.
    pub shape: RelationShape,
    /// `(teacher, student)` pairs.
    pub pairs: Vec<(String, String)>,
    /// Teachers with no students at all.
    pub isolated_teachers: Vec<String>,
    /// Requested teachers per group.
    pub teachers_per_group: usize,
    /// Base seed for the run.
    pub seed: u64,
}

impl RelationFixture {
    pub(super) fn graph(&self) -> RelationGraph {
        self.isolated_teachers
            .iter()
            .fold(RelationGraph::builder(), |builder, teacher| {
                builder.with_teacher(teacher.as_str())
            })
            .with_pairs(self.pairs.iter().map(|(t, s)| (t.as_str(), s.as_str())))
            .build()
    }
}
