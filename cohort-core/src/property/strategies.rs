//! Relation generators for grouping property tests.

use proptest::prelude::*;
use rand::{Rng, RngCore, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use super::types::{RelationFixture, RelationShape};

const MAX_TEACHERS: usize = 12;
const MAX_STUDENTS: usize = 30;

/// Generates fixtures across every [`RelationShape`].
pub(super) fn relation_fixture_strategy() -> impl Strategy<Value = RelationFixture> {
    (any::<RelationShape>(), any::<u64>(), 1_usize..=6).prop_map(
        |(shape, seed, teachers_per_group)| {
            let mut rng = SmallRng::seed_from_u64(seed);
            generate_fixture(shape, teachers_per_group, &mut rng)
        },
    )
}

/// Generates a fixture for an explicit shape.
pub(super) fn generate_fixture(
    shape: RelationShape,
    teachers_per_group: usize,
    rng: &mut SmallRng,
) -> RelationFixture {
    let pairs = match shape {
        RelationShape::Random => random_pairs("", rng),
        RelationShape::Paired => paired(rng),
        RelationShape::Sparse => sparse(rng),
        RelationShape::Disconnected => (0..rng.gen_range(2..=4))
            .flat_map(|component| random_pairs(&format!("C{component}-"), rng))
            .collect(),
        RelationShape::Hub => hub(rng),
    };
    let isolated_teachers = (0..rng.gen_range(0..=1))
        .map(|index| format!("Idle{index}"))
        .collect();
    RelationFixture {
        shape,
        pairs,
        isolated_teachers,
        teachers_per_group,
        seed: rng.next_u64(),
    }
}

fn random_pairs(prefix: &str, rng: &mut SmallRng) -> Vec<(String, String)> {
    let teachers: Vec<String> = (0..rng.gen_range(2..=MAX_TEACHERS))
        .map(|index| format!("{prefix}T{index}"))
        .collect();
    let mut pairs = Vec::new();
    for student in 0..rng.gen_range(1..=MAX_STUDENTS) {
        let load = rng.gen_range(1..=teachers.len().min(4));
        for teacher in teachers.choose_multiple(rng, load) {
            pairs.push((teacher.clone(), format!("{prefix}S{student}")));
        }
    }
    pairs
}

fn paired(rng: &mut SmallRng) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for pair in 0..rng.gen_range(1..=5) {
        for student in 0..rng.gen_range(1..=5) {
            let name = format!("P{pair}S{student}");
            pairs.push((format!("P{pair}A"), name.clone()));
            pairs.push((format!("P{pair}B"), name));
        }
    }
    pairs
}

fn sparse(rng: &mut SmallRng) -> Vec<(String, String)> {
    let teachers = rng.gen_range(1..=MAX_TEACHERS);
    (0..rng.gen_range(1..=MAX_STUDENTS))
        .map(|student| {
            let teacher = rng.gen_range(0..teachers);
            (format!("T{teacher}"), format!("S{student}"))
        })
        .collect()
}

fn hub(rng: &mut SmallRng) -> Vec<(String, String)> {
    let others = rng.gen_range(1..MAX_TEACHERS);
    let mut pairs = Vec::new();
    for student in 0..rng.gen_range(1..=MAX_STUDENTS) {
        let name = format!("S{student}");
        pairs.push(("Hub".to_owned(), name.clone()));
        if rng.gen_bool(0.5) {
            pairs.push((format!("T{}", rng.gen_range(0..others)), name));
        }
    }
    pairs
}
