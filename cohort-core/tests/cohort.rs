//! Tests for the `Cohort` orchestration API.

mod common;

use cohort_core::{
    CohortBuilder, CohortError, CohortErrorCode, DEFAULT_TEACHERS_PER_GROUP, RelationGraph,
    create_groupings,
};
use cohort_test_support::tracing::RecordingLayer;
use common::{normalised, two_pairs};
use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

#[fixture]
fn graph() -> RelationGraph {
    two_pairs()
}

#[rstest]
fn builder_defaults() {
    let builder = CohortBuilder::new();
    assert_eq!(builder.teachers_per_group(), DEFAULT_TEACHERS_PER_GROUP);
    assert_eq!(builder.seed(), None);
    assert_eq!(builder.attempts(), 1);

    let cohort = builder.build().expect("defaults valid");
    assert_eq!(cohort.teachers_per_group().get(), 4);
    assert_eq!(cohort.attempts().get(), 1);
}

#[rstest]
#[case::teachers_per_group(
    CohortBuilder::new().with_teachers_per_group(0),
    CohortError::InvalidTeachersPerGroup { got: 0 },
    CohortErrorCode::InvalidTeachersPerGroup,
)]
#[case::attempts(
    CohortBuilder::new().with_attempts(0),
    CohortError::InvalidAttempts { got: 0 },
    CohortErrorCode::InvalidAttempts,
)]
fn builder_rejects_zero_values(
    #[case] builder: CohortBuilder,
    #[case] expected: CohortError,
    #[case] code: CohortErrorCode,
) {
    let err = builder.build().expect_err("builder must reject zero");
    assert_eq!(err, expected);
    assert_eq!(err.code(), code);
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2024)]
fn two_teacher_pairs_form_two_complete_groups(graph: RelationGraph, #[case] seed: u64) {
    let cohort = CohortBuilder::new()
        .with_teachers_per_group(2)
        .with_seed(seed)
        .build()
        .expect("configuration must be valid");
    let grouping = cohort.run(&graph);

    assert_eq!(
        normalised(&grouping),
        [vec!["S1", "S2", "T1", "T2"], vec!["S3", "T3", "T4"]]
    );
    let report = grouping.repair_report();
    assert_eq!(report.students_moved(), 0);
    assert_eq!(report.teachers_moved(), 0);
    assert_eq!(report.students_below_target(), 0);
    assert!(report.coverage_steps().is_empty());
    assert_eq!(grouping.group_of_student("S3"), grouping.group_of_teacher("T4"));
}

#[rstest]
fn teacher_without_students_is_reported_not_rejected() {
    let graph = RelationGraph::builder()
        .with_teacher("T0")
        .with_pairs([("T1", "S1"), ("T2", "S1"), ("T1", "S2"), ("T2", "S2")])
        .build();
    let cohort = CohortBuilder::new()
        .with_teachers_per_group(2)
        .with_seed(11)
        .build()
        .expect("configuration must be valid");
    let grouping = cohort.run(&graph);

    assert!(grouping.group_of_teacher("T0").is_some());
    assert_eq!(grouping.repair_report().degenerate_teachers(), 1);
    let quality = grouping.quality(&graph);
    assert!(quality.is_complete());
    let stranded: Vec<&str> = quality
        .teachers_without_own_student()
        .iter()
        .map(|teacher| teacher.as_str())
        .collect();
    assert_eq!(stranded, ["T0"]);
}

#[rstest]
#[case::no_pairs(RelationGraph::build(Vec::<(&str, &str)>::new()))]
#[case::teachers_only(RelationGraph::builder().with_teacher("T1").build())]
#[case::students_only(RelationGraph::builder().with_student("S1").build())]
fn empty_population_yields_no_groups(#[case] graph: RelationGraph) {
    let cohort = CohortBuilder::new().with_seed(1).build().expect("defaults valid");
    let grouping = cohort.run(&graph);
    assert!(grouping.is_empty());
    assert_eq!(grouping.sizing(), None);
}

#[rstest]
fn create_groupings_flattens_teachers_before_students() {
    let groups = create_groupings(
        [("T1", "S1"), ("T2", "S1")],
        2,
        &mut SmallRng::seed_from_u64(9),
    )
    .expect("configuration must be valid");
    let names: Vec<Vec<String>> = groups
        .iter()
        .map(|group| group.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(names, [vec!["T1", "T2", "S1"]]);

    let empty = create_groupings(Vec::<(&str, &str)>::new(), 2, &mut SmallRng::seed_from_u64(9))
        .expect("configuration must be valid");
    assert!(empty.is_empty());
}

#[rstest]
fn seeded_runs_are_reproducible(graph: RelationGraph) {
    let cohort = CohortBuilder::new()
        .with_seed(77)
        .with_attempts(4)
        .build()
        .expect("configuration must be valid");
    assert_eq!(cohort.run(&graph), cohort.run(&graph));
    assert_eq!(
        cohort.run_with_rng(&graph, &mut SmallRng::seed_from_u64(3)),
        cohort.run_with_rng(&graph, &mut SmallRng::seed_from_u64(3)),
    );
}

#[rstest]
fn attempts_stop_at_the_first_perfect_grouping(graph: RelationGraph) {
    let cohort = CohortBuilder::new()
        .with_teachers_per_group(2)
        .with_seed(5)
        .with_attempts(10)
        .build()
        .expect("configuration must be valid");
    let grouping = cohort.run(&graph);
    assert_eq!(grouping.attempt(), 0);
    assert_eq!(grouping.quality(&graph).students_below_target().len(), 0);
}

#[rstest]
fn run_records_core_tracing(graph: RelationGraph) {
    let cohort = CohortBuilder::new()
        .with_teachers_per_group(2)
        .with_seed(3)
        .build()
        .expect("configuration must be valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let grouping = tracing::subscriber::with_default(subscriber, || cohort.run(&graph));
    assert_eq!(grouping.len(), 2);

    let names = layer.span_names();
    for stage in [
        "core.cluster_teachers",
        "core.assign_students",
        "core.repair_teachers",
        "core.repair_students",
        "core.repair",
        "core.run",
    ] {
        assert!(names.iter().any(|name| name == stage), "missing {stage} in {names:?}");
    }
    let run_span = layer.span("core.run").expect("core.run span must exist");
    assert_eq!(run_span.fields.get("teachers"), Some(&"4".to_owned()));
    assert_eq!(run_span.fields.get("students"), Some(&"3".to_owned()));
    assert_eq!(run_span.fields.get("teachers_per_group"), Some(&"2".to_owned()));

    let completed = layer.events_with_message("grouping completed");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].level, Level::INFO);
    assert_eq!(completed[0].fields.get("groups"), Some(&"2".to_owned()));
}

#[rstest]
fn empty_run_warns() {
    let cohort = CohortBuilder::new().with_seed(1).build().expect("defaults valid");
    let (layer, guard) = RecordingLayer::install();
    let grouping = cohort.run(&RelationGraph::build(Vec::<(&str, &str)>::new()));
    drop(guard);

    assert!(grouping.is_empty());
    let warnings: Vec<_> = layer
        .events()
        .into_iter()
        .filter(|event| event.level == Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
}
