//! Unit tests for the repair phases.

use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::{InvariantRepairer, RepairReport};
use crate::{graph::RelationGraph, partition::Partition, sizing::GroupSizing};

fn placed(
    graph: &RelationGraph,
    clusters: Vec<Vec<usize>>,
    students: &[(usize, usize)],
) -> Partition {
    let mut partition = Partition::from_teacher_clusters(graph, clusters);
    for &(student, cluster) in students {
        partition.move_student(student, cluster);
    }
    partition
}

fn repairer(graph: &RelationGraph) -> InvariantRepairer<'_> {
    InvariantRepairer::new(graph, GroupSizing::new(graph.teacher_count(), 2))
}

fn steps(report: &RepairReport) -> Vec<(String, usize, usize)> {
    report
        .coverage_steps()
        .iter()
        .map(|step| (step.student().to_string(), step.before(), step.after()))
        .collect()
}

#[rstest]
fn phase_a_pulls_a_student_from_a_donor_with_spare_students() {
    let graph = RelationGraph::build([("T1", "S1"), ("T2", "S2"), ("T2", "S3")]);
    let mut partition = placed(&graph, vec![vec![0], vec![1]], &[(0, 1), (1, 1), (2, 1)]);
    let mut report = RepairReport::default();

    let mut rng = SmallRng::seed_from_u64(3);
    repairer(&graph).ensure_teachers_have_students(&mut partition, &mut rng, &mut report);

    assert_eq!(partition.student_cluster(0), Some(0));
    assert_eq!(report.students_moved(), 1);
    assert_eq!(report.teachers_moved(), 0);
    assert_eq!(report.degenerate_teachers(), 0);
}

#[rstest]
fn phase_a_moves_the_teacher_when_no_donor_can_spare_a_student() {
    let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1"), ("T3", "S2")]);
    let mut partition = placed(&graph, vec![vec![0, 2], vec![1]], &[(0, 1), (1, 0)]);
    let mut report = RepairReport::default();

    let mut rng = SmallRng::seed_from_u64(3);
    repairer(&graph).ensure_teachers_have_students(&mut partition, &mut rng, &mut report);

    assert_eq!(partition.teacher_cluster(0), Some(1));
    assert_eq!(partition.student_cluster(0), Some(1), "the lone student stays put");
    assert_eq!(report.teachers_moved(), 1);
    assert_eq!(report.degenerate_teachers(), 0);
}

#[rstest]
fn phase_a_accepts_a_teacher_without_students() {
    let graph = RelationGraph::builder()
        .with_teacher("T0")
        .with_pair("T1", "S1")
        .build();
    let mut partition = placed(&graph, vec![vec![0, 1]], &[(0, 0)]);
    let mut report = RepairReport::default();

    let mut rng = SmallRng::seed_from_u64(3);
    repairer(&graph).ensure_teachers_have_students(&mut partition, &mut rng, &mut report);

    assert_eq!(report.degenerate_teachers(), 1);
    assert_eq!(partition.teacher_cluster(0), Some(0));
    assert_eq!(partition.cluster(0).students.len(), 1);
}

#[rstest]
fn phase_a_keeps_the_last_teacher_of_a_cluster() {
    let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1")]);
    let mut partition = placed(&graph, vec![vec![0], vec![1]], &[(0, 1)]);
    let mut report = RepairReport::default();

    let mut rng = SmallRng::seed_from_u64(3);
    repairer(&graph).ensure_teachers_have_students(&mut partition, &mut rng, &mut report);

    assert_eq!(partition.teacher_cluster(0), Some(0));
    assert_eq!(report.degenerate_teachers(), 1);
}

#[rstest]
fn phase_b_pulls_a_teacher_from_an_anchored_donor() {
    let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1"), ("T3", "S2")]);
    let mut partition = placed(&graph, vec![vec![0], vec![1, 2]], &[(0, 0), (1, 1)]);
    let mut report = RepairReport::default();

    repairer(&graph).improve_student_coverage(&mut partition, &[0, 1], &mut report);

    assert_eq!(partition.teacher_cluster(1), Some(0));
    assert_eq!(report.teachers_moved(), 1);
    assert_eq!(
        steps(&report),
        [("S1".to_owned(), 1, 2), ("S2".to_owned(), 1, 1)]
    );
}

#[rstest]
fn phase_b_moves_the_student_when_no_teacher_can_be_pulled() {
    let graph =
        RelationGraph::build([("T1", "S1"), ("T2", "S1"), ("T3", "S1"), ("T1", "S2")]);
    let mut partition = placed(&graph, vec![vec![0], vec![1, 2]], &[(0, 0), (1, 0)]);
    let mut report = RepairReport::default();

    repairer(&graph).improve_student_coverage(&mut partition, &[0, 1], &mut report);

    assert_eq!(partition.student_cluster(0), Some(1));
    assert_eq!(report.students_moved(), 1);
    assert_eq!(report.teachers_moved(), 0);
    assert_eq!(
        steps(&report),
        [("S1".to_owned(), 1, 2), ("S2".to_owned(), 1, 1)]
    );
}

#[rstest]
fn phase_b_refuses_moves_that_strand_a_teacher() {
    let graph =
        RelationGraph::build([("T1", "S1"), ("T2", "S1"), ("T3", "S1"), ("T2", "S2")]);
    let mut partition = placed(&graph, vec![vec![0], vec![1, 2]], &[(0, 0), (1, 0)]);
    let mut report = RepairReport::default();

    repairer(&graph).improve_student_coverage(&mut partition, &[0], &mut report);

    assert_eq!(partition.student_cluster(0), Some(0));
    assert_eq!(report.students_moved(), 0);
    assert_eq!(steps(&report), [("S1".to_owned(), 1, 1)]);
}

#[rstest]
fn phase_b_skips_students_already_at_target() {
    let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1")]);
    let mut partition = placed(&graph, vec![vec![0, 1]], &[(0, 0)]);
    let mut report = RepairReport::default();

    repairer(&graph).improve_student_coverage(&mut partition, &[0], &mut report);

    assert!(report.coverage_steps().is_empty());
}

#[rstest]
#[case(0)]
#[case(9)]
fn repair_counts_students_left_below_target(#[case] seed: u64) {
    let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1"), ("T3", "S2")]);
    let mut partition = placed(&graph, vec![vec![0, 1, 2]], &[(0, 0), (1, 0)]);

    let mut rng = SmallRng::seed_from_u64(seed);
    let report = repairer(&graph).repair(&mut partition, &[1, 0], &mut rng);

    assert_eq!(report.students_below_target(), 1, "S2 has a single teacher");
    assert_eq!(report.degenerate_teachers(), 0);
    assert_eq!(steps(&report), [("S2".to_owned(), 1, 1)]);
    assert!(report.regressions().is_empty());
}

#[rstest]
fn repair_records_students_who_lose_a_pulled_teacher() {
    let graph = RelationGraph::build([("T1", "S1"), ("T2", "S1"), ("T2", "S2"), ("T3", "S2")]);
    let mut partition = placed(&graph, vec![vec![0], vec![1, 2]], &[(0, 0), (1, 1)]);

    let mut rng = SmallRng::seed_from_u64(5);
    let report = repairer(&graph).repair(&mut partition, &[1, 0], &mut rng);

    assert_eq!(partition.teacher_cluster(1), Some(0), "T2 joins S1");
    assert_eq!(steps(&report), [("S1".to_owned(), 1, 2)]);
    let regressions: Vec<_> = report
        .regressions()
        .iter()
        .map(|step| (step.student().to_string(), step.before(), step.after()))
        .collect();
    assert_eq!(regressions, [("S2".to_owned(), 2, 1)]);
    assert_eq!(report.students_below_target(), 1);
}
