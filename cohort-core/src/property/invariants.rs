//! Property runners checked against every generated relation.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{builder::CohortBuilder, result::Grouping};

use super::types::RelationFixture;

fn run(fixture: &RelationFixture) -> Result<Grouping, TestCaseError> {
    let cohort = CohortBuilder::new()
        .with_teachers_per_group(fixture.teachers_per_group)
        .with_seed(fixture.seed)
        .build()
        .map_err(|error| TestCaseError::fail(format!("configuration rejected: {error}")))?;
    Ok(cohort.run(&fixture.graph()))
}

/// Every teacher and student appears exactly once and nothing else does.
pub(super) fn run_completeness_property(fixture: &RelationFixture) -> TestCaseResult {
    let graph = fixture.graph();
    let grouping = run(fixture)?;
    if graph.student_count() == 0 {
        return if grouping.is_empty() {
            Ok(())
        } else {
            Err(TestCaseError::fail("relation without students must yield no groups"))
        };
    }

    let quality = grouping.quality(&graph);
    if !quality.is_complete() {
        return Err(TestCaseError::fail(format!(
            "incomplete partition (shape={:?}): duplicates={:?} unknown={:?} missing={:?}",
            fixture.shape,
            quality.duplicates(),
            quality.unknown(),
            quality.missing(),
        )));
    }
    if quality.students_below_target().len() != grouping.repair_report().students_below_target() {
        return Err(TestCaseError::fail(format!(
            "report counts {} students below target but evaluation finds {}",
            grouping.repair_report().students_below_target(),
            quality.students_below_target().len(),
        )));
    }
    Ok(())
}

/// No group exceeds the hard cap and no group is left without a teacher.
pub(super) fn run_cap_property(fixture: &RelationFixture) -> TestCaseResult {
    let grouping = run(fixture)?;
    let Some(sizing) = grouping.sizing() else {
        return Ok(());
    };
    for (index, group) in grouping.groups().iter().enumerate() {
        let teachers = group.teachers().len();
        if teachers > sizing.hard_max() {
            return Err(TestCaseError::fail(format!(
                "group {index} holds {teachers} teachers, hard max is {} (shape={:?})",
                sizing.hard_max(),
                fixture.shape,
            )));
        }
        if teachers == 0 {
            return Err(TestCaseError::fail(format!("group {index} lost every teacher")));
        }
    }
    Ok(())
}

/// Phase B never lowers the overlap of the student it is working on, and
/// every drop it causes for another student is reported with that student's
/// final overlap.
pub(super) fn run_coverage_step_property(fixture: &RelationFixture) -> TestCaseResult {
    let graph = fixture.graph();
    let grouping = run(fixture)?;
    let report = grouping.repair_report();
    for step in report.coverage_steps() {
        if step.after() < step.before() {
            return Err(TestCaseError::fail(format!(
                "{} dropped from {} to {}",
                step.student(),
                step.before(),
                step.after(),
            )));
        }
    }
    for regression in report.regressions() {
        let student = regression.student().as_str();
        let final_overlap = grouping
            .group_of_student(student)
            .and_then(|id| grouping.group(id))
            .map_or(0, |group| {
                group
                    .teachers()
                    .iter()
                    .filter(|teacher| graph.student_has_teacher(student, teacher.as_str()))
                    .count()
            });
        if regression.after() >= regression.before() || regression.after() != final_overlap {
            return Err(TestCaseError::fail(format!(
                "{student} reported as {} -> {} but ends with overlap {final_overlap}",
                regression.before(),
                regression.after(),
            )));
        }
    }
    Ok(())
}

/// A fixed seed reproduces the grouping exactly.
pub(super) fn run_determinism_property(fixture: &RelationFixture) -> TestCaseResult {
    let first = run(fixture)?;
    let second = run(fixture)?;
    if first != second {
        return Err(TestCaseError::fail(format!(
            "seed {} produced different groupings (shape={:?})",
            fixture.seed, fixture.shape,
        )));
    }
    Ok(())
}
