//! Output rendering for [`ExecutionSummary`] values.

use std::io::{self, Write};

use cohort_core::{Grouping, GroupingQuality};
use serde::Serialize;

use super::commands::{ExecutionSummary, OutputFormat};

#[derive(Serialize)]
struct GroupingDocument<'a> {
    data_source: &'a str,
    attempt: usize,
    groups: Vec<GroupDocument<'a>>,
    repair: RepairDocument<'a>,
}

#[derive(Serialize)]
struct GroupDocument<'a> {
    teachers: Vec<&'a str>,
    students: Vec<&'a str>,
}

#[derive(Serialize)]
struct RepairDocument<'a> {
    students_moved: usize,
    teachers_moved: usize,
    degenerate_teachers: usize,
    students_below_target: usize,
    regressions: Vec<RegressionDocument<'a>>,
}

#[derive(Serialize)]
struct RegressionDocument<'a> {
    student: &'a str,
    before: usize,
    after: usize,
}

#[derive(Serialize)]
struct EvaluationDocument<'a> {
    data_source: &'a str,
    groups: usize,
    complete: bool,
    coverage: CoverageDocument,
    students_below_target: Vec<&'a str>,
    teachers_without_own_student: Vec<&'a str>,
    duplicates: &'a [String],
    unknown: &'a [String],
    missing: &'a [String],
}

#[derive(Serialize)]
struct CoverageDocument {
    none: usize,
    one: usize,
    at_target: usize,
}

impl<'a> GroupingDocument<'a> {
    fn new(data_source: &'a str, grouping: &'a Grouping) -> Self {
        let report = grouping.repair_report();
        Self {
            data_source,
            attempt: grouping.attempt(),
            groups: grouping
                .groups()
                .iter()
                .map(|group| GroupDocument {
                    teachers: group.teachers().iter().map(|id| id.as_str()).collect(),
                    students: group.students().iter().map(|id| id.as_str()).collect(),
                })
                .collect(),
            repair: RepairDocument {
                students_moved: report.students_moved(),
                teachers_moved: report.teachers_moved(),
                degenerate_teachers: report.degenerate_teachers(),
                students_below_target: report.students_below_target(),
                regressions: report
                    .regressions()
                    .iter()
                    .map(|step| RegressionDocument {
                        student: step.student().as_str(),
                        before: step.before(),
                        after: step.after(),
                    })
                    .collect(),
            },
        }
    }
}

impl<'a> EvaluationDocument<'a> {
    fn new(data_source: &'a str, quality: &'a GroupingQuality) -> Self {
        let coverage = quality.coverage();
        Self {
            data_source,
            groups: quality.group_count(),
            complete: quality.is_complete(),
            coverage: CoverageDocument {
                none: coverage.none,
                one: coverage.one,
                at_target: coverage.at_target,
            },
            students_below_target: quality
                .students_below_target()
                .iter()
                .map(|id| id.as_str())
                .collect(),
            teachers_without_own_student: quality
                .teachers_without_own_student()
                .iter()
                .map(|id| id.as_str())
                .collect(),
            duplicates: quality.duplicates(),
            unknown: quality.unknown(),
            missing: quality.missing(),
        }
    }
}

/// Writes `summary` to `writer` in its requested format.
///
/// Text groupings print one group per line, teachers first, with members
/// separated by tabs. Text evaluations print one `key<TAB>value` line per
/// finding.
///
/// # Errors
/// Returns any I/O error raised by `writer`, or a serialisation failure
/// wrapped as [`io::ErrorKind::Other`].
pub fn render_summary<W: Write>(summary: &ExecutionSummary, writer: &mut W) -> io::Result<()> {
    match summary {
        ExecutionSummary::Grouping {
            data_source,
            grouping,
            format,
        } => match format {
            OutputFormat::Text => render_grouping_text(grouping, writer),
            OutputFormat::Json => {
                write_json(&GroupingDocument::new(data_source, grouping), writer)
            }
        },
        ExecutionSummary::Evaluation {
            data_source,
            quality,
            format,
        } => match format {
            OutputFormat::Text => render_quality_text(data_source, quality, writer),
            OutputFormat::Json => {
                write_json(&EvaluationDocument::new(data_source, quality), writer)
            }
        },
    }
}

fn render_grouping_text<W: Write>(grouping: &Grouping, writer: &mut W) -> io::Result<()> {
    for group in grouping.groups() {
        let line = group
            .members()
            .map(|member| member.to_string())
            .collect::<Vec<_>>()
            .join("\t");
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

fn render_quality_text<W: Write>(
    data_source: &str,
    quality: &GroupingQuality,
    writer: &mut W,
) -> io::Result<()> {
    let coverage = quality.coverage();
    writeln!(writer, "data_source\t{data_source}")?;
    writeln!(writer, "groups\t{}", quality.group_count())?;
    writeln!(writer, "complete\t{}", quality.is_complete())?;
    writeln!(writer, "students_without_teacher\t{}", coverage.none)?;
    writeln!(writer, "students_with_one_teacher\t{}", coverage.one)?;
    writeln!(writer, "students_at_target\t{}", coverage.at_target)?;
    write_list(writer, "below_target", quality.students_below_target())?;
    write_list(writer, "teacher_without_student", quality.teachers_without_own_student())?;
    write_list(writer, "duplicate", quality.duplicates())?;
    write_list(writer, "unknown", quality.unknown())?;
    write_list(writer, "missing", quality.missing())
}

fn write_list<W: Write, T: AsRef<str>>(writer: &mut W, key: &str, items: &[T]) -> io::Result<()> {
    for item in items {
        writeln!(writer, "{key}\t{}", item.as_ref())?;
    }
    Ok(())
}

fn write_json<W: Write, T: Serialize>(document: &T, writer: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, document).map_err(io::Error::other)?;
    writeln!(writer)
}
