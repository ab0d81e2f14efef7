//! Cohort core library.
//!
//! Groups teachers and the students they instruct so that every teacher sits
//! with some of their own students and every student sits with as many of
//! their teachers as possible.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assign;
mod builder;
mod clusterer;
mod cohort;
mod error;
mod graph;
mod ids;
mod partition;
mod quality;
mod repair;
mod result;
mod rng;
mod sizing;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{CohortBuilder, DEFAULT_TEACHERS_PER_GROUP},
    cohort::{Cohort, create_groupings},
    error::{CohortError, CohortErrorCode, Result},
    graph::{RelationGraph, RelationGraphBuilder},
    ids::{Member, StudentId, TeacherId},
    quality::{CoverageHistogram, GroupStats, GroupingQuality, evaluate},
    repair::{COVERAGE_TARGET, CoverageStep, RepairReport},
    result::{Group, GroupId, Grouping},
    sizing::GroupSizing,
};
