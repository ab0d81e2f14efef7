//! Shared test utilities used across cohort crates.

pub mod ci;
pub mod tracing;
