//! Property-based tests for the grouping pipeline.
//!
//! Generated relations cover dense, paired, sparse, disconnected and hub
//! shaped teaching loads. Each run is checked for a complete partition, the
//! hard cap, per-step Phase B coverage and reproducibility under a seed.

mod invariants;
mod strategies;
mod types;
