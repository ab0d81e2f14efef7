//! Random tie-breaking and per-attempt seed derivation.
//!
//! Every random decision in the pipeline goes through a caller-supplied
//! [`Rng`], so a seeded generator reproduces a run exactly.

use rand::{Rng, seq::SliceRandom};

/// SplitMix64 increment (the 64-bit golden ratio) used for per-attempt seed
/// derivation.
const ATTEMPT_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
pub(crate) fn mix_attempt_seed(base_seed: u64, attempt: usize) -> u64 {
    splitmix64(base_seed ^ ((attempt as u64 + 1).wrapping_mul(ATTEMPT_SEED_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(ATTEMPT_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

/// Collects every item sharing the maximum score, preserving input order.
pub(crate) fn maximal_by_score<T, I, F>(items: I, mut score: F) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> usize,
{
    let mut best = Vec::new();
    let mut best_score = 0;
    for item in items {
        let value = score(&item);
        if best.is_empty() || value > best_score {
            best.clear();
            best_score = value;
            best.push(item);
        } else if value == best_score {
            best.push(item);
        }
    }
    best
}

/// Picks one element uniformly at random.
pub(crate) fn pick<T: Copy, R: Rng + ?Sized>(candidates: &[T], rng: &mut R) -> Option<T> {
    candidates.choose(rng).copied()
}
