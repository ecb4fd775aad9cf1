//! Permutation-preserving genetic operators for tours.
//!
//! These operate on `&[usize]` index vectors, where each value is the index
//! of a point in the run's point slice. Every output is a permutation of the
//! input values by construction.
//!
//! # Crossover Operators
//!
//! - [`order_crossover`] (OX): Davis (1985), preserves relative order
//!
//! # Mutation Operators
//!
//! - [`swap_mutation`]: Exchange two random positions, O(1)
//! - [`mutate`]: Bernoulli-gated swap mutation
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::Rng;

// ============================================================================
// Crossover
// ============================================================================

/// Order Crossover (OX) producing one child.
///
/// # Algorithm
///
/// 1. Pick a start `s` uniformly in `0..n`, then an end `e` uniformly in `s..n`
/// 2. Copy `parent1[s..=e]` into the child at the same positions
/// 3. Fill the remaining positions left to right with `parent2`'s values in
///    `parent2`'s order, skipping values already placed
///
/// Membership is tracked with a `used` table indexed by value, so the fill
/// is a single pass over `parent2`.
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths or are empty, or if a value is
/// not in `0..n`.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");

    let (start, end) = random_segment(n, rng);
    ox_build_child(parent1, parent2, start, end)
}

/// Build one OX child: copy `template[start..=end]`, fill from `donor`.
pub(crate) fn ox_build_child(
    template: &[usize],
    donor: &[usize],
    start: usize,
    end: usize,
) -> Vec<usize> {
    let n = template.len();
    let mut child = vec![usize::MAX; n];
    let mut used = vec![false; n];

    for i in start..=end {
        child[i] = template[i];
        used[template[i]] = true;
    }

    let mut donor_values = donor.iter().copied().filter(|&v| !used[v]);
    for slot in child.iter_mut().filter(|slot| **slot == usize::MAX) {
        // Exactly n - (end - start + 1) donor values remain unused.
        if let Some(v) = donor_values.next() {
            *slot = v;
        }
    }

    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: exchange two uniformly chosen positions.
///
/// The positions may coincide, in which case the tour is unchanged.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let j = rng.random_range(0..n);
    perm.swap(i, j);
}

/// Applies [`swap_mutation`] with probability `mutation_rate`.
///
/// One Bernoulli trial per call, not per position. Returns whether the swap
/// was attempted. With `mutation_rate == 0` the tour is never touched.
pub fn mutate<R: Rng>(perm: &mut [usize], mutation_rate: f64, rng: &mut R) -> bool {
    if mutation_rate <= 0.0 || rng.random_range(0.0..1.0) >= mutation_rate {
        return false;
    }
    swap_mutation(perm, rng);
    true
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a segment `[start, end]` within `0..n`: `start` uniform, then `end`
/// uniform over `start..n`.
fn random_segment<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let start = rng.random_range(0..n);
    let end = rng.random_range(start..n);
    (start, end)
}

// ============================================================================
// Tests
// ============================================================================
