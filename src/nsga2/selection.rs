//! Parent selection for NSGA-II.
//!
//! Parents are chosen by tournament under the crowded-comparison operator:
//! lower non-domination rank wins; within a rank, larger crowding distance
//! wins.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective GA: NSGA-II"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::Rng;
use std::cmp::Ordering;

/// Crowded-comparison operator.
///
/// Returns [`Ordering::Less`] when `a` is preferred over `b`.
pub fn crowded_cmp<K>(a: &Individual<K>, b: &Individual<K>) -> Ordering {
    a.rank.cmp(&b.rank).then_with(|| {
        b.crowding
            .partial_cmp(&a.crowding)
            .unwrap_or(Ordering::Equal)
    })
}

/// Tournament selection: pick `k` random individuals (with replacement),
/// return the index of the one preferred by [`crowded_cmp`].
///
/// Ties keep the earliest drawn contestant. `k = 2` is the binary
/// tournament used by NSGA-II.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<K, R: Rng>(population: &[Individual<K>], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if crowded_cmp(&population[idx], &population[best_idx]) == Ordering::Less {
            best_idx = idx;
        }
    }
    best_idx
}
