//! Survival selection: duplicate elimination plus rank-and-crowding
//! truncation.

use super::multi_objective::{crowding_distance, non_dominated_sort};
use super::types::Individual;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::hash::Hash;

/// Removes individuals whose key already appeared earlier in the list.
///
/// The first occurrence of each key survives and the relative order of the
/// survivors is unchanged.
pub fn eliminate_duplicates<K: Clone + Eq + Hash>(
    population: Vec<Individual<K>>,
) -> Vec<Individual<K>> {
    let mut seen = HashSet::with_capacity(population.len());
    population
        .into_iter()
        .filter(|ind| seen.insert(ind.key.clone()))
        .collect()
}

/// NSGA-II environmental selection.
///
/// Ranks `population` with constrained non-dominated sorting, assigns every
/// individual its rank and the crowding distance within its front, then
/// keeps whole fronts in rank order. The front that does not fit entirely
/// is truncated to its members with the largest crowding distance (ties in
/// population order).
///
/// Survivors are returned front by front. At most `n_survive` individuals
/// are returned; fewer when `population` is smaller.
pub fn rank_and_crowding<K>(
    population: Vec<Individual<K>>,
    n_survive: usize,
) -> Vec<Individual<K>> {
    let objectives: Vec<[f64; 2]> = population.iter().map(|ind| *ind.objectives()).collect();
    let violations: Vec<f64> = population
        .iter()
        .map(|ind| ind.evaluation.violation())
        .collect();
    let sorted = non_dominated_sort(&objectives, &violations);

    let mut slots: Vec<Option<Individual<K>>> = population.into_iter().map(Some).collect();
    let mut survivors = Vec::with_capacity(n_survive.min(slots.len()));

    for (rank, front) in sorted.fronts.iter().enumerate() {
        if survivors.len() >= n_survive {
            break;
        }

        let front_objectives: Vec<[f64; 2]> = front.iter().map(|&i| objectives[i]).collect();
        let distances = crowding_distance(&front_objectives);

        let mut order: Vec<usize> = (0..front.len()).collect();
        let remaining = n_survive - survivors.len();
        if front.len() > remaining {
            order.sort_by(|&a, &b| {
                distances[b]
                    .partial_cmp(&distances[a])
                    .unwrap_or(Ordering::Equal)
            });
            order.truncate(remaining);
        }

        for pos in order {
            if let Some(mut ind) = slots[front[pos]].take() {
                ind.rank = rank;
                ind.crowding = distances[pos];
                survivors.push(ind);
            }
        }
    }

    survivors
}
