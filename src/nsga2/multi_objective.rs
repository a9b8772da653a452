//! Pareto ranking primitives.
//!
//! - [`non_dominated_sort`]: fast non-dominated sorting under constrained
//!   dominance (Deb et al., 2002)
//! - [`crowding_distance`]: crowding distance assignment for diversity
//!   preservation
//! - [`dominates`]: plain Pareto dominance between two objective vectors
//!
//! All objectives are **minimized**.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone, Default)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    /// Within a front, indices are in ascending order.
    pub fronts: Vec<Vec<usize>>,
}

/// Fast non-dominated sorting with constrained dominance.
///
/// Solution `a` constrained-dominates `b` when:
///
/// 1. `a` is feasible (violation 0) and `b` is not, or
/// 2. both are infeasible and `a` has the smaller violation, or
/// 3. both are feasible, or infeasible with equal violation, and `a`
///    Pareto-dominates `b`.
///
/// # Complexity
///
/// O(m * n²) where m = number of objectives, n = number of solutions
///
/// # Arguments
///
/// - `objectives`: objective vector per solution, all of the same length.
/// - `violations`: constraint violation per solution, `0.0` when feasible.
///
/// # Panics
///
/// Panics if `objectives` and `violations` differ in length.
///
/// # Example
///
/// ```
/// use idc_recommend::nsga2::multi_objective::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // A
///     vec![3.0, 3.0],  // B
///     vec![5.0, 1.0],  // C
///     vec![4.0, 4.0],  // D, dominated by B
/// ];
/// let violations = vec![0.0; 4];
///
/// let result = non_dominated_sort(&objectives, &violations);
///
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// ```
pub fn non_dominated_sort<O: AsRef<[f64]>>(
    objectives: &[O],
    violations: &[f64],
) -> NondominatedSortResult {
    let n = objectives.len();
    assert_eq!(
        n,
        violations.len(),
        "objectives and violations must have the same length"
    );

    if n == 0 {
        return NondominatedSortResult::default();
    }

    let mut domination_count = vec![0usize; n];
    let mut dominated_by: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut ranks = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match constrained_cmp(
                objectives[i].as_ref(),
                violations[i],
                objectives[j].as_ref(),
                violations[j],
            ) {
                Dominance::Left => {
                    dominated_by[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominated_by[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    let mut current: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut fronts = Vec::new();
    while !current.is_empty() {
        let mut next_front = Vec::new();
        for &i in &current {
            for &j in &dominated_by[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 {
                    ranks[j] = fronts.len() + 1;
                    next_front.push(j);
                }
            }
        }
        next_front.sort_unstable();
        fronts.push(current);
        current = next_front;
    }

    NondominatedSortResult { ranks, fronts }
}

/// Dominance comparison result.
#[derive(Debug, PartialEq)]
enum Dominance {
    /// Left dominates right.
    Left,
    /// Right dominates left.
    Right,
    /// Neither dominates the other.
    Neither,
}

fn constrained_cmp(a: &[f64], a_violation: f64, b: &[f64], b_violation: f64) -> Dominance {
    match (a_violation > 0.0, b_violation > 0.0) {
        (false, true) => Dominance::Left,
        (true, false) => Dominance::Right,
        (true, true) => {
            if a_violation < b_violation {
                Dominance::Left
            } else if b_violation < a_violation {
                Dominance::Right
            } else {
                dominance_cmp(a, b)
            }
        }
        (false, false) => dominance_cmp(a, b),
    }
}

/// Compare two solutions for Pareto dominance (minimization).
fn dominance_cmp(a: &[f64], b: &[f64]) -> Dominance {
    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}

/// Returns `true` if `a` Pareto-dominates `b`: no worse in every objective
/// and strictly better in at least one.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    dominance_cmp(a, b) == Dominance::Left
}

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance for each solution, measuring how
/// spread out the solutions are in objective space. Higher distance
/// means the solution is more isolated (more diverse).
///
/// Boundary solutions (min/max for any objective) receive `f64::INFINITY`.
/// Objectives whose values are all equal contribute nothing.
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use idc_recommend::nsga2::multi_objective::crowding_distance;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
/// ];
///
/// let distances = crowding_distance(&objectives);
///
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// assert!(distances[1].is_finite());
/// ```
pub fn crowding_distance<O: AsRef<[f64]>>(objectives: &[O]) -> Vec<f64> {
    let n = objectives.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let m = objectives[0].as_ref().len();
    let mut distances = vec![0.0f64; n];

    for obj_idx in 0..m {
        let value = |i: usize| objectives[i].as_ref()[obj_idx];

        // stable: ties stay in index order
        let mut indices: Vec<usize> = (0..n).collect();
        indices.sort_by(|&a, &b| {
            value(a)
                .partial_cmp(&value(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let min_val = value(indices[0]);
        let max_val = value(indices[n - 1]);
        let range = max_val - min_val;

        if range > 0.0 {
            distances[indices[0]] = f64::INFINITY;
            distances[indices[n - 1]] = f64::INFINITY;
            for i in 1..(n - 1) {
                let prev = value(indices[i - 1]);
                let next = value(indices[i + 1]);
                distances[indices[i]] += (next - prev) / range;
            }
        }
    }

    distances
}

// ============================================================================
// Tests
// ============================================================================
