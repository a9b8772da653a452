//! Real-coded genetic operators on the unit hypercube.
//!
//! Every gene is bounded to `[0, 1]`; all operators clip their output to
//! those bounds.
//!
//! # Sampling
//!
//! - [`random_vector`]: independent uniform genes
//!
//! # Crossover
//!
//! - [`sbx_crossover`]: Simulated Binary Crossover (Deb & Agrawal, 1995)
//!
//! # Mutation
//!
//! - [`polynomial_mutation`]: bounded polynomial mutation (Deb & Goyal, 1996)
//!
//! # Random draw order
//!
//! Draws are consumed in a fixed order so a seed reproduces a run:
//!
//! - `sbx_crossover`: one draw for the pair; then per gene one draw for the
//!   gene gate and, when the gene crosses over, one for the spread and one
//!   for the child swap.
//! - `polynomial_mutation`: per gene one draw for the gate and, when the
//!   gene mutates, one for the perturbation.
//!
//! # References
//!
//! - Deb & Agrawal (1995), "Simulated Binary Crossover for Continuous Search Space"
//! - Deb & Goyal (1996), "A Combined Genetic Adaptive Search (GeneAS) for
//!   Engineering Design"

use rand::Rng;

/// Lower bound of every gene.
pub const LOWER: f64 = 0.0;

/// Upper bound of every gene.
pub const UPPER: f64 = 1.0;

/// Genes closer than this are treated as identical by SBX.
const SBX_EPSILON: f64 = 1e-14;

// ============================================================================
// Sampling
// ============================================================================

/// Samples a decision vector with every gene uniform in `[0, 1)`.
pub fn random_vector<R: Rng>(n: usize, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| rng.random::<f64>()).collect()
}

// ============================================================================
// Crossover
// ============================================================================

/// Simulated Binary Crossover (SBX) with bound handling.
///
/// With probability `probability` the pair is recombined; otherwise both
/// children are copies of their parents. When recombined, each gene crosses
/// over with probability 0.5. The spread of the children around the
/// parents' midpoint is controlled by `eta`: larger values keep children
/// closer to their parents.
///
/// # Algorithm (Deb & Agrawal, 1995)
///
/// For a gene with parent values `y1 < y2` and `u ~ U[0, 1)`:
///
/// 1. `beta = 1 + 2 (y1 - lower) / (y2 - y1)`, `alpha = 2 - beta^-(eta + 1)`
/// 2. `betaq = (u alpha)^(1 / (eta + 1))` if `u <= 1 / alpha`, else
///    `(1 / (2 - u alpha))^(1 / (eta + 1))`
/// 3. `c1 = 0.5 ((y1 + y2) - betaq (y2 - y1))`
/// 4. Repeat 1–2 with `beta = 1 + 2 (upper - y2) / (y2 - y1)` to get
///    `c2 = 0.5 ((y1 + y2) + betaq (y2 - y1))`
/// 5. Clip both, then swap them between children with probability 0.5
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths.
pub fn sbx_crossover<R: Rng>(
    parent1: &[f64],
    parent2: &[f64],
    probability: f64,
    eta: f64,
    rng: &mut R,
) -> (Vec<f64>, Vec<f64>) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );

    let mut child1 = parent1.to_vec();
    let mut child2 = parent2.to_vec();

    if rng.random::<f64>() >= probability {
        return (child1, child2);
    }

    for i in 0..parent1.len() {
        if rng.random::<f64>() >= 0.5 {
            continue;
        }

        let (y1, y2) = if parent1[i] <= parent2[i] {
            (parent1[i], parent2[i])
        } else {
            (parent2[i], parent1[i])
        };
        if y2 - y1 <= SBX_EPSILON {
            continue;
        }

        let u = rng.random::<f64>();
        let span = y2 - y1;

        let betaq = sbx_spread(1.0 + 2.0 * (y1 - LOWER) / span, eta, u);
        let c1 = (0.5 * ((y1 + y2) - betaq * span)).clamp(LOWER, UPPER);

        let betaq = sbx_spread(1.0 + 2.0 * (UPPER - y2) / span, eta, u);
        let c2 = (0.5 * ((y1 + y2) + betaq * span)).clamp(LOWER, UPPER);

        if rng.random::<f64>() < 0.5 {
            child1[i] = c2;
            child2[i] = c1;
        } else {
            child1[i] = c1;
            child2[i] = c2;
        }
    }

    (child1, child2)
}

/// Spread factor `betaq` of SBX for one side of the parent interval.
fn sbx_spread(beta: f64, eta: f64, u: f64) -> f64 {
    let alpha = 2.0 - beta.powf(-(eta + 1.0));
    let exponent = 1.0 / (eta + 1.0);
    if u <= 1.0 / alpha {
        (u * alpha).powf(exponent)
    } else {
        (1.0 / (2.0 - u * alpha)).powf(exponent)
    }
}

// ============================================================================
// Mutation
// ============================================================================

/// Polynomial mutation with bound handling.
///
/// Each gene mutates independently with probability `probability`.
/// Perturbations follow a polynomial distribution whose shape is set by
/// `eta` (larger = smaller steps) and that never leaves the bounds.
///
/// # Algorithm (Deb & Goyal, 1996)
///
/// For gene `y`, `d1 = y - lower`, `d2 = upper - y` (unit range) and
/// `u ~ U[0, 1)`:
///
/// - `u <= 0.5`: `dq = (2u + (1 - 2u)(1 - d1)^(eta + 1))^(1 / (eta + 1)) - 1`
/// - `u > 0.5`: `dq = 1 - (2(1 - u) + 2(u - 0.5)(1 - d2)^(eta + 1))^(1 / (eta + 1))`
///
/// then `y += dq`, clipped.
///
/// # Complexity
/// O(n)
pub fn polynomial_mutation<R: Rng>(genes: &mut [f64], probability: f64, eta: f64, rng: &mut R) {
    let range = UPPER - LOWER;
    let exponent = 1.0 / (eta + 1.0);

    for gene in genes.iter_mut() {
        if rng.random::<f64>() >= probability {
            continue;
        }

        let y = *gene;
        let delta1 = (y - LOWER) / range;
        let delta2 = (UPPER - y) / range;
        let u = rng.random::<f64>();

        let deltaq = if u <= 0.5 {
            let xy = 1.0 - delta1;
            let val = 2.0 * u + (1.0 - 2.0 * u) * xy.powf(eta + 1.0);
            val.powf(exponent) - 1.0
        } else {
            let xy = 1.0 - delta2;
            let val = 2.0 * (1.0 - u) + 2.0 * (u - 0.5) * xy.powf(eta + 1.0);
            1.0 - val.powf(exponent)
        };

        *gene = (y + deltaq * range).clamp(LOWER, UPPER);
    }
}

// ============================================================================
// Tests
// ============================================================================
