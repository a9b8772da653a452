//! The IDC selection problem: decoding and objective evaluation.

use crate::nsga2::{BinaryProblem, Evaluation};

use super::ping_table::PingTable;
use super::subset::IdcSubset;

/// F1 assigned to a subset that leaves some country without a reachable IDC.
pub const LATENCY_PENALTY: f64 = 100_000.0;

/// Achieved coverage assumed for a subset that leaves some country without a
/// reachable IDC.
pub const DEGENERATE_COVERAGE: f64 = 0.001;

/// The coverage requirement a subset is held to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageRule {
    /// A country is covered when its best ping is at most this (ms).
    pub ping_threshold: f64,
    /// Minimum weighted share of covered players, in `[0, 1]`.
    pub required_rate: f64,
}

/// A country and its normalized player share.
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub name: String,
    pub weight: f64,
}

/// One candidate IDC and its unit price.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub price: f64,
}

/// Two-objective, one-constraint IDC selection problem.
///
/// Decision vectors have one gene per candidate. Objectives:
///
/// - **F1**: player-weighted best latency, summed over countries
/// - **F2**: total unit price of the selected IDCs
///
/// Constraint **G1** is `required_rate - achieved_coverage`, feasible when
/// `<= 0`.
///
/// All data is immutable after construction, so evaluation is a pure
/// function of the decoded subset and safe to run from many threads.
#[derive(Debug, Clone)]
pub struct IdcSelectionProblem {
    candidates: Vec<Candidate>,
    countries: Vec<Country>,
    pings: PingTable,
    mandatory: Vec<usize>,
    coverage: CoverageRule,
}

impl IdcSelectionProblem {
    /// Builds a problem from already validated data.
    ///
    /// `pings` must be `countries.len() × candidates.len()` and every index
    /// in `mandatory` must address a candidate.
    ///
    /// # Panics
    /// Panics if the table shape or a mandatory index does not match.
    pub fn new(
        candidates: Vec<Candidate>,
        countries: Vec<Country>,
        pings: PingTable,
        mandatory: Vec<usize>,
        coverage: CoverageRule,
    ) -> Self {
        assert_eq!(pings.n_countries(), countries.len(), "ping table rows");
        assert_eq!(pings.n_idcs(), candidates.len(), "ping table columns");
        assert!(
            mandatory.iter().all(|&i| i < candidates.len()),
            "mandatory index out of range"
        );
        Self {
            candidates,
            countries,
            pings,
            mandatory,
            coverage,
        }
    }

    /// Candidate IDCs in decision-vector order.
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Countries with their normalized weights.
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Indices of IDCs that every decoded subset contains.
    pub fn mandatory(&self) -> &[usize] {
        &self.mandatory
    }

    /// Achieved coverage implied by an evaluation's constraint value.
    pub fn implied_coverage(&self, evaluation: &Evaluation) -> f64 {
        self.coverage.required_rate - evaluation.constraint
    }

    /// Names of the IDCs in `subset`, in candidate order.
    pub fn idc_names(&self, subset: &IdcSubset) -> Vec<String> {
        subset
            .indices()
            .map(|i| self.candidates[i].name.clone())
            .collect()
    }

    /// Maps a decision vector to its IDC subset.
    ///
    /// Genes are rounded half-to-even, so exactly 0.5 does not select.
    /// Mandatory IDCs are always included.
    pub fn decode_genes(&self, genes: &[f64]) -> IdcSubset {
        let mut mask: Vec<bool> = genes
            .iter()
            .map(|g| g.round_ties_even() != 0.0)
            .collect();
        mask.resize(self.candidates.len(), false);
        for &i in &self.mandatory {
            mask[i] = true;
        }
        IdcSubset::from_mask(mask)
    }

    /// Computes F1, F2 and G1 for `subset`.
    pub fn evaluate_subset(&self, subset: &IdcSubset) -> Evaluation {
        let cost: f64 = subset.indices().map(|i| self.candidates[i].price).sum();

        let mut latency = 0.0;
        let mut covered = 0.0;
        for (c, country) in self.countries.iter().enumerate() {
            let Some(best) = self.pings.min_ping(c, subset) else {
                return Evaluation::degenerate(
                    [LATENCY_PENALTY, cost],
                    self.coverage.required_rate - DEGENERATE_COVERAGE,
                );
            };
            latency += best * country.weight;
            if best <= self.coverage.ping_threshold {
                covered += country.weight;
            }
        }

        Evaluation::measured([latency, cost], self.coverage.required_rate - covered)
    }
}

impl BinaryProblem for IdcSelectionProblem {
    type Key = IdcSubset;

    fn n_var(&self) -> usize {
        self.candidates.len()
    }

    fn decode(&self, genes: &[f64]) -> IdcSubset {
        self.decode_genes(genes)
    }

    fn evaluate(&self, key: &IdcSubset) -> Evaluation {
        self.evaluate_subset(key)
    }
}
