//! Core types for the NSGA-II engine.
//!
//! [`BinaryProblem`] is the contract between the engine and the problem
//! model; [`Individual`] is what the engine keeps in its population.

use std::fmt::Debug;
use std::hash::Hash;

/// Number of objectives the engine optimizes.
pub const OBJECTIVES: usize = 2;

/// Whether an evaluation used real data or fell back to penalty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationStatus {
    /// Every objective was computed from measured data.
    Measured,
    /// The candidate could not be scored normally and received fixed
    /// fallback values. Such candidates lose through dominance.
    Degenerate,
}

/// Objective values and constraint value of one decoded candidate.
///
/// Both objectives are **minimized**. The constraint is an inequality
/// `constraint <= 0`; positive values measure how far the candidate is
/// from feasibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// Objective vector `[f1, f2]`.
    pub objectives: [f64; OBJECTIVES],

    /// Inequality constraint value (feasible when `<= 0`).
    pub constraint: f64,

    /// Whether fallback values were applied.
    pub status: EvaluationStatus,
}

impl Evaluation {
    /// Creates a measured evaluation.
    pub fn measured(objectives: [f64; OBJECTIVES], constraint: f64) -> Self {
        Self {
            objectives,
            constraint,
            status: EvaluationStatus::Measured,
        }
    }

    /// Creates a degenerate evaluation carrying fallback values.
    pub fn degenerate(objectives: [f64; OBJECTIVES], constraint: f64) -> Self {
        Self {
            objectives,
            constraint,
            status: EvaluationStatus::Degenerate,
        }
    }

    /// Returns `true` if the constraint is satisfied.
    pub fn is_feasible(&self) -> bool {
        self.constraint <= 0.0
    }

    /// Constraint violation, clamped at zero.
    pub fn violation(&self) -> f64 {
        self.constraint.max(0.0)
    }
}

/// A binary-selection problem driven by real-valued decision vectors.
///
/// Every gene lives in `[0, 1]`. The problem decides how a vector maps to
/// a discrete selection (the [`Key`](Self::Key)) and scores that selection.
/// Two vectors with equal keys are the same solution as far as the engine
/// is concerned, which is what duplicate elimination relies on.
///
/// # Thread Safety
///
/// `BinaryProblem` must be `Send + Sync` because the runner may evaluate
/// offspring in parallel using rayon.
pub trait BinaryProblem: Send + Sync {
    /// Decoded, hashable form of a decision vector.
    type Key: Clone + Eq + Hash + Debug + Send + Sync;

    /// Length of every decision vector.
    fn n_var(&self) -> usize;

    /// Maps a decision vector to its discrete selection.
    fn decode(&self, genes: &[f64]) -> Self::Key;

    /// Scores a decoded selection. Must be a pure function of `key`.
    fn evaluate(&self, key: &Self::Key) -> Evaluation;
}

/// A member of the NSGA-II population.
///
/// `rank` and `crowding` are assigned by survival selection; they are
/// meaningless until an individual has gone through it once.
#[derive(Debug, Clone)]
pub struct Individual<K> {
    /// Decision vector, every gene in `[0, 1]`.
    pub genes: Vec<f64>,

    /// Decoded selection for `genes`.
    pub key: K,

    /// Scores of `key`.
    pub evaluation: Evaluation,

    /// Non-domination rank (0 = first front).
    pub rank: usize,

    /// Crowding distance within the individual's front.
    pub crowding: f64,
}

impl<K> Individual<K> {
    /// Wraps an evaluated decision vector.
    pub fn new(genes: Vec<f64>, key: K, evaluation: Evaluation) -> Self {
        Self {
            genes,
            key,
            evaluation,
            rank: usize::MAX,
            crowding: 0.0,
        }
    }

    /// Objective vector of this individual.
    pub fn objectives(&self) -> &[f64; OBJECTIVES] {
        &self.evaluation.objectives
    }
}
