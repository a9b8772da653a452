//! NSGA-II search engine.
//!
//! An elitist multi-objective genetic algorithm over real-valued decision
//! vectors in `[0, 1]` that a [`BinaryProblem`] decodes into discrete
//! selections. Two objectives are minimized subject to one inequality
//! constraint, using constrained dominance.
//!
//! # Key Types
//!
//! - [`Nsga2Config`]: Algorithm parameters (population, offspring, operators)
//! - [`Nsga2Runner`]: Executes the evolutionary loop
//! - [`Nsga2Result`]: Terminal population, seed and per-generation statistics
//!
//! # Submodules
//!
//! - [`multi_objective`]: Constrained non-dominated sorting and crowding distance
//! - [`operators`]: Uniform sampling, SBX crossover, polynomial mutation
//! - [`selection`]: Crowded-comparison tournament
//! - [`survival`]: Duplicate elimination and rank-and-crowding truncation
//!
//! # References
//!
//! - Deb et al. (2002), *A Fast and Elitist Multiobjective GA: NSGA-II*
//! - Deb (2000), *An efficient constraint handling method for genetic algorithms*

mod config;
pub mod multi_objective;
pub mod operators;
mod runner;
pub mod selection;
pub mod survival;
mod types;

pub use config::{InvalidConfig, Nsga2Config};
pub use runner::{GenerationStats, Nsga2Result, Nsga2Runner};
pub use types::{BinaryProblem, Evaluation, EvaluationStatus, Individual, OBJECTIVES};
