//! Multi-objective IDC (data center) selection.
//!
//! Given per-country player shares, per-country/per-IDC ping measurements
//! and per-IDC prices, searches the space of IDC subsets and returns a
//! Pareto frontier trading player-weighted latency against total price,
//! subject to a minimum covered-player share.
//!
//! - **Problem model** ([`problem`]): decodes a decision vector into an IDC
//!   subset and computes F1 (weighted latency), F2 (price) and G1
//!   (coverage shortfall).
//! - **Evolutionary engine** ([`nsga2`]): NSGA-II with constrained
//!   dominance, crowding-distance survival, binary tournament, SBX
//!   crossover, polynomial mutation and duplicate elimination.
//! - **Pareto resolver** ([`resolve`]): decodes, scores, deduplicates and
//!   orders the final front.
//!
//! [`recommend`] ties the three together behind the JSON document types in
//! [`input`] and [`resolve`].

pub mod error;
pub mod input;
pub mod nsga2;
pub mod problem;
pub mod random;
mod recommend;
pub mod resolve;

pub use error::{InputError, RecommendError};
pub use input::{AlgorithmInput, PreparedInput};
pub use nsga2::Nsga2Config;
pub use recommend::recommend;
pub use resolve::{AlgorithmOutput, ParetoSolution};
