//! IDC selection problem model.
//!
//! Encodes a candidate deployment as one gene per IDC and scores the decoded
//! subset on weighted latency (F1), total price (F2) and the coverage
//! shortfall constraint (G1).
//!
//! # Key Types
//!
//! - [`IdcSelectionProblem`]: Implements [`BinaryProblem`](crate::nsga2::BinaryProblem)
//! - [`IdcSubset`]: Decoded selection, the deduplication key
//! - [`PingTable`]: Country × IDC latency lookup with explicit gaps

mod model;
mod ping_table;
mod subset;

pub use model::{
    Candidate, CoverageRule, Country, IdcSelectionProblem, DEGENERATE_COVERAGE, LATENCY_PENALTY,
};
pub use ping_table::PingTable;
pub use subset::IdcSubset;
