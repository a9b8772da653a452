//! Seeded random number generation.
//!
//! Every run draws from exactly one [`SearchRng`]. The `Pcg64` stream for a
//! given seed does not change between `rand` releases.

use rand::SeedableRng;
use rand_pcg::Pcg64;

/// Random number generator used by the search.
pub type SearchRng = Pcg64;

/// Creates the search RNG from a seed.
pub fn create_rng(seed: u64) -> SearchRng {
    Pcg64::seed_from_u64(seed)
}
