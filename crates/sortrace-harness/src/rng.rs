//! Per-algorithm RNG seeding with ChaCha8.
//!
//! Each algorithm in a comparison gets its own ChaCha8Rng seeded from
//! `(seed + algorithm index)`, so every algorithm sorts an independent
//! shuffle and the same seed always reproduces the same inputs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sortrace_core::AlgorithmId;

/// Create a deterministic RNG for one algorithm's input.
pub fn algorithm_rng(seed: u64, algorithm: AlgorithmId) -> ChaCha8Rng {
    let combined = seed.wrapping_add(algorithm.index() as u64);
    ChaCha8Rng::seed_from_u64(combined)
}

/// RNG for an interactive session: seeded when a seed is given, from OS
/// entropy otherwise.
pub fn session_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}
