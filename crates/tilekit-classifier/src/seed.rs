//! Deterministic seed derivation.
//!
//! Every (rule, cell) pair gets its own RNG derived from the world seed, so a
//! pass replays identically and no random state leaks between rules.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tilekit_grid::CellIndex;
use tilekit_rules::NoiseSettings;

/// Derive a u64 seed for one rule's evaluation of one cell.
///
/// Uses SipHash (via std's `DefaultHasher`) to combine the inputs into a
/// well-distributed u64.
pub fn derive_cell_seed(world_seed: u64, rule_index: usize, cell: CellIndex) -> u64 {
    let mut hasher = DefaultHasher::new();
    world_seed.hash(&mut hasher);
    rule_index.hash(&mut hasher);
    cell.hash(&mut hasher);
    hasher.finish()
}

/// Derive the RNG for one rule's evaluation of one cell.
pub fn cell_rng(world_seed: u64, rule_index: usize, cell: CellIndex) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(derive_cell_seed(world_seed, rule_index, cell))
}

/// Derive the 32-bit noise seed for a 64-bit seed.
///
/// Hashes instead of truncating, so seeds differing only in their high bits
/// still get different noise fields.
pub fn derive_noise_seed(seed: u64) -> u32 {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let hash = hasher.finish();
    (hash ^ (hash >> 32)) as u32
}

/// Picks the noise seed for a cell: the rule's fixed seed, else the cell index
/// in per-cell mode, else one derived from the world seed.
pub fn resolve_noise_seed(noise: &NoiseSettings, world_seed: u64, cell: CellIndex) -> u32 {
    match noise.fixed_seed {
        Some(seed) => seed,
        None if noise.per_cell_seed => {
            u32::try_from(cell).unwrap_or_else(|_| derive_noise_seed(cell as u64))
        }
        None => derive_noise_seed(world_seed),
    }
}
