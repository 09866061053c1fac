#![warn(missing_docs)]
//! Core primitives shared across the workspace.

mod position;
mod random;

pub use position::BlockPos;
pub use random::{RandomSource, WorldRandom};

/// Helper to derive a reproducible generator seed from a world seed and a
/// per-placement salt (typically a hash of the planting position).
pub fn scoped_rng(world_seed: u64, placement_hash: u64) -> WorldRandom {
    WorldRandom::seeded(world_seed ^ placement_hash.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Stable hash of a block position, used to salt per-placement generators.
pub fn position_hash(pos: BlockPos) -> u64 {
    (pos.x as u64).wrapping_mul(374_761_393)
        ^ (pos.y as u64).wrapping_mul(1_103_515_245)
        ^ (pos.z as u64).wrapping_mul(668_265_263)
}
