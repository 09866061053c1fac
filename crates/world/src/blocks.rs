//! Block identifiers and the classifications tree placement relies on.

use crate::grid::BlockId;

/// Reserved ID for air.
pub const AIR: BlockId = 0;
pub const STONE: BlockId = 1;
pub const DIRT: BlockId = 2;
pub const GRASS: BlockId = 3;

pub const LEAVES: BlockId = 12;
pub const LEAVES2: BlockId = 13;
pub const AZALEA_LEAVES: BlockId = 14;
pub const AZALEA_LEAVES_FLOWERED: BlockId = 15;
pub const CHERRY_LEAVES: BlockId = 16;

pub const CHERRY_LOG: BlockId = 20;

pub const SAPLING: BlockId = 30;
pub const CHERRY_SAPLING: BlockId = 31;
pub const VINE: BlockId = 32;

/// Every leaf block, cherry included.
pub fn is_leaf_family(id: BlockId) -> bool {
    id == CHERRY_LEAVES || is_foreign_leaf(id)
}

/// Leaves from other trees; a cherry canopy may repaint these.
fn is_foreign_leaf(id: BlockId) -> bool {
    matches!(id, LEAVES | LEAVES2 | AZALEA_LEAVES | AZALEA_LEAVES_FLOWERED)
}

/// Whether a canopy leaf may be written over `id`.
///
/// Cherry leaves already in place are left alone, so overlapping canopies
/// write each shared cell once.
#[inline]
pub fn can_hold_leaves(id: BlockId) -> bool {
    id == AIR || is_foreign_leaf(id)
}

/// Whether generated wood or foliage may replace `id`.
///
/// Air and soft foliage only; terrain and existing trunks always block growth.
pub fn can_grow_into(id: BlockId) -> bool {
    id == AIR || is_leaf_family(id) || matches!(id, SAPLING | CHERRY_SAPLING | VINE)
}
