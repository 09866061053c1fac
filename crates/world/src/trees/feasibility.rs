use sakuragen_core::BlockPos;

use crate::blocks::can_grow_into;
use crate::grid::VoxelGrid;

/// Half-width of the clearance square checked at `layer` of an object of `height`.
///
/// Starts at zero on the base layer and widens by one on layer 1 and again
/// on layer `height`: a trunk clearance, then a canopy clearance.
pub fn footprint_radius(layer: i32, height: i32) -> i32 {
    (0..=layer).filter(|l| *l == 1 || *l == height).count() as i32
}

/// Whether an object of `height` can grow up from `base`.
///
/// Walks `height + 3` layers, requiring every cell of each layer's footprint
/// to be growable. Read-only; stops at the first blocked cell.
pub fn can_place_object<G: VoxelGrid + ?Sized>(grid: &G, height: i32, base: BlockPos) -> bool {
    for layer in 0..height + 3 {
        let radius = footprint_radius(layer, height);
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                if !can_grow_into(grid.block_id_at(base.offset(dx, layer, dz))) {
                    return false;
                }
            }
        }
    }
    true
}
