use sakuragen_core::{BlockPos, RandomSource};

use crate::blocks::{can_hold_leaves, CHERRY_LEAVES};
use crate::grid::{Voxel, VoxelGrid};

/// Widest horizontal reach of a canopy, in cells from its anchor.
pub const LEAVES_RADIUS: i32 = 4;

const CANOPY_HALF_HEIGHT: i32 = 2;

/// Paint a flattened leaf cloud around `anchor`.
///
/// Each layer is a disc whose radius shrinks away from the anchor layer. The
/// lowest layer randomly drips an extra leaf one cell further down (one in
/// three per cell). Leaves only replace air or leaves of other trees.
pub fn generate_leaves<G, R>(grid: &mut G, rng: &mut R, anchor: BlockPos)
where
    G: VoxelGrid + ?Sized,
    R: RandomSource + ?Sized,
{
    let leaves = Voxel::new(CHERRY_LEAVES, 0);
    for dy in -CANOPY_HALF_HEIGHT..=CANOPY_HALF_HEIGHT {
        let radius = LEAVES_RADIUS - dy.abs().max(1);
        for dx in -LEAVES_RADIUS..=LEAVES_RADIUS {
            for dz in -LEAVES_RADIUS..=LEAVES_RADIUS {
                if dx * dx + dz * dz > radius * radius {
                    continue;
                }
                let pos = anchor.offset(dx, dy, dz);
                paint_leaf(grid, pos, leaves);
                if dy == -CANOPY_HALF_HEIGHT && rng.next_range(0, 2) == 0 {
                    paint_leaf(grid, pos.below(1), leaves);
                }
            }
        }
    }
}

fn paint_leaf<G: VoxelGrid + ?Sized>(grid: &mut G, pos: BlockPos, leaves: Voxel) {
    if can_hold_leaves(grid.block_id_at(pos)) {
        grid.set_voxel_and_notify(pos, leaves);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{AIR, AZALEA_LEAVES, CHERRY_LOG, LEAVES, SAPLING, STONE};
    use crate::{DenseGrid, RecordingGrid, WriteKind};
    use proptest::prelude::*;
    use sakuragen_core::WorldRandom;
    use sakuragen_testkit::ScriptedRandom;

    const ANCHOR: BlockPos = BlockPos::new(8, 8, 8);

    fn leaf_count(grid: &DenseGrid) -> usize {
        grid.count(CHERRY_LEAVES)
    }

    fn layer_leaves(grid: &DenseGrid, dy: i32) -> usize {
        let mut count = 0;
        for dx in -6..=6 {
            for dz in -6..=6 {
                if grid.block_id_at(ANCHOR.offset(dx, dy, dz)) == CHERRY_LEAVES {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn layers_are_discs_of_shrinking_radius() {
        let mut grid = DenseGrid::cube(16).expect("grid");
        // Never droop: every draw answers 2.
        let mut rng = ScriptedRandom::new().ranges(std::iter::repeat(2).take(64));
        generate_leaves(&mut grid, &mut rng, ANCHOR);

        // Radius 3 discs hold 29 cells, radius 2 discs hold 13.
        assert_eq!(layer_leaves(&grid, 0), 29);
        assert_eq!(layer_leaves(&grid, 1), 29);
        assert_eq!(layer_leaves(&grid, -1), 29);
        assert_eq!(layer_leaves(&grid, 2), 13);
        assert_eq!(layer_leaves(&grid, -2), 13);
        assert_eq!(layer_leaves(&grid, -3), 0);
        assert_eq!(leaf_count(&grid), 29 * 3 + 13 * 2);
        assert_eq!(rng.range_draws(), 13, "one droop draw per bottom-layer cell");
    }

    #[test]
    fn corners_stay_empty() {
        let mut grid = DenseGrid::cube(16).expect("grid");
        generate_leaves(&mut grid, &mut ScriptedRandom::new(), ANCHOR);
        assert_eq!(grid.block_id_at(ANCHOR.offset(3, 0, 3)), AIR);
        assert_eq!(grid.block_id_at(ANCHOR.offset(3, 0, 0)), CHERRY_LEAVES);
        assert_eq!(grid.block_id_at(ANCHOR.offset(2, 2, 2)), AIR);
    }

    #[test]
    fn droop_hangs_below_bottom_layer() {
        let mut grid = DenseGrid::cube(16).expect("grid");
        // Fallback answer is the lower bound, so every bottom cell droops.
        generate_leaves(&mut grid, &mut ScriptedRandom::new(), ANCHOR);
        assert_eq!(layer_leaves(&grid, -3), 13);
    }

    #[test]
    fn repaints_other_leaves_but_not_solids() {
        let mut grid = DenseGrid::cube(16).expect("grid");
        let leafy = ANCHOR.offset(1, 0, 0);
        let trunk = ANCHOR.offset(0, -1, 0);
        let sapling = ANCHOR.offset(0, 1, 1);
        grid.set_block_id_at(leafy, AZALEA_LEAVES);
        grid.set_block_id_at(trunk, CHERRY_LOG);
        grid.set_block_id_at(sapling, SAPLING);
        grid.set_block_id_at(ANCHOR.offset(0, 2, 0), LEAVES);

        generate_leaves(&mut grid, &mut WorldRandom::seeded(3), ANCHOR);

        assert_eq!(grid.block_id_at(leafy), CHERRY_LEAVES);
        assert_eq!(grid.block_id_at(ANCHOR.offset(0, 2, 0)), CHERRY_LEAVES);
        assert_eq!(grid.block_id_at(trunk), CHERRY_LOG);
        assert_eq!(grid.block_id_at(sapling), SAPLING);
    }

    #[test]
    fn overlapping_canopy_skips_existing_cherry_leaves() {
        let mut grid = RecordingGrid::new(DenseGrid::cube(24).expect("grid"));
        let no_droop = || ScriptedRandom::new().ranges(std::iter::repeat(2).take(13));
        generate_leaves(&mut grid, &mut no_droop(), ANCHOR);
        let first = grid.take_writes();
        assert_eq!(first.len(), 29 * 3 + 13 * 2);

        let second_anchor = ANCHOR.offset(3, -2, 0);
        generate_leaves(&mut grid, &mut no_droop(), second_anchor);
        let second = grid.take_writes();

        assert!(!second.is_empty());
        assert!(second.len() < first.len(), "shared cells are written once");
        for write in &second {
            assert_eq!(write.kind, WriteKind::Notify);
            assert!(
                !first.iter().any(|w| w.pos == write.pos),
                "rewrote cherry leaf at {}",
                write.pos
            );
        }
    }

    proptest! {
        #[test]
        fn never_overwrites_non_leaf_solids(
            seed in any::<u64>(),
            cells in prop::collection::vec((-4i32..=4, -3i32..=2, -4i32..=4, 0usize..4), 1..40),
        ) {
            let palette = [STONE, CHERRY_LOG, SAPLING, LEAVES];
            let mut grid = DenseGrid::cube(16).expect("grid");
            for (dx, dy, dz, pick) in &cells {
                grid.set_block_id_at(ANCHOR.offset(*dx, *dy, *dz), palette[*pick]);
            }
            let before: Vec<_> = cells
                .iter()
                .map(|(dx, dy, dz, _)| {
                    let pos = ANCHOR.offset(*dx, *dy, *dz);
                    (pos, grid.block_id_at(pos))
                })
                .collect();

            generate_leaves(&mut grid, &mut WorldRandom::seeded(seed), ANCHOR);

            for (pos, id) in before {
                if !can_hold_leaves(id) {
                    prop_assert_eq!(grid.block_id_at(pos), id);
                }
            }
        }
    }
}
