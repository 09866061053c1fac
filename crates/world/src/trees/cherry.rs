//! Cherry tree generation.
//!
//! A cherry tree comes in two shapes. The large one is a tall trunk with a
//! branch to either side along one horizontal axis, each branch turning
//! upward and carrying its own canopy. The small one is a short trunk with a
//! single branch climbing diagonally away from it, crowned by one canopy.

use sakuragen_core::{BlockPos, RandomSource};
use tracing::{debug, trace};

use super::canopy::generate_leaves;
use super::feasibility::can_place_object;
use super::geometry::{place_log, Direction, GrowthAxis, LogAxis, LogRun};
use crate::blocks::AIR;
use crate::grid::VoxelGrid;

/// Branches starting this many cells up get a stepped elbow instead of a square corner.
const KINK_START_Y: i32 = 4;

/// Overall shape picked for one generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeVariant {
    Large,
    Small,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    const fn sign(self) -> i32 {
        match self {
            Side::Left => -1,
            Side::Right => 1,
        }
    }
}

/// One side branch of a large cherry tree.
///
/// The branch leaves the trunk `start_y` cells up, runs `length` cells
/// outward, then rises for `height` cells (counting its elbow).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideBranch {
    pub length: i32,
    pub height: i32,
    pub start_y: i32,
}

impl SideBranch {
    fn draw<R: RandomSource + ?Sized>(rng: &mut R) -> Self {
        let length = rng.next_range(2, 4);
        let height = rng.next_range(3, 5);
        let start_y = rng.next_range(4, 5);
        Self {
            length,
            height,
            start_y,
        }
    }

    /// Elbow cell where the outward run ends and the rise begins.
    fn elbow(self, origin: BlockPos, axis: GrowthAxis, side: Side) -> BlockPos {
        let (x_mul, z_mul) = axis.unit();
        let reach = side.sign() * self.length;
        origin.offset(reach * x_mul, self.start_y, reach * z_mul)
    }

    fn canopy_anchor(self, origin: BlockPos, axis: GrowthAxis, side: Side) -> BlockPos {
        self.elbow(origin, axis, side).above(self.height + 1)
    }

    fn fits<G: VoxelGrid + ?Sized>(
        self,
        grid: &G,
        origin: BlockPos,
        axis: GrowthAxis,
        side: Side,
    ) -> bool {
        can_place_object(grid, self.height, self.elbow(origin, axis, side))
    }

    fn place<G: VoxelGrid + ?Sized>(
        self,
        grid: &mut G,
        origin: BlockPos,
        axis: GrowthAxis,
        side: Side,
    ) {
        let (x_mul, z_mul) = axis.unit();
        let (step_x, step_z) = (side.sign() * x_mul, side.sign() * z_mul);
        let elbow = self.elbow(origin, axis, side);

        LogRun {
            start: origin.offset(step_x, self.start_y, step_z),
            step: (step_x, 0, step_z),
            len: self.length,
            axis: axis.log_axis(),
        }
        .place(grid);
        LogRun::column(elbow.above(1), self.height - 1).place(grid);

        //       |                    |
        // |     |     |     └-┐      |      ┌-┘
        // └-----|-----┘       └------|------┘
        //       |                    |
        if self.start_y == KINK_START_Y {
            grid.set_block_id_at(elbow, AIR);
            let step_in = elbow.offset(-step_x, 1, -step_z);
            place_log(grid, step_in, LogAxis::Y);
            place_log(grid, elbow.above(1), axis.log_axis());
        }
    }
}

/// Cherry tree generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct CherryTree;

impl CherryTree {
    /// Try to grow a cherry tree with its trunk base at `origin`.
    ///
    /// Returns `false` when neither shape fits; in that case the grid has not
    /// been written to.
    pub fn generate<G, R>(&self, grid: &mut G, rng: &mut R, origin: BlockPos) -> bool
    where
        G: VoxelGrid + ?Sized,
        R: RandomSource + ?Sized,
    {
        self.generate_variant(grid, rng, origin).is_some()
    }

    /// Like [`CherryTree::generate`], reporting which shape was placed.
    pub fn generate_variant<G, R>(
        &self,
        grid: &mut G,
        rng: &mut R,
        origin: BlockPos,
    ) -> Option<TreeVariant>
    where
        G: VoxelGrid + ?Sized,
        R: RandomSource + ?Sized,
    {
        if rng.next_bool() {
            if self.generate_large(grid, rng, origin) {
                debug!(%origin, "placed large cherry tree");
                return Some(TreeVariant::Large);
            }
            debug!(%origin, "large cherry tree blocked, trying small");
        }

        if self.generate_small(grid, rng, origin) {
            debug!(%origin, "placed small cherry tree");
            Some(TreeVariant::Small)
        } else {
            debug!(%origin, "no room for a cherry tree");
            None
        }
    }

    fn generate_large<G, R>(&self, grid: &mut G, rng: &mut R, origin: BlockPos) -> bool
    where
        G: VoxelGrid + ?Sized,
        R: RandomSource + ?Sized,
    {
        let trunk_height = 10 + i32::from(rng.next_bool());
        if !can_place_object(grid, trunk_height, origin) {
            trace!(%origin, trunk_height, "large trunk blocked");
            return false;
        }

        let mut axis = if rng.next_bool() {
            GrowthAxis::X
        } else {
            GrowthAxis::Z
        };

        let left = SideBranch::draw(rng);
        if !left.fits(grid, origin, axis, Side::Left) {
            trace!(%origin, ?axis, ?left, "left branch blocked, flipping axis");
            axis = axis.flipped();
            if !left.fits(grid, origin, axis, Side::Left) {
                trace!(%origin, ?axis, ?left, "left branch blocked on both axes");
                return false;
            }
        }

        let right = SideBranch::draw(rng);
        if !right.fits(grid, origin, axis, Side::Right) {
            trace!(%origin, ?axis, ?right, "right branch blocked");
            return false;
        }

        grid.set_ground_cover(origin.below(1));
        LogRun::column(origin, trunk_height).place(grid);
        left.place(grid, origin, axis, Side::Left);
        right.place(grid, origin, axis, Side::Right);

        generate_leaves(grid, rng, origin.above(trunk_height + 1));
        generate_leaves(grid, rng, left.canopy_anchor(origin, axis, Side::Left));
        generate_leaves(grid, rng, right.canopy_anchor(origin, axis, Side::Right));
        true
    }

    fn generate_small<G, R>(&self, grid: &mut G, rng: &mut R, origin: BlockPos) -> bool
    where
        G: VoxelGrid + ?Sized,
        R: RandomSource + ?Sized,
    {
        let trunk_height = 4 + i32::from(rng.next_bool());
        let branch_height = rng.next_range(3, 5);

        if !can_place_object(grid, trunk_height + 1, origin) {
            trace!(%origin, trunk_height, "small trunk blocked");
            return false;
        }

        let first = Direction::from_index(rng.next_range(0, 3)).rotated();
        let Some(direction) = first.rotations().find(|dir| {
            let (dx, dz) = dir.unit();
            let foot = origin.offset(dx * branch_height, 0, dz * branch_height);
            can_place_object(&*grid, branch_height, foot)
        }) else {
            trace!(%origin, branch_height, "small branch blocked in every direction");
            return false;
        };

        let (dx, dz) = direction.unit();
        let branch_axis = direction.log_axis();

        LogRun::column(origin, trunk_height).place(grid);

        // (└)-┐      branches taller than 3 skip the riser under the tip
        //     └-┐
        //       └-┐
        //         |
        //         |
        for step in 1..=branch_height {
            let cell = origin.offset(dx * step, trunk_height + step - 2, dz * step);
            place_log(grid, cell, branch_axis);
            if step == branch_height - 1 && branch_height > 3 {
                continue;
            }
            place_log(grid, cell.above(1), LogAxis::Y);
        }

        generate_leaves(
            grid,
            rng,
            origin.offset(
                dx * branch_height,
                trunk_height + branch_height,
                dz * branch_height,
            ),
        );
        true
    }
}
