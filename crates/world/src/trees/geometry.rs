use sakuragen_core::BlockPos;

use crate::blocks::{can_grow_into, CHERRY_LOG};
use crate::grid::{BlockState, Voxel, VoxelGrid};

/// Orientation of a placed log segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogAxis {
    Y,
    X,
    Z,
}

impl LogAxis {
    /// Pillar-axis state bits.
    pub const fn state(self) -> BlockState {
        match self {
            LogAxis::Y => 0,
            LogAxis::X => 1,
            LogAxis::Z => 2,
        }
    }

    pub const fn cherry_log(self) -> Voxel {
        Voxel::new(CHERRY_LOG, self.state())
    }
}

/// Horizontal axis the large cherry tree spreads its side branches along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthAxis {
    X,
    Z,
}

impl GrowthAxis {
    /// `(x, z)` multipliers of one step along the axis.
    pub const fn unit(self) -> (i32, i32) {
        match self {
            GrowthAxis::X => (1, 0),
            GrowthAxis::Z => (0, 1),
        }
    }

    pub const fn flipped(self) -> Self {
        match self {
            GrowthAxis::X => GrowthAxis::Z,
            GrowthAxis::Z => GrowthAxis::X,
        }
    }

    pub const fn log_axis(self) -> LogAxis {
        match self {
            GrowthAxis::X => LogAxis::X,
            GrowthAxis::Z => LogAxis::Z,
        }
    }
}

/// Cardinal direction, indexed 0..=3 as -x, +x, -z, +z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    West,
    East,
    North,
    South,
}

impl Direction {
    const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// Direction for `index`, wrapping modulo 4.
    pub fn from_index(index: i32) -> Self {
        Self::ALL[index.rem_euclid(4) as usize]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Next direction in index order, wrapping.
    pub fn rotated(self) -> Self {
        Self::ALL[(self.index() + 1) % 4]
    }

    /// All four directions starting with `self`, in rotation order.
    pub fn rotations(self) -> impl Iterator<Item = Direction> {
        std::iter::successors(Some(self), |dir| Some(dir.rotated())).take(4)
    }

    pub const fn unit(self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }

    pub const fn log_axis(self) -> LogAxis {
        match self {
            Direction::West | Direction::East => LogAxis::X,
            Direction::North | Direction::South => LogAxis::Z,
        }
    }
}

/// Straight run of log segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LogRun {
    pub start: BlockPos,
    pub step: (i32, i32, i32),
    pub len: i32,
    pub axis: LogAxis,
}

impl LogRun {
    /// Vertical trunk of `height` segments starting at `base`.
    pub fn column(base: BlockPos, height: i32) -> Self {
        Self {
            start: base,
            step: (0, 1, 0),
            len: height,
            axis: LogAxis::Y,
        }
    }

    pub fn cells(self) -> impl Iterator<Item = BlockPos> {
        let (dx, dy, dz) = self.step;
        (0..self.len.max(0)).map(move |i| self.start.offset(dx * i, dy * i, dz * i))
    }

    pub fn place<G: VoxelGrid + ?Sized>(self, grid: &mut G) {
        for pos in self.cells() {
            place_log(grid, pos, self.axis);
        }
    }
}

/// Write a log segment unless the cell is already occupied by something solid.
pub(crate) fn place_log<G: VoxelGrid + ?Sized>(grid: &mut G, pos: BlockPos, axis: LogAxis) {
    if can_grow_into(grid.block_id_at(pos)) {
        grid.set_voxel_and_notify(pos, axis.cherry_log());
    }
}
