use std::collections::BTreeSet;

use sakuragen_core::BlockPos;
use thiserror::Error;

use crate::blocks;

/// Block identifier referencing the registry.
pub type BlockId = u16;
/// Block state metadata bits.
pub type BlockState = u16;

/// Largest grid a [`DenseGrid`] will allocate.
pub const MAX_GRID_VOLUME: usize = 1 << 26;

/// Per-voxel data: block id plus state bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct Voxel {
    pub id: BlockId,
    pub state: BlockState,
}

impl Voxel {
    pub const AIR: Self = Self::new(blocks::AIR, 0);

    pub const fn new(id: BlockId, state: BlockState) -> Self {
        Self { id, state }
    }

    #[inline]
    pub fn is_air(&self) -> bool {
        self.id == blocks::AIR
    }
}

/// Voxel access used by world generators.
///
/// Implementations answer every integer coordinate; cells the grid does not
/// own read as air and swallow writes.
pub trait VoxelGrid {
    /// Block id stored at `pos`.
    fn block_id_at(&self, pos: BlockPos) -> BlockId;

    /// Raw write of a bare block id (state zeroed), without neighbour updates.
    fn set_block_id_at(&mut self, pos: BlockPos, id: BlockId);

    /// Write a voxel and schedule block updates for it and its neighbours.
    fn set_voxel_and_notify(&mut self, pos: BlockPos, voxel: Voxel);

    /// Put soil under a freshly planted trunk.
    fn set_ground_cover(&mut self, pos: BlockPos) {
        self.set_block_id_at(pos, blocks::DIRT);
    }
}

impl<G: VoxelGrid + ?Sized> VoxelGrid for &mut G {
    fn block_id_at(&self, pos: BlockPos) -> BlockId {
        (**self).block_id_at(pos)
    }

    fn set_block_id_at(&mut self, pos: BlockPos, id: BlockId) {
        (**self).set_block_id_at(pos, id)
    }

    fn set_voxel_and_notify(&mut self, pos: BlockPos, voxel: Voxel) {
        (**self).set_voxel_and_notify(pos, voxel)
    }

    fn set_ground_cover(&mut self, pos: BlockPos) {
        (**self).set_ground_cover(pos)
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    /// Dirty flags set whenever grid data changes.
    pub struct DirtyFlags: u8 {
        const MESH = 0b0000_0001;
        const LIGHT = 0b0000_0010;
    }
}

impl Default for DirtyFlags {
    fn default() -> Self {
        DirtyFlags::empty()
    }
}

/// Errors raised while allocating a grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid extent {0:?} has an empty axis")]
    EmptyExtent([usize; 3]),
    #[error("grid extent {extent:?} exceeds the {max} voxel limit")]
    TooLarge { extent: [usize; 3], max: usize },
    #[error("grid at {origin} with extent {extent:?} leaves the i32 coordinate space")]
    OutOfRange { origin: BlockPos, extent: [usize; 3] },
}

/// Axis-aligned box of voxels owned in memory.
pub struct DenseGrid {
    origin: BlockPos,
    extent: [usize; 3],
    voxels: Vec<Voxel>,
    dirty: DirtyFlags,
    pending_updates: BTreeSet<BlockPos>,
}

impl DenseGrid {
    /// Allocate an air-filled grid covering `origin .. origin + extent`.
    pub fn new(origin: BlockPos, extent: [usize; 3]) -> Result<Self, GridError> {
        if extent.iter().any(|axis| *axis == 0) {
            return Err(GridError::EmptyExtent(extent));
        }
        let volume = extent
            .iter()
            .try_fold(1usize, |acc, axis| acc.checked_mul(*axis))
            .filter(|volume| *volume <= MAX_GRID_VOLUME)
            .ok_or(GridError::TooLarge {
                extent,
                max: MAX_GRID_VOLUME,
            })?;
        let fits = [origin.x, origin.y, origin.z]
            .iter()
            .zip(extent)
            .all(|(start, len)| i64::from(*start) + len as i64 - 1 <= i64::from(i32::MAX));
        if !fits {
            return Err(GridError::OutOfRange { origin, extent });
        }

        Ok(Self {
            origin,
            extent,
            voxels: vec![Voxel::AIR; volume],
            dirty: DirtyFlags::all(),
            pending_updates: BTreeSet::new(),
        })
    }

    /// Allocate a cube of side `size` anchored at the world origin.
    pub fn cube(size: usize) -> Result<Self, GridError> {
        Self::new(BlockPos::default(), [size; 3])
    }

    fn index(&self, pos: BlockPos) -> Option<usize> {
        let local = [
            i64::from(pos.x) - i64::from(self.origin.x),
            i64::from(pos.y) - i64::from(self.origin.y),
            i64::from(pos.z) - i64::from(self.origin.z),
        ];
        let in_bounds = local
            .iter()
            .zip(self.extent)
            .all(|(offset, len)| (0..len as i64).contains(offset));
        if !in_bounds {
            return None;
        }
        let [x, y, z] = local.map(|offset| offset as usize);
        let [size_x, _, size_z] = self.extent;
        Some((y * size_z + z) * size_x + x)
    }

    /// Fetch a voxel copy; cells outside the box read as air.
    pub fn voxel(&self, pos: BlockPos) -> Voxel {
        self.index(pos)
            .map_or(Voxel::AIR, |idx| self.voxels[idx])
    }

    /// Set a voxel and mark the grid for remeshing. Returns whether anything changed.
    pub fn set_voxel(&mut self, pos: BlockPos, voxel: Voxel) -> bool {
        let Some(idx) = self.index(pos) else {
            return false;
        };
        if self.voxels[idx] == voxel {
            return false;
        }
        self.voxels[idx] = voxel;
        self.dirty.insert(DirtyFlags::MESH);
        true
    }

    /// Fill every owned cell in the inclusive box `min..=max` with `voxel`.
    pub fn fill(&mut self, min: BlockPos, max: BlockPos, voxel: Voxel) {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set_voxel(BlockPos::new(x, y, z), voxel);
                }
            }
        }
    }

    /// Number of owned cells holding `id`.
    pub fn count(&self, id: BlockId) -> usize {
        self.voxels.iter().filter(|voxel| voxel.id == id).count()
    }

    /// Consume and return the current dirty flags.
    pub fn take_dirty_flags(&mut self) -> DirtyFlags {
        let flags = self.dirty;
        self.dirty = DirtyFlags::empty();
        flags
    }

    /// Positions awaiting a block update, in deterministic order.
    pub fn drain_updates(&mut self) -> Vec<BlockPos> {
        std::mem::take(&mut self.pending_updates)
            .into_iter()
            .collect()
    }
}

impl VoxelGrid for DenseGrid {
    fn block_id_at(&self, pos: BlockPos) -> BlockId {
        self.voxel(pos).id
    }

    fn set_block_id_at(&mut self, pos: BlockPos, id: BlockId) {
        self.set_voxel(pos, Voxel::new(id, 0));
    }

    fn set_voxel_and_notify(&mut self, pos: BlockPos, voxel: Voxel) {
        if !self.set_voxel(pos, voxel) {
            return;
        }
        self.dirty.insert(DirtyFlags::LIGHT);
        self.pending_updates.insert(pos);
        self.pending_updates.extend(pos.neighbours());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_air_and_dirty() {
        let mut grid = DenseGrid::cube(4).expect("grid");
        assert!(grid.voxel(BlockPos::new(3, 3, 3)).is_air());
        assert_eq!(grid.take_dirty_flags(), DirtyFlags::all());
        assert!(grid.take_dirty_flags().is_empty());
    }

    #[test]
    fn out_of_range_reads_air_and_drops_writes() {
        let mut grid = DenseGrid::new(BlockPos::new(-2, 0, -2), [4, 4, 4]).expect("grid");
        let outside = BlockPos::new(2, 0, 0);
        grid.set_block_id_at(outside, blocks::STONE);
        assert_eq!(grid.block_id_at(outside), blocks::AIR);
        assert_eq!(grid.count(blocks::STONE), 0);

        let inside = BlockPos::new(-2, 0, 1);
        grid.set_block_id_at(inside, blocks::STONE);
        assert_eq!(grid.block_id_at(inside), blocks::STONE);
    }

    #[test]
    fn raw_writes_skip_updates() {
        let mut grid = DenseGrid::cube(4).expect("grid");
        grid.take_dirty_flags();
        grid.set_block_id_at(BlockPos::new(1, 1, 1), blocks::DIRT);
        assert_eq!(grid.take_dirty_flags(), DirtyFlags::MESH);
        assert!(grid.drain_updates().is_empty());
    }

    #[test]
    fn notified_writes_queue_neighbours() {
        let mut grid = DenseGrid::cube(4).expect("grid");
        grid.take_dirty_flags();
        let pos = BlockPos::new(1, 1, 1);
        grid.set_voxel_and_notify(pos, Voxel::new(blocks::CHERRY_LOG, 1));
        assert_eq!(grid.voxel(pos), Voxel::new(blocks::CHERRY_LOG, 1));
        assert_eq!(grid.take_dirty_flags(), DirtyFlags::all());
        let updates = grid.drain_updates();
        assert_eq!(updates.len(), 7);
        assert!(updates.contains(&pos));
        assert!(updates.contains(&pos.above(1)));
        assert!(grid.drain_updates().is_empty());
    }

    #[test]
    fn unchanged_write_is_silent() {
        let mut grid = DenseGrid::cube(2).expect("grid");
        grid.take_dirty_flags();
        grid.set_voxel_and_notify(BlockPos::new(0, 0, 0), Voxel::AIR);
        assert!(grid.take_dirty_flags().is_empty());
        assert!(grid.drain_updates().is_empty());
    }

    #[test]
    fn fill_covers_inclusive_box() {
        let mut grid = DenseGrid::cube(8).expect("grid");
        grid.fill(
            BlockPos::new(0, 0, 0),
            BlockPos::new(7, 1, 7),
            Voxel::new(blocks::STONE, 0),
        );
        assert_eq!(grid.count(blocks::STONE), 8 * 2 * 8);
    }

    #[test]
    fn ground_cover_defaults_to_dirt() {
        let mut grid = DenseGrid::cube(2).expect("grid");
        grid.set_ground_cover(BlockPos::new(0, 0, 0));
        assert_eq!(grid.block_id_at(BlockPos::new(0, 0, 0)), blocks::DIRT);
    }

    #[test]
    fn rejects_degenerate_extents() {
        assert_eq!(
            DenseGrid::cube(0).err(),
            Some(GridError::EmptyExtent([0, 0, 0]))
        );
        assert!(matches!(
            DenseGrid::new(BlockPos::default(), [1 << 20, 1 << 20, 2]),
            Err(GridError::TooLarge { .. })
        ));
        assert!(matches!(
            DenseGrid::new(BlockPos::new(i32::MAX, 0, 0), [2, 1, 1]),
            Err(GridError::OutOfRange { .. })
        ));
    }

    #[test]
    fn voxel_serialization() {
        let voxel = Voxel::new(42, 7);
        let serialized = serde_json::to_string(&voxel).unwrap();
        let deserialized: Voxel = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, voxel);
    }
}
