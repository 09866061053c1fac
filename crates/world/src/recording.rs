use sakuragen_core::BlockPos;
use serde::Serialize;

use crate::grid::{BlockId, Voxel, VoxelGrid};

/// How a write reached the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteKind {
    Raw,
    Notify,
    GroundCover,
}

/// One write observed by a [`RecordingGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridWrite {
    pub kind: WriteKind,
    pub pos: BlockPos,
    pub voxel: Voxel,
}

/// Grid wrapper that keeps an ordered log of every write.
pub struct RecordingGrid<G> {
    inner: G,
    writes: Vec<GridWrite>,
}

impl<G: VoxelGrid> RecordingGrid<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            writes: Vec::new(),
        }
    }

    pub fn writes(&self) -> &[GridWrite] {
        &self.writes
    }

    /// Hand back the log collected so far and start a fresh one.
    pub fn take_writes(&mut self) -> Vec<GridWrite> {
        std::mem::take(&mut self.writes)
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn into_inner(self) -> G {
        self.inner
    }
}

impl<G: VoxelGrid> VoxelGrid for RecordingGrid<G> {
    fn block_id_at(&self, pos: BlockPos) -> BlockId {
        self.inner.block_id_at(pos)
    }

    fn set_block_id_at(&mut self, pos: BlockPos, id: BlockId) {
        self.writes.push(GridWrite {
            kind: WriteKind::Raw,
            pos,
            voxel: Voxel::new(id, 0),
        });
        self.inner.set_block_id_at(pos, id);
    }

    fn set_voxel_and_notify(&mut self, pos: BlockPos, voxel: Voxel) {
        self.writes.push(GridWrite {
            kind: WriteKind::Notify,
            pos,
            voxel,
        });
        self.inner.set_voxel_and_notify(pos, voxel);
    }

    fn set_ground_cover(&mut self, pos: BlockPos) {
        self.inner.set_ground_cover(pos);
        // The wrapped grid decides what soil looks like; log what it chose.
        let id = self.inner.block_id_at(pos);
        self.writes.push(GridWrite {
            kind: WriteKind::GroundCover,
            pos,
            voxel: Voxel::new(id, 0),
        });
    }
}
