//! Integer voxel coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// World-space voxel coordinate (X, Y, Z).
///
/// Implements Ord for deterministic iteration in BTreeMap/BTreeSet (sorts by x, then y, then z).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// East/west coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
    /// North/south coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a position from its components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Translate by the given deltas, wrapping at the `i32` limits.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            z: self.z.wrapping_add(dz),
        }
    }

    /// Position `n` cells higher.
    #[inline]
    pub const fn above(self, n: i32) -> Self {
        self.offset(0, n, 0)
    }

    /// Position `n` cells lower.
    #[inline]
    pub const fn below(self, n: i32) -> Self {
        self.offset(0, -n, 0)
    }

    /// The six face-adjacent neighbours, in a fixed order.
    pub const fn neighbours(self) -> [Self; 6] {
        [
            self.offset(-1, 0, 0),
            self.offset(1, 0, 0),
            self.offset(0, -1, 0),
            self.offset(0, 1, 0),
            self.offset(0, 0, -1),
            self.offset(0, 0, 1),
        ]
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_and_vertical_helpers() {
        let pos = BlockPos::new(3, 10, -2);
        assert_eq!(pos.offset(1, -1, 2), BlockPos::new(4, 9, 0));
        assert_eq!(pos.above(4), BlockPos::new(3, 14, -2));
        assert_eq!(pos.below(1), BlockPos::new(3, 9, -2));
    }

    #[test]
    fn offset_wraps_at_coordinate_limits() {
        let edge = BlockPos::new(i32::MAX, i32::MIN, 0);
        assert_eq!(edge.offset(1, -1, 0), BlockPos::new(i32::MIN, i32::MAX, 0));
        assert_eq!(edge.above(2).y, i32::MIN + 2);
    }

    #[test]
    fn neighbours_are_face_adjacent() {
        let pos = BlockPos::new(0, 0, 0);
        for n in pos.neighbours() {
            let manhattan = n.x.abs() + n.y.abs() + n.z.abs();
            assert_eq!(manhattan, 1, "{n} should touch {pos}");
        }
    }

    #[test]
    fn display_format() {
        assert_eq!(BlockPos::new(5, -3, 8).to_string(), "(5, -3, 8)");
    }

    #[test]
    fn serialization_roundtrip() {
        let pos = BlockPos::new(-5, 64, 10);
        let serialized = serde_json::to_string(&pos).unwrap();
        let deserialized: BlockPos = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, pos);
    }
}
