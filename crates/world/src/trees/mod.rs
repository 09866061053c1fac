//! Procedural tree placement.
//!
//! Generators validate the space they need with [`can_place_object`] before
//! writing anything, so a rejected placement leaves the grid untouched.

mod canopy;
mod cherry;
mod feasibility;
mod geometry;

pub use crate::blocks::{can_grow_into, can_hold_leaves};
pub use canopy::{generate_leaves, LEAVES_RADIUS};
pub use cherry::{CherryTree, SideBranch, TreeVariant};
pub use feasibility::{can_place_object, footprint_radius};
pub use geometry::{Direction, GrowthAxis, LogAxis};
