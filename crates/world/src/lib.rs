//! Voxel grid collaborators and procedural tree placement.

pub mod blocks;
mod grid;
mod recording;
pub mod trees;

pub use grid::*;
pub use recording::*;
pub use trees::{can_place_object, generate_leaves, CherryTree, TreeVariant};
