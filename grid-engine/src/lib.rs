//! FILENAME: grid-engine/src/lib.rs
//! Grid composition for resolved tables.
//!
//! Layers:
//! - `definition`: Orientation, options and the layout spec (WHAT to place)
//! - `composer`: Building, packing and flattening the grid (HOW it is placed)

pub mod definition;
pub mod composer;

pub use definition::*;
pub use composer::{compose, compose_unshifted, pack, ComposedTree, GridNode, PendingTable, Placeable};
