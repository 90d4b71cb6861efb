//! Spatial data structures for the maze raster
//!
//! This module contains spatial-related functionality including:
//! - Integer cells and step directions
//! - The raster and its free-space oracle
//! - Footprint collision checks
//! - The step grid and visited-cell bitset

/// Pixel positions and step directions
pub mod cell;
/// Agent footprint collision checking
pub mod footprint;
/// Step grid indexing and visited-cell tracking
pub mod lattice;
/// Raster storage and traversable-color oracle
pub mod raster;

pub use cell::{Cell, Direction};
pub use footprint::Footprint;
pub use lattice::{StepGrid, VisitedSet};
pub use raster::{FreeSpace, Raster};
