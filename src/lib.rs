//! Raster maze navigation with footprint-aware depth-first solving
//!
//! A maze image is turned into a free-space model keyed on the color under
//! the agent's start pixel. Openings on the image border are detected and
//! resolved into an entrance and an exit, and a tick-driven depth-first
//! navigator walks a square-footprint agent over a fixed step grid until it
//! reaches the exit or exhausts the reachable cells.

#![forbid(unsafe_code)]

/// Maze solving, agent movement and opening detection
pub mod algorithm;
/// Input/output operations, configuration and error handling
pub mod io;
/// Cells, rasters, footprints and the step grid
pub mod spatial;

pub use algorithm::navigator::{SolveState, TickOutcome};
pub use algorithm::session::{MazeSession, NavigatorConfig};
pub use io::error::{MazeError, Result};
