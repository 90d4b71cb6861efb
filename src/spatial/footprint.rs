//! Four-corner collision check for the agent's square bounding box

use crate::spatial::cell::Cell;
use crate::spatial::raster::FreeSpace;

/// Square collision footprint anchored at its top-left corner
///
/// A position is valid when the box stays inside the raster and all four of
/// its corners are open space. Checking corners rather than the anchor alone
/// keeps the agent from clipping diagonal wall corners in narrow corridors.
#[derive(Debug, Clone)]
pub struct Footprint {
    free_space: FreeSpace,
    size: i32,
}

impl Footprint {
    /// Create a checker for a square of edge `size`
    pub const fn new(free_space: FreeSpace, size: i32) -> Self {
        Self { free_space, size }
    }

    /// Edge length of the footprint
    pub const fn size(&self) -> i32 {
        self.size
    }

    /// The oracle the corners are checked against
    pub const fn free_space(&self) -> &FreeSpace {
        &self.free_space
    }

    /// Corners of the box anchored at `(x, y)`
    pub const fn corners(&self, x: i32, y: i32) -> [Cell; 4] {
        let s = self.size;
        [
            Cell::new(x, y),
            Cell::new(x + s, y),
            Cell::new(x, y + s),
            Cell::new(x + s, y + s),
        ]
    }

    /// True if the agent may stand at `(new_x, new_y)`
    pub fn is_valid_move(&self, new_x: i32, new_y: i32) -> bool {
        let max_x = self.free_space.width() - self.size;
        let max_y = self.free_space.height() - self.size;
        if new_x < 0 || new_y < 0 || new_x > max_x || new_y > max_y {
            return false;
        }

        self.corners(new_x, new_y)
            .iter()
            .all(|corner| self.free_space.is_traversable(corner.x, corner.y))
    }

    /// Cell form of [`Self::is_valid_move`]
    pub fn is_valid_cell(&self, cell: Cell) -> bool {
        self.is_valid_move(cell.x, cell.y)
    }
}
