//! Integer pixel positions and the four axis-aligned step directions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel location or grid-aligned agent position
///
/// Coordinates are integers so that cells taken from the step grid compare
/// and hash exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Column (grows to the right)
    pub x: i32,
    /// Row (grows downward)
    pub y: i32,
}

impl Cell {
    /// Create a cell from its coordinates
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell displaced by the given offset
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Cell displaced by the given offset, or `None` if a coordinate overflows
    pub const fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// Straight-line distance to another cell
    pub fn distance(self, other: Self) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    /// True when both axis distances are strictly below `range`
    pub const fn within_axis_range(self, other: Self, range: i32) -> bool {
        (self.x - other.x).abs() < range && (self.y - other.y).abs() < range
    }
}

impl From<[i32; 2]> for Cell {
    fn from(value: [i32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four axis-aligned moves on the step grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Negative y
    Up,
    /// Positive x
    Right,
    /// Positive y
    Down,
    /// Negative x
    Left,
}

impl Direction {
    /// Neighbour order used by the solver; the first valid entry wins
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Unit offset `(dx, dy)` of this direction
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Right => (1, 0),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
        }
    }

    /// Neighbour of `cell` at `step` pixels in this direction
    ///
    /// `None` when the neighbour is not representable.
    pub const fn neighbour(self, cell: Cell, step: i32) -> Option<Cell> {
        let (dx, dy) = self.delta();
        match (dx.checked_mul(step), dy.checked_mul(step)) {
            (Some(dx), Some(dy)) => cell.checked_offset(dx, dy),
            _ => None,
        }
    }
}
