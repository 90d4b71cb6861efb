//! Agent pose ownership and validated movement

use crate::io::error::{MazeError, Result};
use crate::spatial::{Cell, Direction, Footprint};

/// Position model for the single agent in the maze
///
/// The pose only changes through [`Agent::move_by`] (validated) or
/// [`Agent::teleport_to`] (for positions already known to be valid), so it
/// always satisfies the footprint check that was in force when it was set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Agent {
    pose: Cell,
    step: i32,
}

impl Agent {
    /// Create an agent without validating its start pose
    pub const fn new(start: Cell, step: i32) -> Self {
        Self { pose: start, step }
    }

    /// Create an agent at a start pose that must pass the footprint check
    ///
    /// # Errors
    ///
    /// Returns `InvalidStart` if the footprint does not fit at `start`
    pub fn placed(start: Cell, step: i32, footprint: &Footprint) -> Result<Self> {
        if !footprint.is_valid_cell(start) {
            return Err(MazeError::InvalidStart {
                position: [start.x, start.y],
                reason: format!(
                    "a {size}x{size} footprint does not fit in open space there",
                    size = footprint.size()
                ),
            });
        }
        Ok(Self::new(start, step))
    }

    /// Current pose
    pub const fn pose(&self) -> Cell {
        self.pose
    }

    /// Step granularity in pixels
    pub const fn step(&self) -> i32 {
        self.step
    }

    /// Move by `(dx, dy)` pixels if the destination is valid
    ///
    /// Returns whether the move was applied; the pose is unchanged otherwise,
    /// including when the destination overflows the coordinate range.
    pub fn move_by(&mut self, dx: i32, dy: i32, footprint: &Footprint) -> bool {
        match self.pose.checked_offset(dx, dy) {
            Some(candidate) if footprint.is_valid_cell(candidate) => {
                self.pose = candidate;
                true
            }
            _ => false,
        }
    }

    /// Move by whole steps if the destination is valid
    pub fn move_steps(&mut self, dx_steps: i32, dy_steps: i32, footprint: &Footprint) -> bool {
        let (Some(dx), Some(dy)) = (
            dx_steps.checked_mul(self.step),
            dy_steps.checked_mul(self.step),
        ) else {
            return false;
        };
        self.move_by(dx, dy, footprint)
    }

    /// Move one step in `direction` if the destination is valid
    pub fn step_towards(&mut self, direction: Direction, footprint: &Footprint) -> bool {
        let (dx, dy) = direction.delta();
        self.move_steps(dx, dy, footprint)
    }

    /// Jump straight to `cell` without re-validating it
    ///
    /// Callers must only pass positions that already passed the footprint
    /// check, such as cells recorded on the solver's path stack.
    pub const fn teleport_to(&mut self, cell: Cell) {
        self.pose = cell;
    }
}
