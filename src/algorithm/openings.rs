//! Border scanning for maze openings and entrance/exit resolution
//!
//! Each of the four borders is walked as a one-dimensional scan. A run of
//! consecutive open pixels becomes an opening when it is wide enough and at
//! least one pixel just inside the border (at the run's first coordinate) is
//! open too, which rejects cosmetic edge artifacts that lead nowhere.

use crate::io::configuration::{CHECK_DEPTH, MIN_OPENING_WIDTH, REQUIRED_OPENINGS};
use crate::io::error::{MazeError, Result};
use crate::spatial::{Cell, FreeSpace};
use log::{debug, info};
use std::fmt;

/// Image border an opening was found on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Border {
    /// Row 0
    Top,
    /// Last row
    Bottom,
    /// Column 0
    Left,
    /// Last column
    Right,
}

impl Border {
    /// Scan order; earlier borders win distance ties
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    /// Number of samples along this border
    pub const fn scan_len(self, width: i32, height: i32) -> i32 {
        match self {
            Self::Top | Self::Bottom => width,
            Self::Left | Self::Right => height,
        }
    }

    /// Deepest inward offset that stays inside the raster
    pub const fn max_depth(self, width: i32, height: i32) -> i32 {
        match self {
            Self::Top | Self::Bottom => height - 1,
            Self::Left | Self::Right => width - 1,
        }
    }

    /// Pixel at scan index `i`, `depth` pixels in from the border
    pub const fn pixel(self, i: i32, depth: i32, width: i32, height: i32) -> Cell {
        match self {
            Self::Top => Cell::new(i, depth),
            Self::Bottom => Cell::new(i, height - 1 - depth),
            Self::Left => Cell::new(depth, i),
            Self::Right => Cell::new(width - 1 - depth, i),
        }
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Midpoint of a qualifying run on one border
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Opening {
    /// Border pixel at the middle of the run
    pub point: Cell,
    /// Border the run lies on
    pub border: Border,
}

/// Resolved entrance and exit of a maze
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeEndpoints {
    /// Opening nearest the agent start
    pub entrance: Opening,
    /// Remaining opening furthest from the agent start
    pub exit: Opening,
}

/// Finds openings on the four image borders
#[derive(Clone, Copy, Debug)]
pub struct OpeningDetector {
    min_width: usize,
    check_depth: usize,
}

impl Default for OpeningDetector {
    fn default() -> Self {
        Self::new(MIN_OPENING_WIDTH, CHECK_DEPTH)
    }
}

// Open run being tracked along one border scan
struct Run {
    start: i32,
    width: usize,
}

impl OpeningDetector {
    /// Create a detector with explicit thresholds
    pub const fn new(min_width: usize, check_depth: usize) -> Self {
        Self {
            min_width,
            check_depth,
        }
    }

    /// All qualifying openings in scan order: top, bottom, left, right
    pub fn detect(&self, free_space: &FreeSpace) -> Vec<Opening> {
        let mut openings = Vec::new();
        for border in Border::ALL {
            self.scan_border(free_space, border, &mut openings);
        }
        openings
    }

    fn scan_border(&self, free_space: &FreeSpace, border: Border, openings: &mut Vec<Opening>) {
        let (width, height) = (free_space.width(), free_space.height());
        let mut run: Option<Run> = None;

        for i in 0..border.scan_len(width, height) {
            let pixel = border.pixel(i, 0, width, height);
            if free_space.is_traversable(pixel.x, pixel.y) {
                run.get_or_insert(Run { start: i, width: 0 }).width += 1;
            } else if let Some(ended) = run.take() {
                self.close_run(free_space, border, &ended, openings);
            }
        }

        if let Some(ended) = run {
            self.close_run(free_space, border, &ended, openings);
        }
    }

    fn close_run(
        &self,
        free_space: &FreeSpace,
        border: Border,
        run: &Run,
        openings: &mut Vec<Opening>,
    ) {
        if run.width < self.min_width || !self.connected_to_path(free_space, border, run.start) {
            return;
        }

        let (width, height) = (free_space.width(), free_space.height());
        let mid = run.start + i32::try_from(run.width / 2).unwrap_or(0);
        let opening = Opening {
            point: border.pixel(mid, 0, width, height),
            border,
        };
        debug!(
            "opening on {border} border at {} (run of {} px)",
            opening.point, run.width
        );
        openings.push(opening);
    }

    // Probe inward from the run's first pixel, never past the opposite border
    fn connected_to_path(&self, free_space: &FreeSpace, border: Border, start: i32) -> bool {
        let (width, height) = (free_space.width(), free_space.height());
        let depth = i32::try_from(self.check_depth)
            .unwrap_or(i32::MAX)
            .min(border.max_depth(width, height));
        (1..=depth).any(|d| {
            let probe = border.pixel(start, d, width, height);
            free_space.is_traversable(probe.x, probe.y)
        })
    }

    /// Detect openings and resolve them against the agent start
    ///
    /// # Errors
    ///
    /// Returns `MazeTopology` if fewer than two openings are found
    pub fn endpoints(&self, free_space: &FreeSpace, agent_start: Cell) -> Result<MazeEndpoints> {
        resolve_endpoints(&self.detect(free_space), agent_start)
    }

    /// Exit point the solver should head for
    ///
    /// # Errors
    ///
    /// Returns `MazeTopology` if fewer than two openings are found
    pub fn find_exit(&self, free_space: &FreeSpace, agent_start: Cell) -> Result<Cell> {
        self.endpoints(free_space, agent_start)
            .map(|endpoints| endpoints.exit.point)
    }
}

/// Pick the entrance and exit from detected openings
///
/// The entrance is the opening nearest `agent_start`. The exit is the
/// remaining opening furthest from `agent_start` (not from the entrance).
/// On exact ties the opening found first wins.
///
/// # Errors
///
/// Returns `MazeTopology` if fewer than two openings are given
pub fn resolve_endpoints(openings: &[Opening], agent_start: Cell) -> Result<MazeEndpoints> {
    let topology_error = || MazeError::MazeTopology {
        openings_found: openings.len(),
        required: REQUIRED_OPENINGS,
    };
    if openings.len() < REQUIRED_OPENINGS {
        return Err(topology_error());
    }

    let mut entrance_index = 0;
    let mut best = f64::INFINITY;
    for (index, opening) in openings.iter().enumerate() {
        let distance = opening.point.distance(agent_start);
        if distance < best {
            best = distance;
            entrance_index = index;
        }
    }

    let mut exit: Option<(f64, Opening)> = None;
    for (index, opening) in openings.iter().enumerate() {
        if index == entrance_index {
            continue;
        }
        let distance = opening.point.distance(agent_start);
        if exit.is_none_or(|(furthest, _)| distance > furthest) {
            exit = Some((distance, *opening));
        }
    }

    let entrance = *openings.get(entrance_index).ok_or_else(topology_error)?;
    let (_, exit) = exit.ok_or_else(topology_error)?;
    info!(
        "entrance at {} ({} border), exit at {} ({} border)",
        entrance.point, entrance.border, exit.point, exit.border
    );

    Ok(MazeEndpoints { entrance, exit })
}
