//! Step grid anchored at the agent's start and a bitset of visited step cells

use crate::spatial::cell::Cell;
use bitvec::prelude::*;
use std::fmt;

/// Implicit grid of positions spaced `step` apart from an origin cell
///
/// Only lattice points inside `[0, width) x [0, height)` are indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepGrid {
    origin: Cell,
    step: i32,
    // Lattice index of the left-most / top-most point inside the raster
    min_k: [i32; 2],
    cols: usize,
    rows: usize,
}

impl StepGrid {
    /// Lay a grid with spacing `step` over a `width x height` raster through `origin`
    pub fn new(origin: Cell, step: i32, width: i32, height: i32) -> Self {
        let step = step.max(1);
        let min_kx = -origin.x.div_euclid(step);
        let min_ky = -origin.y.div_euclid(step);
        let max_kx = (width - 1 - origin.x).div_euclid(step);
        let max_ky = (height - 1 - origin.y).div_euclid(step);

        Self {
            origin,
            step,
            min_k: [min_kx, min_ky],
            cols: usize::try_from(max_kx - min_kx + 1).unwrap_or(0),
            rows: usize::try_from(max_ky - min_ky + 1).unwrap_or(0),
        }
    }

    /// Origin cell of the lattice
    pub const fn origin(&self) -> Cell {
        self.origin
    }

    /// Spacing between lattice points
    pub const fn step(&self) -> i32 {
        self.step
    }

    /// Number of lattice points inside the raster
    pub const fn len(&self) -> usize {
        self.cols * self.rows
    }

    /// True when no lattice point falls inside the raster
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True if `cell` is a multiple of `step` away from the origin on both axes
    pub const fn is_aligned(&self, cell: Cell) -> bool {
        (cell.x - self.origin.x) % self.step == 0 && (cell.y - self.origin.y) % self.step == 0
    }

    /// Dense index of an aligned in-bounds cell
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.is_aligned(cell) {
            return None;
        }
        let kx = (cell.x - self.origin.x) / self.step - self.min_k[0];
        let ky = (cell.y - self.origin.y) / self.step - self.min_k[1];
        let col = usize::try_from(kx).ok()?;
        let row = usize::try_from(ky).ok()?;
        (col < self.cols && row < self.rows).then_some(row * self.cols + col)
    }

    /// Inverse of [`Self::index_of`]
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if index >= self.len() {
            return None;
        }
        let col = i32::try_from(index % self.cols).ok()?;
        let row = i32::try_from(index / self.cols).ok()?;
        Some(Cell::new(
            self.origin.x + (col + self.min_k[0]) * self.step,
            self.origin.y + (row + self.min_k[1]) * self.step,
        ))
    }
}

/// Insertion-only set of step-grid cells for one solve run
///
/// Backed by one bit per lattice point. Cells off the lattice or outside the
/// raster are never members.
#[derive(Clone, Debug)]
pub struct VisitedSet {
    grid: StepGrid,
    bits: BitVec,
}

impl VisitedSet {
    /// Create an empty set covering `grid`
    pub fn new(grid: StepGrid) -> Self {
        Self {
            grid,
            bits: bitvec![0; grid.len()],
        }
    }

    /// Mark a cell visited
    ///
    /// Returns `true` if the cell was not visited before. Cells that cannot be
    /// indexed are rejected and return `false`.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let Some(index) = self.grid.index_of(cell) else {
            return false;
        };
        if self.bits.get(index).as_deref() == Some(&true) {
            return false;
        }
        self.bits.set(index, true);
        true
    }

    /// Test cell membership
    pub fn contains(&self, cell: Cell) -> bool {
        self.grid
            .index_of(cell)
            .is_some_and(|index| self.bits.get(index).as_deref() == Some(&true))
    }

    /// Number of visited cells
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// True if nothing has been visited
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Forget every visited cell, keeping the grid
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    /// Grid the set is indexed by
    pub const fn grid(&self) -> &StepGrid {
        &self.grid
    }

    /// Visited cells in row-major lattice order
    pub fn cells(&self) -> Vec<Cell> {
        self.bits
            .iter_ones()
            .filter_map(|index| self.grid.cell_at(index))
            .collect()
    }
}

impl fmt::Display for VisitedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VisitedSet({} of {} cells)",
            self.len(),
            self.grid.len()
        )
    }
}
