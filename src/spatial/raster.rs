//! Immutable RGBA raster and the traversable-color oracle built on top of it

use crate::io::error::{MazeError, Result};
use crate::spatial::cell::Cell;
use ndarray::Array2;

/// Immutable grid of RGBA samples indexed by `(row, col)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pixels: Array2<[u8; 4]>,
}

impl Raster {
    /// Wrap an existing `(height, width)` pixel array
    pub const fn from_array(pixels: Array2<[u8; 4]>) -> Self {
        Self { pixels }
    }

    /// Build a raster by evaluating `f(x, y)` for every pixel
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 4]) -> Self {
        Self {
            pixels: Array2::from_shape_fn((height, width), |(row, col)| f(col, row)),
        }
    }

    /// Raster filled with a single color
    pub fn filled(width: usize, height: usize, color: [u8; 4]) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), color),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Color at `(x, y)`, or `None` outside the raster
    pub fn sample(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let col = usize::try_from(x).ok()?;
        let row = usize::try_from(y).ok()?;
        self.pixels.get((row, col)).copied()
    }

    /// Underlying pixel array
    pub const fn pixels(&self) -> &Array2<[u8; 4]> {
        &self.pixels
    }
}

/// Answers whether a pixel is open space
///
/// Open space is every pixel whose color equals the reference color sampled
/// once at construction. The reference never changes afterwards.
#[derive(Debug, Clone)]
pub struct FreeSpace {
    raster: Raster,
    traversable: [u8; 4],
}

impl FreeSpace {
    /// Use an explicit reference color
    pub const fn new(raster: Raster, traversable: [u8; 4]) -> Self {
        Self {
            raster,
            traversable,
        }
    }

    /// Sample the reference color at the agent's start pixel
    ///
    /// # Errors
    ///
    /// Returns `InvalidStart` if the start pixel lies outside the raster
    pub fn sampled_at(raster: Raster, start: Cell) -> Result<Self> {
        let traversable = raster
            .sample(start.x, start.y)
            .ok_or_else(|| MazeError::InvalidStart {
                position: [start.x, start.y],
                reason: format!(
                    "outside the {}x{} maze image",
                    raster.width(),
                    raster.height()
                ),
            })?;
        Ok(Self::new(raster, traversable))
    }

    /// True if `(x, y)` is inside the raster and has the reference color
    pub fn is_traversable(&self, x: i32, y: i32) -> bool {
        self.raster.sample(x, y) == Some(self.traversable)
    }

    /// The reference color
    pub const fn traversable_color(&self) -> [u8; 4] {
        self.traversable
    }

    /// The raster this oracle reads from
    pub const fn raster(&self) -> &Raster {
        &self.raster
    }

    /// Raster width as a signed coordinate
    pub fn width(&self) -> i32 {
        i32::try_from(self.raster.width()).unwrap_or(i32::MAX)
    }

    /// Raster height as a signed coordinate
    pub fn height(&self) -> i32 {
        i32::try_from(self.raster.height()).unwrap_or(i32::MAX)
    }
}
