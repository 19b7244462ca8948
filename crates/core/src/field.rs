//! Two-dimensional real scalar field on a toroidal grid.
//!
//! A `Field` stores one f64 per grid cell in row-major order. Signed
//! coordinate access wraps around the edges, so seeds and stencils near
//! a border never need bounds checks.

use crate::error::EngineError;
use crate::grid::Grid;

/// A 2D array of f64 values with toroidal coordinate wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    grid: Grid,
    data: Vec<f64>,
}

impl Field {
    /// Creates a zero-filled field on `grid`.
    pub fn new(grid: Grid) -> Self {
        Self::filled(grid, 0.0)
    }

    /// Creates a field with every cell set to `value`.
    pub fn filled(grid: Grid, value: f64) -> Self {
        Self {
            grid,
            data: vec![value; grid.len()],
        }
    }

    /// Creates a field from a pre-built row-major vector.
    ///
    /// Returns `EngineError::DimensionMismatch` if `data.len()` differs
    /// from the number of grid cells.
    pub fn from_data(grid: Grid, data: Vec<f64>) -> Result<Self, EngineError> {
        if data.len() != grid.len() {
            return Err(EngineError::DimensionMismatch {
                lhs_w: grid.width(),
                lhs_h: grid.height(),
                rhs_w: data.len(),
                rhs_h: 1,
            });
        }
        Ok(Self { grid, data })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Read-only access to the row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access to the row-major data.
    pub fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Gets the value at `(x, y)` with toroidal wrapping.
    pub fn get(&self, x: isize, y: isize) -> f64 {
        self.data[self.grid.wrap(x, y)]
    }

    /// Sets the value at `(x, y)` with toroidal wrapping.
    pub fn set(&mut self, x: isize, y: isize, value: f64) {
        let idx = self.grid.wrap(x, y);
        self.data[idx] = value;
    }

    /// Sum of all cell values.
    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Iterates over all cells yielding `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let w = self.grid.width();
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i % w, i / w, v))
    }
}
