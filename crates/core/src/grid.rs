//! Fixed toroidal grid geometry.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Width and height of a simulation grid.
///
/// A grid is fixed for the lifetime of the fields built on it. Every
/// neighbor or offset lookup wraps modulo the grid size (periodic boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
}

impl Grid {
    /// Creates a grid, rejecting zero sizes and `width * height` overflow.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .ok_or(EngineError::InvalidDimensions)?;
        Ok(Self { width, height })
    }

    /// Creates an `n x n` grid.
    pub fn square(n: usize) -> Result<Self, EngineError> {
        Self::new(n, n)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Always false; a grid has at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// Flat row-major index of `(x, y)` after toroidal wrapping.
    pub fn wrap(&self, x: isize, y: isize) -> usize {
        let xi = x.rem_euclid(self.width as isize) as usize;
        let yi = y.rem_euclid(self.height as isize) as usize;
        yi * self.width + xi
    }
}
