//! Complex amplitude field and its wavenumber table.

use num_complex::Complex64;
use quantum_fluid_core::error::EngineError;
use quantum_fluid_core::fft::frequency_index;
use quantum_fluid_core::grid::Grid;
use quantum_fluid_core::prng::Xorshift64;
use std::f64::consts::TAU;

/// Radius of the disk the initial noise is drawn from.
pub const NOISE_AMPLITUDE: f64 = 0.1;

/// Squared spatial frequency magnitude `kx² + ky²` for every FFT bin of
/// `grid`, in the same row-major layout as the transformed data.
///
/// `spacing` is the physical distance between neighboring cells.
pub fn wavenumbers_squared(grid: Grid, spacing: f64) -> Vec<f64> {
    let (w, h) = (grid.width(), grid.height());
    let kx: Vec<f64> = (0..w)
        .map(|i| TAU * frequency_index(i, w) / (w as f64 * spacing))
        .collect();
    let ky: Vec<f64> = (0..h)
        .map(|j| TAU * frequency_index(j, h) / (h as f64 * spacing))
        .collect();
    ky.iter()
        .flat_map(|ky| kx.iter().map(move |kx| kx * kx + ky * ky))
        .collect()
}

/// The amplitude `psi` on a square grid, plus the fixed `K2` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexField {
    grid: Grid,
    pub(crate) psi: Vec<Complex64>,
    k2: Vec<f64>,
}

impl ComplexField {
    /// All-zero amplitude. Returns `EngineError::NonSquareGrid` unless
    /// the grid is square.
    pub fn zeros(grid: Grid, spacing: f64) -> Result<Self, EngineError> {
        if !grid.is_square() {
            return Err(EngineError::NonSquareGrid {
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(Self {
            grid,
            psi: vec![Complex64::new(0.0, 0.0); grid.len()],
            k2: wavenumbers_squared(grid, spacing),
        })
    }

    /// Independent noise per cell, uniform over the disk of radius
    /// [`NOISE_AMPLITUDE`].
    pub fn random(grid: Grid, spacing: f64, rng: &mut Xorshift64) -> Result<Self, EngineError> {
        let mut field = Self::zeros(grid, spacing)?;
        for c in field.psi.iter_mut() {
            let (re, im) = rng.next_in_disk(NOISE_AMPLITUDE);
            *c = Complex64::new(re, im);
        }
        Ok(field)
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn psi(&self) -> &[Complex64] {
        &self.psi
    }

    pub fn psi_mut(&mut self) -> &mut [Complex64] {
        &mut self.psi
    }

    pub fn k2(&self) -> &[f64] {
        &self.k2
    }

    /// `Σ|psi|²` over the whole grid.
    pub fn energy(&self) -> f64 {
        self.psi.iter().map(Complex64::norm_sqr).sum()
    }
}
