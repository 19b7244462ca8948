//! Two-dimensional discrete Fourier transform plans.
//!
//! Spectral steppers depend only on [`FftPlan`]. [`RustFftPlan`] is the
//! production implementation; [`NaiveDft`] evaluates the transform sum
//! directly and serves as a reference on small grids.
//!
//! Convention: `forward` is unnormalized with a negative exponent, and
//! `inverse` carries the `1 / (width * height)` factor, so
//! `inverse(forward(x)) == x` up to rounding.

use crate::grid::Grid;
use num_complex::Complex64;
use rustfft::{Fft, FftPlanner};
use std::f64::consts::TAU;
use std::sync::Arc;

/// A 2D DFT of fixed size operating in place on row-major complex data.
pub trait FftPlan {
    /// Grid size the plan was built for.
    fn grid(&self) -> Grid;

    /// Spatial domain to frequency domain.
    ///
    /// # Panics
    ///
    /// Implementations panic if `data.len()` differs from `grid().len()`.
    fn forward(&mut self, data: &mut [Complex64]);

    /// Frequency domain back to spatial domain, normalized.
    fn inverse(&mut self, data: &mut [Complex64]);
}

/// [`FftPlan`] backed by `rustfft`, transforming rows then columns.
pub struct RustFftPlan {
    grid: Grid,
    row_forward: Arc<dyn Fft<f64>>,
    row_inverse: Arc<dyn Fft<f64>>,
    col_forward: Arc<dyn Fft<f64>>,
    col_inverse: Arc<dyn Fft<f64>>,
    transposed: Vec<Complex64>,
}

impl RustFftPlan {
    pub fn new(grid: Grid) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            grid,
            row_forward: planner.plan_fft_forward(grid.width()),
            row_inverse: planner.plan_fft_inverse(grid.width()),
            col_forward: planner.plan_fft_forward(grid.height()),
            col_inverse: planner.plan_fft_inverse(grid.height()),
            transposed: vec![Complex64::new(0.0, 0.0); grid.len()],
        }
    }

    fn transform(&mut self, data: &mut [Complex64], inverse: bool) {
        assert_eq!(data.len(), self.grid.len(), "buffer does not match plan size");
        let (w, h) = (self.grid.width(), self.grid.height());
        let (rows, cols) = if inverse {
            (&self.row_inverse, &self.col_inverse)
        } else {
            (&self.row_forward, &self.col_forward)
        };

        // rustfft processes the buffer as consecutive chunks of its length.
        rows.process(data);
        transpose(data, &mut self.transposed, w, h);
        cols.process(&mut self.transposed);
        transpose(&self.transposed, data, h, w);

        if inverse {
            let norm = 1.0 / self.grid.len() as f64;
            data.iter_mut().for_each(|c| *c *= norm);
        }
    }
}

impl FftPlan for RustFftPlan {
    fn grid(&self) -> Grid {
        self.grid
    }

    fn forward(&mut self, data: &mut [Complex64]) {
        self.transform(data, false);
    }

    fn inverse(&mut self, data: &mut [Complex64]) {
        self.transform(data, true);
    }
}

/// Row-major `w x h` source into row-major `h x w` destination.
fn transpose(src: &[Complex64], dst: &mut [Complex64], w: usize, h: usize) {
    for y in 0..h {
        for x in 0..w {
            dst[x * h + y] = src[y * w + x];
        }
    }
}

/// Direct O(n²)-per-axis DFT. Slow, but obviously correct.
pub struct NaiveDft {
    grid: Grid,
}

impl NaiveDft {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    fn transform(&self, data: &mut [Complex64], sign: f64) {
        assert_eq!(data.len(), self.grid.len(), "buffer does not match plan size");
        let (w, h) = (self.grid.width(), self.grid.height());

        let mut line = Vec::with_capacity(w.max(h));
        for y in 0..h {
            line.clear();
            line.extend((0..w).map(|x| data[y * w + x]));
            for (k, out) in dft_1d(&line, sign).into_iter().enumerate() {
                data[y * w + k] = out;
            }
        }
        for x in 0..w {
            line.clear();
            line.extend((0..h).map(|y| data[y * w + x]));
            for (k, out) in dft_1d(&line, sign).into_iter().enumerate() {
                data[k * w + x] = out;
            }
        }
    }
}

fn dft_1d(input: &[Complex64], sign: f64) -> Vec<Complex64> {
    let n = input.len();
    (0..n)
        .map(|k| {
            input
                .iter()
                .enumerate()
                .map(|(j, &v)| {
                    let angle = sign * TAU * (k * j % n) as f64 / n as f64;
                    v * Complex64::from_polar(1.0, angle)
                })
                .sum()
        })
        .collect()
}

impl FftPlan for NaiveDft {
    fn grid(&self) -> Grid {
        self.grid
    }

    fn forward(&mut self, data: &mut [Complex64]) {
        self.transform(data, -1.0);
    }

    fn inverse(&mut self, data: &mut [Complex64]) {
        self.transform(data, 1.0);
        let norm = 1.0 / self.grid.len() as f64;
        data.iter_mut().for_each(|c| *c *= norm);
    }
}

/// Signed frequency index for bin `k` of an `n`-point transform:
/// `0, 1, ..., n/2 - 1, -n/2, ..., -1` (the `fftfreq` ordering, times `n`).
pub fn frequency_index(k: usize, n: usize) -> f64 {
    if k < n.div_ceil(2) {
        k as f64
    } else {
        k as f64 - n as f64
    }
}
