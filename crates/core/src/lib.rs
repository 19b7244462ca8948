#![deny(unsafe_code)]
//! Core types and traits for the quantum-fluid field simulator.
//!
//! Provides the `Stepper` and `Engine` traits, `Grid` geometry, the real
//! scalar `Field`, `Rgb`/`RgbBuffer` and the HSV conversion, the `FftPlan`
//! abstraction, the regime catalog, the `Xorshift64` PRNG, and parameter
//! helpers.

pub mod color;
pub mod engine;
pub mod error;
pub mod fft;
pub mod field;
pub mod grid;
pub mod params;
pub mod prng;
pub mod regime;

pub use color::{hsv_to_rgb, Rgb, RgbBuffer};
pub use engine::{Engine, Stepper};
pub use error::EngineError;
pub use fft::{FftPlan, NaiveDft, RustFftPlan};
pub use field::Field;
pub use grid::Grid;
pub use num_complex::Complex64;
pub use prng::Xorshift64;
pub use regime::{default_regimes, Regime};
