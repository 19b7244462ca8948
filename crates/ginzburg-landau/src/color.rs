//! Phase-to-hue, magnitude-to-value color mapping.

use crate::field::ComplexField;
use num_complex::Complex64;
use quantum_fluid_core::color::{hsv_to_rgb, Rgb, RgbBuffer};
use std::f64::consts::{PI, TAU};

pub const SATURATION: f64 = 0.8;

/// Color of one amplitude: hue from the phase, value from the magnitude.
pub fn amplitude_color(psi: Complex64) -> Rgb {
    let hue = (psi.arg() + PI) / TAU;
    let value = psi.norm().clamp(0.0, 1.0);
    hsv_to_rgb(hue, SATURATION, value)
}

/// Renders `psi` with [`amplitude_color`].
pub fn ginzburg_landau_rgb(field: &ComplexField) -> RgbBuffer {
    let psi = field.psi();
    RgbBuffer::from_fn(field.grid(), |i| amplitude_color(psi[i]))
}
