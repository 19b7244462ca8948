//! Localized random-phase disturbances of the amplitude field.

use crate::field::ComplexField;
use num_complex::Complex64;
use quantum_fluid_core::prng::Xorshift64;

/// Default Gaussian radius in grid cells.
pub const DEFAULT_RADIUS: f64 = 5.0;

/// Adds a Gaussian blob with one random phase to `psi`.
///
/// `position` is in a display space of `display_size` and is scaled into
/// grid coordinates. Every cell gets `exp(−d²/radius²)·exp(iθ)` added, where
/// `d` is the plain (non-wrapping) distance to the mapped center and `θ` is
/// drawn once per call from [0, 2π).
///
/// A radius that is not positive and finite leaves the field untouched.
pub fn inject(
    field: &mut ComplexField,
    position: (f64, f64),
    display_size: (f64, f64),
    radius: f64,
    rng: &mut Xorshift64,
) {
    if !(radius.is_finite() && radius > 0.0) {
        return;
    }
    let grid = field.grid();
    let cx = position.0 * grid.width() as f64 / display_size.0;
    let cy = position.1 * grid.height() as f64 / display_size.1;
    let phase = Complex64::from_polar(1.0, rng.next_phase());
    let r2 = radius * radius;
    let w = grid.width();

    for (i, c) in field.psi.iter_mut().enumerate() {
        let dx = (i % w) as f64 - cx;
        let dy = (i / w) as f64 - cy;
        let weight = (-(dx * dx + dy * dy) / r2).exp();
        *c += phase * weight;
    }
}
