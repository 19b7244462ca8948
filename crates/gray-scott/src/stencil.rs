//! Explicit finite-difference integrator for the Gray-Scott equations.

use crate::field::RealField;
use crate::params::ReactionParameters;
use quantum_fluid_core::engine::Stepper;
use quantum_fluid_core::field::Field;

/// Five-point toroidal Laplacian of `field` written into `out`.
///
/// Each cell gets the sum of its four axis neighbors (wrapping at the
/// edges) minus four times its own value.
///
/// # Panics
///
/// Panics if `out.len()` differs from the field's cell count.
pub fn laplacian(field: &Field, out: &mut [f64]) {
    let (w, h) = (field.width(), field.height());
    assert_eq!(out.len(), w * h, "laplacian output does not match field size");
    let data = field.data();

    for y in 0..h {
        let ym = if y == 0 { h - 1 } else { y - 1 };
        let yp = if y + 1 == h { 0 } else { y + 1 };
        for x in 0..w {
            let xm = if x == 0 { w - 1 } else { x - 1 };
            let xp = if x + 1 == w { 0 } else { x + 1 };
            let idx = y * w + x;
            out[idx] = data[ym * w + x] + data[yp * w + x] + data[y * w + xm] + data[y * w + xp]
                - 4.0 * data[idx];
        }
    }
}

/// Forward-Euler Gray-Scott integrator with per-sub-step clamping.
///
/// Holds scratch Laplacian buffers so a sub-step does not allocate.
#[derive(Debug, Default)]
pub struct StencilStepper {
    lap_u: Vec<f64>,
    lap_v: Vec<f64>,
}

impl StencilStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// One explicit sub-step followed by clamping `U` and `V` to [0, 1].
    pub fn sub_step(&mut self, field: &mut RealField, params: &ReactionParameters) {
        let len = field.grid().len();
        self.lap_u.resize(len, 0.0);
        self.lap_v.resize(len, 0.0);
        laplacian(&field.u, &mut self.lap_u);
        laplacian(&field.v, &mut self.lap_v);

        let ReactionParameters {
            diffusion_u,
            diffusion_v,
            feed_rate,
            kill_rate,
            dt,
        } = *params;

        let cells = field
            .u
            .data_mut()
            .iter_mut()
            .zip(field.v.data_mut().iter_mut())
            .zip(self.lap_u.iter().zip(&self.lap_v));
        for ((u, v), (lu, lv)) in cells {
            let uv2 = *u * *v * *v;
            let du = diffusion_u * lu - uv2 + feed_rate * (1.0 - *u);
            let dv = diffusion_v * lv + uv2 - (feed_rate + kill_rate) * *v;
            // Overshoot compounds across sub-steps without this clamp.
            *u = (*u + dt * du).clamp(0.0, 1.0);
            *v = (*v + dt * dv).clamp(0.0, 1.0);
        }
    }
}

impl Stepper for StencilStepper {
    type State = RealField;
    type Params = ReactionParameters;

    fn advance(&mut self, state: &mut RealField, params: &ReactionParameters, sub_steps: usize) {
        for _ in 0..sub_steps {
            self.sub_step(state, params);
        }
    }
}
