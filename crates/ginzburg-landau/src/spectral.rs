//! First-order split-step Fourier integrator.
//!
//! The stiff linear term `α∇²ψ` is solved exactly in frequency space, where
//! it becomes multiplication by `exp(−α·k²·dt)`. The nonlinear reaction is
//! then advanced with one explicit Euler step in real space.

use crate::field::ComplexField;
use crate::params::AmplitudeParameters;
use num_complex::Complex64;
use quantum_fluid_core::engine::Stepper;
use quantum_fluid_core::fft::{FftPlan, RustFftPlan};

/// Linear propagator `exp(−alpha · k2 · dt)` for one frequency bin.
///
/// With `Re(alpha) > 0` and `dt > 0` its magnitude is below 1 for every
/// `k2 > 0` and exactly 1 at `k2 = 0`.
pub fn spectral_kernel(alpha: Complex64, k2: f64, dt: f64) -> Complex64 {
    (-alpha * k2 * dt).exp()
}

/// `psi − (1 + iβ)|psi|²psi + γ·conj(psi)`.
pub fn reaction(psi: Complex64, beta: f64, gamma: f64) -> Complex64 {
    let mag2 = psi.norm_sqr();
    psi - Complex64::new(1.0, beta) * mag2 * psi + gamma * psi.conj()
}

/// Split-step integrator over an [`FftPlan`].
///
/// Caches the kernel table for the last `(alpha, dt)` it saw; a regime
/// switch changes `alpha` and triggers a rebuild on the next sub-step.
pub struct SpectralStepper<P: FftPlan = RustFftPlan> {
    plan: P,
    kernel: Vec<Complex64>,
    kernel_key: Option<(Complex64, f64)>,
}

impl<P: FftPlan> SpectralStepper<P> {
    pub fn new(plan: P) -> Self {
        Self {
            plan,
            kernel: Vec::new(),
            kernel_key: None,
        }
    }

    fn refresh_kernel(&mut self, k2: &[f64], params: &AmplitudeParameters) {
        let key = (params.alpha, params.dt);
        if self.kernel_key == Some(key) && self.kernel.len() == k2.len() {
            return;
        }
        self.kernel.clear();
        self.kernel
            .extend(k2.iter().map(|&k| spectral_kernel(params.alpha, k, params.dt)));
        self.kernel_key = Some(key);
    }

    /// Linear half in frequency space, then nonlinear Euler half.
    ///
    /// # Panics
    ///
    /// Panics if the plan was built for a different grid than `field`.
    pub fn sub_step(&mut self, field: &mut ComplexField, params: &AmplitudeParameters) {
        assert_eq!(self.plan.grid(), field.grid(), "FFT plan does not match field grid");
        self.refresh_kernel(field.k2(), params);

        let psi = &mut field.psi;
        self.plan.forward(psi);
        psi.iter_mut()
            .zip(&self.kernel)
            .for_each(|(c, k)| *c *= *k);
        self.plan.inverse(psi);

        let AmplitudeParameters { beta, gamma, dt, .. } = *params;
        psi.iter_mut()
            .for_each(|c| *c += dt * reaction(*c, beta, gamma));
    }
}

impl<P: FftPlan> Stepper for SpectralStepper<P> {
    type State = ComplexField;
    type Params = AmplitudeParameters;

    fn advance(&mut self, state: &mut ComplexField, params: &AmplitudeParameters, sub_steps: usize) {
        for _ in 0..sub_steps {
            self.sub_step(state, params);
        }
    }
}
