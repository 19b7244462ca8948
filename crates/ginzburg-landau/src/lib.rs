#![deny(unsafe_code)]
//! Complex Ginzburg-Landau engine.
//!
//! Integrates `∂ψ/∂t = ψ + α∇²ψ − (1 + iβ)|ψ|²ψ + γψ̄` on a square toroidal
//! grid with a split-step Fourier scheme, one sub-step per frame. The phase
//! of `ψ` is rendered as hue and its magnitude as brightness, which makes
//! spiral cores and phase defects stand out.
//!
//! Parameters are switched between frames by whole [`Regime`]s; pointer
//! input injects random-phase Gaussian blobs.

pub mod color;
pub mod field;
pub mod params;
pub mod perturb;
pub mod spectral;

pub use color::ginzburg_landau_rgb;
pub use field::{wavenumbers_squared, ComplexField};
pub use params::AmplitudeParameters;
pub use perturb::inject;
pub use spectral::{spectral_kernel, SpectralStepper};

use log::debug;
use quantum_fluid_core::color::RgbBuffer;
use quantum_fluid_core::engine::{Engine, Stepper};
use quantum_fluid_core::error::EngineError;
use quantum_fluid_core::fft::{FftPlan, RustFftPlan};
use quantum_fluid_core::grid::Grid;
use quantum_fluid_core::params::param_f64;
use quantum_fluid_core::prng::Xorshift64;
use quantum_fluid_core::regime::Regime;
use serde_json::{json, Value};

/// Physical distance between neighboring cells.
pub const DEFAULT_SPACING: f64 = 1.0;

/// Ginzburg-Landau state, spectral stepper, parameters and perturbation RNG.
pub struct GinzburgLandau<P: FftPlan = RustFftPlan> {
    field: ComplexField,
    params: AmplitudeParameters,
    stepper: SpectralStepper<P>,
    rng: Xorshift64,
    perturb_radius: f64,
}

impl GinzburgLandau<RustFftPlan> {
    /// Creates an engine with small random noise drawn from `seed`.
    ///
    /// Returns `EngineError::NonSquareGrid` for rectangular grids.
    pub fn new(grid: Grid, seed: u64, params: AmplitudeParameters) -> Result<Self, EngineError> {
        let mut rng = Xorshift64::new(seed);
        let field = ComplexField::random(grid, DEFAULT_SPACING, &mut rng)?;
        Ok(Self::with_plan(field, params, RustFftPlan::new(grid), rng))
    }

    /// Creates an engine from a JSON params object.
    ///
    /// Reads the amplitude parameters plus an optional `perturb_radius`.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        let grid = Grid::new(width, height)?;
        let engine = Self::new(grid, seed, AmplitudeParameters::from_json(json_params))?
            .with_perturb_radius(param_f64(
                json_params,
                "perturb_radius",
                perturb::DEFAULT_RADIUS,
            ));
        Ok(engine)
    }
}

impl<P: FftPlan> GinzburgLandau<P> {
    /// Assembles an engine from parts; `plan` must match the field's grid.
    pub fn with_plan(field: ComplexField, params: AmplitudeParameters, plan: P, rng: Xorshift64) -> Self {
        Self {
            field,
            params,
            stepper: SpectralStepper::new(plan),
            rng,
            perturb_radius: perturb::DEFAULT_RADIUS,
        }
    }

    pub fn with_perturb_radius(mut self, radius: f64) -> Self {
        self.perturb_radius = radius;
        self
    }

    pub fn field(&self) -> &ComplexField {
        &self.field
    }

    pub fn amplitude_params(&self) -> &AmplitudeParameters {
        &self.params
    }
}

impl<P: FftPlan> Engine for GinzburgLandau<P> {
    fn grid(&self) -> Grid {
        self.field.grid()
    }

    fn sub_steps(&self) -> usize {
        1
    }

    fn advance_frame(&mut self) {
        self.stepper.advance(&mut self.field, &self.params, 1);
    }

    fn render(&self) -> RgbBuffer {
        ginzburg_landau_rgb(&self.field)
    }

    fn params(&self) -> Value {
        let mut p = self.params.to_json();
        p["perturb_radius"] = json!(self.perturb_radius);
        p
    }

    fn param_schema(&self) -> Value {
        let mut schema = AmplitudeParameters::schema();
        schema["perturb_radius"] = json!({
            "type": "number",
            "default": perturb::DEFAULT_RADIUS,
            "min": 1.0,
            "max": 50.0,
            "description": "Gaussian radius of pointer perturbations, in cells"
        });
        schema
    }

    fn perturb(&mut self, x: f64, y: f64, display_size: (f64, f64)) {
        debug!("perturbation at ({x:.1}, {y:.1}) in {display_size:?}");
        inject(
            &mut self.field,
            (x, y),
            display_size,
            self.perturb_radius,
            &mut self.rng,
        );
    }

    fn apply_regime(&mut self, regime: &Regime) -> bool {
        self.params = AmplitudeParameters::from_regime(regime, self.params.dt);
        debug!(
            "regime '{}': alpha = {}, beta = {}, gamma = {}",
            regime.name, self.params.alpha, self.params.beta, self.params.gamma
        );
        true
    }
}
