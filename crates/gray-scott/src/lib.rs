#![deny(unsafe_code)]
//! Gray-Scott reaction-diffusion engine.
//!
//! Two species, substrate `U` and activator `V`, react (`U + 2V -> 3V`) and
//! diffuse on a toroidal grid. `U` is fed at rate `F`, `V` is removed at rate
//! `F + k`. The model is integrated with a five-point explicit stencil and
//! rendered from the `V` concentration.
//!
//! A single large `dt` is unstable for this system and rendering every
//! micro-step is too slow, so each frame runs [`SUB_STEPS_PER_FRAME`]
//! sub-steps before rendering. Re-derive that number if `dt` changes.

pub mod color;
pub mod field;
pub mod params;
pub mod stencil;

pub use color::{gray_scott_rgb, GrayScottPalette};
pub use field::{PatchSeeding, RealField};
pub use params::ReactionParameters;
pub use stencil::{laplacian, StencilStepper};

use quantum_fluid_core::color::RgbBuffer;
use quantum_fluid_core::engine::{Engine, Stepper};
use quantum_fluid_core::error::EngineError;
use quantum_fluid_core::grid::Grid;
use quantum_fluid_core::params::param_usize;
use quantum_fluid_core::prng::Xorshift64;
use serde_json::{json, Value};

/// Sub-steps per rendered frame at the default `dt`.
pub const SUB_STEPS_PER_FRAME: usize = 8;

/// Gray-Scott state, stepper, parameters and palette bound together.
pub struct GrayScott {
    field: RealField,
    params: ReactionParameters,
    palette: GrayScottPalette,
    stepper: StencilStepper,
    sub_steps: usize,
}

impl GrayScott {
    /// Creates an engine seeded with the default patch layout drawn from `seed`.
    pub fn new(grid: Grid, seed: u64, params: ReactionParameters) -> Self {
        let mut rng = Xorshift64::new(seed);
        let field = RealField::seeded(grid, PatchSeeding::default(), &mut rng);
        Self::from_field(field, params)
    }

    /// Creates an engine around an existing state.
    pub fn from_field(field: RealField, params: ReactionParameters) -> Self {
        Self {
            field,
            params,
            palette: GrayScottPalette::default(),
            stepper: StencilStepper::new(),
            sub_steps: SUB_STEPS_PER_FRAME,
        }
    }

    /// Creates an engine from a JSON params object.
    ///
    /// Reads the five reaction parameters plus an optional `sub_steps`,
    /// falling back to defaults for missing keys.
    pub fn from_json(
        width: usize,
        height: usize,
        seed: u64,
        json_params: &Value,
    ) -> Result<Self, EngineError> {
        let grid = Grid::new(width, height)?;
        let engine = Self::new(grid, seed, ReactionParameters::from_json(json_params))
            .with_sub_steps(param_usize(json_params, "sub_steps", SUB_STEPS_PER_FRAME));
        Ok(engine)
    }

    pub fn with_palette(mut self, palette: GrayScottPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps;
        self
    }

    pub fn field(&self) -> &RealField {
        &self.field
    }

    pub fn reaction_params(&self) -> &ReactionParameters {
        &self.params
    }
}

impl Engine for GrayScott {
    fn grid(&self) -> Grid {
        self.field.grid()
    }

    fn sub_steps(&self) -> usize {
        self.sub_steps
    }

    fn advance_frame(&mut self) {
        self.stepper
            .advance(&mut self.field, &self.params, self.sub_steps);
    }

    fn render(&self) -> RgbBuffer {
        gray_scott_rgb(&self.field, &self.palette)
    }

    fn params(&self) -> Value {
        let mut p = self.params.to_json();
        p["sub_steps"] = json!(self.sub_steps);
        p
    }

    fn param_schema(&self) -> Value {
        let mut schema = ReactionParameters::schema();
        schema["sub_steps"] = json!({
            "type": "integer",
            "default": SUB_STEPS_PER_FRAME,
            "min": 1,
            "max": 64,
            "description": "Sub-steps per rendered frame"
        });
        schema
    }
}
