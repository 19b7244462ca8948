//! The `Stepper` and `Engine` traits.
//!
//! A [`Stepper`] is the numerical integrator of one model: it mutates that
//! model's state in place given that model's parameters. An [`Engine`] binds
//! a stepper, its state, its parameters and its color mapping into one
//! object-safe unit, so the frame loop can drive any model through
//! `Box<dyn Engine>` or an enum without knowing which one is active.

use crate::color::RgbBuffer;
use crate::grid::Grid;
use crate::regime::Regime;
use serde_json::Value;

/// Time integrator for one model.
pub trait Stepper {
    /// The mutable simulation state (one or two arrays).
    type State;
    /// Parameters read, never written, during a step.
    type Params;

    /// Performs `sub_steps` integration sub-steps on `state`.
    fn advance(&mut self, state: &mut Self::State, params: &Self::Params, sub_steps: usize);
}

/// A complete, runnable model: state + stepper + parameters + color mapping.
///
/// This trait is **object-safe**.
pub trait Engine {
    /// Grid the engine's fields live on.
    fn grid(&self) -> Grid;

    /// Sub-steps performed by one call to [`Engine::advance_frame`].
    fn sub_steps(&self) -> usize;

    /// Advances the simulation by one display frame.
    fn advance_frame(&mut self);

    /// Maps the current state to an RGB frame of the grid's size.
    fn render(&self) -> RgbBuffer;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing each parameter: type, default, stable range, description.
    fn param_schema(&self) -> Value;

    /// Injects a localized disturbance at `(x, y)` given in a display space
    /// of `display_size`. Models without a perturbation ignore it.
    fn perturb(&mut self, _x: f64, _y: f64, _display_size: (f64, f64)) {}

    /// Replaces the model's parameters with `regime`. Returns false when the
    /// model has no notion of regimes.
    fn apply_regime(&mut self, _regime: &Regime) -> bool {
        false
    }
}
