//! Gray-Scott reaction parameters.

use quantum_fluid_core::params::param_f64;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_DIFFUSION_U: f64 = 0.16;
pub const DEFAULT_DIFFUSION_V: f64 = 0.08;
pub const DEFAULT_FEED_RATE: f64 = 0.055;
pub const DEFAULT_KILL_RATE: f64 = 0.062;
/// Stable with 8 sub-steps per frame. Explicit diffusion needs
/// `4 * diffusion_u * dt < 1`.
pub const DEFAULT_DT: f64 = 1.15;

/// The five constants of the Gray-Scott model.
///
/// Read-only during a step. Known-stable ranges (not validated):
/// `diffusion_u, diffusion_v` in [0, 0.2] with `4 * D * dt < 1`,
/// `feed_rate` in [0.01, 0.1], `kill_rate` in [0.04, 0.07], `dt` in (0, 1.5].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionParameters {
    pub diffusion_u: f64,
    pub diffusion_v: f64,
    pub feed_rate: f64,
    pub kill_rate: f64,
    pub dt: f64,
}

impl Default for ReactionParameters {
    fn default() -> Self {
        Self {
            diffusion_u: DEFAULT_DIFFUSION_U,
            diffusion_v: DEFAULT_DIFFUSION_V,
            feed_rate: DEFAULT_FEED_RATE,
            kill_rate: DEFAULT_KILL_RATE,
            dt: DEFAULT_DT,
        }
    }
}

impl ReactionParameters {
    /// Reads parameters from a JSON object, falling back to defaults per key.
    pub fn from_json(params: &Value) -> Self {
        Self {
            diffusion_u: param_f64(params, "diffusion_u", DEFAULT_DIFFUSION_U),
            diffusion_v: param_f64(params, "diffusion_v", DEFAULT_DIFFUSION_V),
            feed_rate: param_f64(params, "feed_rate", DEFAULT_FEED_RATE),
            kill_rate: param_f64(params, "kill_rate", DEFAULT_KILL_RATE),
            dt: param_f64(params, "dt", DEFAULT_DT),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "diffusion_u": self.diffusion_u,
            "diffusion_v": self.diffusion_v,
            "feed_rate": self.feed_rate,
            "kill_rate": self.kill_rate,
            "dt": self.dt,
        })
    }

    /// Schema with defaults and the documented stable range of each key.
    pub fn schema() -> Value {
        json!({
            "diffusion_u": {
                "type": "number",
                "default": DEFAULT_DIFFUSION_U,
                "min": 0.0,
                "max": 0.2,
                "description": "Diffusion rate of substrate U"
            },
            "diffusion_v": {
                "type": "number",
                "default": DEFAULT_DIFFUSION_V,
                "min": 0.0,
                "max": 0.2,
                "description": "Diffusion rate of activator V"
            },
            "feed_rate": {
                "type": "number",
                "default": DEFAULT_FEED_RATE,
                "min": 0.01,
                "max": 0.1,
                "description": "Feed rate (F): how fast U is replenished"
            },
            "kill_rate": {
                "type": "number",
                "default": DEFAULT_KILL_RATE,
                "min": 0.04,
                "max": 0.07,
                "description": "Kill rate (k): how fast V is removed"
            },
            "dt": {
                "type": "number",
                "default": DEFAULT_DT,
                "min": 0.0,
                "max": 1.5,
                "description": "Time step per sub-step"
            }
        })
    }
}
