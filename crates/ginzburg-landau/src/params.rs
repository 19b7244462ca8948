//! Amplitude-equation parameters and regime selection.

use num_complex::Complex64;
use quantum_fluid_core::params::param_f64;
use quantum_fluid_core::regime::Regime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const DEFAULT_ALPHA: Complex64 = Complex64::new(1.0, 0.5);
pub const DEFAULT_BETA: f64 = 2.1;
pub const DEFAULT_GAMMA: f64 = 0.1;
pub const DEFAULT_DT: f64 = 0.05;

/// Coefficients of
/// `∂ψ/∂t = ψ + α∇²ψ − (1 + iβ)|ψ|²ψ + γψ̄`.
///
/// Always replaced as a whole (see [`AmplitudeParameters::from_regime`]);
/// the stepper only reads it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmplitudeParameters {
    /// Diffusion (real part) and dispersion (imaginary part).
    pub alpha: Complex64,
    /// Nonlinear frequency shift.
    pub beta: f64,
    /// Parametric forcing strength on the conjugate field.
    pub gamma: f64,
    pub dt: f64,
}

impl Default for AmplitudeParameters {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
            gamma: DEFAULT_GAMMA,
            dt: DEFAULT_DT,
        }
    }
}

impl AmplitudeParameters {
    /// Full parameter set for `regime`: `alpha = 1 + i·alpha_im`, keeping `dt`.
    pub fn from_regime(regime: &Regime, dt: f64) -> Self {
        Self {
            alpha: Complex64::new(1.0, regime.alpha_im),
            beta: regime.beta,
            gamma: regime.gamma,
            dt,
        }
    }

    /// Reads `alpha_re`, `alpha_im`, `beta`, `gamma`, `dt`, defaulting per key.
    pub fn from_json(params: &Value) -> Self {
        Self {
            alpha: Complex64::new(
                param_f64(params, "alpha_re", DEFAULT_ALPHA.re),
                param_f64(params, "alpha_im", DEFAULT_ALPHA.im),
            ),
            beta: param_f64(params, "beta", DEFAULT_BETA),
            gamma: param_f64(params, "gamma", DEFAULT_GAMMA),
            dt: param_f64(params, "dt", DEFAULT_DT),
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "alpha_re": self.alpha.re,
            "alpha_im": self.alpha.im,
            "beta": self.beta,
            "gamma": self.gamma,
            "dt": self.dt,
        })
    }

    pub fn schema() -> Value {
        json!({
            "alpha_re": {
                "type": "number",
                "default": DEFAULT_ALPHA.re,
                "min": 0.0,
                "max": 2.0,
                "description": "Real part of alpha (diffusion); must be positive for damping"
            },
            "alpha_im": {
                "type": "number",
                "default": DEFAULT_ALPHA.im,
                "min": -3.0,
                "max": 3.0,
                "description": "Imaginary part of alpha (linear dispersion)"
            },
            "beta": {
                "type": "number",
                "default": DEFAULT_BETA,
                "min": -3.0,
                "max": 3.0,
                "description": "Nonlinear frequency shift"
            },
            "gamma": {
                "type": "number",
                "default": DEFAULT_GAMMA,
                "min": 0.0,
                "max": 1.0,
                "description": "Parametric forcing on the conjugate field"
            },
            "dt": {
                "type": "number",
                "default": DEFAULT_DT,
                "min": 0.0,
                "max": 0.1,
                "description": "Time step per frame"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_regime_sets_real_alpha_to_one_and_keeps_dt() {
        let regime = Regime::new("turbulence", "2", 2.0, -1.0, 0.0);
        let p = AmplitudeParameters::from_regime(&regime, 0.02);
        assert_eq!(
            p,
            AmplitudeParameters {
                alpha: Complex64::new(1.0, 2.0),
                beta: -1.0,
                gamma: 0.0,
                dt: 0.02,
            }
        );
    }

    #[test]
    fn from_json_defaults_and_overrides() {
        assert_eq!(AmplitudeParameters::from_json(&json!({})), AmplitudeParameters::default());
        let p = AmplitudeParameters::from_json(&json!({"alpha_im": -0.5, "gamma": 0.3}));
        assert_eq!(p.alpha, Complex64::new(1.0, -0.5));
        assert_eq!(p.gamma, 0.3);
        assert_eq!(p.beta, DEFAULT_BETA);
    }

    #[test]
    fn json_round_trip_through_helpers() {
        let p = AmplitudeParameters {
            alpha: Complex64::new(0.8, 1.2),
            beta: -0.4,
            gamma: 0.05,
            dt: 0.01,
        };
        assert_eq!(AmplitudeParameters::from_json(&p.to_json()), p);
    }

    #[test]
    fn schema_covers_every_parameter() {
        let schema = AmplitudeParameters::schema();
        for key in ["alpha_re", "alpha_im", "beta", "gamma", "dt"] {
            assert!(schema.get(key).is_some(), "schema missing {key}");
        }
    }
}
