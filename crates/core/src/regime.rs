//! Named amplitude-equation presets selectable at runtime.
//!
//! A [`Regime`] fixes the imaginary part of `alpha` together with `beta`
//! and `gamma`; `Re(alpha)` is always 1. Selecting one replaces the whole
//! parameter set at once.
//!
//! Known behavior on a 128×128 grid with unit spacing and `dt = 0.05`
//! (`c1 = Im(alpha)`, `c2 = beta`):
//!
//! | regime     | c1   | c2   | gamma | 1 + c1·c2 | behavior                         |
//! |------------|------|------|-------|-----------|----------------------------------|
//! | spirals    | 0.5  | 2.1  | 0.1   | 2.05      | stable rotating spirals          |
//! | turbulence | 2.0  | -1.0 | 0.0   | -1.0      | Benjamin-Feir phase turbulence   |
//! | labyrinth  | 0.0  | 0.0  | 0.6   | 1.0       | phase-locked domains and walls   |
//! | defects    | 1.5  | -1.2 | 0.05  | -0.8      | defect-mediated chaos            |
//!
//! Values with `|c1|, |c2| <= 3` and `0 <= gamma <= 1` stay bounded at
//! `dt <= 0.1`. Outside that range the explicit nonlinear half-step can
//! blow up; this is not checked.

use serde::{Deserialize, Serialize};

/// A named `(Im(alpha), beta, gamma)` triple bound to an input key code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regime {
    pub name: String,
    /// Opaque input code that selects this regime (e.g. `"1"`).
    pub key: String,
    pub alpha_im: f64,
    pub beta: f64,
    pub gamma: f64,
}

impl Regime {
    pub fn new(name: &str, key: &str, alpha_im: f64, beta: f64, gamma: f64) -> Self {
        Self {
            name: name.to_string(),
            key: key.to_string(),
            alpha_im,
            beta,
            gamma,
        }
    }
}

/// The built-in catalog, keys `"1"` to `"4"`.
pub fn default_regimes() -> Vec<Regime> {
    vec![
        Regime::new("spirals", "1", 0.5, 2.1, 0.1),
        Regime::new("turbulence", "2", 2.0, -1.0, 0.0),
        Regime::new("labyrinth", "3", 0.0, 0.0, 0.6),
        Regime::new("defects", "4", 1.5, -1.2, 0.05),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn default_catalog_keys_are_unique() {
        let regimes = default_regimes();
        let keys: HashSet<_> = regimes.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys.len(), regimes.len());
    }

    #[test]
    fn default_catalog_names_are_unique() {
        let regimes = default_regimes();
        let names: HashSet<_> = regimes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), regimes.len());
    }

    #[test]
    fn spirals_matches_documented_defaults() {
        let spirals = &default_regimes()[0];
        assert_eq!(spirals.key, "1");
        assert_eq!((spirals.alpha_im, spirals.beta, spirals.gamma), (0.5, 2.1, 0.1));
    }

    #[test]
    fn json_round_trip() {
        let r = Regime::new("custom", "x", 0.7, -0.3, 0.2);
        let json = serde_json::to_string(&r).unwrap();
        let back: Regime = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
