#![deny(unsafe_code)]
//! Engine registry and the interactive session built around it.
//!
//! This crate sits between `quantum-fluid-core` (which defines the `Engine`
//! trait) and the model crates (`quantum-fluid-gray-scott`,
//! `quantum-fluid-ginzburg-landau`). It owns everything a front end needs to
//! drive a model frame by frame: name-based construction, session
//! configuration, input routing, the frame loop, frame recording and
//! image export.

pub mod config;
pub mod frame_loop;
pub mod input;
pub mod limiter;
pub mod recorder;

#[cfg(feature = "export")]
pub mod export;

pub use config::SessionConfig;
pub use frame_loop::{FrameLoop, FrameStatus, Presenter, RunSummary};
pub use input::{InputEvent, InputSource, KeyMap, ScriptedInput};
pub use limiter::FrameLimiter;
pub use recorder::FrameRecorder;

use quantum_fluid_core::color::RgbBuffer;
use quantum_fluid_core::error::EngineError;
use quantum_fluid_core::grid::Grid;
use quantum_fluid_core::prng::Xorshift64;
use quantum_fluid_core::regime::Regime;
use quantum_fluid_core::Engine;
use quantum_fluid_ginzburg_landau::GinzburgLandau;
use quantum_fluid_gray_scott::{GrayScott, RealField};
use serde_json::Value;

/// All available engine names.
pub const ENGINE_NAMES: &[&str] = &["gray-scott", "ginzburg-landau"];

/// Enumeration of all available field models.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction and
/// [`EngineKind::from_config`] to build from a full [`SessionConfig`].
pub enum EngineKind {
    /// Gray-Scott reaction-diffusion.
    GrayScott(GrayScott),
    /// Complex Ginzburg-Landau amplitude equation.
    GinzburgLandau(GinzburgLandau),
}

impl EngineKind {
    /// Constructs an engine by name from a JSON params object.
    ///
    /// Returns `EngineError::UnknownEngine` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: usize,
        height: usize,
        seed: u64,
        params: &Value,
    ) -> Result<Self, EngineError> {
        match name {
            "gray-scott" => Ok(EngineKind::GrayScott(GrayScott::from_json(
                width, height, seed, params,
            )?)),
            "ginzburg-landau" => Ok(EngineKind::GinzburgLandau(GinzburgLandau::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Constructs the engine a session config describes.
    pub fn from_config(config: &SessionConfig) -> Result<Self, EngineError> {
        let (width, height) = config.grid_size();
        let grid = Grid::new(width, height)?;
        match config.engine.as_str() {
            "gray-scott" => {
                let mut rng = Xorshift64::new(config.seed);
                let field = RealField::seeded(grid, config.seeding, &mut rng);
                let mut engine =
                    GrayScott::from_field(field, config.gray_scott).with_palette(config.palette);
                if let Some(n) = config.sub_steps {
                    engine = engine.with_sub_steps(n);
                }
                Ok(EngineKind::GrayScott(engine))
            }
            "ginzburg-landau" => {
                let engine = GinzburgLandau::new(grid, config.seed, config.ginzburg_landau)?
                    .with_perturb_radius(config.perturb_radius);
                Ok(EngineKind::GinzburgLandau(engine))
            }
            other => Err(EngineError::UnknownEngine(other.to_string())),
        }
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }

    /// Registry name of the wrapped model.
    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::GrayScott(_) => "gray-scott",
            EngineKind::GinzburgLandau(_) => "ginzburg-landau",
        }
    }
}

impl Engine for EngineKind {
    fn grid(&self) -> Grid {
        match self {
            EngineKind::GrayScott(e) => e.grid(),
            EngineKind::GinzburgLandau(e) => e.grid(),
        }
    }

    fn sub_steps(&self) -> usize {
        match self {
            EngineKind::GrayScott(e) => e.sub_steps(),
            EngineKind::GinzburgLandau(e) => e.sub_steps(),
        }
    }

    fn advance_frame(&mut self) {
        match self {
            EngineKind::GrayScott(e) => e.advance_frame(),
            EngineKind::GinzburgLandau(e) => e.advance_frame(),
        }
    }

    fn render(&self) -> RgbBuffer {
        match self {
            EngineKind::GrayScott(e) => e.render(),
            EngineKind::GinzburgLandau(e) => e.render(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::GrayScott(e) => e.params(),
            EngineKind::GinzburgLandau(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::GrayScott(e) => e.param_schema(),
            EngineKind::GinzburgLandau(e) => e.param_schema(),
        }
    }

    fn perturb(&mut self, x: f64, y: f64, display_size: (f64, f64)) {
        match self {
            EngineKind::GrayScott(e) => e.perturb(x, y, display_size),
            EngineKind::GinzburgLandau(e) => e.perturb(x, y, display_size),
        }
    }

    fn apply_regime(&mut self, regime: &Regime) -> bool {
        match self {
            EngineKind::GrayScott(e) => e.apply_regime(regime),
            EngineKind::GinzburgLandau(e) => e.apply_regime(regime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantum_fluid_core::regime::default_regimes;
    use quantum_fluid_gray_scott::PatchSeeding;
    use serde_json::json;

    #[test]
    fn from_name_builds_both_models() {
        assert!(EngineKind::from_name("gray-scott", 32, 32, 42, &json!({})).is_ok());
        assert!(EngineKind::from_name("ginzburg-landau", 32, 32, 42, &json!({})).is_ok());
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = EngineKind::from_name("nonexistent", 32, 32, 42, &json!({}));
        assert!(matches!(result, Err(EngineError::UnknownEngine(_))));
    }

    #[test]
    fn from_name_rejects_rectangular_ginzburg_landau() {
        let result = EngineKind::from_name("ginzburg-landau", 32, 16, 42, &json!({}));
        assert!(matches!(result, Err(EngineError::NonSquareGrid { .. })));
    }

    #[test]
    fn list_engines_names_every_model() {
        let names = EngineKind::list_engines();
        assert_eq!(names, &["gray-scott", "ginzburg-landau"]);
    }

    #[test]
    fn from_config_applies_overrides() {
        let config = SessionConfig {
            width: Some(24),
            height: Some(24),
            sub_steps: Some(3),
            ..SessionConfig::default()
        };
        let engine = EngineKind::from_config(&config).unwrap();
        assert_eq!(engine.name(), "gray-scott");
        assert_eq!(engine.grid(), Grid::square(24).unwrap());
        assert_eq!(engine.sub_steps(), 3);
        assert_eq!(engine.params()["sub_steps"], 3);
    }

    #[test]
    fn from_config_seeds_gray_scott_once_from_the_config_layout() {
        let seeding = PatchSeeding {
            count: 2,
            half_width: 4,
        };
        let config = SessionConfig {
            width: Some(40),
            height: Some(40),
            seed: 11,
            seeding,
            ..SessionConfig::default()
        };
        let expected = RealField::seeded(Grid::square(40).unwrap(), seeding, &mut Xorshift64::new(11));
        match EngineKind::from_config(&config).unwrap() {
            EngineKind::GrayScott(engine) => assert_eq!(engine.field(), &expected),
            EngineKind::GinzburgLandau(_) => panic!("expected gray-scott"),
        }

        let default_layout = EngineKind::from_config(&SessionConfig {
            width: Some(40),
            height: Some(40),
            seed: 11,
            ..SessionConfig::default()
        })
        .unwrap();
        let direct = GrayScott::new(Grid::square(40).unwrap(), 11, config.gray_scott);
        assert_eq!(default_layout.render(), direct.render());
    }

    #[test]
    fn from_config_builds_ginzburg_landau_with_radius() {
        let config = SessionConfig {
            engine: "ginzburg-landau".into(),
            width: Some(16),
            height: Some(16),
            perturb_radius: 9.0,
            ..SessionConfig::default()
        };
        let engine = EngineKind::from_config(&config).unwrap();
        assert_eq!(engine.name(), "ginzburg-landau");
        assert_eq!(engine.sub_steps(), 1);
        assert_eq!(engine.params()["perturb_radius"], 9.0);
    }

    #[test]
    fn trait_delegation_params_and_schema() {
        let gs = EngineKind::from_name("gray-scott", 16, 16, 42, &json!({})).unwrap();
        assert!(gs.params().get("feed_rate").is_some());
        assert!(gs.param_schema().get("feed_rate").is_some());

        let gl = EngineKind::from_name("ginzburg-landau", 16, 16, 42, &json!({})).unwrap();
        assert!(gl.params().get("beta").is_some());
        assert!(gl.param_schema().get("alpha_im").is_some());
    }

    #[test]
    fn regimes_only_apply_to_ginzburg_landau() {
        let regime = &default_regimes()[0];
        let mut gs = EngineKind::from_name("gray-scott", 16, 16, 42, &json!({})).unwrap();
        let mut gl = EngineKind::from_name("ginzburg-landau", 16, 16, 42, &json!({})).unwrap();
        assert!(!gs.apply_regime(regime));
        assert!(gl.apply_regime(regime));
    }

    #[test]
    fn determinism_same_seed() {
        for name in ENGINE_NAMES {
            let mut a = EngineKind::from_name(name, 32, 32, 99, &json!({})).unwrap();
            let mut b = EngineKind::from_name(name, 32, 32, 99, &json!({})).unwrap();
            for _ in 0..10 {
                a.advance_frame();
                b.advance_frame();
            }
            assert_eq!(a.render(), b.render(), "{name} diverged");
        }
    }

    #[test]
    fn object_safety() {
        let engine = EngineKind::from_name("gray-scott", 16, 16, 42, &json!({})).unwrap();
        let boxed: Box<dyn Engine> = Box::new(engine);
        assert_eq!(boxed.render().width(), 16);
    }
}
