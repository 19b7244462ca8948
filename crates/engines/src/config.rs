//! Session configuration: every constant the frame loop and engines need.
//!
//! A `SessionConfig` is built once at startup (defaults, then an optional
//! JSON file, then command-line overrides) and handed to the frame loop.
//! Nothing reads configuration from global state.

use quantum_fluid_core::error::EngineError;
use quantum_fluid_core::regime::{default_regimes, Regime};
use quantum_fluid_gray_scott::{GrayScottPalette, PatchSeeding, ReactionParameters};
use quantum_fluid_ginzburg_landau::AmplitudeParameters;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ENGINE_NAMES;

/// Default grid side for the Gray-Scott model.
pub const GRAY_SCOTT_GRID: usize = 200;
/// Default grid side for the Ginzburg-Landau model.
pub const GINZBURG_LANDAU_GRID: usize = 128;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Registry name of the model (`"gray-scott"` or `"ginzburg-landau"`).
    pub engine: String,
    /// Grid width; `None` picks the model's default.
    pub width: Option<usize>,
    /// Grid height; `None` picks the model's default.
    pub height: Option<usize>,
    /// Display pixels per grid cell; pointer positions arrive in display space.
    pub display_scale: usize,
    pub seed: u64,
    /// Sub-steps per frame; `None` keeps the model's default.
    pub sub_steps: Option<usize>,
    pub gray_scott: ReactionParameters,
    pub seeding: PatchSeeding,
    pub palette: GrayScottPalette,
    pub ginzburg_landau: AmplitudeParameters,
    pub regimes: Vec<Regime>,
    pub perturb_radius: f64,
    /// Whether frames are buffered for export.
    pub record: bool,
    pub max_frames: usize,
    /// Keep every n-th row and column of recorded frames.
    pub record_stride: usize,
    /// Frame-rate cap of the live loop; 0 runs unthrottled.
    pub target_fps: u32,
    /// Playback rate of the exported animation.
    pub playback_fps: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: "gray-scott".to_string(),
            width: None,
            height: None,
            display_scale: 4,
            seed: 42,
            sub_steps: None,
            gray_scott: ReactionParameters::default(),
            seeding: PatchSeeding::default(),
            palette: GrayScottPalette::default(),
            ginzburg_landau: AmplitudeParameters::default(),
            regimes: default_regimes(),
            perturb_radius: quantum_fluid_ginzburg_landau::perturb::DEFAULT_RADIUS,
            record: true,
            max_frames: 720,
            record_stride: 2,
            target_fps: 60,
            playback_fps: 30,
        }
    }
}

impl SessionConfig {
    /// Parses a JSON document; missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Io(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// Grid size after applying the model default for unset sides.
    pub fn grid_size(&self) -> (usize, usize) {
        let side = if self.engine == "ginzburg-landau" {
            GINZBURG_LANDAU_GRID
        } else {
            GRAY_SCOTT_GRID
        };
        (self.width.unwrap_or(side), self.height.unwrap_or(side))
    }

    /// Display-space size that pointer coordinates are expressed in.
    pub fn display_size(&self) -> (f64, f64) {
        let (w, h) = self.grid_size();
        let scale = self.display_scale as f64;
        (w as f64 * scale, h as f64 * scale)
    }

    /// Rejects settings the loop cannot run with.
    ///
    /// Numerical parameters are not range-checked; see the stable ranges in
    /// each model's parameter docs.
    pub fn validate(&self) -> Result<(), EngineError> {
        if !ENGINE_NAMES.contains(&self.engine.as_str()) {
            return Err(EngineError::UnknownEngine(self.engine.clone()));
        }
        if self.display_scale == 0 {
            return Err(EngineError::InvalidConfig("display_scale must be at least 1".into()));
        }
        if self.record_stride == 0 {
            return Err(EngineError::InvalidConfig("record_stride must be at least 1".into()));
        }
        if self.playback_fps == 0 {
            return Err(EngineError::InvalidConfig("playback_fps must be at least 1".into()));
        }
        if self.sub_steps == Some(0) {
            return Err(EngineError::InvalidConfig("sub_steps must be at least 1".into()));
        }
        if self.sub_steps.is_some() && self.engine == "ginzburg-landau" {
            return Err(EngineError::InvalidConfig(
                "sub_steps is fixed at 1 for ginzburg-landau".into(),
            ));
        }
        if !(self.perturb_radius.is_finite() && self.perturb_radius > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "perturb_radius must be positive and finite, got {}",
                self.perturb_radius
            )));
        }
        Ok(())
    }
}
