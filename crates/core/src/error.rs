//! Error types for the quantum-fluid core.

use thiserror::Error;

/// Errors produced by engine construction, configuration and export.
///
/// Stepping, perturbation and color mapping never fail; only the edges of a
/// session (building fields, parsing configuration, writing files) do.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Width or height was zero, or `width * height` overflowed.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The spectral model needs a square grid.
    #[error("grid must be square for the spectral model, got ({width}, {height})")]
    NonSquareGrid { width: usize, height: usize },

    /// Two buffers had incompatible dimensions.
    #[error("dimension mismatch: ({lhs_w}, {lhs_h}) vs ({rhs_w}, {rhs_h})")]
    DimensionMismatch {
        lhs_w: usize,
        lhs_h: usize,
        rhs_w: usize,
        rhs_h: usize,
    },

    /// An engine name was not found in the registry.
    #[error("unknown engine: {0}")]
    UnknownEngine(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A configuration value was rejected.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Writing a snapshot or animation failed.
    #[error("i/o error: {0}")]
    Io(String),
}
