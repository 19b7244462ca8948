//! Failures surfaced by the `quantum-fluid` binary.
//!
//! Every failure carries its own process status. clap exits with 2 on a bad
//! command line before `run` is reached; the rest are listed on
//! [`CliError::exit_code`].

use quantum_fluid_core::EngineError;
use thiserror::Error;

/// Status for model construction and presentation failures.
pub const EXIT_ENGINE: i32 = 10;
/// Status for file reads and image writes.
pub const EXIT_IO: i32 = 11;
/// Status for unusable config, event scripts or `--params`.
pub const EXIT_INPUT: i32 = 12;
/// Status for JSON output that could not be encoded.
pub const EXIT_SERIALIZATION: i32 = 13;

#[derive(Debug, Error)]
pub enum CliError {
    /// Grid, engine lookup or presenter failure.
    #[error(transparent)]
    Engine(EngineError),
    #[error("{0}")]
    Io(String),
    /// Rejected user input, already phrased for the terminal.
    #[error("{0}")]
    Input(String),
    #[error("cannot encode output: {0}")]
    Serialization(String),
}

impl CliError {
    /// 10 engine, 11 I/O, 12 input, 13 serialization.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => EXIT_ENGINE,
            CliError::Io(_) => EXIT_IO,
            CliError::Input(_) => EXIT_INPUT,
            CliError::Serialization(_) => EXIT_SERIALIZATION,
        }
    }
}

// Config and color problems are the user's to fix, so they share the input
// status rather than the engine one.
impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            EngineError::InvalidConfig(msg) | EngineError::InvalidColor(msg) => {
                CliError::Input(msg)
            }
            other => CliError::Engine(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
