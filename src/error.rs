//! Simulation error types
//!
//! Losing lives or ending the run are game states, not errors. These variants
//! cover bad construction parameters and bad configuration only.

use thiserror::Error;

/// Errors raised while building bugs or game state.
#[derive(Debug, Error)]
pub enum SimError {
    /// A bug was requested with a non-positive or non-finite speed or size.
    #[error("invalid entity parameters: speed={speed}, size={size}")]
    InvalidEntityParameters { speed: f32, size: f32 },
    /// A configuration value violates its invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    ConfigRead(#[from] std::io::Error),
}
