use thiserror::Error;

/// A configuration or initial state the simulator refuses to run
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("body {index} has mass {mass}; masses must be positive and finite")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("body {index} has a non-finite position or velocity")]
    NonFiniteState { index: usize },

    #[error("invalid value {value} for `{name}`")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("trail capacity must be at least 1")]
    ZeroTrailCapacity,
}

/// Failure to load a configuration document
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] SimError),
}
