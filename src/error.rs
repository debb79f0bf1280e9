//! Error types for the manufacturing Monte Carlo engine.

use thiserror::Error;

/// Result type alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;

/// Errors raised by validation, statistics and configuration loading.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// A ParameterSet field violates its constraint.
    #[error("Invalid parameter `{field}`: {constraint} (got {value})")]
    InvalidParameter {
        field: &'static str,
        constraint: &'static str,
        value: String,
    },

    /// Not enough trials for the requested statistic.
    #[error("Insufficient samples: need at least {required}, got {available}")]
    InsufficientSamples { required: usize, available: usize },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl SimError {
    pub fn invalid_parameter(
        field: &'static str,
        constraint: &'static str,
        value: impl ToString,
    ) -> Self {
        Self::InvalidParameter {
            field,
            constraint,
            value: value.to_string(),
        }
    }

    pub fn insufficient_samples(required: usize, available: usize) -> Self {
        Self::InsufficientSamples {
            required,
            available,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
