// ABOUTME: Configuration error types for analytics configuration validation
// ABOUTME: Invalid ranges, unbalanced weights, and environment parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration error types for analytics configuration validation.

use gut_core::errors::{AppError, ErrorCode};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Bounds are inverted or fall outside their scale (e.g. healthy Bristol band outside 1..=7)
    #[error("Invalid range: {0}")]
    InvalidRange(&'static str),

    /// Weights don't sum to the required total
    #[error("Invalid weights: {0}")]
    InvalidWeights(&'static str),

    /// Numeric value outside valid range for parameter
    #[error("Value out of range: {0}")]
    ValueOutOfRange(&'static str),

    /// Environment override could not be parsed into the field's type
    #[error("Parse error: {var}={value:?}")]
    Parse {
        /// Environment variable name
        var: String,
        /// Raw value that failed to parse
        value: String,
    },
}

impl From<ConfigError> for AppError {
    fn from(error: ConfigError) -> Self {
        let code = match error {
            ConfigError::Parse { .. } => ErrorCode::ConfigError,
            _ => ErrorCode::ConfigInvalid,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}
