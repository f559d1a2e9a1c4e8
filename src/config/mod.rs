// ABOUTME: Service configuration for the analytics orchestrator
// ABOUTME: Default date window and store fetch limits with GUT_ANALYTICS_* environment overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration management
//!
//! Engine thresholds live in [`gut_intelligence::AnalyticsConfig`]; this
//! module only covers how the service resolves requests and queries stores.

/// Deployment environment and environment-variable parsing
pub mod environment;

pub use environment::{env_flag, env_var_or, Environment};
pub use gut_intelligence::{AnalyticsConfig, ConfigError};

use gut_core::constants::service::{
    DEFAULT_RANGE_DAYS, MEDICATION_FETCH_LIMIT, RELATION_FETCH_LIMIT,
};
use serde::{Deserialize, Serialize};

/// How the analytics service resolves windows and fetches records
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsServiceConfig {
    /// Window length when a request omits `start`
    pub default_range_days: i64,
    /// Most medications fetched per request
    pub medication_fetch_limit: usize,
    /// Most meal relations fetched per request
    pub relation_fetch_limit: usize,
}

impl Default for AnalyticsServiceConfig {
    fn default() -> Self {
        Self {
            default_range_days: DEFAULT_RANGE_DAYS,
            medication_fetch_limit: MEDICATION_FETCH_LIMIT,
            relation_fetch_limit: RELATION_FETCH_LIMIT,
        }
    }
}

impl AnalyticsServiceConfig {
    /// Load from `GUT_ANALYTICS_DEFAULT_RANGE_DAYS`,
    /// `GUT_ANALYTICS_MEDICATION_FETCH_LIMIT` and
    /// `GUT_ANALYTICS_RELATION_FETCH_LIMIT`
    ///
    /// # Errors
    ///
    /// Returns an error if a variable does not parse or a value is not positive
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            default_range_days: env_var_or(
                "GUT_ANALYTICS_DEFAULT_RANGE_DAYS",
                defaults.default_range_days,
            )?,
            medication_fetch_limit: env_var_or(
                "GUT_ANALYTICS_MEDICATION_FETCH_LIMIT",
                defaults.medication_fetch_limit,
            )?,
            relation_fetch_limit: env_var_or(
                "GUT_ANALYTICS_RELATION_FETCH_LIMIT",
                defaults.relation_fetch_limit,
            )?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the window or a fetch limit is not positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_range_days <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "default_range_days must be positive",
            ));
        }
        if self.medication_fetch_limit == 0 || self.relation_fetch_limit == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "fetch limits must be positive",
            ));
        }
        Ok(())
    }
}
