// ABOUTME: Correlation analysis configuration for meal-to-outcome association
// ABOUTME: Follow-up window, strength scaling, and confidence growth parameters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Parameters for meal-to-outcome correlation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationConfig {
    /// Outcomes later than this many hours after a meal are ignored
    pub max_time_gap_hours: f64,
    /// Divisor mapping the 1-10 observation scale onto `[-1, 1]`
    pub strength_scale: f64,
    /// Pseudo-count added to the sample size in the confidence ratio
    pub confidence_prior: f64,
    /// Ceiling on correlation confidence
    pub max_confidence: f64,
    /// Paired days needed for a daily metric correlation
    pub min_daily_samples: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            max_time_gap_hours: 24.0,
            strength_scale: 10.0,
            confidence_prior: 5.0,
            max_confidence: 0.95,
            min_daily_samples: 3,
        }
    }
}
