// ABOUTME: Trend analysis configuration for bucketing, direction, and risk thresholds
// ABOUTME: Includes the first-half versus second-half significant change thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Parameters for metric trend classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendConfig {
    /// Days per bucket
    pub bucket_days: usize,
    /// Relative change needed to leave STABLE
    pub change_threshold: f64,
    /// Bucket pain average above which a declining trend is a risk
    pub pain_risk_threshold: f64,
    /// Bucket symptom severity above which a declining trend is a risk
    pub severity_risk_threshold: f64,
    /// Bucket satisfaction below which a declining trend is a risk
    pub satisfaction_risk_threshold: f64,
    /// Bucket nutrition score below which a declining trend is a risk
    pub nutrition_risk_threshold: f64,
    /// Bucket regularity share below which a declining trend is a risk
    pub regularity_risk_threshold: f64,
    /// Overshoot, as a share of the threshold, that makes a risk HIGH
    pub high_risk_margin: f64,
    /// Relative change that makes a risk HIGH
    pub high_risk_change: f64,
    /// Largest daily movement count still counted as regular
    pub regular_movements_max: u32,
    /// First-half versus second-half thresholds
    pub significant: SignificantTrendConfig,
}

/// Thresholds for plain-language significant trend statements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignificantTrendConfig {
    /// Records needed before any statement is made
    pub min_records: usize,
    /// Relative change in movements per day
    pub frequency_change: f64,
    /// Absolute change in average Bristol type
    pub bristol_change: f64,
    /// Absolute change in the fiber-rich meal share
    pub fiber_change: f64,
    /// Relative change in calories per meal
    pub calorie_change: f64,
    /// Relative change in symptom severity
    pub severity_change: f64,
    /// Statements kept
    pub max_statements: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            bucket_days: 7,
            change_threshold: 0.1,
            pain_risk_threshold: 6.0,
            severity_risk_threshold: 6.0,
            satisfaction_risk_threshold: 4.0,
            nutrition_risk_threshold: 0.4,
            regularity_risk_threshold: 0.5,
            high_risk_margin: 0.25,
            high_risk_change: 0.3,
            regular_movements_max: 3,
            significant: SignificantTrendConfig::default(),
        }
    }
}

impl Default for SignificantTrendConfig {
    fn default() -> Self {
        Self {
            min_records: 5,
            frequency_change: 0.25,
            bristol_change: 1.0,
            fiber_change: 0.2,
            calorie_change: 0.15,
            severity_change: 0.25,
            max_statements: 5,
        }
    }
}
