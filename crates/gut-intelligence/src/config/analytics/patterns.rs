// ABOUTME: Behavior pattern detection configuration
// ABOUTME: Occurrence minimums, follow-up window, and per-pattern ratios
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Parameters for recurring pattern detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternConfig {
    /// Occurrences needed before a pattern is reported
    pub min_occurrences: u32,
    /// Hours after a trigger meal in which a symptom counts as a follow-up
    pub followup_window_hours: i64,
    /// Weekend movement mean below this share of the weekday mean is a drop
    pub weekend_drop_ratio: f64,
    /// Daily Bristol average at or above which a day is loose
    pub loose_bristol: f64,
    /// Daily Bristol average at or below which a day is hard
    pub hard_bristol: f64,
    /// Symptoms in one day that make a cluster
    pub cluster_symptoms_per_day: u32,
    /// Cluster days needed for a clustering pattern
    pub min_cluster_days: u32,
    /// Share of a weekday's observed days with symptoms that flags concentration
    pub weekday_concentration: f64,
    /// Weekend calories at or above this multiple of weekday calories is an increase
    pub weekend_calorie_ratio: f64,
    /// Length of the rolling lifestyle window in days
    pub rolling_window_days: usize,
    /// Fiber-rich meals in a rolling window that make it a fiber week
    pub fiber_week_meals: u32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_occurrences: 3,
            followup_window_hours: 24,
            weekend_drop_ratio: 0.75,
            loose_bristol: 6.0,
            hard_bristol: 2.0,
            cluster_symptoms_per_day: 3,
            min_cluster_days: 2,
            weekday_concentration: 0.6,
            weekend_calorie_ratio: 1.2,
            rolling_window_days: 7,
            fiber_week_meals: 3,
        }
    }
}
