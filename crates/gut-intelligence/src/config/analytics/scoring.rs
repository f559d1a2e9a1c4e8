// ABOUTME: Domain score heuristics for bowel, meal, and medication summaries
// ABOUTME: Healthy Bristol band, ideal cadence, ideal meal size, and compliance window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Scoring Configuration
//!
//! The defaults are fixed heuristics; insights and recommendations are
//! calibrated against them.

use gut_core::constants::scoring;
use serde::{Deserialize, Serialize};

/// Constants behind the consistency, regularity, nutrition and compliance scores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Lower bound of the healthy Bristol band
    pub healthy_bristol_min: u8,
    /// Upper bound of the healthy Bristol band
    pub healthy_bristol_max: u8,
    /// Ideal gap between movements in hours
    pub ideal_gap_hours: f64,
    /// Ideal calories per meal
    pub ideal_meal_calories: f64,
    /// Weight of calorie proximity in the nutrition score
    pub calorie_weight: f64,
    /// Weight of the fiber-rich share in the nutrition score
    pub fiber_weight: f64,
    /// Hours after a dose during which a medication counts as taken
    pub compliance_window_hours: i64,
    /// Calories at or above which a meal is large
    pub large_meal_calories: u32,
    /// Calories at or below which a fiber-rich meal is healthy
    pub healthy_meal_max_calories: u32,
    /// Decimal places kept on reported scores
    pub score_decimals: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            healthy_bristol_min: scoring::HEALTHY_BRISTOL_MIN,
            healthy_bristol_max: scoring::HEALTHY_BRISTOL_MAX,
            ideal_gap_hours: scoring::IDEAL_GAP_HOURS,
            ideal_meal_calories: scoring::IDEAL_MEAL_CALORIES,
            calorie_weight: scoring::NUTRITION_CALORIE_WEIGHT,
            fiber_weight: scoring::NUTRITION_FIBER_WEIGHT,
            compliance_window_hours: scoring::COMPLIANCE_WINDOW_HOURS,
            large_meal_calories: scoring::LARGE_MEAL_CALORIES,
            healthy_meal_max_calories: scoring::HEALTHY_MEAL_MAX_CALORIES,
            score_decimals: scoring::SCORE_DECIMALS,
        }
    }
}
