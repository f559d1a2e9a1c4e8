// ABOUTME: Constants module with concern-separated organization
// ABOUTME: Pure data constants for record scales, scoring heuristics, and service defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Scoring heuristics in [`scoring`] are calibrated together with the insight
//! and recommendation thresholds. Change them as a set.

/// Bounded scale limits for validated record fields
pub mod scales {
    /// Lowest Bristol stool type
    pub const BRISTOL_MIN: u8 = 1;
    /// Highest Bristol stool type
    pub const BRISTOL_MAX: u8 = 7;
    /// Bristol type at the centre of the scale
    pub const BRISTOL_IDEAL: u8 = 4;
    /// Lowest 1-10 rating
    pub const RATING_MIN: u8 = 1;
    /// Highest 1-10 rating
    pub const RATING_MAX: u8 = 10;
    /// Default pain and strain rating for a new movement record
    pub const DEFAULT_DISCOMFORT: u8 = 1;
    /// Default satisfaction rating for a new movement record
    pub const DEFAULT_SATISFACTION: u8 = 5;
    /// Default user-asserted relation strength
    pub const DEFAULT_RELATION_STRENGTH: u8 = 5;
}

/// Heuristic scoring constants
pub mod scoring {
    /// Lower bound of the healthy Bristol band
    pub const HEALTHY_BRISTOL_MIN: u8 = 3;
    /// Upper bound of the healthy Bristol band
    pub const HEALTHY_BRISTOL_MAX: u8 = 5;
    /// Ideal gap between movements in hours
    pub const IDEAL_GAP_HOURS: f64 = 24.0;
    /// Ideal calories per meal
    pub const IDEAL_MEAL_CALORIES: f64 = 600.0;
    /// Weight of calorie proximity in the nutrition score
    pub const NUTRITION_CALORIE_WEIGHT: f64 = 0.7;
    /// Weight of fiber-rich meals in the nutrition score
    pub const NUTRITION_FIBER_WEIGHT: f64 = 0.3;
    /// Window in hours within which a dose counts as taken
    pub const COMPLIANCE_WINDOW_HOURS: i64 = 36;
    /// Calories at or above which a meal is large
    pub const LARGE_MEAL_CALORIES: u32 = 800;
    /// Calories at or below which a fiber-rich meal is healthy
    pub const HEALTHY_MEAL_MAX_CALORIES: u32 = 600;
    /// Decimal places kept on every reported score
    pub const SCORE_DECIMALS: u32 = 2;
}

/// Composite health score weights and benchmarks
pub mod health_score {
    /// Weight of the bowel domain
    pub const BOWEL_WEIGHT: f64 = 0.35;
    /// Weight of the diet domain
    pub const DIET_WEIGHT: f64 = 0.25;
    /// Weight of the symptom domain
    pub const SYMPTOM_WEIGHT: f64 = 0.25;
    /// Weight of the medication adherence domain
    pub const MEDICATION_WEIGHT: f64 = 0.15;
    /// Midpoint used for factor impact
    pub const NEUTRAL_SCORE: f64 = 50.0;
    /// Population average benchmark
    pub const POPULATION_AVERAGE: f64 = 65.0;
    /// Healthy benchmark
    pub const HEALTHY_BENCHMARK: f64 = 75.0;
    /// Optimal benchmark
    pub const OPTIMAL_BENCHMARK: f64 = 85.0;
}

/// Defaults for the service layer
pub mod service {
    /// Days covered when a request omits its start
    pub const DEFAULT_RANGE_DAYS: i64 = 30;
    /// Medication records fetched per request
    pub const MEDICATION_FETCH_LIMIT: usize = 100;
    /// User-asserted relations fetched per request
    pub const RELATION_FETCH_LIMIT: usize = 1000;
}
