// ABOUTME: Composite health score weights, neutral fallbacks, and benchmarks
// ABOUTME: Domain weights must sum to 1.0
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use gut_core::constants::health_score;
use serde::{Deserialize, Serialize};

/// Weights and fallbacks for the 0-100 health score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScoreConfig {
    /// Weight of the bowel domain
    pub bowel_weight: f64,
    /// Weight of the diet domain
    pub diet_weight: f64,
    /// Weight of the symptom domain
    pub symptom_weight: f64,
    /// Weight of the medication adherence domain
    pub medication_weight: f64,
    /// Bowel score used when no movements were logged
    pub neutral_bowel: f64,
    /// Diet score used when no meals were logged
    pub neutral_diet: f64,
    /// Symptom score used when no symptoms were logged
    pub neutral_symptom: f64,
    /// Medication score used when no medications are on file
    pub neutral_medication: f64,
    /// Symptoms per day at which the frequency term reaches zero
    pub symptom_frequency_ceiling: f64,
    /// Population average benchmark
    pub population_average: f64,
    /// Healthy benchmark
    pub healthy_benchmark: f64,
    /// Optimal benchmark
    pub optimal_benchmark: f64,
}

impl HealthScoreConfig {
    /// Sum of the four domain weights
    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.bowel_weight + self.diet_weight + self.symptom_weight + self.medication_weight
    }
}

impl Default for HealthScoreConfig {
    fn default() -> Self {
        Self {
            bowel_weight: health_score::BOWEL_WEIGHT,
            diet_weight: health_score::DIET_WEIGHT,
            symptom_weight: health_score::SYMPTOM_WEIGHT,
            medication_weight: health_score::MEDICATION_WEIGHT,
            neutral_bowel: 50.0,
            neutral_diet: 50.0,
            neutral_symptom: 100.0,
            neutral_medication: 100.0,
            symptom_frequency_ceiling: 10.0,
            population_average: health_score::POPULATION_AVERAGE,
            healthy_benchmark: health_score::HEALTHY_BENCHMARK,
            optimal_benchmark: health_score::OPTIMAL_BENCHMARK,
        }
    }
}
