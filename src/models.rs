// ABOUTME: Record models re-exported from gut-core plus service-level response types
// ABOUTME: HealthOverview combines the four domain summaries with the overall score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use gut_core::models::*;

use gut_intelligence::{
    BowelMovementSummary, MealSummary, MedicationSummary, SymptomSummary, TrendDirection,
};
use serde::{Deserialize, Serialize};

/// Dashboard view of one user's gut health over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthOverview {
    /// Resolved analysis window
    pub period: DateRange,
    /// Bowel movement summary
    pub bowel_movements: BowelMovementSummary,
    /// Meal summary
    pub meals: MealSummary,
    /// Symptom summary
    pub symptoms: SymptomSummary,
    /// Medication summary
    pub medications: MedicationSummary,
    /// Composite score, 0-100
    pub overall_health_score: f64,
    /// Direction of bowel regularity across the period
    pub trend_direction: TrendDirection,
}

impl HealthOverview {
    /// Records behind the overview
    #[must_use]
    pub const fn record_count(&self) -> usize {
        self.bowel_movements.total_count
            + self.meals.total_meals
            + self.symptoms.total_symptoms
            + self.medications.total_medications
    }
}
