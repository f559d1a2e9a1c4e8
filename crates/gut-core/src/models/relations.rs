// ABOUTME: User-asserted links between a meal and a later bowel movement or symptom
// ABOUTME: The asserted correlation type overrides the computed strength for that pair
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::enums::CorrelationType;
use super::scales::Rating;
use super::HealthRecord;
use crate::constants::scales::DEFAULT_RELATION_STRENGTH;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome record a meal relation points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationTarget {
    /// A bowel movement record
    BowelMovement(Uuid),
    /// A symptom record
    Symptom(Uuid),
}

/// A user's statement that a meal influenced a later outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealRelation {
    /// Record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// The meal
    pub meal_id: Uuid,
    /// The outcome record
    pub target: RelationTarget,
    /// How strongly the user feels about the link
    pub strength: Rating,
    /// Hours between the meal and the outcome, as reported
    pub time_gap_hours: f64,
    /// Direction of the asserted effect
    pub user_correlation: Option<CorrelationType>,
    /// Free-text notes
    pub notes: Option<String>,
    /// When the assertion was made
    pub created_at: DateTime<Utc>,
}

impl MealRelation {
    /// Create a relation with default strength and no asserted direction
    pub fn new(
        user_id: impl Into<String>,
        meal_id: Uuid,
        target: RelationTarget,
        time_gap_hours: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            meal_id,
            target,
            strength: Rating::clamped(DEFAULT_RELATION_STRENGTH),
            time_gap_hours,
            user_correlation: None,
            notes: None,
            created_at,
        }
    }

    /// Set the asserted strength
    #[must_use]
    pub const fn with_strength(mut self, strength: Rating) -> Self {
        self.strength = strength;
        self
    }

    /// Set the asserted direction
    #[must_use]
    pub const fn with_correlation(mut self, correlation: CorrelationType) -> Self {
        self.user_correlation = Some(correlation);
        self
    }

    /// Attach notes
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Signed override value on the 1-10 strength scale, or `None` when the
    /// computed value should stand
    #[must_use]
    pub fn asserted_value(&self) -> Option<f64> {
        match self.user_correlation? {
            CorrelationType::Positive => Some(self.strength.as_f64()),
            CorrelationType::Negative => Some(-self.strength.as_f64()),
            CorrelationType::Neutral => Some(0.0),
            CorrelationType::Unknown => None,
        }
    }
}

impl HealthRecord for MealRelation {
    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}
