// ABOUTME: Core health record models and types for gut health analytics
// ABOUTME: Re-exports record structs, validated scales, closed enums, and date ranges
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Four immutable, timestamped record variants feed the analytics engine:
//! [`BowelMovement`], [`Meal`], [`Symptom`] and [`Medication`]. User-asserted
//! links between a meal and a later outcome are modeled as [`MealRelation`].
//!
//! Bounded fields use validated newtypes ([`BristolType`], [`Rating`]) and
//! string-valued domain fields use closed enums, so invalid values fail at the
//! boundary instead of reaching aggregation.

mod bowel_movement;
mod date_range;
mod enums;
mod meal;
mod medication;
mod relations;
mod scales;
mod symptom;

pub use bowel_movement::BowelMovement;
pub use date_range::DateRange;
pub use enums::{
    Color, Consistency, CorrelationType, MealCategory, MedicationCategory, MedicationForm,
    MedicationRoute, SmellLevel, SymptomCategory, SymptomType, Volume,
};
pub use meal::Meal;
pub use medication::Medication;
pub use relations::{MealRelation, RelationTarget};
pub use scales::{BristolType, Rating};
pub use symptom::Symptom;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Common accessors shared by every stored record
pub trait HealthRecord: Clone + Send + Sync + 'static {
    /// Record identifier
    fn id(&self) -> Uuid;

    /// Owning user
    fn user_id(&self) -> &str;

    /// Instant used for date-range queries, if the record has one
    fn timestamp(&self) -> Option<DateTime<Utc>>;
}

/// Immutable snapshot of one user's records for a single analytics pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthRecords {
    /// Bowel movements in range
    pub movements: Vec<BowelMovement>,
    /// Meals in range
    pub meals: Vec<Meal>,
    /// Symptoms in range
    pub symptoms: Vec<Symptom>,
    /// Medications on file
    pub medications: Vec<Medication>,
    /// User-asserted meal relations
    pub relations: Vec<MealRelation>,
}

impl HealthRecords {
    /// Total number of health records (relations excluded)
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.movements.len() + self.meals.len() + self.symptoms.len() + self.medications.len()
    }

    /// Whether the snapshot holds no health records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.record_count() == 0
    }
}
