// ABOUTME: Symptom record with severity rating and optional classification
// ABOUTME: Category and type are closed enums, triggers are free-text user notes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::enums::{SymptomCategory, SymptomType};
use super::scales::Rating;
use super::HealthRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged symptom
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symptom {
    /// Record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Symptom name
    pub name: String,
    /// When the symptom was noticed
    pub recorded_at: DateTime<Utc>,
    /// Severity rating
    pub severity: Rating,
    /// Body system
    pub category: Option<SymptomCategory>,
    /// Specific kind
    pub symptom_type: Option<SymptomType>,
    /// How long it lasted
    pub duration_minutes: Option<u32>,
    /// Suspected triggers noted by the user
    pub triggers: Vec<String>,
}

impl Symptom {
    /// Create an unclassified symptom
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        recorded_at: DateTime<Utc>,
        severity: Rating,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            name: name.into(),
            recorded_at,
            severity,
            category: None,
            symptom_type: None,
            duration_minutes: None,
            triggers: Vec::new(),
        }
    }

    /// Set the body system
    #[must_use]
    pub const fn with_category(mut self, category: SymptomCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the specific kind
    #[must_use]
    pub const fn with_type(mut self, symptom_type: SymptomType) -> Self {
        self.symptom_type = Some(symptom_type);
        self
    }

    /// Set the duration
    #[must_use]
    pub const fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Attach suspected triggers
    #[must_use]
    pub fn with_triggers<I, T>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.triggers = triggers.into_iter().map(Into::into).collect();
        self
    }
}

impl HealthRecord for Symptom {
    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.recorded_at)
    }
}
