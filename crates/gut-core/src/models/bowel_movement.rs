// ABOUTME: Bowel movement record with Bristol type and comfort ratings
// ABOUTME: Builder-style setters keep optional attributes explicit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::enums::{Color, Consistency, SmellLevel, Volume};
use super::scales::{BristolType, Rating};
use super::HealthRecord;
use crate::constants::scales::{DEFAULT_DISCOMFORT, DEFAULT_SATISFACTION};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged bowel movement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BowelMovement {
    /// Record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// When the movement happened
    pub recorded_at: DateTime<Utc>,
    /// Bristol stool form
    pub bristol_type: BristolType,
    /// Pain during the movement
    pub pain: Rating,
    /// Straining effort
    pub strain: Rating,
    /// How complete the movement felt
    pub satisfaction: Rating,
    /// Reported volume
    pub volume: Option<Volume>,
    /// Reported color
    pub color: Option<Color>,
    /// Reported consistency
    pub consistency: Option<Consistency>,
    /// Whether the stool floated
    pub floaters: bool,
    /// Reported odor strength
    pub smell_level: Option<SmellLevel>,
}

impl BowelMovement {
    /// Create a movement with default comfort ratings (pain 1, strain 1, satisfaction 5)
    pub fn new(
        user_id: impl Into<String>,
        recorded_at: DateTime<Utc>,
        bristol_type: BristolType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            recorded_at,
            bristol_type,
            pain: Rating::clamped(DEFAULT_DISCOMFORT),
            strain: Rating::clamped(DEFAULT_DISCOMFORT),
            satisfaction: Rating::clamped(DEFAULT_SATISFACTION),
            volume: None,
            color: None,
            consistency: None,
            floaters: false,
            smell_level: None,
        }
    }

    /// Set the pain rating
    #[must_use]
    pub const fn with_pain(mut self, pain: Rating) -> Self {
        self.pain = pain;
        self
    }

    /// Set the strain rating
    #[must_use]
    pub const fn with_strain(mut self, strain: Rating) -> Self {
        self.strain = strain;
        self
    }

    /// Set the satisfaction rating
    #[must_use]
    pub const fn with_satisfaction(mut self, satisfaction: Rating) -> Self {
        self.satisfaction = satisfaction;
        self
    }

    /// Set the reported volume
    #[must_use]
    pub const fn with_volume(mut self, volume: Volume) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Set the reported color
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the reported consistency
    #[must_use]
    pub const fn with_consistency(mut self, consistency: Consistency) -> Self {
        self.consistency = Some(consistency);
        self
    }

    /// Set the reported odor strength
    #[must_use]
    pub const fn with_smell_level(mut self, smell_level: SmellLevel) -> Self {
        self.smell_level = Some(smell_level);
        self
    }

    /// Mark the stool as floating
    #[must_use]
    pub const fn with_floaters(mut self, floaters: bool) -> Self {
        self.floaters = floaters;
        self
    }
}

impl HealthRecord for BowelMovement {
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
