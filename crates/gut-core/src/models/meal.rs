// ABOUTME: Meal record with calories and dietary trigger flags
// ABOUTME: Spice level is optional so "not spicy" and "not recorded" stay distinct
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::enums::MealCategory;
use super::scales::Rating;
use super::HealthRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged meal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    /// Record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Meal name
    pub name: String,
    /// When the meal was eaten
    pub meal_time: DateTime<Utc>,
    /// Meal slot
    pub category: Option<MealCategory>,
    /// Cuisine, free text
    pub cuisine: Option<String>,
    /// Estimated calories
    pub calories: u32,
    /// Spice level, absent when the meal was not spicy or not rated
    pub spicy_level: Option<Rating>,
    /// Whether the meal was rich in fiber
    pub fiber_rich: bool,
    /// Whether the meal contained dairy
    pub dairy: bool,
    /// Whether the meal contained gluten
    pub gluten: bool,
}

impl Meal {
    /// Create a meal with no trigger flags set
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        meal_time: DateTime<Utc>,
        calories: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            name: name.into(),
            meal_time,
            category: None,
            cuisine: None,
            calories,
            spicy_level: None,
            fiber_rich: false,
            dairy: false,
            gluten: false,
        }
    }

    /// Set the meal slot
    #[must_use]
    pub const fn with_category(mut self, category: MealCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the cuisine
    #[must_use]
    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    /// Set the spice level
    #[must_use]
    pub const fn with_spicy_level(mut self, level: Rating) -> Self {
        self.spicy_level = Some(level);
        self
    }

    /// Flag the meal as fiber-rich
    #[must_use]
    pub const fn with_fiber_rich(mut self, fiber_rich: bool) -> Self {
        self.fiber_rich = fiber_rich;
        self
    }

    /// Flag the meal as containing dairy
    #[must_use]
    pub const fn with_dairy(mut self, dairy: bool) -> Self {
        self.dairy = dairy;
        self
    }

    /// Flag the meal as containing gluten
    #[must_use]
    pub const fn with_gluten(mut self, gluten: bool) -> Self {
        self.gluten = gluten;
        self
    }

    /// Whether a spice level was recorded
    #[must_use]
    pub const fn is_spicy(&self) -> bool {
        self.spicy_level.is_some()
    }
}

impl HealthRecord for Meal {
    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        Some(self.meal_time)
    }
}
