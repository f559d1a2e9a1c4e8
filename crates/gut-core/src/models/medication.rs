// ABOUTME: Medication record with schedule, classification, and last-taken timestamp
// ABOUTME: Active-on-date checks use the optional start and end dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::enums::{MedicationCategory, MedicationForm, MedicationRoute};
use super::HealthRecord;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A medication on file for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medication {
    /// Record identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: String,
    /// Medication name
    pub name: String,
    /// Dose description, e.g. "10mg"
    pub dosage: String,
    /// Schedule description, e.g. "twice daily"
    pub frequency: String,
    /// Therapeutic class
    pub category: Option<MedicationCategory>,
    /// Physical form
    pub form: Option<MedicationForm>,
    /// Administration route
    pub route: Option<MedicationRoute>,
    /// Whether the user is currently on this medication
    pub is_active: bool,
    /// Taken only when needed rather than on a schedule
    pub is_as_needed: bool,
    /// First day of the course
    pub start_date: Option<DateTime<Utc>>,
    /// Last day of the course
    pub end_date: Option<DateTime<Utc>>,
    /// Most recent dose
    pub taken_at: Option<DateTime<Utc>>,
}

impl Medication {
    /// Create an active, scheduled medication
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        dosage: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            name: name.into(),
            dosage: dosage.into(),
            frequency: frequency.into(),
            category: None,
            form: None,
            route: None,
            is_active: true,
            is_as_needed: false,
            start_date: None,
            end_date: None,
            taken_at: None,
        }
    }

    /// Set the therapeutic class
    #[must_use]
    pub const fn with_category(mut self, category: MedicationCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the physical form
    #[must_use]
    pub const fn with_form(mut self, form: MedicationForm) -> Self {
        self.form = Some(form);
        self
    }

    /// Set the administration route
    #[must_use]
    pub const fn with_route(mut self, route: MedicationRoute) -> Self {
        self.route = Some(route);
        self
    }

    /// Set whether the medication is current
    #[must_use]
    pub const fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    /// Mark the medication as taken only when needed
    #[must_use]
    pub const fn with_as_needed(mut self, is_as_needed: bool) -> Self {
        self.is_as_needed = is_as_needed;
        self
    }

    /// Set the first day of the course
    #[must_use]
    pub const fn with_start_date(mut self, start_date: DateTime<Utc>) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Set the last day of the course
    #[must_use]
    pub const fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Record the most recent dose
    #[must_use]
    pub const fn with_taken_at(mut self, taken_at: DateTime<Utc>) -> Self {
        self.taken_at = Some(taken_at);
        self
    }

    /// Whether the course covers `date`
    #[must_use]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.is_active
            && self.start_date.is_none_or(|start| start.date_naive() <= date)
            && self.end_date.is_none_or(|end| end.date_naive() >= date)
    }
}

impl HealthRecord for Medication {
    fn id(&self) -> Uuid {
        self.id
    }

    fn user_id(&self) -> &str {
        &self.user_id
    }

    fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.start_date.or(self.taken_at)
    }
}
