// ABOUTME: Read-only record store contract consumed by the analytics service
// ABOUTME: One generic async trait per record type plus the bundle of five stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Record Stores
//!
//! The service only reads snapshots. Implementations must be safe for
//! concurrent reads, since one request fetches every domain at once.

/// `DashMap`-backed reference implementation
pub mod memory;

pub use memory::{InMemoryRecordStore, InMemoryStores};

use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gut_core::models::{BowelMovement, HealthRecord, Meal, MealRelation, Medication, Symptom};
use std::sync::Arc;

/// Snapshot provider for one record type
#[async_trait]
pub trait RecordStore<T: HealthRecord>: Send + Sync {
    /// Records of `user_id` timestamped within `[start, end]`, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails
    async fn get_by_date_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<T>>;

    /// One page of `user_id`'s records, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage fails
    async fn get_by_user_id(&self, user_id: &str, limit: usize, offset: usize)
        -> AppResult<Vec<T>>;
}

/// Store of user-asserted meal relations
pub type RelationStore = dyn RecordStore<MealRelation>;

/// The five stores the analytics service reads from
#[derive(Clone)]
pub struct RecordStores {
    /// Bowel movements
    pub movements: Arc<dyn RecordStore<BowelMovement>>,
    /// Meals
    pub meals: Arc<dyn RecordStore<Meal>>,
    /// Symptoms
    pub symptoms: Arc<dyn RecordStore<Symptom>>,
    /// Medications
    pub medications: Arc<dyn RecordStore<Medication>>,
    /// Meal relations
    pub relations: Arc<RelationStore>,
}
