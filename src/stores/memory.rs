// ABOUTME: In-memory record stores keyed by user on a concurrent DashMap
// ABOUTME: Reference implementation of the snapshot contract for tests, benches, and demos
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{RecordStore, RecordStores};
use crate::errors::AppResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use gut_core::models::{
    BowelMovement, HealthRecord, HealthRecords, Meal, MealRelation, Medication, Symptom,
};
use std::sync::Arc;

/// Records of one type grouped by user
///
/// `DashMap` shards its locks, so concurrent reads for different users never
/// contend. Records without a timestamp are listed after timestamped ones.
pub struct InMemoryRecordStore<T: HealthRecord> {
    records: DashMap<String, Vec<T>>,
}

impl<T: HealthRecord> InMemoryRecordStore<T> {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Add one record under its owner
    pub fn insert(&self, record: T) {
        let mut entry = self.records.entry(record.user_id().to_owned()).or_default();
        entry.push(record);
        entry.sort_by_key(|r| (r.timestamp().is_none(), r.timestamp()));
    }

    /// Add many records
    pub fn extend(&self, records: impl IntoIterator<Item = T>) {
        for record in records {
            self.insert(record);
        }
    }

    /// Number of records stored for `user_id`
    #[must_use]
    pub fn count_for(&self, user_id: &str) -> usize {
        self.records.get(user_id).map_or(0, |r| r.len())
    }
}

impl<T: HealthRecord> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: HealthRecord> RecordStore<T> for InMemoryRecordStore<T> {
    async fn get_by_date_range(
        &self,
        user_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<T>> {
        Ok(self.records.get(user_id).map_or_else(Vec::new, |records| {
            records
                .iter()
                .filter(|r| r.timestamp().is_some_and(|t| t >= start && t <= end))
                .cloned()
                .collect()
        }))
    }

    async fn get_by_user_id(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
    ) -> AppResult<Vec<T>> {
        Ok(self.records.get(user_id).map_or_else(Vec::new, |records| {
            records.iter().skip(offset).take(limit).cloned().collect()
        }))
    }
}

/// One in-memory store per record type
#[derive(Clone, Default)]
pub struct InMemoryStores {
    /// Bowel movements
    pub movements: Arc<InMemoryRecordStore<BowelMovement>>,
    /// Meals
    pub meals: Arc<InMemoryRecordStore<Meal>>,
    /// Symptoms
    pub symptoms: Arc<InMemoryRecordStore<Symptom>>,
    /// Medications
    pub medications: Arc<InMemoryRecordStore<Medication>>,
    /// Meal relations
    pub relations: Arc<InMemoryRecordStore<MealRelation>>,
}

impl InMemoryStores {
    /// Create empty stores
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every record of a snapshot
    pub fn load(&self, records: HealthRecords) {
        self.movements.extend(records.movements);
        self.meals.extend(records.meals);
        self.symptoms.extend(records.symptoms);
        self.medications.extend(records.medications);
        self.relations.extend(records.relations);
    }

    /// Trait-object view for the analytics service
    #[must_use]
    pub fn record_stores(&self) -> RecordStores {
        RecordStores {
            movements: self.movements.clone(),
            meals: self.meals.clone(),
            symptoms: self.symptoms.clone(),
            medications: self.medications.clone(),
            relations: self.relations.clone(),
        }
    }
}
