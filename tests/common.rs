// ABOUTME: Shared test utilities and record fixtures for integration tests
// ABOUTME: Provides quiet logging setup, fixed instants, and record builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `gut_analytics`
//!
//! Every fixture is anchored on Monday 2025-03-03 so weekday and weekend
//! behavior is predictable.

use chrono::{DateTime, Duration, TimeZone, Utc};
use gut_analytics::models::{
    BowelMovement, BristolType, DateRange, HealthRecords, Meal, Medication, Rating, Symptom,
};
use std::env;
use std::sync::Once;
use tracing::Level;

pub const USER: &str = "user-1";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Monday 2025-03-03 at midnight UTC
pub fn base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 3, 0, 0, 0).unwrap()
}

/// `day` days and `hour` hours after [`base`]
pub fn at(day: i64, hour: i64) -> DateTime<Utc> {
    base() + Duration::days(day) + Duration::hours(hour)
}

/// Range covering `days` whole days from [`base`]
pub fn range_days(days: i64) -> DateRange {
    DateRange::new(base(), at(days, 0) - Duration::seconds(1)).unwrap()
}

pub fn bristol(value: u8) -> BristolType {
    BristolType::new(value).unwrap()
}

pub fn rating(value: u8) -> Rating {
    Rating::new(value).unwrap()
}

pub fn movement(day: i64, hour: i64, bristol_type: u8) -> BowelMovement {
    BowelMovement::new(USER, at(day, hour), bristol(bristol_type))
}

pub fn meal(day: i64, hour: i64, calories: u32) -> Meal {
    Meal::new(USER, "meal", at(day, hour), calories)
}

pub fn spicy_meal(day: i64, hour: i64) -> Meal {
    Meal::new(USER, "curry", at(day, hour), 650).with_spicy_level(rating(7))
}

pub fn fiber_meal(day: i64, hour: i64) -> Meal {
    Meal::new(USER, "lentil salad", at(day, hour), 550).with_fiber_rich(true)
}

pub fn symptom(day: i64, hour: i64, severity: u8) -> Symptom {
    Symptom::new(USER, "bloating", at(day, hour), rating(severity))
}

pub fn medication(name: &str) -> Medication {
    Medication::new(USER, name, "10mg", "daily")
}

/// Two weeks of steady habits: one healthy movement and three balanced
/// meals a day, fiber at lunch, no symptoms
pub fn healthy_records(days: i64) -> HealthRecords {
    let mut records = HealthRecords::default();
    for day in 0..days {
        records.movements.push(movement(day, 8, 4));
        records.meals.push(meal(day, 7, 500));
        records.meals.push(fiber_meal(day, 12));
        records.meals.push(meal(day, 19, 650));
    }
    records
}

/// Daily spicy dinners followed three hours later by a severe symptom
pub fn spicy_symptom_records(days: i64) -> HealthRecords {
    let mut records = HealthRecords::default();
    for day in 0..days {
        records.movements.push(movement(day, 8, 6).with_pain(rating(6)));
        records.meals.push(spicy_meal(day, 12));
        records.symptoms.push(symptom(day, 15, 7));
    }
    records
}
