// ABOUTME: Data aggregation from raw health records into per-domain summaries and daily points
// ABOUTME: Computes consistency, regularity, nutrition, and compliance scores via the strategy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Aggregator
//!
//! Turns the raw record lists of one snapshot into domain summaries and one
//! [`DailyDataPoint`] per calendar day. Empty input always yields a
//! zero-valued summary, never an error.

use crate::config::{AnalyticsStrategy, DefaultStrategy, ScoringConfig};
use crate::statistics::{mean, percentage, StatisticalSummary};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use gut_core::models::{
    BowelMovement, BristolType, DateRange, Meal, MealCategory, Medication, MedicationCategory,
    Symptom, SymptomCategory, SymptomType,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Aggregated bowel movement statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BowelMovementSummary {
    /// Number of movements
    pub total_count: usize,
    /// Movements per day between the first and last record
    pub average_per_day: f64,
    /// Count per Bristol type
    pub bristol_distribution: BTreeMap<u8, u32>,
    /// Most frequent Bristol type, lower type on ties
    pub most_common_bristol: Option<u8>,
    /// Mean Bristol type
    pub average_bristol: f64,
    /// Mean pain rating
    pub average_pain: f64,
    /// Mean strain rating
    pub average_strain: f64,
    /// Mean satisfaction rating
    pub average_satisfaction: f64,
    /// Healthy-band share penalized by type churn, `[0, 1]`
    pub consistency_score: f64,
    /// Closeness of inter-movement gaps to the ideal cadence, `[0, 1]`
    pub regularity_score: f64,
}

/// Aggregated meal statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealSummary {
    /// Number of meals
    pub total_meals: usize,
    /// Meals per day between the first and last record
    pub average_per_day: f64,
    /// Sum of calories
    pub total_calories: u64,
    /// Mean calories per meal
    pub average_calories: f64,
    /// Spread of calories per meal
    pub calorie_spread: StatisticalSummary,
    /// Share of fiber-rich meals, 0-100
    pub fiber_rich_percent: f64,
    /// Meals with a spice level
    pub spicy_meal_count: usize,
    /// Meals containing dairy
    pub dairy_meal_count: usize,
    /// Meals containing gluten
    pub gluten_meal_count: usize,
    /// Meals at or above the large-meal threshold
    pub large_meal_count: usize,
    /// Count per meal slot
    pub category_distribution: BTreeMap<MealCategory, u32>,
    /// Calorie proximity and fiber blend, `[0, 1]`
    pub nutrition_score: f64,
}

/// Aggregated symptom statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomSummary {
    /// Number of symptoms
    pub total_symptoms: usize,
    /// Symptoms per day between the first and last record
    pub average_per_day: f64,
    /// Mean severity rating
    pub average_severity: f64,
    /// Spread of severity ratings
    pub severity_spread: StatisticalSummary,
    /// Count per body system
    pub category_distribution: BTreeMap<SymptomCategory, u32>,
    /// Count per symptom kind
    pub type_distribution: BTreeMap<SymptomType, u32>,
    /// Most frequent body system
    pub most_common_category: Option<SymptomCategory>,
    /// Most frequent symptom kind
    pub most_common_type: Option<SymptomType>,
}

/// Aggregated medication statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationSummary {
    /// Medications on file
    pub total_medications: usize,
    /// Currently active medications
    pub active_medications: usize,
    /// Medications taken only when needed
    pub as_needed_medications: usize,
    /// Count per therapeutic class
    pub category_distribution: BTreeMap<MedicationCategory, u32>,
    /// Most frequent therapeutic class
    pub most_common_category: Option<MedicationCategory>,
    /// Share of medications taken within the compliance window, `[0, 1]`
    pub compliance_score: f64,
}

/// Meal attribute examined for downstream effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealTrigger {
    /// Meal with a spice level
    Spicy,
    /// Meal containing dairy
    Dairy,
    /// Meal containing gluten
    Gluten,
    /// Fiber-rich meal
    FiberRich,
    /// Meal at or above the large-meal threshold
    LargeMeal,
}

impl MealTrigger {
    /// Every trigger in declaration order
    pub const ALL: [Self; 5] = [
        Self::Spicy,
        Self::Dairy,
        Self::Gluten,
        Self::FiberRich,
        Self::LargeMeal,
    ];

    /// Stable key used in factor identifiers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Spicy => "spicy",
            Self::Dairy => "dairy",
            Self::Gluten => "gluten",
            Self::FiberRich => "fiber_rich",
            Self::LargeMeal => "large_meal",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Spicy => "spicy meals",
            Self::Dairy => "dairy",
            Self::Gluten => "gluten",
            Self::FiberRich => "fiber-rich meals",
            Self::LargeMeal => "large meals",
        }
    }

    /// Whether `meal` carries this trigger
    #[must_use]
    pub fn matches(self, meal: &Meal, scoring: &ScoringConfig) -> bool {
        match self {
            Self::Spicy => meal.is_spicy(),
            Self::Dairy => meal.dairy,
            Self::Gluten => meal.gluten,
            Self::FiberRich => meal.fiber_rich,
            Self::LargeMeal => meal.calories >= scoring.large_meal_calories,
        }
    }
}

/// Overlapping meal buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealGroup {
    /// At or above the large-meal threshold
    Large,
    /// Has a spice level
    Spicy,
    /// Contains dairy
    Dairy,
    /// Contains gluten
    Gluten,
    /// Fiber-rich and at or below the healthy calorie ceiling
    Healthy,
}

impl MealGroup {
    /// Every group in declaration order
    pub const ALL: [Self; 5] = [
        Self::Large,
        Self::Spicy,
        Self::Dairy,
        Self::Gluten,
        Self::Healthy,
    ];
}

/// Per-calendar-day aggregate shared by trend and pattern analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDataPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Bowel movements logged
    pub movement_count: u32,
    /// Mean Bristol type
    pub bristol_average: Option<f64>,
    /// Mean pain rating
    pub pain_average: Option<f64>,
    /// Mean strain rating
    pub strain_average: Option<f64>,
    /// Mean satisfaction rating
    pub satisfaction_average: Option<f64>,
    /// Meals logged
    pub meal_count: u32,
    /// Sum of calories
    pub total_calories: u64,
    /// Fiber-rich meals
    pub fiber_rich_meal_count: u32,
    /// Spicy meals
    pub spicy_meal_count: u32,
    /// Meals containing dairy
    pub dairy_meal_count: u32,
    /// Meals containing gluten
    pub gluten_meal_count: u32,
    /// Large meals
    pub large_meal_count: u32,
    /// Symptoms logged
    pub symptom_count: u32,
    /// Mean symptom severity
    pub symptom_severity_average: Option<f64>,
    /// Medications whose course covers the day
    pub active_medication_count: u32,
    /// For each trigger eaten that day, how many of those meals were
    /// followed by a symptom within the follow-up window
    pub trigger_followups: BTreeMap<MealTrigger, u32>,
}

impl DailyDataPoint {
    /// Whether anything at all was logged that day
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.movement_count > 0 || self.meal_count > 0 || self.symptom_count > 0
    }

    /// Whether the day falls on Saturday or Sunday
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        self.date.weekday().number_from_monday() >= 6
    }

    /// Records behind this point
    #[must_use]
    pub const fn record_count(&self) -> u32 {
        self.movement_count + self.meal_count + self.symptom_count
    }
}

/// Aggregation engine
pub struct DataAggregator<S: AnalyticsStrategy = DefaultStrategy> {
    strategy: S,
}

impl DataAggregator {
    /// Create an aggregator backed by the global configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: DefaultStrategy,
        }
    }
}

impl Default for DataAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AnalyticsStrategy> DataAggregator<S> {
    /// Create an aggregator with a custom strategy
    #[must_use]
    pub const fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Strategy in use
    #[must_use]
    pub const fn strategy(&self) -> &S {
        &self.strategy
    }

    /// Summarize bowel movements
    #[must_use]
    pub fn aggregate_bowel_movements(&self, movements: &[BowelMovement]) -> BowelMovementSummary {
        if movements.is_empty() {
            return BowelMovementSummary::default();
        }

        let mut ordered: Vec<&BowelMovement> = movements.iter().collect();
        ordered.sort_by_key(|m| m.recorded_at);

        let mut bristol_distribution = BTreeMap::new();
        for movement in &ordered {
            *bristol_distribution
                .entry(movement.bristol_type.value())
                .or_insert(0) += 1;
        }

        let types: Vec<BristolType> = ordered.iter().map(|m| m.bristol_type).collect();
        let times: Vec<DateTime<Utc>> = ordered.iter().map(|m| m.recorded_at).collect();
        let bristol: Vec<f64> = types.iter().map(|t| t.as_f64()).collect();
        let pain: Vec<f64> = ordered.iter().map(|m| m.pain.as_f64()).collect();
        let strain: Vec<f64> = ordered.iter().map(|m| m.strain.as_f64()).collect();
        let satisfaction: Vec<f64> = ordered.iter().map(|m| m.satisfaction.as_f64()).collect();

        let summary = BowelMovementSummary {
            total_count: ordered.len(),
            average_per_day: self.per_day(ordered.len(), &times),
            most_common_bristol: most_common(&bristol_distribution),
            bristol_distribution,
            average_bristol: self.strategy.round_score(mean(&bristol)),
            average_pain: self.strategy.round_score(mean(&pain)),
            average_strain: self.strategy.round_score(mean(&strain)),
            average_satisfaction: self.strategy.round_score(mean(&satisfaction)),
            consistency_score: self.strategy.consistency_score(&types),
            regularity_score: self.strategy.regularity_score(&times),
        };
        debug!(
            count = summary.total_count,
            consistency = summary.consistency_score,
            regularity = summary.regularity_score,
            "Aggregated bowel movements"
        );
        summary
    }

    /// Summarize meals
    #[must_use]
    pub fn aggregate_meals(&self, meals: &[Meal]) -> MealSummary {
        if meals.is_empty() {
            return MealSummary::default();
        }

        let scoring = self.strategy.scoring();
        let mut times: Vec<DateTime<Utc>> = meals.iter().map(|m| m.meal_time).collect();
        times.sort_unstable();

        let total_calories: u64 = meals.iter().map(|m| u64::from(m.calories)).sum();
        let calories: Vec<f64> = meals.iter().map(|m| f64::from(m.calories)).collect();
        let average_calories = total_calories as f64 / meals.len() as f64;
        let fiber_rich = meals.iter().filter(|m| m.fiber_rich).count();
        let fiber_ratio = fiber_rich as f64 / meals.len() as f64;

        let mut category_distribution = BTreeMap::new();
        for category in meals.iter().filter_map(|m| m.category) {
            *category_distribution.entry(category).or_insert(0) += 1;
        }

        let summary = MealSummary {
            total_meals: meals.len(),
            average_per_day: self.per_day(meals.len(), &times),
            total_calories,
            average_calories: self.strategy.round_score(average_calories),
            calorie_spread: StatisticalSummary::from_values(&calories),
            fiber_rich_percent: self.strategy.round_score(percentage(fiber_rich, meals.len())),
            spicy_meal_count: count_trigger(meals, MealTrigger::Spicy, scoring),
            dairy_meal_count: count_trigger(meals, MealTrigger::Dairy, scoring),
            gluten_meal_count: count_trigger(meals, MealTrigger::Gluten, scoring),
            large_meal_count: count_trigger(meals, MealTrigger::LargeMeal, scoring),
            category_distribution,
            nutrition_score: self.strategy.nutrition_score(average_calories, fiber_ratio),
        };
        debug!(
            count = summary.total_meals,
            nutrition = summary.nutrition_score,
            "Aggregated meals"
        );
        summary
    }

    /// Summarize symptoms
    #[must_use]
    pub fn aggregate_symptoms(&self, symptoms: &[Symptom]) -> SymptomSummary {
        if symptoms.is_empty() {
            return SymptomSummary::default();
        }

        let mut times: Vec<DateTime<Utc>> = symptoms.iter().map(|s| s.recorded_at).collect();
        times.sort_unstable();
        let severities: Vec<f64> = symptoms.iter().map(|s| s.severity.as_f64()).collect();

        let mut category_distribution = BTreeMap::new();
        for category in symptoms.iter().filter_map(|s| s.category) {
            *category_distribution.entry(category).or_insert(0) += 1;
        }
        let mut type_distribution = BTreeMap::new();
        for symptom_type in symptoms.iter().filter_map(|s| s.symptom_type) {
            *type_distribution.entry(symptom_type).or_insert(0) += 1;
        }

        SymptomSummary {
            total_symptoms: symptoms.len(),
            average_per_day: self.per_day(symptoms.len(), &times),
            average_severity: self.strategy.round_score(mean(&severities)),
            severity_spread: StatisticalSummary::from_values(&severities),
            most_common_category: most_common(&category_distribution),
            most_common_type: most_common(&type_distribution),
            category_distribution,
            type_distribution,
        }
    }

    /// Summarize medications as of `now`
    #[must_use]
    pub fn aggregate_medications(
        &self,
        medications: &[Medication],
        now: DateTime<Utc>,
    ) -> MedicationSummary {
        if medications.is_empty() {
            return MedicationSummary::default();
        }

        let mut category_distribution = BTreeMap::new();
        for category in medications.iter().filter_map(|m| m.category) {
            *category_distribution.entry(category).or_insert(0) += 1;
        }

        MedicationSummary {
            total_medications: medications.len(),
            active_medications: medications.iter().filter(|m| m.is_active).count(),
            as_needed_medications: medications.iter().filter(|m| m.is_as_needed).count(),
            most_common_category: most_common(&category_distribution),
            category_distribution,
            compliance_score: self.strategy.compliance_score(medications, now),
        }
    }

    /// Build one point per calendar day of `range`, in date order
    #[must_use]
    pub fn aggregate_daily_data(
        &self,
        movements: &[BowelMovement],
        meals: &[Meal],
        symptoms: &[Symptom],
        medications: &[Medication],
        range: &DateRange,
    ) -> Vec<DailyDataPoint> {
        let movements_by_day = bucket_by_day(
            movements.iter().filter(|m| range.contains(m.recorded_at)),
            |m| m.recorded_at,
        );
        let meals_by_day = bucket_by_day(
            meals.iter().filter(|m| range.contains(m.meal_time)),
            |m| m.meal_time,
        );
        let symptoms_by_day = bucket_by_day(
            symptoms.iter().filter(|s| range.contains(s.recorded_at)),
            |s| s.recorded_at,
        );

        let mut symptom_times: Vec<DateTime<Utc>> =
            symptoms.iter().map(|s| s.recorded_at).collect();
        symptom_times.sort_unstable();
        let followup = Duration::hours(self.strategy.patterns().followup_window_hours);

        let points: Vec<DailyDataPoint> = range
            .dates()
            .into_par_iter()
            .map(|date| {
                let day_movements = movements_by_day.get(&date).map_or(&[][..], Vec::as_slice);
                let day_meals = meals_by_day.get(&date).map_or(&[][..], Vec::as_slice);
                let day_symptoms = symptoms_by_day.get(&date).map_or(&[][..], Vec::as_slice);
                self.build_point(
                    date,
                    DayRecords {
                        movements: day_movements,
                        meals: day_meals,
                        symptoms: day_symptoms,
                        medications,
                    },
                    &symptom_times,
                    followup,
                )
            })
            .collect();

        debug!(days = points.len(), "Aggregated daily data points");
        points
    }

    /// Bucket meals into overlapping groups; every group key is present
    #[must_use]
    pub fn group_meals_by_type<'a>(&self, meals: &'a [Meal]) -> BTreeMap<MealGroup, Vec<&'a Meal>> {
        let scoring = self.strategy.scoring();
        let mut groups: BTreeMap<MealGroup, Vec<&Meal>> =
            MealGroup::ALL.iter().map(|g| (*g, Vec::new())).collect();

        for meal in meals {
            let memberships = [
                (MealGroup::Large, meal.calories >= scoring.large_meal_calories),
                (MealGroup::Spicy, meal.is_spicy()),
                (MealGroup::Dairy, meal.dairy),
                (MealGroup::Gluten, meal.gluten),
                (
                    MealGroup::Healthy,
                    meal.fiber_rich && meal.calories <= scoring.healthy_meal_max_calories,
                ),
            ];
            for (group, member) in memberships {
                if member {
                    groups.entry(group).or_default().push(meal);
                }
            }
        }
        groups
    }

    /// Group movements by ISO week (`YYYY-Www`)
    #[must_use]
    pub fn group_movements_by_week<'a>(
        &self,
        movements: &'a [BowelMovement],
    ) -> BTreeMap<String, Vec<&'a BowelMovement>> {
        let mut weeks: BTreeMap<String, Vec<&BowelMovement>> = BTreeMap::new();
        for movement in movements {
            let week = movement.recorded_at.iso_week();
            weeks
                .entry(format!("{}-W{:02}", week.year(), week.week()))
                .or_default()
                .push(movement);
        }
        for entries in weeks.values_mut() {
            entries.sort_by_key(|m| m.recorded_at);
        }
        weeks
    }

    fn per_day(&self, count: usize, sorted_times: &[DateTime<Utc>]) -> f64 {
        let (Some(first), Some(last)) = (sorted_times.first(), sorted_times.last()) else {
            return 0.0;
        };
        let days = (*last - *first).num_seconds() as f64 / SECONDS_PER_DAY;
        self.strategy.round_score(count as f64 / days.max(1.0))
    }

    fn build_point(
        &self,
        date: NaiveDate,
        day: DayRecords<'_>,
        symptom_times: &[DateTime<Utc>],
        followup: Duration,
    ) -> DailyDataPoint {
        let scoring = self.strategy.scoring();
        let average = |values: Vec<f64>| {
            (!values.is_empty()).then(|| self.strategy.round_score(mean(&values)))
        };
        let count_meals = |trigger: MealTrigger| {
            count_u32(day.meals.iter().filter(|m| trigger.matches(m, scoring)).count())
        };

        let mut trigger_followups = BTreeMap::new();
        for trigger in MealTrigger::ALL {
            let mut seen = false;
            let mut followed = 0;
            for meal in day.meals.iter().filter(|m| trigger.matches(m, scoring)) {
                seen = true;
                if followed_by_symptom(meal.meal_time, symptom_times, followup) {
                    followed += 1;
                }
            }
            if seen {
                trigger_followups.insert(trigger, followed);
            }
        }

        DailyDataPoint {
            date,
            movement_count: count_u32(day.movements.len()),
            bristol_average: average(day.movements.iter().map(|m| m.bristol_type.as_f64()).collect()),
            pain_average: average(day.movements.iter().map(|m| m.pain.as_f64()).collect()),
            strain_average: average(day.movements.iter().map(|m| m.strain.as_f64()).collect()),
            satisfaction_average: average(
                day.movements.iter().map(|m| m.satisfaction.as_f64()).collect(),
            ),
            meal_count: count_u32(day.meals.len()),
            total_calories: day.meals.iter().map(|m| u64::from(m.calories)).sum(),
            fiber_rich_meal_count: count_meals(MealTrigger::FiberRich),
            spicy_meal_count: count_meals(MealTrigger::Spicy),
            dairy_meal_count: count_meals(MealTrigger::Dairy),
            gluten_meal_count: count_meals(MealTrigger::Gluten),
            large_meal_count: count_meals(MealTrigger::LargeMeal),
            symptom_count: count_u32(day.symptoms.len()),
            symptom_severity_average: average(
                day.symptoms.iter().map(|s| s.severity.as_f64()).collect(),
            ),
            active_medication_count: count_u32(
                day.medications.iter().filter(|m| m.is_active_on(date)).count(),
            ),
            trigger_followups,
        }
    }
}

/// Records falling on one calendar day
struct DayRecords<'a> {
    movements: &'a [&'a BowelMovement],
    meals: &'a [&'a Meal],
    symptoms: &'a [&'a Symptom],
    medications: &'a [Medication],
}

/// Whether any symptom lands in `(meal_time, meal_time + window]`
pub(crate) fn followed_by_symptom(
    meal_time: DateTime<Utc>,
    sorted_symptom_times: &[DateTime<Utc>],
    window: Duration,
) -> bool {
    let next = sorted_symptom_times.partition_point(|t| *t <= meal_time);
    sorted_symptom_times
        .get(next)
        .is_some_and(|t| *t - meal_time <= window)
}

fn bucket_by_day<'a, T, I, F>(records: I, timestamp: F) -> BTreeMap<NaiveDate, Vec<&'a T>>
where
    I: Iterator<Item = &'a T>,
    F: Fn(&T) -> DateTime<Utc>,
{
    let mut days: BTreeMap<NaiveDate, Vec<&T>> = BTreeMap::new();
    for record in records {
        days.entry(timestamp(record).date_naive())
            .or_default()
            .push(record);
    }
    days
}

fn count_trigger(meals: &[Meal], trigger: MealTrigger, scoring: &ScoringConfig) -> usize {
    meals.iter().filter(|m| trigger.matches(m, scoring)).count()
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Most frequent key, the smallest key winning ties
fn most_common<K: Copy + Ord>(distribution: &BTreeMap<K, u32>) -> Option<K> {
    let mut best: Option<(K, u32)> = None;
    for (key, count) in distribution {
        if best.is_none_or(|(_, best_count)| *count > best_count) {
            best = Some((*key, *count));
        }
    }
    best.map(|(key, _)| key)
}
