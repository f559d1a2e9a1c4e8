// ABOUTME: Tests for domain summaries, daily data points, and record grouping
// ABOUTME: Validates scoring heuristics, empty-input summaries, and trigger follow-ups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

mod common;

use chrono::Duration;
use common::{
    at, fiber_meal, healthy_records, meal, medication, movement, range_days, rating,
    spicy_meal, spicy_symptom_records, symptom, USER,
};
use gut_analytics::intelligence::{
    BowelMovementSummary, ConfiguredStrategy, DataAggregator, MealGroup, MealSummary,
    MealTrigger, MedicationSummary, SymptomSummary,
};
use gut_analytics::models::{Meal, MealCategory, SymptomCategory};

#[test]
fn test_empty_inputs_give_zero_summaries() {
    common::init_test_logging();
    let aggregator = DataAggregator::new();

    assert_eq!(
        aggregator.aggregate_bowel_movements(&[]),
        BowelMovementSummary::default()
    );
    assert_eq!(aggregator.aggregate_meals(&[]), MealSummary::default());
    assert_eq!(aggregator.aggregate_symptoms(&[]), SymptomSummary::default());
    assert_eq!(
        aggregator.aggregate_medications(&[], at(0, 0)),
        MedicationSummary::default()
    );
}

#[test]
fn test_uniform_bristol_types_are_fully_consistent() {
    let aggregator = DataAggregator::new();
    let movements = vec![movement(0, 8, 4), movement(1, 8, 4), movement(2, 8, 4)];

    let summary = aggregator.aggregate_bowel_movements(&movements);

    assert_eq!(summary.total_count, 3);
    assert_eq!(summary.consistency_score, 1.0);
    assert_eq!(summary.regularity_score, 1.0);
    assert_eq!(summary.most_common_bristol, Some(4));
    assert_eq!(summary.average_per_day, 1.5);
}

#[test]
fn test_alternating_bristol_types_are_inconsistent() {
    let aggregator = DataAggregator::new();
    let movements = vec![movement(0, 8, 1), movement(1, 8, 7), movement(2, 8, 1)];

    let summary = aggregator.aggregate_bowel_movements(&movements);

    assert_eq!(summary.consistency_score, 0.0);
    assert_eq!(summary.bristol_distribution.get(&1), Some(&2));
    assert_eq!(summary.bristol_distribution.get(&7), Some(&1));
}

#[test]
fn test_bowel_averages_and_most_common_tie() {
    let aggregator = DataAggregator::new();
    let movements = vec![
        movement(0, 8, 3).with_pain(rating(2)),
        movement(0, 20, 4).with_pain(rating(4)),
        movement(1, 8, 5).with_pain(rating(6)),
    ];

    let summary = aggregator.aggregate_bowel_movements(&movements);

    assert_eq!(summary.average_bristol, 4.0);
    assert_eq!(summary.average_pain, 4.0);
    assert_eq!(summary.most_common_bristol, Some(3));
}

#[test]
fn test_irregular_gaps_lower_regularity() {
    let aggregator = DataAggregator::new();
    let movements = vec![movement(0, 8, 4), movement(0, 10, 4), movement(3, 8, 4)];

    let summary = aggregator.aggregate_bowel_movements(&movements);

    assert!(summary.regularity_score < 0.5);
}

#[test]
fn test_meal_summary_counts_and_nutrition() {
    let aggregator = DataAggregator::new();
    let meals = vec![
        meal(0, 8, 600).with_category(MealCategory::Breakfast),
        fiber_meal(0, 12),
        spicy_meal(0, 19),
        meal(1, 19, 900).with_dairy(true),
    ];

    let summary = aggregator.aggregate_meals(&meals);

    assert_eq!(summary.total_meals, 4);
    assert_eq!(summary.total_calories, 2700);
    assert_eq!(summary.average_calories, 675.0);
    assert_eq!(summary.calorie_spread.count, 4);
    assert_eq!(summary.calorie_spread.min, 550.0);
    assert_eq!(summary.calorie_spread.max, 900.0);
    assert_eq!(summary.calorie_spread.median, 625.0);
    assert_eq!(summary.fiber_rich_percent, 25.0);
    assert_eq!(summary.spicy_meal_count, 1);
    assert_eq!(summary.dairy_meal_count, 1);
    assert_eq!(summary.large_meal_count, 1);
    assert_eq!(
        summary.category_distribution.get(&MealCategory::Breakfast),
        Some(&1)
    );
    assert!(summary.nutrition_score > 0.0 && summary.nutrition_score <= 1.0);
}

#[test]
fn test_ideal_meals_score_calorie_share() {
    let aggregator = DataAggregator::new();
    let meals = vec![meal(0, 8, 600), meal(0, 13, 600)];

    let summary = aggregator.aggregate_meals(&meals);

    assert_eq!(summary.nutrition_score, 0.7);
}

#[test]
fn test_symptom_summary_distributions() {
    let aggregator = DataAggregator::new();
    let symptoms = vec![
        symptom(0, 9, 3).with_category(SymptomCategory::Digestive),
        symptom(0, 15, 5).with_category(SymptomCategory::Digestive),
        symptom(1, 9, 7),
    ];

    let summary = aggregator.aggregate_symptoms(&symptoms);

    assert_eq!(summary.total_symptoms, 3);
    assert_eq!(summary.average_severity, 5.0);
    assert_eq!(summary.severity_spread.median, 5.0);
    assert_eq!(summary.severity_spread.min, 3.0);
    assert_eq!(summary.severity_spread.max, 7.0);
    assert_eq!(
        summary.most_common_category,
        Some(SymptomCategory::Digestive)
    );
    assert!(summary.most_common_type.is_none());
}

#[test]
fn test_compliance_window() {
    let aggregator = DataAggregator::new();
    let now = at(10, 0);

    let recent = medication("mesalamine").with_taken_at(now - Duration::hours(10));
    let summary = aggregator.aggregate_medications(&[recent], now);
    assert_eq!(summary.compliance_score, 1.0);

    let missed = medication("mesalamine").with_taken_at(now - Duration::hours(48));
    let summary = aggregator.aggregate_medications(&[missed], now);
    assert_eq!(summary.compliance_score, 0.0);
}

#[test]
fn test_compliance_counts_inactive_medications_against_score() {
    let aggregator = DataAggregator::new();
    let now = at(10, 0);
    let medications = vec![
        medication("probiotic"),
        medication("loperamide").with_active(false),
    ];

    let summary = aggregator.aggregate_medications(&medications, now);

    assert_eq!(summary.total_medications, 2);
    assert_eq!(summary.active_medications, 1);
    assert_eq!(summary.compliance_score, 0.5);
}

#[test]
fn test_conservative_strategy_narrows_healthy_band() {
    let aggregator = DataAggregator::with_strategy(ConfiguredStrategy::conservative());
    let movements = vec![movement(0, 8, 3), movement(1, 8, 3)];

    let summary = aggregator.aggregate_bowel_movements(&movements);

    assert_eq!(summary.consistency_score, 0.0);
    assert_eq!(
        DataAggregator::new()
            .aggregate_bowel_movements(&movements)
            .consistency_score,
        1.0
    );
}

#[test]
fn test_daily_data_has_one_point_per_day() {
    let aggregator = DataAggregator::new();
    let records = healthy_records(5);
    let range = range_days(7);

    let daily = aggregator.aggregate_daily_data(
        &records.movements,
        &records.meals,
        &records.symptoms,
        &records.medications,
        &range,
    );

    assert_eq!(daily.len(), 7);
    assert!(daily.windows(2).all(|w| w[0].date < w[1].date));
    assert!(daily[..5].iter().all(|d| d.has_data()));
    assert!(daily[5..].iter().all(|d| !d.has_data()));
    assert!(daily[5].is_weekend() && daily[6].is_weekend());

    let first = &daily[0];
    assert_eq!(first.movement_count, 1);
    assert_eq!(first.meal_count, 3);
    assert_eq!(first.total_calories, 1700);
    assert_eq!(first.fiber_rich_meal_count, 1);
    assert_eq!(first.bristol_average, Some(4.0));
    assert_eq!(first.record_count(), 4);
}

#[test]
fn test_daily_calories_do_not_overflow() {
    let aggregator = DataAggregator::new();
    let meals = vec![meal(0, 8, 3_000_000_000), meal(0, 19, 3_000_000_000)];

    let daily = aggregator.aggregate_daily_data(&[], &meals, &[], &[], &range_days(1));

    assert_eq!(daily[0].total_calories, 6_000_000_000);
    assert_eq!(aggregator.aggregate_meals(&meals).total_calories, 6_000_000_000);
}

#[test]
fn test_daily_data_is_identical_across_runs() {
    let aggregator = DataAggregator::new();
    let records = spicy_symptom_records(60);
    let range = range_days(60);
    let build = || {
        aggregator.aggregate_daily_data(
            &records.movements,
            &records.meals,
            &records.symptoms,
            &records.medications,
            &range,
        )
    };

    let first = build();
    for _ in 0..5 {
        assert_eq!(build(), first);
    }
}

#[test]
fn test_daily_data_ignores_records_outside_range() {
    let aggregator = DataAggregator::new();
    let movements = vec![movement(-1, 8, 4), movement(0, 8, 4), movement(9, 8, 4)];

    let daily = aggregator.aggregate_daily_data(&movements, &[], &[], &[], &range_days(3));

    let total: u32 = daily.iter().map(|d| d.movement_count).sum();
    assert_eq!(total, 1);
}

#[test]
fn test_trigger_followups_only_for_triggers_eaten() {
    let aggregator = DataAggregator::new();
    let records = spicy_symptom_records(3);

    let daily = aggregator.aggregate_daily_data(
        &records.movements,
        &records.meals,
        &records.symptoms,
        &records.medications,
        &range_days(3),
    );

    for point in &daily {
        assert_eq!(point.trigger_followups.get(&MealTrigger::Spicy), Some(&1));
        assert!(!point.trigger_followups.contains_key(&MealTrigger::Dairy));
    }
}

#[test]
fn test_symptom_before_meal_is_not_a_followup() {
    let aggregator = DataAggregator::new();
    let meals = vec![spicy_meal(0, 12)];
    let symptoms = vec![symptom(0, 11, 6), symptom(1, 13, 6)];

    let daily = aggregator.aggregate_daily_data(&[], &meals, &symptoms, &[], &range_days(2));

    assert_eq!(daily[0].trigger_followups.get(&MealTrigger::Spicy), Some(&0));
}

#[test]
fn test_active_medications_per_day() {
    let aggregator = DataAggregator::new();
    let medications = vec![medication("probiotic")
        .with_start_date(at(1, 0))
        .with_end_date(at(2, 0))];

    let daily = aggregator.aggregate_daily_data(&[], &[], &[], &medications, &range_days(4));

    let active: Vec<u32> = daily.iter().map(|d| d.active_medication_count).collect();
    assert_eq!(active, vec![0, 1, 1, 0]);
}

#[test]
fn test_group_meals_by_type_has_every_group() {
    let aggregator = DataAggregator::new();
    let meals: Vec<Meal> = vec![
        meal(0, 19, 950).with_gluten(true),
        fiber_meal(0, 12),
        spicy_meal(1, 19),
    ];

    let groups = aggregator.group_meals_by_type(&meals);

    assert_eq!(groups.len(), MealGroup::ALL.len());
    assert_eq!(groups[&MealGroup::Large].len(), 1);
    assert_eq!(groups[&MealGroup::Gluten].len(), 1);
    assert_eq!(groups[&MealGroup::Healthy].len(), 1);
    assert_eq!(groups[&MealGroup::Spicy].len(), 1);
    assert!(groups[&MealGroup::Dairy].is_empty());
}

#[test]
fn test_group_movements_by_iso_week() {
    let aggregator = DataAggregator::new();
    let movements = vec![movement(8, 8, 4), movement(0, 8, 4), movement(2, 8, 4)];

    let weeks = aggregator.group_movements_by_week(&movements);

    let keys: Vec<&String> = weeks.keys().collect();
    assert_eq!(keys, vec!["2025-W10", "2025-W11"]);
    assert_eq!(weeks["2025-W10"].len(), 2);
    assert!(weeks["2025-W10"][0].recorded_at < weeks["2025-W10"][1].recorded_at);
    assert!(weeks["2025-W11"].iter().all(|m| m.user_id == USER));
}
