// ABOUTME: Tests for meal-to-outcome, day-level, trigger, and medication correlations
// ABOUTME: Validates strength and confidence bounds and user-asserted relation overrides
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

mod common;

use chrono::Duration;
use common::{
    at, meal, medication, movement, range_days, rating, spicy_meal, spicy_symptom_records,
    symptom, USER,
};
use gut_analytics::intelligence::{
    CorrelationAnalysis, CorrelationAnalyzer, DataAggregator, MealTrigger,
};
use gut_analytics::models::{CorrelationType, HealthRecords, MealRelation, RelationTarget};

fn analyze(records: &HealthRecords, days: i64) -> CorrelationAnalysis {
    let daily = DataAggregator::new().aggregate_daily_data(
        &records.movements,
        &records.meals,
        &records.symptoms,
        &records.medications,
        &range_days(days),
    );
    CorrelationAnalyzer::new().analyze(records, &daily, at(days, 0))
}

#[test]
fn test_spicy_meals_followed_by_symptoms_correlate_positively() {
    common::init_test_logging();
    let records = spicy_symptom_records(5);

    let analysis = analyze(&records, 5);

    let spicy = analysis
        .meal_symptom_correlations
        .iter()
        .find(|c| c.factor_a == "spicy")
        .expect("spicy correlation");
    assert_eq!(spicy.factor_b, "symptom");
    assert_eq!(spicy.sample_size, 5);
    assert!(spicy.strength > 0.6 && spicy.strength < 0.7);
    assert!((spicy.confidence - 0.5).abs() < 1e-9);
    assert_eq!(spicy.interpretation, "Strong");
}

#[test]
fn test_meal_bowel_correlation_counts_followups_within_window() {
    let records = spicy_symptom_records(5);

    let analysis = analyze(&records, 5);

    let spicy = analysis
        .meal_bowel_correlations
        .iter()
        .find(|c| c.factor_a == "spicy")
        .expect("spicy bowel correlation");
    assert_eq!(spicy.factor_b, "bowel_movement");
    // The last dinner has no movement within a day after it
    assert_eq!(spicy.sample_size, 4);
}

#[test]
fn test_confidence_grows_with_trigger_meals() {
    let confidence_for = |days: i64| {
        let analysis = analyze(&spicy_symptom_records(days), days);
        analysis.meal_symptom_correlations[0].confidence
    };

    let small = confidence_for(1);
    let medium = confidence_for(5);
    let large = confidence_for(60);

    assert!(small < medium && medium < large);
    assert!(large <= 0.95);
}

#[test]
fn test_strengths_stay_within_bounds() {
    let analysis = analyze(&spicy_symptom_records(30), 30);

    for correlation in analysis
        .meal_correlations()
        .chain(&analysis.daily_correlations)
    {
        assert!((-1.0..=1.0).contains(&correlation.strength));
        assert!((0.0..=1.0).contains(&correlation.confidence));
    }
}

#[test]
fn test_meals_without_outcomes_produce_no_correlation() {
    let mut records = HealthRecords::default();
    records.meals = (0..5).map(|day| spicy_meal(day, 12)).collect();

    let analysis = analyze(&records, 5);

    assert!(analysis.is_empty());
    assert_eq!(analysis.trigger_analysis.len(), 1);
    assert_eq!(analysis.trigger_analysis[0].severity, 0.0);
}

#[test]
fn test_empty_snapshot_is_empty_analysis() {
    let analysis = analyze(&HealthRecords::default(), 7);

    assert!(analysis.is_empty());
    assert!(analysis.trigger_analysis.is_empty());
    assert!(analysis.medication_effectiveness.is_empty());
}

#[test]
fn test_user_assertion_overrides_computed_value() {
    let mut records = spicy_symptom_records(5);
    records.relations = records
        .meals
        .iter()
        .zip(&records.symptoms)
        .map(|(meal, symptom)| {
            MealRelation::new(
                USER,
                meal.id,
                RelationTarget::Symptom(symptom.id),
                3.0,
                at(5, 0),
            )
            .with_strength(rating(8))
            .with_correlation(CorrelationType::Negative)
        })
        .collect();

    let analysis = analyze(&records, 5);

    let spicy = &analysis.meal_symptom_correlations[0];
    assert!((spicy.strength - (-40.0 / 10.0 / 6.0)).abs() < 1e-9);
}

#[test]
fn test_unknown_assertion_keeps_computed_value() {
    let baseline = analyze(&spicy_symptom_records(5), 5);

    let mut records = spicy_symptom_records(5);
    records.relations = records
        .meals
        .iter()
        .zip(&records.symptoms)
        .map(|(meal, symptom)| {
            MealRelation::new(USER, meal.id, RelationTarget::Symptom(symptom.id), 3.0, at(5, 0))
                .with_correlation(CorrelationType::Unknown)
        })
        .collect();
    let analysis = analyze(&records, 5);

    assert_eq!(
        analysis.meal_symptom_correlations[0].strength,
        baseline.meal_symptom_correlations[0].strength
    );
}

#[test]
fn test_daily_correlation_between_spicy_meals_and_pain() {
    let mut records = HealthRecords::default();
    for day in 0..4 {
        let pain = u8::try_from(2 + 2 * day).unwrap();
        records
            .movements
            .push(movement(day, 8, 4).with_pain(rating(pain)));
        for hour in 0..day {
            records.meals.push(spicy_meal(day, 10 + hour));
        }
    }

    let analysis = analyze(&records, 4);

    let daily = analysis
        .daily_correlations
        .iter()
        .find(|c| c.factor_a == "spicy_meals" && c.factor_b == "pain_average")
        .expect("daily spicy/pain correlation");
    assert!((daily.strength - 1.0).abs() < 1e-9);
    assert_eq!(daily.sample_size, 4);
}

#[test]
fn test_daily_correlation_needs_minimum_samples() {
    let mut records = HealthRecords::default();
    records.movements.push(movement(0, 8, 4).with_pain(rating(2)));
    records.movements.push(movement(1, 8, 4).with_pain(rating(6)));
    records.meals.push(spicy_meal(1, 12));

    let analysis = analyze(&records, 2);

    assert!(analysis
        .daily_correlations
        .iter()
        .all(|c| c.factor_a != "spicy_meals"));
}

#[test]
fn test_trigger_analysis_compares_against_all_meals() {
    let mut records = spicy_symptom_records(5);
    records
        .meals
        .extend((5..10).map(|day| meal(day, 12, 500)));

    let analysis = analyze(&records, 10);

    let spicy = analysis
        .trigger_analysis
        .iter()
        .find(|t| t.trigger == MealTrigger::Spicy)
        .expect("spicy trigger effect");
    assert_eq!(spicy.frequency, 5);
    assert_eq!(spicy.symptom_increase, 0.5);
    assert_eq!(spicy.severity, 0.7);
}

#[test]
fn test_medication_effectiveness_scores() {
    let now = at(10, 0);
    let mut records = HealthRecords::default();
    records.medications = vec![
        medication("recent").with_taken_at(now - Duration::hours(4)),
        medication("scheduled"),
        medication("stopped").with_active(false),
    ];

    let daily = Vec::new();
    let analysis = CorrelationAnalyzer::new().analyze(&records, &daily, now);

    let scores: Vec<f64> = analysis
        .medication_effectiveness
        .iter()
        .map(|m| m.effectiveness_score)
        .collect();
    assert_eq!(scores, vec![1.0, 0.7, 0.0]);
}

#[test]
fn test_medication_improvement_since_course_start() {
    let mut records = HealthRecords::default();
    records.symptoms = vec![symptom(0, 9, 8), symptom(1, 9, 8), symptom(5, 9, 4)];
    records.movements = vec![
        movement(0, 8, 4).with_pain(rating(6)),
        movement(6, 8, 4).with_pain(rating(2)),
    ];
    records.medications = vec![medication("mesalamine").with_start_date(at(3, 0))];

    let daily = Vec::new();
    let analysis = CorrelationAnalyzer::new().analyze(&records, &daily, at(7, 0));

    let effect = &analysis.medication_effectiveness[0];
    assert_eq!(effect.medication_name, "mesalamine");
    assert_eq!(effect.symptom_improvement, 0.4);
    assert_eq!(effect.bowel_improvement, 0.4);
}
