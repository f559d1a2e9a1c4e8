// ABOUTME: Tests for bucketed metric trends, direction classification, and trend risks
// ABOUTME: Validates lower-is-better metrics, risk thresholds, and significant change statements
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

mod common;

use common::{movement, range_days, rating, symptom};
use gut_analytics::intelligence::{
    AnalyticsConfig, ConfiguredStrategy, DataAggregator, RiskLevel, TrendAnalysis,
    TrendAnalyzer, TrendDirection, TrendMetric,
};
use gut_analytics::models::HealthRecords;

fn analyze(records: &HealthRecords, days: i64) -> TrendAnalysis {
    let range = range_days(days);
    let daily = DataAggregator::new().aggregate_daily_data(
        &records.movements,
        &records.meals,
        &records.symptoms,
        &records.medications,
        &range,
    );
    TrendAnalyzer::new().analyze(&daily, &range)
}

/// Four weeks of daily movements whose pain rises by two points a week
fn rising_pain() -> HealthRecords {
    let mut records = HealthRecords::default();
    for day in 0..28 {
        let pain = u8::try_from(2 + 2 * (day / 7)).unwrap();
        records
            .movements
            .push(movement(day, 8, 4).with_pain(rating(pain)));
    }
    records
}

#[test]
fn test_falling_pain_is_improving() {
    let analyzer = TrendAnalyzer::new();

    let (direction, change) =
        analyzer.classify_direction(TrendMetric::PainAverage, &[7.0, 6.0, 5.0, 4.0, 3.0]);

    assert_eq!(direction, TrendDirection::Improving);
    assert!(change < 0.0);
}

#[test]
fn test_rising_pain_is_declining() {
    let analyzer = TrendAnalyzer::new();

    let (direction, _) =
        analyzer.classify_direction(TrendMetric::PainAverage, &[3.0, 4.0, 5.0, 6.0, 7.0]);

    assert_eq!(direction, TrendDirection::Declining);
}

#[test]
fn test_small_dip_is_stable() {
    let analyzer = TrendAnalyzer::new();

    let (direction, change) =
        analyzer.classify_direction(TrendMetric::PainAverage, &[5.0, 5.0, 4.0, 5.0, 5.0]);

    assert_eq!(direction, TrendDirection::Stable);
    assert_eq!(change, 0.0);
}

#[test]
fn test_rising_satisfaction_is_improving() {
    let analyzer = TrendAnalyzer::new();

    let (direction, _) = analyzer
        .classify_direction(TrendMetric::SatisfactionAverage, &[4.0, 5.0, 6.0, 7.0]);

    assert_eq!(direction, TrendDirection::Improving);
}

#[test]
fn test_short_series_is_stable() {
    let analyzer = TrendAnalyzer::new();

    assert_eq!(
        analyzer.classify_direction(TrendMetric::PainAverage, &[9.0]),
        (TrendDirection::Stable, 0.0)
    );
    assert_eq!(
        analyzer.classify_direction(TrendMetric::PainAverage, &[]),
        (TrendDirection::Stable, 0.0)
    );
}

#[test]
fn test_weekly_buckets_track_every_metric() {
    common::init_test_logging();
    let analysis = analyze(&rising_pain(), 28);

    assert_eq!(analysis.bucket_days, 7);
    assert_eq!(analysis.health_trends.len(), TrendMetric::ALL.len());
    assert_eq!(
        analysis.health_trends[&TrendMetric::PainAverage],
        vec![2.0, 4.0, 6.0, 8.0]
    );
    assert!(analysis.health_trends[&TrendMetric::NutritionScore].is_empty());
    assert_eq!(
        analysis.direction_of(TrendMetric::PainAverage),
        TrendDirection::Declining
    );
    assert_eq!(
        analysis.direction_of(TrendMetric::BowelRegularity),
        TrendDirection::Stable
    );
    assert_eq!(analysis.overall_trend, TrendDirection::Declining);
}

#[test]
fn test_slope_and_confidence_of_linear_series() {
    let analysis = analyze(&rising_pain(), 28);

    let pain = analysis.metric(TrendMetric::PainAverage).unwrap();
    assert_eq!(pain.slope, 2.0);
    assert_eq!(pain.confidence, 1.0);
    assert_eq!(pain.relative_change, 3.0);
}

#[test]
fn test_declining_pain_past_threshold_is_high_risk() {
    let analysis = analyze(&rising_pain(), 28);

    assert_eq!(analysis.risk_factors.len(), 1);
    let risk = &analysis.risk_factors[0];
    assert_eq!(risk.metric, TrendMetric::PainAverage);
    assert_eq!(risk.level, RiskLevel::High);
    assert_eq!(risk.worst_value, 8.0);
    assert_eq!(risk.threshold, 6.0);
    assert!(!risk.mitigations.is_empty());
}

#[test]
fn test_declining_below_threshold_is_not_a_risk() {
    let mut records = HealthRecords::default();
    for day in 0..28 {
        let pain = u8::try_from(1 + day / 7).unwrap();
        records
            .movements
            .push(movement(day, 8, 4).with_pain(rating(pain)));
    }

    let analysis = analyze(&records, 28);

    assert_eq!(
        analysis.direction_of(TrendMetric::PainAverage),
        TrendDirection::Declining
    );
    assert!(analysis.risk_factors.is_empty());
}

#[test]
fn test_easing_symptoms_are_improving() {
    let mut records = HealthRecords::default();
    for day in 0..28 {
        let severity = u8::try_from(8 - 2 * (day / 7)).unwrap();
        records.symptoms.push(symptom(day, 15, severity));
    }

    let analysis = analyze(&records, 28);

    assert_eq!(
        analysis.direction_of(TrendMetric::SymptomSeverity),
        TrendDirection::Improving
    );
    assert!(analysis
        .significant_trends
        .iter()
        .any(|s| s.starts_with("Symptom severity decreased")));
}

#[test]
fn test_significant_frequency_change() {
    let mut records = HealthRecords::default();
    for day in 0..14 {
        records.movements.push(movement(day, 8, 4));
        if day >= 7 {
            records.movements.push(movement(day, 18, 4));
        }
    }

    let analysis = analyze(&records, 14);

    assert!(analysis
        .significant_trends
        .contains(&"Bowel movement frequency increased by 100%".to_owned()));
}

#[test]
fn test_too_few_records_for_significant_trends() {
    let mut records = HealthRecords::default();
    records.movements.push(movement(0, 8, 2));
    records.movements.push(movement(1, 8, 6));

    let analysis = analyze(&records, 2);

    assert!(analysis.significant_trends.is_empty());
}

#[test]
fn test_empty_period_is_stable() {
    let analysis = analyze(&HealthRecords::default(), 14);

    assert_eq!(analysis.overall_trend, TrendDirection::Stable);
    assert!(analysis.risk_factors.is_empty());
    assert!(analysis.significant_trends.is_empty());
    assert!(analysis.health_trends.values().all(Vec::is_empty));
}

#[test]
fn test_bucket_size_follows_configuration() {
    let mut config = AnalyticsConfig::default();
    config.trends.bucket_days = 14;
    let analyzer = TrendAnalyzer::with_strategy(ConfiguredStrategy::new(config).unwrap());
    let range = range_days(28);
    let records = rising_pain();
    let daily = DataAggregator::new().aggregate_daily_data(
        &records.movements,
        &[],
        &[],
        &[],
        &range,
    );

    let analysis = analyzer.analyze(&daily, &range);

    assert_eq!(analysis.bucket_days, 14);
    assert_eq!(
        analysis.health_trends[&TrendMetric::PainAverage],
        vec![3.0, 7.0]
    );
}
