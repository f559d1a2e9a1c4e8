// ABOUTME: Tests for insight factors, alert levels, and generated recommendations
// ABOUTME: Validates factor keys, merging, ordering, tracking gaps, and recommendation dedupe
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

mod common;

use chrono::Duration;
use common::{
    at, healthy_records, meal, movement, range_days, rating, spicy_meal, spicy_symptom_records,
    symptom,
};
use gut_analytics::intelligence::{
    AnalyticsConfig, ConfiguredStrategy, CorrelationAnalyzer, DataAggregator, HealthInsights,
    HealthScoreCalculator, InsightEngine, InsightFactor, InsightSource, PatternAnalyzer,
    Priority, RecommendationCategory, RecommendationGenerator, RiskLevel, TrendAnalyzer,
    TrendDirection, TrendMetric,
};
use gut_analytics::models::HealthRecords;
use std::collections::HashSet;

fn insights_for(records: &HealthRecords, days: i64) -> HealthInsights {
    let range = range_days(days);
    let now = range.end;
    let aggregator = DataAggregator::new();
    let daily = aggregator.aggregate_daily_data(
        &records.movements,
        &records.meals,
        &records.symptoms,
        &records.medications,
        &range,
    );
    let trends = TrendAnalyzer::new().analyze(&daily, &range);
    let patterns = PatternAnalyzer::new().analyze_behavior_patterns(&daily);
    let correlations = CorrelationAnalyzer::new().analyze(records, &daily, now);
    let score = HealthScoreCalculator::new().calculate_health_score(
        &aggregator.aggregate_bowel_movements(&records.movements),
        &aggregator.aggregate_meals(&records.meals),
        &aggregator.aggregate_symptoms(&records.symptoms),
        &aggregator.aggregate_medications(&records.medications, now),
        Some(&trends),
    );
    InsightEngine::new().generate_insights(&score, &trends, &patterns, &correlations)
}

fn risk(key: &str, level: RiskLevel, confidence: f64) -> InsightFactor {
    InsightFactor {
        key: key.to_owned(),
        title: format!("Risk {key}"),
        evidence: vec![format!("Evidence for {key}")],
        confidence,
        risk_level: Some(level),
        source: InsightSource::Pattern,
    }
}

fn insights_with(
    risk_factors: Vec<InsightFactor>,
    tracking_gaps: Vec<InsightFactor>,
    overall_score: f64,
) -> HealthInsights {
    HealthInsights {
        key_findings: Vec::new(),
        risk_factors,
        positive_factors: Vec::new(),
        tracking_gaps,
        alert_level: RiskLevel::Low,
        confidence_level: 0.6,
        overall_score,
    }
}

#[test]
fn test_healthy_routine_has_only_strengths() {
    common::init_test_logging();
    let insights = insights_for(&healthy_records(14), 14);

    assert!(insights.risk_factors.is_empty());
    assert!(insights.tracking_gaps.is_empty());
    assert_eq!(insights.alert_level, RiskLevel::Low);
    assert_eq!(insights.overall_score, 94.0);
    assert_eq!(insights.confidence_level, 0.56);

    let keys: Vec<&str> = insights
        .positive_factors
        .iter()
        .map(|f| f.key.as_str())
        .collect();
    assert!(keys.contains(&"domain:bowel"));
    assert!(keys.contains(&"domain:diet"));
    assert!(keys.contains(&"pattern:daily_regularity"));
    assert!(!keys.contains(&"domain:symptom"));
    assert!(insights
        .positive_factors
        .iter()
        .all(|f| f.risk_level.is_none() && f.confidence <= 0.56));
    assert!(insights.key_findings[0].starts_with("Overall gut health score is 94/100"));
}

#[test]
fn test_spicy_meals_raise_correlation_and_pattern_risks() {
    let insights = insights_for(&spicy_symptom_records(14), 14);

    let correlation = insights
        .risk_factors
        .iter()
        .find(|f| f.key == "correlation:spicy:symptom")
        .expect("spicy correlation risk");
    assert_eq!(correlation.source, InsightSource::Correlation);
    assert_eq!(correlation.risk_level, Some(RiskLevel::Medium));
    assert_eq!(correlation.title, "spicy meals are linked to symptom problems");

    assert!(insights
        .risk_factors
        .iter()
        .any(|f| f.key == "pattern:trigger_symptom:spicy"));
    assert!(insights.alert_level >= RiskLevel::Medium);
}

#[test]
fn test_risks_are_ordered_by_level_then_confidence() {
    let insights = insights_for(&spicy_symptom_records(14), 14);

    assert!(insights.risk_factors.windows(2).all(|w| {
        w[0].risk_level > w[1].risk_level
            || (w[0].risk_level == w[1].risk_level && w[0].confidence >= w[1].confidence)
    }));
    assert!(insights
        .positive_factors
        .windows(2)
        .all(|w| w[0].confidence >= w[1].confidence));
}

#[test]
fn test_trend_factors_merge_by_key() {
    let mut records = HealthRecords::default();
    for day in 0..28 {
        let pain = u8::try_from(2 + 2 * (day / 7)).unwrap();
        records
            .movements
            .push(movement(day, 8, 4).with_pain(rating(pain)));
    }

    let insights = insights_for(&records, 28);

    let pain: Vec<&InsightFactor> = insights
        .risk_factors
        .iter()
        .filter(|f| f.key == "trend:pain_average")
        .collect();
    assert_eq!(pain.len(), 1);
    assert_eq!(pain[0].risk_level, Some(RiskLevel::High));
    assert_eq!(pain[0].evidence.len(), 2);
    assert_eq!(insights.alert_level, RiskLevel::High);
}

#[test]
fn test_trend_insight_confidence_is_capped_by_trend_fit() {
    let mut records = HealthRecords::default();
    for day in 0..14 {
        let pain = if day < 7 { 2 } else { 8 };
        records
            .movements
            .push(movement(day, 8, 4).with_pain(rating(pain)));
    }
    let range = range_days(14);
    let daily =
        DataAggregator::new().aggregate_daily_data(&records.movements, &[], &[], &[], &range);
    let trends = TrendAnalyzer::new().analyze(&daily, &range);
    let pain_trend = trends.metric(TrendMetric::PainAverage).unwrap();
    assert_eq!(pain_trend.values, vec![2.0, 8.0]);
    assert_eq!(pain_trend.direction, TrendDirection::Declining);
    assert_eq!(pain_trend.confidence, 0.0);

    let insights = insights_for(&records, 14);

    let pain = insights
        .risk_factors
        .iter()
        .find(|f| f.key == "trend:pain_average")
        .expect("pain trend risk");
    assert!(pain.confidence <= pain_trend.confidence);
    assert!(pain.risk_level.is_some());
}

#[test]
fn test_rare_patterns_become_tracking_gaps() {
    let mut records = HealthRecords::default();
    for day in 0..10 {
        let bristol = if day < 3 { 6 } else { 4 };
        records.movements.push(movement(day, 8, bristol));
    }

    let insights = insights_for(&records, 10);

    let gap = insights
        .tracking_gaps
        .iter()
        .find(|f| f.key == "tracking:loose_stool_days")
        .expect("loose stool tracking gap");
    assert_eq!(gap.risk_level, Some(RiskLevel::Low));
    let loose = insights
        .risk_factors
        .iter()
        .find(|f| f.key == "pattern:loose_stool_days")
        .expect("loose stool risk");
    assert_eq!(loose.risk_level, Some(RiskLevel::Low));
}

#[test]
fn test_confidence_is_bounded_by_data_volume() {
    let insights = insights_for(&HealthRecords::default(), 7);

    assert_eq!(insights.confidence_level, 0.3);
    assert!(insights.risk_factors.is_empty());
    assert!(insights.positive_factors.is_empty());
    assert_eq!(insights.key_findings.len(), 1);
}

#[test]
fn test_no_recommendations_for_healthy_routine() {
    let insights = insights_for(&healthy_records(14), 14);

    let recommendations =
        RecommendationGenerator::new().generate_recommendations(&insights, at(14, 0));

    assert!(recommendations.is_empty());
}

#[test]
fn test_recommendations_from_spicy_meals() {
    let insights = insights_for(&spicy_symptom_records(14), 14);
    let now = at(14, 0);

    let recommendations = RecommendationGenerator::new().generate_recommendations(&insights, now);

    let spicy = recommendations
        .iter()
        .find(|r| r.id == "rec-correlation-spicy-symptom")
        .expect("spicy recommendation");
    assert_eq!(spicy.category, RecommendationCategory::Dietary);
    assert_eq!(spicy.title, "Limit spicy meals");
    assert_eq!(spicy.priority, Priority::Medium);
    assert_eq!(spicy.factor_key, "correlation:spicy:symptom");
    assert_eq!(spicy.expires_at, now + Duration::weeks(8));
    assert!(!spicy.action_steps.is_empty());
    assert!(!spicy.evidence.is_empty());

    let ids: HashSet<&str> = recommendations.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), recommendations.len());
    assert!(recommendations
        .windows(2)
        .all(|w| w[0].priority <= w[1].priority));
}

#[test]
fn test_duplicate_factor_keys_are_suppressed() {
    let insights = insights_with(
        vec![risk("pattern:hard_stool_days", RiskLevel::Medium, 0.7)],
        vec![
            risk("tracking:hard_stool_days", RiskLevel::Low, 0.3),
            risk("tracking:hard_stool_days", RiskLevel::Low, 0.3),
        ],
        80.0,
    );

    let recommendations =
        RecommendationGenerator::new().generate_recommendations(&insights, at(0, 0));

    assert_eq!(recommendations.len(), 1);
    let hard_stool = &recommendations[0];
    assert_eq!(hard_stool.id, "rec-pattern-hard_stool_days");
    assert_eq!(hard_stool.category, RecommendationCategory::Medical);
    let logging_steps = hard_stool
        .action_steps
        .iter()
        .filter(|step| step.contains("Keep logging"))
        .count();
    assert_eq!(logging_steps, 1);
}

#[test]
fn test_tracking_gap_without_risk_gets_its_own_recommendation() {
    let insights = insights_with(
        Vec::new(),
        vec![
            risk("tracking:fiber_routine", RiskLevel::Low, 0.3),
            risk("tracking:fiber_routine", RiskLevel::Low, 0.3),
        ],
        80.0,
    );

    let recommendations =
        RecommendationGenerator::new().generate_recommendations(&insights, at(0, 0));

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].category, RecommendationCategory::Tracking);
    assert_eq!(recommendations[0].priority, Priority::Low);
}

#[test]
fn test_occasional_trigger_pattern_yields_one_recommendation() {
    let mut records = HealthRecords::default();
    for day in 0..14 {
        records.meals.push(spicy_meal(day, 12));
        records.meals.push(meal(day, 19, 600));
        if day % 4 == 0 {
            records.symptoms.push(symptom(day, 15, 6));
        }
    }
    let insights = insights_for(&records, 14);
    assert!(insights
        .tracking_gaps
        .iter()
        .any(|f| f.key == "tracking:trigger_symptom:spicy"));

    let recommendations =
        RecommendationGenerator::new().generate_recommendations(&insights, at(14, 0));

    let spicy_pattern: Vec<&str> = recommendations
        .iter()
        .map(|r| r.factor_key.as_str())
        .filter(|key| key.ends_with("trigger_symptom:spicy"))
        .collect();
    assert_eq!(spicy_pattern, vec!["pattern:trigger_symptom:spicy"]);
}

#[test]
fn test_low_overall_score_adds_general_recommendation() {
    let insights = insights_with(Vec::new(), Vec::new(), 45.0);

    let recommendations =
        RecommendationGenerator::new().generate_recommendations(&insights, at(0, 0));

    assert_eq!(recommendations.len(), 1);
    assert_eq!(recommendations[0].id, "rec-overall");
    assert_eq!(recommendations[0].priority, Priority::Medium);
}

#[test]
fn test_high_risks_come_first_and_expire_soonest() {
    let now = at(0, 0);
    let insights = insights_with(
        vec![
            risk("pattern:frequent_spicy_meals", RiskLevel::Medium, 0.9),
            risk("domain:medication", RiskLevel::High, 0.4),
        ],
        Vec::new(),
        80.0,
    );

    let recommendations = RecommendationGenerator::new().generate_recommendations(&insights, now);

    assert_eq!(recommendations[0].factor_key, "domain:medication");
    assert_eq!(recommendations[0].priority, Priority::High);
    assert_eq!(recommendations[0].expires_at, now + Duration::weeks(4));
    assert_eq!(recommendations[1].category, RecommendationCategory::Dietary);
}

#[test]
fn test_recommendation_count_is_capped() {
    let mut config = AnalyticsConfig::default();
    config.insights.max_recommendations = 2;
    let generator =
        RecommendationGenerator::with_strategy(ConfiguredStrategy::new(config).unwrap());
    let insights = insights_with(
        vec![
            risk("pattern:loose_stool_days", RiskLevel::Medium, 0.5),
            risk("pattern:low_meal_frequency", RiskLevel::Medium, 0.6),
            risk("pattern:symptom_clustering", RiskLevel::Medium, 0.7),
        ],
        Vec::new(),
        30.0,
    );

    let recommendations = generator.generate_recommendations(&insights, at(0, 0));

    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0].confidence, 0.7);
}
