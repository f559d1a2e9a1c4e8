// ABOUTME: Criterion benchmarks for the gut health analytics engine and service
// ABOUTME: Measures daily aggregation, correlation, pattern detection, and full service requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the analytics engine.
//!
//! Record histories are synthetic and deterministic: one to three movements,
//! three meals, and an occasional symptom per day.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    missing_docs
)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use gut_analytics::clock::FixedClock;
use gut_analytics::config::AnalyticsServiceConfig;
use gut_analytics::intelligence::{
    CorrelationAnalyzer, DataAggregator, HealthInsights, HealthScoreCalculator, InsightEngine,
    PatternAnalyzer, TrendAnalyzer,
};
use gut_analytics::models::{
    BowelMovement, BristolType, DateRange, HealthRecords, Meal, Rating, Symptom,
};
use gut_analytics::services::AnalyticsService;
use gut_analytics::stores::InMemoryStores;
use tokio::runtime::Runtime;

const USER: &str = "bench-user";

/// History lengths in days
const HISTORY_DAYS: [i64; 3] = [30, 90, 365];

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap()
}

fn range(days: i64) -> DateRange {
    DateRange::new(start(), start() + Duration::days(days) - Duration::seconds(1)).unwrap()
}

fn generate_records(days: i64) -> HealthRecords {
    let mut records = HealthRecords::default();
    for day in 0..days {
        let midnight = start() + Duration::days(day);
        let bristol = BristolType::new(((day % 7) + 1) as u8).unwrap();
        for movement in 0..=(day % 3) {
            records.movements.push(
                BowelMovement::new(USER, midnight + Duration::hours(7 + movement * 5), bristol)
                    .with_pain(Rating::new(((day % 10) + 1) as u8).unwrap()),
            );
        }

        let lunch = Meal::new(USER, "lunch", midnight + Duration::hours(12), 650)
            .with_fiber_rich(day % 2 == 0);
        let dinner = if day % 4 == 0 {
            Meal::new(USER, "curry", midnight + Duration::hours(19), 900)
                .with_spicy_level(Rating::new(7).unwrap())
        } else {
            Meal::new(USER, "dinner", midnight + Duration::hours(19), 600)
        };
        records.meals.extend([
            Meal::new(USER, "breakfast", midnight + Duration::hours(7), 450),
            lunch,
            dinner,
        ]);

        if day % 4 == 0 {
            records.symptoms.push(Symptom::new(
                USER,
                "cramps",
                midnight + Duration::hours(22),
                Rating::new(6).unwrap(),
            ));
        }
    }
    records
}

fn full_pipeline(records: &HealthRecords, period: &DateRange) -> HealthInsights {
    let aggregator = DataAggregator::new();
    let daily = aggregator.aggregate_daily_data(
        &records.movements,
        &records.meals,
        &records.symptoms,
        &records.medications,
        period,
    );
    let trends = TrendAnalyzer::new().analyze(&daily, period);
    let patterns = PatternAnalyzer::new().analyze_behavior_patterns(&daily);
    let correlations = CorrelationAnalyzer::new().analyze(records, &daily, period.end);
    let score = HealthScoreCalculator::new().calculate_health_score(
        &aggregator.aggregate_bowel_movements(&records.movements),
        &aggregator.aggregate_meals(&records.meals),
        &aggregator.aggregate_symptoms(&records.symptoms),
        &aggregator.aggregate_medications(&records.medications, period.end),
        Some(&trends),
    );
    InsightEngine::new().generate_insights(&score, &trends, &patterns, &correlations)
}

/// Benchmark per-day aggregation across history lengths
fn bench_daily_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("daily_aggregation");
    let aggregator = DataAggregator::new();

    for days in HISTORY_DAYS {
        let records = generate_records(days);
        let period = range(days);
        group.throughput(Throughput::Elements(records.record_count() as u64));
        group.bench_with_input(
            BenchmarkId::new("aggregate_daily_data", days),
            &records,
            |b, records| {
                b.iter(|| {
                    aggregator.aggregate_daily_data(
                        black_box(&records.movements),
                        black_box(&records.meals),
                        black_box(&records.symptoms),
                        black_box(&records.medications),
                        &period,
                    )
                });
            },
        );
    }

    group.finish();
}

/// Benchmark meal correlation, whose followup search dominates large histories
fn bench_correlation(c: &mut Criterion) {
    let mut group = c.benchmark_group("correlation");
    let analyzer = CorrelationAnalyzer::new();
    let aggregator = DataAggregator::new();

    for days in HISTORY_DAYS {
        let records = generate_records(days);
        let period = range(days);
        let daily = aggregator.aggregate_daily_data(
            &records.movements,
            &records.meals,
            &records.symptoms,
            &records.medications,
            &period,
        );
        group.throughput(Throughput::Elements(records.meals.len() as u64));
        group.bench_with_input(BenchmarkId::new("analyze", days), &records, |b, records| {
            b.iter(|| analyzer.analyze(black_box(records), black_box(&daily), period.end));
        });
    }

    group.finish();
}

/// Benchmark pattern detection over a year of daily points
fn bench_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("patterns");
    let records = generate_records(365);
    let period = range(365);
    let daily = DataAggregator::new().aggregate_daily_data(
        &records.movements,
        &records.meals,
        &records.symptoms,
        &records.medications,
        &period,
    );
    let analyzer = PatternAnalyzer::new();

    group.bench_function("behavior_patterns_365_days", |b| {
        b.iter(|| analyzer.analyze_behavior_patterns(black_box(&daily)));
    });

    group.finish();
}

/// Benchmark the synchronous engine end to end
fn bench_engine_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_pipeline");
    group.sample_size(50);

    for days in HISTORY_DAYS {
        let records = generate_records(days);
        let period = range(days);
        group.bench_with_input(BenchmarkId::new("insights", days), &records, |b, records| {
            b.iter(|| full_pipeline(black_box(records), &period));
        });
    }

    group.finish();
}

/// Benchmark full service requests including concurrent store fetches
fn bench_service_requests(c: &mut Criterion) {
    let mut group = c.benchmark_group("service");
    group.sample_size(30);
    let runtime = Runtime::new().unwrap();

    let stores = InMemoryStores::new();
    stores.load(generate_records(90));
    let period = range(90);
    let service = AnalyticsService::new(stores.record_stores(), AnalyticsServiceConfig::default())
        .with_clock(FixedClock::new(period.end));
    let (from, to) = (Some(period.start), Some(period.end));

    group.bench_function("health_score_90_days", |b| {
        b.to_async(&runtime)
            .iter(|| async { service.get_health_score(USER, from, to).await.unwrap() });
    });
    group.bench_function("recommendations_90_days", |b| {
        b.to_async(&runtime)
            .iter(|| async { service.get_recommendations(USER, from, to).await.unwrap() });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_daily_aggregation,
    bench_correlation,
    bench_patterns,
    bench_engine_pipeline,
    bench_service_requests,
);
criterion_main!(benches);
