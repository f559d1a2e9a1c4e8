// ABOUTME: Gut health analytics engine crate root
// ABOUTME: Aggregation, correlation, trend, pattern, scoring, insight, and recommendation analyzers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Gut Intelligence
//!
//! Deterministic, synchronous analytics over one user's health record
//! snapshot. Nothing here performs I/O or reads the clock: "now" is always an
//! explicit argument, so the same snapshot produces the same output.
//!
//! ## Pipeline
//!
//! 1. [`DataAggregator`] builds domain summaries and [`DailyDataPoint`]s
//! 2. [`CorrelationAnalyzer`], [`TrendAnalyzer`] and [`PatternAnalyzer`]
//!    consume the aggregates
//! 3. [`HealthScoreCalculator`] combines the domain summaries
//! 4. [`InsightEngine`] and [`RecommendationGenerator`] turn everything into
//!    keyed factors and actions
//!
//! Every analyzer is generic over [`AnalyticsStrategy`], defaulting to the
//! process-wide configuration.

/// Analytics configuration tree and the strategy seam
pub mod config;

/// Statistics primitives
pub mod statistics;

/// Domain summaries and daily data points
pub mod aggregator;

/// Meal-to-outcome and day-level correlations
pub mod correlation;

/// Bucketed metric trends and trend risks
pub mod trends;

/// Recurring behavior patterns
pub mod patterns;

/// Composite health score
pub mod health_score;

/// Risk and positive factors
pub mod insights;

/// Templated recommendations
pub mod recommendations;

pub use aggregator::{
    BowelMovementSummary, DailyDataPoint, DataAggregator, MealGroup, MealSummary, MealTrigger,
    MedicationSummary, SymptomSummary,
};
pub use config::{
    AnalyticsConfig, AnalyticsStrategy, ConfigError, ConfiguredStrategy, DefaultStrategy,
};
pub use correlation::{
    Correlation, CorrelationAnalysis, CorrelationAnalyzer, MedicationEffect, Outcome,
    TriggerEffect,
};
pub use health_score::{Benchmarks, HealthDomain, HealthScore, HealthScoreCalculator, ScoreFactor};
pub use insights::{HealthInsights, InsightEngine, InsightFactor, InsightSource};
pub use patterns::{BehaviorPatterns, Pattern, PatternAnalyzer, PatternCategory, PatternKind};
pub use recommendations::{
    Priority, Recommendation, RecommendationCategory, RecommendationGenerator,
};
pub use trends::{
    MetricTrend, RiskLevel, TrendAnalysis, TrendAnalyzer, TrendDirection, TrendMetric,
    TrendRiskFactor,
};
