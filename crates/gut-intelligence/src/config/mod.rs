// ABOUTME: Configuration module for the analytics engine
// ABOUTME: Re-exports the analytics configuration tree and strategy seam
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Analytics thresholds, weights, and the strategy trait
pub mod analytics;

pub use analytics::{
    AnalyticsConfig, AnalyticsStrategy, ConfigError, ConfiguredStrategy, CorrelationConfig,
    DefaultStrategy, HealthScoreConfig, InsightConfig, PatternConfig, ScoringConfig,
    SignificantTrendConfig, TrendConfig,
};
