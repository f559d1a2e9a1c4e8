// ABOUTME: Insight and recommendation configuration
// ABOUTME: Risk thresholds, confidence bounds, alert rules, and recommendation limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Thresholds for turning scores, trends, patterns and correlations into insights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightConfig {
    /// Domain score below which a risk is raised
    pub risk_score_threshold: f64,
    /// Gap below the threshold that makes a domain risk HIGH
    pub high_risk_gap: f64,
    /// Gap below the threshold that makes a domain risk MEDIUM
    pub medium_risk_gap: f64,
    /// Relative decline that makes a trend risk HIGH
    pub high_decline: f64,
    /// Relative decline that makes a trend risk MEDIUM
    pub medium_decline: f64,
    /// Absolute correlation strength that becomes a factor
    pub correlation_threshold: f64,
    /// Correlation strength that makes a correlation risk HIGH
    pub high_correlation: f64,
    /// Domain score at or above which a positive factor is raised
    pub positive_score_threshold: f64,
    /// Records that give full data confidence
    pub full_confidence_records: f64,
    /// Floor on data confidence
    pub min_data_confidence: f64,
    /// Ceiling on data confidence
    pub max_data_confidence: f64,
    /// Base confidence of score-derived factors
    pub score_confidence: f64,
    /// Pattern confidence below which a tracking gap is raised
    pub low_pattern_confidence: f64,
    /// Risk count above which the alert becomes MEDIUM
    pub medium_alert_risk_count: usize,
    /// Overall score below which the alert becomes MEDIUM
    pub medium_alert_score: f64,
    /// Overall score below which a general recommendation is added
    pub overall_recommendation_threshold: f64,
    /// Recommendations kept
    pub max_recommendations: usize,
    /// Weeks until a HIGH priority recommendation expires
    pub high_expiry_weeks: i64,
    /// Weeks until a MEDIUM priority recommendation expires
    pub medium_expiry_weeks: i64,
    /// Weeks until a LOW priority recommendation expires
    pub low_expiry_weeks: i64,
    /// Key findings kept
    pub max_key_findings: usize,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            risk_score_threshold: 50.0,
            high_risk_gap: 25.0,
            medium_risk_gap: 10.0,
            high_decline: 0.3,
            medium_decline: 0.15,
            correlation_threshold: 0.5,
            high_correlation: 0.8,
            positive_score_threshold: 75.0,
            full_confidence_records: 100.0,
            min_data_confidence: 0.3,
            max_data_confidence: 0.9,
            score_confidence: 0.9,
            low_pattern_confidence: 0.5,
            medium_alert_risk_count: 2,
            medium_alert_score: 50.0,
            overall_recommendation_threshold: 60.0,
            max_recommendations: 10,
            high_expiry_weeks: 4,
            medium_expiry_weeks: 8,
            low_expiry_weeks: 12,
            max_key_findings: 5,
        }
    }
}
