// ABOUTME: Insight generation from health scores, trends, patterns, and correlations
// ABOUTME: Identifies keyed risk and positive factors with confidence capped by their weakest input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Insight Engine
//!
//! Every factor is keyed by its origin (`domain:<domain>`, `trend:<metric>`,
//! `correlation:<factor>:<outcome>`, `pattern:<kind>`), so downstream
//! recommendations can be deduplicated per underlying cause. A factor's
//! confidence never exceeds the confidence of any input it rests on.

use crate::config::{AnalyticsStrategy, DefaultStrategy, InsightConfig};
use crate::correlation::CorrelationAnalysis;
use crate::health_score::HealthScore;
use crate::patterns::{BehaviorPatterns, Pattern};
use crate::statistics::clamp_unit;
use crate::trends::{RiskLevel, TrendAnalysis, TrendDirection, TrendMetric};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Which analysis produced a factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightSource {
    /// A domain score
    DomainScore,
    /// A metric trend
    Trend,
    /// A behavior pattern
    Pattern,
    /// A meal correlation
    Correlation,
}

/// One risk, strength, or tracking gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightFactor {
    /// Stable identifier of the underlying cause
    pub key: String,
    /// Headline
    pub title: String,
    /// Supporting observations
    pub evidence: Vec<String>,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Severity for risk factors
    pub risk_level: Option<RiskLevel>,
    /// Origin
    pub source: InsightSource,
}

/// Insights for one user and period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthInsights {
    /// Short plain-language summary lines
    pub key_findings: Vec<String>,
    /// Risks, most severe first
    pub risk_factors: Vec<InsightFactor>,
    /// Strengths, most confident first
    pub positive_factors: Vec<InsightFactor>,
    /// Patterns seen too rarely to be sure of
    pub tracking_gaps: Vec<InsightFactor>,
    /// Overall urgency
    pub alert_level: RiskLevel,
    /// Confidence in the underlying data volume
    pub confidence_level: f64,
    /// Overall health score, 0-100
    pub overall_score: f64,
}

/// Insight engine
pub struct InsightEngine<S: AnalyticsStrategy = DefaultStrategy> {
    strategy: S,
}

impl InsightEngine {
    /// Create an engine backed by the global configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: DefaultStrategy,
        }
    }
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AnalyticsStrategy> InsightEngine<S> {
    /// Create an engine with a custom strategy
    #[must_use]
    pub const fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Derive risk and positive factors from every analysis
    #[must_use]
    pub fn generate_insights(
        &self,
        score: &HealthScore,
        trends: &TrendAnalysis,
        patterns: &BehaviorPatterns,
        correlations: &CorrelationAnalysis,
    ) -> HealthInsights {
        let config = self.strategy.insights();
        let data_confidence = clamp_unit(score.data_points as f64 / config.full_confidence_records)
            .clamp(config.min_data_confidence, config.max_data_confidence);
        let mut factors = Factors {
            base_confidence: config.score_confidence.min(data_confidence),
            ..Factors::default()
        };

        self.domain_factors(score, &mut factors);
        self.trend_factors(trends, &mut factors);
        self.correlation_factors(correlations, &mut factors);
        self.pattern_factors(patterns, &mut factors);

        let risk_factors = factors.risks.into_sorted(|a, b| {
            b.risk_level
                .cmp(&a.risk_level)
                .then(b.confidence.total_cmp(&a.confidence))
        });
        let positive_factors = factors
            .positives
            .into_sorted(|a, b| b.confidence.total_cmp(&a.confidence));

        let alert_level = if risk_factors
            .iter()
            .any(|f| f.risk_level == Some(RiskLevel::High))
        {
            RiskLevel::High
        } else if risk_factors.len() > config.medium_alert_risk_count
            || score.overall < config.medium_alert_score
        {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        let key_findings = key_findings(score, &risk_factors, &positive_factors, config);
        debug!(
            risks = risk_factors.len(),
            positives = positive_factors.len(),
            alert = %alert_level,
            "Generated insights"
        );

        HealthInsights {
            key_findings,
            risk_factors,
            positive_factors,
            tracking_gaps: factors.tracking_gaps,
            alert_level,
            confidence_level: self.strategy.round_score(data_confidence),
            overall_score: score.overall,
        }
    }

    /// Low domain scores are risks, high ones strengths; neutral fallbacks are skipped
    fn domain_factors(&self, score: &HealthScore, factors: &mut Factors) {
        let config = self.strategy.insights();
        for factor in score.factors.iter().filter(|f| f.record_count > 0) {
            let key = format!("domain:{}", factor.domain);
            let evidence = vec![factor.description.clone()];
            if factor.score < config.risk_score_threshold {
                let gap = config.risk_score_threshold - factor.score;
                factors.risks.insert(InsightFactor {
                    key,
                    title: format!("{} is below the healthy range", factor.domain.label()),
                    evidence,
                    confidence: factors.base_confidence,
                    risk_level: Some(level_from_gap(gap, config)),
                    source: InsightSource::DomainScore,
                });
            } else if factor.score >= config.positive_score_threshold {
                factors.positives.insert(InsightFactor {
                    key,
                    title: format!("{} is a strength", factor.domain.label()),
                    evidence,
                    confidence: factors.base_confidence,
                    risk_level: None,
                    source: InsightSource::DomainScore,
                });
            }
        }
    }

    /// Declining metrics are risks, improving ones strengths
    fn trend_factors(&self, trends: &TrendAnalysis, factors: &mut Factors) {
        let config = self.strategy.insights();
        for trend in trends
            .metric_trends
            .iter()
            .filter(|t| t.metric != TrendMetric::MovementFrequency)
        {
            let key = format!("trend:{}", trend.metric);
            let evidence = vec![format!(
                "{} changed {:+.0}% across {} periods",
                trend.metric.label(),
                trend.relative_change * 100.0,
                trend.values.len()
            )];
            let confidence = factors.base_confidence.min(trend.confidence);
            match trend.direction {
                TrendDirection::Declining => factors.risks.insert(InsightFactor {
                    key,
                    title: format!("{} is declining", trend.metric.label()),
                    evidence,
                    confidence,
                    risk_level: Some(level_from_decline(trend.relative_change.abs(), config)),
                    source: InsightSource::Trend,
                }),
                TrendDirection::Improving => factors.positives.insert(InsightFactor {
                    key,
                    title: format!("{} is improving", trend.metric.label()),
                    evidence,
                    confidence,
                    risk_level: None,
                    source: InsightSource::Trend,
                }),
                TrendDirection::Stable => {}
            }
        }

        for risk in &trends.risk_factors {
            let confidence = trends
                .metric(risk.metric)
                .map_or(factors.base_confidence, |t| {
                    factors.base_confidence.min(t.confidence)
                });
            factors.risks.insert(InsightFactor {
                key: format!("trend:{}", risk.metric),
                title: format!("{} is declining", risk.metric.label()),
                evidence: vec![risk.description.clone()],
                confidence,
                risk_level: Some(risk.level),
                source: InsightSource::Trend,
            });
        }
    }

    /// Strong positive meal correlations are risks, strong negative ones strengths
    fn correlation_factors(&self, correlations: &CorrelationAnalysis, factors: &mut Factors) {
        let config = self.strategy.insights();
        for correlation in correlations
            .meal_correlations()
            .filter(|c| c.strength.abs() >= config.correlation_threshold)
        {
            let key = format!("correlation:{}:{}", correlation.factor_a, correlation.factor_b);
            let trigger = correlation.factor_a.replace('_', " ");
            let outcome = correlation.factor_b.replace('_', " ");
            let evidence = vec![format!(
                "{} correlation ({:+.2}) across {} observations",
                correlation.interpretation, correlation.strength, correlation.sample_size
            )];
            let confidence = factors.base_confidence.min(correlation.confidence);
            if correlation.strength > 0.0 {
                let level = if correlation.strength >= config.high_correlation {
                    RiskLevel::High
                } else {
                    RiskLevel::Medium
                };
                factors.risks.insert(InsightFactor {
                    key,
                    title: format!("{trigger} meals are linked to {outcome} problems"),
                    evidence,
                    confidence,
                    risk_level: Some(level),
                    source: InsightSource::Correlation,
                });
            } else {
                factors.positives.insert(InsightFactor {
                    key,
                    title: format!("{trigger} meals are linked to fewer {outcome} problems"),
                    evidence,
                    confidence,
                    risk_level: None,
                    source: InsightSource::Correlation,
                });
            }
        }
    }

    /// Adverse patterns are risks, beneficial ones strengths; rare ones are tracking gaps
    fn pattern_factors(&self, patterns: &BehaviorPatterns, factors: &mut Factors) {
        let config = self.strategy.insights();
        for pattern in patterns.all() {
            let confidence = factors.base_confidence.min(pattern.confidence);
            let low_confidence = pattern.confidence < config.low_pattern_confidence;
            if low_confidence {
                factors.tracking_gaps.push(pattern_factor(
                    pattern,
                    format!("tracking:{}", pattern.kind.key()),
                    confidence,
                    Some(RiskLevel::Low),
                ));
            }

            let key = format!("pattern:{}", pattern.kind.key());
            if pattern.adverse {
                let level = if low_confidence {
                    RiskLevel::Low
                } else {
                    RiskLevel::Medium
                };
                factors
                    .risks
                    .insert(pattern_factor(pattern, key, confidence, Some(level)));
            } else {
                factors
                    .positives
                    .insert(pattern_factor(pattern, key, confidence, None));
            }
        }
    }
}

/// Factors collected during one insight pass
#[derive(Default)]
struct Factors {
    base_confidence: f64,
    risks: FactorSet,
    positives: FactorSet,
    tracking_gaps: Vec<InsightFactor>,
}

/// Factors keyed by cause; a repeated key keeps the higher risk level and
/// the lower confidence, and merges evidence
#[derive(Default)]
struct FactorSet {
    factors: BTreeMap<String, InsightFactor>,
}

impl FactorSet {
    fn insert(&mut self, factor: InsightFactor) {
        match self.factors.get_mut(&factor.key) {
            Some(existing) => {
                existing.risk_level = existing.risk_level.max(factor.risk_level);
                existing.confidence = existing.confidence.min(factor.confidence);
                for line in factor.evidence {
                    if !existing.evidence.contains(&line) {
                        existing.evidence.push(line);
                    }
                }
            }
            None => {
                self.factors.insert(factor.key.clone(), factor);
            }
        }
    }

    fn into_sorted(
        self,
        order: impl FnMut(&InsightFactor, &InsightFactor) -> Ordering,
    ) -> Vec<InsightFactor> {
        let mut factors: Vec<InsightFactor> = self.factors.into_values().collect();
        factors.sort_by(order);
        factors
    }
}

fn pattern_factor(
    pattern: &Pattern,
    key: String,
    confidence: f64,
    risk_level: Option<RiskLevel>,
) -> InsightFactor {
    InsightFactor {
        key,
        title: pattern.description.clone(),
        evidence: vec![format!(
            "Observed {} times out of {}",
            pattern.occurrences, pattern.window
        )],
        confidence,
        risk_level,
        source: InsightSource::Pattern,
    }
}

fn level_from_gap(gap: f64, config: &InsightConfig) -> RiskLevel {
    if gap >= config.high_risk_gap {
        RiskLevel::High
    } else if gap >= config.medium_risk_gap {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn level_from_decline(decline: f64, config: &InsightConfig) -> RiskLevel {
    if decline >= config.high_decline {
        RiskLevel::High
    } else if decline >= config.medium_decline {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn key_findings(
    score: &HealthScore,
    risks: &[InsightFactor],
    positives: &[InsightFactor],
    config: &InsightConfig,
) -> Vec<String> {
    let mut findings = vec![format!(
        "Overall gut health score is {:.0}/100 and {}",
        score.overall,
        match score.trend_direction {
            TrendDirection::Improving => "improving",
            TrendDirection::Stable => "stable",
            TrendDirection::Declining => "declining",
        }
    )];
    findings.extend(risks.iter().map(|f| f.title.clone()));
    findings.extend(positives.iter().map(|f| f.title.clone()));
    findings.truncate(config.max_key_findings);
    findings
}
