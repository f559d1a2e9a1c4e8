// ABOUTME: Composite 0-100 gut health score from the four domain summaries
// ABOUTME: Weighted bowel, diet, symptom, and medication components with factor breakdown and benchmarks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::aggregator::{BowelMovementSummary, MealSummary, MedicationSummary, SymptomSummary};
use crate::config::{AnalyticsStrategy, DefaultStrategy};
use crate::statistics::mean;
use crate::trends::{TrendAnalysis, TrendDirection, TrendMetric};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Scored health domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthDomain {
    /// Bowel consistency and regularity
    Bowel,
    /// Meal nutrition
    Diet,
    /// Symptom burden
    Symptom,
    /// Medication adherence
    Medication,
}

impl HealthDomain {
    /// Every domain in declaration order
    pub const ALL: [Self; 4] = [Self::Bowel, Self::Diet, Self::Symptom, Self::Medication];

    /// Stable key used in factor identifiers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bowel => "bowel",
            Self::Diet => "diet",
            Self::Symptom => "symptom",
            Self::Medication => "medication",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bowel => "Bowel health",
            Self::Diet => "Diet quality",
            Self::Symptom => "Symptom burden",
            Self::Medication => "Medication adherence",
        }
    }

    /// Trend metric that best tracks this domain
    #[must_use]
    pub const fn trend_metric(self) -> Option<TrendMetric> {
        match self {
            Self::Bowel => Some(TrendMetric::BowelRegularity),
            Self::Diet => Some(TrendMetric::NutritionScore),
            Self::Symptom => Some(TrendMetric::SymptomSeverity),
            Self::Medication => None,
        }
    }
}

impl fmt::Display for HealthDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One domain's share of the overall score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreFactor {
    /// Domain
    pub domain: HealthDomain,
    /// Domain score, 0-100
    pub score: f64,
    /// Weight in the overall score
    pub weight: f64,
    /// `score * weight`
    pub contribution: f64,
    /// Distance from the neutral midpoint of 50
    pub impact: f64,
    /// Tiered explanation
    pub description: String,
    /// Direction of the domain's tracking metric
    pub trend: TrendDirection,
    /// Records behind the domain score, 0 when the neutral fallback was used
    pub record_count: usize,
}

/// Reference points for the overall score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmarks {
    /// Typical population score
    pub population_average: f64,
    /// Score considered healthy
    pub healthy: f64,
    /// Score considered optimal
    pub optimal: f64,
}

/// Composite gut health score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    /// Weighted overall score, 0-100
    pub overall: f64,
    /// Score per domain, 0-100
    pub components: BTreeMap<HealthDomain, f64>,
    /// Per-domain breakdown sorted by impact, highest first
    pub factors: Vec<ScoreFactor>,
    /// Direction of bowel regularity, `Stable` without trend data
    pub trend_direction: TrendDirection,
    /// Reference points
    pub benchmarks: Benchmarks,
    /// Records behind the score
    pub data_points: usize,
}

impl HealthScore {
    /// Score of one domain
    #[must_use]
    pub fn component(&self, domain: HealthDomain) -> f64 {
        self.components.get(&domain).copied().unwrap_or_default()
    }

    /// Breakdown of one domain
    #[must_use]
    pub fn factor(&self, domain: HealthDomain) -> Option<&ScoreFactor> {
        self.factors.iter().find(|f| f.domain == domain)
    }
}

/// Health score engine
pub struct HealthScoreCalculator<S: AnalyticsStrategy = DefaultStrategy> {
    strategy: S,
}

impl HealthScoreCalculator {
    /// Create a calculator backed by the global configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: DefaultStrategy,
        }
    }
}

impl Default for HealthScoreCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AnalyticsStrategy> HealthScoreCalculator<S> {
    /// Create a calculator with a custom strategy
    #[must_use]
    pub const fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Combine the domain summaries into one score
    #[must_use]
    pub fn calculate_health_score(
        &self,
        bowel: &BowelMovementSummary,
        meals: &MealSummary,
        symptoms: &SymptomSummary,
        medications: &MedicationSummary,
        trends: Option<&TrendAnalysis>,
    ) -> HealthScore {
        let config = self.strategy.health_score();
        let domains = [
            (
                HealthDomain::Bowel,
                self.bowel_score(bowel),
                config.bowel_weight,
                bowel.total_count,
            ),
            (
                HealthDomain::Diet,
                self.diet_score(meals),
                config.diet_weight,
                meals.total_meals,
            ),
            (
                HealthDomain::Symptom,
                self.symptom_score(symptoms),
                config.symptom_weight,
                symptoms.total_symptoms,
            ),
            (
                HealthDomain::Medication,
                self.medication_score(medications),
                config.medication_weight,
                medications.total_medications,
            ),
        ];

        let mut components = BTreeMap::new();
        let mut factors = Vec::with_capacity(domains.len());
        let mut overall = 0.0;
        for (domain, score, weight, record_count) in domains {
            let score = self.strategy.round_score(score.clamp(0.0, 100.0));
            let contribution = score * weight;
            overall += contribution;
            components.insert(domain, score);
            factors.push(ScoreFactor {
                domain,
                score,
                weight,
                contribution: self.strategy.round_score(contribution),
                impact: self.strategy.round_score(score - 50.0),
                description: describe(domain, score),
                trend: trends
                    .zip(domain.trend_metric())
                    .map_or(TrendDirection::Stable, |(t, metric)| t.direction_of(metric)),
                record_count,
            });
        }
        factors.sort_by(|a, b| b.impact.total_cmp(&a.impact));

        let score = HealthScore {
            overall: self.strategy.round_score(overall.clamp(0.0, 100.0)),
            components,
            factors,
            trend_direction: trends.map_or(TrendDirection::Stable, |t| {
                t.direction_of(TrendMetric::BowelRegularity)
            }),
            benchmarks: Benchmarks {
                population_average: config.population_average,
                healthy: config.healthy_benchmark,
                optimal: config.optimal_benchmark,
            },
            data_points: bowel.total_count
                + meals.total_meals
                + symptoms.total_symptoms
                + medications.total_medications,
        };
        debug!(
            overall = score.overall,
            data_points = score.data_points,
            "Calculated health score"
        );
        score
    }

    fn bowel_score(&self, summary: &BowelMovementSummary) -> f64 {
        if summary.total_count == 0 {
            return self.strategy.health_score().neutral_bowel;
        }
        100.0 * mean(&[summary.consistency_score, summary.regularity_score])
    }

    fn diet_score(&self, summary: &MealSummary) -> f64 {
        if summary.total_meals == 0 {
            return self.strategy.health_score().neutral_diet;
        }
        100.0 * summary.nutrition_score
    }

    fn symptom_score(&self, summary: &SymptomSummary) -> f64 {
        let config = self.strategy.health_score();
        if summary.total_symptoms == 0 {
            return config.neutral_symptom;
        }
        let severity_term = (10.0 - summary.average_severity) / 10.0;
        let frequency_term =
            (1.0 - summary.average_per_day / config.symptom_frequency_ceiling).max(0.0);
        100.0 * mean(&[severity_term, frequency_term])
    }

    fn medication_score(&self, summary: &MedicationSummary) -> f64 {
        if summary.total_medications == 0 {
            return self.strategy.health_score().neutral_medication;
        }
        100.0 * summary.compliance_score
    }
}

fn describe(domain: HealthDomain, score: f64) -> String {
    let tier = if score > 75.0 {
        "is strong"
    } else if score > 50.0 {
        "is fair with room to improve"
    } else {
        "needs attention"
    };
    format!("{} {tier} ({score:.0}/100)", domain.label())
}
