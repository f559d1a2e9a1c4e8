// ABOUTME: Trend analysis over bucketed daily data points
// ABOUTME: Classifies metric direction, raises trend risk factors, and reports significant shifts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Trend Analyzer
//!
//! Splits the daily series into fixed-size buckets and tracks one value per
//! bucket for each [`TrendMetric`]. Direction compares the first and last
//! thirds of the bucket series against a relative threshold, with
//! favourability depending on the metric.

use crate::aggregator::DailyDataPoint;
use crate::config::{AnalyticsStrategy, DefaultStrategy};
use crate::statistics::{linear_regression, mean, weighted_average};
use gut_core::models::DateRange;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Metric tracked across buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    /// Mean bowel pain, lower is better
    PainAverage,
    /// Mean bowel satisfaction, higher is better
    SatisfactionAverage,
    /// Mean symptom severity, lower is better
    SymptomSeverity,
    /// Nutrition score of the bucket's meals, higher is better
    NutritionScore,
    /// Share of days with a regular movement count, higher is better
    BowelRegularity,
    /// Movements per day
    MovementFrequency,
}

impl TrendMetric {
    /// Every metric in declaration order
    pub const ALL: [Self; 6] = [
        Self::PainAverage,
        Self::SatisfactionAverage,
        Self::SymptomSeverity,
        Self::NutritionScore,
        Self::BowelRegularity,
        Self::MovementFrequency,
    ];

    /// Stable key used in factor identifiers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PainAverage => "pain_average",
            Self::SatisfactionAverage => "satisfaction_average",
            Self::SymptomSeverity => "symptom_severity",
            Self::NutritionScore => "nutrition_score",
            Self::BowelRegularity => "bowel_regularity",
            Self::MovementFrequency => "movement_frequency",
        }
    }

    /// Human-readable name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PainAverage => "Bowel pain",
            Self::SatisfactionAverage => "Bowel satisfaction",
            Self::SymptomSeverity => "Symptom severity",
            Self::NutritionScore => "Nutrition quality",
            Self::BowelRegularity => "Bowel regularity",
            Self::MovementFrequency => "Movement frequency",
        }
    }

    /// Whether a rising value is a health improvement
    #[must_use]
    pub const fn higher_is_better(self) -> bool {
        !matches!(self, Self::PainAverage | Self::SymptomSeverity)
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a metric over the period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendDirection {
    /// Moved in the healthy direction beyond the threshold
    Improving,
    /// Within the threshold
    #[default]
    Stable,
    /// Moved in the unhealthy direction beyond the threshold
    Declining,
}

impl TrendDirection {
    /// Upper-case name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Improving => "IMPROVING",
            Self::Stable => "STABLE",
            Self::Declining => "DECLINING",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity attached to a risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    /// Worth watching
    Low,
    /// Needs attention
    Medium,
    /// Needs prompt attention
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        })
    }
}

/// Bucket series and classification for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricTrend {
    /// Metric
    pub metric: TrendMetric,
    /// One value per non-empty bucket
    pub values: Vec<f64>,
    /// Classified direction
    pub direction: TrendDirection,
    /// Least-squares change per bucket
    pub slope: f64,
    /// Change of the last third against the first third
    pub relative_change: f64,
    /// Fit quality of the slope, 0 with fewer than three buckets
    pub confidence: f64,
}

/// Declining metric whose worst bucket crossed its risk threshold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRiskFactor {
    /// Metric at risk
    pub metric: TrendMetric,
    /// Severity
    pub level: RiskLevel,
    /// Worst bucket value
    pub worst_value: f64,
    /// Threshold crossed
    pub threshold: f64,
    /// Explanation
    pub description: String,
    /// Suggested mitigations
    pub mitigations: Vec<String>,
}

/// Full trend result for one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    /// Analyzed period
    pub period: DateRange,
    /// Days per bucket
    pub bucket_days: usize,
    /// Bucket values per metric
    pub health_trends: BTreeMap<TrendMetric, Vec<f64>>,
    /// Classification per metric
    pub metric_trends: Vec<MetricTrend>,
    /// Majority direction across metrics
    pub overall_trend: TrendDirection,
    /// Declining metrics past their threshold
    pub risk_factors: Vec<TrendRiskFactor>,
    /// Plain-language first-half versus second-half changes
    pub significant_trends: Vec<String>,
}

impl TrendAnalysis {
    /// Classification for one metric
    #[must_use]
    pub fn metric(&self, metric: TrendMetric) -> Option<&MetricTrend> {
        self.metric_trends.iter().find(|t| t.metric == metric)
    }

    /// Direction for one metric, `Stable` when untracked
    #[must_use]
    pub fn direction_of(&self, metric: TrendMetric) -> TrendDirection {
        self.metric(metric)
            .map_or(TrendDirection::Stable, |t| t.direction)
    }
}

/// Trend engine
pub struct TrendAnalyzer<S: AnalyticsStrategy = DefaultStrategy> {
    strategy: S,
}

impl TrendAnalyzer {
    /// Create an analyzer backed by the global configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: DefaultStrategy,
        }
    }
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AnalyticsStrategy> TrendAnalyzer<S> {
    /// Create an analyzer with a custom strategy
    #[must_use]
    pub const fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Analyze the daily series of one period
    #[must_use]
    pub fn analyze(&self, daily: &[DailyDataPoint], period: &DateRange) -> TrendAnalysis {
        let bucket_days = self.strategy.trends().bucket_days.max(1);
        let buckets: Vec<&[DailyDataPoint]> = daily.chunks(bucket_days).collect();

        let mut health_trends = BTreeMap::new();
        let mut metric_trends = Vec::with_capacity(TrendMetric::ALL.len());
        for metric in TrendMetric::ALL {
            let values: Vec<f64> = buckets
                .iter()
                .filter_map(|bucket| self.bucket_value(metric, bucket))
                .map(|v| self.strategy.round_score(v))
                .collect();
            metric_trends.push(self.metric_trend(metric, &values));
            health_trends.insert(metric, values);
        }

        let risk_factors = self.risk_factors(&metric_trends);
        let overall_trend = overall_direction(&metric_trends);
        let significant_trends = self.significant_trends(daily);

        debug!(
            buckets = buckets.len(),
            overall = %overall_trend,
            risks = risk_factors.len(),
            "Analyzed trends"
        );

        TrendAnalysis {
            period: *period,
            bucket_days,
            health_trends,
            metric_trends,
            overall_trend,
            risk_factors,
            significant_trends,
        }
    }

    /// Classify a bucket series for `metric`, returning the direction and the
    /// signed relative change of the last third against the first third
    #[must_use]
    pub fn classify_direction(&self, metric: TrendMetric, values: &[f64]) -> (TrendDirection, f64) {
        let n = values.len();
        if n < 2 {
            return (TrendDirection::Stable, 0.0);
        }
        let k = (n / 3).max(1);
        let first = mean(&values[..k]);
        let last = mean(&values[n - k..]);
        let change = if first.abs() < f64::EPSILON {
            last - first
        } else {
            (last - first) / first.abs()
        };

        let favourable = if metric.higher_is_better() {
            change
        } else {
            -change
        };
        let threshold = self.strategy.trends().change_threshold;
        let direction = if favourable > threshold {
            TrendDirection::Improving
        } else if favourable < -threshold {
            TrendDirection::Declining
        } else {
            TrendDirection::Stable
        };
        (direction, change)
    }

    fn metric_trend(&self, metric: TrendMetric, values: &[f64]) -> MetricTrend {
        let (direction, relative_change) = self.classify_direction(metric, values);
        let fit = linear_regression(values);
        MetricTrend {
            metric,
            values: values.to_vec(),
            direction,
            slope: fit.map_or(0.0, |f| self.strategy.round_score(f.slope)),
            relative_change: self.strategy.round_score(relative_change),
            confidence: if values.len() < 3 {
                0.0
            } else {
                fit.map_or(0.0, |f| self.strategy.round_score(f.r_squared))
            },
        }
    }

    fn bucket_value(&self, metric: TrendMetric, bucket: &[DailyDataPoint]) -> Option<f64> {
        let movements: u32 = bucket.iter().map(|d| d.movement_count).sum();
        match metric {
            TrendMetric::PainAverage => weighted_day_average(bucket, |d| {
                d.pain_average.map(|v| (v, d.movement_count))
            }),
            TrendMetric::SatisfactionAverage => weighted_day_average(bucket, |d| {
                d.satisfaction_average.map(|v| (v, d.movement_count))
            }),
            TrendMetric::SymptomSeverity => weighted_day_average(bucket, |d| {
                d.symptom_severity_average.map(|v| (v, d.symptom_count))
            }),
            TrendMetric::NutritionScore => {
                let meals: u32 = bucket.iter().map(|d| d.meal_count).sum();
                if meals == 0 {
                    return None;
                }
                let calories: u64 = bucket.iter().map(|d| d.total_calories).sum();
                let fiber: u32 = bucket.iter().map(|d| d.fiber_rich_meal_count).sum();
                Some(self.strategy.nutrition_score(
                    calories as f64 / f64::from(meals),
                    f64::from(fiber) / f64::from(meals),
                ))
            }
            TrendMetric::BowelRegularity => {
                if movements == 0 {
                    return None;
                }
                let max = self.strategy.trends().regular_movements_max;
                let regular = bucket
                    .iter()
                    .filter(|d| (1..=max).contains(&d.movement_count))
                    .count();
                Some(regular as f64 / bucket.len() as f64)
            }
            TrendMetric::MovementFrequency => bucket
                .iter()
                .any(DailyDataPoint::has_data)
                .then(|| f64::from(movements) / bucket.len() as f64),
        }
    }

    fn risk_factors(&self, trends: &[MetricTrend]) -> Vec<TrendRiskFactor> {
        let config = self.strategy.trends();
        trends
            .iter()
            .filter(|t| t.direction == TrendDirection::Declining)
            .filter_map(|trend| {
                let (threshold, worst, crossed) = match trend.metric {
                    TrendMetric::PainAverage => {
                        let worst = max_value(&trend.values)?;
                        (config.pain_risk_threshold, worst, worst > config.pain_risk_threshold)
                    }
                    TrendMetric::SymptomSeverity => {
                        let worst = max_value(&trend.values)?;
                        (
                            config.severity_risk_threshold,
                            worst,
                            worst > config.severity_risk_threshold,
                        )
                    }
                    TrendMetric::SatisfactionAverage => {
                        let worst = min_value(&trend.values)?;
                        (
                            config.satisfaction_risk_threshold,
                            worst,
                            worst < config.satisfaction_risk_threshold,
                        )
                    }
                    TrendMetric::NutritionScore => {
                        let worst = min_value(&trend.values)?;
                        (
                            config.nutrition_risk_threshold,
                            worst,
                            worst < config.nutrition_risk_threshold,
                        )
                    }
                    TrendMetric::BowelRegularity => {
                        let worst = min_value(&trend.values)?;
                        (
                            config.regularity_risk_threshold,
                            worst,
                            worst < config.regularity_risk_threshold,
                        )
                    }
                    TrendMetric::MovementFrequency => return None,
                };
                if !crossed {
                    return None;
                }

                let margin = (worst - threshold).abs();
                let level = if margin >= config.high_risk_margin * threshold
                    || trend.relative_change.abs() > config.high_risk_change
                {
                    RiskLevel::High
                } else {
                    RiskLevel::Medium
                };
                Some(TrendRiskFactor {
                    metric: trend.metric,
                    level,
                    worst_value: worst,
                    threshold,
                    description: format!(
                        "{} is declining: worst period value {worst:.2} against a threshold of {threshold:.2}",
                        trend.metric.label()
                    ),
                    mitigations: mitigations(trend.metric)
                        .iter()
                        .map(|m| (*m).to_owned())
                        .collect(),
                })
            })
            .collect()
    }

    fn significant_trends(&self, daily: &[DailyDataPoint]) -> Vec<String> {
        let config = &self.strategy.trends().significant;
        let active: Vec<&DailyDataPoint> = daily.iter().filter(|d| d.has_data()).collect();
        let records: u32 = active.iter().map(|d| d.record_count()).sum();
        if active.len() < 2 || (records as usize) < config.min_records {
            return Vec::new();
        }
        let (first, second) = active.split_at(active.len() / 2);
        let first = HalfTotals::from_days(first);
        let second = HalfTotals::from_days(second);
        let mut statements = Vec::new();

        if let Some(change) = relative(first.movements_per_day(), second.movements_per_day()) {
            if change.abs() >= config.frequency_change {
                statements.push(format!(
                    "Bowel movement frequency {} by {:.0}%",
                    rise_or_fall(change),
                    change.abs() * 100.0
                ));
            }
        }
        if let (Some(before), Some(after)) = (first.bristol_average(), second.bristol_average()) {
            if (after - before).abs() >= config.bristol_change {
                statements.push(format!(
                    "Average stool form moved from Bristol {before:.1} to {after:.1}"
                ));
            }
        }
        if let (Some(before), Some(after)) = (first.fiber_ratio(), second.fiber_ratio()) {
            let change = after - before;
            if change.abs() >= config.fiber_change {
                statements.push(format!(
                    "Fiber-rich meal share {} by {:.0} points",
                    rise_or_fall(change),
                    change.abs() * 100.0
                ));
            }
        }
        if let Some(change) = relative(first.calories_per_meal(), second.calories_per_meal()) {
            if change.abs() >= config.calorie_change {
                statements.push(format!(
                    "Calories per meal {} by {:.0}%",
                    rise_or_fall(change),
                    change.abs() * 100.0
                ));
            }
        }
        if let Some(change) = relative(first.severity_average(), second.severity_average()) {
            if change.abs() >= config.severity_change {
                statements.push(format!(
                    "Symptom severity {} by {:.0}%",
                    rise_or_fall(change),
                    change.abs() * 100.0
                ));
            }
        }

        statements.truncate(config.max_statements);
        statements
    }
}

/// Totals over one half of the active days
#[derive(Debug, Default)]
struct HalfTotals {
    days: usize,
    movements: u32,
    meals: u32,
    calories: u64,
    fiber_meals: u32,
    bristol_pairs: Vec<(f64, f64)>,
    severity_pairs: Vec<(f64, f64)>,
}

impl HalfTotals {
    fn from_days(days: &[&DailyDataPoint]) -> Self {
        let mut totals = Self {
            days: days.len(),
            ..Self::default()
        };
        for day in days {
            totals.movements += day.movement_count;
            totals.meals += day.meal_count;
            totals.calories += day.total_calories;
            totals.fiber_meals += day.fiber_rich_meal_count;
            if let Some(bristol) = day.bristol_average {
                totals
                    .bristol_pairs
                    .push((bristol, f64::from(day.movement_count)));
            }
            if let Some(severity) = day.symptom_severity_average {
                totals
                    .severity_pairs
                    .push((severity, f64::from(day.symptom_count)));
            }
        }
        totals
    }

    fn movements_per_day(&self) -> Option<f64> {
        (self.days > 0).then(|| f64::from(self.movements) / self.days as f64)
    }

    fn bristol_average(&self) -> Option<f64> {
        (!self.bristol_pairs.is_empty()).then(|| weighted_average(&self.bristol_pairs))
    }

    fn severity_average(&self) -> Option<f64> {
        (!self.severity_pairs.is_empty()).then(|| weighted_average(&self.severity_pairs))
    }

    fn fiber_ratio(&self) -> Option<f64> {
        (self.meals > 0).then(|| f64::from(self.fiber_meals) / f64::from(self.meals))
    }

    fn calories_per_meal(&self) -> Option<f64> {
        (self.meals > 0).then(|| self.calories as f64 / f64::from(self.meals))
    }
}

/// Relative change from `before` to `after`, `None` without a positive baseline
fn relative(before: Option<f64>, after: Option<f64>) -> Option<f64> {
    let (before, after) = (before?, after?);
    (before > 0.0).then(|| (after - before) / before)
}

fn rise_or_fall(change: f64) -> &'static str {
    if change > 0.0 {
        "increased"
    } else {
        "decreased"
    }
}

/// Count-weighted mean over days where the metric exists
fn weighted_day_average(
    bucket: &[DailyDataPoint],
    value: impl Fn(&DailyDataPoint) -> Option<(f64, u32)>,
) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = bucket
        .iter()
        .filter_map(&value)
        .map(|(v, weight)| (v, f64::from(weight)))
        .collect();
    (!pairs.is_empty()).then(|| weighted_average(&pairs))
}

fn overall_direction(trends: &[MetricTrend]) -> TrendDirection {
    let improving = trends
        .iter()
        .filter(|t| t.direction == TrendDirection::Improving)
        .count();
    let declining = trends
        .iter()
        .filter(|t| t.direction == TrendDirection::Declining)
        .count();
    match improving.cmp(&declining) {
        Ordering::Greater => TrendDirection::Improving,
        Ordering::Less => TrendDirection::Declining,
        Ordering::Equal => TrendDirection::Stable,
    }
}

fn max_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().max_by(f64::total_cmp)
}

fn min_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().min_by(f64::total_cmp)
}

const fn mitigations(metric: TrendMetric) -> &'static [&'static str] {
    match metric {
        TrendMetric::PainAverage => &[
            "Log pain alongside the preceding meals to isolate triggers",
            "Increase water intake and fiber gradually",
            "Discuss persistent pain with a healthcare provider",
        ],
        TrendMetric::SatisfactionAverage => &[
            "Keep regular meal and bathroom times",
            "Avoid straining and allow enough time",
        ],
        TrendMetric::SymptomSeverity => &[
            "Review recent meals for common triggers",
            "Note stress and sleep alongside symptoms",
            "Seek medical advice if severity keeps rising",
        ],
        TrendMetric::NutritionScore => &[
            "Aim for balanced portions around 600 kcal",
            "Add a fiber-rich food to most meals",
        ],
        TrendMetric::BowelRegularity => &[
            "Keep a consistent daily routine",
            "Stay hydrated and physically active",
        ],
        TrendMetric::MovementFrequency => &[],
    }
}
