// ABOUTME: Analytics configuration for the gut health engine with env overrides and validation
// ABOUTME: Hosts the AnalyticsStrategy seam and its default and explicitly configured strategies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Analytics Configuration Module
//!
//! Type-safe configuration for every analyzer in the engine.
//!
//! # Module Structure
//!
//! - `scoring` - Domain score heuristics (Bristol band, cadence, meal size, compliance)
//! - `correlation` - Meal-to-outcome correlation window and confidence growth
//! - `trends` - Bucketing, direction threshold, and trend risk thresholds
//! - `patterns` - Recurring behavior detection thresholds
//! - `health_score` - Domain weights, neutral fallbacks, and benchmarks
//! - `insights` - Risk, alert, and recommendation thresholds
//!
//! # Environment overrides
//!
//! [`AnalyticsConfig::load`] starts from the defaults and applies
//! `GUT_ANALYTICS_*` variables before validating.

pub mod correlation;
pub mod error;
pub mod health_score;
pub mod insights;
pub mod patterns;
pub mod scoring;
pub mod trends;

pub use correlation::CorrelationConfig;
pub use error::ConfigError;
pub use health_score::HealthScoreConfig;
pub use insights::InsightConfig;
pub use patterns::PatternConfig;
pub use scoring::ScoringConfig;
pub use trends::{SignificantTrendConfig, TrendConfig};

use crate::statistics::{clamp_unit, mean, round_to};
use chrono::{DateTime, Duration, Utc};
use gut_core::constants::scales::{BRISTOL_MAX, BRISTOL_MIN};
use gut_core::models::{BristolType, Medication};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};
use tracing::warn;

/// Global configuration singleton
static ANALYTICS_CONFIG: OnceLock<AnalyticsConfig> = OnceLock::new();

/// Tolerance when checking that weights sum to 1.0
const WEIGHT_TOLERANCE: f64 = 0.01;

/// Main analytics configuration container
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Domain score heuristics
    pub scoring: ScoringConfig,
    /// Meal-to-outcome correlation
    pub correlation: CorrelationConfig,
    /// Metric trend classification
    pub trends: TrendConfig,
    /// Behavior pattern detection
    pub patterns: PatternConfig,
    /// Composite health score
    pub health_score: HealthScoreConfig,
    /// Insights and recommendations
    pub insights: InsightConfig,
}

impl AnalyticsConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        ANALYTICS_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load analytics config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scoring = &self.scoring;
        if scoring.healthy_bristol_min < BRISTOL_MIN || scoring.healthy_bristol_max > BRISTOL_MAX {
            return Err(ConfigError::InvalidRange(
                "healthy Bristol band must lie within 1..=7",
            ));
        }
        if scoring.healthy_bristol_min > scoring.healthy_bristol_max {
            return Err(ConfigError::InvalidRange(
                "healthy_bristol_min must be <= healthy_bristol_max",
            ));
        }
        if scoring.ideal_gap_hours <= 0.0 || scoring.ideal_meal_calories <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "ideal gap and ideal meal calories must be positive",
            ));
        }
        if (scoring.calorie_weight + scoring.fiber_weight - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "Nutrition weights must sum to 1.0",
            ));
        }
        if scoring.compliance_window_hours <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "compliance_window_hours must be positive",
            ));
        }
        if scoring.healthy_meal_max_calories > scoring.large_meal_calories {
            return Err(ConfigError::InvalidRange(
                "healthy_meal_max_calories must be <= large_meal_calories",
            ));
        }

        if self.correlation.max_time_gap_hours <= 0.0 || self.correlation.strength_scale <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "correlation window and strength scale must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&self.correlation.max_confidence) {
            return Err(ConfigError::ValueOutOfRange(
                "max_confidence must be within 0..=1",
            ));
        }

        if self.trends.bucket_days == 0 {
            return Err(ConfigError::ValueOutOfRange("bucket_days must be positive"));
        }
        if self.trends.change_threshold < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "change_threshold must not be negative",
            ));
        }

        if self.patterns.min_occurrences == 0
            || self.patterns.followup_window_hours <= 0
            || self.patterns.rolling_window_days == 0
        {
            return Err(ConfigError::ValueOutOfRange(
                "pattern occurrences and windows must be positive",
            ));
        }
        if self.patterns.hard_bristol >= self.patterns.loose_bristol {
            return Err(ConfigError::InvalidRange(
                "hard_bristol must be < loose_bristol",
            ));
        }

        if (self.health_score.weight_sum() - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "Health score domain weights must sum to 1.0",
            ));
        }
        let hs = &self.health_score;
        if hs.population_average > hs.healthy_benchmark || hs.healthy_benchmark > hs.optimal_benchmark
        {
            return Err(ConfigError::InvalidRange(
                "benchmarks must be ordered: population <= healthy <= optimal",
            ));
        }

        let insights = &self.insights;
        if insights.medium_risk_gap > insights.high_risk_gap {
            return Err(ConfigError::InvalidRange(
                "medium_risk_gap must be <= high_risk_gap",
            ));
        }
        if insights.medium_decline > insights.high_decline {
            return Err(ConfigError::InvalidRange(
                "medium_decline must be <= high_decline",
            ));
        }
        if insights.min_data_confidence > insights.max_data_confidence {
            return Err(ConfigError::InvalidRange(
                "min_data_confidence must be <= max_data_confidence",
            ));
        }
        if insights.max_recommendations == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "max_recommendations must be positive",
            ));
        }

        Ok(())
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val.trim().parse().map_err(|_| ConfigError::Parse {
                var: env_var_name.to_owned(),
                value: val.clone(),
            })?;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Scoring overrides
        Self::apply_env_var(
            "GUT_ANALYTICS_HEALTHY_BRISTOL_MIN",
            &mut self.scoring.healthy_bristol_min,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_HEALTHY_BRISTOL_MAX",
            &mut self.scoring.healthy_bristol_max,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_IDEAL_GAP_HOURS",
            &mut self.scoring.ideal_gap_hours,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_IDEAL_MEAL_CALORIES",
            &mut self.scoring.ideal_meal_calories,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_COMPLIANCE_WINDOW_HOURS",
            &mut self.scoring.compliance_window_hours,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_LARGE_MEAL_CALORIES",
            &mut self.scoring.large_meal_calories,
        )?;

        // Correlation overrides
        Self::apply_env_var(
            "GUT_ANALYTICS_MAX_TIME_GAP_HOURS",
            &mut self.correlation.max_time_gap_hours,
        )?;

        // Trend overrides
        Self::apply_env_var(
            "GUT_ANALYTICS_TREND_BUCKET_DAYS",
            &mut self.trends.bucket_days,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_TREND_CHANGE_THRESHOLD",
            &mut self.trends.change_threshold,
        )?;

        // Pattern overrides
        Self::apply_env_var(
            "GUT_ANALYTICS_PATTERN_MIN_OCCURRENCES",
            &mut self.patterns.min_occurrences,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_PATTERN_FOLLOWUP_HOURS",
            &mut self.patterns.followup_window_hours,
        )?;

        // Health score weights
        Self::apply_env_var(
            "GUT_ANALYTICS_WEIGHT_BOWEL",
            &mut self.health_score.bowel_weight,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_WEIGHT_DIET",
            &mut self.health_score.diet_weight,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_WEIGHT_SYMPTOM",
            &mut self.health_score.symptom_weight,
        )?;
        Self::apply_env_var(
            "GUT_ANALYTICS_WEIGHT_MEDICATION",
            &mut self.health_score.medication_weight,
        )?;

        // Insight overrides
        Self::apply_env_var(
            "GUT_ANALYTICS_MAX_RECOMMENDATIONS",
            &mut self.insights.max_recommendations,
        )?;

        Ok(self)
    }
}

/// Pluggable scoring strategy shared by every analyzer
///
/// Implementors supply a configuration; the score formulas are default
/// methods so an alternate strategy can override a single heuristic without
/// touching the orchestration layer.
pub trait AnalyticsStrategy: Send + Sync + 'static {
    /// Configuration backing this strategy
    fn config(&self) -> &AnalyticsConfig;

    /// Domain score heuristics
    fn scoring(&self) -> &ScoringConfig {
        &self.config().scoring
    }

    /// Correlation parameters
    fn correlation(&self) -> &CorrelationConfig {
        &self.config().correlation
    }

    /// Trend parameters
    fn trends(&self) -> &TrendConfig {
        &self.config().trends
    }

    /// Pattern parameters
    fn patterns(&self) -> &PatternConfig {
        &self.config().patterns
    }

    /// Health score weights
    fn health_score(&self) -> &HealthScoreConfig {
        &self.config().health_score
    }

    /// Insight thresholds
    fn insights(&self) -> &InsightConfig {
        &self.config().insights
    }

    /// Round a score to the configured precision
    fn round_score(&self, value: f64) -> f64 {
        round_to(value, self.scoring().score_decimals)
    }

    /// Whether a Bristol type falls in the healthy band
    fn is_healthy_bristol(&self, bristol: BristolType) -> bool {
        let scoring = self.scoring();
        bristol.within(scoring.healthy_bristol_min, scoring.healthy_bristol_max)
    }

    /// Healthy-band share penalized by adjacent type changes, over
    /// chronologically ordered types
    fn consistency_score(&self, types: &[BristolType]) -> f64 {
        if types.is_empty() {
            return 0.0;
        }
        let healthy = types.iter().filter(|t| self.is_healthy_bristol(**t)).count();
        let healthy_ratio = healthy as f64 / types.len() as f64;
        let change_ratio = if types.len() < 2 {
            0.0
        } else {
            let changes = types.windows(2).filter(|w| w[0] != w[1]).count();
            changes as f64 / (types.len() - 1) as f64
        };
        self.round_score(clamp_unit(healthy_ratio * (1.0 - change_ratio)))
    }

    /// One minus the variance of inter-movement gaps around the ideal
    /// cadence, over chronologically ordered timestamps
    fn regularity_score(&self, times: &[DateTime<Utc>]) -> f64 {
        if times.len() < 2 {
            return 0.0;
        }
        let ideal = self.scoring().ideal_gap_hours;
        let deviations: Vec<f64> = times
            .windows(2)
            .map(|w| {
                let gap_hours = (w[1] - w[0]).num_seconds() as f64 / 3600.0;
                (gap_hours - ideal).powi(2)
            })
            .collect();
        let variance = mean(&deviations);
        self.round_score(clamp_unit(1.0 - variance / ideal.powi(2)))
    }

    /// Calorie proximity to the ideal meal blended with the fiber-rich share
    fn nutrition_score(&self, average_calories: f64, fiber_ratio: f64) -> f64 {
        let scoring = self.scoring();
        let ideal = scoring.ideal_meal_calories;
        let proximity = (1.0 - (average_calories - ideal).abs() / ideal).max(0.0);
        self.round_score(clamp_unit(
            scoring
                .calorie_weight
                .mul_add(proximity, scoring.fiber_weight * clamp_unit(fiber_ratio)),
        ))
    }

    /// Active medications taken within the compliance window (or with no
    /// dose recorded) over all medications on file
    fn compliance_score(&self, medications: &[Medication], now: DateTime<Utc>) -> f64 {
        if medications.is_empty() {
            return 0.0;
        }
        let compliant = medications
            .iter()
            .filter(|m| self.is_compliant(m, now))
            .count();
        self.round_score(clamp_unit(compliant as f64 / medications.len() as f64))
    }

    /// Whether one medication counts as taken
    fn is_compliant(&self, medication: &Medication, now: DateTime<Utc>) -> bool {
        let window = Duration::hours(self.scoring().compliance_window_hours);
        medication.is_active
            && medication
                .taken_at
                .is_none_or(|taken| now - taken <= window)
    }
}

/// Shared strategies forward every heuristic so overrides survive the `Arc`
impl<S: AnalyticsStrategy> AnalyticsStrategy for Arc<S> {
    fn config(&self) -> &AnalyticsConfig {
        self.as_ref().config()
    }

    fn round_score(&self, value: f64) -> f64 {
        self.as_ref().round_score(value)
    }

    fn is_healthy_bristol(&self, bristol: BristolType) -> bool {
        self.as_ref().is_healthy_bristol(bristol)
    }

    fn consistency_score(&self, types: &[BristolType]) -> f64 {
        self.as_ref().consistency_score(types)
    }

    fn regularity_score(&self, times: &[DateTime<Utc>]) -> f64 {
        self.as_ref().regularity_score(times)
    }

    fn nutrition_score(&self, average_calories: f64, fiber_ratio: f64) -> f64 {
        self.as_ref().nutrition_score(average_calories, fiber_ratio)
    }

    fn compliance_score(&self, medications: &[Medication], now: DateTime<Utc>) -> f64 {
        self.as_ref().compliance_score(medications, now)
    }

    fn is_compliant(&self, medication: &Medication, now: DateTime<Utc>) -> bool {
        self.as_ref().is_compliant(medication, now)
    }
}

/// Default strategy using global configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStrategy;

impl AnalyticsStrategy for DefaultStrategy {
    fn config(&self) -> &AnalyticsConfig {
        AnalyticsConfig::global()
    }
}

/// Strategy owning an explicit configuration
#[derive(Debug, Clone, Default)]
pub struct ConfiguredStrategy {
    config: AnalyticsConfig,
}

impl ConfiguredStrategy {
    /// Wrap an explicit configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation
    pub fn new(config: AnalyticsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Conservative strategy: narrower healthy band and a tighter
    /// compliance window
    #[must_use]
    pub fn conservative() -> Self {
        let mut config = AnalyticsConfig::default();
        config.scoring.healthy_bristol_min = 4;
        config.scoring.healthy_bristol_max = 4;
        config.scoring.compliance_window_hours = 24;
        config.trends.change_threshold = 0.05;
        Self { config }
    }
}

impl AnalyticsStrategy for ConfiguredStrategy {
    fn config(&self) -> &AnalyticsConfig {
        &self.config
    }
}
