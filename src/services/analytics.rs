// ABOUTME: AnalyticsService fetching record snapshots and running the engine in dependency order
// ABOUTME: Seven produced operations from health overview through recommendations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Analytics Service
//!
//! Every operation follows the same path: resolve the requested window
//! against one captured "now", reject an inverted window before touching any
//! store, fetch the five snapshots concurrently, then run only the analyzers
//! the operation needs. Nothing is cached between requests.

use crate::clock::{Clock, SystemClock};
use crate::config::AnalyticsServiceConfig;
use crate::errors::{AppError, AppResult};
use crate::models::{DateRange, HealthOverview, HealthRecords};
use crate::stores::RecordStores;
use chrono::{DateTime, Utc};
use gut_intelligence::{
    AnalyticsStrategy, BehaviorPatterns, BowelMovementSummary, CorrelationAnalysis,
    CorrelationAnalyzer, DailyDataPoint, DataAggregator, DefaultStrategy, HealthInsights,
    HealthScore, HealthScoreCalculator, InsightEngine, MealSummary, MedicationSummary,
    PatternAnalyzer, Recommendation, RecommendationGenerator, SymptomSummary, TrendAnalysis,
    TrendAnalyzer,
};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Records fetched for one request
struct Snapshot {
    records: HealthRecords,
    range: DateRange,
    now: DateTime<Utc>,
}

/// Domain summaries of one snapshot
struct Summaries {
    bowel: BowelMovementSummary,
    meals: MealSummary,
    symptoms: SymptomSummary,
    medications: MedicationSummary,
}

/// Orchestrates record stores and the analytics engine
pub struct AnalyticsService<S: AnalyticsStrategy = DefaultStrategy> {
    stores: RecordStores,
    config: AnalyticsServiceConfig,
    strategy: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl AnalyticsService {
    /// Create a service backed by the global analytics configuration and the wall clock
    #[must_use]
    pub fn new(stores: RecordStores, config: AnalyticsServiceConfig) -> Self {
        Self::with_strategy(stores, config, DefaultStrategy)
    }
}

impl<S: AnalyticsStrategy> AnalyticsService<S> {
    /// Create a service with a custom strategy
    #[must_use]
    pub fn with_strategy(stores: RecordStores, config: AnalyticsServiceConfig, strategy: S) -> Self {
        Self {
            stores,
            config,
            strategy: Arc::new(strategy),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Service configuration
    #[must_use]
    pub const fn config(&self) -> &AnalyticsServiceConfig {
        &self.config
    }

    /// Resolve optional bounds: `end` defaults to now, `start` to
    /// `end - default_range_days`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when the resolved end precedes the start
    pub fn resolve_range(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<DateRange> {
        DateRange::resolve(start, end, self.clock.now(), self.config.default_range_days)
    }

    /// Domain summaries with the overall score and its trend direction
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted window or a failed store fetch
    #[instrument(skip(self))]
    pub async fn get_user_health_overview(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<HealthOverview> {
        let snapshot = self.snapshot(user_id, start, end).await?;
        let summaries = self.summarize(&snapshot);
        let trends = self.trends(&snapshot, &self.daily(&snapshot));
        let score = self.score(&summaries, &trends);

        let overview = HealthOverview {
            period: snapshot.range,
            bowel_movements: summaries.bowel,
            meals: summaries.meals,
            symptoms: summaries.symptoms,
            medications: summaries.medications,
            overall_health_score: score.overall,
            trend_direction: score.trend_direction,
        };
        info!(
            records = overview.record_count(),
            overall = overview.overall_health_score,
            "Built health overview"
        );
        Ok(overview)
    }

    /// Meal-to-outcome, day-level, trigger, and medication correlations
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted window or a failed store fetch
    #[instrument(skip(self))]
    pub async fn get_correlation_analysis(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<CorrelationAnalysis> {
        let snapshot = self.snapshot(user_id, start, end).await?;
        let analysis = self.correlations(&snapshot, &self.daily(&snapshot));
        info!(
            meal_correlations = analysis.meal_correlations().count(),
            daily_correlations = analysis.daily_correlations.len(),
            "Built correlation analysis"
        );
        Ok(analysis)
    }

    /// Bucketed metric trends, trend risks, and significant changes
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted window or a failed store fetch
    #[instrument(skip(self))]
    pub async fn get_trend_analysis(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<TrendAnalysis> {
        let snapshot = self.snapshot(user_id, start, end).await?;
        let analysis = self.trends(&snapshot, &self.daily(&snapshot));
        info!(
            overall = %analysis.overall_trend,
            risks = analysis.risk_factors.len(),
            "Built trend analysis"
        );
        Ok(analysis)
    }

    /// Recurring bowel, symptom, eating, and lifestyle patterns
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted window or a failed store fetch
    #[instrument(skip(self))]
    pub async fn get_behavior_patterns(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<BehaviorPatterns> {
        let snapshot = self.snapshot(user_id, start, end).await?;
        let patterns = PatternAnalyzer::with_strategy(self.strategy())
            .analyze_behavior_patterns(&self.daily(&snapshot));
        info!(patterns = patterns.len(), "Built behavior patterns");
        Ok(patterns)
    }

    /// Risk factors, strengths, tracking gaps, and the alert level
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted window or a failed store fetch
    #[instrument(skip(self))]
    pub async fn get_health_insights(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<HealthInsights> {
        let snapshot = self.snapshot(user_id, start, end).await?;
        let insights = self.insights(&snapshot);
        info!(
            alert = %insights.alert_level,
            risks = insights.risk_factors.len(),
            "Built health insights"
        );
        Ok(insights)
    }

    /// Composite 0-100 score with its domain breakdown
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted window or a failed store fetch
    #[instrument(skip(self))]
    pub async fn get_health_score(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<HealthScore> {
        let snapshot = self.snapshot(user_id, start, end).await?;
        let summaries = self.summarize(&snapshot);
        let trends = self.trends(&snapshot, &self.daily(&snapshot));
        let score = self.score(&summaries, &trends);
        info!(overall = score.overall, "Built health score");
        Ok(score)
    }

    /// Ranked recommendations, one per underlying factor
    ///
    /// # Errors
    ///
    /// Returns an error for an inverted window or a failed store fetch
    #[instrument(skip(self))]
    pub async fn get_recommendations(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<Recommendation>> {
        let snapshot = self.snapshot(user_id, start, end).await?;
        let insights = self.insights(&snapshot);
        let recommendations = RecommendationGenerator::with_strategy(self.strategy())
            .generate_recommendations(&insights, snapshot.now);
        info!(count = recommendations.len(), "Built recommendations");
        Ok(recommendations)
    }

    /// Resolve the window, then fetch every domain for it
    async fn snapshot(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<Snapshot> {
        let now = self.clock.now();
        let range = DateRange::resolve(start, end, now, self.config.default_range_days)?;
        let records = self.fetch(user_id, &range).await?;
        Ok(Snapshot {
            records,
            range,
            now,
        })
    }

    async fn fetch(&self, user_id: &str, range: &DateRange) -> AppResult<HealthRecords> {
        let stores = &self.stores;
        let (movements, meals, symptoms, medications, relations) = tokio::try_join!(
            fetch_domain(
                "bowel movements",
                user_id,
                range,
                stores
                    .movements
                    .get_by_date_range(user_id, range.start, range.end),
            ),
            fetch_domain(
                "meals",
                user_id,
                range,
                stores.meals.get_by_date_range(user_id, range.start, range.end),
            ),
            fetch_domain(
                "symptoms",
                user_id,
                range,
                stores
                    .symptoms
                    .get_by_date_range(user_id, range.start, range.end),
            ),
            fetch_domain(
                "medications",
                user_id,
                range,
                stores
                    .medications
                    .get_by_user_id(user_id, self.config.medication_fetch_limit, 0),
            ),
            fetch_domain(
                "meal relations",
                user_id,
                range,
                stores
                    .relations
                    .get_by_user_id(user_id, self.config.relation_fetch_limit, 0),
            ),
        )?;

        let records = HealthRecords {
            movements,
            meals,
            symptoms,
            medications,
            relations,
        };
        debug!(
            records = records.record_count(),
            relations = records.relations.len(),
            range = %range,
            "Fetched record snapshot"
        );
        Ok(records)
    }

    fn strategy(&self) -> Arc<S> {
        Arc::clone(&self.strategy)
    }

    fn aggregator(&self) -> DataAggregator<Arc<S>> {
        DataAggregator::with_strategy(self.strategy())
    }

    fn summarize(&self, snapshot: &Snapshot) -> Summaries {
        let aggregator = self.aggregator();
        let records = &snapshot.records;
        Summaries {
            bowel: aggregator.aggregate_bowel_movements(&records.movements),
            meals: aggregator.aggregate_meals(&records.meals),
            symptoms: aggregator.aggregate_symptoms(&records.symptoms),
            medications: aggregator.aggregate_medications(&records.medications, snapshot.now),
        }
    }

    fn daily(&self, snapshot: &Snapshot) -> Vec<DailyDataPoint> {
        let records = &snapshot.records;
        self.aggregator().aggregate_daily_data(
            &records.movements,
            &records.meals,
            &records.symptoms,
            &records.medications,
            &snapshot.range,
        )
    }

    fn trends(&self, snapshot: &Snapshot, daily: &[DailyDataPoint]) -> TrendAnalysis {
        TrendAnalyzer::with_strategy(self.strategy()).analyze(daily, &snapshot.range)
    }

    fn correlations(&self, snapshot: &Snapshot, daily: &[DailyDataPoint]) -> CorrelationAnalysis {
        CorrelationAnalyzer::with_strategy(self.strategy()).analyze(
            &snapshot.records,
            daily,
            snapshot.now,
        )
    }

    fn score(&self, summaries: &Summaries, trends: &TrendAnalysis) -> HealthScore {
        HealthScoreCalculator::with_strategy(self.strategy()).calculate_health_score(
            &summaries.bowel,
            &summaries.meals,
            &summaries.symptoms,
            &summaries.medications,
            Some(trends),
        )
    }

    /// Full pipeline: summaries, daily points, trends, patterns, correlations, score
    fn insights(&self, snapshot: &Snapshot) -> HealthInsights {
        let summaries = self.summarize(snapshot);
        let daily = self.daily(snapshot);
        let trends = self.trends(snapshot, &daily);
        let patterns =
            PatternAnalyzer::with_strategy(self.strategy()).analyze_behavior_patterns(&daily);
        let correlations = self.correlations(snapshot, &daily);
        let score = self.score(&summaries, &trends);
        InsightEngine::with_strategy(self.strategy()).generate_insights(
            &score,
            &trends,
            &patterns,
            &correlations,
        )
    }
}

/// Await one store fetch, naming the domain and window on failure
async fn fetch_domain<T: Send>(
    domain: &'static str,
    user_id: &str,
    range: &DateRange,
    fetch: impl Future<Output = AppResult<Vec<T>>> + Send,
) -> AppResult<Vec<T>> {
    fetch.await.map_err(|error| {
        AppError::new(
            error.code,
            format!("Failed to fetch {domain} for {range}: {}", error.message),
        )
        .with_user_id(user_id)
        .with_source(error)
    })
}
