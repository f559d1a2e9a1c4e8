// ABOUTME: Meal-to-outcome correlation analysis over a time-gap window
// ABOUTME: Blends computed relationship strength with user-asserted meal relations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Correlation Analyzer
//!
//! For every meal trigger and outcome kind, looks at outcome records that
//! happen strictly after each trigger meal and within the maximum time gap.
//! Each observation gets a strength on the 1-10 relation scale; an explicit
//! user relation for the same meal and record replaces the computed value.
//! Meals with no follow-up outcome count as counterexamples.

use crate::aggregator::{DailyDataPoint, MealTrigger};
use crate::config::{AnalyticsStrategy, DefaultStrategy};
use crate::statistics::{
    clamp_signed, interpret_correlation, mean, pearson_correlation, sample_confidence,
};
use chrono::{DateTime, Duration, Utc};
use gut_core::models::{
    BowelMovement, HealthRecords, Meal, MealRelation, RelationTarget, Symptom,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Outcome record kind following a meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Bowel movement
    BowelMovement,
    /// Symptom
    Symptom,
}

impl Outcome {
    /// Stable key used in factor identifiers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BowelMovement => "bowel_movement",
            Self::Symptom => "symptom",
        }
    }
}

/// Association between two factors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Driving factor
    pub factor_a: String,
    /// Affected factor
    pub factor_b: String,
    /// Strength in `[-1, 1]`
    pub strength: f64,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// Observations behind the value
    pub sample_size: usize,
    /// Plain-language label for the strength
    pub interpretation: String,
}

/// Effect of one meal trigger on later symptoms and bowel comfort
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerEffect {
    /// Trigger examined
    pub trigger: MealTrigger,
    /// Trigger meals in the snapshot
    pub frequency: usize,
    /// Follow-up symptom rate after trigger meals minus the rate after all meals
    pub symptom_increase: f64,
    /// Follow-up pain relative to overall pain, scaled to `[-1, 1]`
    pub bowel_impact: f64,
    /// Mean follow-up symptom severity scaled to `[0, 1]`
    pub severity: f64,
}

/// Observed effect of one medication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationEffect {
    /// Medication name
    pub medication_name: String,
    /// 1.0 when active and recently taken, 0.7 when active, 0 otherwise
    pub effectiveness_score: f64,
    /// Drop in mean symptom severity after the course started, `[-1, 1]`
    pub symptom_improvement: f64,
    /// Drop in mean bowel pain after the course started, `[-1, 1]`
    pub bowel_improvement: f64,
}

/// Full correlation result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationAnalysis {
    /// Meal trigger to bowel movement correlations
    pub meal_bowel_correlations: Vec<Correlation>,
    /// Meal trigger to symptom correlations
    pub meal_symptom_correlations: Vec<Correlation>,
    /// Day-level Pearson correlations
    pub daily_correlations: Vec<Correlation>,
    /// Per-trigger effect summary
    pub trigger_analysis: Vec<TriggerEffect>,
    /// Per-medication effect summary
    pub medication_effectiveness: Vec<MedicationEffect>,
}

impl CorrelationAnalysis {
    /// Meal correlations of both outcome kinds
    pub fn meal_correlations(&self) -> impl Iterator<Item = &Correlation> {
        self.meal_bowel_correlations
            .iter()
            .chain(&self.meal_symptom_correlations)
    }

    /// Whether nothing co-occurred
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meal_bowel_correlations.is_empty()
            && self.meal_symptom_correlations.is_empty()
            && self.daily_correlations.is_empty()
    }
}

/// One outcome record reduced to what the scoring needs
#[derive(Debug, Clone, Copy)]
struct OutcomeEvent {
    at: DateTime<Utc>,
    target: RelationTarget,
    intensity: f64,
}

type RelationIndex<'a> = HashMap<(Uuid, RelationTarget), &'a MealRelation>;

/// Correlation engine
pub struct CorrelationAnalyzer<S: AnalyticsStrategy = DefaultStrategy> {
    strategy: S,
}

impl CorrelationAnalyzer {
    /// Create an analyzer backed by the global configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: DefaultStrategy,
        }
    }
}

impl Default for CorrelationAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AnalyticsStrategy> CorrelationAnalyzer<S> {
    /// Create an analyzer with a custom strategy
    #[must_use]
    pub const fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Run every correlation pass over one snapshot
    #[must_use]
    pub fn analyze(
        &self,
        records: &HealthRecords,
        daily: &[DailyDataPoint],
        now: DateTime<Utc>,
    ) -> CorrelationAnalysis {
        let relations: RelationIndex<'_> = records
            .relations
            .iter()
            .map(|r| ((r.meal_id, r.target), r))
            .collect();
        let bowel_events = bowel_events(&records.movements);
        let symptom_events = symptom_events(&records.symptoms);

        let analysis = CorrelationAnalysis {
            meal_bowel_correlations: self.meal_correlations(
                &records.meals,
                Outcome::BowelMovement,
                &bowel_events,
                &relations,
            ),
            meal_symptom_correlations: self.meal_correlations(
                &records.meals,
                Outcome::Symptom,
                &symptom_events,
                &relations,
            ),
            daily_correlations: self.daily_correlations(daily),
            trigger_analysis: self.trigger_analysis(records),
            medication_effectiveness: self.medication_effectiveness(records, now),
        };
        debug!(
            bowel = analysis.meal_bowel_correlations.len(),
            symptom = analysis.meal_symptom_correlations.len(),
            daily = analysis.daily_correlations.len(),
            "Computed correlations"
        );
        analysis
    }

    fn meal_correlations(
        &self,
        meals: &[Meal],
        outcome: Outcome,
        events: &[OutcomeEvent],
        relations: &RelationIndex<'_>,
    ) -> Vec<Correlation> {
        let scoring = self.strategy.scoring();
        let config = self.strategy.correlation();
        let mut correlations = Vec::new();

        for trigger in MealTrigger::ALL {
            let trigger_meals: Vec<&Meal> =
                meals.iter().filter(|m| trigger.matches(m, scoring)).collect();
            if trigger_meals.is_empty() {
                continue;
            }

            let mut co_occurrences = 0;
            let mut total = 0.0;
            for meal in &trigger_meals {
                let values: Vec<f64> = self
                    .followups(meal.meal_time, events)
                    .map(|event| {
                        let gap = (event.at - meal.meal_time).num_seconds() as f64 / SECONDS_PER_HOUR;
                        relations
                            .get(&(meal.id, event.target))
                            .and_then(|relation| relation.asserted_value())
                            .unwrap_or_else(|| self.observation_value(gap, event.intensity))
                    })
                    .collect();
                co_occurrences += values.len();
                total += mean(&values);
            }
            if co_occurrences == 0 {
                continue;
            }

            let n = trigger_meals.len() as f64;
            let strength = clamp_signed(total / config.strength_scale / (n + 1.0));
            let confidence = (n / (n + config.confidence_prior)).min(config.max_confidence);
            correlations.push(Correlation {
                factor_a: trigger.as_str().to_owned(),
                factor_b: outcome.as_str().to_owned(),
                strength,
                confidence,
                sample_size: co_occurrences,
                interpretation: interpret_correlation(strength).to_owned(),
            });
        }

        correlations.sort_by(|a, b| b.strength.abs().total_cmp(&a.strength.abs()));
        correlations
    }

    /// Relation-scale strength in `[1, 10]` from recency and outcome intensity
    fn observation_value(&self, gap_hours: f64, intensity: f64) -> f64 {
        let max_gap = self.strategy.correlation().max_time_gap_hours;
        let recency = 1.0 - (gap_hours / max_gap).clamp(0.0, 1.0);
        9.0_f64.mul_add(0.5_f64.mul_add(recency, 0.5 * intensity), 1.0)
    }

    /// Events strictly after `meal_time` and within the maximum gap
    fn followups<'a>(
        &self,
        meal_time: DateTime<Utc>,
        events: &'a [OutcomeEvent],
    ) -> impl Iterator<Item = &'a OutcomeEvent> {
        let window = max_gap(self.strategy.correlation().max_time_gap_hours);
        let start = events.partition_point(|e| e.at <= meal_time);
        events[start..]
            .iter()
            .take_while(move |e| e.at - meal_time <= window)
    }

    fn daily_correlations(&self, daily: &[DailyDataPoint]) -> Vec<Correlation> {
        let min_samples = self.strategy.correlation().min_daily_samples;
        let pairs: [(&str, &str, fn(&DailyDataPoint) -> Option<(f64, f64)>); 4] = [
            ("spicy_meals", "pain_average", |d| {
                d.pain_average.map(|pain| (f64::from(d.spicy_meal_count), pain))
            }),
            ("fiber_rich_meals", "bristol_average", |d| {
                d.bristol_average
                    .map(|bristol| (f64::from(d.fiber_rich_meal_count), bristol))
            }),
            ("dairy_meals", "symptom_severity", |d| {
                d.symptom_severity_average
                    .map(|severity| (f64::from(d.dairy_meal_count), severity))
            }),
            ("large_meals", "symptom_count", |d| {
                d.has_data()
                    .then(|| (f64::from(d.large_meal_count), f64::from(d.symptom_count)))
            }),
        ];

        pairs
            .iter()
            .filter_map(|(factor_a, factor_b, extract)| {
                let (xs, ys): (Vec<f64>, Vec<f64>) = daily.iter().filter_map(extract).unzip();
                if xs.len() < min_samples {
                    return None;
                }
                let strength = pearson_correlation(&xs, &ys)?;
                Some(Correlation {
                    factor_a: (*factor_a).to_owned(),
                    factor_b: (*factor_b).to_owned(),
                    strength,
                    confidence: sample_confidence(xs.len()),
                    sample_size: xs.len(),
                    interpretation: interpret_correlation(strength).to_owned(),
                })
            })
            .collect()
    }

    fn trigger_analysis(&self, records: &HealthRecords) -> Vec<TriggerEffect> {
        let scoring = self.strategy.scoring();
        let window = max_gap(self.strategy.correlation().max_time_gap_hours);
        let mut symptoms: Vec<&Symptom> = records.symptoms.iter().collect();
        symptoms.sort_by_key(|s| s.recorded_at);
        let mut movements: Vec<&BowelMovement> = records.movements.iter().collect();
        movements.sort_by_key(|m| m.recorded_at);

        let followed_rate = |meals: &[&Meal]| {
            let followed = meals
                .iter()
                .filter(|m| !within(symptoms.as_slice(), |s| s.recorded_at, m.meal_time, window).is_empty())
                .count();
            followed as f64 / meals.len().max(1) as f64
        };
        let all_meals: Vec<&Meal> = records.meals.iter().collect();
        let base_rate = followed_rate(&all_meals);
        let overall_pain = mean(
            &movements
                .iter()
                .map(|m| m.pain.as_f64())
                .collect::<Vec<_>>(),
        );

        MealTrigger::ALL
            .iter()
            .filter_map(|trigger| {
                let meals: Vec<&Meal> = all_meals
                    .iter()
                    .copied()
                    .filter(|m| trigger.matches(m, scoring))
                    .collect();
                if meals.is_empty() {
                    return None;
                }

                let mut pains = Vec::new();
                let mut severities = Vec::new();
                for meal in &meals {
                    pains.extend(
                        within(movements.as_slice(), |m| m.recorded_at, meal.meal_time, window)
                            .iter()
                            .map(|m| m.pain.as_f64()),
                    );
                    severities.extend(
                        within(symptoms.as_slice(), |s| s.recorded_at, meal.meal_time, window)
                            .iter()
                            .map(|s| s.severity.as_f64()),
                    );
                }

                let bowel_impact = if pains.is_empty() {
                    0.0
                } else {
                    clamp_signed((mean(&pains) - overall_pain) / 10.0)
                };
                Some(TriggerEffect {
                    trigger: *trigger,
                    frequency: meals.len(),
                    symptom_increase: self.strategy.round_score(followed_rate(&meals) - base_rate),
                    bowel_impact: self.strategy.round_score(bowel_impact),
                    severity: self.strategy.round_score(mean(&severities) / 10.0),
                })
            })
            .collect()
    }

    fn medication_effectiveness(
        &self,
        records: &HealthRecords,
        now: DateTime<Utc>,
    ) -> Vec<MedicationEffect> {
        let window = Duration::hours(self.strategy.scoring().compliance_window_hours);
        records
            .medications
            .iter()
            .map(|medication| {
                let effectiveness_score = match (medication.is_active, medication.taken_at) {
                    (false, _) => 0.0,
                    (true, Some(taken)) if now - taken <= window => 1.0,
                    (true, _) => 0.7,
                };
                let (symptom_improvement, bowel_improvement) =
                    medication.start_date.map_or((0.0, 0.0), |started| {
                        (
                            improvement(&records.symptoms, started, |s| {
                                (s.recorded_at, s.severity.as_f64())
                            }),
                            improvement(&records.movements, started, |m| {
                                (m.recorded_at, m.pain.as_f64())
                            }),
                        )
                    });
                MedicationEffect {
                    medication_name: medication.name.clone(),
                    effectiveness_score,
                    symptom_improvement: self.strategy.round_score(symptom_improvement),
                    bowel_improvement: self.strategy.round_score(bowel_improvement),
                }
            })
            .collect()
    }
}

fn max_gap(hours: f64) -> Duration {
    Duration::seconds((hours * SECONDS_PER_HOUR) as i64)
}

fn bowel_events(movements: &[BowelMovement]) -> Vec<OutcomeEvent> {
    let mut events: Vec<OutcomeEvent> = movements
        .iter()
        .map(|m| {
            let pain = m.pain.intensity();
            let form = (m.bristol_type.as_f64() - 4.0).abs() / 3.0;
            OutcomeEvent {
                at: m.recorded_at,
                target: RelationTarget::BowelMovement(m.id),
                intensity: 0.5_f64.mul_add(pain, 0.5 * form),
            }
        })
        .collect();
    events.sort_by_key(|e| e.at);
    events
}

fn symptom_events(symptoms: &[Symptom]) -> Vec<OutcomeEvent> {
    let mut events: Vec<OutcomeEvent> = symptoms
        .iter()
        .map(|s| OutcomeEvent {
            at: s.recorded_at,
            target: RelationTarget::Symptom(s.id),
            intensity: s.severity.intensity(),
        })
        .collect();
    events.sort_by_key(|e| e.at);
    events
}

/// Slice of chronologically sorted records in `(after, after + window]`
fn within<'a, T>(
    sorted: &'a [&'a T],
    timestamp: impl Fn(&T) -> DateTime<Utc>,
    after: DateTime<Utc>,
    window: Duration,
) -> &'a [&'a T] {
    let start = sorted.partition_point(|r| timestamp(r) <= after);
    let end = sorted.partition_point(|r| timestamp(r) - after <= window);
    &sorted[start..end.max(start)]
}

/// Mean value before `started` minus the mean after, scaled by 10
fn improvement<T>(
    records: &[T],
    started: DateTime<Utc>,
    value: impl Fn(&T) -> (DateTime<Utc>, f64),
) -> f64 {
    let (before, after): (Vec<_>, Vec<_>) = records
        .iter()
        .map(value)
        .partition(|(at, _)| *at < started);
    if before.is_empty() || after.is_empty() {
        return 0.0;
    }
    let before: Vec<f64> = before.into_iter().map(|(_, v)| v).collect();
    let after: Vec<f64> = after.into_iter().map(|(_, v)| v).collect();
    clamp_signed((mean(&before) - mean(&after)) / 10.0)
}
