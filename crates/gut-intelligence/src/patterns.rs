// ABOUTME: Behavior pattern detection over daily data points
// ABOUTME: Finds recurring bowel, symptom, eating, and lifestyle structure by weekday and rolling window
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::aggregator::{DailyDataPoint, MealTrigger};
use crate::config::{AnalyticsStrategy, DefaultStrategy};
use crate::statistics::{mean, weighted_average};
use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Weekdays in calendar order
const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Which recurring condition a pattern describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternKind {
    /// Fewer movements on weekends than on weekdays
    WeekendFrequencyDrop,
    /// A movement logged on most days
    DailyRegularity,
    /// Days with loose stool on average
    LooseStoolDays,
    /// Days with hard stool on average
    HardStoolDays,
    /// Symptom soon after a trigger meal
    TriggerSymptom {
        /// Meal attribute
        trigger: MealTrigger,
    },
    /// Several symptoms on the same day
    SymptomClustering,
    /// Symptoms concentrated on one weekday
    WeekdayConcentration {
        /// Affected weekday
        weekday: Weekday,
    },
    /// Spicy meals on many days
    FrequentSpicyMeals,
    /// Days with a single logged meal
    LowMealFrequency,
    /// Fiber-rich meals on many days
    FiberRoutine,
    /// More calories on weekends
    WeekendCalorieIncrease,
    /// Fiber-rich weeks with healthy stool form
    FiberHealthyStool,
    /// High-calorie weeks with more symptoms
    HighCalorieSymptoms,
}

impl PatternKind {
    /// Stable key used in factor identifiers
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::WeekendFrequencyDrop => "weekend_frequency_drop".to_owned(),
            Self::DailyRegularity => "daily_regularity".to_owned(),
            Self::LooseStoolDays => "loose_stool_days".to_owned(),
            Self::HardStoolDays => "hard_stool_days".to_owned(),
            Self::TriggerSymptom { trigger } => format!("trigger_symptom:{}", trigger.as_str()),
            Self::SymptomClustering => "symptom_clustering".to_owned(),
            Self::WeekdayConcentration { weekday } => {
                format!("weekday_concentration:{}", weekday_name(*weekday).to_lowercase())
            }
            Self::FrequentSpicyMeals => "frequent_spicy_meals".to_owned(),
            Self::LowMealFrequency => "low_meal_frequency".to_owned(),
            Self::FiberRoutine => "fiber_routine".to_owned(),
            Self::WeekendCalorieIncrease => "weekend_calorie_increase".to_owned(),
            Self::FiberHealthyStool => "fiber_healthy_stool".to_owned(),
            Self::HighCalorieSymptoms => "high_calorie_symptoms".to_owned(),
        }
    }
}

/// Pattern family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternCategory {
    /// Bowel movement cadence and form
    Bowel,
    /// Symptom timing
    Symptom,
    /// Meal habits
    Eating,
    /// Week-scale diet and outcome links
    Lifestyle,
}

/// One recurring condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pattern {
    /// Condition
    pub kind: PatternKind,
    /// Family
    pub category: PatternCategory,
    /// Explanation
    pub description: String,
    /// Times the condition held
    pub occurrences: u32,
    /// Times the condition could be observed
    pub window: u32,
    /// `min(1, occurrences / window)`
    pub confidence: f64,
    /// Whether the pattern harms gut health
    pub adverse: bool,
}

/// Every detected pattern grouped by family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BehaviorPatterns {
    /// Bowel cadence and form patterns
    pub bowel_patterns: Vec<Pattern>,
    /// Symptom timing patterns
    pub symptom_patterns: Vec<Pattern>,
    /// Meal habit patterns
    pub eating_patterns: Vec<Pattern>,
    /// Week-scale patterns
    pub lifestyle_patterns: Vec<Pattern>,
    /// Days with at least one record
    pub days_analyzed: usize,
}

impl BehaviorPatterns {
    /// All patterns across families
    pub fn all(&self) -> impl Iterator<Item = &Pattern> {
        self.bowel_patterns
            .iter()
            .chain(&self.symptom_patterns)
            .chain(&self.eating_patterns)
            .chain(&self.lifestyle_patterns)
    }

    /// Number of patterns across families
    #[must_use]
    pub fn len(&self) -> usize {
        self.bowel_patterns.len()
            + self.symptom_patterns.len()
            + self.eating_patterns.len()
            + self.lifestyle_patterns.len()
    }

    /// Whether nothing was detected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Pattern detection engine
pub struct PatternAnalyzer<S: AnalyticsStrategy = DefaultStrategy> {
    strategy: S,
}

impl PatternAnalyzer {
    /// Create an analyzer backed by the global configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: DefaultStrategy,
        }
    }
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AnalyticsStrategy> PatternAnalyzer<S> {
    /// Create an analyzer with a custom strategy
    #[must_use]
    pub const fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Detect patterns over a chronologically ordered daily series
    #[must_use]
    pub fn analyze_behavior_patterns(&self, daily: &[DailyDataPoint]) -> BehaviorPatterns {
        let observed: Vec<&DailyDataPoint> = daily.iter().filter(|d| d.has_data()).collect();
        if observed.is_empty() {
            return BehaviorPatterns::default();
        }

        let patterns = BehaviorPatterns {
            bowel_patterns: self.bowel_patterns(&observed),
            symptom_patterns: self.symptom_patterns(&observed),
            eating_patterns: self.eating_patterns(&observed),
            lifestyle_patterns: self.lifestyle_patterns(daily),
            days_analyzed: observed.len(),
        };
        debug!(
            days = patterns.days_analyzed,
            patterns = patterns.len(),
            "Detected behavior patterns"
        );
        patterns
    }

    fn bowel_patterns(&self, observed: &[&DailyDataPoint]) -> Vec<Pattern> {
        let config = self.strategy.patterns();
        let mut patterns = Vec::new();

        let (weekend, weekday): (Vec<&DailyDataPoint>, Vec<&DailyDataPoint>) =
            observed.iter().copied().partition(|d| d.is_weekend());
        if !weekend.is_empty() && !weekday.is_empty() {
            let weekday_mean = mean_of(&weekday, |d| f64::from(d.movement_count));
            let weekend_mean = mean_of(&weekend, |d| f64::from(d.movement_count));
            if weekday_mean > 0.0 && weekend_mean < config.weekend_drop_ratio * weekday_mean {
                let below = count(&weekend, |d| f64::from(d.movement_count) < weekday_mean);
                patterns.extend(self.emit(
                    PatternKind::WeekendFrequencyDrop,
                    PatternCategory::Bowel,
                    format!(
                        "Movement frequency drops on weekends ({weekend_mean:.1}/day versus {weekday_mean:.1}/day on weekdays)"
                    ),
                    below,
                    len_u32(&weekend),
                    true,
                ));
            }
        }

        let with_movement = count(observed, |d| d.movement_count > 0);
        patterns.extend(self.emit(
            PatternKind::DailyRegularity,
            PatternCategory::Bowel,
            format!(
                "A bowel movement was logged on {with_movement} of {} days",
                observed.len()
            ),
            with_movement,
            len_u32(observed),
            false,
        ));

        let movement_days: Vec<&DailyDataPoint> = observed
            .iter()
            .copied()
            .filter(|d| d.bristol_average.is_some())
            .collect();
        let loose = count(&movement_days, |d| {
            d.bristol_average.is_some_and(|b| b >= config.loose_bristol)
        });
        patterns.extend(self.emit(
            PatternKind::LooseStoolDays,
            PatternCategory::Bowel,
            format!("Loose stool (Bristol 6 or above on average) on {loose} days"),
            loose,
            len_u32(&movement_days),
            true,
        ));
        let hard = count(&movement_days, |d| {
            d.bristol_average.is_some_and(|b| b <= config.hard_bristol)
        });
        patterns.extend(self.emit(
            PatternKind::HardStoolDays,
            PatternCategory::Bowel,
            format!("Hard stool (Bristol 2 or below on average) on {hard} days"),
            hard,
            len_u32(&movement_days),
            true,
        ));

        patterns
    }

    fn symptom_patterns(&self, observed: &[&DailyDataPoint]) -> Vec<Pattern> {
        let config = self.strategy.patterns();
        let mut patterns = Vec::new();

        for trigger in MealTrigger::ALL {
            let trigger_days: Vec<u32> = observed
                .iter()
                .filter_map(|d| d.trigger_followups.get(&trigger).copied())
                .collect();
            let followed = count_u32(trigger_days.iter().filter(|n| **n > 0).count());
            patterns.extend(self.emit(
                PatternKind::TriggerSymptom { trigger },
                PatternCategory::Symptom,
                format!(
                    "Symptoms followed {} within {} hours on {followed} of {} days",
                    trigger.label(),
                    config.followup_window_hours,
                    trigger_days.len()
                ),
                followed,
                count_u32(trigger_days.len()),
                true,
            ));
        }

        let cluster_days = count(observed, |d| {
            d.symptom_count >= config.cluster_symptoms_per_day
        });
        if cluster_days >= config.min_cluster_days {
            patterns.push(self.pattern(
                PatternKind::SymptomClustering,
                PatternCategory::Symptom,
                format!(
                    "{} or more symptoms clustered on the same day {cluster_days} times",
                    config.cluster_symptoms_per_day
                ),
                cluster_days,
                len_u32(observed),
                true,
            ));
        }

        for weekday in WEEKDAYS {
            let days: Vec<&DailyDataPoint> = observed
                .iter()
                .copied()
                .filter(|d| d.date.weekday() == weekday)
                .collect();
            if days.is_empty() {
                continue;
            }
            let symptom_days = count(&days, |d| d.symptom_count > 0);
            let share = f64::from(symptom_days) / days.len() as f64;
            if share >= config.weekday_concentration {
                patterns.extend(self.emit(
                    PatternKind::WeekdayConcentration { weekday },
                    PatternCategory::Symptom,
                    format!(
                        "Symptoms occurred on {symptom_days} of {} {}s",
                        days.len(),
                        weekday_name(weekday)
                    ),
                    symptom_days,
                    len_u32(&days),
                    true,
                ));
            }
        }

        patterns
    }

    fn eating_patterns(&self, observed: &[&DailyDataPoint]) -> Vec<Pattern> {
        let config = self.strategy.patterns();
        let meal_days: Vec<&DailyDataPoint> = observed
            .iter()
            .copied()
            .filter(|d| d.meal_count > 0)
            .collect();
        if meal_days.is_empty() {
            return Vec::new();
        }
        let window = len_u32(&meal_days);
        let mut patterns = Vec::new();

        let spicy = count(&meal_days, |d| d.spicy_meal_count > 0);
        patterns.extend(self.emit(
            PatternKind::FrequentSpicyMeals,
            PatternCategory::Eating,
            format!("Spicy meals eaten on {spicy} of {window} days"),
            spicy,
            window,
            true,
        ));

        let single = count(&meal_days, |d| d.meal_count == 1);
        patterns.extend(self.emit(
            PatternKind::LowMealFrequency,
            PatternCategory::Eating,
            format!("Only one meal logged on {single} of {window} days"),
            single,
            window,
            true,
        ));

        let fiber = count(&meal_days, |d| d.fiber_rich_meal_count > 0);
        patterns.extend(self.emit(
            PatternKind::FiberRoutine,
            PatternCategory::Eating,
            format!("Fiber-rich meals eaten on {fiber} of {window} days"),
            fiber,
            window,
            false,
        ));

        let (weekend, weekday): (Vec<&DailyDataPoint>, Vec<&DailyDataPoint>) =
            meal_days.iter().copied().partition(|d| d.is_weekend());
        if !weekend.is_empty() && !weekday.is_empty() {
            let weekday_mean = mean_of(&weekday, |d| d.total_calories as f64);
            let weekend_mean = mean_of(&weekend, |d| d.total_calories as f64);
            if weekday_mean > 0.0 && weekend_mean >= config.weekend_calorie_ratio * weekday_mean {
                let above = count(&weekend, |d| d.total_calories as f64 > weekday_mean);
                patterns.extend(self.emit(
                    PatternKind::WeekendCalorieIncrease,
                    PatternCategory::Eating,
                    format!(
                        "Weekend calorie intake averages {weekend_mean:.0} kcal versus {weekday_mean:.0} kcal on weekdays"
                    ),
                    above,
                    len_u32(&weekend),
                    true,
                ));
            }
        }

        patterns
    }

    fn lifestyle_patterns(&self, daily: &[DailyDataPoint]) -> Vec<Pattern> {
        let config = self.strategy.patterns();
        let scoring = self.strategy.scoring();
        let weeks: Vec<&[DailyDataPoint]> = daily.windows(config.rolling_window_days).collect();
        if weeks.is_empty() {
            return Vec::new();
        }
        let mut patterns = Vec::new();

        let fiber_weeks: Vec<&[DailyDataPoint]> = weeks
            .iter()
            .copied()
            .filter(|w| w.iter().map(|d| d.fiber_rich_meal_count).sum::<u32>() >= config.fiber_week_meals)
            .collect();
        let healthy_fiber_weeks = count_u32(
            fiber_weeks
                .iter()
                .filter(|w| {
                    week_bristol(w).is_some_and(|b| {
                        b >= f64::from(scoring.healthy_bristol_min)
                            && b <= f64::from(scoring.healthy_bristol_max)
                    })
                })
                .count(),
        );
        patterns.extend(self.emit(
            PatternKind::FiberHealthyStool,
            PatternCategory::Lifestyle,
            format!(
                "Stool form stayed healthy in {healthy_fiber_weeks} of {} fiber-rich weeks",
                fiber_weeks.len()
            ),
            healthy_fiber_weeks,
            count_u32(fiber_weeks.len()),
            false,
        ));

        let meal_days: Vec<&DailyDataPoint> = daily.iter().filter(|d| d.meal_count > 0).collect();
        let overall_calories = mean_of(&meal_days, |d| d.total_calories as f64);
        let overall_symptoms = mean(
            &daily
                .iter()
                .map(|d| f64::from(d.symptom_count))
                .collect::<Vec<_>>(),
        );
        let high_calorie_weeks: Vec<&[DailyDataPoint]> = weeks
            .iter()
            .copied()
            .filter(|w| {
                let days: Vec<&DailyDataPoint> = w.iter().filter(|d| d.meal_count > 0).collect();
                !days.is_empty()
                    && mean_of(&days, |d| d.total_calories as f64) > overall_calories
            })
            .collect();
        let with_symptoms = count_u32(
            high_calorie_weeks
                .iter()
                .filter(|w| {
                    let symptoms: Vec<f64> =
                        w.iter().map(|d| f64::from(d.symptom_count)).collect();
                    mean(&symptoms) > overall_symptoms
                })
                .count(),
        );
        patterns.extend(self.emit(
            PatternKind::HighCalorieSymptoms,
            PatternCategory::Lifestyle,
            format!(
                "Symptoms ran above average in {with_symptoms} of {} high-calorie weeks",
                high_calorie_weeks.len()
            ),
            with_symptoms,
            count_u32(high_calorie_weeks.len()),
            true,
        ));

        patterns
    }

    /// Pattern when the condition recurred at least `min_occurrences` times
    fn emit(
        &self,
        kind: PatternKind,
        category: PatternCategory,
        description: String,
        occurrences: u32,
        window: u32,
        adverse: bool,
    ) -> Option<Pattern> {
        (window > 0 && occurrences >= self.strategy.patterns().min_occurrences).then(|| {
            self.pattern(kind, category, description, occurrences, window, adverse)
        })
    }

    fn pattern(
        &self,
        kind: PatternKind,
        category: PatternCategory,
        description: String,
        occurrences: u32,
        window: u32,
        adverse: bool,
    ) -> Pattern {
        let confidence = if window == 0 {
            0.0
        } else {
            (f64::from(occurrences) / f64::from(window)).min(1.0)
        };
        Pattern {
            kind,
            category,
            description,
            occurrences,
            window,
            confidence: self.strategy.round_score(confidence),
            adverse,
        }
    }
}

const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Movement-weighted Bristol average across a week
fn week_bristol(week: &[DailyDataPoint]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = week
        .iter()
        .filter_map(|d| {
            d.bristol_average
                .map(|b| (b, f64::from(d.movement_count)))
        })
        .collect();
    (!pairs.is_empty()).then(|| weighted_average(&pairs))
}

fn mean_of(days: &[&DailyDataPoint], value: impl Fn(&DailyDataPoint) -> f64) -> f64 {
    let values: Vec<f64> = days.iter().map(|d| value(*d)).collect();
    mean(&values)
}

fn count(days: &[&DailyDataPoint], condition: impl Fn(&DailyDataPoint) -> bool) -> u32 {
    count_u32(days.iter().filter(|d| condition(**d)).count())
}

fn len_u32<T>(items: &[T]) -> u32 {
    count_u32(items.len())
}

fn count_u32(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}
