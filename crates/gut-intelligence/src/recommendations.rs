// ABOUTME: Templated, evidence-tagged recommendations derived from health insights
// ABOUTME: One recommendation per factor key, ordered by priority and confidence with expiry dates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::{AnalyticsStrategy, DefaultStrategy};
use crate::insights::{HealthInsights, InsightFactor, InsightSource};
use crate::trends::RiskLevel;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Key of the general recommendation raised for a low overall score
const OVERALL_KEY: &str = "overall";
const PATTERN_PREFIX: &str = "pattern:";
const TRACKING_PREFIX: &str = "tracking:";
const CONFIRM_STEP: &str = "Keep logging for two more weeks to confirm this pattern";

/// Area a recommendation acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationCategory {
    /// What and how much is eaten
    Dietary,
    /// Daily routine, sleep, hydration, activity
    Lifestyle,
    /// Clinical follow-up and medication
    Medical,
    /// Habits around timing and stress
    Behavioral,
    /// Logging more consistently
    Tracking,
}

/// Urgency, declared most urgent first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// Act now
    High,
    /// Act soon
    Medium,
    /// Act when convenient
    Low,
}

impl From<Option<RiskLevel>> for Priority {
    fn from(level: Option<RiskLevel>) -> Self {
        match level {
            Some(RiskLevel::High) => Self::High,
            Some(RiskLevel::Medium) => Self::Medium,
            Some(RiskLevel::Low) | None => Self::Low,
        }
    }
}

/// Actionable recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Deterministic identifier, `rec-` followed by the factor key
    pub id: String,
    /// Headline
    pub title: String,
    /// What to do and why
    pub description: String,
    /// Area
    pub category: RecommendationCategory,
    /// Urgency
    pub priority: Priority,
    /// Confidence of the underlying factor
    pub confidence: f64,
    /// Observations supporting it
    pub evidence: Vec<String>,
    /// Ordered steps
    pub action_steps: Vec<String>,
    /// Expected benefit
    pub expected_impact: String,
    /// When to expect the benefit
    pub timeline: String,
    /// Factor key it addresses
    pub factor_key: String,
    /// When the recommendation should be regenerated
    pub expires_at: DateTime<Utc>,
}

/// Category, copy, and steps for one factor
struct Template {
    category: RecommendationCategory,
    title: String,
    description: String,
    action_steps: &'static [&'static str],
}

/// Recommendation engine
pub struct RecommendationGenerator<S: AnalyticsStrategy = DefaultStrategy> {
    strategy: S,
}

impl RecommendationGenerator {
    /// Create a generator backed by the global configuration
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strategy: DefaultStrategy,
        }
    }
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: AnalyticsStrategy> RecommendationGenerator<S> {
    /// Create a generator with a custom strategy
    #[must_use]
    pub const fn with_strategy(strategy: S) -> Self {
        Self { strategy }
    }

    /// Build recommendations from insights, one per underlying factor. A
    /// tracking gap for a pattern that already has a recommendation adds a
    /// logging step to it instead.
    #[must_use]
    pub fn generate_recommendations(
        &self,
        insights: &HealthInsights,
        now: DateTime<Utc>,
    ) -> Vec<Recommendation> {
        let config = self.strategy.insights();
        let mut seen = HashSet::new();
        let mut recommendations = Vec::new();

        for factor in insights.risk_factors.iter().chain(&insights.tracking_gaps) {
            let subject = underlying_factor(&factor.key);
            if seen.insert(subject.clone()) {
                recommendations.push(self.build_recommendation(factor, now));
            } else if factor.key.starts_with(TRACKING_PREFIX) {
                fold_tracking_step(&mut recommendations, &subject);
            }
        }

        if insights.overall_score < config.overall_recommendation_threshold
            && seen.insert(OVERALL_KEY.to_owned())
        {
            let factor = InsightFactor {
                key: OVERALL_KEY.to_owned(),
                title: "Overall gut health".to_owned(),
                evidence: vec![format!(
                    "Overall score {:.0}/100 is below {:.0}",
                    insights.overall_score, config.overall_recommendation_threshold
                )],
                confidence: insights.confidence_level,
                risk_level: Some(RiskLevel::Medium),
                source: InsightSource::DomainScore,
            };
            recommendations.push(self.build_recommendation(&factor, now));
        }

        recommendations.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(b.confidence.total_cmp(&a.confidence))
        });
        recommendations.truncate(config.max_recommendations);
        debug!(count = recommendations.len(), "Generated recommendations");
        recommendations
    }

    fn build_recommendation(&self, factor: &InsightFactor, now: DateTime<Utc>) -> Recommendation {
        let config = self.strategy.insights();
        let template = template_for(factor);
        let priority = if template.category == RecommendationCategory::Tracking {
            Priority::Low
        } else {
            Priority::from(factor.risk_level)
        };
        let weeks = match priority {
            Priority::High => config.high_expiry_weeks,
            Priority::Medium => config.medium_expiry_weeks,
            Priority::Low => config.low_expiry_weeks,
        };

        Recommendation {
            id: format!("rec-{}", factor.key.replace(':', "-")),
            title: template.title,
            description: template.description,
            category: template.category,
            priority,
            confidence: factor.confidence,
            evidence: factor.evidence.clone(),
            action_steps: template
                .action_steps
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
            expected_impact: expected_impact(priority).to_owned(),
            timeline: timeline(template.category).to_owned(),
            factor_key: factor.key.clone(),
            expires_at: now + Duration::weeks(weeks),
        }
    }
}

/// Factor a key is about; a pattern risk and its tracking gap share one
fn underlying_factor(key: &str) -> String {
    key.strip_prefix(TRACKING_PREFIX)
        .map_or_else(|| key.to_owned(), |kind| format!("{PATTERN_PREFIX}{kind}"))
}

fn fold_tracking_step(recommendations: &mut [Recommendation], subject: &str) {
    let target = recommendations.iter_mut().find(|r| {
        !r.factor_key.starts_with(TRACKING_PREFIX)
            && underlying_factor(&r.factor_key) == subject
            && !r.action_steps.iter().any(|step| step == CONFIRM_STEP)
    });
    if let Some(recommendation) = target {
        recommendation.action_steps.push(CONFIRM_STEP.to_owned());
    }
}

fn template_for(factor: &InsightFactor) -> Template {
    let (prefix, rest) = factor.key.split_once(':').unwrap_or((factor.key.as_str(), ""));
    match (prefix, rest) {
        ("domain", "bowel") | ("trend", "bowel_regularity") => Template {
            category: RecommendationCategory::Lifestyle,
            title: "Improve bowel regularity".to_owned(),
            description: "Bowel movements are irregular or outside the healthy stool range."
                .to_owned(),
            action_steps: &[
                "Keep a consistent wake, meal, and bathroom schedule",
                "Drink water steadily through the day",
                "Add a daily walk or light exercise",
            ],
        },
        ("domain", "diet") | ("trend", "nutrition_score") => Template {
            category: RecommendationCategory::Dietary,
            title: "Rebalance meals".to_owned(),
            description: "Meal size and fiber content are away from the balanced target."
                .to_owned(),
            action_steps: &[
                "Aim for meals around 600 kcal",
                "Include vegetables, legumes, or whole grains in most meals",
                "Increase fiber gradually over a week",
            ],
        },
        ("domain", "symptom") | ("trend", "symptom_severity") => Template {
            category: RecommendationCategory::Medical,
            title: "Address recurring symptoms".to_owned(),
            description: "Symptoms are frequent or severe enough to warrant attention."
                .to_owned(),
            action_steps: &[
                "Record the meals and events preceding each symptom",
                "Review the log for repeated triggers",
                "Share the log with a healthcare provider if symptoms persist",
            ],
        },
        ("domain", "medication") => Template {
            category: RecommendationCategory::Medical,
            title: "Improve medication adherence".to_owned(),
            description: "Active medications are not being taken on schedule.".to_owned(),
            action_steps: &[
                "Set a daily reminder for each active medication",
                "Log each dose when it is taken",
                "Ask a clinician before stopping any medication",
            ],
        },
        ("trend", "pain_average") => Template {
            category: RecommendationCategory::Medical,
            title: "Reduce bowel discomfort".to_owned(),
            description: "Pain during bowel movements has been rising.".to_owned(),
            action_steps: &[
                "Avoid straining and allow enough time",
                "Increase water and soluble fiber intake",
                "Consult a healthcare provider if pain keeps increasing",
            ],
        },
        ("trend", "satisfaction_average") => Template {
            category: RecommendationCategory::Lifestyle,
            title: "Improve bowel comfort".to_owned(),
            description: "Satisfaction after bowel movements has been dropping.".to_owned(),
            action_steps: &[
                "Keep regular meal and bathroom times",
                "Try a footstool to improve posture",
            ],
        },
        ("correlation", _) => {
            let trigger = rest.split(':').next().unwrap_or(rest).replace('_', " ");
            Template {
                category: RecommendationCategory::Dietary,
                title: format!("Limit {trigger} meals"),
                description: format!(
                    "{trigger} meals are regularly followed by digestive problems."
                ),
                action_steps: &[
                    "Cut back on this type of meal for two weeks",
                    "Log how symptoms change during the break",
                    "Reintroduce slowly and watch for a reaction",
                ],
            }
        }
        ("pattern", kind) => pattern_template(kind, factor),
        ("tracking", _) => Template {
            category: RecommendationCategory::Tracking,
            title: "Log more consistently".to_owned(),
            description: format!(
                "Not enough data yet to confirm: {}",
                factor.title.to_lowercase()
            ),
            action_steps: &[
                "Log every meal, bowel movement, and symptom for two weeks",
                "Include times so follow-up effects can be measured",
            ],
        },
        _ => Template {
            category: RecommendationCategory::Lifestyle,
            title: "Build a gut-friendly routine".to_owned(),
            description: "Several areas of gut health have room to improve.".to_owned(),
            action_steps: &[
                "Eat balanced meals at regular times",
                "Stay hydrated and active",
                "Keep logging to track progress",
            ],
        },
    }
}

fn pattern_template(kind: &str, factor: &InsightFactor) -> Template {
    let description = factor.title.clone();
    if kind.starts_with("trigger_symptom") || kind == "high_calorie_symptoms" {
        Template {
            category: RecommendationCategory::Dietary,
            title: "Adjust meals that precede symptoms".to_owned(),
            description,
            action_steps: &[
                "Reduce portions of the meals involved",
                "Swap in gentler alternatives for two weeks",
                "Log symptoms to confirm the change helps",
            ],
        }
    } else if kind == "frequent_spicy_meals" || kind == "low_meal_frequency" {
        Template {
            category: RecommendationCategory::Dietary,
            title: "Even out eating habits".to_owned(),
            description,
            action_steps: &[
                "Spread food across at least three meals a day",
                "Balance spicy dishes with milder ones",
            ],
        }
    } else if kind == "loose_stool_days" || kind == "hard_stool_days" {
        Template {
            category: RecommendationCategory::Medical,
            title: "Bring stool form back into the healthy range".to_owned(),
            description,
            action_steps: &[
                "Adjust fiber and fluid intake",
                "Seek medical advice if this continues for more than two weeks",
            ],
        }
    } else {
        Template {
            category: RecommendationCategory::Behavioral,
            title: "Stabilize your weekly routine".to_owned(),
            description,
            action_steps: &[
                "Keep weekend meals and sleep close to your weekday routine",
                "Plan lighter meals on days when symptoms tend to appear",
                "Note stress levels on high-symptom days",
            ],
        }
    }
}

const fn expected_impact(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "Significant improvement in gut comfort",
        Priority::Medium => "Moderate improvement in gut comfort",
        Priority::Low => "Gradual improvement and clearer insights",
    }
}

const fn timeline(category: RecommendationCategory) -> &'static str {
    match category {
        RecommendationCategory::Dietary => "1-2 weeks",
        RecommendationCategory::Lifestyle => "2-4 weeks",
        RecommendationCategory::Medical => "Discuss within 1 week",
        RecommendationCategory::Behavioral => "2-3 weeks",
        RecommendationCategory::Tracking => "2 weeks",
    }
}
