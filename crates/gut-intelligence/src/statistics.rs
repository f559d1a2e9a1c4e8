// ABOUTME: Statistics primitives shared by every analyzer in the engine
// ABOUTME: Means, rounding, clamping, dispersion, Pearson correlation, and least-squares regression
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Deterministic closed-form statistics.
//!
//! Every function returns a well-defined value for empty input so callers
//! never need to special-case missing data.

use serde::{Deserialize, Serialize};

/// Arithmetic mean, 0 for an empty slice
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sanitize(values.iter().sum::<f64>() / values.len() as f64)
}

/// Mean of `(value, weight)` pairs, 0 when the total weight is not positive
#[must_use]
pub fn weighted_average(pairs: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = pairs.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = pairs.iter().map(|(v, w)| v * w).sum();
    sanitize(weighted / total_weight)
}

/// Round to a fixed number of decimal places
#[must_use]
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
    sanitize((value * factor).round() / factor)
}

/// `part` as a percentage of `whole`, 0 when `whole` is 0
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Replace NaN and infinities with 0
#[must_use]
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Clamp into `[0, 1]`
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    sanitize(value).clamp(0.0, 1.0)
}

/// Clamp into `[-1, 1]`
#[must_use]
pub fn clamp_signed(value: f64) -> f64 {
    sanitize(value).clamp(-1.0, 1.0)
}

/// Population variance
#[must_use]
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let squared: Vec<f64> = values.iter().map(|v| (v - avg).powi(2)).collect();
    mean(&squared)
}

/// Population standard deviation
#[must_use]
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Median, 0 for an empty slice
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    percentile(values, 50.0)
}

/// Percentile with linear interpolation between closest ranks
#[must_use]
pub fn percentile(values: &[f64], pct: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = (pct.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let fraction = rank - lower as f64;
    (sorted[upper] - sorted[lower]).mul_add(fraction, sorted[lower])
}

/// Pearson correlation coefficient, `None` for fewer than two pairs or zero variance
#[must_use]
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance = dx.mul_add(dy, covariance);
        var_x = dx.mul_add(dx, var_x);
        var_y = dy.mul_add(dy, var_y);
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator < f64::EPSILON {
        return None;
    }
    Some(clamp_signed(covariance / denominator))
}

/// Least-squares fit of values against their index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Change per index step
    pub slope: f64,
    /// Value at index 0
    pub intercept: f64,
    /// Coefficient of determination (0-1)
    pub r_squared: f64,
}

/// Fit a line through `values` indexed 0..n, `None` for fewer than two values
#[must_use]
pub fn linear_regression(values: &[f64]) -> Option<RegressionResult> {
    if values.len() < 2 {
        return None;
    }
    let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
    let mean_x = mean(&xs);
    let mean_y = mean(values);

    let sum_xx: f64 = xs.iter().map(|x| (x - mean_x).powi(2)).sum();
    if sum_xx.abs() < f64::EPSILON {
        return None;
    }
    let sum_xy: f64 = xs
        .iter()
        .zip(values)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();

    let slope = sum_xy / sum_xx;
    let intercept = slope.mul_add(-mean_x, mean_y);
    let r_squared = pearson_correlation(&xs, values).map_or(0.0, |r| r * r);

    Some(RegressionResult {
        slope: sanitize(slope),
        intercept: sanitize(intercept),
        r_squared: clamp_unit(r_squared),
    })
}

/// Descriptive statistics over a sample
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatisticalSummary {
    /// Sample size
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Median
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// 25th percentile
    pub p25: f64,
    /// 75th percentile
    pub p75: f64,
}

impl StatisticalSummary {
    /// Summarize a sample, all zeros when empty
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        Self {
            count: values.len(),
            mean: mean(values),
            median: median(values),
            std_dev: std_dev(values),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            p25: percentile(values, 25.0),
            p75: percentile(values, 75.0),
        }
    }
}

/// Confidence attached to a sample of size `n`
#[must_use]
pub const fn sample_confidence(n: usize) -> f64 {
    match n {
        0 => 0.0,
        1..=9 => 0.3,
        10..=19 => 0.55,
        20..=29 => 0.65,
        30..=49 => 0.75,
        50..=99 => 0.85,
        _ => 0.95,
    }
}

/// Plain-language label for a correlation coefficient
#[must_use]
pub fn interpret_correlation(r: f64) -> &'static str {
    let magnitude = r.abs();
    if magnitude >= 0.8 {
        "Very Strong"
    } else if magnitude >= 0.6 {
        "Strong"
    } else if magnitude >= 0.4 {
        "Moderate"
    } else if magnitude >= 0.2 {
        "Weak"
    } else {
        "Very Weak"
    }
}
