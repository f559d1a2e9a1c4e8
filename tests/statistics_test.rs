// ABOUTME: Tests for the statistics primitives shared by every analyzer
// ABOUTME: Validates empty-input fallbacks, Pearson correlation, regression, and percentiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp, clippy::cast_precision_loss)]

use gut_analytics::intelligence::statistics::{
    clamp_signed, clamp_unit, interpret_correlation, linear_regression, mean, median,
    pearson_correlation, percentage, percentile, round_to, sample_confidence, std_dev,
    weighted_average, StatisticalSummary,
};

#[test]
fn test_empty_inputs_produce_zero() {
    assert_eq!(mean(&[]), 0.0);
    assert_eq!(median(&[]), 0.0);
    assert_eq!(std_dev(&[]), 0.0);
    assert_eq!(percentile(&[], 90.0), 0.0);
    assert_eq!(weighted_average(&[]), 0.0);
    assert_eq!(percentage(3, 0), 0.0);
    assert_eq!(StatisticalSummary::from_values(&[]), StatisticalSummary::default());
}

#[test]
fn test_mean_and_weighted_average() {
    assert_eq!(mean(&[3.0, 4.0, 5.0]), 4.0);
    assert_eq!(weighted_average(&[(2.0, 1.0), (5.0, 2.0)]), 4.0);
    assert_eq!(weighted_average(&[(2.0, 0.0)]), 0.0);
}

#[test]
fn test_percentile_interpolates() {
    let values = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(percentile(&values, 0.0), 1.0);
    assert_eq!(percentile(&values, 100.0), 4.0);
    assert_eq!(median(&values), 2.5);
    assert_eq!(median(&[5.0, 1.0, 3.0]), 3.0);
}

#[test]
fn test_pearson_correlation_perfect_and_inverse() {
    let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
    let up = [2.0, 4.0, 6.0, 8.0, 10.0];
    let down = [10.0, 8.0, 6.0, 4.0, 2.0];

    assert!((pearson_correlation(&xs, &up).unwrap() - 1.0).abs() < 1e-9);
    assert!((pearson_correlation(&xs, &down).unwrap() + 1.0).abs() < 1e-9);
}

#[test]
fn test_pearson_correlation_degenerate_inputs() {
    assert!(pearson_correlation(&[1.0], &[2.0]).is_none());
    assert!(pearson_correlation(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).is_none());
}

#[test]
fn test_linear_regression_fits_line() {
    let fit = linear_regression(&[1.0, 3.0, 5.0, 7.0]).unwrap();
    assert!((fit.slope - 2.0).abs() < 1e-9);
    assert!((fit.intercept - 1.0).abs() < 1e-9);
    assert!((fit.r_squared - 1.0).abs() < 1e-9);

    assert!(linear_regression(&[4.0]).is_none());
}

#[test]
fn test_clamping_and_rounding() {
    assert_eq!(clamp_unit(1.7), 1.0);
    assert_eq!(clamp_unit(f64::NAN), 0.0);
    assert_eq!(clamp_signed(-3.0), -1.0);
    assert_eq!(round_to(0.666_666, 2), 0.67);
    assert_eq!(round_to(f64::INFINITY, 2), 0.0);
}

#[test]
fn test_statistical_summary() {
    let summary = StatisticalSummary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert_eq!(summary.count, 8);
    assert_eq!(summary.mean, 5.0);
    assert_eq!(summary.std_dev, 2.0);
    assert_eq!(summary.min, 2.0);
    assert_eq!(summary.max, 9.0);
}

#[test]
fn test_sample_confidence_grows_with_sample_size() {
    let sizes = [0, 5, 15, 25, 40, 75, 150];
    let confidences: Vec<f64> = sizes.iter().map(|n| sample_confidence(*n)).collect();
    assert_eq!(confidences[0], 0.0);
    assert!(confidences.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(confidences[6], 0.95);
}

#[test]
fn test_interpret_correlation_labels() {
    assert_eq!(interpret_correlation(0.9), "Very Strong");
    assert_eq!(interpret_correlation(-0.65), "Strong");
    assert_eq!(interpret_correlation(0.45), "Moderate");
    assert_eq!(interpret_correlation(0.25), "Weak");
    assert_eq!(interpret_correlation(0.05), "Very Weak");
}
