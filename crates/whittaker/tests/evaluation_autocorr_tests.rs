//! Tests for the lag-1 autocorrelation diagnostic.
//!
//! These tests verify the Pearson statistic with nodata exclusion:
//! - Perfect correlation of a series against itself
//! - Exact exclusion of sentinel pairs
//! - Defined results on degenerate input
//!
//! ## Test Organization
//!
//! 1. **Perfect Correlation** - Identity and shifted-view cases
//! 2. **Sentinel Exclusion** - Agreement with a manually restricted
//!    correlation
//! 3. **Degenerate Input** - Fewer than 2 valid pairs, zero variance

use approx::assert_abs_diff_eq;

use whittaker::prelude::*;

const NODATA: f64 = -3000.0;

// ============================================================================
// Helpers
// ============================================================================

/// Textbook Pearson correlation over pre-filtered pairs.
fn pearson(pairs: &[(f64, f64)]) -> f64 {
    let n = pairs.len() as f64;
    let mean_a = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_b = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for &(a, b) in pairs {
        cov += (a - mean_a) * (b - mean_b);
        var_a += (a - mean_a) * (a - mean_a);
        var_b += (b - mean_b) * (b - mean_b);
    }
    cov / (var_a * var_b).sqrt()
}

// ============================================================================
// Perfect Correlation Tests
// ============================================================================

/// A sequence against itself correlates perfectly.
#[test]
fn test_self_correlation_is_one() {
    let y = [1.0, 4.0, 2.0, 8.0, 5.0, 7.0];
    assert_abs_diff_eq!(lag1_autocorr(&y, &y, NODATA), 1.0, epsilon = 1e-12);
}

/// Shifted views of a linear ramp are also perfectly correlated.
#[test]
fn test_shifted_ramp_correlation_is_one() {
    let y: Vec<f64> = (0..10).map(|i| 1.0 + 2.0 * i as f64).collect();
    let r = lag1_autocorr(&y[..9], &y[1..], NODATA);
    assert_abs_diff_eq!(r, 1.0, epsilon = 1e-12);

    assert_abs_diff_eq!(lag1_autocorr_shifted(&y, NODATA), r, epsilon = 1e-15);
}

/// An alternating series is negatively autocorrelated.
#[test]
fn test_alternating_series_is_anticorrelated() {
    let y: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
    let r = lag1_autocorr_shifted(&y, NODATA);
    assert_abs_diff_eq!(r, -1.0, epsilon = 1e-12);
}

// ============================================================================
// Sentinel Exclusion Tests
// ============================================================================

/// Sentinel pairs are excluded exactly: the statistic equals the Pearson
/// correlation of the manually restricted pairs.
#[test]
fn test_sentinel_pairs_are_excluded() {
    let y1 = [1.0, NODATA, 3.0, 4.0, 7.0, 2.0, NODATA];
    let y2 = [2.0, 5.0, NODATA, 8.0, 9.0, 1.0, 4.0];

    let restricted: Vec<(f64, f64)> = y1
        .iter()
        .zip(y2.iter())
        .filter(|(&a, &b)| a != NODATA && b != NODATA)
        .map(|(&a, &b)| (a, b))
        .collect();
    assert_eq!(restricted.len(), 4);

    assert_abs_diff_eq!(
        lag1_autocorr(&y1, &y2, NODATA),
        pearson(&restricted),
        epsilon = 1e-12
    );
}

/// Inserting sentinels into an otherwise clean series changes the result to
/// the restricted correlation, not to garbage.
#[test]
fn test_sentinel_insertion_matches_manual_restriction() {
    let clean: Vec<f64> = (0..15).map(|i| (i as f64 * 0.7).sin() * 3.0 + i as f64).collect();
    let mut gappy = clean.clone();
    gappy[3] = NODATA;
    gappy[4] = NODATA;
    gappy[11] = NODATA;

    let y1 = &gappy[..14];
    let y2 = &gappy[1..];

    let restricted: Vec<(f64, f64)> = y1
        .iter()
        .zip(y2.iter())
        .filter(|(&a, &b)| a != NODATA && b != NODATA)
        .map(|(&a, &b)| (a, b))
        .collect();

    assert_abs_diff_eq!(
        lag1_autocorr(y1, y2, NODATA),
        pearson(&restricted),
        epsilon = 1e-12
    );
}

// ============================================================================
// Degenerate Input Tests
// ============================================================================

/// Fewer than 2 valid pairs yields 0, not NaN.
#[test]
fn test_too_few_valid_pairs_returns_zero() {
    // Zero valid pairs
    let y1 = [NODATA, NODATA, 1.0];
    let y2 = [1.0, 2.0, NODATA];
    assert_eq!(lag1_autocorr(&y1, &y2, NODATA), 0.0);

    // Exactly one valid pair
    let y1 = [NODATA, 2.0, 1.0];
    let y2 = [1.0, 2.0, NODATA];
    assert_eq!(lag1_autocorr(&y1, &y2, NODATA), 0.0);

    // Empty input
    let empty: [f64; 0] = [];
    assert_eq!(lag1_autocorr(&empty, &empty, NODATA), 0.0);
}

/// Zero variance in either restricted sequence yields 0, not NaN.
#[test]
fn test_zero_variance_returns_zero() {
    let constant = [5.0, 5.0, 5.0, 5.0];
    let varying = [1.0, 2.0, 3.0, 4.0];

    assert_eq!(lag1_autocorr(&constant, &varying, NODATA), 0.0);
    assert_eq!(lag1_autocorr(&varying, &constant, NODATA), 0.0);
    assert_eq!(lag1_autocorr(&constant, &constant, NODATA), 0.0);
}

/// The statistic never returns NaN for finite inputs.
#[test]
fn test_result_is_finite() {
    let y = [1.0, NODATA, 2.0, NODATA, NODATA, 9.0, 3.0];
    let r = lag1_autocorr_shifted(&y, NODATA);
    assert!(r.is_finite());
}
