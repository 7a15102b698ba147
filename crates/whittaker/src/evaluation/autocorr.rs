//! Lag-1 autocorrelation with nodata exclusion.
//!
//! ## Purpose
//!
//! This module provides the temporal-autocorrelation diagnostic used
//! upstream to decide whether a pixel's series is worth optimizing at all,
//! and with which candidate range. It computes the Pearson correlation
//! between two equal-length sequences (typically one-sample-shifted views
//! of the same series), restricted to index pairs where neither value
//! equals the nodata sentinel.
//!
//! ## Design notes
//!
//! * **Single pass**: Means and sums of squares/cross-products accumulate in
//!   one loop over the valid pairs.
//! * **Defined degenerate result**: Fewer than 2 valid pairs, or zero
//!   variance in either restricted sequence, returns 0 rather than
//!   propagating a division by zero or NaN.
//!
//! ## Non-goals
//!
//! * This module does not impute or interpolate missing samples.
//! * This module does not validate sentinel choice (a NaN sentinel never
//!   matches and is the caller's mistake).

// External dependencies
use num_traits::Float;

/// Pearson correlation of `y1` against `y2`, excluding nodata pairs.
///
/// Only index pairs where neither value equals `nodata` contribute to the
/// statistic. Both slices must have the same length. Returns 0 when fewer
/// than 2 valid pairs remain or when either restricted sequence has zero
/// variance.
pub fn lag1_autocorr<T: Float>(y1: &[T], y2: &[T], nodata: T) -> T {
    debug_assert_eq!(y1.len(), y2.len(), "lag1_autocorr: length mismatch");

    let mut count = 0usize;
    let mut sum_a = T::zero();
    let mut sum_b = T::zero();
    let mut sum_aa = T::zero();
    let mut sum_bb = T::zero();
    let mut sum_ab = T::zero();

    for (&a, &b) in y1.iter().zip(y2.iter()) {
        if a == nodata || b == nodata {
            continue;
        }
        count += 1;
        sum_a = sum_a + a;
        sum_b = sum_b + b;
        sum_aa = sum_aa + a * a;
        sum_bb = sum_bb + b * b;
        sum_ab = sum_ab + a * b;
    }

    if count < 2 {
        return T::zero();
    }

    let n = T::from(count).unwrap();
    let cov = sum_ab - sum_a * sum_b / n;
    let var_a = sum_aa - sum_a * sum_a / n;
    let var_b = sum_bb - sum_b * sum_b / n;

    if var_a <= T::zero() || var_b <= T::zero() {
        return T::zero();
    }

    cov / (var_a * var_b).sqrt()
}

/// Lag-1 autocorrelation of a single series against its own shift.
///
/// Convenience wrapper equivalent to
/// `lag1_autocorr(&y[..n - 1], &y[1..], nodata)`. Series shorter than 3
/// samples return 0.
pub fn lag1_autocorr_shifted<T: Float>(y: &[T], nodata: T) -> T {
    let n = y.len();
    if n < 3 {
        return T::zero();
    }
    lag1_autocorr(&y[..n - 1], &y[1..], nodata)
}
