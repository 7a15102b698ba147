//! Second-difference penalty assembly and sum accumulators.
//!
//! ## Purpose
//!
//! This module provides the core numeric kernels shared by the solver and
//! the V-curve optimizer:
//! - Assembly of the three nonzero bands of DᵗD, where D is the discrete
//!   second-difference operator.
//! - Generic and SIMD-optimized accumulators for the weighted residual sum
//!   of squares and the roughness sum.

// External dependencies
use num_traits::Float;
use wide::{f32x8, f64x2};

// ============================================================================
// Penalty Band Assembly
// ============================================================================

/// Assemble the three nonzero bands of DᵗD for `n` samples.
///
/// Each row of D applies the (1, -2, 1) stencil at three consecutive
/// samples; the bands accumulate the products of overlapping stencils. The
/// assembly is generic in `n`, so short series (n = 3, 4) get the correct
/// truncated band pattern rather than the interior one.
///
/// `diag` must have length `n`, `sub1` length `n - 1`, `sub2` length `n - 2`.
pub fn second_difference_bands<T: Float>(diag: &mut [T], sub1: &mut [T], sub2: &mut [T]) {
    let n = diag.len();
    debug_assert!(n >= 3, "second_difference_bands: n must be at least 3");
    debug_assert_eq!(sub1.len(), n - 1);
    debug_assert_eq!(sub2.len(), n - 2);

    for v in diag.iter_mut() {
        *v = T::zero();
    }
    for v in sub1.iter_mut() {
        *v = T::zero();
    }
    for v in sub2.iter_mut() {
        *v = T::zero();
    }

    let one = T::one();
    let two = T::from(2.0).unwrap();
    let four = T::from(4.0).unwrap();

    for r in 0..n - 2 {
        diag[r] = diag[r] + one;
        diag[r + 1] = diag[r + 1] + four;
        diag[r + 2] = diag[r + 2] + one;
        sub1[r] = sub1[r] - two;
        sub1[r + 1] = sub1[r + 1] - two;
        sub2[r] = sub2[r] + one;
    }
}

// ============================================================================
// Generic Accumulation
// ============================================================================

/// Scalar weighted residual sum of squares (generic Float).
///
/// Computes `sum w_i * (y_i - z_i)^2`.
#[inline]
pub fn weighted_rss_scalar<T: Float>(y: &[T], z: &[T], w: &[T]) -> T {
    let n = y.len();
    let mut sum = T::zero();
    for i in 0..n {
        let r = y[i] - z[i];
        sum = sum + w[i] * r * r;
    }
    sum
}

/// Scalar roughness sum (generic Float).
///
/// Computes `sum (z_i - 2*z_{i+1} + z_{i+2})^2` over all second differences.
#[inline]
pub fn roughness_scalar<T: Float>(z: &[T]) -> T {
    let n = z.len();
    if n < 3 {
        return T::zero();
    }

    let two = T::from(2.0).unwrap();
    let mut sum = T::zero();
    for i in 0..n - 2 {
        let d = z[i] - two * z[i + 1] + z[i + 2];
        sum = sum + d * d;
    }
    sum
}

// ============================================================================
// Specialized Accumulation (SIMD)
// ============================================================================

/// SIMD-optimized weighted residual sum of squares (f64).
#[inline]
pub fn weighted_rss_simd_f64(y: &[f64], z: &[f64], w: &[f64]) -> f64 {
    let n = y.len();
    let mut i = 0;
    let mut acc = f64x2::splat(0.0);

    unsafe {
        while i + 2 <= n {
            let yv = f64x2::new([*y.get_unchecked(i), *y.get_unchecked(i + 1)]);
            let zv = f64x2::new([*z.get_unchecked(i), *z.get_unchecked(i + 1)]);
            let wv = f64x2::new([*w.get_unchecked(i), *w.get_unchecked(i + 1)]);

            let r = yv - zv;
            acc += wv * r * r;

            i += 2;
        }
    }

    let mut total = acc.reduce_add();

    while i < n {
        let r = y[i] - z[i];
        total += w[i] * r * r;
        i += 1;
    }

    total
}

/// SIMD-optimized weighted residual sum of squares (f32).
#[inline]
pub fn weighted_rss_simd_f32(y: &[f32], z: &[f32], w: &[f32]) -> f32 {
    let n = y.len();
    let mut i = 0;
    let mut acc = f32x8::splat(0.0);

    unsafe {
        while i + 8 <= n {
            let yv = f32x8::new([
                *y.get_unchecked(i),
                *y.get_unchecked(i + 1),
                *y.get_unchecked(i + 2),
                *y.get_unchecked(i + 3),
                *y.get_unchecked(i + 4),
                *y.get_unchecked(i + 5),
                *y.get_unchecked(i + 6),
                *y.get_unchecked(i + 7),
            ]);
            let zv = f32x8::new([
                *z.get_unchecked(i),
                *z.get_unchecked(i + 1),
                *z.get_unchecked(i + 2),
                *z.get_unchecked(i + 3),
                *z.get_unchecked(i + 4),
                *z.get_unchecked(i + 5),
                *z.get_unchecked(i + 6),
                *z.get_unchecked(i + 7),
            ]);
            let wv = f32x8::new([
                *w.get_unchecked(i),
                *w.get_unchecked(i + 1),
                *w.get_unchecked(i + 2),
                *w.get_unchecked(i + 3),
                *w.get_unchecked(i + 4),
                *w.get_unchecked(i + 5),
                *w.get_unchecked(i + 6),
                *w.get_unchecked(i + 7),
            ]);

            let r = yv - zv;
            acc += wv * r * r;

            i += 8;
        }
    }

    let mut total = acc.reduce_add();

    while i < n {
        let r = y[i] - z[i];
        total += w[i] * r * r;
        i += 1;
    }

    total
}

/// SIMD-optimized roughness sum (f64).
#[inline]
pub fn roughness_simd_f64(z: &[f64]) -> f64 {
    let n = z.len();
    if n < 3 {
        return 0.0;
    }

    let m = n - 2;
    let mut i = 0;
    let mut acc = f64x2::splat(0.0);

    unsafe {
        while i + 2 <= m {
            let a = f64x2::new([*z.get_unchecked(i), *z.get_unchecked(i + 1)]);
            let b = f64x2::new([*z.get_unchecked(i + 1), *z.get_unchecked(i + 2)]);
            let c = f64x2::new([*z.get_unchecked(i + 2), *z.get_unchecked(i + 3)]);

            let d = a - b - b + c;
            acc += d * d;

            i += 2;
        }
    }

    let mut total = acc.reduce_add();

    while i < m {
        let d = z[i] - z[i + 1] - z[i + 1] + z[i + 2];
        total += d * d;
        i += 1;
    }

    total
}

/// SIMD-optimized roughness sum (f32).
#[inline]
pub fn roughness_simd_f32(z: &[f32]) -> f32 {
    let n = z.len();
    if n < 3 {
        return 0.0;
    }

    let m = n - 2;
    let mut i = 0;
    let mut acc = f32x8::splat(0.0);

    unsafe {
        while i + 8 <= m {
            let a = f32x8::new([
                *z.get_unchecked(i),
                *z.get_unchecked(i + 1),
                *z.get_unchecked(i + 2),
                *z.get_unchecked(i + 3),
                *z.get_unchecked(i + 4),
                *z.get_unchecked(i + 5),
                *z.get_unchecked(i + 6),
                *z.get_unchecked(i + 7),
            ]);
            let b = f32x8::new([
                *z.get_unchecked(i + 1),
                *z.get_unchecked(i + 2),
                *z.get_unchecked(i + 3),
                *z.get_unchecked(i + 4),
                *z.get_unchecked(i + 5),
                *z.get_unchecked(i + 6),
                *z.get_unchecked(i + 7),
                *z.get_unchecked(i + 8),
            ]);
            let c = f32x8::new([
                *z.get_unchecked(i + 2),
                *z.get_unchecked(i + 3),
                *z.get_unchecked(i + 4),
                *z.get_unchecked(i + 5),
                *z.get_unchecked(i + 6),
                *z.get_unchecked(i + 7),
                *z.get_unchecked(i + 8),
                *z.get_unchecked(i + 9),
            ]);

            let d = a - b - b + c;
            acc += d * d;

            i += 8;
        }
    }

    let mut total = acc.reduce_add();

    while i < m {
        let d = z[i] - z[i + 1] - z[i + 1] + z[i + 2];
        total += d * d;
        i += 1;
    }

    total
}

// ============================================================================
// Accumulator Trait
// ============================================================================

/// Trait for type-specific fidelity and roughness accumulation.
pub trait PenaltySums: Float {
    /// Weighted residual sum of squares `sum w_i * (y_i - z_i)^2`.
    #[inline]
    fn weighted_rss(y: &[Self], z: &[Self], w: &[Self]) -> Self {
        weighted_rss_scalar(y, z, w)
    }

    /// Roughness sum `sum (second difference of z)^2`.
    #[inline]
    fn roughness_sum(z: &[Self]) -> Self {
        roughness_scalar(z)
    }
}

impl PenaltySums for f64 {
    #[inline]
    fn weighted_rss(y: &[f64], z: &[f64], w: &[f64]) -> f64 {
        weighted_rss_simd_f64(y, z, w)
    }

    #[inline]
    fn roughness_sum(z: &[f64]) -> f64 {
        roughness_simd_f64(z)
    }
}

impl PenaltySums for f32 {
    #[inline]
    fn weighted_rss(y: &[f32], z: &[f32], w: &[f32]) -> f32 {
        weighted_rss_simd_f32(y, z, w)
    }

    #[inline]
    fn roughness_sum(z: &[f32]) -> f32 {
        roughness_simd_f32(z)
    }
}
