//! Pentadiagonal solver for the Whittaker normal equations.
//!
//! ## Purpose
//!
//! This module solves `(W + lambda * DᵗD) z = W y` for `z`, where `W` is the
//! diagonal weight matrix and `D` the discrete second-difference operator.
//! The system matrix is symmetric, positive definite, and banded with
//! half-bandwidth 2; a square-root-free LDLᵀ factorization solves it in
//! O(n) time using only five O(n) diagonals of scratch space.
//!
//! ## Design notes
//!
//! * **No dense matrices**: Only the three penalty bands and three
//!   factorization diagonals are ever materialized.
//! * **Band caching**: The penalty bands depend only on `n`; they are
//!   reassembled only when the series length changes between calls that
//!   share a [`SolverBuffer`].
//! * **In-place elimination**: The right-hand side is accumulated and
//!   back-substituted directly in the output slice.
//!
//! ## Invariants
//!
//! * `n >= 3`, `lambda > 0`, and at least one positive weight; under these
//!   preconditions every pivot is positive and the solve is exact up to
//!   floating-point rounding.
//! * The solver performs no singularity recovery. Enforcing the
//!   preconditions is the caller's obligation (see `engine::validator`).
//!
//! ## Non-goals
//!
//! * This module does not validate inputs (handled by `validator`).
//! * This module does not select the regularization strength (handled by
//!   `evaluation::vcurve`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::penalty::second_difference_bands;
use crate::primitives::buffer::SolverBuffer;

/// Solve `(W + lambda * DᵗD) z = W y` into `z`.
///
/// `y`, `w`, and `z` must all have the same length `n >= 3`. Scratch space
/// is taken from `buf`; reusing one buffer across calls on same-length
/// series skips the penalty-band assembly.
pub fn solve_normal_equations<T: Float>(
    y: &[T],
    w: &[T],
    lambda: T,
    buf: &mut SolverBuffer<T>,
    z: &mut [T],
) {
    let n = y.len();
    debug_assert!(n >= 3, "solve_normal_equations: n must be at least 3");
    debug_assert_eq!(w.len(), n);
    debug_assert_eq!(z.len(), n);
    debug_assert!(
        lambda > T::zero(),
        "solve_normal_equations: lambda must be positive"
    );

    if buf.prepare(n) {
        second_difference_bands(
            &mut buf.penalty_diag,
            &mut buf.penalty_sub1,
            &mut buf.penalty_sub2,
        );
    }

    let p0 = &buf.penalty_diag[..];
    let p1 = &buf.penalty_sub1[..];
    let p2 = &buf.penalty_sub2[..];
    let d = &mut buf.pivots;
    let c = &mut buf.ratio1;
    let e = &mut buf.ratio2;

    // Forward pass: factor A = L diag(d) Lᵀ with unit lower-banded L, and
    // eliminate the right-hand side W y into z simultaneously.
    for i in 0..n {
        let mut di = w[i] + lambda * p0[i];
        if i >= 1 {
            di = di - c[i - 1] * c[i - 1] * d[i - 1];
        }
        if i >= 2 {
            di = di - e[i - 2] * e[i - 2] * d[i - 2];
        }
        d[i] = di;

        if i + 1 < n {
            let mut ci = lambda * p1[i];
            if i >= 1 {
                ci = ci - c[i - 1] * e[i - 1] * d[i - 1];
            }
            c[i] = ci / di;
        }
        if i + 2 < n {
            e[i] = lambda * p2[i] / di;
        }

        let mut zi = w[i] * y[i];
        if i >= 1 {
            zi = zi - c[i - 1] * z[i - 1];
        }
        if i >= 2 {
            zi = zi - e[i - 2] * z[i - 2];
        }
        z[i] = zi;
    }

    // Back substitution.
    z[n - 1] = z[n - 1] / d[n - 1];
    z[n - 2] = z[n - 2] / d[n - 2] - c[n - 2] * z[n - 1];
    for i in (0..n - 2).rev() {
        z[i] = z[i] / d[i] - c[i] * z[i + 1] - e[i] * z[i + 2];
    }
}
