//! V-curve selection of the regularization strength.
//!
//! ## Purpose
//!
//! This module selects the optimal smoothing parameter from a caller-supplied
//! grid of log10(lambda) candidates. Each candidate is scored by one O(n)
//! solve; the log fit error and log roughness of the fits trace a parametric
//! curve (the "V-curve") whose sharpest corner marks the best trade-off
//! between fidelity and smoothness.
//!
//! ## Design notes
//!
//! * **One solve per candidate**: No held-out data and no repeated
//!   cross-validation folds; per-pixel workloads make true cross-validation
//!   prohibitive at this data volume.
//! * **Callback smoother**: The actual solve is injected as a closure so
//!   this module owns no solver state (mirrors how candidate scoring is
//!   decoupled from fitting elsewhere in the crate).
//! * **Finite profiles**: Sums are clamped to the smallest positive value
//!   before taking log10, so perfect fits and exactly-linear candidates
//!   stay finite.
//!
//! ## Key concepts
//!
//! * **Fit profile**: F(v) = log10(sum w_i * (y_i - z_i)^2) per candidate v.
//! * **Roughness profile**: R(v) = log10(sum (second difference of z)^2).
//! * **Curvature**: central finite differences of F and R with respect to v,
//!   honoring uneven grid spacing; kappa = (F'R'' - R'F'') / (F'^2 + R'^2)^1.5.
//!
//! ## Invariants
//!
//! * Curvature is defined at interior candidates only; endpoints score zero.
//! * Ties on |kappa| resolve to the first candidate in ascending scan order,
//!   i.e. the smallest lambda.
//! * Selection is deterministic for identical inputs.
//!
//! ## Non-goals
//!
//! * This module does not perform the solve itself (injected via callback).
//! * This module does not validate the candidate grid (handled by
//!   `validator`).

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::math::penalty::PenaltySums;

// ============================================================================
// Selection Result
// ============================================================================

/// Outcome of a V-curve scan over a candidate grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VCurveSelection<T> {
    /// Grid index of the winning candidate.
    pub index: usize,

    /// Winning candidate as log10(lambda).
    pub log10_lambda: T,

    /// Winning lambda value.
    pub lambda: T,

    /// Curvature magnitude at the winning candidate.
    pub curvature_max: T,
}

// ============================================================================
// V-Curve Scan
// ============================================================================

/// V-curve scoring and optimum selection.
pub struct VCurve;

impl VCurve {
    /// Run a full V-curve scan and select the optimal candidate.
    ///
    /// `smoother` is called once per candidate with the lambda value and the
    /// output slice for the trial fit. `fits`, `pens`, and `curvature` must
    /// have the same length as `grid`; `z_trial` the same length as `y`.
    pub fn run<T, F>(
        y: &[T],
        w: &[T],
        grid: &[T],
        fits: &mut [T],
        pens: &mut [T],
        curvature: &mut [T],
        z_trial: &mut [T],
        smoother: F,
    ) -> VCurveSelection<T>
    where
        T: Float + PenaltySums,
        F: FnMut(T, &mut [T]),
    {
        Self::profiles(y, w, grid, fits, pens, z_trial, smoother);
        Self::curvature_profile(grid, fits, pens, curvature);
        let index = Self::select_max_curvature(curvature);

        let ten = T::from(10.0).unwrap();
        VCurveSelection {
            index,
            log10_lambda: grid[index],
            lambda: ten.powf(grid[index]),
            curvature_max: curvature[index].abs(),
        }
    }

    // ========================================================================
    // Profiles
    // ========================================================================

    /// Evaluate the log fit error and log roughness for every candidate.
    pub fn profiles<T, F>(
        y: &[T],
        w: &[T],
        grid: &[T],
        fits: &mut [T],
        pens: &mut [T],
        z_trial: &mut [T],
        mut smoother: F,
    ) where
        T: Float + PenaltySums,
        F: FnMut(T, &mut [T]),
    {
        debug_assert_eq!(fits.len(), grid.len());
        debug_assert_eq!(pens.len(), grid.len());

        let ten = T::from(10.0).unwrap();
        let floor = T::min_positive_value();

        for (k, &v) in grid.iter().enumerate() {
            let lambda = ten.powf(v);
            smoother(lambda, z_trial);

            let fit = T::weighted_rss(y, z_trial, w).max(floor);
            let pen = T::roughness_sum(z_trial).max(floor);

            fits[k] = fit.log10();
            pens[k] = pen.log10();
        }
    }

    // ========================================================================
    // Curvature
    // ========================================================================

    /// Curvature of the parametric (R, F) curve at each interior candidate.
    ///
    /// Central finite differences use the actual grid spacing, so unevenly
    /// spaced candidate grids are scored correctly. Endpoints are set to
    /// zero (curvature is undefined without both neighbors).
    pub fn curvature_profile<T: Float>(grid: &[T], fits: &[T], pens: &[T], curvature: &mut [T]) {
        let m = grid.len();
        debug_assert!(m >= 3, "curvature_profile: need at least 3 candidates");
        debug_assert_eq!(curvature.len(), m);

        let two = T::from(2.0).unwrap();
        let threehalf = T::from(1.5).unwrap();

        curvature[0] = T::zero();
        curvature[m - 1] = T::zero();

        for i in 1..m - 1 {
            let hl = grid[i] - grid[i - 1];
            let hr = grid[i + 1] - grid[i];
            let h2 = grid[i + 1] - grid[i - 1];

            let f1 = (fits[i + 1] - fits[i - 1]) / h2;
            let r1 = (pens[i + 1] - pens[i - 1]) / h2;

            let f2 = two * ((fits[i + 1] - fits[i]) / hr - (fits[i] - fits[i - 1]) / hl) / h2;
            let r2 = two * ((pens[i + 1] - pens[i]) / hr - (pens[i] - pens[i - 1]) / hl) / h2;

            let denom = (f1 * f1 + r1 * r1).powf(threehalf);
            curvature[i] = if denom > T::zero() {
                (f1 * r2 - r1 * f2) / denom
            } else {
                T::zero()
            };
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Index of the interior candidate with maximum curvature magnitude.
    ///
    /// Ties resolve to the first candidate in ascending scan order, which is
    /// the smallest lambda among the tied candidates.
    pub fn select_max_curvature<T: Float>(curvature: &[T]) -> usize {
        let m = curvature.len();
        debug_assert!(m >= 3, "select_max_curvature: need at least 3 candidates");

        let mut best = 1;
        let mut best_mag = curvature[1].abs();

        for (i, &kappa) in curvature.iter().enumerate().take(m - 1).skip(2) {
            let mag = kappa.abs();
            if mag > best_mag {
                best = i;
                best_mag = mag;
            }
        }

        best
    }
}
