//! Envelope weight computation for asymmetric smoothing.
//!
//! ## Purpose
//!
//! This module implements the residual-sign reweighting used for asymmetric
//! Whittaker smoothing. After a fit, residuals are inspected and the
//! effective weights are rescaled so that subsequent fits are pulled toward
//! an upper or lower envelope of the data.
//!
//! ## Design notes
//!
//! * **Sign-based**: Samples above the current fit keep weight `w * p`,
//!   samples below keep `w * (1 - p)`.
//! * **Base-anchored**: Weights are always rescaled from the caller's base
//!   weights, never compounded across iterations, so masked samples
//!   (`w = 0`) stay masked and the update is idempotent at a fixed point.
//! * **Generics**: Generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Envelope fitting**: `p > 0.5` biases the fit above the data,
//!   `p < 0.5` below; `p = 0.5` scales all valid weights uniformly and
//!   leaves the trade-off ranking across candidates unchanged.
//! * **Stabilization**: Iteration stops when the effective weights stop
//!   changing between passes.
//!
//! ## Invariants
//!
//! * Effective weights satisfy `0 <= w'_i <= w_i`.
//! * A zero base weight always produces a zero effective weight.
//!
//! ## Non-goals
//!
//! * This module does not perform the smoothing itself.
//! * This module does not decide the number of envelope iterations.

// External dependencies
use num_traits::Float;

// ============================================================================
// Asymmetry
// ============================================================================

/// Asymmetry parameter for envelope fitting, in the open interval (0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asymmetry<T>(pub T);

impl<T: Float> Asymmetry<T> {
    // ========================================================================
    // Constants
    // ========================================================================

    /// Default envelope iteration budget.
    pub const DEFAULT_ITERATIONS: usize = 10;

    /// Default tolerance on the max absolute weight change between passes.
    pub const DEFAULT_TOLERANCE: f64 = 1e-10;

    // ========================================================================
    // Weight Update
    // ========================================================================

    /// Rescale the base weights from the residual signs of the current fit.
    ///
    /// `weights[i] = base[i] * p` where `y_i - z_i >= 0`, else
    /// `base[i] * (1 - p)`.
    pub fn apply_envelope_weights(&self, y: &[T], z: &[T], base: &[T], weights: &mut [T]) {
        let p = self.0;
        let q = T::one() - p;

        for i in 0..y.len() {
            let side = if y[i] - z[i] >= T::zero() { p } else { q };
            weights[i] = base[i] * side;
        }
    }

    // ========================================================================
    // Convergence
    // ========================================================================

    /// Check whether the effective weights have stabilized.
    pub fn has_converged(current: &[T], previous: &[T], tolerance: T) -> bool {
        let max_change = current
            .iter()
            .zip(previous.iter())
            .fold(T::zero(), |maxv, (&cur, &prev)| {
                T::max(maxv, (cur - prev).abs())
            });

        max_change <= tolerance
    }
}
