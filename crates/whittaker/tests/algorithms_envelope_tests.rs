#![cfg(feature = "dev")]
//! Tests for the envelope weight update.
//!
//! These tests verify the residual-sign reweighting in isolation:
//! - Sign-dependent rescaling against the base weights
//! - Masked samples staying masked
//! - The convergence predicate
//!
//! ## Test Organization
//!
//! 1. **Weight Update** - Sign handling and base anchoring
//! 2. **Convergence** - Threshold behavior of the stabilization check

use approx::assert_abs_diff_eq;

use whittaker::internals::algorithms::envelope::Asymmetry;

// ============================================================================
// Weight Update Tests
// ============================================================================

/// Samples on or above the fit get `w * p`; samples below get `w * (1-p)`.
#[test]
fn test_update_splits_on_residual_sign() {
    let y = [2.0, 1.0, 3.0, 3.0];
    let z = [1.0, 2.0, 3.0, 4.0];
    let base = [1.0, 1.0, 2.0, 1.0];
    let mut weights = [0.0; 4];

    Asymmetry(0.9).apply_envelope_weights(&y, &z, &base, &mut weights);

    assert_abs_diff_eq!(weights[0], 0.9, epsilon = 1e-12); // above
    assert_abs_diff_eq!(weights[1], 0.1, epsilon = 1e-12); // below
    assert_abs_diff_eq!(weights[2], 1.8, epsilon = 1e-12); // exactly on: counts as above
    assert_abs_diff_eq!(weights[3], 0.1, epsilon = 1e-12); // below
}

/// Zero base weights stay zero regardless of the residual sign.
#[test]
fn test_update_preserves_masking() {
    let y = [5.0, -5.0, 0.0];
    let z = [0.0, 0.0, 0.0];
    let base = [0.0, 0.0, 0.0];
    let mut weights = [1.0; 3];

    Asymmetry(0.8).apply_envelope_weights(&y, &z, &base, &mut weights);

    assert_eq!(weights, [0.0; 3]);
}

/// The update rescales from the base weights, never from the previous
/// effective weights: applying it twice with the same fit is idempotent.
#[test]
fn test_update_is_idempotent_for_fixed_fit() {
    let y = [2.0, 1.0, 3.0];
    let z = [1.5, 1.5, 1.5];
    let base = [1.0, 0.5, 2.0];

    let mut first = [0.0; 3];
    Asymmetry(0.7).apply_envelope_weights(&y, &z, &base, &mut first);

    let mut second = first;
    Asymmetry(0.7).apply_envelope_weights(&y, &z, &base, &mut second);

    assert_eq!(first, second);
}

/// p = 0.5 scales every valid weight by the same factor.
#[test]
fn test_half_asymmetry_is_uniform_scaling() {
    let y = [2.0, 1.0, 3.0, 0.0];
    let z = [1.0, 2.0, 3.0, 1.0];
    let base = [1.0, 2.0, 0.0, 4.0];
    let mut weights = [0.0; 4];

    Asymmetry(0.5).apply_envelope_weights(&y, &z, &base, &mut weights);

    for (we, b) in weights.iter().zip(base.iter()) {
        assert_abs_diff_eq!(*we, 0.5 * b, epsilon = 1e-12);
    }
}

// ============================================================================
// Convergence Tests
// ============================================================================

#[test]
fn test_convergence_threshold() {
    let previous = [1.0, 0.5, 0.0];

    let unchanged = [1.0, 0.5, 0.0];
    assert!(Asymmetry::has_converged(&unchanged, &previous, 1e-10));

    let nudged = [1.0, 0.5 + 1e-12, 0.0];
    assert!(Asymmetry::has_converged(&nudged, &previous, 1e-10));

    let moved = [1.0, 0.6, 0.0];
    assert!(!Asymmetry::has_converged(&moved, &previous, 1e-10));
}
