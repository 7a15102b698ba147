//! Input validation for Whittaker configuration and data.
//!
//! ## Purpose
//!
//! This module provides comprehensive validation functions for Whittaker
//! configuration parameters and input data. It checks requirements such as
//! input lengths, finite values, weight signs, and parameter bounds.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Efficiency**: Checks are ordered from cheap to expensive; the weight
//!   scan folds the non-negativity, finiteness, and degeneracy checks into
//!   one pass.
//! * **Generics**: Validation is generic over `Float` types.
//!
//! ## Key concepts
//!
//! * **Parameter Bounds**: Enforces constraints like lambda > 0 and the
//!   asymmetry parameter in (0, 1).
//! * **Finite Checks**: Ensures all inputs are finite (no NaN/Inf).
//! * **Degeneracy**: An all-zero weight vector makes the normal equations
//!   singular and is rejected here, never solved into garbage output.
//!
//! ## Invariants
//!
//! * All validated inputs satisfy their respective mathematical constraints.
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not transform or filter input data.
//! * This module does not provide automatic correction of invalid inputs.
//! * This module does not perform the smoothing or optimization itself.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::format;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::WhittakerError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for Whittaker configuration and input data.
///
/// Provides static methods for validating parameters and input data. All
/// methods return `Result<(), WhittakerError>` and fail fast upon
/// identifying the first violation.
pub struct Validator;

impl Validator {
    /// Minimum number of samples for a second-order penalty.
    pub const MIN_POINTS: usize = 3;

    /// Minimum number of candidates for curvature evaluation.
    pub const MIN_CANDIDATES: usize = 3;

    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate a series and its weights for smoothing.
    pub fn validate_series<T: Float>(y: &[T], w: &[T]) -> Result<(), WhittakerError> {
        // Check 1: Non-empty arrays
        if y.is_empty() || w.is_empty() {
            return Err(WhittakerError::EmptyInput);
        }

        // Check 2: Matching lengths
        let n = y.len();
        if n != w.len() {
            return Err(WhittakerError::MismatchedInputs {
                y_len: n,
                w_len: w.len(),
            });
        }

        // Check 3: Sufficient samples for the second-difference penalty
        if n < Self::MIN_POINTS {
            return Err(WhittakerError::TooFewPoints {
                got: n,
                min: Self::MIN_POINTS,
            });
        }

        // Check 4: Finite values, non-negative weights, and at least one
        // positive weight (combined loop for cache locality)
        let mut any_positive = false;
        for i in 0..n {
            if !y[i].is_finite() {
                return Err(WhittakerError::InvalidNumericValue(format!(
                    "y[{}]={}",
                    i,
                    y[i].to_f64().unwrap_or(f64::NAN)
                )));
            }
            let wi = w[i];
            if !wi.is_finite() {
                return Err(WhittakerError::InvalidNumericValue(format!(
                    "w[{}]={}",
                    i,
                    wi.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if wi < T::zero() {
                return Err(WhittakerError::NegativeWeight {
                    index: i,
                    value: wi.to_f64().unwrap_or(f64::NAN),
                });
            }
            any_positive |= wi > T::zero();
        }

        if !any_positive {
            return Err(WhittakerError::DegenerateWeights);
        }

        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate the smoothing parameter.
    pub fn validate_lambda<T: Float>(lambda: T) -> Result<(), WhittakerError> {
        if !lambda.is_finite() || lambda <= T::zero() {
            return Err(WhittakerError::InvalidLambda(
                lambda.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate a candidate grid of log10(lambda) values.
    ///
    /// The grid must contain at least three finite, strictly increasing
    /// candidates so that curvature is defined at an interior point.
    pub fn validate_grid<T: Float>(grid: &[T]) -> Result<(), WhittakerError> {
        if grid.len() < Self::MIN_CANDIDATES {
            return Err(WhittakerError::TooFewCandidates {
                got: grid.len(),
                min: Self::MIN_CANDIDATES,
            });
        }

        for (i, &v) in grid.iter().enumerate() {
            if !v.is_finite() {
                return Err(WhittakerError::InvalidNumericValue(format!(
                    "grid[{}]={}",
                    i,
                    v.to_f64().unwrap_or(f64::NAN)
                )));
            }
            if i > 0 && v <= grid[i - 1] {
                return Err(WhittakerError::GridNotAscending { index: i });
            }
        }

        Ok(())
    }

    /// Validate the asymmetry parameter.
    pub fn validate_asymmetry<T: Float>(p: T) -> Result<(), WhittakerError> {
        if !p.is_finite() || p <= T::zero() || p >= T::one() {
            return Err(WhittakerError::InvalidAsymmetry(
                p.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate the envelope iteration budget.
    pub fn validate_iterations(iterations: usize) -> Result<(), WhittakerError> {
        const MAX_ITERATIONS: usize = 1000;
        if iterations == 0 || iterations > MAX_ITERATIONS {
            return Err(WhittakerError::InvalidIterations(iterations));
        }
        Ok(())
    }

    /// Validate the envelope convergence tolerance.
    pub fn validate_tolerance<T: Float>(tol: T) -> Result<(), WhittakerError> {
        if !tol.is_finite() || tol <= T::zero() {
            return Err(WhittakerError::InvalidTolerance(
                tol.to_f64().unwrap_or(f64::NAN),
            ));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), WhittakerError> {
        if let Some(param) = duplicate_param {
            return Err(WhittakerError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
