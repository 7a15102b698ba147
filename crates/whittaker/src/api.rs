//! High-level API for Whittaker smoothing.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for Whittaker
//! smoothing. It implements a fluent builder pattern for configuring the
//! regularization mode (fixed lambda or V-curve candidate grid), the
//! asymmetric envelope options, and the optional outputs.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all
//!   parameters.
//! * **Validated**: Parameters are validated when `.build()` is called;
//!   data is validated on every `.smooth()` call.
//! * **Type-Safe**: Generic over `Float` types for flexible precision.
//!
//! ## Key concepts
//!
//! * **Regularization mode**: Exactly one of `.lambda(value)` or
//!   `.optimize(&candidates)` must be configured.
//! * **Envelope fitting**: `.asymmetry(p)` switches the model to the
//!   iterative envelope variant; `.iterations()` and `.tolerance()` bound
//!   the loop.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`WhittakerBuilder`] via `Whittaker::new()`.
//! 2. Chain configuration methods (`.lambda()`, `.optimize()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`WhittakerModel`].
//! 4. Call `.smooth(&y, &w)` as many times as needed.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::engine::executor::{Regularization, WhittakerExecutor};
use crate::engine::validator::Validator;
use crate::math::penalty::PenaltySums;

// Publicly re-exported types
pub use crate::engine::output::SmoothResult;
pub use crate::primitives::errors::WhittakerError;

// ============================================================================
// Builder
// ============================================================================

/// Fluent builder for configuring Whittaker smoothing.
#[derive(Debug, Clone)]
pub struct WhittakerBuilder<T> {
    /// Fixed smoothing parameter.
    pub lambda: Option<T>,

    /// Candidate grid of log10(lambda) values for V-curve selection.
    pub grid: Option<Vec<T>>,

    /// Asymmetry parameter for envelope fitting.
    pub asymmetry: Option<T>,

    /// Envelope iteration budget.
    pub iterations: Option<usize>,

    /// Envelope convergence tolerance.
    pub tolerance: Option<T>,

    /// Include V-curve curvature scores in the result.
    pub return_curvature: Option<bool>,

    /// Include residuals in the result.
    pub return_residuals: Option<bool>,

    /// Include final envelope weights in the result.
    pub return_envelope_weights: Option<bool>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl<T: Float> Default for WhittakerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> WhittakerBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            lambda: None,
            grid: None,
            asymmetry: None,
            iterations: None,
            tolerance: None,
            return_curvature: None,
            return_residuals: None,
            return_envelope_weights: None,
            duplicate_param: None,
        }
    }

    /// Set a fixed smoothing parameter.
    ///
    /// Mutually exclusive with [`optimize`](Self::optimize).
    pub fn lambda(mut self, lambda: T) -> Self {
        if self.lambda.is_some() || self.grid.is_some() {
            self.duplicate_param = Some("regularization");
        }
        self.lambda = Some(lambda);
        self
    }

    /// Enable automatic selection over a grid of log10(lambda) candidates.
    ///
    /// Mutually exclusive with [`lambda`](Self::lambda).
    pub fn optimize(mut self, candidates: &[T]) -> Self {
        if self.lambda.is_some() || self.grid.is_some() {
            self.duplicate_param = Some("regularization");
        }
        self.grid = Some(candidates.to_vec());
        self
    }

    /// Enable asymmetric envelope fitting with the given parameter.
    ///
    /// `p > 0.5` biases the fit above the data, `p < 0.5` below.
    pub fn asymmetry(mut self, p: T) -> Self {
        if self.asymmetry.is_some() {
            self.duplicate_param = Some("asymmetry");
        }
        self.asymmetry = Some(p);
        self
    }

    /// Set the envelope iteration budget (default 10).
    pub fn iterations(mut self, iterations: usize) -> Self {
        if self.iterations.is_some() {
            self.duplicate_param = Some("iterations");
        }
        self.iterations = Some(iterations);
        self
    }

    /// Set the envelope convergence tolerance (default 1e-10).
    pub fn tolerance(mut self, tolerance: T) -> Self {
        if self.tolerance.is_some() {
            self.duplicate_param = Some("tolerance");
        }
        self.tolerance = Some(tolerance);
        self
    }

    /// Include V-curve curvature scores in the result.
    pub fn return_curvature(mut self) -> Self {
        self.return_curvature = Some(true);
        self
    }

    /// Include residuals in the result.
    pub fn return_residuals(mut self) -> Self {
        self.return_residuals = Some(true);
        self
    }

    /// Include the final envelope weights in the result.
    pub fn return_envelope_weights(mut self) -> Self {
        self.return_envelope_weights = Some(true);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the model.
    pub fn build(self) -> Result<WhittakerModel<T>, WhittakerError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Exactly one regularization mode must be configured
        let regularization = match (self.lambda, self.grid) {
            (Some(lambda), None) => {
                Validator::validate_lambda(lambda)?;
                Regularization::Fixed(lambda)
            }
            (None, Some(grid)) => {
                Validator::validate_grid(&grid)?;
                Regularization::Grid(grid)
            }
            (None, None) => return Err(WhittakerError::MissingRegularization),
            (Some(_), Some(_)) => {
                return Err(WhittakerError::DuplicateParameter {
                    parameter: "regularization",
                });
            }
        };

        // Validate envelope parameters
        if let Some(p) = self.asymmetry {
            Validator::validate_asymmetry(p)?;
        }
        if let Some(iterations) = self.iterations {
            Validator::validate_iterations(iterations)?;
        }
        if let Some(tolerance) = self.tolerance {
            Validator::validate_tolerance(tolerance)?;
        }

        let mut executor = WhittakerExecutor::new(regularization).asymmetry(self.asymmetry);
        if let Some(iterations) = self.iterations {
            executor = executor.max_iterations(iterations);
        }
        if let Some(tolerance) = self.tolerance {
            executor = executor.tolerance(tolerance);
        }

        Ok(WhittakerModel {
            executor,
            return_curvature: self.return_curvature.unwrap_or(false),
            return_residuals: self.return_residuals.unwrap_or(false),
            return_envelope_weights: self.return_envelope_weights.unwrap_or(false),
        })
    }
}

// ============================================================================
// Model
// ============================================================================

/// A validated Whittaker smoothing model.
#[derive(Debug, Clone)]
pub struct WhittakerModel<T> {
    executor: WhittakerExecutor<T>,
    return_curvature: bool,
    return_residuals: bool,
    return_envelope_weights: bool,
}

impl<T: Float + PenaltySums> WhittakerModel<T> {
    /// Smooth one weighted series.
    ///
    /// `y` and `w` must have equal length `n >= 3`; weights must be finite
    /// and non-negative with at least one positive entry. Zero weights mark
    /// missing observations that are interpolated through.
    pub fn smooth(&self, y: &[T], w: &[T]) -> Result<SmoothResult<T>, WhittakerError> {
        Validator::validate_series(y, w)?;

        let output = self.executor.run(y, w, None);

        let residuals = if self.return_residuals {
            Some(
                y.iter()
                    .zip(output.smoothed.iter())
                    .map(|(&yi, &zi)| yi - zi)
                    .collect(),
            )
        } else {
            None
        };

        let envelope_weights = if self.return_envelope_weights && output.iterations.is_some() {
            Some(output.weights)
        } else {
            None
        };

        Ok(SmoothResult {
            smoothed: output.smoothed,
            lambda: output.lambda,
            log10_lambda: output.log10_lambda,
            curvature: if self.return_curvature {
                output.curvature
            } else {
                None
            },
            residuals,
            envelope_weights,
            iterations_used: output.iterations,
        })
    }
}
