//! High-level API for parallel Whittaker stack smoothing.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for smoothing
//! pixel stacks. It wraps the core `whittaker` builder with the stack-level
//! options of a raster workload: parallel execution, sparse-row skipping,
//! and per-row adaptive candidate grids.
//!
//! ## Design notes
//!
//! * **Fluent Integration**: Re-uses the base `whittaker` builder for the
//!   per-series parameters and funnels validation through the core
//!   validator.
//! * **Parallel-First**: Defaults to parallel execution across rows.
//! * **Feature-Gated**: Parallelism is configurable via the `cpu` crate
//!   feature; without it, execution falls back to a single thread.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`StackWhittakerBuilder`] via `Whittaker::new()`.
//! 2. Chain configuration methods (`.optimize()`, `.asymmetry()`,
//!    `.min_valid_fraction()`, etc.).
//! 3. Call `.build()` to validate and obtain a [`StackWhittaker`].
//! 4. Call `.smooth_stack(&stack, nodata)` per stack.

// External dependencies
use core::fmt::Debug;
use ndarray::Array2;
use num_traits::Float;

// Export dependencies from whittaker crate
use whittaker::internals::api::WhittakerBuilder;
use whittaker::internals::engine::executor::{Regularization, WhittakerExecutor};
use whittaker::internals::engine::validator::Validator;
use whittaker::internals::math::penalty::PenaltySums;

// Internal dependencies
use crate::engine::executor::smooth_stack_rows;
use crate::input::StackInput;

// Publicly re-exported types
pub use whittaker::internals::primitives::errors::WhittakerError;

// ============================================================================
// Stack Builder
// ============================================================================

/// Builder for the parallel stack smoother.
#[derive(Debug, Clone)]
pub struct StackWhittakerBuilder<T: Float> {
    /// Base builder from the whittaker crate.
    pub base: WhittakerBuilder<T>,

    /// Derive a per-row candidate grid from the lag-1 autocorrelation.
    pub adaptive: Option<bool>,

    /// Minimum fraction of valid (non-nodata) samples for a row to be
    /// smoothed rather than copied through.
    pub min_valid_fraction: Option<f64>,

    /// Parallel execution across rows.
    pub parallel: Option<bool>,
}

impl<T: Float> Default for StackWhittakerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> StackWhittakerBuilder<T> {
    /// Minimum number of valid samples for any smoothed row.
    const MIN_VALID_FLOOR: usize = 3;

    /// Create a new stack builder with default parameters.
    pub fn new() -> Self {
        Self {
            base: WhittakerBuilder::new(),
            adaptive: None,
            min_valid_fraction: None,
            parallel: None,
        }
    }

    // ========================================================================
    // Shared Setters
    // ========================================================================

    /// Set a fixed smoothing parameter.
    pub fn lambda(mut self, lambda: T) -> Self {
        self.base = self.base.lambda(lambda);
        self
    }

    /// Enable automatic selection over a grid of log10(lambda) candidates.
    pub fn optimize(mut self, candidates: &[T]) -> Self {
        self.base = self.base.optimize(candidates);
        self
    }

    /// Enable asymmetric envelope fitting with the given parameter.
    pub fn asymmetry(mut self, p: T) -> Self {
        self.base = self.base.asymmetry(p);
        self
    }

    /// Set the envelope iteration budget.
    pub fn iterations(mut self, iterations: usize) -> Self {
        self.base = self.base.iterations(iterations);
        self
    }

    /// Set the envelope convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.base = self.base.tolerance(tolerance);
        self
    }

    // ========================================================================
    // Stack-Specific Setters
    // ========================================================================

    /// Choose the candidate grid per row from its lag-1 autocorrelation.
    ///
    /// Mutually exclusive with `.lambda()` and `.optimize()`.
    pub fn adaptive_grid(mut self) -> Self {
        self.adaptive = Some(true);
        self
    }

    /// Set the minimum fraction of valid samples for a row to be smoothed
    /// (default 0.2). Rows below the threshold are copied through unchanged
    /// and marked NaN in the returned lambda grid.
    pub fn min_valid_fraction(mut self, fraction: f64) -> Self {
        self.min_valid_fraction = Some(fraction);
        self
    }

    /// Set parallel execution mode (default true).
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = Some(parallel);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Validate the configuration and build the stack smoother.
    pub fn build(self) -> Result<StackWhittaker<T>, WhittakerError> {
        Validator::validate_no_duplicates(self.base.duplicate_param)?;

        let adaptive = self.adaptive.unwrap_or(false);

        let regularization = match (&self.base.lambda, &self.base.grid) {
            (Some(_), _) | (_, Some(_)) if adaptive => {
                return Err(WhittakerError::DuplicateParameter {
                    parameter: "regularization",
                });
            }
            (Some(lambda), None) => {
                Validator::validate_lambda(*lambda)?;
                Regularization::Fixed(*lambda)
            }
            (None, Some(grid)) => {
                Validator::validate_grid(grid)?;
                Regularization::Grid(grid.clone())
            }
            (None, None) if adaptive => {
                // Placeholder; the engine swaps in a per-row grid.
                Regularization::Grid(Vec::new())
            }
            (None, None) => return Err(WhittakerError::MissingRegularization),
            (Some(_), Some(_)) => {
                return Err(WhittakerError::DuplicateParameter {
                    parameter: "regularization",
                });
            }
        };

        if let Some(p) = self.base.asymmetry {
            Validator::validate_asymmetry(p)?;
        }
        if let Some(iterations) = self.base.iterations {
            Validator::validate_iterations(iterations)?;
        }
        if let Some(tolerance) = self.base.tolerance {
            Validator::validate_tolerance(tolerance)?;
        }

        let fraction = self.min_valid_fraction.unwrap_or(0.2);
        if !fraction.is_finite() || !(0.0..=1.0).contains(&fraction) {
            return Err(WhittakerError::InvalidInput(format!(
                "min_valid_fraction must be in [0, 1], got {fraction}"
            )));
        }

        let mut executor = WhittakerExecutor::new(regularization).asymmetry(self.base.asymmetry);
        if let Some(iterations) = self.base.iterations {
            executor = executor.max_iterations(iterations);
        }
        if let Some(tolerance) = self.base.tolerance {
            executor = executor.tolerance(tolerance);
        }

        Ok(StackWhittaker {
            executor,
            adaptive,
            min_valid_fraction: fraction,
            parallel: self.parallel.unwrap_or(true),
        })
    }
}

// ============================================================================
// Stack Smoother
// ============================================================================

/// A validated parallel stack smoother.
#[derive(Debug)]
pub struct StackWhittaker<T> {
    executor: WhittakerExecutor<T>,
    adaptive: bool,
    min_valid_fraction: f64,
    parallel: bool,
}

impl<T: Float + PenaltySums + Debug + Send + Sync> StackWhittaker<T> {
    /// Smooth every row of a stack.
    ///
    /// Weights are derived per row as the 0/1 mask of the `nodata`
    /// sentinel; masked samples are interpolated through. Rows with too few
    /// valid samples are copied through unchanged.
    pub fn smooth_stack<I>(&self, stack: &I, nodata: T) -> Result<StackResult<T>, WhittakerError>
    where
        I: StackInput<T> + ?Sized,
    {
        let (data, rows, cols) = stack.as_stack()?;

        if rows == 0 || cols == 0 {
            return Err(WhittakerError::EmptyInput);
        }
        if cols < Validator::MIN_POINTS {
            return Err(WhittakerError::TooFewPoints {
                got: cols,
                min: Validator::MIN_POINTS,
            });
        }
        if !nodata.is_finite() {
            return Err(WhittakerError::InvalidInput(format!(
                "nodata sentinel must be finite, got {:?}",
                nodata
            )));
        }

        let min_valid = ((self.min_valid_fraction * cols as f64).ceil() as usize)
            .max(StackWhittakerBuilder::<T>::MIN_VALID_FLOOR);

        let mut smoothed = vec![T::zero(); data.len()];
        let mut sgrid = vec![T::nan(); rows];

        smooth_stack_rows(
            data,
            cols,
            nodata,
            &self.executor,
            self.adaptive,
            min_valid,
            self.parallel,
            &mut smoothed,
            &mut sgrid,
        );

        Ok(StackResult {
            smoothed,
            sgrid,
            rows,
            cols,
        })
    }
}

// ============================================================================
// Stack Result
// ============================================================================

/// Output of a stack smoothing run.
#[derive(Debug, Clone, PartialEq)]
pub struct StackResult<T> {
    /// Smoothed stack in row-major order (skipped rows copied through).
    pub smoothed: Vec<T>,

    /// Chosen log10(lambda) per row; NaN marks skipped rows.
    pub sgrid: Vec<T>,

    /// Number of rows (series) in the stack.
    pub rows: usize,

    /// Number of samples per series.
    pub cols: usize,
}

impl<T: Float> StackResult<T> {
    /// Smoothed values of one row.
    pub fn row(&self, index: usize) -> &[T] {
        &self.smoothed[index * self.cols..(index + 1) * self.cols]
    }

    /// Number of rows that were skipped by the valid-sample rule.
    pub fn skipped(&self) -> usize {
        self.sgrid.iter().filter(|s| s.is_nan()).count()
    }

    /// Copy the smoothed stack into a 2-D array.
    pub fn to_array(&self) -> Array2<T> {
        Array2::from_shape_vec((self.rows, self.cols), self.smoothed.clone())
            .expect("stack dimensions are consistent by construction")
    }
}
