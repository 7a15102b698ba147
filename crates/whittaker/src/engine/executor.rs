//! Execution engine for Whittaker smoothing operations.
//!
//! ## Purpose
//!
//! This module provides the core execution engine that orchestrates
//! Whittaker smoothing. It coordinates the pentadiagonal solver, the
//! V-curve optimizer, and the asymmetric envelope loop, and manages working
//! buffers so that per-series overhead stays allocation-light.
//!
//! ## Design notes
//!
//! * Accepts an optional external buffer so batch callers can recycle
//!   scratch memory across many series (one buffer per thread).
//! * The envelope loop is a plain bounded iteration: fixed budget with an
//!   early exit once the effective weights stabilize.
//! * Supports both fixed-lambda and candidate-grid regularization in every
//!   mode, symmetric or asymmetric.
//! * Generic over `Float` types to support f32 and f64.
//!
//! ## Invariants
//!
//! * Inputs are assumed validated (lengths equal, n >= 3, weights finite
//!   and non-negative with at least one positive entry).
//! * All working buffers have the same length as the input series.
//! * Effective weights never exceed the caller's base weights.
//!
//! ## Non-goals
//!
//! * This module does not validate input data (handled by `validator`).
//! * This module does not provide public-facing result formatting (handled
//!   by `output`).
//! * This module does not parallelize across series (a batch caller's
//!   concern).

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::algorithms::envelope::Asymmetry;
use crate::evaluation::vcurve::VCurve;
use crate::math::penalty::PenaltySums;
use crate::math::solver::solve_normal_equations;
use crate::primitives::buffer::{SolverBuffer, VecExt};
pub use crate::primitives::buffer::WhittakerBuffer;

// ============================================================================
// Configuration Types
// ============================================================================

/// How the smoothing parameter is chosen.
#[derive(Debug, Clone, PartialEq)]
pub enum Regularization<T> {
    /// A fixed lambda value.
    Fixed(T),

    /// A grid of log10(lambda) candidates scored by the V-curve.
    Grid(Vec<T>),
}

/// Output from Whittaker execution.
#[derive(Debug, Clone)]
pub struct ExecutorOutput<T> {
    /// Smoothed series.
    pub smoothed: Vec<T>,

    /// Lambda used for the final fit (fixed or V-curve selected).
    pub lambda: T,

    /// log10 of the lambda used.
    pub log10_lambda: T,

    /// V-curve curvature per candidate (grid regularization only).
    pub curvature: Option<Vec<T>>,

    /// Envelope iterations performed (asymmetric fitting only).
    pub iterations: Option<usize>,

    /// Final effective weights (equal to the base weights for symmetric
    /// fits).
    pub weights: Vec<T>,
}

// ============================================================================
// Executor
// ============================================================================

/// Unified executor for Whittaker smoothing operations.
#[derive(Debug, Clone)]
pub struct WhittakerExecutor<T> {
    /// Regularization mode (fixed lambda or candidate grid).
    pub regularization: Regularization<T>,

    /// Asymmetry parameter for envelope fitting (None = symmetric).
    pub asymmetry: Option<T>,

    /// Envelope iteration budget.
    pub max_iterations: usize,

    /// Tolerance on the effective-weight change for early envelope exit.
    pub tolerance: T,
}

impl<T: Float> WhittakerExecutor<T> {
    // ========================================================================
    // Constructor and Builder Methods
    // ========================================================================

    /// Create a new executor with the given regularization mode.
    pub fn new(regularization: Regularization<T>) -> Self {
        Self {
            regularization,
            asymmetry: None,
            max_iterations: Asymmetry::<T>::DEFAULT_ITERATIONS,
            tolerance: T::from(Asymmetry::<T>::DEFAULT_TOLERANCE).unwrap(),
        }
    }

    /// Set the asymmetry parameter.
    pub fn asymmetry(mut self, p: Option<T>) -> Self {
        self.asymmetry = p;
        self
    }

    /// Set the envelope iteration budget.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Set the envelope convergence tolerance.
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }
}

impl<T: Float + PenaltySums> WhittakerExecutor<T> {
    // ========================================================================
    // Main Entry Point
    // ========================================================================

    /// Execute smoothing on a validated series.
    ///
    /// When `buffer` is provided, its scratch memory is reused; otherwise a
    /// temporary buffer lives for the duration of the call.
    pub fn run(
        &self,
        y: &[T],
        w: &[T],
        buffer: Option<&mut WhittakerBuffer<T>>,
    ) -> ExecutorOutput<T> {
        let n = y.len();
        let ncand = match &self.regularization {
            Regularization::Grid(grid) => grid.len(),
            Regularization::Fixed(_) => 0,
        };

        let mut internal_buffers;
        let buffers = if let Some(b) = buffer {
            b
        } else {
            internal_buffers = WhittakerBuffer::default();
            &mut internal_buffers
        };
        buffers.prepare(n, ncand, self.asymmetry.is_some());

        let WhittakerBuffer {
            ref mut weights,
            ref mut weights_prev,
            ref mut z_trial,
            ref mut fits,
            ref mut pens,
            ref mut curvature,
            ref mut solver,
        } = *buffers;

        let mut smoothed = vec![T::zero(); n];

        let (lambda, log10_lambda, iterations) = match self.asymmetry {
            None => {
                let (lambda, log10_lambda) = Self::fit_pass(
                    &self.regularization,
                    y,
                    w,
                    z_trial,
                    fits,
                    pens,
                    curvature,
                    solver,
                    &mut smoothed,
                );
                (lambda, log10_lambda, None)
            }
            Some(p) => {
                // Envelope loop: refit with sign-rescaled weights until the
                // budget runs out or the weights stabilize.
                weights.as_vec_mut().assign_slice(w);
                weights_prev.as_vec_mut().assign_slice(w);

                let asymmetry = Asymmetry(p);
                let mut iterations = 0;

                let (lambda, log10_lambda) = loop {
                    let pass = Self::fit_pass(
                        &self.regularization,
                        y,
                        &weights[..],
                        z_trial,
                        fits,
                        pens,
                        curvature,
                        solver,
                        &mut smoothed,
                    );
                    iterations += 1;

                    if iterations >= self.max_iterations {
                        break pass;
                    }

                    weights_prev.as_vec_mut().assign_slice(&weights[..]);
                    asymmetry.apply_envelope_weights(y, &smoothed, w, weights);

                    if Asymmetry::has_converged(&weights[..], &weights_prev[..], self.tolerance) {
                        break pass;
                    }
                };

                (lambda, log10_lambda, Some(iterations))
            }
        };

        let curvature_out = match &self.regularization {
            Regularization::Grid(_) => Some(curvature.as_vec().clone()),
            Regularization::Fixed(_) => None,
        };

        let weights_out = if self.asymmetry.is_some() {
            weights.as_vec().clone()
        } else {
            w.to_vec()
        };

        ExecutorOutput {
            smoothed,
            lambda,
            log10_lambda,
            curvature: curvature_out,
            iterations,
            weights: weights_out,
        }
    }

    // ========================================================================
    // Fitting
    // ========================================================================

    /// One full fitting pass with the given effective weights.
    ///
    /// Fixed mode is a single solve; grid mode runs the V-curve scan and
    /// solves once more at the winning candidate.
    #[allow(clippy::too_many_arguments)]
    fn fit_pass(
        regularization: &Regularization<T>,
        y: &[T],
        w_eff: &[T],
        z_trial: &mut [T],
        fits: &mut [T],
        pens: &mut [T],
        curvature: &mut [T],
        solver: &mut SolverBuffer<T>,
        z_out: &mut [T],
    ) -> (T, T) {
        match regularization {
            Regularization::Fixed(lambda) => {
                solve_normal_equations(y, w_eff, *lambda, solver, z_out);
                (*lambda, lambda.log10())
            }
            Regularization::Grid(grid) => {
                let selection = VCurve::run(
                    y,
                    w_eff,
                    grid,
                    fits,
                    pens,
                    curvature,
                    z_trial,
                    |lambda, z| solve_normal_equations(y, w_eff, lambda, solver, z),
                );
                solve_normal_equations(y, w_eff, selection.lambda, solver, z_out);
                (selection.lambda, selection.log10_lambda)
            }
        }
    }
}
