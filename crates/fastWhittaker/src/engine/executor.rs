//! Parallel execution engine for Whittaker stack smoothing.
//!
//! ## Purpose
//!
//! This module smooths every row of a pixel stack independently,
//! distributing rows across CPU cores. It applies the stack-level policies
//! of a raster workload: weights derived from a nodata mask, skipping of
//! rows with too few valid samples, and per-row adaptive candidate grids
//! chosen from the lag-1 autocorrelation of the series.
//!
//! ## Design notes
//!
//! * **Parallelism**: Uses `rayon` to process rows concurrently; output rows
//!   are disjoint chunks so no synchronization is needed.
//! * **Buffer Reuse**: One scratch buffer per rayon worker via
//!   `for_each_init`, so row solves stay allocation-light.
//! * **Sequential fallback**: Identical row logic runs on one thread when
//!   the `cpu` feature is disabled or parallelism is turned off.
//!
//! ## Key concepts
//!
//! * **Nodata mask**: Weights are 1 where the sample differs from the
//!   sentinel and 0 where it matches, so missing samples are interpolated
//!   through rather than dropped.
//! * **Skip rule**: Rows with fewer valid samples than the configured
//!   minimum are copied through unchanged and marked NaN in the lambda
//!   grid.
//! * **Adaptive grids**: Strongly autocorrelated rows search lower lambdas;
//!   noisy rows search higher ones.
//!
//! ## Invariants
//!
//! * Input rows are never mutated; each output row is written exactly once.
//! * The returned lambda grid has one entry per row: the chosen
//!   log10(lambda), or NaN for skipped rows.
//! * Parallel and sequential execution produce identical results.
//!
//! ## Non-goals
//!
//! * This module does not validate stack dimensions (handled by the API).
//! * This module does not perform the per-series solve (delegated to the
//!   `whittaker` executor).

// Feature-gated imports
#[cfg(feature = "cpu")]
use rayon::prelude::*;

// External dependencies
use core::fmt::Debug;
use num_traits::Float;

// Export dependencies from whittaker crate
use whittaker::internals::engine::executor::{
    Regularization, WhittakerBuffer, WhittakerExecutor,
};
use whittaker::internals::evaluation::autocorr::lag1_autocorr_shifted;
use whittaker::internals::math::penalty::PenaltySums;

// ============================================================================
// Adaptive Grid Selection
// ============================================================================

/// Build an inclusive log10(lambda) grid from `start` to `stop` with `step`.
pub fn log_grid<T: Float>(start: f64, stop: f64, step: f64) -> Vec<T> {
    let count = ((stop - start) / step).round() as usize + 1;
    (0..count)
        .map(|i| T::from(start + step * i as f64).unwrap())
        .collect()
}

/// Candidate range for one row, chosen from its lag-1 autocorrelation.
///
/// Strong temporal correlation (r > 0.5) means the signal dominates and low
/// lambdas are worth searching; weak correlation means the series is mostly
/// noise and the search shifts to heavier smoothing. A non-finite statistic
/// falls back to a neutral middle range.
pub fn adaptive_grid<T: Float>(lag1: T) -> Vec<T> {
    let half = T::from(0.5).unwrap();
    if !lag1.is_finite() {
        log_grid(-1.0, 1.0, 0.2)
    } else if lag1 > half {
        log_grid(-2.0, 1.0, 0.2)
    } else {
        log_grid(0.0, 3.0, 0.2)
    }
}

// ============================================================================
// Stack Execution
// ============================================================================

/// Smooth every row of a row-major stack.
///
/// `smoothed` must have the same length as `data`; `sgrid` one entry per
/// row. Rows with fewer than `min_valid` samples different from `nodata`
/// are copied through unchanged and marked NaN in `sgrid`.
#[allow(clippy::too_many_arguments)]
pub fn smooth_stack_rows<T>(
    data: &[T],
    cols: usize,
    nodata: T,
    executor: &WhittakerExecutor<T>,
    adaptive: bool,
    min_valid: usize,
    parallel: bool,
    smoothed: &mut [T],
    sgrid: &mut [T],
) where
    T: Float + PenaltySums + Debug + Send + Sync,
{
    debug_assert_eq!(smoothed.len(), data.len());
    debug_assert_eq!(sgrid.len(), data.len() / cols.max(1));

    #[cfg(feature = "cpu")]
    if parallel {
        data.par_chunks(cols)
            .zip(smoothed.par_chunks_mut(cols))
            .zip(sgrid.par_iter_mut())
            .for_each_init(
                || (WhittakerBuffer::default(), Vec::new()),
                |(buffer, weights), ((row, z_row), s)| {
                    *s = smooth_row(
                        row, z_row, nodata, executor, adaptive, min_valid, buffer, weights,
                    );
                },
            );
        return;
    }

    #[cfg(not(feature = "cpu"))]
    let _ = parallel;

    let mut buffer = WhittakerBuffer::default();
    let mut weights = Vec::new();
    for ((row, z_row), s) in data
        .chunks(cols)
        .zip(smoothed.chunks_mut(cols))
        .zip(sgrid.iter_mut())
    {
        *s = smooth_row(
            row,
            z_row,
            nodata,
            executor,
            adaptive,
            min_valid,
            &mut buffer,
            &mut weights,
        );
    }
}

/// Smooth one row into `z_row`; returns the chosen log10(lambda) or NaN
/// when the row was skipped.
#[allow(clippy::too_many_arguments)]
fn smooth_row<T>(
    row: &[T],
    z_row: &mut [T],
    nodata: T,
    executor: &WhittakerExecutor<T>,
    adaptive: bool,
    min_valid: usize,
    buffer: &mut WhittakerBuffer<T>,
    weights: &mut Vec<T>,
) -> T
where
    T: Float + PenaltySums,
{
    // Derive the weight mask from the nodata sentinel.
    weights.clear();
    let mut valid = 0usize;
    weights.extend(row.iter().map(|&v| {
        if v != nodata {
            valid += 1;
            T::one()
        } else {
            T::zero()
        }
    }));

    if valid < min_valid {
        z_row.copy_from_slice(row);
        return T::nan();
    }

    let output = if adaptive {
        let lag1 = lag1_autocorr_shifted(row, nodata);
        let row_executor = WhittakerExecutor {
            regularization: Regularization::Grid(adaptive_grid(lag1)),
            ..executor.clone()
        };
        row_executor.run(row, weights, Some(buffer))
    } else {
        executor.run(row, weights, Some(buffer))
    };

    z_row.copy_from_slice(&output.smoothed);
    output.log10_lambda
}
