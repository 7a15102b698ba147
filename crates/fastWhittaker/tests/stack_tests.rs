//! Tests for parallel stack smoothing.
//!
//! These tests verify the stack layer against the core crate:
//! - Row-by-row agreement with the sequential `whittaker` model
//! - Parallel/sequential equivalence
//! - The valid-sample skip rule and adaptive grid routing
//! - Input abstractions and stack-level validation
//!
//! ## Test Organization
//!
//! 1. **Consistency** - Stack results equal per-series core results
//! 2. **Execution Modes** - Parallel and sequential agree
//! 3. **Stack Policies** - Skip rule, adaptive grids, sgrid contents
//! 4. **Inputs** - ndarray and raw-slice entry points
//! 5. **Validation** - Rejected configurations and stacks

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use fastWhittaker::prelude::*;
use whittaker::prelude::Whittaker as CoreWhittaker;

const NODATA: f64 = -3000.0;
const GRID: [f64; 5] = [-2.0, -1.0, 0.0, 1.0, 2.0];

// ============================================================================
// Helpers
// ============================================================================

/// Minimal LCG for deterministic noise, uniform in [-0.5, 0.5).
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_unit(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        ((self.state >> 32) as f64 / u32::MAX as f64) - 0.5
    }
}

/// A small synthetic stack: trend rows, a gappy row, and a sparse row.
fn test_stack() -> Array2<f64> {
    let mut rng = SimpleRng::new(9000);
    let cols = 24;
    let mut data = Vec::new();

    // Row 0: noisy ramp, fully valid.
    data.extend((0..cols).map(|c| 0.3 * c as f64 + rng.next_unit()));
    // Row 1: seasonal signal with scattered gaps.
    data.extend((0..cols).map(|c| {
        if c % 7 == 3 {
            NODATA
        } else {
            5.0 + 2.0 * (c as f64 * 0.4).sin() + 0.2 * rng.next_unit()
        }
    }));
    // Row 2: nearly empty, only two valid samples.
    data.extend((0..cols).map(|c| if c < 2 { 4.0 } else { NODATA }));

    Array2::from_shape_vec((3, cols), data).unwrap()
}

/// Nodata mask of one row.
fn mask(row: &[f64]) -> Vec<f64> {
    row.iter()
        .map(|&v| if v != NODATA { 1.0 } else { 0.0 })
        .collect()
}

// ============================================================================
// Consistency Tests
// ============================================================================

/// Every smoothed row equals the core model applied to (row, nodata mask).
#[test]
fn test_rows_match_core_model() {
    let stack = test_stack();

    let model = Whittaker::new().optimize(&GRID).build().unwrap();
    let result = model.smooth_stack(&stack, NODATA).unwrap();

    let core = CoreWhittaker::new().optimize(&GRID).build().unwrap();

    for r in 0..2 {
        let row: Vec<f64> = stack.row(r).to_vec();
        let expected = core.smooth(&row, &mask(&row)).unwrap();

        assert_eq!(result.row(r), expected.smoothed.as_slice());
        assert_abs_diff_eq!(result.sgrid[r], expected.log10_lambda, epsilon = 0.0);
    }
}

/// Envelope smoothing across the stack matches the core envelope model.
#[test]
fn test_envelope_rows_match_core_model() {
    let stack = test_stack();

    let model = Whittaker::new()
        .optimize(&GRID)
        .asymmetry(0.9)
        .iterations(6)
        .build()
        .unwrap();
    let result = model.smooth_stack(&stack, NODATA).unwrap();

    let core = CoreWhittaker::new()
        .optimize(&GRID)
        .asymmetry(0.9)
        .iterations(6)
        .build()
        .unwrap();

    for r in 0..2 {
        let row: Vec<f64> = stack.row(r).to_vec();
        let expected = core.smooth(&row, &mask(&row)).unwrap();
        assert_eq!(result.row(r), expected.smoothed.as_slice());
    }
}

// ============================================================================
// Execution Mode Tests
// ============================================================================

/// Parallel and sequential execution produce identical stacks.
#[test]
fn test_parallel_matches_sequential() {
    let stack = test_stack();

    let parallel = Whittaker::new()
        .optimize(&GRID)
        .parallel(true)
        .build()
        .unwrap()
        .smooth_stack(&stack, NODATA)
        .unwrap();

    let sequential = Whittaker::new()
        .optimize(&GRID)
        .parallel(false)
        .build()
        .unwrap()
        .smooth_stack(&stack, NODATA)
        .unwrap();

    assert_eq!(parallel.smoothed, sequential.smoothed);
    // NaN markers compare unequal; compare bit patterns instead.
    let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&parallel.sgrid), bits(&sequential.sgrid));
}

// ============================================================================
// Stack Policy Tests
// ============================================================================

/// Rows below the valid-sample threshold are copied through unchanged and
/// marked NaN in the lambda grid.
#[test]
fn test_sparse_row_is_skipped() {
    let stack = test_stack();

    let model = Whittaker::new()
        .optimize(&GRID)
        .min_valid_fraction(0.2)
        .build()
        .unwrap();
    let result = model.smooth_stack(&stack, NODATA).unwrap();

    assert_eq!(result.skipped(), 1);
    assert!(result.sgrid[2].is_nan());
    assert_eq!(result.row(2), stack.row(2).to_vec().as_slice());

    // The processed rows are not passthroughs.
    assert!(result.sgrid[0].is_finite());
    assert!(result.sgrid[1].is_finite());
}

/// With a fixed lambda, the lambda grid reports log10(lambda) for every
/// processed row.
#[test]
fn test_fixed_lambda_sgrid() {
    let stack = test_stack();

    let model = Whittaker::new().lambda(100.0).build().unwrap();
    let result = model.smooth_stack(&stack, NODATA).unwrap();

    assert_abs_diff_eq!(result.sgrid[0], 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(result.sgrid[1], 2.0, epsilon = 1e-12);
    assert!(result.sgrid[2].is_nan());
}

/// Adaptive grids route by lag-1 autocorrelation: smooth signals search low
/// lambdas, noise searches high ones.
#[test]
fn test_adaptive_grid_routing() {
    let cols = 40;
    let mut rng = SimpleRng::new(31337);
    let mut data = Vec::new();

    // Row 0: slow sine, strongly autocorrelated (lag-1 well above 0.5).
    data.extend((0..cols).map(|c| (c as f64 * std::f64::consts::TAU / 40.0).sin()));
    // Row 1: white noise, lag-1 near zero.
    data.extend((0..cols).map(|_| rng.next_unit()));

    let stack = Array2::from_shape_vec((2, cols), data).unwrap();

    let model = Whittaker::new().adaptive_grid().build().unwrap();
    let result = model.smooth_stack(&stack, NODATA).unwrap();

    // Candidate ranges are [-2, 1] and [0, 3]; selections are interior.
    assert!(
        result.sgrid[0] > -2.0 && result.sgrid[0] < 1.0,
        "smooth row selected {} outside (-2, 1)",
        result.sgrid[0]
    );
    assert!(
        result.sgrid[1] > 0.0 && result.sgrid[1] < 3.0,
        "noisy row selected {} outside (0, 3)",
        result.sgrid[1]
    );
}

/// Masked samples are interpolated in the smoothed stack, not left at the
/// sentinel value.
#[test]
fn test_nodata_samples_are_interpolated() {
    let stack = test_stack();

    let model = Whittaker::new().optimize(&GRID).build().unwrap();
    let result = model.smooth_stack(&stack, NODATA).unwrap();

    let row = result.row(1);
    for (c, &z) in row.iter().enumerate() {
        assert!(z != NODATA, "sample {c} still carries the sentinel");
        // The gappy row oscillates between 3 and 7.
        assert!((0.0..10.0).contains(&z));
    }
}

// ============================================================================
// Input Tests
// ============================================================================

/// The raw-slice entry point agrees with the ndarray entry point.
#[test]
fn test_slice_input_matches_ndarray() {
    let stack = test_stack();
    let cols = stack.ncols();
    let flat: Vec<f64> = stack.iter().copied().collect();

    let model = Whittaker::new().optimize(&GRID).build().unwrap();

    let from_array = model.smooth_stack(&stack, NODATA).unwrap();
    let from_slice = model
        .smooth_stack(&(flat.as_slice(), cols), NODATA)
        .unwrap();

    assert_eq!(from_array.smoothed, from_slice.smoothed);
    assert_eq!(from_array.rows, from_slice.rows);
    assert_eq!(from_array.cols, from_slice.cols);
}

/// Non-contiguous ndarray views are rejected instead of silently copied.
#[test]
fn test_noncontiguous_input_is_rejected() {
    let stack = test_stack();
    let transposed = stack.t();

    let model = Whittaker::new().optimize(&GRID).build().unwrap();
    let err = model.smooth_stack(&transposed, NODATA).unwrap_err();
    assert!(matches!(err, WhittakerError::InvalidInput(_)));
}

/// A slice whose length is not a multiple of the series length is rejected.
#[test]
fn test_ragged_slice_is_rejected() {
    let data = [1.0, 2.0, 3.0, 4.0, 5.0];
    let model = Whittaker::new().optimize(&GRID).build().unwrap();
    let err = model.smooth_stack(&(&data[..], 3), NODATA).unwrap_err();
    assert!(matches!(err, WhittakerError::InvalidInput(_)));
}

/// Results convert back into a 2-D array with the stack's shape.
#[test]
fn test_result_to_array() {
    let stack = test_stack();
    let model = Whittaker::new().optimize(&GRID).build().unwrap();
    let result = model.smooth_stack(&stack, NODATA).unwrap();

    let array = result.to_array();
    assert_eq!(array.dim(), stack.dim());
    assert_eq!(array.row(0).to_vec().as_slice(), result.row(0));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_build_requires_regularization() {
    let err = Whittaker::<f64>::new().build().unwrap_err();
    assert!(matches!(err, WhittakerError::MissingRegularization));
}

#[test]
fn test_adaptive_conflicts_with_explicit_regularization() {
    let err = Whittaker::new()
        .lambda(1.0)
        .adaptive_grid()
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        WhittakerError::DuplicateParameter {
            parameter: "regularization"
        }
    ));

    let err = Whittaker::new()
        .optimize(&GRID)
        .adaptive_grid()
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        WhittakerError::DuplicateParameter {
            parameter: "regularization"
        }
    ));
}

#[test]
fn test_build_rejects_bad_min_valid_fraction() {
    for fraction in [-0.1, 1.5, f64::NAN] {
        let err = Whittaker::new()
            .optimize(&GRID)
            .min_valid_fraction(fraction)
            .build()
            .unwrap_err();
        assert!(matches!(err, WhittakerError::InvalidInput(_)));
    }
}

#[test]
fn test_smooth_stack_rejects_short_series() {
    let stack = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    let model = Whittaker::new().optimize(&GRID).build().unwrap();
    let err = model.smooth_stack(&stack, NODATA).unwrap_err();
    assert!(matches!(
        err,
        WhittakerError::TooFewPoints { got: 2, min: 3 }
    ));
}

#[test]
fn test_smooth_stack_rejects_nonfinite_nodata() {
    let stack = test_stack();
    let model = Whittaker::new().optimize(&GRID).build().unwrap();
    let err = model.smooth_stack(&stack, f64::NAN).unwrap_err();
    assert!(matches!(err, WhittakerError::InvalidInput(_)));
}
