//! fastWhittaker Parallel Stack Smoothing Examples
//!
//! This example demonstrates features specific to `fastWhittaker`:
//! - Parallel execution using `rayon`
//! - Sequential fallback
//! - `ndarray` integration
//! - Per-row adaptive candidate grids
//! - Sparse-row skipping via the valid-sample rule

use fastWhittaker::prelude::*;
use ndarray::Array2;
use std::time::Instant;

const NODATA: f64 = -3000.0;

fn main() -> Result<(), WhittakerError> {
    println!("{}", "=".repeat(80));
    println!("fastWhittaker Parallel Stack Smoothing Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_parallel_execution()?;
    example_2_sequential_fallback()?;
    example_3_adaptive_grids()?;
    example_4_envelope_stack()?;

    Ok(())
}

/// Build a synthetic pixel stack: seasonal signal plus noise, with a block
/// of nodata gaps and one nearly-empty row.
fn synthetic_stack(rows: usize, cols: usize) -> Array2<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        for c in 0..cols {
            let t = c as f64 / cols as f64;
            let phase = r as f64 * 0.01;
            let signal = 0.5 + 0.3 * (std::f64::consts::TAU * (t + phase)).sin();
            // Deterministic jitter, different per pixel
            let jitter = 0.02 * ((r * 31 + c * 7) % 11) as f64 / 11.0;

            let value = if r == rows - 1 && c >= 2 {
                NODATA // nearly-empty row, gets skipped
            } else if (c + r) % 9 == 0 {
                NODATA // scattered cloud gaps
            } else {
                signal + jitter
            };
            data.push(value);
        }
    }
    Array2::from_shape_vec((rows, cols), data).unwrap()
}

/// Example 1: Parallel Execution
/// Demonstrates the default parallel execution mode
fn example_1_parallel_execution() -> Result<(), WhittakerError> {
    println!("Example 1: Parallel Execution");
    println!("{}", "-".repeat(80));

    let stack = synthetic_stack(2_000, 92);

    let start = Instant::now();
    let model = Whittaker::new()
        .optimize(&[-2.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 2.0])
        .parallel(true) // Enable parallel execution (default)
        .build()?;

    let result = model.smooth_stack(&stack, NODATA)?;
    let duration = start.elapsed();

    println!(
        "Processed {} pixels x {} time steps in {:?}",
        result.rows, result.cols, duration
    );
    println!("Skipped rows: {}", result.skipped());
    println!("First pixel, first 5 smoothed values:");
    for val in result.row(0).iter().take(5) {
        println!("  {:.4}", val);
    }

    println!();
    Ok(())
}

/// Example 2: Sequential Fallback
/// Demonstrates explicitly disabling parallelism
fn example_2_sequential_fallback() -> Result<(), WhittakerError> {
    println!("Example 2: Sequential Fallback");
    println!("{}", "-".repeat(80));

    let stack = synthetic_stack(2_000, 92);

    let start = Instant::now();
    let model = Whittaker::new()
        .optimize(&[-2.0, -1.0, 0.0, 1.0, 2.0])
        .parallel(false) // Disable parallel execution
        .build()?;

    let result = model.smooth_stack(&stack, NODATA)?;
    let duration = start.elapsed();

    println!(
        "Processed {} pixels in {:?} (sequential)",
        result.rows, duration
    );
    // Note: Sequential might be slower for large stacks

    println!();
    Ok(())
}

/// Example 3: Adaptive Candidate Grids
/// Per-row grids chosen from the lag-1 autocorrelation
fn example_3_adaptive_grids() -> Result<(), WhittakerError> {
    println!("Example 3: Adaptive Candidate Grids");
    println!("{}", "-".repeat(80));

    let stack = synthetic_stack(500, 92);

    let model = Whittaker::new()
        .adaptive_grid() // Range picked per row from lag-1 autocorrelation
        .min_valid_fraction(0.2) // Skip rows with < 20% valid samples
        .build()?;

    let result = model.smooth_stack(&stack, NODATA)?;

    println!("Chosen log10(lambda) for the first 5 pixels:");
    for s in result.sgrid.iter().take(5) {
        println!("  {:.2}", s);
    }
    println!("Skipped rows: {}", result.skipped());

    println!();
    Ok(())
}

/// Example 4: Envelope Fitting Across a Stack
/// Upper-envelope smoothing of every pixel in parallel
fn example_4_envelope_stack() -> Result<(), WhittakerError> {
    println!("Example 4: Envelope Fitting Across a Stack");
    println!("{}", "-".repeat(80));

    let stack = synthetic_stack(500, 92);

    let model = Whittaker::new()
        .optimize(&[-1.0, 0.0, 1.0, 2.0])
        .asymmetry(0.9) // Bias the fit toward the upper envelope
        .iterations(10)
        .build()?;

    let result = model.smooth_stack(&stack, NODATA)?;

    println!("Upper-envelope fit completed for {} pixels.", result.rows);
    println!("First pixel, first 5 envelope values:");
    for val in result.row(0).iter().take(5) {
        println!("  {:.4}", val);
    }

    println!();
    Ok(())
}
