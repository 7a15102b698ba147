//! Output types and result structures for Whittaker operations.
//!
//! ## Purpose
//!
//! This module defines the `SmoothResult` struct which encapsulates all
//! outputs from a smoothing operation, including the smoothed series, the
//! regularization actually used, and optional envelope/V-curve metadata.
//!
//! ## Design notes
//!
//! * **Memory Efficiency**: All optional outputs use `Option<Vec<T>>`.
//! * **Generics**: Results are generic over `Float` types.
//! * **Ergonomics**: Implements `Display` for human-readable output.
//!
//! ## Key concepts
//!
//! * **Optional Outputs**: Results are only populated when specific features
//!   are enabled on the builder.
//! * **Metadata**: Tracks the lambda used (value and log10), envelope
//!   iterations, and per-candidate curvature scores.
//!
//! ## Invariants
//!
//! * All populated per-sample vectors have the same length as the input.
//! * `lambda` equals `10^log10_lambda` up to floating-point rounding.
//! * Curvature scores, when present, have one entry per candidate with
//!   zeros at the grid endpoints.
//!
//! ## Non-goals
//!
//! * This module does not perform calculations; it only stores results.
//! * This module does not validate result consistency (responsibility of
//!   the engine).
//! * This module does not provide serialization/deserialization logic.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt::{Debug, Display, Formatter, Result};
use num_traits::Float;

// ============================================================================
// Result Structure
// ============================================================================

/// Comprehensive Whittaker output containing the smoothed series and
/// selection metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothResult<T> {
    /// Smoothed series.
    pub smoothed: Vec<T>,

    /// Lambda used for the final fit (fixed or V-curve selected).
    pub lambda: T,

    /// log10 of the lambda used.
    pub log10_lambda: T,

    /// V-curve curvature score per candidate (if requested).
    pub curvature: Option<Vec<T>>,

    /// Residuals from the fit (y_i - z_i, if requested).
    pub residuals: Option<Vec<T>>,

    /// Final effective weights of the envelope loop (if requested).
    pub envelope_weights: Option<Vec<T>>,

    /// Number of envelope iterations actually performed.
    pub iterations_used: Option<usize>,
}

impl<T: Float> SmoothResult<T> {
    // ========================================================================
    // Query Methods
    // ========================================================================

    /// Check if V-curve curvature scores were recorded.
    pub fn has_curvature(&self) -> bool {
        self.curvature.is_some()
    }

    /// Check if residuals were recorded.
    pub fn has_residuals(&self) -> bool {
        self.residuals.is_some()
    }

    /// Check if envelope fitting was performed.
    pub fn is_asymmetric(&self) -> bool {
        self.iterations_used.is_some()
    }

    /// Number of samples in the smoothed series.
    pub fn len(&self) -> usize {
        self.smoothed.len()
    }

    /// Whether the smoothed series is empty.
    pub fn is_empty(&self) -> bool {
        self.smoothed.is_empty()
    }
}

// ============================================================================
// Display Implementation
// ============================================================================

impl<T: Float + Display + Debug> Display for SmoothResult<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Samples:        {}", self.smoothed.len())?;
        writeln!(f, "  Lambda:         {}", self.lambda)?;
        writeln!(f, "  log10(lambda):  {}", self.log10_lambda)?;

        if let Some(iters) = self.iterations_used {
            writeln!(f, "  Envelope iterations: {}", iters)?;
        }
        writeln!(f)?;

        writeln!(f, "Smoothed Data:")?;

        let has_resid = self.residuals.is_some();
        let has_weights = self.envelope_weights.is_some();

        // Build header
        write!(f, "{:>8} {:>12}", "Index", "Smoothed")?;
        if has_resid {
            write!(f, " {:>12}", "Residual")?;
        }
        if has_weights {
            write!(f, " {:>10}", "Env_Weight")?;
        }
        writeln!(f)?;

        // Separator line
        let line_width =
            21 + if has_resid { 13 } else { 0 } + if has_weights { 11 } else { 0 };
        writeln!(f, "{:-<width$}", "", width = line_width)?;

        // Data rows (show first 10 and last 10 if more than 20 samples)
        let n = self.smoothed.len();
        let show_all = n <= 20;
        let rows_to_show: Vec<usize> = if show_all {
            (0..n).collect()
        } else {
            (0..10).chain(n - 10..n).collect()
        };

        let mut prev_idx = 0;
        for (i, &idx) in rows_to_show.iter().enumerate() {
            // Add ellipsis if we skipped rows
            if i > 0 && idx != prev_idx + 1 {
                writeln!(f, "{:>8}", "...")?;
            }
            prev_idx = idx;

            write!(f, "{:>8} {:>12.6}", idx, self.smoothed[idx])?;

            if has_resid {
                if let Some(resid) = &self.residuals {
                    write!(f, " {:>12.6}", resid[idx])?;
                }
            }

            if has_weights {
                if let Some(weights) = &self.envelope_weights {
                    write!(f, " {:>10.4}", weights[idx])?;
                }
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
