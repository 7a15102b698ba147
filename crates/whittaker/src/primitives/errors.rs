//! Error types for Whittaker smoothing operations.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur during Whittaker
//! smoothing, including input validation, parameter constraints, and
//! degenerate weight configurations.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. expected lengths).
//! * **Deferred**: Errors are often caught and stored during builder configuration.
//! * **No-std**: Supports `no_std` environments by using `alloc` for dynamic messages.
//! * **Trait Implementation**: Implements `Display` and `std::error::Error` (when `std` is enabled).
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty arrays, mismatched lengths, non-finite values.
//! 2. **Parameter validation**: Invalid lambda, asymmetry, iterations, or tolerance.
//! 3. **Degenerate data**: All-zero weights make the normal equations singular.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages are consistent in tone and formatting.
//! * Numeric values in errors use the same types as the public API.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(feature = "std")]
use std::error::Error;
#[cfg(feature = "std")]
use std::string::String;

// External dependencies
use core::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for Whittaker smoothing operations.
#[derive(Debug, Clone, PartialEq)]
pub enum WhittakerError {
    /// Input arrays are empty.
    EmptyInput,

    /// Generic invalid input error with a descriptive message.
    InvalidInput(String),

    /// `y` and `w` arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the series.
        y_len: usize,
        /// Number of elements in the weight array.
        w_len: usize,
    },

    /// Number of samples is below the minimum for a second-order penalty.
    TooFewPoints {
        /// Number of samples provided.
        got: usize,
        /// Minimum required samples.
        min: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Smoothing parameter must be positive and finite.
    InvalidLambda(f64),

    /// The candidate grid is too short for curvature evaluation.
    TooFewCandidates {
        /// Number of candidates provided.
        got: usize,
        /// Minimum required candidates.
        min: usize,
    },

    /// Candidate grid values must be strictly increasing.
    GridNotAscending {
        /// Index of the first out-of-order candidate.
        index: usize,
    },

    /// Asymmetry parameter must lie strictly between 0 and 1.
    InvalidAsymmetry(f64),

    /// Weights must be non-negative.
    NegativeWeight {
        /// Index of the offending weight.
        index: usize,
        /// The weight value found.
        value: f64,
    },

    /// All weights are zero; the normal equations are singular.
    DegenerateWeights,

    /// Envelope iteration budget must be in [1, 1000].
    InvalidIterations(usize),

    /// Convergence tolerance must be positive and finite.
    InvalidTolerance(f64),

    /// Neither a fixed lambda nor a candidate grid was configured.
    MissingRegularization,

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for WhittakerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::MismatchedInputs { y_len, w_len } => {
                write!(f, "Length mismatch: y has {y_len} samples, w has {w_len}")
            }
            Self::TooFewPoints { got, min } => {
                write!(f, "Too few samples: got {got}, need at least {min}")
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InvalidLambda(lambda) => {
                write!(f, "Invalid lambda: {lambda} (must be > 0 and finite)")
            }
            Self::TooFewCandidates { got, min } => {
                write!(f, "Too few candidates: got {got}, need at least {min}")
            }
            Self::GridNotAscending { index } => {
                write!(
                    f,
                    "Candidate grid must be strictly increasing (violated at index {index})"
                )
            }
            Self::InvalidAsymmetry(p) => {
                write!(f, "Invalid asymmetry: {p} (must be > 0 and < 1)")
            }
            Self::NegativeWeight { index, value } => {
                write!(f, "Negative weight at index {index}: {value}")
            }
            Self::DegenerateWeights => {
                write!(f, "All weights are zero; the system is singular")
            }
            Self::InvalidIterations(iter) => {
                write!(f, "Invalid iterations: {iter} (must be in [1, 1000])")
            }
            Self::InvalidTolerance(tol) => {
                write!(f, "Invalid tolerance: {tol} (must be > 0 and finite)")
            }
            Self::MissingRegularization => {
                write!(
                    f,
                    "No regularization configured: set a fixed lambda or a candidate grid"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

#[cfg(feature = "std")]
impl Error for WhittakerError {}
