//! Input abstractions for stack smoothing.
//!
//! ## Purpose
//!
//! This module provides a unified abstraction for stack inputs, allowing
//! `smooth_stack` to process multiple data formats (row-major slices,
//! vectors, ndarray matrices) through a single interface.
//!
//! ## Design notes
//!
//! * **Zero-copy where possible**: Provides direct slice access to the
//!   underlying row-major buffer.
//! * **Interoperability**: Bridges standard Rust collections with
//!   specialized numerical libraries.
//! * **Fail-fast validation**: Ensures memory continuity for
//!   multi-dimensional types before processing.
//!
//! ## Key concepts
//!
//! * **StackInput Trait**: The core abstraction; types provide a contiguous
//!   row-major view plus the stack dimensions (rows, cols).
//!
//! ## Invariants
//!
//! * Returned slices contain `rows * cols` elements in row-major order.
//! * Non-contiguous inputs return an error instead of copying silently.
//!
//! ## Non-goals
//!
//! * This module does not perform data cleaning or imputation.
//! * This module does not handle reshaping or axis transposition.

// External dependencies
use ndarray::{ArrayBase, Data, Ix2};
use num_traits::Float;

// Export dependencies from whittaker crate
use whittaker::internals::primitives::errors::WhittakerError;

/// Trait for types that can be used as input for stack smoothing.
pub trait StackInput<T: Float> {
    /// Contiguous row-major view of the stack: `(data, rows, cols)`.
    fn as_stack(&self) -> Result<(&[T], usize, usize), WhittakerError>;
}

impl<T: Float, S> StackInput<T> for ArrayBase<S, Ix2>
where
    S: Data<Elem = T>,
{
    fn as_stack(&self) -> Result<(&[T], usize, usize), WhittakerError> {
        let (rows, cols) = self.dim();
        let data = self.as_slice().ok_or_else(|| {
            WhittakerError::InvalidInput(
                "ndarray input must be contiguous in standard (row-major) layout".to_string(),
            )
        })?;
        Ok((data, rows, cols))
    }
}

/// Row-major slice with an explicit series length: `(data, cols)`.
impl<T: Float> StackInput<T> for (&[T], usize) {
    fn as_stack(&self) -> Result<(&[T], usize, usize), WhittakerError> {
        let (data, cols) = *self;
        if cols == 0 || data.len() % cols != 0 {
            return Err(WhittakerError::InvalidInput(format!(
                "stack length {} is not a multiple of the series length {}",
                data.len(),
                cols
            )));
        }
        Ok((data, data.len() / cols, cols))
    }
}

/// Row-major vector with an explicit series length: `(data, cols)`.
impl<T: Float> StackInput<T> for (Vec<T>, usize) {
    fn as_stack(&self) -> Result<(&[T], usize, usize), WhittakerError> {
        let data = self.0.as_slice();
        let cols = self.1;
        if cols == 0 || data.len() % cols != 0 {
            return Err(WhittakerError::InvalidInput(format!(
                "stack length {} is not a multiple of the series length {}",
                data.len(),
                cols
            )));
        }
        Ok((data, data.len() / cols, cols))
    }
}
