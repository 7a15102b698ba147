//! # Fast Whittaker — parallel penalized smoothing for pixel stacks
//!
//! A data-parallel companion to the [`whittaker`] crate: it smooths a whole
//! stack of weighted time series (one row per spatial pixel sharing a common
//! time axis) across all available CPU cores, and adds the stack-level
//! policies a raster workload needs: nodata masking, sparse-row skipping,
//! and per-row adaptive candidate grids.
//!
//! ## Quick Start
//!
//! ```rust
//! use fastWhittaker::prelude::*;
//! use ndarray::Array2;
//!
//! // 2 pixels x 10 time steps; -3000 marks missing samples.
//! let stack = Array2::from_shape_vec(
//!     (2, 10),
//!     vec![
//!         1.0, 2.0, 3.0, 4.0, -3000.0, 6.0, 7.0, 8.0, 9.0, 10.0,
//!         5.0, 5.1, 4.9, 5.0, 5.2, -3000.0, 5.0, 4.8, 5.1, 5.0,
//!     ],
//! )
//! .unwrap();
//!
//! let model = Whittaker::new()
//!     .optimize(&[-2.0, -1.0, 0.0, 1.0, 2.0])
//!     .build()?;
//!
//! let result = model.smooth_stack(&stack, -3000.0)?;
//! println!("chosen log10(lambda) per pixel: {:?}", result.sgrid);
//! # Result::<(), WhittakerError>::Ok(())
//! ```
//!
//! ## Adaptive candidate grids
//!
//! When no explicit grid or lambda is configured, `.adaptive_grid()` picks a
//! per-pixel candidate range from the lag-1 autocorrelation of the series:
//! strongly autocorrelated pixels search lower lambdas, noisy pixels search
//! higher ones.
//!
//! ```rust
//! use fastWhittaker::prelude::*;
//! # use ndarray::Array2;
//! # let stack = Array2::from_shape_vec((1, 10), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
//!
//! let model = Whittaker::new()
//!     .adaptive_grid()
//!     .min_valid_fraction(0.2)   // skip pixels with < 20% valid samples
//!     .build()?;
//!
//! let result = model.smooth_stack(&stack, -3000.0)?;
//! # Result::<(), WhittakerError>::Ok(())
//! ```

#![allow(non_snake_case)]

// Input abstractions for stack data.
mod input;

// Parallel execution engine.
mod engine;

// High-level fluent API.
mod api;

// Standard fast-Whittaker prelude.
pub mod prelude {
    pub use crate::api::{StackResult, StackWhittakerBuilder as Whittaker, WhittakerError};
    pub use crate::input::StackInput;
    pub use whittaker::prelude::{lag1_autocorr, lag1_autocorr_shifted};
}
