//! # Whittaker — penalized least-squares smoothing for Rust
//!
//! A fast, allocation-light implementation of the Whittaker smoother for
//! weighted, regularly-sampled time series, with automatic selection of the
//! regularization strength via the V-curve method and a robust asymmetric
//! variant that fits an upper or lower envelope of the data.
//!
//! ## What is Whittaker smoothing?
//!
//! The Whittaker smoother fits a series z to noisy observations y by
//! minimizing a penalized least-squares objective: a weighted fidelity term
//! `sum w_i * (y_i - z_i)^2` plus `lambda` times a roughness term built from
//! the squared second differences of z. The normal equations form a
//! pentadiagonal system that is solved exactly in O(n) time and space, which
//! makes the smoother practical for workloads with millions of independent
//! series (one per pixel of a satellite image stack, for example).
//!
//! Zero weights mark missing observations without removing their slot in the
//! series; the smoother interpolates through them using the roughness
//! penalty.
//!
//! ## Quick Start
//!
//! ### Fixed regularization
//!
//! ```rust
//! use whittaker::prelude::*;
//!
//! let y = vec![1.0, 2.2, 2.8, 4.1, 5.0, 5.9, 7.2, 8.0, 8.8, 10.1];
//! let w = vec![1.0; 10];
//!
//! // Build the model
//! let model = Whittaker::new()
//!     .lambda(10.0)       // Fixed smoothing parameter
//!     .build()?;
//!
//! // Smooth the series
//! let result = model.smooth(&y, &w)?;
//!
//! println!("{}", result);
//! # Result::<(), WhittakerError>::Ok(())
//! ```
//!
//! ### Automatic selection (V-curve)
//!
//! ```rust
//! use whittaker::prelude::*;
//!
//! let y = vec![1.0, 2.2, 2.8, 4.1, 5.0, 5.9, 7.2, 8.0, 8.8, 10.1];
//! let w = vec![1.0; 10];
//!
//! // Candidates are log10(lambda) values; the V-curve picks the corner
//! // of the fit/roughness trade-off, one O(n) solve per candidate.
//! let model = Whittaker::new()
//!     .optimize(&[-2.0, -1.0, 0.0, 1.0, 2.0])
//!     .build()?;
//!
//! let result = model.smooth(&y, &w)?;
//! println!("chosen lambda: {}", result.lambda);
//! # Result::<(), WhittakerError>::Ok(())
//! ```
//!
//! ### Asymmetric envelope fitting
//!
//! ```rust
//! use whittaker::prelude::*;
//!
//! let y = vec![1.0, 2.2, 2.8, 4.1, 5.0, 5.9, 7.2, 8.0, 8.8, 10.1];
//! let w = vec![1.0; 10];
//!
//! // p > 0.5 biases the fit toward an upper envelope of the data,
//! // p < 0.5 toward a lower envelope.
//! let model = Whittaker::new()
//!     .optimize(&[-1.0, 0.0, 1.0, 2.0])
//!     .asymmetry(0.9)
//!     .iterations(10)
//!     .build()?;
//!
//! let result = model.smooth(&y, &w)?;
//! # Result::<(), WhittakerError>::Ok(())
//! ```
//!
//! ### Result and Error Handling
//!
//! `smooth` returns a `Result<SmoothResult<T>, WhittakerError>`. The `?`
//! operator is idiomatic, but results can also be handled explicitly:
//!
//! ```rust
//! use whittaker::prelude::*;
//! # let y = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! # let w = vec![1.0; 5];
//!
//! let model = Whittaker::new().lambda(1.0).build()?;
//!
//! match model.smooth(&y, &w) {
//!     Ok(result) => println!("Smoothed: {:?}", result.smoothed),
//!     Err(e) => eprintln!("Smoothing failed: {}", e),
//! }
//! # Result::<(), WhittakerError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std / Embedded)
//!
//! The crate supports `no_std` environments. Disable default features to
//! remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! whittaker = { version = "0.1", default-features = false }
//! ```
//!
//! ## References
//!
//! - Whittaker, E. T. (1923). "On a New Method of Graduation"
//! - Eilers, P. H. C. (2003). "A Perfect Smoother"
//! - Frasso, G. & Eilers, P. H. C. (2015). "L- and V-curves for optimal
//!   smoothing"

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Layer 1: Primitives - error types and reusable buffers.
mod primitives;

// Layer 2: Math - penalty assembly and the banded solver.
mod math;

// Layer 3: Algorithms - asymmetric envelope reweighting.
mod algorithms;

// Layer 4: Evaluation - V-curve selection and series diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration, validation, and output types.
mod engine;

// High-level fluent API for Whittaker smoothing.
mod api;

// Standard Whittaker prelude.
pub mod prelude {
    pub use crate::api::{SmoothResult, WhittakerBuilder as Whittaker, WhittakerError};
    pub use crate::evaluation::autocorr::{lag1_autocorr, lag1_autocorr_shifted};
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing
// purposes. It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
