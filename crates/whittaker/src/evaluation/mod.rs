//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer selects the regularization strength and computes series
//! diagnostics:
//! - V-curve scoring and optimum selection across candidate grids
//! - Lag-1 autocorrelation with nodata exclusion
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// V-curve scoring and optimum selection.
pub mod vcurve;

/// Lag-1 autocorrelation diagnostic.
pub mod autocorr;
