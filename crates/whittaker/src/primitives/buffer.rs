//! Memory management and buffer recycling for Whittaker operations.
//!
//! ## Purpose
//!
//! This module provides centralized, reusable workspaces to minimize dynamic
//! memory allocations during Whittaker smoothing. By allocating buffers once
//! and recycling them across regularization candidates and envelope
//! iterations, we significantly reduce allocator pressure and improve cache
//! locality.
//!
//! ## Design notes
//!
//! * **Centralized Ownership**: Buffer structs hold all necessary scratch
//!   space for their respective execution contexts (solver, executor).
//! * **Lazy Expansion**: Buffers are grown on demand via `prepare` but never
//!   shrunk, stabilizing at the maximum required size for the workload.
//! * **Band Caching**: The penalty bands of the second-difference operator
//!   depend only on the series length; `SolverBuffer::prepare` reports
//!   whether they must be rebuilt so repeated solves on same-length series
//!   skip the assembly pass.
//!
//! ## Key concepts
//!
//! * **Slot**: A reusable vector wrapper with automatic capacity management.
//! * **SolverBuffer**: Penalty bands plus the factorization diagonals of the
//!   pentadiagonal solve.
//! * **WhittakerBuffer**: Working memory for the executor (effective
//!   weights, trial fits, V-curve profiles).
//!
//! ## Invariants
//!
//! * Buffers are only logically cleared between iterations, not deallocated.
//! * Capacity is monotonically increasing; `prepare` only reallocates if the
//!   current capacity is insufficient.
//!
//! ## Non-goals
//!
//! * Thread-local automatic caching (buffers are explicitly passed to allow
//!   parallel execution with one buffer per thread).
//! * Dynamic shrinking or aggressive memory reclamation.

// Feature-gated dependencies
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Deref, DerefMut};
use num_traits::{One, Zero};

// ============================================================================
// Slot - Unified Vector Abstraction
// ============================================================================

/// A reusable vector slot with automatic capacity management.
#[derive(Debug, Clone)]
pub struct Slot<T>(Vec<T>);

impl<T> Slot<T> {
    /// Create a new slot with the given initial capacity.
    #[inline]
    pub fn new(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Clear the slot (sets length to 0, preserves capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Get a reference to the underlying vector.
    #[inline]
    pub fn as_vec(&self) -> &Vec<T> {
        &self.0
    }

    /// Get a mutable reference to the underlying vector.
    #[inline]
    pub fn as_vec_mut(&mut self) -> &mut Vec<T> {
        &mut self.0
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Deref for Slot<T> {
    type Target = Vec<T>;
    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Slot<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<Vec<T>> for Slot<T> {
    fn from(v: Vec<T>) -> Self {
        Self(v)
    }
}

/// Helper trait to simplify resizing and filling vectors.
pub trait VecExt<T> {
    /// Resize the vector to `n` and fill with `val`.
    fn assign(&mut self, n: usize, val: T);
    /// Replaces the vector contents with `slice`, reusing capacity.
    fn assign_slice(&mut self, slice: &[T]);
}

impl<T: Clone> VecExt<T> for Vec<T> {
    fn assign(&mut self, n: usize, val: T) {
        if self.len() != n {
            self.clear();
            self.resize(n, val);
        } else {
            self.fill(val);
        }
    }

    fn assign_slice(&mut self, slice: &[T]) {
        self.clear();
        self.extend_from_slice(slice);
    }
}

// ============================================================================
// SolverBuffer - Scratch Space for the Pentadiagonal Solve
// ============================================================================

/// Scratch space for the pentadiagonal factorization.
///
/// Holds the three nonzero bands of the second-difference penalty matrix and
/// the three diagonals produced by the LDLᵀ factorization. The penalty bands
/// depend only on the series length, so they survive across solves with
/// different lambdas or weights.
#[derive(Debug, Clone)]
pub struct SolverBuffer<T> {
    /// Main diagonal of the penalty matrix DᵗD.
    pub penalty_diag: Slot<T>,

    /// First off-diagonal of DᵗD.
    pub penalty_sub1: Slot<T>,

    /// Second off-diagonal of DᵗD.
    pub penalty_sub2: Slot<T>,

    /// Factorization pivots.
    pub pivots: Slot<T>,

    /// First-subdiagonal elimination ratios.
    pub ratio1: Slot<T>,

    /// Second-subdiagonal elimination ratios.
    pub ratio2: Slot<T>,
}

impl<T> Default for SolverBuffer<T> {
    fn default() -> Self {
        Self {
            penalty_diag: Slot::default(),
            penalty_sub1: Slot::default(),
            penalty_sub2: Slot::default(),
            pivots: Slot::default(),
            ratio1: Slot::default(),
            ratio2: Slot::default(),
        }
    }
}

impl<T: Clone + Zero> SolverBuffer<T> {
    /// Create a buffer pre-allocated for series of `n` samples.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            penalty_diag: Slot::new(n),
            penalty_sub1: Slot::new(n),
            penalty_sub2: Slot::new(n),
            pivots: Slot::new(n),
            ratio1: Slot::new(n),
            ratio2: Slot::new(n),
        }
    }

    /// Prepare the buffer for a series of `n` samples.
    ///
    /// Returns `true` when the penalty bands were resized and must be
    /// reassembled by the caller; `false` when the cached bands are still
    /// valid for this length.
    pub fn prepare(&mut self, n: usize) -> bool {
        let rebuild = self.penalty_diag.len() != n;
        if rebuild {
            self.penalty_diag.as_vec_mut().assign(n, T::zero());
            self.penalty_sub1
                .as_vec_mut()
                .assign(n.saturating_sub(1), T::zero());
            self.penalty_sub2
                .as_vec_mut()
                .assign(n.saturating_sub(2), T::zero());
        }
        self.pivots.as_vec_mut().assign(n, T::zero());
        self.ratio1
            .as_vec_mut()
            .assign(n.saturating_sub(1), T::zero());
        self.ratio2
            .as_vec_mut()
            .assign(n.saturating_sub(2), T::zero());
        rebuild
    }
}

// ============================================================================
// WhittakerBuffer - Working Memory for the Executor
// ============================================================================

/// Working memory for the Whittaker executor.
///
/// This buffer holds all scratch space needed during smoothing: effective
/// weights for the envelope loop, the trial fit for each regularization
/// candidate, and the V-curve profiles.
#[derive(Debug, Clone)]
pub struct WhittakerBuffer<T> {
    /// Effective weights (updated each envelope iteration).
    pub weights: Slot<T>,

    /// Previous iteration weights (for convergence check).
    pub weights_prev: Slot<T>,

    /// Trial fit for the candidate currently being evaluated.
    pub z_trial: Slot<T>,

    /// log10 weighted residual sum of squares per candidate.
    pub fits: Slot<T>,

    /// log10 roughness per candidate.
    pub pens: Slot<T>,

    /// V-curve curvature per candidate (zero at the endpoints).
    pub curvature: Slot<T>,

    /// Scratch space for the pentadiagonal solves.
    pub solver: SolverBuffer<T>,
}

impl<T> Default for WhittakerBuffer<T> {
    fn default() -> Self {
        Self {
            weights: Slot::default(),
            weights_prev: Slot::default(),
            z_trial: Slot::default(),
            fits: Slot::default(),
            pens: Slot::default(),
            curvature: Slot::default(),
            solver: SolverBuffer::default(),
        }
    }
}

impl<T: Clone + Zero + One> WhittakerBuffer<T> {
    /// Create a buffer pre-allocated for `n` samples and `ncand` candidates.
    pub fn with_capacity(n: usize, ncand: usize) -> Self {
        Self {
            weights: Slot::new(n),
            weights_prev: Slot::new(n),
            z_trial: Slot::new(n),
            fits: Slot::new(ncand),
            pens: Slot::new(ncand),
            curvature: Slot::new(ncand),
            solver: SolverBuffer::with_capacity(n),
        }
    }

    /// Prepare buffers for `n` samples and `ncand` candidates.
    ///
    /// The weight-tracking slots are only sized when `track_weights` is set
    /// (envelope fitting); they are cleared otherwise.
    pub fn prepare(&mut self, n: usize, ncand: usize, track_weights: bool) {
        if track_weights {
            self.weights.as_vec_mut().assign(n, T::one());
            self.weights_prev.as_vec_mut().assign(n, T::one());
        } else {
            self.weights.clear();
            self.weights_prev.clear();
        }

        self.z_trial.as_vec_mut().assign(n, T::zero());
        self.fits.as_vec_mut().assign(ncand, T::zero());
        self.pens.as_vec_mut().assign(ncand, T::zero());
        self.curvature.as_vec_mut().assign(ncand, T::zero());
    }
}
