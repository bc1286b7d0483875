//! Parallel work distribution for dense numeric workloads.
//!
//! I built this to measure how scheduling policy interacts with memory
//! access pattern: the same computation can run 2-6× faster depending on
//! whether threads get contiguous blocks, strided indices, or pull chunks
//! on demand. The crate has two halves:
//!
//! - [`schedule`]: the engine. Splits `[0, n)` among a fixed set of
//!   worker threads under a [`Policy`] (block, cyclic, block-cyclic, or
//!   dynamic) and runs a per-index function exactly once per index.
//! - [`workloads`]: numeric payloads wired through the engine - matrix
//!   multiply with a transposed inner loop, elementwise ops, 4-vector
//!   normalization, a knapsack recurrence, and a deliberately lopsided
//!   zeta table.
//!
//! ## Usage
//!
//! ```
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use workshare::{run, Policy};
//!
//! let out: Vec<AtomicU64> = (0..16).map(|_| AtomicU64::new(0)).collect();
//!
//! run(16, 4, 2, Policy::BlockCyclic, |i| {
//!     out[i].store((i * i) as u64, Ordering::Relaxed);
//!     Ok(())
//! })
//! .unwrap();
//!
//! assert_eq!(out[15].load(Ordering::Relaxed), 225);
//! ```
//!
//! For payloads that write plain slices, capture the output's base
//! pointer as a `usize` and rebuild the disjoint slice each index owns -
//! see [`workloads::matmul`] for the pattern.
//!
//! ## What's inside
//!
//! - Closed-form partitioning: each worker derives its assignment from
//!   its id alone, no coordination
//! - A single lock-free fetch-and-add as the only synchronization the
//!   dynamic policy needs
//! - Scoped workers that are always joined, error path included
//! - AVX2/FMA dot kernel with scalar fallback for the matmul inner loop

pub mod kernels;
pub mod matrix;
pub mod schedule;
pub mod workloads;

pub use schedule::{plan, run, ChunkCounter, IndexRange, Plan, Policy, RunError, WorkError};

/// Matrix multiply: C = A * B, sequential.
///
/// Transposes B once so the inner loop is a unit-stride dot product.
/// Matrices are row-major: A is m×k, B is k×n, C is m×n.
///
/// # Panics
///
/// Panics if the slice sizes don't match m, n, k.
pub fn multiply(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);

    let mut bt = vec![0.0; n * k];
    matrix::transpose::transpose(b, &mut bt, k, n);
    matrix::multiply::matmul_transposed(a, &bt, c, m, n, k);
}

/// Same as [`multiply`] but distributed across `threads` workers.
///
/// Uses the block policy with row granularity - the load is uniform per
/// row, so static contiguous assignment is the right default. Pick a
/// policy explicitly with [`workloads::matmul::matmul_parallel`].
pub fn multiply_parallel(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    m: usize,
    n: usize,
    k: usize,
    threads: usize,
) -> Result<(), RunError> {
    workloads::matmul::matmul_parallel(a, b, c, m, n, k, threads, 1, Policy::Block)
}
