//! Numeric payloads driven through the scheduling engine.
//!
//! Each workload maps its computation onto independent indices (a row, a
//! vector, a table cell) and hands the per-index body to
//! [`schedule::run`](crate::schedule::run). Shared output buffers use the
//! same pattern throughout: the base pointer is captured as a `usize` and
//! the worker rebuilds exactly the disjoint slice its index owns.

pub mod elementwise;
pub mod knapsack;
pub mod matmul;
pub mod normalize;
pub mod zeta;
