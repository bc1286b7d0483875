//! Sequential matrix operations.
//!
//! These are the single-threaded baselines the benchmark runner and the
//! tests compare the scheduled workloads against, plus the transpose used
//! by the cache-aware multiply.

pub mod multiply;
pub mod transpose;
