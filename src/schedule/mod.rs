//! The work-distribution engine.
//!
//! Takes an index range of independent units of work, splits it among a
//! fixed set of worker threads under a [`Policy`], and runs a caller
//! supplied function once per index. Static policies compute their
//! assignment in closed form before any thread starts; the dynamic policy
//! pulls chunks from a shared atomic counter at runtime.
//!
//! Everything lives for one [`run`] call - no state survives between runs
//! except whatever buffer the caller owns.

pub mod counter;
pub mod plan;
pub mod pool;

pub use counter::ChunkCounter;
pub use plan::{plan, IndexRange, Plan, Policy};
pub use pool::{run, RunError, WorkError};
