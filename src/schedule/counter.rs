//! Shared claim counter for the dynamic policy.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Hands out disjoint `[start, start + chunk_size)` windows to whichever
/// worker asks next.
///
/// The single fetch-and-add is the only synchronization the dynamic policy
/// needs: claims can never overlap because the increment is indivisible,
/// and the cursor only moves forward, so every unclaimed index is
/// eventually handed out. One counter per run; there is no reset.
#[derive(Debug, Default)]
pub struct ChunkCounter {
    next: AtomicUsize,
}

impl ChunkCounter {
    pub fn new() -> Self {
        Self {
            next: AtomicUsize::new(0),
        }
    }

    /// Claim the next window, returning its start index.
    ///
    /// A start at or past the iteration count means the work is exhausted
    /// and the caller should stop. Relaxed ordering suffices: the claim
    /// only needs atomicity, and the pool's join barrier publishes the
    /// workers' output writes.
    pub fn claim(&self, chunk_size: usize) -> usize {
        self.next.fetch_add(chunk_size, Ordering::Relaxed)
    }
}
