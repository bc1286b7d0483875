//! Worker pool: spawns the threads, drives the per-policy loops, and
//! guarantees every worker is joined before `run` returns - on the error
//! path too.

use std::thread;

use thiserror::Error;

use super::counter::ChunkCounter;
use super::plan::{plan, IndexRange, Policy};

/// Failure reported by a unit-of-work function.
pub type WorkError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Why a run could not complete.
#[derive(Debug, Error)]
pub enum RunError {
    /// A size parameter was zero. Checked before any thread is spawned.
    #[error("{name} must be positive")]
    InvalidArgument { name: &'static str },

    /// A unit of work failed. The run is torn down cleanly and the first
    /// observed failure is reported; output slots written by other workers
    /// are indeterminate and must be discarded.
    #[error("worker {thread} failed at index {index}: {source}")]
    Work {
        thread: usize,
        index: usize,
        #[source]
        source: WorkError,
    },

    /// The OS refused to create a worker thread. Workers spawned before
    /// the failure are joined before this is returned.
    #[error("could not spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Execute `work(i)` exactly once for every `i` in `[0, n)` across
/// `threads` workers scheduled under `policy`.
///
/// Blocks until all workers have joined. Visit order across indices is
/// unspecified - the work function must not assume any index runs before
/// another. `chunk_size` is the hand-off granularity for
/// [`Policy::BlockCyclic`] and [`Policy::Dynamic`] and is ignored by the
/// other two policies.
///
/// The work function runs concurrently from several threads, so it must
/// be `Sync`; writes to a shared output buffer are safe as long as each
/// index writes only its own disjoint slot (see the workloads module for
/// the pattern).
///
/// On failure every worker is still joined first, then the first observed
/// error comes back. A panicking work function is re-raised the same way,
/// after the join barrier. Partial output from a failed run is
/// indeterminate.
pub fn run<F>(
    n: usize,
    threads: usize,
    chunk_size: usize,
    policy: Policy,
    work: F,
) -> Result<(), RunError>
where
    F: Fn(usize) -> Result<(), WorkError> + Sync,
{
    if n == 0 {
        return Err(RunError::InvalidArgument { name: "n" });
    }
    if threads == 0 {
        return Err(RunError::InvalidArgument { name: "threads" });
    }
    if chunk_size == 0 {
        return Err(RunError::InvalidArgument { name: "chunk_size" });
    }

    let counter = ChunkCounter::new();
    let counter = &counter;
    let work = &work;

    thread::scope(|scope| {
        let mut handles = Vec::with_capacity(threads);
        for thread_id in 0..threads {
            let handle = thread::Builder::new()
                .name(format!("workshare-{thread_id}"))
                .spawn_scoped(scope, move || {
                    worker(n, threads, chunk_size, policy, thread_id, counter, work)
                })?;
            handles.push(handle);
        }

        // Join everything before reporting, so a failed run never leaves
        // a worker behind. Panics re-raise after the last join.
        let mut first_failure = None;
        let mut panicked = None;
        for handle in handles {
            match handle.join() {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    first_failure.get_or_insert(err);
                }
                Err(payload) => {
                    panicked.get_or_insert(payload);
                }
            }
        }
        if let Some(payload) = panicked {
            std::panic::resume_unwind(payload);
        }
        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    })
}

fn worker<F>(
    n: usize,
    threads: usize,
    chunk_size: usize,
    policy: Policy,
    thread_id: usize,
    counter: &ChunkCounter,
    work: &F,
) -> Result<(), RunError>
where
    F: Fn(usize) -> Result<(), WorkError> + Sync,
{
    if policy == Policy::Dynamic {
        loop {
            let start = counter.claim(chunk_size);
            if start >= n {
                return Ok(());
            }
            let end = (start + chunk_size).min(n);
            run_range(IndexRange::new(start, end), thread_id, work)?;
        }
    }

    for range in plan(n, threads, chunk_size, policy, thread_id) {
        run_range(range, thread_id, work)?;
    }
    Ok(())
}

fn run_range<F>(range: IndexRange, thread_id: usize, work: &F) -> Result<(), RunError>
where
    F: Fn(usize) -> Result<(), WorkError> + Sync,
{
    for index in range.indices() {
        work(index).map_err(|source| RunError::Work {
            thread: thread_id,
            index,
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn zero_sizes_fail_before_spawning() {
        let touched = AtomicUsize::new(0);
        let work = |_i: usize| {
            touched.fetch_add(1, Ordering::Relaxed);
            Ok(())
        };
        assert!(matches!(
            run(0, 4, 1, Policy::Block, work),
            Err(RunError::InvalidArgument { name: "n" })
        ));
        assert!(matches!(
            run(10, 0, 1, Policy::Block, work),
            Err(RunError::InvalidArgument { name: "threads" })
        ));
        assert!(matches!(
            run(10, 4, 0, Policy::Dynamic, work),
            Err(RunError::InvalidArgument { name: "chunk_size" })
        ));
        assert_eq!(touched.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn single_thread_single_index() {
        let touched = AtomicUsize::new(0);
        run(1, 1, 1, Policy::Block, |i| {
            assert_eq!(i, 0);
            touched.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })
        .unwrap();
        assert_eq!(touched.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn dynamic_terminates_with_oversized_chunk() {
        // One claim swallows the whole range; the other workers' first
        // claim lands past n and they exit immediately.
        let touched = AtomicUsize::new(0);
        run(5, 4, 100, Policy::Dynamic, |_| {
            touched.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })
        .unwrap();
        assert_eq!(touched.load(Ordering::Relaxed), 5);
    }

    #[test]
    fn worker_error_reports_thread_and_index() {
        let err = run(100, 4, 4, Policy::Dynamic, |i| {
            if i == 50 {
                return Err("bad index".into());
            }
            Ok(())
        })
        .unwrap_err();
        match err {
            RunError::Work { index, .. } => assert_eq!(index, 50),
            other => panic!("expected Work error, got {:?}", other),
        }
    }
}
