//! Pseudo-polynomial 0/1 knapsack table fill.
//!
//! The one payload here with a loop-carried dependency: row i of the
//! table reads row i-1, so item rows run sequentially and only the
//! capacity sweep inside a row goes through the engine. `split_at_mut`
//! separates the read-only previous row from the row being written.

use crate::schedule::{self, Policy, RunError};

/// Cells per table row for a given capacity.
fn row_width(capacity: usize) -> usize {
    capacity + 1
}

/// Sequential table fill.
///
/// `table` is (items+1) × (capacity+1), row-major, with row 0 all zeros
/// (no items). After the fill, `table[items * (capacity+1) + capacity]`
/// holds the best achievable value.
pub fn knapsack(weights: &[usize], values: &[u64], table: &mut [u64], capacity: usize) {
    let width = row_width(capacity);
    assert_eq!(weights.len(), values.len(), "one value per weight");
    assert_eq!(
        table.len(),
        (weights.len() + 1) * width,
        "table: expected {} rows of {} cells",
        weights.len() + 1,
        width
    );

    for i in 1..=weights.len() {
        let (w, v) = (weights[i - 1], values[i - 1]);
        for j in 0..width {
            let keep = table[(i - 1) * width + j];
            table[i * width + j] = if w <= j {
                keep.max(table[(i - 1) * width + (j - w)] + v)
            } else {
                keep
            };
        }
    }
}

/// Table fill with each row's capacity sweep distributed by the engine.
///
/// Cells within one row are independent (they only read the previous
/// row), so a row is a complete `[0, capacity]` index range for one run.
/// The outer item loop stays sequential - that dependency is the point of
/// the recurrence and no policy removes it.
pub fn knapsack_parallel(
    weights: &[usize],
    values: &[u64],
    table: &mut [u64],
    capacity: usize,
    threads: usize,
    chunk_size: usize,
    policy: Policy,
) -> Result<(), RunError> {
    let width = row_width(capacity);
    assert_eq!(weights.len(), values.len(), "one value per weight");
    assert_eq!(
        table.len(),
        (weights.len() + 1) * width,
        "table: expected {} rows of {} cells",
        weights.len() + 1,
        width
    );

    for i in 1..=weights.len() {
        let (w, v) = (weights[i - 1], values[i - 1]);

        // Everything before row i is frozen; row i is this run's output.
        let (done, rest) = table.split_at_mut(i * width);
        let prev = &done[(i - 1) * width..];
        let row = &mut rest[..width];

        let row_addr = row.as_mut_ptr() as usize;
        schedule::run(width, threads, chunk_size, policy, |j| {
            let keep = prev[j];
            let best = if w <= j {
                keep.max(prev[j - w] + v)
            } else {
                keep
            };
            unsafe {
                *(row_addr as *mut u64).add(j) = best;
            }
            Ok(())
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn best_value(table: &[u64], items: usize, capacity: usize) -> u64 {
        table[items * row_width(capacity) + capacity]
    }

    #[test]
    fn small_known_instance() {
        // Items: (weight, value) = (1, 1), (3, 4), (4, 5), (5, 7), cap 7.
        // Best is 4 + 5 = 9 (items 2 and 3).
        let weights = [1, 3, 4, 5];
        let values = [1, 4, 5, 7];
        let capacity = 7;

        let mut table = vec![0u64; (weights.len() + 1) * row_width(capacity)];
        knapsack(&weights, &values, &mut table, capacity);
        assert_eq!(best_value(&table, weights.len(), capacity), 9);
    }

    #[test]
    fn parallel_matches_sequential_exactly() {
        // Deterministic pseudo-random-ish instance, integer arithmetic,
        // so equality is exact for every policy.
        let items = 40;
        let capacity = 100;
        let weights: Vec<usize> = (0..items).map(|i| (i * 7) % 23 + 1).collect();
        let values: Vec<u64> = (0..items).map(|i| ((i * 13) % 31 + 1) as u64).collect();

        let mut expected = vec![0u64; (items + 1) * row_width(capacity)];
        knapsack(&weights, &values, &mut expected, capacity);

        for policy in Policy::ALL {
            let mut table = vec![0u64; (items + 1) * row_width(capacity)];
            knapsack_parallel(&weights, &values, &mut table, capacity, 4, 8, policy).unwrap();
            assert_eq!(table, expected, "policy {}", policy);
        }
    }
}
