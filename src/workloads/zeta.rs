//! Zeta partial-sum table: the non-uniform payload.
//!
//! The cost of entry k grows quadratically with k, so a static split
//! hands the high-index threads far more work than the low-index ones.
//! This is the workload where the dynamic policy earns its keep, and the
//! chunk-size table in the benchmark runner makes that visible.

use crate::schedule::{self, Policy, RunError};

/// Partial double sum of the alternating zeta series, truncated at `k`
/// terms in each direction, scaled by 2^s.
///
/// The value itself only matters as a deterministic, index-dependent
/// amount of floating-point work: O(k²) terms for entry k.
pub fn zeta_term(s: f64, k: u64) -> f64 {
    let mut result = 0.0;
    for i in 1..k {
        let sign = (2 * (i & 1)) as f64 - 1.0;
        for j in 1..k {
            result += sign / ((i + j) as f64).powf(s);
        }
    }
    result * 2f64.powf(s)
}

/// Sequential table fill: `out[i] = zeta_term(s, i)`.
pub fn zeta_table(out: &mut [f64], s: f64) {
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = zeta_term(s, i as u64);
    }
}

/// Table fill with one engine index per entry.
pub fn zeta_table_parallel(
    out: &mut [f64],
    s: f64,
    threads: usize,
    chunk_size: usize,
    policy: Policy,
) -> Result<(), RunError> {
    let n = out.len();
    let out_addr = out.as_mut_ptr() as usize;
    schedule::run(n, threads, chunk_size, policy, |i| {
        unsafe {
            *(out_addr as *mut f64).add(i) = zeta_term(s, i as u64);
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_cost_grows_with_index() {
        // Entry 0 and 1 have empty inner loops.
        assert_eq!(zeta_term(2.0, 0), 0.0);
        assert_eq!(zeta_term(2.0, 1), 0.0);
        assert!(zeta_term(2.0, 64) != 0.0);
    }

    #[test]
    fn parallel_matches_sequential() {
        let n = 128;
        let mut expected = vec![0.0; n];
        zeta_table(&mut expected, 2.0);

        for policy in Policy::ALL {
            let mut out = vec![0.0; n];
            zeta_table_parallel(&mut out, 2.0, 4, 4, policy).unwrap();
            for i in 0..n {
                assert!(
                    (expected[i] - out[i]).abs() < 1e-10,
                    "policy {}: mismatch at {}",
                    policy,
                    i
                );
            }
        }
    }
}
