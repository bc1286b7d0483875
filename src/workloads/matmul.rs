//! Scheduled matrix multiplication with a cache-aware inner loop.

use crate::kernels::dot::dot;
#[cfg(target_arch = "x86_64")]
use crate::kernels::dot::dot_avx2;
use crate::matrix::transpose::transpose_parallel;
use crate::schedule::{self, Policy, RunError};

/// Multiply C = A * B with output rows distributed through the engine.
///
/// Matrices are row-major: A is m×k, B is k×n, C is m×n. B is first
/// transposed (also through the engine, one unit per B^T row) so the
/// per-row reduction walks both operands with unit stride, then each
/// engine index computes one full row of C. The dot kernel is chosen once
/// per run: AVX2/FMA when the CPU has it, scalar otherwise.
///
/// Row ownership is disjoint, so the result is independent of the policy;
/// only SIMD lane order can shift the rounding, within ~1e-10 for
/// benchmark-sized inputs.
///
/// # Panics
///
/// Panics if the slice sizes don't match m, n, k.
pub fn matmul_parallel(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    m: usize,
    n: usize,
    k: usize,
    threads: usize,
    chunk_size: usize,
    policy: Policy,
) -> Result<(), RunError> {
    assert_eq!(a.len(), m * k, "A: expected {}x{}={} elements", m, k, m * k);
    assert_eq!(b.len(), k * n, "B: expected {}x{}={} elements", k, n, k * n);
    assert_eq!(c.len(), m * n, "C: expected {}x{}={} elements", m, n, m * n);

    // One-time pre-pass: B^T in row-major layout, n rows of k elements.
    let mut bt = vec![0.0; n * k];
    transpose_parallel(b, &mut bt, k, n, threads, chunk_size, policy)?;
    let bt = &bt;

    #[cfg(target_arch = "x86_64")]
    let use_simd = is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma");
    #[cfg(not(target_arch = "x86_64"))]
    let use_simd = false;

    let c_addr = c.as_mut_ptr() as usize;
    schedule::run(m, threads, chunk_size, policy, |i| {
        // Row i of C belongs to this index alone.
        let c_row =
            unsafe { std::slice::from_raw_parts_mut((c_addr as *mut f64).add(i * n), n) };
        let a_row = &a[i * k..(i + 1) * k];

        for (j, slot) in c_row.iter_mut().enumerate() {
            let bt_row = &bt[j * k..(j + 1) * k];
            *slot = row_dot(use_simd, a_row, bt_row);
        }
        Ok(())
    })
}

#[cfg(target_arch = "x86_64")]
fn row_dot(use_simd: bool, a_row: &[f64], bt_row: &[f64]) -> f64 {
    if use_simd {
        // use_simd is only true when AVX2+FMA were detected at run start.
        unsafe { dot_avx2(a_row.as_ptr(), bt_row.as_ptr(), a_row.len()) }
    } else {
        dot(a_row, bt_row)
    }
}

#[cfg(not(target_arch = "x86_64"))]
fn row_dot(_use_simd: bool, a_row: &[f64], bt_row: &[f64]) -> f64 {
    dot(a_row, bt_row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::multiply::matmul_naive;

    #[test]
    fn parallel_matches_naive_all_policies() {
        let (m, n, k) = (48, 32, 40);
        let a: Vec<f64> = (0..m * k).map(|i| (i % 10) as f64).collect();
        let b: Vec<f64> = (0..k * n).map(|i| (i % 10) as f64).collect();

        let mut expected = vec![0.0; m * n];
        matmul_naive(&a, &b, &mut expected, m, n, k);

        for policy in Policy::ALL {
            let mut c = vec![0.0; m * n];
            matmul_parallel(&a, &b, &mut c, m, n, k, 4, 2, policy).unwrap();
            for i in 0..m * n {
                assert!(
                    (expected[i] - c[i]).abs() < 1e-10,
                    "policy {}: mismatch at {}: expected {}, got {}",
                    policy,
                    i,
                    expected[i],
                    c[i]
                );
            }
        }
    }

    #[test]
    fn non_square_shapes() {
        let cases = [(1, 1, 1), (3, 5, 7), (17, 4, 9)];
        for (m, n, k) in cases {
            let a: Vec<f64> = (0..m * k).map(|i| (i % 7) as f64).collect();
            let b: Vec<f64> = (0..k * n).map(|i| (i % 7) as f64).collect();

            let mut expected = vec![0.0; m * n];
            matmul_naive(&a, &b, &mut expected, m, n, k);

            let mut c = vec![0.0; m * n];
            matmul_parallel(&a, &b, &mut c, m, n, k, 3, 2, Policy::BlockCyclic).unwrap();
            for i in 0..m * n {
                assert!(
                    (expected[i] - c[i]).abs() < 1e-10,
                    "{}x{}x{}: mismatch at {}",
                    m,
                    n,
                    k,
                    i
                );
            }
        }
    }
}
