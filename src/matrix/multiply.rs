//! Sequential matrix multiplication baselines.

/// Textbook matrix multiply: C = A * B.
///
/// Matrices are row-major: A is m×k, B is k×n, C is m×n. Each output
/// element accumulates its dot product in a local sum before the single
/// store, so C is overwritten, not accumulated into.
///
/// The inner loop reads B column-wise (stride n), which is what makes
/// this slow on large matrices - see [`matmul_transposed`] for the
/// cache-friendly form.
pub fn matmul_naive(a: &[f64], b: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    for i in 0..m {
        for j in 0..n {
            let mut sum = 0.0;
            for p in 0..k {
                sum += a[i * k + p] * b[p * n + j];
            }
            c[i * n + j] = sum;
        }
    }
}

/// Matrix multiply against a pre-transposed B: C = A * B with B given as
/// B^T (n×k, row-major).
///
/// With B transposed, the inner reduction walks both operands with unit
/// stride: row i of A against row j of B^T. The transpose is a one-time
/// cost that pays for itself on anything but tiny matrices.
pub fn matmul_transposed(a: &[f64], bt: &[f64], c: &mut [f64], m: usize, n: usize, k: usize) {
    for i in 0..m {
        let a_row = &a[i * k..(i + 1) * k];
        for j in 0..n {
            let bt_row = &bt[j * k..(j + 1) * k];
            let mut sum = 0.0;
            for p in 0..k {
                sum += a_row[p] * bt_row[p];
            }
            c[i * n + j] = sum;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::transpose::transpose;

    #[test]
    fn known_2x3_times_3x2() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]; // 2x3
        let b = vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0]; // 3x2

        let mut c = vec![0.0; 4];
        matmul_naive(&a, &b, &mut c, 2, 2, 3);
        assert_eq!(c, vec![58.0, 64.0, 139.0, 154.0]);
    }

    #[test]
    fn naive_overwrites_stale_output() {
        let a = vec![1.0, 0.0, 0.0, 1.0];
        let b = vec![2.0, 0.0, 0.0, 2.0];

        let mut c = vec![99.0; 4];
        matmul_naive(&a, &b, &mut c, 2, 2, 2);
        assert_eq!(c, vec![2.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn transposed_matches_naive() {
        let (m, n, k) = (7, 5, 11);
        let a: Vec<f64> = (0..m * k).map(|i| (i % 10) as f64).collect();
        let b: Vec<f64> = (0..k * n).map(|i| (i % 10) as f64).collect();

        let mut c_naive = vec![0.0; m * n];
        matmul_naive(&a, &b, &mut c_naive, m, n, k);

        let mut bt = vec![0.0; n * k];
        transpose(&b, &mut bt, k, n);
        let mut c_t = vec![0.0; m * n];
        matmul_transposed(&a, &bt, &mut c_t, m, n, k);

        assert_eq!(c_naive, c_t);
    }
}
