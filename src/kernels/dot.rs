//! Unit-stride dot-product kernels.
//!
//! The cache-aware multiply transposes B up front precisely so its inner
//! reduction becomes a contiguous dot product - which is the one loop
//! worth vectorizing. The engine's guarantees do not depend on which of
//! these kernels a payload picks.

/// Scalar dot product of two equal-length slices.
///
/// The portable baseline; also handles the tail the SIMD kernel leaves.
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = 0.0;
    for p in 0..a.len() {
        sum += a[p] * b[p];
    }
    sum
}

/// AVX2 dot product: 4 lanes of fused multiply-add, then a horizontal
/// reduce, then a scalar tail for lengths not divisible by 4.
///
/// Lane-wise accumulation sums the terms in a different order than the
/// scalar loop, so results can differ from [`dot`] by rounding error -
/// compare with a tolerance.
///
/// # Safety
///
/// Caller must ensure:
/// - CPU supports AVX2 and FMA (check with `is_x86_feature_detected!`)
/// - `len <= a.len()` and `len <= b.len()`
#[cfg(target_arch = "x86_64")]
#[target_feature(enable = "avx2,fma")]
#[allow(unsafe_op_in_unsafe_fn)]
pub unsafe fn dot_avx2(a: *const f64, b: *const f64, len: usize) -> f64 {
    use std::arch::x86_64::*;

    let main = (len / 4) * 4;
    let mut acc = _mm256_setzero_pd();

    for p in (0..main).step_by(4) {
        let a_vec = _mm256_loadu_pd(a.add(p));
        let b_vec = _mm256_loadu_pd(b.add(p));
        acc = _mm256_fmadd_pd(a_vec, b_vec, acc);
    }

    // Horizontal sum of the 4 accumulator lanes
    let mut lanes = [0.0f64; 4];
    _mm256_storeu_pd(lanes.as_mut_ptr(), acc);
    let mut sum = lanes[0] + lanes[1] + lanes[2] + lanes[3];

    for p in main..len {
        sum += *a.add(p) * *b.add(p);
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_dot_known_value() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![4.0, 5.0, 6.0];
        assert_eq!(dot(&a, &b), 32.0);
    }

    #[test]
    fn avx2_matches_scalar() {
        #[cfg(target_arch = "x86_64")]
        {
            if !is_x86_feature_detected!("avx2") || !is_x86_feature_detected!("fma") {
                println!("Skipping - AVX2/FMA not available");
                return;
            }

            // Lengths around the 4-lane boundary
            for len in [1, 3, 4, 5, 8, 15, 16, 17, 256] {
                let a: Vec<f64> = (0..len).map(|i| (i % 10) as f64).collect();
                let b: Vec<f64> = (0..len).map(|i| ((i + 3) % 10) as f64).collect();

                let scalar = dot(&a, &b);
                let simd = unsafe { dot_avx2(a.as_ptr(), b.as_ptr(), len) };
                assert!(
                    (scalar - simd).abs() < 1e-10,
                    "len {}: scalar={}, simd={}",
                    len,
                    scalar,
                    simd
                );
            }
        }
    }
}
