//! Elementwise array payloads: flat vector add and row-wise matrix
//! subtraction.
//!
//! The cheapest units of work the engine schedules - useful for measuring
//! scheduling overhead itself, since the payload does almost nothing.

use crate::schedule::{self, Policy, RunError};

/// Sequential c = a + b.
pub fn add(a: &[f64], b: &[f64], c: &mut [f64]) {
    for i in 0..c.len() {
        c[i] = a[i] + b[i];
    }
}

/// c = a + b with one engine index per element.
pub fn add_parallel(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    threads: usize,
    chunk_size: usize,
    policy: Policy,
) -> Result<(), RunError> {
    let n = c.len();
    assert_eq!(a.len(), n, "a: expected {} elements", n);
    assert_eq!(b.len(), n, "b: expected {} elements", n);

    let c_addr = c.as_mut_ptr() as usize;
    schedule::run(n, threads, chunk_size, policy, |i| {
        unsafe {
            *(c_addr as *mut f64).add(i) = a[i] + b[i];
        }
        Ok(())
    })
}

/// Sequential C = A - B over rows × cols matrices.
pub fn sub_rows(a: &[f64], b: &[f64], c: &mut [f64], rows: usize, cols: usize) {
    for i in 0..rows {
        for j in 0..cols {
            c[i * cols + j] = a[i * cols + j] - b[i * cols + j];
        }
    }
}

/// C = A - B with one engine index per row.
///
/// Row granularity keeps each unit's accesses contiguous, which is what
/// makes the distribution policy visible in the timings: block keeps
/// neighboring rows on one thread, cyclic scatters them.
pub fn sub_rows_parallel(
    a: &[f64],
    b: &[f64],
    c: &mut [f64],
    rows: usize,
    cols: usize,
    threads: usize,
    chunk_size: usize,
    policy: Policy,
) -> Result<(), RunError> {
    assert_eq!(
        a.len(),
        rows * cols,
        "A: expected {}x{}={} elements",
        rows,
        cols,
        rows * cols
    );
    assert_eq!(b.len(), a.len(), "B: expected {} elements", a.len());
    assert_eq!(c.len(), a.len(), "C: expected {} elements", a.len());

    let c_addr = c.as_mut_ptr() as usize;
    schedule::run(rows, threads, chunk_size, policy, |i| {
        let c_row =
            unsafe { std::slice::from_raw_parts_mut((c_addr as *mut f64).add(i * cols), cols) };
        for (j, slot) in c_row.iter_mut().enumerate() {
            *slot = a[i * cols + j] - b[i * cols + j];
        }
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_parallel_matches_sequential() {
        let n = 1024;
        let a: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..n).map(|i| (i * 2) as f64).collect();

        let mut expected = vec![0.0; n];
        add(&a, &b, &mut expected);

        for policy in Policy::ALL {
            let mut c = vec![0.0; n];
            add_parallel(&a, &b, &mut c, 4, 16, policy).unwrap();
            assert_eq!(c, expected, "policy {}", policy);
        }
    }

    #[test]
    fn sub_rows_parallel_matches_sequential() {
        let (rows, cols) = (37, 19);
        let a: Vec<f64> = (0..rows * cols).map(|i| (i + 1) as f64).collect();
        let b: Vec<f64> = (0..rows * cols).map(|i| (i % 5) as f64).collect();

        let mut expected = vec![0.0; rows * cols];
        sub_rows(&a, &b, &mut expected, rows, cols);

        for policy in Policy::ALL {
            let mut c = vec![0.0; rows * cols];
            sub_rows_parallel(&a, &b, &mut c, rows, cols, 3, 2, policy).unwrap();
            assert_eq!(c, expected, "policy {}", policy);
        }
    }
}
