//! Matrix transpose, sequential and scheduled.

use crate::schedule::{self, Policy, RunError};

/// Transpose a matrix: dst = src^T
///
/// Converts row-major (rows × cols) into row-major (cols × rows): what
/// was column j of src becomes row j of dst.
///
/// # Example
///
/// ```
/// use workshare::matrix::transpose::transpose;
///
/// let src = vec![1.0, 2.0, 3.0,   // 2×3 matrix
///                4.0, 5.0, 6.0];
/// let mut dst = vec![0.0; 6];      // will be 3×2
///
/// transpose(&src, &mut dst, 2, 3);
///
/// assert_eq!(dst, vec![1.0, 4.0,   // 3×2 matrix
///                      2.0, 5.0,
///                      3.0, 6.0]);
/// ```
pub fn transpose(src: &[f64], dst: &mut [f64], rows: usize, cols: usize) {
    for i in 0..rows {
        for j in 0..cols {
            dst[j * rows + i] = src[i * cols + j];
        }
    }
}

/// Transpose with the output rows distributed through the engine.
///
/// One unit of work is one row of dst (a column of src), so writes for
/// distinct indices land in disjoint slices and each gather loop is
/// independent of every other row.
pub fn transpose_parallel(
    src: &[f64],
    dst: &mut [f64],
    rows: usize,
    cols: usize,
    threads: usize,
    chunk_size: usize,
    policy: Policy,
) -> Result<(), RunError> {
    assert_eq!(
        src.len(),
        rows * cols,
        "src: expected {}x{}={} elements",
        rows,
        cols,
        rows * cols
    );
    assert_eq!(
        dst.len(),
        rows * cols,
        "dst: expected {}x{}={} elements",
        cols,
        rows,
        rows * cols
    );

    let dst_addr = dst.as_mut_ptr() as usize;
    schedule::run(cols, threads, chunk_size, policy, |j| {
        // Index j owns dst row j and nothing else, so rebuilding just
        // that slice from the shared base pointer cannot race.
        let dst_row =
            unsafe { std::slice::from_raw_parts_mut((dst_addr as *mut f64).add(j * rows), rows) };
        for (i, slot) in dst_row.iter_mut().enumerate() {
            *slot = src[i * cols + j];
        }
        Ok(())
    })
}
