use alloc::vec;

use crate::linalg::{svd_golub_reinsch, svd_jacobi_one_sided, LinalgError, MAX_ITERATION_COUNT_SVD};
use crate::matrix::{check_len, tran};
use crate::traits::{FloatScalar, Scalar};

/// Which norm [`norm`] computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormKind {
    /// Sum of absolute values (vector) or maximum absolute column sum (matrix).
    L1,
    /// Euclidean length (vector) or largest singular value (matrix).
    L2,
}

/// Reduction direction for [`sum`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SumAxis {
    /// Sum every column into row 0.
    Columns,
    /// Sum every row into column 0.
    Rows,
}

// ── Norms ───────────────────────────────────────────────────────────

/// L1 or L2 norm of a `rows × cols` matrix.
///
/// A single row or a single column is treated as a vector. The matrix L2
/// norm is the largest singular value: one-sided Jacobi SVD for square
/// input, Golub-Reinsch otherwise (on the transpose when `rows < cols`).
///
/// ```
/// use ctrlkit::matrix::{norm, NormKind};
/// let v = [3.0_f32, -4.0];
/// assert_eq!(norm(&v, 1, 2, NormKind::L1).unwrap(), 7.0);
/// assert_eq!(norm(&v, 1, 2, NormKind::L2).unwrap(), 5.0);
/// ```
pub fn norm<T: FloatScalar>(
    a: &[T],
    rows: usize,
    cols: usize,
    kind: NormKind,
) -> Result<T, LinalgError> {
    check_len(a, rows, cols)?;
    let n = rows * cols;
    let is_vector = rows == 1 || cols == 1;

    match kind {
        NormKind::L1 if is_vector => Ok(a[..n].iter().fold(T::zero(), |s, &x| s + x.abs())),
        NormKind::L1 => {
            let mut max = T::zero();
            for j in 0..cols {
                let mut col_sum = T::zero();
                for i in 0..rows {
                    col_sum = col_sum + a[i * cols + j].abs();
                }
                if col_sum > max {
                    max = col_sum;
                }
            }
            Ok(max)
        }
        NormKind::L2 if is_vector => Ok(a[..n].iter().fold(T::zero(), |s, &x| s + x * x).sqrt()),
        NormKind::L2 => {
            let (m, k) = if rows >= cols { (rows, cols) } else { (cols, rows) };
            let mut work = vec![T::zero(); n];
            if rows >= cols {
                work.copy_from_slice(&a[..n]);
            } else {
                tran(&mut work, a, rows, cols)?;
            }
            let mut u = vec![T::zero(); m * k];
            let mut s = vec![T::zero(); k];
            let mut v = vec![T::zero(); k * k];
            if m == k {
                svd_jacobi_one_sided(&work, m, MAX_ITERATION_COUNT_SVD, &mut u, &mut s, &mut v)?;
            } else {
                svd_golub_reinsch(&work, m, k, &mut u, &mut s, &mut v)?;
            }
            Ok(s.iter().fold(T::zero(), |mx, &x| if x > mx { x } else { mx }))
        }
    }
}

// ── Reductions ──────────────────────────────────────────────────────

/// Copy `A` into `Ar` and reduce into its first row or column.
///
/// With [`SumAxis::Columns`] row 0 of `Ar` holds the column sums; with
/// [`SumAxis::Rows`] column 0 holds the row sums. All other entries are
/// left as copied from `A`.
pub fn sum<T: Scalar>(
    ar: &mut [T],
    a: &[T],
    rows: usize,
    cols: usize,
    axis: SumAxis,
) -> Result<(), LinalgError> {
    check_len(a, rows, cols)?;
    check_len(ar, rows, cols)?;
    ar[..rows * cols].copy_from_slice(&a[..rows * cols]);
    match axis {
        SumAxis::Columns => {
            for i in 1..rows {
                for j in 0..cols {
                    ar[j] = ar[j] + a[i * cols + j];
                }
            }
        }
        SumAxis::Rows => {
            for i in 0..rows {
                for j in 1..cols {
                    ar[i * cols] = ar[i * cols] + a[i * cols + j];
                }
            }
        }
    }
    Ok(())
}
