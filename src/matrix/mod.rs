//! Basic matrix operations over flat row-major buffers.
//!
//! A matrix is a slice plus a row and a column count; element `(i, j)` of an
//! `r × c` matrix lives at `a[i * c + j]`. No buffer carries its own shape,
//! so every function takes the dimensions explicitly and checks the slice
//! lengths against them.
//!
//! ```
//! use ctrlkit::matrix::{mul, tran};
//!
//! // [4 23; 2 5] * [3; 1]
//! let a = [4.0_f32, 23.0, 2.0, 5.0];
//! let b = [3.0_f32, 1.0];
//! let mut c = [0.0_f32; 2];
//! mul(&mut c, &a, &b, 2, 2, 2, 1).unwrap();
//! assert_eq!(c, [35.0, 11.0]);
//!
//! let mut at = [0.0_f32; 4];
//! tran(&mut at, &a, 2, 2).unwrap();
//! assert_eq!(at, [4.0, 2.0, 23.0, 5.0]);
//! ```

mod block;
mod norm;

pub use block::{cat, cut, insert};
pub use norm::{norm, sum, NormKind, SumAxis};

use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::traits::Scalar;

/// Check that `buf` can hold a `rows × cols` matrix.
#[inline]
pub(crate) fn check_len<T>(buf: &[T], rows: usize, cols: usize) -> Result<(), LinalgError> {
    if buf.len() < rows * cols {
        Err(LinalgError::DimensionMismatch)
    } else {
        Ok(())
    }
}

/// An `n × n` identity matrix in a fresh buffer.
pub(crate) fn identity<T: Scalar>(n: usize) -> Vec<T> {
    let mut m = vec![T::zero(); n * n];
    for i in 0..n {
        m[i * n + i] = T::one();
    }
    m
}

/// Element-wise sum `C = A + B` of two `rows × cols` matrices.
pub fn add<T: Scalar>(
    c: &mut [T],
    a: &[T],
    b: &[T],
    rows: usize,
    cols: usize,
) -> Result<(), LinalgError> {
    check_len(a, rows, cols)?;
    check_len(b, rows, cols)?;
    check_len(c, rows, cols)?;
    for ((ci, &ai), &bi) in c[..rows * cols].iter_mut().zip(a).zip(b) {
        *ci = ai + bi;
    }
    Ok(())
}

/// Matrix product `C = A * B`.
///
/// `A` is `row_a × column_a`, `B` is `row_b × column_b`, `C` receives
/// `row_a × column_b` entries.
///
/// # Errors
///
/// [`LinalgError::DimensionMismatch`] if `column_a != row_b` or any buffer
/// is shorter than its declared shape.
pub fn mul<T: Scalar>(
    c: &mut [T],
    a: &[T],
    b: &[T],
    row_a: usize,
    column_a: usize,
    row_b: usize,
    column_b: usize,
) -> Result<(), LinalgError> {
    if column_a != row_b {
        return Err(LinalgError::DimensionMismatch);
    }
    check_len(a, row_a, column_a)?;
    check_len(b, row_b, column_b)?;
    check_len(c, row_a, column_b)?;

    for i in 0..row_a {
        let c_row = &mut c[i * column_b..(i + 1) * column_b];
        c_row.fill(T::zero());
        for k in 0..column_a {
            let aik = a[i * column_a + k];
            if aik == T::zero() {
                continue;
            }
            let b_row = &b[k * column_b..(k + 1) * column_b];
            for (cij, &bkj) in c_row.iter_mut().zip(b_row) {
                *cij = *cij + aik * bkj;
            }
        }
    }
    Ok(())
}

/// Product `A * B` into a freshly allocated buffer.
pub(crate) fn mul_new<T: Scalar>(
    a: &[T],
    b: &[T],
    row_a: usize,
    column_a: usize,
    column_b: usize,
) -> Result<Vec<T>, LinalgError> {
    let mut c = vec![T::zero(); row_a * column_b];
    mul(&mut c, a, b, row_a, column_a, column_a, column_b)?;
    Ok(c)
}

/// Transpose: `At` (`cols × rows`) receives `A` (`rows × cols`).
pub fn tran<T: Scalar>(at: &mut [T], a: &[T], rows: usize, cols: usize) -> Result<(), LinalgError> {
    check_len(a, rows, cols)?;
    check_len(at, cols, rows)?;
    for i in 0..rows {
        for j in 0..cols {
            at[j * rows + i] = a[i * cols + j];
        }
    }
    Ok(())
}

/// Transpose a `rows × cols` matrix in place.
///
/// Square matrices are transposed by swapping; rectangular ones are staged
/// through a scratch copy. Afterwards the buffer holds a `cols × rows` matrix.
pub fn tran_in_place<T: Scalar>(a: &mut [T], rows: usize, cols: usize) -> Result<(), LinalgError> {
    check_len(a, rows, cols)?;
    if rows == cols {
        for i in 0..rows {
            for j in (i + 1)..cols {
                a.swap(i * cols + j, j * rows + i);
            }
        }
        return Ok(());
    }
    let staged = a[..rows * cols].to_vec();
    tran(a, &staged, rows, cols)
}
