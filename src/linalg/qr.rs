use alloc::vec;

use crate::linalg::{inv_in_place, linsolve_upper_triangular, LinalgError};
use crate::matrix::{check_len, identity, tran};
use crate::traits::FloatScalar;

/// Apply `I - 2 w wᵀ` from the left to a `rows × cols` buffer.
///
/// `w` is zero above row `k`, so only rows `k..` change.
fn reflect<T: FloatScalar>(m: &mut [T], w: &[T], k: usize, rows: usize, cols: usize) {
    let two = T::lit(2.0);
    for j in 0..cols {
        let mut dot = T::zero();
        for i in k..rows {
            dot = dot + w[i] * m[i * cols + j];
        }
        dot = dot * two;
        for i in k..rows {
            m[i * cols + j] = m[i * cols + j] - dot * w[i];
        }
    }
}

/// Householder QR decomposition of a `rows × cols` matrix: `A = Q R`.
///
/// `r` receives the full `rows × cols` upper-triangular factor. When
/// `only_r` is false, `q` must be `Some` buffer of `rows × rows` and
/// receives the orthogonal factor, recovered by inverting the accumulated
/// reflector product. With `only_r` set, `q` is ignored.
///
/// Column `k` is reflected for `k < min(rows - 1, cols)`. A sub-column that
/// is already zero is left alone.
///
/// # Errors
///
/// [`LinalgError::Singular`] if the reflector product cannot be inverted.
///
/// ```
/// use ctrlkit::linalg::qr;
///
/// let a = [3.0_f32, 1.0, 4.0, 2.0];
/// let mut q = [0.0_f32; 4];
/// let mut r = [0.0_f32; 4];
/// qr(&a, Some(&mut q), &mut r, 2, 2, false).unwrap();
/// assert!(r[2].abs() < 1e-6);
/// assert!((r[0].abs() - 5.0).abs() < 1e-5);
/// ```
pub fn qr<T: FloatScalar>(
    a: &[T],
    q: Option<&mut [T]>,
    r: &mut [T],
    rows: usize,
    cols: usize,
    only_r: bool,
) -> Result<(), LinalgError> {
    check_len(a, rows, cols)?;
    check_len(r, rows, cols)?;
    if rows == 0 {
        return Ok(());
    }
    r[..rows * cols].copy_from_slice(&a[..rows * cols]);

    let mut h = identity::<T>(rows);
    let mut w = vec![T::zero(); rows];
    let steps = (rows - 1).min(cols);

    for k in 0..steps {
        let mut s = T::zero();
        for i in k..rows {
            s = s + r[i * cols + k] * r[i * cols + k];
        }
        let mut s = s.sqrt();
        let rk = r[k * cols + k];
        if rk < T::zero() {
            s = -s;
        }
        let rr = (T::lit(2.0) * s * (rk + s)).sqrt();
        if rr == T::zero() {
            continue;
        }

        w.fill(T::zero());
        w[k] = (rk + s) / rr;
        for i in (k + 1)..rows {
            w[i] = r[i * cols + k] / rr;
        }

        if !only_r {
            reflect(&mut h, &w, k, rows, rows);
        }
        reflect(r, &w, k, rows, cols);
    }

    if !only_r {
        let q = q.ok_or(LinalgError::DimensionMismatch)?;
        check_len(q, rows, rows)?;
        inv_in_place(&mut h, rows)?;
        q[..rows * rows].copy_from_slice(&h);
    }
    Ok(())
}

/// Least-squares solution of `A x = b` for `rows ≥ cols` via [`qr`].
///
/// Forms `Qᵀ b` and back-substitutes through the leading `cols × cols`
/// block of `R`.
pub fn linsolve_qr<T: FloatScalar>(
    a: &[T],
    x: &mut [T],
    b: &[T],
    rows: usize,
    cols: usize,
) -> Result<(), LinalgError> {
    if rows < cols {
        return Err(LinalgError::InvalidDimensions);
    }
    if b.len() < rows {
        return Err(LinalgError::DimensionMismatch);
    }
    let mut q = vec![T::zero(); rows * rows];
    let mut r = vec![T::zero(); rows * cols];
    qr(a, Some(&mut q), &mut r, rows, cols, false)?;

    let mut qt = vec![T::zero(); rows * rows];
    tran(&mut qt, &q, rows, rows)?;
    let mut qtb = vec![T::zero(); rows];
    for i in 0..rows {
        let mut acc = T::zero();
        for j in 0..rows {
            acc = acc + qt[i * rows + j] * b[j];
        }
        qtb[i] = acc;
    }
    linsolve_upper_triangular(&r, x, &qtb, cols)
}
