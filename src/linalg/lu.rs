use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::LinalgError;
use crate::matrix::{check_len, mul, tran};
use crate::traits::FloatScalar;

/// LU decomposition with partial pivoting through a permutation vector.
///
/// Copies `a` (`n × n`) into `lu` and factors it in place: the strict lower
/// triangle holds the unit-diagonal `L` multipliers and the upper triangle
/// holds `U`, both addressed through `p`. Row `i` of the factored matrix is
/// stored at `lu[p[i] * n..]`; rows are never physically swapped.
///
/// At step `i` the remaining row with the largest `|a[p[j], i]|` becomes the
/// pivot.
///
/// # Errors
///
/// [`LinalgError::Singular`] if a pivot magnitude falls below `T::epsilon()`.
pub fn lup<T: FloatScalar>(
    a: &[T],
    lu: &mut [T],
    p: &mut [usize],
    n: usize,
) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    check_len(lu, n, n)?;
    if p.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }

    lu[..n * n].copy_from_slice(&a[..n * n]);
    for (i, pi) in p.iter_mut().take(n).enumerate() {
        *pi = i;
    }

    for i in 0..n {
        let mut ind_max = i;
        for j in (i + 1)..n {
            if lu[p[j] * n + i].abs() > lu[p[ind_max] * n + i].abs() {
                ind_max = j;
            }
        }
        p.swap(i, ind_max);

        let pivot = lu[p[i] * n + i];
        if pivot.abs() < T::epsilon() {
            log::debug!("lup: pivot below epsilon at step {}", i);
            return Err(LinalgError::Singular);
        }

        for j in (i + 1)..n {
            let rj = p[j] * n;
            let ri = p[i] * n;
            let factor = lu[rj + i] / pivot;
            lu[rj + i] = factor;
            for k in (i + 1)..n {
                lu[rj + k] = lu[rj + k] - lu[ri + k] * factor;
            }
        }
    }
    Ok(())
}

/// Forward and back substitution through packed LU factors.
fn lu_solve<T: FloatScalar>(
    lu: &[T],
    p: &[usize],
    b: &[T],
    x: &mut [T],
    n: usize,
) -> Result<(), LinalgError> {
    // Forward: L y = P b
    for i in 0..n {
        let row = p[i] * n;
        let mut sum = b[p[i]];
        for j in 0..i {
            sum = sum - lu[row + j] * x[j];
        }
        x[i] = sum;
    }

    // Back: U x = y
    for i in (0..n).rev() {
        let row = p[i] * n;
        let mut sum = x[i];
        for j in (i + 1)..n {
            sum = sum - lu[row + j] * x[j];
        }
        let diag = lu[row + i];
        if diag.abs() <= T::epsilon() {
            return Err(LinalgError::Singular);
        }
        x[i] = sum / diag;
    }
    Ok(())
}

/// Determinant of an `n × n` matrix via [`lup`].
///
/// The sign of the diagonal product is flipped when the pivoting
/// permutation is odd. Parity is taken from the cycle decomposition of `p`
/// (`n - cycles` transpositions). A matrix that fails to factor has
/// determinant zero.
///
/// ```
/// use ctrlkit::linalg::det;
/// let a = [1.0_f32, 2.0, 3.0, 4.0];
/// assert!((det(&a, 2).unwrap() + 2.0).abs() < 1e-6);
/// ```
pub fn det<T: FloatScalar>(a: &[T], n: usize) -> Result<T, LinalgError> {
    let mut lu = vec![T::zero(); n * n];
    let mut p = vec![0usize; n];
    match lup(a, &mut lu, &mut p, n) {
        Ok(()) => {}
        Err(LinalgError::Singular) => return Ok(T::zero()),
        Err(e) => return Err(e),
    }

    let mut d = T::one();
    for i in 0..n {
        d = d * lu[p[i] * n + i];
    }
    if permutation_is_odd(&p) {
        d = -d;
    }
    Ok(d)
}

fn permutation_is_odd(p: &[usize]) -> bool {
    let mut visited = vec![false; p.len()];
    let mut cycles = 0;
    for start in 0..p.len() {
        if visited[start] {
            continue;
        }
        cycles += 1;
        let mut k = start;
        while !visited[k] {
            visited[k] = true;
            k = p[k];
        }
    }
    (p.len() - cycles) % 2 == 1
}

/// Inverse of an `n × n` matrix.
///
/// Factors once with [`lup`], solves one system per identity column, then
/// transposes the assembled solutions into `ai`.
///
/// # Errors
///
/// [`LinalgError::Singular`] for singular or nearly singular input.
pub fn inv<T: FloatScalar>(ai: &mut [T], a: &[T], n: usize) -> Result<(), LinalgError> {
    check_len(ai, n, n)?;
    let mut lu = vec![T::zero(); n * n];
    let mut p = vec![0usize; n];
    lup(a, &mut lu, &mut p, n)?;

    let mut rows = vec![T::zero(); n * n];
    let mut e = vec![T::zero(); n];
    for i in 0..n {
        e[i] = T::one();
        lu_solve(&lu, &p, &e, &mut rows[i * n..(i + 1) * n], n)?;
        e[i] = T::zero();
    }
    tran(ai, &rows, n, n)
}

/// Invert an `n × n` matrix in place.
pub fn inv_in_place<T: FloatScalar>(a: &mut [T], n: usize) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    let staged: Vec<T> = a[..n * n].to_vec();
    inv(a, &staged, n)
}

/// Solve `A x = b` for square `A` with one LU factorization and a single
/// forward/back substitution pass.
///
/// # Errors
///
/// [`LinalgError::Singular`] if a pivot is below `T::epsilon()`.
pub fn linsolve_lup<T: FloatScalar>(
    a: &[T],
    x: &mut [T],
    b: &[T],
    n: usize,
) -> Result<(), LinalgError> {
    if x.len() < n || b.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }
    let mut lu = vec![T::zero(); n * n];
    let mut p = vec![0usize; n];
    lup(a, &mut lu, &mut p, n)?;
    lu_solve(&lu, &p, b, x, n)
}

/// Solve `A x = b` by Gaussian elimination, optionally Tikhonov-regularized.
///
/// With `alpha == 0` the system is solved directly and `A` must be square.
/// With `alpha > 0` the regularized normal equations
/// `(AᵀA + αI) x = Aᵀb` are solved instead, so `A` may be `rows × cols`
/// with any shape.
///
/// # Errors
///
/// [`LinalgError::InvalidDimensions`] if `alpha == 0` and `A` is not square;
/// [`LinalgError::Singular`] if the (regularized) system cannot be factored.
pub fn linsolve_gauss<T: FloatScalar>(
    a: &[T],
    x: &mut [T],
    b: &[T],
    rows: usize,
    cols: usize,
    alpha: T,
) -> Result<(), LinalgError> {
    check_len(a, rows, cols)?;
    if b.len() < rows || x.len() < cols {
        return Err(LinalgError::DimensionMismatch);
    }
    if alpha == T::zero() {
        if rows != cols {
            return Err(LinalgError::InvalidDimensions);
        }
        return linsolve_lup(a, x, b, rows);
    }

    let mut at = vec![T::zero(); rows * cols];
    tran(&mut at, a, rows, cols)?;
    let mut ata = vec![T::zero(); cols * cols];
    mul(&mut ata, &at, a, cols, rows, rows, cols)?;
    for i in 0..cols {
        ata[i * cols + i] = ata[i * cols + i] + alpha;
    }
    let mut atb = vec![T::zero(); cols];
    mul(&mut atb, &at, b, cols, rows, rows, 1)?;
    linsolve_lup(&ata, x, &atb, cols)
}
