use crate::linalg::LinalgError;
use crate::matrix::check_len;
use crate::traits::FloatScalar;

/// Solve `L x = b` by forward substitution, `L` lower triangular `n × n`.
///
/// Only the lower triangle of `l` is read.
///
/// # Errors
///
/// [`LinalgError::Singular`] on an exactly zero diagonal entry.
pub fn linsolve_lower_triangular<T: FloatScalar>(
    l: &[T],
    x: &mut [T],
    b: &[T],
    n: usize,
) -> Result<(), LinalgError> {
    check_len(l, n, n)?;
    if x.len() < n || b.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }
    for i in 0..n {
        let mut sum = T::zero();
        for j in 0..i {
            sum = sum + l[i * n + j] * x[j];
        }
        let d = l[i * n + i];
        if d == T::zero() {
            return Err(LinalgError::Singular);
        }
        x[i] = (b[i] - sum) / d;
    }
    Ok(())
}

/// Solve `U x = b` by back substitution, `U` upper triangular `n × n`.
///
/// Only the upper triangle of `u` is read, so the leading `n` rows of a
/// taller `m × n` triangular factor can be passed directly.
///
/// # Errors
///
/// [`LinalgError::Singular`] on an exactly zero diagonal entry.
pub fn linsolve_upper_triangular<T: FloatScalar>(
    u: &[T],
    x: &mut [T],
    b: &[T],
    n: usize,
) -> Result<(), LinalgError> {
    check_len(u, n, n)?;
    if x.len() < n || b.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }
    for i in (0..n).rev() {
        let mut sum = T::zero();
        for j in (i + 1)..n {
            sum = sum + u[i * n + j] * x[j];
        }
        let d = u[i * n + i];
        if d == T::zero() {
            return Err(LinalgError::Singular);
        }
        x[i] = (b[i] - sum) / d;
    }
    Ok(())
}
