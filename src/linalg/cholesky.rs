use alloc::vec;

use crate::linalg::{linsolve_lower_triangular, linsolve_upper_triangular, LinalgError};
use crate::matrix::{check_len, tran};
use crate::traits::FloatScalar;

/// Direction of a Cholesky rank-1 modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOne {
    /// `L' L'ᵀ = L Lᵀ + x xᵀ`
    Update,
    /// `L' L'ᵀ = L Lᵀ - x xᵀ`
    Downdate,
}

/// Lower-triangular Cholesky factor: `A = L Lᵀ`.
///
/// `a` must be symmetric; only its lower triangle is read. The strict upper
/// triangle of `l` is zeroed.
///
/// A diagonal pivot whose radicand is zero or negative is replaced by
/// `T::epsilon()` instead of failing, so the factor stays finite for
/// semidefinite input. Each substitution is reported through `log::warn!`.
///
/// ```
/// use ctrlkit::linalg::chol;
///
/// let a = [4.0_f32, 2.0, 2.0, 3.0];
/// let mut l = [0.0_f32; 4];
/// chol(&a, &mut l, 2).unwrap();
/// assert_eq!(l, [2.0, 0.0, 1.0, 2.0_f32.sqrt()]);
/// ```
pub fn chol<T: FloatScalar>(a: &[T], l: &mut [T], n: usize) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    check_len(l, n, n)?;
    l[..n * n].fill(T::zero());

    for i in 0..n {
        for j in 0..=i {
            let mut s = T::zero();
            for k in 0..j {
                s = s + l[i * n + k] * l[j * n + k];
            }
            if i == j {
                let radicand = a[i * n + i] - s;
                l[i * n + i] = if radicand > T::zero() {
                    radicand.sqrt()
                } else {
                    log::warn!("chol: non-positive pivot at {}, substituting epsilon", i);
                    T::epsilon()
                };
            } else {
                l[i * n + j] = (a[i * n + j] - s) / l[j * n + j];
            }
        }
    }
    Ok(())
}

/// Rank-1 update or downdate of a lower Cholesky factor, in place.
///
/// `x` is left untouched; the sweep runs on a private copy. Only the lower
/// triangle of `l` is touched.
///
/// # Errors
///
/// [`LinalgError::NotPositiveDefinite`] if a downdate would leave
/// `L Lᵀ - x xᵀ` indefinite. `l` is partially modified in that case.
pub fn cholupdate<T: FloatScalar>(
    l: &mut [T],
    x: &[T],
    n: usize,
    kind: RankOne,
) -> Result<(), LinalgError> {
    check_len(l, n, n)?;
    if x.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }
    let mut x = x[..n].to_vec();

    for j in 0..n {
        let ljj = l[j * n + j];
        let xj = x[j];
        if ljj == T::zero() {
            return Err(LinalgError::NotPositiveDefinite);
        }

        match kind {
            RankOne::Update => {
                let r = (ljj * ljj + xj * xj).sqrt();
                let c = r / ljj;
                let s = xj / ljj;
                l[j * n + j] = r;
                for i in (j + 1)..n {
                    l[i * n + j] = (l[i * n + j] + s * x[i]) / c;
                    x[i] = c * x[i] - s * l[i * n + j];
                }
            }
            RankOne::Downdate => {
                let radicand = ljj * ljj - xj * xj;
                if radicand <= T::zero() {
                    return Err(LinalgError::NotPositiveDefinite);
                }
                let r = radicand.sqrt();
                let c = r / ljj;
                let s = xj / ljj;
                l[j * n + j] = r;
                for i in (j + 1)..n {
                    l[i * n + j] = (l[i * n + j] - s * x[i]) / c;
                    x[i] = c * x[i] - s * l[i * n + j];
                }
            }
        }
    }
    Ok(())
}

/// Solve `A x = b` for symmetric positive definite `A` via [`chol`].
pub fn linsolve_chol<T: FloatScalar>(
    a: &[T],
    x: &mut [T],
    b: &[T],
    n: usize,
) -> Result<(), LinalgError> {
    let mut l = vec![T::zero(); n * n];
    chol(a, &mut l, n)?;

    let mut y = vec![T::zero(); n];
    linsolve_lower_triangular(&l, &mut y, b, n)?;

    let mut lt = vec![T::zero(); n * n];
    tran(&mut lt, &l, n, n)?;
    linsolve_upper_triangular(&lt, x, &y, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::mul;

    const PASCAL3: [f64; 9] = [1.0, 1.0, 1.0, 1.0, 2.0, 3.0, 1.0, 3.0, 6.0];

    fn reconstruct(l: &[f64], n: usize) -> Vec<f64> {
        let mut lt = vec![0.0; n * n];
        tran(&mut lt, l, n, n).unwrap();
        let mut a = vec![0.0; n * n];
        mul(&mut a, l, &lt, n, n, n, n).unwrap();
        a
    }

    #[test]
    fn factor_reconstructs_input() {
        let mut l = [0.0; 9];
        chol(&PASCAL3, &mut l, 3).unwrap();
        // pascal(3) has an all-ones unit lower factor
        assert_eq!(l, [1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 2.0, 1.0]);
        for (x, y) in reconstruct(&l, 3).iter().zip(PASCAL3.iter()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_pivot_is_patched() {
        let a = [0.0_f32, 0.0, 0.0, 1.0];
        let mut l = [0.0_f32; 4];
        chol(&a, &mut l, 2).unwrap();
        assert_eq!(l[0], f32::EPSILON);
        assert!(l.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn update_matches_refactorization() {
        let x = [0.5, -1.0, 2.0];
        let mut updated = PASCAL3;
        for i in 0..3 {
            for j in 0..3 {
                updated[i * 3 + j] += x[i] * x[j];
            }
        }
        let mut expected = [0.0; 9];
        chol(&updated, &mut expected, 3).unwrap();

        let mut l = [0.0; 9];
        chol(&PASCAL3, &mut l, 3).unwrap();
        cholupdate(&mut l, &x, 3, RankOne::Update).unwrap();
        assert_eq!(x, [0.5, -1.0, 2.0]);
        for (a, b) in l.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-10, "{} vs {}", a, b);
        }

        // Downdate by the same vector restores the original factor
        cholupdate(&mut l, &x, 3, RankOne::Downdate).unwrap();
        let mut original = [0.0; 9];
        chol(&PASCAL3, &mut original, 3).unwrap();
        for (a, b) in l.iter().zip(original.iter()) {
            assert!((a - b).abs() < 1e-10, "{} vs {}", a, b);
        }
    }

    #[test]
    fn downdate_to_indefinite_fails() {
        let mut l = [1.0, 0.0, 0.0, 1.0];
        let x = [2.0, 0.0];
        assert_eq!(
            cholupdate(&mut l, &x, 2, RankOne::Downdate),
            Err(LinalgError::NotPositiveDefinite)
        );
    }

    #[test]
    fn solve_spd_system() {
        // pascal(3) x = [3, 6, 10] -> x = [1, 1, 1]
        let b = [3.0, 6.0, 10.0];
        let mut x = [0.0; 3];
        linsolve_chol(&PASCAL3, &mut x, &b, 3).unwrap();
        for v in x {
            assert!((v - 1.0).abs() < 1e-12);
        }
    }
}
