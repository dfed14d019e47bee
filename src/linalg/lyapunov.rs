use alloc::vec;

use crate::linalg::{linsolve_lup, LinalgError};
use crate::matrix::check_len;
use crate::traits::FloatScalar;

/// Solve the discrete Lyapunov equation `A P Aᵀ - P + Q = 0` for `P`.
///
/// The equation is vectorized row-major into the `n² × n²` system
/// `(I - A ⊗ A) vec(P) = vec(Q)` and solved by LU, so this is meant for
/// small state dimensions.
///
/// # Errors
///
/// [`LinalgError::Singular`] if some pair of eigenvalues of `A`
/// satisfies `λᵢ λⱼ = 1`.
pub fn dlyap<T: FloatScalar>(a: &[T], p: &mut [T], q: &[T], n: usize) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    check_len(p, n, n)?;
    check_len(q, n, n)?;

    let nn = n * n;
    let mut m = vec![T::zero(); nn * nn];
    for row in 0..nn {
        let (i, k) = (row / n, row % n);
        for col in 0..nn {
            let (j, l) = (col / n, col % n);
            let kron = a[i * n + j] * a[k * n + l];
            let eye = if row == col { T::one() } else { T::zero() };
            m[row * nn + col] = eye - kron;
        }
    }
    linsolve_lup(&m, p, q, nn)
}
