use alloc::vec;

use crate::linalg::LinalgError;
use crate::matrix::{check_len, identity};
use crate::traits::FloatScalar;

/// Sweep cap for [`eig_sym`].
pub const MAX_JACOBI_SWEEPS: usize = 50;

/// Eigen-decomposition of a symmetric `n × n` matrix by cyclic Jacobi
/// rotations.
///
/// `ev` receives the eigenvectors as columns and `d` the eigenvalues in
/// the order they appear on the rotated diagonal (not sorted). Only the
/// symmetric part of `a` is meaningful.
///
/// # Errors
///
/// [`LinalgError::ConvergenceFailure`] if off-diagonal mass remains after
/// [`MAX_JACOBI_SWEEPS`] sweeps.
///
/// ```
/// use ctrlkit::linalg::eig_sym;
///
/// let a = [2.0_f64, 1.0, 1.0, 2.0];
/// let (mut ev, mut d) = ([0.0; 4], [0.0; 2]);
/// eig_sym(&a, &mut ev, &mut d, 2).unwrap();
/// let (lo, hi) = if d[0] < d[1] { (d[0], d[1]) } else { (d[1], d[0]) };
/// assert!((lo - 1.0).abs() < 1e-12 && (hi - 3.0).abs() < 1e-12);
/// ```
pub fn eig_sym<T: FloatScalar>(
    a: &[T],
    ev: &mut [T],
    d: &mut [T],
    n: usize,
) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    check_len(ev, n, n)?;
    if d.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }

    let mut w = a[..n * n].to_vec();
    ev[..n * n].copy_from_slice(&identity::<T>(n));

    let mut frob = T::zero();
    for &x in w.iter() {
        frob = frob + x * x;
    }
    let threshold = T::epsilon() * T::epsilon() * frob;

    let mut converged = false;
    for _ in 0..MAX_JACOBI_SWEEPS {
        let mut off = T::zero();
        for i in 0..n {
            for j in (i + 1)..n {
                off = off + w[i * n + j] * w[i * n + j];
            }
        }
        if off <= threshold {
            converged = true;
            break;
        }

        for p in 0..n {
            for q in (p + 1)..n {
                let apq = w[p * n + q];
                let scale = w[p * n + p].abs() + w[q * n + q].abs();
                if apq.abs() <= T::epsilon() * scale * T::lit(0.5) {
                    w[p * n + q] = T::zero();
                    w[q * n + p] = T::zero();
                    continue;
                }
                let theta = (w[q * n + q] - w[p * n + p]) / (T::lit(2.0) * apq);
                let sign = if theta < T::zero() { -T::one() } else { T::one() };
                let t = sign / (theta.abs() + (theta * theta + T::one()).sqrt());
                let c = T::one() / (t * t + T::one()).sqrt();
                let s = t * c;
                rotate(&mut w, ev, n, p, q, c, s);
            }
        }
    }

    if !converged {
        log::warn!("eig_sym: off-diagonal mass remains after {} sweeps", MAX_JACOBI_SWEEPS);
        return Err(LinalgError::ConvergenceFailure);
    }

    for i in 0..n {
        d[i] = w[i * n + i];
    }
    Ok(())
}

/// Apply the Jacobi rotation `Jᵀ W J` on the `(p, q)` plane and accumulate
/// `V ← V J`.
fn rotate<T: FloatScalar>(w: &mut [T], v: &mut [T], n: usize, p: usize, q: usize, c: T, s: T) {
    for k in 0..n {
        let wkp = w[k * n + p];
        let wkq = w[k * n + q];
        w[k * n + p] = c * wkp - s * wkq;
        w[k * n + q] = s * wkp + c * wkq;
    }
    for k in 0..n {
        let wpk = w[p * n + k];
        let wqk = w[q * n + k];
        w[p * n + k] = c * wpk - s * wqk;
        w[q * n + k] = s * wpk + c * wqk;
    }
    for k in 0..n {
        let vkp = v[k * n + p];
        let vkq = v[k * n + q];
        v[k * n + p] = c * vkp - s * vkq;
        v[k * n + q] = s * vkp + c * vkq;
    }
}

/// [`eig_sym`] that overwrites `a` with the eigenvectors.
pub fn eig_sym_in_place<T: FloatScalar>(
    a: &mut [T],
    d: &mut [T],
    n: usize,
) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    let mut ev = vec![T::zero(); n * n];
    eig_sym(a, &mut ev, d, n)?;
    a[..n * n].copy_from_slice(&ev);
    Ok(())
}
