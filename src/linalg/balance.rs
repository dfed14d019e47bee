use crate::linalg::LinalgError;
use crate::matrix::check_len;
use crate::traits::FloatScalar;

/// Sweep cap for [`balance`].
pub const MAX_BALANCE_SWEEPS: usize = 100;

/// Balance a square matrix in place by radix-2 diagonal similarity.
///
/// Row `i` is scaled by `1/f` and column `i` by `f`, with `f` a power of
/// two chosen so the off-diagonal row and column norms become comparable.
/// A scaling is only applied when it shrinks `c + r` below `0.95` of its
/// previous value. Sweeps repeat until nothing changes.
///
/// Eigenvalues are unchanged; rounding in the later QR steps improves.
///
/// # Errors
///
/// [`LinalgError::ConvergenceFailure`] if the matrix is still changing
/// after [`MAX_BALANCE_SWEEPS`] sweeps.
///
/// ```
/// use ctrlkit::linalg::balance;
///
/// let mut a = [-0.1_f32, 10.0, -1.0, -5.0];
/// balance(&mut a, 2).unwrap();
/// assert_eq!(a, [-0.1, 2.5, -4.0, -5.0]);
/// ```
pub fn balance<T: FloatScalar>(a: &mut [T], n: usize) -> Result<(), LinalgError> {
    check_len(a, n, n)?;
    let radix = T::lit(2.0);
    let sqrdx = radix * radix;
    let criterion = T::lit(0.95);

    for _ in 0..MAX_BALANCE_SWEEPS {
        let mut done = true;
        for i in 0..n {
            let mut c = T::zero();
            let mut r = T::zero();
            for j in 0..n {
                if j != i {
                    c = c + a[j * n + i].abs();
                    r = r + a[i * n + j].abs();
                }
            }
            if c == T::zero() || r == T::zero() {
                continue;
            }

            let s = c + r;
            let mut f = T::one();
            let mut g = r / radix;
            while c < g {
                f = f * radix;
                c = c * sqrdx;
            }
            g = r * radix;
            while c > g {
                f = f / radix;
                c = c / sqrdx;
            }

            if (c + r) / f < criterion * s {
                done = false;
                let inv_f = T::one() / f;
                for j in 0..n {
                    a[i * n + j] = a[i * n + j] * inv_f;
                }
                for j in 0..n {
                    a[j * n + i] = a[j * n + i] * f;
                }
            }
        }
        if done {
            return Ok(());
        }
    }

    log::warn!("balance: still rescaling after {} sweeps", MAX_BALANCE_SWEEPS);
    Err(LinalgError::ConvergenceFailure)
}
