use alloc::vec;

use rand::{Rng, RngCore};

use crate::linalg::LinalgError;
use crate::traits::FloatScalar;

/// Iteration cap for [`nonlinsolve`].
pub const MAX_NONLINSOLVE_ITERATIONS: usize = 10_000;

fn residual_norm<T: FloatScalar>(dx: &[T]) -> T {
    dx.iter().fold(T::zero(), |acc, &v| acc.hypot(v))
}

/// Solve the square nonlinear system `f(x, b) = 0` from the guess in `x`.
///
/// `system(dx, b, x)` writes the `n` residuals at `x`. Each iteration tries
/// `x - step · dx` and keeps it only if the 2-norm of the residual drops;
/// otherwise the step is halved. Accepted steps double the step again, up
/// to `alpha`. Residual rows that are identically zero leave their
/// component of `x` where it started.
///
/// Returns the residual norm once it is at or below `tol`.
///
/// # Errors
///
/// - [`LinalgError::DimensionMismatch`] if `b` or `x` is shorter than `n`.
/// - [`LinalgError::ConvergenceFailure`] if the step shrinks to nothing or
///   [`MAX_NONLINSOLVE_ITERATIONS`] pass first. `x` then holds the best
///   point found.
///
/// ```
/// use ctrlkit::linalg::nonlinsolve;
///
/// // x² = 2
/// let square = |dx: &mut [f64], b: &[f64], x: &[f64]| dx[0] = x[0] * x[0] - b[0];
/// let mut x = [1.0_f64];
/// nonlinsolve(square, &[2.0], &mut x, 1, 0.1, 1e-12).unwrap();
/// assert!((x[0] - 2.0_f64.sqrt()).abs() < 1e-10);
/// ```
pub fn nonlinsolve<T, F>(
    mut system: F,
    b: &[T],
    x: &mut [T],
    n: usize,
    alpha: T,
    tol: T,
) -> Result<T, LinalgError>
where
    T: FloatScalar,
    F: FnMut(&mut [T], &[T], &[T]),
{
    if n == 0 {
        return Err(LinalgError::InvalidDimensions);
    }
    if b.len() < n || x.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }

    let mut dx = vec![T::zero(); n];
    let mut trial = vec![T::zero(); n];
    let mut dx_trial = vec![T::zero(); n];
    system(&mut dx[..], b, &x[..n]);
    let mut r = residual_norm(&dx);
    let floor = alpha * T::epsilon();
    let mut step = alpha;

    for _ in 0..MAX_NONLINSOLVE_ITERATIONS {
        if r <= tol {
            log::debug!("nonlinsolve: converged with residual {:?}", r);
            return Ok(r);
        }
        for i in 0..n {
            trial[i] = x[i] - step * dx[i];
        }
        system(&mut dx_trial[..], b, &trial[..]);
        let r_trial = residual_norm(&dx_trial);

        // NaN compares false and is rejected here too
        if r_trial < r {
            x[..n].copy_from_slice(&trial);
            core::mem::swap(&mut dx, &mut dx_trial);
            r = r_trial;
            step = (step + step).min(alpha);
        } else {
            step = step / T::lit(2.0);
            if step <= floor {
                break;
            }
        }
    }

    log::warn!("nonlinsolve: stalled with residual {:?}", r);
    Err(LinalgError::ConvergenceFailure)
}

/// [`nonlinsolve`] from random initial guesses.
///
/// Each attempt draws every component of `x` uniformly from
/// `[min_value, max_value)` and runs [`nonlinsolve`]. Up to `attempts`
/// guesses are tried; the first that converges wins.
///
/// # Errors
///
/// As [`nonlinsolve`]; [`LinalgError::ConvergenceFailure`] once every
/// attempt has stalled. `attempts == 0` gives
/// [`LinalgError::InvalidDimensions`].
#[allow(clippy::too_many_arguments)]
pub fn nonlinsolve_random<T, F, R>(
    mut system: F,
    b: &[T],
    x: &mut [T],
    n: usize,
    alpha: T,
    tol: T,
    min_value: T,
    max_value: T,
    rng: &mut R,
    attempts: usize,
) -> Result<T, LinalgError>
where
    T: FloatScalar,
    F: FnMut(&mut [T], &[T], &[T]),
    R: RngCore,
{
    if attempts == 0 {
        return Err(LinalgError::InvalidDimensions);
    }
    if x.len() < n {
        return Err(LinalgError::DimensionMismatch);
    }

    let span = max_value - min_value;
    for attempt in 0..attempts {
        for v in x[..n].iter_mut() {
            *v = min_value + span * T::lit(rng.gen::<f64>());
        }
        match nonlinsolve(&mut system, b, x, n, alpha, tol) {
            Ok(r) => return Ok(r),
            Err(LinalgError::ConvergenceFailure) => {
                log::debug!("nonlinsolve_random: attempt {} stalled, redrawing", attempt);
            }
            Err(e) => return Err(e),
        }
    }
    Err(LinalgError::ConvergenceFailure)
}
