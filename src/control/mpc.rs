use alloc::vec;
use alloc::vec::Vec;

use super::{check_vec, ControlError};
use crate::matrix::{insert, mul, mul_new, tran};
use crate::optim::{linprog, LinprogResult, Objective};
use crate::traits::FloatScalar;

/// Extended observability matrix `PHI = [C A; C A²; …; C A^H]`,
/// `(horizon·ydim) × adim`.
fn observability<T: FloatScalar>(
    a: &[T],
    c: &[T],
    adim: usize,
    ydim: usize,
    horizon: usize,
) -> Result<Vec<T>, ControlError> {
    let block = ydim * adim;
    let mut phi = vec![T::zero(); horizon * block];
    let mut a_pow = a[..adim * adim].to_vec();
    for k in 0..horizon {
        mul(&mut phi[k * block..(k + 1) * block], c, &a_pow, ydim, adim, adim, adim)?;
        a_pow = mul_new(a, &a_pow, adim, adim, adim)?;
    }
    Ok(phi)
}

/// Lower block-Toeplitz impulse-response matrix, `(horizon·ydim) ×
/// (horizon·rdim)`. Block `(k, i)` is `C A^(k-i) B` for `i ≤ k`.
fn toeplitz<T: FloatScalar>(
    phi: &[T],
    b: &[T],
    c: &[T],
    adim: usize,
    ydim: usize,
    rdim: usize,
    horizon: usize,
) -> Result<Vec<T>, ControlError> {
    let block = ydim * rdim;
    // markov[0] = C B, markov[k] = C A^k B = PHI_(k-1) B
    let mut markov = vec![T::zero(); horizon * block];
    mul(&mut markov[..block], c, b, ydim, adim, adim, rdim)?;
    for k in 1..horizon {
        let phi_k = &phi[(k - 1) * ydim * adim..k * ydim * adim];
        mul(&mut markov[k * block..(k + 1) * block], phi_k, b, ydim, adim, adim, rdim)?;
    }

    let (rows, cols) = (horizon * ydim, horizon * rdim);
    let mut gamma = vec![T::zero(); rows * cols];
    for k in 0..horizon {
        for i in 0..=k {
            let m = &markov[(k - i) * block..(k - i + 1) * block];
            insert(&mut gamma, m, ydim, rdim, rows, cols, k * ydim, i * rdim)?;
        }
    }
    Ok(gamma)
}

/// Model predictive control by linear programming.
///
/// Over a prediction horizon `H` the outputs are `Y = PHI x + Γ U`, with
/// `PHI` the extended observability matrix and `Γ` the lower block-Toeplitz
/// matrix of `C A^i B`. With `d = R - PHI x` (the reference `r` repeated
/// `H` times), the input sequence is the simplex solution of
///
/// ```text
/// max  cᵀ U    subject to   (ΓᵀΓ) U ≤ Γᵀ d,   U ≥ 0
/// ```
///
/// with `c = (ΓᵀΓ)ᵀ d`. The program is square in `H·rdim`; `d` is read
/// over its first `H·rdim` entries (zero-extended when `ydim < rdim`).
///
/// `u` receives the first input block when `has_integration` is set (the
/// plant integrates, so only the next move matters) and the last block
/// otherwise (the steady-state input).
///
/// Only non-negative inputs are representable.
///
/// # Errors
///
/// [`ControlError::InvalidDimensions`] if `horizon`, `ydim` or `rdim` is
/// zero or a buffer is short, [`ControlError::Linalg`] from the matrix
/// products.
///
/// ```
/// use ctrlkit::control::mpc;
/// use ctrlkit::optim::LinprogStatus;
///
/// // x⁺ = 0.5 x + u, y = x, drive y to 2 from rest
/// let mut u = [0.0_f64];
/// let res = mpc(&[0.5], &[1.0], &[1.0], &[0.0], &mut u, &[2.0], 1, 1, 1, 1, 10, true).unwrap();
/// assert_eq!(res.status, LinprogStatus::Optimal);
/// assert!((u[0] - 2.0).abs() < 1e-12);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn mpc<T: FloatScalar>(
    a: &[T],
    b: &[T],
    c: &[T],
    x: &[T],
    u: &mut [T],
    r: &[T],
    adim: usize,
    ydim: usize,
    rdim: usize,
    horizon: usize,
    iteration_limit: usize,
    has_integration: bool,
) -> Result<LinprogResult<T>, ControlError> {
    if horizon == 0 || ydim == 0 || rdim == 0 || adim == 0 {
        return Err(ControlError::InvalidDimensions);
    }
    check_vec(a, adim * adim)?;
    check_vec(b, adim * rdim)?;
    check_vec(c, ydim * adim)?;
    check_vec(x, adim)?;
    check_vec(u, rdim)?;
    check_vec(r, ydim)?;

    let ny = horizon * ydim;
    let nu = horizon * rdim;

    let phi = observability(a, c, adim, ydim, horizon)?;
    let gamma = toeplitz(&phi, b, c, adim, ydim, rdim, horizon)?;

    // d = R - PHI x
    let mut d = vec![T::zero(); ny];
    mul(&mut d, &phi, x, ny, adim, adim, 1)?;
    for (i, di) in d.iter_mut().enumerate() {
        *di = r[i % ydim] - *di;
    }

    let mut gamma_t = vec![T::zero(); nu * ny];
    tran(&mut gamma_t, &gamma, ny, nu)?;

    let mut rhs = vec![T::zero(); nu];
    mul(&mut rhs, &gamma_t, &d, nu, ny, ny, 1)?;

    let gtg = mul_new(&gamma_t, &gamma, nu, ny, nu)?;
    let mut gtg_t = vec![T::zero(); nu * nu];
    tran(&mut gtg_t, &gtg, nu, nu)?;

    let mut w = vec![T::zero(); nu];
    for (wi, &di) in w.iter_mut().zip(d.iter()) {
        *wi = di;
    }
    let mut cost = vec![T::zero(); nu];
    mul(&mut cost, &gtg_t, &w, nu, nu, nu, 1)?;

    let mut inputs = vec![T::zero(); nu];
    let res = linprog(
        &cost,
        &gtg,
        &rhs,
        &mut inputs,
        nu,
        nu,
        Objective::Maximize,
        iteration_limit,
    )?;

    let start = if has_integration { 0 } else { nu - rdim };
    u[..rdim].copy_from_slice(&inputs[start..start + rdim]);
    Ok(res)
}
