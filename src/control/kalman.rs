use alloc::vec;

use super::{check_vec, ControlError};
use crate::matrix::mul;
use crate::traits::FloatScalar;

/// One step of a steady-state Kalman observer.
///
/// ```text
/// xout = A x + B u + K (y - C x)
/// ```
///
/// `A` is `adim × adim`, `B` is `adim × rdim`, `K` is `adim × ydim` and
/// `C` is `ydim × adim`. `x` and `xout` hold `adim` entries, `u` holds
/// `rdim` and `y` holds `ydim`.
///
/// # Errors
///
/// [`ControlError::InvalidDimensions`] on a short vector argument, or
/// [`ControlError::Linalg`] if a matrix buffer does not match its shape.
#[allow(clippy::too_many_arguments)]
pub fn kalman<T: FloatScalar>(
    xout: &mut [T],
    a: &[T],
    x: &[T],
    b: &[T],
    u: &[T],
    k: &[T],
    y: &[T],
    c: &[T],
    adim: usize,
    ydim: usize,
    rdim: usize,
) -> Result<(), ControlError> {
    check_vec(xout, adim)?;
    check_vec(x, adim)?;
    check_vec(u, rdim)?;
    check_vec(y, ydim)?;

    let mut ax = vec![T::zero(); adim];
    let mut bu = vec![T::zero(); adim];
    let mut innovation = vec![T::zero(); ydim];
    let mut correction = vec![T::zero(); adim];

    mul(&mut ax, a, x, adim, adim, adim, 1)?;
    mul(&mut bu, b, u, adim, rdim, rdim, 1)?;
    mul(&mut innovation, c, x, ydim, adim, adim, 1)?;
    for (e, &yi) in innovation.iter_mut().zip(y) {
        *e = yi - *e;
    }
    mul(&mut correction, k, &innovation, adim, ydim, ydim, 1)?;

    for i in 0..adim {
        xout[i] = ax[i] + bu[i] + correction[i];
    }
    Ok(())
}

/// [`kalman`] that advances the state `x` in place.
#[allow(clippy::too_many_arguments)]
pub fn kalman_in_place<T: FloatScalar>(
    a: &[T],
    x: &mut [T],
    b: &[T],
    u: &[T],
    k: &[T],
    y: &[T],
    c: &[T],
    adim: usize,
    ydim: usize,
    rdim: usize,
) -> Result<(), ControlError> {
    check_vec(x, adim)?;
    let prior = x[..adim].to_vec();
    kalman(x, a, &prior, b, u, k, y, c, adim, ydim, rdim)
}
