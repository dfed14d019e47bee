use alloc::vec;

use super::{check_vec, ControlError};
use crate::matrix::mul;
use crate::traits::FloatScalar;

/// Integrator policy for [`lqi`].
///
/// The two conditional policies only integrate negative errors. With the
/// loop convention `err = y - r` this means "integrate while the output is
/// below the reference". A non-negative error either clears the integrator
/// state ([`ResetOnNonNegative`](AntiWindup::ResetOnNonNegative)) or leaves
/// it untouched ([`HoldOnNonNegative`](AntiWindup::HoldOnNonNegative)).
/// These semantics are kept as-is for compatibility with existing tunings;
/// they are asymmetric and will not unwind an integrator that has saturated
/// on the positive side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AntiWindup {
    /// Integrate every step.
    Always,
    /// Integrate while `err < 0`, otherwise zero that integrator entry.
    ResetOnNonNegative,
    /// Integrate while `err < 0`, otherwise hold that integrator entry.
    HoldOnNonNegative,
    /// Unrecognized selector; integrates every step like [`Always`](AntiWindup::Always).
    Other(u8),
}

impl From<u8> for AntiWindup {
    fn from(v: u8) -> Self {
        match v {
            0 => AntiWindup::Always,
            1 => AntiWindup::ResetOnNonNegative,
            2 => AntiWindup::HoldOnNonNegative,
            other => AntiWindup::Other(other),
        }
    }
}

/// Linear-quadratic-integral control law.
///
/// Integrates `err` into `xi` under the chosen [`AntiWindup`] policy, then
/// computes
///
/// ```text
/// u = -(L x + Li xi)
/// ```
///
/// `L` is `rdim × adim`, `Li` is `rdim × ydim`; `xi` and `err` hold `rdim`
/// entries and must have `rdim == ydim` for the integral to line up.
///
/// ```
/// use ctrlkit::control::{lqi, AntiWindup};
///
/// let mut u = [0.0_f64];
/// let mut xi = [0.0_f64];
/// lqi(&mut u, &[2.0], &[1.0], &[0.5], &mut xi, &[-4.0], 1, 1, 1, AntiWindup::Always).unwrap();
/// assert_eq!(xi, [-4.0]);
/// assert_eq!(u, [0.0]); // -(2·1 + 0.5·(-4))
/// ```
#[allow(clippy::too_many_arguments)]
pub fn lqi<T: FloatScalar>(
    u: &mut [T],
    l: &[T],
    x: &[T],
    li: &[T],
    xi: &mut [T],
    err: &[T],
    adim: usize,
    ydim: usize,
    rdim: usize,
    anti_windup: AntiWindup,
) -> Result<(), ControlError> {
    check_vec(u, rdim)?;
    check_vec(x, adim)?;
    check_vec(xi, ydim.max(rdim))?;
    check_vec(err, rdim)?;

    let mut lx = vec![T::zero(); rdim];
    mul(&mut lx, l, x, rdim, adim, adim, 1)?;

    for (xii, &e) in xi[..rdim].iter_mut().zip(err) {
        match anti_windup {
            AntiWindup::ResetOnNonNegative => {
                if e < T::zero() {
                    *xii = *xii + e;
                } else {
                    *xii = T::zero();
                }
            }
            AntiWindup::HoldOnNonNegative => {
                if e < T::zero() {
                    *xii = *xii + e;
                }
            }
            AntiWindup::Always | AntiWindup::Other(_) => *xii = *xii + e,
        }
    }

    let mut lixi = vec![T::zero(); rdim];
    mul(&mut lixi, li, xi, rdim, ydim, ydim, 1)?;

    for i in 0..rdim {
        u[i] = -(lx[i] + lixi[i]);
    }
    Ok(())
}
