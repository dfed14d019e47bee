use alloc::vec;

use super::{check_vec, ControlError};
use crate::traits::FloatScalar;

/// State-space model in observable canonical form from polynomial
/// parameters.
///
/// `theta` is laid out as estimated by [`Rls`](crate::sysid::Rls):
/// `[a₁ … a_np, b₁ … b_nz, c₁ … c_nze]` for
///
/// ```text
/// A(q) y(t) = B(q) u(t) + C(q) e(t)
/// ```
///
/// The realization is the innovations form
///
/// ```text
/// x(t+1) = A x(t) + B u(t) + K e(t)
/// y(t)   = C x(t) + e(t)
/// ```
///
/// with `A[i][0] = -aᵢ₊₁`, ones on the superdiagonal, `B[i] = bᵢ₊₁`,
/// `C = [1 0 … 0]` and `K[i] = cᵢ₊₁ - aᵢ₊₁`. Polynomials shorter than
/// `adim` are zero-padded.
///
/// With `integral_action` the denominator gains a pole at `z = 1`, that
/// is `A(q)` becomes `A(q)(1 - q⁻¹)`, and every output is one state larger:
/// `a` is `(adim+1)²`, `b`, `c` and `k` hold `adim + 1` entries.
///
/// # Errors
///
/// [`ControlError::InvalidDimensions`] if `adim` is zero or smaller than
/// any of `np`, `nz`, `nze`, or a buffer is short.
///
/// ```
/// use ctrlkit::control::theta2ss;
///
/// // y(t) = 0.7 y(t-1) + 0.5 u(t-1) + e(t)
/// let (mut a, mut b, mut c, mut k) = ([0.0_f64], [0.0], [0.0], [0.0]);
/// theta2ss(&mut a, &mut b, &mut c, &mut k, &[-0.7, 0.5], 1, 1, 1, 0, false).unwrap();
/// assert_eq!((a, b, c, k), ([0.7], [0.5], [1.0], [0.7]));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn theta2ss<T: FloatScalar>(
    a: &mut [T],
    b: &mut [T],
    c: &mut [T],
    k: &mut [T],
    theta: &[T],
    adim: usize,
    np: usize,
    nz: usize,
    nze: usize,
    integral_action: bool,
) -> Result<(), ControlError> {
    if adim == 0 || adim < np.max(nz).max(nze) {
        return Err(ControlError::InvalidDimensions);
    }
    check_vec(theta, np + nz + nze)?;
    let n = if integral_action { adim + 1 } else { adim };
    check_vec(a, n * n)?;
    check_vec(b, n)?;
    check_vec(c, n)?;
    check_vec(k, n)?;

    let mut den = vec![T::zero(); n];
    let mut num = vec![T::zero(); n];
    let mut noise = vec![T::zero(); n];
    den[..np].copy_from_slice(&theta[..np]);
    num[..nz].copy_from_slice(&theta[np..np + nz]);
    noise[..nze].copy_from_slice(&theta[np + nz..np + nz + nze]);

    if integral_action {
        // Multiply 1 + a₁ q⁻¹ + … by 1 - q⁻¹
        let mut prev = T::one();
        for d in den.iter_mut() {
            let cur = *d;
            *d = cur - prev;
            prev = cur;
        }
    }

    a[..n * n].fill(T::zero());
    for i in 0..n {
        a[i * n] = -den[i];
        if i + 1 < n {
            a[i * n + i + 1] = T::one();
        }
    }
    b[..n].copy_from_slice(&num);
    c[..n].fill(T::zero());
    c[0] = T::one();
    for i in 0..n {
        k[i] = noise[i] - den[i];
    }
    Ok(())
}
