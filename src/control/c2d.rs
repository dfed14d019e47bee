use alloc::vec;

use super::{check_vec, ControlError};
use crate::linalg::expm_in_place;
use crate::traits::FloatScalar;

/// Zero-order-hold discretization of a continuous plant.
///
/// Forms the augmented matrix
///
/// ```text
/// M = [ A·Ts  B·Ts ]
///     [  0     0   ]
/// ```
///
/// of size `(adim + rdim)²`, takes `expm(M)` and reads `Ad` from the
/// top-left `adim × adim` block and `Bd` from the top-right `adim × rdim`
/// block.
pub fn c2d<T: FloatScalar>(
    ad: &mut [T],
    bd: &mut [T],
    a: &[T],
    b: &[T],
    adim: usize,
    rdim: usize,
    ts: T,
) -> Result<(), ControlError> {
    if adim == 0 {
        return Err(ControlError::InvalidDimensions);
    }
    check_vec(a, adim * adim)?;
    check_vec(b, adim * rdim)?;
    check_vec(ad, adim * adim)?;
    check_vec(bd, adim * rdim)?;

    let n = adim + rdim;
    let mut m = vec![T::zero(); n * n];
    for i in 0..adim {
        for j in 0..adim {
            m[i * n + j] = a[i * adim + j] * ts;
        }
        for j in 0..rdim {
            m[i * n + adim + j] = b[i * rdim + j] * ts;
        }
    }

    expm_in_place(&mut m, n)?;

    for i in 0..adim {
        ad[i * adim..(i + 1) * adim].copy_from_slice(&m[i * n..i * n + adim]);
        bd[i * rdim..(i + 1) * rdim].copy_from_slice(&m[i * n + adim..(i + 1) * n]);
    }
    Ok(())
}
