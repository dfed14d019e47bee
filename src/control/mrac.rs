use alloc::vec::Vec;

use super::{check_vec, ControlError};
use crate::stats::constrain;
use crate::traits::FloatScalar;

/// Model-reference adaptive control, MIT-rule style, one channel per entry.
///
/// With model error `e = y - r`:
///
/// ```text
/// I1 ← clamp(I1 - gain·r·e, ±limit)
/// I2 ← clamp(I2 + gain·y·e, ±limit)
/// u  = r·I1 - y·I2
/// ```
///
/// All products are element-wise over `rdim` channels. The adaptive gains
/// `i1` and `i2` are the controller's state and persist across calls.
///
/// ```
/// use ctrlkit::control::mrac;
///
/// let (mut u, mut i1, mut i2) = ([0.0_f64], [0.0], [0.0]);
/// mrac(10.0, 0.5, &[1.0], &mut u, &[2.0], &mut i1, &mut i2, 1).unwrap();
/// // e = -1, I1 = 1, I2 = -0.5, u = 2·1 + 1·0.5
/// assert_eq!((i1[0], i2[0], u[0]), (1.0, -0.5, 2.5));
/// ```
#[allow(clippy::too_many_arguments)]
pub fn mrac<T: FloatScalar>(
    limit: T,
    gain: T,
    y: &[T],
    u: &mut [T],
    r: &[T],
    i1: &mut [T],
    i2: &mut [T],
    rdim: usize,
) -> Result<(), ControlError> {
    check_vec(y, rdim)?;
    check_vec(u, rdim)?;
    check_vec(r, rdim)?;
    check_vec(i1, rdim)?;
    check_vec(i2, rdim)?;

    let e: Vec<T> = y[..rdim].iter().zip(r).map(|(&yi, &ri)| yi - ri).collect();

    for i in 0..rdim {
        i1[i] = i1[i] - gain * r[i] * e[i];
        i2[i] = i2[i] + gain * y[i] * e[i];
    }
    let staged = i1[..rdim].to_vec();
    constrain(&mut i1[..rdim], &staged, -limit, limit);
    let staged = i2[..rdim].to_vec();
    constrain(&mut i2[..rdim], &staged, -limit, limit);

    for i in 0..rdim {
        u[i] = r[i] * i1[i] - y[i] * i2[i];
    }
    Ok(())
}
