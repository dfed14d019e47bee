use alloc::vec;

use super::ControlError;
use crate::linalg::eig;
use crate::traits::FloatScalar;

/// Discrete-time stability test.
///
/// Returns `true` when every eigenvalue of the `n × n` matrix `A` lies in
/// the closed unit disc, `|λ| ≤ 1`. Poles exactly on the circle count as
/// stable.
///
/// # Errors
///
/// [`ControlError::Linalg`] if the eigenvalue iteration fails.
///
/// ```
/// use ctrlkit::control::is_stable;
///
/// assert!(!is_stable(&[1.0_f64, 2.0, 3.0, 4.0], 2).unwrap());
/// assert!(is_stable(&[1.0_f64, 0.0, -1.0, -1.0], 2).unwrap());
/// ```
pub fn is_stable<T: FloatScalar>(a: &[T], n: usize) -> Result<bool, ControlError> {
    let mut wr = vec![T::zero(); n];
    let mut wi = vec![T::zero(); n];
    eig(a, &mut wr, &mut wi, n)?;
    Ok(wr.iter().zip(wi.iter()).all(|(&re, &im)| re.hypot(im) <= T::one()))
}
