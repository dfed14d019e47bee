use super::EstimateError;
use crate::traits::FloatScalar;

/// First-order low-pass `K ẋ = -x + y`, forward Euler, in place.
///
/// The state starts at the first sample, so a constant signal passes
/// through unchanged.
fn low_pass<T: FloatScalar>(y: &mut [T], h: T, k: T) {
    let mut x = y[0];
    for yi in y.iter_mut() {
        x = x + h * (*yi - x) / k;
        *yi = x;
    }
}

/// Zero-phase smoothing by a forward and a backward low-pass pass.
///
/// `y` is filtered by the first-order lag with time constant `k` (forward
/// Euler at the step `t[1] - t[0]`), reversed, filtered again and reversed
/// back into `y_out`. The phase lag of the two passes cancels. `t` is
/// assumed uniformly spaced and `k` should be well above the step for the
/// Euler recursion to stay stable.
///
/// # Errors
///
/// [`EstimateError::InvalidDimensions`] with fewer than two samples or a
/// short `t` / `y_out`.
///
/// ```
/// use ctrlkit::estimate::filtfilt;
///
/// let t: Vec<f64> = (0..100).map(|i| i as f64 * 0.01).collect();
/// // Ramp with a ±0.05 alternating ripple
/// let y: Vec<f64> = (0..100)
///     .map(|i| t[i] + if i % 2 == 0 { 0.05 } else { -0.05 })
///     .collect();
/// let mut smooth = vec![0.0; 100];
/// filtfilt(&mut smooth, &y, &t, 0.1).unwrap();
/// assert!((smooth[50] - t[50]).abs() < 0.02);
/// ```
pub fn filtfilt<T: FloatScalar>(
    y_out: &mut [T],
    y: &[T],
    t: &[T],
    k: T,
) -> Result<(), EstimateError> {
    let l = y.len();
    if l < 2 || t.len() < l || y_out.len() < l {
        return Err(EstimateError::InvalidDimensions);
    }
    let h = t[1] - t[0];
    let out = &mut y_out[..l];
    out.copy_from_slice(y);

    low_pass(out, h, k);
    out.reverse();
    low_pass(out, h, k);
    out.reverse();
    Ok(())
}
