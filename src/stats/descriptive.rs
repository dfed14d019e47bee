use crate::traits::FloatScalar;

/// Arithmetic mean. NaN for an empty slice.
pub fn mean<T: FloatScalar>(x: &[T]) -> T {
    let sum = x.iter().fold(T::zero(), |s, &v| s + v);
    sum / T::from_count(x.len())
}

/// Sample standard deviation with the `n − 1` normalization.
///
/// NaN for fewer than two samples.
pub fn stddev<T: FloatScalar>(x: &[T]) -> T {
    if x.len() < 2 {
        return T::nan();
    }
    let mu = mean(x);
    let ss = x.iter().fold(T::zero(), |s, &v| s + (v - mu) * (v - mu));
    (ss / T::from_count(x.len() - 1)).sqrt()
}

/// `1`, `-1` or `0` by the sign of `x`. Both zeros map to `0`.
pub fn sign<T: FloatScalar>(x: T) -> T {
    if x > T::zero() {
        T::one()
    } else if x < T::zero() {
        -T::one()
    } else {
        T::zero()
    }
}

/// Clamp a scalar into `[lower, upper]`.
pub fn saturation<T: FloatScalar>(x: T, lower: T, upper: T) -> T {
    if x > upper {
        upper
    } else if x < lower {
        lower
    } else {
        x
    }
}

/// Element-wise [`saturation`] of `input` into `out`.
///
/// Processes `min(out.len(), input.len())` elements.
pub fn constrain<T: FloatScalar>(out: &mut [T], input: &[T], lower: T, upper: T) {
    for (o, &v) in out.iter_mut().zip(input.iter()) {
        *o = saturation(v, lower, upper);
    }
}
