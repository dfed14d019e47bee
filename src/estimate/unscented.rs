//! Sigma-point machinery shared by the square-root unscented filters.
//!
//! Sigma-point sets are stored as `l × (2l + 1)` row-major matrices, one
//! point per column: column 0 is the centre, columns `1..=l` the positive
//! spread and `l+1..2l` the negative spread.

use alloc::vec;
use alloc::vec::Vec;

use crate::linalg::{chol, cholupdate, inv_in_place, qr, LinalgError, RankOne};
use crate::matrix::{mul, mul_new, tran};
use crate::traits::FloatScalar;

/// Merwe-scaled weights and spread factor.
pub(crate) struct Weights<T> {
    pub wm: Vec<T>,
    pub wc: Vec<T>,
    pub gamma: T,
}

impl<T: FloatScalar> Weights<T> {
    pub fn new(l: usize, alpha: T, beta: T, kappa: T) -> Self {
        let n = 2 * l + 1;
        let lf = T::from_count(l);
        let lambda = alpha * alpha * (lf + kappa) - lf;
        let denom = lf + lambda;

        let wi = T::lit(0.5) / denom;
        let mut wm = vec![wi; n];
        let mut wc = vec![wi; n];
        wm[0] = lambda / denom;
        wc[0] = wm[0] + T::one() - alpha * alpha + beta;

        Self {
            wm,
            wc,
            gamma: denom.sqrt(),
        }
    }
}

/// `pts = [c, c + γ S, c - γ S]`.
pub(crate) fn sigma_points<T: FloatScalar>(pts: &mut [T], c: &[T], s: &[T], gamma: T, l: usize) {
    let n = 2 * l + 1;
    for i in 0..l {
        pts[i * n] = c[i];
        for j in 0..l {
            let d = gamma * s[i * l + j];
            pts[i * n + 1 + j] = c[i] + d;
            pts[i * n + 1 + l + j] = c[i] - d;
        }
    }
}

/// `mean = Σ wm_j pts_j`.
pub(crate) fn weighted_mean<T: FloatScalar>(mean: &mut [T], pts: &[T], wm: &[T], l: usize) {
    let n = 2 * l + 1;
    for i in 0..l {
        let mut acc = T::zero();
        for j in 0..n {
            acc = acc + wm[j] * pts[i * n + j];
        }
        mean[i] = acc;
    }
}

/// Lower square-root covariance of a propagated sigma set plus additive
/// noise with covariance `noise`.
///
/// The compound `[√|wc₁| (pts₁.. - mean), chol(noise)]ᵀ` (`3l × l`) is
/// factored by QR; the transposed leading block of `R` is a lower factor
/// of the spread-plus-noise covariance. The centre point then enters as a
/// rank-one update, or a downdate when `wc₀ < 0`.
pub(crate) fn sqrt_covariance<T: FloatScalar>(
    s: &mut [T],
    pts: &[T],
    mean: &[T],
    noise: &[T],
    wc: &[T],
    l: usize,
) -> Result<(), LinalgError> {
    let n = 2 * l + 1;
    let m = 3 * l;
    let w1 = wc[1].abs().sqrt();

    let mut noise_sqrt = vec![T::zero(); l * l];
    chol(noise, &mut noise_sqrt, l)?;

    // Compound in its l × 3l orientation, then transposed
    let mut compound = vec![T::zero(); l * m];
    for i in 0..l {
        for j in 0..2 * l {
            compound[i * m + j] = w1 * (pts[i * n + 1 + j] - mean[i]);
        }
        for j in 0..l {
            compound[i * m + 2 * l + j] = noise_sqrt[i * l + j];
        }
    }
    let mut compound_t = vec![T::zero(); m * l];
    tran(&mut compound_t, &compound, l, m)?;

    let mut r = vec![T::zero(); m * l];
    qr(&compound_t, None, &mut r, m, l, true)?;

    // S = Rᵀ over the leading l × l block
    for i in 0..l {
        for j in 0..l {
            s[i * l + j] = if j <= i { r[j * l + i] } else { T::zero() };
        }
    }

    let centre: Vec<T> = (0..l).map(|i| pts[i * n] - mean[i]).collect();
    let kind = if wc[0] < T::zero() {
        RankOne::Downdate
    } else {
        RankOne::Update
    };
    cholupdate(s, &centre, l, kind)
}

/// Cross-covariance `P = (A - ā) diag(wc) (B - b̄)ᵀ` of two sigma sets.
pub(crate) fn cross_covariance<T: FloatScalar>(
    p: &mut [T],
    a: &[T],
    a_mean: &[T],
    b: &[T],
    b_mean: &[T],
    wc: &[T],
    l: usize,
) {
    let n = 2 * l + 1;
    for i in 0..l {
        for k in 0..l {
            let mut acc = T::zero();
            for j in 0..n {
                acc = acc + wc[j] * (a[i * n + j] - a_mean[i]) * (b[k * n + j] - b_mean[k]);
            }
            p[i * l + k] = acc;
        }
    }
}

/// Measurement correction shared by both square-root filters.
///
/// Forms `K = P (Sy Syᵀ)⁻¹`, moves `x` by `K (z - ẑ)` and downdates the
/// lower factor `s` by each column of `K Sy`.
pub(crate) fn correct<T: FloatScalar>(
    x: &mut [T],
    s: &mut [T],
    p_cross: &[T],
    sy: &[T],
    z: &[T],
    z_hat: &[T],
    l: usize,
) -> Result<(), LinalgError> {
    let mut sy_t = vec![T::zero(); l * l];
    tran(&mut sy_t, sy, l, l)?;
    let mut pyy = mul_new(sy, &sy_t, l, l, l)?;
    inv_in_place(&mut pyy, l)?;
    let gain = mul_new(p_cross, &pyy, l, l, l)?;

    let innovation: Vec<T> = z[..l].iter().zip(z_hat).map(|(&a, &b)| a - b).collect();
    let mut step = vec![T::zero(); l];
    mul(&mut step, &gain, &innovation, l, l, l, 1)?;
    for (xi, &d) in x.iter_mut().zip(step.iter()) {
        *xi = *xi + d;
    }

    let u = mul_new(&gain, sy, l, l, l)?;
    let mut col = vec![T::zero(); l];
    for j in 0..l {
        for i in 0..l {
            col[i] = u[i * l + j];
        }
        cholupdate(s, &col, l, RankOne::Downdate)?;
    }
    Ok(())
}
