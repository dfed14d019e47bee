use alloc::vec;
use alloc::vec::Vec;

use super::unscented::{
    correct, cross_covariance, sigma_points, sqrt_covariance, weighted_mean, Weights,
};
use super::EstimateError;
use crate::traits::FloatScalar;

/// Square-root unscented Kalman filter for state estimation.
///
/// Propagates the lower-triangular factor `S` (`S Sᵀ = P`) instead of the
/// covariance itself, so `P` stays positive semi-definite by construction.
/// The measurement is the full state (`y = x + noise`), which keeps the
/// interface to a single transition callback.
///
/// Sigma points use Merwe scaling with `kappa = 0`. Defaults are
/// `alpha = 0.1` and `beta = 2`.
///
/// # Example
///
/// ```
/// use ctrlkit::estimate::SrUkf;
///
/// // Two states, x⁺ = [x₀ + 0.1 x₁, 0.9 x₁]
/// let mut f = SrUkf::new(&[0.0_f64, 1.0], &[1.0, 0.0, 0.0, 1.0]).with_alpha(0.5);
/// let q = [1e-4, 0.0, 0.0, 1e-4];
/// let r = [0.01, 0.0, 0.0, 0.01];
///
/// f.step(&[0.1, 0.9], &[], &r, &q, |dx, x, _u| {
///     dx[0] = x[0] + 0.1 * x[1];
///     dx[1] = 0.9 * x[1];
/// })
/// .unwrap();
/// assert!((f.state()[0] - 0.1).abs() < 1e-2);
/// ```
#[derive(Debug, Clone)]
pub struct SrUkf<T> {
    x: Vec<T>,
    s: Vec<T>,
    alpha: T,
    beta: T,
}

impl<T: FloatScalar> SrUkf<T> {
    /// Filter over `x.len()` states starting at `x` with lower factor `s`.
    ///
    /// `s` is checked against the state dimension on every [`step`](Self::step).
    pub fn new(x: &[T], s: &[T]) -> Self {
        Self {
            x: x.to_vec(),
            s: s.to_vec(),
            alpha: T::lit(0.1),
            beta: T::lit(2.0),
        }
    }

    /// Sigma-point spread, typically in `(0, 1]`.
    pub fn with_alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }

    /// Prior distribution weight; 2 is optimal for Gaussian noise.
    pub fn with_beta(mut self, beta: T) -> Self {
        self.beta = beta;
        self
    }

    /// State dimension.
    pub fn dim(&self) -> usize {
        self.x.len()
    }

    /// Current state estimate.
    pub fn state(&self) -> &[T] {
        &self.x
    }

    /// Current lower square-root covariance, `dim × dim` row-major.
    pub fn sqrt_covariance(&self) -> &[T] {
        &self.s
    }

    /// Reconstruct `P = S Sᵀ`.
    pub fn covariance(&self) -> Vec<T> {
        let l = self.dim();
        let mut p = vec![T::zero(); l * l];
        for i in 0..l {
            for j in 0..l {
                let mut acc = T::zero();
                for k in 0..l {
                    acc = acc + self.s[i * l + k] * self.s[j * l + k];
                }
                p[i * l + j] = acc;
            }
        }
        p
    }

    /// One predict/correct cycle.
    ///
    /// - `y`: measurement of the full state
    /// - `u`: input forwarded to `f` untouched
    /// - `rn`: measurement noise covariance (`dim × dim`)
    /// - `rv`: process noise covariance (`dim × dim`)
    /// - `f(next, x, u)`: discrete transition writing the successor of `x`
    ///
    /// # Errors
    ///
    /// [`EstimateError::InvalidDimensions`] if the state is empty or a
    /// buffer is short, [`EstimateError::Linalg`] if a noise covariance is
    /// singular or a downdate loses positive definiteness. The filter state
    /// is left untouched on error.
    pub fn step<F>(
        &mut self,
        y: &[T],
        u: &[T],
        rn: &[T],
        rv: &[T],
        mut f: F,
    ) -> Result<(), EstimateError>
    where
        F: FnMut(&mut [T], &[T], &[T]),
    {
        let l = self.dim();
        if l == 0 || self.s.len() < l * l || y.len() < l || rn.len() < l * l || rv.len() < l * l {
            return Err(EstimateError::InvalidDimensions);
        }
        let n = 2 * l + 1;
        let w = Weights::new(l, self.alpha, self.beta, T::zero());

        // Predict: propagate sigma points through f
        let mut pts = vec![T::zero(); l * n];
        sigma_points(&mut pts, &self.x, &self.s, w.gamma, l);

        let mut propagated = vec![T::zero(); l * n];
        let mut point = vec![T::zero(); l];
        let mut next = vec![T::zero(); l];
        for j in 0..n {
            for i in 0..l {
                point[i] = pts[i * n + j];
            }
            f(&mut next, &point, u);
            for i in 0..l {
                propagated[i * n + j] = next[i];
            }
        }

        let mut x_pred = vec![T::zero(); l];
        weighted_mean(&mut x_pred, &propagated, &w.wm, l);

        let mut sx = vec![T::zero(); l * l];
        sqrt_covariance(&mut sx, &propagated, &x_pred, rv, &w.wc, l)?;

        // Identity observation of the propagated set
        let y_pred = x_pred.clone();
        let mut sy = vec![T::zero(); l * l];
        sqrt_covariance(&mut sy, &propagated, &y_pred, rn, &w.wc, l)?;

        let mut pxy = vec![T::zero(); l * l];
        cross_covariance(&mut pxy, &propagated, &x_pred, &propagated, &y_pred, &w.wc, l);

        correct(&mut x_pred, &mut sx, &pxy, &sy, y, &y_pred, l)?;

        self.x = x_pred;
        self.s = sx;
        Ok(())
    }
}
