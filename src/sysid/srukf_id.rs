use alloc::vec;
use alloc::vec::Vec;

use super::SysidError;
use crate::estimate::unscented::{
    correct, cross_covariance, sigma_points, sqrt_covariance, weighted_mean, Weights,
};
use crate::traits::FloatScalar;

/// Square-root unscented Kalman filter for parameter estimation.
///
/// Treats the parameters `w` of a nonlinear model `d = G(x, w)` as a random
/// walk and corrects them from each measured output `d`. The model output
/// has the same length as the parameter vector.
///
/// Sigma points use `kappa = 3 - L`. Before each step the factor `Sw` is
/// inflated by `1/√λ`, so `λ < 1` discounts old data the way a
/// forgetting factor does in recursive least squares. Defaults are
/// `alpha = 0.1`, `beta = 2`, `λ = 1`.
///
/// # Example
///
/// ```
/// use ctrlkit::sysid::SrUkfId;
///
/// // d = w₀ x₀, measured exactly as 3.0 with x₀ = 1.5
/// let mut id = SrUkfId::new(&[0.0_f64], &[1.0]).with_alpha(1.0);
/// for _ in 0..50 {
///     id.step(&[3.0], &[1.5], &[1e-3], |d, x, w| d[0] = w[0] * x[0]).unwrap();
/// }
/// assert!((id.params()[0] - 2.0).abs() < 1e-2);
/// ```
#[derive(Debug, Clone)]
pub struct SrUkfId<T> {
    w: Vec<T>,
    sw: Vec<T>,
    alpha: T,
    beta: T,
    forgetting: T,
}

impl<T: FloatScalar> SrUkfId<T> {
    /// Estimator over `w.len()` parameters with lower factor `sw`.
    pub fn new(w: &[T], sw: &[T]) -> Self {
        Self {
            w: w.to_vec(),
            sw: sw.to_vec(),
            alpha: T::lit(0.1),
            beta: T::lit(2.0),
            forgetting: T::one(),
        }
    }

    pub fn with_alpha(mut self, alpha: T) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_beta(mut self, beta: T) -> Self {
        self.beta = beta;
        self
    }

    /// Forgetting factor `λ` in `(0, 1]`.
    pub fn with_forgetting(mut self, lambda: T) -> Self {
        self.forgetting = lambda;
        self
    }

    /// Number of parameters.
    pub fn dim(&self) -> usize {
        self.w.len()
    }

    /// Current parameter estimate.
    pub fn params(&self) -> &[T] {
        &self.w
    }

    /// Current lower square-root covariance of the parameters.
    pub fn sqrt_covariance(&self) -> &[T] {
        &self.sw
    }

    /// One correction from the measured output `d` at operating point `x`.
    ///
    /// - `re`: measurement noise covariance (`dim × dim`)
    /// - `g(d, x, w)`: model writing its output for parameters `w`
    ///
    /// # Errors
    ///
    /// [`SysidError::InvalidDimensions`] if there are no parameters or a
    /// buffer is short, [`SysidError::Linalg`] if `re` is singular or a
    /// downdate loses positive definiteness. The estimate is left untouched
    /// on error.
    pub fn step<G>(&mut self, d: &[T], x: &[T], re: &[T], mut g: G) -> Result<(), SysidError>
    where
        G: FnMut(&mut [T], &[T], &[T]),
    {
        let l = self.dim();
        if l == 0 || self.sw.len() < l * l || d.len() < l || re.len() < l * l {
            return Err(SysidError::InvalidDimensions);
        }
        let n = 2 * l + 1;
        let weights = Weights::new(l, self.alpha, self.beta, T::lit(3.0) - T::from_count(l));

        let inflate = T::one() / self.forgetting.sqrt();
        let mut sw: Vec<T> = self.sw[..l * l].iter().map(|&v| v * inflate).collect();

        let mut pts = vec![T::zero(); l * n];
        sigma_points(&mut pts, &self.w, &sw, weights.gamma, l);

        let mut outputs = vec![T::zero(); l * n];
        let mut point = vec![T::zero(); l];
        let mut out = vec![T::zero(); l];
        for j in 0..n {
            for i in 0..l {
                point[i] = pts[i * n + j];
            }
            g(&mut out, x, &point);
            for i in 0..l {
                outputs[i * n + j] = out[i];
            }
        }

        let mut d_hat = vec![T::zero(); l];
        weighted_mean(&mut d_hat, &outputs, &weights.wm, l);

        let mut sd = vec![T::zero(); l * l];
        sqrt_covariance(&mut sd, &outputs, &d_hat, re, &weights.wc, l)?;

        let mut pwd = vec![T::zero(); l * l];
        cross_covariance(&mut pwd, &pts, &self.w, &outputs, &d_hat, &weights.wc, l);

        let mut w = self.w.clone();
        correct(&mut w, &mut sw, &pwd, &sd, d, &d_hat, l)?;

        self.w = w;
        self.sw = sw;
        Ok(())
    }
}
