use alloc::vec;
use alloc::vec::Vec;

use super::SysidError;
use crate::traits::FloatScalar;

/// Recursive least-squares estimator for polynomial input/output models.
///
/// The regressor holds three segments: `np` past outputs (negated), `nz`
/// past inputs and `nze` past prediction errors, so `theta` is laid out as
/// `[a₁ … a_np, b₁ … b_nz, c₁ … c_nze]` for the model
///
/// ```text
/// y(t) + a₁ y(t-1) + … = b₁ u(t-1) + … + c₁ e(t-1) + … + e(t)
/// ```
///
/// The first [`update`](Self::update) after construction or
/// [`reset`](Self::reset) re-seeds the estimate: `theta = 0`, `P = pq I`.
/// Every update, including that first one, runs the recursion
///
/// ```text
/// e = y - φᵀθ
/// P = (P - P φ φᵀ P / (λ + φᵀ P φ)) / λ
/// θ = θ + P φ e
/// ```
///
/// with forgetting factor `λ` in `(0, 1]`.
#[derive(Debug, Clone)]
pub struct Rls<T> {
    np: usize,
    nz: usize,
    nze: usize,
    pq: T,
    forgetting: T,
    theta: Vec<T>,
    p: Vec<T>,
    phi: Vec<T>,
    past_e: T,
    past_y: T,
    past_u: T,
    count: u8,
}

impl<T: FloatScalar> Rls<T> {
    /// Estimator with `np` output, `nz` input and `nze` error lags.
    ///
    /// `pq` is the initial covariance scale; large values (`1e3`) mean an
    /// uninformative prior.
    ///
    /// # Errors
    ///
    /// [`SysidError::InvalidDimensions`] if the model has no parameters.
    pub fn new(np: usize, nz: usize, nze: usize, pq: T, forgetting: T) -> Result<Self, SysidError> {
        let n = np + nz + nze;
        if n == 0 {
            return Err(SysidError::InvalidDimensions);
        }
        Ok(Self {
            np,
            nz,
            nze,
            pq,
            forgetting,
            theta: vec![T::zero(); n],
            p: vec![T::zero(); n * n],
            phi: vec![T::zero(); n],
            past_e: T::zero(),
            past_y: T::zero(),
            past_u: T::zero(),
            count: 0,
        })
    }

    /// Number of estimated parameters, `np + nz + nze`.
    pub fn num_params(&self) -> usize {
        self.theta.len()
    }

    /// Current parameter estimate.
    pub fn theta(&self) -> &[T] {
        &self.theta
    }

    /// Current covariance, `num_params × num_params` row-major.
    pub fn covariance(&self) -> &[T] {
        &self.p
    }

    /// Regressor used by the latest update.
    pub fn regressor(&self) -> &[T] {
        &self.phi
    }

    /// Re-seed the estimator on the next [`update`](Self::update).
    pub fn reset(&mut self) {
        log::debug!("rls: reset requested, re-seeding on next update");
        self.count = 0;
    }

    /// Feed one input/output sample and return the a-priori prediction
    /// error `y - φᵀθ`.
    pub fn update(&mut self, u: T, y: T) -> T {
        let n = self.num_params();
        match self.count {
            0 => {
                self.phi.fill(T::zero());
                self.theta.fill(T::zero());
                self.p.fill(T::zero());
                for i in 0..n {
                    self.p[i * n + i] = self.pq;
                }
                self.past_e = T::zero();
                self.past_y = T::zero();
                self.past_u = T::zero();
                self.count = 1;
            }
            c => {
                if c >= 2 {
                    self.shift_segments();
                } else {
                    self.count = 2;
                }
                self.insert_past();
            }
        }

        let e = self.recursion(y);
        self.past_y = -y;
        self.past_u = u;
        e
    }

    /// Segment boundaries `(start, len)` for outputs, inputs and errors.
    fn segments(&self) -> [(usize, usize); 3] {
        [
            (0, self.np),
            (self.np, self.nz),
            (self.np + self.nz, self.nze),
        ]
    }

    fn shift_segments(&mut self) {
        for (start, len) in self.segments() {
            for i in (1..len).rev() {
                self.phi[start + i] = self.phi[start + i - 1];
            }
        }
    }

    fn insert_past(&mut self) {
        let values = [self.past_y, self.past_u, self.past_e];
        for ((start, len), v) in self.segments().into_iter().zip(values) {
            if len > 0 {
                self.phi[start] = v;
            }
        }
    }

    fn recursion(&mut self, y: T) -> T {
        let n = self.num_params();

        let mut e = y;
        for i in 0..n {
            e = e - self.phi[i] * self.theta[i];
        }
        self.past_e = e;

        // P φ and φᵀ P
        let mut p_phi = vec![T::zero(); n];
        let mut phi_p = vec![T::zero(); n];
        for i in 0..n {
            for j in 0..n {
                p_phi[i] = p_phi[i] + self.p[i * n + j] * self.phi[j];
                phi_p[j] = phi_p[j] + self.phi[i] * self.p[i * n + j];
            }
        }
        let mut denom = self.forgetting;
        for i in 0..n {
            denom = denom + phi_p[i] * self.phi[i];
        }

        for i in 0..n {
            for j in 0..n {
                let v = self.p[i * n + j] - p_phi[i] * phi_p[j] / denom;
                self.p[i * n + j] = v / self.forgetting;
            }
        }

        for i in 0..n {
            let mut gain = T::zero();
            for j in 0..n {
                gain = gain + self.p[i * n + j] * self.phi[j];
            }
            self.theta[i] = self.theta[i] + gain * e;
        }
        e
    }
}
