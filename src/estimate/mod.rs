//! State estimation: square-root unscented Kalman filter and zero-phase
//! smoothing.
//!
//! - [`SrUkf`]: square-root UKF over a nonlinear discrete transition with
//!   full-state measurements. The transition is any
//!   `FnMut(&mut [T], &[T], &[T])` closure writing the successor state
//!   from `(x, u)`.
//! - [`filtfilt`]: forward/backward first-order low-pass for offline
//!   smoothing of sampled signals.
//! - [`mcs_collect`], [`mcs_estimate`], [`mcs_clean`]: Monte Carlo
//!   histogram that returns the most frequent value of a noisy vector.
//!
//! The sigma-point helpers are shared with the parameter estimator in
//! [`crate::sysid`].
//!
//! # Square-root UKF
//!
//! ```
//! use ctrlkit::estimate::SrUkf;
//!
//! let mut ukf = SrUkf::new(&[0.0_f64], &[1.0]).with_alpha(1.0);
//! for _ in 0..20 {
//!     // x⁺ = 0.5 x + 1, measured as 2.0
//!     ukf.step(&[2.0], &[], &[0.1], &[0.01], |next, x, _| next[0] = 0.5 * x[0] + 1.0)
//!         .unwrap();
//! }
//! assert!((ukf.state()[0] - 2.0).abs() < 1e-3);
//! ```

mod filtfilt;
mod mcs;
mod srukf;
pub(crate) mod unscented;

#[cfg(test)]
mod tests;

pub use filtfilt::filtfilt;
pub use mcs::{mcs_clean, mcs_collect, mcs_estimate};
pub use srukf::SrUkf;

use crate::linalg::LinalgError;

/// Errors from state estimation algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EstimateError {
    /// Empty state or a buffer shorter than the state dimension requires.
    InvalidDimensions,
    /// A factorization inside the filter failed, typically a singular noise
    /// covariance or a downdate that lost positive definiteness.
    Linalg(LinalgError),
}

impl From<LinalgError> for EstimateError {
    fn from(e: LinalgError) -> Self {
        EstimateError::Linalg(e)
    }
}

impl core::fmt::Display for EstimateError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EstimateError::InvalidDimensions => write!(f, "invalid estimator dimensions"),
            EstimateError::Linalg(e) => write!(f, "estimator factorization failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EstimateError {}
