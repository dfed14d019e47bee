//! System identification from recorded input/output data.
//!
//! - [`Rls`]: recursive least squares for ARX/ARMAX polynomial models with
//!   exponential forgetting
//! - [`okid`]: Markov parameters (impulse response) from input/output records
//! - [`okid_era`]: eigensystem realization of a state-space model
//!   `(A, B, C)` from an input/output record
//! - [`SrUkfId`]: square-root unscented filter estimating the parameters of
//!   a nonlinear model `d = G(x, w)`
//!
//! ```
//! use ctrlkit::sysid::Rls;
//!
//! // y(t) = 0.7 y(t-1) + 0.5 u(t-1)
//! let mut rls = Rls::new(1, 1, 0, 1000.0_f64, 1.0).unwrap();
//! let (mut y, mut u_prev) = (0.0, 0.0);
//! for t in 0..100 {
//!     let u = (0.3 * t as f64).sin() + 0.5 * (1.7 * t as f64).sin();
//!     y = 0.7 * y + 0.5 * u_prev;
//!     rls.update(u, y);
//!     u_prev = u;
//! }
//! // Past outputs enter the regressor negated
//! assert!((rls.theta()[0] + 0.7).abs() < 1e-3);
//! assert!((rls.theta()[1] - 0.5).abs() < 1e-3);
//! ```

mod okid;
mod rls;
mod srukf_id;

#[cfg(test)]
mod tests;

pub use okid::{okid, okid_era};
pub use rls::Rls;
pub use srukf_id::SrUkfId;

use crate::linalg::LinalgError;

/// Errors from system identification routines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SysidError {
    /// Empty model, a requested order the data cannot support, or a buffer
    /// shorter than its dimensions.
    InvalidDimensions,
    /// A decomposition or solve inside the identification failed.
    Linalg(LinalgError),
}

impl From<LinalgError> for SysidError {
    fn from(e: LinalgError) -> Self {
        SysidError::Linalg(e)
    }
}

impl core::fmt::Display for SysidError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SysidError::InvalidDimensions => write!(f, "invalid identification dimensions"),
            SysidError::Linalg(e) => write!(f, "identification failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SysidError {}
