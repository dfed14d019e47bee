//! Discrete-time control: state observers, discretization, LQI and MPC
//! control laws, model-reference adaptive control, a stability test and
//! the conversion of identified polynomial models to state space.
//!
//! A plant is described by the usual state-space triple passed as parallel
//! row-major buffers: `A` (`adim × adim`), `B` (`adim × rdim`) and `C`
//! (`ydim × adim`). Nothing is bundled into a model object; the dimensions
//! travel with every call.
//!
//! # Examples
//!
//! ```
//! use ctrlkit::control::c2d;
//!
//! // Double integrator, sampled at 0.1 s
//! let a = [0.0_f64, 1.0, 0.0, 0.0];
//! let b = [0.0_f64, 1.0];
//! let (mut ad, mut bd) = ([0.0; 4], [0.0; 2]);
//! c2d(&mut ad, &mut bd, &a, &b, 2, 1, 0.1).unwrap();
//! assert!((ad[1] - 0.1).abs() < 1e-12);
//! assert!((bd[0] - 0.005).abs() < 1e-12);
//! ```
//!
//! ```
//! use ctrlkit::control::kalman;
//!
//! // x⁺ = A x + B u + K (y - C x) on a scalar plant
//! let mut xout = [0.0_f64];
//! kalman(&mut xout, &[0.5], &[2.0], &[1.0], &[1.0], &[0.1], &[3.0], &[1.0], 1, 1, 1).unwrap();
//! assert!((xout[0] - 2.1).abs() < 1e-12);
//! ```

mod c2d;
mod kalman;
mod lqi;
mod mpc;
mod mrac;
mod stability;
mod theta2ss;


pub use c2d::c2d;
pub use kalman::{kalman, kalman_in_place};
pub use lqi::{lqi, AntiWindup};
pub use mpc::mpc;
pub use mrac::mrac;
pub use stability::is_stable;
pub use theta2ss::theta2ss;

use crate::linalg::LinalgError;
use crate::optim::OptimError;

/// Errors from control algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlError {
    /// A dimension is zero or a buffer is shorter than its declared shape.
    InvalidDimensions,
    /// An underlying linear algebra routine failed.
    Linalg(LinalgError),
}

impl From<LinalgError> for ControlError {
    fn from(e: LinalgError) -> Self {
        ControlError::Linalg(e)
    }
}

impl From<OptimError> for ControlError {
    fn from(e: OptimError) -> Self {
        match e {
            OptimError::InvalidDimensions => ControlError::InvalidDimensions,
        }
    }
}

impl core::fmt::Display for ControlError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ControlError::InvalidDimensions => write!(f, "invalid plant or horizon dimensions"),
            ControlError::Linalg(e) => write!(f, "linear algebra failure: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ControlError {}

/// Length check for a plain vector argument.
#[inline]
pub(super) fn check_vec<T>(v: &[T], n: usize) -> Result<(), ControlError> {
    if v.len() < n {
        Err(ControlError::InvalidDimensions)
    } else {
        Ok(())
    }
}
