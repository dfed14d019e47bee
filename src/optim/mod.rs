//! Optimization: linear programming by the simplex method.
//!
//! - [`linprog`]: maximize `cᵀx` subject to `A x ≤ b`, or minimize `cᵀx`
//!   subject to `A x ≥ b` through the dual problem. `x ≥ 0` in both cases.
//!
//! The model-predictive controller in [`crate::control`] is built on top of
//! this solver.
//!
//! ```
//! use ctrlkit::optim::{linprog, LinprogStatus, Objective};
//!
//! // max 3x + 5y  s.t.  x ≤ 4, 2y ≤ 12, 3x + 2y ≤ 18
//! let c = [3.0_f64, 5.0];
//! let a = [1.0, 0.0, 0.0, 2.0, 3.0, 2.0];
//! let b = [4.0, 12.0, 18.0];
//! let mut x = [0.0; 2];
//! let res = linprog(&c, &a, &b, &mut x, 3, 2, Objective::Maximize, 10).unwrap();
//! assert_eq!(res.status, LinprogStatus::Optimal);
//! assert!((x[0] - 2.0).abs() < 1e-12 && (x[1] - 6.0).abs() < 1e-12);
//! assert!((res.value - 36.0).abs() < 1e-12);
//! ```

mod linprog;

#[cfg(test)]
mod tests;

pub use linprog::linprog;

/// Errors from optimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptimError {
    /// Zero dimensions or buffers shorter than their declared shape.
    InvalidDimensions,
}

impl core::fmt::Display for OptimError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OptimError::InvalidDimensions => write!(f, "invalid problem dimensions"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OptimError {}

/// Direction of a linear program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    /// `max cᵀx` subject to `A x ≤ b`, `x ≥ 0`.
    Maximize,
    /// `min cᵀx` subject to `A x ≥ b`, `x ≥ 0`.
    Minimize,
}

/// How a simplex run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinprogStatus {
    /// No improving column remains.
    Optimal,
    /// The pivot budget ran out first.
    IterationLimit,
    /// An improving column has no positive entry, so the objective is
    /// unbounded in that direction.
    Unbounded,
}

/// Result of [`linprog`].
#[derive(Debug, Clone, Copy)]
pub struct LinprogResult<T> {
    /// Objective value `cᵀx` of the returned basic solution.
    pub value: T,
    /// Number of pivots performed.
    pub iterations: usize,
    /// Termination reason.
    pub status: LinprogStatus,
}
