//! Dense linear algebra on flat row-major buffers.
//!
//! Every routine takes explicit dimensions and works on caller-owned slices.
//! Routines that historically accepted the same buffer as input and output
//! come in two flavours: an out-of-place form and an `*_in_place` form that
//! stages through a scratch copy. Both produce identical results.
//!
//! # Direct solvers
//!
//! - [`lup`], [`det`], [`inv`], [`linsolve_lup`]: LU with partial pivoting
//!   through a permutation vector (rows are never swapped physically)
//! - [`linsolve_gauss`]: regularized normal equations `(AᵀA + αI) x = Aᵀb`
//! - [`chol`], [`cholupdate`], [`linsolve_chol`]: Cholesky family
//! - [`linsolve_lower_triangular`], [`linsolve_upper_triangular`]
//! - [`linsolve_markov`]: lower-triangular Toeplitz solve for Markov parameters
//! - [`nonlinsolve`], [`nonlinsolve_random`]: damped residual iteration for
//!   square nonlinear systems
//!
//! # Orthogonal decompositions
//!
//! - [`qr`], [`linsolve_qr`]: Householder QR and least squares
//! - [`svd_jacobi_one_sided`], [`svd_golub_reinsch`], [`pinv`]
//!
//! # Eigenvalues and matrix functions
//!
//! - [`balance`], [`hessenberg`], [`eig`]: general real eigenvalues
//! - [`eig_sym`], [`eig_sym_in_place`]: symmetric Jacobi eigen-decomposition
//! - [`expm`], [`dlyap`], [`hankel`]
//!
//! ```
//! use ctrlkit::linalg::{det, inv};
//!
//! let a = [3.0_f32, 4.0, 5.0, 2.0, 5.0, 6.0, 5.0, 6.0, 7.0];
//! let mut ai = [0.0_f32; 9];
//! inv(&mut ai, &a, 3).unwrap();
//! assert!((ai[0] - 0.25).abs() < 1e-4);
//! assert!((ai[3] + 4.0).abs() < 1e-4);
//! assert!((det(&a, 3).unwrap() + 4.0).abs() < 1e-4);
//! ```

mod balance;
mod cholesky;
mod expm;
mod hankel;
mod hessenberg;
mod lu;
mod lyapunov;
mod nonlinsolve;
mod qr;
mod schur;
mod svd;
mod symmetric_eigen;
mod triangular;

pub use balance::{balance, MAX_BALANCE_SWEEPS};
pub use cholesky::{chol, cholupdate, linsolve_chol, RankOne};
pub use expm::{expm, expm_in_place, MAX_EXPM_TERMS};
pub use hankel::{hankel, linsolve_markov};
pub use hessenberg::hessenberg;
pub use lu::{det, inv, inv_in_place, linsolve_gauss, linsolve_lup, lup};
pub use lyapunov::dlyap;
pub use nonlinsolve::{nonlinsolve, nonlinsolve_random, MAX_NONLINSOLVE_ITERATIONS};
pub use qr::{linsolve_qr, qr};
#[cfg(feature = "complex")]
pub use schur::eig_complex;
pub use schur::eig;
pub use svd::{pinv, svd_golub_reinsch, svd_jacobi_one_sided, MAX_ITERATION_COUNT_SVD};
pub use symmetric_eigen::{eig_sym, eig_sym_in_place, MAX_JACOBI_SWEEPS};
pub use triangular::{linsolve_lower_triangular, linsolve_upper_triangular};

/// Errors from linear algebra operations.
///
/// Invalid arguments ([`DimensionMismatch`](LinalgError::DimensionMismatch),
/// [`InvalidDimensions`](LinalgError::InvalidDimensions)) are kept apart from
/// numerical failures so callers can tell a wiring bug from a bad matrix.
///
/// ```
/// use ctrlkit::linalg::{inv, LinalgError};
///
/// let singular = [1.0_f32, 2.0, 0.0, 0.0];
/// let mut ai = [0.0_f32; 4];
/// assert_eq!(inv(&mut ai, &singular, 2), Err(LinalgError::Singular));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinalgError {
    /// Buffer lengths or inner dimensions do not agree.
    DimensionMismatch,
    /// Dimensions are zero or otherwise incompatible with the operation.
    InvalidDimensions,
    /// Matrix is singular or nearly singular.
    Singular,
    /// A Cholesky downdate would make the matrix indefinite.
    NotPositiveDefinite,
    /// Iterative algorithm did not converge within its iteration cap.
    ConvergenceFailure,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::DimensionMismatch => write!(f, "matrix dimensions do not match"),
            LinalgError::InvalidDimensions => write!(f, "invalid matrix dimensions"),
            LinalgError::Singular => write!(f, "matrix is singular"),
            LinalgError::NotPositiveDefinite => write!(f, "matrix is not positive definite"),
            LinalgError::ConvergenceFailure => write!(f, "iterative algorithm did not converge"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
